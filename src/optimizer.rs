//! Multi-panel optimization loop and result aggregation.

use crate::config::{OptimizerConfig, CUT_SPEED_MM_PER_MIN, HANDLING_MINUTES_PER_PANEL};
use crate::error::{OptimizeError, Result};
use crate::grain;
use crate::model::{
    CuttingPlan, MaterialUsage, OptimizationResult, Panel, Piece, Strategy, TimeEstimate,
    UnplacedPiece,
};
use crate::offcut;
use crate::packer::{GridPacker, PackOptions, PanelPacker};
use crate::sorter;
use rayon::prelude::*;
use std::cmp::Ordering;
use tracing::{debug, info, warn};

/// Drives a packer across the inventory for one strategy.
#[derive(Debug, Clone)]
pub struct Optimizer<P = GridPacker> {
    config: OptimizerConfig,
    packer: P,
}

impl Optimizer<GridPacker> {
    /// Create an optimizer using the grid packer at the configured step.
    pub fn new(config: OptimizerConfig) -> Self {
        let packer = GridPacker::new(config.grid_step);
        Self { config, packer }
    }
}

impl<P: PanelPacker> Optimizer<P> {
    /// Create an optimizer with a custom packer.
    pub fn with_packer(config: OptimizerConfig, packer: P) -> Self {
        Self { config, packer }
    }

    /// Active configuration.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Place `pieces` on `panels`, visiting panels in the given order.
    ///
    /// Every panel entry supplies up to `stock` sheets. Neither input is
    /// modified; quantities are tracked on a private copy. A negative kerf is
    /// an input error.
    pub fn optimize(&self, pieces: &[Piece], panels: &[Panel]) -> Result<OptimizationResult> {
        if panels.is_empty() {
            return Err(OptimizeError::NoPanels);
        }
        if self.config.kerf_width < 0.0 {
            return Err(OptimizeError::InvalidInput {
                message: format!("Negative kerf width ({})", self.config.kerf_width),
            });
        }

        let mut remaining = sorter::sort_pieces(pieces, self.config.strategy);
        let options = PackOptions::from(&self.config);
        let mut plans: Vec<CuttingPlan> = Vec::new();

        'panels: for panel in panels {
            for sheet in 0..panel.stock {
                if remaining.iter().all(|p| p.quantity == 0) {
                    break 'panels;
                }
                let plan = self.packer.pack(&mut remaining, panel, sheet, &options);
                if plan.is_empty() {
                    // Another blank sheet of the same panel would fare no better.
                    break;
                }
                plans.push(plan);
            }
        }

        let result = summarize(
            self.config.strategy,
            self.packer.name(),
            plans,
            &remaining,
            self.config.grain_respect,
        );
        info!(
            "{}: {} panel(s), {} piece(s) placed, efficiency {:.1}%",
            result.strategy,
            result.total_panels_used,
            result.placed_count(),
            result.average_efficiency_percent
        );
        Ok(result)
    }
}

/// Optimize with the default grid packer.
pub fn optimize(
    pieces: &[Piece],
    panels: &[Panel],
    strategy: Strategy,
    kerf_width: f64,
    grain_respect: bool,
) -> Result<OptimizationResult> {
    let config = OptimizerConfig::new(strategy)
        .with_kerf(kerf_width)
        .with_grain_respect(grain_respect);
    Optimizer::new(config).optimize(pieces, panels)
}

/// Run one optimization per strategy in parallel over the same inventory.
///
/// Results come back in the order of `strategies`.
pub fn compare_strategies(
    pieces: &[Piece],
    panels: &[Panel],
    config: &OptimizerConfig,
    strategies: &[Strategy],
) -> Result<Vec<OptimizationResult>> {
    if panels.is_empty() {
        return Err(OptimizeError::NoPanels);
    }
    strategies
        .par_iter()
        .map(|&strategy| Optimizer::new(config.for_strategy(strategy)).optimize(pieces, panels))
        .collect()
}

/// Pick the feasible result with the fewest panels, then the lowest cost.
pub fn best_result(results: &[OptimizationResult]) -> Option<&OptimizationResult> {
    results.iter().min_by(|a, b| {
        b.feasible
            .cmp(&a.feasible)
            .then(a.total_panels_used.cmp(&b.total_panels_used))
            .then(a.total_cost.partial_cmp(&b.total_cost).unwrap_or(Ordering::Equal))
    })
}

/// Cutting time at 2 m/min plus handling per sheet, in minutes.
pub fn estimate_time(cut_length: f64, panels_used: usize) -> TimeEstimate {
    let cutting_minutes = cut_length / CUT_SPEED_MM_PER_MIN;
    let handling_minutes = HANDLING_MINUTES_PER_PANEL * panels_used as f64;
    TimeEstimate {
        cutting_minutes,
        handling_minutes,
        total_minutes: (cutting_minutes + handling_minutes).round() as u32,
    }
}

/// Used sheets grouped by material and thickness, in first-use order.
pub fn material_breakdown(plans: &[CuttingPlan]) -> Vec<MaterialUsage> {
    plans.iter().fold(Vec::new(), |mut usage: Vec<MaterialUsage>, plan| {
        let panel = &plan.panel;
        match usage
            .iter_mut()
            .find(|u| u.material == panel.material && u.thickness == panel.thickness)
        {
            Some(entry) => {
                entry.panels_used += 1;
                entry.area_m2 += panel.area_m2();
                entry.cost += panel.sheet_cost();
            }
            None => usage.push(MaterialUsage {
                material: panel.material.clone(),
                thickness: panel.thickness,
                panels_used: 1,
                area_m2: panel.area_m2(),
                cost: panel.sheet_cost(),
            }),
        }
        usage
    })
}

#[derive(Default)]
struct Totals {
    cost: f64,
    waste: f64,
    efficiency: f64,
    cut_length: f64,
}

fn summarize(
    strategy: Strategy,
    algorithm: &str,
    plans: Vec<CuttingPlan>,
    remaining: &[Piece],
    grain_respect: bool,
) -> OptimizationResult {
    let totals = plans.iter().fold(Totals::default(), |t, plan| Totals {
        cost: t.cost + plan.panel.sheet_cost(),
        waste: t.waste + plan.waste_percent,
        efficiency: t.efficiency + plan.efficiency_percent,
        cut_length: t.cut_length + plan.cut_length,
    });
    let used = plans.len();
    let average = |sum: f64| if used > 0 { sum / used as f64 } else { 0.0 };

    let unplaced: Vec<UnplacedPiece> = remaining
        .iter()
        .filter(|p| p.quantity > 0)
        .map(|p| UnplacedPiece {
            reference: p.reference.clone(),
            name: p.name.clone(),
            quantity: p.quantity,
        })
        .collect();

    let mut warnings = Vec::new();
    if !unplaced.is_empty() {
        let count: u32 = unplaced.iter().map(|u| u.quantity).sum();
        warn!("{} piece(s) could not be placed", count);
        warnings.push(format!("{} pièce(s) non placée(s)", count));
        for piece in &unplaced {
            warnings.push(format!(
                "Pièce {} : {} exemplaire(s) sans emplacement",
                piece.reference, piece.quantity
            ));
        }
    }

    if grain_respect {
        for violation in plans.iter().flat_map(grain::validate_cutting_plan) {
            warn!("{}", violation);
            warnings.push(violation.to_string());
        }
    }

    let offcuts = offcut::process_offcuts(&plans);
    debug!("{} recoverable offcut(s)", offcuts.len());

    OptimizationResult {
        strategy,
        algorithm: algorithm.to_string(),
        feasible: unplaced.is_empty(),
        offcuts,
        total_panels_used: used,
        total_cost: totals.cost,
        average_waste_percent: average(totals.waste),
        average_efficiency_percent: average(totals.efficiency),
        total_cut_length: totals.cut_length,
        material_breakdown: material_breakdown(&plans),
        time_estimate: estimate_time(totals.cut_length, used),
        unplaced,
        warnings,
        cutting_plans: plans,
    }
}
