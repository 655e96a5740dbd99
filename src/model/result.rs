//! Aggregated optimization result.

use super::{CuttingPlan, Offcut, Strategy};
use serde::{Deserialize, Serialize};

/// Sheets consumed for one material + thickness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialUsage {
    pub material: String,
    pub thickness: f64,
    pub panels_used: usize,
    pub area_m2: f64,
    pub cost: f64,
}

/// Machine time estimate in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEstimate {
    pub cutting_minutes: f64,
    pub handling_minutes: f64,
    pub total_minutes: u32,
}

/// Copies of a piece left without a place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnplacedPiece {
    pub reference: String,
    pub name: String,
    pub quantity: u32,
}

/// Sheets consumed from one inventory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelUsage {
    pub panel_id: String,
    pub sheets: u32,
}

/// Result of one optimization run.
///
/// `feasible` is true exactly when `unplaced` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub strategy: Strategy,
    /// Name of the packer that produced the plans.
    pub algorithm: String,
    pub cutting_plans: Vec<CuttingPlan>,
    pub feasible: bool,
    pub offcuts: Vec<Offcut>,
    pub total_panels_used: usize,
    pub total_cost: f64,
    pub average_waste_percent: f64,
    pub average_efficiency_percent: f64,
    pub total_cut_length: f64,
    pub material_breakdown: Vec<MaterialUsage>,
    pub time_estimate: TimeEstimate,
    pub unplaced: Vec<UnplacedPiece>,
    pub warnings: Vec<String>,
}

impl OptimizationResult {
    /// Total placed copies across all plans.
    pub fn placed_count(&self) -> usize {
        self.cutting_plans.iter().map(CuttingPlan::piece_count).sum()
    }

    /// Total copies left unplaced.
    pub fn unplaced_count(&self) -> u32 {
        self.unplaced.iter().map(|u| u.quantity).sum()
    }

    /// Copies of `reference` that were placed.
    pub fn placed_count_for(&self, reference: &str) -> usize {
        self.cutting_plans
            .iter()
            .flat_map(|plan| &plan.placements)
            .filter(|p| p.piece.reference == reference)
            .count()
    }

    /// Sheets used per inventory entry, in first-use order.
    pub fn panel_usage(&self) -> Vec<PanelUsage> {
        let mut usage: Vec<PanelUsage> = Vec::new();
        for plan in &self.cutting_plans {
            match usage.iter_mut().find(|u| u.panel_id == plan.panel.id) {
                Some(entry) => entry.sheets += 1,
                None => usage.push(PanelUsage {
                    panel_id: plan.panel.id.clone(),
                    sheets: 1,
                }),
            }
        }
        usage
    }
}
