//! panel-cut - Panel cutting optimization engine.
//!
//! Turns a list of required rectangular pieces and an inventory of stock
//! panels into cutting plans. Pieces are sorted by a selectable strategy,
//! placed sheet by sheet with a bottom-left-fill grid search that honours saw
//! kerf, edge-band allowances and grain direction, and the leftover material
//! of every sheet is rated as a potential offcut.
//!
//! # Example
//!
//! ```no_run
//! use panel_cut::{optimize, Panel, Piece, Strategy};
//!
//! let panels = vec![Panel::new("S1", 2440.0, 1220.0)];
//! let pieces = vec![Piece::new("door", 600.0, 400.0, 4)];
//! let result = optimize(&pieces, &panels, Strategy::EfficiencyFirst, 3.0, true).unwrap();
//! println!("{} panel(s), feasible: {}", result.total_panels_used, result.feasible);
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod grain;
pub mod model;
pub mod offcut;
pub mod optimizer;
pub mod packer;
pub mod provider;
pub mod report;
pub mod sorter;
pub mod validation;

// Re-exports for convenience
pub use config::OptimizerConfig;
pub use error::{ErrorCode, OptimizeError, Result};
pub use model::{
    CuttingPlan, EdgeBanding, GrainDirection, Offcut, OffcutQuality, OptimizationResult, Panel,
    Piece, PlacedPiece, Rotation, Strategy, StrategyInfo,
};
pub use optimizer::{best_result, compare_strategies, optimize, Optimizer};
pub use packer::{GridPacker, PackOptions, PanelPacker};
pub use provider::{PanelInventory, Project, ProjectDefaults, ProjectSource};
pub use report::OptimizationReport;
pub use validation::{validate_request, ValidationResult};

/// Optimize a project against an inventory.
///
/// This is the high-level entry point:
/// 1. Load the project and the available panels
/// 2. Validate the request (pieces too large for every trimmed panel fail here)
/// 3. Run the optimizer with the project's kerf and trim defaults
///
/// `config` supplies strategy, grain and grid settings; its kerf and trim are
/// replaced by the project defaults.
pub fn plan_project(
    project: &dyn ProjectSource,
    inventory: &dyn PanelInventory,
    config: &OptimizerConfig,
) -> Result<OptimizationResult> {
    let project = project.load_project()?;
    let panels = inventory.available_panels()?;

    let defaults = project.defaults;
    let validation = validation::quick_validate(
        &project.pieces,
        &panels,
        defaults.kerf_width,
        defaults.trim_allowance,
    )?;
    for warning in &validation.warnings {
        tracing::warn!("{}", warning);
    }

    let config = config
        .clone()
        .with_kerf(defaults.kerf_width)
        .with_trim(defaults.trim_allowance);
    Optimizer::new(config).optimize(&project.pieces, &panels)
}
