//! Data model types for the panel optimizer.

mod offcut;
mod panel;
mod piece;
mod plan;
mod result;
mod strategy;

pub use offcut::{Offcut, OffcutQuality};
pub use panel::Panel;
pub use piece::{EdgeBanding, GrainDirection, Piece};
pub use plan::{CuttingPlan, PlacedPiece, Rotation};
pub use result::{MaterialUsage, OptimizationResult, PanelUsage, TimeEstimate, UnplacedPiece};
pub use strategy::{Strategy, StrategyInfo};
