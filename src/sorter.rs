//! Strategy-driven piece ordering.

use crate::model::{Piece, Strategy};
use std::cmp::Ordering;

fn by_area_desc(a: &Piece, b: &Piece) -> Ordering {
    b.adjusted_area().total_cmp(&a.adjusted_area())
}

/// Return the pieces reordered for a strategy. Ties keep their input order.
pub fn sort_pieces(pieces: &[Piece], strategy: Strategy) -> Vec<Piece> {
    let mut sorted = pieces.to_vec();
    match strategy {
        Strategy::LengthFirst => {
            sorted.sort_by(|a, b| b.adjusted_width().total_cmp(&a.adjusted_width()));
        }
        Strategy::WidthFirst => {
            sorted.sort_by(|a, b| b.adjusted_height().total_cmp(&a.adjusted_height()));
        }
        Strategy::GrainRespect => {
            sorted.sort_by(|a, b| {
                b.is_grain_constrained()
                    .cmp(&a.is_grain_constrained())
                    .then_with(|| by_area_desc(a, b))
            });
        }
        // Largest-first limits fragmentation for bottom-left-fill.
        Strategy::EfficiencyFirst
        | Strategy::CostMinimize
        | Strategy::CutMinimize
        | Strategy::SpeedOptimize
        | Strategy::WasteMinimize => {
            sorted.sort_by(by_area_desc);
        }
    }
    sorted
}
