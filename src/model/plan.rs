//! Placed pieces and per-sheet cutting plans.

use super::{Panel, Piece};
use crate::geometry::{self, Rect};
use serde::{Deserialize, Serialize};

/// Rotation applied to a placed piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    #[serde(rename = "0")]
    Deg0,
    #[serde(rename = "90")]
    Deg90,
}

impl Rotation {
    /// Rotation in degrees.
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
        }
    }

    /// Check if the piece was turned.
    pub fn is_rotated(self) -> bool {
        self == Rotation::Deg90
    }
}

/// One copy of a piece placed on a panel sheet.
///
/// `piece` is already in its placed orientation: a rotated copy carries
/// swapped dimensions, remapped allowances and flipped grain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedPiece {
    pub piece: Piece,
    pub x: f64,
    pub y: f64,
    pub rotation: Rotation,
    /// Footprint plus kerf, clipped to the panel.
    pub kerf_rect: Rect,
}

impl PlacedPiece {
    /// Adjusted footprint on the panel.
    pub fn footprint(&self) -> Rect {
        Rect::new(
            self.x,
            self.y,
            self.piece.adjusted_width(),
            self.piece.adjusted_height(),
        )
    }

    /// Perimeter cut length for this copy.
    pub fn cut_length(&self) -> f64 {
        2.0 * (self.piece.adjusted_width() + self.piece.adjusted_height())
    }
}

/// Layout of one panel sheet with derived totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuttingPlan {
    pub panel: Panel,
    /// Which copy of the panel entry this sheet is (0-based).
    pub sheet_index: u32,
    pub placements: Vec<PlacedPiece>,
    pub used_area: f64,
    pub cut_length: f64,
    pub waste_percent: f64,
    pub efficiency_percent: f64,
}

impl CuttingPlan {
    /// Build a plan and its totals from a finished placement list.
    pub fn from_placements(panel: Panel, sheet_index: u32, placements: Vec<PlacedPiece>) -> Self {
        let footprints: Vec<Rect> = placements.iter().map(PlacedPiece::footprint).collect();
        let used_area = geometry::total_area(&footprints);
        let cut_length = placements.iter().map(PlacedPiece::cut_length).sum();

        let panel_area = panel.area();
        let waste_percent = if panel_area > 0.0 {
            (panel_area - used_area) / panel_area * 100.0
        } else {
            100.0
        };
        let efficiency_percent = (100.0 - waste_percent).max(0.0);

        Self {
            panel,
            sheet_index,
            placements,
            used_area,
            cut_length,
            waste_percent,
            efficiency_percent,
        }
    }

    /// Check if nothing was placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Number of placed copies.
    pub fn piece_count(&self) -> usize {
        self.placements.len()
    }

    /// Unused panel area.
    pub fn waste_area(&self) -> f64 {
        (self.panel.area() - self.used_area).max(0.0)
    }

    /// Panel outline.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.panel.width, self.panel.height)
    }
}
