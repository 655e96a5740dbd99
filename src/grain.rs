//! Grain compatibility, rotation and grain-driven priorities.

use crate::config::{NEUTRAL_GRAIN_BONUS, SMALL_PANEL_AREA_M2, SMALL_PANEL_PENALTY};
use crate::model::{CuttingPlan, GrainDirection, Panel, Piece};
use std::fmt;

/// Check if two grain directions can share a placement.
#[inline]
pub fn grains_compatible(a: GrainDirection, b: GrainDirection) -> bool {
    a == GrainDirection::None || b == GrainDirection::None || a == b
}

/// Check if a piece may sit on a panel without rotation.
pub fn check_compatibility(piece: &Piece, panel: &Panel) -> bool {
    grains_compatible(piece.grain, panel.grain)
}

/// Turn a piece by 90°.
///
/// Width and height swap, allowances move top↔left and bottom↔right, and a
/// constrained grain flips.
pub fn rotate(piece: &Piece) -> Piece {
    Piece {
        width: piece.height,
        height: piece.width,
        grain: piece.grain.flipped(),
        edge_banding: piece.edge_banding.rotated(),
        ..piece.clone()
    }
}

/// Check if the rotated piece is grain-compatible with the panel.
pub fn can_rotate_with_grain_respect(piece: &Piece, panel: &Panel) -> bool {
    grains_compatible(piece.grain.flipped(), panel.grain)
}

/// Orientations a piece may take on a panel: `(unrotated, rotated)`.
pub fn allowed_orientations(piece: &Piece, panel: &Panel, grain_respect: bool) -> (bool, bool) {
    if !grain_respect {
        return (true, true);
    }
    (
        check_compatibility(piece, panel),
        can_rotate_with_grain_respect(piece, panel),
    )
}

/// Move grain-constrained pieces ahead of grain-free ones, keeping relative order.
pub fn sort_by_grain_priority(pieces: &mut [Piece]) {
    pieces.sort_by_key(|p| !p.is_grain_constrained());
}

/// Score how well a panel suits a piece list.
///
/// Sums the area of grain-compatible pieces, adds half the total piece area
/// for grain-agnostic panels and penalizes panels under 0.5 m².
pub fn score_panel(pieces: &[Piece], panel: &Panel) -> f64 {
    let matching: f64 = pieces
        .iter()
        .filter(|p| check_compatibility(p, panel))
        .map(|p| p.adjusted_area() * f64::from(p.quantity))
        .sum();

    let mut score = matching;
    if panel.grain == GrainDirection::None {
        let total: f64 = pieces
            .iter()
            .map(|p| p.adjusted_area() * f64::from(p.quantity))
            .sum();
        score += total * NEUTRAL_GRAIN_BONUS;
    }

    if panel.area_m2() < SMALL_PANEL_AREA_M2 {
        score *= SMALL_PANEL_PENALTY;
    }
    score
}

/// Panels ordered by descending grain score; equal scores keep input order.
pub fn rank_panels(pieces: &[Piece], panels: &[Panel]) -> Vec<Panel> {
    let mut scored: Vec<(f64, &Panel)> = panels
        .iter()
        .map(|p| (score_panel(pieces, p), p))
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().map(|(_, p)| p.clone()).collect()
}

/// A placed piece whose grain disagrees with its panel.
#[derive(Debug, Clone, PartialEq)]
pub struct GrainViolation {
    pub panel_id: String,
    pub reference: String,
    pub piece_grain: GrainDirection,
    pub panel_grain: GrainDirection,
    pub x: f64,
    pub y: f64,
}

impl fmt::Display for GrainViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pièce {} en ({}, {}) : fil {} incompatible avec le panneau {} (fil {})",
            self.reference, self.x, self.y, self.piece_grain, self.panel_id, self.panel_grain
        )
    }
}

/// List grain mismatches in a finished plan.
pub fn validate_cutting_plan(plan: &CuttingPlan) -> Vec<GrainViolation> {
    plan.placements
        .iter()
        .filter(|p| !grains_compatible(p.piece.grain, plan.panel.grain))
        .map(|p| GrainViolation {
            panel_id: plan.panel.id.clone(),
            reference: p.piece.reference.clone(),
            piece_grain: p.piece.grain,
            panel_grain: plan.panel.grain,
            x: p.x,
            y: p.y,
        })
        .collect()
}
