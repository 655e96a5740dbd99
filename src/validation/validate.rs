//! Request and layout validation.

use crate::error::{OptimizeError, Result};
use crate::geometry::Rect;
use crate::grain;
use crate::model::{CuttingPlan, OptimizationResult, Panel, Piece};
use std::collections::HashSet;

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

/// Validate an optimization request before any search runs.
///
/// An empty inventory is an error outright. Pieces that fit no trimmed panel
/// in either orientation, invalid dimensions and duplicate references are
/// reported as validation errors.
pub fn validate_request(
    pieces: &[Piece],
    panels: &[Panel],
    kerf_width: f64,
    trim: f64,
) -> Result<ValidationResult> {
    if panels.is_empty() {
        return Err(OptimizeError::NoPanels);
    }

    let mut result = ValidationResult::ok();

    if kerf_width < 0.0 {
        result.add_error(format!("Negative kerf width ({})", kerf_width));
    }

    if pieces.is_empty() {
        result.add_warning("No pieces to place");
    }

    for (idx, panel) in panels.iter().enumerate() {
        result.merge(validate_panel(panel, idx + 1));
    }

    let mut seen = HashSet::new();
    for (idx, piece) in pieces.iter().enumerate() {
        if !seen.insert(piece.reference.as_str()) {
            result.add_error(format!(
                "Piece {}: Duplicate reference '{}'",
                idx + 1,
                piece.reference
            ));
        }
        result.merge(validate_piece(piece, idx + 1, panels, trim));
    }

    Ok(result)
}

/// Validate a single inventory panel.
pub fn validate_panel(panel: &Panel, panel_num: usize) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if panel.width <= 0.0 || panel.height <= 0.0 {
        result.add_error(format!(
            "Panel {} ({}): Invalid dimensions ({}x{})",
            panel_num, panel.id, panel.width, panel.height
        ));
    }

    if panel.stock == 0 {
        result.add_warning(format!("Panel {} ({}): No stock", panel_num, panel.id));
    }

    if panel.price_per_m2 < 0.0 {
        result.add_warning(format!("Panel {} ({}): Negative price", panel_num, panel.id));
    }

    result
}

/// Validate a single piece against the inventory.
///
/// `trim` is removed from every panel edge before the size check.
pub fn validate_piece(
    piece: &Piece,
    piece_num: usize,
    panels: &[Panel],
    trim: f64,
) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if piece.width <= 0.0 || piece.height <= 0.0 {
        result.add_error(format!(
            "Piece {} ({}): Invalid dimensions ({}x{})",
            piece_num, piece.reference, piece.width, piece.height
        ));
        return result;
    }

    if !piece.edge_banding.is_valid() {
        result.add_error(format!(
            "Piece {} ({}): Negative edge-band allowance",
            piece_num, piece.reference
        ));
    }

    if piece.quantity == 0 {
        result.add_warning(format!("Piece {} ({}): Zero quantity", piece_num, piece.reference));
    }

    let (width, height) = (piece.adjusted_width(), piece.adjusted_height());
    let margin = 2.0 * trim.max(0.0);
    if !panels
        .iter()
        .any(|p| p.accepts_footprint(width + margin, height + margin))
    {
        result.add_error(format!(
            "Piece {} ({}): {}x{} exceeds every panel in both orientations",
            piece_num, piece.reference, width, height
        ));
    }

    if !piece.material.is_empty()
        && !panels
            .iter()
            .any(|p| p.matches_material(&piece.material, piece.thickness))
    {
        result.add_warning(format!(
            "Piece {} ({}): No panel of material {} / {} mm",
            piece_num, piece.reference, piece.material, piece.thickness
        ));
    }

    result
}

/// Find pairs of placements whose kerf rectangles overlap.
pub fn validate_plan_layout(plan: &CuttingPlan) -> Vec<(usize, usize)> {
    let mut overlaps = Vec::new();

    for i in 0..plan.placements.len() {
        for j in i + 1..plan.placements.len() {
            if plan.placements[i]
                .kerf_rect
                .overlaps(&plan.placements[j].kerf_rect)
            {
                overlaps.push((i, j));
            }
        }
    }

    overlaps
}

/// Find placements that leave the panel outline.
pub fn validate_plan_bounds(plan: &CuttingPlan) -> Vec<usize> {
    let bounds: Rect = plan.bounds();
    plan.placements
        .iter()
        .enumerate()
        .filter(|(_, p)| !bounds.contains(&p.kerf_rect) || !bounds.contains(&p.footprint()))
        .map(|(i, _)| i)
        .collect()
}

/// Check every plan of a result for overlaps, bounds and, optionally, grain.
pub fn validate_result(result: &OptimizationResult, grain_respect: bool) -> ValidationResult {
    let mut validation = ValidationResult::ok();

    for (plan_idx, plan) in result.cutting_plans.iter().enumerate() {
        for (i, j) in validate_plan_layout(plan) {
            validation.add_error(format!(
                "Plan {} ({}): Placements {} and {} overlap",
                plan_idx + 1,
                plan.panel.id,
                i + 1,
                j + 1
            ));
        }
        for i in validate_plan_bounds(plan) {
            validation.add_error(format!(
                "Plan {} ({}): Placement {} extends beyond panel bounds",
                plan_idx + 1,
                plan.panel.id,
                i + 1
            ));
        }
        if grain_respect {
            for violation in grain::validate_cutting_plan(plan) {
                validation.add_error(violation.to_string());
            }
        }
    }

    if !result.feasible {
        validation.add_warning(format!("{} piece(s) unplaced", result.unplaced_count()));
    }

    validation
}

/// Validate a request and turn any error into `OptimizeError::InvalidInput`.
pub fn quick_validate(
    pieces: &[Piece],
    panels: &[Panel],
    kerf_width: f64,
    trim: f64,
) -> Result<ValidationResult> {
    let result = validate_request(pieces, panels, kerf_width, trim)?;

    if !result.passed {
        return Err(OptimizeError::InvalidInput {
            message: result.errors.join("; "),
        });
    }

    Ok(result)
}
