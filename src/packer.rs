//! Single-panel placement.
//!
//! A [`PanelPacker`] places as many copies as it can from a sorted piece list
//! onto one panel sheet and decrements the remaining quantities. The default
//! [`GridPacker`] is a bottom-left-fill scan on a fixed grid: for every copy it
//! accepts the lowest, then left-most, grid position whose kerf-inflated
//! rectangle stays clear of everything already placed.

use crate::config::{float_cmp, OptimizerConfig, ALGORITHM_TAG, DEFAULT_GRID_STEP, EPS};
use crate::geometry::{overlaps_any, Rect};
use crate::grain;
use crate::model::{CuttingPlan, Panel, Piece, PlacedPiece, Rotation};
use tracing::debug;

/// Per-sheet placement settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackOptions {
    /// Saw kerf added to the right and top of every footprint.
    pub kerf_width: f64,
    /// Reject orientations whose grain does not match the panel.
    pub grain_respect: bool,
    /// Peripheral trim removed from every panel edge.
    pub trim: f64,
    /// Only place pieces of the panel's material and thickness.
    pub match_material: bool,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self::from(&OptimizerConfig::default())
    }
}

impl From<&OptimizerConfig> for PackOptions {
    fn from(config: &OptimizerConfig) -> Self {
        Self {
            kerf_width: config.kerf_width,
            grain_respect: config.grain_respect,
            trim: config.trim,
            match_material: config.match_material,
        }
    }
}

/// Places pieces on one panel sheet.
pub trait PanelPacker: Send + Sync {
    /// Short algorithm name.
    fn name(&self) -> &'static str;

    /// Place remaining copies of `pieces` on one sheet of `panel`.
    ///
    /// Quantities of placed pieces are decremented in place. The returned plan
    /// is empty when nothing fits.
    fn pack(
        &self,
        pieces: &mut [Piece],
        panel: &Panel,
        sheet_index: u32,
        options: &PackOptions,
    ) -> CuttingPlan;
}

/// Bottom-left-fill on a fixed grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPacker {
    step: f64,
}

impl Default for GridPacker {
    fn default() -> Self {
        Self {
            step: DEFAULT_GRID_STEP,
        }
    }
}

impl GridPacker {
    /// Create a packer with a grid step in mm. Non-positive steps use the default.
    pub fn new(step: f64) -> Self {
        Self {
            step: if step > 0.0 { step } else { DEFAULT_GRID_STEP },
        }
    }

    /// Grid step in mm.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// First free grid position (lowest y, then lowest x) for a footprint.
    fn find_position(
        &self,
        width: f64,
        height: f64,
        region: &Rect,
        kerf: f64,
        used: &[Rect],
    ) -> Option<(f64, f64)> {
        let x_span = region.width - width;
        let y_span = region.height - height;
        if x_span < -EPS || y_span < -EPS {
            return None;
        }

        let x_steps = (x_span.max(0.0) / self.step + EPS).floor() as usize;
        let y_steps = (y_span.max(0.0) / self.step + EPS).floor() as usize;

        for j in 0..=y_steps {
            let y = region.y + j as f64 * self.step;
            for i in 0..=x_steps {
                let x = region.x + i as f64 * self.step;
                let candidate = Rect::new(x, y, width + kerf, height + kerf);
                if !overlaps_any(&candidate, used) {
                    return Some((x, y));
                }
            }
        }
        None
    }
}

/// Usable part of a panel after peripheral trim.
fn usable_region(panel: &Panel, trim: f64) -> Rect {
    Rect::new(
        trim,
        trim,
        (panel.width - 2.0 * trim).max(0.0),
        (panel.height - 2.0 * trim).max(0.0),
    )
}

/// Footprint plus kerf, clipped to the panel outline.
fn kerf_rect(x: f64, y: f64, piece: &Piece, kerf: f64, panel: &Panel) -> Rect {
    let x_max = (x + piece.adjusted_width() + kerf).min(panel.width);
    let y_max = (y + piece.adjusted_height() + kerf).min(panel.height);
    Rect::new(x, y, x_max - x, y_max - y)
}

impl PanelPacker for GridPacker {
    fn name(&self) -> &'static str {
        ALGORITHM_TAG
    }

    fn pack(
        &self,
        pieces: &mut [Piece],
        panel: &Panel,
        sheet_index: u32,
        options: &PackOptions,
    ) -> CuttingPlan {
        let region = usable_region(panel, options.trim);
        let mut used: Vec<Rect> = Vec::new();
        let mut placements: Vec<PlacedPiece> = Vec::new();

        for piece in pieces.iter_mut() {
            if piece.quantity == 0 {
                continue;
            }
            if options.match_material && !panel.matches_material(&piece.material, piece.thickness) {
                continue;
            }

            let (allow_straight, allow_rotated) =
                grain::allowed_orientations(piece, panel, options.grain_respect);
            if !allow_straight && !allow_rotated {
                debug!(
                    "Skipping {} on {}: grain {} vs {}",
                    piece.reference, panel.id, piece.grain, panel.grain
                );
                continue;
            }

            let straight = Piece {
                quantity: 1,
                ..piece.clone()
            };
            let rotated = grain::rotate(&straight);
            // A square footprint gains nothing from a second scan.
            let try_rotated = allow_rotated
                && rotated.fits_within(region.width, region.height)
                && !(allow_straight
                    && float_cmp::approx_eq(straight.adjusted_width(), straight.adjusted_height()));

            while piece.quantity > 0 {
                let straight_fit = if allow_straight {
                    self.find_position(
                        straight.adjusted_width(),
                        straight.adjusted_height(),
                        &region,
                        options.kerf_width,
                        &used,
                    )
                    .map(|(x, y)| (&straight, x, y, Rotation::Deg0))
                } else {
                    None
                };

                let fit = straight_fit.or_else(|| {
                    if !try_rotated {
                        return None;
                    }
                    self.find_position(
                        rotated.adjusted_width(),
                        rotated.adjusted_height(),
                        &region,
                        options.kerf_width,
                        &used,
                    )
                    .map(|(x, y)| (&rotated, x, y, Rotation::Deg90))
                });

                let Some((copy, x, y, rotation)) = fit else {
                    break;
                };

                let rect = kerf_rect(x, y, copy, options.kerf_width, panel);
                used.push(rect);
                placements.push(PlacedPiece {
                    piece: copy.clone(),
                    x,
                    y,
                    rotation,
                    kerf_rect: rect,
                });
                piece.quantity -= 1;
            }
        }

        let plan = CuttingPlan::from_placements(panel.clone(), sheet_index, placements);
        debug!(
            "Sheet {}#{}: {} piece(s), efficiency {:.1}%",
            panel.id,
            sheet_index + 1,
            plan.piece_count(),
            plan.efficiency_percent
        );
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EdgeBanding, GrainDirection};
    use pretty_assertions::assert_eq;

    fn standard_panel() -> Panel {
        Panel::new("S1", 2440.0, 1220.0)
    }

    fn options(kerf: f64, grain_respect: bool) -> PackOptions {
        PackOptions {
            kerf_width: kerf,
            grain_respect,
            trim: 0.0,
            match_material: false,
        }
    }

    fn positions(plan: &CuttingPlan) -> Vec<(f64, f64)> {
        plan.placements.iter().map(|p| (p.x, p.y)).collect()
    }

    // ==================== placement tests ====================

    #[test]
    fn test_bottom_left_fill_order() {
        let mut pieces = vec![Piece::new("P", 600.0, 400.0, 4)];
        let plan =
            GridPacker::default().pack(&mut pieces, &standard_panel(), 0, &options(3.0, true));
        assert_eq!(
            positions(&plan),
            vec![(0.0, 0.0), (610.0, 0.0), (1220.0, 0.0), (1830.0, 0.0)]
        );
        assert_eq!(pieces[0].quantity, 0);
        assert_eq!(plan.used_area, 960_000.0);
        assert_eq!(plan.cut_length, 4.0 * 2000.0);
    }

    #[test]
    fn test_wraps_to_next_row() {
        let mut pieces = vec![Piece::new("P", 600.0, 400.0, 5)];
        let plan =
            GridPacker::default().pack(&mut pieces, &standard_panel(), 0, &options(3.0, true));
        assert_eq!(plan.piece_count(), 5);
        assert_eq!(plan.placements[4].x, 0.0);
        assert_eq!(plan.placements[4].y, 410.0);
    }

    #[test]
    fn test_exact_fit_without_kerf() {
        let mut pieces = vec![Piece::new("P", 1220.0, 610.0, 4)];
        let plan =
            GridPacker::default().pack(&mut pieces, &standard_panel(), 0, &options(0.0, true));
        assert_eq!(plan.piece_count(), 4);
        assert!(plan.efficiency_percent > 99.99);
    }

    #[test]
    fn test_kerf_rect_clipped_to_panel() {
        let mut pieces = vec![Piece::new("P", 2440.0, 1220.0, 1)];
        let plan =
            GridPacker::default().pack(&mut pieces, &standard_panel(), 0, &options(3.0, true));
        assert_eq!(plan.piece_count(), 1);
        assert_eq!(plan.placements[0].kerf_rect, Rect::new(0.0, 0.0, 2440.0, 1220.0));
    }

    #[test]
    fn test_oversized_piece_stays() {
        let mut pieces = vec![Piece::new("P", 3000.0, 400.0, 1)];
        let plan =
            GridPacker::default().pack(&mut pieces, &standard_panel(), 0, &options(3.0, true));
        assert!(plan.is_empty());
        assert_eq!(pieces[0].quantity, 1);
    }

    #[test]
    fn test_edge_banding_counts_in_footprint() {
        let mut pieces =
            vec![Piece::new("P", 600.0, 400.0, 2).with_edge_banding(EdgeBanding::uniform(2.0))];
        let plan =
            GridPacker::default().pack(&mut pieces, &standard_panel(), 0, &options(3.0, true));
        assert_eq!(plan.placements[1].x, 610.0);
        assert_eq!(plan.placements[0].kerf_rect.width, 607.0);
        assert_eq!(plan.cut_length, 2.0 * 2.0 * (604.0 + 404.0));
    }

    #[test]
    fn test_no_overlaps_and_in_bounds() {
        let mut pieces = vec![
            Piece::new("A", 900.0, 500.0, 3),
            Piece::new("B", 450.0, 300.0, 6),
            Piece::new("C", 200.0, 150.0, 10),
        ];
        let plan =
            GridPacker::default().pack(&mut pieces, &standard_panel(), 0, &options(4.0, false));
        let bounds = plan.bounds();
        for (i, a) in plan.placements.iter().enumerate() {
            assert!(bounds.contains(&a.kerf_rect));
            for b in &plan.placements[i + 1..] {
                assert!(!a.kerf_rect.overlaps(&b.kerf_rect));
            }
        }
    }

    // ==================== rotation tests ====================

    #[test]
    fn test_rotates_when_straight_does_not_fit() {
        let mut pieces = vec![Piece::new("P", 1000.0, 2000.0, 1)];
        let plan =
            GridPacker::default().pack(&mut pieces, &standard_panel(), 0, &options(3.0, false));
        assert_eq!(plan.piece_count(), 1);
        let placed = &plan.placements[0];
        assert_eq!(placed.rotation, Rotation::Deg90);
        assert_eq!(placed.piece.width, 2000.0);
        assert_eq!(placed.piece.height, 1000.0);
    }

    #[test]
    fn test_grain_blocks_rotation() {
        let panel = standard_panel().with_grain(GrainDirection::Vertical);
        let mut pieces =
            vec![Piece::new("P", 1000.0, 2000.0, 1).with_grain(GrainDirection::Vertical)];
        let plan = GridPacker::default().pack(&mut pieces, &panel, 0, &options(3.0, true));
        assert!(plan.is_empty());
        assert_eq!(pieces[0].quantity, 1);
    }

    #[test]
    fn test_grain_forces_rotation() {
        let panel = standard_panel().with_grain(GrainDirection::Horizontal);
        let mut pieces =
            vec![Piece::new("P", 300.0, 200.0, 1).with_grain(GrainDirection::Vertical)];
        let plan = GridPacker::default().pack(&mut pieces, &panel, 0, &options(3.0, true));
        assert_eq!(plan.piece_count(), 1);
        assert_eq!(plan.placements[0].rotation, Rotation::Deg90);
        assert_eq!(plan.placements[0].piece.grain, GrainDirection::Horizontal);
    }

    #[test]
    fn test_grain_ignored_without_respect() {
        let panel = standard_panel().with_grain(GrainDirection::Horizontal);
        let mut pieces =
            vec![Piece::new("P", 300.0, 200.0, 1).with_grain(GrainDirection::Vertical)];
        let plan = GridPacker::default().pack(&mut pieces, &panel, 0, &options(3.0, false));
        assert_eq!(plan.placements[0].rotation, Rotation::Deg0);
    }

    // ==================== option tests ====================

    #[test]
    fn test_trim_offsets_positions() {
        let mut pieces = vec![Piece::new("P", 600.0, 400.0, 1)];
        let opts = PackOptions {
            trim: 10.0,
            ..options(3.0, true)
        };
        let plan = GridPacker::default().pack(&mut pieces, &standard_panel(), 0, &opts);
        assert_eq!(positions(&plan), vec![(10.0, 10.0)]);

        let mut full = vec![Piece::new("F", 2440.0, 1220.0, 1)];
        let plan = GridPacker::default().pack(&mut full, &standard_panel(), 0, &opts);
        assert!(plan.is_empty());
    }

    #[test]
    fn test_material_matching() {
        let panel = standard_panel().with_material("MDF", 18.0);
        let mut pieces = vec![
            Piece::new("oak", 600.0, 400.0, 1).with_material("CHENE", 18.0),
            Piece::new("mdf", 600.0, 400.0, 1).with_material("MDF", 18.0),
        ];
        let opts = PackOptions {
            match_material: true,
            ..options(3.0, true)
        };
        let plan = GridPacker::default().pack(&mut pieces, &panel, 0, &opts);
        assert_eq!(plan.piece_count(), 1);
        assert_eq!(plan.placements[0].piece.reference, "mdf");
        assert_eq!(pieces[0].quantity, 1);
    }

    #[test]
    fn test_finer_grid_step() {
        let mut pieces = vec![Piece::new("P", 600.0, 400.0, 2)];
        let plan =
            GridPacker::new(1.0).pack(&mut pieces, &standard_panel(), 0, &options(3.0, true));
        assert_eq!(plan.placements[1].x, 603.0);
    }
}
