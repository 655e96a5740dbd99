//! Configuration constants and settings for the optimizer.

use crate::model::Strategy;

/// Floating-point comparison epsilon.
pub const EPS: f64 = 0.0001;

/// Default placement grid step in mm.
pub const DEFAULT_GRID_STEP: f64 = 10.0;

/// Default saw kerf in mm.
pub const DEFAULT_KERF: f64 = 3.0;

/// Square millimetres per square metre.
pub const MM2_PER_M2: f64 = 1_000_000.0;

/// Thickness tolerance when matching pieces to panels or offcuts (mm).
pub const THICKNESS_TOLERANCE: f64 = 1.0;

/// Share of the waste area assumed recoverable as a single square offcut.
pub const OFFCUT_RECOVERY_RATIO: f64 = 0.8;

/// Dimension tolerance when consolidating similar offcuts (mm).
pub const CONSOLIDATION_TOLERANCE: f64 = 50.0;

/// Saw feed rate used by the time estimate, in mm per minute (2 m/min).
pub const CUT_SPEED_MM_PER_MIN: f64 = 2000.0;

/// Handling time per panel sheet in minutes.
pub const HANDLING_MINUTES_PER_PANEL: f64 = 3.0;

/// Panels below this area (m²) get a scoring penalty.
pub const SMALL_PANEL_AREA_M2: f64 = 0.5;

/// Score multiplier for small panels.
pub const SMALL_PANEL_PENALTY: f64 = 0.8;

/// Weight of the grain-agnostic panel bonus.
pub const NEUTRAL_GRAIN_BONUS: f64 = 0.5;

/// Name reported by the default grid packer.
pub const ALGORITHM_TAG: &str = "grid-bottom-left-fill";

/// Runtime optimizer settings.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Piece ordering strategy.
    pub strategy: Strategy,
    /// Saw kerf width in mm.
    pub kerf_width: f64,
    /// Reject placements whose grain does not match the panel.
    pub grain_respect: bool,
    /// Placement grid step in mm.
    pub grid_step: f64,
    /// Peripheral trim removed from every panel edge in mm.
    pub trim: f64,
    /// Only place pieces on panels of the same material and thickness.
    pub match_material: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            kerf_width: DEFAULT_KERF,
            grain_respect: true,
            grid_step: DEFAULT_GRID_STEP,
            trim: 0.0,
            match_material: false,
        }
    }
}

impl OptimizerConfig {
    /// Create a configuration for a strategy with the default settings.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Default::default()
        }
    }

    /// Set the saw kerf.
    pub fn with_kerf(mut self, kerf_width: f64) -> Self {
        self.kerf_width = kerf_width;
        self
    }

    /// Enable or disable grain checks.
    pub fn with_grain_respect(mut self, grain_respect: bool) -> Self {
        self.grain_respect = grain_respect;
        self
    }

    /// Set the placement grid step. Non-positive values fall back to the default.
    pub fn with_grid_step(mut self, grid_step: f64) -> Self {
        self.grid_step = if grid_step > 0.0 {
            grid_step
        } else {
            DEFAULT_GRID_STEP
        };
        self
    }

    /// Set the peripheral trim allowance.
    pub fn with_trim(mut self, trim: f64) -> Self {
        self.trim = trim.max(0.0);
        self
    }

    /// Enable or disable material matching.
    pub fn with_material_matching(mut self, match_material: bool) -> Self {
        self.match_material = match_material;
        self
    }

    /// Same settings with another strategy.
    pub fn for_strategy(&self, strategy: Strategy) -> Self {
        Self {
            strategy,
            ..self.clone()
        }
    }
}

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    use super::EPS;

    /// Check if two floats are approximately equal.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    /// Check if `a <= b` with epsilon tolerance.
    #[inline]
    pub fn approx_le(a: f64, b: f64) -> bool {
        a <= b + EPS
    }
}
