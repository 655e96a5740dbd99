//! Piece definition representing one required part of a project.

use serde::{Deserialize, Serialize};

/// Wood-fiber orientation of a piece or panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrainDirection {
    /// Fibers run along the X axis.
    #[serde(alias = "horizontal")]
    Horizontal,
    /// Fibers run along the Y axis.
    #[serde(alias = "vertical")]
    Vertical,
    /// No grain constraint.
    #[default]
    #[serde(alias = "none")]
    None,
}

impl GrainDirection {
    /// Grain after a 90° rotation.
    pub fn flipped(self) -> Self {
        match self {
            GrainDirection::Horizontal => GrainDirection::Vertical,
            GrainDirection::Vertical => GrainDirection::Horizontal,
            GrainDirection::None => GrainDirection::None,
        }
    }

    /// Check if this grain imposes an orientation.
    pub fn is_constrained(self) -> bool {
        self != GrainDirection::None
    }
}

impl std::fmt::Display for GrainDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrainDirection::Horizontal => write!(f, "HORIZONTAL"),
            GrainDirection::Vertical => write!(f, "VERTICAL"),
            GrainDirection::None => write!(f, "NONE"),
        }
    }
}

/// Edge-band allowances added to each side of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeBanding {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl EdgeBanding {
    /// Same allowance on all four edges.
    pub fn uniform(allowance: f64) -> Self {
        Self {
            top: allowance,
            bottom: allowance,
            left: allowance,
            right: allowance,
        }
    }

    /// Allowances after a 90° rotation (top↔left, bottom↔right).
    pub fn rotated(&self) -> Self {
        Self {
            top: self.left,
            left: self.top,
            bottom: self.right,
            right: self.bottom,
        }
    }

    /// Check that no allowance is negative.
    pub fn is_valid(&self) -> bool {
        self.top >= 0.0 && self.bottom >= 0.0 && self.left >= 0.0 && self.right >= 0.0
    }
}

/// A required piece with its remaining quantity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    /// Project-unique reference.
    pub reference: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Finished width.
    pub width: f64,
    /// Finished height.
    pub height: f64,
    /// Thickness.
    #[serde(default)]
    pub thickness: f64,
    /// Material code.
    #[serde(default)]
    pub material: String,
    /// Grain orientation.
    #[serde(default, rename = "grainDirection")]
    pub grain: GrainDirection,
    /// Copies still to place.
    pub quantity: u32,
    /// Caller-defined priority (informational).
    #[serde(default)]
    pub priority: i32,
    /// Edge-band allowances.
    #[serde(default)]
    pub edge_banding: EdgeBanding,
}

impl Piece {
    /// Create a new piece.
    pub fn new(reference: impl Into<String>, width: f64, height: f64, quantity: u32) -> Self {
        let reference = reference.into();
        Self {
            name: reference.clone(),
            reference,
            width,
            height,
            quantity,
            ..Default::default()
        }
    }

    /// Set the grain direction.
    pub fn with_grain(mut self, grain: GrainDirection) -> Self {
        self.grain = grain;
        self
    }

    /// Set material code and thickness.
    pub fn with_material(mut self, material: impl Into<String>, thickness: f64) -> Self {
        self.material = material.into();
        self.thickness = thickness;
        self
    }

    /// Set edge-band allowances.
    pub fn with_edge_banding(mut self, edge_banding: EdgeBanding) -> Self {
        self.edge_banding = edge_banding;
        self
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Width including left and right allowances.
    pub fn adjusted_width(&self) -> f64 {
        self.width + self.edge_banding.left + self.edge_banding.right
    }

    /// Height including top and bottom allowances.
    pub fn adjusted_height(&self) -> f64 {
        self.height + self.edge_banding.top + self.edge_banding.bottom
    }

    /// Footprint area including allowances.
    pub fn adjusted_area(&self) -> f64 {
        self.adjusted_width() * self.adjusted_height()
    }

    /// Check if the piece has a grain constraint.
    pub fn is_grain_constrained(&self) -> bool {
        self.grain.is_constrained()
    }

    /// Check if the adjusted footprint fits a `width` x `height` area unrotated.
    pub fn fits_within(&self, width: f64, height: f64) -> bool {
        use crate::config::float_cmp::approx_le;
        approx_le(self.adjusted_width(), width) && approx_le(self.adjusted_height(), height)
    }

    /// Check if the adjusted footprint fits a `width` x `height` area rotated 90°.
    pub fn fits_within_rotated(&self, width: f64, height: f64) -> bool {
        use crate::config::float_cmp::approx_le;
        approx_le(self.adjusted_height(), width) && approx_le(self.adjusted_width(), height)
    }
}
