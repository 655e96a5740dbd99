//! Stock panel definition.

use super::GrainDirection;
use crate::config::MM2_PER_M2;
use serde::{Deserialize, Serialize};

fn default_depreciation() -> f64 {
    1.0
}

/// A stock panel from the inventory. Read-only to the optimizer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    /// Inventory identifier.
    pub id: String,
    /// Panel width.
    pub width: f64,
    /// Panel height.
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
    /// Price per square metre.
    #[serde(default)]
    pub price_per_m2: f64,
    /// Number of sheets in stock. Required in serialized records.
    pub stock: u32,
    /// Whether this panel is a recovered offcut.
    #[serde(default)]
    pub is_offcut: bool,
    /// Stock valuation factor, carried for the calling layer.
    #[serde(default = "default_depreciation")]
    pub depreciation: f64,
    /// Minimum width of a recoverable offcut.
    #[serde(default)]
    pub min_offcut_width: f64,
    /// Minimum height of a recoverable offcut.
    #[serde(default)]
    pub min_offcut_height: f64,
}

impl Panel {
    /// Create a new panel with one sheet in stock.
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            stock: 1,
            depreciation: 1.0,
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

    /// Set the price per square metre.
    pub fn with_price(mut self, price_per_m2: f64) -> Self {
        self.price_per_m2 = price_per_m2;
        self
    }

    /// Set the stock count.
    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    /// Set the minimum recoverable offcut size.
    pub fn with_min_offcut(mut self, width: f64, height: f64) -> Self {
        self.min_offcut_width = width;
        self.min_offcut_height = height;
        self
    }

    /// Mark the panel as a recovered offcut.
    pub fn as_offcut(mut self) -> Self {
        self.is_offcut = true;
        self
    }

    /// Area in mm².
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Area in m².
    pub fn area_m2(&self) -> f64 {
        self.area() / MM2_PER_M2
    }

    /// Price of one sheet.
    pub fn sheet_cost(&self) -> f64 {
        self.price_per_m2 * self.area_m2()
    }

    /// Minimum area of a recoverable offcut.
    pub fn min_offcut_area(&self) -> f64 {
        self.min_offcut_width * self.min_offcut_height
    }

    /// Check if a footprint fits the panel in either orientation.
    pub fn accepts_footprint(&self, width: f64, height: f64) -> bool {
        use crate::config::float_cmp::approx_le;
        (approx_le(width, self.width) && approx_le(height, self.height))
            || (approx_le(height, self.width) && approx_le(width, self.height))
    }

    /// Check material code and thickness against a piece or offcut.
    pub fn matches_material(&self, material: &str, thickness: f64) -> bool {
        self.material.eq_ignore_ascii_case(material)
            && (self.thickness - thickness).abs() <= crate::config::THICKNESS_TOLERANCE
    }
}
