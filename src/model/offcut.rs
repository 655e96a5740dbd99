//! Recoverable offcut definition.

use super::GrainDirection;
use serde::{Deserialize, Serialize};

/// Offcut quality class, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OffcutQuality {
    Faible,
    Correcte,
    Bonne,
    Excellente,
}

impl OffcutQuality {
    /// Classify by offcut area relative to its source panel.
    pub fn from_area_ratio(ratio: f64) -> Self {
        if ratio > 0.5 {
            OffcutQuality::Excellente
        } else if ratio > 0.3 {
            OffcutQuality::Bonne
        } else if ratio > 0.1 {
            OffcutQuality::Correcte
        } else {
            OffcutQuality::Faible
        }
    }

    /// Bonus used by utility ranking.
    pub fn utility_bonus(self) -> f64 {
        match self {
            OffcutQuality::Excellente => 2000.0,
            OffcutQuality::Bonne => 1000.0,
            OffcutQuality::Correcte => 500.0,
            OffcutQuality::Faible => 0.0,
        }
    }
}

impl std::fmt::Display for OffcutQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OffcutQuality::Excellente => "EXCELLENTE",
            OffcutQuality::Bonne => "BONNE",
            OffcutQuality::Correcte => "CORRECTE",
            OffcutQuality::Faible => "FAIBLE",
        };
        write!(f, "{}", label)
    }
}

/// Leftover material that may be put back into stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offcut {
    pub id: String,
    pub width: f64,
    pub height: f64,
    pub area: f64,
    pub material: String,
    pub thickness: f64,
    #[serde(rename = "grainDirection")]
    pub grain: GrainDirection,
    pub source_panel_id: String,
    pub quality: OffcutQuality,
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consolidated_from: Option<Vec<String>>,
    pub stock: u32,
}
