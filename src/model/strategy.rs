//! Optimization strategies and their presentation catalog.

use crate::error::OptimizeError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Piece ordering strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Strategy {
    #[default]
    EfficiencyFirst,
    CostMinimize,
    CutMinimize,
    GrainRespect,
    SpeedOptimize,
    LengthFirst,
    WidthFirst,
    WasteMinimize,
}

/// Catalog entry describing a strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyInfo {
    pub tag: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

impl Strategy {
    /// Every strategy in catalog order.
    pub const ALL: [Strategy; 8] = [
        Strategy::EfficiencyFirst,
        Strategy::CostMinimize,
        Strategy::CutMinimize,
        Strategy::GrainRespect,
        Strategy::SpeedOptimize,
        Strategy::LengthFirst,
        Strategy::WidthFirst,
        Strategy::WasteMinimize,
    ];

    /// Wire tag.
    pub fn tag(self) -> &'static str {
        match self {
            Strategy::EfficiencyFirst => "EFFICIENCY_FIRST",
            Strategy::CostMinimize => "COST_MINIMIZE",
            Strategy::CutMinimize => "CUT_MINIMIZE",
            Strategy::GrainRespect => "GRAIN_RESPECT",
            Strategy::SpeedOptimize => "SPEED_OPTIMIZE",
            Strategy::LengthFirst => "LENGTH_FIRST",
            Strategy::WidthFirst => "WIDTH_FIRST",
            Strategy::WasteMinimize => "WASTE_MINIMIZE",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Strategy::EfficiencyFirst => "Efficacité maximale",
            Strategy::CostMinimize => "Coût minimal",
            Strategy::CutMinimize => "Coupes minimales",
            Strategy::GrainRespect => "Respect du fil",
            Strategy::SpeedOptimize => "Rapidité",
            Strategy::LengthFirst => "Longueur d'abord",
            Strategy::WidthFirst => "Largeur d'abord",
            Strategy::WasteMinimize => "Chutes minimales",
        }
    }

    /// Short description.
    pub fn description(self) -> &'static str {
        match self {
            Strategy::EfficiencyFirst => {
                "Place les plus grandes pièces en premier pour maximiser le taux d'utilisation"
            }
            Strategy::CostMinimize => "Réduit le nombre de panneaux et le coût matière",
            Strategy::CutMinimize => "Limite la longueur totale de coupe",
            Strategy::GrainRespect => "Place d'abord les pièces soumises au sens du fil",
            Strategy::SpeedOptimize => "Calcul rapide pour une estimation immédiate",
            Strategy::LengthFirst => "Trie les pièces par longueur décroissante",
            Strategy::WidthFirst => "Trie les pièces par largeur décroissante",
            Strategy::WasteMinimize => "Favorise des chutes réutilisables",
        }
    }

    /// Presentation catalog for every strategy.
    pub fn catalog() -> Vec<StrategyInfo> {
        Self::ALL
            .iter()
            .map(|s| StrategyInfo {
                tag: s.tag(),
                label: s.label(),
                description: s.description(),
            })
            .collect()
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Strategy {
    type Err = OptimizeError;

    /// Accepts `EFFICIENCY_FIRST`, `efficiency_first` or `efficiency-first`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|strategy| strategy.tag() == normalized)
            .ok_or_else(|| OptimizeError::UnknownStrategy { tag: s.to_string() })
    }
}
