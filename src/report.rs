//! Serializable report document and text summary.

use crate::error::Result;
use crate::model::{
    CuttingPlan, MaterialUsage, Offcut, OptimizationResult, PanelUsage, Strategy, TimeEstimate,
    UnplacedPiece,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Detailed metrics nested in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetrics {
    pub cutting_plans: Vec<CuttingPlan>,
    pub offcuts: Vec<Offcut>,
    pub material_breakdown: Vec<MaterialUsage>,
    pub time_estimate: TimeEstimate,
    pub warnings: Vec<String>,
    pub unplaced: Vec<UnplacedPiece>,
    pub panel_usage: Vec<PanelUsage>,
}

/// Output document handed to the calling layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationReport {
    pub strategy: Strategy,
    pub total_panels_used: usize,
    pub total_efficiency: f64,
    pub total_waste: f64,
    pub total_cost: f64,
    pub total_cut_length: f64,
    pub feasible: bool,
    pub metrics: ReportMetrics,
    pub algorithm: String,
    pub is_optimal: bool,
    pub created_at: DateTime<Utc>,
}

impl OptimizationReport {
    /// Build a report stamped with the current time.
    pub fn new(result: &OptimizationResult) -> Self {
        Self::with_timestamp(result, Utc::now())
    }

    /// Build a report with an explicit timestamp.
    pub fn with_timestamp(result: &OptimizationResult, created_at: DateTime<Utc>) -> Self {
        Self {
            strategy: result.strategy,
            total_panels_used: result.total_panels_used,
            total_efficiency: result.average_efficiency_percent,
            total_waste: result.average_waste_percent,
            total_cost: result.total_cost,
            total_cut_length: result.total_cut_length,
            feasible: result.feasible,
            metrics: ReportMetrics {
                cutting_plans: result.cutting_plans.clone(),
                offcuts: result.offcuts.clone(),
                material_breakdown: result.material_breakdown.clone(),
                time_estimate: result.time_estimate,
                warnings: result.warnings.clone(),
                unplaced: result.unplaced.clone(),
                panel_usage: result.panel_usage(),
            },
            algorithm: result.algorithm.clone(),
            is_optimal: false,
            created_at,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One-line human summary of a result.
pub fn summary_line(result: &OptimizationResult) -> String {
    let mut line = format!(
        "{}: {} panneau(x), {} pièce(s) placée(s), efficacité {:.1} %, coût {:.2}, coupe {:.1} m, ~{} min",
        result.strategy,
        result.total_panels_used,
        result.placed_count(),
        result.average_efficiency_percent,
        result.total_cost,
        result.total_cut_length / 1000.0,
        result.time_estimate.total_minutes
    );
    if !result.feasible {
        line.push_str(&format!("; {} pièce(s) non placée(s)", result.unplaced_count()));
    }
    line
}
