//! Collaborator interfaces: panel inventory and project piece lists.
//!
//! The optimizer only sees snapshots returned by these providers. JSON-file
//! implementations back the command-line tool; in-memory ones serve callers
//! that already hold the records.

use crate::config::DEFAULT_KERF;
use crate::error::{OptimizeError, Result};
use crate::model::{Panel, Piece};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use tracing::debug;

fn default_kerf() -> f64 {
    DEFAULT_KERF
}

/// Defaults a project applies to every optimization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDefaults {
    /// Saw kerf in mm.
    #[serde(default = "default_kerf")]
    pub kerf_width: f64,
    /// Peripheral trim removed from each panel edge in mm.
    #[serde(default)]
    pub trim_allowance: f64,
}

impl Default for ProjectDefaults {
    fn default() -> Self {
        Self {
            kerf_width: DEFAULT_KERF,
            trim_allowance: 0.0,
        }
    }
}

/// A project's piece list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub defaults: ProjectDefaults,
    pub pieces: Vec<Piece>,
}

/// Source of stock panels.
pub trait PanelInventory {
    /// Panels with stock > 0, offcuts first, then by material and size.
    fn available_panels(&self) -> Result<Vec<Panel>>;
}

/// Source of a project's pieces and defaults.
pub trait ProjectSource {
    /// Load the project.
    fn load_project(&self) -> Result<Project>;
}

/// Order panels the way providers hand them out: offcuts first, then by
/// material code, then largest area first. Panels without stock are dropped.
pub fn sort_inventory(panels: Vec<Panel>) -> Vec<Panel> {
    let (mut available, empty): (Vec<Panel>, Vec<Panel>) =
        panels.into_iter().partition(|p| p.stock > 0);
    for panel in &empty {
        debug!("Skipping panel {}: no stock", panel.id);
    }
    available.sort_by(|a, b| {
        b.is_offcut
            .cmp(&a.is_offcut)
            .then_with(|| a.material.cmp(&b.material))
            .then_with(|| b.area().partial_cmp(&a.area()).unwrap_or(Ordering::Equal))
    });
    available
}

/// Inventory held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventory {
    panels: Vec<Panel>,
}

impl InMemoryInventory {
    pub fn new(panels: Vec<Panel>) -> Self {
        Self { panels }
    }
}

impl PanelInventory for InMemoryInventory {
    fn available_panels(&self) -> Result<Vec<Panel>> {
        Ok(sort_inventory(self.panels.clone()))
    }
}

/// Project held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProject {
    project: Project,
}

impl InMemoryProject {
    pub fn new(project: Project) -> Self {
        Self { project }
    }
}

impl ProjectSource for InMemoryProject {
    fn load_project(&self) -> Result<Project> {
        Ok(self.project.clone())
    }
}

fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(OptimizeError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Inventory stored as a JSON array of panels.
#[derive(Debug, Clone)]
pub struct JsonInventory {
    path: PathBuf,
}

impl JsonInventory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PanelInventory for JsonInventory {
    fn available_panels(&self) -> Result<Vec<Panel>> {
        let content = read_file(&self.path)?;
        let panels: Vec<Panel> = serde_json::from_str(&content)?;
        debug!("Loaded {} panel record(s) from {}", panels.len(), self.path.display());
        Ok(sort_inventory(panels))
    }
}

/// Project stored as a JSON document.
#[derive(Debug, Clone)]
pub struct JsonProject {
    path: PathBuf,
}

impl JsonProject {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProjectSource for JsonProject {
    fn load_project(&self) -> Result<Project> {
        let content = read_file(&self.path)?;
        let project: Project = serde_json::from_str(&content)?;
        debug!(
            "Loaded project '{}' with {} piece(s) from {}",
            project.name,
            project.pieces.len(),
            self.path.display()
        );
        Ok(project)
    }
}
