//! panel-cut - CLI tool to compute panel cutting plans.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use panel_cut::provider::{JsonInventory, JsonProject};
use panel_cut::report::summary_line;
use panel_cut::{
    best_result, compare_strategies, grain, validation, OptimizationReport, OptimizerConfig,
    Optimizer, PanelInventory, ProjectSource, Strategy,
};

/// Compute cutting plans for rectangular pieces on stock panels.
#[derive(Parser, Debug)]
#[command(name = "panel-cut")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Project JSON file (pieces and defaults)
    #[arg(short, long, required_unless_present = "catalog")]
    project: Option<PathBuf>,

    /// Inventory JSON file (array of panels)
    #[arg(short, long, required_unless_present = "catalog")]
    inventory: Option<PathBuf>,

    /// Optimization strategy tag
    #[arg(short, long, default_value = "EFFICIENCY_FIRST")]
    strategy: Strategy,

    /// Saw kerf in mm (overrides the project default)
    #[arg(short, long)]
    kerf: Option<f64>,

    /// Allow rotation regardless of grain direction
    #[arg(long)]
    ignore_grain: bool,

    /// Grid step of the placement search in mm
    #[arg(long, default_value = "10")]
    grid_step: f64,

    /// Only place pieces on panels of matching material and thickness
    #[arg(long)]
    match_material: bool,

    /// Order panels by grain suitability before placing
    #[arg(long)]
    rank_panels: bool,

    /// Run every strategy and report the best one
    #[arg(long)]
    compare: bool,

    /// List the available strategies and exit
    #[arg(long)]
    catalog: bool,

    /// Output report JSON file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if args.catalog {
        for info in Strategy::catalog() {
            println!("{:<20} {} - {}", info.tag, info.label, info.description);
        }
        return Ok(());
    }

    let (Some(project_path), Some(inventory_path)) = (&args.project, &args.inventory) else {
        anyhow::bail!("--project and --inventory are required");
    };

    info!("Processing: {}", project_path.display());

    let project = JsonProject::new(project_path)
        .load_project()
        .with_context(|| format!("Failed to load {}", project_path.display()))?;
    let mut panels = JsonInventory::new(inventory_path)
        .available_panels()
        .with_context(|| format!("Failed to load {}", inventory_path.display()))?;

    info!(
        "Loaded {} piece line(s) and {} panel(s)",
        project.pieces.len(),
        panels.len()
    );

    let kerf = args.kerf.unwrap_or(project.defaults.kerf_width);
    let trim = project.defaults.trim_allowance;

    // Validate
    let validation = validation::validate_request(&project.pieces, &panels, kerf, trim)?;

    for warning in &validation.warnings {
        warn!("{}", warning);
    }

    for err in &validation.errors {
        error!("{}", err);
    }

    if !validation.passed {
        anyhow::bail!("Validation failed");
    }

    if args.rank_panels {
        panels = grain::rank_panels(&project.pieces, &panels);
    }

    let config = OptimizerConfig::new(args.strategy)
        .with_kerf(kerf)
        .with_trim(trim)
        .with_grain_respect(!args.ignore_grain)
        .with_grid_step(args.grid_step)
        .with_material_matching(args.match_material);

    let result = if args.compare {
        let results = compare_strategies(&project.pieces, &panels, &config, &Strategy::ALL)?;
        for result in &results {
            info!("{}", summary_line(result));
        }
        best_result(&results)
            .cloned()
            .context("No strategy produced a result")?
    } else {
        Optimizer::new(config).optimize(&project.pieces, &panels)?
    };

    for warning in &result.warnings {
        warn!("{}", warning);
    }
    info!("{}", summary_line(&result));

    // Write output
    let json = OptimizationReport::new(&result).to_json_pretty()?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Generated: {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
