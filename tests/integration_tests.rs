//! Integration tests for the cutting optimizer.
//!
//! These tests check layout properties (no overlap, bounds, grain, quantity
//! conservation) rather than exact coordinates, except for the small reference
//! scenarios whose layouts are fully determined by the bottom-left-fill order.

use panel_cut::grain;
use panel_cut::provider::{InMemoryInventory, InMemoryProject, JsonInventory, JsonProject};
use panel_cut::validation::validate_result;
use panel_cut::{
    best_result, compare_strategies, optimize, plan_project, GrainDirection, OffcutQuality,
    OptimizationResult, OptimizeError, OptimizerConfig, Panel, Piece, Project, ProjectDefaults,
    Rotation, Strategy,
};
use pretty_assertions::assert_eq;
use std::path::Path;

/// Fixture directory for integration tests
const FIXTURE_DIR: &str = "tests/fixtures";

fn standard_panel(id: &str) -> Panel {
    Panel::new(id, 2440.0, 1220.0)
        .with_material("MDF", 18.0)
        .with_price(10.0)
        .with_min_offcut(100.0, 100.0)
}

fn mixed_pieces() -> Vec<Piece> {
    vec![
        Piece::new("A", 800.0, 600.0, 3),
        Piece::new("B", 1200.0, 300.0, 2).with_grain(GrainDirection::Horizontal),
        Piece::new("C", 450.0, 450.0, 5),
        Piece::new("D", 300.0, 900.0, 4).with_grain(GrainDirection::Vertical),
        Piece::new("E", 2000.0, 150.0, 2),
    ]
}

fn assert_layout_valid(result: &OptimizationResult) {
    let validation = validate_result(result, true);
    assert!(validation.passed, "layout errors: {:?}", validation.errors);
}

// ==================== Reference scenarios ====================

#[test]
fn test_scenario_single_panel_feasible() {
    let pieces = vec![Piece::new("P", 600.0, 400.0, 4)];
    let result = optimize(&pieces, &[standard_panel("S1")], Strategy::EfficiencyFirst, 3.0, true)
        .expect("optimize");

    assert!(result.feasible);
    assert_eq!(result.total_panels_used, 1);
    assert_eq!(result.placed_count(), 4);
    assert!(result.average_waste_percent < 90.0);
    assert!(result.warnings.is_empty());
    assert_layout_valid(&result);
}

#[test]
fn test_scenario_oversized_piece_infeasible() {
    let pieces = vec![Piece::new("P", 3000.0, 400.0, 1)];
    let result = optimize(&pieces, &[standard_panel("S1")], Strategy::EfficiencyFirst, 3.0, true)
        .expect("optimize");

    assert!(!result.feasible);
    assert_eq!(result.total_panels_used, 0);
    assert_eq!(result.warnings[0], "1 pièce(s) non placée(s)");
    assert_eq!(result.unplaced.len(), 1);
    assert_eq!(result.unplaced[0].quantity, 1);
}

#[test]
fn test_scenario_rotation_matches_grain() {
    // Too tall for either panel upright; lying down it only suits the
    // horizontal panel once its grain has turned with it.
    let pieces = vec![Piece::new("V", 1000.0, 2000.0, 1).with_grain(GrainDirection::Vertical)];
    let panels = vec![
        standard_panel("VERT").with_grain(GrainDirection::Vertical),
        standard_panel("HORIZ").with_grain(GrainDirection::Horizontal),
    ];
    let result =
        optimize(&pieces, &panels, Strategy::EfficiencyFirst, 3.0, true).expect("optimize");

    assert!(result.feasible);
    assert_eq!(result.cutting_plans.len(), 1);
    let plan = &result.cutting_plans[0];
    assert_eq!(plan.panel.id, "HORIZ");
    let placed = &plan.placements[0];
    assert_eq!(placed.rotation, Rotation::Deg90);
    assert_eq!(placed.piece.grain, GrainDirection::Horizontal);
    assert_eq!((placed.piece.width, placed.piece.height), (2000.0, 1000.0));
    assert!(grain::validate_cutting_plan(plan).is_empty());
}

#[test]
fn test_scenario_free_corner_offcut() {
    // 440x1220 strip plus a 2000x220 band leave a 2000x1000 corner free.
    let pieces = vec![
        Piece::new("STRIP", 440.0, 1220.0, 1),
        Piece::new("BAND", 2000.0, 220.0, 1),
    ];
    let result = optimize(&pieces, &[standard_panel("S1")], Strategy::EfficiencyFirst, 0.0, true)
        .expect("optimize");

    assert!(result.feasible);
    let plan = &result.cutting_plans[0];
    let positions: Vec<(f64, f64)> = plan.placements.iter().map(|p| (p.x, p.y)).collect();
    assert_eq!(positions, vec![(0.0, 0.0), (440.0, 0.0)]);
    assert!((plan.waste_area() - 2_000_000.0).abs() < 1e-6);

    assert_eq!(result.offcuts.len(), 1);
    let offcut = &result.offcuts[0];
    assert!(offcut.quality >= OffcutQuality::Bonne);
    assert_eq!(offcut.quality, OffcutQuality::Excellente);
    assert_eq!(offcut.source_panel_id, "S1");
}

// ==================== Layout properties ====================

#[test]
fn test_placements_valid_for_every_strategy() {
    let panels = vec![
        standard_panel("S1").with_grain(GrainDirection::Horizontal).with_stock(2),
        standard_panel("S2").with_stock(3),
    ];
    for strategy in Strategy::ALL {
        let result = optimize(&mixed_pieces(), &panels, strategy, 3.0, true).expect("optimize");
        assert_layout_valid(&result);
        for plan in &result.cutting_plans {
            let bounds = plan.bounds();
            for placed in &plan.placements {
                assert!(
                    bounds.contains(&placed.kerf_rect),
                    "{} out of bounds",
                    placed.piece.reference
                );
            }
        }
    }
}

#[test]
fn test_quantity_conservation() {
    let pieces = mixed_pieces();
    // A single sheet cannot hold everything.
    let panels = vec![standard_panel("S1")];
    let result = optimize(&pieces, &panels, Strategy::WasteMinimize, 3.0, true).expect("optimize");

    assert!(!result.feasible);
    for piece in &pieces {
        let placed = result.placed_count_for(&piece.reference) as u32;
        let unplaced = result
            .unplaced
            .iter()
            .find(|u| u.reference == piece.reference)
            .map_or(0, |u| u.quantity);
        assert_eq!(placed + unplaced, piece.quantity, "piece {}", piece.reference);
    }
}

#[test]
fn test_inputs_untouched() {
    let pieces = mixed_pieces();
    let panels = vec![standard_panel("S1").with_stock(4)];
    let before = pieces.clone();
    optimize(&pieces, &panels, Strategy::EfficiencyFirst, 3.0, true).expect("optimize");
    assert_eq!(pieces, before);
}

#[test]
fn test_determinism() {
    let panels = vec![standard_panel("S1").with_stock(2), standard_panel("S2")];
    let first = optimize(&mixed_pieces(), &panels, Strategy::CostMinimize, 3.0, true)
        .expect("optimize");
    let second = optimize(&mixed_pieces(), &panels, Strategy::CostMinimize, 3.0, true)
        .expect("optimize");
    assert_eq!(first.cutting_plans, second.cutting_plans);
    assert_eq!(first.offcuts, second.offcuts);
}

#[test]
fn test_grain_invariant() {
    let panels = vec![
        standard_panel("H").with_grain(GrainDirection::Horizontal).with_stock(2),
        standard_panel("V").with_grain(GrainDirection::Vertical).with_stock(2),
    ];
    let result = optimize(&mixed_pieces(), &panels, Strategy::GrainRespect, 3.0, true)
        .expect("optimize");

    for plan in &result.cutting_plans {
        assert!(grain::validate_cutting_plan(plan).is_empty());
        for placed in &plan.placements {
            assert!(grain::grains_compatible(placed.piece.grain, plan.panel.grain));
        }
    }
    assert!(!result.warnings.iter().any(|w| w.contains("incompatible")));
}

#[test]
fn test_feasibility_monotonic() {
    let pieces = mixed_pieces();
    let mut panels = vec![standard_panel("S1"), standard_panel("S2"), standard_panel("S3")];
    let base = optimize(&pieces, &panels, Strategy::EfficiencyFirst, 3.0, true).expect("optimize");
    assert!(base.feasible);

    for extra in ["S4", "S5"] {
        panels.push(standard_panel(extra));
        let more = optimize(&pieces, &panels, Strategy::EfficiencyFirst, 3.0, true)
            .expect("optimize");
        assert!(more.feasible);
        assert_eq!(more.total_panels_used, base.total_panels_used);
    }
}

#[test]
fn test_offcut_minimums() {
    let panels = vec![
        standard_panel("S1").with_min_offcut(600.0, 600.0),
        standard_panel("S2").with_min_offcut(1500.0, 1500.0),
    ];
    let result = optimize(&mixed_pieces(), &panels, Strategy::EfficiencyFirst, 3.0, true)
        .expect("optimize");

    for offcut in &result.offcuts {
        let panel = panels
            .iter()
            .find(|p| p.id == offcut.source_panel_id)
            .expect("source panel");
        assert!(offcut.width >= panel.min_offcut_width);
        assert!(offcut.height >= panel.min_offcut_height);
        assert!(offcut.area >= panel.min_offcut_area());
    }
    // Only the first sheet's leftover reaches its minimum.
    assert_eq!(result.offcuts.len(), 1);
    assert_eq!(result.offcuts[0].source_panel_id, "S1");
}

#[test]
fn test_full_sheet_kerf_clipped() {
    let pieces = vec![Piece::new("FULL", 2440.0, 1220.0, 1)];
    let result = optimize(&pieces, &[standard_panel("S1")], Strategy::EfficiencyFirst, 3.0, true)
        .expect("optimize");

    assert!(result.feasible);
    let plan = &result.cutting_plans[0];
    assert_eq!(plan.placements[0].kerf_rect, plan.bounds());
    assert!(plan.efficiency_percent > 99.99);
    assert!(result.offcuts.is_empty());
}

// ==================== Strategy comparison ====================

#[test]
fn test_compare_strategies() {
    let panels = vec![standard_panel("S1").with_stock(3)];
    let config = OptimizerConfig::default();
    let results = compare_strategies(&mixed_pieces(), &panels, &config, &Strategy::ALL)
        .expect("compare");

    assert_eq!(results.len(), Strategy::ALL.len());
    for (result, strategy) in results.iter().zip(Strategy::ALL) {
        assert_eq!(result.strategy, strategy);
        assert_layout_valid(result);
    }

    let best = best_result(&results).expect("best");
    assert!(best.feasible);
    let fewest = results.iter().filter(|r| r.feasible).map(|r| r.total_panels_used).min();
    assert_eq!(Some(best.total_panels_used), fewest);
}

// ==================== plan_project ====================

#[test]
fn test_plan_project_from_fixtures() {
    let fixtures = Path::new(FIXTURE_DIR);
    let project = JsonProject::new(fixtures.join("project.json"));
    let inventory = JsonInventory::new(fixtures.join("panels.json"));

    let result = plan_project(&project, &inventory, &OptimizerConfig::default()).expect("plan");

    assert!(result.feasible);
    assert_layout_valid(&result);
    // The recovered offcut is used before new sheets.
    assert_eq!(result.cutting_plans[0].panel.id, "CH-001");
    assert!(result.cutting_plans.iter().all(|p| p.panel.material == "MDF"));

    for plan in &result.cutting_plans {
        for placed in &plan.placements {
            assert!(
                placed.x >= 10.0 && placed.y >= 10.0,
                "trim ignored for {}",
                placed.piece.reference
            );
            assert!(placed.kerf_rect.x_max() <= plan.panel.width - 10.0 + 3.0 + 1e-6);
        }
    }
    assert_eq!(result.placed_count(), 10);
}

#[test]
fn test_plan_project_rejects_oversized_piece() {
    let project = InMemoryProject::new(Project {
        name: "Bibliothèque".into(),
        defaults: ProjectDefaults::default(),
        pieces: vec![
            Piece::new("OK", 600.0, 400.0, 1),
            Piece::new("HUGE", 3000.0, 1500.0, 1),
        ],
    });
    let inventory = InMemoryInventory::new(vec![standard_panel("S1")]);

    let err = plan_project(&project, &inventory, &OptimizerConfig::default()).unwrap_err();
    assert!(err.is_invalid_input());
    assert!(err.to_string().contains("HUGE"));
}

#[test]
fn test_plan_project_rejects_piece_larger_than_trimmed_panel() {
    let project = InMemoryProject::new(Project {
        name: "Dressing".into(),
        defaults: ProjectDefaults {
            kerf_width: 3.0,
            trim_allowance: 10.0,
        },
        pieces: vec![Piece::new("FULL", 2440.0, 1220.0, 1)],
    });
    let inventory = InMemoryInventory::new(vec![standard_panel("S1")]);

    let err = plan_project(&project, &inventory, &OptimizerConfig::default()).unwrap_err();
    assert!(err.is_invalid_input());
    assert!(err.to_string().contains("FULL"));
}

#[test]
fn test_plan_project_rejects_negative_kerf() {
    let project = InMemoryProject::new(Project {
        defaults: ProjectDefaults {
            kerf_width: -2.0,
            trim_allowance: 0.0,
        },
        pieces: vec![Piece::new("P", 600.0, 400.0, 1)],
        ..Default::default()
    });
    let inventory = InMemoryInventory::new(vec![standard_panel("S1")]);

    let err = plan_project(&project, &inventory, &OptimizerConfig::default()).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn test_plan_project_empty_inventory() {
    let project = InMemoryProject::new(Project {
        pieces: vec![Piece::new("P", 600.0, 400.0, 1)],
        ..Default::default()
    });
    let inventory = InMemoryInventory::new(vec![standard_panel("S1").with_stock(0)]);

    let err = plan_project(&project, &inventory, &OptimizerConfig::default()).unwrap_err();
    assert!(matches!(err, OptimizeError::NoPanels));
}

#[test]
fn test_plan_project_missing_file() {
    let project = JsonProject::new(Path::new(FIXTURE_DIR).join("missing.json"));
    let inventory = InMemoryInventory::new(vec![standard_panel("S1")]);

    let err = plan_project(&project, &inventory, &OptimizerConfig::default()).unwrap_err();
    assert!(matches!(err, OptimizeError::FileNotFound { .. }));
}
