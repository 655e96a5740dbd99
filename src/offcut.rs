//! Offcut recovery: derive, rate, consolidate and match leftover material.

use crate::config::{
    CONSOLIDATION_TOLERANCE, EPS, MM2_PER_M2, OFFCUT_RECOVERY_RATIO, THICKNESS_TOLERANCE,
};
use crate::geometry::aspect_ratio;
use crate::grain::grains_compatible;
use crate::model::{CuttingPlan, Offcut, OffcutQuality, Piece, Rotation};

/// Offcuts below this area (mm², 0.05 m²) lose half their utility score.
const SMALL_OFFCUT_AREA: f64 = 0.05 * MM2_PER_M2;

/// Derive one approximate offcut per plan.
///
/// The leftover is modelled as a square of side √(waste × 0.8) and kept only
/// when its width, height and area all reach the source panel's minimums.
pub fn process_offcuts(plans: &[CuttingPlan]) -> Vec<Offcut> {
    plans.iter().filter_map(extract_offcut).collect()
}

fn extract_offcut(plan: &CuttingPlan) -> Option<Offcut> {
    let panel = &plan.panel;
    let waste = plan.waste_area();
    if waste <= 0.0 {
        return None;
    }

    let side = (waste * OFFCUT_RECOVERY_RATIO).sqrt();
    let area = side * side;
    if side < panel.min_offcut_width
        || side < panel.min_offcut_height
        || area < panel.min_offcut_area()
    {
        return None;
    }

    let quality = OffcutQuality::from_area_ratio(area / panel.area());
    Some(Offcut {
        id: format!("CH-{}-{}", panel.id, plan.sheet_index + 1),
        width: side,
        height: side,
        area,
        material: panel.material.clone(),
        thickness: panel.thickness,
        grain: panel.grain,
        source_panel_id: panel.id.clone(),
        quality,
        recommendations: recommendations(side, side, &panel.material),
        consolidated_from: None,
        stock: 1,
    })
}

/// Usage suggestions for an offcut of the given size and material.
pub fn recommendations(width: f64, height: f64, material: &str) -> Vec<String> {
    let long = width.max(height);
    let short = width.min(height);

    let mut notes = Vec::new();
    if short >= 500.0 {
        notes.push("Façades de tiroirs, petites portes, étagères".to_string());
    } else if long >= 300.0 && short >= 100.0 {
        notes.push("Plinthes, tasseaux, bandeaux de finition".to_string());
    } else {
        notes.push("Gabarits, prototypes, cales".to_string());
    }

    let code = material.to_uppercase();
    if code.contains("MDF") {
        notes.push("MDF : idéal pour les pièces laquées ou peintes".to_string());
    } else if code.contains("MEL") {
        notes.push("Mélaminé : réserver aux fonds et cloisons de caissons".to_string());
    } else if code.contains("CP") || code.contains("CONTRE") {
        notes.push("Contreplaqué : adapté aux pièces de structure".to_string());
    } else if ["CHENE", "CHÊNE", "NOYER", "HETRE"]
        .iter()
        .any(|wood| code.contains(wood))
    {
        notes.push("Bois noble : conserver pour des pièces visibles".to_string());
    }
    notes
}

struct Consolidation {
    reference_width: f64,
    reference_height: f64,
    width_sum: f64,
    height_sum: f64,
    members: usize,
    merged: Offcut,
}

/// Merge offcuts of the same material and thickness whose width and height
/// each differ by at most 50 mm from the first offcut of a group.
///
/// Stock counts add up, dimensions are averaged and `consolidated_from`
/// lists the merged ids.
pub fn consolidate_similar_offcuts(offcuts: &[Offcut]) -> Vec<Offcut> {
    let mut groups: Vec<Consolidation> = Vec::new();

    for offcut in offcuts {
        let slot = groups.iter_mut().find(|g| {
            g.merged.material.eq_ignore_ascii_case(&offcut.material)
                && (g.merged.thickness - offcut.thickness).abs() < EPS
                && (g.reference_width - offcut.width).abs() <= CONSOLIDATION_TOLERANCE
                && (g.reference_height - offcut.height).abs() <= CONSOLIDATION_TOLERANCE
        });

        match slot {
            Some(group) => {
                group.width_sum += offcut.width;
                group.height_sum += offcut.height;
                group.members += 1;
                group.merged.stock += offcut.stock;
                group
                    .merged
                    .consolidated_from
                    .get_or_insert_with(Vec::new)
                    .push(offcut.id.clone());
            }
            None => groups.push(Consolidation {
                reference_width: offcut.width,
                reference_height: offcut.height,
                width_sum: offcut.width,
                height_sum: offcut.height,
                members: 1,
                merged: Offcut {
                    consolidated_from: None,
                    ..offcut.clone()
                },
            }),
        }
    }

    groups
        .into_iter()
        .map(|g| {
            let mut merged = g.merged;
            if g.members > 1 {
                merged.width = g.width_sum / g.members as f64;
                merged.height = g.height_sum / g.members as f64;
                merged.area = merged.width * merged.height;
                if let Some(from) = merged.consolidated_from.as_mut() {
                    from.insert(0, merged.id.clone());
                }
            }
            merged
        })
        .collect()
}

/// Reuse score of an offcut; higher is more useful.
pub fn utility_score(offcut: &Offcut) -> f64 {
    let mut score = offcut.area / 1000.0;

    let ratio = aspect_ratio(offcut.width, offcut.height);
    if ratio <= 2.0 {
        score += 1000.0;
        if ratio <= 1.5 {
            score += 500.0;
        }
    }

    score += offcut.quality.utility_bonus();
    score += 100.0 * f64::from(offcut.stock);

    if offcut.area < SMALL_OFFCUT_AREA {
        score *= 0.5;
    }
    score
}

/// Offcuts ordered by descending utility; equal scores keep input order.
pub fn sort_by_utility(offcuts: &[Offcut]) -> Vec<Offcut> {
    let mut scored: Vec<(f64, &Offcut)> = offcuts.iter().map(|o| (utility_score(o), o)).collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().map(|(_, o)| o.clone()).collect()
}

/// An offcut able to host a piece.
#[derive(Debug, Clone, PartialEq)]
pub struct OffcutMatch<'a> {
    pub offcut: &'a Offcut,
    pub rotation: Rotation,
    /// Piece footprint as a share of the offcut area.
    pub efficiency_percent: f64,
    pub leftover_area: f64,
}

/// Offcuts that can host a piece, best match first.
///
/// Material must match, thickness within ±1 mm, and the orientation used must
/// be grain-compatible. Candidates are ranked by efficiency, so the first
/// match leaves the least leftover area.
pub fn find_suitable_offcuts<'a>(piece: &Piece, offcuts: &'a [Offcut]) -> Vec<OffcutMatch<'a>> {
    let piece_area = piece.adjusted_area();

    let mut matches: Vec<OffcutMatch<'a>> = offcuts
        .iter()
        .filter(|o| o.material.eq_ignore_ascii_case(&piece.material))
        .filter(|o| (o.thickness - piece.thickness).abs() <= THICKNESS_TOLERANCE)
        .filter_map(|o| {
            let straight = grains_compatible(piece.grain, o.grain)
                && piece.fits_within(o.width, o.height);
            let rotated = grains_compatible(piece.grain.flipped(), o.grain)
                && piece.fits_within_rotated(o.width, o.height);
            let rotation = if straight {
                Rotation::Deg0
            } else if rotated {
                Rotation::Deg90
            } else {
                return None;
            };
            Some(OffcutMatch {
                offcut: o,
                rotation,
                efficiency_percent: piece_area / o.area * 100.0,
                leftover_area: o.area - piece_area,
            })
        })
        .collect();

    matches.sort_by(|a, b| b.efficiency_percent.total_cmp(&a.efficiency_percent));
    matches
}
