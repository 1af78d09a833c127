use crate::game::{
    Aabb, MAGNET_COMMIT_STRENGTH, MAGNET_HINT_COUNT, Transform, angle_delta, normalize_angle,
    distance, piece_edges, world_vertices,
};
use crate::state::GameState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MagnetFeature {
    Corner,
    Edge,
}

/// A non-binding indicator the authoring UI can draw at the alignment point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MagnetHint {
    pub feature: MagnetFeature,
    pub at: (f32, f32),
    pub strength: f32,
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    feature: MagnetFeature,
    strength: f32,
    position: (f32, f32),
    rotation_deg: Option<f32>,
    anchor: (f32, f32),
}

/// Where the dragged piece ends up for this move tick, and what the UI may
/// show about it.
#[derive(Clone, Debug)]
pub struct MagnetOutcome {
    pub position: (f32, f32),
    pub rotation_deg: f32,
    pub committed: Option<MagnetFeature>,
    pub hints: Vec<MagnetHint>,
}

/// Rank-and-filter over corner and edge alignments between the dragged piece
/// and every other piece: strongest candidate above the commit threshold is
/// applied unless overlap prevention vetoes it; anything weaker only ever
/// surfaces as hints. Re-evaluated from scratch on every drag-move tick.
/// O(pieces x edges^2) per tick, fine for the fixed 7-piece set.
pub fn evaluate_move(piece_index: usize, proposed: (f32, f32), state: &GameState) -> MagnetOutcome {
    let piece = &state.pieces[piece_index];
    let config = state.magnetism;
    let raw = MagnetOutcome {
        position: proposed,
        rotation_deg: piece.transform.rotation_deg,
        committed: None,
        hints: Vec::new(),
    };
    if !config.enabled {
        return raw;
    }

    let proposed_transform = Transform {
        x: proposed.0,
        y: proposed.1,
        ..piece.transform
    };
    let own_vertices = world_vertices(piece.kind, &proposed_transform, state.unit_size);
    let own_edges = piece_edges(&own_vertices);

    let mut candidates: Vec<Candidate> = Vec::new();
    for (other_index, other) in state.pieces.iter().enumerate() {
        if other_index == piece_index {
            continue;
        }
        let other_vertices = world_vertices(other.kind, &other.transform, state.unit_size);

        if config.corner_snap {
            for own in &own_vertices {
                for target in &other_vertices {
                    let d = distance(*own, *target);
                    if d > config.snap_distance {
                        continue;
                    }
                    candidates.push(Candidate {
                        feature: MagnetFeature::Corner,
                        strength: 1.0 - d / config.snap_distance,
                        position: (
                            proposed.0 + (target.0 - own.0),
                            proposed.1 + (target.1 - own.1),
                        ),
                        rotation_deg: None,
                        anchor: *target,
                    });
                }
            }
        }

        if config.edge_snap {
            let other_edges = piece_edges(&other_vertices);
            for own in &own_edges {
                for target in &other_edges {
                    // Midpoint distance approximates edge separation.
                    let d = distance(own.midpoint, target.midpoint);
                    if d > config.snap_distance {
                        continue;
                    }
                    let rotation_deg = if config.angle_align {
                        aligned_rotation(
                            piece.transform.rotation_deg,
                            own.angle_deg,
                            target.angle_deg,
                            config.angle_snap_tolerance_deg,
                        )
                    } else {
                        None
                    };
                    candidates.push(Candidate {
                        feature: MagnetFeature::Edge,
                        strength: 1.0 - d / config.snap_distance,
                        position: (
                            proposed.0 + (target.midpoint.0 - own.midpoint.0),
                            proposed.1 + (target.midpoint.1 - own.midpoint.1),
                        ),
                        rotation_deg,
                        anchor: target.midpoint,
                    });
                }
            }
        }
    }

    if candidates.is_empty() {
        return raw;
    }
    candidates.sort_by(|a, b| b.strength.total_cmp(&a.strength));

    let best = candidates[0];
    if best.strength > MAGNET_COMMIT_STRENGTH {
        let rotation_deg = best.rotation_deg.unwrap_or(piece.transform.rotation_deg);
        let vetoed = config.prevent_overlap
            && collides(piece_index, best.position, rotation_deg, state);
        if !vetoed {
            let mut hints = Vec::new();
            if config.show_indicators {
                // One indicator per candidate kind at most.
                for feature in [MagnetFeature::Corner, MagnetFeature::Edge] {
                    if let Some(candidate) =
                        candidates.iter().find(|c| c.feature == feature)
                    {
                        hints.push(MagnetHint {
                            feature,
                            at: candidate.anchor,
                            strength: candidate.strength,
                        });
                    }
                }
            }
            return MagnetOutcome {
                position: best.position,
                rotation_deg,
                committed: Some(best.feature),
                hints,
            };
        }
        return raw;
    }

    let mut outcome = raw;
    if config.show_indicators {
        outcome.hints = candidates
            .iter()
            .take(MAGNET_HINT_COUNT)
            .map(|candidate| MagnetHint {
                feature: candidate.feature,
                at: candidate.anchor,
                strength: candidate.strength,
            })
            .collect();
    }
    outcome
}

/// Edges are undirected: both parallel and anti-parallel alignment count.
/// Returns the absolute rotation to apply, or None when the angular gap is
/// outside tolerance either way.
fn aligned_rotation(
    current_rotation: f32,
    own_angle: f32,
    target_angle: f32,
    tolerance_deg: f32,
) -> Option<f32> {
    let delta = angle_delta(target_angle, own_angle);
    if delta.abs() <= tolerance_deg {
        return Some(normalize_angle(current_rotation + delta));
    }
    let anti = if delta > 0.0 { delta - 180.0 } else { delta + 180.0 };
    if anti.abs() <= tolerance_deg {
        return Some(normalize_angle(current_rotation + anti));
    }
    None
}

fn collides(piece_index: usize, position: (f32, f32), rotation_deg: f32, state: &GameState) -> bool {
    let piece = &state.pieces[piece_index];
    let transform = Transform {
        x: position.0,
        y: position.1,
        rotation_deg,
        mirrored: piece.transform.mirrored,
    };
    let own = Aabb::from_points(&world_vertices(piece.kind, &transform, state.unit_size));
    state.pieces.iter().enumerate().any(|(index, other)| {
        if index == piece_index {
            return false;
        }
        let other_box = Aabb::from_points(&world_vertices(
            other.kind,
            &other.transform,
            state.unit_size,
        ));
        own.intersects(&other_box)
    })
}
