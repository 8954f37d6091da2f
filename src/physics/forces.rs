use eframe::egui::{Vec2, vec2};

use crate::config::PhysicsConfig;

/// Substituted for a zero separation so no force divides by zero.
pub(super) const FALLBACK_DISTANCE: f32 = 1.0;
/// Below this separation two centres are treated as coincident.
const COINCIDENT_EPSILON: f32 = 1e-4;
/// Fixed push applied to coincident centres along a pair-specific direction.
const COINCIDENT_NUDGE: f32 = 0.5;

fn fallback_direction(first: usize, second: usize) -> Vec2 {
    let angle = ((first as f32) * 0.618_034 + (second as f32) * 0.414_214) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin())
}

/// Force on the node at `first` from the node at `second`; the caller applies the
/// opposite force to `second`. `None` when the pair lies beyond the cutoff.
pub(super) fn repulsion_between(
    delta: Vec2,
    factor: f32,
    pair: (usize, usize),
    config: &PhysicsConfig,
) -> Option<Vec2> {
    let distance_sq = delta.length_sq();
    let distance = distance_sq.sqrt();
    if distance >= config.repulsion_cutoff {
        return None;
    }

    if distance < COINCIDENT_EPSILON {
        return Some(fallback_direction(pair.0, pair.1) * COINCIDENT_NUDGE);
    }

    let distance_sq = distance_sq.max(FALLBACK_DISTANCE * FALLBACK_DISTANCE);
    let magnitude = (config.repulsion * factor) / distance_sq;
    Some(delta / distance * magnitude)
}

/// Hookean pull of `source` toward `target` (positive when stretched past rest).
pub(super) fn spring_between(source: Vec2, target: Vec2, config: &PhysicsConfig) -> Vec2 {
    let delta = target - source;
    let mut distance = delta.length();
    if distance < COINCIDENT_EPSILON {
        distance = FALLBACK_DISTANCE;
    }

    let magnitude = (distance - config.rest_length) * config.spring_strength;
    delta / distance * magnitude
}
