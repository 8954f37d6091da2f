//! Per-frame relaxation of node positions.
//!
//! Repulsion is evaluated over every unordered node pair, so a tick is O(n²).
//! That is fine for a few hundred nodes and is the ceiling of this engine.

mod forces;

use eframe::egui::Vec2;

use crate::config::PhysicsConfig;
use crate::graph::GraphModel;

use forces::{repulsion_between, spring_between};

#[derive(Default)]
pub struct PhysicsScratch {
    forces: Vec<Vec2>,
}

/// Advances the layout by one tick. The node with id `pinned` keeps its position
/// and has its velocity zeroed; it still pushes and pulls the others.
pub fn step_physics(
    graph: &mut GraphModel,
    pinned: Option<&str>,
    config: &PhysicsConfig,
    scratch: &mut PhysicsScratch,
) {
    let node_count = graph.node_count();
    if node_count == 0 {
        return;
    }

    let pinned_index = pinned.and_then(|id| graph.index_of(id));
    let forces = &mut scratch.forces;
    forces.clear();
    forces.resize(node_count, Vec2::ZERO);

    let nodes = graph.nodes();
    for i in 0..node_count {
        for j in (i + 1)..node_count {
            let factor = if nodes[i].kind.is_hub() || nodes[j].kind.is_hub() {
                config.hub_repulsion_factor
            } else {
                1.0
            };
            let delta = nodes[i].position - nodes[j].position;
            if let Some(force) = repulsion_between(delta, factor, (i, j), config) {
                forces[i] += force;
                forces[j] -= force;
            }
        }
    }

    for resolved in graph.resolved_links() {
        if resolved.source == resolved.target {
            continue;
        }
        let force = spring_between(
            nodes[resolved.source].position,
            nodes[resolved.target].position,
            config,
        );
        forces[resolved.source] += force;
        forces[resolved.target] -= force;
    }

    let damping = config.damping_factor();
    for (index, node) in graph.nodes_mut().iter_mut().enumerate() {
        if Some(index) == pinned_index {
            node.velocity = Vec2::ZERO;
            continue;
        }

        let centering = node.position * config.centering;
        let velocity = node.velocity + forces[index] - centering;
        if !velocity.is_finite() {
            tracing::trace!(id = %node.id, "discarding non-finite velocity");
            node.velocity = Vec2::ZERO;
            continue;
        }

        node.position += velocity;
        node.velocity = velocity * damping;
    }
}
