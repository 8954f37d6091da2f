use eframe::egui::{Pos2, Vec2};

use crate::camera::Camera;
use crate::config::HitTestConfig;
use crate::graph::{GraphModel, Link, Node, NodeId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Node(NodeId),
    Link { source: NodeId, target: NodeId },
}

impl HitTarget {
    pub fn for_link(link: &Link) -> Self {
        Self::Link {
            source: link.source_id.clone(),
            target: link.target_id.clone(),
        }
    }

    pub fn node_id(&self) -> Option<&str> {
        match self {
            Self::Node(id) => Some(id),
            Self::Link { .. } => None,
        }
    }

    pub fn is_link(&self, link: &Link) -> bool {
        match self {
            Self::Link { source, target } => link.connects(source, target),
            Self::Node(_) => false,
        }
    }
}

pub fn distance_to_segment(point: Vec2, start: Vec2, end: Vec2) -> f32 {
    let segment = end - start;
    let length_sq = segment.length_sq();
    let t = if length_sq > 0.0 {
        ((point - start).dot(segment) / length_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (point - (start + segment * t)).length()
}

/// Topmost node covering `world`; later nodes are drawn above earlier ones.
pub fn node_at(graph: &GraphModel, world: Vec2, padding: f32) -> Option<&Node> {
    graph
        .nodes()
        .iter()
        .rev()
        .find(|node| (node.position - world).length() < node.radius + padding)
}

/// First link whose segment passes within `tolerance` world units of `world`.
pub fn link_at(graph: &GraphModel, world: Vec2, tolerance: f32) -> Option<&Link> {
    let nodes = graph.nodes();
    graph
        .resolved_links()
        .find(|resolved| {
            distance_to_segment(
                world,
                nodes[resolved.source].position,
                nodes[resolved.target].position,
            ) < tolerance
        })
        .map(|resolved| resolved.link)
}

/// Classifies a screen position; nodes always win over links.
pub fn hit_test(
    graph: &GraphModel,
    camera: &Camera,
    screen: Pos2,
    config: &HitTestConfig,
) -> Option<HitTarget> {
    if !screen.is_finite() {
        return None;
    }

    let world = camera.screen_to_world(screen);
    if let Some(node) = node_at(graph, world, config.node_padding) {
        return Some(HitTarget::Node(node.id.clone()));
    }

    let tolerance = config.link_tolerance / camera.scale;
    link_at(graph, world, tolerance).map(HitTarget::for_link)
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;
    use crate::graph::{Link, NodeKind};

    fn camera(scale: f32) -> Camera {
        Camera {
            scale,
            translate: vec2(200.0, 100.0),
        }
    }

    #[test]
    fn segment_distance_handles_interior_ends_and_degenerate() {
        let start = vec2(0.0, 0.0);
        let end = vec2(10.0, 0.0);
        assert_eq!(distance_to_segment(vec2(5.0, 3.0), start, end), 3.0);
        assert_eq!(distance_to_segment(vec2(-4.0, 3.0), start, end), 5.0);
        assert_eq!(distance_to_segment(vec2(13.0, 4.0), start, end), 5.0);
        assert_eq!(distance_to_segment(vec2(3.0, 4.0), start, start), 5.0);
    }

    #[test]
    fn overlapping_nodes_resolve_to_the_last_added() {
        let mut graph = GraphModel::new();
        graph.add_node(Node::new("first", NodeKind::Topic, "first").at(vec2(10.0, 10.0)));
        graph.add_node(Node::new("second", NodeKind::Topic, "second").at(vec2(10.0, 10.0)));

        let camera = camera(1.0);
        let screen = camera.world_to_screen(vec2(12.0, 9.0));
        assert_eq!(
            hit_test(&graph, &camera, screen, &HitTestConfig::default()),
            Some(HitTarget::Node("second".into()))
        );
    }

    #[test]
    fn node_hit_includes_padding() {
        let mut graph = GraphModel::new();
        graph.add_node(Node::new("n", NodeKind::EventCraft, "n").at(Vec2::ZERO));
        let radius = NodeKind::EventCraft.style().radius;

        assert!(node_at(&graph, vec2(radius + 4.9, 0.0), 5.0).is_some());
        assert!(node_at(&graph, vec2(radius + 5.0, 0.0), 5.0).is_none());
    }

    #[test]
    fn link_midpoint_is_a_link_hit_at_any_zoom() {
        let mut graph = GraphModel::new();
        graph.add_node(Node::new("a", NodeKind::Tag, "a").at(vec2(-200.0, 0.0)));
        graph.add_node(Node::new("b", NodeKind::Tag, "b").at(vec2(200.0, 0.0)));
        let _ = graph.add_link(Link::new("a", "b", "relates_to"));

        for scale in [0.2, 1.0, 5.0] {
            let camera = camera(scale);
            let midpoint = camera.world_to_screen(vec2(0.0, 0.0));
            assert_eq!(
                hit_test(&graph, &camera, midpoint, &HitTestConfig::default()),
                Some(HitTarget::Link {
                    source: "a".into(),
                    target: "b".into()
                }),
                "scale {scale}"
            );

            let off_line = midpoint + vec2(0.0, 6.0);
            assert_eq!(
                hit_test(&graph, &camera, off_line, &HitTestConfig::default()),
                None,
                "scale {scale}"
            );
        }
    }

    #[test]
    fn nodes_take_priority_over_links() {
        let mut graph = GraphModel::new();
        graph.add_node(Node::new("a", NodeKind::Tag, "a").at(vec2(-50.0, 0.0)));
        graph.add_node(Node::new("b", NodeKind::Tag, "b").at(vec2(50.0, 0.0)));
        graph.add_node(Node::new("mid", NodeKind::Topic, "mid").at(vec2(0.0, 0.0)));
        let _ = graph.add_link(Link::new("a", "b", "relates_to"));

        let camera = camera(1.0);
        let hit = hit_test(&graph, &camera, camera.world_to_screen(Vec2::ZERO), &HitTestConfig::default());
        assert_eq!(hit, Some(HitTarget::Node("mid".into())));
    }

    #[test]
    fn non_finite_pointer_hits_nothing() {
        let graph = crate::graph::default_graph();
        let hit = hit_test(&graph, &camera(1.0), pos2(f32::NAN, 0.0), &HitTestConfig::default());
        assert_eq!(hit, None);
    }
}
