use std::collections::{HashMap, HashSet};

use eframe::egui::{Color32, Vec2};

use super::kind::NodeKind;

pub type NodeId = String;

pub const USER_LINK_RELATION: &str = "user_connected";
pub const USER_LINK_DESCRIPTION: &str = "User created connection.";
pub const CUSTOM_ID_PREFIX: &str = "custom_";

pub fn default_link_color() -> Color32 {
    Color32::from_rgb(71, 85, 105)
}

/// Opaque record payload carried alongside the simulated fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeDetails {
    pub year: Option<i32>,
    pub summary: String,
    pub tags: Vec<String>,
    pub external_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub title: String,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub color: Color32,
    pub details: NodeDetails,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, kind: NodeKind, title: impl Into<String>) -> Self {
        let style = kind.style();
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            radius: style.radius,
            color: style.color,
            details: NodeDetails::default(),
        }
    }

    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_details(mut self, details: NodeDetails) -> Self {
        self.details = details;
        self
    }

    fn sanitize(&mut self) {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            self.radius = self.kind.style().radius;
        }
        if !self.position.is_finite() {
            self.position = Vec2::ZERO;
        }
        if !self.velocity.is_finite() {
            self.velocity = Vec2::ZERO;
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    pub source_id: NodeId,
    pub target_id: NodeId,
    pub relation: String,
    pub color: Color32,
    pub description: Option<String>,
}

impl Link {
    pub fn new(
        source_id: impl Into<NodeId>,
        target_id: impl Into<NodeId>,
        relation: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            relation: relation.into(),
            color: default_link_color(),
            description: None,
        }
    }

    pub fn user_connected(source_id: impl Into<NodeId>, target_id: impl Into<NodeId>) -> Self {
        Self {
            description: Some(USER_LINK_DESCRIPTION.to_owned()),
            ..Self::new(source_id, target_id, USER_LINK_RELATION)
        }
    }

    /// Unordered endpoint comparison.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source_id == a && self.target_id == b) || (self.source_id == b && self.target_id == a)
    }

    pub fn touches(&self, id: &str) -> bool {
        self.source_id == id || self.target_id == id
    }

    pub fn other_end(&self, id: &str) -> Option<&str> {
        if self.source_id == id {
            Some(self.target_id.as_str())
        } else if self.target_id == id {
            Some(self.source_id.as_str())
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkInsert {
    Inserted,
    Duplicate,
    MissingEndpoint,
    SelfLink,
}

impl LinkInsert {
    pub fn inserted(self) -> bool {
        self == Self::Inserted
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Neighbor<'a> {
    pub node: &'a Node,
    pub link: &'a Link,
}

/// A link whose endpoints resolved to storage indices this frame.
#[derive(Clone, Copy, Debug)]
pub struct ResolvedLink<'a> {
    pub link: &'a Link,
    pub source: usize,
    pub target: usize,
}

#[derive(Clone, Debug, Default)]
pub struct GraphModel {
    nodes: Vec<Node>,
    links: Vec<Link>,
    index_by_id: HashMap<NodeId, usize>,
    custom_id_counter: u64,
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from untrusted parts, dropping duplicate node ids and any
    /// link that is dangling, self-referencing or a repeat of an existing pair.
    pub fn from_parts(nodes: Vec<Node>, links: Vec<Link>) -> Self {
        let mut graph = Self::new();
        for node in nodes {
            let id = node.id.clone();
            if !graph.add_node(node) {
                tracing::debug!(%id, "dropping node with duplicate id");
            }
        }

        for link in links {
            let outcome = graph.add_link(link.clone());
            if !outcome.inserted() {
                tracing::debug!(
                    source = %link.source_id,
                    target = %link.target_id,
                    ?outcome,
                    "dropping link"
                );
            }
        }

        graph
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_by_id.contains_key(id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|index| &self.nodes[index])
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        let index = self.index_of(id)?;
        self.nodes.get_mut(index)
    }

    /// Mutable access for the simulation. Ids and ordering stay owned by the model.
    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn add_node(&mut self, mut node: Node) -> bool {
        if self.index_by_id.contains_key(&node.id) {
            return false;
        }

        node.sanitize();
        self.index_by_id.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    /// Inserts `link` unless either ordering of its endpoint pair already exists.
    pub fn add_link(&mut self, link: Link) -> LinkInsert {
        if link.source_id == link.target_id {
            return LinkInsert::SelfLink;
        }
        if !self.contains(&link.source_id) || !self.contains(&link.target_id) {
            return LinkInsert::MissingEndpoint;
        }
        if self.has_link(&link.source_id, &link.target_id) {
            return LinkInsert::Duplicate;
        }

        self.links.push(link);
        LinkInsert::Inserted
    }

    pub fn has_link(&self, a: &str, b: &str) -> bool {
        self.links.iter().any(|link| link.connects(a, b))
    }

    pub fn find_link(&self, a: &str, b: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.connects(a, b))
    }

    pub fn neighbors(&self, id: &str) -> Vec<Neighbor<'_>> {
        self.links
            .iter()
            .filter_map(|link| {
                let other = link.other_end(id)?;
                let node = self.node(other)?;
                Some(Neighbor { node, link })
            })
            .collect()
    }

    pub fn neighbor_ids(&self, id: &str) -> HashSet<&str> {
        self.links
            .iter()
            .filter_map(|link| link.other_end(id))
            .filter(|other| self.contains(other))
            .collect()
    }

    pub fn resolved_links(&self) -> impl Iterator<Item = ResolvedLink<'_>> {
        self.links.iter().filter_map(|link| {
            let source = self.index_of(&link.source_id)?;
            let target = self.index_of(&link.target_id)?;
            Some(ResolvedLink {
                link,
                source,
                target,
            })
        })
    }

    /// Returns an id for a user-created node that no node in this session has used.
    pub fn next_custom_id(&mut self) -> NodeId {
        loop {
            self.custom_id_counter = self.custom_id_counter.wrapping_add(1);
            let candidate = format!("{CUSTOM_ID_PREFIX}{}", self.custom_id_counter);
            if !self.contains(&candidate) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    fn two_node_graph() -> GraphModel {
        let mut graph = GraphModel::new();
        assert!(graph.add_node(Node::new("a", NodeKind::Person, "A")));
        assert!(graph.add_node(Node::new("b", NodeKind::EventCraft, "B")));
        graph
    }

    #[test]
    fn add_link_is_idempotent_in_both_orderings() {
        let mut graph = two_node_graph();
        assert_eq!(graph.add_link(Link::user_connected("a", "b")), LinkInsert::Inserted);
        assert_eq!(graph.link_count(), 1);

        assert_eq!(graph.add_link(Link::user_connected("b", "a")), LinkInsert::Duplicate);
        assert_eq!(graph.add_link(Link::user_connected("a", "b")), LinkInsert::Duplicate);
        assert_eq!(graph.link_count(), 1);
    }

    #[test]
    fn add_link_rejects_missing_endpoints_and_self_links() {
        let mut graph = two_node_graph();
        assert_eq!(
            graph.add_link(Link::new("a", "ghost", "relates_to")),
            LinkInsert::MissingEndpoint
        );
        assert_eq!(graph.add_link(Link::new("a", "a", "relates_to")), LinkInsert::SelfLink);
        assert_eq!(graph.link_count(), 0);
    }

    #[test]
    fn duplicate_node_ids_are_rejected() {
        let mut graph = two_node_graph();
        assert!(!graph.add_node(Node::new("a", NodeKind::Topic, "Other A")));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.node("a").map(|node| node.title.as_str()), Some("A"));
    }

    #[test]
    fn from_parts_drops_dangling_and_repeated_links() {
        let nodes = vec![
            Node::new("a", NodeKind::Person, "A"),
            Node::new("b", NodeKind::Program, "B"),
            Node::new("a", NodeKind::Topic, "dup"),
        ];
        let links = vec![
            Link::new("a", "b", "colleague"),
            Link::new("b", "a", "colleague"),
            Link::new("a", "missing", "funded"),
        ];

        let graph = GraphModel::from_parts(nodes, links);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.link_count(), 1);
        assert_eq!(graph.resolved_links().count(), 1);
    }

    #[test]
    fn neighbors_report_other_end_and_relation() {
        let mut graph = two_node_graph();
        graph.add_node(Node::new("c", NodeKind::Topic, "C"));
        let _ = graph.add_link(Link::new("a", "b", "investigated"));
        let _ = graph.add_link(Link::new("c", "a", "studied"));

        let neighbors = graph.neighbors("a");
        let pairs = neighbors
            .iter()
            .map(|neighbor| (neighbor.node.id.as_str(), neighbor.link.relation.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(pairs, vec![("b", "investigated"), ("c", "studied")]);
        assert!(graph.neighbors("missing").is_empty());
        assert_eq!(graph.neighbor_ids("b"), HashSet::from(["a"]));
    }

    #[test]
    fn custom_ids_never_collide() {
        let mut graph = GraphModel::new();
        graph.add_node(Node::new("custom_2", NodeKind::Topic, "taken"));

        let first = graph.next_custom_id();
        graph.add_node(Node::new(first.clone(), NodeKind::Topic, "first"));
        let second = graph.next_custom_id();
        let third = graph.next_custom_id();

        assert_eq!(first, "custom_1");
        assert_eq!(second, "custom_3");
        assert_ne!(second, third);
        assert!(!graph.contains(&second));
    }

    #[test]
    fn add_node_repairs_degenerate_geometry() {
        let mut graph = GraphModel::new();
        let mut node = Node::new("n", NodeKind::Tag, "N").at(vec2(f32::NAN, 1.0));
        node.radius = -3.0;
        graph.add_node(node);

        let node = graph.node("n").expect("inserted");
        assert_eq!(node.radius, NodeKind::Tag.style().radius);
        assert_eq!(node.position, Vec2::ZERO);
    }
}
