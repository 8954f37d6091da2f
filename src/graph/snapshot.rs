use anyhow::{Context, Result};
use eframe::egui::{Color32, Vec2, vec2};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::util::stable_pair;

use super::kind::NodeKind;
use super::model::{GraphModel, Link, Node, NodeDetails, default_link_color};

/// Spread of the deterministic seed positions given to nodes saved without one.
const SEED_SPREAD: Vec2 = vec2(400.0, 300.0);

#[derive(Clone, Debug, Default, Serialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<NodeRecord>,
    pub links: Vec<LinkRecord>,
}

/// Document shape as read from disk: records stay untyped until each one is checked.
#[derive(Debug, Default, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    nodes: Vec<Value>,
    #[serde(default)]
    links: Vec<Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LinkRecord {
    #[serde(rename = "sourceId", alias = "source")]
    pub source_id: String,
    #[serde(rename = "targetId", alias = "target")]
    pub target_id: String,
    pub relation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Decodes each record on its own; unreadable records are dropped like dangling links.
fn decode_records<T: DeserializeOwned>(values: Vec<Value>, what: &'static str) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(error) => {
                tracing::debug!(index, %error, "dropping unreadable {what} record");
                None
            }
        })
        .collect()
}

fn parse_color(value: Option<&str>, fallback: Color32) -> Color32 {
    value
        .and_then(|hex| Color32::from_hex(hex).ok())
        .unwrap_or(fallback)
}

fn seed_position(id: &str) -> Vec2 {
    let (x, y) = stable_pair(id);
    vec2(x * SEED_SPREAD.x, y * SEED_SPREAD.y)
}

impl NodeRecord {
    fn into_node(self) -> Node {
        let style = self.kind.style();
        let position = match (self.x, self.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => vec2(x, y),
            _ => seed_position(&self.id),
        };
        let radius = self
            .radius
            .filter(|radius| radius.is_finite() && *radius > 0.0)
            .unwrap_or(style.radius);

        Node {
            color: parse_color(self.color.as_deref(), style.color),
            details: NodeDetails {
                year: self.year,
                summary: self.summary,
                tags: self.tags,
                external_url: self.external_url,
            },
            radius,
            ..Node::new(self.id, self.kind, self.title).at(position)
        }
    }

    fn from_node(node: &Node) -> Self {
        Self {
            id: node.id.clone(),
            kind: node.kind,
            title: node.title.clone(),
            x: Some(node.position.x),
            y: Some(node.position.y),
            radius: Some(node.radius),
            color: Some(node.color.to_hex()),
            year: node.details.year,
            summary: node.details.summary.clone(),
            tags: node.details.tags.clone(),
            external_url: node.details.external_url.clone(),
        }
    }
}

impl LinkRecord {
    fn into_link(self) -> Link {
        Link {
            color: parse_color(self.color.as_deref(), default_link_color()),
            description: self.description,
            ..Link::new(self.source_id, self.target_id, self.relation)
        }
    }

    fn from_link(link: &Link) -> Self {
        Self {
            source_id: link.source_id.clone(),
            target_id: link.target_id.clone(),
            relation: link.relation.clone(),
            color: Some(link.color.to_hex()),
            description: link.description.clone(),
        }
    }
}

impl GraphSnapshot {
    pub fn capture(graph: &GraphModel) -> Self {
        Self {
            nodes: graph.nodes().iter().map(NodeRecord::from_node).collect(),
            links: graph.links().iter().map(LinkRecord::from_link).collect(),
        }
    }

    pub fn into_graph(self) -> GraphModel {
        GraphModel::from_parts(
            self.nodes.into_iter().map(NodeRecord::into_node).collect(),
            self.links.into_iter().map(LinkRecord::into_link).collect(),
        )
    }
}

pub fn parse_snapshot(raw: &str) -> Result<GraphModel> {
    let raw: RawSnapshot = serde_json::from_str(raw).context("invalid graph snapshot JSON")?;
    let snapshot = GraphSnapshot {
        nodes: decode_records(raw.nodes, "node"),
        links: decode_records(raw.links, "link"),
    };
    Ok(snapshot.into_graph())
}

pub fn render_snapshot(graph: &GraphModel) -> Result<String> {
    serde_json::to_string_pretty(&GraphSnapshot::capture(graph))
        .context("failed to serialize graph snapshot")
}
