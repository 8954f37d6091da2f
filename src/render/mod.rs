//! Frame description. `draw` reads the board state and returns screen-space
//! commands in paint order; the host only rasterises them.

mod cull;
pub mod palette;

use std::collections::HashSet;

use eframe::egui::{Color32, Pos2, Rect, Stroke, Vec2, pos2, vec2};

use crate::camera::Camera;
use crate::config::DisplayMode;
use crate::graph::{GraphModel, Link, Node};
use crate::hit_test::HitTarget;

use cull::{circle_visible, segment_visible};
use palette::{
    DIMMED_LINK_ALPHA, DIMMED_NODE_ALPHA, EVENT_FILL, GRID, HOVER_RING, LABEL, SELECTED_RING,
    blend_color, fade,
};

const GRID_SPACING: f32 = 100.0;
const BASE_LINK_WIDTH: f32 = 1.0;
const EMPHASIZED_LINK_WIDTH: f32 = 2.0;
const HOVERED_LINK_WIDTH: f32 = 4.0;
const EMPHASIZED_RELATION: &str = "investigated";
const EVENT_OUTLINE_WIDTH: f32 = 2.0;
const SELECTED_RING_WIDTH: f32 = 3.0;
const HOVER_RING_WIDTH: f32 = 2.0;
const LABEL_GAP: f32 = 15.0;
/// Room left around a node for its glow when culling.
const GLOW_MARGIN: f32 = 12.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelFont {
    /// Hub titles.
    Heading,
    /// Everything else.
    Caption,
}

impl LabelFont {
    pub fn size(self) -> f32 {
        match self {
            Self::Heading => 14.0,
            Self::Caption => 10.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    GridLine {
        from: Pos2,
        to: Pos2,
        stroke: Stroke,
    },
    Link {
        from: Pos2,
        to: Pos2,
        stroke: Stroke,
        glow: Option<Color32>,
    },
    NodeBody {
        center: Pos2,
        radius: f32,
        fill: Color32,
        outline: Option<Stroke>,
        glow: Option<Color32>,
    },
    Ring {
        center: Pos2,
        radius: f32,
        stroke: Stroke,
    },
    /// Text centred horizontally on `anchor`, top aligned.
    Label {
        anchor: Pos2,
        text: String,
        font: LabelFont,
        color: Color32,
    },
}

/// Everything one frame depends on.
#[derive(Clone, Copy)]
pub struct Scene<'a> {
    pub graph: &'a GraphModel,
    pub camera: &'a Camera,
    pub selected: Option<&'a str>,
    pub hover: Option<&'a HitTarget>,
    pub mode: DisplayMode,
    /// Canvas size in pixels; commands use canvas-relative coordinates.
    pub viewport: Vec2,
}

struct Focus<'a> {
    selected: &'a str,
    neighbors: HashSet<&'a str>,
}

impl Focus<'_> {
    fn includes(&self, id: &str) -> bool {
        id == self.selected || self.neighbors.contains(id)
    }
}

pub fn draw(scene: &Scene<'_>) -> Vec<DrawCommand> {
    let mut commands = Vec::new();
    let viewport = Rect::from_min_size(Pos2::ZERO, scene.viewport);
    let focus = scene
        .selected
        .filter(|id| scene.graph.contains(id))
        .map(|selected| Focus {
            selected,
            neighbors: scene.graph.neighbor_ids(selected),
        });

    if scene.mode == DisplayMode::Research {
        push_grid(&mut commands, scene.camera, viewport);
    }
    push_links(&mut commands, scene, viewport, focus.as_ref());

    let visible: Vec<&Node> = scene
        .graph
        .nodes()
        .iter()
        .filter(|node| {
            let radius = node.radius * scene.camera.scale + GLOW_MARGIN;
            circle_visible(viewport, scene.camera.world_to_screen(node.position), radius)
        })
        .collect();

    for node in &visible {
        commands.push(node_body(scene, node, focus.as_ref()));
    }
    push_rings(&mut commands, scene, &visible);
    for node in &visible {
        commands.push(node_label(scene, node, focus.as_ref()));
    }

    commands
}

fn push_grid(commands: &mut Vec<DrawCommand>, camera: &Camera, viewport: Rect) {
    let spacing = GRID_SPACING * camera.scale;
    if !spacing.is_finite() || spacing <= 1.0 {
        return;
    }
    let stroke = Stroke::new(1.0, GRID);

    let mut x = camera.translate.x.rem_euclid(spacing);
    while x <= viewport.right() {
        commands.push(DrawCommand::GridLine {
            from: pos2(x, viewport.top()),
            to: pos2(x, viewport.bottom()),
            stroke,
        });
        x += spacing;
    }

    let mut y = camera.translate.y.rem_euclid(spacing);
    while y <= viewport.bottom() {
        commands.push(DrawCommand::GridLine {
            from: pos2(viewport.left(), y),
            to: pos2(viewport.right(), y),
            stroke,
        });
        y += spacing;
    }
}

fn push_links(
    commands: &mut Vec<DrawCommand>,
    scene: &Scene<'_>,
    viewport: Rect,
    focus: Option<&Focus<'_>>,
) {
    let nodes = scene.graph.nodes();
    let mut hovered = None;

    for resolved in scene.graph.resolved_links() {
        let link = resolved.link;
        let from = scene.camera.world_to_screen(nodes[resolved.source].position);
        let to = scene.camera.world_to_screen(nodes[resolved.target].position);
        if !segment_visible(viewport, from, to, HOVERED_LINK_WIDTH) {
            continue;
        }

        if scene.hover.is_some_and(|target| target.is_link(link)) {
            hovered = Some((link, from, to));
            continue;
        }

        let width = if link.relation == EMPHASIZED_RELATION {
            EMPHASIZED_LINK_WIDTH
        } else {
            BASE_LINK_WIDTH
        };
        let alpha = match focus {
            Some(focus) if !link.touches(focus.selected) => DIMMED_LINK_ALPHA,
            _ => 1.0,
        };
        commands.push(DrawCommand::Link {
            from,
            to,
            stroke: Stroke::new(width, fade(link.color, alpha)),
            glow: None,
        });
    }

    if let Some((link, from, to)) = hovered {
        commands.push(hovered_link(link, from, to));
    }
}

fn hovered_link(link: &Link, from: Pos2, to: Pos2) -> DrawCommand {
    DrawCommand::Link {
        from,
        to,
        stroke: Stroke::new(HOVERED_LINK_WIDTH, blend_color(link.color, Color32::WHITE, 0.25)),
        glow: Some(link.color),
    }
}

fn node_alpha(node: &Node, focus: Option<&Focus<'_>>) -> f32 {
    match focus {
        Some(focus) if !focus.includes(&node.id) => DIMMED_NODE_ALPHA,
        _ => 1.0,
    }
}

fn node_body(scene: &Scene<'_>, node: &Node, focus: Option<&Focus<'_>>) -> DrawCommand {
    let alpha = node_alpha(node, focus);
    let color = fade(node.color, alpha);
    let glows = scene.mode == DisplayMode::Show || node.kind.is_hub();
    let (fill, outline) = if node.kind.is_event() {
        (
            fade(EVENT_FILL, alpha),
            Some(Stroke::new(EVENT_OUTLINE_WIDTH * scene.camera.scale, color)),
        )
    } else {
        (color, None)
    };

    DrawCommand::NodeBody {
        center: scene.camera.world_to_screen(node.position),
        radius: node.radius * scene.camera.scale,
        fill,
        outline,
        glow: glows.then_some(color),
    }
}

fn push_rings(commands: &mut Vec<DrawCommand>, scene: &Scene<'_>, visible: &[&Node]) {
    let hovered = scene.hover.and_then(HitTarget::node_id);
    for node in visible {
        let center = scene.camera.world_to_screen(node.position);
        let radius = node.radius * scene.camera.scale;
        if scene.selected == Some(node.id.as_str()) {
            commands.push(DrawCommand::Ring {
                center,
                radius,
                stroke: Stroke::new(SELECTED_RING_WIDTH, SELECTED_RING),
            });
        }
        if hovered == Some(node.id.as_str()) {
            commands.push(DrawCommand::Ring {
                center,
                radius,
                stroke: Stroke::new(HOVER_RING_WIDTH, HOVER_RING),
            });
        }
    }
}

fn node_label(scene: &Scene<'_>, node: &Node, focus: Option<&Focus<'_>>) -> DrawCommand {
    let center = scene.camera.world_to_screen(node.position);
    let font = if node.kind.is_hub() {
        LabelFont::Heading
    } else {
        LabelFont::Caption
    };

    DrawCommand::Label {
        anchor: center + vec2(0.0, node.radius * scene.camera.scale + LABEL_GAP - font.size()),
        text: node.title.clone(),
        font,
        color: fade(LABEL, node_alpha(node, focus)),
    }
}
