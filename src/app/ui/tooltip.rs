use eframe::egui::{self, Context, Rect, RichText, vec2};

use crate::hit_test::HitTarget;
use crate::util::humanize;

use super::super::BoardView;

const TOOLTIP_OFFSET: f32 = 15.0;
const TOOLTIP_WIDTH: f32 = 260.0;

impl BoardView {
    pub(in crate::app) fn draw_tooltip(&self, ctx: &Context, canvas: Rect) {
        if self.board.is_dragging() || self.board.is_panning() {
            return;
        }
        let Some(hover) = self.board.hover() else {
            return;
        };

        let graph = self.board.graph();
        let position = canvas.min + hover.position.to_vec2() + vec2(TOOLTIP_OFFSET, TOOLTIP_OFFSET);
        egui::Area::new(egui::Id::new("board_tooltip"))
            .order(egui::Order::Tooltip)
            .fixed_pos(position)
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_max_width(TOOLTIP_WIDTH);
                    match &hover.target {
                        HitTarget::Node(id) => {
                            let Some(node) = graph.node(id) else {
                                return;
                            };
                            ui.label(
                                RichText::new(node.kind.label().to_uppercase())
                                    .small()
                                    .strong()
                                    .color(node.color),
                            );
                            ui.label(RichText::new(node.title.as_str()).strong());
                            if let Some(year) = node.details.year {
                                ui.label(RichText::new(year.to_string()).monospace().weak());
                            }
                            if !node.details.summary.is_empty() {
                                ui.label(RichText::new(node.details.summary.as_str()).small());
                            }
                        }
                        HitTarget::Link { source, target } => {
                            let Some(link) = graph.find_link(source, target) else {
                                return;
                            };
                            let title_of = |id: &str| {
                                graph
                                    .node(id)
                                    .map_or_else(|| id.to_owned(), |node| node.title.clone())
                            };
                            ui.label(
                                RichText::new(humanize(&link.relation).to_uppercase())
                                    .small()
                                    .strong()
                                    .color(link.color),
                            );
                            ui.label(format!(
                                "{}  <->  {}",
                                title_of(&link.source_id),
                                title_of(&link.target_id)
                            ));
                            if let Some(description) = &link.description {
                                ui.label(RichText::new(description.as_str()).small().italics());
                            }
                        }
                    }
                });
            });
    }
}
