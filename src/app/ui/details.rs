use eframe::egui::{self, RichText, Ui};

use crate::graph::NodeId;
use crate::util::humanize;

use super::super::BoardView;

struct ConnectionRow {
    id: NodeId,
    title: String,
    relation: String,
    description: Option<String>,
}

impl BoardView {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        let Some(node) = self.board.selected() else {
            ui.label("Select a node on the board.");
            return;
        };

        let mut pending_selection = None;
        let mut close = false;
        let rows: Vec<ConnectionRow> = self
            .board
            .connections(&node.id)
            .into_iter()
            .map(|neighbor| ConnectionRow {
                id: neighbor.node.id.clone(),
                title: neighbor.node.title.clone(),
                relation: humanize(&neighbor.link.relation),
                description: neighbor.link.description.clone(),
            })
            .collect();

        ui.horizontal(|ui| {
            ui.label(
                RichText::new(node.kind.label().to_uppercase())
                    .small()
                    .strong()
                    .color(node.color),
            );
            if let Some(year) = node.details.year {
                ui.label(RichText::new(year.to_string()).monospace());
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                close = ui.small_button("Close").clicked();
            });
        });
        ui.heading(node.title.as_str());
        ui.add_space(6.0);

        if !node.details.summary.is_empty() {
            ui.label(node.details.summary.as_str());
            ui.add_space(6.0);
        }

        if !node.details.tags.is_empty() {
            ui.horizontal_wrapped(|ui| {
                for tag in &node.details.tags {
                    ui.label(RichText::new(humanize(tag)).small().background_color(
                        egui::Color32::from_rgba_unmultiplied(51, 65, 85, 128),
                    ));
                }
            });
            ui.add_space(6.0);
        }

        if let Some(url) = &node.details.external_url {
            ui.hyperlink_to("External reference", url);
            ui.add_space(6.0);
        }

        ui.separator();
        ui.label(RichText::new(format!("Connections ({})", rows.len())).strong());
        if rows.is_empty() {
            ui.label("No connections yet. Shift-click another node to link it.");
        } else {
            egui::ScrollArea::vertical()
                .id_salt("connections_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for row in &rows {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(row.relation.to_uppercase()).small().weak());
                            if ui.link(row.title.as_str()).clicked() {
                                pending_selection = Some(row.id.clone());
                            }
                        });
                        if let Some(description) = &row.description {
                            ui.label(RichText::new(description.as_str()).small().italics());
                        }
                        ui.add_space(4.0);
                    }
                });
        }

        if close {
            self.board.select(None);
        } else if let Some(id) = pending_selection {
            self.board.select(Some(id.as_str()));
        }
    }
}
