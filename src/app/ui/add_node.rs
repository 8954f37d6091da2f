use eframe::egui::{self, Align2, Context};

use crate::graph::NodeKind;

use super::super::BoardView;

/// Empty means no year; anything else must be a whole number.
fn parse_year(raw: &str) -> Result<Option<i32>, std::num::ParseIntError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some)
}

impl BoardView {
    pub(in crate::app) fn draw_add_node_window(&mut self, ctx: &Context) {
        if !self.add_node.open {
            return;
        }

        let mut open = true;
        let mut submitted = None;
        egui::Window::new("Create custom node")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Title");
                let title = ui.add(
                    egui::TextEdit::singleline(&mut self.add_node.title)
                        .hint_text("e.g. The Wilson Memo")
                        .desired_width(320.0),
                );

                ui.horizontal(|ui| {
                    ui.label("Type");
                    egui::ComboBox::from_id_salt("add_node_kind")
                        .selected_text(self.add_node.kind.label())
                        .show_ui(ui, |ui| {
                            for kind in NodeKind::CREATABLE {
                                ui.selectable_value(&mut self.add_node.kind, kind, kind.label());
                            }
                        });
                    ui.label("Year");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.add_node.year)
                            .hint_text("YYYY")
                            .desired_width(60.0),
                    );
                });

                ui.label("Summary");
                ui.add(
                    egui::TextEdit::multiline(&mut self.add_node.summary)
                        .hint_text("Brief description...")
                        .desired_rows(3)
                        .desired_width(320.0),
                );
                ui.add_space(6.0);

                let year = parse_year(&self.add_node.year);
                if year.is_err() {
                    ui.colored_label(
                        egui::Color32::from_rgb(248, 113, 113),
                        "Year must be a number",
                    );
                }
                let ready = !self.add_node.title.trim().is_empty() && year.is_ok();
                let enter = title.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));
                let clicked = ui
                    .add_enabled(ready, egui::Button::new("Add to graph"))
                    .clicked();
                if ready && (clicked || enter) {
                    submitted = year.ok();
                }
            });

        if let Some(year) = submitted {
            let form = &self.add_node;
            if self
                .board
                .add_custom_node(form.kind, &form.title, &form.summary, year)
                .is_some()
            {
                self.add_node = Default::default();
                return;
            }
        }
        self.add_node.open = open;
    }
}
