use eframe::egui::{self, Align, Color32, Key, Layout, RichText, Ui};

use crate::config::DisplayMode;

use super::super::BoardView;

const SEARCH_LIMIT: usize = 8;

impl BoardView {
    pub(in crate::app) fn draw_hud(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.heading(RichText::new("Phenomenon Board").color(Color32::from_rgb(52, 211, 153)));
            ui.separator();

            let graph = self.board.graph();
            ui.label(format!("nodes: {}", graph.node_count()));
            ui.label(format!("links: {}", graph.link_count()));
            ui.separator();

            if ui
                .button("Add node")
                .on_hover_text("Create a topic node at the centre of the view.")
                .clicked()
            {
                self.add_node.open = true;
            }

            let mut mode = self.board.mode();
            for candidate in [DisplayMode::Research, DisplayMode::Show] {
                ui.selectable_value(&mut mode, candidate, candidate.label());
            }
            if mode != self.board.mode() {
                self.board.set_mode(mode);
            }
            ui.separator();

            self.draw_search(ui);

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui
                    .button("Reset graph")
                    .on_hover_text("Discard saved changes and restore the default graph.")
                    .clicked()
                {
                    self.reset_graph();
                }
                if ui.button("Reset view").clicked() {
                    self.board.reset_view();
                }
            });
        });
    }

    fn draw_search(&mut self, ui: &mut Ui) {
        let response = ui.add(
            egui::TextEdit::singleline(&mut self.search)
                .hint_text("Search titles")
                .desired_width(200.0),
        );
        if response.changed() {
            self.search_miss = false;
        }

        let submitted = response.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter));
        let matches = self.board.search(&self.search, SEARCH_LIMIT);
        if submitted && !self.search.trim().is_empty() {
            match matches.first() {
                Some(best) => {
                    self.board.focus(best);
                }
                None => self.search_miss = true,
            }
        }

        if self.search_miss {
            ui.label(RichText::new("no match").color(Color32::from_rgb(248, 113, 113)));
        } else if !self.search.trim().is_empty() {
            ui.label(format!("{} matches", matches.len()))
                .on_hover_text("Press Enter to focus the best match.");
        }
    }
}
