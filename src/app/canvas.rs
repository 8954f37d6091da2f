use eframe::egui::{self, Align2, FontId, Painter, Rect, Sense, Stroke, Ui, Vec2};

use crate::render::palette::fade;
use crate::render::{DrawCommand, LabelFont};

use super::BoardView;

/// Extra radius and opacity of the halo rings painted behind glowing shapes.
const GLOW_LAYERS: [(f32, f32); 3] = [(9.0, 0.08), (6.0, 0.14), (3.0, 0.22)];

struct PointerFrame {
    position: Option<egui::Pos2>,
    pressed: bool,
    released: bool,
    shift: bool,
    scroll: f32,
}

impl BoardView {
    pub(in crate::app) fn draw_canvas(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        self.board.resize(rect.size());
        self.forward_pointer(ui, rect, &response);
        self.board.tick();

        let painter = ui.painter_at(rect);
        let offset = rect.min.to_vec2();
        for command in self.board.draw() {
            paint(&painter, offset, &command);
        }

        if self.board.hover().is_some() && !self.board.is_panning() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        } else if self.board.is_dragging() || self.board.is_panning() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        }

        self.draw_tooltip(ui.ctx(), rect);
        ui.ctx().request_repaint();
    }

    fn forward_pointer(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        let frame = ui.input(|input| PointerFrame {
            position: input.pointer.hover_pos(),
            pressed: input.pointer.primary_pressed(),
            released: input.pointer.primary_released(),
            shift: input.modifiers.shift,
            scroll: input.raw_scroll_delta.y,
        });

        let inside = response.contains_pointer();
        let local = frame.position.map(|position| (position - rect.min).to_pos2());

        if let Some(local) = local {
            if frame.pressed && inside {
                self.board.pointer_down(local, frame.shift);
            }
            if inside || self.board.is_dragging() || self.board.is_panning() {
                self.board.pointer_move(local);
            }
            if inside && frame.scroll.abs() > f32::EPSILON {
                // egui reports scrolling up as positive; the board expects wheel deltas.
                self.board.wheel(local, -frame.scroll);
            }
        }

        if frame.released {
            self.board.pointer_up();
        }
        if self.pointer_inside && !inside {
            self.board.pointer_leave();
        }
        self.pointer_inside = inside;
    }
}

fn font_for(font: LabelFont) -> FontId {
    match font {
        LabelFont::Heading => FontId::proportional(font.size()),
        LabelFont::Caption => FontId::monospace(font.size()),
    }
}

fn paint(painter: &Painter, offset: Vec2, command: &DrawCommand) {
    match command {
        DrawCommand::GridLine { from, to, stroke } => {
            painter.line_segment([*from + offset, *to + offset], *stroke);
        }
        DrawCommand::Link {
            from,
            to,
            stroke,
            glow,
        } => {
            let points = [*from + offset, *to + offset];
            if let Some(glow) = glow {
                for (extra, alpha) in GLOW_LAYERS {
                    painter.line_segment(points, Stroke::new(stroke.width + extra, fade(*glow, alpha)));
                }
            }
            painter.line_segment(points, *stroke);
        }
        DrawCommand::NodeBody {
            center,
            radius,
            fill,
            outline,
            glow,
        } => {
            let center = *center + offset;
            if let Some(glow) = glow {
                for (extra, alpha) in GLOW_LAYERS {
                    painter.circle_filled(center, radius + extra, fade(*glow, alpha));
                }
            }
            painter.circle_filled(center, *radius, *fill);
            if let Some(outline) = outline {
                painter.circle_stroke(center, *radius, *outline);
            }
        }
        DrawCommand::Ring {
            center,
            radius,
            stroke,
        } => {
            painter.circle_stroke(*center + offset, *radius, *stroke);
        }
        DrawCommand::Label {
            anchor,
            text,
            font,
            color,
        } => {
            painter.text(*anchor + offset, Align2::CENTER_TOP, text, font_for(*font), *color);
        }
    }
}
