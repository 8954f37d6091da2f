use eframe::egui::{Pos2, Vec2};

use crate::config::CameraConfig;

/// World to screen mapping: `screen = world * scale + translate`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub scale: f32,
    pub translate: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate: Vec2::ZERO,
        }
    }
}

impl Camera {
    /// Puts the world origin in the middle of a canvas of `viewport` pixels.
    pub fn centered_in(viewport: Vec2) -> Self {
        Self {
            scale: 1.0,
            translate: viewport * 0.5,
        }
    }

    pub fn world_to_screen(&self, world: Vec2) -> Pos2 {
        (world * self.scale + self.translate).to_pos2()
    }

    pub fn screen_to_world(&self, screen: Pos2) -> Vec2 {
        (screen.to_vec2() - self.translate) / self.scale
    }

    /// Applies a wheel delta while keeping the world point under `pointer` fixed on screen.
    pub fn zoom_at(&mut self, pointer: Pos2, delta: f32, config: &CameraConfig) {
        if !pointer.is_finite() || !delta.is_finite() {
            return;
        }

        let (min_zoom, max_zoom) = config.zoom_range();
        let world_before = self.screen_to_world(pointer);
        let next_scale = (self.scale - delta * config.wheel_sensitivity).clamp(min_zoom, max_zoom);
        self.scale = next_scale;
        self.translate = pointer.to_vec2() - world_before * next_scale;
    }

    /// Screen-space pan; the delta is not divided by the scale.
    pub fn pan_by(&mut self, delta: Vec2) {
        if delta.is_finite() {
            self.translate += delta;
        }
    }

    pub fn center_on(&mut self, world: Vec2, viewport: Vec2) {
        self.translate = viewport * 0.5 - world * self.scale;
    }
}
