use eframe::egui::Color32;

pub const BACKGROUND: Color32 = Color32::from_rgb(2, 6, 23);
pub const GRID: Color32 = Color32::from_rgb(30, 41, 59);
pub const EVENT_FILL: Color32 = Color32::from_rgb(15, 23, 42);
pub const LABEL: Color32 = Color32::from_rgb(203, 213, 225);
pub const SELECTED_RING: Color32 = Color32::WHITE;
pub const HOVER_RING: Color32 = Color32::from_rgba_premultiplied(204, 204, 160, 204);

/// Opacity of links that do not touch the selected node.
pub const DIMMED_LINK_ALPHA: f32 = 0.1;
/// Opacity of nodes outside the selected neighbourhood.
pub const DIMMED_NODE_ALPHA: f32 = 0.2;

pub fn fade(color: Color32, alpha: f32) -> Color32 {
    color.gamma_multiply(alpha.clamp(0.0, 1.0))
}

pub fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}
