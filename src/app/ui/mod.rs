mod add_node;
mod details;
mod hud;
mod tooltip;
