mod app;
mod board;
mod camera;
mod config;
mod graph;
mod hit_test;
mod interaction;
mod persist;
mod physics;
mod render;
mod util;

use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;

use crate::config::DisplayMode;
use crate::persist::GraphStore;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Graph snapshot (JSON) to load and keep in sync with edits.
    #[arg(long)]
    graph: Option<PathBuf>,
    /// Board configuration (TOML). Defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Display mode to start in.
    #[arg(long, value_enum)]
    mode: Option<DisplayMode>,
    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    write_config: bool,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = config::load_or_default(args.config.as_deref());
    if let Some(mode) = args.mode {
        config.default_mode = mode;
    }

    if args.write_config {
        let path = args
            .config
            .clone()
            .or_else(config::config_file_path)
            .ok_or_else(|| anyhow!("no configuration directory available on this platform"))?;
        config::save_to_path(&config, &path)?;
        tracing::info!(path = %path.display(), "wrote board config");
        return Ok(());
    }

    let data_file = args
        .graph
        .clone()
        .or_else(|| config.data_file.clone())
        .or_else(config::default_data_file)
        .unwrap_or_else(|| PathBuf::from("graph.json"));
    tracing::info!(path = %data_file.display(), mode = ?config.default_mode, "starting board");
    let store = GraphStore::new(data_file);

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Phenomenon Board",
        options,
        Box::new(move |cc| Ok(Box::new(app::BoardApp::new(cc, config, store)))),
    )
    .map_err(|error| anyhow!("failed to run the board window: {error}"))
}
