use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::ValueEnum;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    Research,
    Show,
}

impl DisplayMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Research => "RESEARCH",
            Self::Show => "SHOW",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub repulsion: f32,
    pub repulsion_cutoff: f32,
    pub hub_repulsion_factor: f32,
    pub spring_strength: f32,
    pub rest_length: f32,
    pub centering: f32,
    pub damping: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            repulsion: 1500.0,
            repulsion_cutoff: 400.0,
            hub_repulsion_factor: 2.0,
            spring_strength: 0.08,
            rest_length: 140.0,
            centering: 0.002,
            damping: 0.85,
        }
    }
}

impl PhysicsConfig {
    pub fn damping_factor(&self) -> f32 {
        self.damping.clamp(0.8, 0.85)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub wheel_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.2,
            max_zoom: 5.0,
            wheel_sensitivity: 0.001,
        }
    }
}

impl CameraConfig {
    /// Zoom range with degenerate values replaced by the defaults.
    pub fn zoom_range(&self) -> (f32, f32) {
        let defaults = Self::default();
        let min = if self.min_zoom.is_finite() && self.min_zoom > 0.0 {
            self.min_zoom
        } else {
            defaults.min_zoom
        };
        let max = if self.max_zoom.is_finite() && self.max_zoom >= min {
            self.max_zoom
        } else {
            defaults.max_zoom.max(min)
        };
        (min, max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitTestConfig {
    /// World units added to a node radius when testing the pointer against it.
    pub node_padding: f32,
    /// Screen pixels; divided by the zoom before testing against links.
    pub link_tolerance: f32,
}

impl Default for HitTestConfig {
    fn default() -> Self {
        Self {
            node_padding: 5.0,
            link_tolerance: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeFlags {
    pub research: bool,
    pub show: bool,
}

impl ModeFlags {
    pub fn for_mode(self, mode: DisplayMode) -> bool {
        match mode {
            DisplayMode::Research => self.research,
            DisplayMode::Show => self.show,
        }
    }
}

impl Default for ModeFlags {
    fn default() -> Self {
        Self {
            research: true,
            show: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub clear_selection_on_empty_click: ModeFlags,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub default_mode: DisplayMode,
    pub data_file: Option<PathBuf>,
    pub physics: PhysicsConfig,
    pub camera: CameraConfig,
    pub hit_test: HitTestConfig,
    pub interaction: InteractionConfig,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "phenomenon-board")
}

pub fn config_file_path() -> Option<PathBuf> {
    Some(project_dirs()?.config_dir().join("board.toml"))
}

pub fn default_data_file() -> Option<PathBuf> {
    Some(project_dirs()?.data_dir().join("graph.json"))
}

pub fn load_or_default(explicit: Option<&Path>) -> BoardConfig {
    match explicit {
        Some(path) => load_or_default_from_path(path),
        None => match config_file_path() {
            Some(path) => load_or_default_from_path(&path),
            None => BoardConfig::default(),
        },
    }
}

pub fn load_or_default_from_path(path: &Path) -> BoardConfig {
    let Ok(contents) = fs::read_to_string(path) else {
        tracing::debug!(path = %path.display(), "no board config found, using defaults");
        return BoardConfig::default();
    };

    match toml::from_str(&contents) {
        Ok(config) => config,
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "invalid board config, using defaults");
            BoardConfig::default()
        }
    }
}

pub fn save_to_path(config: &BoardConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    let data = toml::to_string_pretty(config).context("failed to serialize board config")?;
    fs::write(path, data)
        .with_context(|| format!("failed to write board config {}", path.display()))?;
    Ok(())
}
