use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::board::GraphObserver;
use crate::graph::{GraphModel, default_graph, parse_snapshot, render_snapshot};

/// JSON snapshot file backing one board.
#[derive(Clone, Debug)]
pub struct GraphStore {
    path: PathBuf,
}

impl GraphStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling path holding the last snapshot that could not be loaded.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }

    /// Copies the current file aside so a later save cannot destroy it.
    fn back_up(&self) -> Result<PathBuf> {
        let backup = self.backup_path();
        fs::copy(&self.path, &backup).with_context(|| {
            format!("failed to copy {} to {}", self.path.display(), backup.display())
        })?;
        Ok(backup)
    }

    /// Reads the snapshot; `Ok(None)` when no file has been written yet.
    pub fn read(&self) -> Result<Option<GraphModel>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to read {}", self.path.display()));
            }
        };

        parse_snapshot(&raw)
            .with_context(|| format!("failed to parse {}", self.path.display()))
            .map(Some)
    }

    /// The saved graph, or the built-in default when it is absent or unusable.
    pub fn load_or_default(&self) -> GraphModel {
        match self.read() {
            Ok(Some(graph)) => {
                tracing::info!(
                    path = %self.path.display(),
                    nodes = graph.node_count(),
                    links = graph.link_count(),
                    "loaded graph"
                );
                graph
            }
            Ok(None) => {
                tracing::info!(path = %self.path.display(), "no saved graph, using default");
                default_graph()
            }
            Err(error) => {
                tracing::warn!(error = %format!("{error:#}"), "unusable saved graph, using default");
                match self.back_up() {
                    Ok(backup) => {
                        tracing::warn!(backup = %backup.display(), "kept unusable graph aside");
                    }
                    Err(error) => {
                        tracing::error!(
                            error = %format!("{error:#}"),
                            "failed to back up unusable graph"
                        );
                    }
                }
                default_graph()
            }
        }
    }

    pub fn save(&self, graph: &GraphModel) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let data = render_snapshot(graph)?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), nodes = graph.node_count(), "saved graph");
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => {
                Err(error).with_context(|| format!("failed to remove {}", self.path.display()))
            }
        }
    }
}

/// Keeps the snapshot file in step with the board.
pub struct FileSync {
    store: GraphStore,
}

impl FileSync {
    pub fn new(store: GraphStore) -> Self {
        Self { store }
    }
}

impl GraphObserver for FileSync {
    fn graph_changed(&mut self, graph: &GraphModel) {
        if let Err(error) = self.store.save(graph) {
            tracing::error!(error = %format!("{error:#}"), "failed to save graph");
        }
    }

    fn graph_reset(&mut self, _graph: &GraphModel) {
        if let Err(error) = self.store.clear() {
            tracing::error!(error = %format!("{error:#}"), "failed to clear saved graph");
        }
    }
}
