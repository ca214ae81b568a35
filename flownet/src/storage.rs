//! File persistence for graph documents.

use crate::error::DocumentError;
use crate::Graph;
use chrono::{DateTime, Local, TimeZone};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// `graph_2024_03_07-PM02_15.json` for 14:15 on 7 March 2024.
pub fn save_file_name<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("graph_{}.json", at.format("%Y_%m_%d-%p%I_%M"))
}

pub fn save_to_path(g: &Graph, path: &Path) -> Result<(), DocumentError> {
    fs::write(path, g.to_json_string())?;
    info!(path = %path.display(), nodes = g.node_count(), edges = g.edge_count(), "graph saved");
    Ok(())
}

/// Save name for the current local time.
pub fn current_save_name() -> String {
    save_file_name(&Local::now())
}

/// Writes into `dir` under a timestamped name and returns the full path.
pub fn save_to_dir(g: &Graph, dir: &Path) -> Result<PathBuf, DocumentError> {
    let path = dir.join(current_save_name());
    save_to_path(g, &path)?;
    Ok(path)
}

pub fn load_from_path(path: &Path) -> Result<Graph, DocumentError> {
    let text = fs::read_to_string(path)?;
    let g = Graph::from_json_str(&text)?;
    info!(path = %path.display(), nodes = g.node_count(), edges = g.edge_count(), "graph loaded");
    Ok(g)
}
