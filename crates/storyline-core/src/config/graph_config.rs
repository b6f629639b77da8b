//! Input file locations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the edge list, node list and curator labels are read from.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GraphConfig {
    pub edges_path: Option<PathBuf>,
    pub nodes_path: Option<PathBuf>,
    pub curators_path: Option<PathBuf>,
}
