//! Edge-list and node-list loading.
//!
//! Both formats are validated in full before the store is touched. A
//! malformed entry anywhere aborts the load and clears what that file
//! populates, so callers never observe a half-loaded graph.

use std::path::Path;

use serde_json::Value;
use storyline_core::config::GraphConfig;
use storyline_core::errors::GraphLoadError;
use storyline_core::tracing::metrics;

use super::types::StoryGraph;

impl StoryGraph {
    /// Build a graph from the edge and node files named in `config`.
    /// Either path may be absent.
    pub fn from_config(config: &GraphConfig) -> Result<Self, GraphLoadError> {
        let mut graph = Self::new();
        if let Some(path) = &config.edges_path {
            graph.load_edges_file(path)?;
        }
        if let Some(path) = &config.nodes_path {
            graph.load_nodes_file(path)?;
        }
        Ok(graph)
    }

    /// Load an edge list: `{ "edges": [ { "links": ["A", "B"] }, ... ] }`.
    ///
    /// Edges are appended to the existing topology. On error the whole
    /// topology is cleared. Returns the number of edges added.
    pub fn load_edges_str(&mut self, json: &str) -> Result<usize, GraphLoadError> {
        match parse_edges(json) {
            Ok(edges) => {
                for (from, to) in &edges {
                    self.add_edge(from, to);
                }
                tracing::info!(
                    { metrics::EDGES_LOADED } = edges.len(),
                    total_edges = self.edge_count(),
                    "edge list loaded"
                );
                Ok(edges.len())
            }
            Err(e) => {
                self.clear_edges();
                tracing::warn!(error = %e, "edge list rejected, graph cleared");
                Err(e)
            }
        }
    }

    /// Read and load an edge-list file.
    pub fn load_edges_file(&mut self, path: &Path) -> Result<usize, GraphLoadError> {
        match read_file(path) {
            Ok(json) => self.load_edges_str(&json),
            Err(e) => {
                self.clear_edges();
                Err(e)
            }
        }
    }

    /// Load a node list: `[ { "name": "A", "type": "locomotion" }, ... ]`.
    ///
    /// Entries with an unrecognized `type` are skipped without failing the
    /// load. Structural errors clear every recorded kind. Returns the number
    /// of kinds recorded.
    pub fn load_nodes_str(&mut self, json: &str) -> Result<usize, GraphLoadError> {
        match parse_nodes(json) {
            Ok(nodes) => {
                let recorded = nodes
                    .iter()
                    .filter(|(name, kind)| self.add_node(name, kind))
                    .count();
                tracing::info!(
                    { metrics::NODES_LOADED } = recorded,
                    skipped = nodes.len() - recorded,
                    "node list loaded"
                );
                Ok(recorded)
            }
            Err(e) => {
                self.clear_kinds();
                tracing::warn!(error = %e, "node list rejected, node kinds cleared");
                Err(e)
            }
        }
    }

    /// Read and load a node-list file.
    pub fn load_nodes_file(&mut self, path: &Path) -> Result<usize, GraphLoadError> {
        match read_file(path) {
            Ok(json) => self.load_nodes_str(&json),
            Err(e) => {
                self.clear_kinds();
                Err(e)
            }
        }
    }
}

fn read_file(path: &Path) -> Result<String, GraphLoadError> {
    std::fs::read_to_string(path).map_err(|e| GraphLoadError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn parse_edges(json: &str) -> Result<Vec<(String, String)>, GraphLoadError> {
    let root: Value = serde_json::from_str(json)?;
    let entries = root
        .get("edges")
        .and_then(Value::as_array)
        .ok_or(GraphLoadError::MissingEdges)?;

    let mut edges = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let malformed = |reason: &str| GraphLoadError::MalformedEdge {
            index,
            reason: reason.to_string(),
        };
        let object = entry
            .as_object()
            .ok_or_else(|| malformed("entry is not an object"))?;
        let links = object
            .get("links")
            .and_then(Value::as_array)
            .ok_or_else(|| malformed("missing `links` array"))?;
        if links.len() != 2 {
            return Err(malformed(&format!(
                "`links` must have exactly 2 elements, found {}",
                links.len()
            )));
        }
        match (links[0].as_str(), links[1].as_str()) {
            (Some(from), Some(to)) => edges.push((from.to_string(), to.to_string())),
            _ => return Err(malformed("`links` elements must be strings")),
        }
    }
    Ok(edges)
}

fn parse_nodes(json: &str) -> Result<Vec<(String, String)>, GraphLoadError> {
    let root: Value = serde_json::from_str(json)?;
    let entries = root.as_array().ok_or(GraphLoadError::NodeListNotArray)?;

    let mut nodes = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let malformed = |reason: &str| GraphLoadError::MalformedNode {
            index,
            reason: reason.to_string(),
        };
        let object = entry
            .as_object()
            .ok_or_else(|| malformed("entry is not an object"))?;
        let name = object
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed("missing string `name`"))?;
        let kind = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed("missing string `type`"))?;
        nodes.push((name.to_string(), kind.to_string()));
    }
    Ok(nodes)
}
