//! Breadth-first shortest path over the story graph.
//!
//! The search keeps an explicit frontier of records rather than a plain node
//! queue. Each record remembers the first hop it descends from, its hop
//! count, and the index of the record that discovered it, so the route can
//! be rebuilt by walking parent indices once `end` is dequeued.

use storyline_core::config::AnalyticsConfig;
use storyline_core::constants;
use storyline_core::tracing::metrics;
use storyline_core::types::FxHashSet;

use super::types::{NodeKind, StoryGraph};

/// A shortest route between two nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPath {
    /// Hop count from `start` to `end`, logic nodes included.
    pub length: u32,
    /// Nodes after `start` up to and including `end`, in traversal order,
    /// with logic nodes removed.
    pub nodes: Vec<String>,
    /// Direct neighbor of `start` the route leaves through.
    pub first_hop: String,
}

/// Decides which nodes are hidden from reconstructed routes.
///
/// A node with a recorded kind is hidden exactly when that kind is `Logic`.
/// Nodes the node list never typed fall back to a name-substring check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicFilter {
    marker: String,
}

impl LogicFilter {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn from_config(config: &AnalyticsConfig) -> Self {
        Self::new(config.effective_logic_marker())
    }

    pub fn is_logic(&self, graph: &StoryGraph, name: &str) -> bool {
        match graph.recorded_kind(name) {
            Some(kind) => kind == NodeKind::Logic,
            None => !self.marker.is_empty() && name.contains(self.marker.as_str()),
        }
    }
}

impl Default for LogicFilter {
    fn default() -> Self {
        Self::new(constants::LOGIC_MARKER)
    }
}

#[derive(Debug, Clone, Copy)]
struct FrontierRecord<'g> {
    origin: &'g str,
    length: u32,
    node: &'g str,
    parent: Option<usize>,
}

/// Run the search; on success returns the frontier and the index of the
/// record that reached `end`.
fn search<'g>(
    graph: &'g StoryGraph,
    start: &str,
    end: &str,
) -> Option<(Vec<FrontierRecord<'g>>, usize)> {
    let mut frontier: Vec<FrontierRecord<'g>> = Vec::new();
    let mut visited: FxHashSet<&'g str> = FxHashSet::default();

    for neighbor in graph.neighbors(start) {
        if visited.insert(neighbor) {
            frontier.push(FrontierRecord {
                origin: neighbor,
                length: 1,
                node: neighbor,
                parent: None,
            });
        }
    }

    let mut cursor = 0;
    while cursor < frontier.len() {
        let record = frontier[cursor];
        if record.node == end {
            tracing::trace!(
                { metrics::FRONTIER_EXPANDED } = cursor + 1,
                { metrics::PATH_LENGTH } = record.length,
                start,
                end,
                "shortest path found"
            );
            return Some((frontier, cursor));
        }
        for neighbor in graph.neighbors(record.node) {
            if visited.insert(neighbor) {
                frontier.push(FrontierRecord {
                    origin: record.origin,
                    length: record.length + 1,
                    node: neighbor,
                    parent: Some(cursor),
                });
            }
        }
        cursor += 1;
    }

    tracing::trace!(
        { metrics::FRONTIER_EXPANDED } = frontier.len(),
        start,
        end,
        "no path"
    );
    None
}

/// Hop count of the shortest directed path from `start` to `end`.
///
/// `None` when `end` is unreachable. There is no zero-length case: with
/// `start == end` the result is the shortest cycle back to `start`, if any.
/// Unknown names behave as nodes without outgoing edges.
pub fn shortest_path(graph: &StoryGraph, start: &str, end: &str) -> Option<u32> {
    search(graph, start, end).map(|(frontier, hit)| frontier[hit].length)
}

/// Shortest path plus the route taken, logic nodes filtered out of the route.
pub fn shortest_route(
    graph: &StoryGraph,
    start: &str,
    end: &str,
    filter: &LogicFilter,
) -> Option<ShortestPath> {
    let (frontier, hit) = search(graph, start, end)?;

    let mut nodes = Vec::new();
    let mut cursor = Some(hit);
    while let Some(idx) = cursor {
        let record = &frontier[idx];
        if !filter.is_logic(graph, record.node) {
            nodes.push(record.node.to_string());
        }
        cursor = record.parent;
    }
    nodes.reverse();

    Some(ShortestPath {
        length: frontier[hit].length,
        nodes,
        first_hop: frontier[hit].origin.to_string(),
    })
}

impl StoryGraph {
    /// See [`shortest_path`].
    pub fn shortest_path(&self, start: &str, end: &str) -> Option<u32> {
        shortest_path(self, start, end)
    }

    /// See [`shortest_route`].
    pub fn shortest_route(
        &self,
        start: &str,
        end: &str,
        filter: &LogicFilter,
    ) -> Option<ShortestPath> {
        shortest_route(self, start, end, filter)
    }
}
