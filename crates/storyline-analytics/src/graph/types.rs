//! Graph types: node kinds and the story graph store.

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use storyline_core::constants;
use storyline_core::types::FxHashMap;

/// What a story node represents in the game world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A physical location the player can move to.
    Locomotion,
    Trigger,
    Artifact,
    /// Gameplay logic with no spatial presence.
    Logic,
    Unspecified,
}

impl NodeKind {
    /// Parse a node-list `type` string. Unknown strings yield `None`.
    pub fn from_type_str(kind: &str) -> Option<Self> {
        match kind {
            constants::NODE_KIND_LOCOMOTION => Some(Self::Locomotion),
            constants::NODE_KIND_TRIGGER => Some(Self::Trigger),
            constants::NODE_KIND_ARTIFACT => Some(Self::Artifact),
            constants::NODE_KIND_LOGIC => Some(Self::Logic),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Locomotion => "locomotion",
            Self::Trigger => "trigger",
            Self::Artifact => "artifact",
            Self::Logic => "logic",
            Self::Unspecified => "unspecified",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The story graph: directed, unweighted, parallel edges allowed.
///
/// Topology and node kinds are kept apart because they come from separate
/// files and fail independently: a bad edge list clears the topology, a bad
/// node list clears the kinds.
#[derive(Debug, Clone, Default)]
pub struct StoryGraph {
    pub(crate) graph: StableDiGraph<String, ()>,
    pub(crate) node_index: FxHashMap<String, NodeIndex>,
    pub(crate) kinds: FxHashMap<String, NodeKind>,
}

impl StoryGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes present in the topology.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Total directed edges, parallel edges counted separately.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.node_index.contains_key(name)
    }

    /// Add a directed edge `left -> right`, creating either endpoint if new.
    /// No back edge is added.
    pub fn add_edge(&mut self, left: &str, right: &str) {
        let from = self.ensure_node(left);
        let to = self.ensure_node(right);
        self.graph.add_edge(from, to, ());
    }

    /// Record a node's kind from its node-list `type` string.
    ///
    /// Returns `false` and records nothing when the string is not one of
    /// `locomotion`, `trigger`, `artifact` or `logic`.
    pub fn add_node(&mut self, name: &str, kind: &str) -> bool {
        match NodeKind::from_type_str(kind) {
            Some(k) => {
                self.kinds.insert(name.to_string(), k);
                true
            }
            None => {
                tracing::warn!(node = name, kind, "unrecognized node kind, skipping");
                false
            }
        }
    }

    /// Kind recorded for `name`, if a node list named it.
    pub fn recorded_kind(&self, name: &str) -> Option<NodeKind> {
        self.kinds.get(name).copied()
    }

    /// Kind of `name`, `Unspecified` when none was recorded.
    pub fn kind_of(&self, name: &str) -> NodeKind {
        self.recorded_kind(name).unwrap_or(NodeKind::Unspecified)
    }

    /// Number of nodes with a recorded kind.
    pub fn kind_count(&self) -> usize {
        self.kinds.len()
    }

    /// Outgoing neighbors of `name` in the order their edges were added.
    /// Unknown names have no neighbors.
    pub fn neighbors<'a>(&'a self, name: &str) -> Vec<&'a str> {
        let Some(&idx) = self.node_index.get(name) else {
            return Vec::new();
        };
        // StableGraph walks a node's edge list newest-first.
        let mut out: Vec<&str> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .filter_map(|n| self.graph.node_weight(n).map(String::as_str))
            .collect();
        out.reverse();
        out
    }

    /// Out-degree of `name`, counting parallel edges.
    pub fn out_degree(&self, name: &str) -> usize {
        self.node_index
            .get(name)
            .map(|&idx| self.graph.edges_directed(idx, Direction::Outgoing).count())
            .unwrap_or(0)
    }

    /// All node names in the topology.
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.node_index.keys().map(String::as_str)
    }

    /// Drop all edges and topology nodes. Recorded kinds are kept.
    pub fn clear_edges(&mut self) {
        self.graph.clear();
        self.node_index.clear();
    }

    /// Drop all recorded node kinds.
    pub fn clear_kinds(&mut self) {
        self.kinds.clear();
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.clear_edges();
        self.clear_kinds();
    }

    fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.node_index.insert(name.to_string(), idx);
        idx
    }
}
