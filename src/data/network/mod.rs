//! # Networks
//!
//! Directed graphs with labelled nodes and arcs of non-negative integer length. Nodes and arcs are
//! stored in arenas and addressed by dense indices, so that per-node and per-arc data elsewhere in
//! the crate (solver variables, constraints, flags) can be kept in plain vectors.
use std::fmt::{Display, Formatter, Result as FormatResult};

use rustc_hash::FxHashMap;

use crate::error::BuildError;

pub use star::StarIndex;

mod star;

/// Index of a node in a `Graph`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the node arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Index of an arc in a `Graph`.
///
/// Arcs are identified by this index only. Two arcs with the same endpoints and length are still
/// different arcs.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ArcId(usize);

impl ArcId {
    /// Position of the arc in the arc arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A directed arc.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Arc {
    /// Node the arc leaves.
    pub source: NodeId,
    /// Node the arc enters.
    pub destination: NodeId,
    /// Length, or cost of traversal.
    pub length: u64,
}

/// An arc as it is described in an input file: by node labels rather than indices.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArcRecord {
    /// Label of the node the arc leaves.
    pub source: String,
    /// Label of the node the arc enters.
    pub destination: String,
    /// Length of the arc.
    pub length: u64,
}

impl ArcRecord {
    /// Create a new record.
    pub fn new(source: impl Into<String>, destination: impl Into<String>, length: u64) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            length,
        }
    }
}

/// A directed graph.
///
/// Every arc's endpoints are members of the node set; `add_arc` refuses arcs that name unknown
/// nodes.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    labels: Vec<String>,
    index: FxHashMap<String, NodeId>,
    arcs: Vec<Arc>,
}

impl Graph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with a fixed node set and no arcs.
    ///
    /// Duplicate labels are collapsed.
    pub fn with_nodes<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut graph = Self::new();
        for label in labels {
            graph.add_node(label);
        }
        graph
    }

    /// Build a graph from arc records, taking the node set to be all endpoints of the records.
    ///
    /// Nodes are numbered in order of first appearance, arcs in record order.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ArcRecord>,
    {
        let mut graph = Self::new();
        for record in records {
            let source = graph.add_node(record.source.as_str());
            let destination = graph.add_node(record.destination.as_str());
            graph.push_arc(source, destination, record.length);
        }
        graph
    }

    /// Add a node, or look up the existing node with this label.
    pub fn add_node(&mut self, label: impl Into<String>) -> NodeId {
        let label = label.into();
        if let Some(&id) = self.index.get(&label) {
            return id;
        }

        let id = NodeId(self.labels.len());
        self.index.insert(label.clone(), id);
        self.labels.push(label);
        id
    }

    /// Add an arc between two existing nodes.
    ///
    /// # Errors
    ///
    /// `BuildError::UnknownNode` if either endpoint is not in the node set.
    pub fn add_arc(&mut self, source: &str, destination: &str, length: u64) -> Result<ArcId, BuildError> {
        let source = self.require_node(source)?;
        let destination = self.require_node(destination)?;

        Ok(self.push_arc(source, destination, length))
    }

    fn push_arc(&mut self, source: NodeId, destination: NodeId, length: u64) -> ArcId {
        let id = ArcId(self.arcs.len());
        self.arcs.push(Arc { source, destination, length });
        id
    }

    /// Find a node by its label.
    #[must_use]
    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        self.index.get(label).copied()
    }

    /// Find a node by its label, failing if it isn't there.
    ///
    /// # Errors
    ///
    /// `BuildError::UnknownNode` if no node carries this label.
    pub fn require_node(&self, label: &str) -> Result<NodeId, BuildError> {
        self.node_id(label).ok_or_else(|| BuildError::UnknownNode { label: label.to_string() })
    }

    /// Label of a node.
    #[must_use]
    pub fn label(&self, node: NodeId) -> &str {
        &self.labels[node.0]
    }

    /// An arc by index.
    #[must_use]
    pub fn arc(&self, arc: ArcId) -> &Arc {
        &self.arcs[arc.0]
    }

    /// All node indices, in arena order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        (0..self.labels.len()).map(NodeId)
    }

    /// All arcs with their indices, in arena order.
    pub fn arcs(&self) -> impl ExactSizeIterator<Item = (ArcId, &Arc)> + '_ {
        self.arcs.iter().enumerate().map(|(i, arc)| (ArcId(i), arc))
    }

    /// Number of nodes.
    #[must_use]
    pub fn nr_nodes(&self) -> usize {
        self.labels.len()
    }

    /// Number of arcs, parallel arcs counted separately.
    #[must_use]
    pub fn nr_arcs(&self) -> usize {
        self.arcs.len()
    }

    /// Forward and reverse stars of all nodes.
    #[must_use]
    pub fn star_index(&self) -> StarIndex {
        StarIndex::new(self)
    }

    /// Human readable `source -> destination` description of an arc.
    #[must_use]
    pub fn describe_arc(&self, arc: ArcId) -> String {
        let arc = self.arc(arc);
        format!("{} -> {}", self.label(arc.source), self.label(arc.destination))
    }
}

impl Display for Graph {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        writeln!(f, "Network")?;
        writeln!(f, "Nodes: {}\tArcs: {}", self.nr_nodes(), self.nr_arcs())?;
        for (id, arc) in self.arcs() {
            writeln!(f, "{:>5}  {}\t{}", id.index(), self.describe_arc(id), arc.length)?;
        }

        Ok(())
    }
}
