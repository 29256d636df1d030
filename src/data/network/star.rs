//! # Forward and reverse stars
//!
//! The forward star of a node is the list of arcs leaving it, the reverse star the list of arcs
//! entering it.
use crate::data::network::{ArcId, Graph, NodeId};

/// Outgoing and incoming arcs per node.
///
/// Each arc appears exactly once in the forward star of its source and exactly once in the reverse
/// star of its destination. Within a star, arcs are in arena order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StarIndex {
    forward: Vec<Vec<ArcId>>,
    reverse: Vec<Vec<ArcId>>,
}

impl StarIndex {
    /// Derive the stars of all nodes in a single pass over the arcs.
    #[must_use]
    pub fn new(graph: &Graph) -> Self {
        let mut forward = vec![Vec::new(); graph.nr_nodes()];
        let mut reverse = vec![Vec::new(); graph.nr_nodes()];

        for (id, arc) in graph.arcs() {
            forward[arc.source.index()].push(id);
            reverse[arc.destination.index()].push(id);
        }

        Self { forward, reverse }
    }

    /// Arcs leaving `node`.
    #[must_use]
    pub fn forward(&self, node: NodeId) -> &[ArcId] {
        &self.forward[node.index()]
    }

    /// Arcs entering `node`.
    #[must_use]
    pub fn reverse(&self, node: NodeId) -> &[ArcId] {
        &self.reverse[node.index()]
    }

    /// Number of nodes covered by the index.
    #[must_use]
    pub fn nr_nodes(&self) -> usize {
        self.forward.len()
    }
}

#[cfg(test)]
mod test {
    use crate::data::network::{ArcRecord, Graph};

    #[test]
    fn every_arc_once_per_star_kind() {
        let records = vec![
            ArcRecord::new("s", "a", 1),
            ArcRecord::new("s", "b", 2),
            ArcRecord::new("a", "b", 2),
            ArcRecord::new("b", "a", 1),
            ArcRecord::new("a", "t", 3),
            ArcRecord::new("b", "t", 1),
            ArcRecord::new("t", "t", 5),
        ];
        let graph = Graph::from_records(&records);
        let stars = graph.star_index();

        let mut forward = graph.nodes().flat_map(|node| stars.forward(node).to_vec()).collect::<Vec<_>>();
        let mut reverse = graph.nodes().flat_map(|node| stars.reverse(node).to_vec()).collect::<Vec<_>>();
        forward.sort();
        reverse.sort();
        let all = graph.arcs().map(|(id, _)| id).collect::<Vec<_>>();
        assert_eq!(forward, all);
        assert_eq!(reverse, all);

        for node in graph.nodes() {
            assert!(stars.forward(node).iter().all(|&arc| graph.arc(arc).source == node));
            assert!(stars.reverse(node).iter().all(|&arc| graph.arc(arc).destination == node));
        }
    }

    #[test]
    fn isolated_node_has_empty_stars() {
        let mut graph = Graph::with_nodes(["a", "b", "lonely"]);
        graph.add_arc("a", "b", 1).unwrap();
        let stars = graph.star_index();

        let lonely = graph.node_id("lonely").unwrap();
        assert!(stars.forward(lonely).is_empty());
        assert!(stars.reverse(lonely).is_empty());
        assert_eq!(stars.nr_nodes(), 3);
    }
}
