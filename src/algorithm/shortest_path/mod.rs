//! # Shortest paths as linear programs
//!
//! Two formulations of the single pair shortest path problem. The primal one assigns a distance
//! potential to every node and maximizes the potential difference between destination and origin;
//! the dual one sends one unit of flow from origin to destination at minimum cost. By strong
//! duality, both have the same optimal objective value.
use crate::algorithm::SolveError;
use crate::data::linear_program::model::Model;
use crate::data::linear_program::solution::Solution;
use crate::data::network::{ArcId, Graph, NodeId};

pub use dual::{Construction, DualShortestPathSolver};
pub use primal::PrimalShortestPathSolver;

mod dual;
mod primal;

/// A formulation of the shortest path problem together with a solver for it.
pub trait ShortestPathSolver {
    /// Short name of the formulation, used in output.
    fn formulation(&self) -> &'static str;

    /// Build the linear program for an origin-destination pair without solving it.
    fn model(&self, graph: &Graph, origin: NodeId, destination: NodeId) -> Model;

    /// Solve a model built by `model` with the underlying solver.
    ///
    /// # Errors
    ///
    /// If the solver fails.
    fn solve(&self, model: &Model) -> Result<Solution, SolveError>;

    /// Read distance, path and labels from an optimal solution of the model.
    fn interpret(
        &self,
        graph: &Graph,
        origin: NodeId,
        destination: NodeId,
        solution: &Solution,
    ) -> ShortestPath;

    /// Solve the shortest path problem from `origin` to `destination`.
    ///
    /// # Errors
    ///
    /// If the solver fails. When the destination can't be reached from the origin, the primal
    /// formulation is unbounded and the dual formulation is infeasible.
    fn shortest_path(
        &self,
        graph: &Graph,
        origin: NodeId,
        destination: NodeId,
    ) -> Result<ShortestPath, SolveError> {
        let model = self.model(graph, origin, destination);
        let solution = self.solve(&model)?;
        Ok(self.interpret(graph, origin, destination, &solution))
    }
}

/// Interpreted solution of either formulation.
#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPath {
    origin: NodeId,
    destination: NodeId,
    distance: f64,
    /// Sorted by index.
    on_path: Vec<ArcId>,
    /// Distance label of every node, relative to the origin.
    labels: Vec<f64>,
}

impl ShortestPath {
    pub(crate) fn new(
        origin: NodeId,
        destination: NodeId,
        distance: f64,
        on_path: Vec<ArcId>,
        labels: Vec<f64>,
    ) -> Self {
        debug_assert!(on_path.is_sorted());
        debug_assert_eq!(labels.get(origin.index()).copied(), Some(0_f64));

        Self { origin, destination, distance, on_path, labels }
    }

    /// Start of the path.
    #[must_use]
    pub fn origin(&self) -> NodeId {
        self.origin
    }

    /// End of the path.
    #[must_use]
    pub fn destination(&self) -> NodeId {
        self.destination
    }

    /// Optimal objective value, the length of a shortest path.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Arcs that the solver put on the path, in index order.
    #[must_use]
    pub fn arcs(&self) -> &[ArcId] {
        &self.on_path
    }

    /// Whether the solver put `arc` on the path.
    #[must_use]
    pub fn is_on_path(&self, arc: ArcId) -> bool {
        self.on_path.binary_search(&arc).is_ok()
    }

    /// Distance label of a node, relative to the origin.
    ///
    /// These are the potentials of the optimal vertex the solver found. In the node potential
    /// formulation, the label of the destination is the distance. In the arc flow formulation,
    /// arcs at their upper bound of one may absorb part of the potential difference.
    #[must_use]
    pub fn label(&self, node: NodeId) -> f64 {
        self.labels[node.index()]
    }

    /// Distance labels of all nodes, indexed by node.
    #[must_use]
    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    /// Order the marked arcs into a walk from the origin to the destination.
    ///
    /// At each node, the marked outgoing arc with the lowest index that hasn't been used yet is
    /// followed.
    ///
    /// # Return value
    ///
    /// The arcs of the walk, or `None` if the marked arcs don't connect origin and destination.
    #[must_use]
    pub fn path(&self, graph: &Graph) -> Option<Vec<ArcId>> {
        let mut used = vec![false; self.on_path.len()];
        let mut path = Vec::new();
        let mut current = self.origin;

        while current != self.destination {
            let (position, &arc) = self.on_path.iter().enumerate()
                .find(|&(i, &arc)| !used[i] && graph.arc(arc).source == current)?;
            used[position] = true;
            path.push(arc);
            current = graph.arc(arc).destination;
        }

        Some(path)
    }
}

/// Total length of a sequence of arcs.
#[must_use]
pub fn path_length(graph: &Graph, path: &[ArcId]) -> u64 {
    path.iter().map(|&arc| graph.arc(arc).length).sum()
}
