//! # Node potential formulation
//!
//! Maximize `pi(D) - pi(O)` subject to `pi(v) - pi(u) <= l(u, v)` for every arc and
//! `pi >= 0`. The potentials are distance labels; an arc whose constraint has a positive dual value
//! is on a shortest path.
use tracing::debug;

use crate::algorithm::{Solver, SolveError};
use crate::algorithm::shortest_path::{ShortestPath, ShortestPathSolver};
use crate::config::ShortestPathConfig;
use crate::data::linear_program::elements::{ConstraintRelation, Objective};
use crate::data::linear_program::model::Model;
use crate::data::linear_program::solution::Solution;
use crate::data::network::{Graph, NodeId};

/// Shortest paths through the node potential linear program.
#[derive(Clone, Debug, Default)]
pub struct PrimalShortestPathSolver<S> {
    solver: S,
    config: ShortestPathConfig,
}

impl<S: Solver> PrimalShortestPathSolver<S> {
    /// Create a new instance.
    pub fn new(solver: S, config: ShortestPathConfig) -> Self {
        Self { solver, config }
    }
}

impl<S: Solver> ShortestPathSolver for PrimalShortestPathSolver<S> {
    fn formulation(&self) -> &'static str {
        "primal"
    }

    /// One variable per node, in node order, and one constraint per arc, in arc order.
    fn model(&self, graph: &Graph, origin: NodeId, destination: NodeId) -> Model {
        let mut model = Model::new("shortest_path_primal");
        model.set_objective(Objective::Maximize);

        let potentials = graph.nodes()
            .map(|node| {
                let mut cost = 0_f64;
                if node == destination {
                    cost += 1_f64;
                }
                if node == origin {
                    cost -= 1_f64;
                }
                model.add_variable(format!("distance.{}", graph.label(node)), 0_f64, f64::INFINITY, cost)
            })
            .collect::<Vec<_>>();

        for (_, arc) in graph.arcs() {
            let name = format!(
                "distance_con.{}.{}",
                graph.label(arc.source),
                graph.label(arc.destination),
            );
            let expression = potentials[arc.destination.index()] - potentials[arc.source.index()];
            model.add_constraint(name, expression, ConstraintRelation::Less, arc.length as f64);
        }

        debug!(
            nr_variables = model.nr_variables(),
            nr_constraints = model.nr_constraints(),
            "built node potential model",
        );
        model
    }

    fn solve(&self, model: &Model) -> Result<Solution, SolveError> {
        self.solver.solve(model)
    }

    fn interpret(
        &self,
        graph: &Graph,
        origin: NodeId,
        destination: NodeId,
        solution: &Solution,
    ) -> ShortestPath {
        let on_path = graph.arcs()
            .filter(|&(id, _)| solution.duals()[id.index()] > self.config.on_path_threshold)
            .map(|(id, _)| id)
            .collect();
        let values = solution.values();
        let labels = values.iter().map(|value| value - values[origin.index()]).collect();

        ShortestPath::new(origin, destination, solution.objective_value(), on_path, labels)
    }
}
