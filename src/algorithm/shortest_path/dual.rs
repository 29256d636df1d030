//! # Arc flow formulation
//!
//! Minimize `sum l(a) f(a)` subject to flow conservation with a supply of one at the origin and a
//! demand of one at the destination, and `0 <= f <= 1`. Arcs carrying flow form a shortest path.
use tracing::debug;

use crate::algorithm::{Solver, SolveError};
use crate::algorithm::shortest_path::{ShortestPath, ShortestPathSolver};
use crate::config::ShortestPathConfig;
use crate::data::linear_program::elements::ConstraintRelation;
use crate::data::linear_program::expression::{Column, LinearExpression};
use crate::data::linear_program::model::Model;
use crate::data::linear_program::solution::Solution;
use crate::data::network::{Arc, Graph, NodeId};

/// How the flow balance constraints get their coefficients.
///
/// Both ways produce the same model, up to the order in which terms are stored.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Construction {
    /// Create the arc variables, then build each node's balance row from its forward and reverse
    /// stars.
    Expression,
    /// Create empty balance rows, then inject each arc variable into the rows of its endpoints
    /// through a column.
    #[default]
    Column,
}

/// Shortest paths through the arc flow linear program.
#[derive(Clone, Debug, Default)]
pub struct DualShortestPathSolver<S> {
    solver: S,
    config: ShortestPathConfig,
    construction: Construction,
}

impl<S: Solver> DualShortestPathSolver<S> {
    /// Create a new instance.
    pub fn new(solver: S, config: ShortestPathConfig, construction: Construction) -> Self {
        Self { solver, config, construction }
    }

    /// How models are built.
    #[must_use]
    pub fn construction(&self) -> Construction {
        self.construction
    }

    fn expression_model(graph: &Graph, origin: NodeId, destination: NodeId) -> Model {
        let mut model = Model::new("shortest_path_dual");

        let flows = graph.arcs()
            .map(|(_, arc)| model.add_variable(arc_name(graph, arc), 0_f64, 1_f64, arc.length as f64))
            .collect::<Vec<_>>();

        let stars = graph.star_index();
        for node in graph.nodes() {
            let mut expression = LinearExpression::new();
            for &arc in stars.forward(node) {
                expression -= flows[arc.index()];
            }
            for &arc in stars.reverse(node) {
                expression += flows[arc.index()];
            }
            model.add_constraint(
                format!("flow_balance.{}", graph.label(node)),
                expression,
                ConstraintRelation::Equal,
                balance(node, origin, destination),
            );
        }

        model
    }

    fn column_model(graph: &Graph, origin: NodeId, destination: NodeId) -> Model {
        let mut model = Model::new("shortest_path_dual");

        let rows = graph.nodes()
            .map(|node| model.add_constraint(
                format!("flow_balance.{}", graph.label(node)),
                LinearExpression::new(),
                ConstraintRelation::Equal,
                0_f64,
            ))
            .collect::<Vec<_>>();
        for node in [origin, destination] {
            model.set_rhs(rows[node.index()], balance(node, origin, destination));
        }

        for (_, arc) in graph.arcs() {
            let mut column = Column::new();
            column.add_term(1_f64, rows[arc.destination.index()]);
            column.add_term(-1_f64, rows[arc.source.index()]);
            model.add_variable_with_column(arc_name(graph, arc), 0_f64, 1_f64, arc.length as f64, &column);
        }

        model
    }
}

impl<S: Solver> ShortestPathSolver for DualShortestPathSolver<S> {
    fn formulation(&self) -> &'static str {
        "dual"
    }

    /// One variable per arc, in arc order, and one constraint per node, in node order.
    fn model(&self, graph: &Graph, origin: NodeId, destination: NodeId) -> Model {
        let model = match self.construction {
            Construction::Expression => Self::expression_model(graph, origin, destination),
            Construction::Column => Self::column_model(graph, origin, destination),
        };

        debug!(
            construction = ?self.construction,
            nr_variables = model.nr_variables(),
            nr_constraints = model.nr_constraints(),
            "built arc flow model",
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
            .filter(|&(id, _)| solution.values()[id.index()] > self.config.on_path_threshold)
            .map(|(id, _)| id)
            .collect();
        let duals = solution.duals();
        let labels = duals.iter().map(|dual| dual - duals[origin.index()]).collect();

        ShortestPath::new(origin, destination, solution.objective_value(), on_path, labels)
    }
}

fn arc_name(graph: &Graph, arc: &Arc) -> String {
    format!("arc_traversed.{}.{}", graph.label(arc.source), graph.label(arc.destination))
}

/// Net inflow required at a node: one unit leaves the origin and one unit arrives at the
/// destination.
fn balance(node: NodeId, origin: NodeId, destination: NodeId) -> f64 {
    let mut balance = 0_f64;
    if node == destination {
        balance += 1_f64;
    }
    if node == origin {
        balance -= 1_f64;
    }
    balance
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use crate::algorithm::SolveError;
    use crate::algorithm::shortest_path::{Construction, DualShortestPathSolver, ShortestPathSolver};
    use crate::algorithm::shortest_path::test::graph;
    use crate::algorithm::simplex::Simplex;
    use crate::config::ShortestPathConfig;
    use crate::data::linear_program::elements::ConstraintRelation;

    fn solver(construction: Construction) -> DualShortestPathSolver<Simplex> {
        DualShortestPathSolver::new(Simplex::default(), ShortestPathConfig::default(), construction)
    }

    #[test]
    fn constructions_agree() {
        let graph = graph();
        let s = graph.node_id("s").unwrap();
        let t = graph.node_id("t").unwrap();
        let by_expression = solver(Construction::Expression).model(&graph, s, t);
        let by_column = solver(Construction::Column).model(&graph, s, t);

        assert_eq!(by_expression.variables(), by_column.variables());
        for (left, right) in by_expression.constraints().iter().zip(by_column.constraints()) {
            let mut left_terms = left.coefficients.clone();
            let mut right_terms = right.coefficients.clone();
            left_terms.sort_by_key(|&(variable, _)| variable);
            right_terms.sort_by_key(|&(variable, _)| variable);
            assert_eq!(left_terms, right_terms);
            assert_eq!((left.relation, left.rhs), (right.relation, right.rhs));
            assert_eq!(left.relation, ConstraintRelation::Equal);
        }
        assert_eq!(by_column.constraints()[s.index()].rhs, -1_f64);
        assert_eq!(by_column.constraints()[t.index()].rhs, 1_f64);
        assert_eq!(by_column.constraints()[0].name, "flow_balance.s");
        assert_eq!(by_column.variables()[4].name, "arc_traversed.b.t");
    }

    #[test]
    fn shortest_path() {
        let graph = graph();
        let s = graph.node_id("s").unwrap();
        let t = graph.node_id("t").unwrap();

        for construction in [Construction::Expression, Construction::Column] {
            let result = solver(construction).shortest_path(&graph, s, t).unwrap();
            assert_abs_diff_eq!(result.distance(), 3_f64, epsilon = 1e-9);
            assert_eq!(result.label(s), 0_f64);
            let names = result.path(&graph).unwrap().into_iter()
                .map(|arc| graph.describe_arc(arc))
                .collect::<Vec<_>>();
            assert_eq!(names, vec!["s -> b", "b -> t"]);
        }
    }

    #[test]
    fn same_origin_and_destination() {
        let graph = graph();
        let b = graph.node_id("b").unwrap();
        let result = solver(Construction::Column).shortest_path(&graph, b, b).unwrap();

        assert_abs_diff_eq!(result.distance(), 0_f64, epsilon = 1e-9);
        assert!(result.arcs().is_empty());
    }

    #[test]
    fn unreachable() {
        let mut graph = graph();
        graph.add_node("z");
        graph.add_arc("z", "s", 1).unwrap();
        let s = graph.node_id("s").unwrap();
        let z = graph.node_id("z").unwrap();

        for construction in [Construction::Expression, Construction::Column] {
            assert!(matches!(
                solver(construction).shortest_path(&graph, s, z),
                Err(SolveError::Infeasible { .. }),
            ));
        }
    }
}
