//! # Shortest paths on a small airline network
//!
//! Flights between eight cities, read from a fixed width network file.
use std::path::{Path, PathBuf};

use approx::assert_abs_diff_eq;

use lp_network::algorithm::SolveError;
use lp_network::algorithm::shortest_path::{
    Construction,
    DualShortestPathSolver,
    path_length,
    PrimalShortestPathSolver,
    ShortestPathSolver,
};
use lp_network::algorithm::simplex::Simplex;
use lp_network::config::{PivotRuleKind, ShortestPathConfig, SimplexConfig};
use lp_network::data::network::{ArcId, ArcRecord, Graph};
use lp_network::error::BuildError;
use lp_network::io::lp::to_lp_string;
use lp_network::io::read_network;

/// Path of the network file, relative to the project root folder.
fn network_file() -> PathBuf {
    Path::new(file!()).parent().unwrap().join("network.txt")
}

fn network() -> Graph {
    read_network(&network_file()).unwrap()
}

fn solvers() -> Vec<Box<dyn ShortestPathSolver>> {
    let config = ShortestPathConfig::default();
    vec![
        Box::new(PrimalShortestPathSolver::new(Simplex::default(), config.clone())),
        Box::new(DualShortestPathSolver::new(Simplex::default(), config.clone(), Construction::Expression)),
        Box::new(DualShortestPathSolver::new(Simplex::default(), config, Construction::Column)),
    ]
}

fn labels(graph: &Graph, path: &[ArcId]) -> Vec<String> {
    path.iter().map(|&arc| graph.describe_arc(arc)).collect()
}

#[test]
fn read() {
    let graph = network();

    assert_eq!(graph.nr_nodes(), 8);
    assert_eq!(graph.nr_arcs(), 13);
    let stars = graph.star_index();
    let london = graph.node_id("Heathrow London").unwrap();
    assert_eq!(stars.reverse(london).len(), 3);
    assert_eq!(stars.forward(london).len(), 1);
    assert_eq!(
        graph.require_node("Tokyo"),
        Err(BuildError::UnknownNode { label: "Tokyo".to_string() }),
    );
}

#[test]
fn honolulu_to_london() {
    let graph = network();
    let origin = graph.node_id("Honolulu").unwrap();
    let destination = graph.node_id("Heathrow London").unwrap();

    for solver in solvers() {
        let result = solver.shortest_path(&graph, origin, destination).unwrap();
        assert_abs_diff_eq!(result.distance(), 7464_f64, epsilon = 1e-6);

        let path = result.path(&graph).unwrap();
        assert_eq!(labels(&graph, &path), vec!["Honolulu -> Seattle", "Seattle -> Heathrow London"]);
        assert_abs_diff_eq!(path_length(&graph, &path) as f64, result.distance(), epsilon = 1e-6);
        assert_eq!(result.arcs().len(), 2);
    }
}

#[test]
fn formulations_agree() {
    let graph = network();
    let origin = graph.node_id("Honolulu").unwrap();

    for destination in ["Chicago", "New York", "Paris"] {
        let destination = graph.node_id(destination).unwrap();
        let distances = solvers().into_iter()
            .map(|solver| solver.shortest_path(&graph, origin, destination).unwrap().distance())
            .collect::<Vec<_>>();
        for distance in &distances[1..] {
            assert_abs_diff_eq!(*distance, distances[0], epsilon = 1e-6);
        }
    }

    let paris = graph.node_id("Paris").unwrap();
    let result = solvers()[0].shortest_path(&graph, origin, paris).unwrap();
    assert_abs_diff_eq!(result.distance(), 7678_f64, epsilon = 1e-6);
    assert_abs_diff_eq!(result.label(paris), 7678_f64, epsilon = 1e-6);
}

#[test]
fn steepest_descent() {
    let graph = network();
    let origin = graph.node_id("Honolulu").unwrap();
    let destination = graph.node_id("New York").unwrap();
    let simplex = Simplex::new(SimplexConfig {
        pivot_rule: PivotRuleKind::SteepestDescent,
        ..SimplexConfig::default()
    });

    let primal = PrimalShortestPathSolver::new(&simplex, ShortestPathConfig::default())
        .shortest_path(&graph, origin, destination)
        .unwrap();
    let dual = DualShortestPathSolver::new(&simplex, ShortestPathConfig::default(), Construction::Column)
        .shortest_path(&graph, origin, destination)
        .unwrap();
    // Through San Francisco and Chicago
    assert_abs_diff_eq!(primal.distance(), 4956_f64, epsilon = 1e-6);
    assert_abs_diff_eq!(dual.distance(), 4956_f64, epsilon = 1e-6);
}

/// Two parallel arcs from `s` to `a`, then two routes of equal length from `a` to `t`.
fn ties() -> Graph {
    Graph::from_records(&[
        ArcRecord::new("s", "a", 2),
        ArcRecord::new("s", "a", 2),
        ArcRecord::new("a", "b", 1),
        ArcRecord::new("a", "c", 1),
        ArcRecord::new("b", "t", 1),
        ArcRecord::new("c", "t", 1),
    ])
}

#[test]
fn ties_and_parallel_arcs() {
    let graph = ties();
    let s = graph.node_id("s").unwrap();
    let t = graph.node_id("t").unwrap();
    let arcs = graph.arcs().map(|(id, _)| id).collect::<Vec<_>>();

    for pivot_rule in [PivotRuleKind::FirstProfitable, PivotRuleKind::SteepestDescent] {
        let simplex = Simplex::new(SimplexConfig { pivot_rule, ..SimplexConfig::default() });
        let config = ShortestPathConfig::default();
        let solvers: Vec<Box<dyn ShortestPathSolver + '_>> = vec![
            Box::new(PrimalShortestPathSolver::new(&simplex, config.clone())),
            Box::new(DualShortestPathSolver::new(&simplex, config.clone(), Construction::Expression)),
            Box::new(DualShortestPathSolver::new(&simplex, config, Construction::Column)),
        ];

        for solver in solvers {
            let result = solver.shortest_path(&graph, s, t).unwrap();
            assert_abs_diff_eq!(result.distance(), 4_f64, epsilon = 1e-6);

            // One arc of each tied pair
            assert_eq!(result.arcs().len(), 3);
            assert_eq!([arcs[0], arcs[1]].iter().filter(|&&arc| result.is_on_path(arc)).count(), 1);
            assert_eq!([arcs[2], arcs[3]].iter().filter(|&&arc| result.is_on_path(arc)).count(), 1);

            let path = result.path(&graph).unwrap();
            assert_eq!(path.len(), 3);
            assert_eq!(path.as_slice(), result.arcs());
            assert_abs_diff_eq!(path_length(&graph, &path) as f64, result.distance(), epsilon = 1e-6);
        }
    }
}

#[test]
fn no_path() {
    let graph = network();
    let origin = graph.node_id("Heathrow London").unwrap();
    let destination = graph.node_id("Honolulu").unwrap();

    let primal = PrimalShortestPathSolver::new(Simplex::default(), ShortestPathConfig::default());
    assert!(matches!(primal.shortest_path(&graph, origin, destination), Err(SolveError::Unbounded { .. })));
    for construction in [Construction::Expression, Construction::Column] {
        let dual = DualShortestPathSolver::new(Simplex::default(), ShortestPathConfig::default(), construction);
        assert!(matches!(dual.shortest_path(&graph, origin, destination), Err(SolveError::Infeasible { .. })));
    }
}

#[test]
fn resolve_is_idempotent() {
    let graph = network();
    let origin = graph.node_id("Honolulu").unwrap();
    let destination = graph.node_id("Paris").unwrap();

    for solver in solvers() {
        let model = solver.model(&graph, origin, destination);
        let first = solver.solve(&model).unwrap();
        let second = solver.solve(&model).unwrap();
        assert_eq!(first.objective_value(), second.objective_value());
        assert_eq!(first.values(), second.values());
    }
}

#[test]
fn write_models() {
    let graph = network();
    let origin = graph.node_id("Honolulu").unwrap();
    let destination = graph.node_id("Paris").unwrap();

    let primal = to_lp_string(&solvers()[0].model(&graph, origin, destination));
    assert!(primal.contains("Maximize\n obj: - distance.Honolulu + distance.Paris\n"));
    assert!(primal.contains(" distance_con.Honolulu.Los_Angeles: distance.Los_Angeles - distance.Honolulu <= 2557\n"));
    assert!(!primal.contains("Bounds"));

    let dual = to_lp_string(&solvers()[2].model(&graph, origin, destination));
    assert!(dual.starts_with("\\ Model shortest_path_dual\nMinimize\n"));
    assert!(dual.contains(" flow_balance.Paris: arc_traversed.Heathrow_London.Paris = 1\n"));
    assert!(dual.contains(" 0 <= arc_traversed.Chicago.New_York <= 1\n"));
    assert_eq!(dual.matches(" = ").count(), 8);
}
