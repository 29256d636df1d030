use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use lp_network::algorithm::parametric::{FacilityInstance, FacilityModel, ParametricShortageSolver};
use lp_network::algorithm::shortest_path::{
    Construction,
    DualShortestPathSolver,
    path_length,
    PrimalShortestPathSolver,
    ShortestPathSolver,
};
use lp_network::algorithm::simplex::Simplex;
use lp_network::Error;
use lp_network::config::{ParametricConfig, PivotRuleKind, ShortestPathConfig, SimplexConfig};
use lp_network::data::linear_program::model::Model;
use lp_network::data::network::{Graph, NodeId};
use lp_network::io::{lp, read_network};
use lp_network::io::solution::write_solution;

/// Shortest paths and facility location through linear programming.
#[derive(Parser)]
#[command(version, about)]
struct Opts {
    /// More output on stderr; repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(flatten)]
    simplex: SimplexArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct SimplexArgs {
    /// Entering column selection rule
    #[arg(long, value_enum, default_value = "first-profitable", global = true)]
    pivot_rule: PivotRule,
    /// Maximum number of Simplex iterations per solve
    #[arg(long, default_value_t = SimplexConfig::default().max_iterations, global = true)]
    max_iterations: usize,
}

#[derive(Subcommand)]
enum Command {
    /// Shortest path between two nodes of a network file
    ShortestPath {
        /// Fixed width network file
        network_file: PathBuf,
        /// Label of the origin node
        #[arg(long)]
        origin: String,
        /// Label of the destination node
        #[arg(long)]
        destination: String,
        /// Which linear program to solve
        #[arg(long, value_enum, default_value = "all")]
        formulation: Formulation,
        /// How the arc flow model is built
        #[arg(long, value_enum, default_value = "column")]
        construction: ConstructionArg,
        /// Arcs with a dual value or flow above this value are on the path
        #[arg(long, default_value_t = ShortestPathConfig::default().on_path_threshold)]
        threshold: f64,
        /// Print the forward and reverse star of every node
        #[arg(long)]
        print_stars: bool,
        /// Directory to write each model and its solution to
        #[arg(long, value_name = "DIRECTORY")]
        write: Option<PathBuf>,
    },
    /// Raise the shortage penalty of the example facility model until all demand is met
    Facility {
        /// Relative penalty increase and shortage tolerance
        #[arg(long, default_value_t = ParametricConfig::default().epsilon)]
        epsilon: f64,
        /// Maximum number of solves
        #[arg(long, default_value_t = ParametricConfig::default().max_iterations)]
        iterations: usize,
        /// File to write the initial model to
        #[arg(long, value_name = "FILE")]
        write_lp: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PivotRule {
    FirstProfitable,
    SteepestDescent,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Formulation {
    Primal,
    Dual,
    All,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ConstructionArg {
    Expression,
    Column,
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let level = match opts.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to install logger")?;

    let simplex = Simplex::new(SimplexConfig {
        max_iterations: opts.simplex.max_iterations,
        pivot_rule: match opts.simplex.pivot_rule {
            PivotRule::FirstProfitable => PivotRuleKind::FirstProfitable,
            PivotRule::SteepestDescent => PivotRuleKind::SteepestDescent,
        },
        ..SimplexConfig::default()
    });

    match opts.command {
        Command::ShortestPath {
            network_file,
            origin,
            destination,
            formulation,
            construction,
            threshold,
            print_stars,
            write,
        } => {
            let (graph, origin, destination) = load(&network_file, &origin, &destination)
                .with_context(|| format!("failed to load \"{}\"", network_file.display()))?;
            if print_stars {
                print_star_index(&graph);
            }

            let config = ShortestPathConfig { on_path_threshold: threshold };
            let construction = match construction {
                ConstructionArg::Expression => Construction::Expression,
                ConstructionArg::Column => Construction::Column,
            };
            let mut solvers: Vec<Box<dyn ShortestPathSolver + '_>> = Vec::new();
            if formulation != Formulation::Dual {
                solvers.push(Box::new(PrimalShortestPathSolver::new(&simplex, config.clone())));
            }
            if formulation != Formulation::Primal {
                solvers.push(Box::new(DualShortestPathSolver::new(&simplex, config, construction)));
            }

            for solver in solvers {
                println!("# {} formulation", solver.formulation());
                let model = solver.model(&graph, origin, destination);
                if let Some(directory) = &write {
                    write_lp(&model, &directory.join(format!("shortest_path_{}.lp", solver.formulation())))?;
                }
                let solution = solver.solve(&model)
                    .with_context(|| format!("{} formulation failed", solver.formulation()))?;
                if let Some(directory) = &write {
                    let path = directory.join(format!("shortest_path_{}.sol", solver.formulation()));
                    let mut writer = BufWriter::new(create(&path)?);
                    write_solution(&model, &solution, &mut writer)?;
                    writer.flush()?;
                }

                let result = solver.interpret(&graph, origin, destination, &solution);
                for node in graph.nodes() {
                    println!("distance to {} is {}", graph.label(node), result.label(node));
                }
                for &arc in result.arcs() {
                    println!("arc {} is in shortest path", graph.describe_arc(arc));
                }
                if let Some(path) = result.path(&graph) {
                    let nodes = path.iter()
                        .map(|&arc| graph.label(graph.arc(arc).destination))
                        .collect::<Vec<_>>();
                    println!(
                        "path: {} -> {} ({})",
                        graph.label(origin),
                        nodes.join(" -> "),
                        path_length(&graph, &path),
                    );
                }
                println!("length of shortest path = {}", result.distance());
            }
        },
        Command::Facility { epsilon, iterations, write_lp: lp_file } => {
            let instance = FacilityInstance::example();
            if let Some(path) = &lp_file {
                write_lp(FacilityModel::new(&instance).model(), path)?;
            }

            let config = ParametricConfig { epsilon, max_iterations: iterations };
            let outcome = ParametricShortageSolver::new(&simplex, config).solve(&instance)?;
            for (index, iteration) in outcome.iterations.iter().enumerate() {
                println!(
                    "iteration {}: penalty = {}, TotalShortage = {}, TotalShippingCost = {}",
                    index + 1,
                    iteration.penalty,
                    iteration.total_shortage,
                    iteration.total_shipping_cost,
                );
            }
            for (facility, row) in outcome.shipments.iter().enumerate() {
                for (customer, amount) in row.iter().enumerate().filter(|&(_, &amount)| amount > epsilon) {
                    println!("ship.{facility}.{customer} = {amount}");
                }
            }
            println!("TotalShortage = {}", outcome.total_shortage);
            println!("TotalShippingCost = {}", outcome.total_shipping_cost);
        },
    }

    Ok(())
}

/// Read a network and look up the origin and destination in it.
fn load(path: &Path, origin: &str, destination: &str) -> Result<(Graph, NodeId, NodeId), Error> {
    let graph = read_network(path)?;
    let origin = graph.require_node(origin)?;
    let destination = graph.require_node(destination)?;

    Ok((graph, origin, destination))
}

fn print_star_index(graph: &Graph) {
    let stars = graph.star_index();
    for node in graph.nodes() {
        println!("node {}", graph.label(node));
        let forward = stars.forward(node).iter()
            .map(|&arc| graph.label(graph.arc(arc).destination))
            .collect::<Vec<_>>();
        println!("forward star: {}", forward.join(" "));
        let reverse = stars.reverse(node).iter()
            .map(|&arc| graph.label(graph.arc(arc).source))
            .collect::<Vec<_>>();
        println!("reverse star: {}", reverse.join(" "));
    }
}

fn create(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("failed to create \"{}\"", path.display()))
}

fn write_lp(model: &Model, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(create(path)?);
    lp::write_lp(model, &mut writer)?;
    writer.flush()?;
    Ok(())
}
