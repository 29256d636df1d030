//! # Reading and writing
//!
//! Networks are read from fixed width text files. Models can be written in the CPLEX LP format and
//! solutions as plain `name value` lines.
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::data::network::Graph;
use crate::io::error::ImportError;

pub mod error;
pub mod lp;
pub mod network;
pub mod solution;

/// Read a network from a file.
///
/// See the `network` module for the format.
///
/// # Errors
///
/// When the file can't be read, or when a line can't be parsed.
pub fn read_network(file_path: &Path) -> Result<Graph, ImportError> {
    let text = fs::read_to_string(file_path)?;
    let graph = network::parse(&text)?;
    debug!(path = %file_path.display(), nr_nodes = graph.nr_nodes(), nr_arcs = graph.nr_arcs(), "read network");

    Ok(graph)
}
