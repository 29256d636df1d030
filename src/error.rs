//! # Errors
//!
//! Errors raised while building networks and models, and the crate-level error that collects all
//! error kinds of the crate.
use thiserror::Error;

use crate::algorithm::SolveError;
use crate::algorithm::parametric::ParametricError;
use crate::io::error::ImportError;

/// Input that violates an invariant of a network or an instance.
///
/// These are not recoverable locally; construction is aborted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    /// An arc, origin or destination names a node that is not in the node set.
    #[error("unknown node \"{label}\"")]
    UnknownNode {
        /// The label that was looked up.
        label: String,
    },
    /// Facility data with inconsistent dimensions or invalid values.
    #[error("invalid instance: {0}")]
    Instance(String),
}

/// Any error produced by this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed network or instance.
    #[error(transparent)]
    Build(#[from] BuildError),
    /// Network file could not be read or parsed.
    #[error(transparent)]
    Import(#[from] ImportError),
    /// The solver did not find an optimum.
    #[error(transparent)]
    Solve(#[from] SolveError),
    /// The parametric loop failed.
    #[error(transparent)]
    Parametric(#[from] ParametricError),
}
