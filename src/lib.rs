//! # Network optimization with linear programs
//!
//! Shortest paths in directed networks, computed through linear programs: a node potential
//! formulation and its dual, an arc flow formulation. Both are solved through the `Solver` trait,
//! which `Simplex` implements with a bounded-variable two-phase Simplex method that also reports
//! duals and sensitivity ranges. The same sensitivity information drives a parametric loop that
//! prices shortage out of a facility location model.
#![warn(missing_docs)]

pub mod algorithm;
pub mod config;
pub mod data;
pub mod error;
pub mod io;

pub use algorithm::{Solver, SolveError};
pub use algorithm::simplex::Simplex;
pub use error::{BuildError, Error};
