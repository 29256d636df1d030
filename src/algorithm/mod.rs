//! # Algorithms
//!
//! The `Solver` trait is the contract between the network formulations and whatever computes
//! optimal solutions of linear programs. The formulations only build models and interpret
//! solutions; `simplex` provides the reference implementation of the contract.
use thiserror::Error;

use crate::data::linear_program::model::Model;
use crate::data::linear_program::solution::Solution;

pub mod parametric;
pub mod shortest_path;
pub mod simplex;

/// Something that solves linear programs to optimality.
///
/// Solving is blocking. Calling `solve` again on the same, unmodified model yields the same
/// solution; calling it on a model whose objective coefficients or right-hand sides were changed
/// re-optimizes without the caller rebuilding anything.
pub trait Solver {
    /// Solve the model.
    ///
    /// # Return value
    ///
    /// An optimal solution with duals and sensitivity ranges.
    ///
    /// # Errors
    ///
    /// If the model has no feasible solution, if its objective is unbounded, or if the solver
    /// gives up.
    fn solve(&self, model: &Model) -> Result<Solution, SolveError>;
}

impl<S: Solver + ?Sized> Solver for &S {
    fn solve(&self, model: &Model) -> Result<Solution, SolveError> {
        (**self).solve(model)
    }
}

/// A linear program is either infeasible, unbounded or has a finite optimum; only the last one
/// produces a `Solution`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    /// No point satisfies all constraints and bounds.
    #[error("model \"{model}\" is infeasible")]
    Infeasible {
        /// Name of the model.
        model: String,
    },
    /// The objective can be improved without limit.
    #[error("model \"{model}\" is unbounded")]
    Unbounded {
        /// Name of the model.
        model: String,
    },
    /// The iteration limit was reached before an optimum was found.
    #[error("model \"{model}\" was not solved within {iterations} iterations")]
    IterationLimit {
        /// Name of the model.
        model: String,
        /// The limit that was hit.
        iterations: usize,
    },
    /// Something happened that should not happen for a correct solver.
    #[error("internal solver error: {0}")]
    Internal(String),
}
