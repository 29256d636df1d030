//! # Representation of optimal solutions
//!
//! Once a model is solved to optimality, the solver returns a `Solution` with primal values, dual
//! values and sensitivity information for every variable and constraint of the model.
//!
//! Duals and reduced costs are expressed in the sense of the model: they are the rate at which the
//! objective changes, as written, per unit increase of a right-hand side or a variable.
use crate::data::linear_program::elements::Range;
use crate::data::linear_program::model::{ConstraintId, VariableId};

/// Optimal solution of a `Model`, with sensitivity information.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    pub(crate) objective_value: f64,
    /// Indexed by variable.
    pub(crate) values: Vec<f64>,
    /// Indexed by variable.
    pub(crate) reduced_costs: Vec<f64>,
    /// Range of objective coefficients over which the optimal basis stays optimal, by variable.
    pub(crate) objective_ranges: Vec<Range>,
    /// Indexed by constraint.
    pub(crate) duals: Vec<f64>,
    /// `b - <a, x>`, indexed by constraint.
    pub(crate) slacks: Vec<f64>,
    /// Range of right-hand sides over which the optimal basis stays feasible, by constraint.
    pub(crate) rhs_ranges: Vec<Range>,
    pub(crate) nr_iterations: usize,
}

impl Solution {
    /// Value of the objective function.
    #[must_use]
    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    /// Optimal value of a variable.
    #[must_use]
    pub fn value(&self, variable: VariableId) -> f64 {
        self.values[variable.index()]
    }

    /// Values of all variables, indexed by variable.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Rate at which the objective changes per unit increase of a nonbasic variable.
    #[must_use]
    pub fn reduced_cost(&self, variable: VariableId) -> f64 {
        self.reduced_costs[variable.index()]
    }

    /// Objective coefficient range over which the current basis remains optimal.
    #[must_use]
    pub fn objective_range(&self, variable: VariableId) -> Range {
        self.objective_ranges[variable.index()]
    }

    /// Shadow price of a constraint.
    #[must_use]
    pub fn dual(&self, constraint: ConstraintId) -> f64 {
        self.duals[constraint.index()]
    }

    /// Shadow prices of all constraints, indexed by constraint.
    #[must_use]
    pub fn duals(&self) -> &[f64] {
        &self.duals
    }

    /// Right-hand side minus activity of a constraint.
    #[must_use]
    pub fn slack(&self, constraint: ConstraintId) -> f64 {
        self.slacks[constraint.index()]
    }

    /// Right-hand side range over which the current basis remains feasible.
    #[must_use]
    pub fn rhs_range(&self, constraint: ConstraintId) -> Range {
        self.rhs_ranges[constraint.index()]
    }

    /// Number of pivots and bound flips, both phases together.
    #[must_use]
    pub fn nr_iterations(&self) -> usize {
        self.nr_iterations
    }
}
