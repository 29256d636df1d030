//! # Models
//!
//! The model-building half of the solver contract: variables with bounds and costs, linear
//! constraints and an objective sense. Solvers read a `Model` and never modify it.
use enum_map::EnumMap;

use crate::data::linear_program::elements::{Bounds, BoundDirection, bounds, ConstraintRelation, Objective};
use crate::data::linear_program::expression::{Column, LinearExpression};

/// Handle of a variable in the `Model` that created it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VariableId(usize);

impl VariableId {
    /// Column index of the variable.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle of a constraint in the `Model` that created it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ConstraintId(usize);

impl ConstraintId {
    /// Row index of the constraint.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A continuous variable.
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    /// Name, used when writing the model.
    pub name: String,
    /// Lower and upper bound.
    pub bounds: Bounds,
    /// Coefficient in the objective function.
    pub cost: f64,
}

impl Variable {
    /// Smallest allowed value; may be negative infinity.
    #[must_use]
    pub fn lower_bound(&self) -> f64 {
        self.bounds[BoundDirection::Lower]
    }

    /// Largest allowed value; may be infinity.
    #[must_use]
    pub fn upper_bound(&self) -> f64 {
        self.bounds[BoundDirection::Upper]
    }
}

/// A linear constraint `<a, x> (<=|=|>=) b`.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint {
    /// Name, used when writing the model.
    pub name: String,
    /// Sparse row; a variable may appear more than once, in which case coefficients add up.
    pub coefficients: Vec<(VariableId, f64)>,
    /// Type of (in)equality.
    pub relation: ConstraintRelation,
    /// Right-hand side.
    pub rhs: f64,
}

impl Constraint {
    /// Value of `<a, x>`, given values for all variables.
    #[must_use]
    pub fn activity(&self, values: &[f64]) -> f64 {
        self.coefficients.iter()
            .map(|&(variable, coefficient)| coefficient * values[variable.0])
            .sum()
    }
}

/// A linear program.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
    name: String,
    objective: Objective,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
}

impl Model {
    /// Create an empty minimization model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Name of the model.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direction of optimization.
    #[must_use]
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Whether the objective is minimized or maximized.
    pub fn set_objective(&mut self, objective: Objective) {
        self.objective = objective;
    }

    /// Add a continuous variable.
    ///
    /// # Arguments
    ///
    /// * `lower`: Lower bound, may be `f64::NEG_INFINITY`.
    /// * `upper`: Upper bound, may be `f64::INFINITY`.
    /// * `cost`: Objective coefficient.
    pub fn add_variable(&mut self, name: impl Into<String>, lower: f64, upper: f64, cost: f64) -> VariableId {
        debug_assert!(lower <= upper);
        debug_assert!(cost.is_finite());

        let id = VariableId(self.variables.len());
        self.variables.push(Variable { name: name.into(), bounds: bounds(lower, upper), cost });
        id
    }

    /// Add a continuous variable together with its coefficients in existing constraints.
    pub fn add_variable_with_column(
        &mut self,
        name: impl Into<String>,
        lower: f64,
        upper: f64,
        cost: f64,
        column: &Column,
    ) -> VariableId {
        let id = self.add_variable(name, lower, upper, cost);
        for &(constraint, coefficient) in column.entries() {
            debug_assert!(constraint.0 < self.constraints.len());

            self.constraints[constraint.0].coefficients.push((id, coefficient));
        }

        id
    }

    /// Add a linear constraint.
    ///
    /// The expression may be empty; variables can be injected later through a `Column`.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        expression: impl Into<LinearExpression>,
        relation: ConstraintRelation,
        rhs: f64,
    ) -> ConstraintId {
        let coefficients = expression.into().into_terms();
        debug_assert!(coefficients.iter().all(|&(variable, _)| variable.0 < self.variables.len()));
        debug_assert!(rhs.is_finite());

        let id = ConstraintId(self.constraints.len());
        self.constraints.push(Constraint { name: name.into(), coefficients, relation, rhs });
        id
    }

    /// Change the objective coefficient of a variable.
    pub fn set_objective_coefficient(&mut self, variable: VariableId, cost: f64) {
        debug_assert!(cost.is_finite());

        self.variables[variable.0].cost = cost;
    }

    /// Change the right-hand side of a constraint.
    pub fn set_rhs(&mut self, constraint: ConstraintId, rhs: f64) {
        debug_assert!(rhs.is_finite());

        self.constraints[constraint.0].rhs = rhs;
    }

    /// Look up a variable.
    #[must_use]
    pub fn variable(&self, variable: VariableId) -> &Variable {
        &self.variables[variable.0]
    }

    /// Look up a constraint.
    #[must_use]
    pub fn constraint(&self, constraint: ConstraintId) -> &Constraint {
        &self.constraints[constraint.0]
    }

    /// All variables, in order of creation.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// All constraints, in order of creation.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Handles of all variables, in the order they were added.
    pub fn variable_ids(&self) -> impl ExactSizeIterator<Item = VariableId> + DoubleEndedIterator {
        (0..self.variables.len()).map(VariableId)
    }

    /// Handles of all constraints, in the order they were added.
    pub fn constraint_ids(&self) -> impl ExactSizeIterator<Item = ConstraintId> + DoubleEndedIterator {
        (0..self.constraints.len()).map(ConstraintId)
    }

    /// Number of variables.
    #[must_use]
    pub fn nr_variables(&self) -> usize {
        self.variables.len()
    }

    /// Number of constraints.
    #[must_use]
    pub fn nr_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Number of constraints of each relation type.
    #[must_use]
    pub fn constraint_counts(&self) -> EnumMap<ConstraintRelation, usize> {
        let mut counts = EnumMap::default();
        for constraint in &self.constraints {
            counts[constraint.relation] += 1;
        }
        counts
    }

    /// Value of `<a, x>` for a constraint, given values for all variables.
    #[must_use]
    pub fn activity(&self, constraint: ConstraintId, values: &[f64]) -> f64 {
        debug_assert_eq!(values.len(), self.nr_variables());

        self.constraints[constraint.0].activity(values)
    }

    /// Objective function value, given values for all variables.
    #[must_use]
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        debug_assert_eq!(values.len(), self.nr_variables());

        self.variables.iter().zip(values).map(|(variable, value)| variable.cost * value).sum()
    }
}
