//! # Linear expressions and columns
//!
//! A `LinearExpression` is a row in the making: a sparse combination of variables. A `Column` is
//! the transpose: the coefficients a single variable will have in existing constraints.
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::data::linear_program::model::{ConstraintId, VariableId};

/// Sparse linear combination of variables.
///
/// Terms are kept in insertion order; repeated variables are not merged here, the solver sums
/// them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinearExpression {
    terms: Vec<(VariableId, f64)>,
}

impl LinearExpression {
    /// The empty expression.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `coefficient * variable`.
    pub fn add_term(&mut self, coefficient: f64, variable: VariableId) {
        self.terms.push((variable, coefficient));
    }

    /// All `(variable, coefficient)` terms.
    #[must_use]
    pub fn terms(&self) -> &[(VariableId, f64)] {
        &self.terms
    }

    /// Whether there are no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of terms, repeated variables included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub(crate) fn into_terms(self) -> Vec<(VariableId, f64)> {
        self.terms
    }
}

impl From<VariableId> for LinearExpression {
    fn from(variable: VariableId) -> Self {
        Self { terms: vec![(variable, 1_f64)] }
    }
}

impl FromIterator<(VariableId, f64)> for LinearExpression {
    fn from_iter<I: IntoIterator<Item = (VariableId, f64)>>(iter: I) -> Self {
        Self { terms: iter.into_iter().collect() }
    }
}

impl AddAssign<VariableId> for LinearExpression {
    fn add_assign(&mut self, variable: VariableId) {
        self.add_term(1_f64, variable);
    }
}

impl SubAssign<VariableId> for LinearExpression {
    fn sub_assign(&mut self, variable: VariableId) {
        self.add_term(-1_f64, variable);
    }
}

impl AddAssign<LinearExpression> for LinearExpression {
    fn add_assign(&mut self, other: LinearExpression) {
        self.terms.extend(other.terms);
    }
}

impl Add<VariableId> for LinearExpression {
    type Output = Self;

    fn add(mut self, variable: VariableId) -> Self::Output {
        self += variable;
        self
    }
}

impl Sub<VariableId> for LinearExpression {
    type Output = Self;

    fn sub(mut self, variable: VariableId) -> Self::Output {
        self -= variable;
        self
    }
}

impl Neg for LinearExpression {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        for (_, coefficient) in &mut self.terms {
            *coefficient = -*coefficient;
        }
        self
    }
}

impl Add<VariableId> for VariableId {
    type Output = LinearExpression;

    fn add(self, other: VariableId) -> Self::Output {
        LinearExpression::from(self) + other
    }
}

impl Sub<VariableId> for VariableId {
    type Output = LinearExpression;

    fn sub(self, other: VariableId) -> Self::Output {
        LinearExpression::from(self) - other
    }
}

impl Mul<VariableId> for f64 {
    type Output = LinearExpression;

    fn mul(self, variable: VariableId) -> Self::Output {
        LinearExpression { terms: vec![(variable, self)] }
    }
}

impl Sum<VariableId> for LinearExpression {
    fn sum<I: Iterator<Item = VariableId>>(iter: I) -> Self {
        iter.map(|variable| (variable, 1_f64)).collect()
    }
}

/// Coefficients of one variable in constraints that already exist.
///
/// Passing a column when creating a variable injects it into those constraints directly, without
/// rebuilding their expressions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Column {
    entries: Vec<(ConstraintId, f64)>,
}

impl Column {
    /// The empty column.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the coefficient of the new variable in `constraint`.
    pub fn add_term(&mut self, coefficient: f64, constraint: ConstraintId) {
        self.entries.push((constraint, coefficient));
    }

    /// All `(constraint, coefficient)` entries.
    #[must_use]
    pub fn entries(&self) -> &[(ConstraintId, f64)] {
        &self.entries
    }
}
