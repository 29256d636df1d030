//! # Dense tableau
//!
//! Stores `B^-1 A` for all columns of the standard form `A x = b, l <= x <= u`. The columns are,
//! in this order: the variables of the model, one slack per constraint, and one artificial
//! variable for each constraint whose slack could not absorb the initial residual.
//!
//! Nonbasic variables sit at one of their bounds, or at zero if they are free. Their values are
//! always set exactly, so that comparing a value with a bound needs no tolerance.
use tracing::trace;

use crate::data::linear_program::elements::{BoundDirection, Bounds, bounds};
use crate::data::linear_program::model::Model;

/// Outcome of the ratio test for an entering column.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Step {
    /// The entering variable reaches its opposite bound before any basic variable blocks.
    Flip {
        length: f64,
    },
    /// The basic variable in `row` blocks after `length`, leaving the basis at `bound`.
    Pivot {
        row: usize,
        length: f64,
        bound: BoundDirection,
    },
    /// Nothing blocks.
    Unbounded,
}

#[derive(Clone, Debug)]
pub(crate) struct Tableau {
    /// Row major `B^-1 A`.
    rows: Vec<Vec<f64>>,
    /// Column that is basic in each row.
    basis: Vec<usize>,
    /// Row in which each column is basic, if any.
    basic_row: Vec<Option<usize>>,
    bounds: Vec<Bounds>,
    values: Vec<f64>,
    nr_structural: usize,
    nr_artificial: usize,
}

impl Tableau {
    /// Create a tableau with a basis of slacks and artificials.
    ///
    /// Variables of the model start at their lower bound, their upper bound if they have no lower
    /// bound, or zero if they are free. The slack of each row then takes the residual if its
    /// bounds allow it. Otherwise, the slack is set to its nearest bound and an artificial
    /// variable takes the remaining excess; the row is scaled such that the artificial has
    /// coefficient one and a nonnegative value.
    pub(crate) fn new(model: &Model) -> Self {
        let nr_structural = model.nr_variables();
        let nr_rows = model.nr_constraints();
        let nr_columns = nr_structural + nr_rows;

        let mut bounds = model.variables().iter()
            .map(|variable| variable.bounds.clone())
            .collect::<Vec<_>>();
        bounds.extend(model.constraints().iter().map(|constraint| constraint.relation.slack_bounds()));

        let mut values = bounds[..nr_structural].iter().map(initial_value).collect::<Vec<_>>();

        let mut rows = vec![vec![0_f64; nr_columns]; nr_rows];
        for (row, constraint) in rows.iter_mut().zip(model.constraints()) {
            for &(variable, coefficient) in &constraint.coefficients {
                row[variable.index()] += coefficient;
            }
        }
        for (i, row) in rows.iter_mut().enumerate() {
            row[nr_structural + i] = 1_f64;
        }

        let mut basis = (nr_structural..nr_columns).collect::<Vec<_>>();
        let mut excesses = Vec::new();
        for (i, constraint) in model.constraints().iter().enumerate() {
            let activity = rows[i][..nr_structural].iter()
                .zip(&values)
                .map(|(coefficient, value)| coefficient * value)
                .sum::<f64>();
            let residual = constraint.rhs - activity;

            let slack = &bounds[nr_structural + i];
            let clamped = residual.clamp(slack[BoundDirection::Lower], slack[BoundDirection::Upper]);
            values.push(clamped);
            if clamped != residual {
                excesses.push((i, residual - clamped));
            }
        }

        let nr_artificial = excesses.len();
        for row in &mut rows {
            row.resize(nr_columns + nr_artificial, 0_f64);
        }
        for (k, (i, excess)) in excesses.into_iter().enumerate() {
            let column = nr_columns + k;
            if excess < 0_f64 {
                for value in &mut rows[i] {
                    *value = -*value;
                }
            }
            rows[i][column] = 1_f64;
            basis[i] = column;
            bounds.push(self::bounds(0_f64, f64::INFINITY));
            values.push(excess.abs());
        }

        let mut basic_row = vec![None; nr_columns + nr_artificial];
        for (row, &column) in basis.iter().enumerate() {
            basic_row[column] = Some(row);
        }

        Self {
            rows,
            basis,
            basic_row,
            bounds,
            values,
            nr_structural,
            nr_artificial,
        }
    }

    pub(crate) fn nr_rows(&self) -> usize {
        self.basis.len()
    }

    pub(crate) fn nr_columns(&self) -> usize {
        self.bounds.len()
    }

    pub(crate) fn nr_artificial(&self) -> usize {
        self.nr_artificial
    }

    fn first_artificial(&self) -> usize {
        self.nr_structural + self.nr_rows()
    }

    /// Column of the slack of a constraint.
    pub(crate) fn slack_column(&self, row: usize) -> usize {
        debug_assert!(row < self.nr_rows());

        self.nr_structural + row
    }

    pub(crate) fn is_basic(&self, column: usize) -> bool {
        self.basic_row[column].is_some()
    }

    /// Row in which `column` is basic.
    pub(crate) fn row_of(&self, column: usize) -> Option<usize> {
        self.basic_row[column]
    }

    /// Column that is basic in `row`.
    pub(crate) fn basic_column(&self, row: usize) -> usize {
        self.basis[row]
    }

    pub(crate) fn is_fixed(&self, column: usize) -> bool {
        self.bounds[column][BoundDirection::Lower] == self.bounds[column][BoundDirection::Upper]
    }

    pub(crate) fn bounds(&self, column: usize) -> &Bounds {
        &self.bounds[column]
    }

    pub(crate) fn value(&self, column: usize) -> f64 {
        self.values[column]
    }

    /// Element of `B^-1 A`.
    pub(crate) fn entry(&self, row: usize, column: usize) -> f64 {
        self.rows[row][column]
    }

    /// The bound a nonbasic variable sits at, `None` if it is free and at zero.
    pub(crate) fn nonbasic_position(&self, column: usize) -> Option<BoundDirection> {
        debug_assert!(!self.is_basic(column));

        let value = self.values[column];
        if value == self.bounds[column][BoundDirection::Lower] {
            Some(BoundDirection::Lower)
        } else if value == self.bounds[column][BoundDirection::Upper] {
            Some(BoundDirection::Upper)
        } else {
            None
        }
    }

    /// Cost vector that minimizes the sum of artificial variables.
    pub(crate) fn phase_one_costs(&self) -> Vec<f64> {
        let mut costs = vec![0_f64; self.nr_columns()];
        for cost in &mut costs[self.first_artificial()..] {
            *cost = 1_f64;
        }
        costs
    }

    /// Cost vector of the model, turned into a minimization.
    pub(crate) fn phase_two_costs(&self, model: &Model) -> Vec<f64> {
        let factor = model.objective().minimization_factor();
        let mut costs = vec![0_f64; self.nr_columns()];
        for (cost, variable) in costs.iter_mut().zip(model.variables()) {
            *cost = factor * variable.cost;
        }
        costs
    }

    /// Relative costs `c_j - c_B B^-1 A_j` of all columns.
    pub(crate) fn reduced_costs(&self, costs: &[f64]) -> Vec<f64> {
        debug_assert_eq!(costs.len(), self.nr_columns());

        let mut reduced = costs.to_vec();
        for (row, &basic) in self.rows.iter().zip(&self.basis) {
            let cost = costs[basic];
            if cost != 0_f64 {
                for (relative, coefficient) in reduced.iter_mut().zip(row) {
                    *relative -= cost * coefficient;
                }
            }
        }
        reduced
    }

    /// Direction in which moving a nonbasic column decreases the cost, if there is one.
    pub(crate) fn improving_direction(
        &self,
        column: usize,
        reduced_cost: f64,
        tolerance: f64,
    ) -> Option<BoundDirection> {
        if self.is_basic(column) || self.is_fixed(column) {
            return None;
        }

        let value = self.values[column];
        if reduced_cost < -tolerance && value < self.bounds[column][BoundDirection::Upper] {
            Some(BoundDirection::Upper)
        } else if reduced_cost > tolerance && value > self.bounds[column][BoundDirection::Lower] {
            Some(BoundDirection::Lower)
        } else {
            None
        }
    }

    /// How far the entering column can move in `direction`, and what stops it.
    ///
    /// Ties between blocking rows are broken by the lowest basic column index, which together with
    /// the `FirstProfitable` rule is Bland's rule.
    pub(crate) fn ratio_test(&self, column: usize, direction: BoundDirection, tolerance: f64) -> Step {
        let sign = direction.sign();
        let own_distance = match direction {
            BoundDirection::Upper => self.bounds[column][BoundDirection::Upper] - self.values[column],
            BoundDirection::Lower => self.values[column] - self.bounds[column][BoundDirection::Lower],
        };
        let mut step = if own_distance.is_finite() {
            Step::Flip { length: own_distance }
        } else {
            Step::Unbounded
        };

        for (row, &basic) in self.basis.iter().enumerate() {
            // Rate at which the basic variable decreases
            let rate = sign * self.rows[row][column];
            if rate.abs() <= tolerance {
                continue;
            }

            let (bound, distance) = if rate > 0_f64 {
                (BoundDirection::Lower, self.values[basic] - self.bounds[basic][BoundDirection::Lower])
            } else {
                (BoundDirection::Upper, self.bounds[basic][BoundDirection::Upper] - self.values[basic])
            };
            if distance.is_infinite() {
                continue;
            }
            let length = distance.max(0_f64) / rate.abs();

            let better = match step {
                Step::Unbounded => true,
                Step::Flip { length: best } => length < best - tolerance,
                Step::Pivot { row: current, length: best, .. } => {
                    length < best - tolerance
                        || (length <= best + tolerance && basic < self.basis[current])
                },
            };
            if better {
                step = Step::Pivot { row, length, bound };
            }
        }

        step
    }

    /// Move the entering column to its opposite bound without a basis change.
    pub(crate) fn flip(&mut self, column: usize, direction: BoundDirection, length: f64) {
        self.shift(column, direction, length);
        self.values[column] = self.bounds[column][direction];
    }

    /// Move the entering column by `length` and exchange it with the basic variable of `row`,
    /// which leaves at `bound`.
    pub(crate) fn bring_into_basis(
        &mut self,
        column: usize,
        direction: BoundDirection,
        row: usize,
        length: f64,
        bound: BoundDirection,
    ) {
        self.shift(column, direction, length);
        let leaving = self.basis[row];
        self.values[leaving] = self.bounds[leaving][bound];
        trace!(entering = column, leaving, row, length, "pivot");
        self.pivot(row, column);
    }

    fn shift(&mut self, column: usize, direction: BoundDirection, length: f64) {
        let change = direction.sign() * length;
        for (row, &basic) in self.basis.iter().enumerate() {
            self.values[basic] -= change * self.rows[row][column];
        }
        self.values[column] += change;
    }

    fn pivot(&mut self, row: usize, column: usize) {
        let mut pivot_row = std::mem::take(&mut self.rows[row]);
        let pivot = pivot_row[column];
        debug_assert!(pivot != 0_f64);

        for value in &mut pivot_row {
            *value /= pivot;
        }
        pivot_row[column] = 1_f64;

        for (i, other) in self.rows.iter_mut().enumerate() {
            if i == row {
                continue;
            }
            let factor = other[column];
            if factor != 0_f64 {
                for (value, pivot_value) in other.iter_mut().zip(&pivot_row) {
                    *value -= factor * pivot_value;
                }
                other[column] = 0_f64;
            }
        }
        self.rows[row] = pivot_row;

        let leaving = self.basis[row];
        self.basic_row[leaving] = None;
        self.basic_row[column] = Some(row);
        self.basis[row] = column;
    }

    /// Recompute basic values from the nonbasic ones, `x_B = B^-1 b - B^-1 N x_N`, to remove the
    /// error accumulated by incremental updates.
    ///
    /// The slack columns of the tableau hold `B^-1`.
    pub(crate) fn refresh_basic_values(&mut self, rhs: &[f64]) {
        debug_assert_eq!(rhs.len(), self.nr_rows());

        for row in 0..self.nr_rows() {
            let from_rhs = rhs.iter().enumerate()
                .map(|(i, b)| self.rows[row][self.nr_structural + i] * b)
                .sum::<f64>();
            let from_nonbasic = (0..self.nr_columns())
                .filter(|&column| !self.is_basic(column))
                .map(|column| self.rows[row][column] * self.values[column])
                .sum::<f64>();
            let basic = self.basis[row];
            self.values[basic] = from_rhs - from_nonbasic;
        }
    }

    /// Sum of the artificial variables.
    pub(crate) fn artificial_infeasibility(&self) -> f64 {
        self.values[self.first_artificial()..].iter().sum()
    }

    /// Fix all artificial variables at zero, so that they can't take a nonzero value again.
    ///
    /// Artificials that are still basic stay in the basis at level zero. Their row is either
    /// redundant or they will leave through a degenerate pivot.
    pub(crate) fn fix_artificials(&mut self) {
        for column in self.first_artificial()..self.nr_columns() {
            self.bounds[column][BoundDirection::Upper] = 0_f64;
            if !self.is_basic(column) {
                self.values[column] = 0_f64;
            }
        }
    }
}

fn initial_value(bounds: &Bounds) -> f64 {
    let (lower, upper) = (bounds[BoundDirection::Lower], bounds[BoundDirection::Upper]);
    if lower.is_finite() {
        lower
    } else if upper.is_finite() {
        upper
    } else {
        0_f64
    }
}
