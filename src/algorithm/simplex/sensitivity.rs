//! # Sensitivity analysis
//!
//! Reading duals, reduced costs and ranges from an optimal tableau. Everything is computed for the
//! minimization form that the tableau solves, and translated back to the sense of the model at
//! the end.
use crate::algorithm::simplex::tableau::Tableau;
use crate::data::linear_program::elements::{BoundDirection, Range};
use crate::data::linear_program::model::Model;
use crate::data::linear_program::solution::Solution;

/// Collect the solution of an optimal tableau.
///
/// # Arguments
///
/// * `costs`: Phase two costs, that is, the model's costs in minimization form.
pub(crate) fn solution(
    model: &Model,
    tableau: &Tableau,
    costs: &[f64],
    nr_iterations: usize,
    tolerance: f64,
) -> Solution {
    let factor = model.objective().minimization_factor();
    let reduced = tableau.reduced_costs(costs);

    let values = (0..model.nr_variables()).map(|column| tableau.value(column)).collect::<Vec<_>>();
    let reduced_costs = reduced[..model.nr_variables()].iter().map(|d| factor * d).collect();
    let objective_ranges = (0..model.nr_variables())
        .map(|column| {
            let range = objective_range(tableau, costs, &reduced, column, tolerance);
            if factor < 0_f64 { range.negate() } else { range }
        })
        .collect();

    // Slacks have zero cost, so their relative cost is minus the dual
    let duals = (0..model.nr_constraints())
        .map(|row| -factor * reduced[tableau.slack_column(row)])
        .collect();
    let slacks = model.constraints().iter()
        .map(|constraint| constraint.rhs - constraint.activity(&values))
        .collect();
    let rhs_ranges = model.constraints().iter().enumerate()
        .map(|(row, constraint)| rhs_range(tableau, row, constraint.rhs, tolerance))
        .collect();

    Solution {
        objective_value: model.objective_value(&values),
        values,
        reduced_costs,
        objective_ranges,
        duals,
        slacks,
        rhs_ranges,
        nr_iterations,
    }
}

/// Range of the cost of `column` for which the current basis stays optimal.
///
/// For a nonbasic column only its own relative cost depends on its cost. For a basic column in
/// row `r`, changing its cost by `delta` changes the relative cost of each nonbasic column `k` by
/// `-delta * T[r][k]`, which must keep the sign that makes `k` stay where it is.
fn objective_range(
    tableau: &Tableau,
    costs: &[f64],
    reduced: &[f64],
    column: usize,
    tolerance: f64,
) -> Range {
    let cost = costs[column];

    match tableau.row_of(column) {
        None => {
            if tableau.is_fixed(column) {
                Range::unbounded()
            } else {
                match tableau.nonbasic_position(column) {
                    Some(BoundDirection::Lower) => Range::new(cost - reduced[column], f64::INFINITY),
                    Some(BoundDirection::Upper) => Range::new(f64::NEG_INFINITY, cost - reduced[column]),
                    None => Range::new(cost, cost),
                }
            }
        },
        Some(row) => {
            let (mut decrease, mut increase) = (f64::NEG_INFINITY, f64::INFINITY);
            for k in 0..tableau.nr_columns() {
                if tableau.is_basic(k) || tableau.is_fixed(k) {
                    continue;
                }
                let entry = tableau.entry(row, k);
                if entry.abs() <= tolerance {
                    continue;
                }

                let ratio = reduced[k] / entry;
                match (tableau.nonbasic_position(k), entry > 0_f64) {
                    (Some(BoundDirection::Lower), true) | (Some(BoundDirection::Upper), false) => {
                        increase = increase.min(ratio);
                    },
                    (Some(BoundDirection::Lower), false) | (Some(BoundDirection::Upper), true) => {
                        decrease = decrease.max(ratio);
                    },
                    (None, _) => {
                        increase = increase.min(0_f64);
                        decrease = decrease.max(0_f64);
                    },
                }
            }

            Range::new(cost + decrease.min(0_f64), cost + increase.max(0_f64))
        },
    }
}

/// Range of the right-hand side of `row` for which the current basis stays feasible.
///
/// Changing `b_i` by `delta` moves the basic variables by `delta * B^-1 e_i`, which is the slack
/// column of the tableau.
fn rhs_range(tableau: &Tableau, row: usize, rhs: f64, tolerance: f64) -> Range {
    let slack = tableau.slack_column(row);

    let (mut decrease, mut increase) = (f64::NEG_INFINITY, f64::INFINITY);
    for i in 0..tableau.nr_rows() {
        let entry = tableau.entry(i, slack);
        if entry.abs() <= tolerance {
            continue;
        }

        let basic = tableau.basic_column(i);
        let value = tableau.value(basic);
        let bounds = tableau.bounds(basic);
        let to_lower = (bounds[BoundDirection::Lower] - value) / entry;
        let to_upper = (bounds[BoundDirection::Upper] - value) / entry;
        if entry > 0_f64 {
            increase = increase.min(to_upper);
            decrease = decrease.max(to_lower);
        } else {
            increase = increase.min(to_lower);
            decrease = decrease.max(to_upper);
        }
    }

    Range::new(rhs + decrease.min(0_f64), rhs + increase.max(0_f64))
}
