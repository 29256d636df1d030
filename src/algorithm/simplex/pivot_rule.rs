//! # Pivot rules
//!
//! Strategies for moving from basis to basis.
use crate::algorithm::simplex::tableau::Tableau;
use crate::data::linear_program::elements::BoundDirection;

/// Deciding how to pivot.
///
/// During the Simplex method, one needs to decide how to move from basic solution to basic
/// solution. The pivot rule describes that behavior. Once the column has been selected, the row
/// is found by the ratio test, independent of the strategy.
pub(crate) trait PivotRule {
    /// Create a new instance.
    fn new() -> Self;

    /// Column selection rule for the primal Simplex method.
    ///
    /// # Return value
    ///
    /// The entering column and the bound it moves towards, or `None` if the current basis is
    /// optimal.
    fn select_primal_pivot_column(
        &mut self,
        tableau: &Tableau,
        reduced_costs: &[f64],
        tolerance: f64,
    ) -> Option<(usize, BoundDirection)>;
}

/// Simply pivot on the first column which has an improving relative cost.
pub(crate) struct FirstProfitable;
impl PivotRule for FirstProfitable {
    fn new() -> Self {
        Self
    }

    fn select_primal_pivot_column(
        &mut self,
        tableau: &Tableau,
        reduced_costs: &[f64],
        tolerance: f64,
    ) -> Option<(usize, BoundDirection)> {
        (0..tableau.nr_columns())
            .find_map(|column| {
                tableau.improving_direction(column, reduced_costs[column], tolerance)
                    .map(|direction| (column, direction))
            })
    }
}

/// Pivot on the column with the largest improvement per unit of change.
pub(crate) struct SteepestDescent;
impl PivotRule for SteepestDescent {
    fn new() -> Self {
        Self
    }

    fn select_primal_pivot_column(
        &mut self,
        tableau: &Tableau,
        reduced_costs: &[f64],
        tolerance: f64,
    ) -> Option<(usize, BoundDirection)> {
        let mut best: Option<(usize, BoundDirection)> = None;
        for column in 0..tableau.nr_columns() {
            if let Some(direction) = tableau.improving_direction(column, reduced_costs[column], tolerance) {
                let steeper = best.is_none_or(|(current, _)| {
                    reduced_costs[column].abs() > reduced_costs[current].abs()
                });
                if steeper {
                    best = Some((column, direction));
                }
            }
        }

        best
    }
}
