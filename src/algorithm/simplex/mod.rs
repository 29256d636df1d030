//! # The Simplex algorithm
//!
//! A dense, bounded-variable, two-phase primal Simplex method. Phase one minimizes the sum of
//! artificial variables to find a basic feasible solution; phase two optimizes the model's
//! objective from there. The optimal tableau is then read for duals and sensitivity ranges.
//!
//! Every call to `solve` starts from scratch, so the result only depends on the model.
use tracing::{debug, warn};

use crate::algorithm::{Solver, SolveError};
use crate::algorithm::simplex::pivot_rule::{FirstProfitable, PivotRule, SteepestDescent};
use crate::algorithm::simplex::tableau::{Step, Tableau};
use crate::config::{PivotRuleKind, SimplexConfig};
use crate::data::linear_program::model::Model;
use crate::data::linear_program::solution::Solution;

mod pivot_rule;
mod sensitivity;
mod tableau;

/// Reference implementation of the `Solver` contract.
#[derive(Clone, Debug, Default)]
pub struct Simplex {
    config: SimplexConfig,
}

impl Simplex {
    /// Create a solver with the given tolerances and limits.
    #[must_use]
    pub fn new(config: SimplexConfig) -> Self {
        Self { config }
    }

    /// Tolerances and limits in use.
    #[must_use]
    pub fn config(&self) -> &SimplexConfig {
        &self.config
    }

    fn solve_with<PR: PivotRule>(&self, model: &Model) -> Result<Solution, SolveError> {
        let mut tableau = Tableau::new(model);
        let rhs = model.constraints().iter().map(|constraint| constraint.rhs).collect::<Vec<_>>();
        let mut nr_iterations = 0;

        if tableau.nr_artificial() > 0 {
            let costs = tableau.phase_one_costs();
            match primal::<PR>(&mut tableau, &costs, &self.config, &mut nr_iterations, model.name())? {
                PhaseResult::Optimal => {},
                PhaseResult::Unbounded => return Err(SolveError::Internal(
                    "the sum of artificial variables is bounded from below".to_string(),
                )),
            }
            tableau.refresh_basic_values(&rhs);

            let infeasibility = tableau.artificial_infeasibility();
            let scale = rhs.iter().fold(1_f64, |largest, b| largest.max(b.abs()));
            debug!(model = model.name(), infeasibility, nr_iterations, "phase one done");
            if infeasibility > self.config.feasibility_tolerance * scale {
                return Err(SolveError::Infeasible { model: model.name().to_string() });
            }
            tableau.fix_artificials();
        }

        let costs = tableau.phase_two_costs(model);
        match primal::<PR>(&mut tableau, &costs, &self.config, &mut nr_iterations, model.name())? {
            PhaseResult::Optimal => {},
            PhaseResult::Unbounded => return Err(SolveError::Unbounded { model: model.name().to_string() }),
        }
        tableau.refresh_basic_values(&rhs);
        debug!(model = model.name(), nr_iterations, "phase two done");

        Ok(sensitivity::solution(model, &tableau, &costs, nr_iterations, self.config.pivot_tolerance))
    }
}

impl Solver for Simplex {
    fn solve(&self, model: &Model) -> Result<Solution, SolveError> {
        debug!(
            model = model.name(),
            nr_variables = model.nr_variables(),
            nr_constraints = model.nr_constraints(),
            "solving",
        );

        match self.config.pivot_rule {
            PivotRuleKind::FirstProfitable => self.solve_with::<FirstProfitable>(model),
            PivotRuleKind::SteepestDescent => self.solve_with::<SteepestDescent>(model),
        }
    }
}

enum PhaseResult {
    Optimal,
    Unbounded,
}

/// Reduces the cost of the basic feasible solution to the minimum.
///
/// The tableau should be primal feasible when this method is called.
///
/// # Errors
///
/// When the total number of iterations exceeds the configured maximum.
fn primal<PR: PivotRule>(
    tableau: &mut Tableau,
    costs: &[f64],
    config: &SimplexConfig,
    nr_iterations: &mut usize,
    model: &str,
) -> Result<PhaseResult, SolveError> {
    let mut rule = PR::new();
    loop {
        let reduced = tableau.reduced_costs(costs);
        let Some((column, direction)) = rule.select_primal_pivot_column(
            tableau,
            &reduced,
            config.optimality_tolerance,
        ) else {
            break Ok(PhaseResult::Optimal);
        };

        if *nr_iterations >= config.max_iterations {
            warn!(model, iterations = config.max_iterations, "iteration limit reached");
            break Err(SolveError::IterationLimit {
                model: model.to_string(),
                iterations: config.max_iterations,
            });
        }
        *nr_iterations += 1;

        match tableau.ratio_test(column, direction, config.pivot_tolerance) {
            Step::Flip { length } => tableau.flip(column, direction, length),
            Step::Pivot { row, length, bound } => {
                tableau.bring_into_basis(column, direction, row, length, bound);
            },
            Step::Unbounded => break Ok(PhaseResult::Unbounded),
        }
    }
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use crate::algorithm::{Solver, SolveError};
    use crate::algorithm::simplex::Simplex;
    use crate::config::{PivotRuleKind, SimplexConfig};
    use crate::data::linear_program::elements::{ConstraintRelation, Objective};
    use crate::data::linear_program::model::Model;

    /// Maximize `3x + 2y` subject to `x + y <= 4`, `x + 3y <= 7` and `x <= 3`.
    fn small() -> Model {
        let mut model = Model::new("small");
        model.set_objective(Objective::Maximize);
        let x = model.add_variable("x", 0_f64, f64::INFINITY, 3_f64);
        let y = model.add_variable("y", 0_f64, f64::INFINITY, 2_f64);
        model.add_constraint("c1", x + y, ConstraintRelation::Less, 4_f64);
        model.add_constraint("c2", x + 3_f64 * y, ConstraintRelation::Less, 7_f64);
        model.add_constraint("c3", x, ConstraintRelation::Less, 3_f64);
        model
    }

    #[test]
    fn small_maximization() {
        let model = small();
        let solution = Simplex::default().solve(&model).unwrap();

        assert_abs_diff_eq!(solution.objective_value(), 11_f64, epsilon = 1e-9);
        assert_abs_diff_eq!(solution.values()[0], 3_f64, epsilon = 1e-9);
        assert_abs_diff_eq!(solution.values()[1], 1_f64, epsilon = 1e-9);

        let duals = solution.duals();
        assert_abs_diff_eq!(duals[0], 2_f64, epsilon = 1e-9);
        assert_abs_diff_eq!(duals[1], 0_f64, epsilon = 1e-9);
        assert_abs_diff_eq!(duals[2], 1_f64, epsilon = 1e-9);
    }

    #[test]
    fn small_ranges() {
        let model = small();
        let solution = Simplex::default().solve(&model).unwrap();
        let x = solution.objective_ranges[0];
        assert_abs_diff_eq!(x.lower, 2_f64, epsilon = 1e-9);
        assert_eq!(x.upper, f64::INFINITY);
        let y = solution.objective_ranges[1];
        assert_abs_diff_eq!(y.lower, 0_f64, epsilon = 1e-9);
        assert_abs_diff_eq!(y.upper, 3_f64, epsilon = 1e-9);

        let c1 = solution.rhs_ranges[0];
        assert_abs_diff_eq!(c1.lower, 3_f64, epsilon = 1e-9);
        assert_abs_diff_eq!(c1.upper, 13_f64 / 3_f64, epsilon = 1e-9);
        let c2 = solution.rhs_ranges[1];
        assert_abs_diff_eq!(c2.lower, 6_f64, epsilon = 1e-9);
        assert_eq!(c2.upper, f64::INFINITY);
        let c3 = solution.rhs_ranges[2];
        assert_abs_diff_eq!(c3.lower, 2.5_f64, epsilon = 1e-9);
        assert_abs_diff_eq!(c3.upper, 4_f64, epsilon = 1e-9);

        assert_abs_diff_eq!(solution.slacks[1], 1_f64, epsilon = 1e-9);
    }

    #[test]
    fn free_variable() {
        let mut model = Model::new("free");
        let x = model.add_variable("x", f64::NEG_INFINITY, f64::INFINITY, 1_f64);
        model.add_constraint("lower", x, ConstraintRelation::Greater, -5_f64);

        let solution = Simplex::default().solve(&model).unwrap();
        assert_abs_diff_eq!(solution.objective_value(), -5_f64, epsilon = 1e-9);
        assert_abs_diff_eq!(solution.duals()[0], 1_f64, epsilon = 1e-9);

        let range = solution.objective_ranges[0];
        assert_abs_diff_eq!(range.lower, 0_f64, epsilon = 1e-9);
        assert_eq!(range.upper, f64::INFINITY);
        let range = solution.rhs_ranges[0];
        assert_eq!((range.lower, range.upper), (f64::NEG_INFINITY, f64::INFINITY));
    }

    #[test]
    fn infeasible() {
        let mut model = Model::new("infeasible");
        let x = model.add_variable("x", 0_f64, 1_f64, 1_f64);
        model.add_constraint("too_much", x, ConstraintRelation::Greater, 2_f64);

        assert_eq!(
            Simplex::default().solve(&model),
            Err(SolveError::Infeasible { model: "infeasible".to_string() }),
        );
    }

    #[test]
    fn unbounded() {
        let mut model = Model::new("unbounded");
        model.set_objective(Objective::Maximize);
        let x = model.add_variable("x", 0_f64, f64::INFINITY, 1_f64);
        model.add_constraint("at_least", x, ConstraintRelation::Greater, 1_f64);

        assert_eq!(
            Simplex::default().solve(&model),
            Err(SolveError::Unbounded { model: "unbounded".to_string() }),
        );
    }

    #[test]
    fn iteration_limit() {
        let config = SimplexConfig { max_iterations: 1, ..SimplexConfig::default() };
        let result = Simplex::new(config).solve(&small());

        assert_eq!(
            result,
            Err(SolveError::IterationLimit { model: "small".to_string(), iterations: 1 }),
        );
    }

    #[test]
    fn pivot_rules_agree() {
        let model = small();
        let config = SimplexConfig { pivot_rule: PivotRuleKind::SteepestDescent, ..SimplexConfig::default() };
        let steepest = Simplex::new(config).solve(&model).unwrap();
        let first = Simplex::default().solve(&model).unwrap();

        assert_abs_diff_eq!(steepest.objective_value(), first.objective_value(), epsilon = 1e-9);
        assert_abs_diff_eq!(steepest.duals()[0], first.duals()[0], epsilon = 1e-9);
    }

    #[test]
    fn resolve_after_change() {
        let mut model = small();
        let first = Simplex::default().solve(&model).unwrap();
        let again = Simplex::default().solve(&model).unwrap();
        assert_eq!(first, again);

        // Within the range of c3, the objective changes by the dual
        let c3 = model.constraint_ids().last().unwrap();
        model.set_rhs(c3, 3.5_f64);
        let changed = Simplex::default().solve(&model).unwrap();
        assert_abs_diff_eq!(changed.objective_value(), 11.5_f64, epsilon = 1e-9);
    }
}
