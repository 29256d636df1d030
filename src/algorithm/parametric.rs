//! # Parametric shortage penalty
//!
//! A transportation problem between facilities with limited capacity and customers with demand,
//! where demand may go unmet at a price. Starting without a price on shortage, the loop repeatedly
//! raises the penalty just beyond the upper end of the range in which the current basis stays
//! optimal, which forces a basis change that reduces shortage. It stops once no shortage is left.
use itertools::iproduct;
use thiserror::Error;
use tracing::{debug, info};

use crate::algorithm::{Solver, SolveError};
use crate::config::ParametricConfig;
use crate::data::linear_program::elements::ConstraintRelation;
use crate::data::linear_program::expression::LinearExpression;
use crate::data::linear_program::model::{Model, VariableId};
use crate::error::BuildError;

/// Demand, capacity and unit shipping costs of a facility location problem.
#[derive(Clone, Debug, PartialEq)]
pub struct FacilityInstance {
    demand: Vec<f64>,
    capacity: Vec<f64>,
    /// Indexed by facility, then by customer.
    shipping_cost: Vec<Vec<f64>>,
}

impl FacilityInstance {
    /// Create a new instance.
    ///
    /// # Arguments
    ///
    /// * `demand`: Demand per customer.
    /// * `capacity`: Capacity per facility.
    /// * `shipping_cost`: Cost of shipping one unit, one row per facility with one value per
    /// customer.
    ///
    /// # Errors
    ///
    /// `BuildError::Instance` if the dimensions don't agree, or if a value is negative or not
    /// finite.
    pub fn new(
        demand: Vec<f64>,
        capacity: Vec<f64>,
        shipping_cost: Vec<Vec<f64>>,
    ) -> Result<Self, BuildError> {
        if shipping_cost.len() != capacity.len() {
            return Err(BuildError::Instance(format!(
                "{} facilities have a capacity but {} have shipping costs",
                capacity.len(),
                shipping_cost.len(),
            )));
        }
        if let Some((facility, row)) = shipping_cost.iter().enumerate()
            .find(|(_, row)| row.len() != demand.len()) {
            return Err(BuildError::Instance(format!(
                "facility {facility} has {} shipping costs, expected one for each of {} customers",
                row.len(),
                demand.len(),
            )));
        }

        let values = demand.iter()
            .map(|value| ("demand", value))
            .chain(capacity.iter().map(|value| ("capacity", value)))
            .chain(shipping_cost.iter().flatten().map(|value| ("shipping cost", value)));
        for (kind, &value) in values {
            if !value.is_finite() || value < 0_f64 {
                return Err(BuildError::Instance(format!("{kind} {value} is not a finite, non-negative number")));
            }
        }

        Ok(Self { demand, capacity, shipping_cost })
    }

    /// Four customers and five facilities with enough capacity to meet all demand.
    #[must_use]
    pub fn example() -> Self {
        Self {
            demand: vec![15_f64, 18_f64, 14_f64, 20_f64],
            capacity: vec![20_f64, 22_f64, 17_f64, 19_f64, 18_f64],
            shipping_cost: vec![
                vec![4000_f64, 2500_f64, 1200_f64, 2200_f64],
                vec![2000_f64, 2600_f64, 1800_f64, 2600_f64],
                vec![3000_f64, 3400_f64, 2600_f64, 3100_f64],
                vec![2500_f64, 3000_f64, 4100_f64, 3700_f64],
                vec![4500_f64, 4000_f64, 3000_f64, 3200_f64],
            ],
        }
    }

    /// Number of facilities.
    #[must_use]
    pub fn nr_facilities(&self) -> usize {
        self.capacity.len()
    }

    /// Number of customers.
    #[must_use]
    pub fn nr_customers(&self) -> usize {
        self.demand.len()
    }

    /// Demand per customer.
    #[must_use]
    pub fn demand(&self) -> &[f64] {
        &self.demand
    }

    /// Capacity per facility.
    #[must_use]
    pub fn capacity(&self) -> &[f64] {
        &self.capacity
    }
}

/// The linear program of a facility instance, with handles to its variables.
#[derive(Clone, Debug)]
pub struct FacilityModel {
    model: Model,
    /// Indexed by facility, then by customer.
    ship: Vec<Vec<VariableId>>,
    shortage: Vec<VariableId>,
    total_shortage: VariableId,
    total_shipping_cost: VariableId,
}

impl FacilityModel {
    /// Build the model, with a shortage penalty of zero.
    #[must_use]
    pub fn new(instance: &FacilityInstance) -> Self {
        let mut model = Model::new("facility");

        let ship = (0..instance.nr_facilities())
            .map(|i| {
                (0..instance.nr_customers())
                    .map(|j| model.add_variable(format!("ship.{i}.{j}"), 0_f64, f64::INFINITY, 0_f64))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        let shortage = (0..instance.nr_customers())
            .map(|j| model.add_variable(format!("shortage.{j}"), 0_f64, f64::INFINITY, 0_f64))
            .collect::<Vec<_>>();
        let total_shortage = model.add_variable("TotalShortage", f64::NEG_INFINITY, f64::INFINITY, 0_f64);
        let total_shipping_cost = model.add_variable("TotalShippingCost", f64::NEG_INFINITY, f64::INFINITY, 1_f64);

        for (j, &demand) in instance.demand.iter().enumerate() {
            let shipped = ship.iter().map(|row| row[j]).sum::<LinearExpression>();
            model.add_constraint(format!("demand.{j}"), shipped + shortage[j], ConstraintRelation::Equal, demand);
        }
        for (i, &capacity) in instance.capacity.iter().enumerate() {
            let shipped = ship[i].iter().copied().sum::<LinearExpression>();
            model.add_constraint(format!("capacity.{i}"), shipped, ConstraintRelation::Less, capacity);
        }
        let shortages = shortage.iter().copied().sum::<LinearExpression>();
        model.add_constraint("total_shortage", shortages - total_shortage, ConstraintRelation::Equal, 0_f64);
        let costs = iproduct!(0..instance.nr_facilities(), 0..instance.nr_customers())
            .map(|(i, j)| (ship[i][j], instance.shipping_cost[i][j]))
            .collect::<LinearExpression>();
        model.add_constraint("total_shipping", costs - total_shipping_cost, ConstraintRelation::Equal, 0_f64);

        debug!(
            nr_variables = model.nr_variables(),
            nr_constraints = model.nr_constraints(),
            "built facility model",
        );
        Self { model, ship, shortage, total_shortage, total_shipping_cost }
    }

    /// The model, with the current penalty.
    #[must_use]
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Change the objective coefficient of `TotalShortage`.
    pub fn set_penalty(&mut self, penalty: f64) {
        self.model.set_objective_coefficient(self.total_shortage, penalty);
    }

    /// Current objective coefficient of the total shortage.
    #[must_use]
    pub fn penalty(&self) -> f64 {
        self.model.variable(self.total_shortage).cost
    }
}

/// One solve of the parametric loop.
#[derive(Clone, Debug, PartialEq)]
pub struct Iteration {
    /// Objective coefficient of the total shortage during this solve.
    pub penalty: f64,
    /// Value of `TotalShortage`.
    pub total_shortage: f64,
    /// Value of `TotalShippingCost`.
    pub total_shipping_cost: f64,
    /// Optimal objective value of this solve.
    pub objective_value: f64,
}

/// Result of a successful parametric loop.
#[derive(Clone, Debug, PartialEq)]
pub struct ShortageOutcome {
    /// All solves, in order.
    pub iterations: Vec<Iteration>,
    /// Final amounts shipped, indexed by facility, then by customer.
    pub shipments: Vec<Vec<f64>>,
    /// Final unmet demand per customer.
    pub shortages: Vec<f64>,
    /// Value of `TotalShortage` in the final solve.
    pub total_shortage: f64,
    /// Value of `TotalShippingCost` in the final solve.
    pub total_shipping_cost: f64,
}

/// The parametric loop didn't end with zero shortage.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParametricError {
    /// A solve failed.
    #[error(transparent)]
    Solve(#[from] SolveError),
    /// Shortage remained after the maximum number of solves.
    #[error("shortage remained after {iterations} iterations")]
    ExceededIterations {
        /// The maximum number of solves.
        iterations: usize,
    },
    /// No penalty makes the remaining shortage smaller, for example because total capacity is
    /// below total demand.
    #[error("a shortage of {shortage} remains at any penalty")]
    IrreducibleShortage {
        /// Total shortage in the last solve.
        shortage: f64,
    },
}

/// Drives the shortage penalty up until the optimal solution has no shortage.
#[derive(Clone, Debug, Default)]
pub struct ParametricShortageSolver<S> {
    solver: S,
    config: ParametricConfig,
}

impl<S: Solver> ParametricShortageSolver<S> {
    /// Create a new instance.
    pub fn new(solver: S, config: ParametricConfig) -> Self {
        Self { solver, config }
    }

    /// Run the loop on a fresh model of the instance.
    ///
    /// # Errors
    ///
    /// If a solve fails, if the iteration limit is reached, or if the shortage can't be reduced
    /// further at any penalty.
    pub fn solve(&self, instance: &FacilityInstance) -> Result<ShortageOutcome, ParametricError> {
        let mut facility = FacilityModel::new(instance);
        let mut iterations = Vec::new();

        while iterations.len() < self.config.max_iterations {
            let solution = self.solver.solve(facility.model())?;
            let total_shortage = solution.value(facility.total_shortage);
            let total_shipping_cost = solution.value(facility.total_shipping_cost);
            iterations.push(Iteration {
                penalty: facility.penalty(),
                total_shortage,
                total_shipping_cost,
                objective_value: solution.objective_value(),
            });
            info!(
                iteration = iterations.len(),
                penalty = facility.penalty(),
                total_shortage,
                total_shipping_cost,
                "solved",
            );

            if total_shortage < self.config.epsilon {
                let shipments = facility.ship.iter()
                    .map(|row| row.iter().map(|&variable| solution.value(variable)).collect())
                    .collect();
                let shortages = facility.shortage.iter().map(|&variable| solution.value(variable)).collect();

                return Ok(ShortageOutcome {
                    iterations,
                    shipments,
                    shortages,
                    total_shortage,
                    total_shipping_cost,
                });
            }

            let bound = solution.objective_range(facility.total_shortage).upper;
            if bound.is_infinite() {
                return Err(ParametricError::IrreducibleShortage { shortage: total_shortage });
            }
            facility.set_penalty((1_f64 + self.config.epsilon) * bound);
        }

        Err(ParametricError::ExceededIterations { iterations: self.config.max_iterations })
    }
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use crate::algorithm::parametric::{FacilityInstance, FacilityModel, ParametricError, ParametricShortageSolver};
    use crate::algorithm::simplex::Simplex;
    use crate::config::ParametricConfig;
    use crate::error::BuildError;

    #[test]
    fn instance_validation() {
        assert!(matches!(
            FacilityInstance::new(vec![1_f64], vec![1_f64, 2_f64], vec![vec![1_f64]]),
            Err(BuildError::Instance(_)),
        ));
        assert!(matches!(
            FacilityInstance::new(vec![1_f64, 2_f64], vec![1_f64], vec![vec![1_f64]]),
            Err(BuildError::Instance(_)),
        ));
        assert!(matches!(
            FacilityInstance::new(vec![-1_f64], vec![1_f64], vec![vec![1_f64]]),
            Err(BuildError::Instance(_)),
        ));
        assert!(matches!(
            FacilityInstance::new(vec![1_f64], vec![1_f64], vec![vec![f64::NAN]]),
            Err(BuildError::Instance(_)),
        ));
        assert!(FacilityInstance::new(vec![1_f64], vec![1_f64], vec![vec![1_f64]]).is_ok());
    }

    #[test]
    fn model_shape() {
        let facility = FacilityModel::new(&FacilityInstance::example());
        let model = facility.model();

        assert_eq!(model.nr_variables(), 5 * 4 + 4 + 2);
        assert_eq!(model.nr_constraints(), 4 + 5 + 2);
        assert_eq!(model.variables()[7].name, "ship.1.3");
        assert_eq!(model.variables()[20].name, "shortage.0");
        assert_eq!(model.constraints()[4].name, "capacity.0");
        assert_eq!(model.constraints()[10].coefficients.len(), 5 * 4 + 1);
        assert_eq!(facility.penalty(), 0_f64);
    }

    #[test]
    fn example_reaches_zero_shortage() {
        let instance = FacilityInstance::example();
        let outcome = ParametricShortageSolver::new(Simplex::default(), ParametricConfig::default())
            .solve(&instance)
            .unwrap();

        assert!(outcome.iterations.len() <= 10);
        assert_eq!(outcome.iterations[0].penalty, 0_f64);
        assert!(outcome.iterations.windows(2).all(|pair| pair[0].penalty < pair[1].penalty));
        assert!(outcome.total_shortage < 1e-4);
        assert_abs_diff_eq!(outcome.total_shipping_cost, 153_900_f64, epsilon = 1e-6);
        for (j, demand) in instance.demand().iter().enumerate() {
            let shipped = outcome.shipments.iter().map(|row| row[j]).sum::<f64>();
            assert_abs_diff_eq!(shipped + outcome.shortages[j], *demand, epsilon = 1e-6);
        }
    }

    #[test]
    fn irreducible_shortage() {
        let instance = FacilityInstance::new(vec![10_f64], vec![5_f64], vec![vec![1_f64]]).unwrap();
        let result = ParametricShortageSolver::new(Simplex::default(), ParametricConfig::default())
            .solve(&instance);

        match result {
            Err(ParametricError::IrreducibleShortage { shortage }) => {
                assert_abs_diff_eq!(shortage, 5_f64, epsilon = 1e-9);
            },
            other => panic!("expected an irreducible shortage, got {other:?}"),
        }
    }

    #[test]
    fn iteration_limit() {
        let config = ParametricConfig { max_iterations: 1, ..ParametricConfig::default() };
        let result = ParametricShortageSolver::new(Simplex::default(), config)
            .solve(&FacilityInstance::example());

        assert_eq!(result, Err(ParametricError::ExceededIterations { iterations: 1 }));
    }
}
