//! # Parametric shortage penalty on a facility location model
use approx::assert_abs_diff_eq;

use lp_network::algorithm::parametric::{FacilityInstance, ParametricError, ParametricShortageSolver};
use lp_network::algorithm::simplex::Simplex;
use lp_network::config::ParametricConfig;
use lp_network::error::BuildError;

#[test]
fn example() {
    let instance = FacilityInstance::example();
    let outcome = ParametricShortageSolver::new(Simplex::default(), ParametricConfig::default())
        .solve(&instance)
        .unwrap();

    assert!(outcome.iterations.len() <= 10);
    assert!(outcome.total_shortage < 1e-4);
    assert_abs_diff_eq!(outcome.shortages.iter().sum::<f64>(), outcome.total_shortage, epsilon = 1e-6);

    for (j, &demand) in instance.demand().iter().enumerate() {
        let shipped = outcome.shipments.iter().map(|row| row[j]).sum::<f64>();
        assert_abs_diff_eq!(shipped + outcome.shortages[j], demand, epsilon = 1e-6);
    }
    for (row, &capacity) in outcome.shipments.iter().zip(instance.capacity()) {
        assert!(row.iter().sum::<f64>() <= capacity + 1e-6);
        assert!(row.iter().all(|&amount| amount >= -1e-9));
    }

    // Shortage only decreases as its penalty rises
    for pair in outcome.iterations.windows(2) {
        assert!(pair[1].penalty > pair[0].penalty);
        assert!(pair[1].total_shortage <= pair[0].total_shortage + 1e-6);
    }
    let last = outcome.iterations.last().unwrap();
    assert_abs_diff_eq!(last.total_shipping_cost, outcome.total_shipping_cost);
}

#[test]
fn not_enough_capacity() {
    let instance = FacilityInstance::new(
        vec![10_f64, 10_f64],
        vec![6_f64, 6_f64],
        vec![vec![1_f64, 2_f64], vec![2_f64, 1_f64]],
    ).unwrap();
    let result = ParametricShortageSolver::new(Simplex::default(), ParametricConfig::default())
        .solve(&instance);

    match result {
        Err(ParametricError::IrreducibleShortage { shortage }) => assert_abs_diff_eq!(shortage, 8_f64, epsilon = 1e-6),
        other => panic!("expected an irreducible shortage, got {other:?}"),
    }
}

#[test]
fn malformed_instance() {
    let result = FacilityInstance::new(vec![1_f64, 2_f64], vec![3_f64], vec![vec![1_f64]]);
    assert!(matches!(result, Err(BuildError::Instance(_))));
}
