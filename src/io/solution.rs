//! # Solution files
//!
//! A comment line with the objective value, followed by one `name value` line per variable.
use std::io::{self, Write};

use crate::data::linear_program::model::Model;
use crate::data::linear_program::solution::Solution;

/// Write the values of a solution.
///
/// # Errors
///
/// If writing fails.
pub fn write_solution(model: &Model, solution: &Solution, writer: &mut impl Write) -> io::Result<()> {
    debug_assert_eq!(model.nr_variables(), solution.values().len());

    writeln!(writer, "# Objective value = {}", solution.objective_value())?;
    for (variable, value) in model.variables().iter().zip(solution.values()) {
        writeln!(writer, "{} {}", variable.name, value)?;
    }

    Ok(())
}
