//! # CPLEX LP format
//!
//! Writes a `Model` in the text format that most solvers read, for inspection or to solve it
//! elsewhere.
use std::io::{self, Write};

use itertools::Itertools;

use crate::data::linear_program::elements::{BoundDirection, Objective};
use crate::data::linear_program::model::{Model, Variable, VariableId};

/// Number of terms written on a single line.
const TERMS_PER_LINE: usize = 8;

/// Write a model in CPLEX LP format.
///
/// Characters that the format doesn't allow in names, such as whitespace, colons and operators,
/// are replaced by underscores, and names that would start like a number get an underscore prefix. Variables with the default bounds
/// `[0, inf)` are not listed in the bounds section.
///
/// # Errors
///
/// If writing fails.
pub fn write_lp(model: &Model, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "\\ Model {}", sanitize(model.name()))?;
    writeln!(writer, "{}", match model.objective() {
        Objective::Maximize => "Maximize",
        Objective::Minimize => "Minimize",
    })?;
    let objective = model.variable_ids()
        .zip(model.variables())
        .filter(|(_, variable)| variable.cost != 0_f64)
        .map(|(id, variable)| (id, variable.cost))
        .collect::<Vec<_>>();
    write!(writer, " obj:")?;
    write_terms(model, &objective, writer)?;
    writeln!(writer)?;

    writeln!(writer, "Subject To")?;
    for constraint in model.constraints() {
        write!(writer, " {}:", sanitize(&constraint.name))?;
        if constraint.coefficients.is_empty() {
            // An empty row still needs a term
            if let Some(first) = model.variables().first() {
                write!(writer, " 0 {}", sanitize(&first.name))?;
            }
        } else {
            write_terms(model, &constraint.coefficients, writer)?;
        }
        writeln!(writer, " {} {}", constraint.relation.symbol(), constraint.rhs)?;
    }

    let bounds = model.variables().iter().filter_map(bound_line).collect::<Vec<_>>();
    if !bounds.is_empty() {
        writeln!(writer, "Bounds")?;
        for line in bounds {
            writeln!(writer, " {line}")?;
        }
    }

    writeln!(writer, "End")
}

/// Render a model in CPLEX LP format.
#[must_use]
pub fn to_lp_string(model: &Model) -> String {
    let mut buffer = Vec::new();
    // Writing to a vector doesn't fail
    let _ = write_lp(model, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

fn write_terms(model: &Model, terms: &[(VariableId, f64)], writer: &mut impl Write) -> io::Result<()> {
    for (chunk_index, chunk) in terms.chunks(TERMS_PER_LINE).enumerate() {
        if chunk_index > 0 {
            write!(writer, "\n   ")?;
        }
        let text = chunk.iter()
            .enumerate()
            .map(|(i, &(variable, coefficient))| {
                let name = sanitize(&model.variable(variable).name);
                let sign = if coefficient < 0_f64 { "-" } else if chunk_index + i > 0 { "+" } else { "" };
                let magnitude = coefficient.abs();
                let term = if magnitude == 1_f64 { name } else { format!("{magnitude} {name}") };
                if sign.is_empty() { term } else { format!("{sign} {term}") }
            })
            .join(" ");
        write!(writer, " {text}")?;
    }

    Ok(())
}

fn bound_line(variable: &Variable) -> Option<String> {
    let name = sanitize(&variable.name);
    let (lower, upper) = (variable.bounds[BoundDirection::Lower], variable.bounds[BoundDirection::Upper]);

    match (lower.is_finite(), upper.is_finite()) {
        (true, true) if lower == upper => Some(format!("{name} = {lower}")),
        (true, true) => Some(format!("{lower} <= {name} <= {upper}")),
        (true, false) if lower == 0_f64 => None,
        (true, false) => Some(format!("{name} >= {lower}")),
        (false, true) => Some(format!("-inf <= {name} <= {upper}")),
        (false, false) => Some(format!("{name} free")),
    }
}

/// Characters other than ASCII letters and digits that may appear in a name.
const NAME_SYMBOLS: &str = "!\"#$%&(),.;?@_`'{}|~";

fn sanitize(name: &str) -> String {
    let mut sanitized = name.chars()
        .map(|character| {
            if character.is_ascii_alphanumeric() || NAME_SYMBOLS.contains(character) {
                character
            } else {
                '_'
            }
        })
        .collect::<String>();
    // Names can't start like a number
    if sanitized.starts_with(|character: char| character.is_ascii_digit() || character == '.') {
        sanitized.insert(0, '_');
    }

    sanitized
}
