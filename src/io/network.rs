//! # Network files
//!
//! One arc per line, in fixed width columns:
//!
//! ```text
//! Honolulu       Los Angeles    2557
//! ```
//!
//! The first 15 characters hold the label of the source node, the next 15 the label of the
//! destination node, and the rest of the line a non-negative integer length. Surrounding
//! whitespace is ignored in all three fields. Blank lines are skipped.
use std::ops::Range;

use crate::data::network::{ArcRecord, Graph};
use crate::io::error::{FileLocation, ImportError};

/// Character ranges of the source and destination labels.
const FIELDS: [Range<usize>; 2] = [0..15, 15..30];

/// Parse the contents of a network file into a graph.
///
/// The node set consists of all labels that appear in the file, numbered in order of first
/// appearance.
///
/// # Errors
///
/// If a line can't be parsed.
pub fn parse(text: &str) -> Result<Graph, ImportError> {
    let records = parse_records(text)?;
    Ok(Graph::from_records(&records))
}

/// Parse the contents of a network file into arc records, in file order.
///
/// # Errors
///
/// If a line is too short, if a label is empty, or if the length isn't a non-negative integer.
pub fn parse_records(text: &str) -> Result<Vec<ArcRecord>, ImportError> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .filter(|(_, line)| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}

fn parse_line(location: FileLocation) -> Result<ArcRecord, ImportError> {
    let (_, line) = location;
    // Columns count characters, labels may contain multi-byte ones
    let offset = |position: usize| line.char_indices().nth(position).map(|(offset, _)| offset);
    let (Some(first), Some(second)) = (offset(FIELDS[1].start), offset(FIELDS[1].end)) else {
        return Err(ImportError::parse("Line is too short.", location));
    };

    let source = line[..first].trim();
    let destination = line[first..second].trim();
    let length = line[second..].trim();

    if source.is_empty() {
        return Err(ImportError::parse("Empty source label.", location));
    }
    if destination.is_empty() {
        return Err(ImportError::parse("Empty destination label.", location));
    }
    let length = length.parse::<u64>().map_err(|error| {
        ImportError::parse(format!("Invalid arc length \"{length}\": {error}."), location)
    })?;

    Ok(ArcRecord::new(source, destination, length))
}
