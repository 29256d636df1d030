//! # Error reporting for reading of network files
//!
//! Problems encountered while reading a file from disk, or while parsing its contents.
use std::io;

use thiserror::Error;

/// An `ImportError` is created when an error was encountered during IO or parsing.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The file to read isn't found, or the reading of the file couldn't start or was interrupted.
    #[error("could not read network file: {0}")]
    Io(#[from] io::Error),
    /// A line could not be parsed into an arc.
    ///
    /// A syntactically correct file always produces a graph; this variant never describes a
    /// problem with the graph itself.
    #[error("{description}\n\tCaused at line\t{line_number}:\t{line}")]
    Parse {
        /// What's wrong with the line.
        description: String,
        /// One-based line number in the file.
        line_number: usize,
        /// Contents of the line.
        line: String,
    },
}

impl ImportError {
    /// Create a parse error that references a line of the file.
    pub(crate) fn parse(description: impl Into<String>, (line_number, line): FileLocation) -> Self {
        Self::Parse {
            description: description.into(),
            line_number,
            line: line.to_string(),
        }
    }
}

/// A `FileLocation` references a line in the file by its one-based line number, together with the
/// line itself.
pub(crate) type FileLocation<'a> = (usize, &'a str);
