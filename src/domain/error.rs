// ============================================================
// Layer 3 - Domain Errors
// ============================================================
// Three families of failure live here:
//
//   WrongType   - a value of the wrong kind was handed to a
//                 question or answer (e.g. a plain answer given
//                 to a true/false question)
//   NotFound    - a correct answer was designated that does not
//                 exist; safe to catch and retry with another value
//   the rest    - data problems met while loading an exam
//                 (bad headers, missing file, unknown encoding,
//                 two true answers in a true/false question)
//
// Token exhaustion while loading is NOT an error and never
// shows up here.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the domain and loading layers
pub type Result<T> = std::result::Result<T, ExamError>;

#[derive(Debug, Error)]
pub enum ExamError {
    /// A value of the wrong kind was supplied
    #[error("wrong type: {0}")]
    WrongType(String),

    /// The requested correct answer is not among the current answers
    #[error("not found: {0}")]
    NotFound(String),

    /// A data row has more fields than the heading line
    #[error("unpaired separator in csv file")]
    UnpairedSeparator,

    /// The attribute selector names a field the file does not have
    #[error("{}", heading_mismatch_message(.expected, .found))]
    HeadingMismatch {
        expected: Vec<String>,
        found:    Vec<String>,
    },

    #[error("csv file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("no encoding found for file {}", .0.display())]
    NoEncoding(PathBuf),

    #[error("cannot read '{}': {source}", .path.display())]
    Unreadable {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),

    /// A true/false question may hold a single true answer
    #[error("a true/false question cannot have more than one true answer")]
    DuplicateTrueAnswer,
}

fn heading_mismatch_message(expected: &[String], found: &[String]) -> String {
    let expected_part = if expected.len() == 1 {
        "Expected heading field in csv file is "
    } else {
        "Expected heading fields in csv file are "
    };
    let found_part = if found.len() == 1 {
        ". Heading field found instead is "
    } else {
        ". Heading fields found, instead, are "
    };
    format!(
        "{expected_part}{}{found_part}{}",
        bracketed(expected),
        bracketed(found)
    )
}

/// `["a", "b"]` → `"<a> <b>"`
fn bracketed(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("<{n}>"))
        .collect::<Vec<_>>()
        .join(" ")
}
