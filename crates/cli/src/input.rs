//! Input collaborators: where the patient count comes from
//!
//! The count is validated here, before any patient reaches the clinic.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use clinic_core::application::worker::constants::{MAX_PATIENTS, MIN_PATIENTS};

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Incorrect value for patients number! Available values are [1, 100].")]
    InvalidCount,

    #[error("Can't find file with name {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Failed to read patient count: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the patient population comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopulationSource {
    /// Ask on stdin
    Prompt,
    /// Count given on the command line
    Argument(String),
    /// First integer of a file
    File(PathBuf),
    /// Random count
    Generated,
}

/// Parse and range-check a patient count
pub fn parse_count(raw: &str) -> Result<usize, InputError> {
    let count: usize = raw.trim().parse().map_err(|_| InputError::InvalidCount)?;
    if !(MIN_PATIENTS..=MAX_PATIENTS).contains(&count) {
        return Err(InputError::InvalidCount);
    }
    Ok(count)
}

/// Read the count as the first whitespace-separated token of `path`
pub fn read_count_from_file(path: &Path) -> Result<usize, InputError> {
    let contents =
        std::fs::read_to_string(path).map_err(|_| InputError::MissingFile(path.to_path_buf()))?;
    let first = contents.split_whitespace().next().unwrap_or_default();
    parse_count(first)
}

/// Prompt on `output` and read one line from `input`
pub fn prompt_count(mut input: impl BufRead, mut output: impl Write) -> Result<usize, InputError> {
    write!(output, "Enter number of patients:")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    parse_count(&line)
}
