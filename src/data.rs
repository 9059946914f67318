//! Loading captures from text files.
//!
//! The recorder's binary format is handled by an external reader; the CLI
//! works with an already-decoded plain-text form instead:
//!
//! ```text
//! # any comment
//! sample_rate=24000000
//! initial_level=1
//! begin_time=0.0
//! end_time=0.5
//! 0.000001500
//! 0.000010250
//! ```
//!
//! `key=value` header lines may appear in any order before the timestamps;
//! `sample_rate` and `initial_level` are required, `begin_time` defaults to
//! 0 and `end_time` to the last timestamp. Lines starting with `#` and
//! blank lines are skipped. Timestamps are ascending seconds, one per line.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::types::{Capture, Level};

/// Errors that can occur while loading a capture file.
#[derive(Debug)]
pub enum DataError {
    /// IO error reading the file.
    Io(io::Error),

    /// A line that does not parse, with its 1-based line number.
    Parse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Description of the parse error.
        message: String,
    },

    /// A required header field is missing.
    MissingField {
        /// Name of the missing header field.
        field: &'static str,
    },

    /// The file contains no timestamps at all.
    Empty,
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io(e) => write!(f, "IO error: {}", e),
            DataError::Parse { line, message } => {
                write!(f, "parse error at line {}: {}", line, message)
            }
            DataError::MissingField { field } => {
                write!(f, "capture file is missing required field '{}'", field)
            }
            DataError::Empty => write!(f, "capture file contains no transition timestamps"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DataError {
    fn from(e: io::Error) -> Self {
        DataError::Io(e)
    }
}

/// Load a capture from a text file at `path`.
pub fn load_capture(path: &Path) -> Result<Capture, DataError> {
    let file = File::open(path)?;
    let capture = read_capture(BufReader::new(file))?;
    debug!(
        path = %path.display(),
        transitions = capture.transition_times.len(),
        sample_rate = capture.sample_rate,
        "capture loaded"
    );
    Ok(capture)
}

/// Parse a capture from any buffered reader.
pub fn read_capture<R: BufRead>(reader: R) -> Result<Capture, DataError> {
    let mut sample_rate: Option<f64> = None;
    let mut initial_level: Option<Level> = None;
    let mut begin_time: Option<f64> = None;
    let mut end_time: Option<f64> = None;
    let mut times: Vec<f64> = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim();
            match key {
                "sample_rate" => sample_rate = Some(parse_num(value, line_num, "sample_rate")?),
                "initial_level" => {
                    let bit: u8 = value.parse().map_err(|_| DataError::Parse {
                        line: line_num + 1,
                        message: format!("initial_level must be 0 or 1, got '{}'", value),
                    })?;
                    initial_level = Some(Level::from_bit(bit).ok_or(DataError::Parse {
                        line: line_num + 1,
                        message: format!("initial_level must be 0 or 1, got {}", bit),
                    })?);
                }
                "begin_time" => begin_time = Some(parse_num(value, line_num, "begin_time")?),
                "end_time" => end_time = Some(parse_num(value, line_num, "end_time")?),
                other => {
                    return Err(DataError::Parse {
                        line: line_num + 1,
                        message: format!("unknown header field '{}'", other),
                    })
                }
            }
            continue;
        }

        times.push(parse_num(line, line_num, "timestamp")?);
    }

    let sample_rate = sample_rate.ok_or(DataError::MissingField {
        field: "sample_rate",
    })?;
    let initial_level = initial_level.ok_or(DataError::MissingField {
        field: "initial_level",
    })?;
    if times.is_empty() {
        return Err(DataError::Empty);
    }

    let begin_time = begin_time.unwrap_or(0.0);
    let end_time = end_time.unwrap_or_else(|| *times.last().unwrap_or(&begin_time));

    Ok(Capture {
        sample_rate,
        initial_level,
        transition_times: times,
        begin_time,
        end_time,
    })
}

fn parse_num(value: &str, line_num: usize, name: &str) -> Result<f64, DataError> {
    value.parse().map_err(|_| DataError::Parse {
        line: line_num + 1,
        message: format!("invalid {}: '{}'", name, value),
    })
}
