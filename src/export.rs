//! CSV export of the transition sequence, and re-parsing of exported rows.
//!
//! One row per transition: `index,time_s,level,duration_s`. `level` is the
//! 0/1 logic level *after* that transition, `duration_s` the gap to the
//! next transition (0 for the last row). Everything stays in seconds; unit
//! scaling is a display concern and never leaks into exported data.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::types::{Capture, Level};

/// Timestamps are written with 9 decimal places (nanosecond resolution),
/// which exceeds what any supported recorder resolves.
const TIME_DECIMALS: usize = 9;

/// One parsed row of an exported transition CSV.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionRow {
    /// Transition index (0-based).
    pub index: usize,
    /// Transition timestamp in seconds.
    pub time: f64,
    /// Logic level after the transition.
    pub level: Level,
    /// Gap to the next transition in seconds; 0 for the last transition.
    pub duration: f64,
}

/// Errors from re-parsing an exported CSV.
#[derive(Debug)]
pub enum ExportError {
    /// IO error reading the file.
    Io(io::Error),
    /// A row that does not parse, with its 1-based line number.
    Parse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Description of the parse error.
        message: String,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "IO error: {}", e),
            ExportError::Parse { line, message } => {
                write!(f, "parse error at line {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ExportError {
    fn from(e: io::Error) -> Self {
        ExportError::Io(e)
    }
}

/// Write the capture's transitions as CSV rows.
pub fn write_csv<W: Write>(writer: &mut W, capture: &Capture) -> io::Result<()> {
    writeln!(writer, "index,time_s,level,duration_s")?;
    let times = &capture.transition_times;
    for (i, &t) in times.iter().enumerate() {
        // Transition i flips the line for the (i+1)-th time.
        let level = if i % 2 == 0 {
            capture.initial_level.opposite()
        } else {
            capture.initial_level
        };
        let duration = if i + 1 < times.len() {
            times[i + 1] - t
        } else {
            0.0
        };
        writeln!(
            writer,
            "{},{:.prec$},{},{:.prec$}",
            i,
            t,
            level.to_bit(),
            duration,
            prec = TIME_DECIMALS
        )?;
    }
    Ok(())
}

/// Write the capture's transitions to a CSV file at `path`.
pub fn export_to_path(path: &Path, capture: &Capture) -> io::Result<usize> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_csv(&mut writer, capture)?;
    writer.flush()?;
    Ok(capture.transition_times.len())
}

/// Re-parse rows previously written by [`write_csv`].
///
/// The header line is required. Values round-trip bit-for-bit up to the
/// printed precision.
pub fn read_csv<R: BufRead>(reader: R) -> Result<Vec<TransitionRow>, ExportError> {
    let mut rows = Vec::new();
    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line_num == 0 {
            if line != "index,time_s,level,duration_s" {
                return Err(ExportError::Parse {
                    line: 1,
                    message: format!("unexpected header: '{}'", line),
                });
            }
            continue;
        }

        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() != 4 {
            return Err(ExportError::Parse {
                line: line_num + 1,
                message: format!("expected 4 columns, got {}", parts.len()),
            });
        }
        let index: usize = parse_field(parts[0], line_num, "index")?;
        let time: f64 = parse_field(parts[1], line_num, "time_s")?;
        let bit: u8 = parse_field(parts[2], line_num, "level")?;
        let duration: f64 = parse_field(parts[3], line_num, "duration_s")?;
        let level = Level::from_bit(bit).ok_or_else(|| ExportError::Parse {
            line: line_num + 1,
            message: format!("level must be 0 or 1, got {}", bit),
        })?;
        rows.push(TransitionRow {
            index,
            time,
            level,
            duration,
        });
    }
    Ok(rows)
}

/// Read rows from a CSV file at `path`.
pub fn read_csv_path(path: &Path) -> Result<Vec<TransitionRow>, ExportError> {
    let file = File::open(path)?;
    read_csv(BufReader::new(file))
}

fn parse_field<T: std::str::FromStr>(
    field: &str,
    line_num: usize,
    name: &str,
) -> Result<T, ExportError> {
    field.trim().parse().map_err(|_| ExportError::Parse {
        line: line_num + 1,
        message: format!("invalid {}: '{}'", name, field),
    })
}
