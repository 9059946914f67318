//! Error types for capture analysis.
//!
//! Only structural problems are errors. A heuristic that does not match a
//! capture expresses that as low confidence, never as an `Err`.

use core::fmt;

/// Errors raised by the analysis pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    /// The capture is structurally invalid and no heuristic will run.
    ///
    /// Examples: non-positive or non-finite sample rate, timestamps that are
    /// not strictly increasing, NaN timestamps.
    MalformedCapture {
        /// What was wrong with the capture.
        reason: String,
    },

    /// Fewer than 2 transitions: there is no gap to measure.
    ///
    /// This is recoverable. [`crate::Analyzer::analyze`] turns it
    /// into a well-formed "unknown, confidence 0" result; callers reaching
    /// the extractor directly may treat it as "constant line / no signal".
    InsufficientData {
        /// Number of transitions present in the capture.
        transitions: usize,
    },
}

impl fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzeError::MalformedCapture { reason } => {
                write!(f, "malformed capture: {}", reason)
            }
            AnalyzeError::InsufficientData { transitions } => {
                write!(
                    f,
                    "not enough transitions to analyze: got {}, need at least 2",
                    transitions
                )
            }
        }
    }
}

impl std::error::Error for AnalyzeError {}
