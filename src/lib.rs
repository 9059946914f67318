//! # protoprobe
//!
//! Infer which serial protocol produced a digital signal capture.
//!
//! A capture is an initial logic level plus an ordered list of transition
//! timestamps. From that the crate derives labeled intervals, duration
//! statistics and histograms, timing clusters, and finally ranked protocol
//! guesses (UART, SPI, I2C, 1-Wire) with confidence scores and supporting
//! parameters such as baud rate and bit period.
//!
//! Classification, not decoding: the goal is "this is probably UART at
//! 115200 baud", not the decoded bytes. Decoding is a downstream,
//! protocol-specific step.
//!
//! ## Quick start
//!
//! ```ignore
//! use protoprobe::{Analyzer, Capture, Level};
//!
//! let capture = Capture {
//!     sample_rate: 24e6,
//!     initial_level: Level::High,
//!     transition_times: timestamps,
//!     begin_time: 0.0,
//!     end_time: 1.0,
//! };
//!
//! let analysis = Analyzer::new().analyze(&capture)?;
//! for guess in &analysis.guesses {
//!     println!("{}: {:.0}%", guess.protocol, guess.confidence * 100.0);
//! }
//! ```
//!
//! Everything is pure batch computation over immutable values: one capture
//! in, one [`Analysis`] out, no shared state, and all internal math in
//! seconds (unit scaling happens only in [`output`]).

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod analyzer;
mod config;
mod constants;
mod error;
mod result;
mod types;

// Functional modules
pub mod classify;
pub mod cluster;
pub mod data;
pub mod export;
pub mod intervals;
pub mod output;
pub mod statistics;

// Re-exports for the public API
pub use analyzer::Analyzer;
pub use config::Config;
pub use constants::COMMON_BAUD_RATES;
pub use error::AnalyzeError;
pub use result::Analysis;
pub use types::{
    Capture, Cluster, ClusterLevel, Interval, Level, Protocol, ProtocolGuess, ProtocolParams,
};
