//! Core value types for capture analysis.
//!
//! Everything here is an immutable value: captures come in from an external
//! reader, and intervals, clusters, and guesses are derived from them by pure
//! functions. Nothing is persisted between analysis runs.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Logic level of a digital signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Logic low (0).
    Low,
    /// Logic high (1).
    High,
}

impl Level {
    /// The opposite logic level.
    pub fn opposite(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }

    /// Parse from the 0/1 encoding used by capture files.
    ///
    /// Returns `None` for anything other than 0 or 1.
    pub fn from_bit(bit: u8) -> Option<Self> {
        match bit {
            0 => Some(Level::Low),
            1 => Some(Level::High),
            _ => None,
        }
    }

    /// The 0/1 encoding used by capture files and CSV export.
    pub fn to_bit(self) -> u8 {
        match self {
            Level::Low => 0,
            Level::High => 1,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Low => write!(f, "LOW"),
            Level::High => write!(f, "HIGH"),
        }
    }
}

/// One recorded digital signal channel with timing metadata.
///
/// Produced by an external capture-file reader. All times are in seconds;
/// `transition_times` must be strictly increasing. Validation happens when
/// the capture enters the pipeline, see [`crate::intervals::Intervals::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capture {
    /// Sampling rate of the recorder in Hz. Must be positive.
    pub sample_rate: f64,
    /// Logic level before the first transition.
    pub initial_level: Level,
    /// Timestamps (seconds) at which the signal flips level.
    pub transition_times: Vec<f64>,
    /// Start of the capture window in seconds.
    pub begin_time: f64,
    /// End of the capture window in seconds.
    pub end_time: f64,
}

impl Capture {
    /// Duration of the capture window in seconds.
    pub fn capture_duration(&self) -> f64 {
        self.end_time - self.begin_time
    }

    /// Time spanned by the recorded transitions, in seconds.
    ///
    /// Zero when there are fewer than two transitions.
    pub fn signal_duration(&self) -> f64 {
        match (self.transition_times.first(), self.transition_times.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }

    /// One sample period in seconds (`1 / sample_rate`).
    ///
    /// This is the finest duration the recorder can resolve and serves as the
    /// default absolute floor for cluster merging.
    pub fn time_resolution(&self) -> f64 {
        1.0 / self.sample_rate
    }
}

/// A constant-level span between two consecutive transitions.
///
/// Interval `i` covers `[transition_times[i], transition_times[i + 1])`. The
/// span before the first transition is not represented: its start is
/// unconstrained by the capture window, so it carries no usable duration.
/// Because every transition flips the level, interval 0 already sits at the
/// opposite of the initial level and levels strictly alternate from there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Position in the alternating sequence (0-based).
    pub index: usize,
    /// Logic level held throughout this interval.
    pub level: Level,
    /// Length of the interval in seconds. Always positive for a valid capture.
    pub duration: f64,
}

/// Which level(s) the durations behind a cluster were drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClusterLevel {
    /// All member durations were HIGH intervals.
    High,
    /// All member durations were LOW intervals.
    Low,
    /// Durations from both levels were clustered together.
    Mixed,
}

impl fmt::Display for ClusterLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterLevel::High => write!(f, "HIGH"),
            ClusterLevel::Low => write!(f, "LOW"),
            ClusterLevel::Mixed => write!(f, "MIXED"),
        }
    }
}

/// A group of interval durations considered the same timing value.
///
/// Produced by [`crate::cluster::detect_clusters`]. The representative is the
/// mean of the member durations; `min`/`max` bound the members.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Mean of the member durations, in seconds.
    pub representative: f64,
    /// Number of member durations.
    pub count: usize,
    /// Smallest member duration in seconds.
    pub min: f64,
    /// Largest member duration in seconds.
    pub max: f64,
    /// Level(s) the members were drawn from.
    pub level: ClusterLevel,
}

/// Protocols the classifier knows how to score.
///
/// The declaration order is also the fixed priority order used to break
/// confidence ties, keeping ranked output deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Protocol {
    /// Asynchronous serial (start/stop bits, fixed baud rate).
    Uart,
    /// SPI clock line (single-channel: "looks like a clock").
    Spi,
    /// I2C clock or data line.
    I2c,
    /// Dallas/Maxim 1-Wire.
    OneWire,
    /// No heuristic produced a convincing match.
    Unknown,
}

impl Protocol {
    /// Tie-break rank; lower wins when confidences are equal.
    pub fn priority(self) -> u8 {
        match self {
            Protocol::Uart => 0,
            Protocol::Spi => 1,
            Protocol::I2c => 2,
            Protocol::OneWire => 3,
            Protocol::Unknown => 4,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Uart => write!(f, "UART"),
            Protocol::Spi => write!(f, "SPI"),
            Protocol::I2c => write!(f, "I2C"),
            Protocol::OneWire => write!(f, "1-Wire"),
            Protocol::Unknown => write!(f, "unknown"),
        }
    }
}

/// Estimated protocol parameters attached to a guess.
///
/// Only the fields a heuristic can actually estimate are populated; the rest
/// stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProtocolParams {
    /// Baud rate in bits per second (UART).
    pub baud_rate: Option<u32>,
    /// Duration of one data bit in seconds (UART).
    pub bit_period: Option<f64>,
    /// Clock period in seconds (SPI/I2C clock-like signals).
    pub clock_period: Option<f64>,
    /// Fraction of the clock period spent HIGH, in [0, 1].
    pub duty_cycle: Option<f64>,
    /// One-line human-readable note on what matched.
    pub detail: String,
}

/// A scored candidate protocol for one capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolGuess {
    /// The candidate protocol.
    pub protocol: Protocol,
    /// Heuristic match score in [0, 1].
    pub confidence: f64,
    /// Estimated parameters supporting the guess.
    pub params: ProtocolParams,
}

impl ProtocolGuess {
    /// Build a guess with a detail note and no estimated parameters.
    pub fn plain(protocol: Protocol, confidence: f64, detail: impl Into<String>) -> Self {
        Self {
            protocol,
            confidence,
            params: ProtocolParams {
                detail: detail.into(),
                ..ProtocolParams::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_opposite_and_bits() {
        assert_eq!(Level::High.opposite(), Level::Low);
        assert_eq!(Level::Low.opposite(), Level::High);
        assert_eq!(Level::from_bit(0), Some(Level::Low));
        assert_eq!(Level::from_bit(1), Some(Level::High));
        assert_eq!(Level::from_bit(2), None);
        assert_eq!(Level::High.to_bit(), 1);
    }

    #[test]
    fn capture_durations() {
        let capture = Capture {
            sample_rate: 1e6,
            initial_level: Level::High,
            transition_times: vec![0.1, 0.2, 0.5],
            begin_time: 0.0,
            end_time: 1.0,
        };
        assert_eq!(capture.capture_duration(), 1.0);
        assert!((capture.signal_duration() - 0.4).abs() < 1e-12);
        assert_eq!(capture.time_resolution(), 1e-6);
    }

    #[test]
    fn signal_duration_degenerate() {
        let capture = Capture {
            sample_rate: 1e6,
            initial_level: Level::Low,
            transition_times: vec![],
            begin_time: 0.0,
            end_time: 1.0,
        };
        assert_eq!(capture.signal_duration(), 0.0);
    }

    #[test]
    fn protocol_priority_order() {
        assert!(Protocol::Uart.priority() < Protocol::Spi.priority());
        assert!(Protocol::Spi.priority() < Protocol::I2c.priority());
        assert!(Protocol::I2c.priority() < Protocol::OneWire.priority());
        assert!(Protocol::OneWire.priority() < Protocol::Unknown.priority());
    }
}
