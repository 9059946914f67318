//! Protocol classification heuristics.
//!
//! One heuristic per protocol, each implementing [`Heuristic`] over the same
//! [`SignalFeatures`] input. Heuristics never fail: a capture that does not
//! match is expressed as low or zero confidence. Adding a protocol means
//! adding one module here and registering it in [`classify`]; existing
//! heuristics are untouched.

mod i2c;
mod onewire;
mod spi;
mod uart;

pub use i2c::{evaluate_pair, I2cHeuristic};
pub use onewire::OneWireHeuristic;
pub use spi::SpiHeuristic;
pub use uart::UartHeuristic;

use tracing::debug;

use crate::config::Config;
use crate::constants::UNKNOWN_SCALE;
use crate::types::{Cluster, Interval, Level, Protocol, ProtocolGuess};

/// Everything a heuristic may inspect, derived once per analysis run.
#[derive(Debug, Clone, Copy)]
pub struct SignalFeatures<'a> {
    /// The full interval sequence in capture order.
    pub intervals: &'a [Interval],
    /// Durations of HIGH intervals, in capture order.
    pub high_durations: &'a [f64],
    /// Durations of LOW intervals, in capture order.
    pub low_durations: &'a [f64],
    /// Clusters over the HIGH durations, representative ascending.
    pub high_clusters: &'a [Cluster],
    /// Clusters over the LOW durations, representative ascending.
    pub low_clusters: &'a [Cluster],
    /// Level the line idles at (before the first transition).
    pub initial_level: Level,
    /// Recorder sample rate in Hz.
    pub sample_rate: f64,
}

impl SignalFeatures<'_> {
    /// Shortest interval duration in the capture, if any.
    pub fn min_duration(&self) -> Option<f64> {
        self.intervals
            .iter()
            .map(|iv| iv.duration)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Longest interval duration in the capture, if any.
    pub fn max_duration(&self) -> Option<f64> {
        self.intervals
            .iter()
            .map(|iv| iv.duration)
            .max_by(|a, b| a.total_cmp(b))
    }
}

/// A protocol-specific scoring rule.
pub trait Heuristic {
    /// The protocol this heuristic scores.
    fn protocol(&self) -> Protocol;

    /// Score the capture against this protocol.
    ///
    /// Always returns a guess; "does not match" is confidence 0, never an
    /// error.
    fn evaluate(&self, sig: &SignalFeatures<'_>) -> ProtocolGuess;
}

/// Run every heuristic and rank the results.
///
/// Guesses below `config.report_threshold` are dropped. An unknown fallback
/// is always appended, scored by how poorly the best heuristic fit
/// (`(1 - best) * 0.5`). The final list is sorted by confidence descending,
/// ties broken by the fixed protocol priority order so output is
/// deterministic.
pub fn classify(sig: &SignalFeatures<'_>, config: &Config) -> Vec<ProtocolGuess> {
    let heuristics: [&dyn Heuristic; 4] = [
        &UartHeuristic,
        &SpiHeuristic,
        &I2cHeuristic,
        &OneWireHeuristic,
    ];

    let mut guesses = Vec::new();
    let mut best = 0.0f64;
    for heuristic in heuristics {
        let guess = heuristic.evaluate(sig);
        debug!(
            protocol = %guess.protocol,
            confidence = guess.confidence,
            "heuristic evaluated"
        );
        best = best.max(guess.confidence);
        if guess.confidence >= config.report_threshold {
            guesses.push(guess);
        }
    }

    guesses.push(unknown_fallback(best));
    rank(&mut guesses);
    guesses
}

/// The always-present unknown guess, scored against the best other fit.
fn unknown_fallback(best_other: f64) -> ProtocolGuess {
    let confidence = ((1.0 - best_other) * UNKNOWN_SCALE).clamp(0.0, 1.0);
    ProtocolGuess::plain(
        Protocol::Unknown,
        confidence,
        "no heuristic matched well".to_string(),
    )
}

/// Sort by confidence descending, protocol priority breaking ties.
pub(crate) fn rank(guesses: &mut [ProtocolGuess]) {
    guesses.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| a.protocol.priority().cmp(&b.protocol.priority()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProtocolParams;

    fn guess(protocol: Protocol, confidence: f64) -> ProtocolGuess {
        ProtocolGuess {
            protocol,
            confidence,
            params: ProtocolParams::default(),
        }
    }

    #[test]
    fn rank_orders_by_confidence() {
        let mut guesses = vec![
            guess(Protocol::OneWire, 0.6),
            guess(Protocol::Uart, 0.9),
            guess(Protocol::Unknown, 0.05),
        ];
        rank(&mut guesses);
        assert_eq!(guesses[0].protocol, Protocol::Uart);
        assert_eq!(guesses[1].protocol, Protocol::OneWire);
        assert_eq!(guesses[2].protocol, Protocol::Unknown);
    }

    #[test]
    fn rank_breaks_ties_by_priority() {
        let mut guesses = vec![
            guess(Protocol::OneWire, 0.6),
            guess(Protocol::Spi, 0.6),
            guess(Protocol::Uart, 0.6),
        ];
        rank(&mut guesses);
        assert_eq!(guesses[0].protocol, Protocol::Uart);
        assert_eq!(guesses[1].protocol, Protocol::Spi);
        assert_eq!(guesses[2].protocol, Protocol::OneWire);
    }

    #[test]
    fn unknown_reflects_best_fit() {
        assert!((unknown_fallback(0.0).confidence - 0.5).abs() < 1e-12);
        assert!((unknown_fallback(0.9).confidence - 0.05).abs() < 1e-12);
        assert_eq!(unknown_fallback(1.0).confidence, 0.0);
    }
}
