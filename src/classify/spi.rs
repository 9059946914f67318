//! SPI heuristic: does the capture look like a free-running clock?
//!
//! With only one channel there is no MOSI/MISO or chip select to confirm
//! SPI, so this heuristic scores clock-likeness: nearly constant HIGH and
//! LOW durations (low coefficient of variation) and a duty cycle near 50%.
//! The confidence is hard-capped below [`SPI_CONFIDENCE_CEILING`] to keep
//! "looks like a clock" from outranking protocols that can actually be
//! confirmed from one channel.

use super::{Heuristic, SignalFeatures};
use crate::constants::SPI_CONFIDENCE_CEILING;
use crate::statistics::{coefficient_of_variation, summarize};
use crate::types::{Protocol, ProtocolGuess, ProtocolParams};

/// Scores how clock-like a capture is. See the module docs.
pub struct SpiHeuristic;

impl Heuristic for SpiHeuristic {
    fn protocol(&self) -> Protocol {
        Protocol::Spi
    }

    fn evaluate(&self, sig: &SignalFeatures<'_>) -> ProtocolGuess {
        let (Some(high), Some(low)) = (
            summarize(sig.high_durations),
            summarize(sig.low_durations),
        ) else {
            return ProtocolGuess::plain(Protocol::Spi, 0.0, "needs both HIGH and LOW intervals");
        };
        // Both present implies non-zero means, so the CVs exist.
        let cv_high = coefficient_of_variation(sig.high_durations).unwrap_or(1.0);
        let cv_low = coefficient_of_variation(sig.low_durations).unwrap_or(1.0);
        let cv = cv_high.max(cv_low);

        let clock_period = high.mean + low.mean;
        let duty_cycle = high.mean / clock_period;

        // 1.0 at a perfect 50% duty cycle, 0.0 at 0%/100%.
        let duty_factor = 1.0 - (duty_cycle - 0.5).abs() * 2.0;
        let regularity = (1.0 - cv).clamp(0.0, 1.0);
        let confidence = (regularity * duty_factor).min(SPI_CONFIDENCE_CEILING);

        ProtocolGuess {
            protocol: Protocol::Spi,
            confidence,
            params: ProtocolParams {
                clock_period: Some(clock_period),
                duty_cycle: Some(duty_cycle),
                detail: format!(
                    "clock-like: period ~{:.2} us, duty {:.0}% (single channel, unconfirmed)",
                    clock_period * 1e6,
                    duty_cycle * 100.0
                ),
                ..ProtocolParams::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Level;

    fn features<'a>(high: &'a [f64], low: &'a [f64]) -> SignalFeatures<'a> {
        SignalFeatures {
            intervals: &[],
            high_durations: high,
            low_durations: low,
            high_clusters: &[],
            low_clusters: &[],
            initial_level: Level::Low,
            sample_rate: 24e6,
        }
    }

    #[test]
    fn perfect_clock_hits_the_ceiling() {
        let high = [5e-6; 8];
        let low = [5e-6; 8];
        let guess = SpiHeuristic.evaluate(&features(&high, &low));
        assert!((guess.confidence - SPI_CONFIDENCE_CEILING).abs() < 1e-12);
        assert!((guess.params.duty_cycle.unwrap() - 0.5).abs() < 1e-12);
        assert!((guess.params.clock_period.unwrap() - 10e-6).abs() < 1e-12);
    }

    #[test]
    fn skewed_duty_cycle_scores_lower() {
        let high = [9e-6; 8];
        let low = [1e-6; 8];
        let guess = SpiHeuristic.evaluate(&features(&high, &low));
        assert!(guess.confidence < 0.1, "got {}", guess.confidence);
    }

    #[test]
    fn irregular_durations_score_lower() {
        let high = [1e-6, 8e-6, 3e-6, 20e-6];
        let low = [2e-6, 15e-6, 1e-6, 9e-6];
        let guess = SpiHeuristic.evaluate(&features(&high, &low));
        assert!(guess.confidence < SPI_CONFIDENCE_CEILING / 2.0);
    }

    #[test]
    fn missing_level_scores_zero() {
        let high = [5e-6; 4];
        let guess = SpiHeuristic.evaluate(&features(&high, &[]));
        assert_eq!(guess.confidence, 0.0);
    }
}
