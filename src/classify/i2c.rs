//! I2C heuristic: single-channel clock check plus a two-channel
//! START/STOP detector.
//!
//! I2C can only be confirmed from the SDA/SCL relationship: SDA falling
//! while SCL is HIGH is a START condition, SDA rising while SCL is HIGH a
//! STOP. With one channel the best we can say is "this could be an SCL
//! line" when the timing is dominated by one duration per level, and that
//! is reported at very low confidence.

use super::{Heuristic, SignalFeatures};
use crate::constants::{I2C_CONDITION_WEIGHT, I2C_PAIR_BONUS, I2C_SINGLE_CHANNEL_CEILING};
use crate::types::{Capture, Cluster, Level, Protocol, ProtocolGuess};

/// Fraction of a level's durations its dominant cluster must hold for the
/// single-channel "plausible SCL" call.
const DOMINANT_FRACTION: f64 = 0.8;

/// Single-channel I2C scoring. See the module docs.
pub struct I2cHeuristic;

impl Heuristic for I2cHeuristic {
    fn protocol(&self) -> Protocol {
        Protocol::I2c
    }

    fn evaluate(&self, sig: &SignalFeatures<'_>) -> ProtocolGuess {
        let frac_high = dominant_fraction(sig.high_clusters, sig.high_durations.len());
        let frac_low = dominant_fraction(sig.low_clusters, sig.low_durations.len());

        match (frac_high, frac_low) {
            (Some(high), Some(low)) => {
                let regularity = high.min(low);
                if regularity >= DOMINANT_FRACTION {
                    ProtocolGuess::plain(
                        Protocol::I2c,
                        I2C_SINGLE_CHANNEL_CEILING * regularity,
                        "possible I2C clock line (regular timing, no SDA channel)",
                    )
                } else {
                    ProtocolGuess::plain(Protocol::I2c, 0.0, "timing too irregular for SCL")
                }
            }
            _ => ProtocolGuess::plain(Protocol::I2c, 0.0, "needs both HIGH and LOW intervals"),
        }
    }
}

/// Share of `total` durations held by the largest cluster.
fn dominant_fraction(clusters: &[Cluster], total: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }
    let largest = clusters.iter().map(|c| c.count).max()?;
    Some(largest as f64 / total as f64)
}

/// Two-channel I2C check: count START/STOP conditions between an SCL and an
/// SDA capture.
///
/// Both captures must already be validated. SDA transitions are classified
/// by direction from the alternation rule; the SCL level at each SDA
/// transition comes from a binary search over the SCL timestamps.
pub fn evaluate_pair(scl: &Capture, sda: &Capture) -> ProtocolGuess {
    let mut starts = 0usize;
    let mut stops = 0usize;

    for (k, &t) in sda.transition_times.iter().enumerate() {
        let level_before = if k % 2 == 0 {
            sda.initial_level
        } else {
            sda.initial_level.opposite()
        };
        if level_at(scl, t) != Level::High {
            continue; // ordinary data bit change while SCL LOW
        }
        if level_before == Level::High {
            starts += 1;
        } else {
            stops += 1;
        }
    }

    if starts == 0 && stops == 0 {
        return ProtocolGuess::plain(
            Protocol::I2c,
            0.0,
            "no START/STOP conditions between channels",
        );
    }

    let mut confidence = 0.0;
    if starts > 0 {
        confidence += I2C_CONDITION_WEIGHT;
    }
    if stops > 0 {
        confidence += I2C_CONDITION_WEIGHT;
    }
    if starts > 0 && stops > 0 && starts.abs_diff(stops) <= 1 {
        confidence += I2C_PAIR_BONUS;
    }

    ProtocolGuess::plain(
        Protocol::I2c,
        confidence.clamp(0.0, 1.0),
        format!("{} START and {} STOP conditions detected", starts, stops),
    )
}

/// Logic level of `capture` at time `t`.
///
/// A transition at exactly `t` is treated as already having happened.
fn level_at(capture: &Capture, t: f64) -> Level {
    let flips = capture.transition_times.partition_point(|&x| x <= t);
    if flips % 2 == 0 {
        capture.initial_level
    } else {
        capture.initial_level.opposite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClusterLevel;

    fn capture(initial_level: Level, times: Vec<f64>) -> Capture {
        Capture {
            sample_rate: 1e6,
            initial_level,
            transition_times: times,
            begin_time: 0.0,
            end_time: 1.0,
        }
    }

    fn cluster(representative: f64, count: usize, level: ClusterLevel) -> Cluster {
        Cluster {
            representative,
            count,
            min: representative,
            max: representative,
            level,
        }
    }

    #[test]
    fn level_at_follows_transitions() {
        let scl = capture(Level::High, vec![1.0, 2.0, 3.0]);
        assert_eq!(level_at(&scl, 0.5), Level::High);
        assert_eq!(level_at(&scl, 1.5), Level::Low);
        assert_eq!(level_at(&scl, 2.5), Level::High);
        assert_eq!(level_at(&scl, 3.5), Level::Low);
    }

    #[test]
    fn detects_start_and_stop() {
        // SCL idles HIGH, pulses LOW during 2.0..3.0.
        let scl = capture(Level::High, vec![2.0, 3.0]);
        // SDA falls at 1.0 (SCL HIGH -> START), changes at 2.5 (SCL LOW,
        // ignored), rises at 3.5 (SCL HIGH -> STOP).
        let sda = capture(Level::High, vec![1.0, 2.5, 3.5]);

        let guess = evaluate_pair(&scl, &sda);
        assert!(guess.confidence >= 2.0 * I2C_CONDITION_WEIGHT);
        assert!(guess.params.detail.contains("1 START"));
        assert!(guess.params.detail.contains("1 STOP"));
    }

    #[test]
    fn data_bits_while_scl_low_do_not_count() {
        let scl = capture(Level::High, vec![1.0, 10.0]);
        let sda = capture(Level::High, vec![2.0, 3.0, 4.0, 5.0]);
        let guess = evaluate_pair(&scl, &sda);
        assert_eq!(guess.confidence, 0.0);
    }

    #[test]
    fn single_channel_regular_clock_is_low_confidence() {
        let high = [5e-6; 10];
        let low = [5e-6; 10];
        let high_clusters = [cluster(5e-6, 10, ClusterLevel::High)];
        let low_clusters = [cluster(5e-6, 10, ClusterLevel::Low)];
        let sig = SignalFeatures {
            intervals: &[],
            high_durations: &high,
            low_durations: &low,
            high_clusters: &high_clusters,
            low_clusters: &low_clusters,
            initial_level: Level::High,
            sample_rate: 1e6,
        };
        let guess = I2cHeuristic.evaluate(&sig);
        assert!(guess.confidence > 0.0);
        assert!(guess.confidence <= I2C_SINGLE_CHANNEL_CEILING);
    }

    #[test]
    fn single_channel_irregular_is_zero() {
        let high = [5e-6; 10];
        let low = [5e-6; 10];
        // Members spread across clusters: no dominant timing.
        let high_clusters = [
            cluster(5e-6, 5, ClusterLevel::High),
            cluster(20e-6, 5, ClusterLevel::High),
        ];
        let low_clusters = [cluster(5e-6, 10, ClusterLevel::Low)];
        let sig = SignalFeatures {
            intervals: &[],
            high_durations: &high,
            low_durations: &low,
            high_clusters: &high_clusters,
            low_clusters: &low_clusters,
            initial_level: Level::High,
            sample_rate: 1e6,
        };
        let guess = I2cHeuristic.evaluate(&sig);
        assert_eq!(guess.confidence, 0.0);
    }
}
