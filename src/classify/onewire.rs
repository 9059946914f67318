//! 1-Wire heuristic: reset pulses plus short and medium LOW slots.
//!
//! 1-Wire idles HIGH and signals entirely with LOW pulses of three very
//! different lengths: a 480 us reset, 1-15 us write-1/read slots, and
//! 60-120 us write-0/presence pulses. A capture whose LOW clusters land in
//! those windows is very likely 1-Wire; each matched window adds a tunable
//! weight, with a bonus when all three are present.

use super::{Heuristic, SignalFeatures};
use crate::constants::{
    ONEWIRE_MEDIUM_RANGE, ONEWIRE_RESET_RANGE, ONEWIRE_SHORT_RANGE, ONEWIRE_WEIGHTS,
};
use crate::types::{Cluster, Level, Protocol, ProtocolGuess};

/// Scores how 1-Wire-like a capture is. See the module docs.
pub struct OneWireHeuristic;

impl Heuristic for OneWireHeuristic {
    fn protocol(&self) -> Protocol {
        Protocol::OneWire
    }

    fn evaluate(&self, sig: &SignalFeatures<'_>) -> ProtocolGuess {
        if sig.initial_level != Level::High {
            return ProtocolGuess::plain(Protocol::OneWire, 0.0, "line does not idle HIGH");
        }

        let has_reset = any_cluster_in(sig.low_clusters, ONEWIRE_RESET_RANGE);
        let has_short = any_cluster_in(sig.low_clusters, ONEWIRE_SHORT_RANGE);
        let has_medium = any_cluster_in(sig.low_clusters, ONEWIRE_MEDIUM_RANGE);

        let [w_reset, w_short, w_medium, w_all] = ONEWIRE_WEIGHTS;
        let mut confidence = 0.0;
        let mut matched = Vec::new();
        if has_reset {
            confidence += w_reset;
            matched.push("reset pulse");
        }
        if has_short {
            confidence += w_short;
            matched.push("short slots");
        }
        if has_medium {
            confidence += w_medium;
            matched.push("medium slots");
        }
        if has_reset && has_short && has_medium {
            confidence += w_all;
        }

        let detail = if matched.is_empty() {
            "no 1-Wire timing signatures".to_string()
        } else {
            format!("detected {}", matched.join(", "))
        };
        ProtocolGuess::plain(Protocol::OneWire, confidence.clamp(0.0, 1.0), detail)
    }
}

fn any_cluster_in(clusters: &[Cluster], range: (f64, f64)) -> bool {
    clusters
        .iter()
        .any(|c| c.representative >= range.0 && c.representative <= range.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClusterLevel;

    fn cluster(representative: f64, count: usize) -> Cluster {
        Cluster {
            representative,
            count,
            min: representative,
            max: representative,
            level: ClusterLevel::Low,
        }
    }

    fn features<'a>(low_clusters: &'a [Cluster], initial_level: Level) -> SignalFeatures<'a> {
        SignalFeatures {
            intervals: &[],
            high_durations: &[],
            low_durations: &[],
            high_clusters: &[],
            low_clusters,
            initial_level,
            sample_rate: 24e6,
        }
    }

    #[test]
    fn reset_plus_short_plus_medium_scores_full() {
        let clusters = [cluster(480e-6, 1), cluster(5e-6, 12), cluster(90e-6, 6)];
        let guess = OneWireHeuristic.evaluate(&features(&clusters, Level::High));
        assert!(
            (guess.confidence - 1.0).abs() < 1e-12,
            "all three signatures should sum to 1.0, got {}",
            guess.confidence
        );
        assert!(guess.params.detail.contains("reset pulse"));
    }

    #[test]
    fn reset_plus_short_matches_without_medium() {
        let clusters = [cluster(450e-6, 2), cluster(8e-6, 20)];
        let guess = OneWireHeuristic.evaluate(&features(&clusters, Level::High));
        assert!((guess.confidence - 0.6).abs() < 1e-12);
    }

    #[test]
    fn idle_low_scores_zero() {
        let clusters = [cluster(480e-6, 1), cluster(5e-6, 12)];
        let guess = OneWireHeuristic.evaluate(&features(&clusters, Level::Low));
        assert_eq!(guess.confidence, 0.0);
    }

    #[test]
    fn unrelated_timings_score_zero() {
        let clusters = [cluster(1e-3, 5), cluster(30e-6, 5)];
        let guess = OneWireHeuristic.evaluate(&features(&clusters, Level::High));
        assert_eq!(guess.confidence, 0.0);
    }
}
