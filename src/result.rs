//! The analysis result bundle.

use serde::{Deserialize, Serialize};

use crate::cluster;
use crate::statistics::{Histogram, LevelStats};
use crate::types::{Cluster, Interval, Level, ProtocolGuess};

/// Everything derived from one capture in a single analysis run.
///
/// All fields are plain values; the whole struct serializes to JSON for the
/// CLI's `--json` mode. Per-level fields are `None` when that level had no
/// intervals ("no data"), which never prevents the other level from being
/// analyzed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Recorder sample rate in Hz, echoed from the capture.
    pub sample_rate: f64,
    /// Level the line idles at, echoed from the capture.
    pub initial_level: Level,
    /// Number of transitions in the capture.
    pub transition_count: usize,
    /// Capture window length in seconds.
    pub capture_duration: f64,
    /// Time spanned by the transitions in seconds.
    pub signal_duration: f64,
    /// True when the capture had fewer than 2 transitions and only the
    /// degenerate unknown guess below is meaningful.
    pub no_signal: bool,
    /// The extracted interval sequence.
    pub intervals: Vec<Interval>,
    /// Statistics over all interval durations.
    pub all_stats: Option<LevelStats>,
    /// Statistics over HIGH interval durations.
    pub high_stats: Option<LevelStats>,
    /// Statistics over LOW interval durations.
    pub low_stats: Option<LevelStats>,
    /// Histogram over all interval durations.
    pub all_histogram: Option<Histogram>,
    /// Histogram over HIGH interval durations.
    pub high_histogram: Option<Histogram>,
    /// Histogram over LOW interval durations.
    pub low_histogram: Option<Histogram>,
    /// Timing clusters over HIGH durations, representative ascending.
    pub high_clusters: Vec<Cluster>,
    /// Timing clusters over LOW durations, representative ascending.
    pub low_clusters: Vec<Cluster>,
    /// Ranked protocol guesses, confidence descending.
    pub guesses: Vec<ProtocolGuess>,
}

impl Analysis {
    /// The highest-ranked guess.
    ///
    /// The guess list always contains at least the unknown fallback, so
    /// this only returns `None` for a hand-built empty result.
    pub fn top_guess(&self) -> Option<&ProtocolGuess> {
        self.guesses.first()
    }

    /// HIGH clusters ordered by member count descending, for reporting.
    pub fn high_clusters_by_count(&self) -> Vec<Cluster> {
        cluster::by_count(&self.high_clusters)
    }

    /// LOW clusters ordered by member count descending, for reporting.
    pub fn low_clusters_by_count(&self) -> Vec<Cluster> {
        cluster::by_count(&self.low_clusters)
    }
}
