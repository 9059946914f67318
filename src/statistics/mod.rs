//! Distribution summaries over interval durations.
//!
//! Pure functions only: given the same durations, the same summary comes
//! back. A level with no intervals is an explicit `None`, never an error,
//! so an all-HIGH or all-LOW capture still gets the other level analyzed.

mod histogram;

pub use histogram::{Histogram, HistogramBucket};

use serde::{Deserialize, Serialize};

/// Scalar statistics over one level's interval durations, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelStats {
    /// Number of durations summarized.
    pub count: usize,
    /// Smallest duration.
    pub min: f64,
    /// Largest duration.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

/// Summarize a duration sequence.
///
/// Returns `None` for an empty sequence — the caller reports that level as
/// "no data" rather than failing.
pub fn summarize(durations: &[f64]) -> Option<LevelStats> {
    if durations.is_empty() {
        return None;
    }
    let count = durations.len();
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &d in durations {
        min = min.min(d);
        max = max.max(d);
        sum += d;
    }
    let mean = sum / count as f64;
    let variance = durations
        .iter()
        .map(|&d| {
            let diff = d - mean;
            diff * diff
        })
        .sum::<f64>()
        / count as f64;
    Some(LevelStats {
        count,
        min,
        max,
        mean,
        std_dev: variance.sqrt(),
    })
}

/// Coefficient of variation (`std_dev / mean`) of a duration sequence.
///
/// `None` when the sequence is empty or the mean is zero. Low values mean
/// the durations are nearly identical, which is what a free-running clock
/// line looks like.
pub fn coefficient_of_variation(durations: &[f64]) -> Option<f64> {
    let stats = summarize(durations)?;
    if stats.mean == 0.0 {
        return None;
    }
    Some(stats.std_dev / stats.mean)
}
