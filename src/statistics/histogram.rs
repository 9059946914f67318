//! Binned histograms over interval durations.

use serde::{Deserialize, Serialize};

/// One histogram bucket: the half-open duration range `[lo, hi)` and how
/// many durations fell into it. The final bucket is closed on the right so
/// the maximum duration is counted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBucket {
    /// Lower edge of the bucket in seconds (inclusive).
    pub lo: f64,
    /// Upper edge of the bucket in seconds.
    pub hi: f64,
    /// Number of durations in the bucket.
    pub count: usize,
}

/// Equal-width histogram spanning `[min, max]` of the input durations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// The buckets in ascending order of duration.
    pub buckets: Vec<HistogramBucket>,
}

impl Histogram {
    /// Bin `durations` into `bucket_count` equal-width buckets.
    ///
    /// Returns `None` for an empty input. When all durations are equal, a
    /// single bucket holding everything is returned.
    ///
    /// # Panics
    ///
    /// Panics if `bucket_count` is zero.
    pub fn compute(durations: &[f64], bucket_count: usize) -> Option<Self> {
        assert!(bucket_count > 0, "bucket_count must be positive");
        if durations.is_empty() {
            return None;
        }

        let min = durations.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = durations.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        if min == max {
            return Some(Self {
                buckets: vec![HistogramBucket {
                    lo: min,
                    hi: max,
                    count: durations.len(),
                }],
            });
        }

        let width = (max - min) / bucket_count as f64;
        let mut buckets: Vec<HistogramBucket> = (0..bucket_count)
            .map(|i| HistogramBucket {
                lo: min + i as f64 * width,
                hi: min + (i + 1) as f64 * width,
                count: 0,
            })
            .collect();

        for &d in durations {
            let idx = (((d - min) / width) as usize).min(bucket_count - 1);
            buckets[idx].count += 1;
        }

        Some(Self { buckets })
    }

    /// Largest bucket count, used to scale bar rendering.
    pub fn max_count(&self) -> usize {
        self.buckets.iter().map(|b| b.count).max().unwrap_or(0)
    }

    /// Total number of durations binned.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }
}
