//! Configuration for capture analysis.

use crate::constants::{
    DEFAULT_CLUSTER_TOLERANCE, DEFAULT_HISTOGRAM_BUCKETS, DEFAULT_REPORT_THRESHOLD,
};

/// Configuration options for [`crate::analyzer::Analyzer`].
///
/// Controls clustering tolerances, histogram resolution, and the reporting
/// threshold for protocol guesses.
#[derive(Debug, Clone)]
pub struct Config {
    /// Relative tolerance for cluster merging.
    ///
    /// A sorted duration joins the open cluster while it stays within this
    /// fraction of the cluster's running mean. Default: 0.10 (10%).
    pub cluster_tolerance: f64,

    /// Absolute floor for cluster merging, in seconds.
    ///
    /// Durations closer than this to the running mean always merge, which
    /// prevents degenerate one-member clusters at durations near the
    /// recorder's resolution. When `None` (the default), `1 / sample_rate`
    /// of the capture under analysis is used.
    pub cluster_floor: Option<f64>,

    /// Number of histogram buckets per level. Default: 20.
    pub histogram_buckets: usize,

    /// Minimum confidence a heuristic guess needs to be reported.
    ///
    /// Guesses below this are dropped; the unknown fallback is always kept.
    /// Default: 0.5.
    pub report_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cluster_tolerance: DEFAULT_CLUSTER_TOLERANCE,
            cluster_floor: None,
            histogram_buckets: DEFAULT_HISTOGRAM_BUCKETS,
            report_threshold: DEFAULT_REPORT_THRESHOLD,
        }
    }
}

impl Config {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// A looser configuration for noisy captures.
    ///
    /// Widens the cluster tolerance to 20% and lowers the reporting
    /// threshold to 0.3 so marginal fits still show up.
    pub fn lenient() -> Self {
        Self {
            cluster_tolerance: 0.20,
            report_threshold: 0.3,
            ..Default::default()
        }
    }

    /// A stricter configuration for clean captures.
    ///
    /// Tightens the cluster tolerance to 5% and raises the reporting
    /// threshold to 0.7.
    pub fn strict() -> Self {
        Self {
            cluster_tolerance: 0.05,
            report_threshold: 0.7,
            ..Default::default()
        }
    }

    /// Set the relative cluster tolerance.
    pub fn cluster_tolerance(mut self, tolerance: f64) -> Self {
        assert!(
            tolerance > 0.0 && tolerance < 1.0,
            "cluster_tolerance must be in (0, 1)"
        );
        self.cluster_tolerance = tolerance;
        self
    }

    /// Set the absolute cluster floor in seconds.
    pub fn cluster_floor(mut self, floor: f64) -> Self {
        assert!(floor >= 0.0, "cluster_floor must be non-negative");
        self.cluster_floor = Some(floor);
        self
    }

    /// Set the number of histogram buckets.
    pub fn histogram_buckets(mut self, buckets: usize) -> Self {
        assert!(buckets > 0, "histogram_buckets must be positive");
        self.histogram_buckets = buckets;
        self
    }

    /// Set the reporting threshold for guesses.
    pub fn report_threshold(mut self, threshold: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&threshold),
            "report_threshold must be in [0, 1]"
        );
        self.report_threshold = threshold;
        self
    }

    /// Check that the configuration is internally consistent.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.cluster_tolerance > 0.0 && self.cluster_tolerance < 1.0) {
            return Err("cluster_tolerance must be in (0, 1)".to_string());
        }
        if let Some(floor) = self.cluster_floor {
            if !(floor >= 0.0 && floor.is_finite()) {
                return Err("cluster_floor must be finite and non-negative".to_string());
            }
        }
        if self.histogram_buckets == 0 {
            return Err("histogram_buckets must be positive".to_string());
        }
        if !(0.0..=1.0).contains(&self.report_threshold) {
            return Err("report_threshold must be in [0, 1]".to_string());
        }
        Ok(())
    }

    /// The absolute cluster floor to use for a capture with the given sample
    /// rate: the configured value, or one sample period.
    pub fn resolve_cluster_floor(&self, sample_rate: f64) -> f64 {
        self.cluster_floor.unwrap_or(1.0 / sample_rate)
    }
}
