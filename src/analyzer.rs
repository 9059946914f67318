//! Main [`Analyzer`] entry point.
//!
//! One capture in, one [`Analysis`] out: extract intervals, summarize the
//! duration distributions, cluster the timings, and run the protocol
//! heuristics. Pure batch computation; no I/O happens here.

use tracing::debug;

use crate::classify::{self, evaluate_pair, SignalFeatures};
use crate::cluster::detect_clusters;
use crate::config::Config;
use crate::error::AnalyzeError;
use crate::intervals::{durations_by_level, validate_capture, Intervals};
use crate::result::Analysis;
use crate::statistics::{summarize, Histogram};
use crate::types::{Capture, ClusterLevel, Protocol, ProtocolGuess};

/// Entry point for capture analysis.
///
/// Holds a [`Config`] and exposes builder-style setters for the common
/// knobs.
///
/// # Example
///
/// ```ignore
/// use protoprobe::Analyzer;
///
/// let analysis = Analyzer::new()
///     .cluster_tolerance(0.15)
///     .analyze(&capture)?;
/// println!("{}", analysis.top_guess().unwrap().protocol);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: Config,
}

impl Analyzer {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// The current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Set the relative cluster tolerance.
    pub fn cluster_tolerance(mut self, tolerance: f64) -> Self {
        self.config = self.config.cluster_tolerance(tolerance);
        self
    }

    /// Set the number of histogram buckets per level.
    pub fn histogram_buckets(mut self, buckets: usize) -> Self {
        self.config = self.config.histogram_buckets(buckets);
        self
    }

    /// Set the minimum confidence for reported guesses.
    pub fn report_threshold(mut self, threshold: f64) -> Self {
        self.config = self.config.report_threshold(threshold);
        self
    }

    /// Analyze a single capture.
    ///
    /// A capture with fewer than 2 transitions yields a well-formed
    /// degenerate result (a single unknown guess at confidence 0) rather
    /// than an error; the caller can treat it as a constant line.
    ///
    /// # Errors
    ///
    /// [`AnalyzeError::MalformedCapture`] when the capture is structurally
    /// invalid. No heuristic runs in that case.
    pub fn analyze(&self, capture: &Capture) -> Result<Analysis, AnalyzeError> {
        let intervals = match Intervals::new(capture) {
            Ok(iter) => iter.collect_vec(),
            Err(AnalyzeError::InsufficientData { transitions }) => {
                debug!(transitions, "capture has no measurable gaps");
                return Ok(self.degenerate(capture));
            }
            Err(err) => return Err(err),
        };

        let (high_durations, low_durations) = durations_by_level(&intervals);
        let all_durations: Vec<f64> = intervals.iter().map(|iv| iv.duration).collect();

        let floor = self.config.resolve_cluster_floor(capture.sample_rate);
        let tolerance = self.config.cluster_tolerance;
        let high_clusters =
            detect_clusters(&high_durations, ClusterLevel::High, tolerance, floor);
        let low_clusters = detect_clusters(&low_durations, ClusterLevel::Low, tolerance, floor);
        debug!(
            intervals = intervals.len(),
            high_clusters = high_clusters.len(),
            low_clusters = low_clusters.len(),
            "pipeline features extracted"
        );

        let sig = SignalFeatures {
            intervals: &intervals,
            high_durations: &high_durations,
            low_durations: &low_durations,
            high_clusters: &high_clusters,
            low_clusters: &low_clusters,
            initial_level: capture.initial_level,
            sample_rate: capture.sample_rate,
        };
        let guesses = classify::classify(&sig, &self.config);

        let buckets = self.config.histogram_buckets;
        Ok(Analysis {
            sample_rate: capture.sample_rate,
            initial_level: capture.initial_level,
            transition_count: capture.transition_times.len(),
            capture_duration: capture.capture_duration(),
            signal_duration: capture.signal_duration(),
            no_signal: false,
            all_stats: summarize(&all_durations),
            high_stats: summarize(&high_durations),
            low_stats: summarize(&low_durations),
            all_histogram: Histogram::compute(&all_durations, buckets),
            high_histogram: Histogram::compute(&high_durations, buckets),
            low_histogram: Histogram::compute(&low_durations, buckets),
            high_clusters,
            low_clusters,
            guesses,
            intervals,
        })
    }

    /// Analyze an SCL capture together with a paired SDA capture.
    ///
    /// Runs the normal single-channel analysis on `scl`, then the
    /// two-channel I2C START/STOP check. When the paired check scores
    /// higher than the single-channel I2C guess, it replaces it and the
    /// guess list is re-ranked.
    ///
    /// # Errors
    ///
    /// [`AnalyzeError::MalformedCapture`] when either capture is invalid.
    pub fn analyze_pair(&self, scl: &Capture, sda: &Capture) -> Result<Analysis, AnalyzeError> {
        validate_capture(sda)?;
        let mut analysis = self.analyze(scl)?;
        if analysis.no_signal {
            return Ok(analysis);
        }

        let pair_guess = evaluate_pair(scl, sda);
        debug!(confidence = pair_guess.confidence, "paired I2C check");
        if pair_guess.confidence >= self.config.report_threshold {
            analysis
                .guesses
                .retain(|g| g.protocol != Protocol::I2c || g.confidence > pair_guess.confidence);
            if !analysis
                .guesses
                .iter()
                .any(|g| g.protocol == Protocol::I2c)
            {
                analysis.guesses.push(pair_guess);
            }
            classify::rank(&mut analysis.guesses);
        }
        Ok(analysis)
    }

    /// Result for a capture with nothing to measure.
    fn degenerate(&self, capture: &Capture) -> Analysis {
        Analysis {
            sample_rate: capture.sample_rate,
            initial_level: capture.initial_level,
            transition_count: capture.transition_times.len(),
            capture_duration: capture.capture_duration(),
            signal_duration: capture.signal_duration(),
            no_signal: true,
            intervals: Vec::new(),
            all_stats: None,
            high_stats: None,
            low_stats: None,
            all_histogram: None,
            high_histogram: None,
            low_histogram: None,
            high_clusters: Vec::new(),
            low_clusters: Vec::new(),
            guesses: vec![ProtocolGuess::plain(
                Protocol::Unknown,
                0.0,
                "no transitions",
            )],
        }
    }
}
