//! Interval extraction: from transition timestamps to labeled intervals.
//!
//! A capture with `n` transitions yields `n - 1` intervals, one per gap
//! between consecutive timestamps. The span before the first transition is
//! dropped: its start time lies outside anything the timestamps constrain,
//! so its duration would be meaningless for timing statistics.
//!
//! Level assignment: every transition flips the level, so the gap after the
//! first transition holds `initial_level.opposite()`; levels then strictly
//! alternate. Equivalently, interval `i` is at `initial_level.opposite()`
//! when `i` is even and at `initial_level` when `i` is odd. This holds for
//! both initial levels and is tested for both.

use crate::error::AnalyzeError;
use crate::types::{Capture, Interval, Level};

/// Validate a capture's structural invariants.
///
/// Checks that the sample rate is finite and positive and that the
/// transition timestamps are finite and strictly increasing. A failure here
/// is fatal: no heuristic runs on a malformed capture.
///
/// # Errors
///
/// Returns [`AnalyzeError::MalformedCapture`] with the first violation found.
pub fn validate_capture(capture: &Capture) -> Result<(), AnalyzeError> {
    if !(capture.sample_rate.is_finite() && capture.sample_rate > 0.0) {
        return Err(AnalyzeError::MalformedCapture {
            reason: format!("sample_rate must be positive, got {}", capture.sample_rate),
        });
    }
    for (i, window) in capture.transition_times.windows(2).enumerate() {
        if !window[1].is_finite() || !window[0].is_finite() {
            return Err(AnalyzeError::MalformedCapture {
                reason: format!("non-finite timestamp near index {}", i),
            });
        }
        if window[1] <= window[0] {
            return Err(AnalyzeError::MalformedCapture {
                reason: format!(
                    "transition_times not strictly increasing at index {}: {} then {}",
                    i, window[0], window[1]
                ),
            });
        }
    }
    if let Some(&first) = capture.transition_times.first() {
        if !first.is_finite() {
            return Err(AnalyzeError::MalformedCapture {
                reason: "non-finite timestamp at index 0".to_string(),
            });
        }
    }
    Ok(())
}

/// Lazy, restartable iterator over the intervals of a capture.
///
/// Borrows the capture; cloning the iterator restarts it from the first
/// interval. Construction validates the capture and fails for fewer than 2
/// transitions, so iteration itself cannot fail.
#[derive(Debug, Clone)]
pub struct Intervals<'a> {
    times: &'a [f64],
    first_level: Level,
    next: usize,
}

impl<'a> Intervals<'a> {
    /// Build the interval sequence for a capture.
    ///
    /// # Errors
    ///
    /// [`AnalyzeError::MalformedCapture`] for structural violations;
    /// [`AnalyzeError::InsufficientData`] when fewer than 2 transitions
    /// exist (callers may treat the latter as "constant line").
    pub fn new(capture: &'a Capture) -> Result<Self, AnalyzeError> {
        validate_capture(capture)?;
        if capture.transition_times.len() < 2 {
            return Err(AnalyzeError::InsufficientData {
                transitions: capture.transition_times.len(),
            });
        }
        Ok(Self {
            times: &capture.transition_times,
            first_level: capture.initial_level.opposite(),
            next: 0,
        })
    }

    /// Number of intervals this sequence yields in total.
    pub fn total(&self) -> usize {
        self.times.len() - 1
    }

    /// Collect the remaining intervals into a vector.
    pub fn collect_vec(self) -> Vec<Interval> {
        self.collect()
    }
}

impl Iterator for Intervals<'_> {
    type Item = Interval;

    fn next(&mut self) -> Option<Interval> {
        let i = self.next;
        if i + 1 >= self.times.len() {
            return None;
        }
        self.next += 1;
        let level = if i % 2 == 0 {
            self.first_level
        } else {
            self.first_level.opposite()
        };
        Some(Interval {
            index: i,
            level,
            duration: self.times[i + 1] - self.times[i],
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.times.len() - 1).saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Intervals<'_> {}

/// Split interval durations by level.
///
/// Returns `(high_durations, low_durations)` in interval order. Either side
/// may be empty; an empty level is reported as "no data" downstream rather
/// than aborting the other level's analysis.
pub fn durations_by_level(intervals: &[Interval]) -> (Vec<f64>, Vec<f64>) {
    let mut high = Vec::new();
    let mut low = Vec::new();
    for interval in intervals {
        match interval.level {
            Level::High => high.push(interval.duration),
            Level::Low => low.push(interval.duration),
        }
    }
    (high, low)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(initial_level: Level, times: Vec<f64>) -> Capture {
        Capture {
            sample_rate: 1e6,
            initial_level,
            transition_times: times,
            begin_time: 0.0,
            end_time: 1.0,
        }
    }

    #[test]
    fn count_and_sum_identities() {
        let cap = capture(Level::High, vec![0.001, 0.002, 0.004, 0.005, 0.009]);
        let intervals = Intervals::new(&cap).unwrap().collect_vec();
        assert_eq!(intervals.len(), cap.transition_times.len() - 1);

        let sum: f64 = intervals.iter().map(|iv| iv.duration).sum();
        let span = cap.transition_times.last().unwrap() - cap.transition_times.first().unwrap();
        assert!((sum - span).abs() < 1e-12, "durations must sum to the signal span");
    }

    #[test]
    fn alternation_from_initial_high() {
        let cap = capture(Level::High, vec![0.0, 0.1, 0.2, 0.3]);
        let levels: Vec<Level> = Intervals::new(&cap).unwrap().map(|iv| iv.level).collect();
        // Idle HIGH: the first transition drops the line LOW.
        assert_eq!(levels, vec![Level::Low, Level::High, Level::Low]);
    }

    #[test]
    fn alternation_from_initial_low() {
        let cap = capture(Level::Low, vec![0.0, 0.1, 0.2, 0.3]);
        let levels: Vec<Level> = Intervals::new(&cap).unwrap().map(|iv| iv.level).collect();
        assert_eq!(levels, vec![Level::High, Level::Low, Level::High]);
    }

    #[test]
    fn restartable_via_clone() {
        let cap = capture(Level::High, vec![0.0, 0.1, 0.2]);
        let mut iter = Intervals::new(&cap).unwrap();
        let fresh = iter.clone();
        iter.next();
        iter.next();
        assert_eq!(iter.clone().count(), 0);
        assert_eq!(fresh.count(), 2);
    }

    #[test]
    fn insufficient_data() {
        let cap = capture(Level::High, vec![0.5]);
        match Intervals::new(&cap) {
            Err(AnalyzeError::InsufficientData { transitions }) => assert_eq!(transitions, 1),
            other => panic!("expected InsufficientData, got {:?}", other),
        }

        let cap = capture(Level::High, vec![]);
        assert!(matches!(
            Intervals::new(&cap),
            Err(AnalyzeError::InsufficientData { transitions: 0 })
        ));
    }

    #[test]
    fn rejects_non_increasing_times() {
        let cap = capture(Level::High, vec![0.0, 0.2, 0.2]);
        assert!(matches!(
            Intervals::new(&cap),
            Err(AnalyzeError::MalformedCapture { .. })
        ));

        let cap = capture(Level::High, vec![0.0, 0.3, 0.1]);
        assert!(matches!(
            Intervals::new(&cap),
            Err(AnalyzeError::MalformedCapture { .. })
        ));
    }

    #[test]
    fn rejects_bad_sample_rate() {
        let mut cap = capture(Level::High, vec![0.0, 0.1]);
        cap.sample_rate = 0.0;
        assert!(matches!(
            validate_capture(&cap),
            Err(AnalyzeError::MalformedCapture { .. })
        ));
        cap.sample_rate = f64::NAN;
        assert!(validate_capture(&cap).is_err());
    }

    #[test]
    fn durations_split_by_level() {
        let cap = capture(Level::High, vec![0.0, 0.1, 0.3, 0.6]);
        let intervals = Intervals::new(&cap).unwrap().collect_vec();
        let (high, low) = durations_by_level(&intervals);
        // Levels are LOW, HIGH, LOW.
        assert_eq!(low.len(), 2);
        assert_eq!(high.len(), 1);
        assert!((high[0] - 0.2).abs() < 1e-12);
    }
}
