//! Tolerance-based merging of interval durations into timing clusters.
//!
//! Real protocols use a handful of distinct timing values (one bit period,
//! a clock half-period, a reset pulse). Clustering recovers those values
//! from jittery measurements: sort the durations, then greedily grow a
//! cluster while the next duration stays within tolerance of the cluster's
//! running mean.
//!
//! Two tolerances apply. A duration merges while it is within the relative
//! tolerance of the running mean *or* within the absolute floor; a new
//! cluster opens only when both are exceeded. The floor (one sample period
//! by default) keeps sub-resolution jitter from splitting clusters at very
//! small durations.
//!
//! Because the input is sorted first, the result depends only on the
//! multiset of durations, never on their original order, and re-clustering
//! the representatives yields one cluster each.

use crate::types::{Cluster, ClusterLevel};

/// Detect timing clusters in a duration sequence.
///
/// The input order does not matter; durations are sorted internally.
/// Returns clusters ordered by representative duration ascending. Empty
/// input yields an empty vector.
///
/// # Arguments
///
/// * `durations` - Interval durations in seconds
/// * `level` - Level tag to stamp on every produced cluster
/// * `rel_tolerance` - Relative merge tolerance, e.g. 0.10 for 10%
/// * `abs_floor` - Absolute merge tolerance in seconds
pub fn detect_clusters(
    durations: &[f64],
    level: ClusterLevel,
    rel_tolerance: f64,
    abs_floor: f64,
) -> Vec<Cluster> {
    if durations.is_empty() {
        return Vec::new();
    }

    let mut sorted = durations.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mut clusters = Vec::new();
    let mut mean = sorted[0];
    let mut count = 1usize;
    let mut lo = sorted[0];
    let mut hi = sorted[0];

    for &d in &sorted[1..] {
        let gap = d - mean;
        let within_rel = mean > 0.0 && gap / mean <= rel_tolerance;
        let within_abs = gap <= abs_floor;
        if within_rel || within_abs {
            // Incremental mean update; sorted input keeps the mean monotone.
            count += 1;
            mean += (d - mean) / count as f64;
            hi = d;
        } else {
            clusters.push(Cluster {
                representative: mean,
                count,
                min: lo,
                max: hi,
                level,
            });
            mean = d;
            count = 1;
            lo = d;
            hi = d;
        }
    }
    clusters.push(Cluster {
        representative: mean,
        count,
        min: lo,
        max: hi,
        level,
    });

    clusters
}

/// Secondary view: clusters ordered by member count descending.
///
/// Ties break by representative duration ascending so the ordering stays
/// deterministic.
pub fn by_count(clusters: &[Cluster]) -> Vec<Cluster> {
    let mut view = clusters.to_vec();
    view.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.representative.total_cmp(&b.representative))
    });
    view
}
