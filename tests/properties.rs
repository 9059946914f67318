//! Invariant tests for the extraction and clustering pipeline.

use rand::seq::SliceRandom;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use protoprobe::cluster::{by_count, detect_clusters};
use protoprobe::intervals::Intervals;
use protoprobe::{Capture, ClusterLevel, Level};

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
fn interval_count_and_sum() {
    let times: Vec<f64> = (0..200).map(|i| 0.001 * f64::from(i) + 1e-7 * f64::from(i % 7)).collect();
    let cap = capture(Level::High, times.clone());
    let intervals: Vec<_> = Intervals::new(&cap).unwrap().collect();

    assert_eq!(intervals.len(), times.len() - 1);
    let sum: f64 = intervals.iter().map(|iv| iv.duration).sum();
    let span = times.last().unwrap() - times.first().unwrap();
    assert!((sum - span).abs() < 1e-9);
}

#[test]
fn levels_alternate_for_both_initial_levels() {
    let times: Vec<f64> = (0..50).map(|i| 0.01 * f64::from(i)).collect();
    for initial in [Level::Low, Level::High] {
        let cap = capture(initial, times.clone());
        let intervals: Vec<_> = Intervals::new(&cap).unwrap().collect();
        assert_eq!(intervals[0].level, initial.opposite());
        for pair in intervals.windows(2) {
            assert_eq!(
                pair[1].level,
                pair[0].level.opposite(),
                "levels must strictly alternate"
            );
        }
    }
}

#[test]
fn clustering_is_order_independent() {
    // Three timing groups with mild jitter.
    let mut durations = Vec::new();
    for i in 0..30 {
        durations.push(10e-6 + f64::from(i % 5) * 0.1e-6);
        durations.push(100e-6 + f64::from(i % 3) * 1.0e-6);
    }
    for i in 0..5 {
        durations.push(480e-6 + f64::from(i) * 2e-6);
    }

    let reference = detect_clusters(&durations, ClusterLevel::Mixed, 0.10, 1e-7);

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x5eed);
    for _ in 0..10 {
        durations.shuffle(&mut rng);
        let shuffled = detect_clusters(&durations, ClusterLevel::Mixed, 0.10, 1e-7);
        assert_eq!(shuffled.len(), reference.len());
        for (a, b) in shuffled.iter().zip(&reference) {
            assert!((a.representative - b.representative).abs() < 1e-12);
            assert_eq!(a.count, b.count);
        }
    }
}

#[test]
fn clustering_is_idempotent_on_representatives() {
    let durations: Vec<f64> = vec![
        5e-6, 5.2e-6, 4.9e-6, 60e-6, 62e-6, 61e-6, 480e-6, 478e-6, 483e-6,
    ];
    let clusters = detect_clusters(&durations, ClusterLevel::Low, 0.10, 1e-7);
    let representatives: Vec<f64> = clusters.iter().map(|c| c.representative).collect();

    let reclustered = detect_clusters(&representatives, ClusterLevel::Low, 0.10, 1e-7);
    assert_eq!(reclustered.len(), clusters.len());
    assert!(reclustered.iter().all(|c| c.count == 1));
}

#[test]
fn cluster_views_agree_on_totals() {
    let durations = [10e-6, 10.1e-6, 10.2e-6, 55e-6, 480e-6, 481e-6];
    let clusters = detect_clusters(&durations, ClusterLevel::Mixed, 0.10, 1e-7);
    let view = by_count(&clusters);

    let total_asc: usize = clusters.iter().map(|c| c.count).sum();
    let total_desc: usize = view.iter().map(|c| c.count).sum();
    assert_eq!(total_asc, durations.len());
    assert_eq!(total_desc, durations.len());

    for pair in clusters.windows(2) {
        assert!(pair[0].representative <= pair[1].representative);
    }
    for pair in view.windows(2) {
        assert!(pair[0].count >= pair[1].count);
    }
}
