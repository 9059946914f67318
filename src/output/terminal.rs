//! Human-readable terminal output with ANSI colors.

use colored::Colorize;

use super::format_duration;
use crate::result::Analysis;
use crate::statistics::{Histogram, LevelStats};
use crate::types::{Capture, Cluster};

/// Width of the longest histogram bar, in characters.
const BAR_WIDTH: usize = 40;

/// Clusters shown per level in the cluster listing.
const CLUSTERS_SHOWN: usize = 5;

/// Format the default summary: capture metadata, per-level timing, and the
/// ranked protocol guesses.
pub fn format_summary(analysis: &Analysis, source: &str) -> String {
    let mut out = String::new();

    out.push_str(&format!("File: {}\n", source));
    out.push_str(&format!(
        "Sample rate: {:.1} MHz\n",
        analysis.sample_rate / 1e6
    ));
    out.push_str(&format!(
        "Capture duration: {:.3}s\n",
        analysis.capture_duration
    ));
    out.push_str(&format!(
        "Signal duration: {:.3}s\n",
        analysis.signal_duration
    ));
    out.push_str(&format!("Initial state: {}\n", analysis.initial_level));
    out.push_str(&format!("Total transitions: {}\n\n", analysis.transition_count));

    if analysis.no_signal {
        out.push_str(&format!(
            "{}\n",
            "No measurable signal: fewer than 2 transitions.".yellow()
        ));
        out.push_str(&format_guesses(analysis));
        return out;
    }

    out.push_str(&format!("{}\n", "Timing Summary".bold()));
    out.push_str(&format!("{}\n", "-".repeat(40)));
    out.push_str(&format_stats_line("All durations", analysis.all_stats.as_ref()));
    out.push_str(&format_stats_line("HIGH pulses", analysis.high_stats.as_ref()));
    out.push_str(&format_stats_line("LOW gaps", analysis.low_stats.as_ref()));
    out.push('\n');

    out.push_str(&format_guesses(analysis));
    out
}

fn format_stats_line(label: &str, stats: Option<&LevelStats>) -> String {
    match stats {
        Some(s) => format!(
            "{} ({}): min={}  max={}  mean={}\n",
            label,
            s.count,
            format_duration(s.min),
            format_duration(s.max),
            format_duration(s.mean)
        ),
        None => format!("{}: no data\n", label),
    }
}

fn format_guesses(analysis: &Analysis) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Protocol Guesses".bold()));
    out.push_str(&format!("{}\n", "-".repeat(40)));
    for guess in &analysis.guesses {
        let pct = guess.confidence * 100.0;
        let confidence = format!("{:.0}% confidence", pct);
        let confidence = if pct >= 80.0 {
            confidence.green()
        } else if pct >= 50.0 {
            confidence.yellow()
        } else {
            confidence.dimmed()
        };
        let name = match guess.params.baud_rate {
            Some(baud) => format!("{} ({} baud)", guess.protocol, baud),
            None => guess.protocol.to_string(),
        };
        out.push_str(&format!("  {} ({})\n", name.bold(), confidence));
        if !guess.params.detail.is_empty() {
            out.push_str(&format!("    {}\n", guess.params.detail.dimmed()));
        }
    }
    out
}

/// Format one histogram as ASCII bars with unit-scaled bucket labels.
pub fn format_histogram(histogram: Option<&Histogram>, title: &str) -> String {
    let Some(histogram) = histogram else {
        return format!("{}: no data\n", title);
    };

    let mut out = String::new();
    out.push_str(&format!("\n{}\n", title.bold()));
    out.push_str(&format!("{}\n", "=".repeat(60)));

    let max_count = histogram.max_count();
    for bucket in &histogram.buckets {
        let bar_len = if max_count > 0 {
            BAR_WIDTH * bucket.count / max_count
        } else {
            0
        };
        out.push_str(&format!(
            "{:>9}-{:>9} |{} ({})\n",
            format_duration(bucket.lo),
            format_duration(bucket.hi),
            "#".repeat(bar_len),
            bucket.count
        ));
    }
    out
}

/// Format per-level cluster listings (top clusters by member count).
pub fn format_clusters(analysis: &Analysis) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Detected Timing Clusters".bold()));
    out.push_str(&format!("{}\n", "-".repeat(40)));
    out.push_str(&format_cluster_list(
        "HIGH pulse clusters:",
        &analysis.high_clusters_by_count(),
    ));
    out.push_str(&format_cluster_list(
        "LOW gap clusters:",
        &analysis.low_clusters_by_count(),
    ));
    out
}

fn format_cluster_list(label: &str, clusters: &[Cluster]) -> String {
    let mut out = format!("{}\n", label);
    if clusters.is_empty() {
        out.push_str("  no data\n");
        return out;
    }
    for cluster in clusters.iter().take(CLUSTERS_SHOWN) {
        out.push_str(&format!(
            "  ~{} ({} occurrences)\n",
            format_duration(cluster.representative),
            cluster.count
        ));
    }
    out
}

/// Format the first `n` raw transition timestamps, unprocessed.
pub fn format_raw(capture: &Capture, n: usize) -> String {
    let shown = n.min(capture.transition_times.len());
    let mut out = format!("{}\n", format!("First {} Transitions", shown).bold());
    out.push_str(&format!("{}\n", "-".repeat(40)));
    for (i, &t) in capture.transition_times.iter().take(n).enumerate() {
        out.push_str(&format!("  [{:3}] {:.9}\n", i, t));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Analyzer;
    use crate::types::{Capture, Level};

    fn sample_analysis() -> (Analysis, Capture) {
        let capture = Capture {
            sample_rate: 24e6,
            initial_level: Level::High,
            transition_times: vec![0.001, 0.002, 0.004, 0.005, 0.007],
            begin_time: 0.0,
            end_time: 0.01,
        };
        let analysis = Analyzer::new().analyze(&capture).unwrap();
        (analysis, capture)
    }

    #[test]
    fn summary_contains_metadata() {
        let (analysis, _) = sample_analysis();
        let text = format_summary(&analysis, "capture.txt");
        assert!(text.contains("File: capture.txt"));
        assert!(text.contains("Sample rate: 24.0 MHz"));
        assert!(text.contains("Total transitions: 5"));
        assert!(text.contains("Protocol Guesses"));
    }

    #[test]
    fn summary_marks_no_signal() {
        let capture = Capture {
            sample_rate: 1e6,
            initial_level: Level::Low,
            transition_times: vec![0.5],
            begin_time: 0.0,
            end_time: 1.0,
        };
        let analysis = Analyzer::new().analyze(&capture).unwrap();
        let text = format_summary(&analysis, "flat.txt");
        assert!(text.contains("fewer than 2 transitions"));
        assert!(text.contains("unknown"));
    }

    #[test]
    fn histogram_renders_bars() {
        let (analysis, _) = sample_analysis();
        let text = format_histogram(analysis.all_histogram.as_ref(), "All Durations");
        assert!(text.contains("All Durations"));
        assert!(text.contains('#'));
    }

    #[test]
    fn histogram_no_data() {
        let text = format_histogram(None, "HIGH Pulse Durations");
        assert!(text.contains("no data"));
    }

    #[test]
    fn clusters_listing() {
        let (analysis, _) = sample_analysis();
        let text = format_clusters(&analysis);
        assert!(text.contains("HIGH pulse clusters:"));
        assert!(text.contains("LOW gap clusters:"));
        assert!(text.contains("occurrences"));
    }

    #[test]
    fn raw_listing_caps_at_available() {
        let (_, capture) = sample_analysis();
        let text = format_raw(&capture, 100);
        assert!(text.contains("First 5 Transitions"));
        assert!(text.contains("[  0]"));
    }
}
