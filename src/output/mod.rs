//! Presentation of analysis results.
//!
//! The analytical core works in seconds throughout; everything here is
//! display-only, including the unit scaling.

mod json;
mod terminal;

pub use json::to_json;
pub use terminal::{format_clusters, format_histogram, format_raw, format_summary};

/// Render a duration in the most readable unit (us, ms, or s).
///
/// Display-only; never feed the result back into analysis.
pub fn format_duration(seconds: f64) -> String {
    let abs = seconds.abs();
    if abs < 1e-3 {
        format!("{:.1}us", seconds * 1e6)
    } else if abs < 1.0 {
        format!("{:.2}ms", seconds * 1e3)
    } else {
        format!("{:.3}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_to_readable_units() {
        assert_eq!(format_duration(8.68e-6), "8.7us");
        assert_eq!(format_duration(1.5e-3), "1.50ms");
        assert_eq!(format_duration(2.25), "2.250s");
    }

    #[test]
    fn boundary_values() {
        assert_eq!(format_duration(999e-6), "999.0us");
        assert_eq!(format_duration(999e-3), "999.00ms");
    }
}
