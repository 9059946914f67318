//! JSON rendering of analysis results.

use crate::result::Analysis;

/// Serialize an [`Analysis`] as pretty-printed JSON.
pub fn to_json(analysis: &Analysis) -> serde_json::Result<String> {
    serde_json::to_string_pretty(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Analyzer;
    use crate::types::{Capture, Level};

    #[test]
    fn json_roundtrips_through_serde() {
        let capture = Capture {
            sample_rate: 1e6,
            initial_level: Level::High,
            transition_times: vec![0.001, 0.002, 0.003],
            begin_time: 0.0,
            end_time: 0.01,
        };
        let analysis = Analyzer::new().analyze(&capture).unwrap();
        let json = to_json(&analysis).unwrap();
        assert!(json.contains("\"guesses\""));

        let parsed: Analysis = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.transition_count, analysis.transition_count);
        assert_eq!(parsed.guesses.len(), analysis.guesses.len());
    }
}
