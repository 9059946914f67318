//! Tunable constants for clustering and protocol scoring.
//!
//! The confidence formulas are heuristic by nature; the weights below are
//! tuning knobs chosen so clean synthetic signals score where the tests
//! expect them, not reproductions of any rigorously specified model.

/// Standard UART baud rates the classifier tries, in bits per second.
pub const COMMON_BAUD_RATES: &[u32] = &[
    300, 1_200, 2_400, 4_800, 9_600, 19_200, 38_400, 57_600, 115_200, 230_400, 460_800, 921_600,
];

/// Default relative tolerance for cluster merging (10%).
pub const DEFAULT_CLUSTER_TOLERANCE: f64 = 0.10;

/// Default number of histogram buckets.
pub const DEFAULT_HISTOGRAM_BUCKETS: usize = 20;

/// Confidence below which a heuristic's guess is not reported.
pub const DEFAULT_REPORT_THRESHOLD: f64 = 0.5;

/// Acceptance window for the UART prefilter: the shortest observed duration
/// must be within [0.7, 1.3] of a candidate bit period.
pub const UART_MIN_PERIOD_RATIO: f64 = 0.7;
/// Upper bound of the UART prefilter window.
pub const UART_MAX_PERIOD_RATIO: f64 = 1.3;

/// Multiplicative penalty applied to UART confidence when the line does not
/// idle HIGH.
pub const UART_IDLE_PENALTY: f64 = 0.5;

/// Largest mean residual (in bit periods) a baud candidate may have and
/// still be reported. Without this gate, long multi-timing signals "fit"
/// fast bauds with large sloppy multiples.
pub const UART_MAX_MEAN_RESIDUAL: f64 = 0.15;

/// Ceiling on SPI confidence from a single channel. Without data/select
/// channels the heuristic can only claim "looks like a clock".
pub const SPI_CONFIDENCE_CEILING: f64 = 0.4;

/// Ceiling on single-channel I2C confidence ("possible clock line").
pub const I2C_SINGLE_CHANNEL_CEILING: f64 = 0.2;

/// Confidence added per detected I2C condition kind (START, STOP) in the
/// two-channel check.
pub const I2C_CONDITION_WEIGHT: f64 = 0.3;

/// Extra confidence when START and STOP counts are balanced, as a real I2C
/// bus produces them in pairs.
pub const I2C_PAIR_BONUS: f64 = 0.2;

/// 1-Wire reset pulse window in seconds (LOW for 400-500 us).
pub const ONEWIRE_RESET_RANGE: (f64, f64) = (400e-6, 500e-6);
/// 1-Wire short slot window in seconds (write-1 / read sampling, 1-15 us).
pub const ONEWIRE_SHORT_RANGE: (f64, f64) = (1e-6, 15e-6);
/// 1-Wire medium slot window in seconds (write-0 / presence, 60-120 us).
pub const ONEWIRE_MEDIUM_RANGE: (f64, f64) = (60e-6, 120e-6);

/// Additive 1-Wire confidence weights: reset pulse, short slots, medium
/// slots, and an "all three present" bonus.
pub const ONEWIRE_WEIGHTS: [f64; 4] = [0.35, 0.25, 0.25, 0.15];

/// Scale applied to the unknown fallback: `(1 - best) * UNKNOWN_SCALE`, so
/// the fallback never exceeds 0.5.
pub const UNKNOWN_SCALE: f64 = 0.5;
