//! UART heuristic: consistent integer multiples of a standard bit period.
//!
//! UART frames are start bit + data bits + stop bit(s) at a fixed baud
//! rate, so every constant-level span is an integer number of bit periods.
//! For each standard baud rate whose bit period is close to the shortest
//! observed duration, we measure how far each duration sits from its
//! nearest integer multiple of the period; a clean UART capture has tiny
//! residuals everywhere.

use super::{Heuristic, SignalFeatures};
use crate::constants::{
    COMMON_BAUD_RATES, UART_IDLE_PENALTY, UART_MAX_MEAN_RESIDUAL, UART_MAX_PERIOD_RATIO,
    UART_MIN_PERIOD_RATIO,
};
use crate::types::{Level, Protocol, ProtocolGuess, ProtocolParams};

/// Scores how UART-like a capture is. See the module docs.
pub struct UartHeuristic;

impl Heuristic for UartHeuristic {
    fn protocol(&self) -> Protocol {
        Protocol::Uart
    }

    fn evaluate(&self, sig: &SignalFeatures<'_>) -> ProtocolGuess {
        let Some(min_duration) = sig.min_duration() else {
            return ProtocolGuess::plain(Protocol::Uart, 0.0, "no intervals");
        };

        let mut best: Option<(u32, f64, f64)> = None; // (baud, bit_period, confidence)

        for &baud in COMMON_BAUD_RATES {
            let bit_period = 1.0 / f64::from(baud);

            // The shortest span in a UART capture is a single bit, so the
            // candidate period must be close to it.
            let ratio = min_duration / bit_period;
            if !(UART_MIN_PERIOD_RATIO..UART_MAX_PERIOD_RATIO).contains(&ratio) {
                continue;
            }

            let mean_residual = mean_multiple_residual(sig.intervals.iter().map(|iv| iv.duration), bit_period);
            if mean_residual >= UART_MAX_MEAN_RESIDUAL {
                continue;
            }

            let mut confidence = (1.0 - mean_residual).clamp(0.0, 1.0);
            if sig.initial_level != Level::High {
                // UART idles HIGH; anything else is a strong counter-signal.
                confidence *= UART_IDLE_PENALTY;
            }

            match best {
                Some((_, _, best_conf)) if best_conf >= confidence => {}
                _ => best = Some((baud, bit_period, confidence)),
            }
        }

        match best {
            Some((baud, bit_period, confidence)) => ProtocolGuess {
                protocol: Protocol::Uart,
                confidence,
                params: ProtocolParams {
                    baud_rate: Some(baud),
                    bit_period: Some(bit_period),
                    detail: format!("bit period ~{:.2} us ({} baud)", bit_period * 1e6, baud),
                    ..ProtocolParams::default()
                },
            },
            None => ProtocolGuess::plain(Protocol::Uart, 0.0, "no standard baud rate fits"),
        }
    }
}

/// Mean distance of each duration from its nearest integer multiple of
/// `period`, in units of the period.
fn mean_multiple_residual(durations: impl Iterator<Item = f64>, period: f64) -> f64 {
    let mut sum = 0.0;
    let mut n = 0usize;
    for duration in durations {
        let multiple = duration / period;
        sum += (multiple - multiple.round()).abs();
        n += 1;
    }
    if n == 0 {
        return 1.0;
    }
    sum / n as f64
}
