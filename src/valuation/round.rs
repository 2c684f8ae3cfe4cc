//! Display rounding.
//!
//! Reduces a low/high estimate range to the single customer-facing figure:
//! the median of the range, rounded to the nearest $25, never below the
//! minimum trade value.

use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Round the median of a range to the nearest $25 and floor the result at
/// `min_value`.
///
/// Ties round half-up: a median landing exactly between two $25 multiples
/// takes the higher one, so 387.50 becomes 400, not 375. Decimal
/// arithmetic keeps that tie line exact where f64 epsilon would smear it.
///
/// Pure and usable standalone for callers that only need a display figure
/// from an arbitrary range.
pub fn median_rounded_to_25(low: f64, high: f64, min_value: f64) -> i64 {
    let low = Decimal::from_f64(low).unwrap_or(Decimal::ZERO);
    let high = Decimal::from_f64(high).unwrap_or(Decimal::ZERO);
    let median = (low + high) / dec!(2);

    let rounded = (median / dec!(25))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        * dec!(25);

    let floor = Decimal::from_f64(min_value).unwrap_or(Decimal::ZERO);
    rounded.max(floor).to_i64().unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MIN_TRADE_VALUE;

    const MIN: f64 = DEFAULT_MIN_TRADE_VALUE;

    #[test]
    fn test_median_already_on_boundary() {
        // median 400
        assert_eq!(median_rounded_to_25(320.0, 480.0, MIN), 400);
    }

    #[test]
    fn test_median_rounds_up_past_half() {
        // median 397.5, nearest multiple is 400
        assert_eq!(median_rounded_to_25(330.0, 465.0, MIN), 400);
    }

    #[test]
    fn test_median_rounds_down_below_half() {
        // median 380 rounds down to 375
        assert_eq!(median_rounded_to_25(350.0, 410.0, MIN), 375);
    }

    #[test]
    fn test_exact_half_rounds_up() {
        // median 362.5 sits exactly on the tie line and takes 375
        assert_eq!(median_rounded_to_25(350.0, 375.0, MIN), 375);
        // median exactly 387.5 takes 400
        assert_eq!(median_rounded_to_25(349.0, 426.0, MIN), 400);
    }

    #[test]
    fn test_just_below_tie_line_rounds_down() {
        // median 387.49, a hair under the 387.5 tie line
        assert_eq!(median_rounded_to_25(325.0, 449.98, MIN), 375);
    }

    #[test]
    fn test_floor_applies_after_rounding() {
        assert_eq!(median_rounded_to_25(0.0, 0.0, MIN), 100);
        assert_eq!(median_rounded_to_25(10.0, 20.0, MIN), 100);
        // A floor that is not itself a $25 multiple is honored verbatim.
        assert_eq!(median_rounded_to_25(10.0, 20.0, 110.0), 110);
        assert_eq!(median_rounded_to_25(10.0, 20.0, 250.0), 250);
    }

    #[test]
    fn test_floor_invariant_across_ranges() {
        for (low, high) in [
            (0.0, 0.0),
            (1.0, 2.0),
            (99.0, 101.0),
            (320.0, 480.0),
            (12.34, 56.78),
        ] {
            assert!(median_rounded_to_25(low, high, MIN) >= MIN as i64);
            assert!(median_rounded_to_25(low, high, 300.0) >= 300);
        }
    }

    #[test]
    fn test_large_range() {
        // median 11237.5 ties up to 11250
        assert_eq!(median_rounded_to_25(10000.0, 12475.0, MIN), 11250);
    }
}
