//! Brand penalty and floor enforcement.
//!
//! Motors from defunct manufacturers (Johnson, Evinrude, OMC) resell for
//! materially less: parts and service are scarce and wholesale buyers
//! discount accordingly. The adjuster applies the configured penalty
//! factor to both bounds of a range and enforces the minimum trade floor.

use tracing::info;

use super::round::median_rounded_to_25;
use crate::config::ResolvedConfig;

/// Outcome of a brand adjustment pass.
#[derive(Debug, Clone, Copy)]
pub struct AdjustedRange {
    pub low: f64,
    pub high: f64,
    pub penalty_applied: bool,
    /// Factor actually applied; 1.0 when no denylisted brand matched.
    pub factor: f64,
}

/// Apply the brand penalty (if any) to a low/high range and floor both
/// bounds at the configured minimum.
///
/// The explanatory note lands in `factors` at most once, so the adjuster
/// can be re-run over the same range without duplicating notes. When a
/// penalty hits, a structured audit event records the reduction for
/// operational monitoring; the event is best-effort and never part of the
/// return contract.
pub fn apply_brand_adjustments(
    low: f64,
    high: f64,
    brand: &str,
    factors: &mut Vec<String>,
    config: &ResolvedConfig,
) -> AdjustedRange {
    let floor = config.min_trade_value;

    let (mut adj_low, mut adj_high, penalty_applied, factor) = match config.penalty_for(brand) {
        Some(penalty) if penalty.factor < 1.0 => {
            let note = format!(
                "{} value reduced: manufacturer out of business, parts and service are limited",
                penalty.label
            );
            if !factors.contains(&note) {
                factors.push(note);
            }
            (
                (low * penalty.factor).max(floor),
                (high * penalty.factor).max(floor),
                true,
                penalty.factor,
            )
        }
        _ => (low, high, false, 1.0),
    };

    // Floor both bounds whether or not a penalty hit.
    adj_low = adj_low.max(floor);
    adj_high = adj_high.max(floor);

    if penalty_applied {
        info!(
            brand,
            factor,
            original_low = low,
            original_high = high,
            adjusted_low = adj_low,
            adjusted_high = adj_high,
            rounded = median_rounded_to_25(adj_low, adj_high, floor),
            "Brand penalty applied"
        );
    }

    AdjustedRange {
        low: adj_low,
        high: adj_high,
        penalty_applied,
        factor,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
