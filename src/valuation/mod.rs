//! Trade-in valuation engine.
//!
//! Composes bracket matching, the fallback formulas, the brand penalty
//! adjuster, and display rounding into the single estimate entry point.
//! Estimation never fails: inputs the bracket data cannot answer fall
//! through to formula paths with reduced confidence, and numeric clamps
//! absorb the rest.

pub mod adjust;
pub mod matcher;
pub mod round;

use chrono::{Datelike, Utc};
use tracing::debug;

use crate::brackets::BracketTable;
use crate::config::{ResolvedConfig, TradeValuationConfig};
use crate::types::{Condition, Confidence, TradeInInfo, TradeValueEstimate};
use matcher::{find_bracket, BracketMatch, YearBucket};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Dollars of base value per horsepower in the formula paths.
const BASE_VALUE_PER_HP: f64 = 40.0;
/// Spread applied around a bracket cell to form the estimate range (15%).
const BRACKET_SPREAD: f64 = 0.15;
/// Horsepower distance beyond which a nearest-match downgrades confidence.
const HP_DELTA_CONFIDENCE_LIMIT: f64 = 15.0;
/// Model years earlier than this downgrade bracket matches to low
/// confidence.
const LOW_CONFIDENCE_BEFORE_YEAR: i32 = 2015;

/// Provenance label for estimates backed by a bracket row.
pub const SOURCE_BRACKET: &str = "Bracket table match";
/// Provenance label for motors older than all bracket data.
pub const SOURCE_AGE_BASED: &str = "Age-based estimate";
/// Provenance label for brands without bracket data.
pub const SOURCE_GENERIC: &str = "Generic estimate";

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Caller-supplied collaborators for an estimate.
///
/// All fields are optional: a missing or empty table falls back to the
/// built-in copy, a missing config to the built-in constants, and a
/// missing reference year to the current UTC year.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimateOptions<'a> {
    pub brackets: Option<&'a BracketTable>,
    pub config: Option<&'a TradeValuationConfig>,
    /// Year used for age arithmetic. Pin this for reproducible estimates.
    pub reference_year: Option<i32>,
}

// ---------------------------------------------------------------------------
// Path classification
// ---------------------------------------------------------------------------

/// Which estimation strategy applies to an input.
///
/// Classified once, up front. The empty-bracket-group case maps straight
/// to `Generic`, so there is no re-entrant retry to reason about.
#[derive(Debug)]
enum EstimatePath<'a> {
    /// Brand, year bucket, and a horsepower row all resolved.
    Exact(BracketMatch<'a>),
    /// Brand is known but the motor predates the oldest bucket.
    AgeBased,
    /// Brand has no bracket data at all, or its bucket group is empty.
    Generic,
}

fn classify<'a>(table: &'a BracketTable, info: &TradeInInfo) -> EstimatePath<'a> {
    if !table.has_brand(&info.brand) {
        return EstimatePath::Generic;
    }
    match YearBucket::for_year(info.year) {
        None => EstimatePath::AgeBased,
        Some(bucket) => match find_bracket(table, &info.brand, bucket, info.horsepower) {
            Some(m) => EstimatePath::Exact(m),
            None => EstimatePath::Generic,
        },
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Estimate the trade-in value of a motor.
///
/// Resolves the effective config and bracket table, classifies the input
/// onto one of the three estimation paths, applies the brand penalty and
/// floor, and returns the full estimate with audit fields. Never fails:
/// a degraded-confidence estimate always beats no estimate.
pub fn estimate(info: &TradeInInfo, options: &EstimateOptions<'_>) -> TradeValueEstimate {
    let config = options
        .config
        .map(TradeValuationConfig::resolve)
        .unwrap_or_default();
    let table = match options.brackets {
        Some(t) if !t.is_empty() => t,
        _ => BracketTable::builtin(),
    };
    let current_year = options.reference_year.unwrap_or_else(|| Utc::now().year());

    let mut factors: Vec<String> = Vec::new();
    let path = classify(table, info);
    debug!(
        brand = %info.brand,
        year = info.year,
        horsepower = info.horsepower,
        path = path_label(&path),
        "Estimation path classified"
    );

    let (pre_low, pre_high, confidence, source) = match &path {
        EstimatePath::Exact(m) => {
            exact_path(m, info, current_year, &config, &mut factors)
        }
        EstimatePath::AgeBased => age_based_path(info, current_year, &mut factors),
        EstimatePath::Generic => generic_path(info, current_year, &mut factors),
    };

    let adjusted =
        adjust::apply_brand_adjustments(pre_low, pre_high, &info.brand, &mut factors, &config);

    if factors.is_empty() {
        factors.push("Exact model match found".to_string());
    }

    debug!(
        brand = %info.brand,
        source,
        confidence = %confidence,
        low = adjusted.low,
        high = adjusted.high,
        "Trade-in estimate complete"
    );

    TradeValueEstimate {
        low: adjusted.low,
        high: adjusted.high,
        average: (adjusted.low + adjusted.high) / 2.0,
        confidence,
        source: source.to_string(),
        factors,
        pre_penalty_low: pre_low,
        pre_penalty_high: pre_high,
        penalty_applied: adjusted.penalty_applied,
        penalty_factor: adjusted.factor,
    }
}

/// Apply the brand penalty and display rounding to a range the caller
/// already holds, without re-estimating. Used by admin tooling that edits
/// ranges directly.
pub fn rounded_trade_in(
    low: f64,
    high: f64,
    brand: &str,
    config: Option<&TradeValuationConfig>,
) -> i64 {
    let config = config
        .map(TradeValuationConfig::resolve)
        .unwrap_or_default();
    let mut notes = Vec::new();
    let adjusted = adjust::apply_brand_adjustments(low, high, brand, &mut notes, &config);
    round::median_rounded_to_25(adjusted.low, adjusted.high, config.min_trade_value)
}

// ---------------------------------------------------------------------------
// Path computations
// ---------------------------------------------------------------------------

fn path_label(path: &EstimatePath<'_>) -> &'static str {
    match path {
        EstimatePath::Exact(_) => "bracket",
        EstimatePath::AgeBased => "age-based",
        EstimatePath::Generic => "generic",
    }
}

/// Bracket-backed estimate: the matched cell spread into a range, with the
/// recent-Mercury bonus and confidence downgrades for loose matches and
/// older model years.
fn exact_path(
    m: &BracketMatch<'_>,
    info: &TradeInInfo,
    current_year: i32,
    config: &ResolvedConfig,
    factors: &mut Vec<String>,
) -> (f64, f64, Confidence, &'static str) {
    let mut base = m.bracket.value_for(info.condition);

    let motor_age = current_year - info.year;
    if info.brand.eq_ignore_ascii_case("Mercury") && motor_age < config.mercury_max_age {
        base *= config.mercury_bonus_factor;
        factors.push("Recent Mercury model bonus applied".to_string());
    }

    if m.hp_delta > 0.0 {
        factors.push(format!(
            "Nearest bracket used: {} HP row for a {} HP motor",
            m.bracket.horsepower, info.horsepower
        ));
    }

    let mut confidence = Confidence::High;
    if m.hp_delta > HP_DELTA_CONFIDENCE_LIMIT {
        confidence = Confidence::Medium;
    }
    if info.year < LOW_CONFIDENCE_BEFORE_YEAR {
        confidence = Confidence::Low;
        factors.push("Older model year reduces valuation confidence".to_string());
    }

    (
        base * (1.0 - BRACKET_SPREAD),
        base * (1.0 + BRACKET_SPREAD),
        confidence,
        SOURCE_BRACKET,
    )
}

/// Formula estimate for motors older than all bracket data. Depreciation
/// walks down 3% per year past age 20 and bottoms out at 35% of base.
fn age_based_path(
    info: &TradeInInfo,
    current_year: i32,
    factors: &mut Vec<String>,
) -> (f64, f64, Confidence, &'static str) {
    let motor_age = current_year - info.year;
    let base = info.horsepower * BASE_VALUE_PER_HP;
    let depreciation = (1.0 - (motor_age as f64 - 20.0) * 0.03).max(0.35);
    let estimate = base * depreciation * age_condition_multiplier(info.condition);

    factors.push(format!(
        "Motor predates bracket data; valued by age ({} model year)",
        info.year
    ));

    (
        estimate * 0.8,
        estimate * 1.2,
        Confidence::Low,
        SOURCE_AGE_BASED,
    )
}

/// Brand-agnostic formula estimate. Steeper depreciation (10% per year,
/// floored at 30%) and a wider condition swing than the age-based path.
fn generic_path(
    info: &TradeInInfo,
    current_year: i32,
    factors: &mut Vec<String>,
) -> (f64, f64, Confidence, &'static str) {
    let motor_age = current_year - info.year;
    let base = info.horsepower * BASE_VALUE_PER_HP;
    let depreciation = (1.0 - motor_age as f64 * 0.1).max(0.3);
    let estimate = base * depreciation * generic_condition_multiplier(info.condition);

    factors.push("No applicable bracket data; industry-average formula used".to_string());

    (
        estimate * (1.0 - BRACKET_SPREAD),
        estimate * (1.0 + BRACKET_SPREAD),
        Confidence::Low,
        SOURCE_GENERIC,
    )
}

fn age_condition_multiplier(condition: Condition) -> f64 {
    match condition {
        Condition::Excellent => 1.0,
        Condition::Good => 0.8,
        Condition::Fair => 0.6,
        Condition::Poor => 0.35,
    }
}

fn generic_condition_multiplier(condition: Condition) -> f64 {
    match condition {
        Condition::Excellent => 1.2,
        Condition::Good => 1.0,
        Condition::Fair => 0.75,
        Condition::Poor => 0.45,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
