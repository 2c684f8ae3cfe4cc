//! Shared types for the trade-in valuation core.
//!
//! These types form the data model exchanged with the surrounding quoting
//! layers: the trade-in form payload coming in, bracket rows supplied by
//! the caller's data source, and the estimate going out. They are designed
//! to be stable so the engine and its callers can agree on them without
//! depending on each other's internals.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Condition
// ---------------------------------------------------------------------------

/// Physical condition grade of a traded-in motor.
///
/// Selects the bracket column on the bracket path and a multiplier on the
/// formula paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Excellent,
    Good,
    /// The default when the form leaves condition unset.
    #[default]
    Fair,
    Poor,
}

impl Condition {
    /// All grades, best first (useful for iteration).
    pub const ALL: &'static [Condition] = &[
        Condition::Excellent,
        Condition::Good,
        Condition::Fair,
        Condition::Poor,
    ];
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Excellent => write!(f, "excellent"),
            Condition::Good => write!(f, "good"),
            Condition::Fair => write!(f, "fair"),
            Condition::Poor => write!(f, "poor"),
        }
    }
}

/// Attempt to parse a string into a Condition (case-insensitive).
impl std::str::FromStr for Condition {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "excellent" => Ok(Condition::Excellent),
            "good" => Ok(Condition::Good),
            "fair" => Ok(Condition::Fair),
            "poor" => Ok(Condition::Poor),
            _ => Err(anyhow::anyhow!("Unknown condition grade: {s}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Confidence
// ---------------------------------------------------------------------------

/// How directly an estimate derives from reference data.
///
/// `High` means an exact bracket hit on a recent motor; `Low` means a
/// formula extrapolation, or a motor old enough that bracket data is thin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::High => write!(f, "high"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::Low => write!(f, "low"),
        }
    }
}

// ---------------------------------------------------------------------------
// Trade-in form payload
// ---------------------------------------------------------------------------

/// A customer's trade-in as captured by the quote wizard.
///
/// Only `brand`, `year`, `horsepower`, and `condition` feed the engine;
/// the remaining fields ride along for the caller (quote rendering, serial
/// lookups). Every field defaults so a partial payload still estimates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeInInfo {
    #[serde(default)]
    pub has_trade_in: bool,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub horsepower: f64,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub condition: Condition,
}

impl fmt::Display for TradeInInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} HP ({}, {})",
            self.brand, self.horsepower, self.year, self.condition
        )
    }
}

impl TradeInInfo {
    /// Helper to build a test/sample trade-in with sensible defaults.
    #[cfg(test)]
    pub fn sample() -> Self {
        TradeInInfo {
            has_trade_in: true,
            brand: "Mercury".to_string(),
            year: 2021,
            horsepower: 90.0,
            model: "90ELPT FourStroke".to_string(),
            serial_number: "1C123456".to_string(),
            condition: Condition::Good,
        }
    }
}

// ---------------------------------------------------------------------------
// Bracket row
// ---------------------------------------------------------------------------

/// One row of the valuation bracket table: four condition-graded trade
/// values for a (brand, year-range, horsepower) combination.
///
/// Within a (brand, year-range) group horsepower values are expected to be
/// distinct, and values non-increasing from excellent to poor. That is a
/// data-quality expectation of the supplier, not something the engine
/// enforces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeValuationBracket {
    pub brand: String,
    /// Year-range label such as `"2020-2024"`. Labels outside the fixed
    /// bucket set are never selected.
    pub year_range: String,
    pub horsepower: f64,
    pub excellent: f64,
    pub good: f64,
    pub fair: f64,
    pub poor: f64,
}

impl TradeValuationBracket {
    /// The bracket cell for a condition grade.
    pub fn value_for(&self, condition: Condition) -> f64 {
        match condition {
            Condition::Excellent => self.excellent,
            Condition::Good => self.good,
            Condition::Fair => self.fair,
            Condition::Poor => self.poor,
        }
    }
}

// ---------------------------------------------------------------------------
// Estimate
// ---------------------------------------------------------------------------

/// A complete trade-in value estimate with audit fields.
///
/// `low`/`high` are the post-adjustment bounds, `average` their midpoint.
/// The `pre_penalty_*` fields preserve the range as it stood before the
/// brand penalty so quotes and admin tooling can show the reduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeValueEstimate {
    pub low: f64,
    pub high: f64,
    pub average: f64,
    pub confidence: Confidence,
    /// Human-readable provenance label ("Bracket table match", ...).
    pub source: String,
    /// Human-readable notes accumulated while estimating. Append-only and
    /// never duplicated.
    pub factors: Vec<String>,
    pub pre_penalty_low: f64,
    pub pre_penalty_high: f64,
    pub penalty_applied: bool,
    /// Factor actually applied to the bounds; 1.0 when no penalty hit.
    pub penalty_factor: f64,
}

impl fmt::Display for TradeValueEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${:.0}-${:.0} (avg ${:.0}, {} confidence, {})",
            self.low, self.high, self.average, self.confidence, self.source
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- Condition tests --

    #[test]
    fn test_condition_display() {
        assert_eq!(format!("{}", Condition::Excellent), "excellent");
        assert_eq!(format!("{}", Condition::Poor), "poor");
    }

    #[test]
    fn test_condition_from_str_case_insensitive() {
        assert_eq!(
            "Excellent".parse::<Condition>().unwrap(),
            Condition::Excellent
        );
        assert_eq!("GOOD".parse::<Condition>().unwrap(), Condition::Good);
        assert_eq!("fair".parse::<Condition>().unwrap(), Condition::Fair);
        assert!("mint".parse::<Condition>().is_err());
    }

    #[test]
    fn test_condition_default_is_fair() {
        assert_eq!(Condition::default(), Condition::Fair);
    }

    #[test]
    fn test_condition_serialized_lowercase() {
        let json = serde_json::to_string(&Condition::Excellent).unwrap();
        assert_eq!(json, "\"excellent\"");
        let back: Condition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Condition::Excellent);
    }

    // -- TradeInInfo tests --

    #[test]
    fn test_trade_in_partial_payload_defaults() {
        let info: TradeInInfo = serde_json::from_str(r#"{"brand": "Yamaha"}"#).unwrap();
        assert_eq!(info.brand, "Yamaha");
        assert_eq!(info.year, 0);
        assert_eq!(info.horsepower, 0.0);
        assert_eq!(info.condition, Condition::Fair);
        assert!(!info.has_trade_in);
        assert!(info.model.is_empty());
    }

    #[test]
    fn test_trade_in_display() {
        let info = TradeInInfo::sample();
        assert_eq!(format!("{info}"), "Mercury 90 HP (2021, good)");
    }

    // -- Bracket tests --

    #[test]
    fn test_bracket_value_for_selects_column() {
        let bracket = TradeValuationBracket {
            brand: "Mercury".to_string(),
            year_range: "2020-2024".to_string(),
            horsepower: 90.0,
            excellent: 8000.0,
            good: 6400.0,
            fair: 4800.0,
            poor: 3200.0,
        };
        assert_eq!(bracket.value_for(Condition::Excellent), 8000.0);
        assert_eq!(bracket.value_for(Condition::Good), 6400.0);
        assert_eq!(bracket.value_for(Condition::Fair), 4800.0);
        assert_eq!(bracket.value_for(Condition::Poor), 3200.0);
    }
}
