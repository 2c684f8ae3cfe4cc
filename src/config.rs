//! Valuation configuration with partial overrides.
//!
//! Dealers override individual knobs (brand penalty factors, the Mercury
//! bonus window, the minimum trade floor); anything left unset falls back
//! to a built-in constant. Overrides merge into a fully-resolved config
//! once, at the top of an estimate, rather than field-by-field at each use
//! site.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

/// Built-in penalty factor for motors from defunct manufacturers.
const DEFAULT_BRAND_PENALTY: f64 = 0.5;
/// Built-in Mercury bonus window: motors younger than this many model
/// years qualify.
const DEFAULT_MERCURY_MAX_AGE: i32 = 3;
/// Built-in Mercury bonus multiplier.
const DEFAULT_MERCURY_BONUS_FACTOR: f64 = 1.10;
/// Built-in minimum trade-in value in dollars. No estimate bound, and no
/// rounded display figure derived from one, falls below this.
pub const DEFAULT_MIN_TRADE_VALUE: f64 = 100.0;

// ---------------------------------------------------------------------------
// Overrides
// ---------------------------------------------------------------------------

/// Dealer-supplied overrides. Every field is optional and independently
/// defaulted.
///
/// Example TOML:
/// ```toml
/// johnson_penalty = 0.4
/// min_trade_value = 250.0
///
/// [mercury_bonus]
/// max_age = 5
/// factor = 1.15
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeValuationConfig {
    /// Penalty factor for Johnson-branded motors (manufacturer defunct).
    #[serde(default)]
    pub johnson_penalty: Option<f64>,
    /// Penalty factor for Evinrude-branded motors (manufacturer defunct).
    #[serde(default)]
    pub evinrude_penalty: Option<f64>,
    /// Penalty factor for OMC-branded motors (manufacturer defunct).
    #[serde(default)]
    pub omc_penalty: Option<f64>,
    #[serde(default)]
    pub mercury_bonus: Option<MercuryBonusOverride>,
    /// Minimum dollar value any estimate bound may carry.
    #[serde(default)]
    pub min_trade_value: Option<f64>,
}

/// Override for the recent-Mercury bonus. Window and factor default
/// independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MercuryBonusOverride {
    #[serde(default)]
    pub max_age: Option<i32>,
    #[serde(default)]
    pub factor: Option<f64>,
}

impl TradeValuationConfig {
    /// Load overrides from a TOML file. A convenience for callers that
    /// keep dealer settings on disk; the engine itself never reads files.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read valuation config: {path}"))?;
        let config: TradeValuationConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse valuation config: {path}"))?;
        Ok(config)
    }

    /// Merge these overrides with the built-in constants into a fully
    /// resolved config.
    pub fn resolve(&self) -> ResolvedConfig {
        ResolvedConfig {
            brand_penalties: [
                BrandPenalty {
                    needle: "JOHNSON",
                    label: "Johnson",
                    factor: self.johnson_penalty.unwrap_or(DEFAULT_BRAND_PENALTY),
                },
                BrandPenalty {
                    needle: "EVINRUDE",
                    label: "Evinrude",
                    factor: self.evinrude_penalty.unwrap_or(DEFAULT_BRAND_PENALTY),
                },
                BrandPenalty {
                    needle: "OMC",
                    label: "OMC",
                    factor: self.omc_penalty.unwrap_or(DEFAULT_BRAND_PENALTY),
                },
            ],
            mercury_max_age: self
                .mercury_bonus
                .as_ref()
                .and_then(|b| b.max_age)
                .unwrap_or(DEFAULT_MERCURY_MAX_AGE),
            mercury_bonus_factor: self
                .mercury_bonus
                .as_ref()
                .and_then(|b| b.factor)
                .unwrap_or(DEFAULT_MERCURY_BONUS_FACTOR),
            min_trade_value: self.min_trade_value.unwrap_or(DEFAULT_MIN_TRADE_VALUE),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolved config
// ---------------------------------------------------------------------------

/// One denylisted brand and its resolved penalty factor.
#[derive(Debug, Clone, Copy)]
pub struct BrandPenalty {
    /// Uppercase substring matched against the normalized brand.
    pub needle: &'static str,
    /// Display name used in estimate notes.
    pub label: &'static str,
    pub factor: f64,
}

/// Fully resolved configuration the engine computes against. Defaults
/// carry the built-in constants.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub brand_penalties: [BrandPenalty; 3],
    /// Mercury motors younger than this many model years get the bonus.
    pub mercury_max_age: i32,
    pub mercury_bonus_factor: f64,
    /// Floor applied to both bounds of every estimate, in dollars.
    pub min_trade_value: f64,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        TradeValuationConfig::default().resolve()
    }
}

impl ResolvedConfig {
    /// Resolve the penalty entry for a brand, if any.
    ///
    /// The brand is normalized to uppercase and matched by substring, so
    /// "Johnson Evinrude 90" hits both needles; the minimum (most severe)
    /// factor wins.
    pub fn penalty_for(&self, brand: &str) -> Option<&BrandPenalty> {
        let normalized = brand.to_uppercase();
        self.brand_penalties
            .iter()
            .filter(|p| normalized.contains(p.needle))
            .min_by(|a, b| {
                a.factor
                    .partial_cmp(&b.factor)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
