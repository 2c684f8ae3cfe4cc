//! Bracket table repository.
//!
//! Holds the per-brand, per-year-range, per-horsepower value rows the
//! engine looks up. The table is reference data owned by the caller's data
//! source; a default copy is compiled into the crate so estimation keeps
//! working when that source is unavailable.

use std::sync::OnceLock;

use thiserror::Error;

use crate::types::TradeValuationBracket;

/// Default bracket data compiled into the binary.
const BUILTIN_TABLE_JSON: &str = include_str!("../data/brackets.json");

/// Errors from loading bracket data.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Bracket table parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable collection of valuation bracket rows.
#[derive(Debug, Clone, Default)]
pub struct BracketTable {
    rows: Vec<TradeValuationBracket>,
}

impl BracketTable {
    pub fn from_rows(rows: Vec<TradeValuationBracket>) -> Self {
        Self { rows }
    }

    /// Parse a table from a JSON array of bracket rows.
    pub fn from_json_str(json: &str) -> Result<Self, TableError> {
        let rows = serde_json::from_str(json)?;
        Ok(Self { rows })
    }

    /// The table compiled into the crate, parsed once on first use.
    pub fn builtin() -> &'static BracketTable {
        static BUILTIN: OnceLock<BracketTable> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            // The asset ships inside the crate; a parse failure is a build
            // defect, caught by test_builtin_table_parses.
            BracketTable::from_json_str(BUILTIN_TABLE_JSON)
                .expect("embedded bracket table is valid JSON")
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether any row exists for the brand (ASCII-case-insensitive).
    pub fn has_brand(&self, brand: &str) -> bool {
        self.rows.iter().any(|r| r.brand.eq_ignore_ascii_case(brand))
    }

    /// All rows in a (brand, year-range label) group, in supplier order.
    pub fn rows_for(&self, brand: &str, year_range: &str) -> Vec<&TradeValuationBracket> {
        self.rows
            .iter()
            .filter(|r| r.brand.eq_ignore_ascii_case(brand) && r.year_range == year_range)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
