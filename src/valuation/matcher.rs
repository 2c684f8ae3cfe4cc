//! Year-bucket resolution and nearest-horsepower bracket matching.

use std::fmt;

use crate::brackets::BracketTable;
use crate::types::TradeValuationBracket;

// ---------------------------------------------------------------------------
// Year buckets
// ---------------------------------------------------------------------------

/// Fixed historical year buckets used by the bracket data.
///
/// Lower bounds are inclusive and the newest bucket is open-ended upward.
/// Years before 2005 have no bucket; those motors are valued by the
/// age-based formula instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearBucket {
    Y2025to2029,
    Y2020to2024,
    Y2015to2019,
    Y2010to2014,
    Y2005to2009,
}

impl YearBucket {
    /// All buckets, newest first (useful for iteration).
    pub const ALL: &'static [YearBucket] = &[
        YearBucket::Y2025to2029,
        YearBucket::Y2020to2024,
        YearBucket::Y2015to2019,
        YearBucket::Y2010to2014,
        YearBucket::Y2005to2009,
    ];

    /// Bucket label exactly as it appears in bracket rows.
    pub fn label(&self) -> &'static str {
        match self {
            YearBucket::Y2025to2029 => "2025-2029",
            YearBucket::Y2020to2024 => "2020-2024",
            YearBucket::Y2015to2019 => "2015-2019",
            YearBucket::Y2010to2014 => "2010-2014",
            YearBucket::Y2005to2009 => "2005-2009",
        }
    }

    /// Resolve a model year to its bucket.
    pub fn for_year(year: i32) -> Option<YearBucket> {
        if year >= 2025 {
            Some(YearBucket::Y2025to2029)
        } else if year >= 2020 {
            Some(YearBucket::Y2020to2024)
        } else if year >= 2015 {
            Some(YearBucket::Y2015to2019)
        } else if year >= 2010 {
            Some(YearBucket::Y2010to2014)
        } else if year >= 2005 {
            Some(YearBucket::Y2005to2009)
        } else {
            None
        }
    }
}

impl fmt::Display for YearBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Nearest-horsepower matching
// ---------------------------------------------------------------------------

/// A matched bracket row plus how far its horsepower sits from the
/// requested horsepower.
#[derive(Debug, Clone)]
pub struct BracketMatch<'a> {
    pub bracket: &'a TradeValuationBracket,
    pub hp_delta: f64,
}

/// Select the bracket row closest in horsepower to the target.
///
/// Exact matches win outright; otherwise the candidate minimizing the
/// absolute difference is chosen, and equidistant candidates resolve to
/// the lower horsepower regardless of supplier ordering. Returns `None`
/// when the (brand, bucket) group has no rows.
pub fn find_bracket<'a>(
    table: &'a BracketTable,
    brand: &str,
    bucket: YearBucket,
    horsepower: f64,
) -> Option<BracketMatch<'a>> {
    let mut rows = table.rows_for(brand, bucket.label());
    if rows.is_empty() {
        return None;
    }

    // Ascending scan with a strict improvement test: on equal distance the
    // lower horsepower, seen first, is kept.
    rows.sort_by(|a, b| {
        a.horsepower
            .partial_cmp(&b.horsepower)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut best: Option<BracketMatch<'a>> = None;
    for row in rows {
        let delta = (row.horsepower - horsepower).abs();
        if delta == 0.0 {
            return Some(BracketMatch {
                bracket: row,
                hp_delta: 0.0,
            });
        }
        let improves = match &best {
            Some(current) => delta < current.hp_delta,
            None => true,
        };
        if improves {
            best = Some(BracketMatch {
                bracket: row,
                hp_delta: delta,
            });
        }
    }
    best
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
