//! Transom: trade-in valuation core for outboard motor sales quoting.
//!
//! Library crate exposing the valuation engine and its data model. The
//! engine is a pure computation over caller-supplied bracket data and
//! config overrides: no I/O, no shared state, safe to call from any
//! number of threads.

pub mod brackets;
pub mod config;
pub mod types;
pub mod valuation;
