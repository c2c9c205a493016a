//! Typed failures for the indicator engine.
//!
//! Insufficient warm-up history is deliberately NOT an error: indicators
//! return NaN-padded aligned output (possibly all-NaN) so that composite
//! summaries stay resilient to partial data. Only genuine input faults —
//! an empty series or a nonsensical parameter — are typed failures.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("input series is empty")]
    EmptySeries,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
