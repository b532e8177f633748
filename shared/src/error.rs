//! Error taxonomy for the settlement engine
//!
//! Every fallible engine operation returns one of these variants.
//! Collaborator failures (appointment store, inventory store, price
//! tables) are wrapped in `ExternalStore`; the engine itself never
//! retries — that belongs to the calling layer.

use thiserror::Error;

/// Settlement engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed Jalali/Gregorian date input (bad format, day 32,
    /// Esfand 30 in a non-leap year, out-of-range year)
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A consumable line references an item name missing from inventory.
    /// Raised before any stock delta is applied (fail-fast, no partial
    /// application).
    #[error("Unknown inventory item: {0}")]
    UnknownInventoryItem(String),

    /// Strict-mode finalize only: payment line sum does not match the
    /// expected settled price. Default finalize never raises this.
    #[error("Inconsistent payment total: expected {expected}, got {actual}")]
    InconsistentPaymentTotal { expected: i64, actual: i64 },

    /// Wraps any failure from an external collaborator
    #[error("External store error: {0}")]
    ExternalStore(String),
}

impl EngineError {
    pub fn external(err: impl std::fmt::Display) -> Self {
        EngineError::ExternalStore(err.to_string())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
