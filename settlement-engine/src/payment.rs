//! Multi-method payment allocation
//!
//! Pure list transformations over `PaymentLine`s. The allocator only
//! guarantees internal sum-consistency — operators may intentionally
//! discount or overcharge relative to the suggested price, so the
//! default `finalize` never compares against it. `finalize_strict` is
//! the opt-in check.

use shared::digits::normalize_amount;
use shared::models::PaymentLine;
use shared::{EngineError, EngineResult};

/// Result of finalizing an allocation: the line list and its exact sum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub payment_details: Vec<PaymentLine>,
    pub total: i64,
}

/// Toggle a payment method on or off.
///
/// Toggling the *first* method on defaults its amount to
/// `default_amount` (the appointment's current suggested price), so a
/// single-method payment needs no manual entry. A subsequent method
/// defaults to 0 and the operator splits manually. Toggling off removes
/// the line entirely.
pub fn toggle_method(current: &[PaymentLine], method: &str, default_amount: i64) -> Vec<PaymentLine> {
    if current.iter().any(|l| l.method == method) {
        return current.iter().filter(|l| l.method != method).cloned().collect();
    }

    let mut lines = current.to_vec();
    let amount = if lines.is_empty() { default_amount } else { 0 };
    lines.push(PaymentLine {
        method: method.to_string(),
        amount,
    });
    lines
}

/// Set the amount of an already-toggled method from operator-typed
/// text. Localized digits are normalized, non-numeric characters
/// stripped. An unknown method is a no-op — a stale method name from
/// the UI must not poison the edit session.
pub fn set_amount(current: &[PaymentLine], method: &str, raw: &str) -> Vec<PaymentLine> {
    let amount = normalize_amount(raw);
    current
        .iter()
        .map(|l| {
            if l.method == method {
                PaymentLine {
                    method: l.method.clone(),
                    amount,
                }
            } else {
                l.clone()
            }
        })
        .collect()
}

/// Recompute the allocation total. Exact integer sum, no rounding.
pub fn finalize(current: &[PaymentLine]) -> Allocation {
    Allocation {
        payment_details: current.to_vec(),
        total: current.iter().map(|l| l.amount).sum(),
    }
}

/// Strict-mode finalize: fails with `InconsistentPaymentTotal` when the
/// sum does not match the expected settled price.
pub fn finalize_strict(current: &[PaymentLine], expected: i64) -> EngineResult<Allocation> {
    let allocation = finalize(current);
    if allocation.total != expected {
        return Err(EngineError::InconsistentPaymentTotal {
            expected,
            actual: allocation.total,
        });
    }
    Ok(allocation)
}
