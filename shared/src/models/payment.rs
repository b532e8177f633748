//! Payment Model

use serde::{Deserialize, Serialize};

/// One payment-method/amount pair attached to an appointment.
///
/// `method` is a weak reference to `PaymentMethod::name`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentLine {
    pub method: String,
    /// Amount in the smallest currency unit
    pub amount: i64,
}

/// Registry entry for an available payment method
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentMethod {
    pub name: String,
}
