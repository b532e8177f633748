//! Inventory Model

use serde::{Deserialize, Serialize};

/// One registered stock purchase. The purchase list is append-only
/// history; it is never edited or replayed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PurchaseRecord {
    /// Jalali date `jYYYY-jMM-jDD`
    pub date: String,
    pub amount: i64,
    /// Purchase price in the smallest currency unit
    pub price: i64,
}

/// Inventory item entity
///
/// `name` is unique and serves as the stock key consumable lines refer
/// to. `total_quantity` is mutated only through purchase registration
/// and stock reconciliation, and may go negative — over-consumption is
/// recorded, not blocked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub unit: String,
    /// Current unit sale price in the smallest currency unit
    pub sale_price: i64,
    pub total_quantity: i64,
    #[serde(default)]
    pub purchases: Vec<PurchaseRecord>,
}
