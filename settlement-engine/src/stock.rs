//! Inventory stock reconciliation
//!
//! Given the previously saved consumable selection and the new one for
//! the same appointment, compute the net stock delta per item and apply
//! it to the inventory store in one all-or-nothing batch.
//!
//! `reconcile` is a pure function with no hidden state: the caller
//! passes the correct previous snapshot (the last-saved selection, empty
//! on first save). `reconcile(x, x)` yields no deltas, and applying
//! `reconcile(a, b)` then `reconcile(b, a)` returns stock to its
//! original levels.

use std::collections::BTreeMap;

use shared::EngineResult;
use shared::models::ConsumableLine;

use crate::pricing::clamp_quantity;
use crate::store::InventoryStore;

/// Net change in consumption of one inventory item.
///
/// Positive delta: additional stock consumed (quantity decreases).
/// Negative delta: stock returned (quantity increases).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockDelta {
    pub name: String,
    pub delta: i64,
}

/// Diff two consumable selections into per-item stock deltas.
///
/// Zero deltas are dropped; output is name-ordered and deterministic.
pub fn reconcile(previous: &[ConsumableLine], current: &[ConsumableLine]) -> Vec<StockDelta> {
    let mut amounts: BTreeMap<&str, (i64, i64)> = BTreeMap::new();
    for line in previous {
        amounts.entry(&line.name).or_default().0 += clamp_quantity(line.amount);
    }
    for line in current {
        amounts.entry(&line.name).or_default().1 += clamp_quantity(line.amount);
    }

    amounts
        .into_iter()
        .filter_map(|(name, (prev, cur))| {
            let delta = cur - prev;
            (delta != 0).then(|| StockDelta {
                name: name.to_string(),
                delta,
            })
        })
        .collect()
}

/// Apply a delta batch to the inventory store.
///
/// The store applies all deltas or none: a name missing from inventory
/// fails the whole batch with `UnknownInventoryItem` before any
/// quantity changes. Stock is allowed to go negative.
pub async fn apply(store: &dyn InventoryStore, deltas: &[StockDelta]) -> EngineResult<()> {
    if deltas.is_empty() {
        return Ok(());
    }
    tracing::debug!(count = deltas.len(), "applying stock deltas");
    store.apply_stock_deltas(deltas).await
}
