//! External collaborator seams
//!
//! The engine reads and writes through these traits; the surrounding
//! application provides real backends. Implementations wrap their own
//! failures into `EngineError::ExternalStore` — the engine never
//! retries, the calling layer decides.

use std::collections::HashMap;

use async_trait::async_trait;

use shared::EngineResult;
use shared::models::{Appointment, Gender, InventoryItem, PaymentMethod, PurchaseRecord};

use crate::stock::StockDelta;

pub mod memory;

/// Appointment document store.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Current persisted state — the source of the `previous` snapshot
    /// for consumable reconciliation.
    async fn get(&self, id: &str) -> EngineResult<Appointment>;

    async fn insert(&self, appointment: Appointment) -> EngineResult<()>;

    /// Full-document write of the updated appointment.
    async fn update(&self, appointment: &Appointment) -> EngineResult<()>;
}

/// Inventory store: price lookups, stock mutation, purchase history.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Current `name → salePrice` table. Live: consumable pricing always
    /// reads this, never a cached copy.
    async fn price_table(&self) -> EngineResult<HashMap<String, i64>>;

    async fn get_item(&self, name: &str) -> EngineResult<Option<InventoryItem>>;

    /// Apply a reconciliation batch atomically: all deltas or none.
    /// A name missing from inventory fails the whole batch with
    /// `UnknownInventoryItem` before any quantity changes. Quantities
    /// may go negative.
    async fn apply_stock_deltas(&self, deltas: &[StockDelta]) -> EngineResult<()>;

    /// Append a purchase record and raise stock by the purchased
    /// amount. The only other mutation path besides reconciliation.
    async fn register_purchase(&self, name: &str, purchase: PurchaseRecord) -> EngineResult<()>;
}

/// Laser area/gender → price map. Read-only from the engine.
#[async_trait]
pub trait LaserPriceTable: Send + Sync {
    async fn price_for(&self, area: &str, gender: Gender) -> EngineResult<Option<i64>>;
}

/// Ordered list of available payment methods. Read-only.
#[async_trait]
pub trait PaymentMethodRegistry: Send + Sync {
    async fn methods(&self) -> EngineResult<Vec<PaymentMethod>>;
}
