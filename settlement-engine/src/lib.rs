//! Appointment Settlement Engine
//!
//! The business-critical core of the clinic appointment manager:
//!
//! - **pricing**: suggested totals from consumable, laser-area, and
//!   product-sale selections
//! - **stock**: inventory reconciliation against the previous saved
//!   consumable selection
//! - **payment**: multi-method payment allocation
//! - **coordinator**: orchestration of the three when a selection or
//!   payment set is saved for an appointment
//! - **store**: seams to the external appointment/inventory stores,
//!   price tables, and payment-method registry, with in-memory
//!   reference implementations
//!
//! # Data Flow
//!
//! ```text
//! UI action → SettlementCoordinator → {pricing, stock, payment}
//!                     ↓
//!       AppointmentStore / InventoryStore
//!                     ↓
//!        updated Appointment back to caller
//! ```

pub mod coordinator;
pub mod payment;
pub mod pricing;
pub mod stock;
pub mod store;

// Re-exports
pub use coordinator::{SettlementCoordinator, SettlementState, settlement_state};
pub use payment::{Allocation, finalize, finalize_strict, set_amount, toggle_method};
pub use pricing::{consumables_total, laser_total, product_sale_total};
pub use stock::{StockDelta, apply, reconcile};
pub use store::{
    AppointmentStore, InventoryStore, LaserPriceTable, PaymentMethodRegistry,
    memory::{MemoryAppointmentStore, MemoryInventoryStore, MemoryLaserPriceTable,
             MemoryPaymentMethods},
};

// Re-export shared types for convenience
pub use shared::{
    EngineError, EngineResult, JalaliDate,
    models::{
        Appointment, AppointmentStatus, AppointmentType, ConsumableLine, Gender, InventoryItem,
        LaserAreaSelection, PaymentLine, PaymentMethod, ProductSaleLine, PurchaseRecord,
    },
};
