//! Domain models
//!
//! Persisted documents use camelCase field names (the appointment and
//! inventory stores keep the original JSON shape).

pub mod appointment;
pub mod inventory;
pub mod payment;

pub use appointment::{
    Appointment, AppointmentStatus, AppointmentType, ConsumableLine, Gender, LaserAreaSelection,
    ProductSaleLine,
};
pub use inventory::{InventoryItem, PurchaseRecord};
pub use payment::{PaymentLine, PaymentMethod};
