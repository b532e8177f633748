//! Appointment settlement coordination
//!
//! Orchestrates pricing, stock reconciliation, and payment allocation
//! when a selection or payment set is saved for an appointment. The
//! coordinator catches nothing: every error propagates typed to the
//! caller, and a failed stock apply aborts the save before any
//! appointment write, leaving the stored selection at its prior value.
//!
//! Re-editing consumables after settlement recomputes `price` but does
//! not re-split `payment_details` — the stored payment sum may
//! transiently diverge from `price` until the operator reopens payment
//! allocation. That divergence is deliberate; `save_payment_strict` is
//! the operator's explicit re-settle.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use shared::EngineResult;
use shared::models::{Appointment, ConsumableLine, LaserAreaSelection, PaymentLine, ProductSaleLine};

use crate::payment;
use crate::pricing::{self, clamp_quantity};
use crate::stock;
use crate::store::{AppointmentStore, InventoryStore, LaserPriceTable};

/// Settlement lifecycle of an appointment, derived from its content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SettlementState {
    /// No selections or payment yet
    Draft,
    /// Suggested total computed, not yet settled
    Priced,
    /// Payment allocation saved; price locked to the payment sum
    Settled,
}

/// Derive the settlement state from appointment content.
pub fn settlement_state(appointment: &Appointment) -> SettlementState {
    if !appointment.payment_details.is_empty() {
        SettlementState::Settled
    } else if appointment.price != 0
        || !appointment.consumables.is_empty()
        || !appointment.laser_areas.is_empty()
        || !appointment.products.is_empty()
    {
        SettlementState::Priced
    } else {
        SettlementState::Draft
    }
}

/// Orchestrates settlement saves against the external stores.
pub struct SettlementCoordinator {
    appointments: Arc<dyn AppointmentStore>,
    inventory: Arc<dyn InventoryStore>,
    laser_prices: Arc<dyn LaserPriceTable>,
}

impl SettlementCoordinator {
    pub fn new(
        appointments: Arc<dyn AppointmentStore>,
        inventory: Arc<dyn InventoryStore>,
        laser_prices: Arc<dyn LaserPriceTable>,
    ) -> Self {
        Self {
            appointments,
            inventory,
            laser_prices,
        }
    }

    /// Save a consumable selection.
    ///
    /// Reconciles stock against the previously persisted selection
    /// (empty on first save), then prices the new selection from the
    /// live price table and persists both the selection and the price.
    /// A failed stock apply aborts the whole save.
    pub async fn save_consumables(
        &self,
        appointment_id: &str,
        lines: Vec<ConsumableLine>,
    ) -> EngineResult<Appointment> {
        let mut appointment = self.appointments.get(appointment_id).await?;
        let previous = appointment.consumables.clone();

        // Persist clamped amounts so the next edit's previous snapshot
        // matches what was actually charged against stock.
        let lines: Vec<ConsumableLine> = lines
            .into_iter()
            .map(|l| ConsumableLine {
                amount: clamp_quantity(l.amount),
                ..l
            })
            .collect();

        let deltas = stock::reconcile(&previous, &lines);
        stock::apply(self.inventory.as_ref(), &deltas).await?;

        let price_table = self.inventory.price_table().await?;
        appointment.price = pricing::consumables_total(&lines, &price_table);
        appointment.consumables = lines;
        appointment.updated_at = chrono::Utc::now();
        self.appointments.update(&appointment).await?;

        tracing::info!(
            appointment_id = %appointment.id,
            price = appointment.price,
            deltas = deltas.len(),
            "consumables saved"
        );
        Ok(appointment)
    }

    /// Save a laser-area selection.
    ///
    /// A selection carrying a positive `price` keeps it (the snapshot
    /// frozen when the area was first picked); a non-positive price is
    /// resolved from the current table, missing entries pricing at 0.
    pub async fn save_laser_areas(
        &self,
        appointment_id: &str,
        selections: Vec<LaserAreaSelection>,
    ) -> EngineResult<Appointment> {
        let mut appointment = self.appointments.get(appointment_id).await?;

        let mut resolved = Vec::with_capacity(selections.len());
        for mut selection in selections {
            if selection.price <= 0 {
                selection.price = self
                    .laser_prices
                    .price_for(&selection.area, selection.gender)
                    .await?
                    .unwrap_or(0);
            }
            resolved.push(selection);
        }

        appointment.price = pricing::laser_total(&resolved);
        appointment.laser_areas = resolved;
        appointment.updated_at = chrono::Utc::now();
        self.appointments.update(&appointment).await?;

        tracing::info!(
            appointment_id = %appointment.id,
            price = appointment.price,
            areas = appointment.laser_areas.len(),
            "laser areas saved"
        );
        Ok(appointment)
    }

    /// Save a care-product sale.
    pub async fn save_product_sale(
        &self,
        appointment_id: &str,
        lines: Vec<ProductSaleLine>,
    ) -> EngineResult<Appointment> {
        let mut appointment = self.appointments.get(appointment_id).await?;

        let lines: Vec<ProductSaleLine> = lines
            .into_iter()
            .map(|l| ProductSaleLine {
                qty: clamp_quantity(l.qty),
                ..l
            })
            .collect();

        appointment.price = pricing::product_sale_total(&lines);
        appointment.products = lines;
        appointment.updated_at = chrono::Utc::now();
        self.appointments.update(&appointment).await?;

        tracing::info!(
            appointment_id = %appointment.id,
            price = appointment.price,
            "product sale saved"
        );
        Ok(appointment)
    }

    /// Save a payment allocation: `price` and `payment_details` are
    /// written together so the settled invariant holds.
    pub async fn save_payment(
        &self,
        appointment_id: &str,
        lines: Vec<PaymentLine>,
    ) -> EngineResult<Appointment> {
        let mut appointment = self.appointments.get(appointment_id).await?;

        let allocation = payment::finalize(&lines);
        appointment.price = allocation.total;
        appointment.payment_details = allocation.payment_details;
        appointment.updated_at = chrono::Utc::now();
        self.appointments.update(&appointment).await?;

        tracing::info!(
            appointment_id = %appointment.id,
            total = appointment.price,
            methods = appointment.payment_details.len(),
            "payment saved"
        );
        Ok(appointment)
    }

    /// Strict save: the allocation must sum to the appointment's
    /// current price exactly, otherwise `InconsistentPaymentTotal`.
    pub async fn save_payment_strict(
        &self,
        appointment_id: &str,
        lines: Vec<PaymentLine>,
    ) -> EngineResult<Appointment> {
        let mut appointment = self.appointments.get(appointment_id).await?;

        let allocation = payment::finalize_strict(&lines, appointment.price)?;
        appointment.payment_details = allocation.payment_details;
        appointment.updated_at = chrono::Utc::now();
        self.appointments.update(&appointment).await?;
        Ok(appointment)
    }
}
