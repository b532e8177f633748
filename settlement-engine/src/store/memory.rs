//! In-memory reference stores
//!
//! Used by the test suite and by embedders without a real backend. The
//! inventory store demonstrates the atomicity contract: a delta batch
//! is validated in full under the write lock before any quantity moves.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use shared::models::{
    Appointment, AppointmentType, Gender, InventoryItem, PaymentMethod, PurchaseRecord,
};
use shared::{EngineError, EngineResult};

use super::{AppointmentStore, InventoryStore, LaserPriceTable, PaymentMethodRegistry};
use crate::stock::StockDelta;

/// Appointment store backed by a map.
#[derive(Default)]
pub struct MemoryAppointmentStore {
    appointments: RwLock<HashMap<String, Appointment>>,
}

impl MemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint and store a freshly booked appointment.
    pub fn create(
        &self,
        patient_id: &str,
        appointment_type: AppointmentType,
        date_shamsi: &str,
        time: &str,
    ) -> Appointment {
        let appointment = Appointment::new(
            Uuid::new_v4().to_string(),
            patient_id.to_string(),
            appointment_type,
            date_shamsi.to_string(),
            time.to_string(),
        );
        self.appointments
            .write()
            .insert(appointment.id.clone(), appointment.clone());
        appointment
    }
}

#[async_trait]
impl AppointmentStore for MemoryAppointmentStore {
    async fn get(&self, id: &str) -> EngineResult<Appointment> {
        self.appointments
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::ExternalStore(format!("appointment not found: {id}")))
    }

    async fn insert(&self, appointment: Appointment) -> EngineResult<()> {
        self.appointments
            .write()
            .insert(appointment.id.clone(), appointment);
        Ok(())
    }

    async fn update(&self, appointment: &Appointment) -> EngineResult<()> {
        let mut appointments = self.appointments.write();
        if !appointments.contains_key(&appointment.id) {
            return Err(EngineError::ExternalStore(format!(
                "appointment not found: {}",
                appointment.id
            )));
        }
        appointments.insert(appointment.id.clone(), appointment.clone());
        Ok(())
    }
}

/// Inventory store backed by a name-keyed map.
#[derive(Default)]
pub struct MemoryInventoryStore {
    items: RwLock<HashMap<String, InventoryItem>>,
}

impl MemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_item(&self, name: &str, unit: &str, sale_price: i64, total_quantity: i64) {
        let item = InventoryItem {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            unit: unit.to_string(),
            sale_price,
            total_quantity,
            purchases: Vec::new(),
        };
        self.items.write().insert(name.to_string(), item);
    }

    pub fn quantity_of(&self, name: &str) -> Option<i64> {
        self.items.read().get(name).map(|i| i.total_quantity)
    }
}

#[async_trait]
impl InventoryStore for MemoryInventoryStore {
    async fn price_table(&self) -> EngineResult<HashMap<String, i64>> {
        Ok(self
            .items
            .read()
            .values()
            .map(|item| (item.name.clone(), item.sale_price))
            .collect())
    }

    async fn get_item(&self, name: &str) -> EngineResult<Option<InventoryItem>> {
        Ok(self.items.read().get(name).cloned())
    }

    async fn apply_stock_deltas(&self, deltas: &[StockDelta]) -> EngineResult<()> {
        let mut items = self.items.write();

        // Validate the whole batch before touching any quantity.
        for delta in deltas {
            if !items.contains_key(&delta.name) {
                return Err(EngineError::UnknownInventoryItem(delta.name.clone()));
            }
        }

        for delta in deltas {
            if let Some(item) = items.get_mut(&delta.name) {
                item.total_quantity -= delta.delta;
                tracing::debug!(
                    item = %delta.name,
                    delta = delta.delta,
                    quantity = item.total_quantity,
                    "stock adjusted"
                );
            }
        }
        Ok(())
    }

    async fn register_purchase(&self, name: &str, purchase: PurchaseRecord) -> EngineResult<()> {
        let mut items = self.items.write();
        let item = items
            .get_mut(name)
            .ok_or_else(|| EngineError::UnknownInventoryItem(name.to_string()))?;
        item.total_quantity += purchase.amount;
        tracing::info!(
            item = %name,
            amount = purchase.amount,
            quantity = item.total_quantity,
            "purchase registered"
        );
        item.purchases.push(purchase);
        Ok(())
    }
}

/// Laser price table keyed by (area, gender).
#[derive(Default)]
pub struct MemoryLaserPriceTable {
    prices: RwLock<HashMap<(String, Gender), i64>>,
}

impl MemoryLaserPriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_price(&self, area: &str, gender: Gender, price: i64) {
        self.prices.write().insert((area.to_string(), gender), price);
    }
}

#[async_trait]
impl LaserPriceTable for MemoryLaserPriceTable {
    async fn price_for(&self, area: &str, gender: Gender) -> EngineResult<Option<i64>> {
        Ok(self.prices.read().get(&(area.to_string(), gender)).copied())
    }
}

/// Fixed, ordered payment-method registry.
pub struct MemoryPaymentMethods {
    methods: Vec<PaymentMethod>,
}

impl MemoryPaymentMethods {
    pub fn new(names: &[&str]) -> Self {
        Self {
            methods: names
                .iter()
                .map(|name| PaymentMethod {
                    name: name.to_string(),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl PaymentMethodRegistry for MemoryPaymentMethods {
    async fn methods(&self) -> EngineResult<Vec<PaymentMethod>> {
        Ok(self.methods.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_apply_deltas_adjusts_quantities() {
        let store = MemoryInventoryStore::new();
        store.insert_item("Botox", "vial", 500_000, 10);
        store.insert_item("Filler", "syringe", 2_000_000, 5);

        store
            .apply_stock_deltas(&[
                StockDelta { name: "Botox".to_string(), delta: 3 },
                StockDelta { name: "Filler".to_string(), delta: -2 },
            ])
            .await
            .unwrap();

        assert_eq!(store.quantity_of("Botox"), Some(7));
        assert_eq!(store.quantity_of("Filler"), Some(7));
    }

    #[tokio::test]
    async fn test_apply_deltas_unknown_name_mutates_nothing() {
        let store = MemoryInventoryStore::new();
        store.insert_item("Botox", "vial", 500_000, 10);

        let result = store
            .apply_stock_deltas(&[
                StockDelta { name: "Botox".to_string(), delta: 3 },
                StockDelta { name: "Ghost".to_string(), delta: 1 },
            ])
            .await;

        assert!(matches!(result, Err(EngineError::UnknownInventoryItem(name)) if name == "Ghost"));
        // First line untouched despite appearing before the bad one.
        assert_eq!(store.quantity_of("Botox"), Some(10));
    }

    #[tokio::test]
    async fn test_stock_may_go_negative() {
        let store = MemoryInventoryStore::new();
        store.insert_item("Thread", "piece", 900_000, 1);

        store
            .apply_stock_deltas(&[StockDelta { name: "Thread".to_string(), delta: 4 }])
            .await
            .unwrap();

        assert_eq!(store.quantity_of("Thread"), Some(-3));
    }

    #[tokio::test]
    async fn test_register_purchase_appends_and_bumps_stock() {
        let store = MemoryInventoryStore::new();
        store.insert_item("Botox", "vial", 500_000, 2);

        store
            .register_purchase(
                "Botox",
                PurchaseRecord {
                    date: "1403-05-01".to_string(),
                    amount: 10,
                    price: 3_000_000,
                },
            )
            .await
            .unwrap();

        assert_eq!(store.quantity_of("Botox"), Some(12));
        let item = store.get_item("Botox").await.unwrap().unwrap();
        assert_eq!(item.purchases.len(), 1);
        assert_eq!(item.purchases[0].amount, 10);
    }

    #[tokio::test]
    async fn test_register_purchase_unknown_item_fails() {
        let store = MemoryInventoryStore::new();
        let result = store
            .register_purchase(
                "Ghost",
                PurchaseRecord {
                    date: "1403-05-01".to_string(),
                    amount: 1,
                    price: 1,
                },
            )
            .await;
        assert!(matches!(result, Err(EngineError::UnknownInventoryItem(_))));
    }

    #[tokio::test]
    async fn test_appointment_store_round_trip() {
        let store = MemoryAppointmentStore::new();
        let appt = store.create("p-1", AppointmentType::Injection, "1403-06-31", "10:30");

        let mut loaded = store.get(&appt.id).await.unwrap();
        assert_eq!(loaded.price, 0);

        loaded.price = 1_000_000;
        store.update(&loaded).await.unwrap();
        assert_eq!(store.get(&appt.id).await.unwrap().price, 1_000_000);
    }

    #[tokio::test]
    async fn test_appointment_store_missing_id_is_external_error() {
        let store = MemoryAppointmentStore::new();
        assert!(matches!(
            store.get("nope").await,
            Err(EngineError::ExternalStore(_))
        ));
    }

    #[tokio::test]
    async fn test_payment_methods_keep_registry_order() {
        let registry = MemoryPaymentMethods::new(&["Cash", "Card", "Card-to-Card"]);
        let methods = registry.methods().await.unwrap();
        let names: Vec<&str> = methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Cash", "Card", "Card-to-Card"]);
    }
}
