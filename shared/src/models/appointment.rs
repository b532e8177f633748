//! Appointment Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::payment::PaymentLine;

/// Appointment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentType {
    Injection,
    Laser,
    CareProductSale,
}

/// Appointment lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Canceled,
}

/// Patient gender (laser price tables are keyed by area and gender)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Female,
    Male,
}

/// A quantity of a named inventory item consumed by one appointment.
///
/// `name` is a weak reference to `InventoryItem::name` — renaming or
/// deleting the item silently orphans historical lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsumableLine {
    pub name: String,
    pub amount: i64,
}

/// A laser treatment zone plus its price frozen at selection time.
///
/// `price` is a snapshot of the price-table value — historical
/// appointments must keep showing what was charged even after the table
/// changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LaserAreaSelection {
    pub area: String,
    pub gender: Gender,
    pub price: i64,
}

/// One sold care product line (CareProductSale appointments)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSaleLine {
    pub product_id: String,
    pub qty: i64,
    pub unit_price: i64,
}

/// Appointment entity
///
/// `price` is the settled total and authoritative. When
/// `payment_details` is non-empty it equals the sum of the line amounts
/// at the moment payment was saved; when empty it reflects the last
/// computed suggested total.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    /// Canonical Jalali storage form `jYYYY-jMM-jDD`
    pub date_shamsi: String,
    /// Wall-clock time of day, `HH:MM`
    pub time: String,
    pub status: AppointmentStatus,
    /// Settled total in the smallest currency unit
    pub price: i64,
    #[serde(default)]
    pub consumables: Vec<ConsumableLine>,
    #[serde(default)]
    pub laser_areas: Vec<LaserAreaSelection>,
    #[serde(default)]
    pub products: Vec<ProductSaleLine>,
    #[serde(default)]
    pub payment_details: Vec<PaymentLine>,
    #[serde(default)]
    pub note: String,
    /// Backdated entry flag
    #[serde(default)]
    pub is_historical: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// A freshly booked appointment: empty selections, price 0.
    pub fn new(
        id: String,
        patient_id: String,
        appointment_type: AppointmentType,
        date_shamsi: String,
        time: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            patient_id,
            appointment_type,
            date_shamsi,
            time,
            status: AppointmentStatus::Scheduled,
            price: 0,
            consumables: Vec::new(),
            laser_areas: Vec::new(),
            products: Vec::new(),
            payment_details: Vec::new(),
            note: String::new(),
            is_historical: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_appointment_starts_empty() {
        let appt = Appointment::new(
            "a-1".to_string(),
            "p-1".to_string(),
            AppointmentType::Injection,
            "1403-06-31".to_string(),
            "10:30".to_string(),
        );
        assert_eq!(appt.price, 0);
        assert!(appt.consumables.is_empty());
        assert!(appt.laser_areas.is_empty());
        assert!(appt.payment_details.is_empty());
        assert_eq!(appt.status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn test_serde_field_names() {
        let appt = Appointment::new(
            "a-1".to_string(),
            "p-1".to_string(),
            AppointmentType::Laser,
            "1403-06-31".to_string(),
            "10:30".to_string(),
        );
        let json = serde_json::to_value(&appt).unwrap();
        assert_eq!(json["dateShamsi"], "1403-06-31");
        assert_eq!(json["type"], "LASER");
        assert_eq!(json["isHistorical"], false);
        assert!(json["paymentDetails"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_deserialize_sparse_document() {
        // Stored documents created before a field existed omit it.
        let json = serde_json::json!({
            "id": "a-2",
            "patientId": "p-9",
            "type": "INJECTION",
            "dateShamsi": "1402-11-05",
            "time": "09:00",
            "status": "COMPLETED",
            "price": 1_500_000,
            "createdAt": "2024-01-25T08:00:00Z",
            "updatedAt": "2024-01-25T08:00:00Z"
        });
        let appt: Appointment = serde_json::from_value(json).unwrap();
        assert!(appt.consumables.is_empty());
        assert!(!appt.is_historical);
        assert_eq!(appt.price, 1_500_000);
    }
}
