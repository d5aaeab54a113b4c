//! Reservation Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Reservation status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Booked,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Booked => "BOOKED",
            ReservationStatus::Completed => "COMPLETED",
            ReservationStatus::Cancelled => "CANCELLED",
        }
    }
}

/// Reservation entity (预订)
///
/// `table_id` is the record id string of the referenced dining table;
/// `table_number` is a display snapshot taken at booking time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub table_id: String,
    pub table_number: i32,
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    /// Wall-clock time (HH:MM)
    pub time: String,
    pub party_size: i32,
    pub status: ReservationStatus,
    #[serde(default)]
    pub special_requests: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create reservation payload; status always starts out BOOKED
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    /// Dining table record id ("dining_table:xxx")
    pub table: String,
    pub date: String,
    pub time: String,
    pub party_size: i32,
    pub special_requests: Option<String>,
}

/// Update reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationUpdate {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub table: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub party_size: Option<i32>,
    pub status: Option<ReservationStatus>,
    pub special_requests: Option<String>,
}

/// Slot record claimed while a reservation is BOOKED.
///
/// The record id is derived from (table, date, time), so a second CREATE for
/// the same triple fails at the storage layer, the authoritative backstop
/// for the double-booking pre-check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationSlot {
    pub claimed_at: i64,
}
