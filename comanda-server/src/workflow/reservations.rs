//! Reservation workflow
//!
//! Capacity validation and the double-booking rule. The conflict check is a
//! point-in-time uniqueness constraint over (table, date, time) scoped to
//! BOOKED reservations; completed and cancelled reservations never conflict,
//! so a table can be rebooked after release. The pre-check gives the client
//! a descriptive error; the slot claim in the repository is the racing-safe
//! backstop.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{
    DiningTable, Reservation, ReservationCreate, ReservationStatus, ReservationUpdate,
};
use crate::db::repository::{DiningTableRepository, RepoError, ReservationRepository};
use crate::utils::time::{now_millis, parse_date, parse_time};
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};
use crate::workflow::orders::record_id_string;

pub struct ReservationWorkflow {
    reservations: ReservationRepository,
    tables: DiningTableRepository,
}

impl ReservationWorkflow {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            reservations: ReservationRepository::new(db.clone()),
            tables: DiningTableRepository::new(db),
        }
    }

    /// Book a table for a party. Status always starts out BOOKED.
    pub async fn create(&self, data: ReservationCreate) -> AppResult<Reservation> {
        validate_required_text(&data.customer_name, "customer_name", MAX_NAME_LEN)?;
        validate_required_text(&data.customer_phone, "customer_phone", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&data.customer_email, "customer_email", MAX_EMAIL_LEN)?;
        validate_optional_text(&data.special_requests, "special_requests", MAX_NOTE_LEN)?;

        let date = canonical_date(&data.date)?;
        let time = canonical_time(&data.time)?;

        let table = self
            .tables
            .find_by_id(&data.table)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Table {} not found", data.table)))?;
        let table_id = record_id_string(&table.id, "dining table")?;

        check_party_size(data.party_size, &table)?;

        if self
            .reservations
            .has_booked_conflict(&table_id, &date, &time, None)
            .await?
        {
            return Err(double_booking_error());
        }
        self.claim(&table_id, &date, &time).await?;

        let now = now_millis();
        let created = self
            .reservations
            .create(Reservation {
                id: None,
                customer_name: data.customer_name,
                customer_phone: data.customer_phone,
                customer_email: data.customer_email,
                table_id: table_id.clone(),
                table_number: table.table_number,
                date: date.clone(),
                time: time.clone(),
                party_size: data.party_size,
                status: ReservationStatus::Booked,
                special_requests: data.special_requests.unwrap_or_default(),
                created_at: now,
                updated_at: now,
            })
            .await;

        match created {
            Ok(reservation) => Ok(reservation),
            Err(e) => {
                // Don't leave the slot claimed for a row that never landed
                let _ = self.reservations.release_slot(&table_id, &date, &time).await;
                Err(e.into())
            }
        }
    }

    /// Update a reservation, re-running the capacity and conflict checks
    /// against the new (table, date, time) and excluding the record itself.
    pub async fn update(&self, id: &str, data: ReservationUpdate) -> AppResult<Reservation> {
        let existing = self.require(id).await?;

        validate_optional_text(&data.customer_name, "customer_name", MAX_NAME_LEN)?;
        validate_optional_text(&data.customer_phone, "customer_phone", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&data.customer_email, "customer_email", MAX_EMAIL_LEN)?;
        validate_optional_text(&data.special_requests, "special_requests", MAX_NOTE_LEN)?;

        let date = match &data.date {
            Some(d) => canonical_date(d)?,
            None => existing.date.clone(),
        };
        let time = match &data.time {
            Some(t) => canonical_time(t)?,
            None => existing.time.clone(),
        };

        // Effective table after the update
        let table = match &data.table {
            Some(table_ref) => self
                .tables
                .find_by_id(table_ref)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Table {} not found", table_ref)))?,
            None => self
                .tables
                .find_by_id(&existing.table_id)
                .await?
                .ok_or_else(|| {
                    AppError::not_found(format!("Table {} not found", existing.table_id))
                })?,
        };
        let table_id = record_id_string(&table.id, "dining table")?;

        let party_size = data.party_size.unwrap_or(existing.party_size);
        check_party_size(party_size, &table)?;

        let status = data.status.unwrap_or(existing.status);
        let was_booked = existing.status == ReservationStatus::Booked;
        let stays_booked = status == ReservationStatus::Booked;
        let slot_moved = table_id != existing.table_id
            || date != existing.date
            || time != existing.time;

        if stays_booked && (slot_moved || !was_booked) {
            if self
                .reservations
                .has_booked_conflict(&table_id, &date, &time, existing.id.as_ref())
                .await?
            {
                return Err(double_booking_error());
            }
            self.claim(&table_id, &date, &time).await?;
        }

        let updated = Reservation {
            id: existing.id.clone(),
            customer_name: data.customer_name.unwrap_or(existing.customer_name.clone()),
            customer_phone: data
                .customer_phone
                .unwrap_or(existing.customer_phone.clone()),
            customer_email: data.customer_email.or(existing.customer_email.clone()),
            table_id: table_id.clone(),
            table_number: table.table_number,
            date: date.clone(),
            time: time.clone(),
            party_size,
            status,
            special_requests: data
                .special_requests
                .unwrap_or(existing.special_requests.clone()),
            created_at: existing.created_at,
            updated_at: now_millis(),
        };

        let result = self.reservations.update(id, updated).await;
        match result {
            Ok(reservation) => {
                // Release the slot the old version held, if it is no longer ours
                if was_booked && (slot_moved || !stays_booked) {
                    let _ = self
                        .reservations
                        .release_slot(&existing.table_id, &existing.date, &existing.time)
                        .await;
                }
                Ok(reservation)
            }
            Err(e) => {
                if stays_booked && (slot_moved || !was_booked) {
                    let _ = self.reservations.release_slot(&table_id, &date, &time).await;
                }
                Err(e.into())
            }
        }
    }

    /// Cancel unconditionally (idempotent when already cancelled)
    pub async fn cancel(&self, id: &str) -> AppResult<Reservation> {
        self.transition(id, ReservationStatus::Cancelled).await
    }

    /// Mark completed unconditionally
    pub async fn complete(&self, id: &str) -> AppResult<Reservation> {
        self.transition(id, ReservationStatus::Completed).await
    }

    /// Delete a reservation, releasing its slot when still booked
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let existing = self.require(id).await?;
        if existing.status == ReservationStatus::Booked {
            let _ = self
                .reservations
                .release_slot(&existing.table_id, &existing.date, &existing.time)
                .await;
        }
        Ok(self.reservations.delete(id).await?)
    }

    // ── internals ───────────────────────────────────────────────────

    async fn require(&self, id: &str) -> AppResult<Reservation> {
        self.reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", id)))
    }

    async fn transition(&self, id: &str, status: ReservationStatus) -> AppResult<Reservation> {
        let mut reservation = self.require(id).await?;
        let was_booked = reservation.status == ReservationStatus::Booked;

        reservation.status = status;
        reservation.updated_at = now_millis();
        let reservation = self.reservations.update(id, reservation).await?;

        if was_booked {
            let _ = self
                .reservations
                .release_slot(&reservation.table_id, &reservation.date, &reservation.time)
                .await;
        }
        Ok(reservation)
    }

    async fn claim(&self, table_id: &str, date: &str, time: &str) -> AppResult<()> {
        match self.reservations.claim_slot(table_id, date, time).await {
            Ok(()) => Ok(()),
            Err(RepoError::Duplicate(_)) => Err(double_booking_error()),
            Err(e) => Err(e.into()),
        }
    }
}

fn double_booking_error() -> AppError {
    AppError::validation("This table is already reserved for the selected date and time")
}

fn check_party_size(party_size: i32, table: &DiningTable) -> AppResult<()> {
    if party_size <= 0 {
        return Err(AppError::validation(format!(
            "Party size must be positive, got {}",
            party_size
        )));
    }
    if party_size > table.capacity {
        return Err(AppError::validation(format!(
            "Party size ({}) exceeds table capacity ({})",
            party_size, table.capacity
        )));
    }
    Ok(())
}

/// Normalize a date to its canonical YYYY-MM-DD form
fn canonical_date(date: &str) -> AppResult<String> {
    Ok(parse_date(date)?.format("%Y-%m-%d").to_string())
}

/// Normalize a time to its canonical HH:MM form
fn canonical_time(time: &str) -> AppResult<String> {
    Ok(parse_time(time)?.format("%H:%M").to_string())
}
