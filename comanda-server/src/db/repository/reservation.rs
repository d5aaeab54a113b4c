//! Reservation Repository
//!
//! Filtered queries plus the slot records backing the double-booking
//! invariant. One slot record exists per BOOKED (table, date, time); its
//! record id is derived from the triple, so claiming an occupied slot fails
//! inside the storage engine no matter how the pre-check raced.

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{Reservation, ReservationSlot};
use crate::utils::time::now_millis;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "reservation";
const SLOT_TABLE: &str = "reservation_slot";

/// Deterministic slot key for a (table, date, time) triple
fn slot_key(table_id: &str, date: &str, time: &str) -> String {
    format!("{}|{}|{}", table_id, date, time)
}

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

impl ReservationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find reservations with optional status / date / phone filters,
    /// ordered latest first
    pub async fn find_filtered(
        &self,
        status: Option<String>,
        date: Option<String>,
        customer_phone: Option<String>,
    ) -> RepoResult<Vec<Reservation>> {
        let mut sql = String::from("SELECT * FROM reservation");
        let mut clauses: Vec<&str> = Vec::new();
        if status.is_some() {
            clauses.push("status = $status");
        }
        if date.is_some() {
            clauses.push("date = $date");
        }
        if customer_phone.is_some() {
            clauses.push("customer_phone = $phone");
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY date DESC, time DESC");

        let mut query = self.base.db().query(sql);
        if let Some(s) = status {
            query = query.bind(("status", s));
        }
        if let Some(d) = date {
            query = query.bind(("date", d));
        }
        if let Some(p) = customer_phone {
            query = query.bind(("phone", p));
        }

        let reservations: Vec<Reservation> = query.await?.take(0)?;
        Ok(reservations)
    }

    /// Reservations for one date, ordered by time
    pub async fn find_by_date(&self, date: String) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query("SELECT * FROM reservation WHERE date = $date ORDER BY time")
            .bind(("date", date))
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// Booked reservations from `from_date` onward, soonest first
    pub async fn find_upcoming(&self, from_date: String) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query(
                "SELECT * FROM reservation WHERE date >= $date AND status = 'BOOKED' ORDER BY date, time",
            )
            .bind(("date", from_date))
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// Reservations whose date falls in the inclusive range (reporting)
    pub async fn find_in_date_range(
        &self,
        start_date: String,
        end_date: String,
    ) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query("SELECT * FROM reservation WHERE date >= $start AND date <= $end")
            .bind(("start", start_date))
            .bind(("end", end_date))
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// Find reservation by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Reservation>> {
        let rid = parse_id(id, TABLE)?;
        let reservation: Option<Reservation> = self.base.db().select(rid).await?;
        Ok(reservation)
    }

    /// Is there another BOOKED reservation holding (table, date, time)?
    ///
    /// `exclude` skips the record being updated. This is the friendly
    /// pre-check; `claim_slot` is the authoritative one.
    pub async fn has_booked_conflict(
        &self,
        table_id: &str,
        date: &str,
        time: &str,
        exclude: Option<&RecordId>,
    ) -> RepoResult<bool> {
        let conflicts: Vec<Reservation> = self
            .base
            .db()
            .query(
                "SELECT * FROM reservation WHERE table_id = $table AND date = $date AND time = $time AND status = 'BOOKED'",
            )
            .bind(("table", table_id.to_string()))
            .bind(("date", date.to_string()))
            .bind(("time", time.to_string()))
            .await?
            .take(0)?;

        Ok(conflicts
            .iter()
            .any(|r| exclude.is_none() || r.id.as_ref() != exclude))
    }

    /// Claim the slot for a BOOKED reservation.
    ///
    /// Fails with [`RepoError::Duplicate`] when the slot is already held;
    /// record-id uniqueness makes this safe against a concurrent claim.
    pub async fn claim_slot(&self, table_id: &str, date: &str, time: &str) -> RepoResult<()> {
        let key = slot_key(table_id, date, time);
        let _: Option<ReservationSlot> = self
            .base
            .db()
            .create((SLOT_TABLE, key))
            .content(ReservationSlot {
                claimed_at: now_millis(),
            })
            .await?;
        Ok(())
    }

    /// Release a previously claimed slot (no-op when absent)
    pub async fn release_slot(&self, table_id: &str, date: &str, time: &str) -> RepoResult<()> {
        let key = slot_key(table_id, date, time);
        let _: Option<ReservationSlot> = self.base.db().delete((SLOT_TABLE, key)).await?;
        Ok(())
    }

    /// Insert a reservation row
    pub async fn create(&self, reservation: Reservation) -> RepoResult<Reservation> {
        let created: Option<Reservation> =
            self.base.db().create(TABLE).content(reservation).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create reservation".to_string()))
    }

    /// Replace a reservation row
    pub async fn update(&self, id: &str, mut reservation: Reservation) -> RepoResult<Reservation> {
        let rid = parse_id(id, TABLE)?;
        reservation.id = None;
        let updated: Option<Reservation> =
            self.base.db().update(rid).content(reservation).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))
    }

    /// Hard delete a reservation row
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = parse_id(id, TABLE)?;
        let deleted: Option<Reservation> = self.base.db().delete(rid).await?;
        Ok(deleted.is_some())
    }
}
