// src/repositories/reservation_store.rs
//
// Reservation persistence

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::domain::reservation::{PriorityTier, RateClass, Reservation};
use crate::error::{AppError, AppResult};

/// The durable system of record for reservations.
///
/// Five operations, each atomic and independently connectable from the
/// caller's point of view. `update`/`delete` report the affected row count;
/// zero means "no such row" and is never treated as a store malfunction.
#[cfg_attr(test, mockall::automock)]
pub trait ReservationStore: Send + Sync {
    /// Insert a reservation and return the generated identifier
    fn insert(&self, reservation: &Reservation) -> AppResult<i64>;

    /// Full scan, ordered by identifier
    fn list_all(&self) -> AppResult<Vec<Reservation>>;

    /// Room number for an (id, guest name) pair, if such a row exists
    fn find_room(&self, id: i64, guest_name: &str) -> AppResult<Option<u32>>;

    /// Update the mutable columns of a row; returns the affected count
    fn update(&self, id: i64, reservation: &Reservation) -> AppResult<usize>;

    /// Delete a row by identifier; returns the affected count
    fn delete(&self, id: i64) -> AppResult<usize>;
}

pub struct SqliteReservationStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteReservationStore {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to Reservation - returns rusqlite::Error for
    /// query_map compatibility
    fn row_to_reservation(row: &Row) -> Result<Reservation, rusqlite::Error> {
        let id: i64 = row.get("reservation_id")?;
        let guest_name: String = row.get("guest_name")?;

        let room_number: i64 = row.get("room_number")?;
        let room_number = u32::try_from(room_number).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Integer,
                Box::new(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("Invalid room number '{}': {}", room_number, e),
                )),
            )
        })?;

        let contact_number: String = row.get("contact_number")?;

        let class_str: String = row.get("rate_class")?;
        let tier_str: Option<String> = row.get("rate_tier")?;
        let rate_class = match class_str.as_str() {
            "standard" => RateClass::Standard,
            "priority" => RateClass::Priority {
                tier: PriorityTier::from_label(tier_str.as_deref().unwrap_or("")),
            },
            _ => return Err(rusqlite::Error::InvalidQuery),
        };

        let created_at_str: String = row.get("created_at")?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    6,
                    rusqlite::types::Type::Text,
                    Box::new(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("Invalid created_at timestamp '{}': {}", created_at_str, e),
                    )),
                )
            })?;

        Ok(Reservation {
            id,
            guest_name,
            room_number,
            contact_number,
            rate_class,
            created_at,
        })
    }

    fn rate_columns(reservation: &Reservation) -> (&'static str, Option<String>) {
        match reservation.rate_class {
            RateClass::Standard => ("standard", None),
            RateClass::Priority { tier } => ("priority", Some(tier.to_string())),
        }
    }
}

impl ReservationStore for SqliteReservationStore {
    fn insert(&self, reservation: &Reservation) -> AppResult<i64> {
        let conn = self.pool.get()?;

        let (class_str, tier_str) = Self::rate_columns(reservation);

        let affected = conn.execute(
            "INSERT INTO reservations (
                guest_name, room_number, contact_number, rate_class, rate_tier, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                reservation.guest_name,
                reservation.room_number as i64,
                reservation.contact_number,
                class_str,
                tier_str,
                reservation.created_at.to_rfc3339(),
            ],
        )?;

        if affected == 0 {
            return Err(AppError::Other(
                "Creating reservation failed, no rows affected".to_string(),
            ));
        }

        Ok(conn.last_insert_rowid())
    }

    fn list_all(&self) -> AppResult<Vec<Reservation>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT reservation_id, guest_name, room_number, contact_number,
                    rate_class, rate_tier, created_at
             FROM reservations
             ORDER BY reservation_id",
        )?;

        let reservations: Vec<Reservation> = stmt
            .query_map([], Self::row_to_reservation)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(reservations)
    }

    fn find_room(&self, id: i64, guest_name: &str) -> AppResult<Option<u32>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT room_number FROM reservations
             WHERE reservation_id = ?1 AND guest_name = ?2",
        )?;

        match stmt.query_row(params![id, guest_name], |row| row.get::<_, i64>(0)) {
            Ok(room) => Ok(Some(u32::try_from(room).map_err(|e| {
                AppError::Other(format!("Invalid room number '{}': {}", room, e))
            })?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn update(&self, id: i64, reservation: &Reservation) -> AppResult<usize> {
        let conn = self.pool.get()?;

        let (class_str, tier_str) = Self::rate_columns(reservation);

        // created_at is construction-time and never rewritten
        let affected = conn.execute(
            "UPDATE reservations
             SET guest_name = ?1, room_number = ?2, contact_number = ?3,
                 rate_class = ?4, rate_tier = ?5
             WHERE reservation_id = ?6",
            params![
                reservation.guest_name,
                reservation.room_number as i64,
                reservation.contact_number,
                class_str,
                tier_str,
                id,
            ],
        )?;

        Ok(affected)
    }

    fn delete(&self, id: i64) -> AppResult<usize> {
        let conn = self.pool.get()?;

        let affected = conn.execute(
            "DELETE FROM reservations WHERE reservation_id = ?1",
            params![id],
        )?;

        Ok(affected)
    }
}
