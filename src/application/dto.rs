// src/application/dto.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs NEVER leak domain invariants
// - DTOs are simple, serializable structs
// - Incoming DTOs carry form-style text; parsing happens in commands

use serde::{Deserialize, Serialize};

use crate::domain::reservation::{RateClass, Reservation};

// ============================================================================
// RESERVATION DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationDto {
    pub id: i64,
    pub guest_name: String,
    pub room_number: u32,
    pub contact_number: String,
    pub rate_class: String,
    pub rate_tier: Option<String>,
    pub rate: f64,
    pub created_at: String,
}

impl From<Reservation> for ReservationDto {
    fn from(reservation: Reservation) -> Self {
        let (rate_class, rate_tier) = match reservation.rate_class {
            RateClass::Standard => ("standard".to_string(), None),
            RateClass::Priority { tier } => ("priority".to_string(), Some(tier.to_string())),
        };

        Self {
            id: reservation.id,
            guest_name: reservation.guest_name,
            room_number: reservation.room_number,
            contact_number: reservation.contact_number,
            rate_class,
            rate_tier,
            rate: reservation.rate_class.rate(),
            created_at: reservation.created_at.to_rfc3339(),
        }
    }
}

/// Form input for a new reservation. Room number arrives as text, exactly as
/// typed; the command layer parses and validates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservationDto {
    pub guest_name: String,
    pub room_number: String,
    pub contact_number: String,
    pub priority: bool,
    pub priority_tier: Option<String>,
}

/// Form input for updating an existing reservation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateReservationDto {
    pub reservation_id: String,
    pub guest_name: String,
    pub room_number: String,
    pub contact_number: String,
}

/// Form input for a room-number lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetRoomDto {
    pub reservation_id: String,
    pub guest_name: String,
}
