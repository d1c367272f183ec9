// src/application/commands.rs
//
// Reservation Command Handlers
//
// RULES:
// - Accept DTOs
// - Validate and parse input, then call services
// - Return DTOs
// - Never contain business logic

use crate::application::dto::{
    CreateReservationDto, GetRoomDto, ReservationDto, UpdateReservationDto,
};
use crate::application::state::AppState;
use crate::domain::reservation::{validate_reservation, PriorityTier, RateClass, Reservation};
use crate::error::{AppError, AppResult};

/// Parse a form-typed identifier
fn parse_id(text: &str) -> AppResult<i64> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| AppError::Validation(format!("Invalid reservation id: '{}'", text)))
}

/// Parse a form-typed room number
fn parse_room_number(text: &str) -> AppResult<u32> {
    text.trim()
        .parse::<u32>()
        .map_err(|_| AppError::Validation(format!("Invalid room number: '{}'", text)))
}

/// Build and validate a reservation from form input. Rejection happens here,
/// before the manager is reached.
fn parse_reservation(
    guest_name: &str,
    room_number: &str,
    contact_number: &str,
    rate_class: RateClass,
) -> AppResult<Reservation> {
    let reservation = Reservation::new(
        guest_name.trim().to_string(),
        parse_room_number(room_number)?,
        contact_number.trim().to_string(),
        rate_class,
    );
    validate_reservation(&reservation)?;
    Ok(reservation)
}

/// Create a new reservation; returns the store-assigned id
pub fn create_reservation(state: &AppState, dto: CreateReservationDto) -> Result<i64, String> {
    let rate_class = if dto.priority {
        RateClass::Priority {
            tier: PriorityTier::from_label(dto.priority_tier.as_deref().unwrap_or("")),
        }
    } else {
        RateClass::Standard
    };

    let reservation = parse_reservation(
        &dto.guest_name,
        &dto.room_number,
        &dto.contact_number,
        rate_class,
    )
    .map_err(|e| e.to_string())?;

    state.manager.reserve(reservation).map_err(|e| e.to_string())
}

/// Fetch all reservations from the store, refreshing the cache
pub fn list_reservations(state: &AppState) -> Result<Vec<ReservationDto>, String> {
    let reservations = state.manager.view_all().map_err(|e| e.to_string())?;

    Ok(reservations.into_iter().map(ReservationDto::from).collect())
}

/// Room number for an (id, guest name) pair; `None` when no such reservation
pub fn get_room_number(state: &AppState, dto: GetRoomDto) -> Result<Option<u32>, String> {
    let id = parse_id(&dto.reservation_id).map_err(|e| e.to_string())?;

    state
        .manager
        .get_room(id, dto.guest_name.trim())
        .map_err(|e| e.to_string())
}

/// Replace an existing reservation's mutable fields
pub fn update_reservation(state: &AppState, dto: UpdateReservationDto) -> Result<(), String> {
    let id = parse_id(&dto.reservation_id).map_err(|e| e.to_string())?;

    let reservation = parse_reservation(
        &dto.guest_name,
        &dto.room_number,
        &dto.contact_number,
        RateClass::Standard,
    )
    .map_err(|e| e.to_string())?;

    state.manager.update(id, reservation).map_err(|e| e.to_string())
}

/// Delete a reservation by id
pub fn delete_reservation(state: &AppState, reservation_id: String) -> Result<(), String> {
    let id = parse_id(&reservation_id).map_err(|e| e.to_string())?;

    state.manager.delete(id).map_err(|e| e.to_string())
}

/// Current cache content without touching the store
pub fn cached_reservations(state: &AppState) -> Vec<ReservationDto> {
    state
        .manager
        .cache_snapshot()
        .into_iter()
        .map(ReservationDto::from)
        .collect()
}

/// Stop the background sync loop (idempotent)
pub fn stop_auto_sync(state: &AppState) {
    state.auto_sync.stop();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_rejects_non_numeric() {
        assert!(parse_id("abc").is_err());
        assert!(parse_id("").is_err());
        assert_eq!(parse_id(" 42 ").unwrap(), 42);
    }

    #[test]
    fn test_parse_room_number_rejects_garbage() {
        assert!(parse_room_number("12a").is_err());
        assert!(parse_room_number("-3").is_err());
        assert_eq!(parse_room_number("101").unwrap(), 101);
    }

    #[test]
    fn test_parse_reservation_rejects_empty_guest() {
        let result = parse_reservation("  ", "101", "555-0100", RateClass::Standard);
        assert!(matches!(result, Err(AppError::Domain(_))));
    }

    #[test]
    fn test_parse_reservation_rejects_zero_room() {
        let result = parse_reservation("Guest", "0", "555-0100", RateClass::Standard);
        assert!(matches!(result, Err(AppError::Domain(_))));
    }

    #[test]
    fn test_parse_reservation_trims_input() {
        let reservation =
            parse_reservation(" Guest ", " 101 ", " 555-0100 ", RateClass::Standard).unwrap();
        assert_eq!(reservation.guest_name, "Guest");
        assert_eq!(reservation.room_number, 101);
        assert_eq!(reservation.contact_number, "555-0100");
    }
}
