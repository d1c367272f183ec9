use super::entity::Reservation;
use crate::domain::{DomainError, DomainResult};

/// Validates all Reservation invariants
/// These are the absolute rules that must hold for a Reservation to be valid
pub fn validate_reservation(reservation: &Reservation) -> DomainResult<()> {
    validate_guest_name(&reservation.guest_name)?;
    validate_room_number(reservation.room_number)?;
    Ok(())
}

/// Guest name cannot be empty
fn validate_guest_name(guest_name: &str) -> DomainResult<()> {
    if guest_name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Guest name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Room number must be positive
fn validate_room_number(room_number: u32) -> DomainResult<()> {
    if room_number == 0 {
        return Err(DomainError::InvariantViolation(
            "Room number must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Invariants that must hold true for the Reservation domain:
///
/// 1. Identity is 0 until the store assigns one, immutable afterwards
/// 2. Identity is the sole lookup key for cache and store
/// 3. Guest name is never empty
/// 4. Room number is positive; uniqueness is not arbitrated here
/// 5. Created timestamp is set at construction and never recomputed
/// 6. Rate class is a closed set; unknown tier text maps to the default tier

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reservation::RateClass;

    fn reservation(guest: &str, room: u32) -> Reservation {
        Reservation::new(guest.to_string(), room, "555-0100".to_string(), RateClass::Standard)
    }

    #[test]
    fn test_valid_reservation() {
        assert!(validate_reservation(&reservation("Mori Kogoro", 101)).is_ok());
    }

    #[test]
    fn test_empty_guest_name_fails() {
        assert!(validate_reservation(&reservation("   ", 101)).is_err());
    }

    #[test]
    fn test_zero_room_number_fails() {
        assert!(validate_reservation(&reservation("Mori Kogoro", 0)).is_err());
    }
}
