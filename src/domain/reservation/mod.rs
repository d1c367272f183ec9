pub mod entity;
pub mod invariants;

pub use entity::{PriorityTier, RateClass, Reservation};
pub use invariants::validate_reservation;
