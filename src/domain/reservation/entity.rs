use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single room reservation.
///
/// An `id` of 0 means "not yet persisted"; the store assigns the real
/// identifier on insert and it never changes afterwards. `created_at` is
/// stamped at construction time, not at persistence time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    /// Store-assigned identifier (0 until persisted)
    pub id: i64,

    /// Guest the room is held for (never empty)
    pub guest_name: String,

    /// Room the reservation points at. Several reservations may reference
    /// the same room; arbitrating that is not this layer's job.
    pub room_number: u32,

    /// Contact phone, stored as-is
    pub contact_number: String,

    /// Rate category for this reservation
    pub rate_class: RateClass,

    /// Creation timestamp, immutable
    pub created_at: DateTime<Utc>,
}

/// Rate category of a reservation.
///
/// Closed set: a reservation is either standard or priority with a named
/// tier. Keeping it a tagged enum means `rate()` is exhaustively checkable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "class")]
pub enum RateClass {
    Standard,
    Priority { tier: PriorityTier },
}

/// Named tier of a priority reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    Silver,
    Gold,
    Platinum,
}

/// Nightly base rate for standard reservations
const STANDARD_RATE: f64 = 100.0;

impl Reservation {
    /// Create a new, not-yet-persisted reservation
    pub fn new(
        guest_name: String,
        room_number: u32,
        contact_number: String,
        rate_class: RateClass,
    ) -> Self {
        Self {
            id: 0,
            guest_name,
            room_number,
            contact_number,
            rate_class,
            created_at: Utc::now(),
        }
    }

    /// True once the store has assigned an identifier
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    /// Nightly rate for this reservation
    pub fn rate(&self) -> f64 {
        self.rate_class.rate()
    }
}

impl RateClass {
    pub fn rate(&self) -> f64 {
        match self {
            RateClass::Standard => STANDARD_RATE,
            RateClass::Priority { tier } => tier.rate(),
        }
    }
}

impl PriorityTier {
    /// Map free-form tier text to a tier.
    ///
    /// Unrecognized text falls back to `Silver` (the default tier) rather
    /// than failing; tier labels come from user input.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "GOLD" => PriorityTier::Gold,
            "PLATINUM" => PriorityTier::Platinum,
            _ => PriorityTier::Silver,
        }
    }

    pub fn rate(&self) -> f64 {
        match self {
            PriorityTier::Silver => 90.0,
            PriorityTier::Gold => 80.0,
            PriorityTier::Platinum => 70.0,
        }
    }
}

impl std::fmt::Display for RateClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateClass::Standard => write!(f, "standard"),
            RateClass::Priority { tier } => write!(f, "priority:{}", tier),
        }
    }
}

impl std::fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriorityTier::Silver => write!(f, "silver"),
            PriorityTier::Gold => write!(f, "gold"),
            PriorityTier::Platinum => write!(f, "platinum"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reservation_is_unpersisted() {
        let r = Reservation::new(
            "Okabe Rintarou".to_string(),
            101,
            "555-0100".to_string(),
            RateClass::Standard,
        );
        assert_eq!(r.id, 0);
        assert!(!r.is_persisted());
    }

    #[test]
    fn test_standard_rate_is_base_rate() {
        let r = Reservation::new(
            "Makise Kurisu".to_string(),
            204,
            "555-0101".to_string(),
            RateClass::Standard,
        );
        assert_eq!(r.rate(), 100.0);
    }

    #[test]
    fn test_priority_tier_rates() {
        assert_eq!(PriorityTier::Silver.rate(), 90.0);
        assert_eq!(PriorityTier::Gold.rate(), 80.0);
        assert_eq!(PriorityTier::Platinum.rate(), 70.0);
    }

    #[test]
    fn test_unknown_tier_label_falls_back_to_default() {
        // Unknown labels map to the default tier, not an error
        assert_eq!(PriorityTier::from_label("copper"), PriorityTier::Silver);
        assert_eq!(PriorityTier::from_label(""), PriorityTier::Silver);
        assert_eq!(
            PriorityTier::from_label("copper").rate(),
            PriorityTier::Silver.rate()
        );
    }

    #[test]
    fn test_tier_label_parsing_is_case_insensitive() {
        assert_eq!(PriorityTier::from_label("gold"), PriorityTier::Gold);
        assert_eq!(PriorityTier::from_label("  GOLD "), PriorityTier::Gold);
        assert_eq!(PriorityTier::from_label("Platinum"), PriorityTier::Platinum);
    }
}
