// 📅 Reservation Entity - one stay in one room
//
// "The id is IDENTITY (unique across every loaded document), the dates are VALUES"
//
// A reservation is created exactly once, by the resolver, while its room is
// being loaded. The room owns it; persons only remember the id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::room::RoomKey;

// ============================================================================
// RESERVATION ID
// ============================================================================

/// Numeric reservation identifier.
///
/// Serialized as a plain JSON integer inside `reservations` arrays; the key of
/// the reservations document is its decimal rendering (`Display`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(pub u64);

impl ReservationId {
    /// Key used for this id in the reservations document
    pub fn document_key(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// RESERVATION ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    id: ReservationId,

    /// Back-reference to the owning room (not ownership)
    room: RoomKey,

    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl Reservation {
    pub fn new(id: ReservationId, room: RoomKey, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Reservation {
            id,
            room,
            start_date,
            end_date,
        }
    }

    pub fn id(&self) -> ReservationId {
        self.id
    }

    pub fn room(&self) -> RoomKey {
        self.room
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Number of nights between start and end (negative for inverted ranges)
    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// True when the end date comes strictly after the start date
    pub fn is_chronological(&self) -> bool {
        self.end_date > self.start_date
    }

    /// Check if two stays share at least one night.
    /// The end date is the checkout day, so back-to-back stays do not overlap.
    pub fn overlaps(&self, other: &Reservation) -> bool {
        self.start_date < other.end_date && other.start_date < self.end_date
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn stay(id: u64, start: &str, end: &str) -> Reservation {
        Reservation::new(ReservationId(id), RoomKey(0), date(start), date(end))
    }

    #[test]
    fn test_id_document_key_is_decimal() {
        assert_eq!(ReservationId(7).document_key(), "7");
        assert_eq!(ReservationId(42).to_string(), "42");
    }

    #[test]
    fn test_id_serializes_as_integer() {
        let json = serde_json::to_string(&vec![ReservationId(7), ReservationId(9)]).unwrap();
        assert_eq!(json, "[7,9]");

        let ids: Vec<ReservationId> = serde_json::from_str("[7,9]").unwrap();
        assert_eq!(ids, vec![ReservationId(7), ReservationId(9)]);
    }

    #[test]
    fn test_nights() {
        assert_eq!(stay(1, "2021-12-01", "2021-12-02").nights(), 1);
        assert_eq!(stay(1, "2021-12-30", "2022-01-03").nights(), 4);
    }

    #[test]
    fn test_chronological() {
        assert!(stay(1, "2021-12-01", "2021-12-02").is_chronological());
        assert!(!stay(1, "2021-12-02", "2021-12-02").is_chronological());
        assert!(!stay(1, "2021-12-05", "2021-12-02").is_chronological());
    }

    #[test]
    fn test_overlap_detection() {
        let a = stay(1, "2021-12-01", "2021-12-05");
        let b = stay(2, "2021-12-04", "2021-12-08");
        let c = stay(3, "2021-12-05", "2021-12-06");

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        // Checkout day is free for the next guest
        assert!(!a.overlaps(&c));
    }
}
