// 🔗 Reference Resolver - turns a reservation id into exactly one Reservation
//
// Called once per id listed in a room record, during the room pass only.
// Order of checks:
//   1. id already claimed by a room  → DuplicateOwnership
//   2. id missing from the document  → DanglingReference
//   3. parse dates, build, register  → Reservation

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::documents::{DocumentKind, ReservationsDocument};
use crate::entities::{Reservation, ReservationId, RoomKey};
use crate::error::{LoadError, Referrer};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// RESERVATION INDEX
// ============================================================================

/// id → owning room. Built by the resolver, read by the person pass and
/// by HotelGraph lookups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationIndex {
    owners: HashMap<ReservationId, RoomKey>,
}

impl ReservationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(&self, id: ReservationId) -> Option<RoomKey> {
        self.owners.get(&id).copied()
    }

    pub fn contains(&self, id: ReservationId) -> bool {
        self.owners.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    fn register(&mut self, id: ReservationId, room: RoomKey) {
        self.owners.insert(id, room);
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

pub struct ReferenceResolver<'a> {
    reservations: &'a ReservationsDocument,
    index: ReservationIndex,

    /// Room number of each claim, for error messages
    claimed_by: HashMap<ReservationId, u32>,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(reservations: &'a ReservationsDocument) -> Self {
        ReferenceResolver {
            reservations,
            index: ReservationIndex::new(),
            claimed_by: HashMap::new(),
        }
    }

    /// Build the reservation `id` for the room at `room` (numbered `room_number`)
    pub fn resolve(
        &mut self,
        id: ReservationId,
        room: RoomKey,
        room_number: u32,
    ) -> Result<Reservation, LoadError> {
        if self.index.contains(id) {
            let first_room = self.claimed_by.get(&id).copied().unwrap_or(room_number);
            return Err(LoadError::DuplicateOwnership {
                id,
                first_room,
                second_room: room_number,
            });
        }

        let record = self
            .reservations
            .get(&id.document_key())
            .ok_or_else(|| LoadError::DanglingReference {
                id,
                referrer: Referrer::Room(room_number),
            })?;

        let start_date = parse_date(id, "startDate", &record.start_date)?;
        let end_date = parse_date(id, "endDate", &record.end_date)?;

        let reservation = Reservation::new(id, room, start_date, end_date);
        self.index.register(id, room);
        self.claimed_by.insert(id, room_number);

        tracing::debug!(reservation = %id, room = room_number, "resolved reservation");
        Ok(reservation)
    }

    pub fn index(&self) -> &ReservationIndex {
        &self.index
    }

    pub fn into_index(self) -> ReservationIndex {
        self.index
    }
}

fn parse_date(id: ReservationId, field: &str, value: &str) -> Result<NaiveDate, LoadError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        LoadError::malformed(
            DocumentKind::Reservations,
            format!("record '{}' field {}: '{}' is not an ISO date ({})", id, field, value, e),
        )
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::ReservationRecord;
    use crate::error::ErrorKind;

    fn reservations(entries: &[(&str, &str, &str)]) -> ReservationsDocument {
        entries
            .iter()
            .map(|(key, start, end)| {
                (
                    key.to_string(),
                    ReservationRecord {
                        start_date: start.to_string(),
                        end_date: end.to_string(),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_resolve_builds_reservation() {
        let doc = reservations(&[("7", "2021-12-01", "2021-12-02")]);
        let mut resolver = ReferenceResolver::new(&doc);

        let reservation = resolver.resolve(ReservationId(7), RoomKey(3), 101).unwrap();

        assert_eq!(reservation.id(), ReservationId(7));
        assert_eq!(reservation.room(), RoomKey(3));
        assert_eq!(reservation.start_date(), NaiveDate::from_ymd_opt(2021, 12, 1).unwrap());
        assert_eq!(reservation.end_date(), NaiveDate::from_ymd_opt(2021, 12, 2).unwrap());
        assert_eq!(resolver.index().owner(ReservationId(7)), Some(RoomKey(3)));
    }

    #[test]
    fn test_second_claim_is_duplicate() {
        let doc = reservations(&[("9", "2021-12-01", "2021-12-02")]);
        let mut resolver = ReferenceResolver::new(&doc);

        resolver.resolve(ReservationId(9), RoomKey(0), 101).unwrap();
        let err = resolver.resolve(ReservationId(9), RoomKey(1), 102).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DuplicateOwnership);
        assert!(err.to_string().contains("rooms 101 and 102"));
        // First claim is untouched
        assert_eq!(resolver.index().owner(ReservationId(9)), Some(RoomKey(0)));
    }

    #[test]
    fn test_same_room_listing_id_twice() {
        let doc = reservations(&[("5", "2021-12-01", "2021-12-02")]);
        let mut resolver = ReferenceResolver::new(&doc);
        resolver.resolve(ReservationId(5), RoomKey(0), 1).unwrap();

        let err = resolver.resolve(ReservationId(5), RoomKey(0), 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateOwnership);
    }

    #[test]
    fn test_missing_record_is_dangling() {
        let doc = reservations(&[]);
        let mut resolver = ReferenceResolver::new(&doc);

        let err = resolver.resolve(ReservationId(42), RoomKey(0), 101).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DanglingReference);
        assert!(resolver.index().is_empty());
    }

    #[test]
    fn test_key_must_be_canonical_decimal() {
        let doc = reservations(&[("007", "2021-12-01", "2021-12-02")]);
        let mut resolver = ReferenceResolver::new(&doc);

        let err = resolver.resolve(ReservationId(7), RoomKey(0), 101).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DanglingReference);
    }

    #[test]
    fn test_bad_date_is_malformed_and_not_registered() {
        let doc = reservations(&[("3", "01/12/2021", "2021-12-02")]);
        let mut resolver = ReferenceResolver::new(&doc);

        let err = resolver.resolve(ReservationId(3), RoomKey(0), 101).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
        assert!(err.to_string().contains("startDate"));
        assert!(!resolver.index().contains(ReservationId(3)));
    }
}
