// 💾 Saver - write a HotelGraph back into the three documents
//
// The output is loadable by the Loader and rebuilds an equivalent graph:
// same rooms, same reservations (id, dates, owning room), same persons with
// the same reservation ids. Room and person keys are their positions; the
// reservation key is the decimal id.

use crate::documents::{DocumentSet, PersonRecord, ReservationRecord, RoomRecord};
use crate::graph::HotelGraph;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn save(graph: &HotelGraph) -> DocumentSet {
    let mut documents = DocumentSet::default();

    for (key, room) in graph.keyed_rooms() {
        for reservation in room.reservations() {
            documents.reservations.insert(
                reservation.id().document_key(),
                ReservationRecord {
                    start_date: reservation.start_date().format(DATE_FORMAT).to_string(),
                    end_date: reservation.end_date().format(DATE_FORMAT).to_string(),
                },
            );
        }

        documents.rooms.insert(
            format!("room{}", key.0),
            RoomRecord {
                room_type: room.room_type(),
                number: room.number(),
                price: room.price(),
                amenities: room.amenities().iter().copied().collect(),
                reservations: room.reservations().map(|r| r.id()).collect(),
            },
        );
    }

    for (position, person) in graph.persons().iter().enumerate() {
        documents.persons.insert(
            format!("person{}", position),
            PersonRecord {
                name: person.name().to_string(),
                email: person.email().map(str::to_string),
                balance: person.balance(),
                reservations: person.reservations().iter().copied().collect(),
            },
        );
    }

    tracing::debug!(summary = %graph.summary(), "saved hotel graph");
    documents
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::{DirectorySource, DocumentKind};
    use crate::entities::ReservationId;
    use crate::loader::Loader;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    const ROOMS: &str = r#"{
        "north": { "type": "Suite", "number": 301, "price": 900,
                   "amenities": ["Kitchen", "Balcony", "Kitchen"], "reservations": [7, 12] },
        "south": { "type": "Single", "number": 102, "price": 80,
                   "amenities": [], "reservations": [9] },
        "east":  { "type": "Double", "number": 201, "price": 150,
                   "amenities": ["Wifi"], "reservations": [] }
    }"#;
    const PERSONS: &str = r#"{
        "a": { "name": "Kari", "email": "kari@example.com", "balance": 1250.75,
               "reservations": [7, 9] },
        "b": { "name": "Ola", "email": "ola@example.com", "balance": 0.1,
               "reservations": [12] },
        "c": { "name": "Anon", "balance": 0, "reservations": [] }
    }"#;
    const RESERVATIONS: &str = r#"{
        "7":  { "startDate": "2021-12-01", "endDate": "2021-12-02" },
        "9":  { "startDate": "2022-01-10", "endDate": "2022-01-14" },
        "12": { "startDate": "2021-12-20", "endDate": "2021-12-27" },
        "99": { "startDate": "2030-01-01", "endDate": "2030-01-02" }
    }"#;

    type RoomShape = (u32, String, u32, Vec<String>, BTreeSet<(u64, NaiveDate, NaiveDate)>);
    type PersonShape = (String, Option<String>, u64, BTreeSet<(u64, u32)>);

    fn load_graph(documents: &DocumentSet) -> HotelGraph {
        let mut loader = Loader::new();
        loader
            .load_data(&documents.rooms, &documents.persons, &documents.reservations)
            .unwrap();
        loader.into_graph().unwrap()
    }

    /// Order-independent shape of the graph
    fn shape(graph: &HotelGraph) -> (BTreeSet<RoomShape>, BTreeSet<PersonShape>) {
        let rooms: BTreeSet<RoomShape> = graph
            .rooms()
            .iter()
            .map(|room| {
                (
                    room.number(),
                    room.room_type().as_str().to_string(),
                    room.price(),
                    room.amenities().iter().map(|a| a.as_str().to_string()).collect(),
                    room.reservations()
                        .map(|r| (r.id().0, r.start_date(), r.end_date()))
                        .collect(),
                )
            })
            .collect();

        let persons: BTreeSet<PersonShape> = graph
            .persons()
            .iter()
            .map(|person| {
                (
                    person.name().to_string(),
                    person.email().map(str::to_string),
                    person.balance().to_bits(),
                    graph
                        .reservations_of(person)
                        .map(|r| (r.id().0, graph.room_of(r).unwrap().number()))
                        .collect(),
                )
            })
            .collect();

        (rooms, persons)
    }

    #[test]
    fn test_round_trip_rebuilds_same_graph() {
        let original = DocumentSet::from_json(ROOMS, PERSONS, RESERVATIONS).unwrap();
        let first = load_graph(&original);

        let saved = save(&first);
        let second = load_graph(&saved);

        assert_eq!(shape(&first), shape(&second));
    }

    #[test]
    fn test_round_trip_through_json_text() {
        let original = DocumentSet::from_json(ROOMS, PERSONS, RESERVATIONS).unwrap();
        let first = load_graph(&original);
        let saved = save(&first);

        let text = |kind: DocumentKind| saved.to_json_pretty(kind).unwrap();
        let reparsed = DocumentSet::from_json(
            &text(DocumentKind::Rooms),
            &text(DocumentKind::Persons),
            &text(DocumentKind::Reservations),
        )
        .unwrap();

        assert_eq!(reparsed, saved);
        assert_eq!(shape(&load_graph(&reparsed)), shape(&first));
    }

    #[test]
    fn test_round_trip_through_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let original = DocumentSet::from_json(ROOMS, PERSONS, RESERVATIONS).unwrap();
        let first = load_graph(&original);

        let source = DirectorySource::new(tmp.path());
        source.write(&save(&first)).unwrap();

        let mut loader = Loader::new();
        loader.load_from(&source).unwrap();
        assert_eq!(shape(&loader.into_graph().unwrap()), shape(&first));
    }

    #[test]
    fn test_saved_ids_are_integers_and_canonical_keys() {
        let original = DocumentSet::from_json(ROOMS, PERSONS, RESERVATIONS).unwrap();
        let saved = save(&load_graph(&original));

        let rooms_json = saved.to_json_pretty(DocumentKind::Rooms).unwrap();
        assert!(!rooms_json.contains("\"7\""));

        // Only reservations owned by a room are written back
        let keys: Vec<_> = saved.reservations.keys().cloned().collect();
        assert_eq!(keys, vec!["12", "7", "9"]);
        assert_eq!(saved.reservations["12"].end_date, "2021-12-27");
    }

    #[test]
    fn test_duplicate_amenities_saved_once() {
        let original = DocumentSet::from_json(ROOMS, PERSONS, RESERVATIONS).unwrap();
        let graph = load_graph(&original);
        let saved = save(&graph);

        let suite = saved.rooms.values().find(|r| r.number == 301).unwrap();
        assert_eq!(suite.amenities.len(), 2);
        assert_eq!(suite.reservations, vec![ReservationId(7), ReservationId(12)]);
    }

    #[test]
    fn test_balance_bits_survive_json_round_trip() {
        let mut documents = DocumentSet::from_json(ROOMS, PERSONS, RESERVATIONS).unwrap();
        let tiny = f64::from_bits(0x305f_050c_368d_cc73);
        documents.persons.get_mut("c").unwrap().balance = tiny;

        let first = load_graph(&documents);
        assert_eq!(first.find_person("Anon").unwrap().balance().to_bits(), tiny.to_bits());

        let saved = save(&first);
        let text = |kind: DocumentKind| saved.to_json_pretty(kind).unwrap();
        let reparsed = DocumentSet::from_json(
            &text(DocumentKind::Rooms),
            &text(DocumentKind::Persons),
            &text(DocumentKind::Reservations),
        )
        .unwrap();
        let second = load_graph(&reparsed);

        assert_eq!(
            second.find_person("Anon").unwrap().balance().to_bits(),
            tiny.to_bits()
        );
        assert_eq!(shape(&second), shape(&first));
    }
}
