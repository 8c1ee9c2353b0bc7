// 📥 Graph Loader - two-phase load with referential integrity
//
// Phase 1: rooms + reservations. Rooms are the authority for which
//          reservations exist; every id they list is resolved exactly once.
// Phase 2: persons. A person may only point at reservations phase 1 built.
//
// State machine:
//   Unloaded ──rooms──▶ RoomsLoaded ──persons──▶ Loaded
//       └──────────── any error ──────────────▶ Failed
//
// A phase builds into local collections and only commits on success, so a
// failed phase leaves nothing half-attached. A loader performs one load;
// after Failed it must be discarded.

use anyhow::Context;

use crate::documents::{DocumentSource, PersonsDocument, ReservationsDocument, RoomsDocument};
use crate::entities::{HotelRoom, Person, RoomKey};
use crate::error::{LoadError, Referrer};
use crate::graph::HotelGraph;
use crate::resolver::{ReferenceResolver, ReservationIndex};
use crate::validation::{ValidationPolicy, ValidationReport, Validator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    RoomsLoaded,
    Loaded,
    Failed,
}

pub struct Loader {
    state: LoadState,
    validator: Validator,
    rooms: Vec<HotelRoom>,
    persons: Vec<Person>,
    index: ReservationIndex,
    report: ValidationReport,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    /// Loader with the default policy (every validation rule warns)
    pub fn new() -> Self {
        Self::with_policy(ValidationPolicy::default())
    }

    pub fn with_policy(policy: ValidationPolicy) -> Self {
        Loader {
            state: LoadState::Unloaded,
            validator: Validator::new(policy),
            rooms: Vec::new(),
            persons: Vec::new(),
            index: ReservationIndex::new(),
            report: ValidationReport::default(),
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    // ========================================================================
    // LOADING
    // ========================================================================

    /// Fetch the documents from `source` and load them
    pub fn load_from(&mut self, source: &dyn DocumentSource) -> anyhow::Result<()> {
        tracing::info!(source = %source.describe(), "loading hotel data");
        let documents = source
            .fetch()
            .with_context(|| format!("Failed to fetch documents from {}", source.describe()))?;

        self.load_data(&documents.rooms, &documents.persons, &documents.reservations)?;
        Ok(())
    }

    /// Run both phases in order and mark the loader loaded
    pub fn load_data(
        &mut self,
        rooms: &RoomsDocument,
        persons: &PersonsDocument,
        reservations: &ReservationsDocument,
    ) -> Result<(), LoadError> {
        self.load_rooms_and_reservations(rooms, reservations)?;
        self.load_persons(persons)
    }

    /// Phase 1: build every room and the reservations it lists
    pub fn load_rooms_and_reservations(
        &mut self,
        rooms: &RoomsDocument,
        reservations: &ReservationsDocument,
    ) -> Result<(), LoadError> {
        if self.state != LoadState::Unloaded {
            return self.fail(LoadError::Sequencing(format!(
                "rooms can only be loaded once, loader is {:?}",
                self.state
            )));
        }

        let mut resolver = ReferenceResolver::new(reservations);
        let mut built = Vec::with_capacity(rooms.len());

        for (key, record) in rooms {
            let room_key = RoomKey(built.len());
            let mut room = HotelRoom::new(record.room_type, record.number);
            room.set_price(record.price);
            for amenity in &record.amenities {
                room.add_amenity(*amenity);
            }

            for id in &record.reservations {
                let reservation = match resolver.resolve(*id, room_key, record.number) {
                    Ok(reservation) => reservation,
                    Err(err) => return self.fail(err),
                };
                room.add_reservation(reservation);
            }

            tracing::debug!(
                record = %key,
                room = record.number,
                reservations = room.reservation_count(),
                "loaded room"
            );
            built.push(room);
        }

        let issues = self.validator.check_rooms(&built);
        if let Err(err) = self.validator.apply(issues, &mut self.report) {
            return self.fail(err);
        }

        self.index = resolver.into_index();
        self.rooms = built;
        self.state = LoadState::RoomsLoaded;

        tracing::info!(
            rooms = self.rooms.len(),
            reservations = self.index.len(),
            "rooms and reservations loaded"
        );
        Ok(())
    }

    /// Phase 2: build persons, attaching reservations phase 1 created
    pub fn load_persons(&mut self, persons: &PersonsDocument) -> Result<(), LoadError> {
        if self.state != LoadState::RoomsLoaded {
            return self.fail(LoadError::Sequencing(format!(
                "reservations not yet loaded, loader is {:?}",
                self.state
            )));
        }
        if self.rooms.is_empty() {
            return self.fail(LoadError::Sequencing(
                "reservations not yet loaded, no rooms were loaded".to_string(),
            ));
        }

        let mut built = Vec::with_capacity(persons.len());

        for (key, record) in persons {
            let mut person = Person::new(record.name.clone());
            if let Some(email) = &record.email {
                person.set_email(email.clone());
            }
            person.add_balance(record.balance);

            for id in &record.reservations {
                if !self.index.contains(*id) {
                    return self.fail(LoadError::DanglingReference {
                        id: *id,
                        referrer: Referrer::Person(record.name.clone()),
                    });
                }
                person.add_reservation(*id);
            }

            tracing::debug!(
                record = %key,
                reservations = person.reservations().len(),
                "loaded person"
            );
            built.push(person);
        }

        let issues = self.validator.check_persons(&built);
        if let Err(err) = self.validator.apply(issues, &mut self.report) {
            return self.fail(err);
        }

        self.persons = built;
        self.state = LoadState::Loaded;

        tracing::info!(persons = self.persons.len(), "persons loaded");
        Ok(())
    }

    fn fail(&mut self, err: LoadError) -> Result<(), LoadError> {
        tracing::error!(error = %err, "load failed");
        self.state = LoadState::Failed;
        Err(err)
    }

    // ========================================================================
    // ACCESSORS (valid only after a successful load)
    // ========================================================================

    fn ensure_loaded(&self) -> Result<(), LoadError> {
        if self.state == LoadState::Loaded {
            Ok(())
        } else {
            Err(LoadError::NotLoaded)
        }
    }

    pub fn persons(&self) -> Result<&[Person], LoadError> {
        self.ensure_loaded()?;
        Ok(&self.persons)
    }

    pub fn rooms(&self) -> Result<&[HotelRoom], LoadError> {
        self.ensure_loaded()?;
        Ok(&self.rooms)
    }

    /// Warnings from rules running in warn mode
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Hand the loaded graph over to the caller
    pub fn into_graph(self) -> Result<HotelGraph, LoadError> {
        self.ensure_loaded()?;
        Ok(HotelGraph::new(self.rooms, self.persons, self.index))
    }
}

// ============================================================================
// TESTS
// ============================================================================
