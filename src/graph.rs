// 🏨 Hotel Graph - the loaded rooms, persons and the reservation index
//
// Rooms own reservations. Persons hold ids, and every lookup from a person
// goes through the index to the single instance inside the room.

use crate::entities::{HotelRoom, Person, Reservation, ReservationId, RoomKey};
use crate::resolver::ReservationIndex;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotelGraph {
    rooms: Vec<HotelRoom>,
    persons: Vec<Person>,
    index: ReservationIndex,
}

impl HotelGraph {
    pub(crate) fn new(rooms: Vec<HotelRoom>, persons: Vec<Person>, index: ReservationIndex) -> Self {
        HotelGraph {
            rooms,
            persons,
            index,
        }
    }

    pub fn rooms(&self) -> &[HotelRoom] {
        &self.rooms
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn index(&self) -> &ReservationIndex {
        &self.index
    }

    pub fn room(&self, key: RoomKey) -> Option<&HotelRoom> {
        self.rooms.get(key.0)
    }

    /// Rooms with their graph keys
    pub fn keyed_rooms(&self) -> impl Iterator<Item = (RoomKey, &HotelRoom)> + '_ {
        self.rooms.iter().enumerate().map(|(i, room)| (RoomKey(i), room))
    }

    /// First room carrying `number`
    pub fn find_room(&self, number: u32) -> Option<&HotelRoom> {
        self.rooms.iter().find(|room| room.number() == number)
    }

    pub fn find_person(&self, name: &str) -> Option<&Person> {
        self.persons.iter().find(|person| person.name() == name)
    }

    /// Resolve an id to the reservation owned by its room
    pub fn reservation(&self, id: ReservationId) -> Option<&Reservation> {
        let key = self.index.owner(id)?;
        self.room(key)?.reservation(id)
    }

    pub fn room_of(&self, reservation: &Reservation) -> Option<&HotelRoom> {
        self.room(reservation.room())
    }

    /// Reservations a person holds, resolved to the room-owned instances
    pub fn reservations_of<'a>(&'a self, person: &'a Person) -> impl Iterator<Item = &'a Reservation> + 'a {
        person
            .reservations()
            .iter()
            .filter_map(move |id| self.reservation(*id))
    }

    /// The person holding a reservation, if any
    pub fn holder_of(&self, id: ReservationId) -> Option<&Person> {
        self.persons.iter().find(|person| person.has_reservation(id))
    }

    pub fn reservation_count(&self) -> usize {
        self.index.len()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} rooms, {} reservations, {} persons",
            self.rooms.len(),
            self.reservation_count(),
            self.persons.len()
        )
    }
}
