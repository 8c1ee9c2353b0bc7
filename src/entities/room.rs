// 🛏️ HotelRoom Entity - type, number, price, amenities + owned reservations
//
// Room type and amenity names are decoded by exact, case-sensitive match.
// An unknown name fails the decode instead of falling back to a default.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::reservation::{Reservation, ReservationId};

// ============================================================================
// ROOM TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoomType {
    /// One bed, one guest
    Single,

    /// Two guests
    Double,

    /// Three guests
    Triple,

    /// Four guests
    Quad,

    /// Separate living area
    Suite,

    /// Top floor suite
    Penthouse,
}

impl RoomType {
    pub const ALL: [RoomType; 6] = [
        RoomType::Single,
        RoomType::Double,
        RoomType::Triple,
        RoomType::Quad,
        RoomType::Suite,
        RoomType::Penthouse,
    ];

    /// Name as written in the rooms document
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Single => "Single",
            RoomType::Double => "Double",
            RoomType::Triple => "Triple",
            RoomType::Quad => "Quad",
            RoomType::Suite => "Suite",
            RoomType::Penthouse => "Penthouse",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            RoomType::Single => "Single room",
            RoomType::Double => "Double room",
            RoomType::Triple => "Triple room",
            RoomType::Quad => "Quad room",
            RoomType::Suite => "Suite",
            RoomType::Penthouse => "Penthouse suite",
        }
    }
}

// ============================================================================
// AMENITY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Amenity {
    Bath,
    Shower,
    Kitchen,
    Wifi,
    Television,
    Balcony,
    Minibar,
    Refrigerator,
}

impl Amenity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Amenity::Bath => "Bath",
            Amenity::Shower => "Shower",
            Amenity::Kitchen => "Kitchen",
            Amenity::Wifi => "Wifi",
            Amenity::Television => "Television",
            Amenity::Balcony => "Balcony",
            Amenity::Minibar => "Minibar",
            Amenity::Refrigerator => "Refrigerator",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Amenity::Bath => "Bathtub",
            Amenity::Shower => "Shower",
            Amenity::Kitchen => "Kitchenette",
            Amenity::Wifi => "Wireless internet",
            Amenity::Television => "TV",
            Amenity::Balcony => "Private balcony",
            Amenity::Minibar => "Minibar",
            Amenity::Refrigerator => "Refrigerator",
        }
    }
}

// ============================================================================
// ROOM KEY
// ============================================================================

/// Position of a room inside its HotelGraph.
///
/// Room numbers are not guaranteed unique, so reservations point back at
/// their room through this key instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomKey(pub usize);

// ============================================================================
// HOTEL ROOM ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct HotelRoom {
    room_type: RoomType,
    number: u32,
    price: u32,
    amenities: BTreeSet<Amenity>,

    /// Reservations attached to this room, keyed by id (owned)
    reservations: BTreeMap<ReservationId, Reservation>,
}

impl HotelRoom {
    pub fn new(room_type: RoomType, number: u32) -> Self {
        HotelRoom {
            room_type,
            number,
            price: 0,
            amenities: BTreeSet::new(),
            reservations: BTreeMap::new(),
        }
    }

    pub fn room_type(&self) -> RoomType {
        self.room_type
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn price(&self) -> u32 {
        self.price
    }

    pub fn set_price(&mut self, price: u32) {
        self.price = price;
    }

    pub fn amenities(&self) -> &BTreeSet<Amenity> {
        &self.amenities
    }

    /// Add an amenity (duplicates collapse)
    pub fn add_amenity(&mut self, amenity: Amenity) {
        self.amenities.insert(amenity);
    }

    pub fn has_amenity(&self, amenity: Amenity) -> bool {
        self.amenities.contains(&amenity)
    }

    /// Attach a reservation to this room.
    /// Returns false (and keeps the existing one) if the id is already attached.
    pub fn add_reservation(&mut self, reservation: Reservation) -> bool {
        if self.reservations.contains_key(&reservation.id()) {
            return false;
        }
        self.reservations.insert(reservation.id(), reservation);
        true
    }

    pub fn reservation(&self, id: ReservationId) -> Option<&Reservation> {
        self.reservations.get(&id)
    }

    pub fn reservations(&self) -> impl Iterator<Item = &Reservation> + '_ {
        self.reservations.values()
    }

    pub fn reservation_count(&self) -> usize {
        self.reservations.len()
    }

    /// Total nights across every stay; inverted ranges count as zero
    pub fn nights_booked(&self) -> i64 {
        self.reservations.values().map(|r| r.nights().max(0)).sum()
    }

    /// Human-readable amenity list, e.g. "Bathtub, Wireless internet"
    pub fn amenity_descriptions(&self) -> String {
        self.amenities
            .iter()
            .map(|a| a.description())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ============================================================================
// TESTS
// ============================================================================
