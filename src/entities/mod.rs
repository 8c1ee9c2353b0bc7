// Entity Models - rooms, reservations, persons
//
// Ownership follows the booking flow:
// - A HotelRoom OWNS the reservations attached to it
// - A Reservation points back at its room through a RoomKey
// - A Person only holds ReservationIds, resolved through the HotelGraph

pub mod person;
pub mod reservation;
pub mod room;

pub use person::Person;
pub use reservation::{Reservation, ReservationId};
pub use room::{Amenity, HotelRoom, RoomKey, RoomType};
