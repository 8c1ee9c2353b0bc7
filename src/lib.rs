// Hotel Graph - Core Library
// Loads rooms, reservations and persons from three JSON documents into one
// consistent graph, and writes the graph back out.

pub mod config;
pub mod documents;
pub mod entities;
pub mod error;
pub mod graph;
pub mod loader;
pub mod resolver;
pub mod saver;
pub mod validation;

// Re-export commonly used types
pub use config::{validate_prefix, LoaderConfig};
pub use documents::{
    DirectorySource, DocumentKind, DocumentSet, DocumentSource, MemorySource,
    PersonRecord, PersonsDocument, ReservationRecord, ReservationsDocument,
    RoomRecord, RoomsDocument,
};
pub use entities::{Amenity, HotelRoom, Person, Reservation, ReservationId, RoomKey, RoomType};
pub use error::{ErrorKind, LoadError, Referrer};
pub use graph::HotelGraph;
pub use loader::{LoadState, Loader};
pub use resolver::{ReferenceResolver, ReservationIndex};
pub use saver::save;
pub use validation::{Rule, RuleMode, ValidationIssue, ValidationPolicy, ValidationReport, Validator};
