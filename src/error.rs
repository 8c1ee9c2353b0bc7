// ❌ Load Errors - every variant is fatal to the current load
//
// Nothing is skipped or repaired: one bad record invalidates the whole batch
// and the loader that produced the error must be discarded.

use thiserror::Error;

use crate::documents::DocumentKind;
use crate::entities::ReservationId;
use crate::validation::ValidationIssue;

/// Who referenced a reservation id that could not be resolved
#[derive(Debug, Clone, PartialEq)]
pub enum Referrer {
    Room(u32),
    Person(String),
}

impl std::fmt::Display for Referrer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Referrer::Room(number) => write!(f, "room {}", number),
            Referrer::Person(name) => write!(f, "person '{}'", name),
        }
    }
}

/// Coarse error taxonomy, useful for callers deciding what to tell the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Sequencing,
    DanglingReference,
    DuplicateOwnership,
    Malformed,
    Validation,
}

#[derive(Debug, Error)]
pub enum LoadError {
    /// A load phase was run out of order
    #[error("Load sequencing error: {0}")]
    Sequencing(String),

    /// Accessors were used before a successful load
    #[error("Objects must be loaded using load_data() before getting")]
    NotLoaded,

    /// A room or person names a reservation id that does not resolve
    #[error("Missing data for reservation {id} (referenced by {referrer})")]
    DanglingReference { id: ReservationId, referrer: Referrer },

    /// Two rooms claim the same reservation id
    #[error("Multiple rooms for reservation {id} (rooms {first_room} and {second_room})")]
    DuplicateOwnership {
        id: ReservationId,
        first_room: u32,
        second_room: u32,
    },

    /// A record or field in one of the documents does not parse
    #[error("Malformed {document} document: {reason}")]
    Malformed { document: DocumentKind, reason: String },

    /// An enforced validation rule failed
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<ValidationIssue>),
}

impl LoadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoadError::Sequencing(_) | LoadError::NotLoaded => ErrorKind::Sequencing,
            LoadError::DanglingReference { .. } => ErrorKind::DanglingReference,
            LoadError::DuplicateOwnership { .. } => ErrorKind::DuplicateOwnership,
            LoadError::Malformed { .. } => ErrorKind::Malformed,
            LoadError::Validation(_) => ErrorKind::Validation,
        }
    }

    pub(crate) fn malformed(document: DocumentKind, reason: impl Into<String>) -> Self {
        LoadError::Malformed {
            document,
            reason: reason.into(),
        }
    }
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
