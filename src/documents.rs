// 📄 Document Sources - the three raw keyed record sets
//
// rooms:        { "<key>": { type, number, price, amenities, reservations } }
// persons:      { "<key>": { name, email, balance, reservations } }
// reservations: { "<id>":  { startDate, endDate } }
//
// Keys of the rooms and persons documents are opaque. Keys of the
// reservations document are the decimal rendering of the reservation id.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::entities::{Amenity, ReservationId, RoomType};
use crate::error::LoadError;

pub const ROOMS_FILE: &str = "roomsData.json";
pub const PERSONS_FILE: &str = "personData.json";
pub const RESERVATIONS_FILE: &str = "reservationData.json";

// ============================================================================
// RAW RECORDS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub number: u32,
    pub price: u32,
    pub amenities: Vec<Amenity>,
    pub reservations: Vec<ReservationId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRecord {
    /// ISO calendar date, parsed by the resolver
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub balance: f64,
    pub reservations: Vec<ReservationId>,
}

pub type RoomsDocument = BTreeMap<String, RoomRecord>;
pub type PersonsDocument = BTreeMap<String, PersonRecord>;
pub type ReservationsDocument = BTreeMap<String, ReservationRecord>;

// ============================================================================
// DOCUMENT KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Rooms,
    Persons,
    Reservations,
}

impl DocumentKind {
    pub fn name(&self) -> &'static str {
        match self {
            DocumentKind::Rooms => "rooms",
            DocumentKind::Persons => "persons",
            DocumentKind::Reservations => "reservations",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            DocumentKind::Rooms => ROOMS_FILE,
            DocumentKind::Persons => PERSONS_FILE,
            DocumentKind::Reservations => RESERVATIONS_FILE,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// DOCUMENT SET
// ============================================================================

/// The three documents a load consumes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentSet {
    pub rooms: RoomsDocument,
    pub persons: PersonsDocument,
    pub reservations: ReservationsDocument,
}

impl DocumentSet {
    /// Decode the three documents from JSON text
    pub fn from_json(rooms: &str, persons: &str, reservations: &str) -> Result<Self, LoadError> {
        Ok(DocumentSet {
            rooms: decode_document(DocumentKind::Rooms, rooms)?,
            persons: decode_document(DocumentKind::Persons, persons)?,
            reservations: decode_document(DocumentKind::Reservations, reservations)?,
        })
    }

    /// Render one document as pretty JSON
    pub fn to_json_pretty(&self, kind: DocumentKind) -> Result<String> {
        let text = match kind {
            DocumentKind::Rooms => serde_json::to_string_pretty(&self.rooms),
            DocumentKind::Persons => serde_json::to_string_pretty(&self.persons),
            DocumentKind::Reservations => serde_json::to_string_pretty(&self.reservations),
        };
        text.with_context(|| format!("Failed to serialize {} document", kind))
    }
}

/// Decode a keyed document record by record, so a bad record is reported by key
pub fn decode_document<T: DeserializeOwned>(
    kind: DocumentKind,
    text: &str,
) -> Result<BTreeMap<String, T>, LoadError> {
    let raw: BTreeMap<String, Value> = serde_json::from_str(text)
        .map_err(|e| LoadError::malformed(kind, format!("not a JSON object of records: {}", e)))?;

    let mut records = BTreeMap::new();
    for (key, value) in raw {
        let record = serde_json::from_value(value)
            .map_err(|e| LoadError::malformed(kind, format!("record '{}': {}", key, e)))?;
        records.insert(key, record);
    }
    Ok(records)
}

// ============================================================================
// DOCUMENT SOURCE
// ============================================================================

/// Supplier of the raw documents.
///
/// Where the documents come from (files, memory, network) is the source's
/// business; I/O failures surface through `fetch`.
pub trait DocumentSource {
    /// Short description used in log lines
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<DocumentSet>;
}

/// Documents already held in memory
pub struct MemorySource {
    documents: DocumentSet,
}

impl MemorySource {
    pub fn new(documents: DocumentSet) -> Self {
        MemorySource { documents }
    }
}

impl DocumentSource for MemorySource {
    fn describe(&self) -> String {
        format!(
            "memory ({} rooms, {} persons, {} reservations)",
            self.documents.rooms.len(),
            self.documents.persons.len(),
            self.documents.reservations.len()
        )
    }

    fn fetch(&self) -> Result<DocumentSet> {
        Ok(self.documents.clone())
    }
}

/// Reads `roomsData.json`, `personData.json` and `reservationData.json`
/// from one data directory.
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectorySource { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, kind: DocumentKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    fn read(&self, kind: DocumentKind) -> Result<String> {
        let path = self.path_of(kind);
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {} document: {}", kind, path.display()))
    }

    /// Write a document set into the directory, creating it if needed
    pub fn write(&self, documents: &DocumentSet) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create data directory: {}", self.dir.display()))?;

        for kind in [DocumentKind::Rooms, DocumentKind::Persons, DocumentKind::Reservations] {
            let path = self.path_of(kind);
            let text = documents.to_json_pretty(kind)?;
            fs::write(&path, text)
                .with_context(|| format!("Failed to write {} document: {}", kind, path.display()))?;
            tracing::debug!(document = %kind, path = %path.display(), "wrote document");
        }
        Ok(())
    }
}

impl DocumentSource for DirectorySource {
    fn describe(&self) -> String {
        self.dir.display().to_string()
    }

    fn fetch(&self) -> Result<DocumentSet> {
        let rooms = self.read(DocumentKind::Rooms)?;
        let persons = self.read(DocumentKind::Persons)?;
        let reservations = self.read(DocumentKind::Reservations)?;

        let documents = DocumentSet::from_json(&rooms, &persons, &reservations)
            .with_context(|| format!("Failed to decode documents in {}", self.dir.display()))?;
        Ok(documents)
    }
}

// ============================================================================
// TESTS
// ============================================================================
