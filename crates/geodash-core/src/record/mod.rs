//! Record model and the immutable record store

use std::fmt;
use std::str::FromStr;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique record key, either numeric or textual
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    /// Parse user input, preferring the numeric form
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.parse::<i64>() {
            Ok(value) => RecordId::Int(value),
            Err(_) => RecordId::Text(trimmed.to_string()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(value) => write!(f, "{}", value),
            RecordId::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Int(value)
    }
}

impl From<i32> for RecordId {
    fn from(value: i32) -> Self {
        RecordId::Int(i64::from(value))
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::Text(value)
    }
}

/// Record category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Active,
    Pending,
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Active, Status::Pending, Status::Completed];

    /// Display label, also the text the search box matches against
    pub fn label(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Pending => "Pending",
            Status::Completed => "Completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a status label is not one of the known categories
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .iter()
            .copied()
            .find(|status| status.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Geographic coordinate pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLon {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Whether both components are finite and inside the WGS84 ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

/// One geo-tagged data item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub position: LatLon,
    pub status: Status,
    /// Display-formatted timestamp, never reparsed
    pub last_updated: String,
}

impl Record {
    pub fn new(
        id: impl Into<RecordId>,
        name: impl Into<String>,
        position: LatLon,
        status: Status,
        last_updated: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
            status,
            last_updated: last_updated.into(),
        }
    }
}

/// Errors raised while building a record store
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("duplicate record id {0}")]
    DuplicateId(RecordId),

    #[error("record {id} has invalid coordinates {position}")]
    InvalidCoordinates { id: RecordId, position: LatLon },
}

/// The full, read-only record collection
///
/// Records keep their insertion order; every derived view refers to them by
/// position in this store.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    index: AHashMap<RecordId, usize>,
}

impl RecordStore {
    /// Build a store, rejecting duplicate ids and out-of-range coordinates
    pub fn new(records: Vec<Record>) -> Result<Self, StoreError> {
        let mut index = AHashMap::with_capacity(records.len());

        for (position, record) in records.iter().enumerate() {
            if !record.position.is_valid() {
                return Err(StoreError::InvalidCoordinates {
                    id: record.id.clone(),
                    position: record.position,
                });
            }
            if index.insert(record.id.clone(), position).is_some() {
                return Err(StoreError::DuplicateId(record.id.clone()));
            }
        }

        Ok(Self { records, index })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at a store position
    pub fn get(&self, position: usize) -> Option<&Record> {
        self.records.get(position)
    }

    /// Look up a record by id
    pub fn find(&self, id: &RecordId) -> Option<&Record> {
        self.index.get(id).map(|&position| &self.records[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }
}
