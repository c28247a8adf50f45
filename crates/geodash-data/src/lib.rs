//! Record sources for the geo dashboard
//!
//! Ingestion sits outside the view-state engine: every source here ends in an
//! immutable [`RecordStore`] that the coordinator reads from.

pub mod sources;

use geodash_core::record::{LatLon, Record, RecordId, RecordStore, Status, StoreError};
use serde::Deserialize;
use thiserror::Error;

// Re-exports
pub use sources::{from_path, CsvSource, JsonSource, MockSource};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// `record` counts data records from 1, not including any header line
    #[error("Record {record}: unknown status '{value}'")]
    UnknownStatus { record: usize, value: String },

    #[error("Unsupported source '{0}' (expected .csv or .json)")]
    UnsupportedSource(String),

    #[error("Invalid dataset: {0}")]
    Store(#[from] StoreError),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => DataError::Io(std::io::Error::new(io_err.kind(), error.to_string())),
            _ => DataError::Csv(error.to_string()),
        }
    }
}

/// Anything that can produce the initial record collection
pub trait RecordSource {
    /// Load every record and build the store
    fn load(&self) -> Result<RecordStore, DataError>;

    /// Get the source name/path
    fn source_name(&self) -> &str;
}

/// Flat record shape shared by the file formats
///
/// `I` is the id as the format delivers it: text for CSV, a number or string
/// for JSON.
#[derive(Debug, Deserialize)]
struct RawRecord<I> {
    id: I,
    name: String,
    latitude: f64,
    longitude: f64,
    status: String,
    #[serde(default)]
    last_updated: String,
}

impl<I> RawRecord<I> {
    fn into_record(self, number: usize, id: impl FnOnce(I) -> RecordId) -> Result<Record, DataError> {
        let status = self
            .status
            .parse::<Status>()
            .map_err(|_| DataError::UnknownStatus {
                record: number,
                value: self.status.clone(),
            })?;

        Ok(Record::new(
            id(self.id),
            self.name,
            LatLon::new(self.latitude, self.longitude),
            status,
            self.last_updated,
        ))
    }
}
