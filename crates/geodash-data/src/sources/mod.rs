//! Record source implementations

pub mod csv_source;
pub mod json_source;
pub mod mock;

use std::path::Path;

pub use csv_source::CsvSource;
pub use json_source::JsonSource;
pub use mock::MockSource;

use crate::{DataError, RecordSource};

/// Pick a file source from the path extension
pub fn from_path(path: &Path) -> Result<Box<dyn RecordSource>, DataError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("csv") => Ok(Box::new(CsvSource::new(path.to_path_buf()))),
        Some("json") => Ok(Box::new(JsonSource::new(path.to_path_buf()))),
        _ => Err(DataError::UnsupportedSource(path.display().to_string())),
    }
}
