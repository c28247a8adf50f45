use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use geodash_core::record::{Record, RecordId, RecordStore};
use tracing::info;

use crate::{DataError, RawRecord, RecordSource};

/// JSON array of flat record objects
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn parse_records(json: &str) -> Result<Vec<Record>, DataError> {
        let raw: Vec<RawRecord<RecordId>> = serde_json::from_str(json)?;
        Self::convert(raw)
    }

    fn convert(raw: Vec<RawRecord<RecordId>>) -> Result<Vec<Record>, DataError> {
        raw.into_iter()
            .enumerate()
            .map(|(idx, raw)| raw.into_record(idx + 1, |id| id))
            .collect()
    }
}

impl RecordSource for JsonSource {
    fn load(&self) -> Result<RecordStore, DataError> {
        let file = File::open(&self.path)?;
        let raw: Vec<RawRecord<RecordId>> = serde_json::from_reader(BufReader::new(file))?;
        let records = Self::convert(raw)?;
        info!(path = %self.path.display(), rows = records.len(), "Loaded JSON records");
        Ok(RecordStore::new(records)?)
    }

    fn source_name(&self) -> &str {
        self.path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geodash_core::record::Status;
    use std::io::Write;

    #[test]
    fn test_parse_mixed_ids() {
        let records = JsonSource::parse_records(
            r#"[
                {"id": 7, "name": "Pier", "latitude": 13.1, "longitude": 80.3, "status": "Active", "last_updated": "1/2/2024"},
                {"id": "b-2", "name": "Yard", "latitude": 13.2, "longitude": 80.4, "status": "completed"}
            ]"#,
        )
        .unwrap();

        assert_eq!(records[0].id, RecordId::Int(7));
        assert_eq!(records[1].id, RecordId::Text("b-2".to_string()));
        assert_eq!(records[1].status, Status::Completed);
        assert_eq!(records[1].last_updated, "");
    }

    #[test]
    fn test_unknown_status_reports_record_number() {
        let err = JsonSource::parse_records(
            r#"[
                {"id": 1, "name": "A", "latitude": 0, "longitude": 0, "status": "Active"},
                {"id": 2, "name": "B", "latitude": 0, "longitude": 0, "status": "Lost"}
            ]"#,
        )
        .unwrap_err();
        assert!(matches!(err, DataError::UnknownStatus { record: 2, .. }));
        assert_eq!(err.to_string(), "Record 2: unknown status 'Lost'");
    }

    #[test]
    fn test_load_rejects_bad_coordinates() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "name": "A", "latitude": 120.0, "longitude": 0, "status": "Active"}}]"#
        )
        .unwrap();

        let err = JsonSource::new(file.path().to_path_buf()).load().unwrap_err();
        assert!(matches!(err, DataError::Store(_)));
    }
}
