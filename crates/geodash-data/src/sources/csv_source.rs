use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use csv::ReaderBuilder;
use geodash_core::record::{Record, RecordId, RecordStore};
use tracing::info;

use crate::{DataError, RawRecord, RecordSource};

/// CSV file with an `id,name,latitude,longitude,status,last_updated` header
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Parse records from any reader
    pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>, DataError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for (idx, result) in csv_reader.deserialize::<RawRecord<String>>().enumerate() {
            let raw = result?;
            records.push(raw.into_record(idx + 1, |id| RecordId::parse(&id))?);
        }
        Ok(records)
    }
}

impl RecordSource for CsvSource {
    fn load(&self) -> Result<RecordStore, DataError> {
        let file = File::open(&self.path)?;
        let records = Self::read_records(BufReader::new(file))?;
        info!(path = %self.path.display(), rows = records.len(), "Loaded CSV records");
        Ok(RecordStore::new(records)?)
    }

    fn source_name(&self) -> &str {
        self.path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.csv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geodash_core::record::Status;
    use std::io::Write;

    const SAMPLE: &str = "\
id,name,latitude,longitude,status,last_updated
1,Harbour Survey,13.09,80.29,Active,3/14/2024
2, Depot Audit ,13.11,80.31,pending,3/15/2024
site-9,Ridge Station,13.20,80.40,COMPLETED,
";

    #[test]
    fn test_read_records() {
        let records = CsvSource::read_records(SAMPLE.as_bytes()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, RecordId::Int(1));
        assert_eq!(records[1].name, "Depot Audit");
        assert_eq!(records[1].status, Status::Pending);
        assert_eq!(records[2].id, RecordId::Text("site-9".to_string()));
        assert_eq!(records[2].last_updated, "");
    }

    #[test]
    fn test_unknown_status_reports_record_number() {
        let data = "id,name,latitude,longitude,status,last_updated\n1,A,1.0,2.0,Active,\n2,B,1.0,2.0,Archived,\n";
        match CsvSource::read_records(data.as_bytes()) {
            Err(DataError::UnknownStatus { record, value }) => {
                assert_eq!(record, 2);
                assert_eq!(value, "Archived");
            }
            other => panic!("expected unknown status, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_number_is_csv_error() {
        let data = "id,name,latitude,longitude,status,last_updated\n1,A,north,2.0,Active,\n";
        assert!(matches!(
            CsvSource::read_records(data.as_bytes()),
            Err(DataError::Csv(_))
        ));
    }

    #[test]
    fn test_load_file_validates_store() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "{}", SAMPLE).unwrap();
        let store = CsvSource::new(file.path().to_path_buf()).load().unwrap();
        assert_eq!(store.len(), 3);

        let mut dup = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(dup, "id,name,latitude,longitude,status,last_updated\n1,A,1,2,Active,\n1,B,1,2,Active,\n").unwrap();
        assert!(matches!(
            CsvSource::new(dup.path().to_path_buf()).load(),
            Err(DataError::Store(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = CsvSource::new(PathBuf::from("/definitely/not/here.csv"));
        assert!(matches!(source.load(), Err(DataError::Io(_))));
    }
}
