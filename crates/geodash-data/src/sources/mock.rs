//! Generated demo dataset

use chrono::NaiveDate;
use geodash_core::record::{LatLon, Record, RecordStore, Status};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::{DataError, RecordSource};

/// Default number of demo records
pub const DEFAULT_RECORD_COUNT: usize = 5000;

/// South-west corner of the generated area; points spread 0.5° north and east
const ORIGIN: LatLon = LatLon {
    latitude: 13.0827,
    longitude: 80.2707,
};
const SPREAD_DEGREES: f64 = 0.5;

/// Synthetic project sites scattered around a fixed origin
pub struct MockSource {
    count: usize,
    seed: u64,
    last_updated: NaiveDate,
}

impl MockSource {
    /// `count` records stamped with today's date
    pub fn new(count: usize) -> Self {
        Self {
            count,
            seed: 42,
            last_updated: chrono::Local::now().date_naive(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.last_updated = date;
        self
    }

    pub fn generate(&self) -> Vec<Record> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let stamp = self.last_updated.format("%-m/%-d/%Y").to_string();

        (0..self.count)
            .zip(0_i64..)
            .map(|(i, id)| {
                let position = LatLon::new(
                    ORIGIN.latitude + rng.gen::<f64>() * SPREAD_DEGREES,
                    ORIGIN.longitude + rng.gen::<f64>() * SPREAD_DEGREES,
                );
                Record::new(
                    id,
                    format!("Project {}", i + 1),
                    position,
                    Status::ALL[i % 3],
                    stamp.clone(),
                )
            })
            .collect()
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new(DEFAULT_RECORD_COUNT)
    }
}

impl RecordSource for MockSource {
    fn load(&self) -> Result<RecordStore, DataError> {
        let records = self.generate();
        info!(rows = records.len(), seed = self.seed, "Generated mock records");
        Ok(RecordStore::new(records)?)
    }

    fn source_name(&self) -> &str {
        "mock"
    }
}
