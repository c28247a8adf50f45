//! Search filtering over the record store

use crate::record::{Record, RecordStore};

/// Normalized search needle
///
/// Matching is a case-insensitive substring test against the record name or
/// the status label. An empty needle matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn needle(&self) -> &str {
        &self.needle
    }

    pub fn matches(&self, record: &Record) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        record.name.to_lowercase().contains(&self.needle)
            || record.status.label().to_lowercase().contains(&self.needle)
    }
}

/// Store positions of the matching records, in store order
pub fn filter_records(store: &RecordStore, query: &SearchQuery) -> Vec<usize> {
    if query.is_empty() {
        return (0..store.len()).collect();
    }

    store
        .iter()
        .enumerate()
        .filter(|(_, record)| query.matches(record))
        .map(|(position, _)| position)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{LatLon, Status};

    fn store() -> RecordStore {
        let names = [
            ("Alpha", Status::Active),
            ("Beta", Status::Pending),
            ("Gamma", Status::Active),
            ("Delta Pending Review", Status::Completed),
            ("ÉCOLE", Status::Completed),
        ];
        RecordStore::new(
            names
                .iter()
                .enumerate()
                .map(|(i, (name, status))| {
                    Record::new(i as i64 + 1, *name, LatLon::new(10.0, 20.0), *status, "")
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let store = store();
        assert_eq!(filter_records(&store, &SearchQuery::new("")), vec![0, 1, 2, 3, 4]);
        assert_eq!(filter_records(&store, &SearchQuery::default()).len(), 5);
    }

    #[test]
    fn test_matches_status_case_insensitive() {
        let store = store();
        assert_eq!(filter_records(&store, &SearchQuery::new("ACTIVE")), vec![0, 2]);
    }

    #[test]
    fn test_matches_name_or_status() {
        let store = store();
        // "pending" hits Beta by status and Delta by name
        assert_eq!(filter_records(&store, &SearchQuery::new("pending")), vec![1, 3]);
        assert_eq!(filter_records(&store, &SearchQuery::new("mm")), vec![2]);
    }

    #[test]
    fn test_unicode_lowercasing() {
        let store = store();
        assert_eq!(filter_records(&store, &SearchQuery::new("école")), vec![4]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let store = store();
        assert!(filter_records(&store, &SearchQuery::new("zeta")).is_empty());
        assert!(filter_records(&RecordStore::empty(), &SearchQuery::new("a")).is_empty());
    }

    #[test]
    fn test_result_is_exact_ordered_subsequence() {
        let store = store();
        for text in ["", "a", "e", "ta", "complete", "x", " "] {
            let query = SearchQuery::new(text);
            let result = filter_records(&store, &query);

            assert!(result.windows(2).all(|w| w[0] < w[1]));
            for (position, record) in store.iter().enumerate() {
                assert_eq!(result.contains(&position), query.matches(record));
            }
            // deterministic
            assert_eq!(result, filter_records(&store, &query));
        }
    }
}
