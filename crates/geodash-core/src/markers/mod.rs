//! Map marker projection for the visible page

use serde::Serialize;

use crate::record::{LatLon, Record, RecordId, Status};

/// Marker descriptor handed to the map renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: RecordId,
    pub position: LatLon,
    pub label: String,
    pub status: Status,
    pub highlighted: bool,
}

impl Marker {
    pub fn from_record(record: &Record, selected: Option<&RecordId>) -> Self {
        Self {
            id: record.id.clone(),
            position: record.position,
            label: record.name.clone(),
            status: record.status,
            highlighted: selected == Some(&record.id),
        }
    }

    /// Popup body shown when the marker is opened
    pub fn popup(&self) -> String {
        format!("{}\nStatus: {}", self.label, self.status)
    }
}

/// One marker per page row, in page order
///
/// Only rows on the current page get markers, so marker count is bounded by
/// the page size regardless of dataset size.
pub fn project_markers<'a>(
    page_rows: impl IntoIterator<Item = &'a Record>,
    selected: Option<&RecordId>,
) -> Vec<Marker> {
    page_rows
        .into_iter()
        .map(|record| Marker::from_record(record, selected))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_highlights_selected() {
        let rows = vec![
            Record::new(1, "Alpha", LatLon::new(1.0, 2.0), Status::Active, ""),
            Record::new(3, "Gamma", LatLon::new(3.0, 4.0), Status::Active, ""),
        ];
        let selected = RecordId::Int(3);
        let markers = project_markers(&rows, Some(&selected));

        assert_eq!(markers.len(), 2);
        assert!(!markers[0].highlighted);
        assert!(markers[1].highlighted);
        assert_eq!(markers[1].position, LatLon::new(3.0, 4.0));
        assert_eq!(markers[1].popup(), "Gamma\nStatus: Active");
    }

    #[test]
    fn test_no_selection_no_highlight() {
        let rows = vec![Record::new(1, "Alpha", LatLon::new(1.0, 2.0), Status::Pending, "")];
        assert!(project_markers(&rows, None).iter().all(|m| !m.highlighted));
        assert!(project_markers(std::iter::empty(), None).is_empty());
    }
}
