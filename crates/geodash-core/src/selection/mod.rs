//! Selection shared by the table and the map

use serde::Serialize;

use crate::record::{LatLon, Record, RecordId, RecordStore};

/// Where the map camera should move
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraTarget {
    pub center: LatLon,
    pub zoom: u8,
}

/// Tracks the selected record id
///
/// The id is resolved against the whole store, never the visible page, so a
/// selection survives filtering and paging.
#[derive(Debug, Clone)]
pub struct SelectionTracker {
    selected: Option<RecordId>,
    zoom: u8,
}

impl SelectionTracker {
    /// Create a tracker whose camera targets use `zoom`
    pub fn new(zoom: u8) -> Self {
        Self {
            selected: None,
            zoom,
        }
    }

    /// Replace the selection, returning whether it changed
    pub fn select(&mut self, id: Option<RecordId>) -> bool {
        if self.selected == id {
            return false;
        }
        self.selected = id;
        true
    }

    pub fn selected(&self) -> Option<&RecordId> {
        self.selected.as_ref()
    }

    /// The selected record, or `None` for no selection or an unknown id
    pub fn resolve<'a>(&self, store: &'a RecordStore) -> Option<&'a Record> {
        self.selected.as_ref().and_then(|id| store.find(id))
    }

    pub fn camera_target(&self, store: &RecordStore) -> Option<CameraTarget> {
        resolve_camera(store, self.selected.as_ref(), self.zoom)
    }
}

/// Camera target for an optional selected id
pub fn resolve_camera(
    store: &RecordStore,
    selected: Option<&RecordId>,
    zoom: u8,
) -> Option<CameraTarget> {
    let record = store.find(selected?)?;
    Some(CameraTarget {
        center: record.position,
        zoom,
    })
}
