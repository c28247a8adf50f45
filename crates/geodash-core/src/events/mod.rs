//! Input events accepted from the presentation layer

use serde::{Deserialize, Serialize};

use crate::record::RecordId;

/// Which view a record activation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationOrigin {
    TableRow,
    MapMarker,
}

/// User input routed into the view coordinator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Search box edited; `None` is treated as an empty box
    SearchTextChanged(Option<String>),

    /// Pagination control moved to a zero-based page
    PageChanged(usize),

    /// Rows-per-page selector changed
    PageSizeChanged(usize),

    /// Table row or map marker clicked
    RecordActivated {
        id: RecordId,
        origin: ActivationOrigin,
    },

    SelectionCleared,
}

impl InputEvent {
    pub fn search(text: impl Into<String>) -> Self {
        InputEvent::SearchTextChanged(Some(text.into()))
    }

    pub fn row_clicked(id: impl Into<RecordId>) -> Self {
        InputEvent::RecordActivated {
            id: id.into(),
            origin: ActivationOrigin::TableRow,
        }
    }

    pub fn marker_clicked(id: impl Into<RecordId>) -> Self {
        InputEvent::RecordActivated {
            id: id.into(),
            origin: ActivationOrigin::MapMarker,
        }
    }
}

/// Outcome of applying an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// State changed and subscribers were notified
    Changed,
    /// Event was valid but left the state as it was
    Unchanged,
}
