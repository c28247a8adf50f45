//! Core functionality for the geo dashboard
//!
//! This crate owns the view-state synchronization engine: it turns an
//! immutable record collection plus user input (search text, page, page size,
//! selection) into the table rows, map markers and camera target that the
//! presentation layer renders.

pub mod config;
pub mod coordinator;
pub mod events;
pub mod filter;
pub mod markers;
pub mod memo;
pub mod pagination;
pub mod record;
pub mod selection;

use thiserror::Error;

// Re-export commonly used types
pub use config::{ConfigError, DashboardConfig, MapConfig};
pub use coordinator::{QueryState, ViewCoordinator, ViewSnapshot, ViewSubscriber};
pub use events::{ActivationOrigin, InputEvent};
pub use markers::Marker;
pub use pagination::{PageInfo, PageSizeOptions};
pub use record::{LatLon, Record, RecordId, RecordStore, Status, StoreError};
pub use selection::{CameraTarget, SelectionTracker};

/// Rejected input events
///
/// A rejected event leaves the query state untouched; the caller can surface
/// it as a disabled control.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("page {requested} out of range (page count: {page_count})")]
    PageOutOfRange { requested: usize, page_count: usize },

    #[error("page size {requested} not allowed (allowed: {allowed:?})")]
    PageSizeNotAllowed { requested: usize, allowed: Vec<usize> },
}
