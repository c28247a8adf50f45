//! View coordinator: owns the query state and derives what both views render

use std::ops::Range;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, DashboardConfig};
use crate::events::{ActivationOrigin, Applied, InputEvent};
use crate::filter::{filter_records, SearchQuery};
use crate::markers::{project_markers, Marker};
use crate::memo::Memo;
use crate::pagination::{paginate, rebase_page_index, PageInfo};
use crate::record::{Record, RecordId, RecordStore};
use crate::selection::{CameraTarget, SelectionTracker};
use crate::ViewError;

/// Current search, page and selection parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryState {
    pub search_text: String,
    pub page_index: usize,
    pub page_size: usize,
    pub selected_id: Option<RecordId>,
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot<'a> {
    pub query: QueryState,
    pub page: PageInfo,
    /// Table rows, in filtered order
    pub rows: Vec<&'a Record>,
    pub markers: Vec<Marker>,
    pub camera_target: Option<CameraTarget>,
    /// Camera target, or the configured initial view when nothing is selected
    pub map_view: CameraTarget,
}

/// Trait for views that re-render when the derived view changes
pub trait ViewSubscriber: Send + Sync {
    fn on_view_change(&self, snapshot: &ViewSnapshot<'_>);
}

/// The single owner of query state
///
/// All mutation goes through the transition methods; every accepted transition
/// recomputes the derived view before returning.
pub struct ViewCoordinator {
    store: Arc<RecordStore>,
    config: DashboardConfig,

    search_text: String,
    search: SearchQuery,
    page_index: usize,
    page_size: usize,
    selection: SelectionTracker,

    filtered: Memo<String, Vec<usize>>,
    page: Memo<(u64, usize, usize), Range<usize>>,
    camera: Memo<Option<RecordId>, Option<CameraTarget>>,

    subscribers: RwLock<Vec<Weak<dyn ViewSubscriber>>>,
}

impl ViewCoordinator {
    /// Create a coordinator over `store`, starting on the first page
    pub fn new(store: Arc<RecordStore>, config: DashboardConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(store, config))
    }

    /// Coordinator with the default configuration
    pub fn with_defaults(store: Arc<RecordStore>) -> Self {
        Self::build(store, DashboardConfig::default())
    }

    fn build(store: Arc<RecordStore>, config: DashboardConfig) -> Self {
        info!(
            records = store.len(),
            page_size = config.default_page_size,
            "View coordinator ready"
        );

        let mut coordinator = Self {
            page_size: config.default_page_size,
            selection: SelectionTracker::new(config.map.selection_zoom),
            store,
            config,
            search_text: String::new(),
            search: SearchQuery::default(),
            page_index: 0,
            filtered: Memo::new(),
            page: Memo::new(),
            camera: Memo::new(),
            subscribers: RwLock::new(Vec::new()),
        };
        coordinator.refresh();
        coordinator
    }

    /// Apply one input event from either view
    pub fn handle(&mut self, event: InputEvent) -> Result<Applied, ViewError> {
        match event {
            InputEvent::SearchTextChanged(text) => {
                Ok(self.set_search_text(text.as_deref().unwrap_or_default()))
            }
            InputEvent::PageChanged(index) => self.set_page_index(index),
            InputEvent::PageSizeChanged(size) => self.set_page_size(size),
            InputEvent::RecordActivated { id, origin } => Ok(self.on_record_activated(id, origin)),
            InputEvent::SelectionCleared => Ok(self.clear_selection()),
        }
    }

    /// Replace the search text and go back to the first page
    ///
    /// The selection is kept even if it no longer matches.
    pub fn set_search_text(&mut self, text: &str) -> Applied {
        let changed = self.search_text != text || self.page_index != 0;
        if self.search_text != text {
            self.search_text = text.to_string();
            self.search = SearchQuery::new(text);
        }
        self.page_index = 0;
        debug!(search = %self.search_text, "Search text set");
        self.finish(changed)
    }

    /// Move to a page; out-of-range requests are rejected, not clamped
    pub fn set_page_index(&mut self, page_index: usize) -> Result<Applied, ViewError> {
        let page_count = self.page_info().page_count;
        if page_index >= page_count {
            warn!(page_index, page_count, "Rejected page change");
            return Err(ViewError::PageOutOfRange {
                requested: page_index,
                page_count,
            });
        }

        let changed = self.page_index != page_index;
        self.page_index = page_index;
        debug!(page_index, "Page set");
        Ok(self.finish(changed))
    }

    /// Change rows per page, keeping the first visible row on screen
    pub fn set_page_size(&mut self, page_size: usize) -> Result<Applied, ViewError> {
        if !self.config.page_size_options.contains(page_size) {
            warn!(page_size, "Rejected page size");
            return Err(ViewError::PageSizeNotAllowed {
                requested: page_size,
                allowed: self.config.page_size_options.sizes().to_vec(),
            });
        }
        if page_size == self.page_size {
            return Ok(Applied::Unchanged);
        }

        self.page_index = rebase_page_index(self.page_index, self.page_size, page_size);
        self.page_size = page_size;
        debug!(page_size, page_index = self.page_index, "Page size set");
        Ok(self.finish(true))
    }

    /// Row click and marker click both land here
    pub fn on_record_activated(&mut self, id: RecordId, origin: ActivationOrigin) -> Applied {
        debug!(%id, ?origin, "Record activated");
        self.activate(id)
    }

    /// Select a record; the id does not need to be visible or even exist
    pub fn activate(&mut self, id: RecordId) -> Applied {
        let changed = self.selection.select(Some(id));
        self.finish(changed)
    }

    pub fn clear_selection(&mut self) -> Applied {
        let changed = self.selection.select(None);
        self.finish(changed)
    }

    fn finish(&mut self, changed: bool) -> Applied {
        if !changed {
            return Applied::Unchanged;
        }
        self.refresh();
        self.notify_subscribers();
        Applied::Changed
    }

    /// Recompute each derived stage whose inputs changed
    fn refresh(&mut self) {
        let store = &self.store;
        let search = &self.search;
        self.filtered
            .get_or_compute(search.needle().to_string(), |_| filter_records(store, search));

        let total = self.filtered.get().map_or(0, Vec::len);
        let key = (self.filtered.computations(), self.page_index, self.page_size);
        self.page
            .get_or_compute(key, |&(_, index, size)| paginate(total, index, size));

        let selection = &self.selection;
        self.camera
            .get_or_compute(selection.selected().cloned(), |_| selection.camera_target(store));
    }

    // -- outputs --

    pub fn query_state(&self) -> QueryState {
        QueryState {
            search_text: self.search_text.clone(),
            page_index: self.page_index,
            page_size: self.page_size,
            selected_id: self.selection.selected().cloned(),
        }
    }

    /// Records matching the search, in store order
    pub fn filtered_records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.filtered_positions()
            .iter()
            .filter_map(|&position| self.store.get(position))
    }

    fn filtered_positions(&self) -> &[usize] {
        self.filtered.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total_filtered(&self) -> usize {
        self.filtered_positions().len()
    }

    pub fn page_info(&self) -> PageInfo {
        PageInfo::new(self.total_filtered(), self.page_index, self.page_size)
    }

    /// Table rows for the current page
    pub fn page_records(&self) -> Vec<&Record> {
        let range = self.page.get().cloned().unwrap_or(0..0);
        self.filtered_positions()
            .get(range)
            .unwrap_or(&[])
            .iter()
            .filter_map(|&position| self.store.get(position))
            .collect()
    }

    pub fn markers(&self) -> Vec<Marker> {
        project_markers(self.page_records(), self.selection.selected())
    }

    pub fn selected_id(&self) -> Option<&RecordId> {
        self.selection.selected()
    }

    /// The selected record, resolved against the whole store
    pub fn selected_record(&self) -> Option<&Record> {
        self.selection.resolve(&self.store)
    }

    pub fn camera_target(&self) -> Option<CameraTarget> {
        self.camera.get().copied().flatten()
    }

    pub fn map_view(&self) -> CameraTarget {
        self.camera_target().unwrap_or(CameraTarget {
            center: self.config.map.initial_center,
            zoom: self.config.map.initial_zoom,
        })
    }

    pub fn snapshot(&self) -> ViewSnapshot<'_> {
        let rows = self.page_records();
        let markers = project_markers(rows.iter().copied(), self.selection.selected());
        ViewSnapshot {
            query: self.query_state(),
            page: self.page_info(),
            rows,
            markers,
            camera_target: self.camera_target(),
            map_view: self.map_view(),
        }
    }

    /// How many times the filter has run, for recomputation checks
    pub fn filter_runs(&self) -> u64 {
        self.filtered.computations()
    }

    // -- subscribers --

    pub fn add_subscriber(&self, subscriber: Arc<dyn ViewSubscriber>) {
        self.subscribers.write().push(Arc::downgrade(&subscriber));
    }

    fn notify_subscribers(&self) {
        let snapshot = self.snapshot();
        let mut subscribers = self.subscribers.write();

        // Remove any dead weak references
        subscribers.retain(|weak| weak.strong_count() > 0);

        for weak in subscribers.iter() {
            if let Some(subscriber) = weak.upgrade() {
                subscriber.on_view_change(&snapshot);
            }
        }
    }
}
