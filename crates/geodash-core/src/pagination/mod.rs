//! Page windows over the filtered record set

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Number of pages needed for `total` rows, `ceil(total / page_size)`
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// The window `[page_index * page_size, + page_size)` clamped to `total`
///
/// A window starting at or past the end is empty, which is a valid state.
pub fn paginate(total: usize, page_index: usize, page_size: usize) -> Range<usize> {
    let start = page_index.saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);
    start..end
}

/// Page index that keeps the first visible row on screen after a size change
pub fn rebase_page_index(page_index: usize, old_size: usize, new_size: usize) -> usize {
    if new_size == 0 {
        return 0;
    }
    page_index.saturating_mul(old_size) / new_size
}

/// Allowed page sizes offered by the pagination control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageSizeOptions {
    sizes: Vec<usize>,
}

impl PageSizeOptions {
    pub fn new(sizes: Vec<usize>) -> Self {
        Self { sizes }
    }

    pub fn contains(&self, size: usize) -> bool {
        self.sizes.contains(&size)
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }
}

impl Default for PageSizeOptions {
    fn default() -> Self {
        Self::new(vec![10, 25, 100])
    }
}

/// Everything the pagination control shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page_index: usize,
    pub page_size: usize,
    pub total_filtered: usize,
    pub page_count: usize,
    /// Positions into the filtered sequence shown on this page
    pub range: Range<usize>,
}

impl PageInfo {
    pub fn new(total_filtered: usize, page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size,
            total_filtered,
            page_count: page_count(total_filtered, page_size),
            range: paginate(total_filtered, page_index, page_size),
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.page_count
    }

    /// "11–20 of 4999" style label, 1-based
    pub fn label(&self) -> String {
        if self.range.is_empty() {
            return format!("0–0 of {}", self.total_filtered);
        }
        format!(
            "{}–{} of {}",
            self.range.start + 1,
            self.range.end,
            self.total_filtered
        )
    }
}
