//! Paginated table view over filtered records.

use crate::record::Record;
use crate::utils::config::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};

/// Requested page (1-based) and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(current: usize, page_size: usize) -> Self {
        Self { current, page_size }
    }

    pub fn first_page(self) -> Self {
        Self { current: 1, ..self }
    }
}

/// One page of rows plus totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePage {
    pub rows: Vec<Record>,
    pub total: usize,
    pub current: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl TablePage {
    /// Footer text shown under the table
    pub fn summary(&self) -> String {
        format!("Total {} items", self.total)
    }

    /// 1-based index of the first row on this page, 0 when empty
    pub fn first_row(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            (self.current - 1) * self.page_size + 1
        }
    }
}

/// Slice `records` into the requested page.
///
/// Pages past the end clamp to the last page and page 0 reads as page 1.
/// A zero page size is treated as the default.
pub fn paginate(records: &[Record], pagination: Pagination) -> TablePage {
    let page_size = if pagination.page_size == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        pagination.page_size
    };

    let total = records.len();
    let total_pages = total.div_ceil(page_size);
    let current = pagination.current.clamp(1, total_pages.max(1));

    let start = (current - 1) * page_size;
    let end = (start + page_size).min(total);
    let rows = records.get(start..end).unwrap_or_default().to_vec();

    TablePage {
        rows,
        total,
        current,
        page_size,
        total_pages,
    }
}
