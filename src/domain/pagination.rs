use serde::Serialize;

/// Fixed page size for the owner and vet listings.
pub const PAGE_SIZE: u64 = 5;

/// Zero-based page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl PageRequest {
    /// Converts an external 1-based page number. Anything below 1 reads as the first page;
    /// the page is capped so that its row offset always fits in a `u64`.
    pub fn from_one_based(page: i64, size: u64) -> Self {
        let page = u64::try_from(page.max(1) - 1).unwrap_or(0);
        Self {
            page: page.min(u64::MAX / size.max(1)),
            size,
        }
    }

    /// Whether this page starts before the end of `total_elements` rows.
    pub fn within(&self, total_elements: u64) -> bool {
        self.page
            .checked_mul(self.size)
            .is_some_and(|offset| offset < total_elements)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub request: PageRequest,
    pub total_elements: u64,
}

impl<T> Page<T> {
    /// True when this page holds no rows, including pages past the last one.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn total_pages(&self) -> u64 {
        if self.request.size == 0 {
            return 1;
        }
        self.total_elements.div_ceil(self.request.size)
    }

    /// The external (1-based) number of this page.
    pub fn current_page(&self) -> u64 {
        self.request.page + 1
    }

    pub fn pagination(&self) -> Pagination {
        let total_pages = self.total_pages();
        let current_page = self.current_page();
        Pagination {
            current_page,
            total_pages,
            total_items: self.total_elements,
            pages: (1..=total_pages).collect(),
            has_previous: current_page > 1,
            has_next: current_page < total_pages,
            previous_page: current_page.saturating_sub(1).max(1),
            next_page: (current_page + 1).min(total_pages.max(1)),
        }
    }
}

/// Template-facing navigation model for a page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub pages: Vec<u64>,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page: u64,
    pub next_page: u64,
}
