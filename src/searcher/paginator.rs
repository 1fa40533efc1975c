//! Page slicing and pagination metadata.
//!
//! An empty result has zero pages; its only page (number 0) is first, last and
//! empty at the same time. Page numbers past the end yield empty pages that
//! still report the real totals.

pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_number: usize,
    pub page_size: usize, // Always > 0, enforced by `new`
}

impl PageRequest {
    /// Returns `None` for a zero page size.
    pub fn new(page_number: usize, page_size: usize) -> Option<Self> {
        (page_size > 0).then_some(Self { page_number, page_size })
    }

    pub fn offset(&self) -> usize {
        self.page_number.saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page_number: 0, page_size: DEFAULT_PAGE_SIZE }
    }
}

/// One slice of an ordered result plus the totals of the whole result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: usize,
    pub page_size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn is_first(&self) -> bool {
        self.page_number == 0
    }

    pub fn is_last(&self) -> bool {
        self.page_number.saturating_add(1) >= self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn offset(&self) -> usize {
        self.page_number.saturating_mul(self.page_size)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

pub fn paginate<T: Clone>(ordered: &[T], request: PageRequest) -> Page<T> {
    let total_elements = ordered.len();
    let total_pages = total_elements.div_ceil(request.page_size);

    let start = request.offset().min(total_elements);
    let end = start.saturating_add(request.page_size).min(total_elements);

    Page {
        content: ordered[start..end].to_vec(),
        page_number: request.page_number,
        page_size: request.page_size,
        total_elements,
        total_pages,
    }
}
