//! Fixed-size page slicing over a folder's file list.

use std::num::NonZeroUsize;

/// One page of `T` plus the total page count of the underlying list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page_number: usize,
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    pub fn has_prev(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }
}

/// `ceil(len / page_size)`; zero for an empty list.
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get())
}

/// Clamp a requested page into `[1, max(total_pages, 1)]`.
pub fn clamp_page(page_number: usize, total_pages: usize) -> usize {
    page_number.clamp(1, total_pages.max(1))
}

/// Slice `[(n - 1) * size, n * size)` of `items`, clipped to bounds.
///
/// Page numbers outside `1..=total_pages` (including `0`) give an empty slice.
pub fn paginate<T>(items: &[T], page_number: usize, page_size: NonZeroUsize) -> Page<'_, T> {
    let total_pages = total_pages(items.len(), page_size);
    let size = page_size.get();
    let slice = page_number
        .checked_sub(1)
        .and_then(|index| index.checked_mul(size))
        .filter(|&start| start < items.len())
        .map(|start| &items[start..items.len().min(start.saturating_add(size))])
        .unwrap_or(&[]);

    Page { items: slice, page_number, total_pages }
}
