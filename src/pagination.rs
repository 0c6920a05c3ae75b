//! Client-side pagination helpers

use crate::query::PageSize;

/// Number of pages needed for `total_items`, never less than one
pub fn total_pages(total_items: u64, page_size: PageSize) -> u64 {
    total_items.div_ceil(u64::from(page_size.get())).max(1)
}

/// Visible page of `items`.
///
/// A backend that accepts `limit` without enforcing it returns the whole
/// collection; slice it locally. A list no longer than one page is taken to
/// be paginated already and returned unchanged.
pub fn slice_page<T>(mut items: Vec<T>, page: u32, page_size: PageSize) -> Vec<T> {
    let size = page_size.get() as usize;
    if items.len() <= size {
        return items;
    }

    let start = (page.max(1) as usize - 1).saturating_mul(size);
    if start >= items.len() {
        return Vec::new();
    }
    let end = (start + size).min(items.len());
    items.truncate(end);
    items.drain(..start);
    items
}
