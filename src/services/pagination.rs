use serde::Serialize;

/// Results shown per page on the results screen
pub const PAGE_SIZE: usize = 5;

/// Number of page buttons shown at once
pub const PAGE_WINDOW: usize = 5;

/// One page sliced out of an already-capped result list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slices `items` into 1-based pages of `page_size`.
///
/// Page 0 is read as page 1; pages past the end are empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let start = (page - 1).saturating_mul(page_size);

    let slice = items
        .iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    Page {
        items: slice,
        page,
        total_pages: items.len().div_ceil(page_size),
        total_items: items.len(),
    }
}

/// Page numbers to offer around `current`, at most `width` of them
pub fn page_window(current: usize, total_pages: usize, width: usize) -> Vec<usize> {
    if total_pages <= width {
        return (1..=total_pages).collect();
    }

    let half = width / 2;
    let first = if current <= half + 1 {
        1
    } else if current + half >= total_pages {
        total_pages + 1 - width
    } else {
        current - half
    };

    (first..first + width).collect()
}
