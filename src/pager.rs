/// GridView Pager
///
/// Page arithmetic over a sequence: slicing out one page and counting pages.

use crate::error::{Result, ViewError};

/// Returns the page `[page_index * page_size, page_index * page_size + page_size)`
/// clamped to the bounds of `items`.
///
/// A page past the end is empty. A zero page size, or an offset that does not
/// fit in `usize`, is an `InvalidPageRequest`.
///
/// # Examples
///
/// ```
/// use gridview::pager::paginate;
///
/// let items: Vec<u32> = (0..12).collect();
/// assert_eq!(paginate(&items, 2, 5).unwrap(), &[10, 11]);
/// assert!(paginate(&items, 3, 5).unwrap().is_empty());
/// assert!(paginate(&items, 0, 0).is_err());
/// ```
pub fn paginate<T>(items: &[T], page_index: usize, page_size: usize) -> Result<&[T]> {
    let invalid = ViewError::InvalidPageRequest {
        page_index,
        page_size,
    };
    if page_size == 0 {
        return Err(invalid);
    }

    let start = page_index.checked_mul(page_size).ok_or(invalid)?;
    let start = start.min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    Ok(&items[start..end])
}

/// Number of pages needed for `total` items: `ceil(total / page_size)`.
///
/// Zero items give zero pages.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Largest valid page index for `total` items, or 0 when there are none.
pub fn last_page_index(total: usize, page_size: usize) -> usize {
    page_count(total, page_size).saturating_sub(1)
}

/// Clamp a page index into `[0, last_page_index]`.
pub fn clamp_page_index(page_index: usize, total: usize, page_size: usize) -> usize {
    page_index.min(last_page_index(total, page_size))
}

/// Expected length of page `page_index`:
/// `min(page_size, max(0, total - page_index * page_size))`.
pub fn page_len(total: usize, page_index: usize, page_size: usize) -> usize {
    let start = page_index.saturating_mul(page_size);
    total.saturating_sub(start).min(page_size)
}
