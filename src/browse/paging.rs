//! Fixed-size paging for the horizontal category strip.

/// Partition `items` into consecutive pages of at most `page_size` entries,
/// preserving order. The last page may be short; zero items (or a zero page
/// size) yields zero pages.
pub fn paginate<T: Clone>(items: &[T], page_size: usize) -> Vec<Vec<T>> {
    if page_size == 0 {
        return Vec::new();
    }
    items.chunks(page_size).map(<[T]>::to_vec).collect()
}
