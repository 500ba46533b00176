//! Search and pagination over already-fetched lists.

pub const DEFAULT_PER_PAGE: usize = 10;

/// Case-insensitive substring match of `query` against any haystack.
/// A blank query matches everything.
pub fn matches_query<'a>(haystacks: impl IntoIterator<Item = &'a str>, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    haystacks
        .into_iter()
        .any(|hay| hay.to_lowercase().contains(&needle))
}

/// One page of a list plus the numbers a pager needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slice `items` into 1-based pages. `page` is clamped into range and a
/// zero `per_page` falls back to [`DEFAULT_PER_PAGE`]. An empty list still
/// has one (empty) page.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = if per_page == 0 { DEFAULT_PER_PAGE } else { per_page };
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);
    let items = items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();
    Page { items, page, per_page, total_pages, total_items }
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
