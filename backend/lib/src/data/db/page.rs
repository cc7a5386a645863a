//! Generic pagination over any [`Entity`].

use serde::Serialize;

use super::{error::RepositoryResult, pool::DbConnection, Entity, SortOrder};
use crate::constants::api::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

// NOTE: we use i64 because the db uses i64
/// Resolved page request
///
/// * `page`: 1-based index of the requested page
/// * `size`: maximum amount of items in a page, within `1..=MAX_PAGE_SIZE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    page: i64,
    size: i64,
}

impl PageParams {
    /// Build page parameters, defaulting and clamping out-of-range values
    pub fn new(page: Option<i64>, size: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            size: size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    /// Number of rows to skip
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.size)
    }

    /// `(limit, offset)` window for the query
    pub fn window(&self) -> (i64, i64) {
        (self.size, self.offset())
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// A bounded slice of a result set plus its metadata
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub size: i64,
    pub pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, params: PageParams) -> Self {
        let size = params.size();

        Self {
            items,
            total,
            page: params.page(),
            size,
            pages: (total + size - 1) / size,
        }
    }

    /// Convert every item, keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
            pages: self.pages,
        }
    }
}

/// Count the rows of `E`, then load the window described by `params`.
///
/// Both queries run on the same connection.
pub async fn paginate<E: Entity>(
    conn: &mut DbConnection<'_>,
    order: SortOrder,
    params: PageParams,
) -> RepositoryResult<Page<E>> {
    let total = E::count_all(conn).await?;
    let items = E::load_ordered(conn, order, Some(params.window())).await?;

    Ok(Page::new(items, total, params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_default_and_clamp() {
        let params = PageParams::default();
        assert_eq!(params.page(), DEFAULT_PAGE);
        assert_eq!(params.size(), DEFAULT_PAGE_SIZE);
        assert_eq!(params.offset(), 0);

        let params = PageParams::new(Some(0), Some(MAX_PAGE_SIZE + 1));
        assert_eq!(params.page(), 1);
        assert_eq!(params.size(), MAX_PAGE_SIZE);

        let params = PageParams::new(Some(3), Some(0));
        assert_eq!(params.size(), 1);
        assert_eq!(params.window(), (1, 2));
    }

    #[test]
    fn page_count_rounds_up() {
        let params = PageParams::new(Some(1), Some(10));

        assert_eq!(Page::<u8>::new(vec![], 0, params).pages, 0);
        assert_eq!(Page::<u8>::new(vec![], 10, params).pages, 1);
        assert_eq!(Page::<u8>::new(vec![], 11, params).pages, 2);
    }

    #[test]
    fn map_keeps_metadata() {
        let page = Page::new(vec![1, 2, 3], 7, PageParams::new(Some(2), Some(3)));
        let mapped = page.map(|n| n * 10);

        assert_eq!(mapped.items, vec![10, 20, 30]);
        assert_eq!((mapped.total, mapped.page, mapped.size, mapped.pages), (7, 2, 3, 3));
    }
}
