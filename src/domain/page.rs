//! Pagination math for windowed list endpoints.
//!
//! Stateless: every function is pure over `(total, limit, offset)`. The
//! boundary comparison in [`next_page`] is `limit + offset <= total`, which
//! reports a next page even when the current page ends exactly at `total`
//! (that next page is empty). Clients depend on this, so it stays.

use url::form_urlencoded;

use super::error::DomainError;

/// Page size applied when the client sends no usable `limit`.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// A window over an ordered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }

    /// Render this page into an existing query string.
    ///
    /// `limit` and `offset` are replaced; every other parameter is carried
    /// over untouched.
    pub fn with_query(&self, query: &str) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if key != "limit" && key != "offset" {
                serializer.append_pair(&key, &value);
            }
        }

        serializer
            .append_pair("limit", &self.limit.to_string())
            .append_pair("offset", &self.offset.to_string())
            .finish()
    }
}

/// The page after `(limit, offset)`, or [`DomainError::NoNextPage`].
///
/// The sum saturates: both values come straight from the query string, and
/// a sum past `i64::MAX` can never be `<= total` anyway.
pub fn next_page(total: i64, limit: i64, offset: i64) -> Result<Page, DomainError> {
    if limit.saturating_add(offset) <= total {
        return Ok(Page::new(limit, offset.saturating_add(limit)));
    }
    Err(DomainError::NoNextPage)
}

/// The page before `(limit, offset)`, or [`DomainError::NoPrevPage`].
///
/// There is no previous page on the first page or over an empty collection.
pub fn prev_page(total: i64, limit: i64, offset: i64) -> Result<Page, DomainError> {
    if total > 0 && offset > 0 {
        return Ok(Page::new(limit, (offset - limit).max(0)));
    }
    Err(DomainError::NoPrevPage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_page_exists() {
        let page = next_page(100, 20, 0).unwrap();
        assert_eq!(page, Page::new(20, 20));
    }

    #[test]
    fn test_next_page_at_exact_boundary() {
        // offset + limit == total still reports a next page, even though
        // that page is empty.
        let page = next_page(40, 20, 20).unwrap();
        assert_eq!(page, Page::new(20, 40));
    }

    #[test]
    fn test_next_page_past_end() {
        let err = next_page(40, 20, 21).unwrap_err();
        assert!(matches!(err, DomainError::NoNextPage));
    }

    #[test]
    fn test_next_page_huge_window_does_not_overflow() {
        // limit and offset arrive unchecked from the query string
        let err = next_page(100, i64::MAX, 1).unwrap_err();
        assert!(matches!(err, DomainError::NoNextPage));

        let err = next_page(100, 1, i64::MAX).unwrap_err();
        assert!(matches!(err, DomainError::NoNextPage));
    }

    #[test]
    fn test_next_page_succeeds_iff_within_total() {
        for total in [0i64, 1, 19, 20, 21, 40, 100] {
            for limit in [1i64, 7, 20] {
                for offset in [0i64, 1, 20, 99] {
                    let result = next_page(total, limit, offset);
                    assert_eq!(result.is_ok(), limit + offset <= total);
                    if let Ok(page) = result {
                        assert_eq!(page.limit, limit);
                        assert_eq!(page.offset, offset + limit);
                    }
                }
            }
        }
    }

    #[test]
    fn test_prev_page_exists() {
        let page = prev_page(100, 20, 40).unwrap();
        assert_eq!(page, Page::new(20, 20));
    }

    #[test]
    fn test_prev_page_clamps_offset_to_zero() {
        let page = prev_page(100, 20, 10).unwrap();
        assert_eq!(page, Page::new(20, 0));
    }

    #[test]
    fn test_prev_page_on_first_page() {
        let err = prev_page(100, 20, 0).unwrap_err();
        assert!(matches!(err, DomainError::NoPrevPage));
    }

    #[test]
    fn test_prev_page_on_empty_collection() {
        let err = prev_page(0, 20, 20).unwrap_err();
        assert!(matches!(err, DomainError::NoPrevPage));
    }

    #[test]
    fn test_prev_page_offset_is_max_zero_diff() {
        for offset in [1i64, 5, 19, 20, 21, 40] {
            let page = prev_page(100, 20, offset).unwrap();
            assert_eq!(page.offset, (offset - 20).max(0));
            assert_eq!(page.limit, 20);
        }
    }

    #[test]
    fn test_with_query_preserves_other_params() {
        let page = Page::new(20, 40);
        let query = page.with_query("order=email+asc&limit=20&offset=20");

        assert_eq!(query, "order=email+asc&limit=20&offset=40");
    }

    #[test]
    fn test_with_query_on_empty_query() {
        let page = Page::new(20, 0);
        assert_eq!(page.with_query(""), "limit=20&offset=0");
    }

    #[test]
    fn test_round_trip_through_next_link() {
        // Encoding a page and feeding the rendered next query back through
        // the calculator advances the offset consistently.
        let next = next_page(100, 20, 0).unwrap();
        let query = next.with_query("order=id+desc");

        let mut limit = 0i64;
        let mut offset = 0i64;
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "limit" => limit = value.parse().unwrap(),
                "offset" => offset = value.parse().unwrap(),
                _ => {}
            }
        }

        let further = next_page(100, limit, offset).unwrap();
        assert_eq!(further, Page::new(20, 40));
    }
}
