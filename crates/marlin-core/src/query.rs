//! Pagination and query-parameter assembly.
//!
//! Query pairs are collected into an ordered list rather than a map: the URL
//! builder guarantees a stable key order (pagination first, then caller
//! parameters in the order supplied), which keeps generated URLs reproducible
//! in tests.

use std::fmt::Display;

/// A page of results.
///
/// The index is 0-based; the API numbers pages from 1, so the rendered
/// `page` parameter is `index + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    index: u32,
    count: u32,
}

impl Page {
    /// Create a page from a 0-based index and a per-page count.
    #[must_use]
    pub const fn new(index: u32, count: u32) -> Self {
        Self { index, count }
    }

    /// The first page with the given per-page count.
    #[must_use]
    pub const fn first(count: u32) -> Self {
        Self::new(0, count)
    }

    /// 0-based page index.
    #[must_use]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Number of items per page.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Render the pagination query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", (self.index + 1).to_string()),
            ("per_page", self.count.to_string()),
        ]
    }
}

/// Builder for assembling ordered query parameter pairs.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a required key/value pair.
    pub fn push<T>(&mut self, key: &'static str, value: T)
    where
        T: Display,
    {
        self.pairs.push((key, value.to_string()));
    }

    /// Append a key/value pair when the value is present.
    pub fn push_opt<T>(&mut self, key: &'static str, value: Option<T>)
    where
        T: ToString,
    {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
    }

    /// Return the collected key/value pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        self.pairs
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_is_one_based_on_the_wire() {
        let page = Page::new(0, 50);
        assert_eq!(
            page.to_pairs(),
            vec![("page", "1".to_string()), ("per_page", "50".to_string())]
        );

        let page = Page::new(3, 25);
        assert_eq!(
            page.to_pairs(),
            vec![("page", "4".to_string()), ("per_page", "25".to_string())]
        );
    }

    #[test]
    fn test_page_first() {
        assert_eq!(Page::first(20), Page::new(0, 20));
    }

    #[test]
    fn push_opt_skips_none() {
        let mut params = QueryParams::new();
        params.push_opt("name", Option::<String>::None);
        assert!(params.is_empty());
    }

    #[test]
    fn pairs_preserve_insertion_order() {
        let mut params = QueryParams::new();
        params.push("id", 2);
        params.push("image", 200);
        params.push_opt("region", Some("nyc3"));
        assert_eq!(
            params.into_pairs(),
            vec![
                ("id", "2".to_string()),
                ("image", "200".to_string()),
                ("region", "nyc3".to_string()),
            ]
        );
    }
}
