//! Paginated query state shared by every list view

pub mod filters;

use serde::{Deserialize, Serialize};

pub use filters::{BookFilters, FilterPanel, FilterValue, Filters, OrderFilters};

/// Allowed page sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageSize {
    #[default]
    Ten,
    Twenty,
    Fifty,
    Hundred,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [PageSize::Ten, PageSize::Twenty, PageSize::Fifty, PageSize::Hundred];

    pub fn get(self) -> u32 {
        match self {
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
            PageSize::Fifty => 50,
            PageSize::Hundred => 100,
        }
    }
}

impl TryFrom<u32> for PageSize {
    type Error = String;

    fn try_from(v: u32) -> Result<Self, Self::Error> {
        match v {
            10 => Ok(PageSize::Ten),
            20 => Ok(PageSize::Twenty),
            50 => Ok(PageSize::Fifty),
            100 => Ok(PageSize::Hundred),
            other => Err(format!("unsupported page size {} (expected 10, 20, 50 or 100)", other)),
        }
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// What subset of a collection a list view currently requests.
///
/// `search` is the debounced text; `raw_search` mirrors the input box.
#[derive(Debug, Clone, PartialEq)]
pub struct PageQuery {
    pub page: u32,
    pub page_size: PageSize,
    pub raw_search: String,
    pub search: String,
    pub filters: Filters,
}

impl PageQuery {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page: 1,
            page_size,
            raw_search: String::new(),
            search: String::new(),
            filters: Filters::new(),
        }
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_values() {
        assert_eq!(PageSize::try_from(20), Ok(PageSize::Twenty));
        assert!(PageSize::try_from(0).is_err());
        assert!(PageSize::try_from(25).is_err());
        assert_eq!(PageSize::ALL.map(PageSize::get), [10, 20, 50, 100]);
    }

    #[test]
    fn test_fresh_query() {
        let query = PageQuery::default();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, PageSize::Ten);
        assert!(query.search.is_empty());
        assert!(query.filters.is_empty());
    }
}
