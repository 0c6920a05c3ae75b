//! Collection endpoint contract consumed by list views

pub mod client;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::ClientResult,
    models::EntityKind,
    query::{Filters, PageQuery},
};

pub use client::HttpCollectionClient;

/// One page request against `/api/<entity>`
#[derive(Debug, Clone, PartialEq)]
pub struct ListRequest {
    pub kind: EntityKind,
    pub page: u32,
    pub limit: u32,
    pub search: String,
    pub filters: Filters,
}

impl ListRequest {
    /// Request for what `query` currently shows; uses the debounced search
    pub fn for_query(kind: EntityKind, query: &PageQuery) -> Self {
        Self {
            kind,
            page: query.page,
            limit: query.page_size.get(),
            search: query.search.clone(),
            filters: query.filters.clone(),
        }
    }

    /// Query string pairs, `search` omitted when blank
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("search".to_string(), search.to_string()));
        }
        pairs.extend(self.filters.to_query_pairs());
        pairs
    }
}

/// Source of list pages; answers with the raw JSON body
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionEndpoint: Send + Sync {
    async fn fetch(&self, request: &ListRequest) -> ClientResult<Value>;
}
