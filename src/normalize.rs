//! Result normalization for collection endpoint responses.
//!
//! Endpoints answer either with a bare JSON array or with an envelope
//! `{ <items field>: [...], pagination?: { total, totalPages } }`. Both are
//! turned into a [`PageResult`] here, once, for every entity.

use serde::Deserialize;
use serde_json::Value;

use crate::{models::Entity, pagination, query::PageSize};

/// Uniform page of records
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> PageResult<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            total_pages: 1,
        }
    }
}

/// Server-supplied pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerPagination {
    pub total: u64,
    pub total_pages: Option<u64>,
}

/// Shape of a decoded response body
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    Bare(Vec<Value>),
    Envelope {
        items: Vec<Value>,
        pagination: Option<ServerPagination>,
    },
}

impl ResponseShape {
    /// Classify a response. A missing or non-array items field yields an
    /// empty envelope; a malformed `pagination` is ignored.
    pub fn from_value(value: Value, items_field: &str) -> Self {
        match value {
            Value::Array(items) => ResponseShape::Bare(items),
            Value::Object(mut map) => {
                let items = match map.remove(items_field) {
                    Some(Value::Array(items)) => items,
                    Some(other) => {
                        tracing::warn!(
                            "Field '{}' is not an array ({}), treating as empty",
                            items_field,
                            json_type(&other)
                        );
                        Vec::new()
                    }
                    None => {
                        tracing::warn!("Response has no '{}' field, treating as empty", items_field);
                        Vec::new()
                    }
                };
                let pagination = map
                    .remove("pagination")
                    .and_then(|p| serde_json::from_value::<ServerPagination>(p).ok());
                ResponseShape::Envelope { items, pagination }
            }
            other => {
                tracing::warn!("Unexpected {} response, treating as empty", json_type(&other));
                ResponseShape::Envelope {
                    items: Vec::new(),
                    pagination: None,
                }
            }
        }
    }

    /// Decode records and settle totals.
    ///
    /// Server pagination is trusted as-is even when it disagrees with the
    /// number of records; otherwise totals count the decoded records.
    pub fn into_page<T: Entity>(self, page_size: PageSize) -> PageResult<T> {
        let (raw, server) = match self {
            ResponseShape::Bare(items) => (items, None),
            ResponseShape::Envelope { items, pagination } => (items, pagination),
        };

        let items = decode_records::<T>(raw);

        let (total_items, total_pages) = match server {
            Some(ServerPagination { total, total_pages }) => (
                total,
                total_pages.unwrap_or_else(|| pagination::total_pages(total, page_size)).max(1),
            ),
            None => {
                let total = items.len() as u64;
                (total, pagination::total_pages(total, page_size))
            }
        };

        PageResult {
            items,
            total_items,
            total_pages,
        }
    }
}

/// Normalize a response for entity `T`
pub fn normalize<T: Entity>(value: Value, page_size: PageSize) -> PageResult<T> {
    ResponseShape::from_value(value, T::KIND.items_field()).into_page(page_size)
}

fn decode_records<T: Entity>(raw: Vec<Value>) -> Vec<T> {
    let mut skipped = 0usize;
    let items: Vec<T> = raw
        .into_iter()
        .filter_map(|v| match serde_json::from_value::<T>(v) {
            Ok(record) => Some(record),
            Err(e) => {
                skipped += 1;
                tracing::debug!("Skipping {} record: {}", T::KIND, e);
                None
            }
        })
        .collect();

    if skipped > 0 {
        tracing::warn!("Skipped {} malformed {} record(s)", skipped, T::KIND);
    }
    items
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLog, Book, Order};
    use serde_json::json;

    fn records(n: usize) -> Value {
        Value::Array((1..=n).map(|i| json!({ "id": i })).collect())
    }

    #[test]
    fn test_bare_array_small_page() {
        let page: PageResult<Book> = normalize(json!([{"id": 1}, {"id": 2}, {"id": 3}]), PageSize::Ten);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total_items, 3);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_bare_array_totals() {
        for (n, size, expected) in [(25, PageSize::Ten, 3), (40, PageSize::Twenty, 2), (101, PageSize::Fifty, 3)] {
            let page: PageResult<Book> = normalize(records(n), size);
            assert_eq!(page.total_items, n as u64);
            assert_eq!(page.total_pages, expected);
        }
    }

    #[test]
    fn test_envelope_trusts_server_pagination() {
        let orders: Vec<Value> = (1..=8)
            .map(|i| json!({"id": format!("ord{}", i), "status": "pending"}))
            .collect();
        let body = json!({"orders": orders, "pagination": {"total": 83, "totalPages": 9}});
        let page: PageResult<Order> = normalize(body, PageSize::Ten);
        assert_eq!(page.items.len(), 8);
        assert_eq!(page.total_items, 83);
        assert_eq!(page.total_pages, 9);
    }

    #[test]
    fn test_envelope_inconsistent_pagination_is_kept() {
        let body = json!({"books": [{"id": 1}], "pagination": {"total": 500, "totalPages": 2}});
        let page: PageResult<Book> = normalize(body, PageSize::Ten);
        assert_eq!(page.total_items, 500);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_envelope_without_pagination() {
        let body = json!({"logs": [{"id": "a", "action": "create"}, {"id": "b", "action": "delete"}]});
        let page: PageResult<ActivityLog> = normalize(body, PageSize::Ten);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_items, 2);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_envelope_total_without_total_pages() {
        let body = json!({"books": [], "pagination": {"total": 45}});
        let page: PageResult<Book> = normalize(body, PageSize::Twenty);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_malformed_envelope() {
        let page: PageResult<Book> = normalize(json!({}), PageSize::Ten);
        assert_eq!(page, PageResult::empty());

        let page: PageResult<Book> = normalize(json!({"books": "oops"}), PageSize::Ten);
        assert_eq!(page, PageResult::empty());

        let page: PageResult<Book> = normalize(Value::Null, PageSize::Ten);
        assert_eq!(page, PageResult::empty());
    }

    #[test]
    fn test_wrong_items_field_is_empty() {
        let page: PageResult<Book> = normalize(json!({"orders": [{"id": 1}]}), PageSize::Ten);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_undecodable_records_are_skipped() {
        let page: PageResult<Book> = normalize(json!([{"id": 1}, {"title": "no id"}, {"id": 3}]), PageSize::Ten);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_items, 2);
    }

    #[test]
    fn test_malformed_pagination_is_ignored() {
        let body = json!({"books": [{"id": 1}, {"id": 2}], "pagination": {"total": "many"}});
        let page: PageResult<Book> = normalize(body, PageSize::Ten);
        assert_eq!(page.total_items, 2);
    }

    #[test]
    fn test_zero_total_pages_floored() {
        let body = json!({"books": [], "pagination": {"total": 0, "totalPages": 0}});
        let page: PageResult<Book> = normalize(body, PageSize::Ten);
        assert_eq!(page.total_pages, 1);
    }
}
