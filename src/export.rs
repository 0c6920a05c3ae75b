//! Export of a whole filtered collection to CSV.
//!
//! Runs its own one-shot fetch from an [`ExportQuery`] snapshot, so it never
//! touches the state of the list view it was started from.

use std::io::Write;

use crate::{
    api::{CollectionEndpoint, ListRequest},
    controller::ExportQuery,
    error::{ClientError, ClientResult},
    models::{Book, Entity, Order, Reader},
    normalize::ResponseShape,
    query::PageSize,
};

/// Fetch every record matching `query` in a single request of `limit` rows
pub async fn fetch_all<T: Entity>(
    endpoint: &dyn CollectionEndpoint,
    query: &ExportQuery,
    limit: u32,
) -> ClientResult<Vec<T>> {
    let request = ListRequest {
        kind: T::KIND,
        page: 1,
        limit,
        search: query.search.clone(),
        filters: query.filters.clone(),
    };

    tracing::info!("Exporting {} (limit {})", T::KIND, limit);
    let body = endpoint.fetch(&request).await?;
    let page = ResponseShape::from_value(body, T::KIND.items_field()).into_page::<T>(PageSize::Hundred);

    if page.total_items > page.items.len() as u64 {
        tracing::warn!(
            "Export of {} truncated: {} of {} records",
            T::KIND,
            page.items.len(),
            page.total_items
        );
    }
    Ok(page.items)
}

/// Record with a flat CSV representation
pub trait ExportRow {
    fn headers() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
}

/// Write `rows` with a header line
pub fn write_csv<R: ExportRow, W: Write>(rows: &[R], writer: W) -> ClientResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(R::headers())
        .map_err(|e| ClientError::Export(e.to_string()))?;
    for row in rows {
        csv.write_record(row.row())
            .map_err(|e| ClientError::Export(e.to_string()))?;
    }
    csv.flush().map_err(|e| ClientError::Export(e.to_string()))
}

fn opt<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

impl ExportRow for Book {
    fn headers() -> &'static [&'static str] {
        &["id", "title", "author", "isbn", "languages", "categories", "kabat number", "pages", "year", "available"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.title.clone(),
            opt(&self.author),
            opt(&self.isbn),
            self.language_ids.join(";"),
            self.category_ids.join(";"),
            opt(&self.kabat_number),
            opt(&self.pages),
            opt(&self.year),
            if self.is_available() { "yes" } else { "no" }.to_string(),
        ]
    }
}

impl ExportRow for Order {
    fn headers() -> &'static [&'static str] {
        &["id", "status", "customer", "email", "phone", "book", "quantity", "city", "state", "created at"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.status.to_string(),
            opt(&self.customer_name),
            opt(&self.email),
            opt(&self.phone),
            opt(&self.book_title),
            opt(&self.quantity),
            opt(&self.city),
            opt(&self.state),
            self.created_at.map(|d| d.to_rfc3339()).unwrap_or_default(),
        ]
    }
}

impl ExportRow for Reader {
    fn headers() -> &'static [&'static str] {
        &["id", "name", "email", "phone", "city", "active loans"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            opt(&self.email),
            opt(&self.phone),
            opt(&self.city),
            opt(&self.active_loans),
        ]
    }
}
