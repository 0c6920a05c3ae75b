//! Query state controller for one list view.
//!
//! Owns the paginated query, the staged filter panel, the search debouncer
//! and the rendered page. Fetches run as spawned tasks; each carries the
//! sequence number it was issued with and only the latest one is applied.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;

use crate::{
    api::{CollectionEndpoint, ListRequest},
    config::ListConfig,
    debounce::Debouncer,
    error::ClientResult,
    models::Entity,
    normalize::{normalize, PageResult},
    pagination::slice_page,
    query::{FilterPanel, FilterValue, Filters, PageQuery, PageSize},
};

/// Sequence number of an issued fetch
pub type RequestId = u64;

/// Transient user-facing notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub request: RequestId,
    pub message: String,
}

/// What the controller did in one turn of [`ListController::next_event`]
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    /// Debounced search text settled; `fetch` is set when it changed the query
    SearchSettled { search: String, fetch: Option<RequestId> },
    /// Latest fetch succeeded and the view was replaced
    Loaded { request: RequestId },
    /// A superseded fetch completed and was ignored
    Discarded { request: RequestId },
    /// Latest fetch failed; the previous view is kept
    Failed { request: RequestId, notice: Notice },
}

/// Search and applied filters, detached from the view for exports
#[derive(Debug, Clone, PartialEq)]
pub struct ExportQuery {
    pub search: String,
    pub filters: Filters,
}

struct FetchOutcome {
    request: RequestId,
    page: u32,
    page_size: PageSize,
    result: ClientResult<Value>,
}

pub struct ListController<T: Entity> {
    endpoint: Arc<dyn CollectionEndpoint>,
    query: PageQuery,
    panel: FilterPanel,
    search: Debouncer<String>,
    view: PageResult<T>,
    latest: RequestId,
    loading: bool,
    notices: Vec<Notice>,
    outcomes_tx: mpsc::UnboundedSender<FetchOutcome>,
    outcomes_rx: mpsc::UnboundedReceiver<FetchOutcome>,
}

impl<T: Entity> ListController<T> {
    pub fn new(endpoint: Arc<dyn CollectionEndpoint>, config: &ListConfig) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        Self {
            endpoint,
            query: PageQuery::new(config.default_page_size),
            panel: FilterPanel::default(),
            search: Debouncer::new(config.debounce()),
            view: PageResult::empty(),
            latest: 0,
            loading: false,
            notices: Vec::new(),
            outcomes_tx,
            outcomes_rx,
        }
    }

    // -----------------------------------------------------------------------
    // View state
    // -----------------------------------------------------------------------

    pub fn items(&self) -> &[T] {
        &self.view.items
    }

    pub fn total_items(&self) -> u64 {
        self.view.total_items
    }

    pub fn total_pages(&self) -> u64 {
        self.view.total_pages
    }

    pub fn query(&self) -> &PageQuery {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.query.page
    }

    pub fn page_size(&self) -> PageSize {
        self.query.page_size
    }

    pub fn raw_search(&self) -> &str {
        &self.query.raw_search
    }

    pub fn search(&self) -> &str {
        &self.query.search
    }

    /// Filters used by fetches
    pub fn filters(&self) -> &Filters {
        &self.query.filters
    }

    /// Filters shown in the panel, possibly not applied yet
    pub fn staged_filters(&self) -> &Filters {
        self.panel.staged()
    }

    /// Whether the panel holds edits that `apply_filters` would commit
    pub fn has_staged_changes(&self) -> bool {
        self.panel.is_dirty(&self.query.filters)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Drain pending notifications
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn export_query(&self) -> ExportQuery {
        ExportQuery {
            search: self.query.search.clone(),
            filters: self.query.filters.clone(),
        }
    }

    // -----------------------------------------------------------------------
    // User input
    // -----------------------------------------------------------------------

    /// Fetch the current query (mount and manual reload)
    pub fn refresh(&mut self) -> RequestId {
        self.issue_fetch()
    }

    /// Update the input box now; the query follows once typing pauses
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.query.raw_search = text.clone();
        self.search.push(text);
    }

    /// Stage a filter edit; nothing is fetched until [`Self::apply_filters`]
    pub fn set_filter(&mut self, name: impl Into<String>, value: FilterValue) {
        self.panel.stage(name, value);
    }

    pub fn clear_filter(&mut self, name: &str) {
        self.panel.unstage(name);
    }

    /// Commit staged filters and fetch the first page
    pub fn apply_filters(&mut self) -> RequestId {
        self.panel.apply(&mut self.query.filters);
        self.query.page = 1;
        self.issue_fetch()
    }

    /// Discard staged filter edits
    pub fn cancel_filters(&mut self) {
        self.panel.rollback(&self.query.filters);
    }

    /// Go to page `n`, clamped to `1..=total_pages`
    pub fn set_page(&mut self, n: u32) -> Option<RequestId> {
        let last = u32::try_from(self.view.total_pages).unwrap_or(u32::MAX).max(1);
        let page = n.clamp(1, last);
        if page == self.query.page {
            return None;
        }
        self.query.page = page;
        Some(self.issue_fetch())
    }

    pub fn set_page_size(&mut self, size: PageSize) -> Option<RequestId> {
        if size == self.query.page_size && self.query.page == 1 {
            return None;
        }
        self.query.page_size = size;
        self.query.page = 1;
        Some(self.issue_fetch())
    }

    /// Clear search and filters, back to page one; always fetches once
    pub fn reset_all(&mut self) -> RequestId {
        self.search.cancel();
        self.query.raw_search.clear();
        self.query.search.clear();
        self.panel.clear();
        self.query.filters.clear();
        self.query.page = 1;
        self.issue_fetch()
    }

    // -----------------------------------------------------------------------
    // Event loop
    // -----------------------------------------------------------------------

    /// Wait for the search to settle or a fetch to complete, and apply it.
    ///
    /// Never resolves while no search is pending and no fetch is in flight,
    /// e.g. right after [`Self::set_page`] returned `None`. Cancel-safe, so
    /// callers may race it against their own timeouts.
    pub async fn next_event(&mut self) -> ControllerEvent {
        tokio::select! {
            text = self.search.settled() => self.on_search_settled(text),
            Some(outcome) = self.outcomes_rx.recv() => self.on_outcome(outcome),
        }
    }

    fn on_search_settled(&mut self, text: String) -> ControllerEvent {
        if text == self.query.search {
            return ControllerEvent::SearchSettled { search: text, fetch: None };
        }
        self.query.search = text.clone();
        self.query.page = 1;
        let request = self.issue_fetch();
        ControllerEvent::SearchSettled {
            search: text,
            fetch: Some(request),
        }
    }

    fn on_outcome(&mut self, outcome: FetchOutcome) -> ControllerEvent {
        if outcome.request != self.latest {
            tracing::debug!(
                "Discarding response to request #{} (latest is #{})",
                outcome.request,
                self.latest
            );
            return ControllerEvent::Discarded { request: outcome.request };
        }
        self.loading = false;

        match outcome.result {
            Ok(body) => {
                let PageResult {
                    items,
                    total_items,
                    total_pages,
                } = normalize::<T>(body, outcome.page_size);
                self.view = PageResult {
                    items: slice_page(items, outcome.page, outcome.page_size),
                    total_items,
                    total_pages,
                };
                tracing::debug!(
                    "Loaded {} {} (page {}/{}, {} total)",
                    self.view.items.len(),
                    T::KIND,
                    outcome.page,
                    total_pages,
                    total_items
                );
                ControllerEvent::Loaded { request: outcome.request }
            }
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", T::KIND, e);
                let notice = Notice {
                    request: outcome.request,
                    message: e.user_message(),
                };
                self.notices.push(notice.clone());
                ControllerEvent::Failed {
                    request: outcome.request,
                    notice,
                }
            }
        }
    }

    fn issue_fetch(&mut self) -> RequestId {
        self.latest += 1;
        self.loading = true;

        let id = self.latest;
        let request = ListRequest::for_query(T::KIND, &self.query);
        let endpoint = Arc::clone(&self.endpoint);
        let tx = self.outcomes_tx.clone();
        let (page, page_size) = (self.query.page, self.query.page_size);

        tracing::debug!("Issuing request #{} for {}", id, T::KIND);

        tokio::spawn(async move {
            let result = endpoint.fetch(&request).await;
            // The controller may be gone by now
            let _ = tx.send(FetchOutcome {
                request: id,
                page,
                page_size,
                result,
            });
        });

        id
    }
}
