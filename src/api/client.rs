//! HTTP client for the collection and mutation endpoints

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;

use super::{CollectionEndpoint, ListRequest};
use crate::{
    config::ApiConfig,
    error::{ClientError, ClientResult},
    models::EntityKind,
};

#[derive(Clone)]
pub struct HttpCollectionClient {
    http: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpCollectionClient {
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let timeout = config.timeout();
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Transport)?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.base_url.clone()));
        }

        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    /// Base URL plus `segments`, each percent-encoded as a single segment
    fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn collection_url(&self, kind: EntityKind) -> ClientResult<Url> {
        self.url(&["api", kind.path()])
    }

    /// `?`, `#` and `/` in `id` stay inside the record segment
    fn record_url(&self, kind: EntityKind, id: &str) -> ClientResult<Url> {
        self.url(&["api", kind.path(), id])
    }

    /// Create a record, returning the stored record
    pub async fn create(&self, kind: EntityKind, body: &Value) -> ClientResult<Value> {
        tracing::info!("Creating {} record", kind);
        self.send(self.http.post(self.collection_url(kind)?).json(body)).await
    }

    /// Replace a record's fields
    pub async fn update(&self, kind: EntityKind, id: &str, body: &Value) -> ClientResult<Value> {
        tracing::info!("Updating {} record {}", kind, id);
        self.send(self.http.put(self.record_url(kind, id)?).json(body)).await
    }

    pub async fn delete(&self, kind: EntityKind, id: &str) -> ClientResult<()> {
        tracing::info!("Deleting {} record {}", kind, id);
        self.send(self.http.delete(self.record_url(kind, id)?)).await?;
        Ok(())
    }

    /// Send a request and decode its JSON body; an empty body is `null`
    async fn send(&self, request: RequestBuilder) -> ClientResult<Value> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(e, self.timeout))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::from_reqwest(e, self.timeout))?;

        if !status.is_success() {
            let err = ClientError::from_status(status, &body);
            tracing::warn!("Endpoint answered {}: {}", status, err);
            return Err(err);
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CollectionEndpoint for HttpCollectionClient {
    async fn fetch(&self, request: &ListRequest) -> ClientResult<Value> {
        tracing::debug!(
            "GET /api/{} page={} limit={} search={:?}",
            request.kind.path(),
            request.page,
            request.limit,
            request.search
        );

        let builder = self
            .http
            .get(self.collection_url(request.kind)?)
            .query(&request.query_pairs());

        self.send(builder).await
    }
}
