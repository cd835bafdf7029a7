use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use tracing::debug;

use crate::config::{ResolvedConfig, SearchQuery};
use crate::domain::Dataset;
use crate::error::WatchError;

/// Body of a dataset search. The catalog answers with an array on success and
/// with an error envelope (any other JSON) otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Datasets(Vec<Dataset>),
    Unexpected(Value),
}

/// Result of a single dataset lookup that reached the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailOutcome {
    Found(Dataset),
    Status(u16),
}

pub trait CatalogClient: Send + Sync {
    fn search(&self, query: &SearchQuery) -> Result<SearchOutcome, WatchError>;
    fn dataset(&self, id: &str) -> Result<DetailOutcome, WatchError>;
}

#[derive(Clone)]
pub struct HfCatalogClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HfCatalogClient {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, WatchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("hf-watch/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| WatchError::CatalogHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|err| WatchError::CatalogHttp(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &ResolvedConfig) -> Result<Self, WatchError> {
        Self::new(
            config.catalog_base_url.clone(),
            config.token.clone(),
            config.timeout,
        )
    }

    pub fn search_url(&self) -> String {
        format!("{}/datasets", self.base_url)
    }

    pub fn dataset_url(&self, id: &str) -> String {
        format!("{}/datasets/{}", self.base_url, id)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

impl CatalogClient for HfCatalogClient {
    fn search(&self, query: &SearchQuery) -> Result<SearchOutcome, WatchError> {
        let url = self.search_url();
        debug!(url = %url, term = %query.term, author = %query.author, "searching catalog");
        let limit = query.limit.to_string();
        let request = self.client.get(&url).query(&[
            ("search", query.term.as_str()),
            ("author", query.author.as_str()),
            ("limit", limit.as_str()),
            ("full", "true"),
        ]);
        // Error envelopes are rendered as "no datasets", so the status is not checked here.
        let response = self
            .authorized(request)
            .send()
            .map_err(|err| WatchError::CatalogHttp(err.to_string()))?;
        let body = response
            .bytes()
            .map_err(|err| WatchError::CatalogHttp(err.to_string()))?;
        parse_search_body(&body)
    }

    fn dataset(&self, id: &str) -> Result<DetailOutcome, WatchError> {
        let url = self.dataset_url(id);
        debug!(url = %url, "fetching dataset detail");
        let response = self
            .authorized(self.client.get(&url))
            .send()
            .map_err(|err| WatchError::CatalogHttp(err.to_string()))?;
        if !response.status().is_success() {
            return Ok(DetailOutcome::Status(response.status().as_u16()));
        }
        let body = response
            .bytes()
            .map_err(|err| WatchError::CatalogHttp(err.to_string()))?;
        parse_detail_body(&body).map(DetailOutcome::Found)
    }
}

pub fn parse_search_body(body: &[u8]) -> Result<SearchOutcome, WatchError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|err| WatchError::CatalogDecode(err.to_string()))?;
    if !value.is_array() {
        return Ok(SearchOutcome::Unexpected(value));
    }
    let datasets: Vec<Dataset> =
        serde_json::from_value(value).map_err(|err| WatchError::CatalogDecode(err.to_string()))?;
    Ok(SearchOutcome::Datasets(datasets))
}

pub fn parse_detail_body(body: &[u8]) -> Result<Dataset, WatchError> {
    serde_json::from_slice(body).map_err(|err| WatchError::CatalogDecode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_url_keeps_namespaced_ids() {
        let client =
            HfCatalogClient::new("https://example.test/api/", None, Duration::from_secs(5))
                .unwrap();
        assert_eq!(
            client.dataset_url("org/name"),
            "https://example.test/api/datasets/org/name"
        );
        assert_eq!(client.search_url(), "https://example.test/api/datasets");
    }

    #[test]
    fn error_envelope_is_unexpected() {
        let outcome = parse_search_body(br#"{"error":"Invalid credentials"}"#).unwrap();
        assert!(matches!(outcome, SearchOutcome::Unexpected(_)));
    }

    #[test]
    fn non_json_body_is_decode_error() {
        let err = parse_search_body(b"<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, WatchError::CatalogDecode(_)));
    }
}
