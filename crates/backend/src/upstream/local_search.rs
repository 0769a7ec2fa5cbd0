use tastemap_shared::local_search::{lookup_query, LocalSearchResponse, SearchParams, LOCAL_SEARCH_PATH};
use tastemap_shared::models::YahooStoreInfo;

use super::{get_json, UpstreamError};
use crate::config::DEFAULT_YAHOO_API_BASE_URL;

/// Client for the Yahoo! Local Search API.
///
/// Use [`LocalSearchClient::new`] for production or
/// [`LocalSearchClient::with_base_url`] to point at a mock server in tests.
#[derive(Clone)]
pub struct LocalSearchClient {
    http: reqwest::Client,
    base_url: String,
    client_id: Option<String>,
}

impl LocalSearchClient {
    pub fn new(client_id: Option<String>) -> Self {
        Self::with_base_url(client_id, DEFAULT_YAHOO_API_BASE_URL)
    }

    pub fn with_base_url(client_id: Option<String>, base_url: &str) -> Self {
        LocalSearchClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client_id.is_some()
    }

    fn client_id(&self) -> Result<&str, UpstreamError> {
        self.client_id
            .as_deref()
            .ok_or(UpstreamError::NotConfigured("YAHOO_CLIENT_ID"))
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, LOCAL_SEARCH_PATH)
    }

    /// Look up one store by its local-search id.
    pub async fn lookup(&self, store_id: &str) -> Result<YahooStoreInfo, UpstreamError> {
        let query = lookup_query(self.client_id()?, store_id);
        let response: LocalSearchResponse = get_json(
            &self.http,
            &self.endpoint(),
            &query,
            &format!("localSearch(gid={store_id})"),
        )
        .await?;
        response.first_store().ok_or(UpstreamError::NotFound)
    }

    /// Free-text search. An empty hit list is not an error.
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<YahooStoreInfo>, UpstreamError> {
        let query = params.to_query(self.client_id()?);
        let response: LocalSearchResponse = get_json(
            &self.http,
            &self.endpoint(),
            &query,
            &format!("localSearch(query={})", params.query),
        )
        .await?;
        Ok(response.stores())
    }
}
