use std::collections::HashMap;
use std::sync::Arc;

use tastemap_shared::models::{GooglePlaceInfo, LatLng};
use tastemap_shared::places::{
    classify_status, details_query, text_search_query, PlaceDetailsResponse, StatusClass,
    TextSearchResponse, DETAILS_PATH, TEXT_SEARCH_PATH,
};

use super::{get_json, UpstreamError};
use crate::config::DEFAULT_GOOGLE_PLACES_BASE_URL;

/// Client for the Google Places web service.
#[derive(Clone)]
pub struct PlacesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    fixtures: Arc<HashMap<String, GooglePlaceInfo>>,
}

fn check_status(status: &str, message: Option<String>) -> Result<(), UpstreamError> {
    match classify_status(status) {
        StatusClass::Ok => Ok(()),
        StatusClass::NotFound => Err(UpstreamError::NotFound),
        StatusClass::Error => Err(UpstreamError::Api {
            service: "Places",
            message: message.unwrap_or_else(|| status.to_string()),
        }),
    }
}

impl PlacesClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_GOOGLE_PLACES_BASE_URL)
    }

    pub fn with_base_url(api_key: Option<String>, base_url: &str) -> Self {
        PlacesClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            fixtures: Arc::default(),
        }
    }

    /// Answer details lookups for these ids locally, with or without a key.
    pub fn with_fixtures(mut self, fixtures: HashMap<String, GooglePlaceInfo>) -> Self {
        self.fixtures = Arc::new(fixtures);
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str, UpstreamError> {
        self.api_key
            .as_deref()
            .ok_or(UpstreamError::NotConfigured("GOOGLE_MAPS_API_KEY"))
    }

    pub async fn details(&self, place_id: &str) -> Result<GooglePlaceInfo, UpstreamError> {
        if let Some(fixture) = self.fixtures.get(place_id) {
            tracing::debug!(place_id, "Using place fixture");
            return Ok(fixture.clone());
        }
        let query = details_query(place_id, self.api_key()?);
        let url = format!("{}{}", self.base_url, DETAILS_PATH);
        let response: PlaceDetailsResponse =
            get_json(&self.http, &url, &query, &format!("placeDetails({place_id})")).await?;
        check_status(&response.status, response.error_message)?;
        response
            .result
            .map(GooglePlaceInfo::from)
            .ok_or(UpstreamError::NotFound)
    }

    /// Text search by name, then details for the first hit.
    pub async fn search_by_name(
        &self,
        name: &str,
        near: Option<LatLng>,
    ) -> Result<GooglePlaceInfo, UpstreamError> {
        let query = text_search_query(name, near, self.api_key()?);
        let url = format!("{}{}", self.base_url, TEXT_SEARCH_PATH);
        let response: TextSearchResponse =
            get_json(&self.http, &url, &query, &format!("textSearch({name})")).await?;
        check_status(&response.status, response.error_message)?;
        let first = response
            .results
            .into_iter()
            .find(|hit| !hit.place_id.is_empty())
            .ok_or(UpstreamError::NotFound)?;
        self.details(&first.place_id).await
    }
}
