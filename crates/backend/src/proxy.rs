//! JSON endpoints that forward to the upstream store-information services.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tastemap_shared::local_search::SearchParams;
use tastemap_shared::models::LatLng;

use crate::upstream::{LocalSearchClient, PlacesClient, UpstreamError};

#[derive(Clone)]
pub struct ProxyState {
    pub places: PlacesClient,
    pub local: LocalSearchClient,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

fn location(lat: Option<f64>, lng: Option<f64>) -> Option<LatLng> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => Some(LatLng { lat, lng }),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
pub struct PlaceSearchQuery {
    name: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct StoreSearchQuery {
    query: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
}

async fn yahoo_store(State(state): State<ProxyState>, Path(store_id): Path<String>) -> Response {
    match state.local.lookup(&store_id).await {
        Ok(info) => Json(info).into_response(),
        Err(UpstreamError::NotFound) => error_response(StatusCode::NOT_FOUND, "Store not found"),
        Err(UpstreamError::NotConfigured(_)) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Yahoo Client ID is not configured",
        ),
        Err(err) => {
            tracing::error!(store_id = %store_id, error = %err, "Local search lookup failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch store information",
            )
        }
    }
}

async fn yahoo_search(
    State(state): State<ProxyState>,
    Query(params): Query<StoreSearchQuery>,
) -> Response {
    let Some(query) = params.query.filter(|q| !q.trim().is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "Query parameter is required");
    };
    let search = SearchParams::new(query, location(params.lat, params.lng));
    match state.local.search(&search).await {
        Ok(hits) => Json(hits).into_response(),
        Err(UpstreamError::NotConfigured(_)) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Yahoo Client ID is not configured",
        ),
        Err(err) => {
            tracing::error!(query = %search.query, error = %err, "Local search failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to search stores")
        }
    }
}

async fn google_place(State(state): State<ProxyState>, Path(place_id): Path<String>) -> Response {
    match state.places.details(&place_id).await {
        Ok(info) => Json(info).into_response(),
        // Without a key there is nothing to look the place up in.
        Err(UpstreamError::NotFound | UpstreamError::NotConfigured(_)) => {
            error_response(StatusCode::NOT_FOUND, "Place not found")
        }
        Err(err) => {
            tracing::error!(place_id = %place_id, error = %err, "Place details failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "Failed to fetch place information",
                    "details": err.to_string(),
                })),
            )
                .into_response()
        }
    }
}

async fn google_place_search(
    State(state): State<ProxyState>,
    Query(params): Query<PlaceSearchQuery>,
) -> Response {
    let Some(name) = params.name.filter(|n| !n.trim().is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "Name parameter is required");
    };
    match state
        .places
        .search_by_name(&name, location(params.lat, params.lng))
        .await
    {
        Ok(info) => Json(info).into_response(),
        Err(UpstreamError::NotFound) => error_response(StatusCode::NOT_FOUND, "Place not found"),
        Err(err) => {
            tracing::error!(name = %name, error = %err, "Place search failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to search place")
        }
    }
}

pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route("/api/yahoo-store/search", get(yahoo_search))
        .route("/api/yahoo-store/{store_id}", get(yahoo_store))
        .route("/api/google-place/search", get(google_place_search))
        .route("/api/google-place/{place_id}", get(google_place))
        .with_state(state)
}
