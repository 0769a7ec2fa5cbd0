mod assets;
mod config;
mod graphql;
mod proxy;
mod resolver;
mod storage;
mod upstream;

use std::path::Path;
use std::sync::Arc;

use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::http::HeaderValue;
use axum::{extract::State, response::Html, routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use graphql::Schema;
use proxy::ProxyState;
use resolver::StoreInfoResolver;
use upstream::{LocalSearchClient, PlacesClient};

async fn graphql_handler(State(schema): State<Schema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> Html<String> {
    Html(
        async_graphql::http::GraphiQLSource::build()
            .endpoint("/graphql")
            .finish(),
    )
}

/// Static file router with a fixed `Cache-Control` header.
fn cached_static_router(dir: &Path, cache_header: &'static str) -> Router {
    let layer = SetResponseHeaderLayer::overriding(
        axum::http::header::CACHE_CONTROL,
        HeaderValue::from_static(cache_header),
    );
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(layer)
}

const CACHE_1DAY: &str = "public, max-age=86400, must-revalidate";
const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";

fn build_app(schema: Schema, proxy_state: ProxyState, assets_dir: &Path) -> Router {
    let static_files = Router::new()
        .nest("/static", cached_static_router(assets_dir, CACHE_1DAY))
        .nest(
            "/dist",
            cached_static_router(Path::new("dist"), CACHE_IMMUTABLE),
        )
        .nest(
            "/assets",
            cached_static_router(Path::new("dist/assets"), CACHE_IMMUTABLE),
        );

    Router::new()
        .route("/graphql", get(graphiql).post(graphql_handler))
        .route("/", get(serve_index))
        .with_state(schema)
        .merge(proxy::router(proxy_state))
        .merge(static_files)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env.local is fine; the process environment still applies.
    let _ = dotenvy::from_filename(".env.local");
    init_tracing();

    let config = AppConfig::from_env();
    let loaded_assets = Arc::new(assets::Assets::load(&config.assets_dir)?);

    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let storage = storage::Storage::open(&config.db_path)?;
    storage.seed(&loaded_assets.dataset)?;

    let mut places = PlacesClient::with_base_url(
        config.google_maps_api_key.clone(),
        &config.google_places_base_url,
    );
    if let Some(path) = &config.places_fixtures {
        places = places.with_fixtures(assets::load_place_fixtures(path)?);
    }
    let local = LocalSearchClient::with_base_url(
        config.yahoo_client_id.clone(),
        &config.yahoo_api_base_url,
    );
    if !places.is_configured() {
        tracing::warn!("GOOGLE_MAPS_API_KEY not set, places lookups disabled");
    }
    if !local.is_configured() {
        tracing::warn!("YAHOO_CLIENT_ID not set, local search disabled");
    }

    let resolver = Arc::new(StoreInfoResolver::new(places.clone(), local.clone()));
    let schema = graphql::build_schema(loaded_assets, storage, resolver, config.edit_mode);
    let app = build_app(schema, ProxyState { places, local }, &config.assets_dir);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!(port = config.port, edit_mode = config.edit_mode, "Server running at http://localhost:{}", config.port);
    tracing::info!("GraphiQL playground at http://localhost:{}/graphql", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn serve_index() -> Html<String> {
    match std::fs::read_to_string("dist/index.html") {
        Ok(html) => Html(html),
        Err(_) => Html(
            r#"<!DOCTYPE html>
<html>
<head><title>渋谷 Tastemap</title></head>
<body>
<h1>渋谷 Tastemap</h1>
<p>The map UI has not been built. Run <code>dx build</code> in crates/frontend, or browse the API in <a href="/graphql">GraphiQL</a>.</p>
</body>
</html>"#
                .to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tastemap_shared::dataset::Dataset;
    use tower::ServiceExt;

    fn temp_dir_with_file(file_name: &str, content: &[u8]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(file_name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
        dir
    }

    async fn status_and_cache(app: Router, uri: &str) -> (StatusCode, Option<String>) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let cache = resp
            .headers()
            .get("cache-control")
            .map(|v| v.to_str().unwrap().to_string());
        (resp.status(), cache)
    }

    fn full_app(assets_dir: &Path, db_dir: &Path, edit_mode: bool) -> Router {
        let dataset = Dataset::from_json(
            r#"[{"id":"s1","name":"担々麺","category":"spicy","x":50,"y":50}]"#,
        )
        .unwrap();
        let storage = storage::Storage::open(&db_dir.join("app.redb")).unwrap();
        storage.seed(&dataset).unwrap();
        let assets = Arc::new(assets::Assets {
            area: tastemap_shared::models::Area::Shibuya,
            dataset,
        });
        let places = PlacesClient::with_base_url(None, "http://127.0.0.1:9");
        let local = LocalSearchClient::with_base_url(None, "http://127.0.0.1:9");
        let resolver = Arc::new(StoreInfoResolver::new(places.clone(), local.clone()));
        let schema = graphql::build_schema(assets, storage, resolver, edit_mode);
        build_app(schema, ProxyState { places, local }, assets_dir)
    }

    #[tokio::test]
    async fn test_map_image_has_1day_cache() {
        let assets_dir = temp_dir_with_file("images/map01.webp", b"RIFF");
        let app = Router::new().nest(
            "/static",
            cached_static_router(assets_dir.path(), CACHE_1DAY),
        );
        let (status, cache) = status_and_cache(app, "/static/images/map01.webp").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache.as_deref(), Some("public, max-age=86400, must-revalidate"));
    }

    #[tokio::test]
    async fn test_frontend_bundle_is_immutable() {
        let dist_dir = temp_dir_with_file("tastemap-frontend-1a2b.wasm", b"\0asm");
        let app = Router::new().nest("/dist", cached_static_router(dist_dir.path(), CACHE_IMMUTABLE));
        let (status, cache) = status_and_cache(app, "/dist/tastemap-frontend-1a2b.wasm").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache.as_deref(), Some("public, max-age=31536000, immutable"));
    }

    #[tokio::test]
    async fn test_missing_static_file_returns_404() {
        let assets_dir = temp_dir_with_file("stores.json", b"[]");
        let app = Router::new().nest(
            "/static",
            cached_static_router(assets_dir.path(), CACHE_1DAY),
        );
        let (status, _) = status_and_cache(app, "/static/images/map99.webp").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_app_serves_graphql_and_proxies() {
        let assets_dir = temp_dir_with_file("images/map01.webp", b"RIFF");
        let db_dir = tempfile::tempdir().unwrap();
        let app = full_app(assets_dir.path(), db_dir.path(), false);

        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/graphql")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"query":"{ editMode pins { id storeId } }"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["data"]["editMode"], false);
        assert_eq!(json["data"]["pins"][0]["id"], "pin_s1");

        let (status, _) = status_and_cache(app.clone(), "/api/google-place/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, cache) = status_and_cache(app, "/static/images/map01.webp").await;
        assert_eq!(status, StatusCode::OK);
        assert!(cache.unwrap().contains("max-age=86400"));
    }

    #[tokio::test]
    async fn test_index_falls_back_without_build() {
        let Html(body) = serve_index().await;
        assert!(body.contains("<html"));
    }
}
