//! Clients for the third-party store information services.

mod error;
pub mod local_search;
pub mod places;

pub use error::UpstreamError;
pub use local_search::LocalSearchClient;
pub use places::PlacesClient;

/// Fetch `url` with `query` and decode the JSON body, mapping transport
/// and status failures into [`UpstreamError`].
pub(crate) async fn get_json<T: serde::de::DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
    query: &[(&'static str, String)],
    context: &str,
) -> Result<T, UpstreamError> {
    let response = http.get(url).query(query).send().await?;
    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(UpstreamError::NotFound);
    }
    if !status.is_success() {
        return Err(UpstreamError::Status(status.as_u16()));
    }
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|source| UpstreamError::Deserialize {
        context: context.to_string(),
        source,
    })
}
