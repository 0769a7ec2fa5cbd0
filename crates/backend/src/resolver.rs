//! Builds the display record for a pin from the store dataset and the two
//! upstream services.

use std::future::Future;

use tastemap_shared::dataset::find_store;
use tastemap_shared::models::{GooglePlaceInfo, Pin, ResolvedStoreInfo, Store, YahooStoreInfo};
use tastemap_shared::resolve::resolve_layers;

use crate::upstream::{LocalSearchClient, PlacesClient, UpstreamError};

pub trait PlaceLookup {
    fn place_details(
        &self,
        place_id: &str,
    ) -> impl Future<Output = Result<GooglePlaceInfo, UpstreamError>> + Send;
}

pub trait LocalSearchLookup {
    fn local_store(
        &self,
        store_id: &str,
    ) -> impl Future<Output = Result<YahooStoreInfo, UpstreamError>> + Send;
}

impl PlaceLookup for PlacesClient {
    async fn place_details(&self, place_id: &str) -> Result<GooglePlaceInfo, UpstreamError> {
        self.details(place_id).await
    }
}

impl LocalSearchLookup for LocalSearchClient {
    async fn local_store(&self, store_id: &str) -> Result<YahooStoreInfo, UpstreamError> {
        self.lookup(store_id).await
    }
}

fn log_failure(store: &Store, source: &'static str, id: &str, err: &UpstreamError) {
    match err {
        UpstreamError::NotConfigured(_) => {
            tracing::debug!(store_id = %store.id, source, "Lookup skipped: {err}");
        }
        UpstreamError::NotFound => {
            tracing::warn!(store_id = %store.id, source, upstream_id = id, "No upstream record");
        }
        _ => {
            tracing::warn!(store_id = %store.id, source, upstream_id = id, error = %err, "Upstream lookup failed");
        }
    }
}

pub struct StoreInfoResolver<P, L> {
    places: P,
    local: L,
}

pub type HttpResolver = StoreInfoResolver<PlacesClient, LocalSearchClient>;

impl<P: PlaceLookup, L: LocalSearchLookup> StoreInfoResolver<P, L> {
    pub fn new(places: P, local: L) -> Self {
        StoreInfoResolver { places, local }
    }

    /// Merge places, local search and the store itself, in that order.
    ///
    /// Local search is only asked when places produced nothing. Upstream
    /// failures are logged and the source is skipped.
    pub async fn resolve(&self, store: &Store) -> ResolvedStoreInfo {
        let mut place = None;
        if let Some(place_id) = store.places_id() {
            match self.places.place_details(place_id).await {
                Ok(found) => place = Some(found),
                Err(err) => log_failure(store, "places", place_id, &err),
            }
        }

        let mut local = None;
        if place.is_none() {
            if let Some(local_id) = store.local_search_id() {
                match self.local.local_store(local_id).await {
                    Ok(found) => local = Some(found),
                    Err(err) => log_failure(store, "local_search", local_id, &err),
                }
            }
        }

        let info = resolve_layers(store, place.as_ref(), local.as_ref());
        tracing::debug!(store_id = %store.id, sources = ?info.sources, "Resolved store info");
        info
    }

    /// `None` when the pin points at an unknown store. No request is made.
    pub async fn resolve_pin(&self, pin: &Pin, stores: &[Store]) -> Option<ResolvedStoreInfo> {
        let Some(store) = find_store(stores, &pin.store_id) else {
            tracing::warn!(pin_id = %pin.id, store_id = %pin.store_id, "Pin references unknown store");
            return None;
        };
        Some(self.resolve(store).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tastemap_shared::models::InfoSource;

    #[derive(Default)]
    struct FakePlaces {
        result: Option<GooglePlaceInfo>,
        calls: AtomicUsize,
    }

    impl PlaceLookup for FakePlaces {
        async fn place_details(&self, _place_id: &str) -> Result<GooglePlaceInfo, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone().ok_or(UpstreamError::NotFound)
        }
    }

    #[derive(Default)]
    struct FakeLocal {
        result: Option<YahooStoreInfo>,
        /// Answer `NotFound` instead of a 500 when there is no result.
        missing: bool,
        calls: AtomicUsize,
    }

    impl LocalSearchLookup for FakeLocal {
        async fn local_store(&self, _store_id: &str) -> Result<YahooStoreInfo, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.result {
                Some(info) => Ok(info.clone()),
                None if self.missing => Err(UpstreamError::NotFound),
                None => Err(UpstreamError::Status(500)),
            }
        }
    }

    fn store(places_id: Option<&str>, local_id: Option<&str>) -> Store {
        let mut store = Store::placeholder("s1".into());
        store.name = "Base Name".into();
        store.address = "東京都渋谷区神南1-1".into();
        store.google_place_id = places_id.map(String::from);
        store.yahoo_store_id = local_id.map(String::from);
        store
    }

    fn place() -> GooglePlaceInfo {
        GooglePlaceInfo {
            id: "g1".into(),
            name: "Places Name".into(),
            ..Default::default()
        }
    }

    fn local() -> YahooStoreInfo {
        YahooStoreInfo {
            id: "y1".into(),
            name: "Local Name".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_places_wins_and_local_not_called() {
        let resolver = StoreInfoResolver::new(
            FakePlaces {
                result: Some(place()),
                ..Default::default()
            },
            FakeLocal {
                result: Some(local()),
                ..Default::default()
            },
        );
        let info = resolver.resolve(&store(Some("g1"), Some("y1"))).await;
        assert_eq!(info.name, "Places Name");
        // Places has no address; base fills it.
        assert_eq!(info.address, "東京都渋谷区神南1-1");
        assert_eq!(resolver.local.calls.load(Ordering::SeqCst), 0);
        assert_eq!(info.sources, vec![InfoSource::Places, InfoSource::Base]);
    }

    #[tokio::test]
    async fn test_local_used_when_places_fails() {
        let resolver = StoreInfoResolver::new(
            FakePlaces::default(),
            FakeLocal {
                result: Some(local()),
                ..Default::default()
            },
        );
        let info = resolver.resolve(&store(Some("g1"), Some("y1"))).await;
        assert_eq!(info.name, "Local Name");
        assert_eq!(resolver.places.calls.load(Ordering::SeqCst), 1);
        assert_eq!(resolver.local.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_local_failure_falls_back_to_base() {
        let resolver = StoreInfoResolver::new(FakePlaces::default(), FakeLocal::default());
        let base = store(None, Some("y1"));
        let info = resolver.resolve(&base).await;
        assert_eq!(info.address, base.address);
        assert_eq!(info.name, "Base Name");
        assert_eq!(resolver.places.calls.load(Ordering::SeqCst), 0);
        assert_eq!(info.sources, vec![InfoSource::Base]);
    }

    #[tokio::test]
    async fn test_local_not_found_keeps_base_address() {
        let resolver = StoreInfoResolver::new(
            FakePlaces::default(),
            FakeLocal {
                missing: true,
                ..Default::default()
            },
        );
        let base = store(None, Some("y-gone"));
        let info = resolver.resolve(&base).await;
        assert_eq!(resolver.local.calls.load(Ordering::SeqCst), 1);
        assert_eq!(info.address, "東京都渋谷区神南1-1");
        assert_eq!(info.name, "Base Name");
        assert_eq!(info.sources, vec![InfoSource::Base]);
    }

    #[tokio::test]
    async fn test_no_ids_means_no_calls() {
        let resolver = StoreInfoResolver::new(FakePlaces::default(), FakeLocal::default());
        resolver.resolve(&store(None, None)).await;
        assert_eq!(resolver.places.calls.load(Ordering::SeqCst), 0);
        assert_eq!(resolver.local.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_store_returns_none_without_calls() {
        let resolver = StoreInfoResolver::new(FakePlaces::default(), FakeLocal::default());
        let stores = vec![store(Some("g1"), Some("y1"))];
        let pin = Pin::new("p1".into(), "ghost".into(), 1.0, 1.0);
        assert!(resolver.resolve_pin(&pin, &stores).await.is_none());
        assert_eq!(resolver.places.calls.load(Ordering::SeqCst), 0);
        assert_eq!(resolver.local.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_resolve_pin_known_store() {
        let resolver = StoreInfoResolver::new(FakePlaces::default(), FakeLocal::default());
        let stores = vec![store(None, None)];
        let pin = Pin::new("p1".into(), "s1".into(), 1.0, 1.0);
        let info = resolver.resolve_pin(&pin, &stores).await.unwrap();
        assert_eq!(info.store_id, "s1");
    }
}
