//! Wire format of the Yahoo! Local Search API.
//!
//! Every field is optional upstream and numeric fields are sometimes sent as
//! strings, so decoding is lenient and falls back to empty values.

use serde::{Deserialize, Deserializer};

use crate::models::{LatLng, YahooStoreInfo};

pub const LOCAL_SEARCH_PATH: &str = "/search/local/V1/localSearch";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalSearchResponse {
    #[serde(rename = "Feature", default)]
    pub feature: Vec<Feature>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Feature {
    pub id: String,
    pub name: String,
    pub description: String,
    pub property: FeatureProperty,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Genre {
    #[serde(rename = "Name", default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FeatureProperty {
    pub address: String,
    pub genre: Vec<Genre>,
    pub tel1: String,
    pub url: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub rating: f64,
    #[serde(deserialize_with = "lenient_u32")]
    pub review_count: u32,
    pub open_time: String,
    pub holiday: String,
    pub access: String,
    pub parking: String,
    pub budget: String,
    pub catch_copy: String,
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()).unwrap_or(0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

impl From<&Feature> for YahooStoreInfo {
    fn from(feature: &Feature) -> Self {
        let p = &feature.property;
        YahooStoreInfo {
            id: feature.id.clone(),
            name: feature.name.clone(),
            description: feature.description.clone(),
            address: p.address.clone(),
            category: p.genre.first().map(|g| g.name.clone()).unwrap_or_default(),
            phone: p.tel1.clone(),
            url: p.url.clone(),
            rating: p.rating,
            review_count: p.review_count,
            open_time: p.open_time.clone(),
            holiday: p.holiday.clone(),
            access: p.access.clone(),
            parking: p.parking.clone(),
            budget: p.budget.clone(),
            catch_copy: p.catch_copy.clone(),
        }
    }
}

impl LocalSearchResponse {
    /// The first feature, which is the store when looking up by id.
    pub fn first_store(&self) -> Option<YahooStoreInfo> {
        self.feature.first().map(YahooStoreInfo::from)
    }

    pub fn stores(&self) -> Vec<YahooStoreInfo> {
        self.feature.iter().map(YahooStoreInfo::from).collect()
    }
}

/// Query for a single store by its id.
pub fn lookup_query(appid: &str, gid: &str) -> Vec<(&'static str, String)> {
    vec![
        ("appid", appid.to_string()),
        ("gid", gid.to_string()),
        ("output", "json".to_string()),
    ]
}

/// Free-text search near an optional location.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub query: String,
    pub near: Option<LatLng>,
    pub results: u32,
    /// Search radius in kilometres, only sent with a location.
    pub dist_km: u32,
}

impl SearchParams {
    /// Defaults used by the search endpoint: 10 hits within 3 km.
    pub fn new(query: impl Into<String>, near: Option<LatLng>) -> Self {
        SearchParams {
            query: query.into(),
            near,
            results: 10,
            dist_km: 3,
        }
    }

    pub fn to_query(&self, appid: &str) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("appid", appid.to_string()),
            ("query", self.query.clone()),
            ("results", self.results.to_string()),
            ("sort", "score".to_string()),
            ("output", "json".to_string()),
        ];
        if let Some(near) = self.near {
            pairs.push(("lat", near.lat.to_string()));
            pairs.push(("lon", near.lng.to_string()));
            pairs.push(("dist", self.dist_km.to_string()));
        }
        pairs
    }
}
