use serde::{Deserialize, Serialize};

use crate::geometry::clamp_percent;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Area {
    #[default]
    Shibuya,
}

impl Area {
    pub fn display_name(&self) -> &'static str {
        match self {
            Area::Shibuya => "渋谷",
        }
    }

    /// Illustrated map image served from the static assets directory.
    pub fn image_path(&self) -> &'static str {
        match self {
            Area::Shibuya => "/static/images/map01.webp",
        }
    }

    /// Reference point used for upstream searches in this area.
    pub fn center(&self) -> LatLng {
        match self {
            Area::Shibuya => LatLng {
                lat: 35.6581,
                lng: 139.7014,
            },
        }
    }
}

impl std::fmt::Display for Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Area::Shibuya => write!(f, "shibuya"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Spicy,
    Oily,
    Sweet,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Spicy, Category::Oily, Category::Sweet];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Spicy => write!(f, "spicy"),
            Category::Oily => write!(f, "oily"),
            Category::Sweet => write!(f, "sweet"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spicy" => Ok(Category::Spicy),
            "oily" => Ok(Category::Oily),
            "sweet" => Ok(Category::Sweet),
            other => Err(format!("Unknown category: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A restaurant as it appears in the bundled dataset.
///
/// Accepts both the `Store` spelling (`yahooStoreId`, `area`) and the older
/// `Restaurant` spelling (`google_place_id`, `area_id`) of each field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: String,
    pub name: String,
    #[serde(default, alias = "area_id")]
    pub area: Area,
    pub category: Category,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "yahoo_store_id")]
    pub yahoo_store_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "google_place_id")]
    pub google_place_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "opening_hours")]
    pub opening_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "price_range")]
    pub price_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Name given to stores created by clicking on the map in edit mode.
pub const PLACEHOLDER_STORE_NAME: &str = "新しいお店";

impl Store {
    /// A store with only the required fields set, used for click-to-add.
    pub fn placeholder(id: String) -> Self {
        Store {
            id,
            name: PLACEHOLDER_STORE_NAME.to_string(),
            area: Area::Shibuya,
            category: Category::Spicy,
            address: String::new(),
            yahoo_store_id: None,
            google_place_id: None,
            description: None,
            phone: None,
            opening_hours: None,
            price_range: None,
            level: None,
            latitude: None,
            longitude: None,
        }
    }

    /// Places identifier, ignoring blank values left behind by hand edits.
    pub fn places_id(&self) -> Option<&str> {
        non_blank(self.google_place_id.as_deref())
    }

    /// Local-search identifier, ignoring blank values.
    pub fn local_search_id(&self) -> Option<&str> {
        non_blank(self.yahoo_store_id.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn default_true() -> bool {
    true
}

/// A marker on the illustrated map, positioned as a percentage of the
/// rendered image's width (`x`) and height (`y`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pin {
    pub id: String,
    #[serde(alias = "restaurant_id", alias = "store_id")]
    pub store_id: String,
    #[serde(alias = "x_position")]
    pub x: f64,
    #[serde(alias = "y_position")]
    pub y: f64,
    #[serde(default = "default_true", alias = "is_active")]
    pub is_active: bool,
}

impl Pin {
    pub fn new(id: String, store_id: String, x: f64, y: f64) -> Self {
        Pin {
            id,
            store_id,
            x: clamp_percent(x),
            y: clamp_percent(y),
            is_active: true,
        }
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = clamp_percent(x);
        self.y = clamp_percent(y);
    }

    /// Bring a position read from an untrusted source back into range.
    pub fn migrate(&mut self) {
        self.set_position(self.x, self.y);
    }
}

/// Pixel translation applied to the background image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MapPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Bad,
}

impl ReactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Bad => "bad",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCounts {
    pub like: u64,
    pub bad: u64,
}

/// Store record as returned by the local-search API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooStoreInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub category: String,
    pub phone: String,
    pub url: String,
    pub rating: f64,
    pub review_count: u32,
    #[serde(default)]
    pub open_time: String,
    #[serde(default)]
    pub holiday: String,
    #[serde(default)]
    pub access: String,
    #[serde(default)]
    pub parking: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub catch_copy: String,
}

/// Place record as returned by the places API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GooglePlaceInfo {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub address: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InfoSource {
    Places,
    LocalSearch,
    Base,
}

/// Display record for one pin, merged from every source that answered.
///
/// Every field has a concrete value; missing data is an empty string, zero
/// or an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStoreInfo {
    pub store_id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    /// Cuisine label from an upstream source (e.g. 中華料理).
    pub genre: String,
    pub taste: Option<Category>,
    pub level: u8,
    pub phone: String,
    pub website: String,
    pub rating: f64,
    pub review_count: u32,
    pub opening_hours: Vec<String>,
    pub price: String,
    pub access: String,
    pub holiday: String,
    pub parking: String,
    pub budget: String,
    pub catch_copy: String,
    pub map_url: String,
    pub sources: Vec<InfoSource>,
}

#[cfg(feature = "uuid-support")]
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_display() {
        for c in Category::ALL {
            assert_eq!(c.to_string().parse::<Category>().unwrap(), c);
        }
        assert!("umami".parse::<Category>().is_err());
    }

    #[test]
    fn test_store_accepts_restaurant_field_names() {
        let json = r#"{"id":"r1","name":"太田さんラーメン","category":"spicy","area_id":"shibuya","address":"東京都渋谷区渋谷1-1-1","google_place_id":"ChIJ123","opening_hours":"11:00-22:00","price_range":"¥500-¥1000"}"#;
        let store: Store = serde_json::from_str(json).unwrap();
        assert_eq!(store.area, Area::Shibuya);
        assert_eq!(store.places_id(), Some("ChIJ123"));
        assert_eq!(store.opening_hours.as_deref(), Some("11:00-22:00"));
        assert_eq!(store.price_range.as_deref(), Some("¥500-¥1000"));
    }

    #[test]
    fn test_store_blank_ids_are_absent() {
        let json = r#"{"id":"s1","name":"x","category":"sweet","yahooStoreId":"  ","googlePlaceId":""}"#;
        let store: Store = serde_json::from_str(json).unwrap();
        assert!(store.places_id().is_none());
        assert!(store.local_search_id().is_none());
    }

    #[test]
    fn test_store_serializes_camel_case() {
        let mut store = Store::placeholder("s9".to_string());
        store.yahoo_store_id = Some("y-1".to_string());
        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["yahooStoreId"], "y-1");
        assert!(json.get("googlePlaceId").is_none());
        assert_eq!(json["category"], "spicy");
        assert_eq!(json["area"], "shibuya");
    }

    #[test]
    fn test_pin_accepts_legacy_position_fields() {
        let json = r#"{"id":"pin_1","restaurant_id":"r1","x_position":45,"y_position":25,"is_active":false}"#;
        let pin: Pin = serde_json::from_str(json).unwrap();
        assert_eq!(pin.store_id, "r1");
        assert!((pin.x - 45.0).abs() < 1e-9);
        assert!((pin.y - 25.0).abs() < 1e-9);
        assert!(!pin.is_active);
    }

    #[test]
    fn test_pin_defaults_to_active() {
        let pin: Pin = serde_json::from_str(r#"{"id":"p","storeId":"s","x":1,"y":2}"#).unwrap();
        assert!(pin.is_active);
    }

    #[test]
    fn test_pin_new_clamps_position() {
        let pin = Pin::new("p".into(), "s".into(), -5.0, 130.0);
        assert_eq!(pin.x, 0.0);
        assert_eq!(pin.y, 100.0);
    }

    #[test]
    fn test_pin_migrate_clamps_out_of_range() {
        let mut pin: Pin =
            serde_json::from_str(r#"{"id":"p","storeId":"s","x":101.5,"y":-0.1}"#).unwrap();
        pin.migrate();
        assert_eq!(pin.x, 100.0);
        assert_eq!(pin.y, 0.0);
    }
}
