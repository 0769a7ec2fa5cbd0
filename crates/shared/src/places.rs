//! Wire format of the Google Places web service (details and text search).

use serde::Deserialize;

use crate::models::{GooglePlaceInfo, LatLng};

pub const DETAILS_PATH: &str = "/maps/api/place/details/json";
pub const TEXT_SEARCH_PATH: &str = "/maps/api/place/textsearch/json";

pub const DETAIL_FIELDS: &str = "place_id,name,formatted_address,formatted_phone_number,website,rating,user_ratings_total,opening_hours,price_level,types,url";

/// Text search centre when the caller gives no location (Shibuya station).
pub const DEFAULT_SEARCH_LOCATION: LatLng = LatLng {
    lat: 35.6594,
    lng: 139.7006,
};
pub const DEFAULT_SEARCH_RADIUS_M: u32 = 1000;

const CATEGORY_LABELS: &[(&str, &str)] = &[
    ("restaurant", "レストラン"),
    ("food", "飲食店"),
    ("meal_takeaway", "テイクアウト"),
    ("cafe", "カフェ"),
    ("bar", "バー"),
    ("bakery", "ベーカリー"),
    ("meal_delivery", "デリバリー"),
    ("japanese_restaurant", "和食"),
    ("chinese_restaurant", "中華料理"),
    ("italian_restaurant", "イタリアン"),
    ("french_restaurant", "フレンチ"),
    ("korean_restaurant", "韓国料理"),
    ("thai_restaurant", "タイ料理"),
    ("indian_restaurant", "インド料理"),
];

const DEFAULT_CATEGORY: &str = "レストラン";

/// Label for the first place type found in the table.
pub fn category_label(types: &[String]) -> &'static str {
    types
        .iter()
        .find_map(|t| {
            CATEGORY_LABELS
                .iter()
                .find(|(key, _)| key == t)
                .map(|(_, label)| *label)
        })
        .unwrap_or(DEFAULT_CATEGORY)
}

/// `¥` repeated `level` times. Level 0 and anything past 4 have no label.
pub fn price_level_label(level: u8) -> Option<String> {
    (1..=4).contains(&level).then(|| "¥".repeat(level as usize))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Ok,
    NotFound,
    Error,
}

/// Classify the `status` field every Places response carries.
pub fn classify_status(status: &str) -> StatusClass {
    match status {
        "OK" => StatusClass::Ok,
        "NOT_FOUND" | "ZERO_RESULTS" | "INVALID_REQUEST" => StatusClass::NotFound,
        _ => StatusClass::Error,
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaceDetails {
    pub place_id: String,
    pub name: String,
    pub formatted_address: String,
    pub formatted_phone_number: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub opening_hours: Option<OpeningHours>,
    pub price_level: Option<u8>,
    pub types: Vec<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDetailsResponse {
    pub status: String,
    #[serde(default)]
    pub result: Option<PlaceDetails>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextSearchHit {
    #[serde(default)]
    pub place_id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextSearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<TextSearchHit>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl From<PlaceDetails> for GooglePlaceInfo {
    fn from(details: PlaceDetails) -> Self {
        GooglePlaceInfo {
            category: category_label(&details.types).to_string(),
            id: details.place_id,
            name: details.name,
            description: None,
            address: details.formatted_address,
            phone: details.formatted_phone_number,
            website: details.website,
            rating: details.rating,
            review_count: details.user_ratings_total,
            opening_hours: details.opening_hours.map(|h| h.weekday_text),
            price_level: details.price_level,
            url: details.url,
        }
    }
}

pub fn details_query(place_id: &str, key: &str) -> Vec<(&'static str, String)> {
    vec![
        ("place_id", place_id.to_string()),
        ("key", key.to_string()),
        ("language", "ja".to_string()),
        ("fields", DETAIL_FIELDS.to_string()),
    ]
}

pub fn text_search_query(name: &str, near: Option<LatLng>, key: &str) -> Vec<(&'static str, String)> {
    let near = near.unwrap_or(DEFAULT_SEARCH_LOCATION);
    vec![
        ("query", name.to_string()),
        ("location", format!("{},{}", near.lat, near.lng)),
        ("radius", DEFAULT_SEARCH_RADIUS_M.to_string()),
        ("key", key.to_string()),
        ("language", "ja".to_string()),
        ("region", "jp".to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label_first_known_type_wins() {
        let types = vec![
            "point_of_interest".to_string(),
            "chinese_restaurant".to_string(),
            "restaurant".to_string(),
        ];
        assert_eq!(category_label(&types), "中華料理");
        assert_eq!(category_label(&["establishment".to_string()]), "レストラン");
        assert_eq!(category_label(&[]), "レストラン");
    }

    #[test]
    fn test_price_level_label() {
        assert_eq!(price_level_label(0), None);
        assert_eq!(price_level_label(3).as_deref(), Some("¥¥¥"));
        assert_eq!(price_level_label(5), None);
    }

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status("OK"), StatusClass::Ok);
        assert_eq!(classify_status("ZERO_RESULTS"), StatusClass::NotFound);
        assert_eq!(classify_status("INVALID_REQUEST"), StatusClass::NotFound);
        assert_eq!(classify_status("REQUEST_DENIED"), StatusClass::Error);
    }

    #[test]
    fn test_details_response_maps_to_place_info() {
        let json = r#"{
            "status": "OK",
            "result": {
                "place_id": "ChIJKxjxuaNxGGARfW2k5IbpzUk",
                "name": "八虎 渋谷店",
                "formatted_address": "東京都渋谷区道玄坂2-25-17",
                "formatted_phone_number": "03-3464-8888",
                "rating": 4.2,
                "user_ratings_total": 156,
                "opening_hours": {"open_now": true, "weekday_text": ["月曜日: 11:30～15:00"]},
                "price_level": 2,
                "types": ["chinese_restaurant", "food"],
                "url": "https://maps.google.com/?cid=123456789"
            }
        }"#;
        let response: PlaceDetailsResponse = serde_json::from_str(json).unwrap();
        let info = GooglePlaceInfo::from(response.result.unwrap());
        assert_eq!(info.id, "ChIJKxjxuaNxGGARfW2k5IbpzUk");
        assert_eq!(info.category, "中華料理");
        assert_eq!(info.review_count, Some(156));
        assert_eq!(info.opening_hours.unwrap().len(), 1);
        assert!(info.website.is_none());
    }

    #[test]
    fn test_text_search_defaults_to_shibuya() {
        let pairs = text_search_query("八虎", None, "k");
        assert!(pairs.contains(&("location", "35.6594,139.7006".to_string())));
        assert!(pairs.contains(&("radius", "1000".to_string())));
        assert!(pairs.contains(&("region", "jp".to_string())));
    }
}
