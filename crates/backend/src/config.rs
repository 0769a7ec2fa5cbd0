use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_YAHOO_API_BASE_URL: &str = "https://map.yahooapis.jp";
pub const DEFAULT_GOOGLE_PLACES_BASE_URL: &str = "https://maps.googleapis.com";

/// Server settings loaded from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub assets_dir: PathBuf,
    pub db_path: PathBuf,
    pub edit_mode: bool,
    /// Local search is disabled when unset.
    pub yahoo_client_id: Option<String>,
    /// Places lookups are disabled when unset.
    pub google_maps_api_key: Option<String>,
    pub yahoo_api_base_url: String,
    pub google_places_base_url: String,
    /// JSON map of place id to place record, consulted before the API.
    pub places_fixtures: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        AppConfig {
            port: get("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            assets_dir: PathBuf::from(get("ASSETS_DIR").unwrap_or_else(|| "assets".to_string())),
            db_path: PathBuf::from(
                get("DB_PATH").unwrap_or_else(|| "data/tastemap.redb".to_string()),
            ),
            edit_mode: get("EDIT_MODE").is_some_and(|v| parse_flag(&v)),
            yahoo_client_id: get("YAHOO_CLIENT_ID"),
            google_maps_api_key: get("GOOGLE_MAPS_API_KEY"),
            yahoo_api_base_url: get("YAHOO_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_YAHOO_API_BASE_URL.to_string()),
            google_places_base_url: get("GOOGLE_PLACES_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GOOGLE_PLACES_BASE_URL.to_string()),
            places_fixtures: get("PLACES_FIXTURES").map(PathBuf::from),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.assets_dir, PathBuf::from("assets"));
        assert_eq!(config.db_path, PathBuf::from("data/tastemap.redb"));
        assert!(!config.edit_mode);
        assert!(config.yahoo_client_id.is_none());
        assert!(config.google_maps_api_key.is_none());
        assert_eq!(config.yahoo_api_base_url, "https://map.yahooapis.jp");
        assert!(config.places_fixtures.is_none());
    }

    #[test]
    fn test_places_fixtures_path() {
        let config = config_from(&[("PLACES_FIXTURES", "assets/places.json")]);
        assert_eq!(config.places_fixtures, Some(PathBuf::from("assets/places.json")));
    }

    #[test]
    fn test_edit_mode_flag_values() {
        for value in ["1", "true", "TRUE", "yes"] {
            assert!(config_from(&[("EDIT_MODE", value)]).edit_mode, "{value}");
        }
        for value in ["0", "false", "no", ""] {
            assert!(!config_from(&[("EDIT_MODE", value)]).edit_mode, "{value}");
        }
    }

    #[test]
    fn test_blank_keys_are_unset() {
        let config = config_from(&[("YAHOO_CLIENT_ID", "  "), ("GOOGLE_MAPS_API_KEY", "abc")]);
        assert!(config.yahoo_client_id.is_none());
        assert_eq!(config.google_maps_api_key.as_deref(), Some("abc"));
    }

    #[test]
    fn test_invalid_port_falls_back() {
        assert_eq!(config_from(&[("PORT", "http")]).port, 3000);
        assert_eq!(config_from(&[("PORT", "8080")]).port, 8080);
    }
}
