use std::collections::HashMap;
use std::path::Path;

use tastemap_shared::dataset::Dataset;
use tastemap_shared::models::{Area, GooglePlaceInfo};

pub const DATASET_FILE: &str = "stores.json";

/// Read-only data bundled with the server.
pub struct Assets {
    pub area: Area,
    pub dataset: Dataset,
}

impl Assets {
    pub fn load(assets_dir: &Path) -> Result<Self, String> {
        let dataset_path = assets_dir.join(DATASET_FILE);
        let data = std::fs::read_to_string(&dataset_path)
            .map_err(|e| format!("Failed to read {}: {}", dataset_path.display(), e))?;
        let dataset = Dataset::from_json(&data)
            .map_err(|e| format!("Failed to load {}: {}", dataset_path.display(), e))?;

        tracing::info!(
            stores = dataset.stores.len(),
            pins = dataset.pins.len(),
            "Loaded store dataset"
        );

        Ok(Assets {
            area: Area::Shibuya,
            dataset,
        })
    }
}

/// Canned place records keyed by place id, for working without an API key.
pub fn load_place_fixtures(path: &Path) -> Result<HashMap<String, GooglePlaceInfo>, String> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let fixtures: HashMap<String, GooglePlaceInfo> = serde_json::from_str(&data)
        .map_err(|e| format!("Failed to load {}: {}", path.display(), e))?;
    tracing::info!(places = fixtures.len(), path = %path.display(), "Loaded place fixtures");
    Ok(fixtures)
}
