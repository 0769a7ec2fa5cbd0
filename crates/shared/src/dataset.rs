//! The bundled `stores.json` file.
//!
//! Two layouts exist on disk. Version 1 is a bare array of store records,
//! some of which carry a pin position inline. Version 2 keeps stores and
//! pins in separate lists. Everything is migrated to version 2 on load.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::category::CategoryFilter;
use crate::models::{Area, Category, Pin, Store};

pub const CURRENT_VERSION: u32 = 2;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("invalid dataset JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported dataset version {0}")]
    UnsupportedVersion(u64),
    #[error("dataset must be an array of stores or a versioned object")]
    UnknownLayout,
    #[error("duplicate store id: {0}")]
    DuplicateStore(String),
    #[error("duplicate pin id: {0}")]
    DuplicatePin(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub version: u32,
    #[serde(default)]
    pub stores: Vec<Store>,
    #[serde(default)]
    pub pins: Vec<Pin>,
}

impl Default for Dataset {
    fn default() -> Self {
        Dataset {
            version: CURRENT_VERSION,
            stores: Vec::new(),
            pins: Vec::new(),
        }
    }
}

#[derive(Deserialize)]
struct LegacyStore {
    #[serde(flatten)]
    store: Store,
    #[serde(default, alias = "x_position")]
    x: Option<f64>,
    #[serde(default, alias = "y_position")]
    y: Option<f64>,
}

/// Id given to a pin migrated out of a version 1 store record.
pub fn legacy_pin_id(store_id: &str) -> String {
    format!("pin_{store_id}")
}

impl Dataset {
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let mut dataset = if value.is_array() {
            let legacy: Vec<LegacyStore> = serde_json::from_value(value)?;
            Self::from_legacy(legacy)
        } else if let Some(map) = value.as_object() {
            let version = map
                .get("version")
                .and_then(serde_json::Value::as_u64)
                .unwrap_or(0);
            if version != u64::from(CURRENT_VERSION) {
                return Err(DatasetError::UnsupportedVersion(version));
            }
            serde_json::from_value(value)?
        } else {
            return Err(DatasetError::UnknownLayout);
        };
        for pin in &mut dataset.pins {
            pin.migrate();
        }
        dataset.validate()?;
        Ok(dataset)
    }

    fn from_legacy(records: Vec<LegacyStore>) -> Self {
        let mut dataset = Dataset::default();
        for record in records {
            if let (Some(x), Some(y)) = (record.x, record.y) {
                dataset.pins.push(Pin::new(
                    legacy_pin_id(&record.store.id),
                    record.store.id.clone(),
                    x,
                    y,
                ));
            }
            dataset.stores.push(record.store);
        }
        dataset
    }

    fn validate(&self) -> Result<(), DatasetError> {
        let mut seen = std::collections::HashSet::new();
        for store in &self.stores {
            if !seen.insert(store.id.as_str()) {
                return Err(DatasetError::DuplicateStore(store.id.clone()));
            }
        }
        let mut seen = std::collections::HashSet::new();
        for pin in &self.pins {
            if !seen.insert(pin.id.as_str()) {
                return Err(DatasetError::DuplicatePin(pin.id.clone()));
            }
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String, DatasetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn find_store(&self, id: &str) -> Option<&Store> {
        find_store(&self.stores, id)
    }

    /// Stores in `area`, optionally narrowed to one category.
    pub fn stores_in(&self, area: Area, category: Option<Category>) -> impl Iterator<Item = &Store> {
        self.stores
            .iter()
            .filter(move |s| s.area == area && category.is_none_or(|c| s.category == c))
    }
}

pub fn find_store<'a>(stores: &'a [Store], id: &str) -> Option<&'a Store> {
    stores.iter().find(|s| s.id == id)
}

/// Pins to draw: active, linked to a known store, and in a selected category.
pub fn visible_pins<'a>(pins: &'a [Pin], stores: &[Store], filter: &CategoryFilter) -> Vec<&'a Pin> {
    pins.iter()
        .filter(|pin| pin.is_active)
        .filter(|pin| {
            find_store(stores, &pin.store_id).is_some_and(|store| filter.contains(store.category))
        })
        .collect()
}
