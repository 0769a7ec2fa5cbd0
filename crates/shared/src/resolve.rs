//! Field-by-field merge of store information from several sources.
//!
//! Each source is normalised into an [`InfoLayer`] where blank values are
//! `None`. Layers are ordered by precedence and every output field takes the
//! first layer that has a value for it.

use crate::models::{GooglePlaceInfo, InfoSource, ResolvedStoreInfo, Store, YahooStoreInfo};
use crate::places::price_level_label;

#[derive(Debug, Clone, PartialEq)]
pub struct InfoLayer {
    pub source: InfoSource,
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub genre: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub opening_hours: Vec<String>,
    pub price: Option<String>,
    pub access: Option<String>,
    pub holiday: Option<String>,
    pub parking: Option<String>,
    pub budget: Option<String>,
    pub catch_copy: Option<String>,
    pub map_url: Option<String>,
}

fn text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn opt_text(value: Option<&str>) -> Option<String> {
    value.and_then(text)
}

fn lines(values: &[String]) -> Vec<String> {
    values.iter().filter_map(|v| text(v)).collect()
}

impl InfoLayer {
    pub fn blank(source: InfoSource) -> Self {
        InfoLayer {
            source,
            name: None,
            description: None,
            address: None,
            genre: None,
            phone: None,
            website: None,
            rating: None,
            review_count: None,
            opening_hours: Vec::new(),
            price: None,
            access: None,
            holiday: None,
            parking: None,
            budget: None,
            catch_copy: None,
            map_url: None,
        }
    }

    /// A layer with no values contributes nothing and is not listed as a source.
    pub fn is_empty(&self) -> bool {
        *self == InfoLayer::blank(self.source)
    }
}

impl From<&GooglePlaceInfo> for InfoLayer {
    fn from(place: &GooglePlaceInfo) -> Self {
        InfoLayer {
            name: text(&place.name),
            description: opt_text(place.description.as_deref()),
            address: text(&place.address),
            genre: text(&place.category),
            phone: opt_text(place.phone.as_deref()),
            website: opt_text(place.website.as_deref()),
            rating: place.rating.filter(|r| *r > 0.0),
            review_count: place.review_count.filter(|c| *c > 0),
            opening_hours: place.opening_hours.as_deref().map(lines).unwrap_or_default(),
            price: place.price_level.and_then(price_level_label),
            map_url: opt_text(place.url.as_deref()),
            ..InfoLayer::blank(InfoSource::Places)
        }
    }
}

impl From<&YahooStoreInfo> for InfoLayer {
    fn from(store: &YahooStoreInfo) -> Self {
        InfoLayer {
            name: text(&store.name),
            description: text(&store.description),
            address: text(&store.address),
            genre: text(&store.category),
            phone: text(&store.phone),
            website: text(&store.url),
            // The API reports 0 for stores without reviews.
            rating: Some(store.rating).filter(|r| *r > 0.0),
            review_count: Some(store.review_count).filter(|c| *c > 0),
            opening_hours: text(&store.open_time).into_iter().collect(),
            access: text(&store.access),
            holiday: text(&store.holiday),
            parking: text(&store.parking),
            budget: text(&store.budget),
            catch_copy: text(&store.catch_copy),
            ..InfoLayer::blank(InfoSource::LocalSearch)
        }
    }
}

impl From<&Store> for InfoLayer {
    fn from(store: &Store) -> Self {
        InfoLayer {
            name: text(&store.name),
            description: opt_text(store.description.as_deref()),
            address: text(&store.address),
            phone: opt_text(store.phone.as_deref()),
            opening_hours: opt_text(store.opening_hours.as_deref())
                .into_iter()
                .collect(),
            price: opt_text(store.price_range.as_deref()),
            ..InfoLayer::blank(InfoSource::Base)
        }
    }
}

/// First value `pick` finds, walking the layers in order.
pub fn first_non_empty<T>(
    layers: &[InfoLayer],
    pick: impl Fn(&InfoLayer) -> Option<T>,
) -> Option<T> {
    layers.iter().find_map(pick)
}

fn text_field(layers: &[InfoLayer], pick: impl Fn(&InfoLayer) -> Option<&String>) -> String {
    layers.iter().find_map(pick).cloned().unwrap_or_default()
}

/// Merge `layers` (highest precedence first) into a display record.
pub fn merge(store: &Store, layers: &[InfoLayer]) -> ResolvedStoreInfo {
    ResolvedStoreInfo {
        store_id: store.id.clone(),
        name: text_field(layers, |l| l.name.as_ref()),
        description: text_field(layers, |l| l.description.as_ref()),
        address: text_field(layers, |l| l.address.as_ref()),
        genre: text_field(layers, |l| l.genre.as_ref()),
        taste: Some(store.category),
        level: store.level.unwrap_or(0),
        phone: text_field(layers, |l| l.phone.as_ref()),
        website: text_field(layers, |l| l.website.as_ref()),
        rating: first_non_empty(layers, |l| l.rating).unwrap_or(0.0),
        review_count: first_non_empty(layers, |l| l.review_count).unwrap_or(0),
        opening_hours: first_non_empty(layers, |l| {
            (!l.opening_hours.is_empty()).then(|| l.opening_hours.clone())
        })
        .unwrap_or_default(),
        price: text_field(layers, |l| l.price.as_ref()),
        access: text_field(layers, |l| l.access.as_ref()),
        holiday: text_field(layers, |l| l.holiday.as_ref()),
        parking: text_field(layers, |l| l.parking.as_ref()),
        budget: text_field(layers, |l| l.budget.as_ref()),
        catch_copy: text_field(layers, |l| l.catch_copy.as_ref()),
        map_url: text_field(layers, |l| l.map_url.as_ref()),
        sources: layers
            .iter()
            .filter(|l| !l.is_empty())
            .map(|l| l.source)
            .collect(),
    }
}

/// Merge with the fixed precedence places > local search > base store.
pub fn resolve_layers(
    store: &Store,
    places: Option<&GooglePlaceInfo>,
    local: Option<&YahooStoreInfo>,
) -> ResolvedStoreInfo {
    let mut layers = Vec::with_capacity(3);
    if let Some(place) = places {
        layers.push(InfoLayer::from(place));
    }
    if let Some(found) = local {
        layers.push(InfoLayer::from(found));
    }
    layers.push(InfoLayer::from(store));
    merge(store, &layers)
}
