use dioxus::logger::tracing;
use serde::{Deserialize, Deserializer, Serialize};
use tastemap_shared::models::{
    Area, Category, InfoSource, Pin, ReactionCounts, ReactionKind, ResolvedStoreInfo, Store,
};
use tastemap_shared::pin_edit::PinMove;
use tastemap_shared::queries;

// GraphQL enums arrive and leave in SCREAMING_CASE.

fn reaction_literal(kind: ReactionKind) -> &'static str {
    match kind {
        ReactionKind::Like => "LIKE",
        ReactionKind::Bad => "BAD",
    }
}

fn source_from_literal(raw: &str) -> Option<InfoSource> {
    match raw {
        "PLACES" => Some(InfoSource::Places),
        "LOCAL_SEARCH" => Some(InfoSource::LocalSearch),
        "BASE" => Some(InfoSource::Base),
        _ => None,
    }
}

fn de_category<'de, D: Deserializer<'de>>(d: D) -> Result<Category, D::Error> {
    let raw = String::deserialize(d)?;
    raw.parse().map_err(serde::de::Error::custom)
}

fn de_optional_category<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Category>, D::Error> {
    match Option::<String>::deserialize(d)? {
        Some(raw) => raw.parse().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Build the variables JSON for a createPin mutation.
pub fn build_create_pin_variables(x: f64, y: f64, store_id: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "input": { "x": x, "y": y, "storeId": store_id }
    })
}

pub fn build_move_pin_variables(mv: &PinMove) -> serde_json::Value {
    serde_json::json!({ "id": mv.pin_id, "x": mv.x, "y": mv.y })
}

/// Build the variables JSON for relinking a pin to another store.
pub fn build_update_pin_variables(pin_id: &str, store_id: &str) -> serde_json::Value {
    serde_json::json!({
        "input": { "id": pin_id, "storeId": store_id }
    })
}

pub fn build_react_variables(store_id: &str, kind: ReactionKind) -> serde_json::Value {
    serde_json::json!({ "storeId": store_id, "kind": reaction_literal(kind) })
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

fn api_url() -> Result<String, String> {
    let window = web_sys::window().ok_or("No window")?;
    let origin = window
        .location()
        .origin()
        .map_err(|_| "No window origin".to_string())?;
    Ok(format!("{}/graphql", origin))
}

async fn query<T: for<'de> Deserialize<'de>>(
    query_str: &str,
    variables: Option<serde_json::Value>,
) -> Result<T, String> {
    let req = GraphQLRequest {
        query: query_str.to_string(),
        variables,
    };

    let resp = reqwest::Client::new()
        .post(api_url()?)
        .json(&req)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let gql_resp: GraphQLResponse<T> = resp.json().await.map_err(|e| e.to_string())?;

    if let Some(errors) = gql_resp.errors {
        if let Some(first) = errors.into_iter().next() {
            return Err(first.message);
        }
    }

    gql_resp.data.ok_or_else(|| "No data returned".to_string())
}

// Types mirroring the GraphQL schema


#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaData {
    pub id: String,
    pub name: String,
    pub image_path: String,
    pub map_scale: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreData {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "de_category")]
    pub category: Category,
    #[serde(default)]
    pub address: String,
    pub yahoo_store_id: Option<String>,
    pub google_place_id: Option<String>,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub opening_hours: Option<String>,
    pub price_range: Option<String>,
    pub level: Option<u8>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<StoreData> for Store {
    fn from(s: StoreData) -> Self {
        Store {
            id: s.id,
            name: s.name,
            area: Area::Shibuya,
            category: s.category,
            address: s.address,
            yahoo_store_id: s.yahoo_store_id,
            google_place_id: s.google_place_id,
            description: s.description,
            phone: s.phone,
            opening_hours: s.opening_hours,
            price_range: s.price_range,
            level: s.level,
            latitude: s.latitude,
            longitude: s.longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInfoData {
    pub store_id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub genre: String,
    #[serde(default, deserialize_with = "de_optional_category")]
    pub taste: Option<Category>,
    pub level: u8,
    pub phone: String,
    pub website: String,
    pub rating: f64,
    pub review_count: u32,
    #[serde(default)]
    pub opening_hours: Vec<String>,
    pub price: String,
    pub access: String,
    pub holiday: String,
    pub parking: String,
    pub budget: String,
    pub catch_copy: String,
    pub map_url: String,
    #[serde(default)]
    pub sources: Vec<String>,
}

impl From<StoreInfoData> for ResolvedStoreInfo {
    fn from(d: StoreInfoData) -> Self {
        ResolvedStoreInfo {
            sources: d
                .sources
                .iter()
                .filter_map(|s| source_from_literal(s))
                .collect(),
            store_id: d.store_id,
            name: d.name,
            description: d.description,
            address: d.address,
            genre: d.genre,
            taste: d.taste,
            level: d.level,
            phone: d.phone,
            website: d.website,
            rating: d.rating,
            review_count: d.review_count,
            opening_hours: d.opening_hours,
            price: d.price,
            access: d.access,
            holiday: d.holiday,
            parking: d.parking,
            budget: d.budget,
            catch_copy: d.catch_copy,
            map_url: d.map_url,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ReactionsData {
    pub like: u64,
    pub bad: u64,
}

impl From<ReactionsData> for ReactionCounts {
    fn from(r: ReactionsData) -> Self {
        ReactionCounts {
            like: r.like,
            bad: r.bad,
        }
    }
}

// API functions

#[derive(Deserialize)]
pub struct AreaResponse {
    pub area: AreaData,
}

pub async fn fetch_area() -> Result<AreaData, String> {
    let resp: AreaResponse = query(queries::AREA, None).await?;
    Ok(resp.area)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditModeResponse {
    pub edit_mode: bool,
}

pub async fn fetch_edit_mode() -> Result<bool, String> {
    let resp: EditModeResponse = query(queries::EDIT_MODE, None).await?;
    Ok(resp.edit_mode)
}

#[derive(Deserialize)]
pub struct StoresResponse {
    pub stores: Vec<StoreData>,
}

pub async fn fetch_stores() -> Result<Vec<Store>, String> {
    let resp: StoresResponse = query(queries::STORES, None).await?;
    Ok(resp.stores.into_iter().map(Store::from).collect())
}

#[derive(Deserialize)]
pub struct PinsResponse {
    pub pins: Vec<Pin>,
}

/// Every drawable pin. Category filtering happens client-side.
pub async fn fetch_pins() -> Result<Vec<Pin>, String> {
    let resp: PinsResponse = query(queries::PINS, None).await?;
    Ok(resp.pins)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInfoResponse {
    pub store_info: Option<StoreInfoData>,
}

pub async fn fetch_store_info(pin_id: &str) -> Result<Option<ResolvedStoreInfo>, String> {
    let resp: StoreInfoResponse = query(
        queries::STORE_INFO,
        Some(serde_json::json!({ "pinId": pin_id })),
    )
    .await?;
    Ok(resp.store_info.map(ResolvedStoreInfo::from))
}

#[derive(Deserialize)]
pub struct ReactionsResponse {
    pub reactions: ReactionsData,
}

pub async fn fetch_reactions(store_id: &str) -> Result<ReactionCounts, String> {
    let resp: ReactionsResponse = query(
        queries::REACTIONS,
        Some(serde_json::json!({ "storeId": store_id })),
    )
    .await?;
    Ok(resp.reactions.into())
}

#[derive(Deserialize)]
pub struct ReactResponse {
    pub react: u64,
}

pub async fn react(store_id: &str, kind: ReactionKind) -> Result<u64, String> {
    let resp: ReactResponse = query(
        queries::REACT,
        Some(build_react_variables(store_id, kind)),
    )
    .await?;
    Ok(resp.react)
}

#[derive(Deserialize)]
pub struct CreatedPinData {
    pub pin: Pin,
    pub store: StoreData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePinResponse {
    pub create_pin: CreatedPinData,
}

/// Create a pin with a placeholder store at the given image percentages.
pub async fn create_pin(x: f64, y: f64) -> Result<(Pin, Store), String> {
    let resp: CreatePinResponse = query(
        queries::CREATE_PIN,
        Some(build_create_pin_variables(x, y, None)),
    )
    .await?;
    let created = resp.create_pin;
    Ok((created.pin, created.store.into()))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovePinResponse {
    pub move_pin: Pin,
}

pub async fn move_pin(mv: &PinMove) -> Result<Pin, String> {
    let resp: MovePinResponse = query(
        queries::MOVE_PIN,
        Some(build_move_pin_variables(mv)),
    )
    .await?;
    Ok(resp.move_pin)
}

/// Fire-and-forget persistence of a finished pin drag.
pub fn persist_move_fire(mv: PinMove) {
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = move_pin(&mv).await {
            tracing::warn!(pin_id = %mv.pin_id, error = %e, "Failed to persist pin move");
        }
    });
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePinResponse {
    pub update_pin: Pin,
}

pub async fn update_pin_store(pin_id: &str, store_id: &str) -> Result<Pin, String> {
    let resp: UpdatePinResponse = query(
        queries::UPDATE_PIN,
        Some(build_update_pin_variables(pin_id, store_id)),
    )
    .await?;
    Ok(resp.update_pin)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePinResponse {
    pub delete_pin: bool,
}

pub async fn delete_pin(pin_id: &str) -> Result<bool, String> {
    let resp: DeletePinResponse = query(
        queries::DELETE_PIN,
        Some(serde_json::json!({ "id": pin_id })),
    )
    .await?;
    Ok(resp.delete_pin)
}
