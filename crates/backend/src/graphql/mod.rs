use std::sync::Arc;

use async_graphql::{Context, Enum, InputObject, Object, SimpleObject, ID};
use tastemap_shared::{
    category::{all_configs, CategoryConfig, CategoryFilter},
    dataset::visible_pins,
    geometry::is_percent,
    models::{self, generate_id, Category, InfoSource, Pin, ReactionKind, Store},
    pan::DEFAULT_MAP_SCALE,
};

use crate::assets::Assets;
use crate::resolver::HttpResolver;
use crate::storage::Storage;

/// Whether mutations that change the map are accepted.
#[derive(Debug, Clone, Copy)]
pub struct EditMode(pub bool);

pub const EDIT_MODE_DISABLED: &str = "Edit mode is disabled";

fn require_edit_mode(ctx: &Context<'_>) -> async_graphql::Result<()> {
    if ctx.data::<EditMode>()?.0 {
        Ok(())
    } else {
        Err(async_graphql::Error::new(EDIT_MODE_DISABLED))
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(name = "Category")]
pub enum GqlCategory {
    Spicy,
    Oily,
    Sweet,
}

impl From<Category> for GqlCategory {
    fn from(c: Category) -> Self {
        match c {
            Category::Spicy => GqlCategory::Spicy,
            Category::Oily => GqlCategory::Oily,
            Category::Sweet => GqlCategory::Sweet,
        }
    }
}

impl From<GqlCategory> for Category {
    fn from(c: GqlCategory) -> Self {
        match c {
            GqlCategory::Spicy => Category::Spicy,
            GqlCategory::Oily => Category::Oily,
            GqlCategory::Sweet => Category::Sweet,
        }
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(name = "ReactionKind")]
pub enum GqlReactionKind {
    Like,
    Bad,
}

impl From<GqlReactionKind> for ReactionKind {
    fn from(k: GqlReactionKind) -> Self {
        match k {
            GqlReactionKind::Like => ReactionKind::Like,
            GqlReactionKind::Bad => ReactionKind::Bad,
        }
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(name = "InfoSource")]
pub enum GqlInfoSource {
    Places,
    LocalSearch,
    Base,
}

impl From<InfoSource> for GqlInfoSource {
    fn from(s: InfoSource) -> Self {
        match s {
            InfoSource::Places => GqlInfoSource::Places,
            InfoSource::LocalSearch => GqlInfoSource::LocalSearch,
            InfoSource::Base => GqlInfoSource::Base,
        }
    }
}

// GraphQL output types

#[derive(SimpleObject)]
pub struct GqlArea {
    pub id: String,
    pub name: String,
    pub image_path: String,
    pub map_scale: f64,
}

#[derive(SimpleObject)]
pub struct GqlCategoryConfig {
    pub category: GqlCategory,
    pub label: String,
    pub short_label: String,
    pub color: String,
    pub emoji: String,
}

impl From<CategoryConfig> for GqlCategoryConfig {
    fn from(c: CategoryConfig) -> Self {
        GqlCategoryConfig {
            category: c.category.into(),
            label: c.label.to_string(),
            short_label: c.short_label.to_string(),
            color: c.color.to_string(),
            emoji: c.emoji.to_string(),
        }
    }
}

#[derive(SimpleObject)]
pub struct GqlStore {
    pub id: ID,
    pub name: String,
    pub area: String,
    pub category: GqlCategory,
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

impl From<Store> for GqlStore {
    fn from(s: Store) -> Self {
        GqlStore {
            id: ID(s.id),
            name: s.name,
            area: s.area.to_string(),
            category: s.category.into(),
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

#[derive(SimpleObject)]
pub struct GqlPin {
    pub id: ID,
    pub store_id: String,
    pub x: f64,
    pub y: f64,
    pub is_active: bool,
}

impl From<Pin> for GqlPin {
    fn from(p: Pin) -> Self {
        GqlPin {
            id: ID(p.id),
            store_id: p.store_id,
            x: p.x,
            y: p.y,
            is_active: p.is_active,
        }
    }
}

#[derive(SimpleObject)]
pub struct GqlCreatedPin {
    pub pin: GqlPin,
    pub store: GqlStore,
}

#[derive(SimpleObject)]
pub struct GqlStoreInfo {
    pub store_id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub genre: String,
    pub taste: Option<GqlCategory>,
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
    pub sources: Vec<GqlInfoSource>,
}

impl From<models::ResolvedStoreInfo> for GqlStoreInfo {
    fn from(i: models::ResolvedStoreInfo) -> Self {
        GqlStoreInfo {
            store_id: i.store_id,
            name: i.name,
            description: i.description,
            address: i.address,
            genre: i.genre,
            taste: i.taste.map(GqlCategory::from),
            level: i.level,
            phone: i.phone,
            website: i.website,
            rating: i.rating,
            review_count: i.review_count,
            opening_hours: i.opening_hours,
            price: i.price,
            access: i.access,
            holiday: i.holiday,
            parking: i.parking,
            budget: i.budget,
            catch_copy: i.catch_copy,
            map_url: i.map_url,
            sources: i.sources.into_iter().map(GqlInfoSource::from).collect(),
        }
    }
}

#[derive(SimpleObject)]
pub struct GqlReactions {
    pub store_id: String,
    pub like: u64,
    pub bad: u64,
}

// Input types

#[derive(InputObject)]
pub struct CreatePinInput {
    pub x: f64,
    pub y: f64,
    /// Existing store to link. A placeholder store is created when omitted.
    pub store_id: Option<String>,
}

#[derive(InputObject)]
pub struct UpdatePinInput {
    pub id: ID,
    pub store_id: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub is_active: Option<bool>,
}

#[derive(InputObject)]
pub struct UpdateStoreInput {
    pub id: ID,
    pub name: Option<String>,
    pub category: Option<GqlCategory>,
    pub address: Option<String>,
    pub description: Option<String>,
    /// An empty string clears the id.
    pub yahoo_store_id: Option<String>,
    /// An empty string clears the id.
    pub google_place_id: Option<String>,
}

fn category_filter(categories: Option<Vec<GqlCategory>>) -> CategoryFilter {
    match categories {
        Some(list) => {
            let list: Vec<Category> = list.into_iter().map(Category::from).collect();
            CategoryFilter::only(&list)
        }
        None => CategoryFilter::default(),
    }
}

fn optional_id(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// Query root

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn area(&self, ctx: &Context<'_>) -> async_graphql::Result<GqlArea> {
        let assets = ctx.data::<Arc<Assets>>()?;
        Ok(GqlArea {
            id: assets.area.to_string(),
            name: assets.area.display_name().to_string(),
            image_path: assets.area.image_path().to_string(),
            map_scale: DEFAULT_MAP_SCALE,
        })
    }

    async fn categories(&self) -> Vec<GqlCategoryConfig> {
        all_configs().into_iter().map(GqlCategoryConfig::from).collect()
    }

    async fn stores(
        &self,
        ctx: &Context<'_>,
        categories: Option<Vec<GqlCategory>>,
    ) -> async_graphql::Result<Vec<GqlStore>> {
        let storage = ctx.data::<Arc<Storage>>()?;
        let filter = category_filter(categories);
        Ok(storage
            .list_stores()?
            .into_iter()
            .filter(|s| filter.contains(s.category))
            .map(GqlStore::from)
            .collect())
    }

    /// Pins to draw: active, linked to a known store, in a selected category.
    async fn pins(
        &self,
        ctx: &Context<'_>,
        categories: Option<Vec<GqlCategory>>,
    ) -> async_graphql::Result<Vec<GqlPin>> {
        let storage = ctx.data::<Arc<Storage>>()?;
        let stores = storage.list_stores()?;
        let pins = storage.list_pins()?;
        let filter = category_filter(categories);
        Ok(visible_pins(&pins, &stores, &filter)
            .into_iter()
            .cloned()
            .map(GqlPin::from)
            .collect())
    }

    async fn store_info(
        &self,
        ctx: &Context<'_>,
        pin_id: ID,
    ) -> async_graphql::Result<Option<GqlStoreInfo>> {
        let storage = ctx.data::<Arc<Storage>>()?;
        let resolver = ctx.data::<Arc<HttpResolver>>()?;
        let Some(pin) = storage.get_pin(&pin_id)? else {
            return Ok(None);
        };
        let stores: Vec<Store> = storage.get_store(&pin.store_id)?.into_iter().collect();
        let info = resolver.resolve_pin(&pin, &stores).await;
        Ok(info.map(GqlStoreInfo::from))
    }

    async fn reactions(
        &self,
        ctx: &Context<'_>,
        store_id: String,
    ) -> async_graphql::Result<GqlReactions> {
        let storage = ctx.data::<Arc<Storage>>()?;
        let counts = storage.reactions(&store_id)?;
        Ok(GqlReactions {
            store_id,
            like: counts.like,
            bad: counts.bad,
        })
    }

    async fn edit_mode(&self, ctx: &Context<'_>) -> async_graphql::Result<bool> {
        Ok(ctx.data::<EditMode>()?.0)
    }
}

// Mutation root

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_pin(
        &self,
        ctx: &Context<'_>,
        input: CreatePinInput,
    ) -> async_graphql::Result<GqlCreatedPin> {
        require_edit_mode(ctx)?;
        let storage = ctx.data::<Arc<Storage>>()?;

        if !is_percent(input.x) || !is_percent(input.y) {
            return Err(async_graphql::Error::new(
                "Pin position must be within 0-100",
            ));
        }

        let store = match input.store_id {
            Some(store_id) => storage
                .get_store(&store_id)?
                .ok_or_else(|| async_graphql::Error::new("Store not found"))?,
            None => Store::placeholder(format!("store_{}", generate_id())),
        };
        let pin = Pin::new(
            format!("pin_{}", generate_id()),
            store.id.clone(),
            input.x,
            input.y,
        );

        storage.save_store_and_pin(&store, &pin)?;
        tracing::info!(pin_id = %pin.id, store_id = %store.id, x = pin.x, y = pin.y, "Created pin");

        Ok(GqlCreatedPin {
            pin: pin.into(),
            store: store.into(),
        })
    }

    async fn move_pin(
        &self,
        ctx: &Context<'_>,
        id: ID,
        x: f64,
        y: f64,
    ) -> async_graphql::Result<GqlPin> {
        require_edit_mode(ctx)?;
        let storage = ctx.data::<Arc<Storage>>()?;
        let mut pin = storage
            .get_pin(&id)?
            .ok_or_else(|| async_graphql::Error::new("Pin not found"))?;
        pin.set_position(x, y);
        storage.save_pin(&pin)?;
        Ok(pin.into())
    }

    async fn update_pin(
        &self,
        ctx: &Context<'_>,
        input: UpdatePinInput,
    ) -> async_graphql::Result<GqlPin> {
        require_edit_mode(ctx)?;
        let storage = ctx.data::<Arc<Storage>>()?;
        let mut pin = storage
            .get_pin(&input.id)?
            .ok_or_else(|| async_graphql::Error::new("Pin not found"))?;

        if let Some(store_id) = input.store_id {
            if storage.get_store(&store_id)?.is_none() {
                return Err(async_graphql::Error::new(format!(
                    "Unknown store: {}",
                    store_id
                )));
            }
            pin.store_id = store_id;
        }
        let x = input.x.unwrap_or(pin.x);
        let y = input.y.unwrap_or(pin.y);
        pin.set_position(x, y);
        if let Some(active) = input.is_active {
            pin.is_active = active;
        }

        storage.save_pin(&pin)?;
        Ok(pin.into())
    }

    async fn delete_pin(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        require_edit_mode(ctx)?;
        let storage = ctx.data::<Arc<Storage>>()?;
        Ok(storage.delete_pin(&id)?)
    }

    async fn update_store(
        &self,
        ctx: &Context<'_>,
        input: UpdateStoreInput,
    ) -> async_graphql::Result<GqlStore> {
        require_edit_mode(ctx)?;
        let storage = ctx.data::<Arc<Storage>>()?;
        let mut store = storage
            .get_store(&input.id)?
            .ok_or_else(|| async_graphql::Error::new("Store not found"))?;

        if let Some(name) = input.name {
            store.name = name;
        }
        if let Some(category) = input.category {
            store.category = category.into();
        }
        if let Some(address) = input.address {
            store.address = address;
        }
        if let Some(description) = input.description {
            store.description = Some(description);
        }
        if let Some(id) = input.yahoo_store_id {
            store.yahoo_store_id = optional_id(id);
        }
        if let Some(id) = input.google_place_id {
            store.google_place_id = optional_id(id);
        }

        storage.save_store(&store)?;
        Ok(store.into())
    }

    /// Deletes the store and every pin linked to it.
    async fn delete_store(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        require_edit_mode(ctx)?;
        let storage = ctx.data::<Arc<Storage>>()?;
        Ok(storage.delete_store(&id)?)
    }

    async fn react(
        &self,
        ctx: &Context<'_>,
        store_id: String,
        kind: GqlReactionKind,
    ) -> async_graphql::Result<u64> {
        let storage = ctx.data::<Arc<Storage>>()?;
        if storage.get_store(&store_id)?.is_none() {
            return Err(async_graphql::Error::new("Store not found"));
        }
        Ok(storage.increment_reaction(&store_id, kind.into())?)
    }
}

pub type Schema = async_graphql::Schema<QueryRoot, MutationRoot, async_graphql::EmptySubscription>;

pub fn build_schema(
    assets: Arc<Assets>,
    storage: Arc<Storage>,
    resolver: Arc<HttpResolver>,
    edit_mode: bool,
) -> Schema {
    async_graphql::Schema::build(QueryRoot, MutationRoot, async_graphql::EmptySubscription)
        .data(assets)
        .data(storage)
        .data(resolver)
        .data(EditMode(edit_mode))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::StoreInfoResolver;
    use crate::upstream::{LocalSearchClient, PlacesClient};
    use tastemap_shared::dataset::Dataset;
    use tastemap_shared::queries;

    const DATASET: &str = r#"{"version":2,
        "stores":[
            {"id":"s1","name":"火鍋","category":"spicy","address":"渋谷1-1"},
            {"id":"s2","name":"パフェ","category":"sweet","address":"渋谷2-2"}
        ],
        "pins":[
            {"id":"p1","storeId":"s1","x":10,"y":20},
            {"id":"p2","storeId":"s2","x":30,"y":40},
            {"id":"p3","storeId":"ghost","x":50,"y":50}
        ]}"#;

    fn test_schema(edit_mode: bool) -> (tempfile::TempDir, Schema) {
        let dir = tempfile::tempdir().unwrap();
        let dataset = Dataset::from_json(DATASET).unwrap();
        let storage = Storage::open(&dir.path().join("test.redb")).unwrap();
        storage.seed(&dataset).unwrap();
        let assets = Arc::new(Assets {
            area: models::Area::Shibuya,
            dataset,
        });
        // No keys configured, so the resolver never leaves the process.
        let resolver = Arc::new(StoreInfoResolver::new(
            PlacesClient::with_base_url(None, "http://127.0.0.1:9"),
            LocalSearchClient::with_base_url(None, "http://127.0.0.1:9"),
        ));
        (dir, build_schema(assets, storage, resolver, edit_mode))
    }

    async fn run(schema: &Schema, query: &str) -> async_graphql::Response {
        schema.execute(query).await
    }

    async fn run_with(schema: &Schema, query: &str, variables: serde_json::Value) -> async_graphql::Response {
        let request = async_graphql::Request::new(query)
            .variables(async_graphql::Variables::from_json(variables));
        schema.execute(request).await
    }

    fn data(resp: async_graphql::Response) -> serde_json::Value {
        assert!(resp.errors.is_empty(), "errors: {:?}", resp.errors);
        resp.data.into_json().unwrap()
    }

    #[tokio::test]
    async fn test_area_and_categories() {
        let (_dir, schema) = test_schema(false);
        let json = data(run(&schema, "{ area { id name mapScale } categories { category label emoji } }").await);
        assert_eq!(json["area"]["id"], "shibuya");
        assert_eq!(json["area"]["name"], "渋谷");
        assert_eq!(json["area"]["mapScale"], 1.7);
        assert_eq!(json["categories"][0]["category"], "SPICY");
        assert_eq!(json["categories"][2]["label"], "甘い");
    }

    #[tokio::test]
    async fn test_pins_hide_dangling_and_filter_category() {
        let (_dir, schema) = test_schema(false);
        let json = data(run(&schema, "{ pins { id } }").await);
        let ids: Vec<&str> = json["pins"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids.len(), 2);
        assert!(!ids.contains(&"p3"));

        let json = data(run(&schema, "{ pins(categories: [SWEET]) { id } }").await);
        assert_eq!(json["pins"].as_array().unwrap().len(), 1);
        assert_eq!(json["pins"][0]["id"], "p2");
    }

    #[tokio::test]
    async fn test_store_info_from_base_store() {
        let (_dir, schema) = test_schema(false);
        let json = data(
            run(&schema, r#"{ storeInfo(pinId: "p1") { name address rating sources taste } }"#).await,
        );
        assert_eq!(json["storeInfo"]["name"], "火鍋");
        assert_eq!(json["storeInfo"]["address"], "渋谷1-1");
        assert_eq!(json["storeInfo"]["rating"], 0.0);
        assert_eq!(json["storeInfo"]["sources"][0], "BASE");
        assert_eq!(json["storeInfo"]["taste"], "SPICY");
    }

    #[tokio::test]
    async fn test_store_info_unknown_store_is_null() {
        let (_dir, schema) = test_schema(false);
        let json = data(run(&schema, r#"{ storeInfo(pinId: "p3") { name } }"#).await);
        assert!(json["storeInfo"].is_null());
        let json = data(run(&schema, r#"{ storeInfo(pinId: "nope") { name } }"#).await);
        assert!(json["storeInfo"].is_null());
    }

    #[tokio::test]
    async fn test_mutations_rejected_outside_edit_mode() {
        let (_dir, schema) = test_schema(false);
        let resp = run(&schema, r#"mutation { movePin(id: "p1", x: 5, y: 5) { id } }"#).await;
        assert_eq!(resp.errors.len(), 1);
        assert_eq!(resp.errors[0].message, EDIT_MODE_DISABLED);
        let json = data(run(&schema, "{ editMode }").await);
        assert_eq!(json["editMode"], false);
    }

    #[tokio::test]
    async fn test_create_pin_with_placeholder_store() {
        let (_dir, schema) = test_schema(true);
        let json = data(
            run(
                &schema,
                "mutation { createPin(input: { x: 42.0, y: 17.5 }) { pin { id x y storeId } store { id name category address } } }",
            )
            .await,
        );
        let created = &json["createPin"];
        assert_eq!(created["pin"]["x"], 42.0);
        assert_eq!(created["pin"]["y"], 17.5);
        assert_eq!(created["store"]["name"], "新しいお店");
        assert_eq!(created["store"]["category"], "SPICY");
        assert_eq!(created["store"]["address"], "");
        assert_eq!(created["pin"]["storeId"], created["store"]["id"]);

        let pin_id = created["pin"]["id"].as_str().unwrap().to_string();
        let json = data(run(&schema, &format!(r#"{{ storeInfo(pinId: "{pin_id}") {{ name }} }}"#)).await);
        assert_eq!(json["storeInfo"]["name"], "新しいお店");
    }

    #[tokio::test]
    async fn test_create_pin_rejects_out_of_range() {
        let (_dir, schema) = test_schema(true);
        let resp = run(&schema, "mutation { createPin(input: { x: 101, y: 5 }) { pin { id } } }").await;
        assert_eq!(resp.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_move_pin_clamps() {
        let (_dir, schema) = test_schema(true);
        let json = data(run(&schema, r#"mutation { movePin(id: "p1", x: 150, y: -20) { x y } }"#).await);
        assert_eq!(json["movePin"]["x"], 100.0);
        assert_eq!(json["movePin"]["y"], 0.0);
    }

    #[tokio::test]
    async fn test_update_pin_rejects_unknown_store() {
        let (_dir, schema) = test_schema(true);
        let resp = run(&schema, r#"mutation { updatePin(input: { id: "p1", storeId: "ghost" }) { id } }"#).await;
        assert_eq!(resp.errors.len(), 1);

        let json = data(
            run(&schema, r#"mutation { updatePin(input: { id: "p1", storeId: "s2" }) { storeId } }"#).await,
        );
        assert_eq!(json["updatePin"]["storeId"], "s2");
    }

    #[tokio::test]
    async fn test_delete_store_removes_its_pins() {
        let (_dir, schema) = test_schema(true);
        let json = data(run(&schema, r#"mutation { deleteStore(id: "s1") }"#).await);
        assert_eq!(json["deleteStore"], true);
        let json = data(run(&schema, "{ pins { id } }").await);
        assert_eq!(json["pins"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_store_clears_blank_ids() {
        let (_dir, schema) = test_schema(true);
        let json = data(
            run(
                &schema,
                r#"mutation { updateStore(input: { id: "s1", yahooStoreId: "y-9", googlePlaceId: "" , category: OILY }) { yahooStoreId googlePlaceId category } }"#,
            )
            .await,
        );
        assert_eq!(json["updateStore"]["yahooStoreId"], "y-9");
        assert!(json["updateStore"]["googlePlaceId"].is_null());
        assert_eq!(json["updateStore"]["category"], "OILY");
    }

    #[tokio::test]
    async fn test_react_allowed_outside_edit_mode() {
        let (_dir, schema) = test_schema(false);
        data(run(&schema, r#"mutation { react(storeId: "s1", kind: LIKE) }"#).await);
        let json = data(run(&schema, r#"mutation { react(storeId: "s1", kind: LIKE) }"#).await);
        assert_eq!(json["react"], 2);
        let json = data(run(&schema, r#"{ reactions(storeId: "s1") { like bad } }"#).await);
        assert_eq!(json["reactions"]["like"], 2);
        assert_eq!(json["reactions"]["bad"], 0);

        let resp = run(&schema, r#"mutation { react(storeId: "ghost", kind: BAD) }"#).await;
        assert_eq!(resp.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_react_with_enum_variable() {
        let (_dir, schema) = test_schema(false);
        let vars = serde_json::json!({ "storeId": "s1", "kind": "LIKE" });
        let json = data(run_with(&schema, queries::REACT, vars).await);
        assert_eq!(json["react"], 1);

        let vars = serde_json::json!({ "storeId": "s1", "kind": "BAD" });
        let json = data(run_with(&schema, queries::REACT, vars).await);
        assert_eq!(json["react"], 1);

        let vars = serde_json::json!({ "storeId": "s1" });
        let json = data(run_with(&schema, queries::REACTIONS, vars).await);
        assert_eq!(json["reactions"]["like"], 1);
        assert_eq!(json["reactions"]["bad"], 1);
    }

    #[test]
    fn test_schema_type_names() {
        let (_dir, schema) = test_schema(false);
        let sdl = schema.sdl();
        assert!(sdl.contains("enum ReactionKind"));
        assert!(sdl.contains("enum Category"));
        assert!(sdl.contains("enum InfoSource"));
    }

    #[tokio::test]
    async fn test_web_client_documents_run_against_schema() {
        let (_dir, schema) = test_schema(true);

        let json = data(run(&schema, queries::AREA).await);
        assert_eq!(json["area"]["imagePath"], "/static/images/map01.webp");
        let json = data(run(&schema, queries::EDIT_MODE).await);
        assert_eq!(json["editMode"], true);
        let json = data(run(&schema, queries::STORES).await);
        assert_eq!(json["stores"].as_array().unwrap().len(), 2);
        let json = data(run(&schema, queries::PINS).await);
        assert_eq!(json["pins"].as_array().unwrap().len(), 2);

        let vars = serde_json::json!({ "pinId": "p1" });
        let json = data(run_with(&schema, queries::STORE_INFO, vars).await);
        assert_eq!(json["storeInfo"]["name"], "火鍋");
        assert_eq!(json["storeInfo"]["sources"][0], "BASE");

        let vars = serde_json::json!({ "input": { "x": 42.0, "y": 17.5, "storeId": null } });
        let json = data(run_with(&schema, queries::CREATE_PIN, vars).await);
        assert_eq!(json["createPin"]["pin"]["x"], 42.0);
        assert_eq!(json["createPin"]["store"]["category"], "SPICY");

        let vars = serde_json::json!({ "id": "p1", "x": 12.5, "y": 80.0 });
        let json = data(run_with(&schema, queries::MOVE_PIN, vars).await);
        assert_eq!(json["movePin"]["x"], 12.5);

        let vars = serde_json::json!({ "input": { "id": "p1", "storeId": "s2" } });
        let json = data(run_with(&schema, queries::UPDATE_PIN, vars).await);
        assert_eq!(json["updatePin"]["storeId"], "s2");

        let vars = serde_json::json!({ "id": "p2" });
        let json = data(run_with(&schema, queries::DELETE_PIN, vars).await);
        assert_eq!(json["deletePin"], true);

        let vars = serde_json::json!({ "storeId": "s2", "kind": "LIKE" });
        let json = data(run_with(&schema, queries::REACT, vars).await);
        assert_eq!(json["react"], 1);
    }
}
