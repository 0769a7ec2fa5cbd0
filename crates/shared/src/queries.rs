//! GraphQL documents sent by the web front end.
//!
//! Kept beside the models so the server's schema tests run the exact text
//! the browser sends.

macro_rules! store_fields {
    () => {
        "id name category address yahooStoreId googlePlaceId description phone openingHours priceRange level latitude longitude"
    };
}

macro_rules! pin_fields {
    () => {
        "id storeId x y isActive"
    };
}

pub const AREA: &str = "query { area { id name imagePath mapScale } }";

pub const EDIT_MODE: &str = "query { editMode }";

pub const STORES: &str = concat!("query { stores { ", store_fields!(), " } }");

pub const PINS: &str = concat!("query { pins { ", pin_fields!(), " } }");

pub const STORE_INFO: &str = "query StoreInfo($pinId: ID!) {
    storeInfo(pinId: $pinId) {
        storeId name description address genre taste level phone website
        rating reviewCount openingHours price access holiday parking budget
        catchCopy mapUrl sources
    }
}";

pub const REACTIONS: &str =
    "query Reactions($storeId: String!) { reactions(storeId: $storeId) { like bad } }";

pub const REACT: &str = "mutation React($storeId: String!, $kind: ReactionKind!) {
    react(storeId: $storeId, kind: $kind)
}";

pub const CREATE_PIN: &str = concat!(
    "mutation CreatePin($input: CreatePinInput!) { createPin(input: $input) { pin { ",
    pin_fields!(),
    " } store { ",
    store_fields!(),
    " } } }"
);

pub const MOVE_PIN: &str = concat!(
    "mutation MovePin($id: ID!, $x: Float!, $y: Float!) { movePin(id: $id, x: $x, y: $y) { ",
    pin_fields!(),
    " } }"
);

pub const UPDATE_PIN: &str = concat!(
    "mutation UpdatePin($input: UpdatePinInput!) { updatePin(input: $input) { ",
    pin_fields!(),
    " } }"
);

pub const DELETE_PIN: &str = "mutation DeletePin($id: ID!) { deletePin(id: $id) }";
