use tastemap_shared::geometry::{Point, Rect, Size};
use tastemap_shared::models::MapPosition;

pub const MAP_CONTAINER_ID: &str = "area-map-container";

/// Bounding client rect of an element, or `None` before it has been laid out.
pub fn element_rect(id: &str) -> Option<Rect> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(id)?;
    let r = element.get_bounding_client_rect();
    let rect = Rect::new(r.left(), r.top(), r.width(), r.height());
    rect.is_measured().then_some(rect)
}

pub fn container_rect() -> Option<Rect> {
    element_rect(MAP_CONTAINER_ID)
}

/// Client-space rect of the map image translated by `offset` inside `container`.
///
/// The image is absolutely positioned at the container's top-left, so its
/// rect follows from the offset without a second DOM measurement.
pub fn image_rect(container: Rect, offset: MapPosition, image: Size) -> Rect {
    Rect::new(
        container.left + offset.x,
        container.top + offset.y,
        image.width,
        image.height,
    )
}

pub fn image_style(offset: MapPosition, image: Size) -> String {
    format!(
        "transform: translate({}px, {}px); width: {}px; height: {}px;",
        offset.x, offset.y, image.width, image.height
    )
}

/// Marker style anchored bottom-centre on `anchor` (container-relative).
pub fn pin_style(anchor: Point, color: &str) -> String {
    format!(
        "left: {}px; top: {}px; transform: translate(-50%, -100%); --pin-color: {};",
        anchor.x, anchor.y, color
    )
}

pub fn format_position(x: f64, y: f64) -> String {
    format!("位置: X={:.1}%, Y={:.1}%", x, y)
}
