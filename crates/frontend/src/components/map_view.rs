use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use tastemap_shared::category::CategoryFilter;
use tastemap_shared::dataset::{find_store, visible_pins};
use tastemap_shared::geometry::{pin_anchor, Point, Rect, Size};
use tastemap_shared::models::{MapPosition, Pin, Store};
use tastemap_shared::pan::{centered_offset, rendered_image_size, PanBounds, PanRelease, PanState};
use tastemap_shared::pin_edit::{apply_move, NewPinPlacement, PinClick, PinEditState};

use crate::api::{self, AreaData};
use crate::coords::{self, MAP_CONTAINER_ID};

fn touch_points(evt: &Event<TouchData>) -> Vec<Point> {
    evt.data()
        .touches()
        .iter()
        .map(|t| {
            let c = t.client_coordinates();
            Point::new(c.x, c.y)
        })
        .collect()
}

/// One rendered marker: what the view needs, computed before `rsx!`.
struct Marker {
    pin_id: String,
    store_id: String,
    name: String,
    emoji: &'static str,
    style: String,
    dragging: bool,
}

impl Marker {
    fn class(&self, edit_mode: bool) -> &'static str {
        if self.dragging {
            "map-pin dragging"
        } else if edit_mode {
            "map-pin editable"
        } else {
            "map-pin"
        }
    }
}

fn build_markers(
    pins: &[Pin],
    stores: &[Store],
    filter: &CategoryFilter,
    image: Rect,
    container: Rect,
    dragging: Option<&str>,
) -> Vec<Marker> {
    visible_pins(pins, stores, filter)
        .into_iter()
        .filter_map(|pin| {
            let store = find_store(stores, &pin.store_id)?;
            let anchor = pin_anchor(image, container, pin.x, pin.y)?;
            Some(Marker {
                pin_id: pin.id.clone(),
                store_id: store.id.clone(),
                name: store.name.clone(),
                emoji: store.category.emoji(),
                style: coords::pin_style(anchor, store.category.color()),
                dragging: dragging == Some(pin.id.as_str()),
            })
        })
        .collect()
}

#[component]
pub fn MapView(
    area: AreaData,
    pins: Signal<Vec<Pin>>,
    stores: Signal<Vec<Store>>,
    filter: Signal<CategoryFilter>,
    edit: Signal<PinEditState>,
    on_pin_info: EventHandler<String>,
    on_add_pin: EventHandler<NewPinPlacement>,
) -> Element {
    let mut pins = pins;
    let mut edit = edit;
    let scale = area.map_scale;

    let mut container = use_signal(|| None::<Rect>);
    let mut offset = use_signal(MapPosition::default);
    let mut pan = use_signal(PanState::default);

    // Remeasure the container; the first successful measurement centres the image.
    let mut measure = move || -> Option<Rect> {
        let rect = coords::container_rect()?;
        if container.read().is_none() {
            let image = rendered_image_size(rect.size(), scale);
            offset.set(centered_offset(rect.size(), image));
        }
        container.set(Some(rect));
        Some(rect)
    };

    let image_size = move || -> Option<Size> {
        (*container.read())
            .map(|c| rendered_image_size(c.size(), scale))
    };

    let current_image_rect = move || -> Option<Rect> {
        let c = (*container.read())?;
        Some(coords::image_rect(c, *offset.read(), image_size()?))
    };

    let bounds = move || -> Option<PanBounds> {
        let c = (*container.read())?;
        Some(PanBounds::new(c.size(), image_size()?))
    };

    // Pointer-move: a held pin takes priority over panning.
    let mut pointer_moved = move |point: Point| {
        if edit.read().dragging_pin().is_some() {
            let Some(image) = current_image_rect() else {
                return;
            };
            let mv = edit.write().drag_to(point, image);
            if let Some(mv) = mv {
                apply_move(&mut pins.write(), &mv);
            }
            return;
        }
        let (next, moved) = pan.read().drag(point, bounds());
        pan.set(next);
        if let Some(new_offset) = moved {
            offset.set(new_offset);
        }
    };

    // Pointer-up / leave / touch-end.
    let mut pointer_released = move || {
        let finished = edit.write().release();
        if let Some(mv) = finished {
            api::persist_move_fire(mv);
            return;
        }
        let (next, outcome) = pan.read().release();
        pan.set(next);
        if let PanRelease::Click(point) = outcome {
            let Some(image) = current_image_rect() else {
                return;
            };
            let placement = edit.write().click_map(point, image);
            if let Some(placement) = placement {
                on_add_pin.call(placement);
            }
        }
    };

    let markers = match (current_image_rect(), *container.read()) {
        (Some(image), Some(c)) => build_markers(
            &pins.read(),
            &stores.read(),
            &filter.read(),
            image,
            c,
            edit.read().dragging_pin(),
        ),
        _ => Vec::new(),
    };

    let image_style = match image_size() {
        Some(size) => coords::image_style(*offset.read(), size),
        None => "visibility: hidden;".to_string(),
    };

    let state = edit.read();
    let container_class = if state.adding() {
        "map-container adding"
    } else if pan.read().has_moved() || state.dragging_pin().is_some() {
        "map-container dragging"
    } else {
        "map-container"
    };
    let edit_mode = state.edit_mode();
    drop(state);

    rsx! {
        div {
            id: MAP_CONTAINER_ID,
            class: "{container_class}",

            onmounted: move |_| {
                measure();
            },

            onmousedown: move |evt: Event<MouseData>| {
                if evt.trigger_button() != Some(MouseButton::Primary) {
                    return;
                }
                if measure().is_none() {
                    return;
                }
                let client = evt.client_coordinates();
                pan.set(PanState::press(*offset.read(), Point::new(client.x, client.y)));
            },

            onmousemove: move |evt: Event<MouseData>| {
                let client = evt.client_coordinates();
                pointer_moved(Point::new(client.x, client.y));
            },

            onmouseup: move |_| pointer_released(),

            onmouseleave: move |_| pointer_released(),

            ontouchstart: move |evt: Event<TouchData>| {
                if edit.read().dragging_pin().is_some() || measure().is_none() {
                    return;
                }
                let points = touch_points(&evt);
                let next = pan.read().touch_start(&points, *offset.read());
                pan.set(next);
            },

            ontouchmove: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let points = touch_points(&evt);
                if edit.read().dragging_pin().is_some() {
                    if let [only] = points.as_slice() {
                        pointer_moved(*only);
                    }
                    return;
                }
                let (next, moved) = pan.read().touch_move(&points, bounds());
                pan.set(next);
                if let Some(new_offset) = moved {
                    offset.set(new_offset);
                }
            },

            ontouchend: move |evt: Event<TouchData>| {
                if evt.data().touches().is_empty() {
                    pointer_released();
                }
            },

            ontouchcancel: move |_| {
                pan.set(PanState::Idle);
                edit.write().release();
            },

            img {
                class: "map-image",
                src: "{area.image_path}",
                alt: "{area.name}",
                draggable: "false",
                style: "{image_style}",
            }

            for marker in markers {
                div {
                    key: "{marker.pin_id}",
                    class: marker.class(edit_mode),
                    style: "{marker.style}",
                    title: "{marker.name}",

                    onmousedown: {
                        let pin_id = marker.pin_id.clone();
                        move |evt: Event<MouseData>| {
                            evt.stop_propagation();
                            edit.write().press_pin(&pin_id);
                        }
                    },

                    ontouchstart: {
                        let pin_id = marker.pin_id.clone();
                        move |evt: Event<TouchData>| {
                            evt.stop_propagation();
                            edit.write().press_pin(&pin_id);
                        }
                    },

                    onclick: {
                        let pin_id = marker.pin_id.clone();
                        let store_id = marker.store_id.clone();
                        move |evt: Event<MouseData>| {
                            evt.stop_propagation();
                            let click = edit.write().click_pin(&pin_id, &store_id);
                            if let PinClick::ShowInfo(id) = click {
                                on_pin_info.call(id);
                            }
                        }
                    },

                    span { class: "pin-head", "{marker.emoji}" }
                    span { class: "pin-tip" }
                    span { class: "pin-label", "{marker.name}" }
                }
            }
        }
    }
}
