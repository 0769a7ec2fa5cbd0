use dioxus::logger::tracing;
use dioxus::prelude::*;
use tastemap_shared::models::{Pin, Store};
use tastemap_shared::pin_edit::PinEditState;

use crate::api;
use crate::coords;

fn store_option_label(store: &Store) -> String {
    format!("{} ({})", store.name, store.category.label())
}

/// Replace the pin with the server's copy, keeping list order.
fn replace_pin(pins: &mut [Pin], updated: Pin) {
    if let Some(slot) = pins.iter_mut().find(|p| p.id == updated.id) {
        *slot = updated;
    }
}

#[component]
pub fn PinEditor(
    edit: Signal<PinEditState>,
    pins: Signal<Vec<Pin>>,
    stores: Signal<Vec<Store>>,
) -> Element {
    let mut edit = edit;
    let mut pins = pins;

    let Some(draft) = edit.read().editor().cloned() else {
        return rsx! {};
    };
    let position = pins
        .read()
        .iter()
        .find(|p| p.id == draft.pin_id)
        .map(|p| coords::format_position(p.x, p.y))
        .unwrap_or_default();
    let options: Vec<(String, String)> = stores
        .read()
        .iter()
        .map(|s| (s.id.clone(), store_option_label(s)))
        .collect();

    rsx! {
        div { class: "panel pin-editor",
            h3 { "ピン編集" }

            label { class: "field-label", "お店を選択" }
            select {
                value: "{draft.store_id}",
                onchange: move |evt: Event<FormData>| edit.write().select_store(&evt.value()),
                for (id, label) in options {
                    option {
                        key: "{id}",
                        selected: id == draft.store_id,
                        value: "{id}",
                        "{label}"
                    }
                }
            }

            div { class: "pin-position", "{position}" }

            div { class: "editor-actions",
                button {
                    class: "save",
                    onclick: move |_| {
                        let Some(draft) = edit.write().save() else { return };
                        spawn(async move {
                            match api::update_pin_store(&draft.pin_id, &draft.store_id).await {
                                Ok(updated) => replace_pin(&mut pins.write(), updated),
                                Err(e) => tracing::warn!(pin_id = %draft.pin_id, error = %e, "Failed to save pin"),
                            }
                        });
                    },
                    "保存"
                }
                button {
                    class: "delete",
                    onclick: move |_| {
                        let Some(pin_id) = edit.write().delete() else { return };
                        spawn(async move {
                            match api::delete_pin(&pin_id).await {
                                Ok(_) => pins.write().retain(|p| p.id != pin_id),
                                Err(e) => tracing::warn!(pin_id = %pin_id, error = %e, "Failed to delete pin"),
                            }
                        });
                    },
                    "削除"
                }
                button {
                    class: "cancel",
                    onclick: move |_| edit.write().cancel(),
                    "キャンセル"
                }
            }
        }
    }
}
