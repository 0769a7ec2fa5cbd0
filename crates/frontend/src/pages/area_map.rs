use dioxus::logger::tracing;
use dioxus::prelude::*;
use tastemap_shared::category::CategoryFilter;
use tastemap_shared::modal::ModalController;
use tastemap_shared::models::{Pin, Store};
use tastemap_shared::pin_edit::{NewPinPlacement, PinEditState};

use crate::api;
use crate::components::category_filter::CategoryFilterPanel;
use crate::components::edit_toolbar::EditToolbar;
use crate::components::intro_dialog::IntroDialog;
use crate::components::map_view::MapView;
use crate::components::pin_editor::PinEditor;
use crate::components::store_modal::StoreModal;

#[component]
pub fn AreaMap() -> Element {
    let area_resource = use_resource(|| api::fetch_area());

    let mut stores = use_signal(Vec::<Store>::new);
    let mut pins = use_signal(Vec::<Pin>::new);
    let mut edit_allowed = use_signal(|| false);
    let filter = use_signal(CategoryFilter::default);
    let mut edit = use_signal(|| PinEditState::new(false));
    let mut modal = use_signal(ModalController::default);
    let mut show_intro = use_signal(|| true);

    let _loader = use_resource(move || async move {
        match api::fetch_stores().await {
            Ok(s) => stores.set(s),
            Err(e) => tracing::warn!(error = %e, "Failed to load stores"),
        }
        match api::fetch_pins().await {
            Ok(p) => pins.set(p),
            Err(e) => tracing::warn!(error = %e, "Failed to load pins"),
        }
        match api::fetch_edit_mode().await {
            Ok(enabled) => edit_allowed.set(enabled),
            Err(e) => tracing::warn!(error = %e, "Failed to read edit mode"),
        }
    });

    let open_store_info = move |pin_id: String| {
        let Some(pin) = pins.read().iter().find(|p| p.id == pin_id).cloned() else {
            return;
        };
        let ticket = modal.write().open(&pin, &stores.read());
        let Some(ticket) = ticket else {
            tracing::warn!(pin_id = %pin.id, store_id = %pin.store_id, "Pin references unknown store");
            return;
        };
        spawn(async move {
            let info = match api::fetch_store_info(&pin.id).await {
                Ok(info) => info,
                Err(e) => {
                    tracing::warn!(pin_id = %pin.id, error = %e, "Failed to load store info");
                    None
                }
            };
            if !modal.write().resolve(ticket, info) {
                tracing::debug!(pin_id = %pin.id, ticket, "Discarded stale store info");
            }
        });
    };

    let add_pin = move |placement: NewPinPlacement| {
        spawn(async move {
            match api::create_pin(placement.x, placement.y).await {
                Ok((pin, store)) => {
                    tracing::info!(pin_id = %pin.id, store_id = %store.id, "Created pin");
                    edit.write().open_editor(&pin.id, &store.id);
                    stores.write().push(store);
                    pins.write().push(pin);
                }
                Err(e) => tracing::warn!(error = %e, "Failed to create pin"),
            }
        });
    };

    let area = match &*area_resource.read() {
        Some(Ok(area)) => area.clone(),
        Some(Err(e)) => {
            return rsx! {
                div { class: "load-error", "地図を読み込めませんでした: {e}" }
            }
        }
        None => {
            return rsx! {
                div { class: "loading-screen", "ロード中..." }
            }
        }
    };

    rsx! {
        div { class: "app",
            MapView {
                area: area.clone(),
                pins: pins,
                stores: stores,
                filter: filter,
                edit: edit,
                on_pin_info: open_store_info,
                on_add_pin: add_pin,
            }

            div { class: "overlay-top-left",
                CategoryFilterPanel { area_name: area.name.clone(), filter: filter }
                if *edit_allowed.read() {
                    EditToolbar { edit: edit }
                    PinEditor { edit: edit, pins: pins, stores: stores }
                }
            }

            StoreModal { modal: modal }

            if *show_intro.read() {
                IntroDialog { on_complete: move |_| show_intro.set(false) }
            }
        }
    }
}
