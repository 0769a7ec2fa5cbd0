use dioxus::prelude::*;
use tastemap_shared::pin_edit::PinEditState;

#[component]
pub fn EditToolbar(edit: Signal<PinEditState>) -> Element {
    let mut edit = edit;
    let state = edit.read().clone();

    rsx! {
        div { class: "edit-toolbar",
            button {
                class: if state.edit_mode() { "mode-toggle editing" } else { "mode-toggle" },
                onclick: move |_| edit.write().toggle_edit_mode(),
                if state.edit_mode() { "編集モード" } else { "プレビューモード" }
            }
            if state.edit_mode() {
                div { class: "toolbar-row",
                    button {
                        class: if state.adding() { "add-pin active" } else { "add-pin" },
                        onclick: move |_| edit.write().toggle_adding(),
                        if state.adding() { "ピン追加中..." } else { "ピンを追加" }
                    }
                    if state.adding() {
                        div { class: "add-hint", "地図をクリックしてピンを配置" }
                    }
                }
            }
        }
    }
}
