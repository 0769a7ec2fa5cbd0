use dioxus::logger::tracing;
use dioxus::prelude::*;
use tastemap_shared::modal::{ModalController, ModalState};
use tastemap_shared::models::{ReactionCounts, ReactionKind, ResolvedStoreInfo};

use crate::api;

fn open_store_id(modal: &ModalController) -> Option<String> {
    match modal.state() {
        ModalState::Open { info, .. } => Some(info.store_id.clone()),
        _ => None,
    }
}

/// Label/value rows for the non-empty detail fields, in display order.
fn detail_rows(info: &ResolvedStoreInfo) -> Vec<(&'static str, String)> {
    let budget = if info.budget.is_empty() {
        info.price.clone()
    } else {
        info.budget.clone()
    };
    [
        ("住所", info.address.clone()),
        ("電話", info.phone.clone()),
        ("ジャンル", info.genre.clone()),
        ("営業時間", info.opening_hours.join(" / ")),
        ("定休日", info.holiday.clone()),
        ("アクセス", info.access.clone()),
        ("予算", budget),
        ("駐車場", info.parking.clone()),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .collect()
}

/// Emoji run and "辛さ n/5" text, when the store has a taste level.
fn level_display(info: &ResolvedStoreInfo) -> Option<(String, String)> {
    let taste = info.taste?;
    if info.level == 0 {
        return None;
    }
    Some((taste.render_level(info.level), taste.level_text(info.level)))
}

fn rating_text(info: &ResolvedStoreInfo) -> Option<String> {
    (info.rating > 0.0).then(|| format!("★ {:.1} ({}件)", info.rating, info.review_count))
}

#[component]
pub fn StoreModal(modal: Signal<ModalController>) -> Element {
    let mut modal = modal;
    let mut reactions = use_signal(ReactionCounts::default);

    let _reaction_loader = use_resource(move || {
        let store_id = open_store_id(&modal.read());
        async move {
            let Some(store_id) = store_id else { return };
            reactions.set(ReactionCounts::default());
            match api::fetch_reactions(&store_id).await {
                Ok(counts) => reactions.set(counts),
                Err(e) => tracing::warn!(store_id = %store_id, error = %e, "Failed to load reactions"),
            }
        }
    });

    let react = move |store_id: String, kind: ReactionKind| {
        spawn(async move {
            match api::react(&store_id, kind).await {
                Ok(count) => {
                    let mut counts = reactions.write();
                    match kind {
                        ReactionKind::Like => counts.like = count,
                        ReactionKind::Bad => counts.bad = count,
                    }
                }
                Err(e) => {
                    tracing::warn!(store_id = %store_id, kind = kind.as_str(), error = %e, "Reaction failed")
                }
            }
        });
    };

    let state = modal.read().state().clone();
    let info = match state {
        ModalState::Closed => return rsx! {},
        ModalState::Loading { .. } => None,
        ModalState::Open { info, .. } => Some(info),
    };
    let counts = *reactions.read();

    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| modal.write().close(),

            div {
                class: "retro-modal store-modal",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),

                if let Some(info) = info {
                    h2 { class: "store-name", "{info.name}" }

                    if !info.catch_copy.is_empty() {
                        p { class: "catch-copy", "{info.catch_copy}" }
                    }

                    if !info.description.is_empty() {
                        div { class: "modal-section",
                            h3 { "店舗情報" }
                            p { "{info.description}" }
                        }
                    }

                    div { class: "modal-section detail-rows",
                        for (label, value) in detail_rows(&info) {
                            div { class: "detail-row",
                                span { class: "detail-label", "{label}:" }
                                span { "{value}" }
                            }
                        }
                        if let Some((emoji, text)) = level_display(&info) {
                            div { class: "detail-row",
                                span { class: "detail-label", "レベル:" }
                                span { class: "level-emoji", "{emoji}" }
                                span { "({text})" }
                            }
                        }
                        if let Some(rating) = rating_text(&info) {
                            div { class: "detail-row",
                                span { class: "detail-label", "評価:" }
                                span { "{rating}" }
                            }
                        }
                        if !info.map_url.is_empty() {
                            div { class: "detail-row",
                                span { class: "detail-label", "地図:" }
                                a { href: "{info.map_url}", target: "_blank", rel: "noopener noreferrer", "Google Mapで開く" }
                            }
                        }
                        if !info.website.is_empty() {
                            div { class: "detail-row",
                                span { class: "detail-label", "Web:" }
                                a { href: "{info.website}", target: "_blank", rel: "noopener noreferrer", "公式サイト" }
                            }
                        }
                    }

                    div { class: "modal-section reactions",
                        h3 { "みんなの評価" }
                        div { class: "reaction-row",
                            button {
                                class: "retro-button",
                                onclick: {
                                    let store_id = info.store_id.clone();
                                    move |_| react(store_id.clone(), ReactionKind::Like)
                                },
                                "👍 {counts.like} いいね"
                            }
                            button {
                                class: "retro-button",
                                onclick: {
                                    let store_id = info.store_id.clone();
                                    move |_| react(store_id.clone(), ReactionKind::Bad)
                                },
                                "👎 {counts.bad} イマイチ"
                            }
                        }
                    }
                } else {
                    p { class: "modal-loading", "ロード中..." }
                }

                button {
                    class: "close-modal",
                    onclick: move |_| modal.write().close(),
                    "閉じる"
                }
            }
        }
    }
}
