use dioxus::prelude::*;
use tastemap_shared::category::CategoryFilter;
use tastemap_shared::models::Category;

/// Inline style for a filter chip: filled with the category colour when selected.
fn chip_style(category: Category, selected: bool) -> String {
    if selected {
        format!("background: {0}; border-color: {0}; color: #fff;", category.color())
    } else {
        format!("border-color: {};", category.color())
    }
}

#[component]
pub fn CategoryFilterPanel(area_name: String, filter: Signal<CategoryFilter>) -> Element {
    let mut filter = filter;

    rsx! {
        div { class: "panel filter-panel",
            div { class: "panel-section",
                h3 { "エリア" }
                span { class: "area-chip", "{area_name}" }
            }
            div { class: "panel-section",
                h3 { "カテゴリフィルター" }
                div { class: "chip-row",
                    for category in Category::ALL {
                        button {
                            key: "{category}",
                            class: "category-chip",
                            style: chip_style(category, filter.read().contains(category)),
                            onclick: move |_| filter.write().toggle(category),
                            span { "{category.emoji()}" }
                            span { "{category.label()}" }
                        }
                    }
                }
            }
        }
    }
}
