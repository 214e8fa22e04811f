use dioxus::prelude::*;

use crate::gui::styles::theme::CssClasses;

/// カード共通の外枠（アイコン付きヘッダー + 本体）
#[component]
pub fn Card(title: String, icon: String, children: Element) -> Element {
    rsx! {
        div {
            class: CssClasses::CARD,

            div {
                class: CssClasses::CARD_HEADER,
                div { class: CssClasses::CARD_ICON, "{icon}" }
                h3 { class: CssClasses::CARD_TITLE, "{title}" }
            }

            {children}
        }
    }
}
