use dioxus::prelude::*;

use crate::data::StaticTables;
use crate::gui::styles::theme::CssClasses;

/// ダッシュボードヘッダー
///
/// タイトルと次戦（モナコGP）の情報を表示する。
#[component]
pub fn Header() -> Element {
    let tables = use_context::<StaticTables>();
    let monaco = &tables.monaco;

    rsx! {
        header {
            class: CssClasses::APP_HEADER,

            h1 { class: CssClasses::APP_TITLE, "The Ai.lonso Fan Dashboard" }
            p {
                class: CssClasses::APP_SUBTITLE,
                "A unified home where Ai.lonso connects fans, content, and community."
            }

            div {
                span { class: CssClasses::INFO_PILL, "Next: Monaco GP • {monaco.date}" }
                span {
                    class: CssClasses::INFO_PILL,
                    "Alonso P{monaco.driver.position} • Stroll P{monaco.teammate_position}"
                }
            }
        }
    }
}

/// ダッシュボードフッター
#[component]
pub fn Footer() -> Element {
    rsx! {
        footer {
            class: CssClasses::APP_FOOTER,
            "Your digital pit wall, wherever you are."
        }
    }
}
