use dioxus::prelude::*;

use crate::data::StaticTables;
use crate::gui::{components::Card, styles::theme::CssClasses};

/// リワード進捗カード
#[component]
pub fn RewardProgressCard() -> Element {
    let tables = use_context::<StaticTables>();
    let reward = tables.reward.clone();

    rsx! {
        Card {
            title: "Reward Progress".to_string(),
            icon: "🏆".to_string(),

            div {
                style: "display: flex; justify-content: space-between; font-size: 0.875rem; margin-bottom: 4px;",
                span { "{reward.tier}" }
                span { "{reward.percent}%" }
            }
            div {
                class: CssClasses::PROGRESS_TRACK,
                div {
                    class: CssClasses::PROGRESS_FILL,
                    style: "width: {reward.percent}%;",
                }
            }

            p {
                style: "font-size: 0.75rem; color: rgba(255,255,255,0.6);",
                "Stay active to earn badges, exclusive merch, and recognition."
            }

            div {
                style: "display: grid; grid-template-columns: 1fr 1fr; gap: 8px; font-size: 10px;",
                StatTile { label: "Constructor".to_string(), value: reward.constructor_summary.clone() }
                StatTile { label: "Best Finish".to_string(), value: reward.best_finish.clone() }
            }
        }
    }
}

/// ラベルと値の小さなタイル
#[component]
pub fn StatTile(label: String, value: String) -> Element {
    rsx! {
        div {
            style: "background: #050505; border: 1px solid rgba(0,176,169,0.1); border-radius: 4px; padding: 6px; text-align: center;",
            div { style: "color: #00C39A; font-weight: 600;", "{label}" }
            div { style: "color: rgba(255,255,255,0.8);", "{value}" }
        }
    }
}
