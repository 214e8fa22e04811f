use dioxus::prelude::*;

use crate::engine::VoteOutcome;
use crate::gui::{components::Card, hooks::use_dashboard, styles::theme::CssClasses};

/// ファン投票カード
///
/// 選択肢ごとに得票率の横棒を表示する。投票はセッションにつき1回。
#[component]
pub fn PollCard() -> Element {
    let dashboard = use_dashboard();
    let poll = dashboard.snapshot.read().poll.clone();
    let bar_style = if poll.has_voted { "cursor: default;" } else { "" };

    rsx! {
        Card {
            title: "Fan Poll".to_string(),
            icon: "🗳️".to_string(),

            p {
                style: "font-size: 0.875rem; color: rgba(255,255,255,0.8); margin: 0 0 12px 0;",
                "{poll.question}"
            }

            for (index, option) in poll.options.iter().cloned().enumerate() {
                div {
                    key: "{option.label}",
                    class: CssClasses::POLL_BAR,
                    style: bar_style,
                    onclick: {
                        let dashboard = dashboard.clone();
                        move |_| {
                            if dashboard.vote(index) == VoteOutcome::Recorded {
                                tracing::info!("🗳️ Voted for option {}", index);
                            }
                        }
                    },

                    div {
                        class: CssClasses::POLL_BAR_FILL,
                        style: "width: {option.percentage}%;",
                    }
                    div {
                        style: "position: absolute; inset: 0; display: flex; justify-content: space-between; align-items: center; padding: 0 10px; font-size: 0.875rem;",
                        span { "{option.label}" }
                        span { {option.percentage_label()} }
                    }
                }
            }
        }
    }
}
