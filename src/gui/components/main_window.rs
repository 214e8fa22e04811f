use dioxus::prelude::*;
use std::sync::Arc;

use crate::data::StaticTables;
use crate::engine::DashboardSession;
use crate::gui::{
    components::{
        ChatbotPanel, FanActivityCard, Footer, Header, PollCard, RewardProgressCard,
        TelemetryCard, TriviaCard,
    },
    hooks::use_dashboard_provider,
    styles::theme::{get_embedded_css, CssClasses},
};

/// メインウィンドウコンポーネント
///
/// 3カラム構成: ファンアクティビティ・テレメトリ / トリビア・投票・リワード / チャット
#[component]
pub fn MainWindow() -> Element {
    let session = use_context::<Arc<DashboardSession>>();
    let dashboard = use_dashboard_provider(session);
    use_context_provider(StaticTables::load);

    tracing::trace!(
        "🖥️ MainWindow: Rendering ({} chat messages)",
        dashboard.snapshot.read().chat.messages.len()
    );

    rsx! {
        // CSSスタイルをdocument headに注入
        document::Style {
            {get_embedded_css()}
        }

        div {
            class: CssClasses::MAIN_WINDOW,

            Header {}

            div {
                class: CssClasses::DASHBOARD_GRID,

                div {
                    class: CssClasses::LEFT_COLUMN,
                    FanActivityCard {}
                    TelemetryCard {}
                }

                div {
                    class: CssClasses::CENTER_COLUMN,
                    TriviaCard {}
                    PollCard {}
                    RewardProgressCard {}
                }

                ChatbotPanel {}
            }

            Footer {}
        }
    }
}
