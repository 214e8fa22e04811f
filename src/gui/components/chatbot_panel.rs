use dioxus::prelude::*;

use crate::gui::{
    components::DriverStatsCard,
    hooks::use_dashboard,
    styles::theme::{get_button_class, get_message_class, CssClasses},
    utils::format_clock,
};
use crate::models::{ChatMessage, Sender};

/// Ai.lonso チャットパネル
///
/// ドライバー成績・メッセージ一覧・入力中インジケーター・入力欄。
/// Enterキーまたは送信ボタンで下書きを送信する。
#[component]
pub fn ChatbotPanel() -> Element {
    let dashboard = use_dashboard();
    let chat = dashboard.snapshot.read().chat.clone();
    let can_send = !chat.draft.trim().is_empty();

    let send = {
        let dashboard = dashboard.clone();
        move || {
            if let Some(id) = dashboard.send_draft() {
                tracing::debug!("💬 Sent chat message {}", id);
            }
        }
    };

    rsx! {
        div {
            class: CssClasses::RIGHT_COLUMN,

            DriverStatsCard {}

            div {
                class: format!("{} {}", CssClasses::CARD, CssClasses::CHAT_PANEL),

                div {
                    class: CssClasses::CARD_HEADER,
                    div { class: CssClasses::CARD_ICON, style: "border-radius: 50%;", "Ai" }
                    div {
                        h3 { class: CssClasses::CARD_TITLE, "Ai.lonso" }
                        span { style: "font-size: 10px; color: #00C39A;", "● Online" }
                    }
                }

                div {
                    class: CssClasses::MESSAGE_LIST,
                    for message in chat.messages {
                        ChatBubble { key: "{message.id}", message: message.clone() }
                    }
                    if chat.is_typing {
                        div {
                            class: format!("{} {}", get_message_class(Sender::Bot), CssClasses::TYPING_INDICATOR),
                            span {}
                            span {}
                            span {}
                        }
                    }
                }

                div {
                    style: "display: flex; gap: 8px; margin-top: 12px;",
                    input {
                        class: CssClasses::CHAT_INPUT,
                        r#type: "text",
                        placeholder: "Ask Ai.lonso anything…",
                        value: "{chat.draft}",
                        oninput: {
                            let dashboard = dashboard.clone();
                            move |event: FormEvent| dashboard.set_draft(event.value())
                        },
                        onkeydown: {
                            let send = send.clone();
                            move |event: KeyboardEvent| {
                                if event.key() == Key::Enter {
                                    send();
                                }
                            }
                        },
                    }
                    button {
                        class: get_button_class(!can_send),
                        disabled: !can_send,
                        onclick: {
                            let send = send.clone();
                            move |_| send()
                        },
                        "Send"
                    }
                }
            }
        }
    }
}

#[component]
fn ChatBubble(message: ChatMessage) -> Element {
    let time = format_clock(&message.created_at);

    rsx! {
        div {
            class: get_message_class(message.sender),
            p { style: "margin: 0;", "{message.text}" }
            span { style: "font-size: 9px; opacity: 0.5;", "{time}" }
        }
    }
}
