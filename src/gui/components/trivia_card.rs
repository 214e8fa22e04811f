use dioxus::prelude::*;

use crate::engine::SubmitOutcome;
use crate::gui::{
    components::Card,
    hooks::use_dashboard,
    styles::theme::get_trivia_option_class,
};

/// トリビアチャレンジカード
///
/// 回答後は正誤を色で示し、一定時間後に次の問題へ切り替わる。
#[component]
pub fn TriviaCard() -> Element {
    let dashboard = use_dashboard();
    let trivia = dashboard.snapshot.read().trivia.clone();
    let revealed = trivia.round.result_revealed;
    let correct_answer = trivia.question.correct_answer.clone();

    rsx! {
        Card {
            title: "Trivia Challenge".to_string(),
            icon: "❓".to_string(),

            p {
                style: "font-size: 0.875rem; color: rgba(255,255,255,0.8); margin: 0 0 12px 0;",
                "{trivia.question.prompt}"
            }

            for option in trivia.question.options.clone() {
                button {
                    key: "{option}",
                    class: get_trivia_option_class(&option, &correct_answer, &trivia.round),
                    disabled: revealed,
                    onclick: {
                        let dashboard = dashboard.clone();
                        let option = option.clone();
                        move |_| {
                            if let SubmitOutcome::Accepted { correct } = dashboard.submit_answer(&option) {
                                tracing::info!("❓ Trivia answered '{}' (correct: {})", option, correct);
                            }
                        }
                    },
                    "{option}"
                }
            }
        }
    }
}
