//! トリビア問題プール（アロンソ関連 8問）

use crate::error::{DashboardError, DashboardResult};
use crate::models::TriviaQuestion;

/// 1問あたりの選択肢数の範囲
const MIN_OPTIONS: usize = 2;
const MAX_OPTIONS: usize = 3;

/// 既定のトリビア問題プール
pub fn trivia_questions() -> Vec<TriviaQuestion> {
    vec![
        TriviaQuestion::new(
            "How many times has Fernando Alonso won the Monaco GP?",
            &["1 time", "2 times", "Never won"],
            "2 times",
            "Correct! Fernando won Monaco in 2006 and 2007 with Renault — iconic drives.",
            "Not quite! He won Monaco 2 times — in 2006 and 2007 with Renault.",
        ),
        TriviaQuestion::new(
            "Which car number has Fernando Alonso raced with most recently?",
            &["14", "8", "33"],
            "14",
            "Yes! Number 14 — a fan-favorite tied closely to his brand.",
            "It's 14 — the number most associated with Alonso in F1.",
        ),
        TriviaQuestion::new(
            "With which team did Alonso win his two F1 World Championships?",
            &["Ferrari", "Renault", "McLaren"],
            "Renault",
            "Correct! Back-to-back titles with Renault in 2005 and 2006.",
            "It was Renault — titles came in 2005 and 2006.",
        ),
        TriviaQuestion::new(
            "Which Triple Crown event has Alonso won outside F1?",
            &["Indy 500", "Le Mans 24 Hours", "Monaco GP"],
            "Le Mans 24 Hours",
            "Right! He won Le Mans twice with Toyota (2018, 2019).",
            "Le Mans — Alonso won it in 2018 and 2019 with Toyota.",
        ),
        TriviaQuestion::new(
            "What year did Alonso debut in Formula 1?",
            &["2001", "2003", "2005"],
            "2001",
            "Correct — he debuted in 2001 with Minardi.",
            "2001 — his F1 debut came with Minardi.",
        ),
        TriviaQuestion::new(
            "Which team did Alonso rejoin in 2023 to score frequent podiums?",
            &["Ferrari", "Aston Martin", "Alpine"],
            "Aston Martin",
            "Yes! Aston Martin — a blistering start to 2023 with multiple podiums.",
            "Aston Martin — he delivered podiums straight away in 2023.",
        ),
        TriviaQuestion::new(
            "How many F1 World Championships does Alonso have?",
            &["2", "3", "1"],
            "2",
            "Correct — two titles: 2005 and 2006.",
            "Two — 2005 and 2006 with Renault.",
        ),
        TriviaQuestion::new(
            "At which circuit did Alonso take his first F1 victory?",
            &["Hungaroring", "Monza", "Sepang"],
            "Hungaroring",
            "Correct — 2003 Hungarian GP with Renault.",
            "Hungaroring — he won there in 2003 for his first F1 victory.",
        ),
    ]
}

/// 問題プールの作成ミスを検出
///
/// 空のプール、選択肢数が2〜3でない問題、正解が選択肢に含まれない問題、
/// 重複した選択肢を持つ問題、同じ問題文の重複はエラー。
pub fn validate_trivia_pool(pool: &[TriviaQuestion]) -> DashboardResult<()> {
    if pool.is_empty() {
        return Err(DashboardError::invalid_content(
            "trivia pool",
            "pool has no questions",
        ));
    }

    for (index, question) in pool.iter().enumerate() {
        let context = format!("trivia question #{}", index + 1);

        if question.prompt.trim().is_empty() {
            return Err(DashboardError::invalid_content(context, "empty prompt"));
        }

        let count = question.options.len();
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&count) {
            return Err(DashboardError::invalid_content(
                context,
                format!(
                    "expected {}-{} options, found {}",
                    MIN_OPTIONS, MAX_OPTIONS, count
                ),
            ));
        }

        let correct_count = question
            .options
            .iter()
            .filter(|o| **o == question.correct_answer)
            .count();
        if correct_count != 1 {
            return Err(DashboardError::invalid_content(
                context,
                format!(
                    "correct answer '{}' must appear exactly once among the options",
                    question.correct_answer
                ),
            ));
        }

        let mut labels: Vec<&str> = question.options.iter().map(String::as_str).collect();
        labels.sort_unstable();
        labels.dedup();
        if labels.len() != count {
            return Err(DashboardError::invalid_content(context, "duplicate options"));
        }
    }

    let mut prompts: Vec<&str> = pool.iter().map(|q| q.prompt.as_str()).collect();
    prompts.sort_unstable();
    prompts.dedup();
    if prompts.len() != pool.len() {
        return Err(DashboardError::invalid_content(
            "trivia pool",
            "duplicate question prompts",
        ));
    }

    Ok(())
}
