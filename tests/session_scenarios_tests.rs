//! セッションのシナリオテスト
//!
//! 仮想時間（start_paused）でタイマーを進め、チャット・トリビア・投票・
//! ファンアクティビティの連携を確認する。

use ailonso::data::{default_poll_options, initial_fan_activities, trivia_questions};
use ailonso::engine::MAX_VISIBLE_ACTIVITIES;
use ailonso::models::{PollOption, Sender, TriviaQuestion};
use ailonso::{DashboardEvent, DashboardSession, SessionOptions, SubmitOutcome, VoteOutcome};
use std::time::Duration;

fn create_session(seed: u64) -> DashboardSession {
    DashboardSession::new(SessionOptions::default().with_seed(seed)).unwrap()
}

/// 最初の問題がモナコの問題になるシードでセッションを作成
fn create_session_on_monaco_question() -> DashboardSession {
    (0..1_000)
        .map(create_session)
        .find(|session| {
            session
                .trivia()
                .current_question()
                .prompt
                .contains("Monaco GP")
        })
        .expect("some seed starts on the Monaco question")
}

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[cfg(test)]
mod chat_scenarios {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_hi_gets_exactly_one_reply() {
        let session = create_session(1);

        session.send_user_message("hi");
        let messages = session.chat().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].sender, Sender::User);
        assert_eq!(messages[1].text, "hi");

        advance(2_001).await;
        assert_eq!(session.chat().len(), 3);

        // それ以上は追加されない
        advance(10_000).await;
        assert_eq!(session.chat().len(), 3);
        assert_eq!(session.chat().messages()[2].sender, Sender::Bot);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_message_leaves_transcript_unchanged() {
        let session = create_session(2);
        let before = session.chat().messages();

        assert_eq!(session.send_user_message(""), None);
        advance(5_000).await;

        assert_eq!(session.chat().messages(), before);
        assert!(!session.chat().is_typing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_messages_appended_in_expiry_order() {
        let session = create_session(3);

        // t=0 のユーザー発言（返信は2000ms後）
        session.send_user_message("Who wins Monaco?");
        advance(100).await;
        // t=100 の注入（1500ms後 = t=1600）
        session.receive_bot_message("injected first");

        advance(2_000).await;
        let texts: Vec<String> = session
            .chat()
            .messages()
            .into_iter()
            .map(|m| m.text)
            .collect();
        assert_eq!(texts.len(), 4);
        assert_eq!(texts[2], "injected first");
        assert!(texts[3].starts_with("Great question!"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_message_ids_are_unique_and_increasing() {
        let session = create_session(4);
        for text in ["one", "two", "three"] {
            session.send_user_message(text);
            advance(300).await;
        }
        advance(3_000).await;

        let ids: Vec<u64> = session.chat().messages().iter().map(|m| m.id.0).collect();
        assert_eq!(ids.len(), 7);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transcript_grows_by_produced_messages() {
        let session = create_session(5);
        let initial = session.chat().len();

        // ユーザー発言2件（各2件）+ 投票1件 + トリビア回答1件
        session.send_user_message("first");
        session.send_user_message("second");
        assert_eq!(session.vote(1), VoteOutcome::Recorded);
        let question = session.trivia().current_question();
        session.submit_answer(&question.options[0]);

        advance(5_000).await;
        assert_eq!(session.chat().len(), initial + 6);
        assert!(!session.chat().is_typing());
    }
}

#[cfg(test)]
mod trivia_scenarios {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_monaco_answer_and_rotation() {
        let session = create_session_on_monaco_question();
        let question = session.trivia().current_question();

        assert_eq!(
            session.submit_answer("2 times"),
            SubmitOutcome::Accepted { correct: true }
        );
        assert_eq!(session.submit_answer("Never won"), SubmitOutcome::AlreadyRevealed);

        // フィードバック500ms + ボット発言1500ms
        advance(2_001).await;
        let last = session.chat().messages().pop().unwrap();
        assert_eq!(last.sender, Sender::Bot);
        assert!(last.text.contains("2006 and 2007"));

        // 回答から2500msで次の問題
        advance(500).await;
        let snapshot = session.snapshot();
        assert_ne!(snapshot.trivia.question.prompt, question.prompt);
        assert!(!snapshot.trivia.round.result_revealed);
        assert_eq!(snapshot.trivia.round.selected_option, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wrong_answer_sends_incorrect_message() {
        let session = create_session_on_monaco_question();

        assert_eq!(
            session.submit_answer("Never won"),
            SubmitOutcome::Accepted { correct: false }
        );
        advance(2_001).await;

        let last = session.chat().messages().pop().unwrap();
        assert!(last.text.starts_with("Not quite!"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_many_rounds_never_repeat_consecutively() {
        let session = create_session(8);
        let mut previous = session.trivia().current_question().prompt;

        for _ in 0..20 {
            let question = session.trivia().current_question();
            session.submit_answer(&question.correct_answer);
            advance(2_501).await;

            let current = session.trivia().current_question().prompt;
            assert_ne!(current, previous);
            previous = current;
        }
        assert_eq!(session.snapshot().trivia.rounds_completed, 20);
    }

    #[test]
    fn test_malformed_pool_rejected() {
        let broken = vec![TriviaQuestion::new(
            "Which?",
            &["A", "B", "C"],
            "D",
            "yes",
            "no",
        )];
        let result = DashboardSession::with_content(
            SessionOptions::default(),
            broken,
            default_poll_options(),
            initial_fan_activities(),
        );
        assert!(result.is_err());
    }
}

#[cfg(test)]
mod poll_scenarios {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_vote_once_per_session() {
        let session = create_session(9);

        assert_eq!(session.vote(0), VoteOutcome::Recorded);
        let after_first: Vec<u32> = session.poll().options().iter().map(|o| o.votes).collect();
        assert_eq!(after_first, vec![46, 23, 32]);

        assert_eq!(session.vote(1), VoteOutcome::AlreadyVoted);
        assert_eq!(session.vote(2), VoteOutcome::AlreadyVoted);
        let after_more: Vec<u32> = session.poll().options().iter().map(|o| o.votes).collect();
        assert_eq!(after_more, after_first);

        let snapshot = session.snapshot();
        assert!(snapshot.poll.has_voted);
        assert_eq!(snapshot.poll.options[0].percentage_label(), "45.5%");
        let yes = session.poll().percentage(0).unwrap();
        assert!((yes - 46.0 / 101.0 * 100.0).abs() < 1e-9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_poll_options() {
        let session = DashboardSession::with_content(
            SessionOptions::default().with_seed(1),
            trivia_questions(),
            vec![PollOption::new("Alonso", 0), PollOption::new("Stroll", 0)],
            initial_fan_activities(),
        )
        .unwrap();

        assert_eq!(session.poll().percentage(0), Some(0.0));
        session.vote(1);
        assert_eq!(session.poll().percentage(1), Some(100.0));
    }
}

#[cfg(test)]
mod fan_activity_scenarios {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_list_capped_and_newest_first() {
        let session = create_session(10);
        assert!(session.start());

        let mut last_newest = session.fan_activity().activities()[0].id;
        for _ in 0..8 {
            advance(10_000).await;
            let activities = session.fan_activity().activities();
            assert!(activities.len() <= MAX_VISIBLE_ACTIVITIES);
            assert!(activities[0].id > last_newest);
            last_newest = activities[0].id;
        }

        // 初期データはすべて押し出され、生成分のみが新しい順に並ぶ
        let activities = session.fan_activity().activities();
        assert_eq!(activities.len(), MAX_VISIBLE_ACTIVITIES);
        assert!(activities.windows(2).all(|w| w[0].id > w[1].id));
        assert!(activities.iter().all(|a| a.id.0 > 3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_seed_generates_same_fans() {
        let first = create_session(11);
        let second = create_session(11);
        first.start();
        second.start();

        advance(30_001).await;

        let names = |session: &DashboardSession| -> Vec<(String, u32)> {
            session
                .fan_activity()
                .activities()
                .into_iter()
                .map(|a| (a.name, a.points))
                .collect()
        };
        assert_eq!(names(&first), names(&second));
    }
}

#[cfg(test)]
mod lifecycle_scenarios {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_pending_replies() {
        let session = create_session(12);
        session.start();
        session.send_user_message("hello?");
        session.vote(0);
        let before = session.chat().len();

        session.shutdown();
        advance(60_000).await;

        assert_eq!(session.chat().len(), before);
        assert_eq!(session.scheduler_stats().active_tasks, 0);
        assert!(session.snapshot().closed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_are_broadcast() {
        let session = create_session(13);
        let mut receiver = session.subscribe();

        session.set_draft("hi");
        session.send_draft();
        advance(2_001).await;

        let mut events = Vec::new();
        while let Ok(event) = receiver.try_recv() {
            events.push(event);
        }

        assert!(events.contains(&DashboardEvent::DraftChanged));
        assert!(events.contains(&DashboardEvent::TypingChanged(true)));
        assert!(events.contains(&DashboardEvent::TypingChanged(false)));
        let appended = events
            .iter()
            .filter(|e| matches!(e, DashboardEvent::ChatMessageAppended { .. }))
            .count();
        assert_eq!(appended, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_shuts_down_session() {
        let session = create_session(14);
        let chat = session.chat().clone();
        session.send_user_message("bye");
        drop(session);

        advance(5_000).await;
        assert_eq!(chat.len(), 2);
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let session = create_session(15);
        let json = serde_json::to_value(session.snapshot()).unwrap();

        assert_eq!(json["chat"]["messages"][0]["sender"], "bot");
        assert_eq!(json["poll"]["total_votes"], 100);
        assert_eq!(json["fan_activity"].as_array().unwrap().len(), 3);
    }
}
