//! トリビアエンジン
//!
//! 1ラウンドの流れ:
//! 未回答 → 回答して正誤を公開 → (フィードバック遅延) チャットへ結果を送信
//! → (待機) 別の問題で未回答ラウンドを開始

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use super::broadcaster::{DashboardEvent, EventBroadcaster};
use super::scheduler::{Scheduler, TaskKind};
use super::settings::TimingConfig;
use super::traits::BotMessageSink;
use crate::data::validate_trivia_pool;
use crate::error::DashboardResult;
use crate::models::TriviaQuestion;

/// `submit_answer` の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 回答を受け付けた
    Accepted { correct: bool },
    /// このラウンドは回答済み（二重送信）
    AlreadyRevealed,
    /// セッション終了後
    Inactive,
}

/// 現在のラウンド状態
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriviaRoundState {
    pub question_index: usize,
    pub selected_option: Option<String>,
    pub result_revealed: bool,
}

impl TriviaRoundState {
    fn unanswered(question_index: usize) -> Self {
        Self {
            question_index,
            selected_option: None,
            result_revealed: false,
        }
    }
}

/// トリビアの読み取り専用スナップショット
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriviaSnapshot {
    pub question: TriviaQuestion,
    pub round: TriviaRoundState,
    /// 公開済みの場合のみSome
    pub answered_correctly: Option<bool>,
    pub pool_size: usize,
    pub rounds_completed: u64,
}

/// 次の問題のインデックスを選ぶ
///
/// 一様に1つ引き、現在と同じ問題でプールが2問以上なら次のインデックスへずらす。
/// 空のプールでは0を返す。
pub(crate) fn pick_next_index<R: Rng>(
    rng: &mut R,
    pool: &[TriviaQuestion],
    current: usize,
) -> usize {
    let len = pool.len();
    if len == 0 {
        return 0;
    }

    let mut next = rng.gen_range(0..len);
    let repeated = pool
        .get(current)
        .is_some_and(|question| question.prompt == pool[next].prompt);
    if len > 1 && repeated {
        next = (next + 1) % len;
    }
    next
}

#[derive(Debug)]
struct TriviaState {
    round: TriviaRoundState,
    rng: StdRng,
    rounds_completed: u64,
}

struct TriviaInner {
    pool: Arc<[TriviaQuestion]>,
    state: Mutex<TriviaState>,
    sink: Arc<dyn BotMessageSink>,
    feedback_delay: Duration,
    rotate_delay: Duration,
    scheduler: Scheduler,
    events: EventBroadcaster,
}

impl TriviaInner {
    /// 新しい問題で未回答ラウンドを開始
    fn rotate(&self) {
        if self.scheduler.is_closed() {
            return;
        }

        let next_index = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            let next = pick_next_index(&mut state.rng, &self.pool, state.round.question_index);
            state.round = TriviaRoundState::unanswered(next);
            state.rounds_completed += 1;
            next
        };

        tracing::debug!("❓ [TRIVIA] Rotated to question #{}", next_index + 1);
        self.events.broadcast(DashboardEvent::TriviaRotated);
    }
}

/// トリビアエンジン
#[derive(Clone)]
pub struct TriviaEngine {
    inner: Arc<TriviaInner>,
}

impl std::fmt::Debug for TriviaEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriviaEngine")
            .field("pool_size", &self.inner.pool.len())
            .field("round", &self.inner.state.lock().round)
            .finish()
    }
}

impl TriviaEngine {
    /// 問題プールを検証し、ランダムな1問で開始
    pub fn new(
        pool: Vec<TriviaQuestion>,
        sink: Arc<dyn BotMessageSink>,
        timing: &TimingConfig,
        scheduler: Scheduler,
        events: EventBroadcaster,
        mut rng: StdRng,
    ) -> DashboardResult<Self> {
        validate_trivia_pool(&pool)?;

        let first = rng.gen_range(0..pool.len());
        tracing::debug!(
            "❓ [TRIVIA] Starting with question #{} of {}",
            first + 1,
            pool.len()
        );

        Ok(Self {
            inner: Arc::new(TriviaInner {
                pool: pool.into(),
                state: Mutex::new(TriviaState {
                    round: TriviaRoundState::unanswered(first),
                    rng,
                    rounds_completed: 0,
                }),
                sink,
                feedback_delay: timing.trivia_feedback_delay(),
                rotate_delay: timing.trivia_rotate_delay(),
                scheduler,
                events,
            }),
        })
    }

    /// 回答を送信
    ///
    /// 未回答のラウンドでのみ受け付ける。正解判定は正解文字列との完全一致。
    pub fn submit_answer(&self, option: &str) -> SubmitOutcome {
        if self.inner.scheduler.is_closed() {
            return SubmitOutcome::Inactive;
        }

        let (correct, feedback) = {
            let mut state = self.inner.state.lock();
            if state.round.result_revealed {
                tracing::debug!("❓ [TRIVIA] Ignoring answer, result already revealed");
                return SubmitOutcome::AlreadyRevealed;
            }

            let question = &self.inner.pool[state.round.question_index];
            let correct = question.is_correct(option);
            let feedback = question.feedback_for(option).to_string();

            state.round.selected_option = Some(option.to_string());
            state.round.result_revealed = true;
            (correct, feedback)
        };

        tracing::info!("❓ [TRIVIA] Answer '{}' submitted (correct: {})", option, correct);
        self.inner
            .events
            .broadcast(DashboardEvent::TriviaAnswered { correct });

        let sink = Arc::clone(&self.inner.sink);
        self.inner.scheduler.schedule_once(
            TaskKind::TriviaFeedback,
            self.inner.feedback_delay,
            move || sink.receive_bot_message(feedback),
        );

        let inner = Arc::clone(&self.inner);
        self.inner.scheduler.schedule_once(
            TaskKind::TriviaRotate,
            self.inner.rotate_delay,
            move || inner.rotate(),
        );

        SubmitOutcome::Accepted { correct }
    }

    pub fn current_question(&self) -> TriviaQuestion {
        let index = self.inner.state.lock().round.question_index;
        self.inner.pool[index].clone()
    }

    pub fn round(&self) -> TriviaRoundState {
        self.inner.state.lock().round.clone()
    }

    pub fn pool(&self) -> &[TriviaQuestion] {
        &self.inner.pool
    }

    pub fn snapshot(&self) -> TriviaSnapshot {
        let state = self.inner.state.lock();
        let question = self.inner.pool[state.round.question_index].clone();
        let answered_correctly = if state.round.result_revealed {
            state
                .round
                .selected_option
                .as_deref()
                .map(|option| question.is_correct(option))
        } else {
            None
        };

        TriviaSnapshot {
            question,
            round: state.round.clone(),
            answered_correctly,
            pool_size: self.inner.pool.len(),
            rounds_completed: state.rounds_completed,
        }
    }
}
