//! 投票エンジン
//!
//! セッションにつき1票。投票後は票数を一切変更しない。

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use super::broadcaster::{DashboardEvent, EventBroadcaster};
use super::scheduler::{Scheduler, TaskKind};
use super::settings::{ScriptConfig, TimingConfig};
use super::traits::BotMessageSink;
use crate::data::validate_poll_options;
use crate::error::DashboardResult;
use crate::models::PollOption;

/// `vote` の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// 票を記録した
    Recorded,
    /// このセッションでは投票済み
    AlreadyVoted,
    /// 範囲外のインデックス（票は消費しない）
    OutOfRange,
    /// セッション終了後
    Inactive,
}

/// 得票率（%）。総票数0なら0
pub fn vote_percentage(votes: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    votes as f64 / total as f64 * 100.0
}

/// 表示用に小数第1位まで整形（例: "45.5%"）
pub fn format_percentage(percentage: f64) -> String {
    format!("{:.1}%", percentage)
}

/// 描画用の選択肢
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollOptionView {
    pub label: String,
    pub votes: u32,
    pub percentage: f64,
}

impl PollOptionView {
    pub fn percentage_label(&self) -> String {
        format_percentage(self.percentage)
    }
}

/// 投票の読み取り専用スナップショット
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollSnapshot {
    pub question: String,
    pub options: Vec<PollOptionView>,
    pub total_votes: u32,
    pub has_voted: bool,
    pub voted_index: Option<usize>,
}

#[derive(Debug)]
struct PollState {
    options: Vec<PollOption>,
    voted_index: Option<usize>,
}

impl PollState {
    fn total_votes(&self) -> u32 {
        self.options.iter().map(|o| o.votes).sum()
    }
}

struct PollInner {
    question: String,
    ack_message: String,
    ack_delay: Duration,
    state: Mutex<PollState>,
    sink: Arc<dyn BotMessageSink>,
    scheduler: Scheduler,
    events: EventBroadcaster,
}

/// 投票エンジン
#[derive(Clone)]
pub struct PollEngine {
    inner: Arc<PollInner>,
}

impl std::fmt::Debug for PollEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollEngine")
            .field("question", &self.inner.question)
            .field("state", &*self.inner.state.lock())
            .finish()
    }
}

impl PollEngine {
    pub fn new(
        options: Vec<PollOption>,
        script: &ScriptConfig,
        timing: &TimingConfig,
        sink: Arc<dyn BotMessageSink>,
        scheduler: Scheduler,
        events: EventBroadcaster,
    ) -> DashboardResult<Self> {
        validate_poll_options(&options)?;

        Ok(Self {
            inner: Arc::new(PollInner {
                question: script.poll_question.clone(),
                ack_message: script.poll_ack_message.clone(),
                ack_delay: timing.poll_ack_delay(),
                state: Mutex::new(PollState {
                    options,
                    voted_index: None,
                }),
                sink,
                scheduler,
                events,
            }),
        })
    }

    /// 投票
    ///
    /// 未投票かつ範囲内のインデックスのみ受け付け、票を1つ加算して投票済みにする。
    /// 遅延後にお礼メッセージをチャットへ送る。
    pub fn vote(&self, index: usize) -> VoteOutcome {
        if self.inner.scheduler.is_closed() {
            return VoteOutcome::Inactive;
        }

        {
            let mut state = self.inner.state.lock();
            if state.voted_index.is_some() {
                tracing::debug!("🗳️ [POLL] Already voted, ignoring index {}", index);
                return VoteOutcome::AlreadyVoted;
            }
            let Some(option) = state.options.get_mut(index) else {
                tracing::warn!("🗳️ [POLL] Option index {} out of range", index);
                return VoteOutcome::OutOfRange;
            };
            option.votes += 1;
            state.voted_index = Some(index);
        }

        tracing::info!("🗳️ [POLL] Vote recorded for option {}", index);
        self.inner.events.broadcast(DashboardEvent::PollVoted { index });

        let sink = Arc::clone(&self.inner.sink);
        let message = self.inner.ack_message.clone();
        self.inner.scheduler.schedule_once(
            TaskKind::PollAck,
            self.inner.ack_delay,
            move || sink.receive_bot_message(message),
        );

        VoteOutcome::Recorded
    }

    pub fn has_voted(&self) -> bool {
        self.inner.state.lock().voted_index.is_some()
    }

    pub fn options(&self) -> Vec<PollOption> {
        self.inner.state.lock().options.clone()
    }

    pub fn total_votes(&self) -> u32 {
        self.inner.state.lock().total_votes()
    }

    /// 選択肢の得票率。範囲外はNone
    pub fn percentage(&self, index: usize) -> Option<f64> {
        let state = self.inner.state.lock();
        let total = state.total_votes();
        state
            .options
            .get(index)
            .map(|option| vote_percentage(option.votes, total))
    }

    pub fn snapshot(&self) -> PollSnapshot {
        let state = self.inner.state.lock();
        let total = state.total_votes();
        PollSnapshot {
            question: self.inner.question.clone(),
            options: state
                .options
                .iter()
                .map(|option| PollOptionView {
                    label: option.label.clone(),
                    votes: option.votes,
                    percentage: vote_percentage(option.votes, total),
                })
                .collect(),
            total_votes: total,
            has_voted: state.voted_index.is_some(),
            voted_index: state.voted_index,
        }
    }
}
