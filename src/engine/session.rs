//! ダッシュボードセッション
//!
//! 全エンジンを1つのスケジューラ・ブロードキャスターで束ねるコントローラー。
//! 描画層はこのセッションをコンテキスト経由で受け取り、書き込みは
//! ここのエントリーポイントから、読み取りは [`DashboardSnapshot`] から行う。

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

use super::broadcaster::{DashboardEvent, EventBroadcaster};
use super::chat::{ChatEngine, ChatSnapshot};
use super::fan_activity::FanActivitySimulator;
use super::poll::{PollEngine, PollSnapshot, VoteOutcome};
use super::scheduler::{Scheduler, SchedulerStats};
use super::settings::{ScriptConfig, TimingConfig};
use super::traits::BotMessageSink;
use super::trivia::{SubmitOutcome, TriviaEngine, TriviaSnapshot};
use crate::data::{default_poll_options, initial_fan_activities, trivia_questions};
use crate::error::DashboardResult;
use crate::models::{FanActivityEvent, MessageId, PollOption, TriviaQuestion};

// エンジンごとに乱数列を分けるためのソルト
const TRIVIA_RNG_SALT: u64 = 0x7472_6976_6961;
const FAN_RNG_SALT: u64 = 0x0066_616e_7321;

/// セッション作成オプション
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub timing: TimingConfig,
    pub script: ScriptConfig,
    /// 指定時は乱数を決定的にする
    pub seed: Option<u64>,
}

impl SessionOptions {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> DashboardResult<()> {
        self.timing.validate()?;
        self.script.validate()
    }

    fn rng(&self, salt: u64) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ salt),
            None => StdRng::from_entropy(),
        }
    }
}

/// セッション全体の読み取り専用スナップショット
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub chat: ChatSnapshot,
    pub trivia: TriviaSnapshot,
    pub poll: PollSnapshot,
    /// 新しい順
    pub fan_activity: Vec<FanActivityEvent>,
    pub closed: bool,
}

/// ダッシュボードセッション
///
/// ドロップ時に [`DashboardSession::shutdown`] を行う。
#[derive(Debug)]
pub struct DashboardSession {
    scheduler: Scheduler,
    events: EventBroadcaster,
    chat: ChatEngine,
    trivia: TriviaEngine,
    poll: PollEngine,
    fan_activity: FanActivitySimulator,
    closed: AtomicBool,
}

impl DashboardSession {
    /// 組み込みのトリビア・投票・ファンアクティビティで作成
    pub fn new(options: SessionOptions) -> DashboardResult<Self> {
        Self::with_content(
            options,
            trivia_questions(),
            default_poll_options(),
            initial_fan_activities(),
        )
    }

    /// 任意のコンテンツで作成。不備があれば [`crate::DashboardError::InvalidContent`]
    pub fn with_content(
        options: SessionOptions,
        trivia_pool: Vec<TriviaQuestion>,
        poll_options: Vec<PollOption>,
        fan_activities: Vec<FanActivityEvent>,
    ) -> DashboardResult<Self> {
        options.validate()?;

        let scheduler = Scheduler::new();
        let events = EventBroadcaster::new();

        let chat = ChatEngine::new(
            &options.script,
            &options.timing,
            scheduler.clone(),
            events.clone(),
        );
        let sink: Arc<dyn BotMessageSink> = Arc::new(chat.clone());

        let trivia = TriviaEngine::new(
            trivia_pool,
            Arc::clone(&sink),
            &options.timing,
            scheduler.clone(),
            events.clone(),
            options.rng(TRIVIA_RNG_SALT),
        )?;
        let poll = PollEngine::new(
            poll_options,
            &options.script,
            &options.timing,
            sink,
            scheduler.clone(),
            events.clone(),
        )?;
        let fan_activity = FanActivitySimulator::new(
            fan_activities,
            options.timing.fan_activity_interval(),
            scheduler.clone(),
            events.clone(),
            options.rng(FAN_RNG_SALT),
        );

        tracing::info!(
            "🏎️ [SESSION] Created (seed: {:?}, trivia pool: {})",
            options.seed,
            trivia.pool().len()
        );

        Ok(Self {
            scheduler,
            events,
            chat,
            trivia,
            poll,
            fan_activity,
            closed: AtomicBool::new(false),
        })
    }

    /// ファンアクティビティの定期生成を開始
    ///
    /// tokioランタイム上で呼ぶ必要がある。開始できた場合はtrue。
    pub fn start(&self) -> bool {
        if self.is_closed() {
            return false;
        }
        let started = self.fan_activity.start().is_some();
        if started {
            tracing::info!("🏎️ [SESSION] Started");
        }
        started
    }

    /// 保留中のタイマーをすべて破棄してセッションを終了
    ///
    /// 2回目以降の呼び出しは何もしない。
    pub fn shutdown(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        let cancelled = self.scheduler.close();
        self.chat.clear_pending();
        self.events.broadcast(DashboardEvent::SessionClosed);
        tracing::info!("🏎️ [SESSION] Shut down ({} pending tasks cancelled)", cancelled);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            chat: self.chat.snapshot(),
            trivia: self.trivia.snapshot(),
            poll: self.poll.snapshot(),
            fan_activity: self.fan_activity.activities(),
            closed: self.is_closed(),
        }
    }

    pub fn scheduler_stats(&self) -> SchedulerStats {
        self.scheduler.stats()
    }

    pub fn send_user_message(&self, text: &str) -> Option<MessageId> {
        self.chat.send_user_message(text)
    }

    pub fn receive_bot_message(&self, text: impl Into<String>) {
        self.chat.receive_bot_message(text.into());
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        if self.is_closed() {
            return;
        }
        self.chat.set_draft(text);
    }

    pub fn send_draft(&self) -> Option<MessageId> {
        self.chat.send_draft()
    }

    pub fn submit_answer(&self, option: &str) -> SubmitOutcome {
        self.trivia.submit_answer(option)
    }

    pub fn vote(&self, index: usize) -> VoteOutcome {
        self.poll.vote(index)
    }

    pub fn chat(&self) -> &ChatEngine {
        &self.chat
    }

    pub fn trivia(&self) -> &TriviaEngine {
        &self.trivia
    }

    pub fn poll(&self) -> &PollEngine {
        &self.poll
    }

    pub fn fan_activity(&self) -> &FanActivitySimulator {
        &self.fan_activity
    }
}

impl Drop for DashboardSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}
