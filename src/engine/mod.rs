//! ダッシュボードのエンゲージメントエンジン
//!
//! トリビア・投票・チャット・ファンアクティビティの状態機械と、
//! それらを駆動するスケジューラ・ブロードキャスターを提供する。
//! 描画層には依存しない。

pub mod broadcaster;
pub mod chat;
pub mod fan_activity;
pub mod poll;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod traits;
pub mod trivia;

pub use broadcaster::{DashboardEvent, EventBroadcaster};
pub use chat::{ChatEngine, ChatSnapshot};
pub use fan_activity::{FanActivitySimulator, MAX_VISIBLE_ACTIVITIES};
pub use poll::{format_percentage, vote_percentage, PollEngine, PollOptionView, PollSnapshot, VoteOutcome};
pub use scheduler::{Scheduler, SchedulerStats, TaskControl, TaskId, TaskKind};
pub use session::{DashboardSession, DashboardSnapshot, SessionOptions};
pub use settings::{ScriptConfig, TimingConfig};
pub use traits::BotMessageSink;
pub use trivia::{SubmitOutcome, TriviaEngine, TriviaRoundState, TriviaSnapshot};
