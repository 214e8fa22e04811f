//! エンジンのタイミング設定とスクリプト文言
//!
//! 設定ファイルの `[timing]` と `[script]` セクションに対応する。

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::data::{POLL_ACK_MESSAGE, POLL_QUESTION};
use crate::error::{DashboardError, DashboardResult};

/// 各遅延（ミリ秒）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// ユーザー発言から定型返信まで
    pub chat_reply_delay_ms: u64,
    /// 注入されたボット発言が表示されるまで
    pub bot_message_delay_ms: u64,
    /// トリビア回答から結果メッセージ送信まで
    pub trivia_feedback_delay_ms: u64,
    /// 結果メッセージ送信から次の問題まで
    pub trivia_rotate_wait_ms: u64,
    /// 投票からお礼メッセージ送信まで
    pub poll_ack_delay_ms: u64,
    /// ファンアクティビティ生成周期
    pub fan_activity_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            chat_reply_delay_ms: 2_000,
            bot_message_delay_ms: 1_500,
            trivia_feedback_delay_ms: 500,
            trivia_rotate_wait_ms: 2_000,
            poll_ack_delay_ms: 500,
            fan_activity_interval_ms: 10_000,
        }
    }
}

impl TimingConfig {
    pub fn chat_reply_delay(&self) -> Duration {
        Duration::from_millis(self.chat_reply_delay_ms)
    }

    pub fn bot_message_delay(&self) -> Duration {
        Duration::from_millis(self.bot_message_delay_ms)
    }

    pub fn trivia_feedback_delay(&self) -> Duration {
        Duration::from_millis(self.trivia_feedback_delay_ms)
    }

    /// 回答から次の問題に切り替わるまでの合計
    pub fn trivia_rotate_delay(&self) -> Duration {
        Duration::from_millis(self.trivia_feedback_delay_ms)
            .saturating_add(Duration::from_millis(self.trivia_rotate_wait_ms))
    }

    pub fn poll_ack_delay(&self) -> Duration {
        Duration::from_millis(self.poll_ack_delay_ms)
    }

    pub fn fan_activity_interval(&self) -> Duration {
        Duration::from_millis(self.fan_activity_interval_ms)
    }

    pub fn validate(&self) -> DashboardResult<()> {
        if self.fan_activity_interval_ms == 0 {
            return Err(DashboardError::Configuration(
                "timing.fan_activity_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self
            .trivia_feedback_delay_ms
            .checked_add(self.trivia_rotate_wait_ms)
            .is_none()
        {
            return Err(DashboardError::Configuration(
                "timing.trivia_feedback_delay_ms + timing.trivia_rotate_wait_ms is too large"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// ボットの定型文言
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// トランスクリプト最初のボット発言
    pub welcome_message: String,
    /// ユーザー発言への定型返信
    pub reply_message: String,
    pub poll_question: String,
    /// 投票後のお礼
    pub poll_ack_message: String,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            welcome_message:
                "Monaco GP weekend is coming! Ready to dive into the street circuit magic?"
                    .to_string(),
            reply_message: "Great question! Monaco is Fernando's favorite circuit. With 260 corners and zero margin for error, it's where legends are made!".to_string(),
            poll_question: POLL_QUESTION.to_string(),
            poll_ack_message: POLL_ACK_MESSAGE.to_string(),
        }
    }
}

impl ScriptConfig {
    pub fn validate(&self) -> DashboardResult<()> {
        let fields = [
            ("script.welcome_message", &self.welcome_message),
            ("script.reply_message", &self.reply_message),
            ("script.poll_question", &self.poll_question),
            ("script.poll_ack_message", &self.poll_ack_message),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(DashboardError::invalid_content(name, "text is empty"));
            }
        }
        Ok(())
    }
}
