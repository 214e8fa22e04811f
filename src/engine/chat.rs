//! チャットエンジン（Ai.lonso ボット）
//!
//! トランスクリプトは追加のみ。ユーザー発言は即時追加し、定型返信は
//! 遅延後に追加する。トリビア・投票からの発言は [`BotMessageSink`] 経由で
//! 受け取り、こちらも独自の遅延後に追加する。
//! 複数の返信が保留中の場合、追加順は遅延が満了した順になる。

use chrono::Utc;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use super::broadcaster::{DashboardEvent, EventBroadcaster};
use super::scheduler::{Scheduler, TaskKind};
use super::settings::{ScriptConfig, TimingConfig};
use super::traits::BotMessageSink;
use crate::models::{ChatMessage, MessageId, Sender};

/// チャットの読み取り専用スナップショット
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatSnapshot {
    pub messages: Vec<ChatMessage>,
    pub is_typing: bool,
    pub draft: String,
}

#[derive(Debug)]
struct ChatState {
    transcript: Vec<ChatMessage>,
    draft: String,
    /// 表示待ちのボット発言数（0より大きい間は入力中表示）
    pending_replies: usize,
    next_id: u64,
}

impl ChatState {
    fn append(&mut self, sender: Sender, text: String) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.transcript.push(ChatMessage {
            id,
            sender,
            text,
            created_at: Utc::now(),
        });
        id
    }
}

#[derive(Debug)]
struct ChatInner {
    state: Mutex<ChatState>,
    reply_message: String,
    reply_delay: Duration,
    bot_message_delay: Duration,
    scheduler: Scheduler,
    events: EventBroadcaster,
}

impl ChatInner {
    /// 保留中のボット発言を追加（タイマー満了時）
    fn deliver_bot_message(&self, text: String) {
        if self.scheduler.is_closed() {
            tracing::debug!("🤖 [CHAT] Session closed, dropping due bot message");
            return;
        }

        let (id, typing_stopped) = {
            let mut state = self.state.lock();
            let id = state.append(Sender::Bot, text);
            state.pending_replies = state.pending_replies.saturating_sub(1);
            (id, state.pending_replies == 0)
        };

        tracing::debug!("🤖 [CHAT] Bot message appended: {}", id);
        self.events.broadcast(DashboardEvent::ChatMessageAppended {
            id,
            sender: Sender::Bot,
        });
        if typing_stopped {
            self.events.broadcast(DashboardEvent::TypingChanged(false));
        }
    }

    /// 保留数を1つ戻す（スケジュール失敗時）
    fn release_pending(&self) {
        let typing_stopped = {
            let mut state = self.state.lock();
            state.pending_replies = state.pending_replies.saturating_sub(1);
            state.pending_replies == 0
        };
        if typing_stopped {
            self.events.broadcast(DashboardEvent::TypingChanged(false));
        }
    }
}

/// チャットエンジン
///
/// クローンは同じトランスクリプトを共有する。
#[derive(Debug, Clone)]
pub struct ChatEngine {
    inner: Arc<ChatInner>,
}

impl ChatEngine {
    /// ウェルカムメッセージ1件を持つトランスクリプトで開始
    pub fn new(
        script: &ScriptConfig,
        timing: &TimingConfig,
        scheduler: Scheduler,
        events: EventBroadcaster,
    ) -> Self {
        let mut state = ChatState {
            transcript: Vec::new(),
            draft: String::new(),
            pending_replies: 0,
            next_id: 1,
        };
        state.append(Sender::Bot, script.welcome_message.clone());

        Self {
            inner: Arc::new(ChatInner {
                state: Mutex::new(state),
                reply_message: script.reply_message.clone(),
                reply_delay: timing.chat_reply_delay(),
                bot_message_delay: timing.bot_message_delay(),
                scheduler,
                events,
            }),
        }
    }

    /// ユーザー発言を送信
    ///
    /// 空白のみの入力、セッション終了後、tokioランタイム外ではNoneを返し何も追加しない。
    /// 送信時は下書きをクリアし、返信遅延後に定型返信を1件追加する。
    pub fn send_user_message(&self, text: &str) -> Option<MessageId> {
        if text.trim().is_empty() {
            tracing::debug!("💬 [CHAT] Ignoring empty message");
            return None;
        }
        if !self.inner.scheduler.can_schedule() {
            tracing::warn!("💬 [CHAT] Reply cannot be scheduled, ignoring message");
            return None;
        }

        let (id, draft_cleared) = {
            let mut state = self.inner.state.lock();
            let id = state.append(Sender::User, text.to_string());
            let draft_cleared = !state.draft.is_empty();
            state.draft.clear();
            (id, draft_cleared)
        };

        tracing::info!("💬 [CHAT] User message {} ({} chars)", id, text.chars().count());
        self.inner.events.broadcast(DashboardEvent::ChatMessageAppended {
            id,
            sender: Sender::User,
        });
        if draft_cleared {
            self.inner.events.broadcast(DashboardEvent::DraftChanged);
        }

        self.schedule_bot_message(
            TaskKind::ChatReply,
            self.inner.reply_delay,
            self.inner.reply_message.clone(),
        );
        Some(id)
    }

    /// 下書きを更新
    pub fn set_draft(&self, text: impl Into<String>) {
        let text = text.into();
        {
            let mut state = self.inner.state.lock();
            if state.draft == text {
                return;
            }
            state.draft = text;
        }
        self.inner.events.broadcast(DashboardEvent::DraftChanged);
    }

    /// 下書きをユーザー発言として送信
    pub fn send_draft(&self) -> Option<MessageId> {
        let draft = self.draft();
        self.send_user_message(&draft)
    }

    fn schedule_bot_message(&self, kind: TaskKind, delay: Duration, text: String) -> bool {
        let typing_started = {
            let mut state = self.inner.state.lock();
            state.pending_replies += 1;
            state.pending_replies == 1
        };
        if typing_started {
            self.inner.events.broadcast(DashboardEvent::TypingChanged(true));
        }

        let inner = Arc::clone(&self.inner);
        let scheduled = self
            .inner
            .scheduler
            .schedule_once(kind, delay, move || inner.deliver_bot_message(text));

        if scheduled.is_none() {
            self.inner.release_pending();
            return false;
        }
        true
    }

    /// 保留中の返信を破棄したものとして入力中表示を解除（セッション終了時）
    pub(crate) fn clear_pending(&self) {
        let was_typing = {
            let mut state = self.inner.state.lock();
            let was_typing = state.pending_replies > 0;
            state.pending_replies = 0;
            was_typing
        };
        if was_typing {
            self.inner.events.broadcast(DashboardEvent::TypingChanged(false));
        }
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.inner.state.lock().transcript.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.state.lock().transcript.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_typing(&self) -> bool {
        self.inner.state.lock().pending_replies > 0
    }

    pub fn pending_replies(&self) -> usize {
        self.inner.state.lock().pending_replies
    }

    pub fn draft(&self) -> String {
        self.inner.state.lock().draft.clone()
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        let state = self.inner.state.lock();
        ChatSnapshot {
            messages: state.transcript.clone(),
            is_typing: state.pending_replies > 0,
            draft: state.draft.clone(),
        }
    }
}

impl BotMessageSink for ChatEngine {
    /// 入力中表示を即座に出し、遅延後にボット発言として追加
    fn receive_bot_message(&self, text: String) {
        if self.inner.scheduler.is_closed() {
            tracing::debug!("🤖 [CHAT] Session closed, dropping bot message");
            return;
        }
        self.schedule_bot_message(TaskKind::BotMessage, self.inner.bot_message_delay, text);
    }
}
