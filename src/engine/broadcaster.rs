//! ダッシュボード状態変更のブロードキャスト
//!
//! エンジンの状態が変わるたびにイベントをプッシュし、描画層は受信時に
//! スナップショットを取り直す。ポーリングは行わない。

use tokio::sync::broadcast;

use crate::models::{MessageId, Sender};

/// 状態変更イベント
///
/// 必要最小限の情報のみを含む。詳細はスナップショットから読む。
#[derive(Clone, Debug, PartialEq)]
pub enum DashboardEvent {
    /// チャットにメッセージが追加された
    ChatMessageAppended { id: MessageId, sender: Sender },
    /// 入力中インジケーターが切り替わった
    TypingChanged(bool),
    /// 入力欄の下書きが変わった
    DraftChanged,
    /// トリビアに回答した
    TriviaAnswered { correct: bool },
    /// 次のトリビア問題に切り替わった
    TriviaRotated,
    /// 投票した
    PollVoted { index: usize },
    /// ファンアクティビティが追加された
    FanActivityAdded,
    /// セッションが終了した
    SessionClosed,
}

/// 状態変更のブロードキャスター
///
/// クローンは同じチャンネルを共有する。
#[derive(Clone, Debug)]
pub struct EventBroadcaster {
    sender: broadcast::Sender<DashboardEvent>,
}

impl EventBroadcaster {
    /// バッファサイズは256。遅いサブスクライバーは古いイベントを取りこぼす（Lagged）。
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(256);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.sender.subscribe()
    }

    /// サブスクライバーがいない場合はイベントを破棄する
    pub fn broadcast(&self, event: DashboardEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}
