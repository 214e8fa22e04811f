//! ダッシュボードセッション用カスタムフック
//!
//! セッションのブロードキャストを購読し、イベントを受けるたびに
//! スナップショットをSignalへ反映する。ルートでセッションを提供し、
//! 各カードは [`use_dashboard`] でハンドルを取得する。

use dioxus::prelude::*;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

use crate::engine::{DashboardEvent, DashboardSession, DashboardSnapshot, SubmitOutcome, VoteOutcome};
use crate::models::MessageId;

/// ダッシュボードハンドル
#[derive(Clone)]
pub struct DashboardHandle {
    session: Arc<DashboardSession>,
    /// 最新のスナップショット
    pub snapshot: Signal<DashboardSnapshot>,
}

impl PartialEq for DashboardHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.session, &other.session) && self.snapshot == other.snapshot
    }
}

impl DashboardHandle {
    /// 入力欄の下書きを送信
    pub fn send_draft(&self) -> Option<MessageId> {
        self.session.send_draft()
    }

    pub fn set_draft(&self, text: String) {
        self.session.set_draft(text);
    }

    pub fn submit_answer(&self, option: &str) -> SubmitOutcome {
        self.session.submit_answer(option)
    }

    pub fn vote(&self, index: usize) -> VoteOutcome {
        self.session.vote(index)
    }

    pub fn session(&self) -> &Arc<DashboardSession> {
        &self.session
    }
}

/// セッションを開始してコンテキストに登録する（ルートコンポーネント用）
///
/// コンポーネント破棄時にセッションを終了する。
pub fn use_dashboard_provider(session: Arc<DashboardSession>) -> DashboardHandle {
    let session = use_hook(move || {
        if session.start() {
            tracing::info!("🏎️ Dashboard session attached to UI");
        } else {
            tracing::warn!("⚠️ Dashboard session could not start fan activity ticker");
        }
        session
    });

    let mut snapshot = use_signal({
        let session = session.clone();
        move || session.snapshot()
    });

    use_future({
        let session = session.clone();
        move || {
            let session = session.clone();
            async move {
                let mut receiver = session.subscribe();
                // 購読前の変更を取りこぼさないよう一度取り直す
                snapshot.set(session.snapshot());

                loop {
                    match receiver.recv().await {
                        Ok(DashboardEvent::SessionClosed) => {
                            snapshot.set(session.snapshot());
                            tracing::debug!("🛑 Dashboard subscription finished");
                            break;
                        }
                        Ok(event) => {
                            tracing::trace!("📡 Dashboard event: {:?}", event);
                            snapshot.set(session.snapshot());
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!("⚠️ Dashboard subscriber lagged by {} events", skipped);
                            snapshot.set(session.snapshot());
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            }
        }
    });

    use_drop({
        let session = session.clone();
        move || {
            tracing::debug!("🧹 Dashboard provider dropped, shutting down session");
            session.shutdown();
        }
    });

    use_context_provider(|| DashboardHandle { session, snapshot })
}

/// コンテキストからダッシュボードハンドルを取得
pub fn use_dashboard() -> DashboardHandle {
    use_context::<DashboardHandle>()
}
