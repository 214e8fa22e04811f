//! タスクスケジューラ
//!
//! チャット返信・トリビア回転・投票お礼・ファンアクティビティ生成など
//! 時間ベースの処理をセッション単位で管理する。
//! - タスクライフサイクル管理
//! - 単発タスクと定期タスク
//! - 種類別・一括キャンセル（セッション終了時）

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;

/// タスクID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub struct TaskId(pub u64);

/// タスクの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// ユーザー発言への定型返信
    ChatReply,
    /// 外部から注入されたボット発言
    BotMessage,
    /// トリビア回答結果のチャット通知
    TriviaFeedback,
    /// 次のトリビア問題への切り替え
    TriviaRotate,
    /// 投票お礼メッセージ
    PollAck,
    /// ファンアクティビティの定期生成
    FanActivityTick,
}

/// 定期タスクのハンドラーが返す継続指示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskControl {
    /// 次の周期も実行
    Continue,
    /// 完了（タスク終了）
    Complete,
}

/// スケジューラ統計情報
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// 総登録タスク数
    pub total_tasks: u64,
    /// アクティブタスク数
    pub active_tasks: u64,
    /// 完了タスク数
    pub completed_tasks: u64,
    /// キャンセルタスク数
    pub cancelled_tasks: u64,
}

#[derive(Debug)]
struct TaskEntry {
    kind: TaskKind,
    cancel_sender: Option<oneshot::Sender<()>>,
    #[allow(dead_code)] // デバッグ出力用
    scheduled_at: Instant,
}

#[derive(Debug)]
struct SchedulerInner {
    tasks: Mutex<HashMap<TaskId, TaskEntry>>,
    stats: Mutex<SchedulerStats>,
    next_id: AtomicU64,
    closed: AtomicBool,
}

impl SchedulerInner {
    /// タスクを登録簿から外す。外せた場合のみtrue（先に外した側が勝つ）
    fn finish(&self, id: TaskId, kind: TaskKind) -> bool {
        let removed = self.tasks.lock().remove(&id).is_some();
        if removed {
            let mut stats = self.stats.lock();
            stats.active_tasks = stats.active_tasks.saturating_sub(1);
            stats.completed_tasks += 1;
            tracing::debug!("⏱️ [SCHEDULER] Task completed: {} ({:?})", id, kind);
        }
        removed
    }

    fn is_active(&self, id: TaskId) -> bool {
        self.tasks.lock().contains_key(&id)
    }
}

/// セッション単位のタスクスケジューラ
///
/// クローンは同じ登録簿を共有する。タスクは実行中のtokioランタイム上で動く。
#[derive(Debug, Clone)]
pub struct Scheduler {
    inner: Arc<SchedulerInner>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SchedulerInner {
                tasks: Mutex::new(HashMap::new()),
                stats: Mutex::new(SchedulerStats::default()),
                next_id: AtomicU64::new(1),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// タスクを登録簿に追加し、キャンセル受信側を返す
    fn register(&self, kind: TaskKind) -> Option<(TaskId, oneshot::Receiver<()>)> {
        if !self.can_schedule() {
            tracing::warn!("⏱️ [SCHEDULER] Cannot schedule {:?} (closed or no runtime)", kind);
            return None;
        }

        let id = TaskId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let (cancel_sender, cancel_receiver) = oneshot::channel();

        self.inner.tasks.lock().insert(
            id,
            TaskEntry {
                kind,
                cancel_sender: Some(cancel_sender),
                scheduled_at: Instant::now(),
            },
        );

        {
            let mut stats = self.inner.stats.lock();
            stats.total_tasks += 1;
            stats.active_tasks += 1;
        }

        Some((id, cancel_receiver))
    }

    /// 遅延後に一度だけ実行するタスクを登録
    ///
    /// スケジューラが閉じている場合やランタイムが無い場合はNone。
    pub fn schedule_once<F>(&self, kind: TaskKind, delay: Duration, handler: F) -> Option<TaskId>
    where
        F: FnOnce() + Send + 'static,
    {
        let (id, cancel_receiver) = self.register(kind)?;
        let inner = Arc::clone(&self.inner);

        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    if inner.finish(id, kind) {
                        handler();
                    }
                }
                _ = cancel_receiver => {
                    tracing::debug!("⏱️ [SCHEDULER] Task dropped before firing: {}", id);
                }
            }
        });

        tracing::debug!(
            "⏱️ [SCHEDULER] Scheduled {:?} as {} in {}ms",
            kind,
            id,
            delay.as_millis()
        );
        Some(id)
    }

    /// 一定周期で実行するタスクを登録（初回は1周期後）
    ///
    /// 周期が0の場合は登録しない。
    pub fn schedule_periodic<F>(
        &self,
        kind: TaskKind,
        period: Duration,
        mut handler: F,
    ) -> Option<TaskId>
    where
        F: FnMut() -> TaskControl + Send + 'static,
    {
        if period.is_zero() {
            tracing::warn!("⏱️ [SCHEDULER] Zero period for {:?}, not scheduling", kind);
            return None;
        }

        let (id, mut cancel_receiver) = self.register(kind)?;
        let inner = Arc::clone(&self.inner);

        tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if !inner.is_active(id) {
                            return;
                        }
                        if handler() == TaskControl::Complete {
                            inner.finish(id, kind);
                            return;
                        }
                    }
                    _ = &mut cancel_receiver => {
                        tracing::debug!("⏱️ [SCHEDULER] Periodic task stopped: {}", id);
                        return;
                    }
                }
            }
        });

        tracing::info!(
            "⏱️ [SCHEDULER] Started periodic {:?} as {} every {}ms",
            kind,
            id,
            period.as_millis()
        );
        Some(id)
    }

    /// タスクをキャンセル
    pub fn cancel(&self, id: TaskId) -> bool {
        let sender = self
            .inner
            .tasks
            .lock()
            .remove(&id)
            .and_then(|mut task| task.cancel_sender.take());

        match sender {
            Some(sender) => {
                let _ = sender.send(());
                let mut stats = self.inner.stats.lock();
                stats.active_tasks = stats.active_tasks.saturating_sub(1);
                stats.cancelled_tasks += 1;
                tracing::debug!("⏱️ [SCHEDULER] Cancelled task: {}", id);
                true
            }
            None => false,
        }
    }

    /// 特定種類のタスクをすべてキャンセル
    pub fn cancel_by_kind(&self, kind: TaskKind) -> u32 {
        let ids: Vec<TaskId> = self
            .inner
            .tasks
            .lock()
            .iter()
            .filter(|(_, task)| task.kind == kind)
            .map(|(id, _)| *id)
            .collect();

        let cancelled = ids.into_iter().filter(|id| self.cancel(*id)).count() as u32;
        if cancelled > 0 {
            tracing::info!(
                "⏱️ [SCHEDULER] Cancelled {} tasks of kind {:?}",
                cancelled,
                kind
            );
        }
        cancelled
    }

    /// 全タスクをキャンセル
    pub fn cancel_all(&self) -> u32 {
        let ids: Vec<TaskId> = self.inner.tasks.lock().keys().copied().collect();

        let cancelled = ids.into_iter().filter(|id| self.cancel(*id)).count() as u32;
        if cancelled > 0 {
            tracing::info!("⏱️ [SCHEDULER] Cancelled all {} tasks", cancelled);
        }
        cancelled
    }

    /// 以後の登録を拒否し、保留中のタスクをすべてキャンセル
    pub fn close(&self) -> u32 {
        self.inner.closed.store(true, Ordering::SeqCst);
        self.cancel_all()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    /// 登録を受け付けられるか（閉じておらず、tokioランタイム上）
    pub fn can_schedule(&self) -> bool {
        !self.is_closed() && tokio::runtime::Handle::try_current().is_ok()
    }

    /// アクティブなタスク一覧
    pub fn active_tasks(&self) -> Vec<(TaskId, TaskKind)> {
        let mut tasks: Vec<(TaskId, TaskKind)> = self
            .inner
            .tasks
            .lock()
            .iter()
            .map(|(id, task)| (*id, task.kind))
            .collect();
        tasks.sort_by_key(|(id, _)| id.0);
        tasks
    }

    /// 指定種類のアクティブタスク数
    pub fn pending_count(&self, kind: TaskKind) -> usize {
        self.inner
            .tasks
            .lock()
            .values()
            .filter(|task| task.kind == kind)
            .count()
    }

    pub fn stats(&self) -> SchedulerStats {
        self.inner.stats.lock().clone()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[tokio::test(start_paused = true)]
    async fn test_once_fires_after_delay() {
        let scheduler = Scheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        let id = scheduler.schedule_once(TaskKind::ChatReply, Duration::from_millis(100), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(id.is_some());
        assert_eq!(scheduler.pending_count(TaskKind::ChatReply), 1);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(scheduler.active_tasks().is_empty());

        let stats = scheduler.stats();
        assert_eq!(stats.total_tasks, 1);
        assert_eq!(stats.completed_tasks, 1);
        assert_eq!(stats.active_tasks, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_task_never_fires() {
        let scheduler = Scheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        let id = scheduler
            .schedule_once(TaskKind::PollAck, Duration::from_millis(100), move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(scheduler.stats().cancelled_tasks, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_periodic_runs_until_cancelled() {
        let scheduler = Scheduler::new();
        let ticks = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&ticks);
        let id = scheduler
            .schedule_periodic(TaskKind::FanActivityTick, Duration::from_secs(10), move || {
                counter.fetch_add(1, Ordering::SeqCst);
                TaskControl::Continue
            })
            .unwrap();

        tokio::time::sleep(Duration::from_millis(9_999)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(20_002)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);

        scheduler.cancel(id);
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_periodic_complete_stops_task() {
        let scheduler = Scheduler::new();
        let ticks = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&ticks);
        scheduler.schedule_periodic(TaskKind::FanActivityTick, Duration::from_secs(1), move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            if n >= 2 {
                TaskControl::Complete
            } else {
                TaskControl::Continue
            }
        });

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 2);
        assert!(scheduler.active_tasks().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_cancels_and_rejects() {
        let scheduler = Scheduler::new();
        scheduler.schedule_once(TaskKind::ChatReply, Duration::from_secs(1), || {});
        scheduler.schedule_once(TaskKind::BotMessage, Duration::from_secs(1), || {});
        scheduler.schedule_periodic(TaskKind::FanActivityTick, Duration::from_secs(1), || {
            TaskControl::Continue
        });

        assert!(scheduler.can_schedule());
        assert_eq!(scheduler.close(), 3);
        assert!(scheduler.is_closed());
        assert!(!scheduler.can_schedule());
        assert!(scheduler
            .schedule_once(TaskKind::ChatReply, Duration::from_secs(1), || {})
            .is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_by_kind() {
        let scheduler = Scheduler::new();
        scheduler.schedule_once(TaskKind::TriviaFeedback, Duration::from_secs(1), || {});
        scheduler.schedule_once(TaskKind::TriviaRotate, Duration::from_secs(2), || {});
        scheduler.schedule_once(TaskKind::TriviaRotate, Duration::from_secs(3), || {});

        assert_eq!(scheduler.cancel_by_kind(TaskKind::TriviaRotate), 2);
        let remaining = scheduler.active_tasks();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].1, TaskKind::TriviaFeedback);
    }

    #[test]
    fn test_no_runtime_returns_none() {
        let scheduler = Scheduler::new();
        assert!(!scheduler.can_schedule());
        assert!(scheduler
            .schedule_once(TaskKind::ChatReply, Duration::from_secs(1), || {})
            .is_none());
        assert_eq!(scheduler.stats().total_tasks, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_rejected() {
        let scheduler = Scheduler::new();
        assert!(scheduler
            .schedule_periodic(TaskKind::FanActivityTick, Duration::ZERO, || {
                TaskControl::Continue
            })
            .is_none());
    }
}
