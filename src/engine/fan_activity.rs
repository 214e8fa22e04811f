//! ファンアクティビティ生成
//!
//! 一定周期でランダムなファンのポイント獲得を先頭に追加し、
//! 直近5件だけを保持する。見た目のためだけのバックグラウンド処理。

use chrono::Utc;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use super::broadcaster::{DashboardEvent, EventBroadcaster};
use super::scheduler::{Scheduler, TaskControl, TaskId, TaskKind};
use crate::data::{FAN_NAMES, FAN_POINTS_RANGE};
use crate::models::{ActivityId, FanActivityEvent};

/// 表示するアクティビティの上限
pub const MAX_VISIBLE_ACTIVITIES: usize = 5;

#[derive(Debug)]
struct FanActivityState {
    activities: VecDeque<FanActivityEvent>,
    rng: StdRng,
    next_id: u64,
}

impl FanActivityState {
    fn generate(&mut self) -> FanActivityEvent {
        let name = FAN_NAMES.choose(&mut self.rng).copied().unwrap_or("Fan");
        let points = self.rng.gen_range(FAN_POINTS_RANGE);
        let event = FanActivityEvent {
            id: ActivityId(self.next_id),
            name: name.to_string(),
            points,
            action: None,
            created_at: Utc::now(),
        };
        self.next_id += 1;

        self.activities.push_front(event.clone());
        self.activities.truncate(MAX_VISIBLE_ACTIVITIES);
        event
    }
}

#[derive(Debug)]
struct FanActivityInner {
    state: Mutex<FanActivityState>,
    interval: Duration,
    ticker: Mutex<Option<TaskId>>,
    scheduler: Scheduler,
    events: EventBroadcaster,
}

impl FanActivityInner {
    fn tick(&self) -> FanActivityEvent {
        let event = self.state.lock().generate();
        tracing::debug!(
            "🏁 [FANS] {} earned {} pts (id {})",
            event.name,
            event.points,
            event.id
        );
        self.events.broadcast(DashboardEvent::FanActivityAdded);
        event
    }
}

/// ファンアクティビティシミュレーター
#[derive(Debug, Clone)]
pub struct FanActivitySimulator {
    inner: Arc<FanActivityInner>,
}

impl FanActivitySimulator {
    /// 初期リスト（新しい順）で作成。上限を超える分は捨てる
    pub fn new(
        seed_activities: Vec<FanActivityEvent>,
        interval: Duration,
        scheduler: Scheduler,
        events: EventBroadcaster,
        rng: StdRng,
    ) -> Self {
        let next_id = seed_activities
            .iter()
            .map(|a| a.id.0)
            .max()
            .unwrap_or(0)
            + 1;
        let mut activities: VecDeque<FanActivityEvent> = seed_activities.into();
        activities.truncate(MAX_VISIBLE_ACTIVITIES);

        Self {
            inner: Arc::new(FanActivityInner {
                state: Mutex::new(FanActivityState {
                    activities,
                    rng,
                    next_id,
                }),
                interval,
                ticker: Mutex::new(None),
                scheduler,
                events,
            }),
        }
    }

    /// 定期生成を開始。既に動作中なら既存のタスクIDを返す
    pub fn start(&self) -> Option<TaskId> {
        let mut ticker = self.inner.ticker.lock();
        if let Some(id) = *ticker {
            return Some(id);
        }

        let inner = Arc::clone(&self.inner);
        let id = self.inner.scheduler.schedule_periodic(
            TaskKind::FanActivityTick,
            self.inner.interval,
            move || {
                inner.tick();
                TaskControl::Continue
            },
        )?;
        *ticker = Some(id);
        Some(id)
    }

    /// 定期生成を停止
    pub fn stop(&self) -> bool {
        match self.inner.ticker.lock().take() {
            Some(id) => self.inner.scheduler.cancel(id),
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.ticker.lock().is_some()
    }

    /// 1件生成して先頭に追加
    pub fn tick(&self) -> FanActivityEvent {
        self.inner.tick()
    }

    /// 新しい順のアクティビティ
    pub fn activities(&self) -> Vec<FanActivityEvent> {
        self.inner.state.lock().activities.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.state.lock().activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::initial_fan_activities;
    use rand::SeedableRng;

    fn create_simulator(seed: u64) -> FanActivitySimulator {
        FanActivitySimulator::new(
            initial_fan_activities(),
            Duration::from_secs(10),
            Scheduler::new(),
            EventBroadcaster::new(),
            StdRng::seed_from_u64(seed),
        )
    }

    #[test]
    fn test_tick_prepends_and_caps() {
        let simulator = create_simulator(1);
        assert_eq!(simulator.len(), 3);

        for _ in 0..10 {
            let event = simulator.tick();
            let activities = simulator.activities();
            assert!(activities.len() <= MAX_VISIBLE_ACTIVITIES);
            assert_eq!(activities[0], event);
        }
        assert_eq!(simulator.len(), MAX_VISIBLE_ACTIVITIES);
    }

    #[test]
    fn test_generated_values_in_range() {
        let simulator = create_simulator(42);
        for _ in 0..100 {
            let event = simulator.tick();
            assert!(FAN_POINTS_RANGE.contains(&event.points));
            assert!(FAN_NAMES.contains(&event.name.as_str()));
            assert!(event.action.is_none());
        }
    }

    #[test]
    fn test_ids_continue_after_seed() {
        let simulator = create_simulator(3);
        let first = simulator.tick();
        let second = simulator.tick();
        assert_eq!(first.id, ActivityId(4));
        assert_eq!(second.id, ActivityId(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_periodic_generation() {
        let simulator = create_simulator(5);
        let id = simulator.start();
        assert!(id.is_some());
        assert_eq!(simulator.start(), id);

        tokio::time::sleep(Duration::from_millis(10_001)).await;
        assert_eq!(simulator.len(), 4);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(simulator.len(), MAX_VISIBLE_ACTIVITIES);

        assert!(simulator.stop());
        assert!(!simulator.is_running());
        let frozen = simulator.activities();
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(simulator.activities(), frozen);
    }
}
