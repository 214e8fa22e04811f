//! 投票とファンアクティビティの初期データ

use std::ops::RangeInclusive;

use chrono::Utc;

use crate::error::{DashboardError, DashboardResult};
use crate::models::{ActivityId, FanActivityEvent, PollOption};

/// ランダム生成に使うファン名
pub const FAN_NAMES: [&str; 6] = ["Alex", "Sarah", "Carlos", "Hannah", "Luis", "Mia"];

/// ランダム生成するポイントの範囲
pub const FAN_POINTS_RANGE: RangeInclusive<u32> = 5..=34;

pub const POLL_QUESTION: &str = "Will Aston Martin finish on podium this weekend?";

pub const POLL_ACK_MESSAGE: &str =
    "Thanks for voting! Monaco's tight streets make podiums tough, but Aston Martin has the pace!";

/// 投票の初期票数
pub fn default_poll_options() -> Vec<PollOption> {
    vec![
        PollOption::new("Yes", 45),
        PollOption::new("No", 23),
        PollOption::new("Maybe", 32),
    ]
}

/// ファンアクティビティの初期リスト（新しい順）
pub fn initial_fan_activities() -> Vec<FanActivityEvent> {
    let now = Utc::now();
    vec![
        FanActivityEvent {
            id: ActivityId(1),
            name: "Maria".to_string(),
            points: 19,
            action: None,
            created_at: now,
        },
        FanActivityEvent {
            id: ActivityId(2),
            name: "Jaime Lopez".to_string(),
            points: 25,
            action: None,
            created_at: now,
        },
        FanActivityEvent {
            id: ActivityId(3),
            name: "Emma".to_string(),
            points: 0,
            action: Some("unlocked Speedster Tier".to_string()),
            created_at: now,
        },
    ]
}

/// 投票選択肢の作成ミスを検出
pub fn validate_poll_options(options: &[PollOption]) -> DashboardResult<()> {
    if options.is_empty() {
        return Err(DashboardError::invalid_content("poll", "poll has no options"));
    }
    if let Some(option) = options.iter().find(|o| o.label.trim().is_empty()) {
        return Err(DashboardError::invalid_content(
            "poll",
            format!("option with {} votes has an empty label", option.votes),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_poll_totals() {
        let options = default_poll_options();
        let total: u32 = options.iter().map(|o| o.votes).sum();
        assert_eq!(total, 100);
        assert!(validate_poll_options(&options).is_ok());
    }

    #[test]
    fn test_empty_poll_rejected() {
        assert!(validate_poll_options(&[]).is_err());
        assert!(validate_poll_options(&[PollOption::new("  ", 3)]).is_err());
    }

    #[test]
    fn test_initial_activities() {
        let activities = initial_fan_activities();
        assert_eq!(activities.len(), 3);
        assert!(activities[2].is_milestone());
        assert_eq!(activities[2].points, 0);
        assert!(activities.iter().all(|a| a.id.0 >= 1));
    }
}
