//! 静的データテーブル
//!
//! トリビア問題・順位表・モックテレメトリ・ファンアクティビティ初期値など。
//! 振る舞いは持たず、作成時の不備チェックのみ提供する。

pub mod engagement;
pub mod race;
pub mod trivia_pool;

pub use engagement::{
    default_poll_options, initial_fan_activities, validate_poll_options, FAN_NAMES,
    FAN_POINTS_RANGE, POLL_ACK_MESSAGE, POLL_QUESTION,
};
pub use race::{monaco_gp, reward_progress, team_standings, telemetry_samples, MONACO_TRACK_PATH};
pub use trivia_pool::{trivia_questions, validate_trivia_pool};

use serde::Serialize;

use crate::models::{MonacoGp, RewardProgress, TeamStanding, TelemetrySample};

/// 描画層に渡す読み取り専用の静的テーブル一式
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticTables {
    pub telemetry: Vec<TelemetrySample>,
    pub standings: Vec<TeamStanding>,
    pub monaco: MonacoGp,
    pub reward: RewardProgress,
}

impl StaticTables {
    pub fn load() -> Self {
        Self {
            telemetry: telemetry_samples(),
            standings: team_standings(),
            monaco: monaco_gp(),
            reward: reward_progress(),
        }
    }

    /// ハイライト対象チームの順位行
    pub fn highlighted_team(&self) -> Option<&TeamStanding> {
        self.standings.iter().find(|s| s.highlighted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_tables_load() {
        let tables = StaticTables::load();
        assert_eq!(tables.telemetry.len(), 6);
        assert_eq!(tables.standings.len(), 5);

        let highlighted = tables.highlighted_team().unwrap();
        assert_eq!(highlighted.team, "Aston Martin");
        assert_eq!(highlighted.position, 5);
    }
}
