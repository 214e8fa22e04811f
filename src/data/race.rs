//! レース関連のモックデータ（テレメトリ・順位表・モナコGP・リワード）

use crate::models::{
    DriverFacts, MonacoGp, RewardProgress, TeamStanding, TelemetrySample,
};

/// モナコのコース形状（SVGパス、viewBox 0 0 180 100）
pub const MONACO_TRACK_PATH: &str = "M 30 75 L 40 75 L 45 60 L 47 45 L 52 35 L 60 30 L 70 28 L 80 30 L 90 35 L 95 40 L 100 45 L 110 45 L 120 42 L 128 38 L 135 32 L 140 28 L 145 30 L 150 35 L 153 42 L 155 50 L 157 60 L 155 68 L 150 75 L 142 78 L 130 78 L 120 76 L 110 72 L 100 70 L 90 72 L 80 76 L 70 78 L 60 78 L 50 78 L 40 78 L 32 76 L 30 75";

fn sample(time: &str, speed: u32, lap_delta: f64, tire_wear: u32) -> TelemetrySample {
    TelemetrySample {
        time: time.to_string(),
        speed,
        lap_delta,
        tire_wear,
    }
}

/// モックテレメトリ（5秒刻み）
pub fn telemetry_samples() -> Vec<TelemetrySample> {
    vec![
        sample("0s", 280, 0.0, 10),
        sample("5s", 295, -0.2, 15),
        sample("10s", 310, -0.5, 22),
        sample("15s", 305, -0.3, 28),
        sample("20s", 318, -0.7, 35),
        sample("25s", 300, -0.4, 40),
    ]
}

/// コンストラクターズランキング（アストンマーティンをハイライト）
pub fn team_standings() -> Vec<TeamStanding> {
    [
        ("Red Bull Racing", 354),
        ("Ferrari", 312),
        ("McLaren", 287),
        ("Mercedes", 201),
        ("Aston Martin", 98),
    ]
    .iter()
    .enumerate()
    .map(|(i, (team, points))| TeamStanding {
        position: i as u32 + 1,
        team: team.to_string(),
        points: *points,
        highlighted: *team == "Aston Martin",
    })
    .collect()
}

pub fn monaco_gp() -> MonacoGp {
    MonacoGp {
        date: "May 25, 2025".to_string(),
        air_temperature: 24,
        track_temperature: 38,
        current_lap: 47,
        total_laps: 78,
        driver: DriverFacts {
            name: "Fernando Alonso".to_string(),
            team: "Aston Martin Aramco".to_string(),
            number: 14,
            position: 6,
            gap: "+12.3s".to_string(),
            qualifying_position: 7,
            qualifying_time: "1:11.432".to_string(),
            monaco_wins: 2,
            monaco_poles: 1,
            monaco_podiums: 4,
        },
        teammate_position: 11,
    }
}

pub fn reward_progress() -> RewardProgress {
    RewardProgress {
        tier: "Speedster Tier".to_string(),
        percent: 65,
        constructor_summary: "P5 • 98 pts".to_string(),
        best_finish: "P3 Bahrain".to_string(),
    }
}
