//! ダッシュボードのデータモデル
//!
//! チャット・トリビア・投票・ファンアクティビティのエンジンと、
//! 描画層の両方から参照される構造体をまとめる。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// チャットメッセージID（追加順に単調増加）
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct MessageId(pub u64);

/// メッセージの送信者
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// チャットトランスクリプトの1件（追加後は不変）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn is_from_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// トリビア問題
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriviaQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub correct_message: String,
    pub incorrect_message: String,
}

impl TriviaQuestion {
    pub fn new(
        prompt: &str,
        options: &[&str],
        correct_answer: &str,
        correct_message: &str,
        incorrect_message: &str,
    ) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer: correct_answer.to_string(),
            correct_message: correct_message.to_string(),
            incorrect_message: incorrect_message.to_string(),
        }
    }

    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_answer == option
    }

    /// 回答に対してチャットへ送る文言
    pub fn feedback_for(&self, option: &str) -> &str {
        if self.is_correct(option) {
            &self.correct_message
        } else {
            &self.incorrect_message
        }
    }
}

/// 投票の選択肢
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub label: String,
    pub votes: u32,
}

impl PollOption {
    pub fn new(label: &str, votes: u32) -> Self {
        Self {
            label: label.to_string(),
            votes,
        }
    }
}

/// ファンアクティビティID
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct ActivityId(pub u64);

/// ファンアクティビティ（ポイント獲得 or マイルストーン）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FanActivityEvent {
    pub id: ActivityId,
    pub name: String,
    /// マイルストーンの場合は0
    pub points: u32,
    pub action: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FanActivityEvent {
    pub fn is_milestone(&self) -> bool {
        self.action.is_some()
    }
}

/// テレメトリのサンプル値（モック）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub time: String,
    pub speed: u32,
    pub lap_delta: f64,
    pub tire_wear: u32,
}

/// テレメトリカードのタブ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TelemetryTab {
    #[default]
    Speed,
    LapDelta,
    TireWear,
}

impl TelemetryTab {
    pub const ALL: [TelemetryTab; 3] = [
        TelemetryTab::Speed,
        TelemetryTab::LapDelta,
        TelemetryTab::TireWear,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TelemetryTab::Speed => "Speed",
            TelemetryTab::LapDelta => "Lap Delta",
            TelemetryTab::TireWear => "Tire Wear",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            TelemetryTab::Speed => "km/h",
            TelemetryTab::LapDelta => "s",
            TelemetryTab::TireWear => "%",
        }
    }

    /// サンプルからタブに対応する値を取り出す
    pub fn value_of(&self, sample: &TelemetrySample) -> f64 {
        match self {
            TelemetryTab::Speed => sample.speed as f64,
            TelemetryTab::LapDelta => sample.lap_delta,
            TelemetryTab::TireWear => sample.tire_wear as f64,
        }
    }

    /// タブに対応する時系列（時刻ラベル, 値）
    pub fn series(&self, samples: &[TelemetrySample]) -> Vec<(String, f64)> {
        samples
            .iter()
            .map(|s| (s.time.clone(), self.value_of(s)))
            .collect()
    }
}

/// コンストラクターズランキングの1行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub position: u32,
    pub team: String,
    pub points: u32,
    pub highlighted: bool,
}

/// ドライバーのモナコ関連データ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverFacts {
    pub name: String,
    pub team: String,
    pub number: u32,
    pub position: u32,
    pub gap: String,
    pub qualifying_position: u32,
    pub qualifying_time: String,
    pub monaco_wins: u32,
    pub monaco_poles: u32,
    pub monaco_podiums: u32,
}

/// モナコGPのレース情報
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonacoGp {
    pub date: String,
    pub air_temperature: i32,
    pub track_temperature: i32,
    pub current_lap: u32,
    pub total_laps: u32,
    pub driver: DriverFacts,
    pub teammate_position: u32,
}

impl MonacoGp {
    /// レース進行率（%）
    pub fn race_progress(&self) -> f64 {
        if self.total_laps == 0 {
            return 0.0;
        }
        self.current_lap as f64 / self.total_laps as f64 * 100.0
    }
}

/// リワード進捗
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardProgress {
    pub tier: String,
    pub percent: u8,
    pub constructor_summary: String,
    pub best_finish: String,
}
