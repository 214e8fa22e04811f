// Dioxus GUI Components Module

pub mod card;
pub mod chatbot_panel;
pub mod driver_stats_card;
pub mod fan_activity_card;
pub mod header;
pub mod main_window;
pub mod poll_card;
pub mod reward_progress_card;
pub mod telemetry_card;
pub mod trivia_card;

// Re-exports for convenience
pub use card::Card;
pub use chatbot_panel::ChatbotPanel;
pub use driver_stats_card::DriverStatsCard;
pub use fan_activity_card::FanActivityCard;
pub use header::{Footer, Header};
pub use main_window::MainWindow;
pub use poll_card::PollCard;
pub use reward_progress_card::{RewardProgressCard, StatTile};
pub use telemetry_card::TelemetryCard;
pub use trivia_card::TriviaCard;
