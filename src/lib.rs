pub mod data;
pub mod engine;
pub mod error;
pub mod gui;
pub mod models;

// Re-export the main error types for convenience
pub use error::{DashboardError, DashboardResult};

// Re-export the session controller and its entry points
pub use engine::{
    BotMessageSink, DashboardEvent, DashboardSession, DashboardSnapshot, SessionOptions,
    SubmitOutcome, VoteOutcome,
};

pub use data::StaticTables;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_structure() {
        assert!(std::any::type_name::<DashboardSession>().contains("DashboardSession"));
        assert!(std::any::type_name::<gui::ConfigManager>().contains("ConfigManager"));
    }

    #[test]
    fn test_session_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DashboardSession>();
        assert_send_sync::<engine::ChatEngine>();
    }
}
