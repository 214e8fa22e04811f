// Core modules
pub mod config_manager; // 設定管理モジュール
pub mod utils; // ログ初期化・表示用フォーマット

// Dioxus UI components
pub mod components;
pub mod hooks;
pub mod styles;

pub use components::MainWindow;
pub use config_manager::{AppConfig, ConfigManager, LogConfig, WindowConfig};
pub use hooks::{use_dashboard, DashboardHandle};
