//! 設定ファイルからセッションまでの結合テスト

use ailonso::gui::{AppConfig, ConfigManager};
use ailonso::models::Sender;
use ailonso::{DashboardError, DashboardSession};
use std::time::Duration;
use tempfile::tempdir;

fn session_from_toml(toml: &str) -> DashboardSession {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, toml).unwrap();

    let manager = ConfigManager::with_path(config_path).unwrap();
    let config = manager.load_config().unwrap();
    DashboardSession::new(config.session_options(Some(42))).unwrap()
}

#[cfg(test)]
mod configured_session_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_custom_reply_delay_and_text() {
        let session = session_from_toml(
            r#"
[timing]
chat_reply_delay_ms = 100

[script]
reply_message = "Vamos, Nano!"
"#,
        );

        session.send_user_message("Podium?");
        tokio::time::sleep(Duration::from_millis(101)).await;

        let last = session.chat().messages().pop().unwrap();
        assert_eq!(last.sender, Sender::Bot);
        assert_eq!(last.text, "Vamos, Nano!");
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_welcome_message() {
        let session = session_from_toml("[script]\nwelcome_message = \"¡Hola!\"\n");

        let messages = session.chat().messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "¡Hola!");
    }

    #[test]
    fn test_blank_script_text_rejected() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[script]\nreply_message = \"   \"\n").unwrap();

        let manager = ConfigManager::with_path(config_path).unwrap();
        assert!(manager.load_config().is_err());
    }

    #[test]
    fn test_overflowing_trivia_delay_rejected() {
        let mut config = AppConfig::default();
        config.timing.trivia_feedback_delay_ms = u64::MAX;

        let result = DashboardSession::new(config.session_options(Some(1)));
        assert!(matches!(result, Err(DashboardError::Configuration(_))));

        // TOMLの整数はi64なので、範囲外の値は読み込み時点でエラー
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[timing]\ntrivia_feedback_delay_ms = 18446744073709551615\n",
        )
        .unwrap();
        let manager = ConfigManager::with_path(config_path).unwrap();
        assert!(manager.load_config().is_err());
    }

    #[test]
    fn test_default_config_builds_session() {
        let options = AppConfig::default().session_options(None);
        let session = DashboardSession::new(options).unwrap();

        assert_eq!(session.snapshot().poll.total_votes, 100);
        assert!(!session.is_closed());
    }
}
