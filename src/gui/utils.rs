// GUI用ユーティリティ関数

use chrono::{DateTime, Local, Utc};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::error::{DashboardError, DashboardResult};
use crate::gui::config_manager::LogConfig;

/// ログ初期化
///
/// フィルタは `RUST_LOG` → `level_override` → 設定のログレベルの順に採用する。
/// ファイル出力が有効なら日次ローテーションのファイルにも書き出し、
/// 書き込みスレッドのガードを返す（ドロップでフラッシュ）。
pub fn init_logging(
    config: &LogConfig,
    level_override: Option<&str>,
) -> DashboardResult<Option<WorkerGuard>> {
    let level = level_override.unwrap_or(&config.log_level);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| DashboardError::Logging(format!("invalid log filter '{}': {}", level, e)))?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    let (file_layer, guard) = match file_log_dir(config) {
        Some(log_dir) => {
            std::fs::create_dir_all(&log_dir)?;
            let appender = tracing_appender::rolling::daily(&log_dir, &config.log_file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer.boxed()), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| DashboardError::Logging(e.to_string()))?;

    Ok(guard)
}

fn file_log_dir(config: &LogConfig) -> Option<std::path::PathBuf> {
    if !config.enable_file_logging {
        return None;
    }
    config.resolve_log_dir()
}

/// ポイント表示（例: "+19 pts"）
pub fn format_points(points: u32) -> String {
    format!("+{} pts", points)
}

/// アバター用の頭文字
pub fn initial_of(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

/// チャットのタイムスタンプ（ローカル時刻 HH:MM）
pub fn format_clock(time: &DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_points() {
        assert_eq!(format_points(19), "+19 pts");
        assert_eq!(format_points(0), "+0 pts");
    }

    #[test]
    fn test_initial_of() {
        assert_eq!(initial_of("Maria"), "M");
        assert_eq!(initial_of("émilie"), "É");
        assert_eq!(initial_of(""), "?");
    }

    #[test]
    fn test_file_logging_disabled_by_default() {
        assert!(file_log_dir(&LogConfig::default()).is_none());

        let config = LogConfig {
            enable_file_logging: true,
            log_dir: Some("/tmp/ailonso-logs".into()),
            ..LogConfig::default()
        };
        assert_eq!(file_log_dir(&config), Some("/tmp/ailonso-logs".into()));
    }
}
