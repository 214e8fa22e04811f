//! ダッシュボード共通のエラー型
//!
//! セッション中の操作（投票・回答・送信）は失敗しない。
//! エラーになるのは設定ファイルや静的データの読み込みなど境界部分のみ。

use thiserror::Error;

/// ダッシュボード全体で使うエラー型
#[derive(Error, Debug)]
pub enum DashboardError {
    /// ファイルI/Oエラー
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 設定ファイルのパースエラー
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// 設定ファイルのシリアライズエラー
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// スナップショットのJSON変換エラー
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 静的データ・スクリプト文言の不備（作成時のバグ）
    #[error("Invalid content in {context}: {reason}")]
    InvalidContent { context: String, reason: String },

    /// 設定値の不備
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// ログ初期化の失敗
    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl DashboardError {
    /// コンテンツ不備エラーを作成
    pub fn invalid_content(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidContent {
            context: context.into(),
            reason: reason.into(),
        }
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_content_message() {
        let error = DashboardError::invalid_content("trivia pool", "no questions");
        assert_eq!(
            error.to_string(),
            "Invalid content in trivia pool: no questions"
        );
    }

    #[test]
    fn test_toml_error_conversion() {
        let parse_error = toml::from_str::<toml::Value>("[unclosed").unwrap_err();
        let error: DashboardError = parse_error.into();
        assert!(matches!(error, DashboardError::ConfigParse(_)));
        assert!(error.to_string().starts_with("Failed to parse config"));
    }
}
