//! アプリケーション設定管理モジュール
//!
//! XDGディレクトリを使用した設定ファイルの永続化と管理を提供します。

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::engine::{ScriptConfig, SessionOptions, TimingConfig};

/// ウィンドウ設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
    pub maximized: bool,
    /// 常に最前面に表示
    pub always_on_top: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1440,
            height: 900,
            x: 100,
            y: 100,
            maximized: false,
            always_on_top: false,
        }
    }
}

/// ログ設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// カスタムログディレクトリ（Noneの場合はXDGデフォルト使用）
    pub log_dir: Option<PathBuf>,
    /// ログレベル (trace/debug/info/warn/error)
    pub log_level: String,
    /// ファイル出力有効化
    pub enable_file_logging: bool,
    /// ログファイル名の接頭辞（日付が付与される）
    pub log_file_prefix: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            log_level: "info".to_string(),
            enable_file_logging: false,
            log_file_prefix: "ailonso.log".to_string(),
        }
    }
}

impl LogConfig {
    /// 出力先ディレクトリ（未指定ならXDGデータディレクトリ配下のlogs）
    pub fn resolve_log_dir(&self) -> Option<PathBuf> {
        self.log_dir.clone().or_else(|| {
            ProjectDirs::from("dev", "ailonso", "ailonso")
                .map(|dirs| dirs.data_local_dir().join("logs"))
        })
    }
}

/// アプリケーション設定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// ウィンドウ設定
    #[serde(default)]
    pub window: WindowConfig,

    /// ログ設定
    #[serde(default)]
    pub log: LogConfig,

    /// 各遅延（ミリ秒）
    #[serde(default)]
    pub timing: TimingConfig,

    /// ボットの定型文言
    #[serde(default)]
    pub script: ScriptConfig,
}

impl AppConfig {
    /// セッション作成オプションへ変換
    pub fn session_options(&self, seed: Option<u64>) -> SessionOptions {
        SessionOptions {
            timing: self.timing.clone(),
            script: self.script.clone(),
            seed,
        }
    }
}

/// 設定管理マネージャー
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// XDG設定ディレクトリを使う設定マネージャーを作成
    pub fn new() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::with_path(config_path)
    }

    /// 任意のパスを使う設定マネージャーを作成（`--config` 指定時）
    pub fn with_path(config_path: impl Into<PathBuf>) -> Result<Self> {
        let config_path = config_path.into();

        // 設定ディレクトリを作成（存在しない場合）
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self { config_path })
    }

    /// XDGディレクトリに基づく設定ファイルパスを取得
    fn get_config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("dev", "ailonso", "ailonso")
            .context("Failed to get project directories")?;

        let config_file = project_dirs.config_dir().join("config.toml");
        debug!("Config file path: {}", config_file.display());

        Ok(config_file)
    }

    /// 設定を読み込み
    ///
    /// ファイルが無ければデフォルト値。内容が不正ならエラー。
    pub fn load_config(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            info!(
                "Config file not found, using default settings: {}",
                self.config_path.display()
            );
            return Ok(AppConfig::default());
        }

        let config_content = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config: AppConfig = toml::from_str(&config_content).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })?;

        config
            .session_options(None)
            .validate()
            .with_context(|| format!("Invalid config file: {}", self.config_path.display()))?;

        info!(
            "✅ Configuration loaded from: {}",
            self.config_path.display()
        );

        Ok(config)
    }

    /// 設定を保存
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        let config_content =
            toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, config_content).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        info!("💾 Configuration saved to: {}", self.config_path.display());

        Ok(())
    }

    /// 設定ファイルパスを取得
    pub fn get_config_file_path(&self) -> &Path {
        &self.config_path
    }

    /// 設定をリセット（デフォルト値に戻す）
    pub fn reset_config(&self) -> Result<()> {
        self.save_config(&AppConfig::default())?;
        info!("🔄 Configuration reset to defaults");
        Ok(())
    }

    /// 設定ファイルが存在するかチェック
    pub fn config_exists(&self) -> bool {
        self.config_path.exists()
    }

    /// 設定ファイルをバックアップ
    pub fn backup_config(&self) -> Result<PathBuf> {
        if !self.config_path.exists() {
            return Err(anyhow::anyhow!("Config file does not exist"));
        }

        let backup_path = self.config_path.with_extension("toml.bak");
        fs::copy(&self.config_path, &backup_path)
            .with_context(|| format!("Failed to backup config to: {}", backup_path.display()))?;

        info!("📋 Configuration backed up to: {}", backup_path.display());

        Ok(backup_path)
    }
}
