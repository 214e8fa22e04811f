use anyhow::{Context, Result};
use clap::Parser;
use dioxus::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use ailonso::{
    gui::{components::MainWindow, config_manager, utils},
    DashboardSession, DashboardSnapshot, StaticTables,
};

#[derive(Parser, Debug)]
#[command(name = "ailonso")]
#[command(about = "The Ai.lonso Fan Dashboard", long_about = None)]
struct Cli {
    /// 設定ファイルのパス（省略時はXDG設定ディレクトリ）
    #[arg(long)]
    config: Option<PathBuf>,

    /// ログレベル（RUST_LOGが優先）
    #[arg(long)]
    log_level: Option<String>,

    /// 乱数シード（トリビア出題・ファンアクティビティを決定的にする）
    #[arg(long)]
    seed: Option<u64>,

    /// 初期状態のスナップショットをJSONで出力して終了
    #[arg(long, default_value = "false")]
    dump_snapshot: bool,
}

/// `--dump-snapshot` の出力
#[derive(Serialize)]
struct SnapshotDump<'a> {
    session: DashboardSnapshot,
    tables: &'a StaticTables,
}

fn app() -> Element {
    rsx! {
        MainWindow {}
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_manager = match &cli.config {
        Some(path) => config_manager::ConfigManager::with_path(path)?,
        None => config_manager::ConfigManager::new()?,
    };
    let config = config_manager.load_config()?;

    // tokio-consoleの初期化（プロファイリング用）
    #[cfg(feature = "debug-tokio")]
    console_subscriber::init();

    #[cfg(not(feature = "debug-tokio"))]
    let _log_guard = utils::init_logging(&config.log, cli.log_level.as_deref())
        .context("Failed to initialize logging")?;

    tracing::info!("🏎️ Starting Ai.lonso Fan Dashboard");
    tracing::debug!(
        "📁 Config file: {}",
        config_manager.get_config_file_path().display()
    );

    let session = Arc::new(
        DashboardSession::new(config.session_options(cli.seed))
            .context("Failed to create dashboard session")?,
    );

    if cli.dump_snapshot {
        let tables = StaticTables::load();
        let dump = SnapshotDump {
            session: session.snapshot(),
            tables: &tables,
        };
        println!("{}", serde_json::to_string_pretty(&dump)?);
        session.shutdown();
        return Ok(());
    }

    tracing::info!(
        "🪟 ウィンドウ設定: {}x{} at ({}, {}), 最大化: {}",
        config.window.width,
        config.window.height,
        config.window.x,
        config.window.y,
        config.window.maximized
    );

    let launch_builder = dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new().with_window(
                dioxus::desktop::tao::window::WindowBuilder::new()
                    .with_title("Ai.lonso Fan Dashboard")
                    .with_inner_size(dioxus::desktop::tao::dpi::LogicalSize::new(
                        config.window.width as f64,
                        config.window.height as f64,
                    ))
                    .with_position(dioxus::desktop::tao::dpi::LogicalPosition::new(
                        config.window.x as f64,
                        config.window.y as f64,
                    ))
                    .with_maximized(config.window.maximized)
                    .with_always_on_top(config.window.always_on_top)
                    .with_resizable(true),
            ),
        )
        .with_context(Arc::clone(&session));

    // Ctrl+Cシグナルハンドラー
    let signal_session = Arc::clone(&session);
    ctrlc::set_handler(move || {
        tracing::info!("🛑 終了シグナルを受信しました");
        signal_session.shutdown();
        std::process::exit(0);
    })
    .context("Failed to set signal handler")?;

    // Dioxusアプリケーションを起動
    launch_builder.launch(app);

    session.shutdown();
    tracing::info!("👋 Ai.lonso Fan Dashboard shutting down");
    Ok(())
}
