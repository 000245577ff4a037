//! # reveal-host
//!
//! 在无界面环境中回放滚动过程，输出入场动画派发时间线。
//!
//! ## 用法
//!
//! ```bash
//! reveal-host simulate --page assets/page.json --script assets/scroll.json
//! reveal-host simulate --page assets/page.json --format json
//! reveal-host check --page assets/page.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;

use reveal_host::{AppConfig, PageDocument, RevealSession, ScrollScript};
use reveal_runtime::{RecordingEngine, RecordingTrigger, RevealScheduler};

#[derive(Parser)]
#[command(name = "reveal-host")]
#[command(about = "入场动画调度回放工具")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 配置文件（默认：config.json）
    #[arg(short, long, default_value = "config.json", global = true)]
    config: PathBuf,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// 回放滚动脚本并输出派发时间线
    Simulate {
        /// 页面描述文件
        #[arg(short, long)]
        page: PathBuf,

        /// 滚动脚本；省略时只执行初始化
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// 输出格式
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// 检查页面属性，输出回退诊断
    Check {
        /// 页面描述文件
        #[arg(short, long)]
        page: PathBuf,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config);

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        config.log_level().unwrap_or(Level::INFO)
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    config.validate().context("配置无效")?;

    match cli.command {
        Commands::Simulate {
            page,
            script,
            format,
        } => simulate(config, &page, script.as_deref(), format),
        Commands::Check { page } => check(&config, &page),
    }
}

/// 回放并输出时间线
fn simulate(
    config: AppConfig,
    page_path: &std::path::Path,
    script_path: Option<&std::path::Path>,
    format: OutputFormat,
) -> Result<()> {
    let page = PageDocument::load(page_path)?;
    let script = match script_path {
        Some(path) => ScrollScript::load(path)?,
        None => ScrollScript::default(),
    };

    let mut session = RevealSession::new(page, config);
    session.run_script(&script);

    match format {
        OutputFormat::Table => {
            for record in session.timeline() {
                println!("{}", record);
            }
            println!(
                "共 {} 条记录，{} 条补间轨道播放完毕，结束于 {:.3}s",
                session.timeline().len(),
                session.completed_tracks(),
                session.now()
            );
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(session.timeline())
                .context("时间线序列化失败")?;
            println!("{}", json);
        }
    }

    Ok(())
}

/// 只初始化调度器，输出属性诊断
fn check(config: &AppConfig, page_path: &std::path::Path) -> Result<()> {
    let page = PageDocument::load(page_path)?;
    let mut trigger = RecordingTrigger::default();
    let mut engine = RecordingEngine::default();

    let scheduler = RevealScheduler::initialize(
        config.reveal_config(),
        page.snapshots(page.viewport.scroll_y),
        page.viewport.width,
        &mut trigger,
        &mut engine,
    );

    let diagnostics = scheduler.diagnostics();
    if diagnostics.is_empty() {
        let count = scheduler.targets().len() + scheduler.revealed_at_init().len();
        println!("✅ {} 个目标，没有属性问题", count);
        return Ok(());
    }

    for diagnostic in diagnostics {
        println!("⚠️ {} ({})", diagnostic, page.display_name(diagnostic.target));
    }
    println!("共 {} 条诊断", diagnostics.len());
    Ok(())
}
