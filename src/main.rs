//! # Discover-QA 入口
//!
//! 命令行入口：加载配置、初始化日志、按标签选择场景并顺序执行，最后输出控制台报告和 JSON 报告。
//!
//! ## 用法
//! - `discover-qa`：运行全部场景
//! - `discover-qa smoke|regression|negative`：只运行带该标签的场景
//! - `--headless`：无界面模式
//! - `--config FILE`：从 TOML 文件加载配置
//!
//! ## 环境变量
//! - `DISCOVER_QA_BASE_URL`: 被测站点（默认: https://tmdb-discover.surge.sh/）
//! - `DISCOVER_QA_HEADLESS`: 无界面模式
//! - `RUST_LOG`: 日志过滤（默认: info）
//!
//! 任一场景失败时进程以退出码 1 结束。

use anyhow::Context;
use clap::Parser;
use discover_qa::{
    config::Config,
    driver::SessionProvider,
    logging::{self, LoggingConfig},
    scenarios::{self, SuiteRunner, Tag},
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "discover-qa", version, about = "Browser test suite for the TMDB Discover site")]
struct Cli {
    /// Only run scenarios carrying this tag
    #[arg(value_enum)]
    tag: Option<Tag>,

    /// Run the browser without a window
    #[arg(long)]
    headless: bool,

    /// TOML configuration file
    #[arg(long, short, value_name = "FILE", env = "DISCOVER_QA_CONFIG")]
    config: Option<PathBuf>,

    /// Site under test
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let path = path.to_string_lossy();
            let mut config = Config::from_file(&path)
                .with_context(|| format!("loading {}", path))?;
            config.apply_env()?;
            config
        }
        None => Config::from_env()?,
    };

    if cli.headless {
        config.headless = true;
    }
    if let Some(url) = &cli.base_url {
        config.base_url = url.clone();
    }

    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let _log_guard = logging::init(&LoggingConfig::from(&config))
        .context("initializing logging")?;

    info!("Discover-QA v{}", discover_qa::VERSION);
    info!(
        "Configuration loaded: base_url={}, headless={}",
        config.base_url, config.headless
    );

    let selected = scenarios::select(cli.tag);
    match cli.tag {
        Some(tag) => info!("Running {} scenarios tagged {}", selected.len(), tag),
        None => info!("Running all {} scenarios", selected.len()),
    }

    let provider = SessionProvider::from_config(&config);
    let report_dir = config.report_dir.clone();
    let mut runner = SuiteRunner::new(provider, Arc::new(config));
    runner.run_all(&selected).await;

    let report = runner.into_report();
    report.print_console_report();

    match report.write_json(&report_dir) {
        Ok(path) => info!("Report saved: {}", path.display()),
        Err(e) => error!("Failed to write report: {}", e),
    }

    if report.has_failures() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
