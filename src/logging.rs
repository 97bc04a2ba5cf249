//! Logging setup
//!
//! Console and daily-rolling file output share one line format:
//! `timestamp - target - LEVEL - message`.

use chrono::Local;
use std::fmt;
use std::path::PathBuf;
use tracing::{Event, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::{Error, Result};

/// Logging settings
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directory for `{file_prefix}.YYYY-MM-DD.log`
    pub log_dir: PathBuf,
    pub file_prefix: String,
    /// Filter used when `RUST_LOG` is unset
    pub default_filter: String,
    /// Also write to stdout
    pub console: bool,
}

impl From<&Config> for LoggingConfig {
    fn from(config: &Config) -> Self {
        Self {
            log_dir: config.log_dir.clone(),
            file_prefix: "test_run".to_string(),
            default_filter: "info".to_string(),
            console: true,
        }
    }
}

/// Keeps the file writer flushing; drop it only at process exit
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _file: WorkerGuard,
}

/// `timestamp - target - LEVEL - message`
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();
        write!(
            writer,
            "{} - {} - {} - ",
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            meta.target(),
            meta.level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Install the global subscriber
pub fn init(config: &LoggingConfig) -> Result<LogGuard> {
    std::fs::create_dir_all(&config.log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(&config.file_prefix)
        .filename_suffix("log")
        .build(&config.log_dir)
        .map_err(|e| Error::configuration(format!("Failed to open log file: {}", e)))?;
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let console = config.console.then(|| {
        tracing_subscriber::fmt::layer()
            .event_format(LineFormat)
            .with_writer(std::io::stdout)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(LineFormat)
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .try_init()
        .map_err(|e| Error::configuration(format!("Failed to install logger: {}", e)))?;

    Ok(LogGuard { _file: guard })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_format() {
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Buffer(Arc<Mutex<Vec<u8>>>);

        impl std::io::Write for Buffer {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let buffer = Buffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .event_format(LineFormat)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "discover_qa::pages", "Could not search: timeout");
        });

        let line = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(line.ends_with(" - discover_qa::pages - WARN - Could not search: timeout\n"));
    }

    #[test]
    fn test_logging_config_from_config() {
        let config = Config::default();
        let logging = LoggingConfig::from(&config);
        assert_eq!(logging.log_dir, PathBuf::from("logs"));
        assert_eq!(logging.file_prefix, "test_run");
    }
}
