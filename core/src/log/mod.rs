//! Logging bootstrap.
//!
//! Installs a `tracing` subscriber with a stderr layer and, optionally, a rolling file sink
//! under the platform data directory. Records emitted through the `log` crate are forwarded
//! into `tracing`. Call [`init`] once at startup; later calls return the first handle.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::SystemTime;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::Rotation;
use tracing_log::AsLog;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, util::SubscriberInitExt};

use crate::config::{APP_NAME, APP_ORGANISATION, APP_QUALIFIER};

const ENV_FILTER_VARS: [&str; 2] = ["BUCKET_BROWSER_LOG", "RUST_LOG"];

static LOG_HANDLE: OnceLock<LogHandle> = OnceLock::new();

pub use tracing_subscriber::filter::LevelFilter as LogLevel;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LogRolling {
    Hourly,
    Daily,
    Never,
}

impl From<LogRolling> for Rotation {
    fn from(rolling: LogRolling) -> Self {
        match rolling {
            LogRolling::Hourly => Rotation::HOURLY,
            LogRolling::Daily => Rotation::DAILY,
            LogRolling::Never => Rotation::NEVER,
        }
    }
}

/// Rolling file destination.
#[derive(Debug, Clone)]
pub struct FileSink {
    pub directory: PathBuf,
    /// Log files are named `<prefix>.<date>.log`.
    pub prefix: String,
    /// Keep at most this many files; `None` keeps everything.
    pub retention: Option<usize>,
    pub level: LevelFilter,
    pub rolling: LogRolling,
}

impl Default for FileSink {
    fn default() -> Self {
        Self {
            directory: default_log_directory(),
            prefix: APP_NAME.to_string(),
            retention: Some(7),
            level: LevelFilter::DEBUG,
            rolling: LogRolling::Daily,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub console_level: LevelFilter,
    /// `None` logs to stderr only, which is what short-lived CLI runs usually want.
    pub file: Option<FileSink>,
    pub capture_log: bool,
    /// Filter directive such as `bucket_core=trace`. Falls back to the environment.
    pub env_filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        let console_level =
            if cfg!(debug_assertions) { LevelFilter::INFO } else { LevelFilter::WARN };
        Self {
            console_level,
            file: Some(FileSink::default()),
            capture_log: true,
            env_filter: None,
        }
    }
}

impl LogConfig {
    pub fn console_only(console_level: LevelFilter) -> Self {
        Self { console_level, file: None, ..Self::default() }
    }

    pub fn with_file_directory<P: Into<PathBuf>>(mut self, directory: P) -> Self {
        let sink = self.file.get_or_insert_with(FileSink::default);
        sink.directory = directory.into();
        self
    }

    fn max_level(&self) -> LevelFilter {
        let file_level = self.file.as_ref().map_or(LevelFilter::OFF, |sink| sink.level);
        self.console_level.max(file_level)
    }
}

/// Keeps the background file writer alive.
#[derive(Debug)]
pub struct LogHandle {
    _guard: Option<WorkerGuard>,
    directory: Option<PathBuf>,
}

impl LogHandle {
    /// Directory of the file sink, if one was installed.
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }
}

/// Install the global subscriber. The first call wins.
pub fn init(config: LogConfig) -> Result<&'static LogHandle> {
    if let Some(handle) = LOG_HANDLE.get() {
        return Ok(handle);
    }

    let handle = setup(config)?;
    Ok(LOG_HANDLE.get_or_init(|| handle))
}

fn setup(config: LogConfig) -> Result<LogHandle> {
    if config.capture_log {
        let max_level = config.max_level().as_log();
        let _ = tracing_log::LogTracer::builder().with_max_level(max_level).init();
    }

    let directive = config
        .env_filter
        .clone()
        .or_else(|| ENV_FILTER_VARS.iter().find_map(|var| std::env::var(var).ok()))
        .filter(|directive| !directive.trim().is_empty());
    // Without a directive the layers' own levels decide.
    let env_filter = match directive {
        Some(directive) => {
            EnvFilter::try_new(directive).context("parsing log filter directive")?
        }
        None => EnvFilter::default().add_directive(config.max_level().into()),
    };

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(config.console_level);

    let (file_layer, guard, directory) = match config.file {
        Some(sink) => {
            let (writer, guard) = file_writer(&sink)?;
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_file(true)
                .with_line_number(true)
                .with_filter(sink.level);
            (Some(layer), Some(guard), Some(sink.directory))
        }
        None => (None, None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))?;

    Ok(LogHandle { _guard: guard, directory })
}

fn file_writer(
    sink: &FileSink,
) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    fs::create_dir_all(&sink.directory)
        .with_context(|| format!("creating log directory at {}", sink.directory.display()))?;

    if let Some(retention) = sink.retention.filter(|keep| *keep > 0) {
        prune_old_logs(&sink.directory, &sink.prefix, retention)
            .context("applying log retention policy")?;
    }

    let appender = tracing_appender::rolling::Builder::new()
        .rotation(sink.rolling.into())
        .filename_prefix(&sink.prefix)
        .filename_suffix("log")
        .build(&sink.directory)
        .context("creating rolling log appender")?;

    Ok(tracing_appender::non_blocking(appender))
}

/// Delete the oldest `<prefix>*` files beyond `retention`.
fn prune_old_logs(dir: &Path, prefix: &str, retention: usize) -> Result<()> {
    let mut entries: Vec<(PathBuf, SystemTime)> = fs::read_dir(dir)
        .with_context(|| format!("reading log directory at {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let meta = entry.metadata().ok().filter(|meta| meta.is_file())?;
            let path = entry.path();
            let matches = path
                .file_name()
                .and_then(OsStr::to_str)
                .is_some_and(|name| name.starts_with(prefix));
            matches.then(|| (path, meta.modified().unwrap_or(SystemTime::UNIX_EPOCH)))
        })
        .collect();

    if entries.len() <= retention {
        return Ok(());
    }

    entries.sort_by_key(|(_, modified)| *modified);
    let excess = entries.len() - retention;
    for (path, _) in entries.into_iter().take(excess) {
        let _ = fs::remove_file(&path);
    }

    Ok(())
}

fn default_log_directory() -> PathBuf {
    directories::ProjectDirs::from(APP_QUALIFIER, APP_ORGANISATION, APP_NAME)
        .map(|dirs| dirs.data_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("bucket-browser-logs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let temp = tempfile::tempdir().expect("temp dir");
        let config = LogConfig::default().with_file_directory(temp.path().join("logs"));

        let first = init(config.clone()).expect("init once");
        assert!(first.directory().is_some_and(Path::exists));

        let second = init(config).expect("init twice");
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn prune_keeps_newest_files() {
        let temp = tempfile::tempdir().unwrap();
        for name in ["app.1.log", "app.2.log", "app.3.log", "other.log"] {
            fs::write(temp.path().join(name), b"x").unwrap();
            std::thread::sleep(std::time::Duration::from_millis(20));
        }

        prune_old_logs(temp.path(), "app", 2).unwrap();

        let mut left: Vec<String> = fs::read_dir(temp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        left.sort();
        assert_eq!(left, vec!["app.2.log", "app.3.log", "other.log"]);
    }

    #[test]
    fn console_only_has_no_file_sink() {
        let config = LogConfig::console_only(LevelFilter::WARN);
        assert!(config.file.is_none());
        assert_eq!(config.max_level(), LevelFilter::WARN);
    }
}
