//! Logging bootstrap for the schemes core.
//!
//! # Responsibility
//! - Start rolling file logs at most once per process.
//! - Keep emitted events metadata-only.
//!
//! # Invariants
//! - A second init with the same configuration is a no-op.
//! - A second init with a different configuration is rejected.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "schemes";
const ROTATE_AT_BYTES: u64 = 8 * 1024 * 1024;
const KEPT_LOG_FILES: usize = 4;

static ACTIVE: OnceCell<ActiveLogging> = OnceCell::new();

struct ActiveLogging {
    config: LogConfig,
    _handle: LoggerHandle,
}

/// Validated logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LogConfig {
    level: &'static str,
    dir: PathBuf,
}

impl LogConfig {
    fn parse(level: &str, log_dir: &str) -> Result<Self, String> {
        let level = match level.trim().to_ascii_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" | "warning" => "warn",
            "error" => "error",
            other => {
                return Err(format!(
                    "log level `{other}` is not one of trace|debug|info|warn|error"
                ))
            }
        };

        let dir = log_dir.trim();
        if dir.is_empty() {
            return Err("log directory is empty".to_string());
        }
        let dir = Path::new(dir);
        if !dir.is_absolute() {
            return Err(format!("log directory `{}` is not absolute", dir.display()));
        }

        Ok(Self {
            level,
            dir: dir.to_path_buf(),
        })
    }
}

/// Starts file logging, or verifies it is already running with the same
/// configuration.
///
/// # Errors
/// - `level` is not a known log level.
/// - `log_dir` is empty, relative, or cannot be created.
/// - Logging already runs with a different level or directory.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let config = LogConfig::parse(level, log_dir)?;

    let active = ACTIVE.get_or_try_init(|| start(config.clone()))?;
    if active.config != config {
        return Err(format!(
            "logging already runs with level `{}` at `{}`",
            active.config.level,
            active.config.dir.display()
        ));
    }

    Ok(())
}

fn start(config: LogConfig) -> Result<ActiveLogging, String> {
    std::fs::create_dir_all(&config.dir).map_err(|err| {
        format!(
            "cannot create log directory `{}`: {err}",
            config.dir.display()
        )
    })?;

    let handle = Logger::try_with_str(config.level)
        .map_err(|err| format!("bad log spec `{}`: {err}", config.level))?
        .log_to_file(
            FileSpec::default()
                .directory(config.dir.as_path())
                .basename(LOG_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEPT_LOG_FILES),
        )
        .append()
        .write_mode(WriteMode::BufferAndFlush)
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("cannot start logger: {err}"))?;

    info!(
        "event=core_init module=core status=ok level={} log_dir={} version={}",
        config.level,
        config.dir.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogging {
        config,
        _handle: handle,
    })
}

/// Returns `(level, log_dir)` of the running logger, or `None` before init.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE
        .get()
        .map(|active| (active.config.level, active.config.dir.clone()))
}

/// Default log level for the current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}
