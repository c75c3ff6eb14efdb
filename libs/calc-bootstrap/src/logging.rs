//! `tracing` subscriber initialisation.

use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LogFormat, LoggingConfig};

/// Filter directive for the configured level and CLI verbosity
/// (`-v` info, `-vv` debug, `-vvv` trace).
///
/// Verbosity only ever raises the default level. Per-target directives such
/// as `calculator=debug` are kept as configured.
#[must_use]
pub fn effective_level(config: &LoggingConfig, verbose: u8) -> String {
    let requested = match verbose {
        0 => return config.level.clone(),
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let mut default = requested;
    let mut directives = Vec::new();
    for part in config.level.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.parse::<LevelFilter>() {
            Ok(level) => default = default.max(level),
            Err(_) => directives.push(part.to_owned()),
        }
    }
    directives.push(default.to_string());
    directives.join(",")
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over both the config and `verbose`. When `config.file` is
/// set, output goes through a non-blocking daily-rolling appender and the
/// returned guard must be held until shutdown to flush it.
///
/// A subscriber that is already installed is left in place.
///
/// # Errors
/// Returns an error if the level directive is invalid or the log directory
/// cannot be created.
pub fn init_logging(config: &LoggingConfig, verbose: u8) -> anyhow::Result<Option<WorkerGuard>> {
    let level = effective_level(config, verbose);
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&level)
            .with_context(|| format!("invalid log level directive '{level}'"))?,
    };

    let (writer, guard) = match config.file.as_deref() {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            (writer, Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(writer))
            .try_init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(config.file.is_none())
                    .with_writer(writer),
            )
            .try_init(),
    };

    match result {
        Ok(()) => tracing::info!(%level, format = ?config.format, "logging initialized"),
        Err(e) => tracing::debug!(error = %e, "global subscriber already set, keeping it"),
    }

    Ok(guard)
}

fn file_writer(path: &Path) -> anyhow::Result<(BoxMakeWriter, WorkerGuard)> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .with_context(|| format!("log file path has no file name: {}", path.display()))?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    Ok((BoxMakeWriter::new(non_blocking), guard))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        let config = LoggingConfig {
            level: "warn".to_owned(),
            ..LoggingConfig::default()
        };
        assert_eq!(effective_level(&config, 0), "warn");
        assert_eq!(effective_level(&config, 1), "info");
        assert_eq!(effective_level(&config, 2), "debug");
        assert_eq!(effective_level(&config, 7), "trace");
    }

    #[test]
    fn verbosity_never_lowers_level() {
        let config = LoggingConfig {
            level: "debug".to_owned(),
            ..LoggingConfig::default()
        };
        assert_eq!(effective_level(&config, 1), "debug");
        assert_eq!(effective_level(&config, 3), "trace");
    }

    #[test]
    fn verbosity_keeps_target_directives() {
        let config = LoggingConfig {
            level: "calculator=debug, info".to_owned(),
            ..LoggingConfig::default()
        };
        assert_eq!(effective_level(&config, 0), "calculator=debug, info");
        assert_eq!(effective_level(&config, 1), "calculator=debug,info");
        assert_eq!(effective_level(&config, 2), "calculator=debug,debug");

        let targets_only = LoggingConfig {
            level: "api_gateway=trace".to_owned(),
            ..LoggingConfig::default()
        };
        assert_eq!(effective_level(&targets_only, 1), "api_gateway=trace,info");
        assert!(EnvFilter::try_new(effective_level(&targets_only, 1)).is_ok());
    }

    #[test]
    fn file_logging_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            file: Some(dir.path().join("logs").join("bigcalc.log")),
            ..LoggingConfig::default()
        };

        let guard = init_logging(&config, 0).unwrap();
        assert!(guard.is_some());
        assert!(dir.path().join("logs").is_dir());
        tracing::info!("file logging test");
        drop(guard);
    }

    #[test]
    fn stderr_logging_has_no_guard() {
        let guard = init_logging(&LoggingConfig::default(), 0).unwrap();
        assert!(guard.is_none());
    }
}
