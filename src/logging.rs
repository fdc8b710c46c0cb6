use std::path::Path;
use std::sync::Once;

use anyhow::Context;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_LOG_LEVEL: &str = "info";
/// Console default while the wizard is asking questions. Progress is already
/// shown through the prompter, so the console only carries problems.
const INTERACTIVE_CONSOLE_LEVEL: &str = "warn";
const ENV_VAR_NAME: &str = "BCD_PR_LOG";

static INIT: Once = Once::new();

/// Initialize the global tracing subscriber for a non-interactive command.
///
/// Output goes to stderr. When `log_file` is provided, output also goes to
/// that file (appending, JSON). The filter is resolved with precedence:
/// `BCD_PR_LOG` env var > `log_level` argument > default (`info`).
///
/// Only the first call installs a subscriber.
pub fn init(log_level: Option<&str>, log_file: Option<&Path>) -> anyhow::Result<()> {
    init_once(DEFAULT_LOG_LEVEL, log_level, log_file)
}

/// Like [`init`], but the console defaults to `warn` so log lines do not
/// interleave with the questions. An explicit `BCD_PR_LOG` or `log_level`
/// still applies to the console. The file layer keeps the `info` default.
pub fn init_interactive(log_level: Option<&str>, log_file: Option<&Path>) -> anyhow::Result<()> {
    init_once(INTERACTIVE_CONSOLE_LEVEL, log_level, log_file)
}

fn init_once(
    console_default: &str,
    log_level: Option<&str>,
    log_file: Option<&Path>,
) -> anyhow::Result<()> {
    let mut init_err: Option<anyhow::Error> = None;

    INIT.call_once(|| {
        if let Err(e) = try_init(console_default, log_level, log_file) {
            init_err = Some(e);
        }
    });

    match init_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn try_init(
    console_default: &str,
    log_level: Option<&str>,
    log_file: Option<&Path>,
) -> anyhow::Result<()> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_ansi(true)
        .compact()
        .with_filter(build_filter(log_level, console_default));

    let result: Result<(), TryInitError> = match log_file {
        Some(path) => {
            let file = open_log_file(path)?;
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(file)
                .with_target(false)
                .with_thread_ids(false)
                .with_ansi(false)
                .json()
                .with_filter(build_filter(log_level, DEFAULT_LOG_LEVEL));

            tracing_subscriber::registry()
                .with(stderr_layer)
                .with(file_layer)
                .try_init()
        }
        None => tracing_subscriber::registry().with(stderr_layer).try_init(),
    };

    result.context("failed to initialize logging")
}

fn build_filter(log_level: Option<&str>, default: &str) -> EnvFilter {
    // BCD_PR_LOG takes highest precedence (handled by EnvFilter::try_from_env).
    EnvFilter::try_from_env(ENV_VAR_NAME).unwrap_or_else(|_| {
        let directive = log_level.unwrap_or(default);
        EnvFilter::new(directive)
    })
}

fn open_log_file(path: &Path) -> anyhow::Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("failed to create log file directory {}", parent.display())
        })?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}
