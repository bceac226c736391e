//! Logging setup
//!
//! Console output goes to stderr so command output on stdout stays clean.
//! With a log directory, application events are also written to a daily
//! rotating `app` file, and events with target `"audit"` (price commits,
//! CRUD writes) to a separate `audit` file.

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initialize logging
///
/// # Arguments
/// * `level` - default level when `RUST_LOG` is unset (e.g. "info")
/// * `json_format` - JSON lines instead of human-readable output
/// * `log_dir` - optional directory for rotating log files
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .with_filter(env_filter(level))
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .with_filter(env_filter(level))
            .boxed()
    };
    layers.push(console_layer);

    if let Some(dir) = log_dir {
        let app_dir = dir.join("app");
        let audit_dir = dir.join("audit");
        fs::create_dir_all(&app_dir)?;
        fs::create_dir_all(&audit_dir)?;

        let app_log = RollingFileAppender::new(Rotation::DAILY, app_dir, "app");
        layers.push(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(app_log))
                .with_filter(env_filter(level))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() != "audit"
                }))
                .boxed(),
        );

        let audit_log = RollingFileAppender::new(Rotation::DAILY, audit_dir, "audit");
        layers.push(
            fmt::layer()
                .json()
                .with_target(true)
                .with_writer(std::sync::Mutex::new(audit_log))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() == "audit"
                }))
                .boxed(),
        );
    }

    tracing_subscriber::registry().with(layers).try_init()?;
    Ok(())
}

/// Console-only logging
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

/// Record a data-changing operation on the `audit` target
///
/// ```no_run
/// pos_admin::audit_log!("update", "prices:product:7", "2 prices");
/// ```
#[macro_export]
macro_rules! audit_log {
    ($action:expr, $resource:expr) => {
        tracing::info!(target: "audit", action = $action, resource = %$resource, "AUDIT")
    };
    ($action:expr, $resource:expr, $details:expr) => {
        tracing::info!(
            target: "audit",
            action = $action,
            resource = %$resource,
            details = %$details,
            "AUDIT"
        )
    };
}
