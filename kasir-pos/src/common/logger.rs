//! Logging Infrastructure
//!
//! Structured logging for the till:
//! - Console output (pretty in development, JSON in production)
//! - Daily rotating application logs (deleted after 14 days)
//! - Permanent audit logs (`audit` target, never deleted)
//! - Permanent security logs (`security` target, never deleted)

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// Days an application log is kept
pub const APP_LOG_RETENTION_DAYS: i64 = 14;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Delete application logs older than [`APP_LOG_RETENTION_DAYS`]
pub fn cleanup_old_logs(log_dir: &Path) -> anyhow::Result<()> {
    let cutoff = Local::now().date_naive() - chrono::Duration::days(APP_LOG_RETENTION_DAYS);
    remove_app_logs_before(log_dir, cutoff)?;
    Ok(())
}

/// Delete `app.YYYY-MM-DD.log` files dated before `cutoff`; returns the count
pub fn remove_app_logs_before(log_dir: &Path, cutoff: NaiveDate) -> anyhow::Result<usize> {
    let app_log_dir = log_dir.join("app");
    if !app_log_dir.exists() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in fs::read_dir(app_log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if let Some(date_part) = name
            .strip_prefix("app.")
            .and_then(|d| d.strip_suffix(".log"))
            && let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            removed += 1;
            tracing::info!(file = %name, "Deleted old log file");
        }
    }

    Ok(removed)
}

fn daily_appender(dir: &Path, prefix: &str) -> anyhow::Result<RollingFileAppender> {
    fs::create_dir_all(dir)?;
    Ok(RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(dir)?)
}

/// File layer that only accepts events matching `accept(target)`
fn file_layer(
    appender: RollingFileAppender,
    json_format: bool,
    accept: fn(&str) -> bool,
) -> BoxedLayer {
    let filter = tracing_subscriber::filter::filter_fn(move |meta| accept(meta.target()));
    let writer = std::sync::Mutex::new(appender);

    if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(writer)
            .with_filter(filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(filter)
            .boxed()
    }
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn")
/// * `json_format` - JSON lines instead of pretty output
/// * `log_dir` - Optional directory for file logging (e.g., `./work_dir/logs`)
///
/// `RUST_LOG` overrides `level` when set. With a log dir, an hourly cleanup
/// task is spawned on the current tokio runtime; outside a runtime old logs
/// are cleaned once instead.
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer: BoxedLayer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    let mut layers = vec![console_layer];
    let mut cleanup_on_start = false;

    if let Some(log_dir) = log_dir {
        let app_log = daily_appender(&log_dir.join("app"), "app")?;
        let audit_log = daily_appender(&log_dir.join("audit"), "audit")?;
        let security_log = daily_appender(&log_dir.join("security"), "security")?;

        layers.push(file_layer(app_log, json_format, |target| {
            target != "audit" && target != "security"
        }));
        layers.push(file_layer(audit_log, json_format, |target| target == "audit"));
        layers.push(file_layer(security_log, json_format, |target| {
            target == "security"
        }));

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(periodic_cleanup(log_dir.to_path_buf()));
            }
            Err(_) => cleanup_on_start = true,
        }
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()?;

    if cleanup_on_start && let Some(log_dir) = log_dir {
        tracing::debug!("No tokio runtime; old logs cleaned once at startup only");
        cleanup_old_logs(log_dir)?;
    }

    Ok(())
}

/// Initialize console-only logging
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

/// Periodic cleanup task - runs every hour to clean old logs
async fn periodic_cleanup(log_dir: PathBuf) {
    use tokio::time::{Duration, sleep};

    loop {
        sleep(Duration::from_secs(3600)).await;

        if let Err(e) = cleanup_old_logs(&log_dir) {
            tracing::error!(error = %e, "Failed to cleanup old logs");
        }
    }
}

/// Audit log helper - records business operations that change money or stock
///
/// Audit logs are written to `audit/audit.YYYY-MM-DD.log` and never deleted.
///
/// # Examples
/// ```ignore
/// audit_log!("till", "checkout", "transaction:3F2A9C1E");
/// audit_log!("owner", "receive_purchase", "purchase:91AB02CD", "supplier=CV Tirta total=90000");
/// ```
#[macro_export]
macro_rules! audit_log {
    ($actor:expr, $action:expr, $resource:expr) => {
        tracing::info!(
            target: "audit",
            actor = %$actor,
            action = %$action,
            resource = %$resource,
            timestamp = %chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
    ($actor:expr, $action:expr, $resource:expr, $details:expr) => {
        tracing::info!(
            target: "audit",
            actor = %$actor,
            action = %$action,
            resource = %$resource,
            details = %$details,
            timestamp = %chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
}

/// Security log helper - records access-control events
///
/// Security logs are written to `security/security.YYYY-MM-DD.log` and
/// never deleted.
///
/// # Examples
/// ```ignore
/// security_log!(WARN, "pin_failed", reason = "no matching role");
/// security_log!(WARN, "permission_denied", role = "staff", permission = ?Permission::ManageSettings);
/// ```
#[macro_export]
macro_rules! security_log {
    (WARN, $event:expr, $($arg:tt)*) => {
        tracing::warn!(
            target: "security",
            event = $event,
            timestamp = %chrono::Local::now().to_rfc3339(),
            $($arg)*
        );
    };
    (ERROR, $event:expr, $($arg:tt)*) => {
        tracing::error!(
            target: "security",
            event = $event,
            timestamp = %chrono::Local::now().to_rfc3339(),
            $($arg)*
        );
    };
    (INFO, $event:expr, $($arg:tt)*) => {
        tracing::info!(
            target: "security",
            event = $event,
            timestamp = %chrono::Local::now().to_rfc3339(),
            $($arg)*
        );
    };
}
