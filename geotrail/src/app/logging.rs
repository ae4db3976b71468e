//! Logging bootstrap.
//!
//! Structured logging via `tracing`, filtered with `RUST_LOG` when set.
//! Interactive front-ends log to a daily-rolled file so the terminal UI
//! stays clean; everything else logs to stderr.

use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "geotrail=info";

/// Log file name used with file logging.
const LOG_FILE_PREFIX: &str = "geotrail.log";

/// Initialize the global subscriber.
///
/// With `log_dir` set, log lines go to a daily-rolled file in that
/// directory and the returned guard must be held until shutdown so the
/// writer flushes. Without it, lines go to stderr and no guard is needed.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(default_filter: &str, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Local timestamps when the offset is determinable, UTC otherwise.
    let timer = OffsetTime::local_rfc_3339().unwrap_or_else(|_| {
        OffsetTime::new(
            time::UtcOffset::UTC,
            time::format_description::well_known::Rfc3339,
        )
    });

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_timer(timer)
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .try_init();
            Some(guard)
        }
        None => {
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_timer(timer).with_writer(io::stderr))
                .try_init();
            None
        }
    }
}
