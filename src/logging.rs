//! Log setup.
//!
//! The terminal belongs to the UI, so events go to a daily rolling file
//! instead of stdout.  `RUST_LOG` overrides the default filter.

use std::path::Path;

use tracing_appender::rolling;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,sqlx=warn";

pub fn configure_logging(log_dir: &Path) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_appender = rolling::daily(log_dir, "headline-reader.log");
    let file_log = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_filter(filter);

    tracing_subscriber::registry().with(file_log).init();
}
