//! Log sink initialization

use anyhow::Context;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LogTarget;

/// Install the global tracing subscriber writing to `target`.
///
/// `RUST_LOG` takes precedence over `log_level` when set.
pub fn init(target: &LogTarget, log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("httpq={log_level},httpq_core={log_level},tower_http=debug").into()
    });

    let (writer, ansi) = match target {
        LogTarget::Stdout => (BoxMakeWriter::new(std::io::stdout), true),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(ansi))
        .try_init()
        .context("failed to install log subscriber")?;

    Ok(())
}
