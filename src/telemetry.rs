use anyhow::Context;

use tracing::{subscriber::set_global_default, Subscriber};

use tracing_log::LogTracer;

use tracing_subscriber::fmt::{self, format::FmtSpan, MakeWriter};
use tracing_subscriber::EnvFilter;

/// Fallback filter when `RUST_LOG` is not set
pub const DEFAULT_ENV_FILTER: &str = "info";

/// Filter directives from `RUST_LOG`, or [`DEFAULT_ENV_FILTER`] when unset or invalid
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_ENV_FILTER))
}

/// Build a formatting subscriber writing to `sink`
pub fn create_subscriber<Sink>(env_filter: EnvFilter, sink: Sink) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    fmt::fmt()
        .with_env_filter(env_filter)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_ansi(false)
        .with_writer(sink)
        .finish()
}

/// Install the subscriber globally and route `log` records into it.
/// Can only be called once per process.
pub fn set_subscriber(subscriber: impl Subscriber + Send + Sync) -> anyhow::Result<()> {
    LogTracer::init().context("Failed to initalize logging")?;

    set_global_default(subscriber).context("Failed to set global subscriber")
}
