//! Subscriber configuration.
//!
//! - `RUST_LOG` selects the filter (default `info`).
//! - `COFFER_LOG_FORMAT=pretty` switches from JSON lines to human-readable
//!   output.

use tracing_subscriber::EnvFilter;

pub const FORMAT_VAR: &str = "COFFER_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    /// Parse a format name; anything but `pretty` means JSON.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("pretty") => Self::Pretty,
            _ => Self::Json,
        }
    }

    pub fn from_env() -> Self {
        Self::parse(std::env::var(FORMAT_VAR).ok().as_deref())
    }
}

/// Initialize tracing for the process with the format from the environment.
pub fn init() {
    init_with(LogFormat::from_env());
}

/// Initialize tracing for the process. Subsequent calls are no-ops.
pub fn init_with(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .with_target(false)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .pretty()
            .with_target(false)
            .try_init(),
    };
}
