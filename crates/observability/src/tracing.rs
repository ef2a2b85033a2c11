//! Tracing/logging initialization.
//!
//! Filtering comes from `RUST_LOG` (default `info`), e.g.
//! `RUST_LOG=storefront_infra=debug` to see every cart save. The encoding
//! comes from `STOREFRONT_LOG_FORMAT` (`json` or `text`, default `json`).

use tracing_subscriber::EnvFilter;

/// Log line encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event, for log shippers.
    #[default]
    Json,
    /// Human-readable single-line output, for local runs and tests.
    Text,
}

impl LogFormat {
    /// Parse `json` / `text` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "text" | "pretty" => Some(Self::Text),
            _ => None,
        }
    }

    /// Format named by `STOREFRONT_LOG_FORMAT`; unset or unknown values give the default.
    pub fn from_env() -> Self {
        Self::resolve(std::env::var(LOG_FORMAT_ENV).ok().as_deref())
    }

    fn resolve(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or_default()
    }
}

pub const LOG_FORMAT_ENV: &str = "STOREFRONT_LOG_FORMAT";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops). Returns whether
/// this call installed the subscriber.
pub fn init(format: LogFormat) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    match format {
        LogFormat::Json => builder.json().try_init().is_ok(),
        LogFormat::Text => builder.compact().try_init().is_ok(),
    }
}
