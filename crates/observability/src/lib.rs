//! Tracing/logging (shared setup).

/// Initialize process-wide logging, in the format named by
/// `STOREFRONT_LOG_FORMAT` (JSON unless set to `text`).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::from_env());
}

/// Like [`init`], with an explicit output format.
pub fn init_with(format: LogFormat) {
    tracing::init(format);
}

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use tracing::LogFormat;
