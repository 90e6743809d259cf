//! Process-wide logging setup for ledger hosts.

/// Initialize process-wide tracing with JSON output.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::Json);
}

/// Tracing configuration (filters, formatters).
pub mod tracing;

pub use self::tracing::{LogFormat, DEFAULT_FILTER};
