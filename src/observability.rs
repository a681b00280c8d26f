//! Structured diagnostics for the codec.
//!
//! The `log_metric!` macro renders key/value pairs as a single JSON-like record
//! and hands it to the `log` facade under the `blockpack::metric` target at
//! `Trace` level. The whole expansion sits behind `#[cfg(debug_assertions)]`, so
//! release builds compile it out and the block hot path stays untouched.

/// Target used for every metric record, so it can be filtered with
/// `RUST_LOG=blockpack::metric=trace`.
pub const METRIC_TARGET: &str = "blockpack::metric";

/// Logs a structured key-value metric through `log::trace!`, only in debug builds.
///
/// # Example
/// ```ignore
/// log_metric!("event"="encode_block", "bits"=&bits);
/// ```
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        #[cfg(debug_assertions)]
        {
            if log::log_enabled!(target: $crate::observability::METRIC_TARGET, log::Level::Trace) {
                let mut parts = Vec::new();
                $(
                    parts.push(format!("\"{}\": \"{}\"", $key, $value));
                )+
                log::trace!(
                    target: $crate::observability::METRIC_TARGET,
                    "BLOCKPACK_METRIC: {{ {} }}",
                    parts.join(", ")
                );
            }
        }
    };
}
