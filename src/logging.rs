//! Tracing setup for binaries and UIs embedding the board.
//!
//! Tracing is opt-in via RUST_LOG and off otherwise.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filters longer than this are ignored.
const MAX_FILTER_LEN: usize = 4096;

/// Build the filter for a raw RUST_LOG value. Empty, oversized or invalid
/// filters fall back to `off`.
pub fn filter_from(raw: Option<&str>) -> EnvFilter {
    raw.and_then(|raw| {
        let raw = raw.trim();
        if raw.is_empty() || raw.len() > MAX_FILTER_LEN {
            return None;
        }
        EnvFilter::try_new(raw).ok()
    })
    .unwrap_or_else(|| EnvFilter::new("off"))
}

/// Install a fmt subscriber filtered by RUST_LOG. Later calls are no-ops.
pub fn init() {
    let raw = std::env::var("RUST_LOG").ok();
    let filter = filter_from(raw.as_deref());

    let _ = tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_filter_is_off() {
        assert_eq!(filter_from(None).to_string(), "off");
        assert_eq!(filter_from(Some("   ")).to_string(), "off");
    }

    #[test]
    fn oversized_filter_is_off() {
        let huge = "a".repeat(MAX_FILTER_LEN + 1);
        assert_eq!(filter_from(Some(huge.as_str())).to_string(), "off");
    }

    #[test]
    fn valid_filter_is_kept() {
        assert_eq!(filter_from(Some("taskmaster=debug")).to_string(), "taskmaster=debug");
    }

    #[test]
    fn init_twice_does_not_panic() {
        init();
        init();
    }
}
