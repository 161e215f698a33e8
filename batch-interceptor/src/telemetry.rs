//! Tracing subscriber setup for binaries and consumers embedding the chain

use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber
///
/// Honors `RUST_LOG`, defaulting to `info`. Returns an error if a global
/// subscriber is already set.
pub fn init_tracing(json: bool) -> crate::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| crate::Error::Config(format!("Failed to install tracing subscriber: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let _ = init_tracing(false);
        assert!(matches!(init_tracing(true), Err(crate::Error::Config(_))));
    }
}
