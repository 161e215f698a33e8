//! Default wiring of the built-in interceptors
//!
//! Composition roots call [`install_defaults`] once at startup, register their
//! own interceptors next to the built-ins, and hand the registry to a
//! [`ChainDispatcher`].

use crate::{
    config::ChainConfig,
    interceptors::{
        HeaderStampInterceptor, LoggingInterceptor, RecordCountInterceptor, TombstoneFilter,
    },
    registry::InterceptorRegistry,
    ChainDispatcher, RecordBatch,
};
use std::sync::Arc;
use tracing::info;

/// Register the built-in interceptors enabled by `config`
///
/// Returns the number of interceptors registered.
pub fn install_defaults(
    registry: &InterceptorRegistry<RecordBatch>,
    config: &ChainConfig,
) -> usize {
    let priorities = &config.priorities;
    let mut installed = 0;

    if config.log_batches {
        registry.register(
            LoggingInterceptor::new(config.service_name.clone(), priorities.logging)
                .with_context(&config.common_headers),
        );
        installed += 1;
    }

    if !config.common_headers.is_empty() {
        registry.register(HeaderStampInterceptor::new(
            config.common_headers.clone(),
            priorities.headers,
        ));
        installed += 1;
    }

    if config.drop_tombstones {
        registry.register(TombstoneFilter::new(priorities.tombstones));
        installed += 1;
    }

    if config.count_records {
        registry.register(RecordCountInterceptor::new(
            config.service_name.clone(),
            priorities.counting,
        ));
        installed += 1;
    }

    info!(
        "Installed {} default interceptors for {}",
        installed, config.service_name
    );

    installed
}

/// Build a registry with the defaults installed and a dispatcher over it
pub fn default_chain(
    config: &ChainConfig,
) -> (Arc<InterceptorRegistry<RecordBatch>>, ChainDispatcher<RecordBatch>) {
    let registry = Arc::new(InterceptorRegistry::new());
    install_defaults(&registry, config);
    let dispatcher = ChainDispatcher::new(registry.clone());
    (registry, dispatcher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Record;

    #[test]
    fn test_defaults_follow_flags() {
        let registry = InterceptorRegistry::new();
        let installed = install_defaults(&registry, &ChainConfig::default());

        // logging + counting; no headers configured, tombstones kept
        assert_eq!(installed, 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_default_chain_order() {
        let mut config = ChainConfig::default();
        config.drop_tombstones = true;
        config
            .common_headers
            .insert("team".to_string(), "payments".to_string());

        let (registry, dispatcher) = default_chain(&config);
        registry.register_fn("app", 0, |batch: RecordBatch| Ok(batch.with_marker("app")));

        assert_eq!(
            dispatcher.resolved_names().unwrap(),
            vec!["logging", "headers", "tombstones", "app", "counting"]
        );
    }

    #[test]
    fn test_default_chain_dispatch() {
        let mut config = ChainConfig::default();
        config.service_name = "autoconfig-test".to_string();
        config.drop_tombstones = true;
        config
            .common_headers
            .insert("team".to_string(), "payments".to_string());

        let (_registry, dispatcher) = default_chain(&config);
        let batch = RecordBatch::new(vec![
            Record::new("payments", 0, 1).with_value(b"{}".to_vec()),
            Record::new("payments", 0, 2),
        ]);

        let out = dispatcher.dispatch(batch).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.records[0].headers["team"], "payments");
    }
}
