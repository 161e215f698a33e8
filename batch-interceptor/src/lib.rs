//! Ordered interceptor chain for consumed message batches
//!
//! Provides:
//! - A batch interceptor contract with explicit priorities
//! - An explicit registry the composition root populates at startup
//! - A dispatcher that resolves the chain once and folds batches through it
//! - Built-in interceptors (logging context, common headers, tombstone filter,
//!   per-topic record counts) wired from configuration
//! - An async consumer adapter feeding intercepted batches to a handler
//!
//! # Example
//!
//! ```
//! use batch_interceptor::{ChainDispatcher, InterceptorRegistry, RecordBatch};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(InterceptorRegistry::new());
//! registry.register_fn("audit", 10, |batch: RecordBatch| Ok(batch.with_marker("audited")));
//!
//! let dispatcher = ChainDispatcher::new(registry);
//! let batch = dispatcher.dispatch(RecordBatch::default()).unwrap();
//! assert_eq!(batch.metadata, vec!["audited".to_string()]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod autoconfig;
pub mod config;
pub mod consumer;
pub mod dispatcher;
pub mod error;
pub mod interceptor;
pub mod interceptors;
pub mod metrics;
pub mod registry;
pub mod telemetry;
pub mod types;

pub use config::ChainConfig;
pub use consumer::{BatchHandler, InterceptingConsumer};
pub use dispatcher::ChainDispatcher;
pub use error::{Error, Result};
pub use interceptor::{BatchInterceptor, FnInterceptor, DEFAULT_PRIORITY};
pub use registry::{InterceptorRegistry, InterceptorSource, SharedInterceptor};
pub use types::{Record, RecordBatch};
