//! Chain dispatcher
//!
//! Folds a consumed batch through every resolved interceptor in priority
//! order. The chain is resolved from the [`InterceptorSource`] on the first
//! dispatch and cached for the lifetime of the dispatcher.
//!
//! # Lifecycle
//!
//! ```text
//!   Unresolved ──(first successful dispatch / chain())──► Resolved
//!       ▲                                                    │
//!       └──────────────────(invalidate, &mut self)───────────┘
//! ```
//!
//! Concurrent first calls race on a compute-once cell: exactly one caller
//! enumerates the registry, the others block until the chain is published.
//! A failed lookup leaves the dispatcher unresolved so the next call retries.

use crate::{
    metrics::{DISPATCH_DURATION, DISPATCH_TOTAL},
    registry::{self, InterceptorSource, SharedInterceptor},
    Result,
};
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Resolved, ordered interceptor chain
pub type ResolvedChain<B> = Arc<[SharedInterceptor<B>]>;

/// Applies the ordered interceptor chain to consumed batches
pub struct ChainDispatcher<B> {
    source: Arc<dyn InterceptorSource<B>>,
    chain: OnceCell<ResolvedChain<B>>,
}

impl<B> ChainDispatcher<B> {
    /// Create dispatcher over an interceptor source
    pub fn new<S>(source: Arc<S>) -> Self
    where
        S: InterceptorSource<B> + 'static,
    {
        Self::from_shared(source)
    }

    /// Create dispatcher over a source already held as a trait object
    pub fn from_shared(source: Arc<dyn InterceptorSource<B>>) -> Self {
        Self {
            source,
            chain: OnceCell::new(),
        }
    }

    /// Run a batch through the chain
    ///
    /// An empty chain returns the batch unchanged. The first interceptor
    /// error is returned as-is and no later interceptor runs. A failed
    /// registry lookup counts as a failed dispatch.
    pub fn dispatch(&self, batch: B) -> Result<B> {
        let _timer = DISPATCH_DURATION.start_timer();

        let chain = match self.chain() {
            Ok(chain) => chain,
            Err(e) => {
                DISPATCH_TOTAL.with_label_values(&["error"]).inc();
                return Err(e);
            }
        };

        let mut current = batch;
        for interceptor in chain.iter() {
            current = match interceptor.on_consume(current) {
                Ok(next) => next,
                Err(e) => {
                    warn!("Interceptor {} failed: {}", interceptor.name(), e);
                    DISPATCH_TOTAL.with_label_values(&["error"]).inc();
                    return Err(e);
                }
            };
        }

        DISPATCH_TOTAL.with_label_values(&["success"]).inc();
        debug!("Dispatched batch through {} interceptors", chain.len());

        Ok(current)
    }

    /// Resolved chain, resolving it on first use
    pub fn chain(&self) -> Result<&ResolvedChain<B>> {
        self.chain.get_or_try_init(|| -> Result<ResolvedChain<B>> {
            let resolved: ResolvedChain<B> = registry::resolve(self.source.as_ref())?.into();
            info!(
                "Resolved interceptor chain: [{}]",
                resolved
                    .iter()
                    .map(|i| format!("{}@{}", i.name(), i.priority()))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            Ok(resolved)
        })
    }

    /// Whether the chain has been resolved
    pub fn is_resolved(&self) -> bool {
        self.chain.get().is_some()
    }

    /// Names of the resolved interceptors in execution order
    pub fn resolved_names(&self) -> Result<Vec<String>> {
        Ok(self
            .chain()?
            .iter()
            .map(|interceptor| interceptor.name().to_string())
            .collect())
    }

    /// Drop the cached chain so the next dispatch enumerates the source again
    pub fn invalidate(&mut self) {
        if self.chain.take().is_some() {
            info!("Interceptor chain invalidated");
        }
    }
}

impl<B> fmt::Debug for ChainDispatcher<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainDispatcher")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
