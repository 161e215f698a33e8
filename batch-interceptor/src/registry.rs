//! Interceptor registry and lookup
//!
//! Interceptors are registered explicitly by the composition root. The
//! dispatcher only sees an [`InterceptorSource`], the narrow "enumerate every
//! interceptor" operation, so any directory (a static list, a plugin loader,
//! a container adapter) can stand behind it.

use crate::{
    interceptor::{BatchInterceptor, FnInterceptor},
    metrics::REGISTRY_RESOLVE_TOTAL,
    Result,
};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Interceptor shared between the registry and dispatchers
pub type SharedInterceptor<B> = Arc<dyn BatchInterceptor<B>>;

/// Enumerates every registered interceptor
pub trait InterceptorSource<B>: Send + Sync {
    /// Return all interceptors in discovery order
    fn interceptors(&self) -> Result<Vec<SharedInterceptor<B>>>;
}

impl<B, F> InterceptorSource<B> for F
where
    F: Fn() -> Result<Vec<SharedInterceptor<B>>> + Send + Sync,
{
    fn interceptors(&self) -> Result<Vec<SharedInterceptor<B>>> {
        self()
    }
}

/// Registry populated at startup
///
/// Discovery order is registration order. Registering after a dispatcher has
/// resolved its chain has no effect on that dispatcher.
pub struct InterceptorRegistry<B> {
    entries: RwLock<Vec<SharedInterceptor<B>>>,
}

impl<B> InterceptorRegistry<B> {
    /// Create empty registry
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Register an interceptor
    pub fn register<I>(&self, interceptor: I)
    where
        I: BatchInterceptor<B> + 'static,
    {
        self.register_shared(Arc::new(interceptor));
    }

    /// Register an interceptor that is also held elsewhere
    pub fn register_shared(&self, interceptor: SharedInterceptor<B>) {
        debug!(
            "Registering interceptor {} (priority {})",
            interceptor.name(),
            interceptor.priority()
        );
        self.entries.write().push(interceptor);
    }

    /// Register a closure as an interceptor
    pub fn register_fn<F>(&self, name: impl Into<String>, priority: i32, func: F)
    where
        F: Fn(B) -> Result<B> + Send + Sync + 'static,
        B: 'static,
    {
        self.register(FnInterceptor::new(name, priority, func));
    }

    /// Number of registered interceptors
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<B> Default for InterceptorRegistry<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> fmt::Debug for InterceptorRegistry<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.read();
        f.debug_struct("InterceptorRegistry")
            .field(
                "interceptors",
                &entries.iter().map(|i| i.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<B> InterceptorSource<B> for InterceptorRegistry<B> {
    fn interceptors(&self) -> Result<Vec<SharedInterceptor<B>>> {
        Ok(self.entries.read().clone())
    }
}

/// Enumerate a source and order the result by priority
///
/// The sort is stable: equal priorities keep discovery order.
pub fn resolve<B>(source: &dyn InterceptorSource<B>) -> Result<Vec<SharedInterceptor<B>>> {
    let mut interceptors = match source.interceptors() {
        Ok(interceptors) => interceptors,
        Err(e) => {
            warn!("Interceptor registry lookup failed: {}", e);
            REGISTRY_RESOLVE_TOTAL.with_label_values(&["error"]).inc();
            return Err(e);
        }
    };

    interceptors.sort_by_cached_key(|interceptor| interceptor.priority());
    REGISTRY_RESOLVE_TOTAL.with_label_values(&["success"]).inc();

    Ok(interceptors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn names<B>(interceptors: &[SharedInterceptor<B>]) -> Vec<String> {
        interceptors.iter().map(|i| i.name().to_string()).collect()
    }

    #[test]
    fn test_registration_order() {
        let registry = InterceptorRegistry::<u32>::new();
        assert!(registry.is_empty());

        registry.register_fn("first", 3, Ok);
        registry.register_fn("second", 1, Ok);
        assert_eq!(registry.len(), 2);

        let discovered = registry.interceptors().unwrap();
        assert_eq!(names(&discovered), vec!["first", "second"]);
    }

    #[test]
    fn test_resolve_sorts_stably() {
        let registry = InterceptorRegistry::<u32>::new();
        registry.register_fn("a", 5, Ok);
        registry.register_fn("b", 1, Ok);
        registry.register_fn("c", 5, Ok);
        registry.register_fn("d", -2, Ok);

        let resolved = resolve(&registry).unwrap();
        assert_eq!(names(&resolved), vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn test_resolve_propagates_lookup_failure() {
        let source = || -> Result<Vec<SharedInterceptor<u32>>> {
            Err(Error::Registry("directory offline".to_string()))
        };

        let err = resolve(&source).err().unwrap();
        assert!(matches!(err, Error::Registry(ref msg) if msg == "directory offline"));
    }

    #[test]
    fn test_debug_lists_names() {
        let registry = InterceptorRegistry::<u32>::new();
        registry.register_fn("audit", 0, Ok);
        assert!(format!("{:?}", registry).contains("audit"));
    }

    struct CountedPriority {
        priority: i32,
        reads: Arc<std::sync::atomic::AtomicUsize>,
    }

    impl BatchInterceptor<u32> for CountedPriority {
        fn on_consume(&self, batch: u32) -> Result<u32> {
            Ok(batch)
        }

        fn priority(&self) -> i32 {
            self.reads.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            self.priority
        }
    }

    #[test]
    fn test_resolve_reads_each_priority_once() {
        let reads = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let source = {
            let reads = reads.clone();
            move || -> Result<Vec<SharedInterceptor<u32>>> {
                Ok((0..32)
                    .map(|n| {
                        Arc::new(CountedPriority {
                            priority: (n * 7) % 5,
                            reads: reads.clone(),
                        }) as SharedInterceptor<u32>
                    })
                    .collect())
            }
        };

        let resolved = resolve(&source).unwrap();

        assert_eq!(resolved.len(), 32);
        assert_eq!(reads.load(std::sync::atomic::Ordering::SeqCst), 32);
    }
}
