//! Interceptor capability contract
//!
//! An interceptor observes or transforms a consumed batch before the
//! application sees it. Interceptors are ordered by [`BatchInterceptor::priority`]
//! (lower runs earlier) and composed by the
//! [`ChainDispatcher`](crate::dispatcher::ChainDispatcher).

use crate::Result;
use std::fmt;

/// Priority used when an interceptor does not declare one
pub const DEFAULT_PRIORITY: i32 = 0;

/// Batch interceptor
///
/// `on_consume` takes the batch by value and hands back the batch the next
/// interceptor should see. Implementations must not keep the batch after the
/// call returns. Returning an error aborts the whole chain; the dispatcher
/// does not skip or retry.
pub trait BatchInterceptor<B>: Send + Sync {
    /// Process a consumed batch
    fn on_consume(&self, batch: B) -> Result<B>;

    /// Ordering key, lower runs first
    fn priority(&self) -> i32 {
        DEFAULT_PRIORITY
    }

    /// Name used in logs and diagnostics
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Interceptor backed by a closure
pub struct FnInterceptor<F> {
    name: String,
    priority: i32,
    func: F,
}

impl<F> FnInterceptor<F> {
    /// Create new closure interceptor
    pub fn new(name: impl Into<String>, priority: i32, func: F) -> Self {
        Self {
            name: name.into(),
            priority,
            func,
        }
    }
}

impl<F> fmt::Debug for FnInterceptor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnInterceptor")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .finish()
    }
}

impl<B, F> BatchInterceptor<B> for FnInterceptor<F>
where
    F: Fn(B) -> Result<B> + Send + Sync,
{
    fn on_consume(&self, batch: B) -> Result<B> {
        (self.func)(batch)
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn name(&self) -> &str {
        &self.name
    }
}
