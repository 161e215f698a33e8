//! Logging interceptor that records every consumed batch

use crate::{interceptor::BatchInterceptor, RecordBatch, Result};
use std::collections::BTreeMap;
use tracing::{debug, info_span};

/// Logs each batch inside a span carrying the service context
#[derive(Debug, Clone)]
pub struct LoggingInterceptor {
    service_name: String,
    context: String,
    priority: i32,
}

impl LoggingInterceptor {
    /// Create new logging interceptor
    pub fn new(service_name: impl Into<String>, priority: i32) -> Self {
        Self {
            service_name: service_name.into(),
            context: String::new(),
            priority,
        }
    }

    /// Attach context fields rendered into the span
    pub fn with_context(mut self, context: &BTreeMap<String, String>) -> Self {
        self.context = render_context(context);
        self
    }
}

/// Render context fields as `k1=v1,k2=v2`
pub(crate) fn render_context(context: &BTreeMap<String, String>) -> String {
    context
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(",")
}

impl BatchInterceptor<RecordBatch> for LoggingInterceptor {
    fn on_consume(&self, batch: RecordBatch) -> Result<RecordBatch> {
        let span = info_span!(
            "consume",
            service = %self.service_name,
            context = %self.context
        );
        let _enter = span.enter();

        debug!(
            "Consumed batch of {} records from [{}]",
            batch.len(),
            batch.topics().join(", ")
        );

        Ok(batch)
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn name(&self) -> &str {
        "logging"
    }
}
