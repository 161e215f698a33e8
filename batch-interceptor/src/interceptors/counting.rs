//! Counts consumed records per topic

use crate::{interceptor::BatchInterceptor, metrics::RECORDS_CONSUMED_TOTAL, RecordBatch, Result};

/// Increments `interceptor_records_consumed_total{topic, service}`
#[derive(Debug, Clone)]
pub struct RecordCountInterceptor {
    service_name: String,
    priority: i32,
}

impl RecordCountInterceptor {
    /// Create new record counter
    pub fn new(service_name: impl Into<String>, priority: i32) -> Self {
        Self {
            service_name: service_name.into(),
            priority,
        }
    }
}

impl BatchInterceptor<RecordBatch> for RecordCountInterceptor {
    fn on_consume(&self, batch: RecordBatch) -> Result<RecordBatch> {
        for record in &batch.records {
            RECORDS_CONSUMED_TOTAL
                .with_label_values(&[record.topic.as_str(), self.service_name.as_str()])
                .inc();
        }
        Ok(batch)
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn name(&self) -> &str {
        "counting"
    }
}
