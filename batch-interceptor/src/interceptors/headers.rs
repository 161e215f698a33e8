//! Stamps common headers onto every record

use crate::{interceptor::BatchInterceptor, RecordBatch, Result};
use std::collections::BTreeMap;

/// Adds configured headers to each record
///
/// Headers already present on a record are left alone.
#[derive(Debug, Clone)]
pub struct HeaderStampInterceptor {
    headers: BTreeMap<String, String>,
    priority: i32,
}

impl HeaderStampInterceptor {
    /// Create new header stamping interceptor
    pub fn new(headers: BTreeMap<String, String>, priority: i32) -> Self {
        Self { headers, priority }
    }
}

impl BatchInterceptor<RecordBatch> for HeaderStampInterceptor {
    fn on_consume(&self, mut batch: RecordBatch) -> Result<RecordBatch> {
        for record in &mut batch.records {
            for (key, value) in &self.headers {
                record
                    .headers
                    .entry(key.clone())
                    .or_insert_with(|| value.clone());
            }
        }
        Ok(batch)
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn name(&self) -> &str {
        "headers"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Record;

    #[test]
    fn test_stamps_missing_headers_only() {
        let mut headers = BTreeMap::new();
        headers.insert("env".to_string(), "prod".to_string());
        headers.insert("region".to_string(), "eu".to_string());
        let interceptor = HeaderStampInterceptor::new(headers, 0);

        let batch = RecordBatch::new(vec![
            Record::new("orders", 0, 1),
            Record::new("orders", 0, 2).with_header("env", "staging"),
        ]);
        let out = interceptor.on_consume(batch).unwrap();

        assert_eq!(out.records[0].headers["env"], "prod");
        assert_eq!(out.records[0].headers["region"], "eu");
        assert_eq!(out.records[1].headers["env"], "staging");
        assert_eq!(out.records[1].headers["region"], "eu");
    }
}
