//! Record and batch types consumed by the chain

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single consumed record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Topic the record was read from
    pub topic: String,

    /// Partition within the topic
    pub partition: i32,

    /// Offset within the partition
    pub offset: i64,

    /// Record key
    pub key: Option<Vec<u8>>,

    /// Record value (`None` for tombstones)
    pub value: Option<Vec<u8>>,

    /// Record headers
    pub headers: BTreeMap<String, String>,
}

impl Record {
    /// Create new record
    pub fn new(topic: impl Into<String>, partition: i32, offset: i64) -> Self {
        Self {
            topic: topic.into(),
            partition,
            offset,
            key: None,
            value: None,
            headers: BTreeMap::new(),
        }
    }

    /// Set key
    pub fn with_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set value
    pub fn with_value(mut self, value: impl Into<Vec<u8>>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Add header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Whether this record is a tombstone (no value)
    pub fn is_tombstone(&self) -> bool {
        self.value.is_none()
    }
}

/// A batch of records delivered together by the consumer client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordBatch {
    /// Records in delivery order
    pub records: Vec<Record>,

    /// Free-form markers added while the batch travels through the chain
    pub metadata: Vec<String>,
}

impl RecordBatch {
    /// Create batch from records
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            metadata: Vec::new(),
        }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the batch has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a metadata marker
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.metadata.push(marker.into());
        self
    }

    /// Distinct topics present in the batch, sorted
    pub fn topics(&self) -> Vec<&str> {
        let mut topics: Vec<&str> = self.records.iter().map(|r| r.topic.as_str()).collect();
        topics.sort_unstable();
        topics.dedup();
        topics
    }
}
