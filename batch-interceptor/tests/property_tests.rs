//! Property-based tests for chain ordering
//!
//! - Execution order is a stable sort of registration order by priority
//! - Every interceptor runs exactly once per dispatch
//! - An empty registry leaves any batch untouched

use batch_interceptor::{ChainDispatcher, InterceptorRegistry, Record, RecordBatch};
use proptest::prelude::*;
use std::sync::Arc;

/// Strategy for generating batches with arbitrary offsets and markers
fn batch_strategy() -> impl Strategy<Value = RecordBatch> {
    (
        prop::collection::vec((0i32..8, 0i64..10_000, any::<bool>()), 0..20),
        prop::collection::vec("[a-z]{1,8}", 0..4),
    )
        .prop_map(|(records, markers)| {
            let records = records
                .into_iter()
                .map(|(partition, offset, tombstone)| {
                    let record = Record::new("orders", partition, offset);
                    if tombstone {
                        record
                    } else {
                        record.with_value(offset.to_le_bytes().to_vec())
                    }
                })
                .collect();
            RecordBatch {
                records,
                metadata: markers,
            }
        })
}

proptest! {
    #[test]
    fn prop_execution_order_is_stable_priority_sort(
        priorities in prop::collection::vec(-5i32..5, 0..16)
    ) {
        let registry = Arc::new(InterceptorRegistry::new());
        for (index, priority) in priorities.iter().enumerate() {
            let marker = index.to_string();
            registry.register_fn(marker.clone(), *priority, move |batch: RecordBatch| {
                Ok(batch.with_marker(marker.clone()))
            });
        }

        let dispatcher = ChainDispatcher::new(registry);
        let out = dispatcher.dispatch(RecordBatch::default()).unwrap();

        let mut expected: Vec<(i32, usize)> = priorities
            .iter()
            .copied()
            .enumerate()
            .map(|(index, priority)| (priority, index))
            .collect();
        expected.sort_by_key(|(priority, _)| *priority);
        let expected: Vec<String> = expected
            .into_iter()
            .map(|(_, index)| index.to_string())
            .collect();

        prop_assert_eq!(out.metadata, expected);
    }

    #[test]
    fn prop_empty_registry_is_identity(batch in batch_strategy()) {
        let dispatcher = ChainDispatcher::new(Arc::new(InterceptorRegistry::<RecordBatch>::new()));
        let out = dispatcher.dispatch(batch.clone()).unwrap();
        prop_assert_eq!(out, batch);
    }
}
