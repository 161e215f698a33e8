//! Consumer adapter that intercepts batches before the application handler

use crate::{
    config::ChainConfig, interceptors::logging::render_context, ChainDispatcher, RecordBatch,
    Result,
};
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info, info_span, Instrument};

/// Application batch handler
#[async_trait]
pub trait BatchHandler: Send + Sync {
    /// Handle an intercepted batch
    async fn handle_batch(&self, batch: RecordBatch) -> Result<()>;
}

/// Runs every delivered batch through the chain, then the handler
///
/// Each delivery runs inside a `deliver` span carrying the service name and
/// context fields, so interceptors and the handler log with them.
pub struct InterceptingConsumer<H> {
    dispatcher: Arc<ChainDispatcher<RecordBatch>>,
    handler: Arc<H>,
    service_name: String,
    context: String,
}

impl<H> InterceptingConsumer<H>
where
    H: BatchHandler + 'static,
{
    /// Create new consumer adapter
    pub fn new(dispatcher: Arc<ChainDispatcher<RecordBatch>>, handler: Arc<H>) -> Self {
        Self {
            dispatcher,
            handler,
            service_name: String::new(),
            context: String::new(),
        }
    }

    /// Set the service name and context fields of the delivery span
    pub fn with_context(
        mut self,
        service_name: impl Into<String>,
        context: &BTreeMap<String, String>,
    ) -> Self {
        self.service_name = service_name.into();
        self.context = render_context(context);
        self
    }

    /// Take the delivery span fields from configuration
    pub fn with_config(self, config: &ChainConfig) -> Self {
        self.with_context(config.service_name.clone(), &config.common_headers)
    }

    /// Deliver one batch
    ///
    /// The handler is not called when an interceptor fails.
    pub async fn deliver(&self, batch: RecordBatch) -> Result<()> {
        let span = info_span!(
            "deliver",
            service = %self.service_name,
            context = %self.context,
            records = batch.len()
        );

        async move {
            match self.dispatcher.dispatch(batch) {
                Ok(batch) => self.handler.handle_batch(batch).await,
                Err(e) => Err(e),
            }
        }
        .instrument(span)
        .await
    }

    /// Deliver batches until the stream ends or a delivery fails
    ///
    /// Returns the number of batches delivered. Retries are left to the
    /// client feeding the stream.
    pub async fn consume<S>(&self, batches: S) -> Result<u64>
    where
        S: Stream<Item = RecordBatch>,
    {
        let mut batches = Box::pin(batches);
        let mut delivered = 0u64;

        while let Some(batch) = batches.next().await {
            if let Err(e) = self.deliver(batch).await {
                error!("Batch delivery failed after {} batches: {}", delivered, e);
                return Err(e);
            }
            delivered += 1;
        }

        info!("Batch stream ended after {} batches", delivered);
        Ok(delivered)
    }
}
