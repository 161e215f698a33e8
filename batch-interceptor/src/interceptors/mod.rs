//! Built-in interceptors for consumed record batches
//!
//! These cover the usual pre-processing concerns of a consumer: logging with
//! a service context, stamping common headers, dropping tombstones and
//! counting records per topic.

pub mod counting;
pub mod headers;
pub mod logging;
pub mod tombstone;

pub use counting::RecordCountInterceptor;
pub use headers::HeaderStampInterceptor;
pub use logging::LoggingInterceptor;
pub use tombstone::TombstoneFilter;
