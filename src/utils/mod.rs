//! # Utility Modules
//!
//! Supporting utilities around the codec.
//!
//! ## Components
//! - **Buffer Pool**: reusable frame buffers, locked only on checkout and return
//! - **Logging**: structured logging configuration
//! - **Metrics**: thread-safe frame and error counters

pub mod buffer_pool;
pub mod logging;
pub mod metrics;

pub use buffer_pool::{FramePool, PooledFrame};
pub use metrics::{CodecMetrics, MetricsSnapshot};
