//! # Frame Buffer Pool
//!
//! Reusable output buffers for encoding small frames under high load.
//!
//! The mutex protects the free list only. A buffer is taken out under the
//! lock, filled with no lock held, and put back under the lock when the
//! [`PooledFrame`] is dropped, so concurrent encoders never wait on each
//! other's encode work.
//!
//! ## Usage
//! ```rust,no_run
//! use packet_wire::core::frame::encode_pooled;
//! use packet_wire::core::message_type::MessageType;
//! use packet_wire::core::packet::Packet;
//! use packet_wire::utils::buffer_pool::FramePool;
//!
//! let pool = FramePool::new(64);
//! let packet = Packet::new(0, MessageType::Data, 1, 2, "hello").unwrap();
//! let frame = encode_pooled(&packet, &pool).unwrap();
//! // write &frame[..] to the transport; the buffer returns on drop
//! ```

use crate::error::constants::ERR_POOL_LOCK_POISONED;
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Buffers that grew beyond this are released instead of pooled (4KB)
const MAX_POOLED_BUFFER_SIZE: usize = 4096;

/// Starting capacity, enough for the header plus a typical chat message
const DEFAULT_BUFFER_CAPACITY: usize = 1024;

type FreeList = Arc<Mutex<Vec<Vec<u8>>>>;

/// An encoded frame that returns its buffer to the pool when dropped
pub struct PooledFrame {
    buffer: Vec<u8>,
    pool: FreeList,
}

impl PooledFrame {
    /// Take ownership of the bytes; the buffer is not returned to the pool
    pub fn into_inner(mut self) -> Vec<u8> {
        std::mem::take(&mut self.buffer)
    }
}

impl Drop for PooledFrame {
    fn drop(&mut self) {
        let capacity = self.buffer.capacity();
        if capacity == 0 || capacity > MAX_POOLED_BUFFER_SIZE {
            return;
        }
        self.buffer.clear();
        match self.pool.lock() {
            Ok(mut free) => free.push(std::mem::take(&mut self.buffer)),
            Err(_) => warn!("{}", ERR_POOL_LOCK_POISONED),
        }
    }
}

impl std::ops::Deref for PooledFrame {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.buffer
    }
}

impl std::ops::DerefMut for PooledFrame {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buffer
    }
}

impl AsRef<[u8]> for PooledFrame {
    fn as_ref(&self) -> &[u8] {
        &self.buffer
    }
}

/// Thread-safe pool of frame buffers
#[derive(Clone)]
pub struct FramePool {
    free: FreeList,
    initial_capacity: usize,
}

impl FramePool {
    /// Create a pool holding `pool_size` pre-allocated buffers
    pub fn new(pool_size: usize) -> Self {
        let free = (0..pool_size)
            .map(|_| Vec::with_capacity(DEFAULT_BUFFER_CAPACITY))
            .collect();

        Self {
            free: Arc::new(Mutex::new(free)),
            initial_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }

    /// Take an empty buffer out of the pool, allocating if none is free
    pub fn checkout(&self) -> PooledFrame {
        let buffer = self
            .free
            .lock()
            .ok()
            .and_then(|mut free| free.pop())
            .unwrap_or_else(|| Vec::with_capacity(self.initial_capacity));

        PooledFrame {
            buffer,
            pool: Arc::clone(&self.free),
        }
    }

    /// Number of buffers currently free
    pub fn available(&self) -> usize {
        self.free.lock().map(|free| free.len()).unwrap_or(0)
    }
}

impl Default for FramePool {
    fn default() -> Self {
        Self::new(50)
    }
}
