//! Bounded I/O resources owned by one engine: a permit pool that caps
//! concurrent file reads and a free list of reusable read buffers.

use parking_lot::Mutex;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};

/// Concurrent I/O slots when no override is given.
pub const DEFAULT_MAX_WORKERS: usize = 8;

/// Streaming read buffer size (256 KiB).
pub const DEFAULT_BUFFER_SIZE: usize = 256 * 1024;

#[derive(Debug)]
pub struct IoPool {
    permits: Arc<Semaphore>,
    buffers: Mutex<Vec<Vec<u8>>>,
    capacity: usize,
    buffer_size: usize,
}

impl IoPool {
    /// A zero capacity or buffer size falls back to the default.
    pub fn new(capacity: usize, buffer_size: usize) -> Self {
        let capacity = if capacity == 0 { DEFAULT_MAX_WORKERS } else { capacity };
        let buffer_size = if buffer_size == 0 {
            DEFAULT_BUFFER_SIZE
        } else {
            buffer_size
        };
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            buffers: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
            buffer_size,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    /// Wait for a free I/O slot. The slot is released when the permit drops.
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit, AcquireError> {
        Arc::clone(&self.permits).acquire_owned().await
    }

    /// Take a buffer from the free list, allocating one if none is idle.
    pub fn checkout(&self) -> PooledBuffer<'_> {
        let buffer = self
            .buffers
            .lock()
            .pop()
            .unwrap_or_else(|| vec![0u8; self.buffer_size]);
        PooledBuffer {
            pool: self,
            buffer: Some(buffer),
        }
    }

    pub fn idle_buffers(&self) -> usize {
        self.buffers.lock().len()
    }

    fn give_back(&self, buffer: Vec<u8>) {
        let mut buffers = self.buffers.lock();
        if buffers.len() < self.capacity {
            buffers.push(buffer);
        }
    }
}

/// A read buffer on loan from an [`IoPool`]; returned on drop.
#[derive(Debug)]
pub struct PooledBuffer<'a> {
    pool: &'a IoPool,
    buffer: Option<Vec<u8>>,
}

impl Deref for PooledBuffer<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.buffer.as_deref().unwrap_or(&[])
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        self.buffer.as_deref_mut().unwrap_or(&mut [])
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.pool.give_back(buffer);
        }
    }
}
