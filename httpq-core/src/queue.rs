//! In-memory bounded FIFO with async backpressure
//!
//! Each [`BoundedQueue`] is a `VecDeque` behind a mutex plus two wake-up
//! conditions. Producers wait on "space available" while the queue is full,
//! consumers wait on "item available" while it is empty. The mutex is never
//! held across an `.await`.

use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::VecDeque;
use tokio::sync::Notify;

/// A single queued message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Content type declared by the producer, empty if none was sent
    pub media_type: String,
    pub payload: Bytes,
}

impl Entry {
    pub fn new(media_type: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            media_type: media_type.into(),
            payload: payload.into(),
        }
    }
}

/// Thread-safe FIFO with a fixed capacity. A capacity of `0` means unbounded.
#[derive(Debug)]
pub struct BoundedQueue {
    capacity: usize,
    entries: Mutex<VecDeque<Entry>>,
    item_available: Notify,
    space_available: Notify,
}

impl BoundedQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(VecDeque::new()),
            item_available: Notify::new(),
            space_available: Notify::new(),
        }
    }

    pub fn unbounded() -> Self {
        Self::new(0)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_bounded(&self) -> bool {
        self.capacity > 0
    }

    /// Number of entries currently held
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Append `entry` at the tail, waiting while a bounded queue is full.
    ///
    /// Cancel-safe: if the future is dropped before it completes, nothing
    /// has been inserted.
    pub async fn enqueue(&self, mut entry: Entry) {
        loop {
            // Register interest before looking at the queue so a dequeue
            // racing with the check cannot slip its wake-up past us.
            let space = self.space_available.notified();
            tokio::pin!(space);
            space.as_mut().enable();

            match self.try_push(entry) {
                Ok(()) => return,
                Err(rejected) => entry = rejected,
            }

            space.await;
        }
    }

    /// Remove and return the head entry, waiting while the queue is empty.
    ///
    /// Cancel-safe: if the future is dropped before it completes, no entry
    /// has been removed.
    pub async fn dequeue(&self) -> Entry {
        loop {
            let item = self.item_available.notified();
            tokio::pin!(item);
            item.as_mut().enable();

            if let Some(entry) = self.try_pop() {
                return entry;
            }

            item.await;
        }
    }

    fn try_push(&self, entry: Entry) -> Result<(), Entry> {
        {
            let mut entries = self.entries.lock();
            if self.is_bounded() && entries.len() >= self.capacity {
                return Err(entry);
            }
            entries.push_back(entry);
        }

        self.item_available.notify_one();
        Ok(())
    }

    fn try_pop(&self) -> Option<Entry> {
        let entry = self.entries.lock().pop_front()?;

        if self.is_bounded() {
            self.space_available.notify_one();
        }
        Some(entry)
    }
}

impl Default for BoundedQueue {
    fn default() -> Self {
        Self::unbounded()
    }
}
