//! Buffered single-consumer output.
//!
//! Many worker threads produce result lines concurrently; writing them to
//! the destination directly would interleave partial lines. The sink
//! funnels everything through a fixed circular buffer drained by exactly
//! one background consumer thread, so output reaches the destination as
//! whole items in FIFO order. Producers only push; only the consumer pops.
//!
//! The ring indices are guarded by a mutex held just long enough to move an
//! item in or out — never across the write to the destination.

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::debug;
use parking_lot::{Condvar, Mutex};

use crate::error::{PanagramError, Result};

/// Default number of buffered items.
pub const DEFAULT_CAPACITY: usize = 256;

/// Default interval between consumer drain passes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2);

/// Fixed circular buffer of text items.
struct Ring {
    slots: Vec<Option<String>>,
    /// Next slot to write (last in line).
    head: usize,
    /// Next slot to read (first in line).
    tail: usize,
    len: usize,
}

impl Ring {
    fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Ring {
            slots,
            head: 0,
            tail: 0,
            len: 0,
        }
    }

    /// Append an item. Returns false when the ring is full.
    fn push(&mut self, item: String) -> bool {
        if self.len == self.slots.len() {
            return false;
        }
        self.slots[self.head] = Some(item);
        self.head = (self.head + 1) % self.slots.len();
        self.len += 1;
        true
    }

    /// Remove the next item in FIFO order, `None` when empty.
    fn pop(&mut self) -> Option<String> {
        if self.len == 0 {
            return None;
        }
        let item = self.slots[self.tail].take();
        self.tail = (self.tail + 1) % self.slots.len();
        self.len -= 1;
        item
    }
}

struct Shared {
    ring: Mutex<Ring>,
    shutdown: AtomicBool,
    /// Wakes the consumer out of its poll sleep on shutdown.
    wakeup: Condvar,
    sleep_lock: Mutex<()>,
}

/// A bounded output buffer with a dedicated consumer thread.
///
/// [`push`](OutputSink::push) blocks (yielding the scheduler) while the
/// buffer is full; the consumer drains items at a fixed polling interval
/// and writes them to the destination. [`close`](OutputSink::close) stops
/// the consumer after a final drain; dropping the sink closes it.
pub struct OutputSink {
    shared: Arc<Shared>,
    consumer: Option<JoinHandle<()>>,
}

impl OutputSink {
    /// Create a sink writing to `writer`.
    pub fn new(
        writer: Box<dyn Write + Send>,
        capacity: usize,
        poll_interval: Duration,
    ) -> Result<Self> {
        let shared = Arc::new(Shared {
            ring: Mutex::new(Ring::new(capacity.max(1))),
            shutdown: AtomicBool::new(false),
            wakeup: Condvar::new(),
            sleep_lock: Mutex::new(()),
        });

        let consumer_shared = Arc::clone(&shared);
        let consumer = thread::Builder::new()
            .name("anagram-output".to_string())
            .spawn(move || Self::consume(consumer_shared, writer, poll_interval))
            .map_err(|e| {
                PanagramError::resource_exhausted(format!("failed to start output consumer: {e}"))
            })?;

        Ok(OutputSink {
            shared,
            consumer: Some(consumer),
        })
    }

    /// Create a sink writing to standard output with default settings.
    pub fn stdout() -> Result<Self> {
        OutputSink::new(
            Box::new(io::stdout()),
            DEFAULT_CAPACITY,
            DEFAULT_POLL_INTERVAL,
        )
    }

    /// Queue `text` for output, blocking while the buffer is full.
    ///
    /// The text is copied into the buffer; the caller's storage may go out
    /// of scope before the consumer processes the item.
    pub fn push(&self, text: &str) {
        loop {
            {
                let mut ring = self.shared.ring.lock();
                if ring.push(text.to_string()) {
                    return;
                }
            }
            // Full; force a context switch and wait our turn.
            thread::yield_now();
        }
    }

    /// Get the number of items currently awaiting the consumer.
    pub fn pending(&self) -> usize {
        self.shared.ring.lock().len
    }

    /// Stop the consumer thread after a final drain.
    pub fn close(&mut self) {
        {
            let _guard = self.shared.sleep_lock.lock();
            self.shared.shutdown.store(true, Ordering::Release);
            self.shared.wakeup.notify_one();
        }
        if let Some(consumer) = self.consumer.take() {
            let _ = consumer.join();
        }
    }

    fn consume(shared: Arc<Shared>, mut writer: Box<dyn Write + Send>, poll_interval: Duration) {
        debug!("output consumer starting");
        loop {
            let stopping = shared.shutdown.load(Ordering::Acquire);

            loop {
                // Take one item under the lock, write it outside.
                let item = shared.ring.lock().pop();
                match item {
                    Some(text) => {
                        let _ = writer.write_all(text.as_bytes());
                    }
                    None => break,
                }
            }
            let _ = writer.flush();

            if stopping {
                break;
            }
            let mut guard = shared.sleep_lock.lock();
            if !shared.shutdown.load(Ordering::Acquire) {
                shared.wakeup.wait_for(&mut guard, poll_interval);
            }
        }
        debug!("output consumer exiting");
    }
}

impl Drop for OutputSink {
    fn drop(&mut self) {
        self.close();
    }
}
