//! Bounded signal queues for `no_std` environments.
//!
//! All cross-task communication into the compositor flows through these
//! queues: producers on other tasks/interrupts push, the compositor task
//! drains non-blockingly at the start of each tick. Built on
//! `critical-section` and `heapless::Deque`, so there are no locks in the
//! animation hot loop.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// Error returned when trying to send to a full queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull<T>(pub T);

/// Error returned when trying to receive from an empty queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueEmpty;

/// A bounded, thread-safe message queue.
///
/// Synchronization is a critical section around a fixed-size
/// `heapless::Deque`, which keeps the queue usable from interrupt context
/// and from multiple producer tasks.
pub struct Channel<T, const SIZE: usize> {
    inner: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> Channel<T, SIZE> {
    /// Create a new empty queue.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a sender handle for this queue.
    ///
    /// Multiple senders can coexist; they share access to the same queue.
    pub const fn sender(&self) -> Sender<'_, T, SIZE> {
        Sender { channel: self }
    }

    /// Get a receiver handle for this queue.
    pub const fn receiver(&self) -> Receiver<'_, T, SIZE> {
        Receiver { channel: self }
    }

    /// Try to send a value into the queue.
    ///
    /// Returns `Err(QueueFull(value))` if the queue is full.
    pub fn try_send(&self, value: T) -> Result<(), QueueFull<T>> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(value).map_err(QueueFull)
        })
    }

    /// Send a value, discarding the oldest entry if the queue is full.
    ///
    /// Used for state-mirroring notifications where a slow consumer should
    /// observe the latest state rather than a backlog.
    pub fn send_latest(&self, value: T) {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            if queue.is_full() {
                queue.pop_front();
            }
            // Cannot fail: a slot was just freed if none was available.
            let _ = queue.push_back(value);
        });
    }

    /// Try to receive a value from the queue.
    ///
    /// Returns `Err(QueueEmpty)` if the queue is empty.
    pub fn try_receive(&self) -> Result<T, QueueEmpty> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front().ok_or(QueueEmpty)
        })
    }
}

impl<T, const SIZE: usize> Default for Channel<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// A sender handle for a [`Channel`].
///
/// This is a lightweight reference that can be cloned and passed around.
#[derive(Clone, Copy)]
pub struct Sender<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Sender<'_, T, SIZE> {
    /// Try to send a value into the queue.
    ///
    /// Returns `Err(QueueFull(value))` if the queue is full.
    pub fn try_send(&self, value: T) -> Result<(), QueueFull<T>> {
        self.channel.try_send(value)
    }

    /// Send a value, discarding the oldest entry if the queue is full.
    pub fn send_latest(&self, value: T) {
        self.channel.send_latest(value);
    }
}

/// A receiver handle for a [`Channel`].
///
/// This is a lightweight reference that can be cloned and passed around.
#[derive(Clone, Copy)]
pub struct Receiver<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Receiver<'_, T, SIZE> {
    /// Try to receive a value from the queue.
    ///
    /// Returns `Err(QueueEmpty)` if the queue is empty.
    pub fn try_receive(&self) -> Result<T, QueueEmpty> {
        self.channel.try_receive()
    }
}
