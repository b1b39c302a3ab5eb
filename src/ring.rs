//! Fixed-capacity circular buffer.
//!
//! Two monotonically increasing cursors index into a preallocated slot array,
//! always taken modulo the capacity. The same structure serves two roles:
//!
//! * a bounded FIFO (`push` / `pop`) for pending key presses, where a push on
//!   a full buffer is dropped instead of blocking or growing;
//! * a position history (`record` / `query`), where every write advances the
//!   head and overwrites the oldest slot, and reads look back a given
//!   distance from the newest entry without consuming anything.

use crate::error::{Result, SnakeError};

#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    slots: Vec<Option<T>>,
    head: usize,
    tail: usize,
}

impl<T: Copy> RingBuffer<T> {
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be > 0");
        RingBuffer { slots: vec![None; capacity], head: 0, tail: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.head - self.tail
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }

    /// Appends `value` if there is room. Returns `false` and leaves the
    /// buffer untouched when it is full.
    pub fn push(&mut self, value: T) -> bool {
        if self.is_full() {
            return false;
        }
        let idx = self.head % self.capacity();
        self.slots[idx] = Some(value);
        self.head += 1;
        true
    }

    /// Removes and returns the oldest queued value.
    pub fn pop(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(SnakeError::Empty);
        }
        let idx = self.tail % self.capacity();
        self.tail += 1;
        self.slots[idx].take().ok_or(SnakeError::Empty)
    }

    /// Writes `value` as the newest entry, overwriting the oldest slot once
    /// the buffer has wrapped.
    pub fn record(&mut self, value: T) {
        let idx = self.head % self.capacity();
        self.slots[idx] = Some(value);
        self.head += 1;
        if self.len() > self.capacity() {
            self.tail = self.head - self.capacity();
        }
    }

    /// Reads the entry `distance` steps behind the newest one. `query(0)` is
    /// the most recent `record`. Returns `None` for slots never written and
    /// for distances that reach past the capacity.
    pub fn query(&self, distance: usize) -> Option<T> {
        if distance >= self.capacity() || distance >= self.head {
            return None;
        }
        let idx = (self.head - 1 - distance) % self.capacity();
        self.slots[idx]
    }

    /// Forgets every entry. Storage is reused, nothing is reallocated.
    pub fn reset(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.head = 0;
        self.tail = 0;
    }
}
