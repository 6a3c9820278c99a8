//! Round-robin admission over a fixed number of fetch slots
//!
//! Callers are assigned slots in turn; a slot admits one fetch at a time.
//! Any number of tasks may call [`SlotGate::acquire`] without further
//! throttling on their side.

use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Mutex, MutexGuard};

/// Fixed set of fetch slots handed out round-robin
#[derive(Debug)]
pub struct SlotGate {
    next: AtomicUsize,
    slots: Vec<Mutex<()>>,
}

impl SlotGate {
    /// Create a gate with `count` slots (at least one)
    pub fn new(count: usize) -> Self {
        let slots = (0..count.max(1)).map(|_| Mutex::new(())).collect();
        Self {
            next: AtomicUsize::new(0),
            slots,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Wait for the next slot in turn; the slot is held until the guard drops
    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        let turn = self.next.fetch_add(1, Ordering::Relaxed) % self.slots.len();
        self.slots[turn].lock().await
    }
}
