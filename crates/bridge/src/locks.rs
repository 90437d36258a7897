//! Per-holder mutual exclusion for balance read-modify-write sequences.
//!
//! A lock is held only for the duration of one closure; entries nobody else
//! is waiting on are dropped on release so the table tracks active holders.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use coffer_core::HolderRef;

#[derive(Debug, Default)]
pub struct HolderLocks {
    locks: Mutex<HashMap<HolderRef, Arc<Mutex<()>>>>,
}

impl HolderLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding `holder`'s lock.
    pub fn with_lock<T>(&self, holder: &HolderRef, f: impl FnOnce() -> T) -> T {
        let lock = self.checkout(holder);
        let result = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            f()
        };
        self.release(holder, lock);
        result
    }

    fn checkout(&self, holder: &HolderRef) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(holder.clone()).or_default())
    }

    /// Give back a checked-out lock, pruning the entry once the table holds
    /// the only reference.
    fn release(&self, holder: &HolderRef, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        drop(lock);
        if locks
            .get(holder)
            .is_some_and(|entry| Arc::strong_count(entry) == 1)
        {
            locks.remove(holder);
        }
    }

    /// Number of holders currently tracked.
    pub fn active(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
