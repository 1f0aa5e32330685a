//! Atomically swappable handle to the current search index.

use crate::search::index::SearchIndex;
use std::sync::{Arc, RwLock};

/// Holds the index currently being served.
///
/// Readers take an `Arc` snapshot and query it without holding the lock. A
/// reload builds the replacement completely before [`SharedIndex::replace`]
/// swaps it in, so a reader sees either the old or the new index.
///
/// Every replacement bumps a generation number, which lets caches keyed on
/// it ignore results computed against an older index.
#[derive(Debug, Clone, Default)]
pub struct SharedIndex {
    current: Arc<RwLock<Slot>>,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    index: Arc<SearchIndex>,
}

impl SharedIndex {
    pub fn new(index: SearchIndex) -> Self {
        Self {
            current: Arc::new(RwLock::new(Slot {
                generation: 0,
                index: Arc::new(index),
            })),
        }
    }

    /// The index being served right now.
    pub fn snapshot(&self) -> Arc<SearchIndex> {
        self.versioned().1
    }

    /// The index being served together with its generation.
    pub fn versioned(&self) -> (u64, Arc<SearchIndex>) {
        let guard = match self.current.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        (guard.generation, guard.index.clone())
    }

    /// Swap in a fully built index, returning the previous one.
    pub fn replace(&self, index: SearchIndex) -> Arc<SearchIndex> {
        let next = Arc::new(index);
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.generation += 1;
        std::mem::replace(&mut guard.index, next)
    }
}
