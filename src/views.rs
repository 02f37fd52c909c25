//! In-process registry giving every browser session its own list binder.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::binder::ListQueryBinder;

/// Session key of one list view.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ViewId(Uuid);

impl ViewId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ViewId {
    fn default() -> Self {
        Self::new()
    }
}

struct Entry {
    binder: ListQueryBinder,
    last_used: u64,
}

#[derive(Default)]
struct Registry {
    entries: HashMap<ViewId, Entry>,
    clock: u64,
}

/// Binders keyed by view id; the least recently used one is evicted at capacity.
pub struct ListViews {
    registry: Mutex<Registry>,
    capacity: usize,
}

impl ListViews {
    pub fn new(capacity: usize) -> Self {
        Self {
            registry: Mutex::new(Registry::default()),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` against the binder of `id`, creating it on first use.
    ///
    /// The registry stays locked while `f` runs, so `f` must not await.
    pub fn with_binder<T>(&self, id: ViewId, f: impl FnOnce(&mut ListQueryBinder) -> T) -> T {
        let mut registry = self.lock();
        registry.clock += 1;
        let now = registry.clock;
        let entries = &mut registry.entries;

        if !entries.contains_key(&id) && entries.len() >= self.capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(key, _)| *key);
            if let Some(oldest) = oldest {
                log::debug!("Evicting list view {oldest:?}");
                entries.remove(&oldest);
            }
        }

        let entry = entries.entry(id).or_insert_with(|| Entry {
            binder: ListQueryBinder::new(),
            last_used: now,
        });
        entry.last_used = now;
        f(&mut entry.binder)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
