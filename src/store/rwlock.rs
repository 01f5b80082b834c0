use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{SharedStore, Store};

/// The shared/exclusive-lock store variant.
///
/// Wraps an inner [`Store`] in a reader/writer lock: `has` and `get` take the
/// lock in shared mode and may overlap with each other, while `put` and
/// `delete` take it in exclusive mode and exclude all other operations.
/// Writes are totally ordered with respect to each other and to any
/// overlapping read; reads among themselves are unordered.
///
/// Clones are handles onto the same inner store.
#[derive(Debug)]
pub struct RwLockStore<S> {
    inner: Arc<RwLock<S>>,
}

impl<S: Store> RwLockStore<S> {
    /// wraps `inner` so that reads share the lock and writes hold it alone
    pub fn new(inner: S) -> RwLockStore<S> {
        RwLockStore {
            inner: Arc::new(RwLock::new(inner)),
        }
    }

    // Store operations never panic while holding a guard, so a poisoned
    // lock still guards a consistent map and can be taken over as-is.
    fn read(&self) -> RwLockReadGuard<'_, S> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, S> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: Store> Store for RwLockStore<S> {
    fn has(&self, key: &str) -> bool {
        self.read().has(key)
    }

    fn get(&self, key: &str) -> Option<String> {
        self.read().get(key)
    }

    fn put(&mut self, key: String, value: String) {
        self.write().put(key, value);
    }

    fn delete(&mut self, key: &str) {
        self.write().delete(key);
    }
}

// a derived Clone would demand S: Clone; handles never clone the inner store
impl<S> Clone for RwLockStore<S> {
    fn clone(&self) -> RwLockStore<S> {
        RwLockStore {
            inner: Arc::clone(&self.inner),
        }
    }
}

// readers dereference the guard to &S from several threads at once, hence
// the extra Sync bound compared to MutexStore
impl<S: Store + Send + Sync + 'static> SharedStore for RwLockStore<S> {}
