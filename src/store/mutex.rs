use std::sync::{Arc, Mutex, PoisonError};

use super::{SharedStore, Store};

/// The exclusive-lock store variant.
///
/// Wraps an inner [`Store`] and forwards every operation to it while holding
/// a single mutex, so all four operations, reads included, totally order with
/// respect to each other. Simple to reason about, but reads cannot overlap;
/// see [`RwLockStore`](super::RwLockStore) for the read-heavy alternative.
///
/// Clones are handles onto the same inner store.
#[derive(Debug)]
pub struct MutexStore<S> {
    inner: Arc<Mutex<S>>,
}

impl<S: Store> MutexStore<S> {
    /// wraps `inner` so that every operation on it runs under the mutex
    pub fn new(inner: S) -> MutexStore<S> {
        MutexStore {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    // Store operations never panic while holding the guard, so a poisoned
    // lock still guards a consistent map and can be taken over as-is.
    fn lock(&self) -> std::sync::MutexGuard<'_, S> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: Store> Store for MutexStore<S> {
    fn has(&self, key: &str) -> bool {
        self.lock().has(key)
    }

    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key)
    }

    fn put(&mut self, key: String, value: String) {
        self.lock().put(key, value);
    }

    fn delete(&mut self, key: &str) {
        self.lock().delete(key);
    }
}

// a derived Clone would demand S: Clone; handles never clone the inner store
impl<S> Clone for MutexStore<S> {
    fn clone(&self) -> MutexStore<S> {
        MutexStore {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Store + Send + 'static> SharedStore for MutexStore<S> {}
