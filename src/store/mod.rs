//! The key/value store abstraction and its concurrency-safe variants.
//!
//! [`MemStore`] is the plain mapping. [`MutexStore`] and [`RwLockStore`] are
//! decorators that wrap any inner [`Store`] and forward every operation to it
//! under a lock; which lock is taken, and in which mode, is the only thing
//! that differs between them.

/// A trait for the basic functionality of a key/value store.
///
/// All four operations are total. Absence of a key is a normal outcome and is
/// reported through the return value; no operation can fail.
///
/// Reads borrow the store shared, writes borrow it exclusively. For the plain
/// [`MemStore`] this means the borrow checker serializes access; the lock
/// decorators relax it to "one handle per caller" while the lock serializes
/// the underlying map.
pub trait Store {
    /// returns `true` if `key` is present in the store
    fn has(&self, key: &str) -> bool;

    /// Gets the value associated with the given `key`
    ///
    /// Returns `None` if the given `key` does not exist.
    fn get(&self, key: &str) -> Option<String>;

    /// Inserts the given `key` and `value` into the store
    ///
    /// If the given `key` already exists the previous value will be
    /// overwritten.
    fn put(&mut self, key: String, value: String);

    /// Removes the given `key` (and associated value) from the store
    ///
    /// Removing a key that is not present is a no-op.
    fn delete(&mut self, key: &str);
}

/// A store whose clones are handles onto one shared underlying map, safe to
/// hand out to many threads at once.
///
/// This is only implemented by the lock decorators; [`MemStore`] is
/// deliberately excluded since cloning it would copy the map, and nothing
/// serializes concurrent access to it.
pub trait SharedStore: Store + Clone + Send + 'static {}

pub use self::mem::MemStore;
pub use self::mutex::MutexStore;
pub use self::rwlock::RwLockStore;

mod mem;
mod mutex;
mod rwlock;
