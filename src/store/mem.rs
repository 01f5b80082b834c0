use std::collections::HashMap;

use super::Store;

/// The plain, unsynchronized store variant: a [`HashMap`] and nothing else.
///
/// This is the baseline the lock decorators wrap. It has no lock of its own,
/// so it is only usable from a single thread or behind external
/// serialization, and the type system holds that line: `MemStore` is not
/// cloneable and mutation requires `&mut`, so safe code cannot race on it.
#[derive(Debug, Default)]
pub struct MemStore {
    contents: HashMap<String, String>,
}

impl MemStore {
    /// creates an empty store
    pub fn new() -> MemStore {
        MemStore {
            contents: HashMap::new(),
        }
    }

    /// creates a store pre-populated with the given `contents`
    pub fn with_contents(contents: HashMap<String, String>) -> MemStore {
        MemStore { contents }
    }
}

impl Store for MemStore {
    fn has(&self, key: &str) -> bool {
        self.contents.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<String> {
        self.contents.get(key).cloned()
    }

    fn put(&mut self, key: String, value: String) {
        self.contents.insert(key, value);
    }

    fn delete(&mut self, key: &str) {
        self.contents.remove(key);
    }
}
