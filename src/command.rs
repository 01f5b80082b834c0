use serde::{Deserialize, Serialize};

/// These are the request "commands" that can be made to the cache
#[derive(Debug, Serialize, Deserialize)]
pub enum Request {
    /// check whether a key is present in the store
    Has {
        /// the key to check for
        key: String,
    },
    /// get a value from the store
    Get {
        /// the key to look up
        key: String,
    },
    /// insert or overwrite a key/value pair in the store
    Put {
        /// the key to store under
        key: String,
        /// the value to store
        value: String,
    },
    /// remove a key/value pair from the store
    Delete {
        /// the key to remove
        key: String,
    },
}

/// The response types that can be returned for a cache [`Request`]
#[derive(Debug, Serialize, Deserialize)]
pub enum Response {
    /// reply to a `Has` request
    Exists(bool),
    /// reply to a `Get` request, `None` when the key is absent
    Value(Option<String>),
    /// reply to a `Put` or `Delete` request
    Done,
    /// returned if an error occurs while processing a request
    Err(String),
}
