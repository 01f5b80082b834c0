#![deny(missing_docs)]
//! An in-memory, network-accessible key-value cache that maps [`String`] keys to
//! [`String`] values.
//!
//! This crate provides the cache's store abstraction and its concurrency-safe
//! variants, as well as a [`kvcache-client`] and [`kvcache-server`] executable
//! that expose the cache over a socket. Key/value data is sent between the
//! client and server using synchronous networking over a simple JSON protocol.
//!
//! ## Supported Cache Operations
//! The cache supports four operations:
//!
//! - `HAS` checks whether a key is present in the store
//! - `GET` retrieves the value associated with a key
//! - `PUT` inserts or overwrites a key/value pair
//! - `DELETE` removes a key/value pair
//!
//! All four operations are total: a missing key is a normal outcome, reported
//! through the return value, never an error. See the [`Store`] trait and the
//! [`Request`] and [`Response`] types for the exact shapes.
//!
//! ## Store Variants
//! The store comes in three interchangeable variants, selected when the owning
//! process constructs it:
//!
//! - [`MemStore`] is the plain, unsynchronized map. It carries no lock and is
//!   only usable from a single thread (the compiler enforces this: it is not
//!   cloneable and mutation needs `&mut`).
//! - [`MutexStore`] wraps an inner store in a mutex; every operation, reads
//!   included, runs under the exclusive lock.
//! - [`RwLockStore`] wraps an inner store in a reader/writer lock; `has` and
//!   `get` share the lock with each other while `put` and `delete` exclude
//!   everything.
//!
//! The two lock variants are decorators: they forward each call to the inner
//! store after taking the appropriate guard. Their clones are handles onto the
//! same underlying map, which is how the server shares one store across its
//! request threads (see [`SharedStore`]).
//!
//! ## Client / Server
//! Networking lives in [`CacheClient`] and [`CacheServer`]. The server accepts
//! TCP connections and services each one on a [`ThreadPool`] worker; requests
//! and responses are JSON-encoded [`Request`]/[`Response`] values streamed over
//! the connection, so one connection can carry any number of operations.
//!
//! [`kvcache-server`]: ./kvcache-server.rs
//! [`kvcache-client`]: ./kvcache-client.rs

pub use client::CacheClient;
pub use command::{Request, Response};
pub use error::{CacheError, Result};
pub use server::{run_serial, CacheServer};
pub use store::{MemStore, MutexStore, RwLockStore, SharedStore, Store};
pub use thread_pool::{NaiveThreadPool, SharedQueueThreadPool, ThreadPool};

mod client;
mod command;
mod error;
mod server;
pub mod store;
pub mod thread_pool;
