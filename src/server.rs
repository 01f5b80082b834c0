use std::io::{BufReader, BufWriter, Write};
use std::net::{TcpListener, TcpStream, ToSocketAddrs};

use serde_json::Deserializer;
use tracing::{debug, error};

use crate::command::{Request, Response};
use crate::store::{SharedStore, Store};
use crate::thread_pool::ThreadPool;
use crate::Result;

/// A TCP server exposing a key/value store over the cache protocol.
///
/// It listens for connections on a
/// [`SocketAddr`](https://doc.rust-lang.org/std/net/enum.SocketAddr.html) and
/// services each connection on a thread from the pool. Every worker receives
/// its own handle to the shared store; the store's lock discipline is what
/// makes the concurrent access safe, the server adds no coordination of its
/// own.
///
/// # Example
/// Serve a mutex-protected store on "127.0.0.1:4000" with 4 worker threads:
/// ```rust,no_run
/// use kvcache::{CacheServer, MemStore, MutexStore, SharedQueueThreadPool, ThreadPool};
/// # fn main() -> kvcache::Result<()> {
/// let store = MutexStore::new(MemStore::new());
/// let pool = SharedQueueThreadPool::new(4)?;
/// CacheServer::new(store, pool).run("127.0.0.1:4000")?;
/// # Ok(())
/// # }
/// ```
pub struct CacheServer<S: SharedStore, P: ThreadPool> {
    /// handle to the store servicing the requests
    store: S,
    /// pool of threads the connections are serviced on
    pool: P,
}

impl<S: SharedStore, P: ThreadPool> CacheServer<S, P> {
    /// Create a new `CacheServer` over the given store handle and pool.
    pub fn new(store: S, pool: P) -> Self {
        CacheServer { store, pool }
    }

    /// Binds to `addr` and serves connections until the process exits.
    ///
    /// Each accepted connection is handed to the pool together with a fresh
    /// clone of the store handle. A failed handler only loses its own
    /// connection; the accept loop keeps running.
    ///
    /// # Errors
    /// Returns an error if the listener cannot be bound.
    pub fn run<A: ToSocketAddrs>(self, addr: A) -> Result<()> {
        let listener = TcpListener::bind(addr)?;
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let mut store = self.store.clone();
                    self.pool.spawn(move || {
                        if let Err(e) = serve(&mut store, stream) {
                            error!("error serving client: {}", e);
                        }
                    });
                }
                Err(e) => error!("connection failed: {}", e),
            }
        }
        Ok(())
    }
}

/// Binds to `addr` and serves connections one at a time on the calling
/// thread.
///
/// This is the entry point for the unsynchronized [`MemStore`]: with a single
/// service thread the accept loop itself serializes every store access, so no
/// lock is needed. Any [`Store`] works here, but a store with its own lock
/// gains nothing from it.
///
/// # Errors
/// Returns an error if the listener cannot be bound.
///
/// [`MemStore`]: crate::MemStore
pub fn run_serial<S: Store, A: ToSocketAddrs>(store: &mut S, addr: A) -> Result<()> {
    let listener = TcpListener::bind(addr)?;
    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                if let Err(e) = serve(store, stream) {
                    error!("error serving client: {}", e);
                }
            }
            Err(e) => error!("connection failed: {}", e),
        }
    }
    Ok(())
}

/// Services one connection: decodes the stream of [`Request`]s arriving over
/// `tcp`, executes each against the store, and writes one [`Response`] per
/// request back to the peer.
fn serve<S: Store>(store: &mut S, tcp: TcpStream) -> Result<()> {
    let peer_addr = tcp.peer_addr()?;
    let stream_reader = BufReader::new(&tcp);
    let mut stream_writer = BufWriter::new(&tcp);
    let req_reader = Deserializer::from_reader(stream_reader).into_iter::<Request>();

    for req in req_reader {
        let req = req?;
        debug!("received request from {}: {:?}", peer_addr, req);

        let resp = match req {
            Request::Has { key } => Response::Exists(store.has(&key)),
            Request::Get { key } => Response::Value(store.get(&key)),
            Request::Put { key, value } => {
                store.put(key, value);
                Response::Done
            }
            Request::Delete { key } => {
                store.delete(&key);
                Response::Done
            }
        };

        serde_json::to_writer(&mut stream_writer, &resp)?;
        stream_writer.flush()?;
        debug!("response sent to {}: {:?}", peer_addr, resp);
    }
    Ok(())
}
