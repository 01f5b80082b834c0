use std::io::{BufReader, BufWriter, Write};
use std::net::{TcpStream, ToSocketAddrs};

use serde::Deserialize;
use serde_json::de::IoRead;
use serde_json::Deserializer;

use crate::command::{Request, Response};
use crate::{CacheError, Result};

/// `CacheClient` holds a connection to a [`CacheServer`] and issues one
/// request/response round trip per operation.
///
/// [`CacheServer`]: crate::CacheServer
pub struct CacheClient {
    reader: Deserializer<IoRead<BufReader<TcpStream>>>,
    writer: BufWriter<TcpStream>,
}

impl CacheClient {
    /// creates a client and establishes a socket connection to the server at
    /// the given `addr`
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let tcp_reader = TcpStream::connect(addr)?;
        let tcp_writer = tcp_reader.try_clone()?;

        Ok(CacheClient {
            reader: Deserializer::from_reader(BufReader::new(tcp_reader)),
            writer: BufWriter::new(tcp_writer),
        })
    }

    /// asks the server whether `key` is present in the store
    pub fn has(&mut self, key: String) -> Result<bool> {
        match self.round_trip(Request::Has { key })? {
            Response::Exists(exists) => Ok(exists),
            resp => Err(unexpected(resp)),
        }
    }

    /// Gets the value of `key` from the server.
    ///
    /// Returns `Ok(None)` if there is no value associated with the key.
    pub fn get(&mut self, key: String) -> Result<Option<String>> {
        match self.round_trip(Request::Get { key })? {
            Response::Value(value) => Ok(value),
            resp => Err(unexpected(resp)),
        }
    }

    /// stores `value` under `key` on the server, overwriting any previous
    /// value
    pub fn put(&mut self, key: String, value: String) -> Result<()> {
        match self.round_trip(Request::Put { key, value })? {
            Response::Done => Ok(()),
            resp => Err(unexpected(resp)),
        }
    }

    /// removes `key` and its value from the server; removing an absent key
    /// succeeds
    pub fn delete(&mut self, key: String) -> Result<()> {
        match self.round_trip(Request::Delete { key })? {
            Response::Done => Ok(()),
            resp => Err(unexpected(resp)),
        }
    }

    /// sends one request and decodes one response, surfacing a server-side
    /// `Err` response as [`CacheError::Server`]
    fn round_trip(&mut self, req: Request) -> Result<Response> {
        serde_json::to_writer(&mut self.writer, &req)?;
        self.writer.flush()?;

        match Response::deserialize(&mut self.reader)? {
            Response::Err(msg) => Err(CacheError::Server(msg)),
            resp => Ok(resp),
        }
    }
}

fn unexpected(resp: Response) -> CacheError {
    CacheError::UnexpectedResponse(format!("{:?}", resp))
}
