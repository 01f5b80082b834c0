//! this binary starts the kvcache server
//! to see the list of options, type: `kvcache-server --help`

use std::net::SocketAddr;
use std::process::exit;
use std::thread;

use clap::{arg_enum, crate_version, value_t, App, Arg};
use kvcache::{
    CacheError, CacheServer, MemStore, MutexStore, Result, RwLockStore, SharedQueueThreadPool,
    SharedStore, ThreadPool,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

arg_enum! {
    #[allow(non_camel_case_types)]
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    enum StoreKind {
        unsync,
        mutex,
        rwlock
    }
}

const DEFAULT_ADDRESS: &str = "127.0.0.1:4000";
const DEFAULT_STORE: StoreKind = StoreKind::mutex;

/// [`Opt`] holds parsed and validated options from the command line
#[derive(Debug)]
struct Opt {
    addr: SocketAddr,
    store: StoreKind,
    threads: u32,
}

impl Opt {
    /// validates the `addr` and `threads` parameters
    /// returns `Ok<Opt>` if everything is valid
    /// # Errors
    /// returns [`CacheError::Parsing`] if one of the parameters is invalid
    fn build(addr: &str, store: StoreKind, threads: Option<&str>) -> Result<Opt> {
        let addr: SocketAddr = addr.parse().map_err(|_| {
            CacheError::Parsing(format!("could not parse {} into an IP address and port", &addr))
        })?;

        let threads = match threads {
            Some(t) => t.parse::<u32>().map_err(|_| {
                CacheError::Parsing(format!("could not parse {} into a thread count", &t))
            })?,
            None => default_threads(),
        };
        if threads == 0 {
            return Err(CacheError::Parsing("thread count must be at least 1".to_string()));
        }

        Ok(Opt { addr, store, threads })
    }
}

fn main() {
    // set up a tracing subscriber to log to STDERR
    subscriber_config();

    // parse command line args
    let matches = App::new("kvcache-server")
        .version(crate_version!())
        .about("a multi-threaded, in-memory key-value cache server")
        .arg(
            Arg::with_name("addr")
                .long("addr")
                .value_name("IP_ADDR:PORT")
                .help("sets the IP_ADDR:PORT that the server listens on")
                .default_value(DEFAULT_ADDRESS),
        )
        .arg(
            Arg::with_name("store")
                .long("store")
                .value_name("STORE_VARIANT")
                .help("sets the store variant: 'unsync' serves connections one at a time with no locking, 'mutex' takes an exclusive lock for every operation, 'rwlock' lets reads share the lock")
                .possible_values(&StoreKind::variants())
                .default_value("mutex"),
        )
        .arg(
            Arg::with_name("threads")
                .long("threads")
                .value_name("N")
                .help("sets the number of worker threads servicing connections (defaults to the number of CPUs; ignored with --store unsync)"),
        )
        .get_matches();

    // validate command line options, store them in Opt
    let addr = matches.value_of("addr").unwrap();
    let store = value_t!(matches, "store", StoreKind).unwrap_or(DEFAULT_STORE);
    let opt = match Opt::build(addr, store, matches.value_of("threads")) {
        Ok(opt) => opt,
        Err(err) => {
            eprintln!("{}", err);
            exit(1);
        }
    };

    // start the server
    if let Err(e) = run(opt) {
        eprintln!("{}", e);
        exit(1);
    }
}

fn run(opt: Opt) -> Result<()> {
    info!("kvcache-server {}", env!("CARGO_PKG_VERSION"));
    info!("store variant: {}", opt.store);
    info!("listening on {}", opt.addr);

    match opt.store {
        StoreKind::unsync => {
            // one service thread; the accept loop is the serialization point
            let mut store = MemStore::new();
            kvcache::run_serial(&mut store, opt.addr)
        }
        StoreKind::mutex => run_with_store(MutexStore::new(MemStore::new()), opt),
        StoreKind::rwlock => run_with_store(RwLockStore::new(MemStore::new()), opt),
    }
}

fn run_with_store<S: SharedStore>(store: S, opt: Opt) -> Result<()> {
    let pool = SharedQueueThreadPool::new(opt.threads)?;
    let server = CacheServer::new(store, pool);
    server.run(opt.addr)
}

fn default_threads() -> u32 {
    thread::available_parallelism().map(|n| n.get() as u32).unwrap_or(4)
}

/// configures a tracing subscriber that will log to STDERR
fn subscriber_config() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting tracing default subscriber failed");
}
