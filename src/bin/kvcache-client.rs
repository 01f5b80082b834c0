//! The kvcache-client executable supports the following command line arguments:
//!
//! `kvcache-client has <KEY> [--addr IP-PORT]`
//!
//!     Check whether a key is present in the cache; prints "true" or "false".
//!
//! `kvcache-client get <KEY> [--addr IP-PORT]`
//!
//!     Get the string value of a given string key; prints the value, or
//!     "Key not found" if the key is absent.
//!
//! `kvcache-client put <KEY> <VALUE> [--addr IP-PORT]`
//!
//!     Set the value of a string key to a string, overwriting any previous value.
//!
//! `kvcache-client delete <KEY> [--addr IP-PORT]`
//!
//!     Remove a given string key; removing an absent key succeeds.
//!
//! `--addr` accepts an IP address, either v4 or v6, and a port number, with the
//! format IP:PORT. If `--addr` is not specified then connect on 127.0.0.1:4000.
//! Every command prints an error and returns a non-zero exit code on server
//! error, or if IP-PORT does not parse as an address.

use std::net::SocketAddr;
use std::process::exit;

use clap::{crate_version, App, AppSettings, Arg, ArgMatches, SubCommand};
use kvcache::{CacheClient, CacheError, Request, Result};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const DEFAULT_ADDRESS: &str = "127.0.0.1:4000";

/// [`Opt`] holds parsed and validated options from the command line
#[derive(Debug)]
struct Opt {
    /// the server's ip:port
    addr: SocketAddr,
    req: Request,
}

impl Opt {
    /// validates the `addr` parameter is a valid IP address and PORT
    /// returns `Ok<Opt>` if everything is valid
    /// # Errors
    /// returns [`CacheError::Parsing`] if the address is invalid
    fn build(addr: &str, req: Request) -> Result<Opt> {
        let addr: SocketAddr = addr.parse().map_err(|_| {
            CacheError::Parsing(format!("could not parse {} into an IP address and port", &addr))
        })?;

        Ok(Opt { addr, req })
    }
}

fn main() {
    // configure a subscriber that will log messages to STDERR
    subscriber_config();

    let matches = App::new("kvcache-client")
        .version(crate_version!())
        .about("command line client for the kvcache server")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommands(vec![
            SubCommand::with_name("has")
                .about("Check whether a key is present in the cache")
                .arg(Arg::with_name("KEY").required(true).index(1)),
            SubCommand::with_name("get")
                .about("Get the string value of a given string key")
                .arg(Arg::with_name("KEY").required(true).index(1)),
            SubCommand::with_name("put")
                .about("Set the value of a string key to a string")
                .arg(Arg::with_name("KEY").required(true).index(1))
                .arg(Arg::with_name("VALUE").required(true).index(2)),
            SubCommand::with_name("delete")
                .about("Remove a given key")
                .arg(Arg::with_name("KEY").required(true).index(1)),
        ])
        .arg(
            Arg::with_name("addr")
                .long("addr")
                .value_name("IP_ADDR:PORT")
                .help("sets the IP_ADDR:PORT of the server to connect to")
                .default_value(DEFAULT_ADDRESS)
                .global(true),
        )
        .get_matches();

    let result = match parse_options(matches) {
        Ok(opt) => run(opt),
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        eprintln!("{}", e);
        exit(1);
    }
}

/// executes the parsed request against the server at `opt.addr`
fn run(opt: Opt) -> Result<()> {
    let mut client = CacheClient::connect(opt.addr)?;
    match opt.req {
        Request::Has { key } => {
            println!("{}", client.has(key)?);
        }
        Request::Get { key } => {
            if let Some(value) = client.get(key)? {
                println!("{}", value);
            } else {
                println!("Key not found");
            }
        }
        Request::Put { key, value } => {
            client.put(key, value)?;
        }
        Request::Delete { key } => {
            client.delete(key)?;
        }
    }
    Ok(())
}

/// parses the matches from the command line into an [`Opt`] struct
fn parse_options(matches: ArgMatches) -> Result<Opt> {
    let addr = matches.value_of("addr").unwrap();
    match matches.subcommand() {
        ("has", Some(args)) => {
            let key = args.value_of("KEY").map(String::from).unwrap();
            Opt::build(addr, Request::Has { key })
        }
        ("get", Some(args)) => {
            let key = args.value_of("KEY").map(String::from).unwrap();
            Opt::build(addr, Request::Get { key })
        }
        ("put", Some(args)) => {
            let key = args.value_of("KEY").map(String::from).unwrap();
            let value = args.value_of("VALUE").map(String::from).unwrap();
            Opt::build(addr, Request::Put { key, value })
        }
        ("delete", Some(args)) => {
            let key = args.value_of("KEY").map(String::from).unwrap();
            Opt::build(addr, Request::Delete { key })
        }
        _ => unreachable!("clap requires a subcommand"),
    }
}

/// configures a tracing subscriber that will log to STDERR
fn subscriber_config() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting tracing default subscriber failed");
}
