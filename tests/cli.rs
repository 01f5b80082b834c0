//! Command line checks for the two binaries, plus one full round trip through
//! a spawned server process.

use std::process::{Child, Command};
use std::thread;
use std::time::Duration;

use assert_cmd::prelude::*;
use predicates::str::contains;

#[test]
fn client_no_subcommand_fails() {
    Command::cargo_bin("kvcache-client").unwrap().assert().failure();
}

#[test]
fn client_unknown_subcommand_fails() {
    Command::cargo_bin("kvcache-client")
        .unwrap()
        .args(&["push", "key"])
        .assert()
        .failure();
}

#[test]
fn client_get_without_key_fails() {
    Command::cargo_bin("kvcache-client").unwrap().args(&["get"]).assert().failure();
}

#[test]
fn client_put_without_value_fails() {
    Command::cargo_bin("kvcache-client")
        .unwrap()
        .args(&["put", "key1"])
        .assert()
        .failure();
}

#[test]
fn client_invalid_addr_fails() {
    Command::cargo_bin("kvcache-client")
        .unwrap()
        .args(&["get", "key1", "--addr", "invalid-addr"])
        .assert()
        .failure()
        .stderr(contains("could not parse"));
}

#[test]
fn client_version() {
    Command::cargo_bin("kvcache-client").unwrap().args(&["-V"]).assert().success();
}

#[test]
fn server_invalid_addr_fails() {
    Command::cargo_bin("kvcache-server")
        .unwrap()
        .args(&["--addr", "invalid-addr"])
        .assert()
        .failure()
        .stderr(contains("could not parse"));
}

#[test]
fn server_unknown_store_variant_fails() {
    Command::cargo_bin("kvcache-server")
        .unwrap()
        .args(&["--store", "dashmap"])
        .assert()
        .failure();
}

#[test]
fn server_zero_threads_fails() {
    Command::cargo_bin("kvcache-server")
        .unwrap()
        .args(&["--threads", "0"])
        .assert()
        .failure()
        .stderr(contains("at least 1"));
}

/// kills the spawned server even when an assertion fails mid-test
struct ServerGuard(Child);

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.0.kill();
    }
}

fn spawn_server(addr: &str, store: &str) -> ServerGuard {
    let child = Command::cargo_bin("kvcache-server")
        .unwrap()
        .args(&["--addr", addr, "--store", store])
        .spawn()
        .expect("failed to spawn server");
    ServerGuard(child)
}

/// retries a put until the server is up, so the test does not race the bind
fn wait_until_ready(addr: &str) {
    for _ in 0..50 {
        let ready = Command::cargo_bin("kvcache-client")
            .unwrap()
            .args(&["put", "ready", "1", "--addr", addr])
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false);
        if ready {
            return;
        }
        thread::sleep(Duration::from_millis(100));
    }
    panic!("server at {} never became ready", addr);
}

fn client(addr: &str, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("kvcache-client").unwrap();
    cmd.args(args).args(&["--addr", addr]);
    cmd
}

#[test]
fn cli_round_trip() {
    let addr = "127.0.0.1:4201";
    let _server = spawn_server(addr, "rwlock");
    wait_until_ready(addr);

    client(addr, &["has", "key1"]).assert().success().stdout(contains("false"));
    client(addr, &["get", "key1"]).assert().success().stdout(contains("Key not found"));

    client(addr, &["put", "key1", "value1"]).assert().success();
    client(addr, &["has", "key1"]).assert().success().stdout(contains("true"));
    client(addr, &["get", "key1"]).assert().success().stdout(contains("value1"));

    client(addr, &["put", "key1", "value2"]).assert().success();
    client(addr, &["get", "key1"]).assert().success().stdout(contains("value2"));

    client(addr, &["delete", "key1"]).assert().success();
    client(addr, &["has", "key1"]).assert().success().stdout(contains("false"));

    // deleting an absent key exits zero
    client(addr, &["delete", "never-stored"]).assert().success();
}

#[test]
fn cli_round_trip_serial_store() {
    let addr = "127.0.0.1:4202";
    let _server = spawn_server(addr, "unsync");
    wait_until_ready(addr);

    client(addr, &["put", "key1", "value1"]).assert().success();
    client(addr, &["get", "key1"]).assert().success().stdout(contains("value1"));
}
