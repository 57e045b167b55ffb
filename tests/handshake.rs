//! Loopback handshake tests
//!
//! These tests verify that contexts built by `TlsContext::build` are usable
//! by OpenSSL end to end:
//! - A server presents a chain loaded with `load_cert_chain`
//! - A client verifies it against a CA loaded with `load_verify_locations`
//! - Hostname checking rejects a certificate for another name
//! - The cipher list restricts what is negotiated

use openssl::ssl::{HandshakeError, SslStream, SslVersion};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tlsctx::tls::{CertChainArgs, Protocol, TlsContext, TlsVersion, VerifyLocations};

fn data_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data/ssldata")
        .join(name)
}

fn server_context() -> TlsContext {
    let mut ctx = TlsContext::new(Protocol::Server).unwrap();
    ctx.load_cert_chain(CertChainArgs::new(data_file("chain.pem")).keyfile(data_file("leaf_key.pem")))
        .unwrap();
    ctx
}

fn client_context() -> TlsContext {
    let mut ctx = TlsContext::new(Protocol::Client).unwrap();
    ctx.load_verify_locations(VerifyLocations::new().cafile(data_file("ca.pem")))
        .unwrap();
    ctx
}

/// Accept one connection, echo one message, return the negotiated cipher
fn spawn_echo_server(ctx: TlsContext) -> (u16, thread::JoinHandle<Option<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let built = ctx.build().unwrap();

    let handle = thread::spawn(move || {
        let (tcp_stream, _) = listener.accept().unwrap();
        let ssl = ctx.new_ssl(&built, None).unwrap();
        let mut stream = match ssl.accept(tcp_stream) {
            Ok(stream) => stream,
            Err(_) => return None,
        };

        let cipher = stream.ssl().current_cipher().map(|c| c.name().to_string());
        let mut buf = [0u8; 64];
        let n = stream.read(&mut buf).unwrap();
        stream.write_all(&buf[..n]).unwrap();
        let _ = stream.shutdown();
        cipher
    });

    // Give server time to start
    thread::sleep(Duration::from_millis(100));

    (port, handle)
}

fn connect(
    ctx: &TlsContext,
    port: u16,
    hostname: &str,
) -> Result<SslStream<TcpStream>, HandshakeError<TcpStream>> {
    let built = ctx.build().unwrap();
    let ssl = ctx.new_ssl(&built, Some(hostname)).unwrap();
    let tcp_stream = TcpStream::connect(("127.0.0.1", port)).unwrap();
    ssl.connect(tcp_stream)
}

#[test]
fn test_verified_handshake() {
    let (port, server) = spawn_echo_server(server_context());

    let mut stream = connect(&client_context(), port, "localhost").unwrap();
    assert_eq!(stream.ssl().version2(), Some(SslVersion::TLS1_3));

    let peer = stream.ssl().peer_certificate().unwrap();
    let cn = peer
        .subject_name()
        .entries_by_nid(openssl::nid::Nid::COMMONNAME)
        .next()
        .unwrap();
    assert_eq!(cn.data().to_string().unwrap(), "localhost");

    stream.write_all(b"ping").unwrap();
    let mut buf = [0u8; 4];
    stream.read_exact(&mut buf).unwrap();
    assert_eq!(&buf, b"ping");

    assert!(server.join().unwrap().is_some());
}

#[test]
fn test_ip_address_hostname() {
    let (port, server) = spawn_echo_server(server_context());

    let mut stream = connect(&client_context(), port, "127.0.0.1").unwrap();
    stream.write_all(b"ip").unwrap();
    let mut buf = [0u8; 2];
    stream.read_exact(&mut buf).unwrap();

    assert!(server.join().unwrap().is_some());
}

#[test]
fn test_hostname_mismatch_fails() {
    let (port, server) = spawn_echo_server(server_context());

    let result = connect(&client_context(), port, "example.com");
    assert!(result.is_err());

    assert!(server.join().unwrap().is_none());
}

#[test]
fn test_untrusted_issuer_fails() {
    let (port, server) = spawn_echo_server(server_context());

    // A client that trusts only an unrelated self-signed certificate
    let mut client = TlsContext::new(Protocol::Client).unwrap();
    client
        .load_verify_locations(VerifyLocations::new().cafile(data_file("cert_rsa2.pem")))
        .unwrap();
    assert!(connect(&client, port, "localhost").is_err());

    assert!(server.join().unwrap().is_none());
}

#[test]
fn test_negotiated_cipher_follows_list() {
    let mut server = server_context();
    server.set_ciphers("ECDHE-RSA-AES128-GCM-SHA256").unwrap();
    let (port, handle) = spawn_echo_server(server);

    let mut client = client_context();
    client.set_maximum_version(Some(TlsVersion::Tls12));
    let mut stream = connect(&client, port, "localhost").unwrap();
    assert_eq!(
        stream.ssl().current_cipher().map(|c| c.name()),
        Some("ECDHE-RSA-AES128-GCM-SHA256")
    );
    stream.write_all(b"x").unwrap();
    let mut buf = [0u8; 1];
    stream.read_exact(&mut buf).unwrap();

    assert_eq!(
        handle.join().unwrap().as_deref(),
        Some("ECDHE-RSA-AES128-GCM-SHA256")
    );
}
