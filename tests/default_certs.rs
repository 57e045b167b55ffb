//! Default trust location tests
//!
//! These tests verify `TlsContext::load_default_certs` and the
//! `SSL_CERT_FILE` / `SSL_CERT_DIR` overrides:
//! - Missing, empty and malformed locations never raise
//! - The environment is read at call time
//! - `get_default_verify_paths` reports the overrides
//! - `create_default_context` loads the defaults for client contexts

use std::path::PathBuf;
use std::sync::Mutex;
use tlsctx::tls::{
    create_default_context, get_default_verify_paths, Protocol, Purpose, TlsContext,
};

/// Tests in this file change process-wide environment variables
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn data_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data/ssldata")
        .join(name)
}

/// Run `f` with the default locations overridden, restoring them afterwards
fn with_env<F: FnOnce()>(file: &PathBuf, dir: &PathBuf, f: F) {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let saved_file = std::env::var_os("SSL_CERT_FILE");
    let saved_dir = std::env::var_os("SSL_CERT_DIR");

    std::env::set_var("SSL_CERT_FILE", file);
    std::env::set_var("SSL_CERT_DIR", dir);
    f();

    match saved_file {
        Some(v) => std::env::set_var("SSL_CERT_FILE", v),
        None => std::env::remove_var("SSL_CERT_FILE"),
    }
    match saved_dir {
        Some(v) => std::env::set_var("SSL_CERT_DIR", v),
        None => std::env::remove_var("SSL_CERT_DIR"),
    }
}

#[test]
fn test_load_default_certs_never_fails() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut ctx = TlsContext::new(Protocol::Client).unwrap();

    let cases = [
        (PathBuf::from("does_not_exist"), PathBuf::from("does_not_exist")),
        (data_file("empty.pem"), data_file("empty.pem")),
        (data_file("broken_cert_data.pem"), data_file("broken_cert_no_end.pem")),
        (data_file(""), data_file("cert_rsa.pem")),
        (data_file("cert_rsa.pem"), data_file("cert_rsa.pem")),
    ];
    for (file, dir) in &cases {
        with_env(file, dir, || ctx.load_default_certs());
    }

    // Only the last case names loadable material
    assert_eq!(ctx.cert_store_stats().x509, 1);
    assert_eq!(ctx.get_ca_certs()[0].subject, "localhost");
}

#[test]
fn test_environment_read_at_call_time() {
    let dir = tempfile::tempdir().unwrap();
    let ca = dir.path().join("ca.pem");
    std::fs::copy(data_file("ca.pem"), &ca).unwrap();

    let mut ctx = TlsContext::new(Protocol::Client).unwrap();
    with_env(&dir.path().join("missing.pem"), &dir.path().to_path_buf(), || {
        ctx.load_default_certs()
    });
    assert_eq!(ctx.cert_store_stats().x509, 0);

    with_env(&ca, &dir.path().to_path_buf(), || ctx.load_default_certs());
    assert_eq!(ctx.cert_store_stats().x509, 1);
    assert_eq!(ctx.get_ca_certs()[0].subject, "Test Root CA");
}

#[test]
fn test_default_verify_paths_follow_environment() {
    let dir = tempfile::tempdir().unwrap();
    let ca = dir.path().join("bundle.pem");
    std::fs::copy(data_file("ca.pem"), &ca).unwrap();

    with_env(&ca, &dir.path().to_path_buf(), || {
        let paths = get_default_verify_paths();
        assert_eq!(paths.cafile.as_deref(), Some(ca.as_path()));
        assert_eq!(paths.capath.as_deref(), Some(dir.path()));
        assert_eq!(paths.openssl_cafile_env, "SSL_CERT_FILE");
    });

    with_env(&dir.path().join("gone.pem"), &dir.path().join("gone"), || {
        let paths = get_default_verify_paths();
        assert!(paths.cafile.is_none());
        assert!(paths.capath.is_none());
    });
}

#[test]
fn test_create_default_context_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let ca = dir.path().join("ca.pem");
    std::fs::copy(data_file("ca.pem"), &ca).unwrap();

    with_env(&ca, &dir.path().to_path_buf(), || {
        let client = create_default_context(Purpose::ServerAuth, None).unwrap();
        assert_eq!(client.protocol(), Protocol::Client);
        assert!(client.check_hostname());
        assert_eq!(client.cert_store_stats().x509, 1);

        // Server contexts do not verify clients, so nothing is loaded
        let server = create_default_context(Purpose::ClientAuth, None).unwrap();
        assert_eq!(server.protocol(), Protocol::Server);
        assert_eq!(server.cert_store_stats().x509, 0);
    });
}
