//! tlsctx - TLS context configuration on top of OpenSSL
//!
//! This crate loads certificate chains, private keys and trust material,
//! evaluates OpenSSL cipher strings and builds ready-to-use OpenSSL
//! contexts. Its error kinds and messages follow the Python `ssl` module so
//! test suites written against that binding carry over.

pub mod tls;
