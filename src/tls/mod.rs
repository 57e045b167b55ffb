//! TLS context configuration
//!
//! This module builds OpenSSL contexts the way the Python `ssl.SSLContext`
//! binding does: credentials and trust material are loaded from PEM files
//! with the same error kinds, and cipher strings are evaluated with the
//! OpenSSL selection rules so the resulting suite list can be inspected
//! before any connection exists.
//!
//! # Architecture
//!
//! 1. `TlsContext` owns the role, credentials, trust store and cipher list
//! 2. `pem` and `cert` turn PEM/DER material into OpenSSL objects
//! 3. `cipher` and `cipher_list` implement the cipher string language
//! 4. `TlsContext::build` produces an `openssl::ssl::SslContext`
//!
//! Handshakes, record encryption and chain validation are left to OpenSSL.

pub mod args;
pub mod cert;
pub mod cipher;
pub mod cipher_list;
pub mod config;
pub mod context;
pub mod defaults;
pub mod error;
mod pem;
mod store;

pub use args::{Arg, CaData, CertChainArgs, VerifyLocations, MAX_PASSWORD_LEN};
pub use cert::CertInfo;
pub use cipher::CipherInfo;
pub use cipher_list::CipherSelection;
pub use config::{Protocol, Purpose, TlsVersion, VerifyMode};
pub use context::{create_default_context, TlsContext, DEFAULT_CIPHERS};
pub use defaults::{get_default_verify_paths, DefaultVerifyPaths};
pub use error::{MalformedKind, TlsError};
pub use store::CertStoreStats;

pub type Result<T> = std::result::Result<T, TlsError>;
