//! Default trust locations
//!
//! OpenSSL looks for system trust material in a file and a hashed
//! directory below its configuration directory, and lets the
//! `SSL_CERT_FILE` and `SSL_CERT_DIR` environment variables override both.
//! The environment is read on every call.

use std::path::{Path, PathBuf};

pub const CERT_FILE_ENV: &str = "SSL_CERT_FILE";
pub const CERT_DIR_ENV: &str = "SSL_CERT_DIR";

const FALLBACK_OPENSSLDIR: &str = "/usr/local/ssl";

/// Resolved default verify locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultVerifyPaths {
    /// Effective CA file, if it exists
    pub cafile: Option<PathBuf>,
    /// Effective CA directory, if it exists
    pub capath: Option<PathBuf>,
    pub openssl_cafile_env: &'static str,
    pub openssl_cafile: PathBuf,
    pub openssl_capath_env: &'static str,
    pub openssl_capath: PathBuf,
}

/// OPENSSLDIR of the linked library
///
/// `openssl::version::dir()` reports e.g. `OPENSSLDIR: "/usr/lib/ssl"`.
pub fn openssl_dir() -> PathBuf {
    let reported = openssl::version::dir();
    reported
        .split('"')
        .nth(1)
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(FALLBACK_OPENSSLDIR))
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Resolve the default verify locations from the current environment
pub fn get_default_verify_paths() -> DefaultVerifyPaths {
    let dir = openssl_dir();
    let (cafile, capath) = candidate_paths();

    DefaultVerifyPaths {
        cafile: Some(cafile).filter(|p| p.exists()),
        capath: Some(capath).filter(|p| p.exists()),
        openssl_cafile_env: CERT_FILE_ENV,
        openssl_cafile: dir.join("cert.pem"),
        openssl_capath_env: CERT_DIR_ENV,
        openssl_capath: dir.join("certs"),
    }
}

/// The file and directory to load, before existence checks
pub(crate) fn candidate_paths() -> (PathBuf, PathBuf) {
    let dir = openssl_dir();
    (
        // Unset and empty both mean "use the default"
        env_path(CERT_FILE_ENV).unwrap_or_else(|| dir.join("cert.pem")),
        env_path(CERT_DIR_ENV).unwrap_or_else(|| dir.join("certs")),
    )
}

pub(crate) fn is_dir(path: &Path) -> bool {
    std::fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}
