//! TLS errors
//!
//! Every failure of a context operation surfaces as a [`TlsError`]. The
//! variants mirror the exception kinds of the Python `ssl` binding, and the
//! accessors expose the same `errno`/`strerror`/`library`/`reason` view.

use std::path::PathBuf;

/// OpenSSL `ERR_R_PEM_LIB`
const ERRNO_PEM_LIB: i32 = 9;
/// `PEM_R_BAD_BASE64_DECODE`
const ERRNO_BAD_BASE64_DECODE: i32 = 100;
/// `X509_R_KEY_VALUES_MISMATCH`
const ERRNO_KEY_VALUES_MISMATCH: i32 = 116;
/// `X509_R_NO_CERTIFICATE_OR_CRL_FOUND`
const ERRNO_NO_CERTIFICATE_OR_CRL_FOUND: i32 = 136;
/// `ASN1_R_NOT_ENOUGH_DATA`
const ERRNO_NOT_ENOUGH_DATA: i32 = 142;
/// `EVP_R_BAD_DECRYPT`
const ERRNO_BAD_DECRYPT: i32 = 100;

/// Which decode stage rejected certificate or key material
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedKind {
    /// Generic PEM failure while loading credentials
    SslPemLib,
    /// Generic PEM failure while loading trust material
    X509PemLib,
    /// Body of a non-leaf certificate is not valid base64
    BadBase64,
    /// DER input ends inside an ASN.1 header or value
    NotEnoughData,
}

impl MalformedKind {
    fn library(self) -> &'static str {
        match self {
            MalformedKind::SslPemLib => "SSL",
            MalformedKind::X509PemLib => "X509",
            MalformedKind::BadBase64 => "PEM",
            MalformedKind::NotEnoughData => "ASN1",
        }
    }

    fn reason(self) -> &'static str {
        match self {
            MalformedKind::SslPemLib | MalformedKind::X509PemLib => "PEM_LIB",
            MalformedKind::BadBase64 => "BAD_BASE64_DECODE",
            MalformedKind::NotEnoughData => "NOT_ENOUGH_DATA",
        }
    }

    fn errno(self) -> i32 {
        match self {
            MalformedKind::SslPemLib | MalformedKind::X509PemLib => ERRNO_PEM_LIB,
            MalformedKind::BadBase64 => ERRNO_BAD_BASE64_DECODE,
            MalformedKind::NotEnoughData => ERRNO_NOT_ENOUGH_DATA,
        }
    }

    fn message(self) -> &'static str {
        match self {
            MalformedKind::SslPemLib => "[SSL] PEM lib",
            MalformedKind::X509PemLib => "[X509] PEM lib",
            MalformedKind::BadBase64 => "[PEM: BAD_BASE64_DECODE] bad base64 decode",
            MalformedKind::NotEnoughData => "[ASN1: NOT_ENOUGH_DATA] not enough data",
        }
    }
}

impl std::fmt::Display for MalformedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// TLS errors
#[derive(Debug, thiserror::Error)]
pub enum TlsError {
    /// Argument has the wrong type (not path-like, not a string, ...)
    #[error("{0}")]
    ArgumentType(String),

    #[error("[Errno 2] No such file or directory: '{}'", .path.display())]
    NotFound { path: PathBuf },

    #[error("[Errno {}] {}: '{}'", .source.raw_os_error().unwrap_or(0), .source, .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Malformed(MalformedKind),

    #[error("[X509: NO_CERTIFICATE_OR_CRL_FOUND] no certificate or crl found")]
    EmptyTrustStore,

    #[error("[X509: KEY_VALUES_MISMATCH] key values mismatch")]
    KeyMismatch,

    #[error("[EVP: BAD_DECRYPT] bad decrypt")]
    BadDecrypt,

    #[error("No cipher can be selected.")]
    NoCipherSelected,

    #[error("{0}")]
    InvalidConfig(String),

    #[error("OpenSSL error: {0}")]
    OpenSsl(#[from] openssl::error::ErrorStack),
}

impl TlsError {
    pub(crate) fn not_path_like(param: &str) -> Self {
        TlsError::ArgumentType(format!("{} should be a valid filesystem path", param))
    }

    /// Map a failed read of `path` to `NotFound` or `Io`
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            TlsError::NotFound { path }
        } else {
            TlsError::Io { path, source }
        }
    }

    /// POSIX errno or OpenSSL reason code, when the error carries one
    pub fn errno(&self) -> Option<i32> {
        match self {
            TlsError::NotFound { .. } => Some(libc::ENOENT),
            TlsError::Io { source, .. } => source.raw_os_error(),
            TlsError::Malformed(kind) => Some(kind.errno()),
            TlsError::EmptyTrustStore => Some(ERRNO_NO_CERTIFICATE_OR_CRL_FOUND),
            TlsError::KeyMismatch => Some(ERRNO_KEY_VALUES_MISMATCH),
            TlsError::BadDecrypt => Some(ERRNO_BAD_DECRYPT),
            _ => None,
        }
    }

    /// Error text without the errno/path decoration
    pub fn strerror(&self) -> String {
        match self {
            TlsError::NotFound { .. } => "No such file or directory".to_string(),
            TlsError::Io { source, .. } => source.to_string(),
            other => other.to_string(),
        }
    }

    /// OpenSSL library that reported the error
    pub fn library(&self) -> Option<&'static str> {
        match self {
            TlsError::Malformed(kind) => Some(kind.library()),
            TlsError::EmptyTrustStore | TlsError::KeyMismatch => Some("X509"),
            TlsError::BadDecrypt => Some("EVP"),
            TlsError::NoCipherSelected => Some("SSL"),
            _ => None,
        }
    }

    /// OpenSSL reason mnemonic
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            TlsError::Malformed(kind) => Some(kind.reason()),
            TlsError::EmptyTrustStore => Some("NO_CERTIFICATE_OR_CRL_FOUND"),
            TlsError::KeyMismatch => Some("KEY_VALUES_MISMATCH"),
            TlsError::BadDecrypt => Some("BAD_DECRYPT"),
            TlsError::NoCipherSelected => Some("NO_CIPHER_MATCH"),
            _ => None,
        }
    }

    /// True when the error is one of the malformed-material variants
    pub fn is_malformed(&self) -> bool {
        matches!(self, TlsError::Malformed(_))
    }
}
