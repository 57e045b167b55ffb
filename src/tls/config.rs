//! Context configuration types
//!
//! Protocol role, version bounds and peer verification settings.

use openssl::ssl::{SslMethod, SslVerifyMode, SslVersion};

/// Role a context is created for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    /// Client connections only; verifies peers and hostnames by default
    Client,
    /// Server connections only
    Server,
    /// Either side; no peer verification by default
    Generic,
}

impl Protocol {
    pub(crate) fn method(&self) -> SslMethod {
        match self {
            Protocol::Client => SslMethod::tls_client(),
            Protocol::Server => SslMethod::tls_server(),
            Protocol::Generic => SslMethod::tls(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Client => "PROTOCOL_TLS_CLIENT",
            Protocol::Server => "PROTOCOL_TLS_SERVER",
            Protocol::Generic => "PROTOCOL_TLS",
        }
    }
}

/// TLS version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TlsVersion {
    /// SSL 3.0 (deprecated, rarely used)
    Ssl3,
    /// TLS 1.0
    Tls10,
    /// TLS 1.1
    Tls11,
    /// TLS 1.2
    Tls12,
    /// TLS 1.3
    Tls13,
}

impl TlsVersion {
    /// Get OpenSSL protocol version constant
    pub fn to_openssl_version(&self) -> SslVersion {
        match self {
            TlsVersion::Ssl3 => SslVersion::SSL3,
            TlsVersion::Tls10 => SslVersion::TLS1,
            TlsVersion::Tls11 => SslVersion::TLS1_1,
            TlsVersion::Tls12 => SslVersion::TLS1_2,
            TlsVersion::Tls13 => SslVersion::TLS1_3,
        }
    }

    /// Get version as string
    pub fn as_str(&self) -> &'static str {
        match self {
            TlsVersion::Ssl3 => "SSLv3",
            TlsVersion::Tls10 => "TLSv1.0",
            TlsVersion::Tls11 => "TLSv1.1",
            TlsVersion::Tls12 => "TLSv1.2",
            TlsVersion::Tls13 => "TLSv1.3",
        }
    }
}

/// Peer certificate verification mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyMode {
    /// Don't request or check peer certificates
    None,
    /// Check a peer certificate if one is presented
    Optional,
    /// Require and check a peer certificate
    Required,
}

impl VerifyMode {
    pub(crate) fn to_openssl(self) -> SslVerifyMode {
        match self {
            VerifyMode::None => SslVerifyMode::NONE,
            VerifyMode::Optional => SslVerifyMode::PEER,
            VerifyMode::Required => SslVerifyMode::PEER | SslVerifyMode::FAIL_IF_NO_PEER_CERT,
        }
    }
}

/// What the certificates of a default context are used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    /// Authenticate servers; yields a client context
    ServerAuth,
    /// Authenticate clients; yields a server context
    ClientAuth,
}

impl Purpose {
    pub(crate) fn protocol(self) -> Protocol {
        match self {
            Purpose::ServerAuth => Protocol::Client,
            Purpose::ClientAuth => Protocol::Server,
        }
    }
}
