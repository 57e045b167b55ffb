//! Arguments accepted by the context load operations
//!
//! Callers that bridge from a dynamically typed surface hand over values
//! whose type is not known up front. [`Arg`] carries such a value, and the
//! load operations check it before touching the filesystem.

use super::{Result, TlsError};
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

/// Longest accepted key password, OpenSSL's `PEM_BUFSIZE`
pub const MAX_PASSWORD_LEN: usize = 1024;

/// A loosely typed argument value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Str(String),
    Bytes(Vec<u8>),
    Path(PathBuf),
    Int(i64),
}

impl Arg {
    /// Convert to a filesystem path, naming `param` in the error
    pub fn to_fs_path(&self, param: &str) -> Result<PathBuf> {
        match self {
            Arg::Str(s) => Ok(PathBuf::from(s)),
            Arg::Bytes(b) => Ok(PathBuf::from(OsStr::from_bytes(b))),
            Arg::Path(p) => Ok(p.clone()),
            Arg::Int(_) => Err(TlsError::not_path_like(param)),
        }
    }

    /// Convert to password bytes
    pub fn to_password(&self) -> Result<Vec<u8>> {
        let bytes = match self {
            Arg::Str(s) => s.as_bytes().to_vec(),
            Arg::Bytes(b) => b.clone(),
            Arg::Path(_) | Arg::Int(_) => {
                return Err(TlsError::ArgumentType(
                    "password should be a string or bytes".to_string(),
                ))
            }
        };
        if bytes.len() > MAX_PASSWORD_LEN {
            return Err(TlsError::InvalidConfig(format!(
                "password cannot be longer than {} bytes",
                MAX_PASSWORD_LEN
            )));
        }
        Ok(bytes)
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Str(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Str(s)
    }
}

impl From<&Path> for Arg {
    fn from(p: &Path) -> Self {
        Arg::Path(p.to_path_buf())
    }
}

impl From<PathBuf> for Arg {
    fn from(p: PathBuf) -> Self {
        Arg::Path(p)
    }
}

impl From<&PathBuf> for Arg {
    fn from(p: &PathBuf) -> Self {
        Arg::Path(p.clone())
    }
}

impl From<Vec<u8>> for Arg {
    fn from(b: Vec<u8>) -> Self {
        Arg::Bytes(b)
    }
}

impl From<&[u8]> for Arg {
    fn from(b: &[u8]) -> Self {
        Arg::Bytes(b.to_vec())
    }
}

impl From<i64> for Arg {
    fn from(i: i64) -> Self {
        Arg::Int(i)
    }
}

impl From<i32> for Arg {
    fn from(i: i32) -> Self {
        Arg::Int(i64::from(i))
    }
}

/// Arguments of `TlsContext::load_cert_chain`
///
/// ```no_run
/// use tlsctx::tls::CertChainArgs;
///
/// let args = CertChainArgs::new("server.pem")
///     .keyfile("server.key")
///     .password("secret");
/// ```
#[derive(Debug, Clone)]
pub struct CertChainArgs {
    pub certfile: Arg,
    /// Defaults to `certfile` when unset
    pub keyfile: Option<Arg>,
    pub password: Option<Arg>,
}

impl CertChainArgs {
    pub fn new(certfile: impl Into<Arg>) -> Self {
        CertChainArgs {
            certfile: certfile.into(),
            keyfile: None,
            password: None,
        }
    }

    pub fn keyfile(mut self, keyfile: impl Into<Arg>) -> Self {
        self.keyfile = Some(keyfile.into());
        self
    }

    pub fn password(mut self, password: impl Into<Arg>) -> Self {
        self.password = Some(password.into());
        self
    }
}

/// In-memory trust material
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaData {
    /// PEM text, possibly several concatenated blocks
    Pem(String),
    /// Concatenated DER certificates
    Der(Vec<u8>),
}

impl From<&str> for CaData {
    fn from(s: &str) -> Self {
        CaData::Pem(s.to_string())
    }
}

impl From<String> for CaData {
    fn from(s: String) -> Self {
        CaData::Pem(s)
    }
}

impl From<Vec<u8>> for CaData {
    fn from(b: Vec<u8>) -> Self {
        CaData::Der(b)
    }
}

/// Arguments of `TlsContext::load_verify_locations`
#[derive(Debug, Clone, Default)]
pub struct VerifyLocations {
    pub cafile: Option<Arg>,
    pub capath: Option<Arg>,
    pub cadata: Option<CaData>,
}

impl VerifyLocations {
    pub fn new() -> Self {
        VerifyLocations::default()
    }

    pub fn cafile(mut self, cafile: impl Into<Arg>) -> Self {
        self.cafile = Some(cafile.into());
        self
    }

    pub fn capath(mut self, capath: impl Into<Arg>) -> Self {
        self.capath = Some(capath.into());
        self
    }

    pub fn cadata(mut self, cadata: impl Into<CaData>) -> Self {
        self.cadata = Some(cadata.into());
        self
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.cafile.is_none() && self.capath.is_none() && self.cadata.is_none()
    }
}
