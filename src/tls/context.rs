//! TLS context
//!
//! [`TlsContext`] collects everything a TLS endpoint needs before the first
//! connection: the protocol role, a certificate chain with its private key,
//! trusted issuers and the enabled cipher suites. Loading is staged: every
//! operation parses and validates its input completely before touching the
//! context, so a failed call leaves earlier state untouched.
//!
//! # Architecture
//!
//! 1. Argument validation (`args`) turns loosely typed inputs into paths,
//!    passwords and in-memory trust data
//! 2. The PEM pipeline (`pem`, `cert`) parses material into OpenSSL objects
//! 3. The cipher engine (`cipher_list`) evaluates cipher strings
//! 4. [`TlsContext::build`] hands the collected state to OpenSSL
//!
//! # Examples
//!
//! ```no_run
//! use tlsctx::tls::{CertChainArgs, Protocol, TlsContext, VerifyLocations};
//!
//! let mut ctx = TlsContext::new(Protocol::Server).unwrap();
//! ctx.load_cert_chain(CertChainArgs::new("server.pem").keyfile("server.key"))
//!     .unwrap();
//! ctx.load_verify_locations(VerifyLocations::new().cafile("clients-ca.pem"))
//!     .unwrap();
//! ctx.set_ciphers("ECDHE+AESGCM").unwrap();
//! let ssl_ctx = ctx.build().unwrap();
//! ```

use super::args::{CaData, CertChainArgs, VerifyLocations};
use super::cert::{self, CertInfo};
use super::cipher::CipherInfo;
use super::cipher_list::CipherSelection;
use super::config::{Protocol, Purpose, TlsVersion, VerifyMode};
use super::defaults;
use super::pem;
use super::store::{CertStoreStats, TrustStore};
use super::{Result, TlsError};
use log::debug;
use openssl::pkey::{PKey, Private};
use openssl::ssl::{Ssl, SslContext, SslContextBuilder, SslContextRef};
use openssl::x509::X509;
use std::net::IpAddr;

/// Cipher string every new context starts with
pub const DEFAULT_CIPHERS: &str =
    "DEFAULT:!aNULL:!eNULL:!MD5:!3DES:!DES:!RC4:!IDEA:!SEED:!aDSS:!SRP:!PSK";

/// Loaded certificate chain (leaf first) and the matching private key
struct Credentials {
    chain: Vec<X509>,
    key: PKey<Private>,
}

/// TLS context
pub struct TlsContext {
    protocol: Protocol,
    credentials: Option<Credentials>,
    trust: TrustStore,
    ciphers: CipherSelection,
    verify_mode: VerifyMode,
    check_hostname: bool,
    min_version: Option<TlsVersion>,
    max_version: Option<TlsVersion>,
}

impl TlsContext {
    /// Create an empty context for `protocol`
    ///
    /// Client contexts require a verified peer and check hostnames; the
    /// other roles verify nothing until told to.
    pub fn new(protocol: Protocol) -> Result<Self> {
        let client = protocol == Protocol::Client;
        Ok(TlsContext {
            protocol,
            credentials: None,
            trust: TrustStore::default(),
            ciphers: CipherSelection::from_rules(DEFAULT_CIPHERS)?,
            verify_mode: if client { VerifyMode::Required } else { VerifyMode::None },
            check_hostname: client,
            min_version: None,
            max_version: None,
        })
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Load a certificate chain and its private key
    ///
    /// Argument types are checked in order (certfile, keyfile, password)
    /// before any file is read. Without a keyfile the key is taken from
    /// the certificate file.
    pub fn load_cert_chain(&mut self, args: CertChainArgs) -> Result<()> {
        let certfile = args.certfile.to_fs_path("certfile")?;
        let keyfile = args
            .keyfile
            .as_ref()
            .map(|arg| arg.to_fs_path("keyfile"))
            .transpose()?;
        let password = args.password.as_ref().map(|arg| arg.to_password()).transpose()?;

        let cert_text = pem::read_file(&certfile)?;
        let chain = cert::parse_chain(&cert_text)?;

        let key = match &keyfile {
            Some(path) => cert::parse_private_key(&pem::read_file(path)?, password.as_deref())?,
            None => cert::parse_private_key(&cert_text, password.as_deref())?,
        };
        cert::check_key_pair(&chain[0], &key)?;

        debug!(
            "loaded certificate chain of {} from {}",
            chain.len(),
            certfile.display()
        );
        self.credentials = Some(Credentials { chain, key });
        Ok(())
    }

    /// Add trusted issuers from a file, a hashed directory and/or memory
    ///
    /// At least one source must be given. Sources are read in the order
    /// cadata, cafile, capath and committed together. A capath that is not
    /// a directory is ignored.
    pub fn load_verify_locations(&mut self, locations: VerifyLocations) -> Result<()> {
        if locations.is_empty() {
            return Err(TlsError::ArgumentType(
                "cafile, capath and cadata cannot be all omitted".to_string(),
            ));
        }
        let cafile = locations
            .cafile
            .as_ref()
            .map(|arg| arg.to_fs_path("cafile"))
            .transpose()?;
        let capath = locations
            .capath
            .as_ref()
            .map(|arg| arg.to_fs_path("capath"))
            .transpose()?;

        let mut items = Vec::new();
        match &locations.cadata {
            Some(CaData::Pem(text)) => {
                if !text.is_ascii() {
                    return Err(TlsError::ArgumentType("Must be an ascii string".to_string()));
                }
                if text.is_empty() {
                    return Err(empty_cadata());
                }
                items.extend(cert::parse_trust_pem(text)?);
            }
            Some(CaData::Der(data)) => {
                if data.is_empty() {
                    return Err(empty_cadata());
                }
                items.extend(cert::parse_trust_der(data)?);
            }
            None => {}
        }
        if let Some(path) = &cafile {
            items.extend(cert::parse_trust_pem(&pem::read_file(path)?)?);
        }

        let staged = items.len();
        self.trust.extend(items)?;
        if staged > 0 {
            debug!("added {} trust items", staged);
        }

        if let Some(dir) = capath {
            if defaults::is_dir(&dir) {
                self.trust.add_capath(dir);
            } else {
                debug!("ignoring capath {}: not a directory", dir.display());
            }
        }
        Ok(())
    }

    /// Load the platform's default trust locations
    ///
    /// Honors `SSL_CERT_FILE` and `SSL_CERT_DIR`. Never fails: unreadable
    /// or malformed material is logged and skipped.
    pub fn load_default_certs(&mut self) {
        let (cafile, capath) = defaults::candidate_paths();

        if let Err(e) = self.load_verify_locations(VerifyLocations::new().cafile(cafile.as_path())) {
            debug!("skipping default CA file {}: {}", cafile.display(), e);
        }
        if let Err(e) = self.load_verify_locations(VerifyLocations::new().capath(capath.as_path())) {
            debug!("skipping default CA directory {}: {}", capath.display(), e);
        }
    }

    /// Replace the enabled cipher suites with the result of `rules`
    pub fn set_ciphers(&mut self, rules: &str) -> Result<()> {
        self.ciphers = CipherSelection::from_rules(rules)?;
        debug!("cipher list now has {} suites", self.ciphers.len());
        Ok(())
    }

    /// Enabled cipher suites in preference order, TLS 1.3 suites first
    pub fn get_ciphers(&self) -> Vec<CipherInfo> {
        self.ciphers.ciphers.iter().map(|c| c.info()).collect()
    }

    /// Value of the last `@SECLEVEL=n` command, if any
    pub fn security_level(&self) -> Option<u8> {
        self.ciphers.security_level
    }

    pub fn verify_mode(&self) -> VerifyMode {
        self.verify_mode
    }

    pub fn set_verify_mode(&mut self, mode: VerifyMode) -> Result<()> {
        if mode == VerifyMode::None && self.check_hostname {
            return Err(TlsError::InvalidConfig(
                "Cannot set verify_mode to CERT_NONE when check_hostname is enabled.".to_string(),
            ));
        }
        self.verify_mode = mode;
        Ok(())
    }

    pub fn check_hostname(&self) -> bool {
        self.check_hostname
    }

    /// Enable or disable hostname matching
    ///
    /// Enabling it on a context that verifies nothing also turns on
    /// certificate verification.
    pub fn set_check_hostname(&mut self, check: bool) {
        if check && self.verify_mode == VerifyMode::None {
            self.verify_mode = VerifyMode::Required;
        }
        self.check_hostname = check;
    }

    pub fn minimum_version(&self) -> Option<TlsVersion> {
        self.min_version
    }

    pub fn set_minimum_version(&mut self, version: Option<TlsVersion>) {
        self.min_version = version;
    }

    pub fn maximum_version(&self) -> Option<TlsVersion> {
        self.max_version
    }

    pub fn set_maximum_version(&mut self, version: Option<TlsVersion>) {
        self.max_version = version;
    }

    pub fn cert_store_stats(&self) -> CertStoreStats {
        self.trust.stats()
    }

    /// Details of every trusted certificate, in load order
    pub fn get_ca_certs(&self) -> Vec<CertInfo> {
        self.trust.certs().iter().map(|c| CertInfo::from_x509(c)).collect()
    }

    /// DER encoding of every trusted certificate, in load order
    pub fn get_ca_certs_der(&self) -> Result<Vec<Vec<u8>>> {
        self.trust
            .certs()
            .iter()
            .map(|c| c.to_der().map_err(TlsError::from))
            .collect()
    }

    /// Details of the loaded certificate chain, leaf first
    pub fn certificate_chain(&self) -> Vec<CertInfo> {
        self.credentials
            .iter()
            .flat_map(|creds| creds.chain.iter())
            .map(|c| CertInfo::from_x509(c))
            .collect()
    }

    /// Build an OpenSSL context from the current settings
    pub fn build(&self) -> Result<SslContext> {
        if let (Some(min), Some(max)) = (self.min_version, self.max_version) {
            if min > max {
                return Err(TlsError::InvalidConfig(format!(
                    "minimum_version {} is above maximum_version {}",
                    min.as_str(),
                    max.as_str()
                )));
            }
        }

        let mut builder = SslContextBuilder::new(self.protocol.method())?;
        builder.set_cipher_list(&self.ciphers.to_openssl_string())?;
        builder.set_min_proto_version(self.min_version.map(|v| v.to_openssl_version()))?;
        builder.set_max_proto_version(self.max_version.map(|v| v.to_openssl_version()))?;
        builder.set_verify(self.verify_mode.to_openssl());

        if let Some(creds) = &self.credentials {
            builder.set_certificate(&creds.chain[0])?;
            for extra in &creds.chain[1..] {
                builder.add_extra_chain_cert(extra.clone())?;
            }
            builder.set_private_key(&creds.key)?;
            builder.check_private_key()?;
        }
        self.trust.install(&mut builder)?;

        Ok(builder.build())
    }

    /// Create a connection object on `ctx`, a context built from `self`
    ///
    /// `server_hostname` is sent as SNI unless it is an IP address and, when
    /// hostname checking is on, is what the peer certificate must match.
    pub fn new_ssl(&self, ctx: &SslContextRef, server_hostname: Option<&str>) -> Result<Ssl> {
        let mut ssl = Ssl::new(ctx)?;

        let hostname = match server_hostname {
            Some(name) => name,
            None if self.check_hostname && self.protocol == Protocol::Client => {
                return Err(TlsError::InvalidConfig(
                    "check_hostname requires server_hostname".to_string(),
                ));
            }
            None => return Ok(ssl),
        };
        if hostname.is_empty() || hostname.starts_with('.') {
            return Err(TlsError::InvalidConfig(
                "server_hostname cannot be an empty string or start with a leading dot."
                    .to_string(),
            ));
        }

        let ip = hostname.parse::<IpAddr>().ok();
        if ip.is_none() {
            ssl.set_hostname(hostname)?;
        }
        if self.check_hostname {
            match ip {
                Some(ip) => ssl.param_mut().set_ip(ip)?,
                None => ssl.param_mut().set_host(hostname)?,
            }
        }
        Ok(ssl)
    }
}

impl std::fmt::Debug for TlsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsContext")
            .field("protocol", &self.protocol)
            .field("has_credentials", &self.credentials.is_some())
            .field("cert_store", &self.trust.stats())
            .field("capaths", &self.trust.capaths())
            .field("ciphers", &self.ciphers.len())
            .field("verify_mode", &self.verify_mode)
            .field("check_hostname", &self.check_hostname)
            .finish()
    }
}

fn empty_cadata() -> TlsError {
    TlsError::InvalidConfig("Empty certificate data".to_string())
}

/// Create a context with secure defaults for `purpose`
///
/// The trust store is filled from `locations` when given. Otherwise a
/// context that verifies peers gets the platform defaults.
pub fn create_default_context(
    purpose: Purpose,
    locations: Option<VerifyLocations>,
) -> Result<TlsContext> {
    let mut ctx = TlsContext::new(purpose.protocol())?;
    ctx.set_minimum_version(Some(TlsVersion::Tls12));

    match locations {
        Some(locations) => ctx.load_verify_locations(locations)?,
        None if ctx.verify_mode() != VerifyMode::None => ctx.load_default_certs(),
        None => {}
    }
    Ok(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tls::args::Arg;

    const DATA: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/ssldata");

    fn data(name: &str) -> String {
        format!("{}/{}", DATA, name)
    }

    #[test]
    fn test_role_defaults() {
        let client = TlsContext::new(Protocol::Client).unwrap();
        assert_eq!(client.verify_mode(), VerifyMode::Required);
        assert!(client.check_hostname());

        let server = TlsContext::new(Protocol::Server).unwrap();
        assert_eq!(server.verify_mode(), VerifyMode::None);
        assert!(!server.check_hostname());
        assert_eq!(server.protocol(), Protocol::Server);
        assert!(!server.get_ciphers().is_empty());
    }

    #[test]
    fn test_verify_mode_and_hostname_interplay() {
        let mut ctx = TlsContext::new(Protocol::Client).unwrap();
        assert!(matches!(
            ctx.set_verify_mode(VerifyMode::None),
            Err(TlsError::InvalidConfig(_))
        ));
        ctx.set_check_hostname(false);
        ctx.set_verify_mode(VerifyMode::None).unwrap();

        ctx.set_check_hostname(true);
        assert_eq!(ctx.verify_mode(), VerifyMode::Required);
    }

    #[test]
    fn test_load_cert_chain_from_combined_file() {
        let mut ctx = TlsContext::new(Protocol::Server).unwrap();
        ctx.load_cert_chain(CertChainArgs::new(data("cert_and_key_rsa.pem")))
            .unwrap();
        let chain = ctx.certificate_chain();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].subject, "localhost");
    }

    #[test]
    fn test_failed_load_keeps_credentials() {
        let mut ctx = TlsContext::new(Protocol::Server).unwrap();
        ctx.load_cert_chain(CertChainArgs::new(data("cert_rsa.pem")).keyfile(data("pk_rsa.pem")))
            .unwrap();

        let err = ctx
            .load_cert_chain(CertChainArgs::new(data("cert_rsa.pem")).keyfile(data("pk_rsa2.pem")))
            .unwrap_err();
        assert!(matches!(err, TlsError::KeyMismatch));
        assert_eq!(ctx.certificate_chain()[0].subject, "localhost");
    }

    #[test]
    fn test_argument_types_checked_before_io() {
        let mut ctx = TlsContext::new(Protocol::Server).unwrap();
        let err = ctx
            .load_cert_chain(CertChainArgs::new("/nonexistent.pem").keyfile(Arg::Int(1)))
            .unwrap_err();
        assert_eq!(err.to_string(), "keyfile should be a valid filesystem path");
    }

    #[test]
    fn test_verify_locations_all_omitted() {
        let mut ctx = TlsContext::new(Protocol::Client).unwrap();
        let err = ctx.load_verify_locations(VerifyLocations::new()).unwrap_err();
        assert!(matches!(err, TlsError::ArgumentType(_)));
    }

    #[test]
    fn test_verify_locations_commit_together() {
        let mut ctx = TlsContext::new(Protocol::Client).unwrap();
        let ca = std::fs::read_to_string(data("ca.pem")).unwrap();

        // The cadata part is valid but the cafile is missing
        let err = ctx
            .load_verify_locations(
                VerifyLocations::new()
                    .cadata(ca.as_str())
                    .cafile(data("missing.pem")),
            )
            .unwrap_err();
        assert_eq!(err.errno(), Some(2));
        assert_eq!(ctx.cert_store_stats(), CertStoreStats::default());

        ctx.load_verify_locations(VerifyLocations::new().cadata(ca)).unwrap();
        assert_eq!(ctx.cert_store_stats().x509, 1);
        assert_eq!(ctx.get_ca_certs()[0].subject, "Test Root CA");
        assert_eq!(ctx.get_ca_certs_der().unwrap().len(), 1);
    }

    #[test]
    fn test_capath_must_be_directory() {
        let mut ctx = TlsContext::new(Protocol::Client).unwrap();
        ctx.load_verify_locations(VerifyLocations::new().capath(data("ca.pem")))
            .unwrap();
        assert!(ctx.trust.capaths().is_empty());
        assert!(format!("{:?}", ctx).contains("capaths: []"));

        ctx.load_verify_locations(VerifyLocations::new().capath(DATA)).unwrap();
        assert_eq!(ctx.trust.capaths().len(), 1);
        assert!(format!("{:?}", ctx).contains(&format!("capaths: [{:?}]", DATA)));
    }

    #[test]
    fn test_set_ciphers_failure_keeps_list() {
        let mut ctx = TlsContext::new(Protocol::Client).unwrap();
        let before = ctx.get_ciphers().len();
        assert!(matches!(
            ctx.set_ciphers("NOTACIPHER"),
            Err(TlsError::NoCipherSelected)
        ));
        assert_eq!(ctx.get_ciphers().len(), before);

        ctx.set_ciphers("ECDHE+AESGCM:@SECLEVEL=2").unwrap();
        assert_eq!(ctx.security_level(), Some(2));
        assert_eq!(ctx.get_ciphers()[0].name, "TLS_AES_256_GCM_SHA384");
    }

    #[test]
    fn test_build_rejects_inverted_versions() {
        let mut ctx = TlsContext::new(Protocol::Client).unwrap();
        ctx.set_minimum_version(Some(TlsVersion::Tls13));
        ctx.set_maximum_version(Some(TlsVersion::Tls12));
        assert!(matches!(ctx.build(), Err(TlsError::InvalidConfig(_))));

        ctx.set_maximum_version(None);
        ctx.build().unwrap();
    }

    #[test]
    fn test_build_with_credentials() {
        let mut ctx = TlsContext::new(Protocol::Server).unwrap();
        ctx.load_cert_chain(CertChainArgs::new(data("chain.pem")).keyfile(data("leaf_key.pem")))
            .unwrap();
        let built = ctx.build().unwrap();
        assert!(built.certificate().is_some());
        assert!(built.private_key().is_some());
    }

    #[test]
    fn test_new_ssl_hostname_rules() {
        let ctx = TlsContext::new(Protocol::Client).unwrap();
        let built = ctx.build().unwrap();

        assert!(matches!(
            ctx.new_ssl(&built, None),
            Err(TlsError::InvalidConfig(_))
        ));
        assert!(ctx.new_ssl(&built, Some(".example.com")).is_err());
        ctx.new_ssl(&built, Some("localhost")).unwrap();
        ctx.new_ssl(&built, Some("127.0.0.1")).unwrap();
    }

    #[test]
    fn test_create_default_context_with_locations() {
        let ctx = create_default_context(
            Purpose::ServerAuth,
            Some(VerifyLocations::new().cafile(data("chain.pem"))),
        )
        .unwrap();
        assert_eq!(ctx.protocol(), Protocol::Client);
        assert_eq!(ctx.minimum_version(), Some(TlsVersion::Tls12));
        assert_eq!(ctx.cert_store_stats().x509, 2);

        let server = create_default_context(Purpose::ClientAuth, None).unwrap();
        assert_eq!(server.cert_store_stats(), CertStoreStats::default());
    }
}
