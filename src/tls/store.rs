//! Trust store
//!
//! Trusted certificates and CRLs accumulate across load calls and are
//! deduplicated by SHA-256 fingerprint. Hashed directories are only
//! recorded; OpenSSL consults them lazily once the context is built.

use super::cert::{self, TrustItem};
use super::Result;
use log::debug;
use openssl::hash::{hash, MessageDigest};
use openssl::ssl::{SslContextBuilder, SslFiletype};
use openssl::x509::store::X509Lookup;
use openssl::x509::{X509Crl, X509};
use std::collections::HashSet;
use std::path::PathBuf;

/// Counts of loaded trust material
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CertStoreStats {
    pub x509: usize,
    pub crl: usize,
}

#[derive(Default)]
pub(crate) struct TrustStore {
    certs: Vec<X509>,
    crls: Vec<X509Crl>,
    fingerprints: HashSet<Vec<u8>>,
    capaths: Vec<PathBuf>,
}

impl TrustStore {
    /// Add parsed trust material
    ///
    /// Fingerprints are computed up front so a failure leaves the store as
    /// it was.
    pub fn extend(&mut self, items: Vec<TrustItem>) -> Result<()> {
        let mut staged = Vec::with_capacity(items.len());
        for item in items {
            let digest = match &item {
                TrustItem::Cert(cert) => cert::fingerprint(cert)?,
                TrustItem::Crl(crl) => hash(MessageDigest::sha256(), &crl.to_der()?)?.to_vec(),
            };
            staged.push((digest, item));
        }

        for (digest, item) in staged {
            if !self.fingerprints.insert(digest) {
                continue;
            }
            match item {
                TrustItem::Cert(cert) => self.certs.push(cert),
                TrustItem::Crl(crl) => self.crls.push(crl),
            }
        }
        Ok(())
    }

    pub fn add_capath(&mut self, path: PathBuf) {
        if !self.capaths.contains(&path) {
            debug!("adding hashed directory {}", path.display());
            self.capaths.push(path);
        }
    }

    pub fn certs(&self) -> &[X509] {
        &self.certs
    }

    pub fn capaths(&self) -> &[PathBuf] {
        &self.capaths
    }

    pub fn stats(&self) -> CertStoreStats {
        CertStoreStats {
            x509: self.certs.len(),
            crl: self.crls.len(),
        }
    }

    /// Install certificates and directory lookups into an OpenSSL context
    pub fn install(&self, builder: &mut SslContextBuilder) -> Result<()> {
        let store = builder.cert_store_mut();
        for cert in &self.certs {
            store.add_cert(cert.clone())?;
        }
        if self.capaths.is_empty() {
            return Ok(());
        }

        let lookup = store.add_lookup(X509Lookup::hash_dir())?;
        for path in &self.capaths {
            match path.to_str() {
                Some(dir) => lookup.add_dir(dir, SslFiletype::PEM)?,
                None => debug!("skipping non UTF-8 directory {}", path.display()),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tls::cert::parse_trust_pem;

    const CHAIN: &str = include_str!("../../tests/data/ssldata/chain.pem");
    const CA: &str = include_str!("../../tests/data/ssldata/ca.pem");
    const CA_CRL: &str = include_str!("../../tests/data/ssldata/ca_crl.pem");

    #[test]
    fn test_extend_deduplicates() {
        let mut store = TrustStore::default();
        store.extend(parse_trust_pem(CHAIN).unwrap()).unwrap();
        store.extend(parse_trust_pem(CA).unwrap()).unwrap();
        assert_eq!(store.stats(), CertStoreStats { x509: 2, crl: 0 });

        store.extend(parse_trust_pem(CA_CRL).unwrap()).unwrap();
        store.extend(parse_trust_pem(CA_CRL).unwrap()).unwrap();
        assert_eq!(store.stats(), CertStoreStats { x509: 2, crl: 1 });
    }

    #[test]
    fn test_capaths_are_unique() {
        let mut store = TrustStore::default();
        store.add_capath(PathBuf::from("/etc/ssl/certs"));
        store.add_capath(PathBuf::from("/etc/ssl/certs"));
        assert_eq!(store.capaths().len(), 1);
    }

    #[test]
    fn test_install() {
        use openssl::ssl::SslMethod;

        let dir = tempfile::tempdir().unwrap();
        let mut store = TrustStore::default();
        store.extend(parse_trust_pem(CHAIN).unwrap()).unwrap();
        store.add_capath(dir.path().to_path_buf());

        let mut builder = SslContextBuilder::new(SslMethod::tls()).unwrap();
        store.install(&mut builder).unwrap();
        let ctx = builder.build();
        assert_eq!(ctx.cert_store().all_certificates().len(), 2);
    }
}
