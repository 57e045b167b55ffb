//! Certificate and key handling
//!
//! This module turns PEM/DER material into OpenSSL objects and maps each
//! failing decode stage to the error the caller expects. It also extracts
//! summary information from X.509 certificates.

use super::error::MalformedKind;
use super::pem::{self, PemBlock, PemError, PemReader};
use super::{Result, TlsError};
use openssl::ec::EcKey;
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkey::{PKey, PKeyRef, Private};
use openssl::rsa::Rsa;
use openssl::x509::{X509Crl, X509NameRef, X509Ref, X509};
use std::fmt;

/// Certificate information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertInfo {
    /// Certificate subject (Common Name)
    pub subject: String,
    /// Certificate issuer (Common Name)
    pub issuer: String,
    /// Subject Alternative Names (DNS names and IP addresses)
    pub subject_alt_names: Vec<String>,
    /// Serial number, upper-case hex
    pub serial_number: String,
    pub not_before: String,
    pub not_after: String,
    /// X.509 version, 1-based
    pub version: i32,
}

impl CertInfo {
    /// Extract certificate information from an X.509 certificate
    pub fn from_x509(cert: &X509Ref) -> Self {
        CertInfo {
            subject: get_cn(cert.subject_name()),
            issuer: get_cn(cert.issuer_name()),
            subject_alt_names: get_subject_alt_names(cert),
            serial_number: cert
                .serial_number()
                .to_bn()
                .and_then(|bn| bn.to_hex_str().map(|s| s.to_string()))
                .unwrap_or_default(),
            not_before: cert.not_before().to_string(),
            not_after: cert.not_after().to_string(),
            version: cert.version() + 1,
        }
    }
}

/// Get Common Name from X509_NAME
fn get_cn(name: &X509NameRef) -> String {
    name.entries_by_nid(Nid::COMMONNAME)
        .next()
        .and_then(|entry| entry.data().to_string().ok())
        .unwrap_or_else(|| "<undef>".to_string())
}

fn get_subject_alt_names(cert: &X509Ref) -> Vec<String> {
    let mut names = Vec::new();

    if let Some(san_ext) = cert.subject_alt_names() {
        for name in san_ext {
            if let Some(dns) = name.dnsname() {
                names.push(format!("DNS:{}", dns));
            } else if let Some(ip) = name.ipaddress() {
                match ip.len() {
                    4 => names.push(format!("IP:{}.{}.{}.{}", ip[0], ip[1], ip[2], ip[3])),
                    16 => {
                        let groups: Vec<String> = ip
                            .chunks(2)
                            .map(|pair| format!("{:X}", u16::from_be_bytes([pair[0], pair[1]])))
                            .collect();
                        names.push(format!("IP:{}", groups.join(":")));
                    }
                    _ => {}
                }
            } else if let Some(email) = name.email() {
                names.push(format!("email:{}", email));
            } else if let Some(uri) = name.uri() {
                names.push(format!("URI:{}", uri));
            }
        }
    }

    names
}

/// SHA-256 fingerprint, used to deduplicate trust material
pub(crate) fn fingerprint(cert: &X509Ref) -> Result<Vec<u8>> {
    Ok(cert.digest(MessageDigest::sha256())?.to_vec())
}

fn ssl_pem_lib() -> TlsError {
    TlsError::Malformed(MalformedKind::SslPemLib)
}

fn x509_pem_lib() -> TlsError {
    TlsError::Malformed(MalformedKind::X509PemLib)
}

fn is_certificate_label(label: &str) -> bool {
    matches!(label, "CERTIFICATE" | "X509 CERTIFICATE" | "TRUSTED CERTIFICATE")
}

/// Parse a certificate chain, leaf first
///
/// Every failure on the leaf is `[SSL] PEM lib`. On later certificates a
/// body that is not base64 reports the base64 stage instead.
pub(crate) fn parse_chain(text: &str) -> Result<Vec<X509>> {
    let mut chain: Vec<X509> = Vec::new();

    for block in PemReader::new(text) {
        let block = block.map_err(|_| ssl_pem_lib())?;
        if !is_certificate_label(&block.label) {
            continue;
        }
        let der = match block.decode() {
            Ok(der) => der,
            Err(PemError::BadBase64) if !chain.is_empty() => {
                return Err(TlsError::Malformed(MalformedKind::BadBase64))
            }
            Err(_) => return Err(ssl_pem_lib()),
        };
        let cert = X509::from_der(&der).map_err(|_| ssl_pem_lib())?;
        chain.push(cert);
    }

    if chain.is_empty() {
        return Err(ssl_pem_lib());
    }
    Ok(chain)
}

/// Parse the first private key of a key file
pub(crate) fn parse_private_key(text: &str, password: Option<&[u8]>) -> Result<PKey<Private>> {
    let block = PemReader::new(text)
        .find(|block| match block {
            Ok(block) => block.label.ends_with("PRIVATE KEY"),
            Err(_) => true,
        })
        .ok_or_else(ssl_pem_lib)?
        .map_err(|_| ssl_pem_lib())?;

    let der = block.decode().map_err(|_| ssl_pem_lib())?;
    if block.is_encrypted() {
        return decrypt_private_key(&block, &der, password);
    }

    let key = match block.label.as_str() {
        "PRIVATE KEY" => PKey::private_key_from_pkcs8(&der),
        "RSA PRIVATE KEY" => Rsa::private_key_from_der(&der).and_then(PKey::from_rsa),
        "EC PRIVATE KEY" => EcKey::private_key_from_der(&der).and_then(PKey::from_ec_key),
        _ => PKey::private_key_from_der(&der),
    };
    key.map_err(|_| ssl_pem_lib())
}

fn decrypt_private_key(
    block: &PemBlock,
    der: &[u8],
    password: Option<&[u8]>,
) -> Result<PKey<Private>> {
    let password = password.ok_or_else(ssl_pem_lib)?;
    let key = if block.label == "ENCRYPTED PRIVATE KEY" {
        PKey::private_key_from_pkcs8_passphrase(der, password)
    } else {
        PKey::private_key_from_pem_passphrase(block.to_pem().as_bytes(), password)
    };
    key.map_err(|_| TlsError::BadDecrypt)
}

/// Ensure `key` is the private half of the leaf's public key
pub(crate) fn check_key_pair(leaf: &X509Ref, key: &PKeyRef<Private>) -> Result<()> {
    let public = leaf.public_key()?;
    if !public.public_eq(key) {
        return Err(TlsError::KeyMismatch);
    }
    Ok(())
}

/// An item of trust material
pub(crate) enum TrustItem {
    Cert(X509),
    Crl(X509Crl),
}

impl fmt::Debug for TrustItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrustItem::Cert(cert) => f
                .debug_tuple("Cert")
                .field(&get_cn(cert.subject_name()))
                .finish(),
            TrustItem::Crl(crl) => f
                .debug_tuple("Crl")
                .field(&get_cn(crl.issuer_name()))
                .finish(),
        }
    }
}

/// Parse trust material from PEM text
///
/// Certificates and CRLs are collected; other blocks are ignored. Text
/// without any certificate or CRL is an empty trust store.
pub(crate) fn parse_trust_pem(text: &str) -> Result<Vec<TrustItem>> {
    let mut items = Vec::new();

    for block in PemReader::new(text) {
        let block = block.map_err(|_| x509_pem_lib())?;
        let is_crl = block.label == "X509 CRL";
        if !is_crl && !is_certificate_label(&block.label) {
            continue;
        }
        let der = block.decode().map_err(|_| x509_pem_lib())?;
        let item = if is_crl {
            TrustItem::Crl(X509Crl::from_der(&der).map_err(|_| x509_pem_lib())?)
        } else {
            TrustItem::Cert(X509::from_der(&der).map_err(|_| x509_pem_lib())?)
        };
        items.push(item);
    }

    if items.is_empty() {
        return Err(TlsError::EmptyTrustStore);
    }
    Ok(items)
}

/// Parse trust material from concatenated DER certificates
pub(crate) fn parse_trust_der(data: &[u8]) -> Result<Vec<TrustItem>> {
    let parts =
        pem::split_der(data).ok_or(TlsError::Malformed(MalformedKind::NotEnoughData))?;
    if parts.is_empty() {
        return Err(TlsError::EmptyTrustStore);
    }
    parts
        .into_iter()
        .map(|der| X509::from_der(der).map(TrustItem::Cert).map_err(TlsError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CERT_RSA: &str = include_str!("../../tests/data/ssldata/cert_rsa.pem");
    const PK_RSA: &str = include_str!("../../tests/data/ssldata/pk_rsa.pem");
    const CERT_RSA2: &str = include_str!("../../tests/data/ssldata/cert_rsa2.pem");
    const CHAIN: &str = include_str!("../../tests/data/ssldata/chain.pem");
    const CA_CRL: &str = include_str!("../../tests/data/ssldata/ca_crl.pem");
    const PK_ENCRYPTED: &str = include_str!("../../tests/data/ssldata/pk_rsa_encrypted.pem");

    #[test]
    fn test_cert_info_from_fixture() {
        let chain = parse_chain(CERT_RSA).unwrap();
        let info = CertInfo::from_x509(&chain[0]);

        assert_eq!(info.subject, "localhost");
        assert_eq!(info.issuer, "localhost"); // Self-signed
        assert_eq!(info.version, 3);
        assert!(!info.serial_number.is_empty());
        assert!(info.not_after.ends_with("GMT"));

        // Check SANs
        assert!(info.subject_alt_names.contains(&"DNS:localhost".to_string()));
        assert!(info.subject_alt_names.contains(&"IP:127.0.0.1".to_string()));
    }

    #[test]
    fn test_get_cn() {
        let cert = X509::from_pem(CERT_RSA2.as_bytes()).unwrap();
        assert_eq!(get_cn(cert.subject_name()), "other.example");
    }

    #[test]
    fn test_chain_order() {
        let chain = parse_chain(CHAIN).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(get_cn(chain[0].subject_name()), "localhost");
        assert_eq!(get_cn(chain[1].subject_name()), "Test Root CA");
    }

    #[test]
    fn test_chain_without_certificates() {
        let err = parse_chain(PK_RSA).unwrap_err();
        assert_eq!(err.to_string(), "[SSL] PEM lib");
    }

    #[test]
    fn test_key_pair_check() {
        let key = parse_private_key(PK_RSA, None).unwrap();
        let leaf = &parse_chain(CERT_RSA).unwrap()[0];
        check_key_pair(leaf, &key).unwrap();

        let other = &parse_chain(CERT_RSA2).unwrap()[0];
        assert!(matches!(check_key_pair(other, &key), Err(TlsError::KeyMismatch)));
    }

    #[test]
    fn test_encrypted_key() {
        assert!(parse_private_key(PK_ENCRYPTED, Some(b"secret")).is_ok());
        assert!(matches!(
            parse_private_key(PK_ENCRYPTED, Some(b"wrong")),
            Err(TlsError::BadDecrypt)
        ));
        assert_eq!(
            parse_private_key(PK_ENCRYPTED, None).unwrap_err().to_string(),
            "[SSL] PEM lib"
        );
    }

    #[test]
    fn test_trust_pem_with_crl() {
        let text = format!("{}{}", CHAIN, CA_CRL);
        let items = parse_trust_pem(&text).unwrap();
        let crls = items.iter().filter(|i| matches!(i, TrustItem::Crl(_))).count();
        assert_eq!(items.len(), 3);
        assert_eq!(crls, 1);
    }

    #[test]
    fn test_trust_pem_empty() {
        assert!(matches!(parse_trust_pem(""), Err(TlsError::EmptyTrustStore)));
        assert!(matches!(parse_trust_pem(PK_RSA), Err(TlsError::EmptyTrustStore)));
    }

    #[test]
    fn test_trust_der() {
        let chain = parse_chain(CHAIN).unwrap();
        let mut der = chain[0].to_der().unwrap();
        der.extend(chain[1].to_der().unwrap());
        let items = parse_trust_der(&der).unwrap();
        assert_eq!(
            format!("{:?}", items),
            r#"[Cert("localhost"), Cert("Test Root CA")]"#
        );

        der.truncate(der.len() - 1);
        let err = parse_trust_der(&der).unwrap_err();
        assert_eq!(err.reason(), Some("NOT_ENOUGH_DATA"));
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let cert = X509::from_pem(CERT_RSA.as_bytes()).unwrap();
        assert_eq!(fingerprint(&cert).unwrap(), fingerprint(&cert).unwrap());
        assert_eq!(fingerprint(&cert).unwrap().len(), 32);
    }
}
