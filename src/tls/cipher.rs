//! Cipher suite table
//!
//! Static description of the TLS 1.2-and-below suites this crate can
//! select from, listed in OpenSSL's internal table order, plus the TLS 1.3
//! suites that are always offered ahead of them. Weak suites (export, RC4,
//! DES, 3DES, IDEA, SEED, SRP) are compiled out.
//!
//! Algorithms are bit masks named after OpenSSL's `SSL_k*`, `SSL_a*`,
//! `SSL_ENC_*` and `SSL_MAC_*` constants so rules can match them with a
//! single `&`.

// Key exchange
pub(crate) const K_RSA: u32 = 0x01;
pub(crate) const K_DHE: u32 = 0x02;
pub(crate) const K_ECDHE: u32 = 0x04;
pub(crate) const K_PSK: u32 = 0x08;
pub(crate) const K_ANY: u32 = 0x10;

// Authentication
pub(crate) const A_RSA: u32 = 0x01;
pub(crate) const A_DSS: u32 = 0x02;
pub(crate) const A_NULL: u32 = 0x04;
pub(crate) const A_ECDSA: u32 = 0x08;
pub(crate) const A_PSK: u32 = 0x10;
pub(crate) const A_ANY: u32 = 0x20;

// Encryption
pub(crate) const E_NULL: u32 = 0x001;
pub(crate) const E_AES128: u32 = 0x002;
pub(crate) const E_AES256: u32 = 0x004;
pub(crate) const E_AESGCM128: u32 = 0x008;
pub(crate) const E_AESGCM256: u32 = 0x010;
pub(crate) const E_AESCCM128: u32 = 0x020;
pub(crate) const E_AESCCM256: u32 = 0x040;
pub(crate) const E_CHACHA20POLY1305: u32 = 0x080;
pub(crate) const E_CAMELLIA128: u32 = 0x100;
pub(crate) const E_CAMELLIA256: u32 = 0x200;

pub(crate) const E_AESGCM: u32 = E_AESGCM128 | E_AESGCM256;
pub(crate) const E_AESCCM: u32 = E_AESCCM128 | E_AESCCM256;
pub(crate) const E_AES: u32 = E_AES128 | E_AES256 | E_AESGCM | E_AESCCM;
pub(crate) const E_CAMELLIA: u32 = E_CAMELLIA128 | E_CAMELLIA256;
const E_ALL: u32 = E_NULL | E_AES | E_CHACHA20POLY1305 | E_CAMELLIA;

// MAC
pub(crate) const M_MD5: u32 = 0x01;
pub(crate) const M_SHA1: u32 = 0x02;
pub(crate) const M_SHA256: u32 = 0x04;
pub(crate) const M_SHA384: u32 = 0x08;
pub(crate) const M_AEAD: u32 = 0x10;

// Flags
pub(crate) const HIGH: u8 = 0x01;
pub(crate) const MEDIUM: u8 = 0x02;
pub(crate) const LOW: u8 = 0x04;
pub(crate) const STRENGTH_MASK: u8 = HIGH | MEDIUM | LOW;
pub(crate) const NOT_DEFAULT: u8 = 0x08;
pub(crate) const FIPS: u8 = 0x10;

// Protocol versions
pub(crate) const SSL3_VERSION: u16 = 0x0300;
pub(crate) const TLS1_VERSION: u16 = 0x0301;
pub(crate) const TLS1_2_VERSION: u16 = 0x0303;
pub(crate) const TLS1_3_VERSION: u16 = 0x0304;

/// Static description of one cipher suite
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct CipherSpec {
    pub name: &'static str,
    /// Two-byte IANA value with OpenSSL's `0x0300` prefix
    pub id: u32,
    pub min_tls: u16,
    pub mkey: u32,
    pub auth: u32,
    pub enc: u32,
    pub mac: u32,
    pub strength_bits: u16,
    pub flags: u8,
}

#[allow(clippy::too_many_arguments)]
const fn suite(
    name: &'static str,
    id: u32,
    min_tls: u16,
    mkey: u32,
    auth: u32,
    enc: u32,
    mac: u32,
    strength_bits: u16,
    flags: u8,
) -> CipherSpec {
    CipherSpec {
        name,
        id,
        min_tls,
        mkey,
        auth,
        enc,
        mac,
        strength_bits,
        flags,
    }
}

/// Selectable suites in OpenSSL table order
pub(crate) static CIPHERS: &[CipherSpec] = &[
    suite("NULL-MD5", 0x03000001, SSL3_VERSION, K_RSA, A_RSA, E_NULL, M_MD5, 0, 0),
    suite("NULL-SHA", 0x03000002, SSL3_VERSION, K_RSA, A_RSA, E_NULL, M_SHA1, 0, 0),
    suite("AES128-SHA", 0x0300002F, SSL3_VERSION, K_RSA, A_RSA, E_AES128, M_SHA1, 128, HIGH | FIPS),
    suite("DHE-DSS-AES128-SHA", 0x03000032, SSL3_VERSION, K_DHE, A_DSS, E_AES128, M_SHA1, 128, HIGH | NOT_DEFAULT | FIPS),
    suite("DHE-RSA-AES128-SHA", 0x03000033, SSL3_VERSION, K_DHE, A_RSA, E_AES128, M_SHA1, 128, HIGH | FIPS),
    suite("ADH-AES128-SHA", 0x03000034, SSL3_VERSION, K_DHE, A_NULL, E_AES128, M_SHA1, 128, HIGH | NOT_DEFAULT | FIPS),
    suite("AES256-SHA", 0x03000035, SSL3_VERSION, K_RSA, A_RSA, E_AES256, M_SHA1, 256, HIGH | FIPS),
    suite("DHE-DSS-AES256-SHA", 0x03000038, SSL3_VERSION, K_DHE, A_DSS, E_AES256, M_SHA1, 256, HIGH | NOT_DEFAULT | FIPS),
    suite("DHE-RSA-AES256-SHA", 0x03000039, SSL3_VERSION, K_DHE, A_RSA, E_AES256, M_SHA1, 256, HIGH | FIPS),
    suite("ADH-AES256-SHA", 0x0300003A, SSL3_VERSION, K_DHE, A_NULL, E_AES256, M_SHA1, 256, HIGH | NOT_DEFAULT | FIPS),
    suite("NULL-SHA256", 0x0300003B, TLS1_2_VERSION, K_RSA, A_RSA, E_NULL, M_SHA256, 0, 0),
    suite("AES128-SHA256", 0x0300003C, TLS1_2_VERSION, K_RSA, A_RSA, E_AES128, M_SHA256, 128, HIGH | FIPS),
    suite("AES256-SHA256", 0x0300003D, TLS1_2_VERSION, K_RSA, A_RSA, E_AES256, M_SHA256, 256, HIGH | FIPS),
    suite("DHE-DSS-AES128-SHA256", 0x03000040, TLS1_2_VERSION, K_DHE, A_DSS, E_AES128, M_SHA256, 128, HIGH | NOT_DEFAULT | FIPS),
    suite("DHE-RSA-AES128-SHA256", 0x03000067, TLS1_2_VERSION, K_DHE, A_RSA, E_AES128, M_SHA256, 128, HIGH | FIPS),
    suite("DHE-DSS-AES256-SHA256", 0x0300006A, TLS1_2_VERSION, K_DHE, A_DSS, E_AES256, M_SHA256, 256, HIGH | NOT_DEFAULT | FIPS),
    suite("DHE-RSA-AES256-SHA256", 0x0300006B, TLS1_2_VERSION, K_DHE, A_RSA, E_AES256, M_SHA256, 256, HIGH | FIPS),
    suite("ADH-AES128-SHA256", 0x0300006C, TLS1_2_VERSION, K_DHE, A_NULL, E_AES128, M_SHA256, 128, HIGH | NOT_DEFAULT | FIPS),
    suite("ADH-AES256-SHA256", 0x0300006D, TLS1_2_VERSION, K_DHE, A_NULL, E_AES256, M_SHA256, 256, HIGH | NOT_DEFAULT | FIPS),
    suite("AES128-GCM-SHA256", 0x0300009C, TLS1_2_VERSION, K_RSA, A_RSA, E_AESGCM128, M_AEAD, 128, HIGH | FIPS),
    suite("AES256-GCM-SHA384", 0x0300009D, TLS1_2_VERSION, K_RSA, A_RSA, E_AESGCM256, M_AEAD, 256, HIGH | FIPS),
    suite("DHE-RSA-AES128-GCM-SHA256", 0x0300009E, TLS1_2_VERSION, K_DHE, A_RSA, E_AESGCM128, M_AEAD, 128, HIGH | FIPS),
    suite("DHE-RSA-AES256-GCM-SHA384", 0x0300009F, TLS1_2_VERSION, K_DHE, A_RSA, E_AESGCM256, M_AEAD, 256, HIGH | FIPS),
    suite("DHE-DSS-AES128-GCM-SHA256", 0x030000A2, TLS1_2_VERSION, K_DHE, A_DSS, E_AESGCM128, M_AEAD, 128, HIGH | NOT_DEFAULT | FIPS),
    suite("DHE-DSS-AES256-GCM-SHA384", 0x030000A3, TLS1_2_VERSION, K_DHE, A_DSS, E_AESGCM256, M_AEAD, 256, HIGH | NOT_DEFAULT | FIPS),
    suite("ADH-AES128-GCM-SHA256", 0x030000A6, TLS1_2_VERSION, K_DHE, A_NULL, E_AESGCM128, M_AEAD, 128, HIGH | NOT_DEFAULT | FIPS),
    suite("ADH-AES256-GCM-SHA384", 0x030000A7, TLS1_2_VERSION, K_DHE, A_NULL, E_AESGCM256, M_AEAD, 256, HIGH | NOT_DEFAULT | FIPS),
    suite("AES128-CCM", 0x0300C09C, TLS1_2_VERSION, K_RSA, A_RSA, E_AESCCM128, M_AEAD, 128, HIGH | NOT_DEFAULT),
    suite("AES256-CCM", 0x0300C09D, TLS1_2_VERSION, K_RSA, A_RSA, E_AESCCM256, M_AEAD, 256, HIGH | NOT_DEFAULT),
    suite("ECDHE-ECDSA-AES128-CCM", 0x0300C0AC, TLS1_2_VERSION, K_ECDHE, A_ECDSA, E_AESCCM128, M_AEAD, 128, HIGH | NOT_DEFAULT),
    suite("ECDHE-ECDSA-AES256-CCM", 0x0300C0AD, TLS1_2_VERSION, K_ECDHE, A_ECDSA, E_AESCCM256, M_AEAD, 256, HIGH | NOT_DEFAULT),
    suite("ECDHE-ECDSA-NULL-SHA", 0x0300C006, TLS1_VERSION, K_ECDHE, A_ECDSA, E_NULL, M_SHA1, 0, 0),
    suite("ECDHE-ECDSA-AES128-SHA", 0x0300C009, TLS1_VERSION, K_ECDHE, A_ECDSA, E_AES128, M_SHA1, 128, HIGH | FIPS),
    suite("ECDHE-ECDSA-AES256-SHA", 0x0300C00A, TLS1_VERSION, K_ECDHE, A_ECDSA, E_AES256, M_SHA1, 256, HIGH | FIPS),
    suite("ECDHE-RSA-NULL-SHA", 0x0300C010, TLS1_VERSION, K_ECDHE, A_RSA, E_NULL, M_SHA1, 0, 0),
    suite("ECDHE-RSA-AES128-SHA", 0x0300C013, TLS1_VERSION, K_ECDHE, A_RSA, E_AES128, M_SHA1, 128, HIGH | FIPS),
    suite("ECDHE-RSA-AES256-SHA", 0x0300C014, TLS1_VERSION, K_ECDHE, A_RSA, E_AES256, M_SHA1, 256, HIGH | FIPS),
    suite("AECDH-NULL-SHA", 0x0300C015, TLS1_VERSION, K_ECDHE, A_NULL, E_NULL, M_SHA1, 0, 0),
    suite("AECDH-AES128-SHA", 0x0300C018, TLS1_VERSION, K_ECDHE, A_NULL, E_AES128, M_SHA1, 128, HIGH | NOT_DEFAULT | FIPS),
    suite("AECDH-AES256-SHA", 0x0300C019, TLS1_VERSION, K_ECDHE, A_NULL, E_AES256, M_SHA1, 256, HIGH | NOT_DEFAULT | FIPS),
    suite("ECDHE-ECDSA-AES128-SHA256", 0x0300C023, TLS1_2_VERSION, K_ECDHE, A_ECDSA, E_AES128, M_SHA256, 128, HIGH | FIPS),
    suite("ECDHE-ECDSA-AES256-SHA384", 0x0300C024, TLS1_2_VERSION, K_ECDHE, A_ECDSA, E_AES256, M_SHA384, 256, HIGH | FIPS),
    suite("ECDHE-RSA-AES128-SHA256", 0x0300C027, TLS1_2_VERSION, K_ECDHE, A_RSA, E_AES128, M_SHA256, 128, HIGH | FIPS),
    suite("ECDHE-RSA-AES256-SHA384", 0x0300C028, TLS1_2_VERSION, K_ECDHE, A_RSA, E_AES256, M_SHA384, 256, HIGH | FIPS),
    suite("ECDHE-ECDSA-AES128-GCM-SHA256", 0x0300C02B, TLS1_2_VERSION, K_ECDHE, A_ECDSA, E_AESGCM128, M_AEAD, 128, HIGH | FIPS),
    suite("ECDHE-ECDSA-AES256-GCM-SHA384", 0x0300C02C, TLS1_2_VERSION, K_ECDHE, A_ECDSA, E_AESGCM256, M_AEAD, 256, HIGH | FIPS),
    suite("ECDHE-RSA-AES128-GCM-SHA256", 0x0300C02F, TLS1_2_VERSION, K_ECDHE, A_RSA, E_AESGCM128, M_AEAD, 128, HIGH | FIPS),
    suite("ECDHE-RSA-AES256-GCM-SHA384", 0x0300C030, TLS1_2_VERSION, K_ECDHE, A_RSA, E_AESGCM256, M_AEAD, 256, HIGH | FIPS),
    suite("PSK-NULL-SHA", 0x0300002C, SSL3_VERSION, K_PSK, A_PSK, E_NULL, M_SHA1, 0, 0),
    suite("PSK-AES128-CBC-SHA", 0x0300008C, SSL3_VERSION, K_PSK, A_PSK, E_AES128, M_SHA1, 128, HIGH | FIPS),
    suite("PSK-AES256-CBC-SHA", 0x0300008D, SSL3_VERSION, K_PSK, A_PSK, E_AES256, M_SHA1, 256, HIGH | FIPS),
    suite("PSK-AES128-GCM-SHA256", 0x030000A8, TLS1_2_VERSION, K_PSK, A_PSK, E_AESGCM128, M_AEAD, 128, HIGH | FIPS),
    suite("PSK-AES256-GCM-SHA384", 0x030000A9, TLS1_2_VERSION, K_PSK, A_PSK, E_AESGCM256, M_AEAD, 256, HIGH | FIPS),
    suite("PSK-AES128-CBC-SHA256", 0x030000AE, TLS1_VERSION, K_PSK, A_PSK, E_AES128, M_SHA256, 128, HIGH | FIPS),
    suite("PSK-AES256-CBC-SHA384", 0x030000AF, TLS1_VERSION, K_PSK, A_PSK, E_AES256, M_SHA384, 256, HIGH | FIPS),
    suite("PSK-NULL-SHA256", 0x030000B0, TLS1_VERSION, K_PSK, A_PSK, E_NULL, M_SHA256, 0, 0),
    suite("PSK-NULL-SHA384", 0x030000B1, TLS1_VERSION, K_PSK, A_PSK, E_NULL, M_SHA384, 0, 0),
    suite("ECDHE-RSA-CHACHA20-POLY1305", 0x0300CCA8, TLS1_2_VERSION, K_ECDHE, A_RSA, E_CHACHA20POLY1305, M_AEAD, 256, HIGH),
    suite("ECDHE-ECDSA-CHACHA20-POLY1305", 0x0300CCA9, TLS1_2_VERSION, K_ECDHE, A_ECDSA, E_CHACHA20POLY1305, M_AEAD, 256, HIGH),
    suite("DHE-RSA-CHACHA20-POLY1305", 0x0300CCAA, TLS1_2_VERSION, K_DHE, A_RSA, E_CHACHA20POLY1305, M_AEAD, 256, HIGH),
    suite("PSK-CHACHA20-POLY1305", 0x0300CCAB, TLS1_2_VERSION, K_PSK, A_PSK, E_CHACHA20POLY1305, M_AEAD, 256, HIGH),
    suite("CAMELLIA128-SHA", 0x03000041, SSL3_VERSION, K_RSA, A_RSA, E_CAMELLIA128, M_SHA1, 128, HIGH | NOT_DEFAULT),
    suite("DHE-RSA-CAMELLIA128-SHA", 0x03000045, SSL3_VERSION, K_DHE, A_RSA, E_CAMELLIA128, M_SHA1, 128, HIGH | NOT_DEFAULT),
    suite("CAMELLIA256-SHA", 0x03000084, SSL3_VERSION, K_RSA, A_RSA, E_CAMELLIA256, M_SHA1, 256, HIGH | NOT_DEFAULT),
    suite("DHE-RSA-CAMELLIA256-SHA", 0x03000088, SSL3_VERSION, K_DHE, A_RSA, E_CAMELLIA256, M_SHA1, 256, HIGH | NOT_DEFAULT),
];

/// TLS 1.3 suites, in the order OpenSSL offers them by default
pub(crate) static TLS13_CIPHERS: &[CipherSpec] = &[
    suite("TLS_AES_256_GCM_SHA384", 0x03001302, TLS1_3_VERSION, K_ANY, A_ANY, E_AESGCM256, M_AEAD, 256, HIGH),
    suite("TLS_CHACHA20_POLY1305_SHA256", 0x03001303, TLS1_3_VERSION, K_ANY, A_ANY, E_CHACHA20POLY1305, M_AEAD, 256, HIGH),
    suite("TLS_AES_128_GCM_SHA256", 0x03001301, TLS1_3_VERSION, K_ANY, A_ANY, E_AESGCM128, M_AEAD, 128, HIGH),
];

impl CipherSpec {
    /// Version name as `SSL_CIPHER_get_version` reports it
    pub fn protocol(&self) -> &'static str {
        match self.min_tls {
            SSL3_VERSION => "SSLv3",
            TLS1_VERSION => "TLSv1.0",
            TLS1_2_VERSION => "TLSv1.2",
            _ => "TLSv1.3",
        }
    }

    // The description column uses the short form for TLS 1.0
    fn description_version(&self) -> &'static str {
        match self.min_tls {
            TLS1_VERSION => "TLSv1",
            _ => self.protocol(),
        }
    }

    pub fn is_aead(&self) -> bool {
        self.mac & M_AEAD != 0
    }

    fn kx_name(&self) -> &'static str {
        match self.mkey {
            K_RSA => "RSA",
            K_DHE => "DH",
            K_ECDHE => "ECDH",
            K_PSK => "PSK",
            _ => "any",
        }
    }

    fn au_name(&self) -> &'static str {
        match self.auth {
            A_RSA => "RSA",
            A_DSS => "DSS",
            A_NULL => "None",
            A_ECDSA => "ECDSA",
            A_PSK => "PSK",
            _ => "any",
        }
    }

    fn enc_name(&self) -> &'static str {
        match self.enc {
            E_AES128 => "AES(128)",
            E_AES256 => "AES(256)",
            E_AESGCM128 => "AESGCM(128)",
            E_AESGCM256 => "AESGCM(256)",
            E_AESCCM128 => "AESCCM(128)",
            E_AESCCM256 => "AESCCM(256)",
            E_CHACHA20POLY1305 => "CHACHA20/POLY1305(256)",
            E_CAMELLIA128 => "Camellia(128)",
            E_CAMELLIA256 => "Camellia(256)",
            _ => "None",
        }
    }

    fn mac_name(&self) -> &'static str {
        match self.mac {
            M_MD5 => "MD5",
            M_SHA1 => "SHA1",
            M_SHA256 => "SHA256",
            M_SHA384 => "SHA384",
            _ => "AEAD",
        }
    }

    /// One-line summary in `SSL_CIPHER_description` layout
    pub fn description(&self) -> String {
        format!(
            "{:<30} {:<7} Kx={:<8} Au={:<5} Enc={:<22} Mac={:<4}",
            self.name,
            self.description_version(),
            self.kx_name(),
            self.au_name(),
            self.enc_name(),
            self.mac_name()
        )
    }

    fn symmetric(&self) -> Option<&'static str> {
        match self.enc {
            E_AES128 => Some("aes-128-cbc"),
            E_AES256 => Some("aes-256-cbc"),
            E_AESGCM128 => Some("aes-128-gcm"),
            E_AESGCM256 => Some("aes-256-gcm"),
            E_AESCCM128 => Some("aes-128-ccm"),
            E_AESCCM256 => Some("aes-256-ccm"),
            E_CHACHA20POLY1305 => Some("chacha20-poly1305"),
            E_CAMELLIA128 => Some("camellia-128-cbc"),
            E_CAMELLIA256 => Some("camellia-256-cbc"),
            _ => None,
        }
    }

    fn digest(&self) -> Option<&'static str> {
        match self.mac {
            M_MD5 => Some("md5"),
            M_SHA1 => Some("sha1"),
            M_SHA256 => Some("sha256"),
            M_SHA384 => Some("sha384"),
            _ => None,
        }
    }

    fn kea(&self) -> &'static str {
        match self.mkey {
            K_RSA => "kx-rsa",
            K_DHE => "kx-dhe",
            K_ECDHE => "kx-ecdhe",
            K_PSK => "kx-psk",
            _ => "kx-any",
        }
    }

    fn auth_name(&self) -> &'static str {
        match self.auth {
            A_RSA => "auth-rsa",
            A_DSS => "auth-dss",
            A_NULL => "auth-null",
            A_ECDSA => "auth-ecdsa",
            A_PSK => "auth-psk",
            _ => "auth-any",
        }
    }

    pub fn info(&self) -> CipherInfo {
        CipherInfo {
            id: self.id,
            name: self.name,
            protocol: self.protocol(),
            description: self.description(),
            strength_bits: self.strength_bits,
            alg_bits: self.strength_bits,
            aead: self.is_aead(),
            symmetric: self.symmetric(),
            digest: self.digest(),
            kea: self.kea(),
            auth: self.auth_name(),
        }
    }
}

/// Public description of an enabled cipher suite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherInfo {
    pub id: u32,
    /// OpenSSL name, e.g. `ECDHE-RSA-AES256-GCM-SHA384`
    pub name: &'static str,
    /// Lowest protocol version the suite is defined for
    pub protocol: &'static str,
    pub description: String,
    pub strength_bits: u16,
    pub alg_bits: u16,
    pub aead: bool,
    /// Bulk cipher, `None` for NULL encryption
    pub symmetric: Option<&'static str>,
    /// MAC digest, `None` for AEAD suites
    pub digest: Option<&'static str>,
    pub kea: &'static str,
    pub auth: &'static str,
}

/// A named category usable in cipher strings
///
/// Zero masks leave that dimension unconstrained.
#[derive(Debug)]
pub(crate) struct Alias {
    pub name: &'static str,
    pub mkey: u32,
    pub auth: u32,
    pub enc: u32,
    pub mac: u32,
    pub min_tls: u16,
    pub flags: u8,
}

const fn alias(name: &'static str, mkey: u32, auth: u32, enc: u32, mac: u32) -> Alias {
    Alias {
        name,
        mkey,
        auth,
        enc,
        mac,
        min_tls: 0,
        flags: 0,
    }
}

const fn version_alias(name: &'static str, min_tls: u16) -> Alias {
    Alias {
        name,
        mkey: 0,
        auth: 0,
        enc: 0,
        mac: 0,
        min_tls,
        flags: 0,
    }
}

const fn flag_alias(name: &'static str, flags: u8) -> Alias {
    Alias {
        name,
        mkey: 0,
        auth: 0,
        enc: 0,
        mac: 0,
        min_tls: 0,
        flags,
    }
}

const AUTH_NOT_NULL: u32 = A_RSA | A_DSS | A_ECDSA | A_PSK;

static ALIASES: &[Alias] = &[
    alias("ALL", 0, 0, E_ALL & !E_NULL, 0),
    alias("COMPLEMENTOFALL", 0, 0, E_NULL, 0),
    flag_alias("COMPLEMENTOFDEFAULT", NOT_DEFAULT),
    // key exchange
    alias("kRSA", K_RSA, 0, 0, 0),
    alias("RSA", K_RSA, 0, 0, 0),
    alias("kEDH", K_DHE, 0, 0, 0),
    alias("kDHE", K_DHE, 0, 0, 0),
    alias("DH", K_DHE, 0, 0, 0),
    alias("EDH", K_DHE, AUTH_NOT_NULL, 0, 0),
    alias("DHE", K_DHE, AUTH_NOT_NULL, 0, 0),
    alias("ADH", K_DHE, A_NULL, 0, 0),
    alias("kEECDH", K_ECDHE, 0, 0, 0),
    alias("kECDHE", K_ECDHE, 0, 0, 0),
    alias("ECDH", K_ECDHE, 0, 0, 0),
    alias("EECDH", K_ECDHE, AUTH_NOT_NULL, 0, 0),
    alias("ECDHE", K_ECDHE, AUTH_NOT_NULL, 0, 0),
    alias("AECDH", K_ECDHE, A_NULL, 0, 0),
    alias("kPSK", K_PSK, 0, 0, 0),
    alias("PSK", K_PSK, 0, 0, 0),
    // authentication
    alias("aRSA", 0, A_RSA, 0, 0),
    alias("aDSS", 0, A_DSS, 0, 0),
    alias("DSS", 0, A_DSS, 0, 0),
    alias("aECDSA", 0, A_ECDSA, 0, 0),
    alias("ECDSA", 0, A_ECDSA, 0, 0),
    alias("aNULL", 0, A_NULL, 0, 0),
    alias("aPSK", 0, A_PSK, 0, 0),
    // encryption
    alias("eNULL", 0, 0, E_NULL, 0),
    alias("NULL", 0, 0, E_NULL, 0),
    alias("AES128", 0, 0, E_AES128 | E_AESGCM128 | E_AESCCM128, 0),
    alias("AES256", 0, 0, E_AES256 | E_AESGCM256 | E_AESCCM256, 0),
    alias("AES", 0, 0, E_AES, 0),
    alias("AESGCM", 0, 0, E_AESGCM, 0),
    alias("AESCCM", 0, 0, E_AESCCM, 0),
    alias("CHACHA20", 0, 0, E_CHACHA20POLY1305, 0),
    alias("CAMELLIA128", 0, 0, E_CAMELLIA128, 0),
    alias("CAMELLIA256", 0, 0, E_CAMELLIA256, 0),
    alias("CAMELLIA", 0, 0, E_CAMELLIA, 0),
    // MAC
    alias("MD5", 0, 0, 0, M_MD5),
    alias("SHA1", 0, 0, 0, M_SHA1),
    alias("SHA", 0, 0, 0, M_SHA1),
    alias("SHA256", 0, 0, 0, M_SHA256),
    alias("SHA384", 0, 0, 0, M_SHA384),
    // protocol
    version_alias("SSLv3", SSL3_VERSION),
    version_alias("TLSv1", TLS1_VERSION),
    version_alias("TLSv1.0", TLS1_VERSION),
    version_alias("TLSv1.2", TLS1_2_VERSION),
    // strength
    flag_alias("HIGH", HIGH),
    flag_alias("MEDIUM", MEDIUM),
    flag_alias("LOW", LOW),
    flag_alias("FIPS", FIPS),
];

pub(crate) fn find_alias(name: &str) -> Option<&'static Alias> {
    ALIASES.iter().find(|a| a.name == name)
}

pub(crate) fn find_cipher(name: &str) -> Option<&'static CipherSpec> {
    CIPHERS.iter().find(|c| c.name == name)
}
