//! Cipher-list mini-language
//!
//! Evaluates OpenSSL cipher strings such as `"ECDH+AESGCM:!aNULL"` against
//! the static suite table and produces the ordered list OpenSSL itself would
//! produce for the same string.
//!
//! # Architecture
//!
//! The engine keeps every suite in a single ordered list, each entry marked
//! active or inactive. A rule selects suites through alias masks and then
//! applies one operation:
//!
//! | prefix | operation | effect on matching suites                |
//! |--------|-----------|------------------------------------------|
//! | none   | add       | inactive ones are activated, moved last  |
//! | `+`    | order     | active ones are moved last               |
//! | `-`    | delete    | active ones are deactivated, moved first |
//! | `!`    | kill      | removed for good                         |
//!
//! Before the caller's string runs, the list is put into OpenSSL's default
//! preference order: ECDHE-ECDSA first, AEAD ahead of CBC, weak material
//! last, and then everything deactivated again.

use super::cipher::{
    self, CipherSpec, A_ECDSA, A_NULL, CIPHERS, E_AES128, E_AES256, E_AESCCM, E_AESGCM,
    E_CHACHA20POLY1305, FIPS, K_DHE, K_ECDHE, K_PSK, K_RSA, M_AEAD, M_MD5, NOT_DEFAULT,
    STRENGTH_MASK, TLS13_CIPHERS, TLS1_2_VERSION,
};
use super::{Result, TlsError};
use log::trace;

/// What `DEFAULT` at the start of a cipher string expands to
const DEFAULT_RULES: &str = "ALL:!COMPLEMENTOFDEFAULT:!eNULL";

/// Result of evaluating a cipher string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherSelection {
    /// TLS 1.3 suites followed by the selected suites, in preference order
    pub(crate) ciphers: Vec<&'static CipherSpec>,
    /// Value of an `@SECLEVEL=n` command, if any
    pub security_level: Option<u8>,
}

impl CipherSelection {
    /// Evaluate `rules`
    pub fn from_rules(rules: &str) -> Result<Self> {
        if rules.contains('\0') {
            return Err(TlsError::InvalidConfig("embedded null character".to_string()));
        }

        let mut list = CipherList::with_default_order();
        let mut rest = rules;
        if let Some(tail) = rules.strip_prefix("DEFAULT") {
            list.process(DEFAULT_RULES)?;
            rest = tail.strip_prefix(':').unwrap_or(tail);
        }
        list.process(rest)?;

        let selected: Vec<&'static CipherSpec> = list.active().collect();
        if !selected.iter().any(|c| c.min_tls <= TLS1_2_VERSION) {
            return Err(TlsError::NoCipherSelected);
        }

        let ciphers = TLS13_CIPHERS.iter().chain(selected).collect();
        Ok(CipherSelection {
            ciphers,
            security_level: list.security_level,
        })
    }

    /// Names joined with `:`, usable as an OpenSSL cipher list
    pub fn to_openssl_string(&self) -> String {
        let names: Vec<&str> = self
            .ciphers
            .iter()
            .filter(|c| c.min_tls <= TLS1_2_VERSION)
            .map(|c| c.name)
            .collect();
        let mut out = names.join(":");
        if let Some(level) = self.security_level {
            out.push_str(&format!(":@SECLEVEL={}", level));
        }
        out
    }

    pub fn len(&self) -> usize {
        self.ciphers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ciphers.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.ciphers.iter().map(|c| c.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Order,
    Delete,
    /// Move active suites to the front; only used for the default order
    Bump,
    Kill,
    Special,
}

/// Suite selector built from one rule word or a `+`-joined chain of them
#[derive(Debug, Clone, Copy, Default)]
struct Selector {
    cipher_id: Option<u32>,
    strength_bits: Option<u16>,
    mkey: u32,
    auth: u32,
    enc: u32,
    mac: u32,
    min_tls: u16,
    strength: u8,
    flags: u8,
}

impl Selector {
    fn mkey(mkey: u32) -> Self {
        Selector {
            mkey,
            ..Default::default()
        }
    }

    fn enc(enc: u32) -> Self {
        Selector {
            enc,
            ..Default::default()
        }
    }

    fn mac(mac: u32) -> Self {
        Selector {
            mac,
            ..Default::default()
        }
    }

    fn matches(&self, spec: &CipherSpec) -> bool {
        if let Some(id) = self.cipher_id {
            return spec.id == id;
        }
        if let Some(bits) = self.strength_bits {
            return spec.strength_bits == bits;
        }
        (self.mkey == 0 || spec.mkey & self.mkey != 0)
            && (self.auth == 0 || spec.auth & self.auth != 0)
            && (self.enc == 0 || spec.enc & self.enc != 0)
            && (self.mac == 0 || spec.mac & self.mac != 0)
            && (self.min_tls == 0 || spec.min_tls == self.min_tls)
            && (self.strength == 0 || spec.flags & self.strength != 0)
            && spec.flags & self.flags == self.flags
    }

    /// Intersect with `alias`; false when the result can match nothing
    fn narrow(&mut self, alias: &cipher::Alias) -> bool {
        fn intersect(current: &mut u32, mask: u32) -> bool {
            if mask == 0 {
                return true;
            }
            *current = if *current == 0 { mask } else { *current & mask };
            *current != 0
        }

        let mut found = intersect(&mut self.mkey, alias.mkey);
        found &= intersect(&mut self.auth, alias.auth);
        found &= intersect(&mut self.enc, alias.enc);
        found &= intersect(&mut self.mac, alias.mac);

        let strength = alias.flags & STRENGTH_MASK;
        if strength != 0 {
            if self.strength != 0 && self.strength & strength == 0 {
                found = false;
            }
            self.strength = strength;
        }
        self.flags |= alias.flags & (NOT_DEFAULT | FIPS);

        if alias.min_tls != 0 {
            if self.min_tls != 0 && self.min_tls != alias.min_tls {
                found = false;
            }
            self.min_tls = alias.min_tls;
        }
        found
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    spec: &'static CipherSpec,
    active: bool,
}

/// Ordered suite list the rules operate on
struct CipherList {
    entries: Vec<Entry>,
    security_level: Option<u8>,
}

impl CipherList {
    /// All suites, inactive, in OpenSSL's default preference order
    fn with_default_order() -> Self {
        let mut list = CipherList {
            entries: CIPHERS
                .iter()
                .rev()
                .map(|spec| Entry {
                    spec,
                    active: false,
                })
                .collect(),
            security_level: None,
        };

        // Forward secrecy with ECDSA first, then the remaining ECDHE suites
        list.apply(
            Op::Add,
            &Selector {
                mkey: K_ECDHE,
                auth: A_ECDSA,
                ..Default::default()
            },
        );
        list.apply(Op::Add, &Selector::mkey(K_ECDHE));
        list.apply(Op::Delete, &Selector::mkey(K_ECDHE));

        // AEAD ahead of CBC
        list.apply(Op::Add, &Selector::enc(E_AESGCM));
        list.apply(Op::Add, &Selector::enc(E_CHACHA20POLY1305));
        list.apply(Op::Add, &Selector::enc(E_AES128 | E_AES256 | E_AESCCM));
        list.apply(Op::Add, &Selector::default());

        // Weak or non-forward-secret material last
        list.apply(Op::Order, &Selector::mac(M_MD5));
        list.apply(
            Op::Order,
            &Selector {
                auth: A_NULL,
                ..Default::default()
            },
        );
        list.apply(Op::Order, &Selector::mkey(K_RSA));
        list.apply(Op::Order, &Selector::mkey(K_PSK));
        list.strength_sort();

        list.apply(
            Op::Bump,
            &Selector {
                min_tls: TLS1_2_VERSION,
                ..Default::default()
            },
        );
        list.apply(Op::Bump, &Selector::mac(M_AEAD));
        list.apply(Op::Bump, &Selector::mkey(K_DHE | K_ECDHE));
        list.apply(
            Op::Bump,
            &Selector {
                mkey: K_DHE | K_ECDHE,
                mac: M_AEAD,
                ..Default::default()
            },
        );

        list.apply(Op::Delete, &Selector::default());
        list
    }

    fn active(&self) -> impl Iterator<Item = &'static CipherSpec> + '_ {
        self.entries.iter().filter(|e| e.active).map(|e| e.spec)
    }

    fn position(&self, spec: &CipherSpec) -> Option<usize> {
        self.entries.iter().position(|e| e.spec.id == spec.id)
    }

    fn apply(&mut self, op: Op, selector: &Selector) {
        let mut order: Vec<&'static CipherSpec> = self.entries.iter().map(|e| e.spec).collect();
        // Front-moving operations walk backwards to keep relative order
        if matches!(op, Op::Delete | Op::Bump) {
            order.reverse();
        }

        for spec in order {
            if !selector.matches(spec) {
                continue;
            }
            let Some(pos) = self.position(spec) else {
                continue;
            };
            let active = self.entries[pos].active;
            match op {
                Op::Add if !active => {
                    let mut entry = self.entries.remove(pos);
                    entry.active = true;
                    self.entries.push(entry);
                }
                Op::Order if active => {
                    let entry = self.entries.remove(pos);
                    self.entries.push(entry);
                }
                Op::Delete if active => {
                    let mut entry = self.entries.remove(pos);
                    entry.active = false;
                    self.entries.insert(0, entry);
                }
                Op::Bump if active => {
                    let entry = self.entries.remove(pos);
                    self.entries.insert(0, entry);
                }
                Op::Kill => {
                    self.entries.remove(pos);
                }
                _ => {}
            }
        }
    }

    /// Reorder active suites by descending strength bits
    fn strength_sort(&mut self) {
        let max = self.active().map(|c| c.strength_bits).max().unwrap_or(0);
        for bits in (0..=max).rev() {
            if self.active().any(|c| c.strength_bits == bits) {
                self.apply(
                    Op::Order,
                    &Selector {
                        strength_bits: Some(bits),
                        ..Default::default()
                    },
                );
            }
        }
    }

    /// Apply a rule string left to right
    fn process(&mut self, rules: &str) -> Result<()> {
        let bytes = rules.as_bytes();
        let is_separator = |b: u8| matches!(b, b':' | b',' | b';' | b' ');
        let is_word = |b: u8| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'=');
        let mut i = 0;

        while i < bytes.len() {
            if is_separator(bytes[i]) {
                i += 1;
                continue;
            }

            let op = match bytes[i] {
                b'-' => Op::Delete,
                b'+' => Op::Order,
                b'!' => Op::Kill,
                b'@' => Op::Special,
                _ => Op::Add,
            };
            if op != Op::Add {
                i += 1;
            }

            let mut selector = Selector::default();
            let mut found = true;
            let word = loop {
                let start = i;
                while i < bytes.len() && is_word(bytes[i]) {
                    i += 1;
                }
                let word = &rules[start..i];
                if word.is_empty() {
                    trace!("invalid command at offset {} in {:?}", start, rules);
                    return Err(TlsError::NoCipherSelected);
                }
                if op == Op::Special {
                    break word;
                }

                if let Some(alias) = cipher::find_alias(word) {
                    found &= selector.narrow(alias);
                } else if let Some(spec) = cipher::find_cipher(word) {
                    selector.cipher_id = Some(spec.id);
                } else {
                    found = false;
                }

                if found && i < bytes.len() && bytes[i] == b'+' {
                    i += 1;
                    continue;
                }
                break word;
            };

            if op == Op::Special {
                self.special(word)?;
            } else if found {
                trace!("{:?} {}", op, word);
                self.apply(op, &selector);
            }

            // Unknown words and anything after them are skipped
            while i < bytes.len() && !is_separator(bytes[i]) {
                i += 1;
            }
        }
        Ok(())
    }

    fn special(&mut self, command: &str) -> Result<()> {
        if command == "STRENGTH" {
            self.strength_sort();
            return Ok(());
        }
        match command.strip_prefix("SECLEVEL=").map(str::as_bytes) {
            Some([digit]) if digit.is_ascii_digit() => {
                self.security_level = Some(digit - b'0');
                Ok(())
            }
            _ => {
                trace!("unknown special command @{}", command);
                Err(TlsError::NoCipherSelected)
            }
        }
    }
}
