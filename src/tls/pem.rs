//! PEM container scanning
//!
//! Decoding happens in three stages so callers can tell them apart:
//!
//! 1. marker scan: `-----BEGIN <label>-----` / `-----END <label>-----` lines
//! 2. base64 decode of the lines between the markers
//! 3. DER parse (done by the caller with OpenSSL)
//!
//! The scanner is lazy: [`PemReader`] yields blocks one at a time, so a key
//! lookup can stop at the first key block while a certificate load consumes
//! the whole file.

use super::{Result, TlsError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

const BEGIN_MARKER: &str = "-----BEGIN ";
const END_MARKER: &str = "-----END ";
const MARKER_TAIL: &str = "-----";

/// Structural or encoding failure inside a PEM container
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PemError {
    /// A BEGIN line appeared inside an open block
    NestedBegin { line: usize },
    /// An END line does not match the open block's label
    LabelMismatch { line: usize },
    /// Input ended inside an open block
    Unterminated { label: String },
    /// Block has no body
    EmptyBody,
    /// Block body is not valid base64
    BadBase64,
}

/// One `BEGIN`/`END` delimited block
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PemBlock {
    pub label: String,
    /// `Name: value` header lines (legacy encrypted keys)
    pub headers: Vec<(String, String)>,
    /// Body lines with surrounding whitespace removed, concatenated
    pub body: String,
}

impl PemBlock {
    /// Base64-decode the body
    pub fn decode(&self) -> std::result::Result<Vec<u8>, PemError> {
        if self.body.is_empty() {
            return Err(PemError::EmptyBody);
        }
        STANDARD.decode(&self.body).map_err(|_| PemError::BadBase64)
    }

    pub fn is_encrypted(&self) -> bool {
        self.label == "ENCRYPTED PRIVATE KEY"
            || self
                .headers
                .iter()
                .any(|(name, value)| name == "Proc-Type" && value.contains("ENCRYPTED"))
    }

    /// Re-emit the block as PEM text, headers included
    pub fn to_pem(&self) -> String {
        let mut out = format!("{}{}{}\n", BEGIN_MARKER, self.label, MARKER_TAIL);
        for (name, value) in &self.headers {
            out.push_str(&format!("{}: {}\n", name, value));
        }
        if !self.headers.is_empty() {
            out.push('\n');
        }
        for chunk in self.body.as_bytes().chunks(64) {
            out.push_str(&String::from_utf8_lossy(chunk));
            out.push('\n');
        }
        out.push_str(&format!("{}{}{}\n", END_MARKER, self.label, MARKER_TAIL));
        out
    }
}

fn marker_label<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let start = line.find(marker)?;
    let rest = &line[start + marker.len()..];
    let end = rest.find(MARKER_TAIL)?;
    Some(&rest[..end])
}

/// Lazy iterator over the blocks of a PEM container
pub(crate) struct PemReader<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    failed: bool,
}

impl<'a> PemReader<'a> {
    pub fn new(text: &'a str) -> Self {
        PemReader {
            lines: text.lines().enumerate(),
            failed: false,
        }
    }

    fn read_block(&mut self, label: &str) -> std::result::Result<PemBlock, PemError> {
        let mut block = PemBlock {
            label: label.to_string(),
            headers: Vec::new(),
            body: String::new(),
        };
        let mut in_headers = true;

        for (idx, raw) in self.lines.by_ref() {
            let line = raw.trim();
            if marker_label(line, BEGIN_MARKER).is_some() {
                return Err(PemError::NestedBegin { line: idx + 1 });
            }
            if let Some(end) = marker_label(line, END_MARKER) {
                if end != label {
                    return Err(PemError::LabelMismatch { line: idx + 1 });
                }
                return Ok(block);
            }
            if in_headers {
                if let Some((name, value)) = line.split_once(':') {
                    block.headers.push((name.trim().to_string(), value.trim().to_string()));
                    continue;
                }
                in_headers = false;
                if line.is_empty() {
                    continue;
                }
            }
            block.body.push_str(line);
        }

        Err(PemError::Unterminated {
            label: label.to_string(),
        })
    }
}

impl<'a> Iterator for PemReader<'a> {
    type Item = std::result::Result<PemBlock, PemError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        // Text outside blocks, stray END lines included, is skipped
        while let Some((_, raw)) = self.lines.next() {
            if let Some(label) = marker_label(raw.trim(), BEGIN_MARKER) {
                let label = label.to_string();
                let block = self.read_block(&label);
                self.failed = block.is_err();
                return Some(block);
            }
        }
        None
    }
}

/// Read a material file as text, mapping a missing file to `NotFound`
///
/// Invalid UTF-8 is replaced; it can only occur outside of well-formed
/// blocks or inside bodies that fail the base64 stage anyway.
pub(crate) fn read_file(path: &Path) -> Result<String> {
    let data = std::fs::read(path).map_err(|e| TlsError::from_io(path, e))?;
    Ok(String::from_utf8_lossy(&data).into_owned())
}

/// Split concatenated DER values on their outer ASN.1 headers
///
/// Returns `None` when the input ends inside a header or a value.
pub(crate) fn split_der(mut data: &[u8]) -> Option<Vec<&[u8]>> {
    let mut items = Vec::new();
    while !data.is_empty() {
        let len = der_item_len(data)?;
        let (item, rest) = data.split_at(len);
        items.push(item);
        data = rest;
    }
    Some(items)
}

/// Total length (header plus content) of the first DER item
fn der_item_len(data: &[u8]) -> Option<usize> {
    let first = *data.get(1)?;
    let (content_len, header_len) = if first & 0x80 == 0 {
        (first as usize, 2)
    } else {
        let count = (first & 0x7f) as usize;
        // Indefinite and absurdly long lengths are not valid DER
        if count == 0 || count > std::mem::size_of::<usize>() {
            return None;
        }
        let bytes = data.get(2..2 + count)?;
        let len = bytes.iter().fold(0usize, |acc, b| (acc << 8) | *b as usize);
        (len, 2 + count)
    };
    let total = header_len.checked_add(content_len)?;
    if total > data.len() {
        return None;
    }
    Some(total)
}
