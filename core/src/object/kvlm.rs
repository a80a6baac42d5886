//! Key-value list with message: the header-plus-body text format used by commits.
//!
//! ```text
//! tree 29ff16c9c14e2652b22f8b78bb08a5a07930c147
//! parent 206941306e8a8af65b66eaaaea388a7ae24d49a0
//! gpgsig -----BEGIN PGP SIGNATURE-----
//!  <continuation lines start with one space>
//!  -----END PGP SIGNATURE-----
//!
//! Free-form message follows the first blank line.
//! ```

use crate::{FormatError, Result};

/// An ordered multimap of header fields plus a trailing message.
///
/// Keys keep the order in which they were first seen, and each key keeps its
/// values in the order they were added, so re-serializing a parsed commit
/// reproduces the original bytes.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Kvlm {
    fields: Vec<(Vec<u8>, Vec<Vec<u8>>)>,
    message: Vec<u8>,
}

impl Kvlm {
    /// Create an empty header set with an empty message.
    pub fn new() -> Kvlm {
        Kvlm::default()
    }

    /// Parse raw commit bytes.
    pub fn parse(raw: &[u8]) -> Result<Kvlm> {
        let mut kvlm = Kvlm::new();
        let mut pos = 0;

        loop {
            let line_end = find(raw, pos, b'\n').ok_or(FormatError::KvlmUnterminated)?;

            if line_end == pos {
                kvlm.message = raw[pos + 1..].to_vec();
                return Ok(kvlm);
            }

            let space = raw[pos..line_end]
                .iter()
                .position(|b| *b == b' ')
                .map(|n| pos + n)
                .ok_or(FormatError::KvlmMissingSeparator)?;

            // Extend the value over any continuation lines.
            let mut value_end = line_end;
            while raw.get(value_end + 1) == Some(&b' ') {
                value_end = find(raw, value_end + 1, b'\n').ok_or(FormatError::KvlmUnterminated)?;
            }

            let value = unfold(&raw[space + 1..value_end]);
            kvlm.push(&raw[pos..space], value);

            pos = value_end + 1;
        }
    }

    /// Serialize back to raw commit bytes.
    ///
    /// Every newline embedded in a value is followed by a single space so the
    /// next line reads as a continuation.
    pub fn serialize(&self) -> Vec<u8> {
        let mut raw = Vec::new();

        for (key, values) in &self.fields {
            for value in values {
                raw.extend_from_slice(key);
                raw.push(b' ');
                for &b in value {
                    raw.push(b);
                    if b == b'\n' {
                        raw.push(b' ');
                    }
                }
                raw.push(b'\n');
            }
        }

        raw.push(b'\n');
        raw.extend_from_slice(&self.message);
        raw
    }

    /// Append a value for `key`, after any values it already has.
    ///
    /// Keys must be non-empty and contain neither spaces nor newlines.
    pub fn push<K: AsRef<[u8]>, V: Into<Vec<u8>>>(&mut self, key: K, value: V) {
        let key = key.as_ref();
        let value = value.into();

        match self.fields.iter_mut().find(|(k, _)| k.as_slice() == key) {
            Some((_, values)) => values.push(value),
            None => self.fields.push((key.to_vec(), vec![value])),
        }
    }

    /// Return the first value for `key`.
    pub fn get<K: AsRef<[u8]>>(&self, key: K) -> Option<&[u8]> {
        self.get_all(key).first().map(|v| v.as_slice())
    }

    /// Return every value recorded for `key`, in insertion order.
    pub fn get_all<K: AsRef<[u8]>>(&self, key: K) -> &[Vec<u8>] {
        let key = key.as_ref();
        self.fields
            .iter()
            .find(|(k, _)| k.as_slice() == key)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// Iterate over keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.fields.iter().map(|(k, _)| k.as_slice())
    }

    pub fn message(&self) -> &[u8] {
        &self.message
    }

    pub fn set_message<M: Into<Vec<u8>>>(&mut self, message: M) {
        self.message = message.into();
    }
}

fn find(raw: &[u8], start: usize, needle: u8) -> Option<usize> {
    raw.get(start..)?
        .iter()
        .position(|b| *b == needle)
        .map(|n| start + n)
}

// Drop the single space that marks each continuation line.
fn unfold(folded: &[u8]) -> Vec<u8> {
    let mut value = Vec::with_capacity(folded.len());
    let mut after_newline = false;

    for &b in folded {
        if !(after_newline && b == b' ') {
            value.push(b);
        }
        after_newline = b == b'\n';
    }

    value
}
