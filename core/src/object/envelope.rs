//! The canonical envelope wrapped around every object's payload before it is
//! hashed or compressed: `type SP decimal-length NUL payload`.

use super::Kind;
use crate::{FormatError, Result};

/// Wrap a payload in its envelope.
pub fn encode(kind: Kind, payload: &[u8]) -> Vec<u8> {
    let tag = kind.tag().as_bytes();
    let len = payload.len().to_string();

    let mut envelope = Vec::with_capacity(tag.len() + len.len() + 2 + payload.len());
    envelope.extend_from_slice(tag);
    envelope.push(b' ');
    envelope.extend_from_slice(len.as_bytes());
    envelope.push(0);
    envelope.extend_from_slice(payload);
    envelope
}

/// Split an envelope into its object kind and payload.
///
/// Fails with a format error if the header is malformed or the declared length
/// doesn't match the number of payload bytes that follow it.
pub fn decode(envelope: &[u8]) -> Result<(Kind, &[u8])> {
    let space = envelope
        .iter()
        .position(|b| *b == b' ')
        .ok_or(FormatError::MissingHeaderSeparator(' '))?;

    let kind = Kind::from_tag(&envelope[..space])?;

    let rest = &envelope[space + 1..];
    let nul = rest
        .iter()
        .position(|b| *b == 0)
        .ok_or(FormatError::MissingHeaderSeparator('\0'))?;

    let declared = parse_length(&rest[..nul])?;
    let payload = &rest[nul + 1..];

    if declared != payload.len() {
        return Err(FormatError::LengthMismatch {
            declared,
            actual: payload.len(),
        }
        .into());
    }

    Ok((kind, payload))
}

fn parse_length(digits: &[u8]) -> Result<usize> {
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(FormatError::InvalidLength.into());
    }

    digits.iter().try_fold(0usize, |len, d| {
        len.checked_mul(10)
            .and_then(|len| len.checked_add((d - b'0') as usize))
            .ok_or_else(|| FormatError::InvalidLength.into())
    })
}
