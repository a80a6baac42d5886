use std::fmt::{self, Write};
use std::str::FromStr;

use thiserror::Error;

/// An error which can be returned when parsing a git object ID.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ParseIdError {
    /// Value being parsed is empty.
    #[error("cannot parse object ID from empty string")]
    Empty,

    /// Contains an invalid digit.
    ///
    /// Among other causes, this variant will be constructed when parsing a string that
    /// contains an uppercase letter.
    #[error("value contains invalid digit `{0}`")]
    InvalidDigit(char),

    /// ID is longer than 40 hex digits (or 20 bytes).
    #[error("value is more than 40 digits long")]
    Overflow,

    /// ID is shorter than 40 hex digits (or 20 bytes).
    #[error("value is less than 40 digits long")]
    Underflow,

    /// Value was zero.
    #[error("ID would be zero")]
    Zero,
}

/// Number of bytes in the binary form of an object ID.
pub const ID_LEN: usize = 20;

/// An object ID is the digest of an object's envelope and is that object's identity.
/// It is stored as a 20-byte signature, but can also be represented as 40 hex digits.
///
/// The binary form is the big-endian interpretation of the hex form, so the two
/// convert byte-for-byte without any integer arithmetic.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Id {
    id: [u8; ID_LEN],
}

impl Id {
    /// Create a new ID from a 20-byte slice.
    ///
    /// It is an error if the slice contains anything other than 20 bytes.
    pub fn new(id: &[u8]) -> Result<Id, ParseIdError> {
        match id.len() {
            ID_LEN => {
                let mut bytes = [0u8; ID_LEN];
                bytes.copy_from_slice(id);
                Ok(Id { id: bytes })
            }
            0 => Err(ParseIdError::Empty),
            n if n < ID_LEN => Err(ParseIdError::Underflow),
            _ => Err(ParseIdError::Overflow),
        }
    }

    pub(crate) fn from_digest(id: [u8; ID_LEN]) -> Id {
        Id { id }
    }

    /// Convert a 40-character hex ID to an object ID.
    ///
    /// It is an error if the ID contains anything other than 40 lowercase hex digits.
    pub fn from_hex<T: AsRef<[u8]>>(id: T) -> Result<Id, ParseIdError> {
        let hex = id.as_ref();

        match hex.len() {
            40 => {
                let mut bytes = [0u8; ID_LEN];
                for (byte, pair) in bytes.iter_mut().zip(hex.chunks(2)) {
                    *byte = digit_value(pair[0])? << 4 | digit_value(pair[1])?;
                }

                if bytes.iter().all(|x| *x == 0) {
                    Err(ParseIdError::Zero)
                } else {
                    Ok(Id { id: bytes })
                }
            }
            0 => Err(ParseIdError::Empty),
            n if n < 40 => Err(ParseIdError::Underflow),
            _ => Err(ParseIdError::Overflow),
        }
    }

    /// Return the 20-byte binary form of this ID.
    pub fn as_bytes(&self) -> &[u8] {
        &self.id
    }

    /// Split the hex form into the fan-out directory name (first two digits)
    /// and the file name (remaining 38 digits) used by loose object storage.
    pub fn loose_path_parts(&self) -> (String, String) {
        let hex = self.to_string();
        let (dir, file) = hex.split_at(2);
        (dir.to_string(), file.to_string())
    }
}

impl FromStr for Id {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Id::from_hex(s.as_bytes())
    }
}

static CHARS: &[u8] = b"0123456789abcdef";

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in self.id.iter() {
            f.write_char(CHARS[(byte >> 4) as usize].into())?;
            f.write_char(CHARS[(byte & 0xf) as usize].into())?;
        }

        Ok(())
    }
}

fn digit_value(c: u8) -> Result<u8, ParseIdError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        _ => Err(ParseIdError::InvalidDigit(c as char)),
    }
}
