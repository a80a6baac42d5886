use std::fmt::{self, Display, Formatter};

use crate::{Error, FormatError, Result};

/// Describes the fundamental git object type (blob, tree, or commit).
///
/// We use the word `kind` here to avoid conflict with the Rust reserved word `type`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    Blob,
    Tree,
    Commit,
}

impl Kind {
    /// Interpret the type tag at the front of an object envelope.
    ///
    /// A tag that isn't a lowercase ASCII word is malformed data. A well-formed
    /// tag naming some other type (`tag`, for instance) is reported as unsupported.
    pub fn from_tag(tag: &[u8]) -> Result<Kind> {
        match tag {
            b"blob" => Ok(Kind::Blob),
            b"tree" => Ok(Kind::Tree),
            b"commit" => Ok(Kind::Commit),
            _ if tag.is_empty() || !tag.iter().all(u8::is_ascii_lowercase) => {
                Err(FormatError::InvalidTypeTag.into())
            }
            _ => Err(Error::UnsupportedType(
                String::from_utf8_lossy(tag).into_owned(),
            )),
        }
    }

    /// Return the type tag written into the object envelope.
    pub fn tag(self) -> &'static str {
        match self {
            Kind::Blob => "blob",
            Kind::Tree => "tree",
            Kind::Commit => "commit",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.tag())
    }
}
