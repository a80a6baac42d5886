use std::fmt::{self, Display, Formatter};

use crate::object::Kind;
use crate::FormatError;

/// The mode recorded for a tree entry, normalized to six octal digits.
///
/// Git uses a variation on the Unix file permissions flags to denote an entry's
/// intended type on disk. The following values are common:
///
/// * `100644` - normal file
/// * `100755` - executable file
/// * `120000` - symbolic link
/// * `040000` - tree (subdirectory)
/// * `160000` - submodule (aka gitlink)
///
/// Git itself writes the tree mode with five digits (`40000`); parsing
/// left-pads such modes with a zero.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FileMode {
    digits: [u8; 6],
}

impl FileMode {
    pub const NORMAL: FileMode = FileMode { digits: *b"100644" };
    pub const EXECUTABLE: FileMode = FileMode { digits: *b"100755" };
    pub const SYMBOLIC_LINK: FileMode = FileMode { digits: *b"120000" };
    pub const TREE: FileMode = FileMode { digits: *b"040000" };
    pub const SUBMODULE: FileMode = FileMode { digits: *b"160000" };

    /// Parse a mode field of five or six octal digits.
    pub fn from_octal_slice(mode: &[u8]) -> Result<FileMode, FormatError> {
        if let Some(c) = mode.iter().find(|c| !(b'0'..=b'7').contains(*c)) {
            return Err(FormatError::InvalidModeDigit(*c as char));
        }

        let mut digits = [b'0'; 6];
        match mode.len() {
            6 => digits.copy_from_slice(mode),
            5 => digits[1..].copy_from_slice(mode),
            n => return Err(FormatError::InvalidModeLength(n)),
        }

        Ok(FileMode { digits })
    }

    /// Return the normalized six-digit form.
    pub fn as_bytes(&self) -> &[u8] {
        &self.digits
    }

    /// Return the mode as written into a tree object. A single leading zero is
    /// dropped, matching git's own output (`40000` for a subtree).
    pub fn to_tree_bytes(&self) -> &[u8] {
        if self.digits[0] == b'0' {
            &self.digits[1..]
        } else {
            &self.digits
        }
    }

    /// True if this entry names a subtree (mode begins with `04`).
    pub fn is_tree(&self) -> bool {
        self.digits.starts_with(b"04")
    }

    /// Classify the entry by its mode prefix.
    pub fn kind(&self) -> Result<EntryKind, FormatError> {
        match &self.digits[..2] {
            b"04" => Ok(EntryKind::Tree),
            b"10" => Ok(EntryKind::File),
            b"12" => Ok(EntryKind::SymbolicLink),
            b"16" => Ok(EntryKind::Submodule),
            _ => Err(FormatError::UnknownMode(self.to_string())),
        }
    }
}

impl Display for FileMode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        // Digits are always ASCII octal.
        f.write_str(&String::from_utf8_lossy(&self.digits))
    }
}

/// What a tree entry points at, as implied by its mode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    Tree,
    File,
    SymbolicLink,
    /// A nested repository's commit. The commit isn't stored in this repository.
    Submodule,
}

impl EntryKind {
    /// The kind of object the entry's ID refers to.
    pub fn object_kind(self) -> Kind {
        match self {
            EntryKind::Tree => Kind::Tree,
            EntryKind::File | EntryKind::SymbolicLink => Kind::Blob,
            EntryKind::Submodule => Kind::Commit,
        }
    }
}
