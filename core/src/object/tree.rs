use super::{Id, ID_LEN};
use crate::path::{FileMode, PathMode};
use crate::{FormatError, Result};

/// One entry in a tree: a mode, a single path segment, and the ID of the
/// object it names.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreeEntry {
    pub mode: FileMode,
    pub path: Vec<u8>,
    pub id: Id,
}

impl TreeEntry {
    pub fn new<P: Into<Vec<u8>>>(mode: FileMode, path: P, id: Id) -> TreeEntry {
        TreeEntry {
            mode,
            path: path.into(),
            id,
        }
    }

    fn path_mode(&self) -> PathMode<'_> {
        PathMode {
            path: &self.path,
            mode: self.mode,
        }
    }
}

/// A directory listing: an ordered sequence of entries.
///
/// Entries are kept in the order they were parsed or added. Serialization
/// always emits them in canonical order so that two trees with the same
/// entries hash identically.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new() -> Tree {
        Tree::default()
    }

    pub fn from_entries(entries: Vec<TreeEntry>) -> Tree {
        Tree { entries }
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn push(&mut self, entry: TreeEntry) {
        self.entries.push(entry);
    }

    /// Parse the binary entry list stored in a tree object.
    ///
    /// Each entry is `mode SP path NUL id`, where `id` is the 20-byte binary
    /// form of the object ID.
    pub fn parse(raw: &[u8]) -> Result<Tree> {
        let mut entries = Vec::new();
        let mut pos = 0;

        while pos < raw.len() {
            let rest = &raw[pos..];

            let space = rest
                .iter()
                .position(|b| *b == b' ')
                .ok_or(FormatError::TruncatedTreeEntry)?;
            let mode = FileMode::from_octal_slice(&rest[..space])?;

            let nul = rest[space + 1..]
                .iter()
                .position(|b| *b == 0)
                .map(|n| space + 1 + n)
                .ok_or(FormatError::TruncatedTreeEntry)?;
            let path = rest[space + 1..nul].to_vec();

            let id_bytes = rest
                .get(nul + 1..nul + 1 + ID_LEN)
                .ok_or(FormatError::TruncatedTreeEntry)?;
            let id = Id::new(id_bytes).map_err(FormatError::from)?;

            entries.push(TreeEntry { mode, path, id });
            pos += nul + 1 + ID_LEN;
        }

        Ok(Tree { entries })
    }

    /// Return the entries in canonical order: by path, with subtrees compared
    /// as if their path ended in `/`.
    pub fn sorted_entries(&self) -> Vec<&TreeEntry> {
        let mut sorted: Vec<&TreeEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.path_mode().cmp(&b.path_mode()));
        sorted
    }

    /// Serialize the entries in canonical order.
    pub fn serialize(&self) -> Vec<u8> {
        let mut raw = Vec::new();

        for entry in self.sorted_entries() {
            raw.extend_from_slice(entry.mode.to_tree_bytes());
            raw.push(b' ');
            raw.extend_from_slice(&entry.path);
            raw.push(0);
            raw.extend_from_slice(entry.id.as_bytes());
        }

        raw
    }
}
