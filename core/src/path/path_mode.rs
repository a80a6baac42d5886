use std::cmp::{self, Ordering};

use super::FileMode;

/// Represents the tuple of git path (an uninterpreted sequence of bytes,
/// not necessarily UTF-8) and git file mode. Used for ordering tree entries.
///
/// Trees are sorted as though their name ended with `/`, even though no
/// such character is stored. This is what makes the file `a.txt` sort before
/// the directory `a`: the comparison is really between `a.txt` and `a/`.
#[derive(Eq, PartialEq)]
pub struct PathMode<'a> {
    pub path: &'a [u8],
    pub mode: FileMode,
}

impl<'a> Ord for PathMode<'a> {
    fn cmp(&self, other: &PathMode) -> Ordering {
        if self.path == other.path {
            return tree_suffix(self.mode).cmp(tree_suffix(other.mode));
        }

        let l = cmp::min(self.path.len(), other.path.len());

        match self.path[..l].cmp(&other.path[..l]) {
            Ordering::Equal => (),
            non_eq => return non_eq,
        }

        let lsuffix = suffix_or_slash(&self.path[l..], self.mode);
        let rsuffix = suffix_or_slash(&other.path[l..], other.mode);

        lsuffix.cmp(rsuffix)
    }
}

impl<'a> PartialOrd for PathMode<'a> {
    fn partial_cmp(&self, other: &PathMode) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

const EMPTY: [u8; 0] = [];
const SLASH: [u8; 1] = [b'/'];

fn suffix_or_slash(suffix: &[u8], mode: FileMode) -> &[u8] {
    if !suffix.is_empty() || !mode.is_tree() {
        suffix
    } else {
        &SLASH
    }
}

fn tree_suffix(mode: FileMode) -> &'static [u8] {
    if mode.is_tree() {
        &SLASH
    } else {
        &EMPTY
    }
}
