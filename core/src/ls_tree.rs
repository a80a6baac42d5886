//! Listing the contents of a tree, optionally descending into subtrees.

use std::fmt::{self, Display, Formatter};

use crate::object::{Id, Kind, TreeEntry};
use crate::path::FileMode;
use crate::repo::{Repo, MAX_TREE_DEPTH};
use crate::{FormatError, Result};

/// One line of tree listing output.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LsTreeEntry {
    pub mode: FileMode,
    pub kind: Kind,
    pub id: Id,
    /// Path relative to the listed tree, with `/` between segments.
    pub path: Vec<u8>,
}

impl Display for LsTreeEntry {
    /// Renders git's `ls-tree` format: `mode SP type SP id TAB path`.
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {}\t{}",
            self.mode,
            self.kind,
            self.id,
            String::from_utf8_lossy(&self.path)
        )
    }
}

/// List the entries of the tree `id` (or of a commit's root tree).
///
/// When `recursive` is set, subtrees are replaced by their contents, in place,
/// so the listing follows the stored order at every level. Otherwise subtrees
/// are listed as single `tree` entries.
pub fn ls_tree<R: Repo + ?Sized>(repo: &R, id: &Id, recursive: bool) -> Result<Vec<LsTreeEntry>> {
    let mut listing = Vec::new();

    // Each frame is a tree's entries, the path prefix, and the next index.
    let root = repo.read_tree_ish(id)?;
    let mut stack: Vec<(Vec<TreeEntry>, Vec<u8>, usize)> =
        vec![(root.entries().to_vec(), Vec::new(), 0)];

    while let Some((entries, prefix, next)) = stack.last_mut() {
        let entry = match entries.get(*next) {
            Some(entry) => entry.clone(),
            None => {
                stack.pop();
                continue;
            }
        };
        *next += 1;

        let path = join(prefix, &entry.path);
        let kind = entry.mode.kind()?.object_kind();

        if recursive && kind == Kind::Tree {
            if stack.len() > MAX_TREE_DEPTH {
                return Err(FormatError::NestingTooDeep(
                    String::from_utf8_lossy(&path).into_owned().into(),
                )
                .into());
            }

            let subtree = repo.read_tree_ish(&entry.id)?;
            stack.push((subtree.entries().to_vec(), path, 0));
        } else {
            listing.push(LsTreeEntry {
                mode: entry.mode,
                kind,
                id: entry.id,
                path,
            });
        }
    }

    Ok(listing)
}

fn join(prefix: &[u8], name: &[u8]) -> Vec<u8> {
    let mut path = Vec::with_capacity(prefix.len() + 1 + name.len());
    if !prefix.is_empty() {
        path.extend_from_slice(prefix);
        path.push(b'/');
    }
    path.extend_from_slice(name);
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Blob, Object, Tree};
    use crate::repo::MemoryRepo;

    fn sample(repo: &MemoryRepo) -> Id {
        let readme = repo.write_object(&Object::Blob(Blob::new("read me\n"))).unwrap();
        let main = repo.write_object(&Object::Blob(Blob::new("fn main() {}\n"))).unwrap();

        let src = Tree::from_entries(vec![TreeEntry::new(FileMode::NORMAL, "main.rs", main)]);
        let src_id = repo.write_object(&Object::Tree(src)).unwrap();

        let root = Tree::from_entries(vec![
            TreeEntry::new(FileMode::NORMAL, "README", readme),
            TreeEntry::new(FileMode::TREE, "src", src_id),
        ]);
        repo.write_object(&Object::Tree(root)).unwrap()
    }

    #[test]
    fn flat_listing() {
        let repo = MemoryRepo::new();
        let root = sample(&repo);

        let lines: Vec<String> = ls_tree(&repo, &root, false)
            .unwrap()
            .iter()
            .map(|e| e.to_string())
            .collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("100644 blob "));
        assert!(lines[0].ends_with("\tREADME"));
        assert!(lines[1].starts_with("040000 tree "));
        assert!(lines[1].ends_with("\tsrc"));
    }

    #[test]
    fn recursive_listing() {
        let repo = MemoryRepo::new();
        let root = sample(&repo);

        let listing = ls_tree(&repo, &root, true).unwrap();
        let paths: Vec<&[u8]> = listing.iter().map(|e| e.path.as_slice()).collect();
        assert_eq!(paths, vec![&b"README"[..], b"src/main.rs"]);
        assert!(listing.iter().all(|e| e.kind == Kind::Blob));
    }

    #[test]
    fn submodule_listed_as_commit() {
        let repo = MemoryRepo::new();
        let elsewhere = Object::Blob(Blob::new("not stored here")).id();

        let root = Tree::from_entries(vec![TreeEntry::new(FileMode::SUBMODULE, "vendor", elsewhere)]);
        let root_id = repo.write_object(&Object::Tree(root)).unwrap();

        let listing = ls_tree(&repo, &root_id, true).unwrap();
        assert_eq!(listing[0].kind, Kind::Commit);
        assert_eq!(listing[0].id, elsewhere);
    }

    #[test]
    fn unknown_mode() {
        let repo = MemoryRepo::new();
        let odd = FileMode::from_octal_slice(b"170000").unwrap();
        let root = Tree::from_entries(vec![TreeEntry::new(odd, "weird", Object::Tree(Tree::new()).id())]);
        let root_id = repo.write_object(&Object::Tree(root)).unwrap();

        match ls_tree(&repo, &root_id, false).unwrap_err() {
            crate::Error::Format(FormatError::UnknownMode(mode)) => assert_eq!(mode, "170000"),
            err => panic!("wrong error: {:?}", err),
        }
    }
}
