//! Materializing a tree into a directory on the local file system.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use minigit_core::object::{Id, Kind, Object, TreeEntry};
use minigit_core::path::{check_segment, EntryKind};
use minigit_core::repo::{Repo, MAX_TREE_DEPTH};
use minigit_core::{Error, FormatError, PreconditionError, Result};

/// Write the tree `id` (or the root tree of commit `id`) into `target`.
///
/// `target` must either not exist or be an empty directory; otherwise this
/// fails with a [`PreconditionError`] before anything is written. Subtrees
/// become directories and blobs become files holding the blob's bytes. Mode
/// bits are not applied, symbolic links are written as plain files holding
/// the link text, and submodules become empty directories.
///
/// Entry names are validated with [`check_segment`], so nothing is ever
/// written outside `target`. A failure part way through leaves whatever
/// was already written in place.
pub fn checkout_tree<R: Repo + ?Sized>(repo: &R, id: &Id, target: &Path) -> Result<()> {
    check_target(target)?;

    let root = repo.read_tree_ish(id)?;
    fs::create_dir_all(target)?;

    tracing::debug!(%id, target = %target.display(), "checking out tree");

    // Each frame is a tree's entries, the directory they go in, and the next index.
    let mut stack: Vec<(Vec<TreeEntry>, PathBuf, usize)> =
        vec![(root.entries().to_vec(), target.to_path_buf(), 0)];

    while let Some((entries, dir, next)) = stack.last_mut() {
        let entry = match entries.get(*next) {
            Some(entry) => entry.clone(),
            None => {
                stack.pop();
                continue;
            }
        };
        *next += 1;

        check_segment(&entry.path)?;
        let path = dir.join(segment_to_path(&entry.path)?);

        match entry.mode.kind()? {
            EntryKind::Tree => {
                if stack.len() > MAX_TREE_DEPTH {
                    return Err(FormatError::NestingTooDeep(path).into());
                }

                let subtree = match repo.read_object(&entry.id)? {
                    Object::Tree(tree) => tree,
                    other => return Err(mismatch(Kind::Tree, &other)),
                };

                fs::create_dir(&path)?;
                tracing::trace!(path = %path.display(), "created directory");
                stack.push((subtree.entries().to_vec(), path, 0));
            }

            EntryKind::File | EntryKind::SymbolicLink => {
                let blob = match repo.read_object(&entry.id)? {
                    Object::Blob(blob) => blob,
                    other => return Err(mismatch(Kind::Blob, &other)),
                };

                // `create_new` refuses to follow or replace anything already
                // there, including a case-folded duplicate of an earlier entry.
                let mut file = OpenOptions::new()
                    .write(true)
                    .create_new(true)
                    .open(&path)?;
                file.write_all(blob.data())?;

                tracing::trace!(path = %path.display(), len = blob.data().len(), "wrote file");
            }

            EntryKind::Submodule => {
                fs::create_dir(&path)?;
                tracing::debug!(path = %path.display(), id = %entry.id, "skipped submodule");
            }
        }
    }

    Ok(())
}

fn check_target(target: &Path) -> Result<()> {
    if !target.exists() {
        return Ok(());
    }

    if !target.is_dir() {
        return Err(PreconditionError::NotADirectory(target.to_path_buf()).into());
    }

    if fs::read_dir(target)?.next().is_some() {
        return Err(PreconditionError::DirectoryNotEmpty(target.to_path_buf()).into());
    }

    Ok(())
}

fn mismatch(expected: Kind, found: &Object) -> Error {
    FormatError::UnexpectedKind {
        expected,
        found: found.kind(),
    }
    .into()
}

#[cfg(unix)]
fn segment_to_path(segment: &[u8]) -> Result<PathBuf> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    Ok(PathBuf::from(OsStr::from_bytes(segment)))
}

#[cfg(not(unix))]
fn segment_to_path(segment: &[u8]) -> Result<PathBuf> {
    match std::str::from_utf8(segment) {
        Ok(name) => Ok(PathBuf::from(name)),
        Err(_) => Err(FormatError::InvalidPathSegment(
            String::from_utf8_lossy(segment).into_owned(),
        )
        .into()),
    }
}
