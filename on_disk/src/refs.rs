//! Reading references: `HEAD` and the files under `refs/`.

use std::collections::btree_map::{self, BTreeMap};
use std::fs;
use std::path::{Component, Path};

use minigit_core::object::Id;
use minigit_core::repo::MAX_SYMREF_DEPTH;
use minigit_core::{Error, FormatError, Result};

use crate::Repository;

const SYMREF_PREFIX: &str = "ref: ";

// Deeper than any real ref hierarchy; stops runaway directory nesting.
const MAX_REF_DIR_DEPTH: usize = 64;

/// Resolve a reference name to an object ID, following symbolic references.
///
/// `name` is a path relative to the `.git` directory, such as `HEAD` or
/// `refs/heads/main`. A chain of more than [`MAX_SYMREF_DEPTH`] symbolic
/// references (including any cycle) fails with
/// [`FormatError::SymbolicRefTooDeep`].
pub fn resolve_ref(repo: &Repository, name: &str) -> Result<Id> {
    let mut current = name.to_string();

    for _ in 0..=MAX_SYMREF_DEPTH {
        check_ref_name(&current)?;

        let path = repo.git_dir().join(&current);
        if !path.is_file() {
            return Err(Error::RefNotFound(current));
        }

        let content = fs::read_to_string(&path)?;
        let content = content.trim();

        if content.starts_with(SYMREF_PREFIX) {
            let target = content[SYMREF_PREFIX.len()..].trim();
            tracing::trace!(from = %current, to = target, "following symbolic ref");
            current = target.to_string();
            continue;
        }

        let id = Id::from_hex(content).map_err(FormatError::from)?;
        tracing::debug!(name, %id, "resolved ref");
        return Ok(id);
    }

    Err(FormatError::SymbolicRefTooDeep(name.to_string()).into())
}

// A ref name must stay inside the `.git` directory.
fn check_ref_name(name: &str) -> Result<()> {
    let path = Path::new(name);
    let normal = path
        .components()
        .all(|c| matches!(c, Component::Normal(_)));

    if name.is_empty() || !normal {
        Err(FormatError::InvalidRefName(name.to_string()).into())
    } else {
        Ok(())
    }
}

/// One level of a reference hierarchy.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RefMap {
    entries: BTreeMap<String, RefNode>,
}

/// A value in a [`RefMap`]: a resolved reference, a nested namespace
/// (a subdirectory such as `heads` or `tags`), or a symbolic reference whose
/// chain ends at a missing ref.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RefNode {
    Id(Id),
    Namespace(RefMap),
    /// Holds the name of the ref that could not be found (an unborn branch,
    /// for example).
    Dangling(String),
}

impl RefMap {
    pub fn get(&self, name: &str) -> Option<&RefNode> {
        self.entries.get(name)
    }

    /// Iterate over this level's entries in sorted name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, RefNode> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten the hierarchy into `(full name, id)` pairs in sorted order,
    /// joining names with `/` beneath `prefix` (for example `refs`).
    /// Dangling refs have no ID and are left out.
    pub fn iter_flat(&self, prefix: &str) -> Vec<(String, Id)> {
        let mut flat = Vec::new();
        let mut stack: Vec<(String, btree_map::Iter<'_, String, RefNode>)> =
            vec![(prefix.to_string(), self.entries.iter())];

        while let Some((base, iter)) = stack.last_mut() {
            let (name, node) = match iter.next() {
                Some(next) => next,
                None => {
                    stack.pop();
                    continue;
                }
            };

            let full = if base.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", base, name)
            };

            match node {
                RefNode::Id(id) => flat.push((full, *id)),
                RefNode::Namespace(map) => stack.push((full, map.entries.iter())),
                RefNode::Dangling(_) => (),
            }
        }

        flat
    }
}

/// List every reference under `refs/`, resolving each to an object ID.
///
/// A symbolic ref whose target doesn't exist is listed as
/// [`RefNode::Dangling`] beside its siblings; any other failure to read or
/// resolve a ref fails the whole listing.
pub fn list_refs(repo: &Repository) -> Result<RefMap> {
    list_refs_under(repo, "refs")
}

/// List every reference under the directory `prefix` (relative to `.git`),
/// recursing into subdirectories.
pub fn list_refs_under(repo: &Repository, prefix: &str) -> Result<RefMap> {
    check_ref_name(prefix)?;
    walk(repo, prefix, 0)
}

fn walk(repo: &Repository, prefix: &str, depth: usize) -> Result<RefMap> {
    let dir = repo.git_dir().join(prefix);
    if depth > MAX_REF_DIR_DEPTH {
        return Err(FormatError::NestingTooDeep(dir).into());
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        // Non-UTF-8 file names can't be ref names.
        match entry.file_name().into_string() {
            Ok(name) => names.push((name, entry.file_type()?.is_dir())),
            Err(name) => tracing::warn!(?name, "skipping ref with non-UTF-8 name"),
        }
    }
    names.sort();

    let mut map = RefMap::default();
    for (name, is_dir) in names {
        let full = format!("{}/{}", prefix, name);
        let node = if is_dir {
            RefNode::Namespace(walk(repo, &full, depth + 1)?)
        } else {
            match resolve_ref(repo, &full) {
                Ok(id) => RefNode::Id(id),
                Err(Error::RefNotFound(missing)) => {
                    tracing::warn!(name = %full, %missing, "symbolic ref points at a missing ref");
                    RefNode::Dangling(missing)
                }
                Err(err) => return Err(err),
            }
        };
        map.entries.insert(name, node);
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use minigit_core::{Error, FormatError};

    use super::*;
    use crate::TempRepo;

    const ID1: &str = "45b983be36b73c0788dc9cbcb76cbb80fc7bb057";
    const ID2: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

    #[test]
    fn head_chases_branch() {
        let tr = TempRepo::new();
        tr.write_ref("HEAD", "ref: refs/heads/main\n");
        tr.write_ref("refs/heads/main", &format!("{}\n", ID1));

        let id = resolve_ref(&tr.repo(), "HEAD").unwrap();
        assert_eq!(id.to_string(), ID1);
    }

    #[test]
    fn unborn_branch() {
        let tr = TempRepo::new();
        tr.write_ref("HEAD", "ref: refs/heads/main\n");

        match resolve_ref(&tr.repo(), "HEAD").unwrap_err() {
            Error::RefNotFound(name) => assert_eq!(name, "refs/heads/main"),
            err => panic!("wrong error: {:?}", err),
        }
    }

    #[test]
    fn cycle_is_bounded() {
        let tr = TempRepo::new();
        tr.write_ref("refs/heads/a", "ref: refs/heads/b\n");
        tr.write_ref("refs/heads/b", "ref: refs/heads/a\n");

        match resolve_ref(&tr.repo(), "refs/heads/a").unwrap_err() {
            Error::Format(FormatError::SymbolicRefTooDeep(name)) => {
                assert_eq!(name, "refs/heads/a")
            }
            err => panic!("wrong error: {:?}", err),
        }
    }

    #[test]
    fn rejects_escaping_names() {
        let tr = TempRepo::new();
        tr.write_ref("HEAD", "ref: ../../etc/passwd\n");

        for name in &["HEAD", "/etc/passwd", "refs/../config", ""] {
            match resolve_ref(&tr.repo(), name).unwrap_err() {
                Error::Format(FormatError::InvalidRefName(_)) => (),
                err => panic!("wrong error for {:?}: {:?}", name, err),
            }
        }
    }

    #[test]
    fn garbage_ref_content() {
        let tr = TempRepo::new();
        tr.write_ref("refs/heads/junk", "not an id\n");

        match resolve_ref(&tr.repo(), "refs/heads/junk").unwrap_err() {
            Error::Format(FormatError::InvalidId(_)) => (),
            err => panic!("wrong error: {:?}", err),
        }
    }

    #[test]
    fn lists_every_entry() {
        let tr = TempRepo::new();
        tr.write_ref("refs/heads/main", ID1);
        tr.write_ref("refs/heads/dev", ID2);
        tr.write_ref("refs/heads/feature/x", ID1);
        tr.write_ref("refs/tags/v1", ID2);
        tr.write_ref("refs/tags/latest", "ref: refs/tags/v1");

        let refs = list_refs(&tr.repo()).unwrap();
        assert_eq!(refs.len(), 2);

        let heads = match refs.get("heads") {
            Some(RefNode::Namespace(heads)) => heads,
            other => panic!("unexpected heads entry: {:?}", other),
        };
        let names: Vec<&String> = heads.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["dev", "feature", "main"]);

        let flat: Vec<(String, String)> = refs
            .iter_flat("refs")
            .into_iter()
            .map(|(name, id)| (name, id.to_string()))
            .collect();

        assert_eq!(
            flat,
            vec![
                ("refs/heads/dev".to_string(), ID2.to_string()),
                ("refs/heads/feature/x".to_string(), ID1.to_string()),
                ("refs/heads/main".to_string(), ID1.to_string()),
                ("refs/tags/latest".to_string(), ID2.to_string()),
                ("refs/tags/v1".to_string(), ID2.to_string()),
            ]
        );
    }

    #[test]
    fn empty_namespaces() {
        let tr = TempRepo::new();
        let refs = list_refs(&tr.repo()).unwrap();

        assert_eq!(refs.len(), 2);
        assert!(refs.iter_flat("refs").is_empty());
        assert_eq!(
            refs.get("tags"),
            Some(&RefNode::Namespace(RefMap::default()))
        );
    }

    #[test]
    fn dangling_symref_keeps_siblings() {
        let tr = TempRepo::new();
        tr.write_ref("refs/heads/main", ID1);
        tr.write_ref("refs/remotes/origin/HEAD", "ref: refs/remotes/origin/master\n");

        let refs = list_refs(&tr.repo()).unwrap();

        match refs.get("remotes") {
            Some(RefNode::Namespace(remotes)) => match remotes.get("origin") {
                Some(RefNode::Namespace(origin)) => assert_eq!(
                    origin.get("HEAD"),
                    Some(&RefNode::Dangling("refs/remotes/origin/master".to_string()))
                ),
                other => panic!("unexpected origin entry: {:?}", other),
            },
            other => panic!("unexpected remotes entry: {:?}", other),
        }

        let flat: Vec<String> = refs
            .iter_flat("refs")
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(flat, vec!["refs/heads/main".to_string()]);
    }

    #[test]
    fn malformed_ref_fails_listing() {
        let tr = TempRepo::new();
        tr.write_ref("refs/heads/main", ID1);
        tr.write_ref("refs/heads/junk", "not an id\n");

        match list_refs(&tr.repo()).unwrap_err() {
            Error::Format(FormatError::InvalidId(_)) => (),
            err => panic!("wrong error: {:?}", err),
        }
    }
}
