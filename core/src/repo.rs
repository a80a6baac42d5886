//! Represents an abstract git repository.
//!
//! ## Design Goals
//!
//! Repositories may be stored in multiple different mechanisms. The
//! `minigit_on_disk` crate provides local on-disk repositories that use the
//! same `.git` layout as command-line git; [`MemoryRepo`] keeps everything in
//! memory. Code that only needs to read and write objects (such as
//! [`ls_tree`](crate::ls_tree::ls_tree)) is written against the [`Repo`] trait.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::object::{Id, Kind, Object, Tree};
use crate::{Error, FormatError, Result};

/// Git's own limit on how many symbolic references may be chained.
pub const MAX_SYMREF_DEPTH: usize = 5;

/// Deepest subtree nesting that tree walks will descend into.
pub const MAX_TREE_DEPTH: usize = 1024;

/// A struct that implements the `Repo` trait represents a particular mechanism
/// for storing and accessing a git repo.
///
/// The required methods on this trait represent the most primitive operations
/// which must be defined for a given storage architecture. The provided methods
/// build on them.
pub trait Repo {
    /// Read the object with the given ID.
    ///
    /// Fails with [`Error::ObjectNotFound`] if no such object is stored.
    fn read_object(&self, id: &Id) -> Result<Object>;

    /// Store an object (if not already present) and return its ID.
    ///
    /// Writes are idempotent: an existing object is never replaced.
    fn write_object(&self, object: &Object) -> Result<Id>;

    /// Resolve a reference name (`HEAD`, `refs/heads/main`, ...) to an object ID,
    /// following symbolic references.
    fn resolve_ref(&self, name: &str) -> Result<Id>;

    /// Read a tree, or the root tree of a commit.
    fn read_tree_ish(&self, id: &Id) -> Result<Tree> {
        let object = match self.read_object(id)? {
            Object::Commit(commit) => self.read_object(&commit.tree()?)?,
            other => other,
        };

        match object {
            Object::Tree(tree) => Ok(tree),
            other => Err(FormatError::UnexpectedKind {
                expected: Kind::Tree,
                found: other.kind(),
            }
            .into()),
        }
    }
}

/// Symbolic or direct content of a reference held by a [`MemoryRepo`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RefTarget {
    Direct(Id),
    Symbolic(String),
}

/// A repository held entirely in memory. Useful for computing IDs of
/// object graphs without touching the file system, and for tests.
#[derive(Debug, Default)]
pub struct MemoryRepo {
    objects: RefCell<HashMap<Id, Object>>,
    refs: RefCell<HashMap<String, RefTarget>>,
}

impl MemoryRepo {
    pub fn new() -> MemoryRepo {
        MemoryRepo::default()
    }

    /// Point `name` at `target`, replacing any previous value.
    pub fn set_ref<N: Into<String>>(&self, name: N, target: RefTarget) {
        self.refs.borrow_mut().insert(name.into(), target);
    }

    /// Return the number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Repo for MemoryRepo {
    fn read_object(&self, id: &Id) -> Result<Object> {
        self.objects
            .borrow()
            .get(id)
            .cloned()
            .ok_or(Error::ObjectNotFound(*id))
    }

    fn write_object(&self, object: &Object) -> Result<Id> {
        let id = object.id();
        self.objects
            .borrow_mut()
            .entry(id)
            .or_insert_with(|| object.clone());
        Ok(id)
    }

    fn resolve_ref(&self, name: &str) -> Result<Id> {
        let refs = self.refs.borrow();
        let mut current = name;

        for _ in 0..=MAX_SYMREF_DEPTH {
            match refs.get(current) {
                Some(RefTarget::Direct(id)) => return Ok(*id),
                Some(RefTarget::Symbolic(target)) => current = target,
                None => return Err(Error::RefNotFound(current.to_string())),
            }
        }

        Err(FormatError::SymbolicRefTooDeep(name.to_string()).into())
    }
}
