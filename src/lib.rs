//! A small content-addressable object store that reads and writes git's
//! on-disk format.
//!
//! The data model (objects, IDs, codecs) lives in [`minigit_core`]; storage
//! on the local file system lives in [`minigit_on_disk`]. This crate gathers
//! the operations a command-line front end needs into one place.
//!
//! Every operation takes an explicit, already-opened [`Repository`]. Nothing
//! here searches for or creates repositories.

pub use minigit_core::ls_tree::{ls_tree, LsTreeEntry};
pub use minigit_core::object::{Blob, Commit, Id, Kind, Kvlm, Object, Tree, TreeEntry};
pub use minigit_core::path::FileMode;
pub use minigit_core::repo::Repo;
pub use minigit_core::{Error, FormatError, PreconditionError, Result};
pub use minigit_on_disk::{
    checkout_tree, hash_payload, list_refs, list_refs_under, resolve_ref, Config, RefMap,
    RefNode, Repository,
};

/// Read and decode the object with the given ID.
///
/// Fails with [`Error::ObjectNotFound`] if no regular file exists at the
/// object's path, and with [`Error::Format`] if its content is corrupt.
pub fn read_object(repo: &Repository, id: &Id) -> Result<Object> {
    repo.read_object(id)
}

/// Compute an object's ID, storing the object if `repo` is given.
///
/// Without a repository this is a pure hash and touches no storage. With
/// one, an object file that already exists is left as it is.
pub fn write_object(object: &Object, repo: Option<&Repository>) -> Result<Id> {
    match repo {
        Some(repo) => repo.write_object(object),
        None => {
            let id = object.id();
            tracing::trace!(%id, "hashed object without storing it");
            Ok(id)
        }
    }
}
