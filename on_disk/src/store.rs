//! Loose object storage: one zlib-compressed envelope per file, at
//! `objects/<first 2 hex digits>/<remaining 38>`.

use std::fs;
use std::io::{self, Write};

use minigit_core::codec;
use minigit_core::object::{Id, Kind, Object};
use minigit_core::repo::Repo;
use minigit_core::{Error, Result};

use tempfile::NamedTempFile;

use crate::{refs, Repository};

impl Repo for Repository {
    fn read_object(&self, id: &Id) -> Result<Object> {
        let path = self.object_path(id);
        if !path.is_file() {
            return Err(Error::ObjectNotFound(*id));
        }

        let compressed = fs::read(&path)?;
        let object = Object::decode(&codec::decompress(&compressed)?)?;

        tracing::trace!(%id, kind = %object.kind(), "read object");
        Ok(object)
    }

    fn write_object(&self, object: &Object) -> Result<Id> {
        let envelope = object.encode();
        let id = codec::digest(&envelope);

        let path = self.object_path(&id);
        if path.exists() {
            tracing::debug!(%id, "object already present; not rewriting");
            return Ok(id);
        }

        let dir = self.object_dir(&id);
        fs::create_dir_all(&dir)?;

        // Write to a temporary file beside the destination, then move it into
        // place without replacing anything a concurrent writer put there.
        let mut temp = NamedTempFile::new_in(&dir)?;
        temp.write_all(&codec::compress(&envelope)?)?;

        // Loose objects are never modified after they're written.
        temp.as_file().set_permissions(read_only_permissions(temp.as_file())?)?;

        match temp.persist_noclobber(&path) {
            Ok(_) => {
                tracing::debug!(%id, kind = %object.kind(), "wrote object");
                Ok(id)
            }
            Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
                tracing::debug!(%id, "object appeared during write; keeping existing file");
                Ok(id)
            }
            Err(err) => Err(err.error.into()),
        }
    }

    fn resolve_ref(&self, name: &str) -> Result<Id> {
        refs::resolve_ref(self, name)
    }
}

#[cfg(unix)]
fn read_only_permissions(file: &fs::File) -> Result<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = file.metadata()?.permissions();
    permissions.set_mode(0o444);
    Ok(permissions)
}

#[cfg(not(unix))]
fn read_only_permissions(file: &fs::File) -> Result<fs::Permissions> {
    let mut permissions = file.metadata()?.permissions();
    permissions.set_readonly(true);
    Ok(permissions)
}

/// Compute the ID that `payload` would have as an object of the given kind.
///
/// The payload is parsed as `kind` first, so a malformed tree or commit is
/// rejected rather than hashed. The object is stored only when `repo` is given.
pub fn hash_payload(kind: Kind, payload: &[u8], repo: Option<&Repository>) -> Result<Id> {
    let object = Object::deserialize(kind, payload)?;

    match repo {
        Some(repo) => repo.write_object(&object),
        None => Ok(object.id()),
    }
}
