//! A repository that stores content on the local file system.
//!
//! **IMPORTANT NOTE:** This is intended as a reference implementation and may
//! not necessarily handle all of the edge cases that the traditional `git`
//! command-line interface will handle.
//!
//! That said, it does intentionally use the same `.git` folder format as
//! command-line git so that results may be compared for similar operations.

use std::fs;
use std::path::{Path, PathBuf};

use minigit_core::object::Id;
use minigit_core::repo::Repo;
use minigit_core::{Error, PreconditionError, Result};

mod config;
pub use config::Config;

/// Implementation of `minigit_core::repo::Repo` that stores content on the
/// local file system.
///
/// A `Repository` is a validated handle: construction checks the `.git`
/// layout and configuration, so every operation on it may assume both.
#[derive(Debug)]
pub struct Repository {
    work_dir: PathBuf,
    git_dir: PathBuf,
    config: Config,
}

impl Repository {
    /// Open an existing on-disk git repository.
    ///
    /// `work_dir` should be the top-level working directory. A `.git` directory
    /// should exist at this path.
    pub fn open(work_dir: &Path) -> Result<Self> {
        Repository::open_with_git_dir(work_dir, &work_dir.join(".git"))
    }

    /// Open an existing repository whose metadata lives at `git_dir`.
    ///
    /// Fails with a [`PreconditionError`] if `git_dir` lacks `objects`,
    /// `refs/heads`, `refs/tags` or `config`, or if the configuration
    /// names a format version other than 0.
    pub fn open_with_git_dir(work_dir: &Path, git_dir: &Path) -> Result<Self> {
        for required in &["objects", "refs/heads", "refs/tags"] {
            let dir = git_dir.join(required);
            if !dir.is_dir() {
                return Err(PreconditionError::MissingRepoDir(dir).into());
            }
        }

        let config = Config::read(&git_dir.join("config"))?;

        tracing::debug!(git_dir = %git_dir.display(), "opened repository");

        Ok(Repository {
            work_dir: work_dir.to_path_buf(),
            git_dir: git_dir.to_path_buf(),
            config,
        })
    }

    /// Return the working directory for this repo.
    pub fn work_dir(&self) -> &Path {
        self.work_dir.as_path()
    }

    /// Return the path to the `.git` directory.
    pub fn git_dir(&self) -> &Path {
        self.git_dir.as_path()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read the one-line free-text `description` file, without its line ending.
    pub fn description(&self) -> Result<String> {
        let text = fs::read_to_string(self.git_dir.join("description"))?;
        Ok(text.trim_end_matches(|c| c == '\n' || c == '\r').to_string())
    }

    /// Return the fan-out directory that holds the loose object `id`:
    /// `objects/<2 hex>`.
    pub fn object_dir(&self, id: &Id) -> PathBuf {
        let (dir, _) = id.loose_path_parts();
        self.git_dir.join("objects").join(dir)
    }

    /// Return the loose-object path for `id`: `objects/<2 hex>/<38 hex>`.
    pub fn object_path(&self, id: &Id) -> PathBuf {
        let (_, file) = id.loose_path_parts();
        self.object_dir(id).join(file)
    }

    /// Find an object by name and return its ID.
    ///
    /// `name` may be a 40-digit hex ID of a stored object, a reference path
    /// (`HEAD`, `refs/heads/main`), or a short branch or tag name, tried in
    /// that order.
    pub fn find_object(&self, name: &str) -> Result<Id> {
        let hex_id = Id::from_hex(name).ok();
        if let Some(id) = hex_id {
            if self.object_path(&id).is_file() {
                return Ok(id);
            }
        }

        let candidates = [
            name.to_string(),
            format!("refs/heads/{}", name),
            format!("refs/tags/{}", name),
        ];

        for candidate in candidates.iter() {
            match self.resolve_ref(candidate) {
                Err(Error::RefNotFound(_)) => continue,
                result => return result,
            }
        }

        match hex_id {
            Some(id) => Err(Error::ObjectNotFound(id)),
            None => Err(Error::RefNotFound(name.to_string())),
        }
    }
}
