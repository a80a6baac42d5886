use std::fs;
use std::path::{Path, PathBuf};

use crate::Repository;

const DEFAULT_CONFIG: &str = "[core]\n\trepositoryformatversion = 0\n\tfilemode = true\n\tbare = false\n\tlogallrefupdates = true\n";

const DEFAULT_DESCRIPTION: &str =
    "Unnamed repository; edit this file 'description' to name the repository.\n";

/// A `TempRepo` lays out a minimal, valid `.git` directory in a temporary
/// directory, matching what `git init` would create (minus hooks and
/// samples). `HEAD` points at the unborn branch `main`.
///
/// Because this struct is intended for testing, its functions
/// panic instead of returning Result structs.
pub struct TempRepo {
    #[allow(dead_code)] // tempdir is only used for RAII
    tempdir: tempfile::TempDir,
    path: PathBuf,
}

impl TempRepo {
    // Create a new repo in a temporary directory.
    // This directory will be deleted when the struct is dropped.
    pub fn new() -> TempRepo {
        TempRepo::with_config(DEFAULT_CONFIG)
    }

    // Create a new repo whose `.git/config` has the given content.
    pub fn with_config(config: &str) -> TempRepo {
        let tempdir = tempfile::tempdir().unwrap();
        let path: PathBuf = tempdir.path().to_path_buf();

        let git_dir = path.join(".git");
        fs::create_dir_all(git_dir.join("objects/info")).unwrap();
        fs::create_dir_all(git_dir.join("objects/pack")).unwrap();
        fs::create_dir_all(git_dir.join("refs/heads")).unwrap();
        fs::create_dir_all(git_dir.join("refs/tags")).unwrap();

        fs::write(git_dir.join("config"), config).unwrap();
        fs::write(git_dir.join("description"), DEFAULT_DESCRIPTION).unwrap();
        fs::write(git_dir.join("HEAD"), "ref: refs/heads/main\n").unwrap();

        TempRepo { tempdir, path }
    }

    // Return the path for this repo's root (working directory).
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    pub fn git_dir(&self) -> PathBuf {
        self.path.join(".git")
    }

    // Open the repo. Panics if it isn't valid.
    pub fn repo(&self) -> Repository {
        Repository::open(&self.path).unwrap()
    }

    // Write a ref file (path relative to `.git`), creating parent directories.
    pub fn write_ref(&self, name: &str, content: &str) -> &TempRepo {
        let path = self.git_dir().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }
}

impl Default for TempRepo {
    fn default() -> Self {
        TempRepo::new()
    }
}
