use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::object::{Id, Kind, ParseIdError};

/// Describes the potential error conditions that might arise from minigit operations.
///
/// Every operation fails fast with one of these kinds. None of them are retried
/// internally: the object store is append-only, so no condition here is transient.
#[derive(Debug, Error)]
pub enum Error {
    /// No regular file exists at the object's content-addressed path.
    #[error("object {0} not found")]
    ObjectNotFound(Id),

    /// No regular file exists for the named reference.
    #[error("reference `{0}` not found")]
    RefNotFound(String),

    #[error("malformed data: {0}")]
    Format(#[from] FormatError),

    /// The envelope carried a well-formed type tag that this crate doesn't model.
    #[error("unsupported object type `{0}`")]
    UnsupportedType(String),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error(transparent)]
    IoError(#[from] io::Error),
}

/// Reasons why stored or supplied bytes can't be interpreted.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum FormatError {
    #[error("object header is missing its `{0}` separator")]
    MissingHeaderSeparator(char),

    #[error("object type tag is not a lowercase ASCII word")]
    InvalidTypeTag,

    #[error("object length field is not a decimal number")]
    InvalidLength,

    #[error("object declares {declared} bytes but carries {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("compressed stream is corrupt: {0}")]
    Compression(String),

    #[error("header line has no space between key and value")]
    KvlmMissingSeparator,

    #[error("header section is not terminated by a blank line")]
    KvlmUnterminated,

    #[error("tree entry mode must be 5 or 6 digits, found {0}")]
    InvalidModeLength(usize),

    #[error("tree entry mode contains non-octal digit `{0}`")]
    InvalidModeDigit(char),

    #[error("tree entry mode `{0}` is not a known kind")]
    UnknownMode(String),

    #[error("tree entry is truncated")]
    TruncatedTreeEntry,

    #[error("invalid path segment `{0}`")]
    InvalidPathSegment(String),

    #[error("invalid object ID: {0}")]
    InvalidId(#[from] ParseIdError),

    #[error("commit has no `tree` header")]
    CommitWithoutTree,

    #[error("expected a {expected} object but found a {found}")]
    UnexpectedKind { expected: Kind, found: Kind },

    #[error("invalid reference name `{0}`")]
    InvalidRefName(String),

    #[error("symbolic reference chain starting at `{0}` is too deep")]
    SymbolicRefTooDeep(String),

    #[error("nesting below `{0}` exceeds the supported depth")]
    NestingTooDeep(PathBuf),
}

/// Conditions on the repository or target directory that must hold before an
/// operation may begin.
#[derive(Debug, Error)]
pub enum PreconditionError {
    #[error("unsupported repositoryformatversion {0}")]
    UnsupportedFormatVersion(i64),

    #[error("configuration file {0} doesn't exist")]
    MissingConfig(PathBuf),

    #[error("configuration is missing `core.repositoryformatversion`")]
    MissingFormatVersion,

    #[error("invalid configuration value for `{key}`: `{value}`")]
    InvalidConfigValue { key: String, value: String },

    #[error("repository directory {0} doesn't exist")]
    MissingRepoDir(PathBuf),

    #[error("checkout target {0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("checkout target {0} is not empty")]
    DirectoryNotEmpty(PathBuf),
}

/// A specialized `Result` type for minigit operations.
pub type Result<T> = std::result::Result<T, Error>;
