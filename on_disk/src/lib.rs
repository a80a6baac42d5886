//! This crate provides a git repository that stores content on the local file system.
//!
//! **IMPORTANT NOTE:** This is intended as a reference implementation and may
//! not necessarily handle all of the edge cases that the traditional `git`
//! command-line interface will handle.
//!
//! That said, it does intentionally use the same `.git` folder format as
//! command-line git so that results may be compared for similar operations.
//!
//! A [`Repository`] is opened from explicit paths; this crate never searches
//! for or creates repositories.

#![deny(warnings)]

mod checkout;
pub use checkout::checkout_tree;

mod refs;
pub use refs::{list_refs, list_refs_under, resolve_ref, RefMap, RefNode};

mod repository;
pub use repository::{Config, Repository};

mod store;
pub use store::hash_payload;

mod temp_repo;
pub use temp_repo::TempRepo;
