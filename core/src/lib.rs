//! This crate implements the core data model for an abstract git repository:
//! the object types, their canonical encodings, and the rules that make
//! object IDs reproducible.

#![deny(warnings)]

pub mod codec;

mod error;
pub use error::{Error, FormatError, PreconditionError, Result};

pub mod ls_tree;
pub mod object;
pub mod path;
pub mod repo;
