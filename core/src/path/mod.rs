//! Rules for the names and modes that appear in tree entries.

mod file_mode;
pub use file_mode::{EntryKind, FileMode};

mod path_mode;
pub use path_mode::PathMode;

mod segment;
pub use segment::check_segment;
