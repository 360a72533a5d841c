//! On-disk history handling.
//!
//! One CSV file per calendar day; recovery rebuilds the full table and the
//! generation cursor from whatever is on disk.

pub mod dayfile;
mod recovery;

pub use recovery::{recover, RecoveredState};
