//! Filesystem helpers.
//!
//! # Responsibilities
//! - Directory creation, removal and recursive copy
//! - Whole-file reads and writes
//! - Recursive listing ordered by modification time with name filters
//!
//! # Design Decisions
//! - Every error names the path it concerns
//! - Listing skips unreadable entries below the root rather than failing

mod listing;
mod ops;
mod pattern;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use listing::list_files_by_mod_time;
pub use ops::{copy, create_dir, exists, read_bytes, remove, run_path, write_bytes, write_lines};
pub use pattern::{matches_any, name_contains_all, wildcard_match};

#[derive(Debug, Error)]
pub enum FileError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FileError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        FileError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
