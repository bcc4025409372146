//! Marker-based text extraction.
//!
//! All positions are byte offsets into the source.

mod between;
mod separators;

pub use between::{between, between_bytes};
pub use separators::{left_of, middle_of, right_of};
