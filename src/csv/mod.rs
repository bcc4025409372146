//! Minimal CSV helpers for header-driven row access and line output.
//!
//! Fields are expected to be split already; no quoting rules are applied
//! beyond stripping.

mod line;
mod mapper;

pub use line::{clean_fields, fields_to_line};
pub use mapper::{CsvError, FieldMapper};
