//! Header-name → column lookup.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsvError {
    #[error("field '{0}' not found in header mapping")]
    UnknownField(String),

    #[error("field '{field}' maps to column {index} but the row has {len} columns")]
    OutOfRange {
        field: String,
        index: usize,
        len: usize,
    },
}

/// Maps header names to column positions.
///
/// ```
/// use httpkit::csv::FieldMapper;
///
/// let mut mapper = FieldMapper::new();
/// mapper.assign_positions(&["id", "name", "age"]);
/// assert_eq!(mapper.lookup(&["1", "Tom", "18"], "name").unwrap(), "Tom");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldMapper {
    positions: HashMap<String, usize>,
}

impl FieldMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the position of every header field. A repeated name keeps
    /// its last position; earlier assignments for other names are kept.
    pub fn assign_positions<S: AsRef<str>>(&mut self, header: &[S]) {
        for (index, name) in header.iter().enumerate() {
            self.positions.insert(name.as_ref().to_string(), index);
        }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Value of the named field in `row`.
    pub fn lookup<'a, S: AsRef<str>>(&self, row: &'a [S], name: &str) -> Result<&'a str, CsvError> {
        let index = self
            .position(name)
            .ok_or_else(|| CsvError::UnknownField(name.to_string()))?;
        row.get(index)
            .map(AsRef::as_ref)
            .ok_or_else(|| CsvError::OutOfRange {
                field: name.to_string(),
                index,
                len: row.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
