//! # Error Types
//!
//! One error enum for the boundaries where failure is real: storage reads
//! and writes, tabular record parsing, and sheet metadata.
//!
//! Key parsing is deliberately not here - an unparseable key degrades to an
//! identity transposition, and structural edits with bad indices are no-ops.
//! A storage failure is never substituted as document body text; it stays a
//! typed error so the presentation layer can render a distinct error state.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CifraError {
    /// A chord-text store could not read or write a reference.
    ///
    /// # Example
    /// ```
    /// # use cifra::CifraError;
    /// let err = CifraError::Storage {
    ///     reference: "cifras/aquarela.txt".to_string(),
    ///     message: "not found".to_string(),
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Storage error for 'cifras/aquarela.txt': not found"
    /// );
    /// ```
    #[error("Storage error for '{reference}': {message}")]
    Storage { reference: String, message: String },

    /// A tabular setlist record line could not be reconstructed.
    ///
    /// `line` is 1-indexed over the record text, counting the header.
    #[error("Record error at line {line}: {message}")]
    Record { line: usize, message: String },

    /// Invalid YAML frontmatter on a stored sheet.
    #[error("Invalid sheet metadata: {0}")]
    Metadata(String),
}
