//! All error types for the xliffcodec crate.
//!
//! These are returned from all fallible operations (reading, parsing, writing and editing).
//! Validation findings are not errors in this sense; see [`crate::validation`].

use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML syntax error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML syntax error: {0}")]
    Syntax(String),

    #[error("document does not contain a file")]
    NoFiles,

    #[error("last trans-unit id is not a number that can be incremented: {0}")]
    InvalidLastId(String),

    #[error("document failed validation with {} finding(s)", .0.len())]
    Validation(Vec<ValidationError>),
}

impl Error {
    /// Creates a new syntax error for input the decoder itself rejects.
    pub fn syntax_error(message: impl Into<String>) -> Self {
        Error::Syntax(message.into())
    }

    /// Returns `true` if the error is an I/O error for a path that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }

    /// Returns `true` if the input was not well-formed XML.
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::XmlParse(_) | Error::Syntax(_))
    }
}
