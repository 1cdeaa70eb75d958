//! Structural consistency checks for XLIFF documents.
//!
//! [`validate`] runs a fixed, ordered battery of checks and collects every
//! finding instead of stopping at the first one. An empty result means the
//! document is sound.

use std::fmt::{Display, Formatter};

use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::types::{Document, PLAINTEXT_DATATYPE, XLIFF_VERSION};

/// The kind of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValidationErrorCode {
    UnsupportedVersion,
    MissingOriginalAttribute,
    MissingSourceLanguage,
    MissingTargetLanguage,
    UnsupportedDatatype,
    InconsistentSourceLanguage,
    InconsistentTargetLanguage,
    MissingTransUnitID,
    MissingTransUnitSource,
    MissingTransUnitTarget,
    /// The document has no `<file>`, so there is no canonical language pair.
    MissingFile,
}

impl ValidationErrorCode {
    /// Every code, in the order the checks run.
    pub const ALL: [ValidationErrorCode; 11] = [
        ValidationErrorCode::UnsupportedVersion,
        ValidationErrorCode::MissingOriginalAttribute,
        ValidationErrorCode::MissingSourceLanguage,
        ValidationErrorCode::MissingTargetLanguage,
        ValidationErrorCode::UnsupportedDatatype,
        ValidationErrorCode::MissingFile,
        ValidationErrorCode::InconsistentSourceLanguage,
        ValidationErrorCode::InconsistentTargetLanguage,
        ValidationErrorCode::MissingTransUnitID,
        ValidationErrorCode::MissingTransUnitSource,
        ValidationErrorCode::MissingTransUnitTarget,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorCode::UnsupportedVersion => "UnsupportedVersion",
            ValidationErrorCode::MissingOriginalAttribute => "MissingOriginalAttribute",
            ValidationErrorCode::MissingSourceLanguage => "MissingSourceLanguage",
            ValidationErrorCode::MissingTargetLanguage => "MissingTargetLanguage",
            ValidationErrorCode::UnsupportedDatatype => "UnsupportedDatatype",
            ValidationErrorCode::InconsistentSourceLanguage => "InconsistentSourceLanguage",
            ValidationErrorCode::InconsistentTargetLanguage => "InconsistentTargetLanguage",
            ValidationErrorCode::MissingTransUnitID => "MissingTransUnitID",
            ValidationErrorCode::MissingTransUnitSource => "MissingTransUnitSource",
            ValidationErrorCode::MissingTransUnitTarget => "MissingTransUnitTarget",
            ValidationErrorCode::MissingFile => "MissingFile",
        }
    }
}

impl Display for ValidationErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding, naming the offending file or trans-unit in `message`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{code}: {message}")]
pub struct ValidationError {
    pub code: ValidationErrorCode,
    pub message: String,
}

impl ValidationError {
    pub fn new(code: ValidationErrorCode, message: impl Into<String>) -> Self {
        ValidationError {
            code,
            message: message.into(),
        }
    }
}

/// Runs all checks against `doc` and returns every finding, in check order.
///
/// The checks are, in order: the document version; per-file `original`,
/// `source-language`, `target-language` and `datatype`; language consistency
/// of every file against the first one; per-trans-unit `id`, `source` and
/// `target`.
pub fn validate(doc: &Document) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_version(doc, &mut errors);
    check_file_attributes(doc, &mut errors);
    check_language_consistency(doc, &mut errors);
    check_trans_units(doc, &mut errors);

    debug!("validation finished with {} finding(s)", errors.len());
    errors
}

fn check_version(doc: &Document, errors: &mut Vec<ValidationError>) {
    if doc.version != XLIFF_VERSION {
        errors.push(ValidationError::new(
            ValidationErrorCode::UnsupportedVersion,
            format!("Version {} is not supported", doc.version),
        ));
    }
}

fn check_file_attributes(doc: &Document, errors: &mut Vec<ValidationError>) {
    for (idx, file) in doc.files.iter().enumerate() {
        if file.original.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorCode::MissingOriginalAttribute,
                format!("File #{} is missing 'original' attribute", idx),
            ));
        }
        if file.source_language.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorCode::MissingSourceLanguage,
                format!(
                    "File '{}' is missing 'source-language' attribute",
                    file.original
                ),
            ));
        }
        if file.target_language.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorCode::MissingTargetLanguage,
                format!(
                    "File '{}' is missing 'target-language' attribute",
                    file.original
                ),
            ));
        }
        if file.datatype != PLAINTEXT_DATATYPE {
            errors.push(ValidationError::new(
                ValidationErrorCode::UnsupportedDatatype,
                format!(
                    "File '{}' has unsupported 'datatype' attribute with value '{}'",
                    file.original, file.datatype
                ),
            ));
        }
    }
}

fn check_language_consistency(doc: &Document, errors: &mut Vec<ValidationError>) {
    // The first file's language pair is canonical for the whole document.
    let Some(first) = doc.files.first() else {
        errors.push(ValidationError::new(
            ValidationErrorCode::MissingFile,
            "Document does not contain any file",
        ));
        return;
    };

    for file in &doc.files {
        if file.source_language != first.source_language {
            errors.push(ValidationError::new(
                ValidationErrorCode::InconsistentSourceLanguage,
                format!(
                    "File '{}' has inconsistent 'source-language' attribute '{}'",
                    file.original, file.source_language
                ),
            ));
        }
        if file.target_language != first.target_language {
            errors.push(ValidationError::new(
                ValidationErrorCode::InconsistentTargetLanguage,
                format!(
                    "File '{}' has inconsistent 'target-language' attribute '{}'",
                    file.original, file.target_language
                ),
            ));
        }
    }
}

fn check_trans_units(doc: &Document, errors: &mut Vec<ValidationError>) {
    for file in &doc.files {
        for (idx, unit) in file.body.trans_units.iter().enumerate() {
            if unit.id.is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorCode::MissingTransUnitID,
                    format!(
                        "Translation unit #{} in file '{}' is missing 'id' attribute",
                        idx, file.original
                    ),
                ));
            }
            if unit.source.is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorCode::MissingTransUnitSource,
                    format!(
                        "Translation unit '{}' in file '{}' is missing 'source' element",
                        unit.id, file.original
                    ),
                ));
            }
            if unit.target.is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorCode::MissingTransUnitTarget,
                    format!(
                        "Translation unit '{}' in file '{}' is missing 'target' element",
                        unit.id, file.original
                    ),
                ));
            }
        }
    }
}

impl Document {
    /// Runs the validator; see [`validate`].
    pub fn validate(&self) -> Vec<ValidationError> {
        validate(self)
    }
}
