//! In-memory model of an XLIFF 1.2 document.
//! The codec decodes into these types and encodes from them.

use log::debug;
use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::error::Error;

/// The only XLIFF version this crate understands.
pub const XLIFF_VERSION: &str = "1.2";

/// The only `datatype` this crate understands.
pub const PLAINTEXT_DATATYPE: &str = "plaintext";

/// A complete XLIFF document (corresponds to one `.xliff`/`.xlf` file on disk).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Document {
    /// Value of the root `version` attribute, expected to be `"1.2"`.
    pub version: String,

    /// Ordered list of all `<file>` elements.
    #[serde(default)]
    pub files: Vec<File>,
}

impl Document {
    /// Creates a new, empty document with one `plaintext` file.
    ///
    /// The version is always `"1.2"`. Nothing is validated; an empty
    /// `original` is left for the caller to fill in.
    ///
    /// # Example
    ///
    /// ```rust
    /// use xliffcodec::Document;
    ///
    /// let doc = Document::new("de", "en");
    /// assert_eq!(doc.version, "1.2");
    /// assert_eq!(doc.files.len(), 1);
    /// assert_eq!(doc.files[0].datatype, "plaintext");
    /// ```
    pub fn new(source_language: impl Into<String>, target_language: impl Into<String>) -> Self {
        Document {
            version: XLIFF_VERSION.to_string(),
            files: vec![File::new("", source_language, target_language)],
        }
    }

    /// Finds the file whose `original` attribute matches exactly.
    pub fn file(&self, original: &str) -> Option<&File> {
        self.files.iter().find(|f| f.original == original)
    }

    /// Mutable twin of [`Document::file`].
    pub fn file_mut(&mut self, original: &str) -> Option<&mut File> {
        self.files.iter_mut().find(|f| f.original == original)
    }

    /// The file new trans-units are appended to.
    pub fn last_file_mut(&mut self) -> Option<&mut File> {
        self.files.last_mut()
    }

    /// Total number of trans-units across all files.
    pub fn trans_unit_count(&self) -> usize {
        self.files.iter().map(|f| f.body.trans_units.len()).sum()
    }

    /// Appends a trans-unit with an auto-incremented id to the last file.
    ///
    /// The id is the last trans-unit's id plus one, or `"0"` for an empty
    /// body. Options are applied in order, so a later option overrides an
    /// earlier one touching the same field.
    ///
    /// # Errors
    ///
    /// - [`Error::NoFiles`] if the document has no file.
    /// - [`Error::InvalidLastId`] if the last trans-unit's id is not an integer
    ///   or is already `i64::MAX`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use xliffcodec::{Document, with_note, with_target};
    ///
    /// let mut doc = Document::new("de", "en");
    /// doc.add_trans_unit("Hallo Welt", [])?;
    /// doc.add_trans_unit("Wie geht es dir?", [with_note("greeting"), with_target("How are you?")])?;
    /// assert_eq!(doc.files[0].body.trans_units[1].id, "1");
    /// # Ok::<(), xliffcodec::Error>(())
    /// ```
    pub fn add_trans_unit<I>(&mut self, source: impl Into<String>, options: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = TransUnitOption>,
    {
        let file = self.files.last_mut().ok_or(Error::NoFiles)?;
        let next_id = file.next_trans_unit_id()?;

        let mut unit = TransUnit::new(next_id.to_string(), source);
        for option in options {
            option.apply(&mut unit);
        }

        debug!("adding trans-unit {} to file '{}'", unit.id, file.original);
        file.body.trans_units.push(unit);
        Ok(())
    }

    /// Returns `true` if every trans-unit in every file has both a source
    /// and a target. A document without trans-units is complete.
    pub fn is_complete(&self) -> bool {
        self.files
            .iter()
            .flat_map(|f| f.body.trans_units.iter())
            .all(TransUnit::is_translated)
    }
}

/// One `<file>` element: a single source file being localized.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct File {
    /// Name or path of the original file.
    pub original: String,
    pub source_language: String,
    pub target_language: String,
    /// Content type of the original file; only `"plaintext"` is supported.
    pub datatype: String,
    #[serde(default)]
    pub header: Header,
    #[serde(default)]
    pub body: Body,
}

impl File {
    /// Creates an empty `plaintext` file.
    pub fn new(
        original: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        File {
            original: original.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
            datatype: PLAINTEXT_DATATYPE.to_string(),
            header: Header::default(),
            body: Body::default(),
        }
    }

    /// Finds the trans-unit with the given id.
    pub fn trans_unit(&self, id: &str) -> Option<&TransUnit> {
        self.body.trans_units.iter().find(|u| u.id == id)
    }

    /// Mutable twin of [`File::trans_unit`].
    pub fn trans_unit_mut(&mut self, id: &str) -> Option<&mut TransUnit> {
        self.body.trans_units.iter_mut().find(|u| u.id == id)
    }

    pub fn source_language_id(&self) -> Option<LanguageIdentifier> {
        self.source_language.parse().ok()
    }

    pub fn target_language_id(&self) -> Option<LanguageIdentifier> {
        self.target_language.parse().ok()
    }

    fn next_trans_unit_id(&self) -> Result<i64, Error> {
        let Some(last) = self.body.trans_units.last() else {
            return Ok(0);
        };
        last.id
            .parse::<i64>()
            .ok()
            .and_then(|id| id.checked_add(1))
            .ok_or_else(|| Error::InvalidLastId(last.id.clone()))
    }
}

/// Tool metadata carried in `<header>`. Never validated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Header {
    pub tool: Tool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Tool {
    pub tool_id: String,
    pub tool_name: String,
    pub tool_version: String,
    pub build_num: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Body {
    #[serde(default)]
    pub trans_units: Vec<TransUnit>,
}

/// A single `<trans-unit>`: one source string and its translation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct TransUnit {
    pub id: String,
    pub source: String,
    /// Translated text; empty means "not yet translated".
    #[serde(default)]
    pub target: String,
    /// Free-form comment for translators.
    #[serde(default)]
    pub note: String,
}

impl TransUnit {
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        TransUnit {
            id: id.into(),
            source: source.into(),
            target: String::new(),
            note: String::new(),
        }
    }

    /// Both source and target are present.
    pub fn is_translated(&self) -> bool {
        !self.source.is_empty() && !self.target.is_empty()
    }
}

/// Optional settings for [`Document::add_trans_unit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransUnitOption {
    Note(String),
    Target(String),
}

impl TransUnitOption {
    pub fn apply(self, unit: &mut TransUnit) {
        match self {
            TransUnitOption::Note(note) => unit.note = note,
            TransUnitOption::Target(target) => unit.target = target,
        }
    }
}

/// Sets the note of a new trans-unit.
pub fn with_note(note: impl Into<String>) -> TransUnitOption {
    TransUnitOption::Note(note.into())
}

/// Sets the target of a new trans-unit.
pub fn with_target(target: impl Into<String>) -> TransUnitOption {
    TransUnitOption::Target(target.into())
}
