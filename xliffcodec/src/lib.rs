#![forbid(unsafe_code)]
//! XLIFF 1.2 toolkit for Rust.
//!
//! Reads translation interchange files into a small [`Document`] model, checks
//! them for structural consistency, adds trans-units and writes them back in
//! schema-conformant form.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use xliffcodec::{Document, traits::Parser, with_target};
//!
//! let mut doc = Document::read_from("Localizable.xliff")?;
//! for finding in doc.validate() {
//!     eprintln!("{finding}");
//! }
//! doc.add_trans_unit("Hallo Welt", [with_target("Hello World")])?;
//! doc.write_to("Localizable.xliff")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Scope
//!
//! Only the plain-text subset of XLIFF 1.2 is modeled: files with a header
//! tool, a body of trans-units, and `source`/`target`/`note` text. Groups,
//! alt-trans, inline markup and binary units are skipped when reading.

pub mod codec;
pub mod error;
pub mod read_options;
pub mod traits;
pub mod types;
pub mod validation;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{decode, decode_with_options, encode, read_with_options},
    error::Error,
    read_options::ReadOptions,
    types::{Body, Document, File, Header, Tool, TransUnit, TransUnitOption, with_note, with_target},
    validation::{ValidationError, ValidationErrorCode, validate},
};
