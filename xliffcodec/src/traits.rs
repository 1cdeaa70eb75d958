//! Traits for reading and writing documents in xliffcodec.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use crate::error::Error;

/// A trait for parsing and writing a document from/to one file.
///
/// # Example
///
/// ```rust,no_run
/// use xliffcodec::{Document, traits::Parser};
/// let doc = Document::read_from("Localizable.xliff")?;
/// doc.write_to("Localizable_copy.xliff")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from raw bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized;

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Parse from any reader. The whole input is buffered first.
    fn from_reader<R: Read>(mut reader: R) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    /// Parse from file path. A missing path surfaces as [`Error::Io`].
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Write to file path.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer)?;
        writer.flush().map_err(Error::Io)
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_bytes(s.as_bytes())
    }
}
