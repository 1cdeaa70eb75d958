//! Conversion between the XLIFF 1.2 XML wire format and the [`Document`] model.
//!
//! Decoding is a streaming pass over `quick-xml` events that maps the known
//! elements and attributes onto the model and skips everything else. No
//! semantic checks happen here; run [`crate::validation::validate`] for that.
//!
//! Encoding wraps the document in [`DocumentExport`], which adds the fixed
//! namespace and schema attributes on the root element. Those attributes are
//! never read back, so decode → encode is semantically (not byte-for-byte)
//! idempotent.

use std::{
    borrow::Cow,
    io::{Read, Write},
    path::Path,
};

use log::{debug, trace};
use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{
    error::Error,
    read_options::ReadOptions,
    traits::Parser,
    types::{Document, File, TransUnit},
    validation::validate,
};

/// Default namespace written on the root element.
pub const XLIFF_NAMESPACE: &str = "urn:oasis:names:tc:xliff:document:1.2";
/// XML Schema instance namespace, bound to the `xsi` prefix.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
/// Value of `xsi:schemaLocation` on the root element.
pub const SCHEMA_LOCATION: &str = "urn:oasis:names:tc:xliff:document:1.2 http://docs.oasis-open.org/xliff/v1.2/os/xliff-core-1.2-strict.xsd";

impl Parser for Document {
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        decode(bytes)
    }

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        DocumentExport::new(self).write(writer)
    }
}

/// Parses XLIFF bytes into a [`Document`].
///
/// Input starting with a UTF-8 or UTF-16 byte order mark is transcoded first;
/// anything else must be UTF-8.
///
/// # Errors
///
/// Returns a syntax error ([`Error::is_syntax`]) when the input is not
/// well-formed XML. No partial document is ever returned.
///
/// # Example
///
/// ```rust
/// let doc = xliffcodec::decode(br#"<xliff version="1.2"><file original="a.txt"/></xliff>"#)?;
/// assert_eq!(doc.files[0].original, "a.txt");
/// # Ok::<(), xliffcodec::Error>(())
/// ```
pub fn decode(bytes: &[u8]) -> Result<Document, Error> {
    let text = transcode(bytes)?;
    let document = Decoder::default().run(&text)?;
    debug!(
        "decoded XLIFF {} with {} file(s) and {} trans-unit(s)",
        document.version,
        document.files.len(),
        document.trans_unit_count()
    );
    Ok(document)
}

/// Decodes `bytes`, then applies `options`.
///
/// With [`ReadOptions::strict`] set, a document with validation findings is
/// rejected with [`Error::Validation`].
pub fn decode_with_options(bytes: &[u8], options: &ReadOptions) -> Result<Document, Error> {
    let document = decode(bytes)?;
    if options.strict {
        let findings = validate(&document);
        if !findings.is_empty() {
            return Err(Error::Validation(findings));
        }
    }
    Ok(document)
}

/// Reads and decodes the file at `path`, then applies `options`.
pub fn read_with_options<P: AsRef<Path>>(
    path: P,
    options: &ReadOptions,
) -> Result<Document, Error> {
    let mut bytes = Vec::new();
    std::fs::File::open(path)?.read_to_end(&mut bytes)?;
    decode_with_options(&bytes, options)
}

/// Serializes a [`Document`] to XLIFF bytes, including the XML declaration.
pub fn encode(document: &Document) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    DocumentExport::new(document).write(&mut out)?;
    debug!("encoded XLIFF document into {} byte(s)", out.len());
    Ok(out)
}

fn transcode(bytes: &[u8]) -> Result<Cow<'_, str>, Error> {
    match encoding_rs::Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => {
            let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
            if had_errors {
                return Err(Error::syntax_error(format!(
                    "input is not valid {}",
                    encoding.name()
                )));
            }
            Ok(text)
        }
        None => std::str::from_utf8(bytes)
            .map(Cow::Borrowed)
            .map_err(|e| Error::syntax_error(format!("input is not valid UTF-8: {}", e))),
    }
}

/// Where the decoder currently is in the element tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Root,
    File,
    Header,
    Tool,
    Body,
    TransUnit,
    Field(TextField),
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextField {
    Source,
    Target,
    Note,
}

#[derive(Default)]
struct Decoder {
    document: Document,
    stack: Vec<Node>,
    root_seen: bool,
}

impl Decoder {
    fn run(mut self, text: &str) -> Result<Document, Error> {
        let mut reader = Reader::from_str(text);

        loop {
            match reader.read_event()? {
                Event::Start(ref e) => {
                    let node = self.open(e)?;
                    self.stack.push(node);
                }
                Event::Empty(ref e) => {
                    let node = self.open(e)?;
                    if let Node::Field(field) = node {
                        *self.field_mut(field)? = String::new();
                    }
                }
                Event::End(_) => {
                    self.stack.pop();
                }
                Event::Text(e) => {
                    // Unescaped even when skipped, so bad entities anywhere are rejected.
                    let value = e.unescape()?;
                    match self.stack.last().copied() {
                        Some(Node::Field(field)) => self.field_mut(field)?.push_str(&value),
                        None if !value.trim().is_empty() => {
                            return Err(Error::syntax_error("text outside of the root element"));
                        }
                        _ => {}
                    }
                }
                Event::CData(e) => {
                    if let Some(Node::Field(field)) = self.stack.last().copied() {
                        let value = String::from_utf8_lossy(&e).into_owned();
                        self.field_mut(field)?.push_str(&value);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !self.root_seen {
            return Err(Error::syntax_error("document has no root element"));
        }
        if !self.stack.is_empty() {
            return Err(Error::syntax_error(format!(
                "unexpected end of document with {} unclosed element(s)",
                self.stack.len()
            )));
        }
        Ok(self.document)
    }

    /// Classifies a starting element and records its attributes.
    fn open(&mut self, e: &BytesStart) -> Result<Node, Error> {
        check_attributes(e)?;
        let name = e.local_name();
        let parent = self.stack.last().copied();

        let node = match (parent, name.as_ref()) {
            (None, _) => {
                if self.root_seen {
                    return Err(Error::syntax_error("document has more than one root element"));
                }
                self.root_seen = true;
                if name.as_ref() != b"xliff" {
                    debug!(
                        "root element is <{}>, expected <xliff>",
                        String::from_utf8_lossy(name.as_ref())
                    );
                }
                self.read_root_attributes(e)?;
                Node::Root
            }
            (Some(Node::Root), b"file") => {
                self.document.files.push(read_file_attributes(e)?);
                Node::File
            }
            (Some(Node::File), b"header") => Node::Header,
            (Some(Node::File), b"body") => Node::Body,
            (Some(Node::Header), b"tool") => {
                self.read_tool_attributes(e)?;
                Node::Tool
            }
            (Some(Node::Body), b"trans-unit") => {
                let unit = read_trans_unit_attributes(e)?;
                self.current_file()?.body.trans_units.push(unit);
                Node::TransUnit
            }
            (Some(Node::TransUnit), b"source") => self.start_field(TextField::Source)?,
            (Some(Node::TransUnit), b"target") => self.start_field(TextField::Target)?,
            (Some(Node::TransUnit), b"note") => self.start_field(TextField::Note)?,
            (_, other) => {
                trace!(
                    "skipping unknown element <{}>",
                    String::from_utf8_lossy(other)
                );
                Node::Unknown
            }
        };
        Ok(node)
    }

    /// A repeated text element replaces the earlier value.
    fn start_field(&mut self, field: TextField) -> Result<Node, Error> {
        self.field_mut(field)?.clear();
        Ok(Node::Field(field))
    }

    fn read_root_attributes(&mut self, e: &BytesStart) -> Result<(), Error> {
        for attr in e.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            if attr.key.as_ref() == b"version" {
                self.document.version = attr.unescape_value()?.into_owned();
            }
        }
        Ok(())
    }

    fn read_tool_attributes(&mut self, e: &BytesStart) -> Result<(), Error> {
        let tool = &mut self.current_file()?.header.tool;
        for attr in e.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let value = attr.unescape_value()?.into_owned();
            match attr.key.as_ref() {
                b"tool-id" => tool.tool_id = value,
                b"tool-name" => tool.tool_name = value,
                b"tool-version" => tool.tool_version = value,
                b"build-num" => tool.build_num = value,
                _ => {}
            }
        }
        Ok(())
    }

    fn current_file(&mut self) -> Result<&mut File, Error> {
        self.document
            .files
            .last_mut()
            .ok_or_else(|| Error::syntax_error("element outside of <file>"))
    }

    fn field_mut(&mut self, field: TextField) -> Result<&mut String, Error> {
        let unit = self
            .current_file()?
            .body
            .trans_units
            .last_mut()
            .ok_or_else(|| Error::syntax_error("text element outside of <trans-unit>"))?;
        Ok(match field {
            TextField::Source => &mut unit.source,
            TextField::Target => &mut unit.target,
            TextField::Note => &mut unit.note,
        })
    }
}

/// Attributes must be well-formed on every element, including skipped ones.
fn check_attributes(e: &BytesStart) -> Result<(), Error> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        attr.unescape_value()?;
    }
    Ok(())
}

fn read_file_attributes(e: &BytesStart) -> Result<File, Error> {
    let mut file = File::default();
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let value = attr.unescape_value()?.into_owned();
        match attr.key.as_ref() {
            b"original" => file.original = value,
            b"source-language" => file.source_language = value,
            b"target-language" => file.target_language = value,
            b"datatype" => file.datatype = value,
            _ => {}
        }
    }
    Ok(file)
}

fn read_trans_unit_attributes(e: &BytesStart) -> Result<TransUnit, Error> {
    let mut unit = TransUnit::default();
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref() == b"id" {
            unit.id = attr.unescape_value()?.into_owned();
        }
    }
    Ok(unit)
}

/// The on-disk form of a [`Document`]: the document plus the fixed
/// namespace declarations and schema location of XLIFF 1.2.
#[derive(Debug, Clone, Copy)]
pub struct DocumentExport<'a> {
    pub document: &'a Document,
    pub xmlns: &'static str,
    pub xsi: &'static str,
    pub schema_location: &'static str,
}

impl<'a> DocumentExport<'a> {
    pub fn new(document: &'a Document) -> Self {
        DocumentExport {
            document,
            xmlns: XLIFF_NAMESPACE,
            xsi: XSI_NAMESPACE,
            schema_location: SCHEMA_LOCATION,
        }
    }

    /// Writes the XML declaration and the whole document, indented by two spaces.
    pub fn write<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new_with_indent(writer, b' ', 2);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("xliff");
        root.push_attribute(("xmlns", self.xmlns));
        root.push_attribute(("xmlns:xsi", self.xsi));
        root.push_attribute(("xsi:schemaLocation", self.schema_location));
        root.push_attribute(("version", self.document.version.as_str()));
        xml_writer.write_event(Event::Start(root))?;

        for file in &self.document.files {
            write_file(&mut xml_writer, file)?;
        }

        xml_writer.write_event(Event::End(BytesEnd::new("xliff")))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        Ok(())
    }
}

fn write_file<W: Write>(xml_writer: &mut Writer<W>, file: &File) -> Result<(), Error> {
    let mut elem = BytesStart::new("file");
    elem.push_attribute(("original", file.original.as_str()));
    elem.push_attribute(("source-language", file.source_language.as_str()));
    elem.push_attribute(("datatype", file.datatype.as_str()));
    elem.push_attribute(("target-language", file.target_language.as_str()));
    xml_writer.write_event(Event::Start(elem))?;

    let tool = &file.header.tool;
    let mut tool_elem = BytesStart::new("tool");
    tool_elem.push_attribute(("tool-id", tool.tool_id.as_str()));
    tool_elem.push_attribute(("tool-name", tool.tool_name.as_str()));
    tool_elem.push_attribute(("tool-version", tool.tool_version.as_str()));
    tool_elem.push_attribute(("build-num", tool.build_num.as_str()));
    xml_writer.write_event(Event::Start(BytesStart::new("header")))?;
    xml_writer.write_event(Event::Empty(tool_elem))?;
    xml_writer.write_event(Event::End(BytesEnd::new("header")))?;

    if file.body.trans_units.is_empty() {
        xml_writer.write_event(Event::Empty(BytesStart::new("body")))?;
    } else {
        xml_writer.write_event(Event::Start(BytesStart::new("body")))?;
        for unit in &file.body.trans_units {
            let mut unit_elem = BytesStart::new("trans-unit");
            unit_elem.push_attribute(("id", unit.id.as_str()));
            xml_writer.write_event(Event::Start(unit_elem))?;
            write_text_element(xml_writer, "source", &unit.source)?;
            write_text_element(xml_writer, "target", &unit.target)?;
            write_text_element(xml_writer, "note", &unit.note)?;
            xml_writer.write_event(Event::End(BytesEnd::new("trans-unit")))?;
        }
        xml_writer.write_event(Event::End(BytesEnd::new("body")))?;
    }

    xml_writer.write_event(Event::End(BytesEnd::new("file")))?;
    Ok(())
}

/// Empty values are written self-closing so indentation never becomes content.
fn write_text_element<W: Write>(
    xml_writer: &mut Writer<W>,
    name: &str,
    value: &str,
) -> Result<(), Error> {
    if value.is_empty() {
        xml_writer.write_event(Event::Empty(BytesStart::new(name)))?;
    } else {
        xml_writer.write_event(Event::Start(BytesStart::new(name)))?;
        xml_writer.write_event(Event::Text(BytesText::new(value)))?;
        xml_writer.write_event(Event::End(BytesEnd::new(name)))?;
    }
    Ok(())
}
