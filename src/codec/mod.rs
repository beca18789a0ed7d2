//! XML codec for OpenSearch description documents.
//!
//! Both directions are driven by [`SCHEMA`], the ordered table mapping element
//! names to description fields. The encoder walks it to emit children in schema
//! order; the decoder looks element names up in it and ignores everything else.

mod de;
mod ser;

use std::io::{BufRead, Write};

use crate::domain::Description;
use crate::error::{OpenSearchError, Result};

/// Namespace of OpenSearch 1.1 description documents
pub const NAMESPACE: &str = "http://a9.com/-/spec/opensearch/1.1/";
pub const ROOT_ELEMENT: &str = "OpenSearchDescription";
/// Media type under which description documents are published
pub const CONTENT_TYPE: &str = "application/opensearchdescription+xml";

/// Description fields addressable from the wire format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ShortName,
    Description,
    Tags,
    Contact,
    Url,
    LongName,
    Image,
    Query,
    Developer,
    Attribution,
    SyndicationRight,
    AdultContent,
    Language,
    OutputEncoding,
    InputEncoding,
}

/// Child elements of the root, in the order they are written
pub const SCHEMA: [(&str, Field); 15] = [
    ("ShortName", Field::ShortName),
    ("Description", Field::Description),
    ("Tags", Field::Tags),
    ("Contact", Field::Contact),
    ("Url", Field::Url),
    ("LongName", Field::LongName),
    ("Image", Field::Image),
    ("Query", Field::Query),
    ("Developer", Field::Developer),
    ("Attribution", Field::Attribution),
    ("SyndicationRight", Field::SyndicationRight),
    ("AdultContent", Field::AdultContent),
    ("Language", Field::Language),
    ("OutputEncoding", Field::OutputEncoding),
    ("InputEncoding", Field::InputEncoding),
];

/// Look up the field mapped to a (local) element name
pub fn field_for(element: &[u8]) -> Option<Field> {
    SCHEMA
        .iter()
        .find(|(name, _)| name.as_bytes() == element)
        .map(|(_, field)| *field)
}

/// The plain text fields, which map one element's text to one string
fn text_field(description: &Description, field: Field) -> Option<&String> {
    match field {
        Field::ShortName => Some(&description.short_name),
        Field::Description => Some(&description.description),
        Field::Tags => Some(&description.tags),
        Field::Contact => Some(&description.contact),
        Field::LongName => Some(&description.long_name),
        Field::Developer => Some(&description.developer),
        Field::Attribution => Some(&description.attribution),
        Field::OutputEncoding => Some(&description.output_encoding),
        Field::InputEncoding => Some(&description.input_encoding),
        _ => None,
    }
}

fn text_field_mut(description: &mut Description, field: Field) -> Option<&mut String> {
    match field {
        Field::ShortName => Some(&mut description.short_name),
        Field::Description => Some(&mut description.description),
        Field::Tags => Some(&mut description.tags),
        Field::Contact => Some(&mut description.contact),
        Field::LongName => Some(&mut description.long_name),
        Field::Developer => Some(&mut description.developer),
        Field::Attribution => Some(&mut description.attribution),
        Field::OutputEncoding => Some(&mut description.output_encoding),
        Field::InputEncoding => Some(&mut description.input_encoding),
        _ => None,
    }
}

/// How to treat a `Language` element that is not a valid BCP-47 tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LanguagePolicy {
    /// Leave the language unset and report the error as a warning
    #[default]
    Lenient,
    /// Fail the whole decode
    Strict,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    pub language: LanguagePolicy,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self {
            language: LanguagePolicy::Strict,
        }
    }
}

/// A decoded description plus the non-fatal problems found along the way
#[derive(Debug)]
pub struct Decoded {
    pub description: Description,
    pub warnings: Vec<OpenSearchError>,
}

/// Decode a description from a byte buffer, lenient on language tags
pub fn decode(bytes: &[u8]) -> Result<Description> {
    decode_with(bytes, &DecodeOptions::default()).map(|decoded| decoded.description)
}

/// Decode a description from a buffered reader, lenient on language tags
pub fn decode_reader<R: BufRead>(reader: R) -> Result<Description> {
    decode_reader_with(reader, &DecodeOptions::default()).map(|decoded| decoded.description)
}

pub fn decode_with(bytes: &[u8], options: &DecodeOptions) -> Result<Decoded> {
    decode_reader_with(bytes, options)
}

pub fn decode_reader_with<R: BufRead>(reader: R, options: &DecodeOptions) -> Result<Decoded> {
    let decoded = de::DescriptionReader::new(reader, *options).read_document()?;
    tracing::debug!(
        short_name = %decoded.description.short_name,
        urls = decoded.description.urls.len(),
        warnings = decoded.warnings.len(),
        "decoded description"
    );
    Ok(decoded)
}

/// Encode a description to XML bytes
pub fn encode(description: &Description) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    encode_to_writer(description, &mut buffer)?;
    Ok(buffer)
}

pub fn encode_to_writer<W: Write>(description: &Description, writer: W) -> Result<()> {
    ser::write_description(description, writer)
}
