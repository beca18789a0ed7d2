// Event-driven decoding of description documents

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use std::io::BufRead;

use super::{
    field_for, text_field_mut, DecodeOptions, Decoded, Field, LanguagePolicy, NAMESPACE,
    ROOT_ELEMENT,
};
use crate::domain::{Description, Image, Language, QueryExample, SyndicationRight, UrlTemplate};
use crate::error::{OpenSearchError, Result};

/// Namespace an element resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    OpenSearch,
    Unbound,
    Foreign,
}

pub(super) struct DescriptionReader<R: BufRead> {
    reader: NsReader<R>,
    buf: Vec<u8>,
    options: DecodeOptions,
    warnings: Vec<OpenSearchError>,
}

impl<R: BufRead> DescriptionReader<R> {
    pub(super) fn new(reader: R, options: DecodeOptions) -> Self {
        Self {
            reader: NsReader::from_reader(reader),
            buf: Vec::new(),
            options,
            warnings: Vec::new(),
        }
    }

    pub(super) fn read_document(mut self) -> Result<Decoded> {
        let description = loop {
            let (scope, event) = self.next()?;
            match event {
                Event::Start(start) => {
                    check_root(scope, &start)?;
                    break self.read_root()?;
                }
                Event::Empty(start) => {
                    check_root(scope, &start)?;
                    break Description::default();
                }
                Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_) => {}
                Event::Text(text) if is_whitespace(&text) => {}
                Event::Eof => {
                    return Err(OpenSearchError::SchemaMismatch(
                        "document has no root element".to_string(),
                    ))
                }
                _ => {
                    return Err(OpenSearchError::MalformedXml(
                        "content before the root element".to_string(),
                    ))
                }
            }
        };

        self.read_trailer()?;

        Ok(Decoded {
            description,
            warnings: self.warnings,
        })
    }

    fn next(&mut self) -> Result<(Scope, Event<'static>)> {
        self.buf.clear();
        let (ns, event) = self.reader.read_resolved_event_into(&mut self.buf)?;
        let scope = match ns {
            ResolveResult::Bound(Namespace(ns)) if ns == NAMESPACE.as_bytes() => Scope::OpenSearch,
            ResolveResult::Unbound => Scope::Unbound,
            _ => Scope::Foreign,
        };
        Ok((scope, event.into_owned()))
    }

    fn read_root(&mut self) -> Result<Description> {
        let mut description = Description::default();

        loop {
            let (scope, event) = self.next()?;
            match event {
                Event::Start(start) => match known_field(scope, &start) {
                    Some(field) => self.read_field(&mut description, field, &start, false)?,
                    None => self.skip()?,
                },
                Event::Empty(start) => {
                    if let Some(field) = known_field(scope, &start) {
                        self.read_field(&mut description, field, &start, true)?;
                    }
                }
                Event::End(_) => return Ok(description),
                Event::Eof => return Err(unexpected_eof(ROOT_ELEMENT)),
                // Indentation, comments, stray text
                _ => {}
            }
        }
    }

    fn read_field(
        &mut self,
        description: &mut Description,
        field: Field,
        start: &BytesStart<'_>,
        empty: bool,
    ) -> Result<()> {
        match field {
            Field::Url => {
                let mut url = UrlTemplate::new("", "");
                for (key, value) in attributes(start)? {
                    match key.as_str() {
                        "type" => url.media_type = value,
                        "template" => url.template = value,
                        _ => {}
                    }
                }
                if !empty {
                    self.skip()?;
                }
                description.urls.push(url);
            }
            Field::Image => {
                let mut image = Image::default();
                for (key, value) in attributes(start)? {
                    match key.as_str() {
                        "height" => image.height = parse_dimension("height", &value)?,
                        "width" => image.width = parse_dimension("width", &value)?,
                        "type" => image.media_type = value,
                        _ => {}
                    }
                }
                if !empty {
                    image.url = self.read_text("Image")?;
                }
                description.images.push(image);
            }
            Field::Query => {
                let mut query = QueryExample::default();
                for (key, value) in attributes(start)? {
                    match key.as_str() {
                        "role" => query.role = value,
                        "searchTerms" => query.search_terms = value,
                        _ => {}
                    }
                }
                if !empty {
                    self.skip()?;
                }
                // Several Query elements are allowed; the first one is kept
                if description.query.is_none() {
                    description.query = Some(query);
                }
            }
            _ => {
                let text = if empty {
                    String::new()
                } else {
                    self.read_text(&String::from_utf8_lossy(start.local_name().as_ref()))?
                };
                self.assign_text(description, field, text)?;
            }
        }
        Ok(())
    }

    fn assign_text(&mut self, description: &mut Description, field: Field, text: String) -> Result<()> {
        match field {
            Field::AdultContent => description.adult_content = parse_bool(&text)?,
            Field::SyndicationRight => {
                description.syndication_right = if text.trim().is_empty() {
                    None
                } else {
                    Some(text.parse::<SyndicationRight>()?)
                };
            }
            Field::Language => description.language = self.parse_language(&text)?,
            _ => {
                if let Some(slot) = text_field_mut(description, field) {
                    *slot = text;
                }
            }
        }
        Ok(())
    }

    fn parse_language(&mut self, text: &str) -> Result<Option<Language>> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        match text.parse::<Language>() {
            Ok(language) => Ok(Some(language)),
            Err(e) => match self.options.language {
                LanguagePolicy::Strict => Err(e),
                LanguagePolicy::Lenient => {
                    tracing::warn!(error = %e, "ignoring invalid Language element");
                    self.warnings.push(e);
                    Ok(None)
                }
            },
        }
    }

    /// Collect the text content of the current element up to its end tag
    fn read_text(&mut self, element: &str) -> Result<String> {
        let mut text = String::new();
        loop {
            let (_, event) = self.next()?;
            match event {
                Event::Text(t) => text.push_str(&unescape(utf8(&t)?)?),
                Event::CData(c) => text.push_str(utf8(&c)?),
                Event::GeneralRef(r) => text.push_str(&unescape(&format!("&{};", utf8(&r)?))?),
                Event::Start(_) => self.skip()?,
                Event::End(_) => return Ok(text),
                Event::Eof => return Err(unexpected_eof(element)),
                _ => {}
            }
        }
    }

    /// Skip the rest of the element whose start tag was just read
    fn skip(&mut self) -> Result<()> {
        let mut depth = 1usize;
        while depth > 0 {
            let (_, event) = self.next()?;
            match event {
                Event::Start(_) => depth += 1,
                Event::End(_) => depth -= 1,
                Event::Eof => return Err(unexpected_eof("unknown element")),
                _ => {}
            }
        }
        Ok(())
    }

    fn read_trailer(&mut self) -> Result<()> {
        loop {
            let (_, event) = self.next()?;
            match event {
                Event::Eof => return Ok(()),
                Event::Comment(_) | Event::PI(_) => {}
                Event::Text(text) if is_whitespace(&text) => {}
                _ => {
                    return Err(OpenSearchError::MalformedXml(
                        "content after the root element".to_string(),
                    ))
                }
            }
        }
    }
}

fn check_root(scope: Scope, start: &BytesStart<'_>) -> Result<()> {
    let name = start.local_name();
    if name.as_ref() != ROOT_ELEMENT.as_bytes() {
        return Err(OpenSearchError::SchemaMismatch(format!(
            "expected root element <{}>, found <{}>",
            ROOT_ELEMENT,
            String::from_utf8_lossy(name.as_ref())
        )));
    }
    if scope != Scope::OpenSearch {
        return Err(OpenSearchError::SchemaMismatch(format!(
            "root element is not in the {} namespace",
            NAMESPACE
        )));
    }
    Ok(())
}

/// Known fields are matched in the OpenSearch namespace or unqualified
fn known_field(scope: Scope, start: &BytesStart<'_>) -> Option<Field> {
    if scope == Scope::Foreign {
        return None;
    }
    field_for(start.local_name().as_ref())
}

/// Unprefixed attributes of an element, unescaped
fn attributes(start: &BytesStart<'_>) -> Result<Vec<(String, String)>> {
    start
        .attributes()
        .map(|attr| {
            let attr = attr?;
            let key = utf8(attr.key.as_ref())?.to_string();
            let value = unescape(utf8(&attr.value)?)?;
            Ok((key, value))
        })
        .collect()
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| OpenSearchError::MalformedXml(format!("invalid UTF-8: {}", e)))
}

fn unescape(raw: &str) -> Result<String> {
    quick_xml::escape::unescape(raw)
        .map(|value| value.into_owned())
        .map_err(|e| OpenSearchError::MalformedXml(e.to_string()))
}

fn is_whitespace(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

fn unexpected_eof(element: &str) -> OpenSearchError {
    OpenSearchError::MalformedXml(format!("unexpected end of document inside <{}>", element))
}

/// XML Schema boolean: `true`, `false`, `1`, `0`
fn parse_bool(text: &str) -> Result<bool> {
    match text.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(OpenSearchError::SchemaMismatch(format!(
            "AdultContent must be true or false, found '{}'",
            other
        ))),
    }
}

fn parse_dimension(name: &str, value: &str) -> Result<Option<u32>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(OpenSearchError::SchemaMismatch(format!(
            "Image {} must be a positive integer, found '{}'",
            name, value
        ))),
    }
}
