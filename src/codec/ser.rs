// Writing descriptions as XML in schema order

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

use super::{text_field, Field, NAMESPACE, ROOT_ELEMENT, SCHEMA};
use crate::domain::Description;
use crate::error::Result;

pub(super) fn write_description<W: Write>(description: &Description, writer: W) -> Result<()> {
    let mut writer = Writer::new_with_indent(writer, b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new(ROOT_ELEMENT);
    root.push_attribute(("xmlns", NAMESPACE));
    writer.write_event(Event::Start(root))?;

    for (name, field) in SCHEMA {
        write_field(&mut writer, description, name, field)?;
    }

    writer.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;
    writer.get_mut().write_all(b"\n")?;
    Ok(())
}

fn write_field<W: Write>(
    writer: &mut Writer<W>,
    description: &Description,
    name: &str,
    field: Field,
) -> Result<()> {
    match field {
        Field::Url => {
            for url in &description.urls {
                let mut element = BytesStart::new(name);
                element.push_attribute(("type", url.media_type.as_str()));
                element.push_attribute(("template", url.template.as_str()));
                writer.write_event(Event::Empty(element))?;
            }
        }
        Field::Image => {
            for image in &description.images {
                let mut element = BytesStart::new(name);
                if let Some(height) = image.height {
                    element.push_attribute(("height", height.to_string().as_str()));
                }
                if let Some(width) = image.width {
                    element.push_attribute(("width", width.to_string().as_str()));
                }
                if !image.media_type.is_empty() {
                    element.push_attribute(("type", image.media_type.as_str()));
                }
                write_text_element(writer, element, name, &image.url)?;
            }
        }
        Field::Query => {
            if let Some(query) = &description.query {
                let mut element = BytesStart::new(name);
                element.push_attribute(("role", query.role.as_str()));
                element.push_attribute(("searchTerms", query.search_terms.as_str()));
                writer.write_event(Event::Empty(element))?;
            }
        }
        // Always written, even when false
        Field::AdultContent => {
            let value = if description.adult_content { "true" } else { "false" };
            write_text_element(writer, BytesStart::new(name), name, value)?;
        }
        Field::SyndicationRight => {
            if let Some(right) = description.syndication_right {
                write_text_element(writer, BytesStart::new(name), name, right.as_str())?;
            }
        }
        Field::Language => {
            if let Some(language) = &description.language {
                write_text_element(writer, BytesStart::new(name), name, language.as_str())?;
            }
        }
        _ => {
            if let Some(text) = text_field(description, field).filter(|text| !text.is_empty()) {
                write_text_element(writer, BytesStart::new(name), name, text)?;
            }
        }
    }
    Ok(())
}

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    start: BytesStart<'_>,
    name: &str,
    text: &str,
) -> Result<()> {
    if text.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
