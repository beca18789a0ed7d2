// Description files for authoring and publishing
// YAML and JSON for hand-written descriptions, XML for the wire format

use anyhow::{Context, Result};
use std::path::Path;

use crate::codec::{self, DecodeOptions};
use crate::domain::Description;

/// Strategy trait for description file formats
pub trait DescriptionSerializer: Send + Sync {
    fn serialize(&self, description: &Description) -> Result<String>;
    fn deserialize(&self, content: &str) -> Result<Description>;
    fn file_extension(&self) -> &'static str;
}

pub struct YamlSerializer;

impl DescriptionSerializer for YamlSerializer {
    fn serialize(&self, description: &Description) -> Result<String> {
        Ok(serde_yaml::to_string(description)?)
    }

    fn deserialize(&self, content: &str) -> Result<Description> {
        Ok(serde_yaml::from_str(content)?)
    }

    fn file_extension(&self) -> &'static str {
        "yml"
    }
}

pub struct JsonSerializer;

impl DescriptionSerializer for JsonSerializer {
    fn serialize(&self, description: &Description) -> Result<String> {
        Ok(serde_json::to_string_pretty(description)?)
    }

    fn deserialize(&self, content: &str) -> Result<Description> {
        Ok(serde_json::from_str(content)?)
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }
}

/// OpenSearch description XML
#[derive(Default)]
pub struct XmlSerializer {
    pub options: DecodeOptions,
}

impl DescriptionSerializer for XmlSerializer {
    fn serialize(&self, description: &Description) -> Result<String> {
        let bytes = codec::encode(description)?;
        Ok(String::from_utf8(bytes)?)
    }

    fn deserialize(&self, content: &str) -> Result<Description> {
        let decoded = codec::decode_with(content.as_bytes(), &self.options)?;
        Ok(decoded.description)
    }

    fn file_extension(&self) -> &'static str {
        "xml"
    }
}

/// Serializer for a format name as given on the command line
pub fn serializer_for_format(format: &str, options: DecodeOptions) -> Option<Box<dyn DescriptionSerializer>> {
    match format.to_ascii_lowercase().as_str() {
        "yaml" | "yml" => Some(Box::new(YamlSerializer)),
        "json" => Some(Box::new(JsonSerializer)),
        "xml" | "osd" => Some(Box::new(XmlSerializer { options })),
        _ => None,
    }
}

/// Pick a serializer from the file extension, defaulting to XML
pub fn serializer_for_path(path: &Path, options: DecodeOptions) -> Box<dyn DescriptionSerializer> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| serializer_for_format(ext, options))
        .unwrap_or_else(|| Box::new(XmlSerializer { options }))
}

pub fn load_description(path: &Path, options: DecodeOptions) -> Result<Description> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read description file {}", path.display()))?;
    serializer_for_path(path, options)
        .deserialize(&content)
        .with_context(|| format!("Invalid description file {}", path.display()))
}
