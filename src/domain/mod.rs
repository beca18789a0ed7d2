// Domain model for OpenSearch description documents
// Plain owned values; the codec maps them to and from XML

pub mod language;
pub mod resolver;
pub mod template;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{OpenSearchError, Result};

pub use language::Language;
pub use template::{fill_template, TemplateParams};

/// A search provider's OpenSearch description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Description {
    pub short_name: String,
    pub description: String,
    /// Space-separated tag set, kept verbatim
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tags: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub contact: String,
    pub urls: Vec<UrlTemplate>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub long_name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Image>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<QueryExample>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub developer: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub attribution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syndication_right: Option<SyndicationRight>,
    pub adult_content: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub output_encoding: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub input_encoding: String,
}

/// A templated search endpoint for one media type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlTemplate {
    #[serde(rename = "type")]
    pub media_type: String,
    pub template: String,
}

impl UrlTemplate {
    pub fn new(media_type: &str, template: &str) -> Self {
        Self {
            media_type: media_type.to_string(),
            template: template.to_string(),
        }
    }
}

/// Icon reference; the icon URL is the element's text content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub media_type: String,
    pub url: String,
}

/// Example query, e.g. `<Query role="example" searchTerms="cat"/>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryExample {
    pub role: String,
    pub search_terms: String,
}

impl QueryExample {
    pub fn new(role: &str, search_terms: &str) -> Self {
        Self {
            role: role.to_string(),
            search_terms: search_terms.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyndicationRight {
    Open,
    Limited,
    Private,
    Closed,
}

impl SyndicationRight {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyndicationRight::Open => "open",
            SyndicationRight::Limited => "limited",
            SyndicationRight::Private => "private",
            SyndicationRight::Closed => "closed",
        }
    }
}

impl fmt::Display for SyndicationRight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyndicationRight {
    type Err = OpenSearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(SyndicationRight::Open),
            "limited" => Ok(SyndicationRight::Limited),
            "private" => Ok(SyndicationRight::Private),
            "closed" => Ok(SyndicationRight::Closed),
            _ => Err(OpenSearchError::SchemaMismatch(format!(
                "unknown SyndicationRight '{}'",
                s
            ))),
        }
    }
}

impl Description {
    /// Iterate the individual tags of the space-separated tag set
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.split_whitespace()
    }

    /// First template declared for `media_type`, in declaration order
    pub fn template_by_type(&self, media_type: &str) -> Option<&str> {
        self.urls
            .iter()
            .find(|url| url.media_type == media_type)
            .map(|url| url.template.as_str())
    }

    /// Build the request URL for a search against the template of `media_type`.
    ///
    /// Relative templates must be resolved with [`Description::resolve_reference`]
    /// first, otherwise the filled template is not an absolute URL.
    ///
    /// # Errors
    ///
    /// - [`OpenSearchError::NoMatchingUrlType`] when no template has `media_type`.
    /// - [`OpenSearchError::InvalidRequestUrl`] when the filled template does not parse
    ///   as an absolute URL, which includes templates left relative.
    pub fn request(
        &self,
        media_type: &str,
        search_terms: &str,
        filters: &str,
        start_page: &str,
    ) -> Result<Url> {
        let params = TemplateParams {
            search_terms,
            filters,
            start_page,
        };
        self.request_with(media_type, &params)
    }

    pub fn request_with(&self, media_type: &str, params: &TemplateParams<'_>) -> Result<Url> {
        let template = self.template_by_type(media_type).ok_or_else(|| {
            OpenSearchError::NoMatchingUrlType {
                media_type: media_type.to_string(),
                description: Box::new(self.clone()),
            }
        })?;

        let filled = params.fill(template);
        tracing::debug!(media_type, url = %filled, "built request url");

        Url::parse(&filled).map_err(|source| OpenSearchError::InvalidRequestUrl {
            url: filled,
            source,
        })
    }
}
