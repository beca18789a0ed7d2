// Error handling for opensearch-description

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use crate::domain::Description;

/// Errors produced while decoding, resolving or building requests from a description
#[derive(Debug)]
pub enum OpenSearchError {
    /// Input is not well-formed XML
    MalformedXml(String),
    /// Well-formed XML that cannot be mapped onto a description
    SchemaMismatch(String),
    InvalidLanguageTag {
        tag: String,
        reason: String,
    },
    /// Base URI handed to reference resolution has no scheme
    MissingBaseScheme(String),
    InvalidBaseUrl {
        base: String,
        reason: String,
    },
    /// Template at `index` could not be parsed as a URI reference
    InvalidUrlTemplate {
        index: usize,
        template: String,
        reason: String,
    },
    /// No template is declared for the media type; carries the description for diagnostics
    NoMatchingUrlType {
        media_type: String,
        description: Box<Description>,
    },
    InvalidRequestUrl {
        url: String,
        source: url::ParseError,
    },
    Io(std::io::Error),
}

impl fmt::Display for OpenSearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenSearchError::MalformedXml(msg) => write!(f, "Malformed XML: {}", msg),
            OpenSearchError::SchemaMismatch(msg) => write!(f, "Schema mismatch: {}", msg),
            OpenSearchError::InvalidLanguageTag { tag, reason } => {
                write!(f, "Invalid language tag '{}': {}", tag, reason)
            }
            OpenSearchError::MissingBaseScheme(base) => {
                write!(f, "Base URI '{}' is missing a scheme", base)
            }
            OpenSearchError::InvalidBaseUrl { base, reason } => {
                write!(f, "Invalid base URI '{}': {}", base, reason)
            }
            OpenSearchError::InvalidUrlTemplate {
                index,
                template,
                reason,
            } => write!(
                f,
                "Invalid URL template #{} '{}': {}",
                index, template, reason
            ),
            OpenSearchError::NoMatchingUrlType {
                media_type,
                description,
            } => write!(
                f,
                "No URL template of type '{}' in description {:?}",
                media_type, description
            ),
            OpenSearchError::InvalidRequestUrl { url, source } => {
                write!(f, "Invalid request URL '{}': {}", url, source)
            }
            OpenSearchError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for OpenSearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OpenSearchError::InvalidRequestUrl { source, .. } => Some(source),
            OpenSearchError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<quick_xml::Error> for OpenSearchError {
    fn from(err: quick_xml::Error) -> Self {
        match err {
            quick_xml::Error::Io(io) => OpenSearchError::Io(std::io::Error::new(io.kind(), io.to_string())),
            other => OpenSearchError::MalformedXml(other.to_string()),
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for OpenSearchError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        OpenSearchError::MalformedXml(err.to_string())
    }
}

impl From<std::io::Error> for OpenSearchError {
    fn from(err: std::io::Error) -> Self {
        OpenSearchError::Io(err)
    }
}

/// Result type alias for description operations
pub type Result<T> = std::result::Result<T, OpenSearchError>;

// Implement IntoResponse so handlers can return description errors directly
impl IntoResponse for OpenSearchError {
    fn into_response(self) -> Response {
        let status = match &self {
            OpenSearchError::NoMatchingUrlType { .. } => StatusCode::NOT_FOUND,
            OpenSearchError::InvalidRequestUrl { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // The description dump is for logs, not for clients
        let message = match &self {
            OpenSearchError::NoMatchingUrlType { media_type, .. } => {
                format!("No URL template of type '{}'", media_type)
            }
            other => other.to_string(),
        };

        tracing::debug!(status = %status, error = %self, "request failed");
        (status, message).into_response()
    }
}
