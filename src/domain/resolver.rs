// Reference resolution of relative URL templates against a base URI

use url::{ParseError, Url};

use super::{Description, UrlTemplate};
use crate::error::{OpenSearchError, Result};

const MARKER_PREFIX: &str = "osdtoken";

impl Description {
    /// Rewrite every relative URL template into an absolute one using `base`.
    ///
    /// Templates that already have a scheme are left byte-identical. Either all
    /// templates are rewritten or, on error, none are.
    pub fn resolve_reference(&mut self, base: &str) -> Result<()> {
        let base_url = parse_base(base)?;
        let resolved = resolve_templates(&base_url, &self.urls)?;
        self.urls = resolved;
        tracing::debug!(base = %base_url, templates = self.urls.len(), "resolved url templates");
        Ok(())
    }

    /// Resolved copy of this description; `self` stays untouched
    pub fn resolved(&self, base: &str) -> Result<Description> {
        let mut copy = self.clone();
        copy.resolve_reference(base)?;
        Ok(copy)
    }
}

fn parse_base(base: &str) -> Result<Url> {
    match Url::parse(base) {
        Ok(url) if url.cannot_be_a_base() => Err(OpenSearchError::InvalidBaseUrl {
            base: base.to_string(),
            reason: "URI cannot be used as a base".to_string(),
        }),
        Ok(url) => Ok(url),
        Err(ParseError::RelativeUrlWithoutBase) => {
            Err(OpenSearchError::MissingBaseScheme(base.to_string()))
        }
        Err(e) => Err(OpenSearchError::InvalidBaseUrl {
            base: base.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Resolve into a working copy so a failure leaves the caller's list intact
fn resolve_templates(base: &Url, urls: &[UrlTemplate]) -> Result<Vec<UrlTemplate>> {
    urls.iter()
        .enumerate()
        .map(|(index, url)| {
            let template = resolve_template(base, &url.template).map_err(|reason| {
                OpenSearchError::InvalidUrlTemplate {
                    index,
                    template: url.template.clone(),
                    reason,
                }
            })?;
            Ok(UrlTemplate {
                media_type: url.media_type.clone(),
                template,
            })
        })
        .collect()
}

fn resolve_template(base: &Url, template: &str) -> std::result::Result<String, String> {
    check_characters(template)?;

    let masked = MaskedTemplate::new(template);
    match Url::parse(&masked.text) {
        // Already absolute
        Ok(_) => Ok(template.to_string()),
        Err(ParseError::RelativeUrlWithoutBase) => {
            let joined = base.join(&masked.text).map_err(|e| e.to_string())?;
            Ok(masked.restore(joined.as_str()))
        }
        Err(e) => Err(e.to_string()),
    }
}

/// Reject control characters and malformed percent-escapes
fn check_characters(template: &str) -> std::result::Result<(), String> {
    if let Some(c) = template.chars().find(|c| c.is_ascii_control()) {
        return Err(format!("control character {:?} in template", c));
    }

    let bytes = template.as_bytes();
    for (i, _) in template.match_indices('%') {
        let valid = bytes
            .get(i + 1..i + 3)
            .map(|hex| hex.iter().all(u8::is_ascii_hexdigit))
            .unwrap_or(false);
        if !valid {
            return Err(format!("invalid percent-escape at byte {}", i));
        }
    }
    Ok(())
}

/// Template with every `{...}` token swapped for an inert alphanumeric marker.
/// Braces are not valid URI characters and would otherwise be percent-encoded.
struct MaskedTemplate {
    text: String,
    tokens: Vec<(String, String)>,
}

impl MaskedTemplate {
    fn new(template: &str) -> Self {
        let mut prefix = MARKER_PREFIX.to_string();
        let lower = template.to_ascii_lowercase();
        while lower.contains(&prefix) {
            prefix.push('x');
        }

        let mut text = String::with_capacity(template.len());
        let mut tokens = Vec::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            let Some(len) = rest[open..].find('}') else {
                break;
            };
            let token = &rest[open..open + len + 1];
            let marker = format!("{}{}_", prefix, tokens.len());
            text.push_str(&rest[..open]);
            text.push_str(&marker);
            tokens.push((marker, token.to_string()));
            rest = &rest[open + len + 1..];
        }
        text.push_str(rest);

        Self { text, tokens }
    }

    fn restore(&self, resolved: &str) -> String {
        self.tokens
            .iter()
            .fold(resolved.to_string(), |acc, (marker, token)| {
                acc.replacen(marker.as_str(), token, 1)
            })
    }
}
