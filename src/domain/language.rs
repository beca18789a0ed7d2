// BCP-47 language tag stored in canonical case

use language_tags::LanguageTag;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::OpenSearchError;

/// A well-formed BCP-47 language tag, e.g. `en-US`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language(String);

impl Language {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Language {
    type Err = OpenSearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // `LanguageTag` normalizes subtag casing
        let tag = LanguageTag::parse(s.trim()).map_err(|e| OpenSearchError::InvalidLanguageTag {
            tag: s.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self(tag.as_str().to_string()))
    }
}

impl TryFrom<String> for Language {
    type Error = OpenSearchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
