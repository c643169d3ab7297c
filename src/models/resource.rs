//! Learning resource records.

#![allow(clippy::missing_const_for_fn)]

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::wire;

/// Kind of learning artifact. The remote schema accepts exactly these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// Research paper.
    Paper,
    /// Blog post.
    Blog,
    /// Reference documentation.
    Documentation,
    /// Anything else.
    Other,
}

impl ResourceType {
    /// Wire name of the variant.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paper => "paper",
            Self::Blog => "blog",
            Self::Documentation => "documentation",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the four resource kinds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown resource type: {0} (expected paper, blog, documentation or other)")]
pub struct ParseResourceTypeError(pub String);

impl FromStr for ResourceType {
    type Err = ParseResourceTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "paper" => Ok(Self::Paper),
            "blog" => Ok(Self::Blog),
            "documentation" => Ok(Self::Documentation),
            "other" => Ok(Self::Other),
            _ => Err(ParseResourceTypeError(s.to_string())),
        }
    }
}

/// Insert payload for `learning_resources`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewResource {
    /// Title (required).
    pub title: String,
    /// Where the resource lives.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Extracted or pasted text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_text: Option<String>,
    /// Resource kind (required).
    pub resource_type: ResourceType,
    /// Free-text tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl NewResource {
    /// Create a payload with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, resource_type: ResourceType) -> Self {
        Self {
            title: title.into(),
            source_url: None,
            content_text: None,
            resource_type,
            tags: None,
        }
    }

    /// Set the source URL.
    #[must_use]
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Set the content text.
    #[must_use]
    pub fn with_content_text(mut self, text: impl Into<String>) -> Self {
        self.content_text = Some(text.into());
        self
    }

    /// Set the tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}

/// A stored learning resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Server-assigned identifier (text or integer column).
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    /// Title.
    pub title: String,
    /// Where the resource lives.
    #[serde(default)]
    pub source_url: Option<String>,
    /// Extracted or pasted text.
    #[serde(default)]
    pub content_text: Option<String>,
    /// Resource kind.
    pub resource_type: ResourceType,
    /// Free-text tags.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Server-assigned creation time.
    #[serde(deserialize_with = "wire::timestamp")]
    pub added_at: DateTime<Utc>,
}

impl Resource {
    /// Returns true if the resource carries `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags
            .as_ref()
            .is_some_and(|tags| tags.iter().any(|t| t == tag))
    }

    /// Returns true if every non-server field equals the submitted payload.
    #[must_use]
    pub fn matches(&self, submitted: &NewResource) -> bool {
        self.title == submitted.title
            && self.source_url == submitted.source_url
            && self.content_text == submitted.content_text
            && self.resource_type == submitted.resource_type
            && self.tags == submitted.tags
    }
}
