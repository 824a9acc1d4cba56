//! File content type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Content type of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "file_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Rendered by the rich-text markdown editor.
    Markdown,
    /// Edited as plain text.
    Text,
}

impl FileType {
    /// Lenient conversion used for incoming requests: anything that is not
    /// exactly `"markdown"` is treated as plain text.
    pub fn from_request(value: &str) -> Self {
        if value == "markdown" {
            Self::Markdown
        } else {
            Self::Text
        }
    }

    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
