//! Value table reader configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::FrontendError;

/// Options for [`read_value_table`](crate::read_value_table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReaderOptions {
    /// Property names rewritten before they become path segments.
    #[serde(default = "default_key_aliases")]
    pub key_aliases: BTreeMap<String, String>,

    /// Path segment used for properties without a name.
    #[serde(default = "default_unnamed_key")]
    pub unnamed_key: String,
}

fn default_key_aliases() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("testSettings".to_string(), "test-settings".to_string()),
        (
            "testDependencies".to_string(),
            "test-dependencies".to_string(),
        ),
    ])
}

fn default_unnamed_key() -> String {
    "[unnamed]".to_string()
}

impl ReaderOptions {
    pub fn new() -> Self {
        Self {
            key_aliases: default_key_aliases(),
            unnamed_key: default_unnamed_key(),
        }
    }

    /// Parses options from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, FrontendError> {
        let options: Self = serde_json::from_str(json)
            .map_err(|e| FrontendError::config(format!("Invalid reader options: {}", e)))?;
        if options.unnamed_key.is_empty() {
            return Err(FrontendError::config("unnamedKey must not be empty"));
        }
        Ok(options)
    }

    /// Path segment for a property named `name`.
    pub fn segment_for<'a>(&'a self, name: Option<&'a str>) -> &'a str {
        match name {
            Some(name) => self.key_aliases.get(name).map_or(name, String::as_str),
            None => &self.unnamed_key,
        }
    }
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self::new()
    }
}
