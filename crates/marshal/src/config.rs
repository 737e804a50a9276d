//! Marshalling configuration

use serde::{Deserialize, Serialize};

/// How keys of schema-less records are normalized on read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCase {
    /// Lowercase the first character (`Name` becomes `name`)
    #[default]
    CamelCase,
    /// Keep keys exactly as received
    Preserve,
}

impl KeyCase {
    /// Apply the normalization to one key
    pub fn apply(&self, key: &str) -> String {
        match self {
            KeyCase::Preserve => key.to_string(),
            KeyCase::CamelCase => {
                let mut chars = key.chars();
                match chars.next() {
                    Some(first) => first.to_lowercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

/// Marshalling options
///
/// ```
/// use strata_client_marshal::{KeyCase, MarshalConfig};
///
/// let config: MarshalConfig = serde_json::from_str(r#"{"strict": true}"#).unwrap();
/// assert!(config.strict);
/// assert_eq!(config.dynamic_key_case, KeyCase::CamelCase);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarshalConfig {
    /// Fail on the first field that cannot be converted instead of skipping it
    pub strict: bool,
    /// Key normalization for schema-less records
    pub dynamic_key_case: KeyCase,
}

impl MarshalConfig {
    /// Lenient configuration (the default)
    pub fn lenient() -> Self {
        Self::default()
    }

    /// Strict configuration
    pub fn strict() -> Self {
        MarshalConfig {
            strict: true,
            ..Self::default()
        }
    }
}
