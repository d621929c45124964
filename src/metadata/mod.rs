//! Keyed TOML assets shipped with the binary

pub mod field_help;

pub use field_help::FieldHelpStore;

use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Parse a TOML document whose top-level tables are entries keyed by name
pub fn parse_table<T: DeserializeOwned>(content: &str) -> Result<HashMap<String, T>, toml::de::Error> {
    toml::from_str(content)
}

/// Parse an embedded asset; a broken asset is logged and yields no entries
pub fn embedded_table<T: DeserializeOwned>(asset: &str, content: &str) -> HashMap<String, T> {
    parse_table(content).unwrap_or_else(|e| {
        tracing::warn!(asset, error = %e, "embedded asset did not parse");
        HashMap::new()
    })
}
