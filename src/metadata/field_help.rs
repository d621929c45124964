//! Field Help Text
//!
//! Loads contextual help for the wizard's fields from embedded assets
//! and user overrides.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use super::{embedded_table, parse_table};

/// Help text entry for a form field
#[derive(Debug, Clone, Deserialize)]
pub struct FieldHelpEntry {
    /// Title for the help panel
    pub title: String,
    /// Description text
    pub description: String,
}

/// Store for field help text
#[derive(Debug, Clone, Default)]
pub struct FieldHelpStore {
    entries: HashMap<String, FieldHelpEntry>,
}

impl FieldHelpStore {
    /// Load help text from embedded assets
    pub fn load_embedded() -> Self {
        Self {
            entries: embedded_table("field_help.toml", include_str!("../../assets/field_help.toml")),
        }
    }

    /// Merge user overrides from a file; a missing file is not an error
    pub fn load_user_overrides(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }

        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| parse_table::<FieldHelpEntry>(&content).map_err(|e| e.to_string()));

        match parsed {
            Ok(entries) => {
                tracing::debug!(path = %path.display(), count = entries.len(), "loaded field help overrides");
                self.entries.extend(entries);
            }
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "ignoring field help overrides"),
        }
    }

    /// Get help text or return default values
    pub fn get_or_default(&self, key: &str) -> (&str, &str) {
        self.entries
            .get(key)
            .map(|e| (e.title.as_str(), e.description.as_str()))
            .or_else(|| {
                self.entries
                    .get("default")
                    .map(|e| (e.title.as_str(), e.description.as_str()))
            })
            .unwrap_or(("Store Creator", "Select a field to see what it is used for."))
    }
}
