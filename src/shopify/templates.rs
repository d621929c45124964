//! Hydrogen Templates
//!
//! Template catalog keyed by theme category, loaded from embedded assets.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::metadata::embedded_table;

/// Storefront theme category, used to pick a template and seed data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeCategory {
    Baby,
    Diy,
    Automotive,
    Animals,
    Decor,
    #[default]
    Default,
}

impl ThemeCategory {
    pub const ALL: [ThemeCategory; 6] = [
        Self::Baby,
        Self::Diy,
        Self::Automotive,
        Self::Animals,
        Self::Decor,
        Self::Default,
    ];

    /// Key used in the template catalog and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Baby => "baby",
            Self::Diy => "diy",
            Self::Automotive => "automotive",
            Self::Animals => "animals",
            Self::Decor => "decor",
            Self::Default => "default",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Baby => "Baby",
            Self::Diy => "DIY & Crafts",
            Self::Automotive => "Automotive",
            Self::Animals => "Pets & Animals",
            Self::Decor => "Home Decor",
            Self::Default => "Standard",
        }
    }

    /// Step through the categories, wrapping at either end
    pub fn cycle(self, delta: i32) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0) as i32;
        let len = Self::ALL.len() as i32;
        Self::ALL[(idx + delta).rem_euclid(len) as usize]
    }
}

impl fmt::Display for ThemeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Hydrogen storefront template
#[derive(Debug, Clone, Deserialize)]
pub struct HydrogenTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
}

impl HydrogenTemplate {
    fn standard() -> Self {
        Self {
            id: "default-template".to_string(),
            name: "Standard Store Template".to_string(),
            description: "A versatile template suitable for any type of store.".to_string(),
            features: Vec::new(),
        }
    }
}

/// Store for the template catalog
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: HashMap<String, HydrogenTemplate>,
}

static CATALOG: Lazy<TemplateCatalog> = Lazy::new(TemplateCatalog::load_embedded);

impl TemplateCatalog {
    /// Load templates from embedded assets
    pub fn load_embedded() -> Self {
        Self {
            templates: embedded_table("templates.toml", include_str!("../../assets/templates.toml")),
        }
    }

    /// Shared catalog built from the embedded assets
    pub fn global() -> &'static TemplateCatalog {
        &CATALOG
    }

    /// Template for a category, falling back to the default template
    pub fn get(&self, category: ThemeCategory) -> HydrogenTemplate {
        self.templates
            .get(category.as_str())
            .or_else(|| self.templates.get(ThemeCategory::Default.as_str()))
            .cloned()
            .unwrap_or_else(HydrogenTemplate::standard)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }
}

/// Template for a theme category from the shared catalog
pub fn template_for(category: ThemeCategory) -> HydrogenTemplate {
    TemplateCatalog::global().get(category)
}

/// URL-safe store handle: lowercase, whitespace runs replaced by `-`
pub fn store_handle(store_name: &str) -> String {
    store_name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
