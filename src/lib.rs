//! store-creator: provision mock Shopify Hydrogen storefronts from a
//! terminal wizard.

pub mod app;
pub mod config;
pub mod logging;
pub mod metadata;
pub mod provision;
pub mod shopify;
pub mod ui;
pub mod wizard;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
