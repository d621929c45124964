//! Shopify backend
//!
//! Contracts for the store-provisioning calls and a mock implementation
//! that returns fabricated data after a fixed delay.

pub mod templates;

pub use templates::{store_handle, template_for, HydrogenTemplate, TemplateCatalog, ThemeCategory};

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use crate::wizard::{CheckoutLanguage, FormState};

/// Errors returned by backend calls
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The request failed; the message is shown to the user as-is
    #[error("{0}")]
    Request(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryDomain {
    pub url: String,
    pub host: String,
}

/// A newly created Shopify store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopifyStore {
    pub id: String,
    pub name: String,
    pub url: String,
    pub myshopify_domain: String,
    pub primary_domain: PrimaryDomain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub title: String,
    pub handle: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Draft,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub status: ProductStatus,
    pub variants: Vec<ProductVariant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRedirect {
    pub success: bool,
    pub checkout_url: String,
}

/// Theme branding applied after the template is customized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub typography: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            primary_color: "#1f2937".to_string(),
            secondary_color: "#f3f4f6".to_string(),
            accent_color: "#2563eb".to_string(),
            typography: "Inter".to_string(),
            logo_url: None,
            banner_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateCustomization {
    pub success: bool,
    pub template_id: String,
    pub template_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePreview {
    pub preview_url: String,
    pub preview_image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub success: bool,
    pub deployment_url: String,
}

/// The store-creation call the wizard submits to
pub trait StoreBackend: Send + Sync {
    fn create_store(
        &self,
        form: &FormState,
    ) -> impl Future<Output = Result<ShopifyStore, ApiError>> + Send;
}

/// Calls that seed a created store with a template, catalog and checkout
pub trait ProvisioningBackend: StoreBackend {
    fn customize_template(
        &self,
        form: &FormState,
    ) -> impl Future<Output = Result<TemplateCustomization, ApiError>> + Send;

    fn create_collections(
        &self,
        store_url: &str,
        category: ThemeCategory,
    ) -> impl Future<Output = Result<Vec<Collection>, ApiError>> + Send;

    fn import_products(
        &self,
        store_url: &str,
        category: ThemeCategory,
    ) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;

    fn configure_custom_checkout(
        &self,
        store_url: &str,
        affiliate_id: &str,
        language: CheckoutLanguage,
    ) -> impl Future<Output = Result<CheckoutRedirect, ApiError>> + Send;

    fn apply_branding(
        &self,
        store_url: &str,
        branding: &Branding,
    ) -> impl Future<Output = Result<bool, ApiError>> + Send;

    fn generate_template_preview(
        &self,
        form: &FormState,
    ) -> impl Future<Output = Result<TemplatePreview, ApiError>> + Send;

    fn deploy_template(
        &self,
        form: &FormState,
    ) -> impl Future<Output = Result<Deployment, ApiError>> + Send;
}

// Simulated latency per call, in milliseconds
const CREATE_STORE_MS: u64 = 1000;
const CUSTOMIZE_TEMPLATE_MS: u64 = 1500;
const CREATE_COLLECTIONS_MS: u64 = 800;
const IMPORT_PRODUCTS_MS: u64 = 1500;
const CONFIGURE_CHECKOUT_MS: u64 = 600;
const APPLY_BRANDING_MS: u64 = 1200;
const PREVIEW_MS: u64 = 800;
const DEPLOY_MS: u64 = 2000;

const PRODUCTS_PER_IMPORT: usize = 5;

/// Mock backend: every call succeeds after a fixed delay
#[derive(Debug, Clone)]
pub struct MockShopify {
    latency_scale: f64,
}

impl Default for MockShopify {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl MockShopify {
    /// `latency_scale` multiplies every simulated delay; 0 disables waiting
    pub fn new(latency_scale: f64) -> Self {
        Self {
            latency_scale: latency_scale.max(0.0),
        }
    }

    async fn pause(&self, base_ms: u64) {
        if self.latency_scale <= 0.0 {
            return;
        }
        let ms = (base_ms as f64 * self.latency_scale).round() as u64;
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

fn gid(kind: &str) -> String {
    let n: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("gid://shopify/{}/{}", kind, n)
}

/// Collections seeded for a theme category, as (title, handle)
pub fn collections_for(category: ThemeCategory) -> &'static [(&'static str, &'static str)] {
    match category {
        ThemeCategory::Baby => &[
            ("Baby Clothing", "baby-clothing"),
            ("Baby Toys", "baby-toys"),
            ("Baby Gear", "baby-gear"),
            ("Nursery", "nursery"),
        ],
        ThemeCategory::Diy => &[
            ("Craft Supplies", "craft-supplies"),
            ("Tools", "tools"),
            ("DIY Kits", "diy-kits"),
            ("Home Projects", "home-projects"),
        ],
        ThemeCategory::Automotive => &[
            ("Car Parts", "car-parts"),
            ("Car Accessories", "car-accessories"),
            ("Tools & Equipment", "tools-equipment"),
            ("Car Care", "car-care"),
        ],
        ThemeCategory::Animals => &[
            ("Pet Food", "pet-food"),
            ("Pet Toys", "pet-toys"),
            ("Pet Accessories", "pet-accessories"),
            ("Pet Health", "pet-health"),
        ],
        ThemeCategory::Decor => &[
            ("Living Room", "living-room"),
            ("Bedroom", "bedroom"),
            ("Kitchen & Dining", "kitchen-dining"),
            ("Wall Decor", "wall-decor"),
        ],
        ThemeCategory::Default => &[
            ("New Arrivals", "new-arrivals"),
            ("Featured Products", "featured-products"),
            ("Best Sellers", "best-sellers"),
        ],
    }
}

/// Product title prefix and handle prefix for a theme category
fn product_naming(category: ThemeCategory) -> (&'static str, &'static str) {
    match category {
        ThemeCategory::Baby => ("Baby Product", "baby-product"),
        ThemeCategory::Diy => ("DIY Kit", "diy-kit"),
        ThemeCategory::Automotive => ("Car Accessory", "car-accessory"),
        ThemeCategory::Animals => ("Pet Item", "pet-item"),
        ThemeCategory::Decor => ("Home Decor", "home-decor"),
        ThemeCategory::Default => ("Product", "product"),
    }
}

fn mock_products(category: ThemeCategory) -> Vec<Product> {
    let (title, handle) = product_naming(category);
    let mut rng = rand::thread_rng();

    (1..=PRODUCTS_PER_IMPORT)
        .map(|i| {
            let price: f64 = rng.gen_range(10.0..110.0);
            Product {
                id: gid("Product"),
                title: format!("{} {}", title, i),
                handle: format!("{}-{}", handle, i),
                status: ProductStatus::Active,
                variants: vec![ProductVariant {
                    id: gid("ProductVariant"),
                    price: format!("{:.2}", price),
                }],
            }
        })
        .collect()
}

impl StoreBackend for MockShopify {
    async fn create_store(&self, form: &FormState) -> Result<ShopifyStore, ApiError> {
        self.pause(CREATE_STORE_MS).await;

        let handle = store_handle(&form.store_name);
        let domain = format!("{}.myshopify.com", handle);
        let url = format!("https://{}", domain);

        tracing::info!(store = %form.store_name, %url, "mock store created");

        Ok(ShopifyStore {
            id: gid("Shop"),
            name: form.store_name.clone(),
            url: url.clone(),
            myshopify_domain: domain.clone(),
            primary_domain: PrimaryDomain { url, host: domain },
        })
    }
}

impl ProvisioningBackend for MockShopify {
    async fn customize_template(&self, form: &FormState) -> Result<TemplateCustomization, ApiError> {
        self.pause(CUSTOMIZE_TEMPLATE_MS).await;
        let template = template_for(form.theme_category);
        Ok(TemplateCustomization {
            success: true,
            template_id: template.id,
            template_name: template.name,
        })
    }

    async fn create_collections(
        &self,
        store_url: &str,
        category: ThemeCategory,
    ) -> Result<Vec<Collection>, ApiError> {
        self.pause(CREATE_COLLECTIONS_MS).await;
        tracing::debug!(store_url, %category, "creating collections");
        Ok(collections_for(category)
            .iter()
            .map(|(title, handle)| Collection {
                id: gid("Collection"),
                title: title.to_string(),
                handle: handle.to_string(),
            })
            .collect())
    }

    async fn import_products(
        &self,
        store_url: &str,
        category: ThemeCategory,
    ) -> Result<Vec<Product>, ApiError> {
        self.pause(IMPORT_PRODUCTS_MS).await;
        tracing::debug!(store_url, %category, "importing products");
        Ok(mock_products(category))
    }

    async fn configure_custom_checkout(
        &self,
        store_url: &str,
        affiliate_id: &str,
        language: CheckoutLanguage,
    ) -> Result<CheckoutRedirect, ApiError> {
        self.pause(CONFIGURE_CHECKOUT_MS).await;
        tracing::debug!(store_url, affiliate_id, %language, "configuring checkout redirect");
        Ok(CheckoutRedirect {
            success: true,
            checkout_url: format!(
                "https://client-checkout.com?affiliate_id={}&lang={}",
                affiliate_id, language
            ),
        })
    }

    async fn apply_branding(&self, store_url: &str, branding: &Branding) -> Result<bool, ApiError> {
        self.pause(APPLY_BRANDING_MS).await;
        tracing::debug!(store_url, primary = %branding.primary_color, "applying branding");
        Ok(true)
    }

    async fn generate_template_preview(&self, form: &FormState) -> Result<TemplatePreview, ApiError> {
        self.pause(PREVIEW_MS).await;
        let template = template_for(form.theme_category);
        let handle = store_handle(&form.store_name);
        Ok(TemplatePreview {
            preview_url: format!("https://preview.hydrogen.shopify.dev/{}/{}", template.id, handle),
            preview_image: format!("/images/templates/{}-preview.jpg", template.id),
        })
    }

    async fn deploy_template(&self, form: &FormState) -> Result<Deployment, ApiError> {
        self.pause(DEPLOY_MS).await;
        let handle = store_handle(&form.store_name);
        Ok(Deployment {
            success: true,
            deployment_url: format!("https://{}.myshopify.io", handle),
        })
    }
}
