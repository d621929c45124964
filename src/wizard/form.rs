use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shopify::ThemeCategory;

/// Checkout page language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutLanguage {
    #[default]
    En,
    Fr,
}

impl CheckoutLanguage {
    pub const ALL: [CheckoutLanguage; 2] = [Self::En, Self::Fr];

    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Fr => "French",
        }
    }

    pub fn cycle(self, delta: i32) -> Self {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0) as i32;
        let len = Self::ALL.len() as i32;
        Self::ALL[(idx + delta).rem_euclid(len) as usize]
    }
}

impl fmt::Display for CheckoutLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Every field the wizard collects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    StoreName,
    SubDomain,
    ShopifyStoreName,
    ShopifyStoreEmail,
    ShopifyStoreMobile,
    StoreAccessToken,
    HydrogenTemplateStatus,
    TemplateCustomizer,
    ThemeCategory,
    AffiliateId,
    CheckoutLanguage,
}

impl Field {
    /// Form key, as sent to the backend
    pub fn key(&self) -> &'static str {
        match self {
            Self::StoreName => "storeName",
            Self::SubDomain => "subDomain",
            Self::ShopifyStoreName => "shopifyStoreName",
            Self::ShopifyStoreEmail => "shopifyStoreEmail",
            Self::ShopifyStoreMobile => "shopifyStoreMobile",
            Self::StoreAccessToken => "storeAccessToken",
            Self::HydrogenTemplateStatus => "hydrogenTemplateStatus",
            Self::TemplateCustomizer => "templateCustomizer",
            Self::ThemeCategory => "themeCategory",
            Self::AffiliateId => "affiliateId",
            Self::CheckoutLanguage => "checkoutLanguage",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::StoreName => "Store Name",
            Self::SubDomain => "Sub Domain",
            Self::ShopifyStoreName => "Shopify Store Name",
            Self::ShopifyStoreEmail => "Shopify Store Email",
            Self::ShopifyStoreMobile => "Shopify Store Mobile",
            Self::StoreAccessToken => "Store Access Token",
            Self::HydrogenTemplateStatus => "Hydrogen Template",
            Self::TemplateCustomizer => "Template Customizer",
            Self::ThemeCategory => "Theme Category",
            Self::AffiliateId => "Affiliate ID",
            Self::CheckoutLanguage => "Checkout Language",
        }
    }

    /// Example input shown in an empty text box
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::StoreName => "My Awesome Store",
            Self::SubDomain => "mystore",
            Self::ShopifyStoreName => "My Shopify Store",
            Self::ShopifyStoreEmail => "admin@mystore.com",
            Self::ShopifyStoreMobile => "+1 (555) 123-4567",
            Self::StoreAccessToken => "shpat_...",
            Self::AffiliateId => "Enter your affiliate ID",
            _ => "",
        }
    }

    /// Message shown when a required field is left empty
    pub fn required_message(&self) -> &'static str {
        match self {
            Self::StoreName => "Store name is required",
            Self::SubDomain => "Sub Domain is required",
            Self::ShopifyStoreName => "Shopify Store name is required",
            Self::ShopifyStoreEmail => "Please enter a valid Shopify email address",
            Self::ShopifyStoreMobile => "Please enter a valid Shopify Mobile Number",
            Self::StoreAccessToken => "Shopify Store Access Token is required",
            Self::AffiliateId => "Affiliate ID is required",
            _ => "This field is required",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// All values entered for one store-creation request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    // Store basics
    pub store_name: String,
    pub sub_domain: String,
    pub shopify_store_name: String,
    pub shopify_store_email: String,
    pub shopify_store_mobile: String,
    pub hydrogen_template_status: bool,
    pub template_customizer: bool,

    // Store configuration
    pub store_access_token: String,
    pub theme_category: ThemeCategory,

    // Checkout configuration
    pub affiliate_id: String,
    pub checkout_language: CheckoutLanguage,
}

impl FormState {
    /// Text value of a field, `None` for toggles and choices
    pub fn text(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::StoreName => &self.store_name,
            Field::SubDomain => &self.sub_domain,
            Field::ShopifyStoreName => &self.shopify_store_name,
            Field::ShopifyStoreEmail => &self.shopify_store_email,
            Field::ShopifyStoreMobile => &self.shopify_store_mobile,
            Field::StoreAccessToken => &self.store_access_token,
            Field::AffiliateId => &self.affiliate_id,
            _ => return None,
        };
        Some(value.as_str())
    }

    pub fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        let value = match field {
            Field::StoreName => &mut self.store_name,
            Field::SubDomain => &mut self.sub_domain,
            Field::ShopifyStoreName => &mut self.shopify_store_name,
            Field::ShopifyStoreEmail => &mut self.shopify_store_email,
            Field::ShopifyStoreMobile => &mut self.shopify_store_mobile,
            Field::StoreAccessToken => &mut self.store_access_token,
            Field::AffiliateId => &mut self.affiliate_id,
            _ => return None,
        };
        Some(value)
    }

    pub fn flag(&self, field: Field) -> Option<bool> {
        match field {
            Field::HydrogenTemplateStatus => Some(self.hydrogen_template_status),
            Field::TemplateCustomizer => Some(self.template_customizer),
            _ => None,
        }
    }

    pub fn flag_mut(&mut self, field: Field) -> Option<&mut bool> {
        match field {
            Field::HydrogenTemplateStatus => Some(&mut self.hydrogen_template_status),
            Field::TemplateCustomizer => Some(&mut self.template_customizer),
            _ => None,
        }
    }

    /// Whether a text field is empty; whitespace is a value
    pub fn is_blank(&self, field: Field) -> bool {
        match self.text(field) {
            Some(text) => text.is_empty(),
            None => false,
        }
    }

    /// Human-readable value for summaries
    pub fn display_value(&self, field: Field) -> String {
        match field {
            Field::HydrogenTemplateStatus | Field::TemplateCustomizer => {
                let on = self.flag(field).unwrap_or(false);
                let text = if on { "TRUE" } else { "FALSE" };
                text.to_string()
            }
            Field::ThemeCategory => self.theme_category.label().to_string(),
            Field::CheckoutLanguage => self.checkout_language.label().to_string(),
            _ => self.text(field).unwrap_or_default().to_string(),
        }
    }

    /// Checkout redirect the storefront will use
    pub fn checkout_url(&self) -> String {
        format!(
            "https://client-checkout.com?affiliate_id={}&lang={}",
            self.affiliate_id, self.checkout_language
        )
    }
}
