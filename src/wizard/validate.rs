//! Field-level validation rules, evaluated generically from the schema

use once_cell::sync::Lazy;
use regex::Regex;

use super::form::FormState;
use super::schema::{FieldKind, FieldSpec};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

static SUBDOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$").expect("subdomain pattern is valid")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9 ()\-]+$").expect("phone pattern is valid"));

const MIN_PHONE_DIGITS: usize = 7;

/// Check one field against its rule; returns the error to display, if any
pub fn check_field(spec: &FieldSpec, form: &FormState) -> Option<String> {
    let Some(value) = form.text(spec.field) else {
        // Toggles and choices always hold a valid value
        return None;
    };
    if value.is_empty() {
        return spec.required.then(|| spec.field.required_message().to_string());
    }

    match spec.kind {
        FieldKind::Email if !EMAIL_RE.is_match(value) => {
            Some("Please enter a valid Shopify email address".to_string())
        }
        FieldKind::Subdomain if !SUBDOMAIN_RE.is_match(value) => {
            Some("Use lowercase letters, digits and hyphens only".to_string())
        }
        FieldKind::Phone if !is_phone_number(value) => {
            Some("Please enter a valid Shopify Mobile Number".to_string())
        }
        _ => None,
    }
}

fn is_phone_number(value: &str) -> bool {
    PHONE_RE.is_match(value) && value.chars().filter(|c| c.is_ascii_digit()).count() >= MIN_PHONE_DIGITS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::form::Field;
    use crate::wizard::schema::field_spec;

    fn check(field: Field, value: &str) -> Option<String> {
        let mut form = FormState::default();
        if let Some(text) = form.text_mut(field) {
            *text = value.to_string();
        }
        let spec = field_spec(field).unwrap();
        check_field(&spec, &form)
    }

    #[test]
    fn test_required_messages() {
        assert_eq!(check(Field::StoreName, "").as_deref(), Some("Store name is required"));
        assert_eq!(check(Field::AffiliateId, "").as_deref(), Some("Affiliate ID is required"));
        assert_eq!(check(Field::StoreName, "Shop"), None);
    }

    #[test]
    fn test_whitespace_satisfies_required() {
        assert_eq!(check(Field::StoreName, "   "), None);
        assert_eq!(check(Field::AffiliateId, " "), None);
        // Formatted fields still apply their rule
        assert!(check(Field::ShopifyStoreEmail, "   ").is_some());
    }

    #[test]
    fn test_email_rule() {
        assert!(check(Field::ShopifyStoreEmail, "admin@mystore.com").is_none());
        assert!(check(Field::ShopifyStoreEmail, "admin@mystore").is_some());
        assert!(check(Field::ShopifyStoreEmail, "not an email").is_some());
    }

    #[test]
    fn test_subdomain_rule() {
        assert!(check(Field::SubDomain, "my-store2").is_none());
        assert!(check(Field::SubDomain, "My Store").is_some());
        assert!(check(Field::SubDomain, "-store").is_some());
        assert!(check(Field::SubDomain, "store-").is_some());
    }

    #[test]
    fn test_phone_rule() {
        assert!(check(Field::ShopifyStoreMobile, "+1 (555) 123-4567").is_none());
        assert!(check(Field::ShopifyStoreMobile, "12345").is_some());
        assert!(check(Field::ShopifyStoreMobile, "call me").is_some());
    }

    #[test]
    fn test_toggles_always_pass() {
        let spec = field_spec(Field::HydrogenTemplateStatus).unwrap();
        assert!(check_field(&spec, &FormState::default()).is_none());
    }
}
