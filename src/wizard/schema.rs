//! Step definitions and the per-step field table

use super::form::Field;

/// How a field is edited and which format rule applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Subdomain,
    Phone,
    /// Text that is masked on screen
    Secret,
    Toggle,
    Choice,
}

impl FieldKind {
    pub fn is_text(&self) -> bool {
        !matches!(self, Self::Toggle | Self::Choice)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    pub required: bool,
    pub kind: FieldKind,
}

const fn required(field: Field, kind: FieldKind) -> FieldSpec {
    FieldSpec { field, required: true, kind }
}

const fn optional(field: Field, kind: FieldKind) -> FieldSpec {
    FieldSpec { field, required: false, kind }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepId {
    Basics,
    Configuration,
    Checkout,
    Review,
}

#[derive(Debug, Clone, Copy)]
pub struct StepDefinition {
    pub id: StepId,
    pub key: &'static str,
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl StepDefinition {
    /// 1-based step number for display
    pub fn number(&self) -> usize {
        STEPS.iter().position(|s| s.id == self.id).unwrap_or(0) + 1
    }
}

const BASICS_FIELDS: &[FieldSpec] = &[
    required(Field::StoreName, FieldKind::Text),
    required(Field::SubDomain, FieldKind::Subdomain),
    required(Field::ShopifyStoreName, FieldKind::Text),
    required(Field::ShopifyStoreEmail, FieldKind::Email),
    required(Field::ShopifyStoreMobile, FieldKind::Phone),
];

const CONFIGURATION_FIELDS: &[FieldSpec] = &[
    required(Field::StoreAccessToken, FieldKind::Secret),
    optional(Field::HydrogenTemplateStatus, FieldKind::Toggle),
    optional(Field::TemplateCustomizer, FieldKind::Toggle),
    optional(Field::ThemeCategory, FieldKind::Choice),
];

const CHECKOUT_FIELDS: &[FieldSpec] = &[
    required(Field::AffiliateId, FieldKind::Text),
    required(Field::CheckoutLanguage, FieldKind::Choice),
];

/// The wizard's steps, in order
pub const STEPS: [StepDefinition; 4] = [
    StepDefinition {
        id: StepId::Basics,
        key: "basics",
        name: "Store Basics",
        fields: BASICS_FIELDS,
    },
    StepDefinition {
        id: StepId::Configuration,
        key: "configuration",
        name: "Store Configuration",
        fields: CONFIGURATION_FIELDS,
    },
    StepDefinition {
        id: StepId::Checkout,
        key: "checkout",
        name: "Checkout Configuration",
        fields: CHECKOUT_FIELDS,
    },
    StepDefinition {
        id: StepId::Review,
        key: "review",
        name: "Review & Submit",
        fields: &[],
    },
];

pub const STEP_COUNT: usize = STEPS.len();

pub fn step(index: usize) -> Option<&'static StepDefinition> {
    STEPS.get(index)
}

/// Look up the schema entry for a field
pub fn field_spec(field: Field) -> Option<FieldSpec> {
    STEPS
        .iter()
        .flat_map(|s| s.fields.iter())
        .find(|spec| spec.field == field)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order() {
        let keys: Vec<&str> = STEPS.iter().map(|s| s.key).collect();
        assert_eq!(keys, ["basics", "configuration", "checkout", "review"]);
        assert_eq!(STEPS[2].number(), 3);
    }

    #[test]
    fn test_field_lists() {
        let basics: Vec<&str> = STEPS[0].fields.iter().map(|f| f.field.key()).collect();
        assert_eq!(
            basics,
            ["storeName", "subDomain", "shopifyStoreName", "shopifyStoreEmail", "shopifyStoreMobile"]
        );
        let checkout: Vec<&str> = STEPS[2].fields.iter().map(|f| f.field.key()).collect();
        assert_eq!(checkout, ["affiliateId", "checkoutLanguage"]);
        assert!(STEPS[3].fields.is_empty());
    }

    #[test]
    fn test_every_field_appears_once() {
        let mut seen = Vec::new();
        for spec in STEPS.iter().flat_map(|s| s.fields.iter()) {
            assert!(!seen.contains(&spec.field), "{} listed twice", spec.field);
            seen.push(spec.field);
        }
        assert_eq!(field_spec(Field::TemplateCustomizer).map(|s| s.kind), Some(FieldKind::Toggle));
    }
}
