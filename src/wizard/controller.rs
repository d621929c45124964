//! Wizard controller
//!
//! Owns the form, the current step and the per-step status. Every field
//! mutation and navigation event recomputes step validity before returning,
//! so the step indicator never reads a stale value.

use chrono::{DateTime, Local};
use std::collections::HashMap;

use super::form::{Field, FormState};
use super::schema::{field_spec, step, FieldKind, FieldSpec, STEP_COUNT};
use super::validate::check_field;
use crate::shopify::{ApiError, ShopifyStore, StoreBackend};

/// Outcome of the last submit attempt
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionResult {
    pub success: bool,
    pub error_message: Option<String>,
    pub store_url: Option<String>,
    pub finished_at: Option<DateTime<Local>>,
}

/// Multi-step store creation wizard
#[derive(Debug, Clone)]
pub struct WizardController {
    form: FormState,
    defaults: FormState,
    current_step: usize,
    completed: [bool; STEP_COUNT],
    valid: [bool; STEP_COUNT],
    errors: HashMap<Field, String>,
    is_submitting: bool,
    submission: SubmissionResult,
    created_store: Option<ShopifyStore>,
    /// Focused field within the current step
    pub field_focus: usize,
    /// Whether the focused text field is in edit mode
    pub editing: bool,
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new(FormState::default())
    }
}

impl WizardController {
    /// Start a wizard session; `defaults` is also what `reset` restores
    pub fn new(defaults: FormState) -> Self {
        let mut wizard = Self {
            form: defaults.clone(),
            defaults,
            current_step: 0,
            completed: [false; STEP_COUNT],
            valid: [false; STEP_COUNT],
            errors: HashMap::new(),
            is_submitting: false,
            submission: SubmissionResult::default(),
            created_store: None,
            field_focus: 0,
            editing: false,
        };
        wizard.recompute_all_step_status();
        wizard
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn step_count(&self) -> usize {
        STEP_COUNT
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step + 1 == STEP_COUNT
    }

    pub fn completed(&self) -> &[bool] {
        &self.completed
    }

    pub fn valid(&self) -> &[bool] {
        &self.valid
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn submission(&self) -> &SubmissionResult {
        &self.submission
    }

    pub fn created_store(&self) -> Option<&ShopifyStore> {
        self.created_store.as_ref()
    }

    /// Terminal state after a successful submit; only `reset` leaves it
    pub fn is_finished(&self) -> bool {
        self.submission.success
    }

    /// Schema entries of the current step
    pub fn current_fields(&self) -> &'static [FieldSpec] {
        step(self.current_step).map(|s| s.fields).unwrap_or(&[])
    }

    pub fn focused_field(&self) -> Option<FieldSpec> {
        self.current_fields().get(self.field_focus).copied()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Validate the current step and move forward if it passes.
    /// The step is marked completed either way. Returns whether it moved.
    pub fn advance(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }

        let current = self.current_step;
        let passed = self.validate_step_fields(current);
        self.completed[current] = true;

        let moved = passed && !self.is_last_step();
        if moved {
            self.current_step += 1;
            self.reset_view();
        }

        self.recompute_all_step_status();
        tracing::debug!(from = current, to = self.current_step, passed, "advance");
        moved
    }

    /// Go back one step without validating
    pub fn retreat(&mut self) {
        if self.is_finished() || self.current_step == 0 {
            return;
        }
        self.current_step -= 1;
        self.reset_view();
        tracing::debug!(to = self.current_step, "retreat");
    }

    /// Jump directly to a step. No validation gate; out-of-range is ignored.
    pub fn jump_to_step(&mut self, index: usize) {
        if self.is_finished() || index >= STEP_COUNT {
            return;
        }
        if index != self.current_step {
            self.completed[self.current_step] = true;
        }
        self.current_step = index;
        self.reset_view();
        self.recompute_all_step_status();
        tracing::debug!(to = index, "jump to step");
    }

    fn reset_view(&mut self) {
        self.field_focus = 0;
        self.editing = false;
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Whether every required field of a step is filled and error-free
    pub fn validate_step(&self, index: usize) -> bool {
        let Some(definition) = step(index) else {
            return false;
        };

        definition
            .fields
            .iter()
            .filter(|spec| spec.required && spec.kind != FieldKind::Toggle)
            .all(|spec| !self.form.is_blank(spec.field) && !self.errors.contains_key(&spec.field))
    }

    /// Recompute the validity of every step and swap the result in whole
    pub fn recompute_all_step_status(&mut self) {
        let mut valid = [false; STEP_COUNT];
        for (index, slot) in valid.iter_mut().enumerate() {
            *slot = self.validate_step(index);
        }
        self.valid = valid;
    }

    /// Whether every step that collects data currently passes
    pub fn all_steps_valid(&self) -> bool {
        (0..STEP_COUNT).all(|i| self.validate_step(i))
    }

    /// First step that does not pass, if any
    pub fn first_invalid_step(&self) -> Option<usize> {
        (0..STEP_COUNT).find(|&i| !self.validate_step(i))
    }

    /// Run field rules for one step, recording or clearing each field's error
    fn validate_step_fields(&mut self, index: usize) -> bool {
        if let Some(definition) = step(index) {
            for spec in definition.fields {
                self.revalidate(spec);
            }
        }
        self.validate_step(index)
    }

    fn revalidate(&mut self, spec: &FieldSpec) {
        match check_field(spec, &self.form) {
            Some(message) => {
                self.errors.insert(spec.field, message);
            }
            None => {
                self.errors.remove(&spec.field);
            }
        }
    }

    /// Second phase of every mutation: check the field, then refresh step status
    fn after_mutation(&mut self, field: Field) {
        if let Some(spec) = field_spec(field) {
            self.revalidate(&spec);
        }
        self.recompute_all_step_status();
    }

    // =========================================================================
    // Field mutation
    // =========================================================================

    pub fn set_text(&mut self, field: Field, value: impl Into<String>) {
        let Some(text) = self.form.text_mut(field) else {
            return;
        };
        *text = value.into();
        self.after_mutation(field);
    }

    pub fn push_char(&mut self, field: Field, c: char) {
        let Some(text) = self.form.text_mut(field) else {
            return;
        };
        text.push(c);
        self.after_mutation(field);
    }

    pub fn pop_char(&mut self, field: Field) {
        let Some(text) = self.form.text_mut(field) else {
            return;
        };
        text.pop();
        self.after_mutation(field);
    }

    pub fn toggle(&mut self, field: Field) {
        let Some(flag) = self.form.flag_mut(field) else {
            return;
        };
        *flag = !*flag;
        self.after_mutation(field);
    }

    /// Step a choice field (language, theme category) forwards or back
    pub fn cycle_choice(&mut self, field: Field, delta: i32) {
        match field {
            Field::CheckoutLanguage => {
                self.form.checkout_language = self.form.checkout_language.cycle(delta);
            }
            Field::ThemeCategory => {
                self.form.theme_category = self.form.theme_category.cycle(delta);
            }
            _ => return,
        }
        self.after_mutation(field);
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Mark a submission in flight and hand back the data to send.
    /// Returns `None` while a submission is already running or after success.
    pub fn begin_submit(&mut self) -> Option<FormState> {
        if self.is_submitting || self.is_finished() {
            return None;
        }
        self.is_submitting = true;
        self.submission.error_message = None;
        tracing::info!(store = %self.form.store_name, "submitting store");
        Some(self.form.clone())
    }

    /// Record the outcome of a submission started with `begin_submit`
    pub fn finish_submit(&mut self, result: Result<ShopifyStore, ApiError>) {
        self.is_submitting = false;
        self.submission.finished_at = Some(Local::now());

        match result {
            Ok(store) => {
                tracing::info!(url = %store.url, "store created");
                self.submission.success = true;
                self.submission.store_url = Some(store.url.clone());
                self.created_store = Some(store);
                self.reset_view();
            }
            Err(e) => {
                tracing::warn!(error = %e, "store creation failed");
                self.submission.error_message = Some(e.to_string());
            }
        }
    }

    /// Submit the form to the store-creation backend
    pub async fn submit<B: StoreBackend>(&mut self, backend: &B) -> bool {
        let Some(form) = self.begin_submit() else {
            return false;
        };
        let result = backend.create_store(&form).await;
        self.finish_submit(result);
        self.submission.success
    }

    /// Back to step one with the initial values and no status
    pub fn reset(&mut self) {
        self.form = self.defaults.clone();
        self.current_step = 0;
        self.completed = [false; STEP_COUNT];
        self.errors.clear();
        self.is_submitting = false;
        self.submission = SubmissionResult::default();
        self.created_store = None;
        self.reset_view();
        self.recompute_all_step_status();
        tracing::info!("wizard reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shopify::MockShopify;
    use crate::wizard::form::CheckoutLanguage;
    use crate::wizard::schema::STEPS;

    struct FailingBackend(&'static str);

    impl StoreBackend for FailingBackend {
        async fn create_store(&self, _form: &FormState) -> Result<ShopifyStore, ApiError> {
            Err(ApiError::Request(self.0.to_string()))
        }
    }

    fn fill_basics(wizard: &mut WizardController) {
        wizard.set_text(Field::StoreName, "Cool Shop");
        wizard.set_text(Field::SubDomain, "coolshop");
        wizard.set_text(Field::ShopifyStoreName, "Cool Shopify");
        wizard.set_text(Field::ShopifyStoreEmail, "admin@coolshop.com");
        wizard.set_text(Field::ShopifyStoreMobile, "+1 555 123 4567");
    }

    fn filled_wizard() -> WizardController {
        let mut wizard = WizardController::default();
        fill_basics(&mut wizard);
        wizard.set_text(Field::StoreAccessToken, "shpat_123");
        wizard.set_text(Field::AffiliateId, "aff-42");
        wizard
    }

    #[test]
    fn test_initial_status() {
        let wizard = WizardController::default();
        assert_eq!(wizard.current_step(), 0);
        assert_eq!(wizard.valid(), &[false, false, false, true]);
        assert_eq!(wizard.completed(), &[false; 4]);
    }

    #[test]
    fn test_validate_step_matches_required_fields() {
        let mut wizard = filled_wizard();
        for i in 0..STEP_COUNT {
            assert!(wizard.validate_step(i), "step {} should pass", i);
        }

        for spec in STEPS.iter().flat_map(|s| s.fields.iter()) {
            if spec.kind.is_text() {
                let mut w = wizard.clone();
                w.set_text(spec.field, "");
                let index = STEPS.iter().position(|s| s.fields.contains(spec)).unwrap();
                assert!(!w.validate_step(index), "{} empty should fail", spec.field);
            }
        }

        // A field error alone invalidates the step
        wizard.set_text(Field::ShopifyStoreEmail, "nope");
        assert!(!wizard.validate_step(0));
        assert_eq!(wizard.error(Field::ShopifyStoreEmail), Some("Please enter a valid Shopify email address"));
    }

    #[test]
    fn test_toggles_never_block() {
        let mut wizard = filled_wizard();
        wizard.toggle(Field::HydrogenTemplateStatus);
        assert!(wizard.form().hydrogen_template_status);
        assert!(wizard.validate_step(1));
        wizard.toggle(Field::HydrogenTemplateStatus);
        assert!(wizard.validate_step(1));
    }

    #[test]
    fn test_advance_from_valid_basics() {
        let mut wizard = WizardController::default();
        fill_basics(&mut wizard);
        assert!(wizard.advance());
        assert_eq!(wizard.current_step(), 1);
        assert!(wizard.completed()[0]);
        assert!(wizard.valid()[0]);
    }

    #[test]
    fn test_advance_blocked_by_empty_affiliate() {
        let mut wizard = filled_wizard();
        wizard.jump_to_step(2);
        wizard.set_text(Field::AffiliateId, "");
        assert!(!wizard.advance());
        assert_eq!(wizard.current_step(), 2);
        assert!(!wizard.valid()[2]);
        assert!(wizard.completed()[2]);
        assert_eq!(wizard.error(Field::AffiliateId), Some("Affiliate ID is required"));
    }

    #[test]
    fn test_advance_never_moves_when_invalid() {
        let mut wizard = WizardController::default();
        for _ in 0..3 {
            assert!(!wizard.advance());
        }
        assert_eq!(wizard.current_step(), 0);
        assert!(wizard.completed()[0]);
        // advance records errors for every empty required field of the step
        assert_eq!(wizard.error(Field::StoreName), Some("Store name is required"));
        assert!(wizard.error(Field::StoreAccessToken).is_none());
    }

    #[test]
    fn test_advance_stops_at_last_step() {
        let mut wizard = filled_wizard();
        wizard.jump_to_step(3);
        assert!(!wizard.advance());
        assert_eq!(wizard.current_step(), 3);
    }

    #[test]
    fn test_retreat() {
        let mut wizard = WizardController::default();
        wizard.retreat();
        assert_eq!(wizard.current_step(), 0);

        wizard.jump_to_step(2);
        let completed = wizard.completed().to_vec();
        let valid = wizard.valid().to_vec();
        wizard.retreat();
        assert_eq!(wizard.current_step(), 1);
        assert_eq!(wizard.completed(), completed.as_slice());
        assert_eq!(wizard.valid(), valid.as_slice());
    }

    #[test]
    fn test_jump_ignores_validity() {
        let mut wizard = WizardController::default();
        for j in [3, 1, 2, 0] {
            wizard.jump_to_step(j);
            assert_eq!(wizard.current_step(), j);
        }
        assert_eq!(wizard.completed(), &[true, true, true, true]);

        wizard.jump_to_step(STEP_COUNT);
        assert_eq!(wizard.current_step(), 0);
    }

    #[test]
    fn test_jump_to_same_step_does_not_complete() {
        let mut wizard = WizardController::default();
        wizard.jump_to_step(0);
        assert!(!wizard.completed()[0]);
    }

    #[test]
    fn test_navigation_resets_focus() {
        let mut wizard = WizardController::default();
        wizard.field_focus = 3;
        wizard.editing = true;
        wizard.jump_to_step(1);
        assert_eq!(wizard.field_focus, 0);
        assert!(!wizard.editing);
    }

    #[test]
    fn test_typing_recomputes_status() {
        let mut wizard = WizardController::default();
        fill_basics(&mut wizard);
        assert!(wizard.valid()[0]);
        wizard.pop_char(Field::StoreName);
        assert!(wizard.valid()[0]);
        wizard.set_text(Field::StoreName, "");
        assert!(!wizard.valid()[0]);
        for c in "Shop".chars() {
            wizard.push_char(Field::StoreName, c);
        }
        assert_eq!(wizard.form().store_name, "Shop");
        assert!(wizard.valid()[0]);
    }

    #[test]
    fn test_whitespace_store_name_is_accepted() {
        let mut wizard = WizardController::default();
        fill_basics(&mut wizard);
        wizard.set_text(Field::StoreName, "   ");
        assert_eq!(wizard.error(Field::StoreName), None);
        assert!(wizard.valid()[0]);
    }

    #[test]
    fn test_cycle_choice() {
        let mut wizard = WizardController::default();
        wizard.cycle_choice(Field::CheckoutLanguage, 1);
        assert_eq!(wizard.form().checkout_language, CheckoutLanguage::Fr);
        wizard.cycle_choice(Field::CheckoutLanguage, 1);
        assert_eq!(wizard.form().checkout_language, CheckoutLanguage::En);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut wizard = filled_wizard();
        wizard.toggle(Field::TemplateCustomizer);
        wizard.cycle_choice(Field::CheckoutLanguage, 1);
        wizard.advance();
        wizard.set_text(Field::ShopifyStoreEmail, "bad");

        wizard.reset();
        assert_eq!(wizard.form(), &FormState::default());
        assert_eq!(wizard.current_step(), 0);
        assert_eq!(wizard.completed(), &[false; 4]);
        assert_eq!(wizard.valid(), &[false, false, false, true]);
        assert!(wizard.error(Field::ShopifyStoreEmail).is_none());
        assert_eq!(wizard.submission(), &SubmissionResult::default());
    }

    #[test]
    fn test_reset_uses_configured_defaults() {
        let defaults = FormState {
            checkout_language: CheckoutLanguage::Fr,
            ..FormState::default()
        };
        let mut wizard = WizardController::new(defaults.clone());
        wizard.cycle_choice(Field::CheckoutLanguage, 1);
        wizard.reset();
        assert_eq!(wizard.form(), &defaults);
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_step() {
        let mut wizard = filled_wizard();
        wizard.jump_to_step(3);

        let ok = wizard.submit(&FailingBackend("network down")).await;
        assert!(!ok);
        assert_eq!(wizard.submission().error_message.as_deref(), Some("network down"));
        assert!(!wizard.is_submitting());
        assert_eq!(wizard.current_step(), 3);
        assert!(!wizard.is_finished());
        assert_eq!(wizard.form().affiliate_id, "aff-42");
    }

    #[tokio::test]
    async fn test_submit_success_is_terminal() {
        let mut wizard = filled_wizard();
        wizard.jump_to_step(3);

        let ok = wizard.submit(&MockShopify::new(0.0)).await;
        assert!(ok);
        assert!(wizard.submission().success);
        assert!(!wizard.is_submitting());
        assert_eq!(
            wizard.submission().store_url.as_deref(),
            Some("https://cool-shop.myshopify.com")
        );
        assert!(wizard.is_finished());

        // Only reset leaves the success view
        wizard.retreat();
        wizard.jump_to_step(0);
        assert!(!wizard.advance());
        assert_eq!(wizard.current_step(), 3);

        wizard.reset();
        assert_eq!(wizard.current_step(), 0);
        assert!(!wizard.is_finished());
    }

    #[tokio::test]
    async fn test_retry_after_failure_clears_error() {
        let mut wizard = filled_wizard();
        wizard.submit(&FailingBackend("timeout")).await;
        assert!(wizard.submission().error_message.is_some());

        assert!(wizard.submit(&MockShopify::new(0.0)).await);
        assert!(wizard.submission().error_message.is_none());
    }

    #[test]
    fn test_begin_submit_refuses_reentry() {
        let mut wizard = filled_wizard();
        assert!(wizard.begin_submit().is_some());
        assert!(wizard.is_submitting());
        assert!(wizard.begin_submit().is_none());

        wizard.finish_submit(Err(ApiError::Request("boom".to_string())));
        assert!(!wizard.is_submitting());
        assert!(wizard.begin_submit().is_some());
    }
}
