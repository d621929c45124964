pub mod controller;
pub mod form;
pub mod schema;
pub mod validate;

pub use controller::{SubmissionResult, WizardController};
pub use form::{CheckoutLanguage, Field, FormState};
pub use schema::{FieldKind, FieldSpec, StepDefinition, StepId, STEPS, STEP_COUNT};
