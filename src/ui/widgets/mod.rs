pub mod step_indicator;

pub use step_indicator::StepIndicator;
