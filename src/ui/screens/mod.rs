pub mod confirm;
pub mod create_wizard;
pub mod help;
pub mod provisioning;

pub(crate) use create_wizard::centered_rect;
