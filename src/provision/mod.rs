//! Store provisioning
//!
//! After a store is created, the pipeline seeds it (template, collections,
//! products, checkout, branding, deployment) and reports progress as
//! server-sent events. The monitor is the consuming end of that stream.

pub mod monitor;
pub mod pipeline;
pub mod sse;

pub use monitor::ProgressMonitor;
pub use pipeline::{run_pipeline, spawn_pipeline, PipelineError, PIPELINE_STEPS};
pub use sse::{encode_event, SseDecoder};

use serde::{Deserialize, Serialize};

/// One progress update on the provisioning stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub message: String,
    pub step: u32,
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProgressEvent {
    pub fn new(step: u32, progress: u8, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            step,
            progress,
            store_url: None,
            preview_url: None,
            error: None,
        }
    }

    /// The last event of a successful run
    pub fn is_terminal(&self) -> bool {
        self.progress == 100 && self.store_url.is_some()
    }
}
