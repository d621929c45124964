use super::sse::SseDecoder;
use super::ProgressEvent;

/// Shown when the stream drops or carries something unreadable
pub const CONNECTION_LOST: &str = "Connection to server lost. Please try again.";

/// Consumer side of the provisioning stream.
///
/// Holds the latest progress state. Closes on the terminal event, on an
/// event carrying an error, or when the stream fails; once closed, further
/// input is ignored.
#[derive(Debug)]
pub struct ProgressMonitor {
    state: ProgressEvent,
    decoder: SseDecoder,
    closed: bool,
}

impl Default for ProgressMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressMonitor {
    pub fn new() -> Self {
        Self {
            state: ProgressEvent::new(0, 0, "Preparing to create store..."),
            decoder: SseDecoder::new(),
            closed: false,
        }
    }

    pub fn state(&self) -> &ProgressEvent {
        &self.state
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Finished successfully
    pub fn is_complete(&self) -> bool {
        self.state.is_terminal() && self.state.error.is_none()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// Feed raw bytes from the stream
    pub fn apply_chunk(&mut self, chunk: &str) {
        if self.closed {
            return;
        }

        for payload in self.decoder.push(chunk) {
            match serde_json::from_str::<ProgressEvent>(&payload) {
                Ok(event) => self.apply_event(event),
                Err(e) => {
                    tracing::warn!(error = %e, "unreadable progress event");
                    self.fail(CONNECTION_LOST);
                }
            }
            if self.closed {
                break;
            }
        }
    }

    fn apply_event(&mut self, event: ProgressEvent) {
        tracing::debug!(step = event.step, progress = event.progress, message = %event.message, "progress");
        self.state = event;
        if self.state.is_terminal() || self.state.error.is_some() {
            self.closed = true;
        }
    }

    /// The stream ended; anything short of the terminal event is an error
    pub fn on_stream_end(&mut self) {
        if self.decoder.has_pending() {
            tracing::debug!("stream ended mid-event");
        }
        if !self.closed {
            self.fail(CONNECTION_LOST);
        }
    }

    /// Keep the last known progress but attach an error and close
    pub fn fail(&mut self, message: &str) {
        self.state.error = Some(message.to_string());
        self.closed = true;
    }
}
