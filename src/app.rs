use anyhow::Result;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

use crate::config::Config;
use crate::metadata::FieldHelpStore;
use crate::provision::{spawn_pipeline, ProgressMonitor};
use crate::shopify::{ApiError, MockShopify, ShopifyStore, StoreBackend};
use crate::wizard::{WizardController, STEPS};

/// Application screens/views
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Store creation wizard
    Wizard,
    /// Live provisioning progress
    Provisioning,
    /// Key bindings
    Help,
    /// Confirmation dialog
    Confirm(ConfirmAction),
}

/// Actions that need confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    Quit,
    ResetWizard,
}

impl ConfirmAction {
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Quit => "Quit store-creator? Unsaved wizard data will be lost.",
            Self::ResetWizard => "Clear every field and start over?",
        }
    }
}

type SubmitResult = Result<ShopifyStore, ApiError>;

/// Application state
pub struct App {
    /// Current screen
    pub screen: Screen,
    /// Screen history for back navigation
    pub screen_stack: Vec<Screen>,
    /// Application configuration
    pub config: Config,
    /// Wizard state
    pub wizard: WizardController,
    /// Help text for the notes panel
    pub field_help: FieldHelpStore,
    /// Backend the wizard submits to
    pub backend: Arc<MockShopify>,
    /// Store creation call in flight
    pending_submit: Option<oneshot::Receiver<SubmitResult>>,
    /// Open provisioning stream
    provision_stream: Option<mpsc::Receiver<String>>,
    /// Progress of the last provisioning run
    pub monitor: Option<ProgressMonitor>,
    /// Status message
    pub status_message: Option<String>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Result<Self> {
        let mut field_help = FieldHelpStore::load_embedded();
        field_help.load_user_overrides(&config.field_help_path);

        let wizard = WizardController::new(config.form_defaults());
        let backend = Arc::new(MockShopify::new(config.latency_scale));

        Ok(Self {
            screen: Screen::Wizard,
            screen_stack: Vec::new(),
            config,
            wizard,
            field_help,
            backend,
            pending_submit: None,
            provision_stream: None,
            monitor: None,
            status_message: None,
            should_quit: false,
        })
    }

    /// Navigate to a new screen
    pub fn push_screen(&mut self, screen: Screen) {
        self.screen_stack.push(self.screen.clone());
        self.screen = screen;
    }

    /// Go back to the previous screen
    pub fn pop_screen(&mut self) {
        if let Some(prev) = self.screen_stack.pop() {
            self.screen = prev;
        }
    }

    /// Set a status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Run a confirmed action and close the dialog
    pub fn confirm(&mut self, action: ConfirmAction) {
        self.pop_screen();
        match action {
            ConfirmAction::Quit => self.should_quit = true,
            ConfirmAction::ResetWizard => self.reset_wizard(),
        }
    }

    /// Submit the wizard to the backend on a background task.
    /// Refused while any step is incomplete or a submit is already running.
    pub fn submit(&mut self) {
        if let Some(index) = self.wizard.first_invalid_step() {
            let name = STEPS.get(index).map(|s| s.name).unwrap_or("a step");
            self.set_status(format!("Complete step {} ({}) before creating the store", index + 1, name));
            return;
        }

        let Some(form) = self.wizard.begin_submit() else {
            return;
        };

        let (tx, rx) = oneshot::channel();
        let backend = Arc::clone(&self.backend);
        tokio::spawn(async move {
            let result = backend.create_store(&form).await;
            // The app may have quit in the meantime
            let _ = tx.send(result);
        });

        self.pending_submit = Some(rx);
        self.clear_status();
    }

    /// Start seeding the created store and switch to the progress screen
    pub fn start_provisioning(&mut self) {
        let Some(store) = self.wizard.created_store().cloned() else {
            self.set_status("Create the store before provisioning it");
            return;
        };
        if self.provision_stream.is_some() {
            self.push_screen(Screen::Provisioning);
            return;
        }

        tracing::info!(url = %store.url, "starting provisioning");
        let rx = spawn_pipeline(
            Arc::clone(&self.backend),
            self.wizard.form().clone(),
            store,
            self.config.branding.clone(),
        );
        self.provision_stream = Some(rx);
        self.monitor = Some(ProgressMonitor::new());
        self.push_screen(Screen::Provisioning);
    }

    pub fn is_provisioning(&self) -> bool {
        self.provision_stream.is_some()
    }

    /// Drain results from background tasks. Called once per UI tick.
    pub fn poll_background(&mut self) {
        self.poll_submit();
        self.poll_provisioning();
    }

    fn poll_submit(&mut self) {
        let Some(rx) = self.pending_submit.as_mut() else {
            return;
        };

        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(oneshot::error::TryRecvError::Empty) => return,
            Err(oneshot::error::TryRecvError::Closed) => {
                Err(ApiError::Request("Store creation was interrupted. Please try again.".to_string()))
            }
        };

        self.pending_submit = None;
        self.wizard.finish_submit(result);
        if self.wizard.is_finished() {
            self.set_status("Store created");
        }
    }

    fn poll_provisioning(&mut self) {
        let (Some(rx), Some(monitor)) = (self.provision_stream.as_mut(), self.monitor.as_mut()) else {
            return;
        };

        loop {
            match rx.try_recv() {
                Ok(chunk) => monitor.apply_chunk(&chunk),
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    monitor.on_stream_end();
                    break;
                }
            }
            if monitor.is_closed() {
                break;
            }
        }

        if monitor.is_closed() {
            // Close the connection
            self.provision_stream = None;
            if monitor.is_complete() {
                self.set_status("Provisioning complete");
            }
        }
    }

    /// Start a fresh wizard session
    pub fn reset_wizard(&mut self) {
        self.wizard.reset();
        self.pending_submit = None;
        self.provision_stream = None;
        self.monitor = None;
        self.screen = Screen::Wizard;
        self.screen_stack.clear();
        self.clear_status();
    }
}
