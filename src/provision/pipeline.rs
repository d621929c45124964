use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

use super::sse::encode_event;
use super::ProgressEvent;
use crate::shopify::{ApiError, Branding, ProvisioningBackend, ShopifyStore};
use crate::wizard::FormState;

/// Frames buffered between the pipeline and the monitor
const STREAM_CAPACITY: usize = 16;

/// Number of provisioning stages reported on the stream
pub const PIPELINE_STEPS: u32 = 7;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("progress stream was closed by the receiver")]
    StreamClosed,
    #[error("failed to encode progress event: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Writes events onto the stream as SSE frames
struct ProgressSink<'a> {
    tx: &'a mpsc::Sender<String>,
}

impl ProgressSink<'_> {
    async fn send(&self, event: ProgressEvent) -> Result<(), PipelineError> {
        let frame = encode_event(&event)?;
        self.tx.send(frame).await.map_err(|_| PipelineError::StreamClosed)
    }

    async fn progress(&self, step: u32, progress: u8, message: String) -> Result<(), PipelineError> {
        self.send(ProgressEvent::new(step, progress, message)).await
    }

    /// Report a failed stage; the stream ends after this
    async fn fail(&self, step: u32, progress: u8, error: ApiError) -> Result<(), PipelineError> {
        tracing::warn!(step, error = %error, "provisioning stage failed");
        let mut event = ProgressEvent::new(step, progress, "Provisioning failed");
        event.error = Some(error.to_string());
        self.send(event).await
    }
}

/// Run every provisioning stage for a created store, publishing progress.
///
/// Backend failures are reported on the stream (and end it); the returned
/// error only covers the stream itself.
pub async fn run_pipeline<B: ProvisioningBackend>(
    backend: &B,
    form: &FormState,
    store: &ShopifyStore,
    branding: &Branding,
    tx: &mpsc::Sender<String>,
) -> Result<(), PipelineError> {
    let sink = ProgressSink { tx };
    let category = form.theme_category;

    // 1. Template
    sink.progress(1, 5, format!("Customizing {} template...", category.label())).await?;
    let template = match backend.customize_template(form).await {
        Ok(t) => t,
        Err(e) => return sink.fail(1, 5, e).await,
    };
    sink.progress(1, 15, format!("Template ready: {}", template.template_name)).await?;

    // 2. Collections
    sink.progress(2, 20, "Creating collections...".to_string()).await?;
    let collections = match backend.create_collections(&store.url, category).await {
        Ok(c) => c,
        Err(e) => return sink.fail(2, 20, e).await,
    };
    sink.progress(2, 35, format!("Created {} collections", collections.len())).await?;

    // 3. Products
    sink.progress(3, 40, "Importing products...".to_string()).await?;
    let products = match backend.import_products(&store.url, category).await {
        Ok(p) => p,
        Err(e) => return sink.fail(3, 40, e).await,
    };
    sink.progress(3, 60, format!("Imported {} products", products.len())).await?;

    // 4. Checkout
    sink.progress(4, 65, "Configuring custom checkout...".to_string()).await?;
    let checkout = match backend
        .configure_custom_checkout(&store.url, &form.affiliate_id, form.checkout_language)
        .await
    {
        Ok(c) => c,
        Err(e) => return sink.fail(4, 65, e).await,
    };
    sink.progress(4, 75, format!("Checkout redirects to {}", checkout.checkout_url)).await?;

    // 5. Branding
    sink.progress(5, 78, "Applying branding...".to_string()).await?;
    if let Err(e) = backend.apply_branding(&store.url, branding).await {
        return sink.fail(5, 78, e).await;
    }
    sink.progress(5, 82, "Branding applied".to_string()).await?;

    // 6. Preview
    sink.progress(6, 85, "Generating template preview...".to_string()).await?;
    let preview = match backend.generate_template_preview(form).await {
        Ok(p) => p,
        Err(e) => return sink.fail(6, 85, e).await,
    };
    let mut ready = ProgressEvent::new(6, 88, format!("Preview ready at {}", preview.preview_url));
    ready.preview_url = Some(preview.preview_url.clone());
    sink.send(ready).await?;

    // 7. Deploy
    sink.progress(7, 90, "Deploying storefront to Oxygen...".to_string()).await?;
    let deployment = match backend.deploy_template(form).await {
        Ok(d) => d,
        Err(e) => return sink.fail(7, 90, e).await,
    };

    let mut done = ProgressEvent::new(PIPELINE_STEPS, 100, "Your Hydrogen storefront is live!");
    done.store_url = Some(deployment.deployment_url.clone());
    done.preview_url = Some(preview.preview_url);
    sink.send(done).await?;

    tracing::info!(store = %store.name, url = %deployment.deployment_url, "provisioning finished");
    Ok(())
}

/// Run the pipeline on a background task and return the receiving end of
/// its stream. Dropping the receiver stops the pipeline at its next event.
pub fn spawn_pipeline<B>(
    backend: Arc<B>,
    form: FormState,
    store: ShopifyStore,
    branding: Branding,
) -> mpsc::Receiver<String>
where
    B: ProvisioningBackend + 'static,
{
    let (tx, rx) = mpsc::channel(STREAM_CAPACITY);

    tokio::spawn(async move {
        if let Err(e) = run_pipeline(backend.as_ref(), &form, &store, &branding, &tx).await {
            tracing::warn!(error = %e, "provisioning stream ended early");
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provision::SseDecoder;
    use crate::shopify::{
        CheckoutRedirect, Collection, Deployment, MockShopify, Product, StoreBackend,
        TemplateCustomization, TemplatePreview, ThemeCategory,
    };
    use crate::wizard::CheckoutLanguage;

    fn sample() -> (FormState, ShopifyStore) {
        let form = FormState {
            store_name: "Paws".to_string(),
            affiliate_id: "aff".to_string(),
            theme_category: ThemeCategory::Animals,
            ..FormState::default()
        };
        let store = ShopifyStore {
            id: "gid://shopify/Shop/1".to_string(),
            name: "Paws".to_string(),
            url: "https://paws.myshopify.com".to_string(),
            myshopify_domain: "paws.myshopify.com".to_string(),
            primary_domain: crate::shopify::PrimaryDomain {
                url: "https://paws.myshopify.com".to_string(),
                host: "paws.myshopify.com".to_string(),
            },
        };
        (form, store)
    }

    async fn collect(mut rx: mpsc::Receiver<String>) -> Vec<ProgressEvent> {
        let mut decoder = SseDecoder::new();
        let mut events = Vec::new();
        while let Some(chunk) = rx.recv().await {
            for payload in decoder.push(&chunk) {
                events.push(serde_json::from_str(&payload).unwrap());
            }
        }
        events
    }

    #[tokio::test]
    async fn test_pipeline_progress_is_monotonic() {
        let (form, store) = sample();
        let rx = spawn_pipeline(Arc::new(MockShopify::new(0.0)), form, store, Branding::default());
        let events = collect(rx).await;

        assert!(events.len() >= 12);
        for pair in events.windows(2) {
            assert!(pair[0].progress <= pair[1].progress);
            assert!(pair[0].step <= pair[1].step);
        }
        let last = events.last().unwrap();
        assert!(last.is_terminal());
        assert_eq!(last.store_url.as_deref(), Some("https://paws.myshopify.io"));
        assert!(events.iter().all(|e| e.error.is_none()));
        assert!(events.iter().any(|e| e.message == "Created 4 collections"));
        assert_eq!(last.step, PIPELINE_STEPS);
    }

    #[tokio::test]
    async fn test_pipeline_reports_template_preview() {
        let (form, store) = sample();
        let rx = spawn_pipeline(Arc::new(MockShopify::new(0.0)), form, store, Branding::default());
        let events = collect(rx).await;

        let preview_url = "https://preview.hydrogen.shopify.dev/animals-template/paws";
        let ready = events.iter().find(|e| e.preview_url.is_some()).unwrap();
        assert_eq!(ready.step, 6);
        assert_eq!(ready.message, format!("Preview ready at {}", preview_url));

        // The preview stays visible once the store is live
        let last = events.last().unwrap();
        assert_eq!(last.preview_url.as_deref(), Some(preview_url));
    }

    /// Fails at the product import stage
    struct BrokenImport;

    impl StoreBackend for BrokenImport {
        async fn create_store(&self, _form: &FormState) -> Result<ShopifyStore, ApiError> {
            Err(ApiError::Request("unused".to_string()))
        }
    }

    impl ProvisioningBackend for BrokenImport {
        async fn customize_template(&self, form: &FormState) -> Result<TemplateCustomization, ApiError> {
            MockShopify::new(0.0).customize_template(form).await
        }

        async fn create_collections(
            &self,
            store_url: &str,
            category: ThemeCategory,
        ) -> Result<Vec<Collection>, ApiError> {
            MockShopify::new(0.0).create_collections(store_url, category).await
        }

        async fn import_products(
            &self,
            _store_url: &str,
            _category: ThemeCategory,
        ) -> Result<Vec<Product>, ApiError> {
            Err(ApiError::Request("CSV upload rejected".to_string()))
        }

        async fn configure_custom_checkout(
            &self,
            _store_url: &str,
            _affiliate_id: &str,
            _language: CheckoutLanguage,
        ) -> Result<CheckoutRedirect, ApiError> {
            unreachable!("pipeline stops after the failed import")
        }

        async fn apply_branding(&self, _store_url: &str, _branding: &Branding) -> Result<bool, ApiError> {
            unreachable!("pipeline stops after the failed import")
        }

        async fn generate_template_preview(&self, _form: &FormState) -> Result<TemplatePreview, ApiError> {
            unreachable!("pipeline stops after the failed import")
        }

        async fn deploy_template(&self, _form: &FormState) -> Result<Deployment, ApiError> {
            unreachable!("pipeline stops after the failed import")
        }
    }

    #[tokio::test]
    async fn test_stage_failure_ends_stream_with_error() {
        let (form, store) = sample();
        let rx = spawn_pipeline(Arc::new(BrokenImport), form, store, Branding::default());
        let events = collect(rx).await;

        let last = events.last().unwrap();
        assert_eq!(last.step, 3);
        assert_eq!(last.error.as_deref(), Some("CSV upload rejected"));
        assert!(!last.is_terminal());
    }

    #[tokio::test]
    async fn test_dropped_receiver_stops_pipeline() {
        let (form, store) = sample();
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let result = run_pipeline(&MockShopify::new(0.0), &form, &store, &Branding::default(), &tx).await;
        assert!(matches!(result, Err(PipelineError::StreamClosed)));
    }
}
