//! Catalog manager
//!
//! Owns the admin product list and the add/edit form. The list lives in a
//! `watch` channel: presentation code reads or subscribes, only the manager
//! writes. After every successful mutation the whole list is fetched again
//! and replaces the local copy; nothing is patched in place.

mod form;
mod prompt;

pub use form::{FormState, ValidationPolicy};
pub use prompt::{AutoConfirm, Notice, OperatorPrompt, StdioPrompt};

use std::sync::atomic::{AtomicBool, Ordering};

use shared::models::{Category, Product, ProductDraft};
use tokio::sync::watch;

use crate::api::{SaveResponse, SiteApi};
use crate::client::HttpClient;
use crate::config::ClientConfig;
use crate::upload::{ImageFile, ImageUploader, UploadStatus};
use crate::{ClientError, ClientResult};

pub struct CatalogManager<C: HttpClient, P: OperatorPrompt> {
    api: SiteApi<C>,
    prompt: P,
    products: watch::Sender<Vec<Product>>,
    loading: AtomicBool,
    last_error: Option<String>,
    form: FormState,
    policy: ValidationPolicy,
    uploader: ImageUploader,
    upload_status: watch::Sender<UploadStatus>,
    in_flight: AtomicBool,
}

/// Sets a flag for as long as it lives
///
/// Dropping the guard clears the flag, so a request future that is cancelled
/// mid-await (for example by `tokio::time::timeout`) does not leave the
/// manager stuck in a busy state.
struct FlagGuard<'a>(&'a AtomicBool);

impl<'a> FlagGuard<'a> {
    fn hold(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<C: HttpClient, P: OperatorPrompt> CatalogManager<C, P> {
    pub fn new(api: SiteApi<C>, prompt: P, config: &ClientConfig) -> Self {
        let (products, _) = watch::channel(Vec::new());
        let (upload_status, _) = watch::channel(UploadStatus::idle());
        Self {
            api,
            prompt,
            products,
            loading: AtomicBool::new(false),
            last_error: None,
            form: FormState::closed(),
            policy: ValidationPolicy::new(config.image_required),
            uploader: ImageUploader::from_config(config),
            upload_status,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn api(&self) -> &SiteApi<C> {
        &self.api
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    // ========== Read accessors ==========

    /// Snapshot of the last full list response
    pub fn products(&self) -> Vec<Product> {
        self.products.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Product>> {
        self.products.subscribe()
    }

    pub fn find(&self, id: &str) -> Option<Product> {
        self.products.borrow().iter().find(|p| p.id == id).cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Error from the last list fetch, cleared by the next success
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    pub fn set_image_required(&mut self, required: bool) {
        self.policy.image_required = required;
    }

    pub fn upload_status(&self) -> UploadStatus {
        *self.upload_status.borrow()
    }

    pub fn subscribe_upload(&self) -> watch::Receiver<UploadStatus> {
        self.upload_status.subscribe()
    }

    /// A mutation or upload is outstanding
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) || self.upload_status.borrow().uploading
    }

    // ========== CRUD ==========

    /// Fetch the full list and replace the local copy
    ///
    /// A failure empties the list, logs, and records [`last_error`].
    ///
    /// [`last_error`]: CatalogManager::last_error
    pub async fn list_products(&mut self) -> Vec<Product> {
        let result = {
            let _loading = FlagGuard::hold(&self.loading);
            self.api.list_products().await
        };

        match result {
            Ok(products) => {
                tracing::debug!("Loaded {} products", products.len());
                self.last_error = None;
                self.products.send_replace(products);
            }
            Err(e) => {
                tracing::error!("Failed to load products: {}", e);
                self.last_error = Some(e.user_message());
                self.products.send_replace(Vec::new());
            }
        }
        self.products()
    }

    pub async fn create_product(&mut self, draft: &ProductDraft) -> ClientResult<Product> {
        self.begin(draft)?;
        let result = {
            let _busy = FlagGuard::hold(&self.in_flight);
            self.api.create_product(draft).await
        };
        self.finish_save(result, draft, None, "Product added successfully!")
            .await
    }

    pub async fn update_product(&mut self, id: &str, draft: &ProductDraft) -> ClientResult<Product> {
        self.begin(draft)?;
        let result = {
            let _busy = FlagGuard::hold(&self.in_flight);
            self.api.update_product(id, draft).await
        };
        self.finish_save(result, draft, Some(id), "Product updated successfully!")
            .await
    }

    /// Delete after operator confirmation
    ///
    /// Returns `Ok(false)` when the operator declined; no request is sent.
    pub async fn delete_product(&mut self, id: &str) -> ClientResult<bool> {
        if self.is_busy() {
            return Err(ClientError::Busy);
        }
        if !self
            .prompt
            .confirm("Are you sure you want to delete this product?")
        {
            tracing::debug!("Delete of {} cancelled by operator", id);
            return Ok(false);
        }

        let result = {
            let _busy = FlagGuard::hold(&self.in_flight);
            self.api.delete_product(id).await
        };

        match result {
            Ok(()) => {
                tracing::info!("Deleted product {}", id);
                self.list_products().await;
                self.prompt
                    .notify(Notice::Success("Product deleted successfully!".into()));
                Ok(true)
            }
            Err(e) => {
                tracing::error!("Error deleting product {}: {}", id, e);
                self.prompt.notify(Notice::Failure(format!(
                    "Failed to delete product: {}",
                    e.user_message()
                )));
                Err(e)
            }
        }
    }

    fn begin(&self, draft: &ProductDraft) -> ClientResult<()> {
        if self.is_busy() {
            return Err(ClientError::Busy);
        }
        self.policy.check(draft)?;
        Ok(())
    }

    /// Refresh and notify after any accepted write
    ///
    /// The returned product is the body's own when it sent one, otherwise
    /// the refreshed entry with the reported (or edited) id, otherwise the
    /// newest refreshed entry matching the draft.
    async fn finish_save(
        &mut self,
        result: ClientResult<SaveResponse>,
        draft: &ProductDraft,
        known_id: Option<&str>,
        success: &str,
    ) -> ClientResult<Product> {
        match result {
            Ok(body) => {
                let id = body.product_id().or_else(|| known_id.map(str::to_owned));
                self.list_products().await;
                self.prompt.notify(Notice::Success(success.to_string()));

                let product = body
                    .into_product()
                    .or_else(|| id.as_deref().and_then(|id| self.find(id)))
                    .or_else(|| {
                        self.products
                            .borrow()
                            .iter()
                            .rev()
                            .find(|p| p.matches_draft(draft))
                            .cloned()
                    })
                    .unwrap_or_else(|| Product::from_draft(id.unwrap_or_default(), draft));
                tracing::info!("Saved product {} ({})", product.id, product.name);
                Ok(product)
            }
            Err(e) => {
                tracing::error!("Error saving product: {}", e);
                self.prompt.notify(Notice::Failure(format!(
                    "Failed to save product: {}",
                    e.user_message()
                )));
                Err(e)
            }
        }
    }

    // ========== Form lifecycle ==========

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.form.draft
    }

    pub fn draft_mut(&mut self) -> &mut ProductDraft {
        &mut self.form.draft
    }

    pub fn start_create(&mut self) {
        self.form = FormState::create();
        self.upload_status.send_replace(UploadStatus::idle());
    }

    pub fn start_edit(&mut self, product: &Product) {
        self.form = FormState::edit(product);
        self.upload_status.send_replace(UploadStatus::idle());
    }

    /// Discard the draft unconditionally
    pub fn cancel(&mut self) {
        self.form = FormState::closed();
        self.upload_status.send_replace(UploadStatus::idle());
    }

    pub fn select_category(&mut self, category: &Category) {
        self.form.select_category(category);
    }

    /// Required fields that are still empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.policy.missing_fields(&self.form.draft)
    }

    /// Whether the submit control should be enabled
    pub fn can_submit(&self) -> bool {
        self.form.open && !self.is_busy() && self.policy.is_complete(&self.form.draft)
    }

    /// Create or update depending on what the form is editing
    ///
    /// On success the form closes; on failure the draft is left intact.
    pub async fn submit(&mut self) -> ClientResult<Product> {
        if !self.form.open {
            return Err(ClientError::validation("No product form is open"));
        }
        let draft = self.form.draft.clone();
        let result = match self.form.editing_id().map(str::to_owned) {
            Some(id) => self.update_product(&id, &draft).await,
            None => self.create_product(&draft).await,
        };
        if result.is_ok() {
            self.cancel();
        }
        result
    }

    // ========== Image ==========

    /// Upload an image and store its URL in the draft
    ///
    /// Rejected files produce a notice and no request. On any failure the
    /// draft's `image_url` is left as it was.
    pub async fn upload_draft_image(&mut self, file: &ImageFile) -> ClientResult<String> {
        if self.is_busy() {
            return Err(ClientError::Busy);
        }
        if let Err(e) = self.uploader.validate(file) {
            self.prompt.notify(Notice::Failure(e.user_message()));
            return Err(e);
        }

        match self
            .uploader
            .upload(&self.api, file, &self.upload_status)
            .await
        {
            Ok(url) => {
                self.form.draft.image_url = url.clone();
                Ok(url)
            }
            Err(e) => {
                self.prompt.notify(Notice::Failure(format!(
                    "Failed to upload image: {}",
                    e.user_message()
                )));
                Err(e)
            }
        }
    }

    /// Clear the draft image without touching the stored file
    pub fn remove_draft_image(&mut self) {
        self.form.draft.image_url.clear();
        self.upload_status.send_replace(UploadStatus::idle());
    }
}
