//! Product admin controller.
//!
//! Owns the product collection, the open draft and the view filter, and
//! reconciles the collection with the backend's confirmed responses only.
//! Every failure is reported as a [`Notice`] and leaves the controller usable.

mod notice;

pub use notice::*;

use tokio::sync::watch;

use crate::api::{resolve_image_url, ProductApi};
use crate::collection::{ProductCollection, Reconciled};
use crate::config::{Config, SideEffectsEncoding};
use crate::draft::{Draft, PreviewStore, SelectedFile};
use crate::errors::AdminError;
use crate::filter::{StockSummary, ViewFilter};
use crate::models::Product;
use crate::submit::build_payload;

/// The form currently open and the product it edits, if any.
#[derive(Debug)]
struct Editor {
    draft: Draft,
    editing_id: Option<String>,
}

/// State and operations of the product administration screen.
pub struct ProductAdmin<A> {
    api: A,
    products_url: String,
    side_effects_encoding: SideEffectsEncoding,
    collection: ProductCollection,
    filter: ViewFilter,
    editor: Option<Editor>,
    previews: PreviewStore,
    loading: watch::Sender<bool>,
    notices: Vec<Notice>,
}

impl<A: ProductApi> ProductAdmin<A> {
    pub fn new(api: A, config: &Config) -> Self {
        let (loading, _) = watch::channel(false);
        Self {
            api,
            products_url: config.products_url(),
            side_effects_encoding: config.side_effects_encoding,
            collection: ProductCollection::new(),
            filter: ViewFilter::default(),
            editor: None,
            previews: PreviewStore::new(),
            loading,
            notices: Vec::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    // ==================== COLLECTION ====================

    /// Fetch every product, out of stock included, and replace the collection.
    /// Failures leave an empty collection and are only logged.
    pub async fn load(&mut self) {
        self.loading.send_replace(true);
        match self.api.list_products().await {
            Ok(products) => {
                tracing::info!("Loaded {} products", products.len());
                self.collection.replace_all(products);
            }
            Err(e) => {
                tracing::error!("Failed to load products: {}", e);
                self.collection.clear();
            }
        }
        self.loading.send_replace(false);
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Receiver tracking the loading flag, readable while a load is in flight.
    pub fn loading_watch(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub fn collection(&self) -> &ProductCollection {
        &self.collection
    }

    // ==================== VIEW FILTER ====================

    pub fn filter(&self) -> &ViewFilter {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut ViewFilter {
        &mut self.filter
    }

    /// Products matching the active filter, in collection order.
    pub fn visible_products(&self) -> Vec<&Product> {
        self.filter.apply(&self.collection)
    }

    /// Stock counters over the whole collection, regardless of the filter.
    pub fn stock_summary(&self) -> StockSummary {
        StockSummary::compute(&self.collection)
    }

    pub fn categories(&self) -> Vec<&str> {
        self.collection.categories()
    }

    pub fn image_url(&self, image: &str) -> String {
        resolve_image_url(&self.products_url, image)
    }

    // ==================== DRAFT ====================

    /// Open an empty form for a new product, discarding any open draft.
    pub fn open_create(&mut self) -> &mut Draft {
        self.close_form();
        &mut self
            .editor
            .insert(Editor {
                draft: Draft::new(self.previews.clone()),
                editing_id: None,
            })
            .draft
    }

    /// Open the form pre-filled from the product with `id`.
    pub fn open_edit(&mut self, id: &str) -> Result<&mut Draft, AdminError> {
        let Some(product) = self.collection.get(id) else {
            let error = AdminError::NotFound(format!("Product {} not found", id));
            self.notify_error(&error);
            return Err(error);
        };
        let draft = Draft::from_product(product, self.previews.clone());

        self.close_form();
        Ok(&mut self
            .editor
            .insert(Editor {
                draft,
                editing_id: Some(id.to_string()),
            })
            .draft)
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.editor.as_ref().map(|e| &e.draft)
    }

    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        self.editor.as_mut().map(|e| &mut e.draft)
    }

    /// Id of the product being edited, `None` when creating or closed.
    pub fn editing_id(&self) -> Option<&str> {
        self.editor.as_ref().and_then(|e| e.editing_id.as_deref())
    }

    pub fn is_form_open(&self) -> bool {
        self.editor.is_some()
    }

    /// Replace the draft's file selection; over-limit selections raise a warning.
    pub fn select_files(&mut self, files: Vec<SelectedFile>) -> Result<(), AdminError> {
        let Some(editor) = self.editor.as_mut() else {
            return Err(AdminError::InvalidField(
                "No product form is open".to_string(),
            ));
        };
        let result = editor.draft.select_files(files);
        if let Err(e) = &result {
            self.notices.push(Notice::warning(e.message()));
        }
        result
    }

    /// Cancel the form, releasing the draft's previews.
    pub fn cancel(&mut self) {
        self.close_form();
    }

    fn close_form(&mut self) {
        if let Some(editor) = self.editor.take() {
            editor.draft.discard();
        }
    }

    /// Validate and send the draft. On success the server record is merged into
    /// the collection and the form closes; on failure the draft stays open.
    pub async fn submit(&mut self) -> Result<Product, AdminError> {
        let Some(editor) = self.editor.as_ref() else {
            return Err(AdminError::InvalidField(
                "No product form is open".to_string(),
            ));
        };

        let payload = match build_payload(&editor.draft, self.side_effects_encoding) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("Product form rejected: {}", e);
                self.notify_error(&e);
                return Err(e);
            }
        };

        let result = match editor.editing_id.as_deref() {
            Some(id) => self.api.update_product(id, payload).await,
            None => self.api.create_product(payload).await,
        };

        match result {
            Ok(product) => {
                let outcome = self.collection.upsert(product.clone());
                let message = match outcome {
                    Reconciled::Inserted => "Product created successfully",
                    Reconciled::Updated => "Product updated successfully",
                };
                tracing::info!("{}: {}", message, product.id);
                self.notices.push(Notice::info(message));
                self.close_form();
                Ok(product)
            }
            Err(e) => {
                tracing::error!("Failed to save product: {}", e);
                self.notify_error(&e);
                Err(e)
            }
        }
    }

    // ==================== DELETE ====================

    /// Delete a product after `confirm` approves it. Returns `Ok(false)` when
    /// the user declines; nothing is sent in that case.
    pub async fn delete<F>(&mut self, id: &str, confirm: F) -> Result<bool, AdminError>
    where
        F: FnOnce(&Product) -> bool,
    {
        let Some(product) = self.collection.get(id) else {
            let error = AdminError::NotFound(format!("Product {} not found", id));
            self.notify_error(&error);
            return Err(error);
        };

        if !confirm(product) {
            return Ok(false);
        }

        match self.api.delete_product(id).await {
            Ok(()) => {
                self.collection.remove(id);
                tracing::info!("Product deleted: {}", id);
                self.notices
                    .push(Notice::info("Product deleted successfully"));
                Ok(true)
            }
            Err(e) => {
                tracing::error!("Failed to delete product {}: {}", id, e);
                self.notify_error(&e);
                Err(e)
            }
        }
    }

    // ==================== NOTICES ====================

    fn notify_error(&mut self, error: &AdminError) {
        self.notices.push(Notice::error(error.message()));
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain pending notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Live preview references held by the open draft.
    pub fn live_previews(&self) -> usize {
        self.previews.live_count()
    }
}
