//! Process-local preview references for files selected in the draft.
//!
//! A reference stays live until it is explicitly revoked. The store never
//! frees references on its own; the draft editor revokes them whenever a
//! selection is replaced, a file is removed or the draft is discarded.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

use super::files::SelectedFile;

/// Opaque handle to a preview, rendered as `preview:<uuid>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewRef(String);

impl PreviewRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PreviewRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Preview payload kept alive for display.
#[derive(Debug, Clone)]
pub struct PreviewData {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Arc<Vec<u8>>,
}

/// Registry of live preview references. Clones share the same registry.
#[derive(Debug, Clone, Default)]
pub struct PreviewStore {
    inner: Arc<Mutex<HashMap<PreviewRef, PreviewData>>>,
}

impl PreviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<PreviewRef, PreviewData>> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Create a preview reference for a selected file.
    pub fn create(&self, file: &SelectedFile) -> PreviewRef {
        let reference = PreviewRef(format!("preview:{}", Uuid::new_v4()));
        self.entries().insert(
            reference.clone(),
            PreviewData {
                file_name: file.name.clone(),
                mime_type: file.mime_type.clone(),
                bytes: Arc::clone(&file.bytes),
            },
        );
        reference
    }

    /// Release a preview reference. Returns false if it was not live.
    pub fn revoke(&self, reference: &PreviewRef) -> bool {
        let released = self.entries().remove(reference).is_some();
        if !released {
            tracing::warn!("Preview {} was already revoked", reference);
        }
        released
    }

    pub fn resolve(&self, reference: &PreviewRef) -> Option<PreviewData> {
        self.entries().get(reference).cloned()
    }

    pub fn is_live(&self, reference: &PreviewRef) -> bool {
        self.entries().contains_key(reference)
    }

    /// Number of references not yet revoked.
    pub fn live_count(&self) -> usize {
        self.entries().len()
    }
}
