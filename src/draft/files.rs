//! Binary image files selected for upload, paired with their previews.

use std::path::Path;
use std::sync::Arc;

use super::preview::{PreviewRef, PreviewStore};
use crate::errors::AdminError;

/// Maximum number of files accepted in one selection.
pub const MAX_FILES: usize = 5;

/// A file picked by the user, held in memory until submit.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Arc<Vec<u8>>,
}

impl SelectedFile {
    /// Create a file, inferring its MIME type from the name.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime_type = mime_for_name(&name).to_string();
        Self {
            name,
            mime_type,
            bytes: Arc::new(bytes),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    /// Read a file from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, AdminError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(name, bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

fn mime_for_name(name: &str) -> &'static str {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Ordered files with one preview reference per file, index-aligned.
#[derive(Debug, Default)]
pub struct FileSelection {
    files: Vec<SelectedFile>,
    previews: Vec<PreviewRef>,
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn previews(&self) -> &[PreviewRef] {
        &self.previews
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Replace the selection. More than [`MAX_FILES`] files are rejected
    /// as a whole and the current selection is kept.
    pub fn select(
        &mut self,
        files: Vec<SelectedFile>,
        store: &PreviewStore,
    ) -> Result<(), AdminError> {
        if files.len() > MAX_FILES {
            tracing::warn!(
                "Rejected selection of {} files (maximum {})",
                files.len(),
                MAX_FILES
            );
            return Err(AdminError::Validation(format!(
                "You can upload a maximum of {} images",
                MAX_FILES
            )));
        }

        self.release(store);
        self.previews = files.iter().map(|file| store.create(file)).collect();
        self.files = files;
        Ok(())
    }

    /// Remove the file and preview at `index`; later entries shift down.
    pub fn remove(&mut self, index: usize, store: &PreviewStore) -> Option<SelectedFile> {
        if index >= self.files.len() {
            return None;
        }
        let preview = self.previews.remove(index);
        store.revoke(&preview);
        Some(self.files.remove(index))
    }

    /// Revoke every preview and drop all files.
    pub fn release(&mut self, store: &PreviewStore) {
        for preview in self.previews.drain(..) {
            store.revoke(&preview);
        }
        self.files.clear();
    }
}
