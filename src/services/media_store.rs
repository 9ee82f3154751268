// src/services/media_store.rs
// DOCUMENTATION: Local storage for uploaded previews
// PURPOSE: Write JPEG previews under the media root and map names to URLs

use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
    base_url: String,
}

/// Characters of the category kept in a stored file name
const MAX_NAME_CHARS: usize = 48;

/// Keep letters and digits (any script) so categories stay readable in names
fn sanitize(category: &str) -> String {
    let cleaned: String = category
        .chars()
        .take(MAX_NAME_CHARS)
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        "image".to_string()
    } else {
        trimmed.to_string()
    }
}

impl MediaStore {
    pub fn new<P: Into<PathBuf>>(root: P, base_url: &str) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create the media root if missing
    pub async fn ensure_root(&self) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            log::error!("Failed to create media root {}: {}", self.root.display(), e);
            AppError::StorageError(e.to_string())
        })
    }

    /// File name for a new preview of `category`
    pub fn file_name_for(category: &str) -> String {
        format!("{}_{}.jpg", sanitize(category), Uuid::new_v4().simple())
    }

    /// Resolve a stored file name, refusing anything that could leave the root
    pub fn resolve(&self, file_name: &str) -> Option<PathBuf> {
        let valid = !file_name.is_empty()
            && !file_name.contains("..")
            && !file_name.contains('/')
            && !file_name.contains('\\');
        valid.then(|| self.root.join(file_name))
    }

    pub fn url_for(&self, file_name: &str) -> String {
        format!("{}/{}", self.base_url, file_name)
    }

    /// Encode a preview as JPEG and write it; returns the stored file name
    pub async fn save_preview(&self, category: &str, preview: &RgbImage) -> Result<String, AppError> {
        let mut encoded = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(preview.clone())
            .write_to(&mut encoded, ImageFormat::Jpeg)
            .map_err(|e| AppError::StorageError(format!("JPEG encoding failed: {}", e)))?;

        self.ensure_root().await?;

        let file_name = Self::file_name_for(category);
        let path = self.root.join(&file_name);
        tokio::fs::write(&path, encoded.into_inner()).await.map_err(|e| {
            log::error!("Failed to write {}: {}", path.display(), e);
            AppError::StorageError(e.to_string())
        })?;

        log::debug!("Stored preview {}", path.display());
        Ok(file_name)
    }

    pub async fn read(&self, file_name: &str) -> Result<Vec<u8>, AppError> {
        let path = self
            .resolve(file_name)
            .ok_or_else(|| AppError::NotFound(file_name.to_string()))?;

        tokio::fs::read(&path)
            .await
            .map_err(|_| AppError::NotFound(file_name.to_string()))
    }

    /// Remove a stored file; a missing file is not an error
    pub async fn remove(&self, file_name: &str) -> Result<(), AppError> {
        let Some(path) = self.resolve(file_name) else {
            return Ok(());
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::StorageError(e.to_string())),
        }
    }
}
