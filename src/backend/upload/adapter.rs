/**
 * File-Upload Adapter
 *
 * Reads a multipart body into an `UploadForm`: at most one accepted image
 * under the `image` field plus every text field. Files with a MIME type
 * outside the allow-list are skipped without error, so the request simply
 * proceeds with no file.
 */

use std::collections::HashMap;

use axum::extract::{multipart::Field, Multipart};
use tokio::io::AsyncWriteExt;

use crate::backend::error::ApiError;
use crate::backend::upload::images::{display_path, is_accepted_mime, ImageStore, PendingFile};

/// Multipart field carrying the image
pub const IMAGE_FIELD: &str = "image";

/// A persisted upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Path of the stored file, as returned to clients
    pub storage_path: String,
    pub original_name: String,
    pub mime_type: String,
}

/// Parsed multipart form
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

fn malformed(e: impl std::fmt::Display) -> ApiError {
    tracing::debug!("Malformed multipart body: {}", e);
    ApiError::bad_request("Malformed multipart body.")
}

/// Stream every field of `multipart`, persisting the first accepted image
///
/// The stored image is removed again if a later field fails or the request
/// is cancelled before the whole body has been read.
pub async fn read_upload(images: &ImageStore, mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();
    let mut stored: Option<PendingFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if let Some(original_name) = field.file_name().map(str::to_string) {
            let mime_type = field.content_type().unwrap_or_default().to_string();

            if name != IMAGE_FIELD || stored.is_some() {
                tracing::debug!(field = %name, "Ignoring extra file field");
                continue;
            }
            if !is_accepted_mime(&mime_type) {
                tracing::debug!(mime = %mime_type, "Declining upload with unsupported type");
                continue;
            }

            let pending = persist(images, field, &original_name).await?;
            let storage_path = display_path(pending.path());
            tracing::info!(path = %storage_path, "Stored uploaded image");
            stored = Some(pending);
            form.file = Some(UploadedFile {
                storage_path,
                original_name,
                mime_type,
            });
        } else {
            let value = field.text().await.map_err(malformed)?;
            form.fields.insert(name, value);
        }
    }

    if let Some(pending) = stored {
        pending.keep();
    }
    Ok(form)
}

async fn persist(images: &ImageStore, mut field: Field<'_>, original_name: &str) -> Result<PendingFile, ApiError> {
    let pending = PendingFile::new(images.destination_for(original_name));
    // Declared after the guard so the handle is closed before removal.
    let mut file = images.create(pending.path()).await?;

    while let Some(chunk) = field.chunk().await.map_err(malformed)? {
        file.write_all(&chunk).await?;
    }
    images.finish(file).await?;

    Ok(pending)
}
