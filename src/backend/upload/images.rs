/**
 * Image Storage
 *
 * Owns the image directory: derives stored filenames, persists streamed
 * uploads and removes previously stored images.
 *
 * # File Naming
 *
 * Stored names are a fresh UUIDv4 immediately followed by the client's
 * filename (directory components stripped), e.g.
 * `images/0b6f...c1e2photo.png`. The UUID makes names unique without any
 * locking between concurrent uploads.
 *
 * # Cleanup
 *
 * A new upload is held in a `PendingFile` until the request that wrote it
 * succeeds. Dropping it earlier (an error, a timeout that cancels the
 * handler) removes the file again.
 *
 * `clear` is best effort. Paths outside the image directory, paths with
 * `..` components and files that are already gone are logged and ignored.
 */

use std::path::{Component, Path, PathBuf};

use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// MIME types accepted by the upload adapter
pub const ACCEPTED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpg", "image/jpeg"];

pub fn is_accepted_mime(mime: &str) -> bool {
    ACCEPTED_MIME_TYPES.contains(&mime)
}

/// Image directory handle
#[derive(Clone, Debug)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the directory if it does not exist yet
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Destination path for a new upload
    pub fn destination_for(&self, original_name: &str) -> PathBuf {
        let base = Path::new(original_name)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload");
        self.dir.join(format!("{}{}", Uuid::new_v4(), base))
    }

    /// Open a fresh file at `path` for streaming writes
    pub async fn create(&self, path: &Path) -> std::io::Result<tokio::fs::File> {
        tokio::fs::File::create(path).await
    }

    /// Flush and close a finished upload
    pub async fn finish(&self, mut file: tokio::fs::File) -> std::io::Result<()> {
        file.flush().await?;
        file.sync_all().await
    }

    /// Whether `path` names a file inside the image directory
    pub fn contains(&self, path: &Path) -> bool {
        let escapes = path
            .components()
            .any(|c| matches!(c, Component::ParentDir));
        !escapes && path.starts_with(&self.dir) && path != self.dir
    }

    /// Delete a previously stored image, logging instead of failing
    pub async fn clear(&self, stored_path: &str) {
        let path = Path::new(stored_path);
        if !self.contains(path) {
            tracing::warn!(path = stored_path, "Refusing to delete file outside the image directory");
            return;
        }

        match tokio::fs::remove_file(path).await {
            Ok(()) => tracing::info!(path = stored_path, "Removed old image"),
            Err(e) => tracing::warn!(path = stored_path, "Failed to remove old image: {}", e),
        }
    }
}

/// A stored file that is removed on drop unless kept
#[derive(Debug)]
pub struct PendingFile {
    path: PathBuf,
    keep: bool,
}

impl PendingFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path, keep: false }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keep the file and hand back its path
    pub fn keep(mut self) -> PathBuf {
        self.keep = true;
        std::mem::take(&mut self.path)
    }
}

impl Drop for PendingFile {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        // Sync removal: this also runs when a cancelled future is dropped.
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Removed unfinished upload"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Failed to remove unfinished upload: {}", e)
            }
        }
    }
}

/// Render a stored path the way clients see it
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
