//! On-disk storage for uploaded media files.
//!
//! Files are written to a hidden `.part` sibling first and renamed into
//! place only once the write succeeded, so a stored path always points at a
//! complete file.

use std::path::{Path, PathBuf};

use intervu_core::error::CoreError;

/// Upload directory handle.
#[derive(Debug, Clone)]
pub struct UploadStorage {
    dir: PathBuf,
}

impl UploadStorage {
    /// Open the upload directory, creating it if absent.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            CoreError::Storage(format!("Cannot create upload dir {}: {e}", dir.display()))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist `data` as `name` inside the upload directory and return the
    /// final path.
    pub async fn write(&self, name: &str, data: &[u8]) -> Result<PathBuf, CoreError> {
        let final_path = self.dir.join(name);
        let part_path = self.dir.join(format!(".{name}.part"));

        if let Err(e) = tokio::fs::write(&part_path, data).await {
            discard(&part_path).await;
            return Err(CoreError::Storage(format!(
                "Cannot write {}: {e}",
                part_path.display()
            )));
        }
        if let Err(e) = tokio::fs::rename(&part_path, &final_path).await {
            discard(&part_path).await;
            return Err(CoreError::Storage(format!(
                "Cannot move upload into place at {}: {e}",
                final_path.display()
            )));
        }

        tracing::debug!(path = %final_path.display(), bytes = data.len(), "Upload stored");
        Ok(final_path)
    }

    /// Best-effort removal. Failures, including a file that is already
    /// gone, are logged and otherwise ignored.
    pub async fn remove(&self, path: &Path) {
        match tokio::fs::remove_file(path).await {
            Ok(()) => tracing::debug!(path = %path.display(), "Upload removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Upload already missing");
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove upload");
            }
        }
    }
}

async fn discard(path: &Path) {
    let _ = tokio::fs::remove_file(path).await;
}
