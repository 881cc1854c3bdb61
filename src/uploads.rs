//! On-disk storage for teacher photos, notice attachments and gallery images.
//!
//! Files live flat under the configured directory and are addressed by the
//! public path `/uploads/<name>`, which is what gets stored in the database.

use chrono::Utc;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

pub const PUBLIC_PREFIX: &str = "/uploads/";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Uploaded file is empty")]
    Empty,

    #[error("Invalid upload path: {0}")]
    InvalidPath(String),

    #[error("Upload storage error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_dir(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Write `bytes` under a fresh name that keeps the original extension.
    /// Returns the public path.
    pub async fn save(&self, original_name: Option<&str>, bytes: &[u8]) -> Result<String, UploadError> {
        if bytes.is_empty() {
            return Err(UploadError::Empty);
        }

        let name = generated_name(original_name);
        tokio::fs::write(self.root.join(&name), bytes).await?;
        debug!("Stored upload {} ({} bytes)", name, bytes.len());

        Ok(format!("{PUBLIC_PREFIX}{name}"))
    }

    /// Delete the file behind a stored public path. A file that is already
    /// gone is not an error.
    pub async fn remove(&self, public_path: &str) -> Result<(), UploadError> {
        let path = self.resolve(public_path)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Upload {} was already missing", public_path);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Same as `remove`, logging instead of failing. Used after the owning
    /// row is already gone.
    pub async fn discard(&self, public_path: Option<&str>) {
        if let Some(path) = public_path {
            if let Err(e) = self.remove(path).await {
                warn!("Failed to remove upload {}: {}", path, e);
            }
        }
    }

    /// Map a public path back to a file under the root.
    pub fn resolve(&self, public_path: &str) -> Result<PathBuf, UploadError> {
        let name = public_path
            .strip_prefix(PUBLIC_PREFIX)
            .ok_or_else(|| UploadError::InvalidPath(public_path.to_string()))?;

        let plain = !name.is_empty()
            && !name.contains(['/', '\\'])
            && name != "."
            && name != "..";
        if !plain {
            return Err(UploadError::InvalidPath(public_path.to_string()));
        }

        Ok(self.root.join(name))
    }
}

fn generated_name(original_name: Option<&str>) -> String {
    let stamp = Utc::now().timestamp_millis();
    let unique = Uuid::new_v4().simple().to_string();
    let short = &unique[..8];

    match original_name.and_then(extension) {
        Some(ext) => format!("{stamp}-{short}.{ext}"),
        None => format!("{stamp}-{short}"),
    }
}

/// Lowercased extension, kept only if it is short and alphanumeric.
fn extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?;
    if ext.is_empty() || ext.len() > 10 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
