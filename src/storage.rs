//! Stored-file handling - the document store contract and its disk adapter.
//!
//! The core never touches the filesystem directly; it goes through
//! [`DocumentStore`], which persists opaque bytes under a category and hands
//! back a locator string that is safe to keep in a database row. The disk
//! adapter files everything under one configured root directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use crate::errors::{Error, Result};

/// Persists binary files and returns retrievable locators.
///
/// Implementations must be safe to share behind an `Arc` across request
/// handlers. Locators are opaque to callers; only the store that issued a
/// locator can resolve it.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Stores `bytes` under `category`, returning the locator to keep in the
    /// owning database row.
    async fn store(&self, bytes: &[u8], category: &str, file_name: &str) -> Result<String>;

    /// Loads the bytes a locator points at.
    async fn load(&self, locator: &str) -> Result<Vec<u8>>;

    /// Removes the file a locator points at. Removing an already-absent file
    /// is an error; callers decide whether that matters.
    async fn delete(&self, locator: &str) -> Result<()>;
}

/// Disk-backed document store filing uploads under a root directory.
///
/// Locators are relative paths of the form `category/<stamp>-<name>`; the
/// stamp keeps same-named uploads from clobbering each other.
#[derive(Debug, Clone)]
pub struct DiskDocumentStore {
    root: PathBuf,
}

impl DiskDocumentStore {
    /// Creates a store rooted at `root`. The directory is created lazily on
    /// first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, locator: &str) -> Result<PathBuf> {
        // Locators come back out of database rows; refuse anything that could
        // escape the root.
        if locator.contains("..") || Path::new(locator).is_absolute() {
            return Err(Error::Storage {
                message: format!("invalid locator '{locator}'"),
            });
        }
        Ok(self.root.join(locator))
    }
}

/// Reduces a caller-supplied file name to characters safe in a path segment.
fn sanitize_file_name(file_name: &str) -> String {
    let mut cleaned = String::with_capacity(file_name.len());
    for c in file_name.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '-' | '_') {
            cleaned.push(c);
        } else if c == '.' && !cleaned.ends_with('.') && !cleaned.is_empty() {
            // Dots are kept for extensions but never doubled or leading, so a
            // sanitized name can never reintroduce a ".." segment.
            cleaned.push('.');
        } else {
            cleaned.push('-');
        }
    }

    if cleaned.trim_matches(|c| c == '-' || c == '.').is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

#[async_trait]
impl DocumentStore for DiskDocumentStore {
    async fn store(&self, bytes: &[u8], category: &str, file_name: &str) -> Result<String> {
        let category = sanitize_file_name(category);
        let file_name = sanitize_file_name(file_name);
        let locator = format!(
            "{category}/{stamp}-{file_name}",
            stamp = Utc::now().timestamp_millis()
        );

        let path = self.resolve(&locator)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;

        info!("Stored {} bytes at {}", bytes.len(), locator);
        Ok(locator)
    }

    async fn load(&self, locator: &str) -> Result<Vec<u8>> {
        let path = self.resolve(locator)?;
        tokio::fs::read(&path).await.map_err(|e| Error::Storage {
            message: format!("failed to load '{locator}': {e}"),
        })
    }

    async fn delete(&self, locator: &str) -> Result<()> {
        let path = self.resolve(locator)?;
        tokio::fs::remove_file(&path).await.map_err(|e| Error::Storage {
            message: format!("failed to delete '{locator}': {e}"),
        })?;
        debug!("Deleted stored file {}", locator);
        Ok(())
    }
}
