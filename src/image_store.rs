//! Storage for the most recently generated image
//!
//! There is exactly one slot: every generation overwrites it, and the
//! public URL never changes.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const GENERATED_FILE_NAME: &str = "generated.png";
pub const STATIC_URL_PREFIX: &str = "/static";

#[derive(Error, Debug)]
pub enum ImageStoreError {
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn write_err(path: &Path) -> impl FnOnce(std::io::Error) -> ImageStoreError {
    let path = path.to_path_buf();
    move |source| ImageStoreError::Write { path, source }
}

/// Where generated images end up
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist the image and return the URL it is served from
    async fn save(&self, bytes: &[u8]) -> Result<String, ImageStoreError>;
}

/// Writes the image into the static directory served over HTTP
#[derive(Debug, Clone)]
pub struct FileImageStore {
    dir: PathBuf,
}

impl FileImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(GENERATED_FILE_NAME)
    }

    pub fn url() -> String {
        format!("{STATIC_URL_PREFIX}/{GENERATED_FILE_NAME}")
    }
}

#[async_trait]
impl ImageStore for FileImageStore {
    async fn save(&self, bytes: &[u8]) -> Result<String, ImageStoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(write_err(&self.dir))?;

        // Write a sibling first so readers never see a half-written file
        let target = self.path();
        let staging = self.dir.join(format!(".{GENERATED_FILE_NAME}.tmp"));
        tokio::fs::write(&staging, bytes)
            .await
            .map_err(write_err(&staging))?;
        tokio::fs::rename(&staging, &target)
            .await
            .map_err(write_err(&target))?;

        tracing::debug!(path = %target.display(), bytes = bytes.len(), "Saved generated image");
        Ok(Self::url())
    }
}
