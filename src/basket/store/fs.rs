use super::BlobStore;
use crate::error::{BasketError, Result};
use std::fs;
use std::path::PathBuf;

/// File-backed blob store: each key lives in `<root>/<key>.json`.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(BasketError::Io)?;
        }
        Ok(())
    }
}

impl BlobStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(BasketError::Io)?;
        Ok(Some(content))
    }

    /// Writes to a sibling temp file first, then renames over the target, so a
    /// crash mid-write never leaves a truncated blob behind.
    fn save(&self, key: &str, blob: &str) -> Result<()> {
        self.ensure_dir()?;
        let path = self.blob_path(key);
        let tmp = self.root.join(format!(".{}.json.tmp", key));
        fs::write(&tmp, blob).map_err(BasketError::Io)?;
        fs::rename(&tmp, &path).map_err(BasketError::Io)?;
        tracing::debug!(path = %path.display(), bytes = blob.len(), "wrote blob");
        Ok(())
    }
}
