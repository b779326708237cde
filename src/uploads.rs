use std::{
    io,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use tokio::fs;

use crate::error::AppError;

/// Disk-backed store for uploaded images.
///
/// Filenames are prefixed with the arrival timestamp in milliseconds so that
/// repeated uploads of the same client filename do not collide.
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Creates the uploads directory if it does not exist yet.
    pub fn new(dir: &str) -> io::Result<Self> {
        let dir = PathBuf::from(dir);
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Writes `bytes` to disk and returns the stored path as the reference
    /// kept on the product record.
    pub async fn store_file(&self, original_name: &str, bytes: &[u8]) -> Result<String, AppError> {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();

        let path = self.dir.join(format!("{stamp}-{original_name}"));
        fs::write(&path, bytes).await?;

        Ok(path.to_string_lossy().into_owned())
    }
}
