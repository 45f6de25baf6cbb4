//! Asynchronous file reading into data-URLs

use std::path::Path;

use crate::error::{MedcryptError, MedcryptResult};

use super::data_url::DataUrl;
use super::mime::mime_from_path;

/// Default upper bound on input file size (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Read a file into a data-URL
///
/// The MIME type comes from the file extension. Files larger than
/// `max_size` bytes are rejected before being read.
pub async fn file_to_data_url(path: impl AsRef<Path>, max_size: u64) -> MedcryptResult<DataUrl> {
    let path = path.as_ref();

    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| MedcryptError::Io(format!("Failed to stat {}: {}", path.display(), e)))?;
    if !metadata.is_file() {
        return Err(MedcryptError::Io(format!(
            "Not a regular file: {}",
            path.display()
        )));
    }
    if metadata.len() > max_size {
        return Err(MedcryptError::FileTooLarge {
            size: metadata.len(),
            limit: max_size,
        });
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| MedcryptError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    Ok(DataUrl::new(mime_from_path(path), bytes))
}
