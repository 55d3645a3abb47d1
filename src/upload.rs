//! Photo upload
//!
//! Validation and disk persistence for bootcamp photos. The HTTP handler
//! runs the pipeline strictly in order: validate, write the file, then
//! update the record, then respond. A failed write surfaces before anything
//! is updated.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Writes uploaded photos under a configured directory
#[derive(Debug, Clone)]
pub struct PhotoStore {
    root: PathBuf,
}

impl PhotoStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn path_of(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    /// Persist one photo; parent directories are created as needed
    pub fn write(&self, filename: &str, data: &[u8]) -> ApiResult<()> {
        std::fs::create_dir_all(&self.root).map_err(|e| ApiError::Io(e.to_string()))?;
        std::fs::write(self.path_of(filename), data).map_err(|e| ApiError::Io(e.to_string()))
    }
}

/// Reject anything that is not an image
pub fn validate_content_type(content_type: &str) -> ApiResult<()> {
    if content_type.starts_with("image") {
        Ok(())
    } else {
        Err(ApiError::bad_request("Please upload an image file"))
    }
}

/// Reject files over the configured maximum
pub fn validate_size(size: u64, max: u64) -> ApiResult<()> {
    if size <= max {
        Ok(())
    } else {
        Err(ApiError::bad_request(format!(
            "Please upload an image less than {} bytes",
            max
        )))
    }
}

/// Deterministic photo filename: `photo_<bootcampId><ext>`, extension taken
/// from the original upload name
pub fn photo_filename(bootcamp_id: Uuid, original_name: &str) -> String {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("jpg");
    format!("photo_{}.{}", bootcamp_id, extension)
}
