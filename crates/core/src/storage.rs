//! Uploaded-image persistence under the media root.
//!
//! Images are stored beneath a configured media root in one subdirectory per
//! entity kind, under a generated UUID filename that keeps the original
//! extension. The database stores the path relative to the media root.

use std::path::Path;

use uuid::Uuid;

use crate::error::CoreError;
use crate::forms::UploadedFile;

/// Subdirectory for time-period images.
pub const PERIOD_IMAGE_DIR: &str = "periods";

/// Subdirectory for historical-figure images.
pub const FIGURE_IMAGE_DIR: &str = "figures";

/// Subdirectory for historical-site images.
pub const SITE_IMAGE_DIR: &str = "sites";

/// Accepted image file extensions (lowercase, without the dot).
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Lowercased extension of `filename`, if it has one.
fn extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

/// Whether `filename` carries an accepted image extension.
pub fn is_allowed_image(filename: &str) -> bool {
    extension(filename)
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Persist a validated upload under `media_root/subdir`, returning the path
/// relative to the media root (e.g. `figures/3f2a....jpg`).
///
/// Callers must only invoke this after form validation has accepted the
/// upload; a rejected submission must leave no file behind.
pub async fn save_image(
    media_root: &Path,
    subdir: &str,
    upload: &UploadedFile,
) -> Result<String, CoreError> {
    let ext = extension(&upload.filename).ok_or_else(|| {
        CoreError::Validation(format!("'{}' has no file extension", upload.filename))
    })?;

    let dir = media_root.join(subdir);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| CoreError::Internal(format!("Failed to create media dir: {e}")))?;

    let relative = format!("{subdir}/{}.{ext}", Uuid::new_v4());
    tokio::fs::write(media_root.join(&relative), &upload.bytes)
        .await
        .map_err(|e| CoreError::Internal(format!("Failed to write image: {e}")))?;

    tracing::debug!(path = %relative, size = upload.bytes.len(), "Stored uploaded image");
    Ok(relative)
}
