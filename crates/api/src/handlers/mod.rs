//! Page handlers.

pub mod auth;
pub mod figure;
pub mod home;
pub mod period;
pub mod site;

use meros_core::forms::FormData;
use meros_core::storage;

use crate::error::AppResult;
use crate::state::AppState;

/// Persist the form's image upload (if any) under the media root, returning
/// the stored relative path.
///
/// Must only be called after the form has validated; a rejected submission
/// writes nothing.
pub(crate) async fn store_upload(
    state: &AppState,
    data: &mut FormData,
    subdir: &str,
) -> AppResult<Option<String>> {
    match data.take_upload() {
        Some(upload) => {
            let path = storage::save_image(&state.config.media_root, subdir, &upload).await?;
            Ok(Some(path))
        }
        None => Ok(None),
    }
}
