//! Extractor turning submitted form bodies into [`FormData`].
//!
//! Accepts both `application/x-www-form-urlencoded` posts and
//! `multipart/form-data` posts (the latter for forms with an image upload).
//! Only the `image` field is treated as a file; an empty filename means the
//! browser submitted the form without choosing a file.

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Form;
use meros_core::forms::{FormData, UploadedFile};

use crate::error::AppError;
use crate::state::AppState;

/// Name of the file-upload field shared by all entity forms.
const IMAGE_FIELD: &str = "image";

/// A submitted entity form, decoded but not yet validated.
#[derive(Debug)]
pub struct SubmittedForm(pub FormData);

impl FromRequest<AppState> for SubmittedForm {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            read_multipart(multipart).await.map(SubmittedForm)
        } else {
            // Deserializing into pairs keeps repeated names (multi-selects).
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            let mut data = FormData::default();
            for (name, value) in pairs {
                data.push(name, value);
            }
            Ok(SubmittedForm(data))
        }
    }
}

/// Drain a multipart body into a [`FormData`].
async fn read_multipart(mut multipart: Multipart) -> Result<FormData, AppError> {
    let mut data = FormData::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();

        if let Some(filename) = field.file_name().map(str::to_string) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            // An empty filename or empty body means "no file chosen".
            if name == IMAGE_FIELD && !filename.is_empty() && !bytes.is_empty() {
                data.set_upload(UploadedFile {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            data.push(name, text);
        }
    }

    Ok(data)
}
