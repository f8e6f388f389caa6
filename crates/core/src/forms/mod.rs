//! Form coercion and field-level validation.
//!
//! Handlers collect raw submitted values into a [`FormData`] and pass it to a
//! per-entity validator ([`period`], [`figure`], [`site`]). Validators coerce
//! strings into typed fields against an explicit per-field configuration
//! (required-ness, integer parsing, enum membership) and accumulate failures
//! into a [`FormErrors`] map. Nothing is persisted unless validation succeeds.

use std::collections::BTreeMap;

use serde::Serialize;

pub mod figure;
pub mod period;
pub mod site;

/// Standard message for a missing required field.
pub const MSG_REQUIRED: &str = "This field is required.";

/// Standard message for a year field that is not an integer.
pub const MSG_WHOLE_YEAR: &str = "Enter a whole year, e.g. 1370.";

/// Raw submitted form data: ordered text fields plus an optional file upload.
///
/// Fields are kept as a multimap because select-multiple widgets submit the
/// same name once per chosen value.
#[derive(Debug, Default, Clone)]
pub struct FormData {
    fields: Vec<(String, String)>,
    upload: Option<UploadedFile>,
}

/// An uploaded file captured from a multipart submission.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl FormData {
    /// Append a text field value.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Attach the uploaded image file, if any.
    pub fn set_upload(&mut self, upload: UploadedFile) {
        self.upload = Some(upload);
    }

    /// First submitted value for `name`, trimmed. `None` if absent.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.trim())
    }

    /// All submitted values for `name`, trimmed, empty entries dropped.
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
            .collect()
    }

    /// The uploaded image file, if one was submitted.
    pub fn upload(&self) -> Option<&UploadedFile> {
        self.upload.as_ref()
    }

    /// Consume the form, returning the upload for persistence.
    pub fn take_upload(&mut self) -> Option<UploadedFile> {
        self.upload.take()
    }
}

/// Accumulated field-level validation failures, field name -> messages.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    /// Record a failure message against a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    /// True when no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for a field, if any.
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Turn an empty error set into `Ok(value)`, a non-empty one into `Err(self)`.
    pub fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl std::error::Error for FormErrors {}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Coerce a required text field. Records [`MSG_REQUIRED`] when missing/blank.
fn required_text(data: &FormData, errors: &mut FormErrors, field: &str) -> Option<String> {
    match data.value(field) {
        Some(v) if !v.is_empty() => Some(v.to_string()),
        _ => {
            errors.add(field, MSG_REQUIRED);
            None
        }
    }
}

/// Coerce a required integer year field.
fn required_year(data: &FormData, errors: &mut FormErrors, field: &str) -> Option<i32> {
    match data.value(field) {
        Some(v) if !v.is_empty() => match v.parse::<i32>() {
            Ok(year) => Some(year),
            Err(_) => {
                errors.add(field, MSG_WHOLE_YEAR);
                None
            }
        },
        _ => {
            errors.add(field, MSG_REQUIRED);
            None
        }
    }
}

/// Coerce an optional integer year field. Blank submits as `Ok(None)`.
///
/// The outer `Option` is `None` when the value was present but unparseable.
fn optional_year(data: &FormData, errors: &mut FormErrors, field: &str) -> Option<Option<i32>> {
    match data.value(field) {
        Some(v) if !v.is_empty() => match v.parse::<i32>() {
            Ok(year) => Some(Some(year)),
            Err(_) => {
                errors.add(field, MSG_WHOLE_YEAR);
                None
            }
        },
        _ => Some(None),
    }
}

/// Coerce a required record-id select field (positive integer).
fn required_id(data: &FormData, errors: &mut FormErrors, field: &str) -> Option<i64> {
    match data.value(field) {
        Some(v) if !v.is_empty() => match v.parse::<i64>() {
            Ok(id) if id > 0 => Some(id),
            _ => {
                errors.add(field, "Select a valid choice.");
                None
            }
        },
        _ => {
            errors.add(field, MSG_REQUIRED);
            None
        }
    }
}

/// Coerce a multi-select of record ids. Blank submits as an empty list.
fn id_list(data: &FormData, errors: &mut FormErrors, field: &str) -> Option<Vec<i64>> {
    let mut ids = Vec::new();
    for raw in data.values(field) {
        match raw.parse::<i64>() {
            Ok(id) if id > 0 => ids.push(id),
            _ => {
                errors.add(field, format!("'{raw}' is not a valid choice."));
                return None;
            }
        }
    }
    Some(ids)
}

/// Check the uploaded image filename against the extension allow-list.
///
/// The upload itself stays untouched here; persistence happens only after the
/// whole form validates.
fn check_image(data: &FormData, errors: &mut FormErrors) {
    if let Some(upload) = data.upload() {
        if !crate::storage::is_allowed_image(&upload.filename) {
            errors.add(
                "image",
                "Upload a valid image file (png, jpg, jpeg, gif, or webp).",
            );
        }
    }
}
