//! Time-period form validation.

use super::{check_image, optional_year, required_text, required_year, FormData, FormErrors};

/// Validated time-period form fields, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodForm {
    pub name: String,
    pub start_year: i32,
    /// `None` means the period is ongoing.
    pub end_year: Option<i32>,
    pub description: String,
}

/// Validate raw submitted values against the period field configuration.
pub fn validate(data: &FormData) -> Result<PeriodForm, FormErrors> {
    let mut errors = FormErrors::default();

    let name = required_text(data, &mut errors, "name");
    let start_year = required_year(data, &mut errors, "start_year");
    let end_year = optional_year(data, &mut errors, "end_year");
    let description = required_text(data, &mut errors, "description");
    check_image(data, &mut errors);

    match (name, start_year, end_year, description) {
        (Some(name), Some(start_year), Some(end_year), Some(description)) => errors.into_result(
            PeriodForm {
                name,
                start_year,
                end_year,
                description,
            },
        ),
        _ => Err(errors),
    }
}
