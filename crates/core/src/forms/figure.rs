//! Historical-figure form validation.

use crate::catalog::FigureRole;
use crate::types::DbId;

use super::{check_image, optional_year, required_id, required_text, FormData, FormErrors};

/// Validated figure form fields, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigureForm {
    pub name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub biography: String,
    pub role: FigureRole,
    /// The owning period. Existence is checked against the store by the handler.
    pub time_period: DbId,
}

/// Validate raw submitted values against the figure field configuration.
pub fn validate(data: &FormData) -> Result<FigureForm, FormErrors> {
    let mut errors = FormErrors::default();

    let name = required_text(data, &mut errors, "name");
    let birth_year = optional_year(data, &mut errors, "birth_year");
    let death_year = optional_year(data, &mut errors, "death_year");
    let biography = required_text(data, &mut errors, "biography");
    let role = match data.value("role").filter(|v| !v.is_empty()) {
        Some(value) => match FigureRole::parse(value) {
            Some(role) => Some(role),
            None => {
                errors.add("role", format!("'{value}' is not a valid choice."));
                None
            }
        },
        // The original form defaults the role to "other" when unset.
        None => Some(FigureRole::Other),
    };
    let time_period = required_id(data, &mut errors, "time_period");
    check_image(data, &mut errors);

    match (name, birth_year, death_year, biography, role, time_period) {
        (
            Some(name),
            Some(birth_year),
            Some(death_year),
            Some(biography),
            Some(role),
            Some(time_period),
        ) => errors.into_result(FigureForm {
            name,
            birth_year,
            death_year,
            biography,
            role,
            time_period,
        }),
        _ => Err(errors),
    }
}
