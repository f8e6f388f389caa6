//! Historical-site form validation.

use crate::catalog::City;
use crate::types::DbId;

use super::{check_image, id_list, optional_year, required_text, FormData, FormErrors};

/// Validated site form fields, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteForm {
    pub name: String,
    pub city: City,
    pub built_year: Option<i32>,
    pub description: String,
    /// Associated period ids; empty is allowed.
    pub time_periods: Vec<DbId>,
    /// Associated figure ids; empty is allowed.
    pub related_figures: Vec<DbId>,
}

/// Validate raw submitted values against the site field configuration.
pub fn validate(data: &FormData) -> Result<SiteForm, FormErrors> {
    let mut errors = FormErrors::default();

    let name = required_text(data, &mut errors, "name");
    let city = match data.value("city").filter(|v| !v.is_empty()) {
        Some(value) => match City::parse(value) {
            Some(city) => Some(city),
            None => {
                errors.add("city", format!("'{value}' is not a valid choice."));
                None
            }
        },
        None => {
            errors.add("city", super::MSG_REQUIRED);
            None
        }
    };
    let built_year = optional_year(data, &mut errors, "built_year");
    let description = required_text(data, &mut errors, "description");
    let time_periods = id_list(data, &mut errors, "time_periods");
    let related_figures = id_list(data, &mut errors, "related_figures");
    check_image(data, &mut errors);

    match (
        name,
        city,
        built_year,
        description,
        time_periods,
        related_figures,
    ) {
        (
            Some(name),
            Some(city),
            Some(built_year),
            Some(description),
            Some(time_periods),
            Some(related_figures),
        ) => errors.into_result(SiteForm {
            name,
            city,
            built_year,
            description,
            time_periods,
            related_figures,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(fields: &[(&str, &str)]) -> FormData {
        let mut data = FormData::default();
        for (name, value) in fields {
            data.push(*name, *value);
        }
        data
    }

    #[test]
    fn test_valid_form_with_associations() {
        let data = form(&[
            ("name", "Registan"),
            ("city", "samarkand"),
            ("built_year", "1417"),
            ("description", "Ensemble of three madrasahs."),
            ("time_periods", "1"),
            ("time_periods", "2"),
            ("related_figures", "7"),
        ]);
        let site = validate(&data).expect("form should validate");
        assert_eq!(site.city, City::Samarkand);
        assert_eq!(site.time_periods, vec![1, 2]);
        assert_eq!(site.related_figures, vec![7]);
    }

    #[test]
    fn test_associations_optional() {
        let data = form(&[
            ("name", "Ark of Bukhara"),
            ("city", "bukhara"),
            ("description", "Fortress citadel."),
        ]);
        let site = validate(&data).expect("form should validate");
        assert!(site.time_periods.is_empty());
        assert!(site.related_figures.is_empty());
        assert_eq!(site.built_year, None);
    }

    #[test]
    fn test_city_outside_vocabulary_rejected() {
        let data = form(&[
            ("name", "Lost City"),
            ("city", "atlantis"),
            ("description", "x"),
        ]);
        let errors = validate(&data).unwrap_err();
        assert_eq!(
            errors.field("city"),
            Some(&["'atlantis' is not a valid choice.".to_string()][..])
        );
    }

    #[test]
    fn test_missing_city_rejected() {
        let data = form(&[("name", "Lost City"), ("description", "x")]);
        let errors = validate(&data).unwrap_err();
        assert!(errors.field("city").is_some());
    }
}
