//! Closed vocabularies for catalogue records.
//!
//! Both enums are stored as lowercase text columns and exposed to form
//! rendering as `(value, label)` choice pairs. Parsing a submitted value
//! rejects anything outside the vocabulary.

use serde::{Deserialize, Serialize};

/// The role a historical figure is catalogued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum FigureRole {
    Ruler,
    Scientist,
    Poet,
    Warrior,
    Architect,
    Other,
}

impl FigureRole {
    /// Every role in form-choice order.
    pub const ALL: [FigureRole; 6] = [
        FigureRole::Ruler,
        FigureRole::Scientist,
        FigureRole::Poet,
        FigureRole::Warrior,
        FigureRole::Architect,
        FigureRole::Other,
    ];

    /// The stored form value.
    pub fn as_str(self) -> &'static str {
        match self {
            FigureRole::Ruler => "ruler",
            FigureRole::Scientist => "scientist",
            FigureRole::Poet => "poet",
            FigureRole::Warrior => "warrior",
            FigureRole::Architect => "architect",
            FigureRole::Other => "other",
        }
    }

    /// Human-readable label shown in form selects and detail pages.
    pub fn label(self) -> &'static str {
        match self {
            FigureRole::Ruler => "Ruler/Khan",
            FigureRole::Scientist => "Scientist/Scholar",
            FigureRole::Poet => "Poet/Writer",
            FigureRole::Warrior => "Military Leader",
            FigureRole::Architect => "Architect/Builder",
            FigureRole::Other => "Other",
        }
    }

    /// Parse a submitted form value. `None` for anything outside the vocabulary.
    pub fn parse(value: &str) -> Option<FigureRole> {
        Self::ALL.iter().copied().find(|r| r.as_str() == value)
    }
}

/// The city a historical site belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum City {
    Tashkent,
    Samarkand,
    Bukhara,
    Khiva,
    Shahrisabz,
    Termez,
    Other,
}

impl City {
    /// Every city in form-choice order.
    pub const ALL: [City; 7] = [
        City::Tashkent,
        City::Samarkand,
        City::Bukhara,
        City::Khiva,
        City::Shahrisabz,
        City::Termez,
        City::Other,
    ];

    /// The stored form value.
    pub fn as_str(self) -> &'static str {
        match self {
            City::Tashkent => "tashkent",
            City::Samarkand => "samarkand",
            City::Bukhara => "bukhara",
            City::Khiva => "khiva",
            City::Shahrisabz => "shahrisabz",
            City::Termez => "termez",
            City::Other => "other",
        }
    }

    /// Human-readable label shown in form selects and detail pages.
    pub fn label(self) -> &'static str {
        match self {
            City::Tashkent => "Tashkent",
            City::Samarkand => "Samarkand",
            City::Bukhara => "Bukhara",
            City::Khiva => "Khiva",
            City::Shahrisabz => "Shahrisabz",
            City::Termez => "Termez",
            City::Other => "Other",
        }
    }

    /// Parse a submitted form value. `None` for anything outside the vocabulary.
    pub fn parse(value: &str) -> Option<City> {
        Self::ALL.iter().copied().find(|c| c.as_str() == value)
    }
}

/// A `(value, label)` pair for rendering a select widget.
#[derive(Debug, Clone, Serialize)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

/// Role choices in form order.
pub fn role_choices() -> Vec<Choice> {
    FigureRole::ALL
        .iter()
        .map(|r| Choice {
            value: r.as_str(),
            label: r.label(),
        })
        .collect()
}

/// City choices in form order.
pub fn city_choices() -> Vec<Choice> {
    City::ALL
        .iter()
        .map(|c| Choice {
            value: c.as_str(),
            label: c.label(),
        })
        .collect()
}
