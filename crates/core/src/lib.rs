//! Domain layer for the Meros heritage catalogue.
//!
//! - [`types`] -- shared id/timestamp aliases.
//! - [`error`] -- the `CoreError` domain error enum.
//! - [`catalog`] -- closed vocabularies (figure roles, cities).
//! - [`forms`] -- form coercion and field-level validation.
//! - [`storage`] -- uploaded-image persistence under the media root.

pub mod catalog;
pub mod error;
pub mod forms;
pub mod storage;
pub mod types;
