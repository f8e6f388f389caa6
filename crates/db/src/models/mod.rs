//! Entity row structs and create/replace DTOs.
//!
//! Updates are full-field replacements (there are no partial-update DTOs), so
//! the `Create*` types double as the payload for both insert and update.

pub mod figure;
pub mod site;
pub mod time_period;
pub mod user;
