//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&PgPool` as the first argument.

pub mod figure_repo;
pub mod period_repo;
pub mod site_repo;
pub mod user_repo;

pub use figure_repo::FigureRepo;
pub use period_repo::PeriodRepo;
pub use site_repo::SiteRepo;
pub use user_repo::UserRepo;
