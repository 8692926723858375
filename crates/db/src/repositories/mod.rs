//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod assessment_rule_repo;
pub mod listing_repo;
pub mod review_repo;
pub mod site_config_repo;
pub mod user_repo;

pub use assessment_rule_repo::AssessmentRuleRepo;
pub use listing_repo::ListingRepo;
pub use review_repo::ReviewRepo;
pub use site_config_repo::SiteConfigRepo;
pub use user_repo::UserRepo;
