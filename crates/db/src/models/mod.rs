//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the writes the API accepts

pub mod assessment_rule;
pub mod listing;
pub mod review;
pub mod site_config;
pub mod user;
