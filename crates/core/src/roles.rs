//! Well-known role name constants.
//!
//! These must match the values stored in the `users.role` column. The
//! public marketplace surface is anonymous; only back-office staff have
//! accounts at all.

pub const ROLE_ADMIN: &str = "admin";
