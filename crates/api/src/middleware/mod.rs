//! Request extractors: authentication, role enforcement, guest identity.

pub mod auth;
pub mod guest;
pub mod rbac;
