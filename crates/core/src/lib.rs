//! Pure domain logic for the retrade marketplace backend.
//!
//! Everything in this crate is synchronous and I/O-free so it can be used
//! by the repository layer, the API handlers, and tests without a running
//! database. The buyback assessment engine ([`assessment`]) is the heart of
//! the crate; the rest is shared vocabulary (errors, ids, constants).

pub mod assessment;
pub mod catalog;
pub mod config_keys;
pub mod error;
pub mod moderation;
pub mod roles;
pub mod types;
