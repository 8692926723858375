//! Well-known `site_configs` keys.
//!
//! Site configuration is a free-form key-value store; the constants here
//! are the keys the application itself reads, kept in one place so the
//! admin and public surfaces cannot drift apart.

/// Free-text remaining-winner count shown on the public campaign banner.
pub const CAMPAIGN_REMAINING_WINNERS: &str = "campaign_remaining_winners";

/// Maximum accepted length for a config value.
pub const MAX_CONFIG_VALUE_LEN: usize = 1000;
