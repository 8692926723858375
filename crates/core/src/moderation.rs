//! Review moderation constants and validation.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Review statuses
// ---------------------------------------------------------------------------

/// Freshly submitted, awaiting moderation.
pub const REVIEW_PENDING: &str = "pending";
/// Approved by an admin and visible on the public site.
pub const REVIEW_APPROVED: &str = "approved";

/// Valid values for `reviews.status`.
pub const REVIEW_STATUSES: &[&str] = &[REVIEW_PENDING, REVIEW_APPROVED];

pub fn is_valid_review_status(status: &str) -> bool {
    REVIEW_STATUSES.contains(&status)
}

// ---------------------------------------------------------------------------
// Submission limits
// ---------------------------------------------------------------------------

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Maximum accepted length for a review body, in characters.
pub const MAX_REVIEW_BODY_CHARS: usize = 2000;

/// Maximum accepted length for an author name, in characters.
pub const MAX_AUTHOR_NAME_CHARS: usize = 50;

/// Validate a public review submission before it is written.
pub fn validate_review(author_name: &str, rating: i32, body: &str) -> Result<(), CoreError> {
    if author_name.trim().is_empty() {
        return Err(CoreError::Validation("author_name must not be empty".into()));
    }
    if author_name.chars().count() > MAX_AUTHOR_NAME_CHARS {
        return Err(CoreError::Validation(format!(
            "author_name must be at most {MAX_AUTHOR_NAME_CHARS} characters"
        )));
    }
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )));
    }
    if body.trim().is_empty() {
        return Err(CoreError::Validation("body must not be empty".into()));
    }
    if body.chars().count() > MAX_REVIEW_BODY_CHARS {
        return Err(CoreError::Validation(format!(
            "body must be at most {MAX_REVIEW_BODY_CHARS} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_normal_review() {
        assert!(validate_review("Keiko", 5, "Fast and safe trade.").is_ok());
    }

    #[test]
    fn rejects_out_of_range_ratings() {
        assert!(validate_review("Keiko", 0, "body").is_err());
        assert!(validate_review("Keiko", 6, "body").is_err());
        assert!(validate_review("Keiko", 1, "body").is_ok());
        assert!(validate_review("Keiko", 5, "body").is_ok());
    }

    #[test]
    fn rejects_blank_fields() {
        assert!(validate_review("  ", 4, "body").is_err());
        assert!(validate_review("Keiko", 4, "   ").is_err());
    }

    #[test]
    fn rejects_oversized_body() {
        let body = "x".repeat(MAX_REVIEW_BODY_CHARS + 1);
        assert!(validate_review("Keiko", 4, &body).is_err());
    }

    #[test]
    fn review_status_validation() {
        assert!(is_valid_review_status("pending"));
        assert!(is_valid_review_status("approved"));
        assert!(!is_valid_review_status("rejected"));
    }
}
