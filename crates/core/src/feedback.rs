//! Rating validation and success derivation for the feedback loop.

use crate::error::CoreError;

/// Ratings at or above this value mark a generation as successful.
pub const SUCCESS_THRESHOLD: i16 = 3;

/// Maximum length for free-text feedback in characters.
pub const MAX_FEEDBACK_LENGTH: usize = 2_000;

/// Validate a user rating: integer 1..=5.
pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Rating must be between 1 and 5 (got {rating})"
        )))
    }
}

/// Validate optional free-text feedback: length check only.
pub fn validate_feedback(feedback: &str) -> Result<(), CoreError> {
    if feedback.len() > MAX_FEEDBACK_LENGTH {
        return Err(CoreError::Validation(format!(
            "Feedback exceeds maximum length of {MAX_FEEDBACK_LENGTH} characters (got {})",
            feedback.len()
        )));
    }
    Ok(())
}

/// Whether a rating marks the generation as successful.
///
/// Derived, never client-settable: `rating >= 3`.
pub fn is_successful(rating: i16) -> bool {
    rating >= SUCCESS_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
        assert!(validate_rating(-3).is_err());
    }

    #[test]
    fn success_derivation_for_all_ratings() {
        assert!(!is_successful(1));
        assert!(!is_successful(2));
        assert!(is_successful(3));
        assert!(is_successful(4));
        assert!(is_successful(5));
    }

    #[test]
    fn feedback_length_limit() {
        assert!(validate_feedback("great prompt").is_ok());
        assert!(validate_feedback(&"x".repeat(MAX_FEEDBACK_LENGTH + 1)).is_err());
    }
}
