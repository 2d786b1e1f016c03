//! Input validation for the generation pipeline.
//!
//! Everything here runs before any side effect: a rejected idea, model, or
//! style must consume no quota and make no provider call.

use crate::error::CoreError;

/// Maximum accepted idea length in characters.
pub const MAX_IDEA_LENGTH: usize = 2_000;

/// Target models the provider can author prompts for.
pub const MODELS: &[&str] = &["sora", "veo", "runway", "pika", "kling", "hailuo"];

/// Prompt styles offered by the authoring UI.
pub const STYLES: &[&str] = &[
    "cinematic",
    "documentary",
    "anime",
    "realistic",
    "cyberpunk",
    "vintage",
    "minimalist",
    "noir",
];

/// Validate a free-text idea: non-blank and within length limit.
pub fn validate_idea(idea: &str) -> Result<(), CoreError> {
    if idea.trim().is_empty() {
        return Err(CoreError::Validation(
            "Idea must not be empty".to_string(),
        ));
    }
    if idea.len() > MAX_IDEA_LENGTH {
        return Err(CoreError::Validation(format!(
            "Idea exceeds maximum length of {MAX_IDEA_LENGTH} characters (got {})",
            idea.len()
        )));
    }
    Ok(())
}

/// Validate that a model name is one of the known targets.
pub fn validate_model(model: &str) -> Result<(), CoreError> {
    if MODELS.contains(&model) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown model '{model}'. Valid models: {}",
            MODELS.join(", ")
        )))
    }
}

/// Validate that a style name is one of the known styles.
pub fn validate_style(style: &str) -> Result<(), CoreError> {
    if STYLES.contains(&style) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown style '{style}'. Valid styles: {}",
            STYLES.join(", ")
        )))
    }
}
