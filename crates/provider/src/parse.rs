//! Defensive parsing of provider output.
//!
//! The model is asked for strict JSON but routinely wraps it in markdown
//! fences or prose. Extraction tries, in order: the whole content as JSON,
//! the content with code fences stripped, the slice between the first `{`
//! and the last `}`. When nothing parses, the entire content becomes the
//! prompt text and the structured guess stays empty -- a generation never
//! fails because the decomposition was unparseable.

use promptforge_core::structured::{reassemble, StructuredGuess, StructuredPrompt};
use serde::Deserialize;

use crate::ProviderCompletion;

/// JSON shape the system prompt asks for: the final prompt text plus the
/// structured elements at the same level.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCompletion {
    prompt: String,
    #[serde(flatten)]
    structured: StructuredGuess,
}

/// Parse raw model content into a completion.
pub fn parse_completion(content: &str) -> ProviderCompletion {
    let Some(raw) = extract_json(content) else {
        return ProviderCompletion {
            prompt_text: content.trim().to_string(),
            structured: StructuredGuess::default(),
            tokens_used: None,
        };
    };

    // A decomposition without prompt text is still usable: reassemble one.
    let prompt_text = if raw.prompt.trim().is_empty() {
        reassemble(&StructuredPrompt::from_guess(raw.structured.clone()))
    } else {
        raw.prompt.trim().to_string()
    };

    ProviderCompletion {
        prompt_text,
        structured: raw.structured,
        tokens_used: None,
    }
}

/// Try the extraction ladder; `None` when no candidate parses.
fn extract_json(content: &str) -> Option<RawCompletion> {
    let trimmed = content.trim();

    if let Ok(raw) = serde_json::from_str::<RawCompletion>(trimmed) {
        return Some(raw);
    }

    let unfenced = strip_fences(trimmed);
    if let Ok(raw) = serde_json::from_str::<RawCompletion>(unfenced) {
        return Some(raw);
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if start < end {
        if let Ok(raw) = serde_json::from_str::<RawCompletion>(&trimmed[start..=end]) {
            return Some(raw);
        }
    }

    None
}

/// Strip a surrounding markdown code fence (```json ... ```), if present.
fn strip_fences(content: &str) -> &str {
    let Some(rest) = content.strip_prefix("```") else {
        return content;
    };
    // Skip the info string (e.g. "json") up to the first newline.
    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}
