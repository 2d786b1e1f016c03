//! The 8-element structured prompt model and its reassembly algorithm.
//!
//! A [`StructuredPrompt`] is the director's-framework decomposition of one
//! generation: Subject, Setting, Action, Camera, Style, Audio, Timeline,
//! Constraints, plus the legacy composition/mood/parameters fields that the
//! reassembly path folds into the final text. Empty strings mean "absent"
//! throughout -- never null -- so partial JSON from any client deserializes
//! cleanly via `#[serde(default)]`.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Fixed vocabularies
// ---------------------------------------------------------------------------

/// Known shot types. Unknown values are stored verbatim (forward
/// compatibility with new camera vocabulary from the provider).
pub const SHOT_TYPES: &[&str] = &[
    "wide_shot",
    "medium_shot",
    "close_up",
    "extreme_close_up",
    "aerial_view",
    "pov",
    "over_shoulder",
    "tracking_shot",
    "dutch_angle",
    "low_angle",
    "high_angle",
];

/// Known lighting styles. Same free-text fallback rule as [`SHOT_TYPES`].
pub const LIGHTING_STYLES: &[&str] = &[
    "natural",
    "studio",
    "golden_hour",
    "blue_hour",
    "dramatic",
    "soft",
    "neon",
    "backlit",
    "rim_light",
    "high_key",
    "low_key",
];

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// One entry of a multi-scene timeline breakdown.
///
/// Entries need not be contiguous or non-overlapping; the only structural
/// invariant is `start < end`, checked by [`validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TimelineEntry {
    pub start: f64,
    pub end: f64,
    pub description: String,
}

/// The 8-element decomposition of one generated prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct StructuredPrompt {
    pub subject: String,
    pub setting: String,
    pub action: String,
    pub shot_type: String,
    pub camera_movement: String,
    pub style: String,
    pub lighting: String,
    pub audio: String,
    pub timeline: Vec<TimelineEntry>,
    pub constraints: String,
    pub composition: String,
    /// Insertion order is preserved and flows into the reassembled text.
    pub mood: IndexSet<String>,
    pub parameters: String,
}

/// All-optional mirror of [`StructuredPrompt`], used as the defensive parse
/// target for untrusted provider output.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StructuredGuess {
    pub subject: Option<String>,
    pub setting: Option<String>,
    pub action: Option<String>,
    pub shot_type: Option<String>,
    pub camera_movement: Option<String>,
    pub style: Option<String>,
    pub lighting: Option<String>,
    pub audio: Option<String>,
    pub timeline: Option<Vec<TimelineEntry>>,
    pub constraints: Option<String>,
    pub composition: Option<String>,
    pub mood: Option<Vec<String>>,
    pub parameters: Option<String>,
}

/// One structural violation reported by [`validate`].
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Canonicalization
// ---------------------------------------------------------------------------

/// Lowercase a vocabulary token and normalize separators to underscores,
/// so `"Golden Hour"` and `"golden-hour"` both match `"golden_hour"`.
fn canonicalize_token(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace([' ', '-'], "_")
}

/// Canonicalize `raw` against a fixed vocabulary.
///
/// Returns the canonical token on a match, otherwise the trimmed input
/// verbatim -- unknown values are tolerated, not rejected.
fn canonicalize_against(raw: &str, vocabulary: &[&str]) -> String {
    let canonical = canonicalize_token(raw);
    if vocabulary.contains(&canonical.as_str()) {
        canonical
    } else {
        raw.trim().to_string()
    }
}

impl StructuredPrompt {
    /// Merge an untrusted provider guess into a fully-defaulted prompt.
    ///
    /// Vocabulary fields (`shot_type`, `lighting`) are canonicalized with a
    /// free-text fallback. Timeline entries with `start >= end` come from a
    /// malformed provider response and are dropped rather than failing the
    /// whole generation. Mood preserves the provider's ordering.
    pub fn from_guess(guess: StructuredGuess) -> Self {
        let text = |v: Option<String>| v.map(|s| s.trim().to_string()).unwrap_or_default();

        let timeline = guess
            .timeline
            .unwrap_or_default()
            .into_iter()
            .filter(|e| e.start < e.end)
            .collect();

        let mood: IndexSet<String> = guess
            .mood
            .unwrap_or_default()
            .into_iter()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();

        Self {
            subject: text(guess.subject),
            setting: text(guess.setting),
            action: text(guess.action),
            shot_type: guess
                .shot_type
                .map(|s| canonicalize_against(&s, SHOT_TYPES))
                .unwrap_or_default(),
            camera_movement: text(guess.camera_movement),
            style: text(guess.style),
            lighting: guess
                .lighting
                .map(|s| canonicalize_against(&s, LIGHTING_STYLES))
                .unwrap_or_default(),
            audio: text(guess.audio),
            timeline,
            constraints: text(guess.constraints),
            composition: text(guess.composition),
            mood,
            parameters: text(guess.parameters),
        }
    }
}

// ---------------------------------------------------------------------------
// Reassembly
// ---------------------------------------------------------------------------

/// Fold structured fields back into a single prompt string.
///
/// Deterministic and order-sensitive; clients recompute the final prompt
/// through this exact sequence on every structured edit:
///
/// 1. `"<shotType> shot of"` if shot type present
/// 2. subject
/// 3. action
/// 4. `"in <setting>"` if setting present
/// 5. `"<lighting> lighting"` if lighting present
/// 6. composition
/// 7. `"mood: <comma-joined mood>"` if mood non-empty
/// 8. parameters
///
/// Non-empty parts are joined with `", "`; empty fields contribute nothing,
/// so the output never carries stray separators. This path is intentionally
/// lossy: timeline, audio, constraints, camera movement, and style are not
/// folded in (legacy compatibility with previously saved prompts).
pub fn reassemble(prompt: &StructuredPrompt) -> String {
    let mut parts: Vec<String> = Vec::new();

    if !prompt.shot_type.is_empty() {
        parts.push(format!("{} shot of", prompt.shot_type));
    }
    if !prompt.subject.is_empty() {
        parts.push(prompt.subject.clone());
    }
    if !prompt.action.is_empty() {
        parts.push(prompt.action.clone());
    }
    if !prompt.setting.is_empty() {
        parts.push(format!("in {}", prompt.setting));
    }
    if !prompt.lighting.is_empty() {
        parts.push(format!("{} lighting", prompt.lighting));
    }
    if !prompt.composition.is_empty() {
        parts.push(prompt.composition.clone());
    }
    if !prompt.mood.is_empty() {
        let joined: Vec<&str> = prompt.mood.iter().map(String::as_str).collect();
        parts.push(format!("mood: {}", joined.join(", ")));
    }
    if !prompt.parameters.is_empty() {
        parts.push(prompt.parameters.clone());
    }

    parts.join(", ")
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Report structural violations in a prompt.
///
/// The only enforced invariant is `start < end` per timeline entry.
/// Overlapping or gapped timelines are permitted.
pub fn validate(prompt: &StructuredPrompt) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (index, entry) in prompt.timeline.iter().enumerate() {
        if entry.start >= entry.end {
            violations.push(Violation {
                field: format!("timeline[{index}]"),
                message: format!(
                    "start ({}) must be less than end ({})",
                    entry.start, entry.end
                ),
            });
        }
    }

    violations
}
