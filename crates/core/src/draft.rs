//! Draft/session state machine for the authoring flow.
//!
//! Runs on the client side of the pipeline but lives here so native clients
//! and tests share one implementation:
//!
//! ```text
//! Empty -> Generating -> Generated -> Editing -> Saving -> Saved
//!              |              ^
//!              v              | (dismiss with prior result)
//!            Failed ----------+---> Empty (dismiss without one)
//! ```
//!
//! Generated/Editing also return to Empty on explicit discard, and to
//! Generating on regenerate (a fresh attempt, never idempotent). Every
//! structured edit recomputes the final prompt synchronously through
//! [`reassemble`].
//!
//! Autosave snapshots are a local cache with a 24-hour TTL, never a second
//! source of truth: a completed server save always supersedes them.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::generation::validate_idea;
use crate::structured::{reassemble, StructuredPrompt};
use crate::types::Timestamp;

/// Snapshots older than this are discarded on load instead of restored.
pub const DRAFT_TTL_HOURS: i64 = 24;

/// Minimum trimmed title length required to save.
pub const MIN_TITLE_LENGTH: usize = 3;

/// Phase of the authoring session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftPhase {
    Empty,
    Generating,
    Generated,
    Editing,
    Saving,
    Saved,
    Failed,
}

/// One authoring session: the idea, the generated result, and the user's
/// structured edits.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    phase: DraftPhase,
    pub idea: String,
    pub model: String,
    pub style: String,
    pub generated_prompt: String,
    pub structured: Option<StructuredPrompt>,
    pub final_prompt: String,
    pub title: String,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            phase: DraftPhase::Empty,
            idea: String::new(),
            model: String::new(),
            style: String::new(),
            generated_prompt: String::new(),
            structured: None,
            final_prompt: String::new(),
            title: String::new(),
        }
    }
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DraftPhase {
        self.phase
    }

    fn transition_err(&self, action: &str) -> CoreError {
        CoreError::Conflict(format!("Cannot {action} from {:?} state", self.phase()))
    }

    /// Submit an idea for generation. Guarded by a non-empty idea; the
    /// authoritative quota check is server-side, this only prevents a
    /// wasted round trip. Also used for regenerate, which deliberately
    /// consumes a fresh quota unit server-side.
    pub fn begin_generation(
        &mut self,
        idea: &str,
        model: &str,
        style: &str,
    ) -> Result<(), CoreError> {
        match self.phase() {
            DraftPhase::Empty
            | DraftPhase::Generated
            | DraftPhase::Editing
            | DraftPhase::Failed => {
                validate_idea(idea)?;
                self.idea = idea.to_string();
                self.model = model.to_string();
                self.style = style.to_string();
                self.phase = DraftPhase::Generating;
                Ok(())
            }
            _ => Err(self.transition_err("start generation")),
        }
    }

    /// Record a successful generation result.
    pub fn complete_generation(
        &mut self,
        prompt: String,
        structured: StructuredPrompt,
    ) -> Result<(), CoreError> {
        if self.phase() != DraftPhase::Generating {
            return Err(self.transition_err("complete generation"));
        }
        self.final_prompt = prompt.clone();
        self.generated_prompt = prompt;
        self.structured = Some(structured);
        self.phase = DraftPhase::Generated;
        Ok(())
    }

    /// Record a provider failure.
    pub fn fail_generation(&mut self) -> Result<(), CoreError> {
        if self.phase() != DraftPhase::Generating {
            return Err(self.transition_err("fail generation"));
        }
        self.phase = DraftPhase::Failed;
        Ok(())
    }

    /// Leave the failure state: back to the prior result when one exists,
    /// otherwise back to an empty form (idea fields are kept for retry).
    pub fn dismiss_failure(&mut self) -> Result<(), CoreError> {
        if self.phase() != DraftPhase::Failed {
            return Err(self.transition_err("dismiss failure"));
        }
        self.phase = if self.structured.is_some() {
            DraftPhase::Generated
        } else {
            DraftPhase::Empty
        };
        Ok(())
    }

    /// Apply a structured-field mutation. Any mutation moves the draft to
    /// Editing and synchronously recomputes the final prompt.
    pub fn edit<F>(&mut self, mutate: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut StructuredPrompt),
    {
        match self.phase() {
            DraftPhase::Generated | DraftPhase::Editing => {
                let structured = self
                    .structured
                    .as_mut()
                    .ok_or_else(|| CoreError::Internal("editable draft has no structured fields".to_string()))?;
                mutate(structured);
                self.final_prompt = reassemble(structured);
                self.phase = DraftPhase::Editing;
                Ok(())
            }
            _ => Err(self.transition_err("edit")),
        }
    }

    /// Begin the explicit save action. The trimmed title length is the only
    /// hard validation.
    pub fn begin_save(&mut self, title: &str) -> Result<(), CoreError> {
        match self.phase() {
            DraftPhase::Generated | DraftPhase::Editing => {
                let trimmed = title.trim();
                if trimmed.chars().count() < MIN_TITLE_LENGTH {
                    return Err(CoreError::Validation(format!(
                        "Title must be at least {MIN_TITLE_LENGTH} characters"
                    )));
                }
                self.title = trimmed.to_string();
                self.phase = DraftPhase::Saving;
                Ok(())
            }
            _ => Err(self.transition_err("save")),
        }
    }

    /// Server confirmed the save; the draft is finished and the local
    /// snapshot is superseded.
    pub fn complete_save(&mut self) -> Result<(), CoreError> {
        if self.phase() != DraftPhase::Saving {
            return Err(self.transition_err("complete save"));
        }
        self.phase = DraftPhase::Saved;
        Ok(())
    }

    /// Server rejected the save; return to editing.
    pub fn fail_save(&mut self) -> Result<(), CoreError> {
        if self.phase() != DraftPhase::Saving {
            return Err(self.transition_err("fail save"));
        }
        self.phase = DraftPhase::Editing;
        Ok(())
    }

    /// Explicitly throw the draft away.
    pub fn discard(&mut self) -> Result<(), CoreError> {
        match self.phase() {
            DraftPhase::Generated | DraftPhase::Editing | DraftPhase::Failed => {
                *self = Draft::new();
                Ok(())
            }
            _ => Err(self.transition_err("discard")),
        }
    }

    /// Whether opportunistic autosave is allowed in the current phase.
    /// Never in Saved (server state won) or pristine Empty (nothing to keep).
    pub fn should_autosave(&self) -> bool {
        matches!(
            self.phase(),
            DraftPhase::Generating | DraftPhase::Generated | DraftPhase::Editing
        )
    }

    /// Capture an autosave snapshot, or `None` when the phase is not
    /// autosave-eligible.
    pub fn snapshot(&self, now: Timestamp) -> Option<DraftSnapshot> {
        if !self.should_autosave() {
            return None;
        }
        Some(DraftSnapshot {
            phase: self.phase(),
            idea: self.idea.clone(),
            model: self.model.clone(),
            style: self.style.clone(),
            generated_prompt: self.generated_prompt.clone(),
            structured: self.structured.clone(),
            final_prompt: self.final_prompt.clone(),
            saved_at: now,
        })
    }
}

/// Serialized draft persisted to local durable storage on every field
/// change while autosave-eligible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSnapshot {
    pub phase: DraftPhase,
    pub idea: String,
    pub model: String,
    pub style: String,
    pub generated_prompt: String,
    pub structured: Option<StructuredPrompt>,
    pub final_prompt: String,
    pub saved_at: Timestamp,
}

impl DraftSnapshot {
    /// Whether this snapshot is past the 24-hour TTL at `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now - self.saved_at >= chrono::Duration::hours(DRAFT_TTL_HOURS)
    }

    /// Restore a draft from this snapshot, or `None` when expired.
    ///
    /// A snapshot captured mid-generation restores to Empty with the form
    /// fields intact: the in-flight provider call did not survive the
    /// reload, and retrying must be an explicit user action.
    pub fn restore(self, now: Timestamp) -> Option<Draft> {
        if self.is_expired(now) {
            return None;
        }
        let phase = match self.phase {
            DraftPhase::Generating => DraftPhase::Empty,
            other => other,
        };
        Some(Draft {
            phase,
            idea: self.idea,
            model: self.model,
            style: self.style,
            generated_prompt: self.generated_prompt,
            structured: self.structured,
            final_prompt: self.final_prompt,
            title: String::new(),
        })
    }
}
