//! Prompt templates for the provider call.
//!
//! The system prompt pins the output contract: a single JSON object with
//! the final prompt text plus the 8-element decomposition, no prose around
//! it. Parsing still assumes the model will sometimes ignore that.

/// System prompt instructing the model to act as a prompt director and
/// answer with strict JSON.
pub fn build_system_prompt(style: &str) -> String {
    format!(
        "You are a professional AI video prompt director. Rewrite the \
         user's idea as a production-quality prompt in a {style} style, \
         decomposed into a director's framework.\n\
         Respond with a single JSON object and nothing else, using exactly \
         these keys:\n\
         {{\"prompt\": string, \"subject\": string, \"setting\": string, \
         \"action\": string, \"shotType\": string, \"cameraMovement\": string, \
         \"style\": string, \"lighting\": string, \"audio\": string, \
         \"timeline\": [{{\"start\": number, \"end\": number, \
         \"description\": string}}], \"constraints\": string, \
         \"composition\": string, \"mood\": [string], \"parameters\": string}}\n\
         Use snake_case vocabulary for shotType (e.g. wide_shot, close_up) \
         and lighting (e.g. golden_hour, low_key). Leave unknown fields as \
         empty strings rather than omitting them."
    )
}

/// User message carrying the idea and the target model.
pub fn build_user_message(idea: &str, model: &str) -> String {
    format!("Target model: {model}\nIdea: {idea}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_mentions_style_and_contract() {
        let prompt = build_system_prompt("cinematic");
        assert!(prompt.contains("cinematic style"));
        assert!(prompt.contains("\"shotType\""));
        assert!(prompt.contains("single JSON object"));
    }

    #[test]
    fn user_message_carries_idea_and_model() {
        let message = build_user_message("a dog running", "sora");
        assert!(message.contains("Target model: sora"));
        assert!(message.contains("a dog running"));
    }
}
