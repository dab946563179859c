//! Prompt builders for the analysis and chat operations.

use crate::{
    conversation::{ChatContext, ChatMessage, ChatRole},
    model::AnalysisInput,
};

/// Fallback user turn when the conversation has no user message.
pub const DEFAULT_CHAT_PROMPT: &str = "Suggest startup names and graphs.";

/// Placeholder for an unknown context field.
pub const MISSING_CONTEXT: &str = "N/A";

/// System instruction for the naming/tagline/graph assistant.
pub const CHAT_SYSTEM: &str = "You help startup founders by proposing: \
(1) 5–10 brandable startup name ideas with short rationales, \
(2) 3–6 strong taglines, and \
(3) useful pitch-deck graph ideas (e.g., TAM/SAM/SOM bar chart, funnel, cohort retention, LTV vs. CAC, radar of readiness). \
Keep answers concise and skimmable using bullets. Be specific to the user's idea and platform.";

/// Builds the analyst prompt. Inputs are embedded verbatim.
///
/// # Example
/// ```
/// # use startup_analyst::{AnalysisInput, prompt::build_analysis_prompt};
/// let p = build_analysis_prompt(&AnalysisInput {
///     company_name: "BrightLearn".into(),
///     idea: "AI tutor".into(),
///     platform: "education".into(),
/// });
/// assert!(p.contains("- Company Name: BrightLearn"));
/// ```
pub fn build_analysis_prompt(input: &AnalysisInput) -> String {
    format!(
        r#"You are an expert startup analyst preparing founders for investors and programs like Shark Tank.
Analyze the following startup and return content that STRICTLY fits the provided JSON schema fields (no extra keys).
If data is uncertain, make reasonable, clearly labeled assumptions.

INPUTS
- Company Name: {company}
- Idea: {idea}
- Platform/Domain: {platform}

GUIDELINES
- Keep language clear, specific, and investor-ready.
- Market: include defensible TAM/SAM/SOM statements with units and sources/assumptions.
- Financials: include 3–5 key assumptions, break-even framing, and succinct projections.
- Provide 6–10 readinessScores categories with normalized 0–100 scores (higher is better).
- Pitch: a 30–60 second, memorable, founder-style elevator pitch.

Return JSON only. The response is validated against the schema.
"#,
        company = input.company_name,
        idea = input.idea,
        platform = input.platform,
    )
}

/// Content of the most recent user message, or [`DEFAULT_CHAT_PROMPT`].
pub fn last_user_message(messages: &[ChatMessage]) -> &str {
    messages
        .iter()
        .rev()
        .find(|m| m.role == ChatRole::User)
        .map(|m| m.content.as_str())
        .unwrap_or(DEFAULT_CHAT_PROMPT)
}

/// One-line context summary with `N/A` for absent or empty fields.
pub fn context_note(ctx: &ChatContext) -> String {
    fn or_na(v: &Option<String>) -> &str {
        v.as_deref().filter(|s| !s.is_empty()).unwrap_or(MISSING_CONTEXT)
    }

    format!(
        "Context — company: {}, platform: {}, idea: {}.",
        or_na(&ctx.company_name),
        or_na(&ctx.platform),
        or_na(&ctx.idea),
    )
}

/// Final chat prompt: context note, blank line, then the active user turn.
pub fn build_chat_prompt(ctx: &ChatContext, messages: &[ChatMessage]) -> String {
    format!("{}\n\nUser: {}", context_note(ctx), last_user_message(messages))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_prompt_carries_guidelines() {
        let p = build_analysis_prompt(&AnalysisInput {
            company_name: "Acme".into(),
            idea: "Rockets for roadrunners".into(),
            platform: "fitness".into(),
        });
        assert!(p.contains("- Idea: Rockets for roadrunners"));
        assert!(p.contains("- Platform/Domain: fitness"));
        assert!(p.contains("no extra keys"));
        assert!(p.contains("3–5 key assumptions"));
        assert!(p.contains("6–10 readinessScores"));
    }

    #[test]
    fn empty_history_and_context_use_defaults() {
        let p = build_chat_prompt(&ChatContext::default(), &[]);
        assert_eq!(
            p,
            "Context — company: N/A, platform: N/A, idea: N/A.\n\nUser: Suggest startup names and graphs."
        );
    }

    #[test]
    fn picks_most_recent_user_turn_not_last_message() {
        let history = vec![
            ChatMessage::assistant("hi"),
            ChatMessage::user("name ideas?"),
            ChatMessage::assistant("ok"),
        ];
        assert_eq!(last_user_message(&history), "name ideas?");
    }

    #[test]
    fn empty_context_strings_count_as_missing() {
        let ctx = ChatContext {
            company_name: Some("Acme".into()),
            idea: Some(String::new()),
            platform: None,
        };
        assert_eq!(
            context_note(&ctx),
            "Context — company: Acme, platform: N/A, idea: N/A."
        );
    }
}
