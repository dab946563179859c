//! The two operations: structured analysis and the naming/graph assistant.

use std::sync::Arc;

use ai_llm_service::{LlmBackend, SchemaContract, generate_object};
use tracing::{info, instrument};

use crate::{
    conversation::{ChatContext, ChatMessage},
    error::AnalystError,
    model::{AnalysisInput, AnalysisResult},
    prompt::{CHAT_SYSTEM, build_analysis_prompt, build_chat_prompt},
};

/// Stateless analyst over a shared model backend.
///
/// Holds no per-request data; concurrent calls are independent.
pub struct Analyst {
    backend: Arc<dyn LlmBackend>,
    contract: SchemaContract<AnalysisResult>,
}

impl Analyst {
    /// # Errors
    /// Fails only if the [`AnalysisResult`] schema cannot be compiled.
    pub fn new(backend: Arc<dyn LlmBackend>) -> Result<Self, AnalystError> {
        Ok(Self {
            backend,
            contract: SchemaContract::new()?,
        })
    }

    /// The output schema the model is constrained with.
    pub fn analysis_schema(&self) -> &serde_json::Value {
        self.contract.schema()
    }

    /// Produces a validated analysis with a single model call.
    #[instrument(skip_all, fields(platform = %input.platform))]
    pub async fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResult, AnalystError> {
        let prompt = build_analysis_prompt(input);
        let result = generate_object(self.backend.as_ref(), &self.contract, &prompt).await?;
        info!(
            readiness_categories = result.readiness_scores.len(),
            "analysis generated"
        );
        Ok(result)
    }

    /// Replies to the most recent user turn; earlier turns are not sent to the model.
    #[instrument(skip_all, fields(history_len = messages.len()))]
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        context: &ChatContext,
    ) -> Result<String, AnalystError> {
        let prompt = build_chat_prompt(context, messages);
        let reply = self
            .backend
            .generate_text(Some(CHAT_SYSTEM), &prompt)
            .await?;
        Ok(reply)
    }
}
