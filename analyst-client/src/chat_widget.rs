//! Chat widget: seeded conversation with single-flight sends.

use startup_analyst::{ChatContext, ChatMessage, ChatReply, ChatRequest};
use tracing::debug;

use crate::{error::ClientError, transport::AnalystApi};

/// First assistant message of every conversation.
pub const GREETING: &str = "Hi! I can suggest startup names, taglines, and graph ideas \
(TAM/SAM/SOM, funnel, cohorts, radar). Tell me about your idea or press a quick prompt below.";

/// Appended in place of a failed reply.
pub const APOLOGY: &str =
    "Sorry, something went wrong generating suggestions. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatStatus {
    Idle,
    Sending,
}

/// Canned prompts offered next to the input box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickPrompt {
    NameIdeas,
    Taglines,
    GraphIdeas,
    ElevatorPitch,
}

impl QuickPrompt {
    pub const ALL: [QuickPrompt; 4] = [
        QuickPrompt::NameIdeas,
        QuickPrompt::Taglines,
        QuickPrompt::GraphIdeas,
        QuickPrompt::ElevatorPitch,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QuickPrompt::NameIdeas => "10 Name Ideas",
            QuickPrompt::Taglines => "Taglines",
            QuickPrompt::GraphIdeas => "Graph Ideas",
            QuickPrompt::ElevatorPitch => "Elevator Pitch",
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            QuickPrompt::NameIdeas => "Give me 10 startup name ideas with short reasons.",
            QuickPrompt::Taglines => "Suggest 5 compelling taglines for my startup.",
            QuickPrompt::GraphIdeas => {
                "What graphs should I show in a pitch deck? Propose titles and what they prove."
            }
            QuickPrompt::ElevatorPitch => {
                "Draft a short elevator pitch (<120 words) highlighting USP and market fit."
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatWidget {
    messages: Vec<ChatMessage>,
    status: ChatStatus,
    /// Sent with every request so replies stay specific to the startup.
    pub context: ChatContext,
}

impl ChatWidget {
    pub fn new(context: ChatContext) -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
            status: ChatStatus::Idle,
            context,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn status(&self) -> ChatStatus {
        self.status
    }

    /// Appends the user turn and returns the request to send.
    ///
    /// Returns `Ok(None)` for blank input, leaving the widget unchanged.
    ///
    /// # Errors
    /// [`ClientError::Busy`] while a reply is outstanding.
    pub fn begin_send(&mut self, text: &str) -> Result<Option<ChatRequest>, ClientError> {
        if self.status == ChatStatus::Sending {
            return Err(ClientError::Busy);
        }
        if text.trim().is_empty() {
            return Ok(None);
        }

        self.messages.push(ChatMessage::user(text));
        self.status = ChatStatus::Sending;
        Ok(Some(ChatRequest {
            messages: self.messages.clone(),
            context: self.context.clone(),
        }))
    }

    /// Appends the reply, or [`APOLOGY`] on failure, and returns to `Idle`.
    pub fn finish(&mut self, outcome: Result<ChatReply, ClientError>) {
        let content = match outcome {
            Ok(ChatReply { reply }) => reply,
            Err(e) => {
                debug!(error = %e, "chat reply failed");
                APOLOGY.to_string()
            }
        };
        self.messages.push(ChatMessage::assistant(content));
        self.status = ChatStatus::Idle;
    }

    /// Sends `text` through `api`. Blank input is a no-op.
    ///
    /// # Errors
    /// [`ClientError::Busy`] while a reply is outstanding.
    pub async fn send(&mut self, api: &dyn AnalystApi, text: &str) -> Result<(), ClientError> {
        let Some(request) = self.begin_send(text)? else {
            return Ok(());
        };
        let outcome = api.chat(&request).await;
        self.finish(outcome);
        Ok(())
    }

    pub async fn send_quick(
        &mut self,
        api: &dyn AnalystApi,
        prompt: QuickPrompt,
    ) -> Result<(), ClientError> {
        self.send(api, prompt.text()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use startup_analyst::ChatRole;

    #[test]
    fn starts_with_greeting() {
        let w = ChatWidget::new(ChatContext::default());
        assert_eq!(w.messages(), &[ChatMessage::assistant(GREETING)]);
        assert_eq!(w.status(), ChatStatus::Idle);
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut w = ChatWidget::new(ChatContext::default());
        assert!(w.begin_send("   \n").unwrap().is_none());
        assert_eq!(w.messages().len(), 1);
        assert_eq!(w.status(), ChatStatus::Idle);
    }

    #[test]
    fn request_carries_full_history_and_context() {
        let ctx = ChatContext {
            idea: Some("AI tutor".into()),
            ..Default::default()
        };
        let mut w = ChatWidget::new(ctx.clone());
        let req = w.begin_send("names?").unwrap().unwrap();

        assert_eq!(req.context, ctx);
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[1].role, ChatRole::User);
        assert!(matches!(w.begin_send("again"), Err(ClientError::Busy)));
    }

    #[test]
    fn failure_appends_apology() {
        let mut w = ChatWidget::new(ChatContext::default());
        w.begin_send("names?").unwrap();
        w.finish(Err(ClientError::Status {
            status: 500,
            body: "Failed to generate chat reply".into(),
        }));

        let last = w.messages().last().unwrap();
        assert_eq!(last, &ChatMessage::assistant(APOLOGY));
        assert_eq!(w.status(), ChatStatus::Idle);
    }
}
