//! Form and widget flows against a scripted API and a live local server.

use std::sync::{Arc, Mutex};

use ai_llm_service::{
    LlmBackend, LlmModelConfig, LlmProvider, SchemaError, error_handler::Result as LlmResult,
};
use analyst_client::{
    APOLOGY, AnalystApi, AnalyzeForm, ChatWidget, ClientError, FormStatus, GREETING,
    HttpApiClient, QuickPrompt,
};
use api::AppState;
use async_trait::async_trait;
use serde_json::Value;
use startup_analyst::{
    AnalysisDraft, AnalysisResult, ChatContext, ChatMessage, ChatReply, ChatRequest,
};
use tokio::net::TcpListener;

const VALID: &str = include_str!("../../startup-analyst/tests/fixtures/valid_analysis.json");

fn valid_result() -> AnalysisResult {
    serde_json::from_str(VALID).unwrap()
}

/* ------------------------------------------------------------------------- */
/* Scripted API                                                              */
/* ------------------------------------------------------------------------- */

#[derive(Default)]
struct ScriptedApi {
    fail_with: Option<(u16, &'static str)>,
    seen_chat: Mutex<Vec<ChatRequest>>,
    seen_drafts: Mutex<Vec<AnalysisDraft>>,
}

#[async_trait]
impl AnalystApi for ScriptedApi {
    async fn analyze(&self, draft: &AnalysisDraft) -> Result<AnalysisResult, ClientError> {
        self.seen_drafts.lock().unwrap().push(draft.clone());
        match self.fail_with {
            Some((status, body)) => Err(ClientError::Status {
                status,
                body: body.into(),
            }),
            None => Ok(valid_result()),
        }
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ClientError> {
        self.seen_chat.lock().unwrap().push(request.clone());
        match self.fail_with {
            Some((status, body)) => Err(ClientError::Status {
                status,
                body: body.into(),
            }),
            None => Ok(ChatReply {
                reply: format!("echo: {}", request.messages.len()),
            }),
        }
    }
}

#[tokio::test]
async fn form_submit_success_stores_result() {
    let api = ScriptedApi::default();
    let mut form = AnalyzeForm::new();
    form.company_name = "BrightLearn".into();
    form.idea = "AI tutor".into();

    let status = form.submit(&api).await.unwrap().clone();
    assert_eq!(status, FormStatus::Success(Box::new(valid_result())));

    let drafts = api.seen_drafts.lock().unwrap();
    assert_eq!(drafts[0].platform.as_deref(), Some("education"));
}

#[tokio::test]
async fn form_submit_failure_shows_server_text() {
    let api = ScriptedApi {
        fail_with: Some((500, "Failed to generate analysis")),
        ..Default::default()
    };
    let mut form = AnalyzeForm::new();
    form.submit(&api).await.unwrap();
    assert_eq!(
        form.status(),
        &FormStatus::Error("Failed to generate analysis".into())
    );
}

#[tokio::test]
async fn widget_appends_reply_then_apology() {
    let ok = ScriptedApi::default();
    let mut w = ChatWidget::new(ChatContext::default());

    w.send(&ok, "names?").await.unwrap();
    assert_eq!(
        w.messages(),
        &[
            ChatMessage::assistant(GREETING),
            ChatMessage::user("names?"),
            ChatMessage::assistant("echo: 2"),
        ]
    );

    let failing = ScriptedApi {
        fail_with: Some((500, "Failed to generate chat reply")),
        ..Default::default()
    };
    w.send_quick(&failing, QuickPrompt::Taglines).await.unwrap();
    let tail = &w.messages()[3..];
    assert_eq!(
        tail,
        &[
            ChatMessage::user(QuickPrompt::Taglines.text()),
            ChatMessage::assistant(APOLOGY),
        ]
    );
}

#[tokio::test]
async fn widget_blank_send_makes_no_request() {
    let api = ScriptedApi::default();
    let mut w = ChatWidget::new(ChatContext::default());
    w.send(&api, "  ").await.unwrap();
    assert!(api.seen_chat.lock().unwrap().is_empty());
    assert_eq!(w.messages().len(), 1);
}

/* ------------------------------------------------------------------------- */
/* Live server                                                               */
/* ------------------------------------------------------------------------- */

struct FixedBackend {
    json: Value,
}

#[async_trait]
impl LlmBackend for FixedBackend {
    async fn generate_text(&self, _system: Option<&str>, prompt: &str) -> LlmResult<String> {
        Ok(format!("got {} chars", prompt.len()))
    }

    async fn generate_json(&self, _prompt: &str, _schema: &Value) -> LlmResult<Value> {
        if self.json.is_null() {
            return Err(SchemaError::NotJson("empty".into()).into());
        }
        Ok(self.json.clone())
    }
}

async fn spawn_server(json: Value, key: Option<&str>) -> HttpApiClient {
    let cfg = LlmModelConfig::for_provider(LlmProvider::Gemini, key.map(str::to_string));
    let state = AppState::new(cfg, Arc::new(FixedBackend { json })).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(api::serve(listener, state));

    HttpApiClient::new(format!("http://{addr}")).unwrap()
}

#[tokio::test]
async fn live_analyze_round_trip() {
    let client = spawn_server(serde_json::from_str(VALID).unwrap(), Some("k")).await;

    let mut form = AnalyzeForm::new();
    form.company_name = "BrightLearn".into();
    form.idea = "AI tutor".into();
    form.submit(&client).await.unwrap();

    assert_eq!(form.status(), &FormStatus::Success(Box::new(valid_result())));
}

#[tokio::test]
async fn live_missing_field_surfaces_server_message() {
    let client = spawn_server(serde_json::from_str(VALID).unwrap(), Some("k")).await;

    let mut form = AnalyzeForm::new();
    form.company_name = "BrightLearn".into();
    form.submit(&client).await.unwrap();

    assert_eq!(
        form.status(),
        &FormStatus::Error("idea is required".into())
    );
}

#[tokio::test]
async fn live_missing_credential_is_reported() {
    let client = spawn_server(Value::Null, None).await;

    let err = client
        .chat(&ChatRequest::default())
        .await
        .unwrap_err();
    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("GOOGLE_GENERATIVE_AI_API_KEY"));
        }
        other => panic!("unexpected: {other}"),
    }
}

#[tokio::test]
async fn live_chat_and_generation_failure() {
    let client = spawn_server(Value::Null, Some("k")).await;

    let mut w = ChatWidget::new(ChatContext::default());
    w.send(&client, "names?").await.unwrap();
    assert!(w.messages().last().unwrap().content.starts_with("got "));

    let mut form = AnalyzeForm::new();
    form.company_name = "A".into();
    form.idea = "B".into();
    form.submit(&client).await.unwrap();
    assert_eq!(
        form.status(),
        &FormStatus::Error("Failed to generate analysis".into())
    );
}
