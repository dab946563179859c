//! Analyze form: three inputs and a single-flight submit.

use startup_analyst::{AnalysisDraft, AnalysisResult, Platform};
use tracing::debug;

use crate::{error::ClientError, transport::AnalystApi};

/// Shown when the server fails without a message.
const EMPTY_FAILURE: &str = "Failed to analyze";
/// Shown when no server answer was received or it could not be read.
const TRANSPORT_FAILURE: &str = "Something went wrong";

#[derive(Debug, Clone, PartialEq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Success(Box<AnalysisResult>),
    Error(String),
}

#[derive(Debug, Clone)]
pub struct AnalyzeForm {
    pub company_name: String,
    pub idea: String,
    /// Platform identifier; any string is accepted by the server.
    pub platform: String,
    status: FormStatus,
}

impl Default for AnalyzeForm {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            idea: String::new(),
            platform: Platform::default().id().to_string(),
            status: FormStatus::Idle,
        }
    }
}

impl AnalyzeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Whether the submit control should be disabled.
    pub fn is_submitting(&self) -> bool {
        matches!(self.status, FormStatus::Submitting)
    }

    /// Moves to `Submitting`, dropping any previous result or error, and
    /// returns the request body.
    ///
    /// # Errors
    /// [`ClientError::Busy`] while a submission is outstanding.
    pub fn begin_submit(&mut self) -> Result<AnalysisDraft, ClientError> {
        if self.is_submitting() {
            return Err(ClientError::Busy);
        }
        self.status = FormStatus::Submitting;
        Ok(AnalysisDraft {
            company_name: Some(self.company_name.clone()),
            idea: Some(self.idea.clone()),
            platform: Some(self.platform.clone()),
        })
    }

    /// Records the outcome of the outstanding submission.
    pub fn finish(&mut self, outcome: Result<AnalysisResult, ClientError>) {
        self.status = match outcome {
            Ok(result) => FormStatus::Success(Box::new(result)),
            Err(e) => {
                debug!(error = %e, "analysis failed");
                FormStatus::Error(failure_message(e))
            }
        };
    }

    /// Submits through `api` and returns the resulting status.
    ///
    /// # Errors
    /// [`ClientError::Busy`] if a submission is already outstanding; the
    /// status is left untouched in that case.
    pub async fn submit(&mut self, api: &dyn AnalystApi) -> Result<&FormStatus, ClientError> {
        let draft = self.begin_submit()?;
        let outcome = api.analyze(&draft).await;
        self.finish(outcome);
        Ok(&self.status)
    }
}

fn failure_message(err: ClientError) -> String {
    match err {
        ClientError::Status { body, .. } if !body.trim().is_empty() => body,
        ClientError::Status { .. } => EMPTY_FAILURE.to_string(),
        _ => TRANSPORT_FAILURE.to_string(),
    }
}
