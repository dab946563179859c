//! Startup analysis on top of a schema-constrained LLM backend.
//!
//! Public API: [`Analyst::analyze`] turns an [`AnalysisInput`] into a validated
//! [`AnalysisResult`]; [`Analyst::chat`] answers naming/tagline/graph questions.
//! Neither keeps state between calls.

mod analyst;
mod conversation;
mod error;
mod model;
pub mod prompt;

pub use analyst::Analyst;
pub use conversation::{ChatContext, ChatMessage, ChatReply, ChatRequest, ChatRole};
pub use error::AnalystError;
pub use model::{
    AnalysisDraft, AnalysisInput, AnalysisResult, Financials, Market, Platform, ReadinessScore,
};
