//! Client-side state for the startup analyzer.
//!
//! - [`AnalyzeForm`]: company/idea/platform inputs and the submit lifecycle.
//! - [`ChatWidget`]: the naming/graph assistant conversation.
//! - [`AnalystApi`]: transport seam; [`HttpApiClient`] talks to the server.
//!
//! State machines are driven by explicit `begin_*`/`finish` calls so a UI
//! event loop can render the intermediate state, or by the async helpers
//! that do both around one transport call.

mod analyze_form;
mod chat_widget;
mod error;
mod transport;

pub use analyze_form::{AnalyzeForm, FormStatus};
pub use chat_widget::{APOLOGY, ChatStatus, ChatWidget, GREETING, QuickPrompt};
pub use error::ClientError;
pub use transport::{AnalystApi, HttpApiClient};
