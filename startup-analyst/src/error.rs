//! Typed error for the startup-analyst crate.

use ai_llm_service::AiLlmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalystError {
    /// One or more required input fields were absent or blank (JSON field names).
    #[error("{}", missing_fields_message(.0))]
    MissingFields(Vec<&'static str>),

    /// The model call failed or its output was rejected.
    #[error("generation failed: {0}")]
    Generation(#[from] AiLlmError),
}

fn missing_fields_message(fields: &[&str]) -> String {
    let list = match fields {
        [] => String::new(),
        [one] => (*one).to_string(),
        [a, b] => format!("{a} and {b}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    };
    let verb = if fields.len() == 1 { "is" } else { "are" };
    format!("{list} {verb} required")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_missing_fields_in_prose() {
        let all = AnalystError::MissingFields(vec!["companyName", "idea", "platform"]);
        assert_eq!(all.to_string(), "companyName, idea, and platform are required");

        let two = AnalystError::MissingFields(vec!["idea", "platform"]);
        assert_eq!(two.to_string(), "idea and platform are required");

        let one = AnalystError::MissingFields(vec!["platform"]);
        assert_eq!(one.to_string(), "platform is required");
    }
}
