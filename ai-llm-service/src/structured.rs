//! Schema-constrained generation.
//!
//! A [`SchemaContract`] is derived once from a Rust type. The same JSON Schema
//! document is
//! 1. handed to the provider as the output shape, and
//! 2. compiled with `jsonschema` to check whatever comes back.
//!
//! Acceptance is all-or-nothing: any violation rejects the whole value, and
//! nothing is defaulted or repaired. Keys not named by the schema are dropped
//! during typed deserialization.

use std::marker::PhantomData;

use jsonschema::Validator;
use schemars::{JsonSchema, generate::SchemaSettings};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    error_handler::{Result, SchemaError},
    llm_backend::LlmBackend,
};

/// Upper bound on violation messages carried in one error.
const MAX_REPORTED_VIOLATIONS: usize = 10;

/// Output contract for a target type `T`.
pub struct SchemaContract<T> {
    schema: Value,
    validator: Validator,
    _target: PhantomData<fn() -> T>,
}

impl<T> SchemaContract<T>
where
    T: JsonSchema + DeserializeOwned,
{
    /// Derives the schema for `T` (draft 2020-12, subschemas inlined) and compiles it.
    ///
    /// # Errors
    /// [`SchemaError::InvalidSchema`] if the derived schema does not compile.
    pub fn new() -> Result<Self> {
        let mut settings = SchemaSettings::draft2020_12();
        settings.inline_subschemas = true;
        let schema = settings
            .into_generator()
            .into_root_schema_for::<T>()
            .to_value();

        let validator = jsonschema::validator_for(&schema)
            .map_err(|e| SchemaError::InvalidSchema(e.to_string()))?;

        Ok(Self {
            schema,
            validator,
            _target: PhantomData,
        })
    }

    /// The JSON Schema document.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Checks `value` against the schema without converting it.
    ///
    /// # Errors
    /// [`SchemaError::Violations`] listing up to ten violations.
    pub fn check(&self, value: &Value) -> Result<()> {
        let violations: Vec<String> = self
            .validator
            .iter_errors(value)
            .take(MAX_REPORTED_VIOLATIONS)
            .map(|e| e.to_string())
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::Violations(violations).into())
        }
    }

    /// Validates `value` and converts it into `T`.
    ///
    /// # Errors
    /// [`SchemaError::Violations`] or [`SchemaError::Deserialize`].
    pub fn accept(&self, value: Value) -> Result<T> {
        self.check(&value)?;
        serde_json::from_value(value).map_err(|e| SchemaError::Deserialize(e.to_string()).into())
    }
}

/// Generates a `T` with `backend`, constrained by and validated against `contract`.
///
/// One provider call, no retries.
pub async fn generate_object<T>(
    backend: &dyn LlmBackend,
    contract: &SchemaContract<T>,
    prompt: &str,
) -> Result<T>
where
    T: JsonSchema + DeserializeOwned,
{
    let raw = backend.generate_json(prompt, contract.schema()).await?;
    match contract.accept(raw) {
        Ok(v) => {
            debug!(target_type = %std::any::type_name::<T>(), "generated object accepted");
            Ok(v)
        }
        Err(e) => {
            warn!(target_type = %std::any::type_name::<T>(), error = %e, "generated object rejected");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;
    use crate::error_handler::AiLlmError;

    #[derive(Debug, Deserialize, JsonSchema, PartialEq)]
    struct Rating {
        label: String,
        #[schemars(range(min = 0, max = 10))]
        value: f64,
    }

    #[derive(Debug, Deserialize, JsonSchema, PartialEq)]
    struct Card {
        title: String,
        #[schemars(length(min = 2, max = 3))]
        ratings: Vec<Rating>,
    }

    fn contract() -> SchemaContract<Card> {
        SchemaContract::new().unwrap()
    }

    #[test]
    fn schema_is_inlined_with_constraints() {
        let c = contract();
        let schema = c.schema();
        assert!(schema.get("$defs").is_none());
        let ratings = &schema["properties"]["ratings"];
        assert_eq!(ratings["minItems"], 2);
        assert_eq!(ratings["maxItems"], 3);
        assert_eq!(ratings["items"]["properties"]["value"]["maximum"], 10);
    }

    #[test]
    fn accepts_conforming_value_and_drops_unknown_keys() {
        let card = contract()
            .accept(json!({
                "title": "t",
                "extra": true,
                "ratings": [{ "label": "a", "value": 1 }, { "label": "b", "value": 9.5 }]
            }))
            .unwrap();
        assert_eq!(card.title, "t");
        assert_eq!(card.ratings[1].value, 9.5);
    }

    #[test]
    fn rejects_out_of_range_number() {
        let err = contract()
            .accept(json!({
                "title": "t",
                "ratings": [{ "label": "a", "value": 11 }, { "label": "b", "value": 2 }]
            }))
            .unwrap_err();
        assert!(matches!(err, AiLlmError::Schema(SchemaError::Violations(ref v)) if v.len() == 1));
    }

    #[test]
    fn rejects_missing_field_and_short_array_together() {
        let err = contract()
            .accept(json!({ "ratings": [{ "label": "a", "value": 1 }] }))
            .unwrap_err();
        match err {
            AiLlmError::Schema(SchemaError::Violations(v)) => assert_eq!(v.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}
