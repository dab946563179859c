//! Analysis input and the structured result the model must produce.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::AnalystError;

/// Raw analysis request as received from a caller; every field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDraft {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub idea: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
}

impl AnalysisDraft {
    /// Checks that all three fields are present and non-blank.
    ///
    /// # Errors
    /// [`AnalystError::MissingFields`] naming every missing field, in request order.
    pub fn validate(self) -> Result<AnalysisInput, AnalystError> {
        fn present(v: Option<String>) -> Option<String> {
            v.filter(|s| !s.trim().is_empty())
        }

        let company_name = present(self.company_name);
        let idea = present(self.idea);
        let platform = present(self.platform);

        match (company_name, idea, platform) {
            (Some(company_name), Some(idea), Some(platform)) => Ok(AnalysisInput {
                company_name,
                idea,
                platform,
            }),
            (c, i, p) => {
                let missing = [
                    (c.is_none(), "companyName"),
                    (i.is_none(), "idea"),
                    (p.is_none(), "platform"),
                ]
                .into_iter()
                .filter_map(|(is_missing, name)| is_missing.then_some(name))
                .collect();
                Err(AnalystError::MissingFields(missing))
            }
        }
    }
}

/// Validated analysis request. Values are kept exactly as sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInput {
    pub company_name: String,
    pub idea: String,
    pub platform: String,
}

/// Platforms offered by the analyze form.
///
/// The server accepts any non-blank platform string; this list feeds
/// `GET /platforms` and the client form default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Education,
    Teaching,
    Cooking,
    Health,
    Fitness,
    Productivity,
    Fintech,
    Ecommerce,
    Creator,
}

impl Platform {
    pub const ALL: [Platform; 9] = [
        Platform::Education,
        Platform::Teaching,
        Platform::Cooking,
        Platform::Health,
        Platform::Fitness,
        Platform::Productivity,
        Platform::Fintech,
        Platform::Ecommerce,
        Platform::Creator,
    ];

    /// Wire identifier, e.g. `ecommerce`.
    pub fn id(self) -> &'static str {
        match self {
            Platform::Education => "education",
            Platform::Teaching => "teaching",
            Platform::Cooking => "cooking",
            Platform::Health => "health",
            Platform::Fitness => "fitness",
            Platform::Productivity => "productivity",
            Platform::Fintech => "fintech",
            Platform::Ecommerce => "ecommerce",
            Platform::Creator => "creator",
        }
    }

    /// Human label, e.g. `E-commerce`.
    pub fn label(self) -> &'static str {
        match self {
            Platform::Education => "Education",
            Platform::Teaching => "Teaching",
            Platform::Cooking => "Cooking",
            Platform::Health => "Health",
            Platform::Fitness => "Fitness",
            Platform::Productivity => "Productivity",
            Platform::Fintech => "Fintech",
            Platform::Ecommerce => "E-commerce",
            Platform::Creator => "Creator Tools",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }
}

/* ------------------------------------------------------------------------- */
/* Model output                                                              */
/* ------------------------------------------------------------------------- */

/// Investor-facing analysis of one startup idea.
///
/// Doc comments on fields end up as `description` in the output schema and
/// guide the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Two or three sentence summary of the company and idea.
    pub overview: String,
    /// The customer problem being solved.
    pub problem: String,
    /// How the product solves the problem.
    pub solution: String,
    /// Primary customer segments.
    pub target_audience: String,
    /// TAM/SAM/SOM with units and assumptions.
    pub market: Market,
    /// Unique selling proposition.
    pub usp: String,
    /// Revenue streams and pricing.
    pub business_model: Vec<String>,
    pub unit_economics: String,
    /// Customer acquisition cost versus lifetime value.
    pub cac_ltv: String,
    pub traction_ideas: Vec<String>,
    pub financials: Financials,
    /// Key roles and hires.
    pub team: Vec<String>,
    pub product_readiness: String,
    pub marketing_sales: Vec<String>,
    pub competition: Vec<String>,
    pub differentiation: Vec<String>,
    pub legal_compliance: Vec<String>,
    pub equity_valuation: String,
    pub scalability: String,
    pub exit_strategy: Vec<String>,
    /// 30 to 60 second founder-style elevator pitch.
    pub pitch: String,
    /// Readiness per category for a radar chart.
    #[schemars(length(min = 5, max = 12))]
    pub readiness_scores: Vec<ReadinessScore>,
    pub risks: Vec<String>,
    pub next_steps: Vec<String>,
}

/// Nested market sizing estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Market {
    /// Total addressable market.
    pub tam: String,
    /// Serviceable addressable market.
    pub sam: String,
    /// Serviceable obtainable market.
    pub som: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
    /// Key assumptions behind the projections.
    pub assumptions: Vec<String>,
    pub projections: String,
    pub break_even: String,
}

/// One radar axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReadinessScore {
    /// Category name, e.g. "Product" or "Team".
    pub category: String,
    /// Normalized readiness, higher is better.
    ///
    /// Held as a JSON number so `70` is echoed as `70`, not `70.0`.
    #[schemars(range(min = 0, max = 100))]
    pub score: Number,
}

impl ReadinessScore {
    /// Score as a float for charting.
    pub fn value(&self) -> f64 {
        self.score.as_f64().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_draft_validates_verbatim() {
        let input = AnalysisDraft {
            company_name: Some(" BrightLearn ".into()),
            idea: Some("AI tutor".into()),
            platform: Some("education".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(input.company_name, " BrightLearn ");
    }

    #[test]
    fn blank_and_absent_fields_are_reported_together() {
        let err = AnalysisDraft {
            company_name: Some("   ".into()),
            idea: Some("x".into()),
            platform: None,
        }
        .validate()
        .unwrap_err();
        match err {
            AnalystError::MissingFields(f) => assert_eq!(f, vec!["companyName", "platform"]),
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn integer_score_is_not_widened() {
        let raw = serde_json::json!({ "category": "Team", "score": 70 });
        let score: ReadinessScore = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(score.value(), 70.0);
        assert_eq!(serde_json::to_value(&score).unwrap(), raw);
    }

    #[test]
    fn platform_ids_round_trip() {
        for p in Platform::ALL {
            assert_eq!(Platform::from_id(p.id()), Some(p));
            assert_eq!(serde_json::to_value(p).unwrap(), p.id());
        }
        assert_eq!(Platform::default(), Platform::Education);
    }
}
