//! Annotation label text: difference and CAGR labels.
use crate::llm::{CompletionRequest, LlmError, LlmProvider, json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

const LABEL_MAX_TOKENS: u32 = 256;

pub const LABEL_ENGINE_SYSTEM_PROMPT: &str = "\
You are a Data Storyteller AI creating concise, impactful labels for chart annotations.
Turn raw data into human-readable insights.

DIFFERENCE LABELS:
- primary: the absolute difference with currency or unit, e.g. \"€28 savings\"
- secondary: the percentage in parentheses, e.g. \"(62% reduction)\"
- use action words such as savings, reduction, increase, growth, decline
- primary under 15 characters, secondary under 20 characters

CAGR LABELS:
- format \"X-Year CAGR: +/-Y%\" with X the series length minus 1
- + for positive, - for negative, rounded to a whole percent

Be concise, lead with the most important number and format numbers compactly
(€1.2M, not €1,200,000). Respond with valid JSON only.";

/// Wording of a difference label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    #[default]
    Reduction,
    Increase,
    #[serde(other)]
    Change,
}

impl ChangeDirection {
    /// Action word for the amount and noun for the percentage.
    fn words(&self) -> (&'static str, &'static str) {
        match self {
            ChangeDirection::Reduction => ("savings", "reduction"),
            ChangeDirection::Increase => ("increase", "increase"),
            ChangeDirection::Change => ("change", "change"),
        }
    }
}

impl From<&str> for ChangeDirection {
    fn from(s: &str) -> Self {
        match s {
            "reduction" => ChangeDirection::Reduction,
            "increase" => ChangeDirection::Increase,
            _ => ChangeDirection::Change,
        }
    }
}

/// Two-line difference label.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DifferenceLabel {
    pub primary: String,
    pub secondary: String,
}

impl DifferenceLabel {
    /// Both lines joined for a difference-line annotation.
    pub fn to_annotation_text(&self) -> String {
        if self.secondary.is_empty() {
            self.primary.clone()
        } else {
            format!("{}\n{}", self.primary, self.secondary)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CagrLabel {
    pub label: String,
}

#[derive(Serialize)]
struct DifferenceLabelRequest<'a> {
    task: &'static str,
    start_value: f64,
    end_value: f64,
    currency: &'a str,
    direction: ChangeDirection,
}

#[derive(Serialize)]
struct CagrLabelRequest<'a> {
    task: &'static str,
    data_series: &'a [f64],
    cagr_value: f64,
}

/// Compact currency amount: `€1.2M`, `€3.5K`, `€28`.
pub fn format_amount(amount: f64, currency: &str) -> String {
    if amount >= 1_000_000.0 {
        format!("{currency}{:.1}M", amount / 1_000_000.0)
    } else if amount >= 1_000.0 {
        format!("{currency}{:.1}K", amount / 1_000.0)
    } else {
        format!("{currency}{amount:.0}")
    }
}

/// Label the gap between two values.
///
/// # Examples
///
/// ```
/// use deckwright::annotate::labels::{ChangeDirection, difference_label};
///
/// let label = difference_label(45.0, 17.0, "€", ChangeDirection::Reduction);
/// assert_eq!(label.primary, "€28 savings");
/// assert_eq!(label.secondary, "(62% reduction)");
/// ```
pub fn difference_label(start: f64, end: f64, currency: &str, direction: ChangeDirection) -> DifferenceLabel {
    let diff = (start - end).abs();
    let pct = if start != 0.0 {
        ((start - end) / start).abs() * 100.0
    } else {
        0.0
    };
    let (action, noun) = direction.words();
    DifferenceLabel {
        primary: format!("{} {action}", format_amount(diff, currency)),
        secondary: format!("({pct:.0}% {noun})"),
    }
}

/// Label a growth rate over `series`; `cagr` is a fraction (0.31 for 31%).
pub fn cagr_label(series: &[f64], cagr: f64) -> CagrLabel {
    let years = series.len().saturating_sub(1);
    let pct = cagr * 100.0;
    let sign = if pct >= 0.0 { "+" } else { "" };
    CagrLabel {
        label: format!("{years}-Year CAGR: {sign}{pct:.0}%"),
    }
}

/// Compound annual growth rate from `first` to `last` over `years`.
///
/// Undefined for non-positive endpoints or a zero-year span.
pub fn compute_cagr(first: f64, last: f64, years: usize) -> Option<f64> {
    if first <= 0.0 || last <= 0.0 || years == 0 {
        return None;
    }
    Some((last / first).powf(1.0 / years as f64) - 1.0)
}

/// Label generator with an optional model behind it.
#[derive(Clone, Default)]
pub struct LabelEngine {
    provider: Option<Arc<dyn LlmProvider>>,
}

impl LabelEngine {
    pub fn new(provider: Option<Arc<dyn LlmProvider>>) -> Self {
        Self { provider }
    }

    pub async fn difference_label(
        &self,
        start: f64,
        end: f64,
        currency: &str,
        direction: ChangeDirection,
    ) -> DifferenceLabel {
        let Some(provider) = &self.provider else {
            return difference_label(start, end, currency, direction);
        };
        let request = DifferenceLabelRequest {
            task: "generate_difference_label",
            start_value: start,
            end_value: end,
            currency,
            direction,
        };
        let result: Result<DifferenceLabel, LlmError> = async {
            let prompt = format!(
                "Generate a label for this difference annotation.\n\nInput Data:\n{}\n\nReturn a JSON object with \"primary\" and \"secondary\" fields.",
                serde_json::to_string_pretty(&request)?
            );
            ask(provider.as_ref(), prompt).await
        }
        .await;
        result.unwrap_or_else(|e| {
            warn!("Label generation call failed, using local calculation: {e}");
            difference_label(start, end, currency, direction)
        })
    }

    pub async fn cagr_label(&self, series: &[f64], cagr: f64) -> CagrLabel {
        let Some(provider) = &self.provider else {
            return cagr_label(series, cagr);
        };
        let request = CagrLabelRequest {
            task: "generate_cagr_label",
            data_series: series,
            cagr_value: cagr,
        };
        let result: Result<CagrLabel, LlmError> = async {
            let prompt = format!(
                "Generate a label for this CAGR annotation.\n\nInput Data:\n{}\n\nReturn a JSON object with a \"label\" field.",
                serde_json::to_string_pretty(&request)?
            );
            ask(provider.as_ref(), prompt).await
        }
        .await;
        result.unwrap_or_else(|e| {
            warn!("Label generation call failed, using local calculation: {e}");
            cagr_label(series, cagr)
        })
    }
}

async fn ask<T: serde::de::DeserializeOwned>(provider: &dyn LlmProvider, prompt: String) -> Result<T, LlmError> {
    let request = CompletionRequest::new(LABEL_ENGINE_SYSTEM_PROMPT, prompt)
        .max_tokens(LABEL_MAX_TOKENS)
        .temperature(0.0);
    let response = provider.complete(&request).await?;
    json::parse_strict(&response)
}
