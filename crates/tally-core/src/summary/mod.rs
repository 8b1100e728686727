pub mod config;
pub mod openai;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TallyError;
use crate::model::ProjectTotal;
use crate::parsing::amount::parse_amount_text;

/// A project with a known amount, as ranked for a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedProject {
    #[serde(default)]
    pub name: String,
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float_option::serialize",
        deserialize_with = "lenient_amount"
    )]
    pub amount: Option<Decimal>,
}

/// Accept numbers, numeric strings or anything else (as `None`).
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => parse_amount_text(&n.to_string()),
        serde_json::Value::String(s) => parse_amount_text(&s),
        _ => None,
    })
}

/// Structured input handed to a summarization backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub source_name: String,
    pub project_count: usize,
    pub projects_with_amount: usize,
    /// Sum of all present amounts; `None` if it overflows `Decimal`.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub grand_total: Option<Decimal>,
    pub top_projects: Vec<RankedProject>,
}

impl SummaryRequest {
    pub fn from_totals(source_name: &str, totals: &[ProjectTotal], top_n: usize) -> Self {
        let amounts: Vec<Decimal> = totals.iter().filter_map(|t| t.total_amount).collect();
        Self {
            source_name: source_name.to_string(),
            project_count: totals.len(),
            projects_with_amount: amounts.len(),
            grand_total: amounts
                .iter()
                .try_fold(Decimal::ZERO, |acc, a| acc.checked_add(*a)),
            top_projects: top_projects(totals, top_n),
        }
    }
}

/// The fixed-shape response expected back from a summarization backend.
///
/// Fields missing from the response fall back to empty values; the content
/// is passed through as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub top_projects: Vec<RankedProject>,
    #[serde(default)]
    pub notes: Vec<String>,
}

/// Trait for summarization backends.
pub trait Summarizer: Send + Sync {
    /// Produce a narrative summary for the given totals.
    fn summarize(&self, request: &SummaryRequest) -> Result<SummaryReport, TallyError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// The `n` largest projects by amount.
///
/// Records without an amount are dropped before ranking. Ties keep sheet
/// order.
pub fn top_projects(totals: &[ProjectTotal], n: usize) -> Vec<RankedProject> {
    let mut ranked: Vec<(&str, Decimal)> = totals
        .iter()
        .filter_map(|t| t.total_amount.map(|a| (t.project_name.as_str(), a)))
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(n)
        .map(|(name, amount)| RankedProject {
            name: name.to_string(),
            amount: Some(amount),
        })
        .collect()
}
