//! Request and response types for the AI budget advisor, and the trait the UI talks to.
//!
//! Two flows exist: `suggestions` reviews current spending against each budget,
//! and `plan` splits a total monthly budget across the categories.

mod command;

pub(crate) use command::{CommandAdvisor, DEFAULT_TIMEOUT};

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::models::{Category, CategoryWithDetails};
use crate::settings::Settings;

#[derive(Debug, Error)]
pub(crate) enum AdvisorError {
    #[error("no advisor command is configured")]
    NotConfigured,
    #[error("failed to start advisor '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("advisor exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
    #[error("advisor did not answer within {0:?}")]
    Timeout(std::time::Duration),
    #[error("advisor returned malformed output: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("advisor I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CategoryData {
    pub(crate) name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) spent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) budget: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SuggestionsRequest {
    pub(crate) categories: Vec<CategoryData>,
}

impl SuggestionsRequest {
    /// Category names are sent untranslated so that suggestions key back onto them.
    pub(crate) fn from_details(details: &[CategoryWithDetails]) -> Self {
        let categories = details
            .iter()
            .map(|d| CategoryData {
                name: d.category.name.clone(),
                spent: d.spent,
                budget: d.budget,
            })
            .collect();
        Self { categories }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Suggestion {
    pub(crate) category_name: String,
    pub(crate) suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SuggestionsResponse {
    pub(crate) suggestions: Vec<Suggestion>,
}

impl SuggestionsResponse {
    /// Index by category name. A later entry for the same name replaces an earlier one.
    pub(crate) fn by_category(self) -> HashMap<String, String> {
        self.suggestions
            .into_iter()
            .map(|s| (s.category_name, s.suggestion))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PlanCategory {
    pub(crate) name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlanRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) total_budget: Decimal,
    pub(crate) categories: Vec<PlanCategory>,
}

impl PlanRequest {
    /// Names go out in the user's language, the way they appear on screen.
    pub(crate) fn new(total_budget: Decimal, categories: &[Category], settings: &Settings) -> Self {
        let categories = categories
            .iter()
            .map(|c| PlanCategory {
                name: settings.category_name(&c.name),
            })
            .collect();
        Self {
            total_budget,
            categories,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlanItem {
    pub(crate) category_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub(crate) struct PlanResponse {
    pub(crate) plan: Vec<PlanItem>,
}

impl PlanResponse {
    pub(crate) fn total(&self) -> Decimal {
        self.plan.iter().map(|item| item.amount).sum()
    }
}

pub(crate) trait BudgetAdvisor {
    fn suggest(&self, request: &SuggestionsRequest) -> Result<SuggestionsResponse, AdvisorError>;
    fn plan(&self, request: &PlanRequest) -> Result<PlanResponse, AdvisorError>;
}

/// Ask for suggestions for the current spending picture.
pub(crate) fn suggestions_for(
    advisor: &dyn BudgetAdvisor,
    details: &[CategoryWithDetails],
) -> Result<HashMap<String, String>, AdvisorError> {
    let request = SuggestionsRequest::from_details(details);
    Ok(advisor.suggest(&request)?.by_category())
}

/// Ask for a plan. A plan that does not add up to the requested total is kept, with a warning.
pub(crate) fn plan_for(
    advisor: &dyn BudgetAdvisor,
    total_budget: Decimal,
    categories: &[Category],
    settings: &Settings,
) -> Result<PlanResponse, AdvisorError> {
    let request = PlanRequest::new(total_budget, categories, settings);
    let response = advisor.plan(&request)?;
    let allocated = response.total();
    if allocated != total_budget {
        warn!(%total_budget, %allocated, "budget plan does not add up to the requested total");
    }
    Ok(response)
}
