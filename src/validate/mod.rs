//! Validation for the add-expense form, the budget editor and the
//! budget planner form.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{BudgetUpdate, Category, CategoryWithDetails, Expense, Snapshot};

pub(crate) const DESCRIPTION_MIN: usize = 2;
pub(crate) const DESCRIPTION_MAX: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ValidationError {
    #[error("Description must be at least 2 characters.")]
    DescriptionTooShort,
    #[error("Description must be at most 100 characters.")]
    DescriptionTooLong,
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Amount must be a positive number.")]
    NonPositiveAmount,
    #[error("Please select a category.")]
    MissingCategory,
    #[error("Category '{0}' not found")]
    UnknownCategory(String),
    #[error("Invalid date: {0}. Use YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Please enter a budget greater than 0.")]
    NonPositiveBudget,
    #[error("Budget for '{0}' cannot be negative")]
    NegativeBudget(String),
}

/// Raw user input for a new expense.
#[derive(Debug, Clone, Default)]
pub(crate) struct ExpenseForm {
    pub(crate) description: String,
    pub(crate) amount: String,
    /// Category ID or name.
    pub(crate) category: String,
    /// `YYYY-MM-DD` or RFC 3339; `None` means now.
    pub(crate) date: Option<String>,
}

impl ExpenseForm {
    pub(crate) fn validate(
        &self,
        categories: &[Category],
        now: DateTime<Utc>,
    ) -> Result<Expense, ValidationError> {
        let description = self.description.trim();
        let len = description.chars().count();
        if len < DESCRIPTION_MIN {
            return Err(ValidationError::DescriptionTooShort);
        }
        if len > DESCRIPTION_MAX {
            return Err(ValidationError::DescriptionTooLong);
        }

        let amount = parse_amount(&self.amount)?;
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }

        let wanted = self.category.trim();
        if wanted.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        let category = Category::resolve(categories, wanted)
            .ok_or_else(|| ValidationError::UnknownCategory(wanted.to_string()))?;

        let date = match self.date.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => parse_date(s)?,
            _ => now,
        };

        Ok(Expense::new(
            category.id.clone(),
            amount,
            date,
            description.to_string(),
        ))
    }
}

pub(crate) fn parse_amount(input: &str) -> Result<Decimal, ValidationError> {
    let trimmed = input.trim();
    Decimal::from_str(trimmed).map_err(|_| ValidationError::InvalidAmount(trimmed.to_string()))
}

/// Accepts `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
pub(crate) fn parse_date(input: &str) -> Result<DateTime<Utc>, ValidationError> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight));
        }
    }
    DateTime::parse_from_rfc3339(input)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|_| ValidationError::InvalidDate(input.to_string()))
}

/// A single category budget; zero is allowed, negative amounts are not.
pub(crate) fn parse_budget_amount(input: &str, category: &str) -> Result<Decimal, ValidationError> {
    let amount = parse_amount(input)?;
    if amount < Decimal::ZERO {
        return Err(ValidationError::NegativeBudget(category.to_string()));
    }
    // "-0" parses as a negative zero
    if amount.is_zero() {
        return Ok(Decimal::ZERO);
    }
    Ok(amount)
}

/// The planner's total monthly budget; must be strictly positive.
pub(crate) fn parse_total_budget(input: &str) -> Result<Decimal, ValidationError> {
    let total = parse_amount(input)?;
    if total <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveBudget);
    }
    Ok(total)
}

/// Turn the budget editor's text fields (keyed by category ID) into updates.
///
/// Entries that don't parse, that equal the current budget, or whose
/// category has no budget row are skipped. Negative amounts are rejected.
pub(crate) fn budget_updates(
    details: &[CategoryWithDetails],
    snapshot: &Snapshot,
    edits: &HashMap<String, String>,
) -> Result<Vec<BudgetUpdate>, ValidationError> {
    let mut updates = Vec::new();
    for detail in details {
        let Some(budget) = snapshot.budget_for(&detail.category.id) else {
            continue;
        };
        let Some(Ok(amount)) = edits.get(&detail.category.id).map(|s| parse_amount(s)) else {
            continue;
        };
        if amount < Decimal::ZERO {
            return Err(ValidationError::NegativeBudget(detail.category.name.clone()));
        }
        if amount != detail.budget {
            updates.push(BudgetUpdate {
                budget_id: budget.id.clone(),
                amount,
            });
        }
    }
    Ok(updates)
}

#[cfg(test)]
mod tests;
