//! Derived views over a snapshot of categories, expenses and budgets.
//!
//! Every function here is pure: inputs are borrowed immutably and each call
//! recomputes from scratch, so the same snapshot always yields the same
//! result. Expenses or budgets whose `category_id` matches no category are
//! left out of the per-category views but still count toward the totals.

use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{Budget, Category, CategorySpending, CategoryWithDetails, Expense, Snapshot};

/// Number of expenses shown in the dashboard's recent list.
pub(crate) const RECENT_EXPENSES: usize = 5;

/// Saturates at `Decimal::MAX`/`MIN` instead of overflowing.
pub(crate) fn total_spent(expenses: &[Expense]) -> Decimal {
    saturating_sum(expenses.iter().map(|e| e.amount))
}

/// Sum of every budget row, including rows whose category no longer exists.
pub(crate) fn total_budget(budgets: &[Budget]) -> Decimal {
    saturating_sum(budgets.iter().map(|b| b.amount))
}

/// `total_budget - total_spent`; negative when over budget.
pub(crate) fn remaining_budget(expenses: &[Expense], budgets: &[Budget]) -> Decimal {
    total_budget(budgets).saturating_sub(total_spent(expenses))
}

fn saturating_sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}

fn spent_per_category(expenses: &[Expense]) -> HashMap<&str, Decimal> {
    let mut totals: HashMap<&str, Decimal> = HashMap::new();
    for expense in expenses {
        let total = totals.entry(expense.category_id.as_str()).or_default();
        *total = total.saturating_add(expense.amount);
    }
    totals
}

fn budget_per_category(budgets: &[Budget]) -> HashMap<&str, Decimal> {
    let mut amounts: HashMap<&str, Decimal> = HashMap::new();
    for budget in budgets {
        // First row wins if a category somehow has two.
        amounts
            .entry(budget.category_id.as_str())
            .or_insert(budget.amount);
    }
    amounts
}

/// One entry per category, in input order; categories without expenses get zero.
pub(crate) fn spending_by_category(
    categories: &[Category],
    expenses: &[Expense],
) -> Vec<CategorySpending> {
    let spent = spent_per_category(expenses);
    categories
        .iter()
        .map(|c| CategorySpending {
            name: c.name.clone(),
            spent: spent.get(c.id.as_str()).copied().unwrap_or_default(),
        })
        .collect()
}

pub(crate) fn categories_with_details(
    categories: &[Category],
    expenses: &[Expense],
    budgets: &[Budget],
) -> Vec<CategoryWithDetails> {
    let spent = spent_per_category(expenses);
    let budget = budget_per_category(budgets);
    categories
        .iter()
        .map(|c| CategoryWithDetails {
            category: c.clone(),
            spent: spent.get(c.id.as_str()).copied().unwrap_or_default(),
            budget: budget.get(c.id.as_str()).copied().unwrap_or_default(),
        })
        .collect()
}

/// Most recent first. The sort is stable, so expenses sharing a timestamp
/// keep their input order.
pub(crate) fn sorted_expenses_by_date_desc(expenses: &[Expense]) -> Vec<Expense> {
    let mut sorted = expenses.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

pub(crate) fn recent_expenses(expenses: &[Expense], n: usize) -> Vec<Expense> {
    let mut sorted = sorted_expenses_by_date_desc(expenses);
    sorted.truncate(n);
    sorted
}

/// `spent / budget * 100`, or 0 when there is no positive budget. Not capped.
/// A ratio too large for `Decimal` becomes `f64::MAX` (or `f64::MIN` for negative spending).
pub(crate) fn budget_percentage(spent: Decimal, budget: Decimal) -> f64 {
    if budget <= Decimal::ZERO {
        return 0.0;
    }
    spent
        .checked_div(budget)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|pct| pct.to_f64())
        .unwrap_or(if spent.is_sign_negative() {
            f64::MIN
        } else {
            f64::MAX
        })
}

/// False when no category has any spending (the chart shows its empty state).
pub(crate) fn has_spending(spending: &[CategorySpending]) -> bool {
    spending.iter().any(|s| !s.spent.is_zero())
}

/// Everything the dashboard renders, derived from one snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Dashboard {
    pub(crate) total_spent: Decimal,
    pub(crate) total_budget: Decimal,
    pub(crate) remaining: Decimal,
    pub(crate) spending: Vec<CategorySpending>,
    pub(crate) categories: Vec<CategoryWithDetails>,
    /// All expenses, newest first.
    pub(crate) expenses: Vec<Expense>,
}

impl Dashboard {
    pub(crate) fn from_snapshot(snapshot: &Snapshot) -> Self {
        let total_spent = total_spent(&snapshot.expenses);
        let total_budget = total_budget(&snapshot.budgets);
        Self {
            total_spent,
            total_budget,
            remaining: total_budget.saturating_sub(total_spent),
            spending: spending_by_category(&snapshot.categories, &snapshot.expenses),
            categories: categories_with_details(
                &snapshot.categories,
                &snapshot.expenses,
                &snapshot.budgets,
            ),
            expenses: sorted_expenses_by_date_desc(&snapshot.expenses),
        }
    }

    pub(crate) fn is_over_budget(&self) -> bool {
        self.remaining < Decimal::ZERO
    }

    pub(crate) fn recent(&self) -> &[Expense] {
        &self.expenses[..self.expenses.len().min(RECENT_EXPENSES)]
    }
}

#[cfg(test)]
mod tests;
