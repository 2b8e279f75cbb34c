use rust_decimal::Decimal;

use super::Category;

/// Amount spent in one category. Recomputed on every snapshot, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpending {
    pub name: String,
    pub spent: Decimal,
}

/// A category together with what was spent in it and its budget
/// (zero when the category has no budget row).
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryWithDetails {
    pub category: Category,
    pub spent: Decimal,
    pub budget: Decimal,
}

impl CategoryWithDetails {
    /// Progress toward the budget as a percentage clamped to `0..=100`.
    pub fn progress(&self) -> f64 {
        crate::aggregate::budget_percentage(self.spent, self.budget).clamp(0.0, 100.0)
    }

    pub fn is_over_budget(&self) -> bool {
        self.budget > Decimal::ZERO && self.spent > self.budget
    }
}
