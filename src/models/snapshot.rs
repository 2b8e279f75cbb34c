use super::{Budget, Category, Expense};

/// Immutable copy of the three base collections, in storage order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub categories: Vec<Category>,
    pub expenses: Vec<Expense>,
    pub budgets: Vec<Budget>,
}

impl Snapshot {
    pub fn budget_for(&self, category_id: &str) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.category_id == category_id)
    }
}
