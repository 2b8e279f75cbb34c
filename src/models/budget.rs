use rust_decimal::Decimal;

use super::new_id;

/// Monthly spending allocation for one category. At most one per category.
#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: String,
    pub category_id: String,
    pub amount: Decimal,
}

impl Budget {
    pub fn new(category_id: String, amount: Decimal) -> Self {
        Self {
            id: new_id(),
            category_id,
            amount,
        }
    }
}

/// A new amount for an existing budget row.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetUpdate {
    pub budget_id: String,
    pub amount: Decimal,
}
