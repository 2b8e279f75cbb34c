use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::new_id;

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: String,
    pub category_id: String,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub description: String,
}

impl Expense {
    pub fn new(
        category_id: String,
        amount: Decimal,
        date: DateTime<Utc>,
        description: String,
    ) -> Self {
        Self {
            id: new_id(),
            category_id,
            amount,
            date,
            description,
        }
    }
}
