mod budget;
mod category;
mod derived;
mod expense;
mod snapshot;

pub use budget::{Budget, BudgetUpdate};
pub use category::{Category, Icon};
pub use derived::{CategorySpending, CategoryWithDetails};
pub use expense::Expense;
pub use snapshot::Snapshot;

/// Fresh unique identifier for a new record.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
