pub(crate) mod budgets;
pub(crate) mod dashboard;
pub(crate) mod expenses;
pub(crate) mod planner;
