#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;

use super::*;
use crate::aggregate::categories_with_details;
use crate::models::Budget;

fn categories() -> Vec<Category> {
    vec![
        Category {
            id: "c1".into(),
            name: "Food".into(),
            icon: "Utensils".into(),
        },
        Category {
            id: "c2".into(),
            name: "Health".into(),
            icon: "HeartPulse".into(),
        },
    ]
}

fn form(description: &str, amount: &str, category: &str) -> ExpenseForm {
    ExpenseForm {
        description: description.into(),
        amount: amount.into(),
        category: category.into(),
        date: None,
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
}

// ── ExpenseForm ───────────────────────────────────────────────

#[test]
fn test_valid_expense_by_name() {
    let expense = form("Coffee with a friend", "4.50", "food")
        .validate(&categories(), now())
        .unwrap();
    assert_eq!(expense.category_id, "c1");
    assert_eq!(expense.amount, dec!(4.50));
    assert_eq!(expense.description, "Coffee with a friend");
    assert_eq!(expense.date, now());
}

#[test]
fn test_valid_expense_by_id() {
    let expense = form("Pharmacy", "12", "c2")
        .validate(&categories(), now())
        .unwrap();
    assert_eq!(expense.category_id, "c2");
}

#[test]
fn test_description_trimmed_and_length_checked() {
    let err = form("  a  ", "1", "c1").validate(&categories(), now());
    assert_eq!(err, Err(ValidationError::DescriptionTooShort));

    let long = "x".repeat(101);
    let err = form(&long, "1", "c1").validate(&categories(), now());
    assert_eq!(err, Err(ValidationError::DescriptionTooLong));

    let max = "x".repeat(100);
    assert!(form(&max, "1", "c1").validate(&categories(), now()).is_ok());
}

#[test]
fn test_description_length_counts_characters() {
    // Three characters, nine bytes
    assert!(form("चाय", "1", "c1").validate(&categories(), now()).is_ok());
}

#[test]
fn test_amount_must_be_positive() {
    let err = form("Refund", "0", "c1").validate(&categories(), now());
    assert_eq!(err, Err(ValidationError::NonPositiveAmount));
    let err = form("Refund", "-3", "c1").validate(&categories(), now());
    assert_eq!(err, Err(ValidationError::NonPositiveAmount));
}

#[test]
fn test_amount_must_parse() {
    let err = form("Lunch", "ten", "c1").validate(&categories(), now());
    assert_eq!(err, Err(ValidationError::InvalidAmount("ten".into())));
}

#[test]
fn test_category_required_and_known() {
    let err = form("Lunch", "10", " ").validate(&categories(), now());
    assert_eq!(err, Err(ValidationError::MissingCategory));
    let err = form("Lunch", "10", "Travel").validate(&categories(), now());
    assert_eq!(err, Err(ValidationError::UnknownCategory("Travel".into())));
}

#[test]
fn test_explicit_date() {
    let mut f = form("Bus pass", "30", "c1");
    f.date = Some("2024-02-29".into());
    let expense = f.validate(&categories(), now()).unwrap();
    assert_eq!(expense.date, Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
}

#[test]
fn test_invalid_date() {
    let mut f = form("Bus pass", "30", "c1");
    f.date = Some("2023-02-29".into());
    let err = f.validate(&categories(), now());
    assert_eq!(err, Err(ValidationError::InvalidDate("2023-02-29".into())));
}

// ── Dates ─────────────────────────────────────────────────────

#[test]
fn test_parse_date_rfc3339() {
    let parsed = parse_date("2024-03-10T15:00:00+05:30").unwrap();
    assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 10, 9, 30, 0).unwrap());
}

// ── Planner ───────────────────────────────────────────────────

#[test]
fn test_total_budget() {
    assert_eq!(parse_total_budget("3000").unwrap(), dec!(3000));
    assert_eq!(parse_total_budget(" 12.5 ").unwrap(), dec!(12.5));
    assert_eq!(parse_total_budget("0"), Err(ValidationError::NonPositiveBudget));
    assert_eq!(parse_total_budget("-1"), Err(ValidationError::NonPositiveBudget));
    assert!(matches!(
        parse_total_budget(""),
        Err(ValidationError::InvalidAmount(_))
    ));
}

// ── Budget editor ─────────────────────────────────────────────

#[test]
fn test_budget_amount() {
    assert_eq!(parse_budget_amount("500", "Food").unwrap(), dec!(500));
    assert_eq!(parse_budget_amount("0", "Food").unwrap(), Decimal::ZERO);
    let zero = parse_budget_amount("-0", "Food").unwrap();
    assert_eq!(zero, Decimal::ZERO);
    assert!(!zero.is_sign_negative());
    assert_eq!(
        parse_budget_amount("-5", "Food"),
        Err(ValidationError::NegativeBudget("Food".into()))
    );
    assert!(matches!(
        parse_budget_amount("lots", "Food"),
        Err(ValidationError::InvalidAmount(_))
    ));
}

fn snapshot() -> Snapshot {
    Snapshot {
        categories: categories(),
        expenses: Vec::new(),
        // Health has no budget row
        budgets: vec![Budget {
            id: "b1".into(),
            category_id: "c1".into(),
            amount: dec!(500),
        }],
    }
}

fn edits(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_budget_updates_changed_only() {
    let snap = snapshot();
    let details = categories_with_details(&snap.categories, &snap.expenses, &snap.budgets);

    let unchanged = budget_updates(&details, &snap, &edits(&[("c1", "500")])).unwrap();
    assert!(unchanged.is_empty());

    let changed = budget_updates(&details, &snap, &edits(&[("c1", "450.00")])).unwrap();
    assert_eq!(
        changed,
        vec![BudgetUpdate {
            budget_id: "b1".into(),
            amount: dec!(450),
        }]
    );
}

#[test]
fn test_budget_updates_skip_missing_rows_and_garbage() {
    let snap = snapshot();
    let details = categories_with_details(&snap.categories, &snap.expenses, &snap.budgets);
    let updates =
        budget_updates(&details, &snap, &edits(&[("c1", "abc"), ("c2", "75")])).unwrap();
    assert!(updates.is_empty());
}

#[test]
fn test_budget_updates_reject_negative() {
    let snap = snapshot();
    let details = categories_with_details(&snap.categories, &snap.expenses, &snap.budgets);
    let err = budget_updates(&details, &snap, &edits(&[("c1", "-10")]));
    assert_eq!(err, Err(ValidationError::NegativeBudget("Food".into())));
}
