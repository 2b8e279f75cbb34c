#![allow(clippy::unwrap_used)]

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn cat(id: &str, name: &str) -> Category {
    Category {
        id: id.into(),
        name: name.into(),
        icon: String::new(),
    }
}

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn exp(id: &str, category_id: &str, amount: Decimal, date: DateTime<Utc>) -> Expense {
    Expense {
        id: id.into(),
        category_id: category_id.into(),
        amount,
        date,
        description: format!("expense {id}"),
    }
}

fn budget(id: &str, category_id: &str, amount: Decimal) -> Budget {
    Budget {
        id: id.into(),
        category_id: category_id.into(),
        amount,
    }
}

fn sample() -> (Vec<Category>, Vec<Expense>, Vec<Budget>) {
    let categories = vec![cat("c1", "Food"), cat("c2", "Housing"), cat("c3", "Health")];
    let expenses = vec![
        exp("e1", "c1", dec!(12.50), day(2024, 1, 3)),
        exp("e2", "c2", dec!(800), day(2024, 1, 1)),
        exp("e3", "c1", dec!(7.25), day(2024, 1, 9)),
    ];
    let budgets = vec![budget("b1", "c1", dec!(500)), budget("b2", "c2", dec!(1200))];
    (categories, expenses, budgets)
}

// ── Totals ────────────────────────────────────────────────────

#[test]
fn test_totals_empty() {
    assert_eq!(total_spent(&[]), Decimal::ZERO);
    assert_eq!(total_budget(&[]), Decimal::ZERO);
    assert_eq!(remaining_budget(&[], &[]), Decimal::ZERO);
}

#[test]
fn test_total_spent_sums_all_expenses() {
    let (_, expenses, _) = sample();
    assert_eq!(total_spent(&expenses), dec!(819.75));
}

#[test]
fn test_total_budget_counts_orphaned_rows() {
    let budgets = vec![budget("b1", "c1", dec!(100)), budget("b9", "gone", dec!(40))];
    assert_eq!(total_budget(&budgets), dec!(140));
}

#[test]
fn test_remaining_budget_can_be_negative() {
    let expenses = vec![exp("e1", "c1", dec!(150), day(2024, 1, 1))];
    let budgets = vec![budget("b1", "c1", dec!(100))];
    assert_eq!(remaining_budget(&expenses, &budgets), dec!(-50));
}

// ── spending_by_category ──────────────────────────────────────

#[test]
fn test_spending_preserves_length_and_order() {
    let (categories, expenses, _) = sample();
    let spending = spending_by_category(&categories, &expenses);
    let names: Vec<&str> = spending.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Food", "Housing", "Health"]);
}

#[test]
fn test_spending_zero_for_unused_category() {
    let (categories, expenses, _) = sample();
    let spending = spending_by_category(&categories, &expenses);
    assert_eq!(spending[0].spent, dec!(19.75));
    assert_eq!(spending[1].spent, dec!(800));
    assert_eq!(spending[2].spent, Decimal::ZERO);
}

#[test]
fn test_spending_empty_categories() {
    let (_, expenses, _) = sample();
    assert!(spending_by_category(&[], &expenses).is_empty());
}

#[test]
fn test_spending_sum_matches_total_without_dangling() {
    let (categories, expenses, _) = sample();
    let sum: Decimal = spending_by_category(&categories, &expenses)
        .iter()
        .map(|s| s.spent)
        .sum();
    assert_eq!(sum, total_spent(&expenses));
}

#[test]
fn test_dangling_expense_excluded_from_categories_but_counted_in_total() {
    let (categories, mut expenses, _) = sample();
    expenses.push(exp("e4", "deleted", dec!(99), day(2024, 1, 5)));
    let sum: Decimal = spending_by_category(&categories, &expenses)
        .iter()
        .map(|s| s.spent)
        .sum();
    assert_eq!(sum, dec!(819.75));
    assert_eq!(total_spent(&expenses), dec!(918.75));
    assert!(total_spent(&expenses) >= sum);
}

// ── categories_with_details ───────────────────────────────────

#[test]
fn test_details_one_per_category() {
    let (categories, expenses, budgets) = sample();
    let details = categories_with_details(&categories, &expenses, &budgets);
    assert_eq!(details.len(), categories.len());
    for (d, c) in details.iter().zip(&categories) {
        assert_eq!(&d.category, c);
    }
}

#[test]
fn test_details_budget_zero_when_missing() {
    let (categories, expenses, budgets) = sample();
    let details = categories_with_details(&categories, &expenses, &budgets);
    assert_eq!(details[0].budget, dec!(500));
    assert_eq!(details[1].budget, dec!(1200));
    assert_eq!(details[2].budget, Decimal::ZERO);
    assert_eq!(details[2].spent, Decimal::ZERO);
}

#[test]
fn test_details_spent_matches_spending_view() {
    let (categories, expenses, budgets) = sample();
    let details = categories_with_details(&categories, &expenses, &budgets);
    let spending = spending_by_category(&categories, &expenses);
    for (d, s) in details.iter().zip(&spending) {
        assert_eq!(d.spent, s.spent);
        assert_eq!(d.category.name, s.name);
    }
}

#[test]
fn test_details_first_budget_row_wins() {
    let categories = vec![cat("c1", "Food")];
    let budgets = vec![budget("b1", "c1", dec!(10)), budget("b2", "c1", dec!(20))];
    let details = categories_with_details(&categories, &[], &budgets);
    assert_eq!(details[0].budget, dec!(10));
}

// ── sorted_expenses_by_date_desc ──────────────────────────────

#[test]
fn test_sort_most_recent_first() {
    let expenses = vec![
        exp("jan", "c1", dec!(5), day(2024, 1, 1)),
        exp("mar", "c1", dec!(5), day(2024, 3, 1)),
        exp("feb", "c1", dec!(5), day(2024, 2, 1)),
    ];
    let sorted = sorted_expenses_by_date_desc(&expenses);
    let ids: Vec<&str> = sorted.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["mar", "feb", "jan"]);
}

#[test]
fn test_sort_is_stable_for_equal_dates() {
    let same = day(2024, 5, 5);
    let expenses = vec![
        exp("a", "c1", dec!(1), same),
        exp("newer", "c1", dec!(1), day(2024, 6, 1)),
        exp("b", "c1", dec!(1), same),
        exp("c", "c1", dec!(1), same),
    ];
    let sorted = sorted_expenses_by_date_desc(&expenses);
    let ids: Vec<&str> = sorted.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["newer", "a", "b", "c"]);
}

#[test]
fn test_sort_does_not_mutate_input() {
    let (_, expenses, _) = sample();
    let before = expenses.clone();
    let _ = sorted_expenses_by_date_desc(&expenses);
    assert_eq!(expenses, before);
}

#[test]
fn test_recent_expenses_truncates() {
    let expenses: Vec<Expense> = (1..=8)
        .map(|d| exp(&format!("e{d}"), "c1", dec!(1), day(2024, 1, d)))
        .collect();
    let recent = recent_expenses(&expenses, 5);
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0].id, "e8");
    assert_eq!(recent[4].id, "e4");
    assert_eq!(recent_expenses(&expenses[..2], 5).len(), 2);
}

// ── Percentages ───────────────────────────────────────────────

#[test]
fn test_budget_percentage() {
    assert_eq!(budget_percentage(dec!(25), dec!(100)), 25.0);
    assert_eq!(budget_percentage(dec!(150), dec!(100)), 150.0);
    assert_eq!(budget_percentage(dec!(10), Decimal::ZERO), 0.0);
    assert_eq!(budget_percentage(dec!(10), dec!(-5)), 0.0);
}

#[test]
fn test_budget_percentage_overflow_reads_as_far_over_budget() {
    assert_eq!(budget_percentage(Decimal::MAX, dec!(1)), f64::MAX);
    assert_eq!(
        budget_percentage(Decimal::MAX, dec!(0.0000000000000000000000000001)),
        f64::MAX
    );
    assert_eq!(budget_percentage(Decimal::MIN, dec!(1)), f64::MIN);
}

#[test]
fn test_has_spending() {
    let (categories, expenses, _) = sample();
    assert!(has_spending(&spending_by_category(&categories, &expenses)));
    assert!(!has_spending(&spending_by_category(&categories, &[])));
    assert!(!has_spending(&[]));
}

// ── Idempotence ───────────────────────────────────────────────

#[test]
fn test_derivations_are_idempotent() {
    let (categories, expenses, budgets) = sample();
    assert_eq!(total_spent(&expenses), total_spent(&expenses));
    assert_eq!(
        spending_by_category(&categories, &expenses),
        spending_by_category(&categories, &expenses)
    );
    assert_eq!(
        categories_with_details(&categories, &expenses, &budgets),
        categories_with_details(&categories, &expenses, &budgets)
    );
    assert_eq!(
        sorted_expenses_by_date_desc(&expenses),
        sorted_expenses_by_date_desc(&expenses)
    );
}

// ── Scenarios ─────────────────────────────────────────────────

#[test]
fn test_scenario_single_category() {
    let categories = vec![cat("c1", "Food")];
    let expenses = vec![
        exp("e1", "c1", dec!(20), day(2024, 1, 1)),
        exp("e2", "c1", dec!(30), day(2024, 1, 2)),
    ];
    let budgets = vec![budget("b1", "c1", dec!(100))];

    assert_eq!(total_spent(&expenses), dec!(50));
    assert_eq!(total_budget(&budgets), dec!(100));
    assert_eq!(
        spending_by_category(&categories, &expenses),
        vec![CategorySpending {
            name: "Food".into(),
            spent: dec!(50)
        }]
    );
    let details = categories_with_details(&categories, &expenses, &budgets);
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].spent, dec!(50));
    assert_eq!(details[0].budget, dec!(100));
}

#[test]
fn test_scenario_no_expenses_no_budgets() {
    let categories = vec![cat("c1", "Food")];
    assert_eq!(total_spent(&[]), Decimal::ZERO);
    assert_eq!(total_budget(&[]), Decimal::ZERO);
    let details = categories_with_details(&categories, &[], &[]);
    assert_eq!(details[0].spent, Decimal::ZERO);
    assert_eq!(details[0].budget, Decimal::ZERO);
}

// ── Dashboard ─────────────────────────────────────────────────

#[test]
fn test_dashboard_from_snapshot() {
    let (categories, expenses, budgets) = sample();
    let snapshot = Snapshot {
        categories,
        expenses,
        budgets,
    };
    let dash = Dashboard::from_snapshot(&snapshot);
    assert_eq!(dash.total_spent, dec!(819.75));
    assert_eq!(dash.total_budget, dec!(1700));
    assert_eq!(dash.remaining, dec!(880.25));
    assert!(!dash.is_over_budget());
    assert_eq!(dash.spending.len(), 3);
    assert_eq!(dash.categories.len(), 3);
    assert_eq!(dash.expenses[0].id, "e3");
    assert_eq!(dash.recent().len(), 3);
}

#[test]
fn test_dashboard_over_budget() {
    let snapshot = Snapshot {
        categories: vec![cat("c1", "Food")],
        expenses: vec![exp("e1", "c1", dec!(120), day(2024, 1, 1))],
        budgets: vec![budget("b1", "c1", dec!(100))],
    };
    let dash = Dashboard::from_snapshot(&snapshot);
    assert_eq!(dash.remaining, dec!(-20));
    assert!(dash.is_over_budget());
}

#[test]
fn test_dashboard_empty_snapshot() {
    let dash = Dashboard::from_snapshot(&Snapshot::default());
    assert_eq!(dash, Dashboard::default());
    assert!(dash.recent().is_empty());
}

#[test]
fn test_totals_saturate_instead_of_overflowing() {
    let expenses = vec![
        exp("e1", "c1", Decimal::MAX, day(2024, 1, 1)),
        exp("e2", "c1", Decimal::MAX, day(2024, 1, 2)),
    ];
    let budgets = vec![budget("b1", "c1", Decimal::MAX), budget("b2", "c2", dec!(1))];
    assert_eq!(total_spent(&expenses), Decimal::MAX);
    assert_eq!(total_budget(&budgets), Decimal::MAX);
    let categories = vec![cat("c1", "Food")];
    assert_eq!(spending_by_category(&categories, &expenses)[0].spent, Decimal::MAX);
    let debt = vec![budget("b1", "c1", Decimal::MIN)];
    assert_eq!(remaining_budget(&expenses, &debt), Decimal::MIN);
}

#[test]
fn test_dashboard_survives_huge_validated_expenses() {
    let categories = vec![cat("c1", "Food")];
    let form = crate::validate::ExpenseForm {
        description: "Yacht".into(),
        amount: "79228162514264337593543950335".into(),
        category: "Food".into(),
        date: None,
    };
    let now = day(2024, 1, 1);
    let expenses = vec![
        form.validate(&categories, now).unwrap(),
        form.validate(&categories, now).unwrap(),
    ];
    let snapshot = Snapshot {
        categories,
        expenses,
        budgets: vec![budget("b1", "c1", dec!(500))],
    };
    let dash = Dashboard::from_snapshot(&snapshot);
    assert_eq!(dash.total_spent, Decimal::MAX);
    assert_eq!(dash.remaining, dec!(500) - Decimal::MAX);
    assert!(dash.is_over_budget());
    assert_eq!(dash.categories[0].progress(), 100.0);
}
