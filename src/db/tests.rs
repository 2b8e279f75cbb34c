#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn food_id(db: &Database) -> String {
    Category::find_by_name(&db.get_categories().unwrap(), "Food")
        .unwrap()
        .id
        .clone()
}

// ── Default data ──────────────────────────────────────────────

#[test]
fn test_default_categories_seeded() {
    let db = Database::open_in_memory().unwrap();
    let cats = db.get_categories().unwrap();
    let names: Vec<&str> = cats.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Food", "Transportation", "Housing", "Shopping", "Health", "Entertainment"]
    );
    assert_eq!(cats[0].icon, "Utensils");
    assert_eq!(cats[5].icon, "Film");
}

#[test]
fn test_default_budgets_linked_to_categories() {
    let db = Database::open_in_memory().unwrap();
    let snapshot = db.snapshot().unwrap();
    assert_eq!(snapshot.budgets.len(), 6);
    for budget in &snapshot.budgets {
        assert!(Category::find_by_id(&snapshot.categories, &budget.category_id).is_some());
    }
    let food = food_id(&db);
    assert_eq!(snapshot.budget_for(&food).unwrap().amount, dec!(500));
}

#[test]
fn test_defaults_seeded_once_per_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spendwise.db");
    {
        let db = Database::open(&path).unwrap();
        db.insert_category(&Category::new("Travel".into(), String::new()))
            .unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(db.get_categories().unwrap().len(), 7);
    assert_eq!(db.get_budgets().unwrap().len(), 6);
}

// ── Categories ────────────────────────────────────────────────

#[test]
fn test_insert_category_keeps_creation_order() {
    let db = Database::open_in_memory().unwrap();
    db.insert_category(&Category::new("Travel".into(), "BusFront".into()))
        .unwrap();
    let cats = db.get_categories().unwrap();
    assert_eq!(cats.last().unwrap().name, "Travel");
}

#[test]
fn test_duplicate_category_name_rejected() {
    let db = Database::open_in_memory().unwrap();
    let result = db.insert_category(&Category::new("Food".into(), String::new()));
    assert!(result.is_err());
}

// ── Expenses ──────────────────────────────────────────────────

#[test]
fn test_expense_roundtrip() {
    let db = Database::open_in_memory().unwrap();
    let food = food_id(&db);
    let date = Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 0).unwrap();
    let expense = Expense::new(food.clone(), dec!(12.34), date, "Lunch".into());
    db.insert_expense(&expense).unwrap();

    let all = db.get_expenses().unwrap();
    assert_eq!(all, vec![expense]);
}

#[test]
fn test_expenses_returned_in_insertion_order() {
    let db = Database::open_in_memory().unwrap();
    let food = food_id(&db);
    let later = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let earlier = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    db.insert_expense(&Expense::new(food.clone(), dec!(1), later, "first".into()))
        .unwrap();
    db.insert_expense(&Expense::new(food, dec!(2), earlier, "second".into()))
        .unwrap();

    let descs: Vec<String> = db
        .get_expenses()
        .unwrap()
        .into_iter()
        .map(|e| e.description)
        .collect();
    assert_eq!(descs, vec!["first", "second"]);
}

#[test]
fn test_expense_unknown_category_rejected() {
    let db = Database::open_in_memory().unwrap();
    let expense = Expense::new("missing".into(), dec!(5), Utc::now(), "Ghost".into());
    assert!(db.insert_expense(&expense).is_err());
}

// ── Budgets ───────────────────────────────────────────────────

#[test]
fn test_upsert_budget_updates_existing() {
    let db = Database::open_in_memory().unwrap();
    let food = food_id(&db);
    db.upsert_budget(&food, dec!(650)).unwrap();

    let budgets = db.get_budgets().unwrap();
    assert_eq!(budgets.len(), 6);
    let food_budget = budgets.iter().find(|b| b.category_id == food).unwrap();
    assert_eq!(food_budget.amount, dec!(650));
}

#[test]
fn test_upsert_budget_creates_missing() {
    let db = Database::open_in_memory().unwrap();
    let travel = Category::new("Travel".into(), String::new());
    db.insert_category(&travel).unwrap();
    db.upsert_budget(&travel.id, dec!(300)).unwrap();

    let budgets = db.get_budgets().unwrap();
    assert_eq!(budgets.len(), 7);
    assert_eq!(budgets.last().unwrap().amount, dec!(300));
}

#[test]
fn test_update_budget_amounts() {
    let mut db = Database::open_in_memory().unwrap();
    let budgets = db.get_budgets().unwrap();
    let updates = vec![
        BudgetUpdate {
            budget_id: budgets[0].id.clone(),
            amount: dec!(450),
        },
        BudgetUpdate {
            budget_id: budgets[1].id.clone(),
            amount: Decimal::ZERO,
        },
        BudgetUpdate {
            budget_id: "no-such-budget".into(),
            amount: dec!(1),
        },
    ];
    let changed = db.update_budget_amounts(&updates).unwrap();
    assert_eq!(changed, 2);

    let after = db.get_budgets().unwrap();
    assert_eq!(after[0].amount, dec!(450));
    assert_eq!(after[1].amount, Decimal::ZERO);
    assert_eq!(after[2].amount, budgets[2].amount);
}

#[test]
fn test_update_budget_amounts_empty() {
    let mut db = Database::open_in_memory().unwrap();
    assert_eq!(db.update_budget_amounts(&[]).unwrap(), 0);
}

// ── Settings ──────────────────────────────────────────────────

#[test]
fn test_setting_missing() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.get_setting("theme").unwrap(), None);
}

#[test]
fn test_setting_overwrite() {
    let db = Database::open_in_memory().unwrap();
    db.set_setting("theme", "dark").unwrap();
    db.set_setting("theme", "light").unwrap();
    assert_eq!(db.get_setting("theme").unwrap().as_deref(), Some("light"));
}

// ── Snapshot ──────────────────────────────────────────────────

#[test]
fn test_snapshot_feeds_dashboard() {
    let db = Database::open_in_memory().unwrap();
    let food = food_id(&db);
    let date = Utc.with_ymd_and_hms(2024, 2, 2, 0, 0, 0).unwrap();
    db.insert_expense(&Expense::new(food, dec!(20), date, "Groceries".into()))
        .unwrap();

    let dash = crate::aggregate::Dashboard::from_snapshot(&db.snapshot().unwrap());
    assert_eq!(dash.total_spent, dec!(20));
    assert_eq!(dash.total_budget, dec!(2230));
    assert_eq!(dash.remaining, dec!(2210));
    assert_eq!(dash.spending[0].spent, dec!(20));
}
