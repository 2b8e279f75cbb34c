pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS categories (
    id    TEXT PRIMARY KEY,
    name  TEXT NOT NULL UNIQUE,
    icon  TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS expenses (
    id           TEXT PRIMARY KEY,
    category_id  TEXT NOT NULL REFERENCES categories(id),
    amount       TEXT NOT NULL,
    date         TEXT NOT NULL,
    description  TEXT NOT NULL,
    created_at   TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);
CREATE INDEX IF NOT EXISTS idx_expenses_category ON expenses(category_id);

CREATE TABLE IF NOT EXISTS budgets (
    id           TEXT PRIMARY KEY,
    category_id  TEXT NOT NULL UNIQUE REFERENCES categories(id),
    amount       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS settings (
    key    TEXT PRIMARY KEY,
    value  TEXT NOT NULL
);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];

/// Categories and monthly budgets every new database starts with:
/// (name, icon, budget).
pub(crate) const DEFAULT_CATEGORIES: &[(&str, &str, i64)] = &[
    ("Food", "Utensils", 500),
    ("Transportation", "BusFront", 100),
    ("Housing", "Home", 1200),
    ("Shopping", "ShoppingCart", 250),
    ("Health", "HeartPulse", 100),
    ("Entertainment", "Film", 80),
];
