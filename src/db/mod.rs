mod schema;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use crate::models::*;

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        db.seed_defaults()?;
        info!(path = %path.display(), "opened database");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        db.seed_defaults()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            debug!(version = schema::CURRENT_VERSION, "creating fresh schema");
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                debug!(from_version, "applying migration");
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    /// Seed the default categories, each with its budget, into an empty database.
    fn seed_defaults(&mut self) -> Result<()> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(());
        }

        let tx = self.conn.transaction()?;
        for &(name, icon, amount) in schema::DEFAULT_CATEGORIES {
            let category = Category::new(name.to_string(), icon.to_string());
            let budget = Budget::new(category.id.clone(), Decimal::from(amount));
            tx.execute(
                "INSERT INTO categories (id, name, icon) VALUES (?1, ?2, ?3)",
                params![category.id, category.name, category.icon],
            )?;
            tx.execute(
                "INSERT INTO budgets (id, category_id, amount) VALUES (?1, ?2, ?3)",
                params![budget.id, budget.category_id, budget.amount.to_string()],
            )?;
        }
        tx.commit()?;
        info!(
            categories = schema::DEFAULT_CATEGORIES.len(),
            "seeded default categories and budgets"
        );
        Ok(())
    }

    // ── Categories ────────────────────────────────────────────

    pub(crate) fn insert_category(&self, cat: &Category) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO categories (id, name, icon) VALUES (?1, ?2, ?3)",
                params![cat.id, cat.name, cat.icon],
            )
            .with_context(|| format!("Failed to create category '{}'", cat.name))?;
        debug!(id = %cat.id, name = %cat.name, "inserted category");
        Ok(())
    }

    /// All categories in creation order.
    pub(crate) fn get_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, icon FROM categories ORDER BY rowid")?;
        let rows = stmt.query_map([], |row| {
            Ok(Category {
                id: row.get(0)?,
                name: row.get(1)?,
                icon: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    // ── Expenses ──────────────────────────────────────────────

    pub(crate) fn insert_expense(&self, expense: &Expense) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO expenses (id, category_id, amount, date, description, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    expense.id,
                    expense.category_id,
                    expense.amount.to_string(),
                    expense.date.to_rfc3339(),
                    expense.description,
                    Utc::now().to_rfc3339(),
                ],
            )
            .context("Failed to add expense")?;
        debug!(id = %expense.id, amount = %expense.amount, "inserted expense");
        Ok(())
    }

    /// All expenses in the order they were recorded.
    pub(crate) fn get_expenses(&self) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, category_id, amount, date, description FROM expenses ORDER BY rowid",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Expense {
                id: row.get(0)?,
                category_id: row.get(1)?,
                amount: decimal_at(row, 2)?,
                date: timestamp_at(row, 3)?,
                description: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    // ── Budgets ───────────────────────────────────────────────

    pub(crate) fn get_budgets(&self) -> Result<Vec<Budget>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, category_id, amount FROM budgets ORDER BY rowid")?;
        let rows = stmt.query_map([], |row| {
            Ok(Budget {
                id: row.get(0)?,
                category_id: row.get(1)?,
                amount: decimal_at(row, 2)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Create the category's budget, or replace its amount if one exists.
    pub(crate) fn upsert_budget(&self, category_id: &str, amount: Decimal) -> Result<()> {
        let budget = Budget::new(category_id.to_string(), amount);
        self.conn.execute(
            "INSERT INTO budgets (id, category_id, amount)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(category_id) DO UPDATE SET amount = excluded.amount",
            params![budget.id, budget.category_id, budget.amount.to_string()],
        )?;
        debug!(category_id, %amount, "upserted budget");
        Ok(())
    }

    /// Apply new amounts to existing budget rows in one transaction.
    /// Returns how many rows changed.
    pub(crate) fn update_budget_amounts(&mut self, updates: &[BudgetUpdate]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut changed = 0;
        for update in updates {
            changed += tx.execute(
                "UPDATE budgets SET amount = ?1 WHERE id = ?2",
                params![update.amount.to_string(), update.budget_id],
            )?;
        }
        tx.commit().context("Failed to update budgets")?;
        info!(changed, "updated budgets");
        Ok(changed)
    }

    // ── Settings ──────────────────────────────────────────────

    pub(crate) fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let result = self.conn.query_row(
            "SELECT value FROM settings WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    // ── Snapshot ──────────────────────────────────────────────

    /// Current contents of every collection the aggregator reads.
    pub(crate) fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            categories: self.get_categories()?,
            expenses: self.get_expenses()?,
            budgets: self.get_budgets()?,
        })
    }
}

fn decimal_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn timestamp_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

#[cfg(test)]
mod tests;
