use std::collections::HashMap;

use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{error, info};

use super::theme::Palette;
use super::util::{format_currency, money};
use crate::advisor::{self, BudgetAdvisor, PlanResponse};
use crate::aggregate::Dashboard;
use crate::db::Database;
use crate::models::{Category, CategoryWithDetails, Icon, Snapshot};
use crate::settings::Settings;
use crate::validate::{self, ExpenseForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Expenses,
    Budgets,
    Planner,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Expenses,
            Self::Budgets,
            Self::Planner,
        ]
    }

    /// Translation key of the tab title.
    pub(crate) fn title_key(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Expenses => "expenses",
            Self::Budgets => "budgetGoals",
            Self::Planner => "planner",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    BudgetEdit,
    PlanInput,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::BudgetEdit => write!(f, "EDIT"),
            Self::PlanInput => write!(f, "PLAN"),
        }
    }
}

/// Advisor call queued by a key or command, run after the next frame so the
/// "Generating" notice is on screen while the advisor works.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PendingRequest {
    Suggestions,
    Plan(Decimal),
}

/// Theme, language, currency.
pub(crate) const SETTINGS_ROWS: usize = 3;

/// Height of the suggestion box under the budget goals.
pub(crate) const SUGGESTION_HEIGHT: usize = 5;

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) show_settings: bool,
    pub(crate) settings_index: usize,
    pub(crate) settings: Settings,

    pub(crate) snapshot: Snapshot,
    pub(crate) dashboard: Dashboard,

    // Expenses
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,

    // Budgets
    pub(crate) budget_index: usize,
    pub(crate) budget_scroll: usize,
    /// Text of each amount field while the budget editor is open, keyed by category ID.
    pub(crate) budget_edits: HashMap<String, String>,
    pub(crate) suggestions: Option<HashMap<String, String>>,

    // Planner
    pub(crate) plan_input: String,
    pub(crate) plan_total: Option<Decimal>,
    pub(crate) plan: Option<PlanResponse>,

    pub(crate) pending: Option<PendingRequest>,
    advisor: Option<Box<dyn BudgetAdvisor>>,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(settings: Settings, advisor: Option<Box<dyn BudgetAdvisor>>) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            show_settings: false,
            settings_index: 0,
            settings,

            snapshot: Snapshot::default(),
            dashboard: Dashboard::default(),

            expense_index: 0,
            expense_scroll: 0,

            budget_index: 0,
            budget_scroll: 0,
            budget_edits: HashMap::new(),
            suggestions: None,

            plan_input: String::new(),
            plan_total: None,
            plan: None,

            pending: None,
            advisor,

            visible_rows: 20,
        }
    }

    /// Reload every collection and recompute the derived views.
    pub(crate) fn refresh(&mut self, db: &Database) -> Result<()> {
        self.snapshot = db.snapshot()?;
        self.dashboard = Dashboard::from_snapshot(&self.snapshot);

        let expenses = self.dashboard.expenses.len();
        if self.expense_index >= expenses {
            self.expense_index = expenses.saturating_sub(1);
        }
        self.expense_scroll = self.expense_scroll.min(self.expense_index);
        let categories = self.dashboard.categories.len();
        if self.budget_index >= categories {
            self.budget_index = categories.saturating_sub(1);
        }
        self.budget_scroll = self.budget_scroll.min(self.budget_index);
        Ok(())
    }

    /// Expense rows that fit: content height minus borders and the header row.
    pub(crate) fn expense_page(&self) -> usize {
        self.visible_rows.saturating_sub(3).max(1)
    }

    /// Budget rows that fit above the suggestion box.
    pub(crate) fn budget_page(&self) -> usize {
        self.visible_rows.saturating_sub(2 + SUGGESTION_HEIGHT).max(1)
    }

    pub(crate) fn palette(&self) -> &'static Palette {
        Palette::for_theme(self.settings.theme)
    }

    pub(crate) fn t<'a>(&self, key: &'a str) -> &'a str {
        self.settings.t(key)
    }

    pub(crate) fn money(&self, amount: Decimal) -> String {
        money(amount, self.settings.currency)
    }

    /// Budget goals show whole units.
    pub(crate) fn money_whole(&self, amount: Decimal) -> String {
        format_currency(amount, self.settings.currency, 0)
    }

    pub(crate) fn category_label(&self, category: &Category) -> String {
        let name = self.settings.category_name(&category.name);
        match category.glyph() {
            "" => name,
            glyph => format!("{glyph} {name}"),
        }
    }

    pub(crate) fn selected_detail(&self) -> Option<&CategoryWithDetails> {
        self.dashboard.categories.get(self.budget_index)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    pub(crate) fn add_expense(&mut self, db: &Database, form: &ExpenseForm) -> Result<()> {
        let expense = match form.validate(&self.snapshot.categories, Utc::now()) {
            Ok(expense) => expense,
            Err(e) => {
                self.set_status(e.to_string());
                return Ok(());
            }
        };
        db.insert_expense(&expense)?;
        self.refresh(db)?;
        self.set_status(self.t("expenseAdded"));
        Ok(())
    }

    /// Create or replace the budget of one category.
    pub(crate) fn set_budget(&mut self, db: &Database, category: &str, amount: &str) -> Result<()> {
        let Some(cat) = Category::resolve(&self.snapshot.categories, category).cloned() else {
            self.set_status(format!("Category '{category}' not found"));
            return Ok(());
        };
        let amount = match validate::parse_budget_amount(amount, &cat.name) {
            Ok(a) => a,
            Err(e) => {
                self.set_status(e.to_string());
                return Ok(());
            }
        };
        db.upsert_budget(&cat.id, amount)?;
        self.refresh(db)?;
        self.set_status(format!("Budget set: {} = {}", cat.name, self.money(amount)));
        Ok(())
    }

    pub(crate) fn add_category(&mut self, db: &Database, name: &str, icon: Option<Icon>) -> Result<()> {
        if Category::find_by_name(&self.snapshot.categories, name).is_some() {
            self.set_status(format!("Category '{name}' already exists"));
            return Ok(());
        }
        let icon = icon.map(|i| i.as_str().to_string()).unwrap_or_default();
        let category = Category::new(name.to_string(), icon);
        db.insert_category(&category)?;
        self.refresh(db)?;
        self.set_status(format!("Created category: {name}"));
        Ok(())
    }

    // ── Budget editor ────────────────────────────────────────

    pub(crate) fn begin_budget_edit(&mut self) {
        self.budget_edits = self
            .dashboard
            .categories
            .iter()
            .map(|d| (d.category.id.clone(), d.budget.to_string()))
            .collect();
        self.screen = Screen::Budgets;
        self.input_mode = InputMode::BudgetEdit;
        self.set_status(self.t("editBudgets"));
    }

    /// Amount field of the highlighted row.
    pub(crate) fn edit_buffer_mut(&mut self) -> Option<&mut String> {
        let id = self.dashboard.categories.get(self.budget_index)?.category.id.clone();
        self.budget_edits.get_mut(&id)
    }

    pub(crate) fn cancel_budget_edit(&mut self) {
        self.budget_edits.clear();
        self.input_mode = InputMode::Normal;
        self.status_message.clear();
    }

    pub(crate) fn save_budget_edits(&mut self, db: &mut Database) -> Result<()> {
        let updates = match validate::budget_updates(
            &self.dashboard.categories,
            &self.snapshot,
            &self.budget_edits,
        ) {
            Ok(updates) => updates,
            Err(e) => {
                self.set_status(e.to_string());
                return Ok(());
            }
        };
        self.budget_edits.clear();
        self.input_mode = InputMode::Normal;
        if updates.is_empty() {
            self.set_status("No budget changes");
            return Ok(());
        }
        let changed = db.update_budget_amounts(&updates)?;
        info!(changed, "budgets edited");
        self.refresh(db)?;
        self.set_status(self.t("budgetsUpdated"));
        Ok(())
    }

    // ── Advisor ──────────────────────────────────────────────

    pub(crate) fn queue_suggestions(&mut self) {
        self.screen = Screen::Budgets;
        self.suggestions = None;
        self.pending = Some(PendingRequest::Suggestions);
        self.set_status(format!("{}...", self.t("generating")));
    }

    /// Validate the planner input and queue the request.
    pub(crate) fn queue_plan(&mut self, input: &str) {
        self.screen = Screen::Planner;
        match validate::parse_total_budget(input) {
            Ok(total) => {
                self.plan = None;
                self.plan_total = Some(total);
                self.pending = Some(PendingRequest::Plan(total));
                self.set_status(format!("{}...", self.t("generatingPlan")));
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    pub(crate) fn run_pending(&mut self) {
        match self.pending.take() {
            Some(PendingRequest::Suggestions) => self.request_suggestions(),
            Some(PendingRequest::Plan(total)) => self.request_plan(total),
            None => {}
        }
    }

    fn request_suggestions(&mut self) {
        let result = match self.advisor.as_deref() {
            Some(client) => advisor::suggestions_for(client, &self.dashboard.categories),
            None => {
                self.set_status(self.t("advisorNotConfigured"));
                return;
            }
        };
        match result {
            Ok(map) => {
                self.suggestions = Some(map);
                self.status_message.clear();
            }
            Err(e) => {
                error!("budget suggestions failed: {e}");
                self.set_status(self.t("failedSuggestions"));
            }
        }
    }

    fn request_plan(&mut self, total: Decimal) {
        let result = match self.advisor.as_deref() {
            Some(client) => {
                advisor::plan_for(client, total, &self.snapshot.categories, &self.settings)
            }
            None => {
                self.set_status(self.t("advisorNotConfigured"));
                return;
            }
        };
        match result {
            Ok(plan) => {
                self.plan = Some(plan);
                self.status_message.clear();
            }
            Err(e) => {
                error!("budget plan failed: {e}");
                self.set_status(self.t("failedPlan"));
            }
        }
    }

    // ── Settings overlay ─────────────────────────────────────

    /// Step the highlighted preference to its next value and persist it.
    pub(crate) fn cycle_setting(&mut self, db: &Database) -> Result<()> {
        match self.settings_index {
            0 => {
                let theme = self.settings.theme.toggle();
                self.settings.set_theme(db, theme)?;
            }
            1 => {
                let language = self.settings.language.next();
                self.settings.set_language(db, language)?;
            }
            _ => {
                let currency = self.settings.currency.next();
                self.settings.set_currency(db, currency)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
