use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, InputMode, Screen};
use crate::db::Database;
use crate::models::Icon;
use crate::settings::{Currency, Language, Theme};
use crate::validate::{self, ExpenseForm};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit SpendWise", cmd_quit, r);
    register_command!("quit", "Quit SpendWise", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("b", "Go to Budget Goals", cmd_budgets, r);
    register_command!("budgets", "Go to Budget Goals", cmd_budgets, r);
    register_command!("p", "Go to AI Budget Planner", cmd_planner, r);
    register_command!("planner", "Go to AI Budget Planner", cmd_planner, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add expense (e.g. :add 2024-01-15 Food 12.50 Lunch)",
        cmd_add,
        r
    );
    register_command!(
        "a",
        "Add expense (e.g. :a Food 12.50 Lunch)",
        cmd_add,
        r
    );
    register_command!(
        "budget",
        "Set budget (e.g. :budget Food 500)",
        cmd_budget,
        r
    );
    register_command!(
        "edit-budget",
        "Edit all budget amounts",
        cmd_edit_budget,
        r
    );
    register_command!(
        "category",
        "Create category (e.g. :category Pets [icon])",
        cmd_category,
        r
    );
    register_command!("suggest", "Get AI budget suggestions", cmd_suggest, r);
    register_command!(
        "plan",
        "Generate AI budget plan (e.g. :plan 2000)",
        cmd_plan,
        r
    );
    register_command!("theme", "Set theme (light/dark)", cmd_theme, r);
    register_command!("lang", "Set language (en/hi)", cmd_lang, r);
    register_command!("currency", "Set currency (USD/INR)", cmd_currency, r);
    register_command!("settings", "Open settings", cmd_settings, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Parse `[date] <category> <amount> <description...>`.
/// The date is optional and recognized when the first word parses as one.
pub(crate) fn expense_form_from_args(args: &str) -> Option<ExpenseForm> {
    let mut words: Vec<&str> = args.split_whitespace().collect();
    let date = match words.first() {
        Some(first) if validate::parse_date(first).is_ok() => Some(words.remove(0).to_string()),
        _ => None,
    };
    if words.len() < 3 {
        return None;
    }
    Some(ExpenseForm {
        category: words[0].to_string(),
        amount: words[1].to_string(),
        description: words[2..].join(" "),
        date,
    })
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    Ok(())
}

fn cmd_budgets(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Budgets;
    Ok(())
}

fn cmd_planner(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Planner;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_settings(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.settings_index = 0;
    app.show_settings = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let Some(form) = expense_form_from_args(args) else {
        app.set_status("Usage: :add [YYYY-MM-DD] <category> <amount> <description>");
        return Ok(());
    };
    app.add_expense(db, &form)
}

fn cmd_budget(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    // Last token is the amount, everything before is the category name
    let parts: Vec<&str> = args.rsplitn(2, ' ').collect();
    if parts.len() < 2 {
        app.set_status("Usage: :budget <category_name> <amount>");
        return Ok(());
    }
    app.set_budget(db, parts[1].trim(), parts[0])?;
    app.screen = Screen::Budgets;
    Ok(())
}

fn cmd_edit_budget(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.begin_budget_edit();
    Ok(())
}

fn cmd_category(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        let icons: Vec<&str> = Icon::all().iter().map(|i| i.as_str()).collect();
        app.set_status(format!(
            "Usage: :category <name> [icon]. Icons: {}",
            icons.join(", ")
        ));
        return Ok(());
    }
    let (name, icon) = match args.rsplit_once(' ') {
        Some((name, last)) => match Icon::parse(last) {
            Some(icon) => (name.trim(), Some(icon)),
            None => (args, None),
        },
        None => (args, None),
    };
    app.add_category(db, name, icon)
}

fn cmd_suggest(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.queue_suggestions();
    Ok(())
}

fn cmd_plan(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.screen = Screen::Planner;
        app.plan_input.clear();
        app.input_mode = InputMode::PlanInput;
        return Ok(());
    }
    app.plan_input = args.to_string();
    app.queue_plan(args);
    Ok(())
}

fn cmd_theme(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let theme = if args.is_empty() {
        app.settings.theme.toggle()
    } else {
        match Theme::parse(args) {
            Some(theme) => theme,
            None => {
                app.set_status(format!("Unknown theme '{args}'. Use light or dark."));
                return Ok(());
            }
        }
    };
    app.settings.set_theme(db, theme)?;
    app.set_status(format!("Theme: {theme}"));
    Ok(())
}

fn cmd_lang(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let language = if args.is_empty() {
        app.settings.language.next()
    } else {
        match Language::parse(args) {
            Some(language) => language,
            None => {
                app.set_status(format!("Unknown language '{args}'. Use en or hi."));
                return Ok(());
            }
        }
    };
    app.settings.set_language(db, language)?;
    app.set_status(format!("{}: {}", app.t("language"), language.label()));
    Ok(())
}

fn cmd_currency(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let currency = if args.is_empty() {
        app.settings.currency.next()
    } else {
        match Currency::parse(args) {
            Some(currency) => currency,
            None => {
                app.set_status(format!("Unknown currency '{args}'. Use USD or INR."));
                return Ok(());
            }
        }
    };
    app.settings.set_currency(db, currency)?;
    app.set_status(format!("{}: {currency}", app.t("currency")));
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
