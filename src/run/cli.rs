use anyhow::{bail, Context, Result};
use chrono::Utc;

use crate::advisor::{self, BudgetAdvisor};
use crate::aggregate::{self, Dashboard, RECENT_EXPENSES};
use crate::config::{Config, ADVISOR_ENV};
use crate::db::Database;
use crate::models::Category;
use crate::settings::{Settings, SETTING_KEYS};
use crate::ui::commands::expense_form_from_args;
use crate::ui::util::{format_currency, money, truncate};
use crate::validate;

pub(crate) fn as_cli(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    let mut settings = Settings::load(db)?;
    match args[1].as_str() {
        "summary" | "s" => cli_summary(db, &settings),
        "add" => cli_add(&args[2..], db, &settings),
        "budget" => cli_budget(&args[2..], db, &settings),
        "categories" => cli_categories(db, &settings),
        "expenses" => cli_expenses(db, &settings),
        "suggest" => cli_suggest(db, config, &settings),
        "plan" => cli_plan(&args[2..], db, config, &settings),
        "settings" => cli_settings(&args[2..], db, &mut settings),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("spendwise {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("SpendWise - local-first personal budgeting");
    println!();
    println!("Usage: spendwise [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                 Launch interactive TUI");
    println!("  summary                                Print totals and budget status");
    println!("  add [date] <category> <amount> <desc>  Record an expense (date: YYYY-MM-DD)");
    println!("  budget <category> <amount>             Set a category budget");
    println!("  categories                             List categories and budgets");
    println!("  expenses                               List expenses, newest first");
    println!("  suggest                                Get AI budget suggestions");
    println!("  plan <total>                           Generate an AI budget plan");
    println!("  settings [key value]                   Show or change theme/language/currency");
    println!("  --help, -h                             Show this help");
    println!("  --version, -V                          Show version");
    println!();
    println!("Environment:");
    println!("  SPENDWISE_DB        Database file (default: platform data directory)");
    println!("  SPENDWISE_ADVISOR   Command that answers AI advisor requests");
    println!("  SPENDWISE_ADVISOR_TIMEOUT  Seconds before a silent advisor is killed (default 60)");
    println!("  RUST_LOG            Log filter (default: spendwise=info)");
}

fn cli_summary(db: &Database, settings: &Settings) -> Result<()> {
    let snapshot = db.snapshot()?;
    let dash = Dashboard::from_snapshot(&snapshot);
    let cur = settings.currency;

    println!("SpendWise - {}", Utc::now().format("%Y-%m"));
    println!("{}", "─".repeat(48));
    println!("  {:<22} {}", settings.t("totalSpent"), money(dash.total_spent, cur));
    println!("  {:<22} {}", settings.t("totalBudget"), money(dash.total_budget, cur));
    println!("  {:<22} {}", settings.t("remainingBudget"), money(dash.remaining, cur));
    if dash.is_over_budget() {
        println!("  ! {}", settings.t("youAreOverBudget"));
    }

    println!();
    println!("{}:", settings.t("budgetGoals"));
    for detail in &dash.categories {
        println!(
            "  {:<20} {:>10} / {:<10} {:>4.0}%{}",
            truncate(&settings.category_name(&detail.category.name), 20),
            format_currency(detail.spent, cur, 0),
            format_currency(detail.budget, cur, 0),
            detail.progress(),
            if detail.is_over_budget() { "  over" } else { "" }
        );
    }

    if !aggregate::has_spending(&dash.spending) {
        println!();
        println!("{}", settings.t("noSpendingData"));
        return Ok(());
    }

    println!();
    println!("{}:", settings.t("recentExpenses"));
    for expense in aggregate::recent_expenses(&snapshot.expenses, RECENT_EXPENSES) {
        let category = Category::find_by_id(&snapshot.categories, &expense.category_id)
            .map(|c| settings.category_name(&c.name))
            .unwrap_or_default();
        println!(
            "  {}  {:<28} {:<16} {:>12}",
            expense.date.format("%Y-%m-%d"),
            truncate(&expense.description, 28),
            category,
            money(expense.amount, cur)
        );
    }

    Ok(())
}

fn cli_add(args: &[String], db: &Database, settings: &Settings) -> Result<()> {
    let Some(form) = expense_form_from_args(&args.join(" ")) else {
        bail!("Usage: spendwise add [YYYY-MM-DD] <category> <amount> <description>");
    };
    let categories = db.get_categories()?;
    let expense = form.validate(&categories, Utc::now())?;
    db.insert_expense(&expense)?;
    println!(
        "{} {} ({})",
        settings.t("expenseAdded"),
        money(expense.amount, settings.currency),
        expense.description
    );
    Ok(())
}

fn cli_budget(args: &[String], db: &Database, settings: &Settings) -> Result<()> {
    let Some((amount, name)) = args.split_last().filter(|(_, name)| !name.is_empty()) else {
        bail!("Usage: spendwise budget <category> <amount>");
    };
    let name = name.join(" ");
    let categories = db.get_categories()?;
    let category = Category::resolve(&categories, &name)
        .ok_or_else(|| validate::ValidationError::UnknownCategory(name.clone()))?;
    let amount = validate::parse_budget_amount(amount, &category.name)?;
    db.upsert_budget(&category.id, amount)?;
    println!(
        "Budget set: {} = {}",
        category.name,
        money(amount, settings.currency)
    );
    Ok(())
}

fn cli_categories(db: &Database, settings: &Settings) -> Result<()> {
    let snapshot = db.snapshot()?;
    println!(
        "{:<36} {:<18} {:<14} {}",
        "ID",
        settings.t("category"),
        "Icon",
        settings.t("totalBudget")
    );
    println!("{}", "─".repeat(82));
    for category in &snapshot.categories {
        let budget = snapshot
            .budget_for(&category.id)
            .map(|b| money(b.amount, settings.currency))
            .unwrap_or_else(|| "—".to_string());
        println!(
            "{:<36} {:<18} {:<14} {}",
            category.id,
            settings.category_name(&category.name),
            category.icon,
            budget
        );
    }
    Ok(())
}

fn cli_expenses(db: &Database, settings: &Settings) -> Result<()> {
    let snapshot = db.snapshot()?;
    if snapshot.expenses.is_empty() {
        println!("No expenses");
        return Ok(());
    }
    for expense in aggregate::sorted_expenses_by_date_desc(&snapshot.expenses) {
        let category = Category::find_by_id(&snapshot.categories, &expense.category_id)
            .map(|c| settings.category_name(&c.name))
            .unwrap_or_default();
        println!(
            "{}  {:<40} {:<16} {:>12}",
            expense.date.format("%Y-%m-%d"),
            truncate(&expense.description, 40),
            category,
            money(expense.amount, settings.currency)
        );
    }
    println!(
        "{}: {}",
        settings.t("totalSpent"),
        money(aggregate::total_spent(&snapshot.expenses), settings.currency)
    );
    Ok(())
}

fn require_advisor(config: &Config) -> Result<Box<dyn BudgetAdvisor>> {
    match config.advisor() {
        Some(advisor) => Ok(Box::new(advisor)),
        None => bail!("No AI advisor configured. Set {ADVISOR_ENV} to a command."),
    }
}

fn cli_suggest(db: &Database, config: &Config, settings: &Settings) -> Result<()> {
    let client = require_advisor(config)?;
    let snapshot = db.snapshot()?;
    let details = aggregate::categories_with_details(
        &snapshot.categories,
        &snapshot.expenses,
        &snapshot.budgets,
    );
    let suggestions = advisor::suggestions_for(client.as_ref(), &details)
        .context(settings.t("failedSuggestions").to_string())?;

    for detail in &details {
        if let Some(text) = suggestions.get(&detail.category.name) {
            println!("{}:", settings.category_name(&detail.category.name));
            println!("  {text}");
        }
    }
    Ok(())
}

fn cli_plan(args: &[String], db: &Database, config: &Config, settings: &Settings) -> Result<()> {
    let Some(total) = args.first() else {
        bail!("Usage: spendwise plan <total>");
    };
    let total = validate::parse_total_budget(total)?;
    let client = require_advisor(config)?;
    let categories = db.get_categories()?;
    let plan = advisor::plan_for(client.as_ref(), total, &categories, settings)
        .context(settings.t("failedPlan").to_string())?;

    println!("{}", settings.t("suggestedBudgetPlan"));
    println!("{}", "─".repeat(40));
    for item in &plan.plan {
        println!(
            "  {:<24} {:>12}",
            truncate(&item.category_name, 24),
            money(item.amount, settings.currency)
        );
    }
    println!("{}", "─".repeat(40));
    println!(
        "  {:<24} {:>12}",
        settings.t("totalBudget"),
        money(plan.total(), settings.currency)
    );
    Ok(())
}

fn cli_settings(args: &[String], db: &Database, settings: &mut Settings) -> Result<()> {
    match args {
        [] => {
            println!("theme     {}", settings.theme);
            println!("language  {}", settings.language);
            println!("currency  {}", settings.currency);
            Ok(())
        }
        [key, value] => {
            settings.apply(db, key, value)?;
            println!("{key} = {value}");
            Ok(())
        }
        _ => bail!(
            "Usage: spendwise settings [key value]. Keys: {}",
            SETTING_KEYS.join(", ")
        ),
    }
}
