use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::info;

use crate::advisor::BudgetAdvisor;
use crate::config::Config;
use crate::db::Database;
use crate::settings::Settings;
use crate::ui::app::{App, InputMode, Screen, SETTINGS_ROWS};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(db: &mut Database, config: &Config) -> Result<()> {
    let settings = Settings::load(db)?;
    let advisor = config
        .advisor()
        .map(|a| Box::new(a) as Box<dyn BudgetAdvisor>);
    let mut app = App::new(settings, advisor);
    app.refresh(db).context("Failed to load budget data")?;
    info!(db = %config.db_path.display(), "starting terminal UI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, db);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &mut Database,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // Tab, status and command bars take one row each
            app.visible_rows = f.area().height.saturating_sub(3) as usize;
            crate::ui::render::render(f, app);
        })?;

        // The "Generating" notice has been drawn; now block on the advisor.
        if app.pending.is_some() {
            app.run_pending();
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            if app.show_settings {
                handle_settings_input(key, app, db)?;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, db)?,
                InputMode::Command => handle_command_input(key, app, db)?,
                InputMode::BudgetEdit => handle_budget_edit_input(key, app, db)?,
                InputMode::PlanInput => handle_plan_input(key, app),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('s') => {
            app.settings_index = 0;
            app.show_settings = true;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('1') => switch_screen(app, db, Screen::Dashboard)?,
        KeyCode::Char('2') => switch_screen(app, db, Screen::Expenses)?,
        KeyCode::Char('3') => switch_screen(app, db, Screen::Budgets)?,
        KeyCode::Char('4') => switch_screen(app, db, Screen::Planner)?,
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, db, screens[next])?;
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 {
                screens.len() - 1
            } else {
                idx - 1
            };
            switch_screen(app, db, screens[prev])?;
        }
        KeyCode::Char('e') if app.screen == Screen::Budgets => app.begin_budget_edit(),
        KeyCode::Char('a') if app.screen == Screen::Budgets => app.queue_suggestions(),
        KeyCode::Enter | KeyCode::Char('i') if app.screen == Screen::Planner => {
            app.plan_input.clear();
            app.input_mode = InputMode::PlanInput;
        }
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, db)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_budget_edit_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => app.save_budget_edits(db)?,
        KeyCode::Esc => app.cancel_budget_edit(),
        KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => handle_move_down(app),
        KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => handle_move_up(app),
        KeyCode::Backspace => {
            if let Some(buffer) = app.edit_buffer_mut() {
                buffer.pop();
            }
        }
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => {
            if let Some(buffer) = app.edit_buffer_mut() {
                buffer.push(c);
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_plan_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            let input = app.plan_input.clone();
            app.queue_plan(&input);
        }
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Backspace => {
            app.plan_input.pop();
        }
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => app.plan_input.push(c),
        _ => {}
    }
}

fn handle_settings_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('s') | KeyCode::Char('q') => app.show_settings = false,
        KeyCode::Char('j') | KeyCode::Down => {
            app.settings_index = (app.settings_index + 1) % SETTINGS_ROWS;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.settings_index = (app.settings_index + SETTINGS_ROWS - 1) % SETTINGS_ROWS;
        }
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('l') | KeyCode::Char('h') => {
            app.cycle_setting(db)?;
        }
        _ => {}
    }
    Ok(())
}

fn switch_screen(app: &mut App, db: &mut Database, screen: Screen) -> Result<()> {
    app.screen = screen;
    app.refresh(db)?;
    app.status_message.clear();
    Ok(())
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Expenses => {
            let page = app.expense_page();
            scroll_down(
                &mut app.expense_index,
                &mut app.expense_scroll,
                app.dashboard.expenses.len(),
                page,
            );
        }
        Screen::Budgets => {
            let page = app.budget_page();
            scroll_down(
                &mut app.budget_index,
                &mut app.budget_scroll,
                app.dashboard.categories.len(),
                page,
            );
        }
        _ => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Expenses => scroll_up(&mut app.expense_index, &mut app.expense_scroll),
        Screen::Budgets => scroll_up(&mut app.budget_index, &mut app.budget_scroll),
        _ => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Expenses => scroll_to_top(&mut app.expense_index, &mut app.expense_scroll),
        Screen::Budgets => scroll_to_top(&mut app.budget_index, &mut app.budget_scroll),
        _ => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.screen {
        Screen::Expenses => {
            let page = app.expense_page();
            scroll_to_bottom(
                &mut app.expense_index,
                &mut app.expense_scroll,
                app.dashboard.expenses.len(),
                page,
            );
        }
        Screen::Budgets => {
            let page = app.budget_page();
            scroll_to_bottom(
                &mut app.budget_index,
                &mut app.budget_scroll,
                app.dashboard.categories.len(),
                page,
            );
        }
        _ => {}
    }
}
