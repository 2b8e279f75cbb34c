use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode, Screen, SETTINGS_ROWS};
use super::commands;
use super::theme::Palette;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let palette = app.palette();
    f.render_widget(
        Block::default().style(Style::default().bg(palette.header_bg)),
        f.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    render_screen(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
    render_command_bar(f, chunks[3], app);

    if app.show_settings {
        render_settings_overlay(f, f.area(), app);
    }
    if app.show_help {
        render_help_overlay(f, f.area(), palette);
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let num = format!("{}", i + 1);
            let title = app.t(s.title_key());
            if *s == app.screen {
                Line::from(vec![
                    Span::styled(format!("{num}:"), palette.dim_style()),
                    Span::styled(
                        title.to_string(),
                        Style::default()
                            .fg(palette.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(format!("{num}:{title}"), palette.dim_style()))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(palette.overlay)))
        .style(Style::default().bg(palette.header_bg));

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Dashboard => super::screens::dashboard::render(f, area, app),
        Screen::Expenses => super::screens::expenses::render(f, area, app),
        Screen::Budgets => super::screens::budgets::render(f, area, app),
        Screen::Planner => super::screens::planner::render(f, area, app),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let mode_label = format!(" {} ", app.input_mode);
    let mode_bg = match app.input_mode {
        InputMode::Normal => palette.accent,
        InputMode::Command => palette.green,
        InputMode::BudgetEdit => palette.yellow,
        InputMode::PlanInput => palette.yellow,
    };
    let mode_style = Style::default()
        .fg(palette.header_bg)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let info = format!(
        " {} | {} | {} ",
        app.t("appName"),
        app.settings.currency,
        app.settings.language.label()
    );

    let right = match (app.screen, app.input_mode) {
        (_, InputMode::BudgetEdit) => " j/k row | Enter save | Esc cancel ",
        (_, InputMode::PlanInput) => " Enter generate | Esc cancel ",
        (Screen::Dashboard, _) => " s settings | : commands | ? help ",
        (Screen::Expenses, _) => " j/k scroll | :add | ? help ",
        (Screen::Budgets, _) => " e edit | a AI suggestions | ? help ",
        (Screen::Planner, _) => " Enter total budget | ? help ",
    };

    let available = area.width as usize;
    let used = mode_label.chars().count() + info.chars().count() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, palette.status_bar_style()),
        Span::styled(" ".repeat(pad), palette.status_bar_style()),
        Span::styled(right, palette.status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(palette.accent)),
                Span::styled(&app.command_input, palette.command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::PlanInput => {
            let prompt = format!("{}> ", app.t("totalMonthlyBudget"));
            let offset = (prompt.chars().count() + app.plan_input.chars().count()) as u16;
            (
                Line::from(vec![
                    Span::styled(prompt, Style::default().fg(palette.yellow)),
                    Span::styled(&app.plan_input, palette.command_bar_style()),
                ]),
                Some(offset),
            )
        }
        InputMode::BudgetEdit | InputMode::Normal => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, s for settings, ? for help",
                    palette.dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    palette.command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(palette.command_bg));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn render_settings_overlay(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let rows: [(&str, String); SETTINGS_ROWS] = [
        (
            app.t("darkMode"),
            if app.settings.theme == crate::settings::Theme::Dark {
                "[x]".to_string()
            } else {
                "[ ]".to_string()
            },
        ),
        (app.t("language"), app.settings.language.label().to_string()),
        (
            app.t("currency"),
            format!(
                "{} ({})",
                app.settings.currency.code(),
                app.settings.currency.symbol()
            ),
        ),
    ];

    let mut text = vec![
        Line::from(Span::styled(
            format!(" {} ", app.t("settings")),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" {}", app.t("customizeYourExperience")),
            palette.dim_style(),
        )),
        Line::from(""),
    ];
    for (i, (label, value)) in rows.iter().enumerate() {
        let style = if i == app.settings_index {
            palette.selected_style()
        } else {
            palette.normal_style()
        };
        text.push(Line::from(Span::styled(
            format!("  {label:<20} {value:<12}"),
            style,
        )));
    }
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        " j/k select | Enter change | Esc close ",
        palette.dim_style(),
    )));

    let popup_height = (text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 44.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let popup = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .style(Style::default().bg(palette.header_bg)),
    );
    f.render_widget(popup, popup_area);
}

fn render_help_overlay(f: &mut Frame, area: Rect, palette: &Palette) {
    let mut help_text = vec![
        Line::from(Span::styled(
            " SpendWise Help ",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", palette.heading_style())),
        Line::from(Span::styled(
            "  j/k or Up/Down   Move cursor           1-4        Switch tabs",
            palette.normal_style(),
        )),
        Line::from(Span::styled(
            "  Tab/Shift-Tab    Cycle tabs            g/G        Top/Bottom",
            palette.normal_style(),
        )),
        Line::from(Span::styled(
            "  s                Settings              Ctrl-q     Quit",
            palette.normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Actions", palette.heading_style())),
        Line::from(Span::styled(
            "  :               Command mode           Esc        Cancel/Back",
            palette.normal_style(),
        )),
        Line::from(Span::styled(
            "  e (Budgets)     Edit budgets           a (Budgets) AI suggestions",
            palette.normal_style(),
        )),
        Line::from(Span::styled(
            "  Enter (Planner) Enter total budget",
            palette.normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Commands", palette.heading_style())),
    ];

    // Build command list dynamically from COMMANDS registry
    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        if name.len() <= 1 {
            continue;
        }
        if seen.insert(cmd.description) {
            cmd_lines.push((name, cmd.description));
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<14} {desc}"),
            palette.normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        palette.dim_style(),
    )));

    // Center the popup, clamped to terminal height
    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 72.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .style(Style::default().bg(palette.header_bg)),
    );
    f.render_widget(help, popup_area);
}
