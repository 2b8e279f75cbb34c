use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::models::CategoryWithDetails;
use crate::ui::app::{App, InputMode, PendingRequest, SUGGESTION_HEIGHT};
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(SUGGESTION_HEIGHT as u16),
        ])
        .split(area);

    render_goals(f, chunks[0], app);
    render_suggestion(f, chunks[1], app);
}

fn render_goals(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let editing = app.input_mode == InputMode::BudgetEdit;
    let title = if editing {
        format!(" {} ", app.t("editBudgets"))
    } else {
        format!(" {} - {} ", app.t("budgetGoals"), app.t("monthlyBudgetStatus"))
    };

    let items: Vec<ListItem> = app
        .dashboard
        .categories
        .iter()
        .enumerate()
        .skip(app.budget_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, detail)| goal_row(app, i, detail, editing))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border_style())
            .title(Span::styled(title, palette.title_style())),
    );
    f.render_widget(list, area);
}

fn goal_row<'a>(app: &App, i: usize, detail: &CategoryWithDetails, editing: bool) -> ListItem<'a> {
    let palette = app.palette();
    let percent = detail.progress();
    let color = if detail.is_over_budget() {
        palette.red
    } else {
        palette.progress_color(percent)
    };

    let name_style = if i == app.budget_index {
        palette.selected_style()
    } else {
        palette.normal_style()
    };
    let name = truncate(&app.category_label(&detail.category), 19);

    let amounts = if editing {
        let field = app
            .budget_edits
            .get(&detail.category.id)
            .cloned()
            .unwrap_or_default();
        let cursor = if i == app.budget_index { "▏" } else { " " };
        format!("{} / [{field:>8}{cursor}] ", app.money_whole(detail.spent))
    } else {
        format!(
            "{} / {} ",
            app.money_whole(detail.spent),
            app.money_whole(detail.budget)
        )
    };

    let mut spans = vec![
        Span::styled(format!("{name:<20}"), name_style),
        Span::styled(format!("{amounts:<26}"), Style::default().fg(color)),
        Span::styled(create_progress_bar(percent, 20), Style::default().fg(color)),
        Span::styled(
            format!(" {percent:.0}%"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ];
    let has_suggestion = app
        .suggestions
        .as_ref()
        .is_some_and(|s| s.contains_key(&detail.category.name));
    if has_suggestion && !editing {
        spans.push(Span::styled("  ✦", Style::default().fg(palette.yellow)));
    }
    ListItem::new(Line::from(spans))
}

/// The suggestion for the highlighted category, once suggestions are loaded.
fn render_suggestion(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .title(Span::styled(
            format!(" {} ", app.t("suggestion")),
            palette.title_style(),
        ));

    let text = if app.pending == Some(PendingRequest::Suggestions) {
        Line::from(Span::styled(
            format!("{}...", app.t("generating")),
            palette.dim_style(),
        ))
    } else {
        let suggestion = app.selected_detail().and_then(|detail| {
            app.suggestions
                .as_ref()
                .and_then(|s| s.get(&detail.category.name))
        });
        match suggestion {
            Some(s) => Line::from(Span::styled(s.clone(), palette.normal_style())),
            None => Line::from(Span::styled(
                format!("a: {}", app.t("getAISuggestions")),
                palette.dim_style(),
            )),
        }
    };

    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(paragraph, area);
}

fn create_progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent / 100.0) * width as f64) as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
