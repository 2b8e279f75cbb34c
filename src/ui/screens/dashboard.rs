use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::aggregate;
use crate::models::Category;
use crate::ui::app::App;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Summary cards
            Constraint::Min(10),   // Chart and recent expenses
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);

    let lower = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    render_spending_chart(f, lower[0], app);
    render_recent_expenses(f, lower[1], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let dash = &app.dashboard;
    render_card(
        f,
        app,
        cards[0],
        app.t("totalSpent"),
        dash.total_spent,
        palette.red,
        app.t("inTheCurrentMonth"),
    );
    render_card(
        f,
        app,
        cards[1],
        app.t("totalBudget"),
        dash.total_budget,
        palette.accent,
        app.t("forThisMonth"),
    );
    let (color, subtitle) = if dash.is_over_budget() {
        (palette.red, app.t("youAreOverBudget"))
    } else {
        (palette.green, app.t("remainingForThisMonth"))
    };
    render_card(
        f,
        app,
        cards[2],
        app.t("remainingBudget"),
        dash.remaining,
        color,
        subtitle,
    );
}

fn render_card(
    f: &mut Frame,
    app: &App,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: Color,
    subtitle: &str,
) {
    let palette = app.palette();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .title(Span::styled(format!(" {title} "), palette.title_style()));

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            app.money(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(subtitle.to_string(), palette.dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_spending_chart(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .title(Span::styled(
            format!(" {} ", app.t("spendingByCategory")),
            palette.title_style(),
        ));

    if !aggregate::has_spending(&app.dashboard.spending) {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(app.t("noSpendingData"), palette.dim_style())),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = app
        .dashboard
        .spending
        .iter()
        .map(|s| {
            let val = s.spent.round().to_u64().unwrap_or(0);
            let label = truncate(&app.settings.category_name(&s.name), 10);
            Bar::default()
                .value(val)
                .text_value(app.money_whole(s.spent))
                .label(Line::from(label))
                .style(Style::default().fg(palette.accent))
                .value_style(
                    Style::default()
                        .fg(palette.header_bg)
                        .bg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .bar_style(Style::default().fg(palette.accent))
        .value_style(Style::default().fg(palette.text));

    f.render_widget(chart, area);
}

fn render_recent_expenses(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .title(Span::styled(
            format!(" {} ", app.t("recentExpenses")),
            palette.title_style(),
        ))
        .title_bottom(Span::styled(
            format!(" {} ", app.t("last5Transactions")),
            palette.dim_style(),
        ));

    let recent = app.dashboard.recent();
    if recent.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(app.t("noExpenses"), palette.dim_style())),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let header = Row::new(
        [
            app.t("description"),
            app.t("category"),
            app.t("amount"),
            app.t("date"),
        ]
        .map(|h| Cell::from(h).style(palette.header_style())),
    );

    let rows: Vec<Row> = recent
        .iter()
        .enumerate()
        .map(|(i, expense)| {
            let category = Category::find_by_id(&app.snapshot.categories, &expense.category_id)
                .map(|c| app.category_label(c))
                .unwrap_or_default();
            let style = if i % 2 == 1 {
                palette.alt_row_style()
            } else {
                palette.normal_style()
            };
            Row::new(vec![
                Cell::from(truncate(&expense.description, 24)),
                Cell::from(category),
                Cell::from(Span::styled(app.money(expense.amount), palette.expense_style())),
                Cell::from(expense.date.format("%b %d").to_string()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(12),
        Constraint::Length(18),
        Constraint::Length(12),
        Constraint::Length(7),
    ];
    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
