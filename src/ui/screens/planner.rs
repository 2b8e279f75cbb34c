use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::{App, InputMode, PendingRequest};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(5)])
        .split(area);

    render_form(f, chunks[0], app);
    render_plan(f, chunks[1], app);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let editing = app.input_mode == InputMode::PlanInput;
    let input_style = if editing {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        palette.normal_style()
    };
    let input = if app.plan_input.is_empty() && !editing {
        "—".to_string()
    } else {
        format!("{}{}", app.settings.currency.symbol(), app.plan_input)
    };

    let text = vec![
        Line::from(Span::styled(
            app.t("enterTotalBudgetSuggestion"),
            palette.dim_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{}: ", app.t("totalMonthlyBudget")), palette.normal_style()),
            Span::styled(input, input_style),
        ]),
        Line::from(Span::styled(
            format!("Enter: {}", app.t("generatePlan")),
            palette.dim_style(),
        )),
    ];

    let form = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border_style())
            .title(Span::styled(
                format!(" {} ", app.t("aiBudgetPlanner")),
                palette.title_style(),
            )),
    );
    f.render_widget(form, area);
}

fn render_plan(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .title(Span::styled(
            format!(" {} ", app.t("suggestedBudgetPlan")),
            palette.title_style(),
        ));

    let plan = match &app.plan {
        Some(plan) if !matches!(app.pending, Some(PendingRequest::Plan(_))) => plan,
        _ => {
            let msg = if matches!(app.pending, Some(PendingRequest::Plan(_))) {
                format!("{}...", app.t("generatingPlan"))
            } else {
                String::new()
            };
            f.render_widget(
                Paragraph::new(Line::from(Span::styled(msg, palette.dim_style())))
                    .centered()
                    .block(block),
                area,
            );
            return;
        }
    };

    let header = Row::new(
        [app.t("category"), app.t("suggestedBudget")]
            .map(|h| Cell::from(h).style(palette.header_style())),
    );

    let mut rows: Vec<Row> = plan
        .plan
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i % 2 == 1 {
                palette.alt_row_style()
            } else {
                palette.normal_style()
            };
            Row::new(vec![
                Cell::from(item.category_name.clone()),
                Cell::from(app.money(item.amount)),
            ])
            .style(style)
        })
        .collect();

    let allocated = plan.total();
    let total_style = match app.plan_total {
        Some(requested) if requested != allocated => Style::default()
            .fg(palette.yellow)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
    };
    rows.push(
        Row::new(vec![
            Cell::from(app.t("totalBudget")),
            Cell::from(app.money(allocated)),
        ])
        .style(total_style),
    );

    let widths = [Constraint::Min(20), Constraint::Length(18)];
    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
