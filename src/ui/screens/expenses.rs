use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::models::Category;
use crate::ui::app::App;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let expenses = &app.dashboard.expenses;
    let title = format!(
        " {} ({}) | {} {} ",
        app.t("expenses"),
        expenses.len(),
        app.t("totalSpent"),
        app.money(app.dashboard.total_spent)
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .title(Span::styled(title, palette.title_style()));

    if expenses.is_empty() {
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
            app.t("date"),
            app.t("description"),
            app.t("category"),
            app.t("amount"),
        ]
        .map(|h| Cell::from(h).style(palette.header_style())),
    )
    .height(1);

    let rows: Vec<Row> = expenses
        .iter()
        .enumerate()
        .skip(app.expense_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, expense)| {
            let category = Category::find_by_id(&app.snapshot.categories, &expense.category_id)
                .map(|c| app.category_label(c))
                .unwrap_or_else(|| "—".to_string());

            let style = if i == app.expense_index {
                palette.selected_style()
            } else if i % 2 == 1 {
                palette.alt_row_style()
            } else {
                palette.normal_style()
            };

            Row::new(vec![
                Cell::from(expense.date.format("%Y-%m-%d").to_string()),
                Cell::from(truncate(&expense.description, 40)),
                Cell::from(category),
                Cell::from(app.money(expense.amount)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(20),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
