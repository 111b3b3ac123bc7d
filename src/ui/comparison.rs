//! Comparison table rendering

use crate::app::{AppMode, AppState};
use crate::logic::comparison::RowState;
use crate::theme::{Styles, UiText};
use ratatui::{
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

const HEADERS: [&str; 6] = ["Region", "Instance Type", "Price", "Processor", "Memory", "Network"];

/// Render the comparison table
pub fn render_comparison(f: &mut Frame, state: &AppState, area: Rect) {
    let comparison = &state.session.comparison;
    let active = state.mode == AppMode::Comparison;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if active {
            Styles::border_active()
        } else {
            Styles::border_inactive()
        })
        .title(format!(
            " Comparison ({}/{}) ",
            comparison.len(),
            comparison.capacity()
        ));

    if comparison.is_empty() {
        let hint = Paragraph::new(Span::styled(UiText::EMPTY_COMPARISON, Styles::text_muted()))
            .block(block);
        f.render_widget(hint, area);
        return;
    }

    let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h))).style(Styles::title());
    let rows = comparison.items().iter().map(|item| {
        let style = match item.row_state() {
            RowState::Highlighted => Styles::warning(),
            RowState::Normal => Styles::text(),
        };
        Row::new(vec![
            Cell::from(item.key.region.clone()),
            Cell::from(item.key.instance_type.clone()),
            Cell::from(Span::styled(item.price.clone(), Styles::price())),
            Cell::from(item.processor.clone()),
            Cell::from(item.memory.clone()),
            Cell::from(item.network.clone()),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(14),
        Constraint::Min(20),
        Constraint::Length(10),
        Constraint::Length(20),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Styles::selected())
        .highlight_symbol("> ");

    let mut table_state = TableState::default();
    if active {
        table_state.select(Some(state.comparison_selection));
    }
    f.render_stateful_widget(table, area, &mut table_state);
}
