//! Product cards and the instance detail overlay

use crate::app::AppState;
use crate::components::floating_window::{FloatingWindow, FloatingWindowConfig};
use crate::logic::cascade::ProductCard;
use crate::logic::pricing::format_change;
use crate::report::{detail_rows, instance_summary, volume_summary, ProductSummary};
use crate::theme::{Styles, Theme, UiText};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the instance and volume cards stacked in `area`
pub fn render_products(f: &mut Frame, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let session = &state.session;
    let instance = session
        .instance
        .product
        .as_ref()
        .map(|p| instance_summary(p, session.price_change()));
    render_card(f, chunks[0], " Instance ", &session.instance, instance.as_ref());

    let volume = session.volume.product.as_ref().map(volume_summary);
    render_card(f, chunks[1], " EBS Volume ", &session.volume, volume.as_ref());
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    card: &ProductCard,
    summary: Option<&ProductSummary>,
) {
    let mut lines: Vec<Line<'static>> = Vec::new();

    if card.loading {
        lines.push(Line::from(Span::styled(UiText::LOADING, Styles::info())));
    } else if let Some(feedback) = &card.feedback {
        let style = if card.product.is_some() {
            Styles::warning()
        } else {
            Styles::error()
        };
        lines.push(Line::from(Span::styled(feedback.clone(), style)));
    }

    if let Some(summary) = summary.filter(|_| !card.loading) {
        summary_lines(summary, &mut lines);
    } else if !card.loading && card.feedback.is_none() {
        lines.push(Line::from(Span::styled(
            "Press Enter to look up prices.",
            Styles::text_muted(),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_inactive())
                .title(title.to_string()),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn summary_lines(summary: &ProductSummary, lines: &mut Vec<Line<'static>>) {
    let mut price = vec![
        Span::styled(summary.price.clone(), Styles::price()),
        Span::styled(format!(" / {}", summary.unit), Styles::text_secondary()),
    ];
    if let Some(change) = summary.change {
        price.push(Span::styled(
            format!("  {}", format_change(change)),
            Theme::change_style(change),
        ));
    }
    lines.push(Line::from(price));
    lines.push(Line::from(vec![
        Span::styled("Family: ", Styles::text_secondary()),
        Span::styled(summary.family.clone(), Styles::text()),
    ]));
    if !summary.effective_date.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Effective {}", summary.effective_date),
            Styles::text_muted(),
        )));
    }

    for section in &summary.sections {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(section.title, Styles::title())));
        for (key, value) in &section.rows {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key}: "), Styles::text_secondary()),
                Span::styled(value.clone(), Styles::text()),
            ]));
        }
    }

    if let Some(link) = &summary.link {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(link.clone(), Styles::info())));
    }
}

/// Render the instance detail overlay
pub fn render_detail_overlay(f: &mut Frame, state: &AppState) {
    let session = &state.session;
    let title = match session.instance_key() {
        Some(key) => format!("{} in {}", key.instance_type, key.region),
        None => "Instance Detail".to_string(),
    };

    let mut lines: Vec<Line<'static>> = Vec::new();
    if session.detail.loading {
        lines.push(Line::from(Span::styled(UiText::LOADING, Styles::info())));
    } else if let Some(feedback) = &session.detail.feedback {
        lines.push(Line::from(Span::styled(feedback.clone(), Styles::error())));
    } else if let Some(value) = &session.detail.value {
        for (key, text) in detail_rows(value) {
            lines.push(Line::from(vec![
                Span::styled(format!("{key}: "), Styles::text_secondary()),
                Span::styled(text, Styles::text()),
            ]));
        }
    }

    let window = FloatingWindow::new(FloatingWindowConfig {
        title,
        ..Default::default()
    });
    window.render_lines(f, f.area(), &lines, Some("Esc to close"), state.detail_scroll);
}
