//! Header and common widget rendering
//!
//! Title bar, status line, navigation bar and the help overlay.

use crate::app::AppState;
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use crate::theme::{Colors, Styles};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Header renderer for the title bar
pub struct HeaderRenderer {
    /// Backend shown next to the title
    endpoint: String,
}

impl HeaderRenderer {
    /// Create a new header renderer
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Render the title bar
    pub fn render_title(&self, f: &mut Frame, area: Rect) {
        let title = Line::from(vec![
            Span::styled("EC2 QuickLook", Styles::title()),
            Span::styled("  ", Style::default()),
            Span::styled(self.endpoint.clone(), Styles::text_muted()),
        ]);
        let title_widget = Paragraph::new(title)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Styles::border_inactive()),
            )
            .alignment(Alignment::Center);
        f.render_widget(title_widget, area);
    }
}

/// Render the one-line status message
pub fn render_status(f: &mut Frame, state: &AppState, area: Rect) {
    let session = &state.session;
    let (text, style) = match &session.status {
        Some(status) => (status.clone(), Styles::text_secondary()),
        None if session.catalog_loading => ("Loading catalog...".to_string(), Styles::info()),
        None => (
            format!(
                "Comparing {}/{}",
                session.comparison.len(),
                session.comparison.capacity()
            ),
            Styles::text_muted(),
        ),
    };
    f.render_widget(Paragraph::new(Span::styled(text, style)), area);
}

/// Render the navigation bar
pub fn render_nav_bar(
    f: &mut Frame,
    state: &AppState,
    keybinding_ctx: &KeybindingContext,
    area: Rect,
) {
    let mut spans: Vec<Span> = Vec::new();
    for (i, item) in keybinding_ctx.get_nav_items(&state.mode).iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default()));
        }
        spans.push(Span::styled(
            format!(" {} ", item.key_display),
            Style::default().fg(Colors::SELECTED_FG).bg(Colors::PRIMARY),
        ));
        spans.push(Span::styled(format!(" {}", item.action_label), Styles::nav_hint()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the help overlay
pub fn render_help_overlay(f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
    let help_overlay = HelpOverlay::new(&state.mode, keybinding_ctx);
    help_overlay.render(f, f.area());
}
