//! Floating window component
//!
//! A bordered, centered window drawn over the main screen. Used by the help
//! overlay and the instance detail view.

use crate::theme::{Styles, UiConstants};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Size and title of a floating window
#[derive(Debug, Clone)]
pub struct FloatingWindowConfig {
    pub title: String,
    pub width_percent: u16,
    pub height_percent: u16,
    pub min_width: u16,
    pub min_height: u16,
}

impl Default for FloatingWindowConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            width_percent: UiConstants::OVERLAY_WIDTH_PCT,
            height_percent: UiConstants::OVERLAY_HEIGHT_PCT,
            min_width: 40,
            min_height: 10,
        }
    }
}

/// Centered overlay window
pub struct FloatingWindow {
    config: FloatingWindowConfig,
}

impl FloatingWindow {
    pub fn new(config: FloatingWindowConfig) -> Self {
        Self { config }
    }

    /// Area the window occupies inside `parent`
    pub fn area(&self, parent: Rect) -> Rect {
        let width = percent_of(parent.width, self.config.width_percent)
            .max(self.config.min_width)
            .min(parent.width);
        let height = percent_of(parent.height, self.config.height_percent)
            .max(self.config.min_height)
            .min(parent.height);
        Rect {
            x: parent.x + (parent.width - width) / 2,
            y: parent.y + (parent.height - height) / 2,
            width,
            height,
        }
    }

    /// Render `lines` scrolled by `scroll`, with an optional footer hint
    pub fn render_lines(
        &self,
        f: &mut Frame,
        parent: Rect,
        lines: &[Line<'static>],
        footer: Option<&str>,
        scroll: u16,
    ) {
        let area = self.area(parent);
        f.render_widget(Clear, area);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_active())
            .title(Span::styled(format!(" {} ", self.config.title), Styles::title()))
            .style(Styles::overlay());
        if let Some(footer) = footer {
            block = block.title_bottom(
                Line::from(Span::styled(format!(" {footer} "), Styles::nav_hint()))
                    .alignment(Alignment::Center),
            );
        }

        let paragraph = Paragraph::new(lines.to_vec())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));
        f.render_widget(paragraph, area);
    }
}

fn percent_of(value: u16, percent: u16) -> u16 {
    (u32::from(value) * u32::from(percent) / 100) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_is_centered_and_bounded() {
        let window = FloatingWindow::new(FloatingWindowConfig {
            width_percent: 50,
            height_percent: 50,
            ..Default::default()
        });
        let area = window.area(Rect::new(0, 0, 100, 40));
        assert_eq!(area, Rect::new(25, 10, 50, 20));

        let tiny = window.area(Rect::new(0, 0, 30, 8));
        assert_eq!(tiny, Rect::new(0, 0, 30, 8));
    }
}
