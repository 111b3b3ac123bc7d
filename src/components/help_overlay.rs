//! Help overlay component
//!
//! Displays context-sensitive help using a floating window.

use super::floating_window::{FloatingWindow, FloatingWindowConfig};
use super::keybindings::{HelpSection, KeybindingContext};
use crate::app::AppMode;
use crate::theme::Colors;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Help overlay component
pub struct HelpOverlay {
    window: FloatingWindow,
    content: Vec<Line<'static>>,
}

impl HelpOverlay {
    /// Create a new help overlay for the given mode
    pub fn new(mode: &AppMode, keybinding_ctx: &KeybindingContext) -> Self {
        let config = FloatingWindowConfig {
            title: "Help".to_string(),
            width_percent: 60,
            height_percent: 70,
            min_width: 50,
            min_height: 15,
        };

        let sections = keybinding_ctx.get_help_content(mode);
        let content = Self::build_content(&sections, mode);

        Self {
            window: FloatingWindow::new(config),
            content,
        }
    }

    /// Build the help content from sections
    fn build_content(sections: &[HelpSection], mode: &AppMode) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();

        lines.push(Line::from(vec![Span::styled(
            "  EC2 QuickLook Help  ",
            Style::default()
                .fg(Colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        )]));
        lines.push(Line::from(""));

        let mode_name = match mode {
            AppMode::Form => "Selection",
            AppMode::Comparison => "Comparison",
            AppMode::Detail => "Instance Detail",
        };
        lines.push(Line::from(vec![
            Span::styled("Current: ", Style::default().fg(Colors::FG_MUTED)),
            Span::styled(mode_name.to_string(), Style::default().fg(Colors::SECONDARY)),
        ]));
        lines.push(Line::from(""));

        for section in sections {
            lines.push(Line::from(vec![Span::styled(
                format!("  {}  ", section.title),
                Style::default()
                    .fg(Colors::SUCCESS)
                    .add_modifier(Modifier::BOLD),
            )]));
            lines.push(Line::from(""));

            for (key, description) in &section.items {
                lines.push(Line::from(vec![
                    Span::styled("    ", Style::default()),
                    Span::styled(
                        format!("{:<10}", key),
                        Style::default()
                            .fg(Colors::PRIMARY)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(description.clone(), Style::default().fg(Colors::FG_PRIMARY)),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines
    }

    /// Number of content lines
    pub fn line_count(&self) -> usize {
        self.content.len()
    }

    /// Render the help overlay
    pub fn render(&self, f: &mut Frame, parent: Rect) {
        self.window
            .render_lines(f, parent, &self.content, Some("Press ? or Esc to close"), 0);
    }
}
