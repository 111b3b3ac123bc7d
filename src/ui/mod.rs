//! User interface rendering module
//!
//! This module is organized into submodules for better maintainability:
//! - `header` - Title bar, status line, nav bar and help overlay
//! - `form` - Selection form with per-field feedback
//! - `product` - Instance and volume price cards, instance detail overlay
//! - `comparison` - Comparison table
//!
//! Rendering only reads [`AppState`]; nothing here changes the session.

mod comparison;
mod form;
mod header;
mod product;

use crate::app::{AppMode, AppState};
use crate::components::keybindings::KeybindingContext;
use crate::theme::UiConstants;
use header::HeaderRenderer;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

/// Main UI renderer
pub struct UiRenderer {
    /// Header renderer instance
    header: HeaderRenderer,
}

impl UiRenderer {
    /// Create a new UI renderer showing `endpoint` in the title bar
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            header: HeaderRenderer::new(endpoint),
        }
    }

    /// Render the complete UI with keybinding context
    pub fn render_with_context(
        &self,
        f: &mut Frame,
        state: &AppState,
        keybinding_ctx: &KeybindingContext,
    ) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(UiConstants::TITLE_HEIGHT),
                Constraint::Min(10), // Form and cards
                Constraint::Length(UiConstants::COMPARISON_HEIGHT),
                Constraint::Length(UiConstants::STATUS_BAR_HEIGHT),
                Constraint::Length(UiConstants::NAV_BAR_HEIGHT),
            ])
            .split(f.area());

        self.header.render_title(f, main_chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(UiConstants::FORM_WIDTH_PCT),
                Constraint::Percentage(100 - UiConstants::FORM_WIDTH_PCT),
            ])
            .split(main_chunks[1]);
        form::render_form(f, state, body[0]);
        product::render_products(f, state, body[1]);

        comparison::render_comparison(f, state, main_chunks[2]);
        header::render_status(f, state, main_chunks[3]);
        header::render_nav_bar(f, state, keybinding_ctx, main_chunks[4]);

        if state.mode == AppMode::Detail {
            product::render_detail_overlay(f, state);
        }
        if state.help_visible {
            header::render_help_overlay(f, state, keybinding_ctx);
        }
    }
}
