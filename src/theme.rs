//! Centralized theme and styling for the TUI
//!
//! This module provides a single source of truth for all colors, styles,
//! and visual constants used throughout the application.
//!
//! # Usage
//! ```rust
//! use quicklook::theme::{Colors, Styles, Theme};
//! use quicklook::types::Validity;
//! use ratatui::style::Style;
//!
//! // Use color constants
//! let style = Style::default().fg(Colors::PRIMARY);
//!
//! // Use pre-built styles
//! let title_style = Styles::title();
//!
//! // Use semantic styles
//! let error_style = Theme::validity_style(Validity::Error);
//! ```

use crate::types::Validity;
use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette for the application
pub struct Colors;

impl Colors {
    // -------------------------------------------------------------------------
    // Base Colors
    // -------------------------------------------------------------------------

    /// Primary dark background for overlays
    pub const BG_PRIMARY: Color = Color::Rgb(20, 20, 30);

    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::White;

    /// Secondary/muted text color
    pub const FG_SECONDARY: Color = Color::Gray;

    /// Disabled/inactive text color
    pub const FG_MUTED: Color = Color::DarkGray;

    // -------------------------------------------------------------------------
    // Accent Colors
    // -------------------------------------------------------------------------

    /// Primary accent color - used for borders, titles, highlights
    pub const PRIMARY: Color = Color::Cyan;

    /// Secondary accent color - used for selected items, emphasis
    pub const SECONDARY: Color = Color::Yellow;

    // -------------------------------------------------------------------------
    // Semantic Colors
    // -------------------------------------------------------------------------

    /// Success/positive feedback, price decreases
    pub const SUCCESS: Color = Color::Green;

    /// Warning/caution feedback, duplicate highlight
    pub const WARNING: Color = Color::Yellow;

    /// Error feedback, price increases
    pub const ERROR: Color = Color::Red;

    /// Informational feedback
    pub const INFO: Color = Color::Blue;

    // -------------------------------------------------------------------------
    // UI Element Colors
    // -------------------------------------------------------------------------

    /// Active border color
    pub const BORDER_ACTIVE: Color = Color::Cyan;

    /// Inactive/unfocused border color
    pub const BORDER_INACTIVE: Color = Color::DarkGray;

    /// Selected item highlight
    pub const SELECTED_BG: Color = Color::Yellow;

    /// Selected item text (for contrast on yellow bg)
    pub const SELECTED_FG: Color = Color::Black;

    /// Price figures
    pub const PRICE: Color = Color::LightGreen;

    /// Navigation hint color
    pub const NAV_HINT: Color = Color::DarkGray;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Pre-built styles for common UI patterns
pub struct Styles;

impl Styles {
    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    /// Muted/secondary text
    pub fn text_muted() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    /// Secondary text (labels)
    pub fn text_secondary() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    /// Title style (bold, primary color)
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Active/focused border
    pub fn border_active() -> Style {
        Style::default().fg(Colors::BORDER_ACTIVE)
    }

    /// Inactive border
    pub fn border_inactive() -> Style {
        Style::default().fg(Colors::BORDER_INACTIVE)
    }

    /// Selected list item (yellow bg, black text)
    pub fn selected() -> Style {
        Style::default()
            .fg(Colors::SELECTED_FG)
            .bg(Colors::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Price figure
    pub fn price() -> Style {
        Style::default()
            .fg(Colors::PRICE)
            .add_modifier(Modifier::BOLD)
    }

    /// Success message
    pub fn success() -> Style {
        Style::default().fg(Colors::SUCCESS)
    }

    /// Warning message; also the duplicate-add row highlight
    pub fn warning() -> Style {
        Style::default()
            .fg(Colors::WARNING)
            .add_modifier(Modifier::BOLD)
    }

    /// Error message
    pub fn error() -> Style {
        Style::default().fg(Colors::ERROR)
    }

    /// Info message
    pub fn info() -> Style {
        Style::default().fg(Colors::INFO)
    }

    /// Navigation hint text
    pub fn nav_hint() -> Style {
        Style::default().fg(Colors::NAV_HINT)
    }

    /// Overlay background
    pub fn overlay() -> Style {
        Style::default().bg(Colors::BG_PRIMARY)
    }
}

// =============================================================================
// SEMANTIC STYLING
// =============================================================================

/// Semantic style lookups
pub struct Theme;

impl Theme {
    /// Style for an option list's feedback line
    pub fn validity_style(validity: Validity) -> Style {
        match validity {
            Validity::Error => Styles::error(),
            Validity::Empty => Styles::warning(),
            Validity::Loading => Styles::info(),
            Validity::Ready | Validity::Unresolved => Styles::text_muted(),
        }
    }

    /// Price change: increases red, decreases green
    pub fn change_style(percent: f64) -> Style {
        if percent > 0.0 {
            Styles::error()
        } else if percent < 0.0 {
            Styles::success()
        } else {
            Styles::text_secondary()
        }
    }
}

// =============================================================================
// LAYOUT CONSTANTS
// =============================================================================

/// Layout dimensions
pub struct UiConstants;

impl UiConstants {
    /// Height of the title bar
    pub const TITLE_HEIGHT: u16 = 3;

    /// Height of the comparison table (header + 8 rows + borders)
    pub const COMPARISON_HEIGHT: u16 = 12;

    /// Height of the status bar
    pub const STATUS_BAR_HEIGHT: u16 = 1;

    /// Height of the navigation bar
    pub const NAV_BAR_HEIGHT: u16 = 1;

    /// Width of the form panel as percentage
    pub const FORM_WIDTH_PCT: u16 = 40;

    /// Overlay size as percentage of the screen
    pub const OVERLAY_WIDTH_PCT: u16 = 70;
    pub const OVERLAY_HEIGHT_PCT: u16 = 75;
}

/// Common UI text
pub struct UiText;

impl UiText {
    pub const LOADING: &'static str = "Loading...";
    pub const NOT_FOUND: &'static str = "Not Found";
    pub const NO_SELECTION: &'static str = "(none)";
    pub const EMPTY_COMPARISON: &'static str = "Run a quick look and press A to compare instances.";
}
