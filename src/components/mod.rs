//! Reusable TUI components
//!
//! - `keybindings`: per-mode key registry feeding input handling, the nav bar and help
//! - `floating_window`: centered overlay window
//! - `help_overlay`: keybinding help drawn in a floating window

pub mod floating_window;
pub mod help_overlay;
pub mod keybindings;
