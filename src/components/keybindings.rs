//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change based on the current application mode.
//! The same registry resolves key presses to actions and feeds the nav bar and help overlay,
//! so what is shown is always what is bound.

use crate::app::AppMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    CyclePrevious,
    CycleNext,
    VolumeUp,
    VolumeDown,
    QuickLook,
    AddToComparison,
    SwitchFocus,
    RemoveRow,
    ShowDetail,
    Retry,
    ScrollUp,
    ScrollDown,
    Back,
    Help,
    Quit,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Whether a key event triggers this binding.
    ///
    /// Shift is ignored for character keys since terminals report `+` and `?`
    /// with it set.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if event.code != self.key {
            return false;
        }
        let mut modifiers = event.modifiers;
        if matches!(event.code, KeyCode::Char(_)) {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        modifiers == self.modifiers
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Mode-specific keybindings
    mode_bindings: HashMap<AppMode, Vec<Keybinding>>,
    /// Global keybindings (available in all modes)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            mode_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    /// Register default keybindings for all modes
    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
        ];

        // Selection form
        self.mode_bindings.insert(
            AppMode::Form,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous field"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next field"),
                Keybinding::new(KeyCode::Left, KeyAction::CyclePrevious, "Left", "Previous option"),
                Keybinding::new(KeyCode::Right, KeyAction::CycleNext, "Right", "Next option"),
                Keybinding::new(KeyCode::Char('+'), KeyAction::VolumeUp, "+", "Grow volume"),
                Keybinding::new(KeyCode::Char('-'), KeyAction::VolumeDown, "-", "Shrink volume"),
                Keybinding::new(KeyCode::Enter, KeyAction::QuickLook, "Enter", "Quick look"),
                Keybinding::new(KeyCode::Char('a'), KeyAction::AddToComparison, "A", "Compare"),
                Keybinding::new(KeyCode::Char('i'), KeyAction::ShowDetail, "I", "Detail"),
                Keybinding::new(KeyCode::Char('r'), KeyAction::Retry, "R", "Retry"),
                Keybinding::new(KeyCode::Tab, KeyAction::SwitchFocus, "Tab", "Comparison"),
            ],
        );

        // Comparison table
        self.mode_bindings.insert(
            AppMode::Comparison,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous row"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next row"),
                Keybinding::new(KeyCode::Char('d'), KeyAction::RemoveRow, "D", "Remove"),
                Keybinding::new(KeyCode::Delete, KeyAction::RemoveRow, "Del", "Remove"),
                Keybinding::new(KeyCode::Tab, KeyAction::SwitchFocus, "Tab", "Form"),
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Back"),
            ],
        );

        // Instance detail overlay
        self.mode_bindings.insert(
            AppMode::Detail,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::ScrollUp, "Up", "Scroll up"),
                Keybinding::new(KeyCode::Down, KeyAction::ScrollDown, "Down", "Scroll down"),
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Close"),
                Keybinding::new(KeyCode::Enter, KeyAction::Back, "Enter", "Close"),
            ],
        );
    }

    /// Get keybindings for a specific mode (includes global bindings)
    pub fn get_bindings(&self, mode: &AppMode) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();

        if let Some(mode_bindings) = self.mode_bindings.get(mode) {
            bindings.extend(mode_bindings.iter());
        }
        bindings.extend(self.global_bindings.iter());

        bindings
    }

    /// Resolve a key press in `mode` to its action
    pub fn action_for(&self, mode: &AppMode, event: &KeyEvent) -> Option<KeyAction> {
        self.get_bindings(mode)
            .into_iter()
            .find(|b| b.matches(event))
            .map(|b| b.action)
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, mode: &AppMode) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(mode);

        // Select key bindings to show in nav bar (most important ones)
        let priority_actions = match mode {
            AppMode::Form => vec![
                KeyAction::NavigateUp,
                KeyAction::CycleNext,
                KeyAction::QuickLook,
                KeyAction::AddToComparison,
                KeyAction::SwitchFocus,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            AppMode::Comparison => vec![
                KeyAction::NavigateUp,
                KeyAction::RemoveRow,
                KeyAction::SwitchFocus,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            AppMode::Detail => vec![KeyAction::ScrollUp, KeyAction::Back],
        };

        let mut items: Vec<NavBarItem> = Vec::new();
        for action in priority_actions {
            let combined = match action {
                KeyAction::NavigateUp | KeyAction::NavigateDown => Some(("Up/Dn", "Navigate")),
                KeyAction::ScrollUp | KeyAction::ScrollDown => Some(("Up/Dn", "Scroll")),
                KeyAction::CyclePrevious | KeyAction::CycleNext => Some(("Lt/Rt", "Change")),
                _ => None,
            };
            if let Some((key_display, action_label)) = combined {
                items.push(NavBarItem {
                    key_display: key_display.to_string(),
                    action_label: action_label.to_string(),
                });
            } else if let Some(binding) = bindings.iter().find(|b| b.action == action) {
                items.push(NavBarItem {
                    key_display: binding.display.clone(),
                    action_label: binding.description.clone(),
                });
            }
        }

        items
    }

    /// Get full help content for a mode (for help overlay)
    pub fn get_help_content(&self, mode: &AppMode) -> Vec<HelpSection> {
        let groups: [(&str, &[KeyAction]); 3] = [
            (
                "Navigation",
                &[
                    KeyAction::NavigateUp,
                    KeyAction::NavigateDown,
                    KeyAction::CyclePrevious,
                    KeyAction::CycleNext,
                    KeyAction::ScrollUp,
                    KeyAction::ScrollDown,
                    KeyAction::SwitchFocus,
                ],
            ),
            (
                "Actions",
                &[
                    KeyAction::VolumeUp,
                    KeyAction::VolumeDown,
                    KeyAction::QuickLook,
                    KeyAction::AddToComparison,
                    KeyAction::RemoveRow,
                    KeyAction::ShowDetail,
                    KeyAction::Retry,
                ],
            ),
            ("General", &[KeyAction::Back, KeyAction::Help, KeyAction::Quit]),
        ];

        let bindings = self.get_bindings(mode);
        groups
            .iter()
            .filter_map(|(title, actions)| {
                let items: Vec<(String, String)> = bindings
                    .iter()
                    .filter(|b| actions.contains(&b.action))
                    .map(|b| (b.display.clone(), b.description.clone()))
                    .collect();
                (!items.is_empty()).then(|| HelpSection {
                    title: title.to_string(),
                    items,
                })
            })
            .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}
