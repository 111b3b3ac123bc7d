//! Application module
//!
//! Contains the main application loop and key handling.
//!
//! # Module Structure
//! - `state` - Application state types (AppState, AppMode)
//! - `dispatch` - Background fetch workers
//! - Main module - App struct and event loop

mod dispatch;
mod state;

// Re-export state types for external use
pub use dispatch::{execute, Dispatcher};
pub use state::{AppMode, AppState, VOLUME_STEP};

use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::gateway::Gateway;
use crate::logic::cascade::{Event, SessionDefaults, SessionState};
use crate::ui::UiRenderer;
use crossterm::event::{self as term_event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// How long the loop waits for a key before refreshing
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Main application struct
pub struct App {
    state: AppState,
    ui_renderer: UiRenderer,
    /// Keybinding context for key resolution and navigation hints
    keybinding_context: KeybindingContext,
    /// Starts background fetches; results come back on `event_rx`
    dispatcher: Dispatcher,
    /// Channel receiver for fetch results (polled in main loop)
    event_rx: Receiver<Event>,
}

impl App {
    /// Create a new application instance
    pub fn new(gateway: Arc<dyn Gateway>, defaults: SessionDefaults, endpoint: &str) -> Self {
        info!("Creating new App instance for {}", endpoint);
        let (event_tx, event_rx) = mpsc::channel();

        Self {
            state: AppState::new(SessionState::new(defaults)),
            ui_renderer: UiRenderer::new(endpoint),
            keybinding_context: KeybindingContext::new(),
            dispatcher: Dispatcher::new(gateway, event_tx),
            event_rx,
        }
    }

    /// Current application state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Feed an event to the session and start whatever it asks for
    pub fn apply(&mut self, event: Event) {
        let effects = self.state.session.apply(event);
        self.dispatcher.dispatch_all(effects);
    }

    /// Load the catalog. Called once before the loop starts.
    pub fn start(&mut self) {
        self.apply(Event::CatalogRequested);
    }

    /// Apply every fetch result that has arrived, without blocking.
    ///
    /// Returns how many events were applied.
    pub fn poll_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Block until one fetch result arrives and apply it.
    ///
    /// Returns `false` on timeout.
    pub fn wait_event(&mut self, timeout: Duration) -> bool {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => {
                self.apply(event);
                true
            }
            Err(_) => false,
        }
    }

    /// Run the main application loop
    pub fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        info!("Starting main application loop");
        self.start();

        loop {
            self.poll_events();
            self.apply(Event::Tick(Instant::now()));

            terminal.draw(|f| {
                self.ui_renderer
                    .render_with_context(f, &self.state, &self.keybinding_context)
            })?;

            if term_event::poll(POLL_INTERVAL)? {
                if let term_event::Event::Key(key_event) = term_event::read()? {
                    if key_event.kind == KeyEventKind::Press && self.handle_key_event(key_event) {
                        break; // Exit requested
                    }
                }
            }
        }

        info!("Main application loop finished");
        Ok(())
    }

    /// Handle keyboard input. Returns `true` when the user asked to quit.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> bool {
        // Help overlay swallows everything except its own dismissal
        if self.state.help_visible {
            if matches!(key_event.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.state.help_visible = false;
            }
            return false;
        }

        let mode = self.state.mode;
        let Some(action) = self.keybinding_context.action_for(&mode, &key_event) else {
            return false;
        };
        debug!("Key {:?} in {:?} -> {:?}", key_event.code, mode, action);

        match action {
            KeyAction::Quit => return true,
            KeyAction::Help => self.state.help_visible = true,
            KeyAction::NavigateUp | KeyAction::NavigateDown => {
                let down = action == KeyAction::NavigateDown;
                match mode {
                    AppMode::Comparison => self.state.move_comparison_selection(down),
                    _ => {
                        self.state.focus = if down {
                            self.state.focus.next()
                        } else {
                            self.state.focus.previous()
                        }
                    }
                }
            }
            KeyAction::CyclePrevious | KeyAction::CycleNext => {
                if let Some(event) = self
                    .state
                    .focused_change_event(action == KeyAction::CycleNext)
                {
                    self.apply(event);
                }
            }
            KeyAction::VolumeUp | KeyAction::VolumeDown => {
                if let Some(event) = self.state.volume_step_event(action == KeyAction::VolumeUp) {
                    self.apply(event);
                }
            }
            KeyAction::QuickLook => self.apply(Event::QuickLookRequested),
            KeyAction::AddToComparison => {
                self.apply(Event::CompareRequested { now: Instant::now() })
            }
            KeyAction::RemoveRow => {
                let index = self.state.comparison_selection;
                self.apply(Event::CompareRemoved(index));
                self.state.clamp_comparison_selection();
            }
            KeyAction::ShowDetail => {
                self.apply(Event::DetailRequested);
                if self.state.session.instance_key().is_some() {
                    self.state.detail_scroll = 0;
                    self.state.mode = AppMode::Detail;
                }
            }
            KeyAction::Retry => self.apply(Event::RetryRequested),
            KeyAction::SwitchFocus => {
                self.state.mode = match mode {
                    AppMode::Comparison => AppMode::Form,
                    _ => AppMode::Comparison,
                };
                self.state.clamp_comparison_selection();
            }
            KeyAction::ScrollUp => {
                self.state.detail_scroll = self.state.detail_scroll.saturating_sub(1)
            }
            KeyAction::ScrollDown => {
                self.state.detail_scroll = self.state.detail_scroll.saturating_add(1)
            }
            KeyAction::Back => self.state.mode = AppMode::Form,
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::*;
    use crossterm::event::KeyModifiers;
    use serde_json::Value;

    /// Gateway whose every call fails; enough to drive the key handling
    struct OfflineGateway;

    fn offline<T>() -> GatewayResult<T> {
        Err(GatewayError::Network("offline".to_string()))
    }

    impl Gateway for OfflineGateway {
        fn regions(&self) -> GatewayResult<Vec<Region>> {
            offline()
        }
        fn operations(&self) -> GatewayResult<Vec<Operation>> {
            offline()
        }
        fn categories(&self) -> GatewayResult<Vec<Category>> {
            offline()
        }
        fn volume_types(&self) -> GatewayResult<Vec<VolumeType>> {
            offline()
        }
        fn families(&self, _: &FamilyQuery) -> GatewayResult<Vec<InstanceFamily>> {
            offline()
        }
        fn sizes(&self, _: &SizeQuery) -> GatewayResult<Vec<InstanceSize>> {
            offline()
        }
        fn instance_product(&self, _: &InstanceProductQuery) -> GatewayResult<PricedProduct> {
            offline()
        }
        fn volume_product(&self, _: &VolumeProductQuery) -> GatewayResult<PricedProduct> {
            offline()
        }
        fn instance_detail(&self, _: &DetailQuery) -> GatewayResult<Value> {
            offline()
        }
    }

    fn app() -> App {
        App::new(
            Arc::new(OfflineGateway),
            SessionDefaults::default(),
            "http://localhost:8000/",
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_and_help() {
        let mut app = app();
        assert!(!app.handle_key_event(key(KeyCode::Char('?'))));
        assert!(app.state().help_visible);
        // Quit is swallowed while help is open
        assert!(!app.handle_key_event(key(KeyCode::Char('q'))));
        assert!(!app.handle_key_event(key(KeyCode::Esc)));
        assert!(!app.state().help_visible);
        assert!(app.handle_key_event(key(KeyCode::Char('q'))));
    }

    #[test]
    fn test_catalog_failure_reaches_status() {
        let mut app = app();
        app.start();
        assert!(app.state().session.catalog_loading);
        assert!(app.wait_event(Duration::from_secs(5)));
        assert!(!app.state().session.catalog_loading);
        let status = app.state().session.status.clone().unwrap_or_default();
        assert!(status.starts_with("Failed to load catalog"), "{status}");
    }

    #[test]
    fn test_tab_switches_panels_and_detail_needs_lookup() {
        let mut app = app();
        app.handle_key_event(key(KeyCode::Tab));
        assert_eq!(app.state().mode, AppMode::Comparison);
        app.handle_key_event(key(KeyCode::Esc));
        assert_eq!(app.state().mode, AppMode::Form);

        app.handle_key_event(key(KeyCode::Char('i')));
        assert_eq!(app.state().mode, AppMode::Form);
        assert_eq!(
            app.state().session.status.as_deref(),
            Some("Run a quick look first.")
        );
    }

    #[test]
    fn test_volume_keys_step_size() {
        let mut app = app();
        app.handle_key_event(key(KeyCode::Char('+')));
        assert_eq!(app.state().session.selection.volume_size, 60 + VOLUME_STEP);
        app.handle_key_event(key(KeyCode::Char('-')));
        app.handle_key_event(key(KeyCode::Char('-')));
        assert_eq!(app.state().session.selection.volume_size, 60 - VOLUME_STEP);
    }

    #[test]
    fn test_focus_wraps() {
        let mut app = app();
        app.handle_key_event(key(KeyCode::Up));
        assert_eq!(app.state().focus, crate::types::FocusField::VolumeSize);
        app.handle_key_event(key(KeyCode::Down));
        assert_eq!(app.state().focus, crate::types::FocusField::Region);
    }
}
