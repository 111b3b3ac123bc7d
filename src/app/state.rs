//! Application state definitions
//!
//! Contains the UI-side state wrapped around the session: which panel has
//! focus, which form field is active, and overlay visibility.

use crate::logic::cascade::{Event, SessionState, MAX_VOLUME_SIZE, MIN_VOLUME_SIZE};
use crate::logic::options::Choice;
use crate::types::FocusField;

/// Volume size change per `+`/`-` press, in GiB
pub const VOLUME_STEP: u32 = 10;

/// Main application state
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Selections, option lists, products and comparison
    pub session: SessionState,
    /// Current application mode
    pub mode: AppMode,
    /// Active form field
    pub focus: FocusField,
    /// Selected row in the comparison table
    pub comparison_selection: usize,
    /// Scroll offset of the detail overlay
    pub detail_scroll: u16,
    /// Whether help overlay is visible
    pub help_visible: bool,
}

/// Application operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppMode {
    /// Selection form and product cards
    #[default]
    Form,
    /// Comparison table has focus
    Comparison,
    /// Instance detail overlay
    Detail,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SessionState::default())
    }
}

impl AppState {
    pub fn new(session: SessionState) -> Self {
        Self {
            session,
            mode: AppMode::Form,
            focus: FocusField::Region,
            comparison_selection: 0,
            detail_scroll: 0,
            help_visible: false,
        }
    }

    /// Event that moves the focused field to its next (or previous) option.
    ///
    /// `None` when the field has no options to move to.
    pub fn focused_change_event(&self, forward: bool) -> Option<Event> {
        let session = &self.session;
        let selection = &session.selection;
        match self.focus {
            FocusField::Region => session
                .regions
                .cycle(&selection.region, forward)
                .map(|r| Event::RegionChanged(r.value().to_string())),
            FocusField::Architecture => Some(Event::ArchitectureChanged(
                selection.architecture.toggled(),
            )),
            FocusField::Category => session
                .categories
                .cycle(&selection.category, forward)
                .map(|c| Event::CategoryChanged(c.value().to_string())),
            FocusField::Family => session
                .families
                .cycle(&selection.family, forward)
                .map(|f| Event::FamilyChanged(f.value().to_string())),
            FocusField::Size => session
                .sizes
                .cycle(&selection.size, forward)
                .map(|s| Event::SizeChanged(s.value().to_string())),
            FocusField::Operation => session
                .operations
                .cycle(&selection.operation, forward)
                .map(|o| Event::OperationChanged(o.value().to_string())),
            FocusField::VolumeType => session
                .volume_types
                .cycle(&selection.volume_type, forward)
                .map(|v| Event::VolumeTypeChanged(v.value().to_string())),
            FocusField::VolumeSize => self.volume_step_event(forward),
        }
    }

    /// Event that grows or shrinks the volume size by [`VOLUME_STEP`].
    pub fn volume_step_event(&self, grow: bool) -> Option<Event> {
        let current = self.session.selection.volume_size;
        let next = if grow {
            current.saturating_add(VOLUME_STEP)
        } else {
            current.saturating_sub(VOLUME_STEP)
        }
        .clamp(MIN_VOLUME_SIZE, MAX_VOLUME_SIZE);
        (next != current).then_some(Event::VolumeSizeChanged(next))
    }

    /// Keep the comparison cursor on an existing row.
    pub fn clamp_comparison_selection(&mut self) {
        let len = self.session.comparison.len();
        self.comparison_selection = self.comparison_selection.min(len.saturating_sub(1));
    }

    /// Move the comparison cursor, wrapping around.
    pub fn move_comparison_selection(&mut self, down: bool) {
        let len = self.session.comparison.len();
        if len == 0 {
            self.comparison_selection = 0;
            return;
        }
        self.comparison_selection = if down {
            (self.comparison_selection + 1) % len
        } else {
            (self.comparison_selection + len - 1) % len
        };
    }
}
