//! Selectable option lists
//!
//! Each dependent field (category, family, size) owns one [`OptionList`].
//! The list carries its own resolution state so the renderer can tell a
//! loading selector from an empty or failed one without extra flags.

use crate::types::Validity;

/// Something that can appear in a select: a wire value plus a display label.
pub trait Choice {
    /// Value stored in the selection and sent to the API
    fn value(&self) -> &str;
    /// Human-readable label
    fn label(&self) -> String;
}

/// Ordered options for one field, with validity and optional feedback.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionList<T> {
    entries: Vec<T>,
    validity: Validity,
    feedback: Option<String>,
}

impl<T> Default for OptionList<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            validity: Validity::Unresolved,
            feedback: None,
        }
    }
}

impl<T: Choice> OptionList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn validity(&self) -> Validity {
        self.validity
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<&T> {
        self.entries.first()
    }

    /// Index of the entry with the given value
    pub fn position(&self, value: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.value() == value)
    }

    pub fn get(&self, value: &str) -> Option<&T> {
        self.entries.iter().find(|e| e.value() == value)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.position(value).is_some()
    }

    /// Back to the initial state (upstream field cleared)
    pub fn reset(&mut self) {
        self.entries.clear();
        self.validity = Validity::Unresolved;
        self.feedback = None;
    }

    /// A fetch for this field was dispatched
    pub fn set_loading(&mut self) {
        self.entries.clear();
        self.validity = Validity::Loading;
        self.feedback = None;
    }

    /// Store fetched entries; an empty set resolves to `Empty`.
    pub fn resolve(&mut self, entries: Vec<T>) {
        self.validity = if entries.is_empty() {
            Validity::Empty
        } else {
            Validity::Ready
        };
        self.entries = entries;
        self.feedback = None;
    }

    /// Well-formed but empty result, with an explanation for the user
    pub fn mark_empty(&mut self, feedback: impl Into<String>) {
        self.entries.clear();
        self.validity = Validity::Empty;
        self.feedback = Some(feedback.into());
    }

    /// The fetch failed; the feedback should invite a retry
    pub fn fail(&mut self, feedback: impl Into<String>) {
        self.entries.clear();
        self.validity = Validity::Error;
        self.feedback = Some(feedback.into());
    }

    /// Neighbor of `current` in list order, wrapping around.
    ///
    /// When `current` is not in the list the first (or last, going backwards)
    /// entry is returned.
    pub fn cycle(&self, current: &str, forward: bool) -> Option<&T> {
        let len = self.entries.len();
        if len == 0 {
            return None;
        }
        let next = match self.position(current) {
            Some(idx) if forward => (idx + 1) % len,
            Some(idx) => (idx + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        self.entries.get(next)
    }
}
