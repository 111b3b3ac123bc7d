//! Comparison list manager
//!
//! A bounded, user-curated list of priced instances shown side by side.
//!
//! # Row states
//!
//! ```text
//! Normal ──add duplicate──▶ Highlighted ──2000 ms──▶ Normal
//!    │                           │
//!    └──────── remove ───────────┴──▶ (gone)
//! ```
//!
//! The highlight deadline lives on the item itself. Expiry is driven by the
//! caller's clock (`expire_highlights`), so a removal that shifts indices can
//! never clear the highlight of a different row.

use std::time::{Duration, Instant};

use crate::gateway::PricedProduct;
use crate::logic::pricing::format_list_price;

/// Maximum number of compared items
pub const COMPARISON_CAPACITY: usize = 8;

/// How long a duplicate-add highlight stays visible
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(2000);

/// Deduplication key: the same type in the same region is one row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComparisonKey {
    pub region: String,
    pub instance_type: String,
}

impl ComparisonKey {
    pub fn new(region: impl Into<String>, instance_type: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            instance_type: instance_type.into(),
        }
    }
}

/// Visual state of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Normal,
    Highlighted,
}

/// Snapshot of a priced instance taken when it was added.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonItem {
    pub key: ComparisonKey,
    pub product: PricedProduct,
    /// Monthly price, e.g. `USD 70.08`
    pub price: String,
    /// `physicalProcessor clockSpeed`
    pub processor: String,
    pub memory: String,
    pub network: String,
    highlighted_until: Option<Instant>,
}

impl ComparisonItem {
    /// Copy the display fields out of `product`.
    pub fn snapshot(key: ComparisonKey, product: &PricedProduct) -> Self {
        let processor = [product.hardware("physicalProcessor"), product.hardware("clockSpeed")]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            price: format_list_price(product.list_price.as_ref()),
            processor,
            memory: product.hardware("memory").unwrap_or_default(),
            network: product.hardware("networkPerformance").unwrap_or_default(),
            product: product.clone(),
            key,
            highlighted_until: None,
        }
    }

    pub fn row_state(&self) -> RowState {
        if self.highlighted_until.is_some() {
            RowState::Highlighted
        } else {
            RowState::Normal
        }
    }

    pub fn is_highlighted(&self) -> bool {
        self.row_state() == RowState::Highlighted
    }
}

/// Result of an add attempt. None of these is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Inserted at this index
    Added(usize),
    /// Already present at this index; the row was highlighted instead
    Highlighted(usize),
    /// List at capacity, nothing changed
    Full,
    /// No priced product to add, nothing changed
    NoProduct,
}

/// Ordered comparison rows, bounded by a fixed capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonList {
    items: Vec<ComparisonItem>,
    capacity: usize,
}

impl Default for ComparisonList {
    fn default() -> Self {
        Self::new()
    }
}

impl ComparisonList {
    pub fn new() -> Self {
        Self::with_capacity(COMPARISON_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn items(&self) -> &[ComparisonItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Whether `add` would do anything but highlight
    pub fn can_add(&self, product: Option<&PricedProduct>) -> bool {
        product.is_some() && !self.is_full()
    }

    pub fn position(&self, key: &ComparisonKey) -> Option<usize> {
        self.items.iter().position(|item| item.key == *key)
    }

    /// Add a snapshot of `product` under `key`.
    ///
    /// A missing product or a full list is a no-op. An existing key is
    /// highlighted instead of duplicated.
    pub fn add(
        &mut self,
        key: ComparisonKey,
        product: Option<&PricedProduct>,
        now: Instant,
    ) -> AddOutcome {
        let Some(product) = product else {
            return AddOutcome::NoProduct;
        };
        if self.is_full() {
            return AddOutcome::Full;
        }
        if let Some(index) = self.position(&key) {
            self.highlight(index, now);
            return AddOutcome::Highlighted(index);
        }

        self.items.push(ComparisonItem::snapshot(key, product));
        AddOutcome::Added(self.items.len() - 1)
    }

    /// Emphasize the row at `index` until `now + HIGHLIGHT_DURATION`.
    ///
    /// Returns false for an out-of-range index.
    pub fn highlight(&mut self, index: usize, now: Instant) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                item.highlighted_until = Some(now + HIGHLIGHT_DURATION);
                true
            }
            None => false,
        }
    }

    /// Return rows whose highlight has run out to normal. Returns how many
    /// rows changed.
    pub fn expire_highlights(&mut self, now: Instant) -> usize {
        let mut cleared = 0;
        for item in &mut self.items {
            if item.highlighted_until.is_some_and(|until| now >= until) {
                item.highlighted_until = None;
                cleared += 1;
            }
        }
        cleared
    }

    /// Remove the row at `index`; out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) -> Option<ComparisonItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }
}
