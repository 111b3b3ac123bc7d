//! Tests for Application State Management
//!
//! These tests verify:
//! - AppState default initialization
//! - Form focus navigation
//! - Field changes turned into cascade events
//! - Comparison cursor movement and clamping

use quicklook::app::{AppMode, AppState, VOLUME_STEP};
use quicklook::gateway::{InstanceSize, PricedProduct, Region};
use quicklook::logic::cascade::{Event, SessionState, MAX_VOLUME_SIZE, MIN_VOLUME_SIZE};
use quicklook::logic::comparison::ComparisonKey;
use quicklook::types::{Architecture, FocusField};
use std::time::Instant;

// =============================================================================
// AppState Default Tests
// =============================================================================

#[test]
fn test_app_state_default_mode_is_form() {
    let state = AppState::default();
    assert_eq!(state.mode, AppMode::Form);
    assert_eq!(state.focus, FocusField::Region);
    assert!(!state.help_visible);
}

#[test]
fn test_app_state_default_selections_are_zero() {
    let state = AppState::default();
    assert_eq!(state.comparison_selection, 0);
    assert_eq!(state.detail_scroll, 0);
}

#[test]
fn test_app_mode_default() {
    assert_eq!(AppMode::default(), AppMode::Form);
}

// =============================================================================
// Focus Navigation Tests
// =============================================================================

#[test]
fn test_focus_cycles_through_every_field() {
    let mut focus = FocusField::Region;
    for expected in FocusField::ALL.iter().skip(1) {
        focus = focus.next();
        assert_eq!(focus, *expected);
    }
    assert_eq!(focus.next(), FocusField::Region);
    assert_eq!(FocusField::Region.previous(), FocusField::VolumeSize);
}

// =============================================================================
// Field Change Tests
// =============================================================================

#[test]
fn test_region_change_cycles_catalog() {
    let mut session = SessionState::default();
    session.regions.resolve(vec![
        Region { code: "us-east-1".into(), name: None },
        Region { code: "us-west-2".into(), name: None },
    ]);
    let state = AppState::new(session);

    assert_eq!(
        state.focused_change_event(true),
        Some(Event::RegionChanged("us-west-2".into()))
    );
    // Wraps backwards from the first entry
    assert_eq!(
        state.focused_change_event(false),
        Some(Event::RegionChanged("us-west-2".into()))
    );
}

#[test]
fn test_architecture_toggles() {
    let mut state = AppState::default();
    state.focus = FocusField::Architecture;
    assert_eq!(
        state.focused_change_event(true),
        Some(Event::ArchitectureChanged(Architecture::Arm64))
    );
}

#[test]
fn test_empty_list_has_no_change() {
    let mut state = AppState::default();
    state.focus = FocusField::Size;
    assert_eq!(state.focused_change_event(true), None);

    state
        .session
        .sizes
        .resolve(vec![InstanceSize::new("m5.large"), InstanceSize::new("m5.xlarge")]);
    state.session.selection.size = "m5.large".into();
    assert_eq!(
        state.focused_change_event(true),
        Some(Event::SizeChanged("m5.xlarge".into()))
    );
}

#[test]
fn test_volume_step_is_clamped() {
    let mut state = AppState::default();
    state.focus = FocusField::VolumeSize;
    assert_eq!(
        state.focused_change_event(true),
        Some(Event::VolumeSizeChanged(60 + VOLUME_STEP))
    );

    state.session.selection.volume_size = MIN_VOLUME_SIZE;
    assert_eq!(state.volume_step_event(false), None);

    state.session.selection.volume_size = MAX_VOLUME_SIZE - 1;
    assert_eq!(
        state.volume_step_event(true),
        Some(Event::VolumeSizeChanged(MAX_VOLUME_SIZE))
    );
}

// =============================================================================
// Comparison Cursor Tests
// =============================================================================

fn state_with_rows(count: usize) -> AppState {
    let product: PricedProduct = serde_json::from_value(serde_json::json!({
        "listPrice": {"pricePerUnit": {"currency": "USD", "value": 10.0}}
    }))
    .unwrap();
    let mut state = AppState::default();
    let now = Instant::now();
    for i in 0..count {
        state.session.comparison.add(
            ComparisonKey::new("us-east-1", format!("m5.{i}xlarge")),
            Some(&product),
            now,
        );
    }
    state
}

#[test]
fn test_comparison_cursor_wraps() {
    let mut state = state_with_rows(3);
    state.move_comparison_selection(false);
    assert_eq!(state.comparison_selection, 2);
    state.move_comparison_selection(true);
    assert_eq!(state.comparison_selection, 0);
}

#[test]
fn test_comparison_cursor_clamped_after_remove() {
    let mut state = state_with_rows(2);
    state.comparison_selection = 1;
    state.session.apply(Event::CompareRemoved(1));
    state.clamp_comparison_selection();
    assert_eq!(state.comparison_selection, 0);

    state.session.apply(Event::CompareRemoved(0));
    state.clamp_comparison_selection();
    assert_eq!(state.comparison_selection, 0);
    state.move_comparison_selection(true);
    assert_eq!(state.comparison_selection, 0);
}
