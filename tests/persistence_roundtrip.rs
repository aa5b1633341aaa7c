//! Save then relaunch: persisted fields come back, everything else resets to defaults.

use crate::common::app_instance::AppInstance;
use crate::common::test_helpers::{seeded_rng, FailingStore, RecordingStore};
use colortap_core::persistence::{KEY_CLICK_COUNT, KEY_COLOR_HISTORY, KEY_FAVORITES, KEY_THEME};
use colortap_core::{ColorTap, KeyValueStore, SessionState, Theme};
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[test]
fn relaunch_restores_persisted_fields_only() {
    let mut inst = AppInstance::launch();
    let mut rng = seeded_rng(11);
    for _ in 0..7 {
        inst.app().tap_background_with(&mut rng);
    }
    inst.app().add_category("Sunset".to_string());
    inst.app().add_favorite();
    inst.app().toggle_dark_mode();
    inst.app().set_theme("Retro".to_string());
    let saved = inst.app().state().persisted();

    inst.restart();

    let state = inst.app().state().clone();
    assert_eq!(state.persisted(), saved);
    assert_eq!(state.theme, Theme::Retro);
    assert_eq!(state.click_count, 7);
    assert_eq!(state.color_history.len(), 5);
    assert_eq!(state.favorites[0].category, "Sunset");
    // Not persisted: categories, current category, dark mode; colors come from the theme.
    assert_eq!(state.categories, vec!["General".to_string()]);
    assert_eq!(state.current_category, "General");
    assert!(!state.is_dark_mode);
    assert_eq!(state.current_color.as_str(), "#FFD700");
    assert_eq!(state.background_color.as_str(), "#FFD700");
}

#[test]
fn fresh_launch_is_default() {
    let mut inst = AppInstance::launch();
    assert_eq!(inst.app().state(), &SessionState::default());
    assert_eq!(inst.app().title(), "Newbie");
}

#[test]
fn last_write_wins_after_flush() {
    let store = Arc::new(RecordingStore::default());
    let mut app = ColorTap::with_store(store.clone());
    let mut rng = seeded_rng(5);
    for _ in 0..12 {
        app.tap_background_with(&mut rng);
    }
    app.flush();

    let counts = store.writes_for(KEY_CLICK_COUNT);
    let want: Vec<String> = (1..=12).map(|n| n.to_string()).collect();
    assert_eq!(counts, want);
    assert_eq!(store.get_item(KEY_CLICK_COUNT).unwrap().as_deref(), Some("12"));
}

#[test]
fn unpersisted_changes_do_not_write() {
    let store = Arc::new(RecordingStore::default());
    let mut app = ColorTap::with_store(store.clone());
    app.toggle_dark_mode();
    app.add_category("Cool".to_string());
    app.select_swatch("#123456".to_string());
    assert!(app.apply_manual_color("nope".to_string()).is_err());
    app.flush();
    assert!(store.writes.lock().unwrap().is_empty());
}

#[test]
fn manual_color_is_persisted_in_history() {
    let store = Arc::new(RecordingStore::default());
    let mut app = ColorTap::with_store(store.clone());
    app.apply_manual_color("#1a2b3c".to_string()).unwrap();
    app.flush();
    assert_eq!(
        store.get_item(KEY_COLOR_HISTORY).unwrap().as_deref(),
        Some(r##"["#1a2b3c"]"##)
    );
    assert_eq!(store.get_item(KEY_FAVORITES).unwrap().as_deref(), Some("[]"));
    assert_eq!(store.get_item(KEY_THEME).unwrap().as_deref(), Some("Default"));
}

#[test]
fn failing_store_never_breaks_the_session() {
    let mut app = ColorTap::with_store(Arc::new(FailingStore));
    assert_eq!(app.state(), &SessionState::default());
    let mut rng = seeded_rng(2);
    app.tap_background_with(&mut rng);
    app.add_favorite();
    app.set_theme("Minimalist".to_string());
    app.flush();
    assert_eq!(app.state().click_count, 1);
    assert_eq!(app.state().favorites.len(), 1);
    assert_eq!(app.state().theme, Theme::Minimalist);
}
