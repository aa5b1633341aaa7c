#![allow(unexpected_cfgs)] // flutter_rust_bridge macro emits frb_expand cfg
//! ColorTap core: session state, event reducer and persistence behind the Flutter shell.

use flutter_rust_bridge::frb;
use rand::Rng;
use std::path::Path;
use std::sync::Arc;

pub mod color;
pub mod errors;
mod log_bridge;
pub mod models;
pub mod persistence;
pub mod state_builder;
pub mod storage;

pub use errors::{ColorTapError, Result};
pub use models::{Color, Favorite, PersistedSnapshot, Rank, SessionState, SessionView, Theme};
pub use persistence::PersistenceBridge;
pub use state_builder::{Effect, UiEvent};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};

#[frb(init)]
pub fn init_app() {
    // Storage is opened per handle via ColorTap::open(path) from Dart.
}

/// One running app session. Dart holds it as an opaque handle; every call runs on the UI isolate's
/// behalf, so the session is only ever mutated by one logical thread.
#[frb(opaque)]
pub struct ColorTap {
    state: SessionState,
    bridge: PersistenceBridge,
    pending_effects: Vec<Effect>,
}

impl ColorTap {
    /// Open the SQLite store under `storage_path` (the app documents directory) and restore the session.
    pub fn open(storage_path: String) -> std::result::Result<ColorTap, String> {
        let store = SqliteStore::open(Path::new(&storage_path)).map_err(|e| e.to_string())?;
        rust_log!("[colortap_rs] colortap::open storage ready path={}", storage_path);
        Ok(Self::with_store(Arc::new(store)))
    }

    #[frb(sync)]
    pub fn in_memory() -> ColorTap {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    #[frb(ignore)]
    pub fn with_store(store: Arc<dyn KeyValueStore>) -> ColorTap {
        let bridge = PersistenceBridge::start(store);
        let state = bridge.load();
        ColorTap {
            state,
            bridge,
            pending_effects: Vec::new(),
        }
    }

    /// Apply one event, queue its effects, and mirror the persisted subset when it changed.
    #[frb(ignore)]
    pub fn dispatch(&mut self, event: UiEvent) -> Vec<Effect> {
        let before = self.state.persisted();
        let effects = state_builder::apply_event(&mut self.state, event);
        let after = self.state.persisted();
        if after != before {
            self.bridge.save(after);
        }
        self.pending_effects.extend(effects.iter().cloned());
        effects
    }

    /// Tap with a caller-supplied RNG (seeded in tests).
    #[frb(ignore)]
    pub fn tap_background_with<R: Rng>(&mut self, rng: &mut R) -> Color {
        let color = color::random_rgb(rng);
        self.dispatch(UiEvent::TapBackground { color: color.clone() });
        color
    }

    pub fn tap_background(&mut self) -> String {
        self.tap_background_with(&mut rand::thread_rng()).0
    }

    /// Err carries the validation message; the matching effect is queued as well.
    pub fn apply_manual_color(&mut self, input: String) -> std::result::Result<(), String> {
        let effects = self.dispatch(UiEvent::SubmitManualColor(input.clone()));
        if effects.iter().any(|e| matches!(e, Effect::ValidationFailure { .. })) {
            Err(ColorTapError::InvalidHexColor(input).to_string())
        } else {
            Ok(())
        }
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dispatch(UiEvent::ToggleDarkMode);
    }

    pub fn add_favorite(&mut self) {
        self.dispatch(UiEvent::AddFavorite);
    }

    pub fn remove_favorite(&mut self, color: String) {
        self.dispatch(UiEvent::RemoveFavorite(Color(color)));
    }

    pub fn remove_favorite_at(&mut self, index: usize) {
        self.dispatch(UiEvent::RemoveFavoriteAt(index));
    }

    pub fn add_category(&mut self, name: String) {
        self.dispatch(UiEvent::SubmitNewCategory(name));
    }

    pub fn select_category(&mut self, name: String) {
        self.dispatch(UiEvent::SelectCategory(name));
    }

    pub fn set_theme(&mut self, name: String) {
        self.dispatch(UiEvent::SelectTheme(name));
    }

    pub fn select_swatch(&mut self, color: String) {
        self.dispatch(UiEvent::SelectSwatch(Color(color)));
    }

    /// Theme names in button order.
    #[frb(sync)]
    pub fn theme_names() -> Vec<String> {
        Theme::ALL.iter().map(|t| t.as_str().to_string()).collect()
    }

    #[frb(sync)]
    pub fn title(&self) -> String {
        self.state.title().to_string()
    }

    #[frb(ignore)]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn favorites_in_category(&self, category: String) -> std::result::Result<String, String> {
        serde_json::to_string(&self.state.favorites_in_category(&category)).map_err(|e| e.to_string())
    }

    /// Full session state plus title, as JSON for Dart.
    pub fn snapshot_json(&self) -> std::result::Result<String, String> {
        let view = SessionView {
            state: &self.state,
            title: self.state.title(),
        };
        serde_json::to_string(&view).map_err(|e| e.to_string())
    }

    /// Effects queued since the last drain, as a JSON array. Dart plays haptics, animations and notices from it.
    pub fn drain_effects(&mut self) -> std::result::Result<String, String> {
        let effects = std::mem::take(&mut self.pending_effects);
        serde_json::to_string(&effects).map_err(|e| e.to_string())
    }

    /// Wait for queued saves. Dart calls this when the app goes to background.
    pub fn flush(&self) {
        self.bridge.flush();
    }
}

/// Drain buffered Rust log lines so Dart can show them (e.g. via debugPrint).
pub fn drain_rust_logs() -> Vec<String> {
    log_bridge::drain_rust_logs()
}
