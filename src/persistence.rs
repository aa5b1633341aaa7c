//! Persistence bridge: one-time load at startup, background saves of the persisted subset.
//! Storage failures are logged and swallowed here; nothing in this module fails the caller.

use crate::errors::{ColorTapError, Result};
use crate::models::{Color, Favorite, PersistedSnapshot, SessionState, Theme};
use crate::rust_log;
use crate::state_builder;
use crate::storage::KeyValueStore;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

pub const KEY_FAVORITES: &str = "favorites";
pub const KEY_CLICK_COUNT: &str = "clickCount";
pub const KEY_COLOR_HISTORY: &str = "colorHistory";
pub const KEY_THEME: &str = "theme";

static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Runtime::new().expect("tokio runtime")
});

struct RawValues {
    favorites: Option<String>,
    click_count: Option<String>,
    color_history: Option<String>,
    theme: Option<String>,
}

fn read_all(store: &dyn KeyValueStore) -> Result<RawValues> {
    Ok(RawValues {
        favorites: store.get_item(KEY_FAVORITES)?,
        click_count: store.get_item(KEY_CLICK_COUNT)?,
        color_history: store.get_item(KEY_COLOR_HISTORY)?,
        theme: store.get_item(KEY_THEME)?,
    })
}

fn parse_click_count(raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|_| ColorTapError::InvalidClickCount(raw.to_string()))
}

/// Apply one stored value; a bad value is logged and the field keeps its default.
fn apply_field<T>(key: &str, raw: Option<String>, parse: impl FnOnce(&str) -> Result<T>, set: impl FnOnce(T)) -> bool {
    let Some(raw) = raw else {
        return false;
    };
    match parse(&raw) {
        Ok(v) => {
            set(v);
            true
        }
        Err(e) => {
            rust_log!("[colortap_rs] persistence::load key={} parse failed, keeping default: {}", key, e);
            false
        }
    }
}

/// Build the startup session from the store. Absent or unreadable keys keep their defaults;
/// the theme color is painted last.
pub fn load(store: &dyn KeyValueStore) -> SessionState {
    let mut state = SessionState::default();
    match read_all(store) {
        Ok(raw) => {
            let mut applied = 0;
            if apply_field(
                KEY_FAVORITES,
                raw.favorites,
                |s| Ok(serde_json::from_str::<Vec<Favorite>>(s)?),
                |v| state.favorites = v,
            ) {
                applied += 1;
            }
            if apply_field(KEY_CLICK_COUNT, raw.click_count, parse_click_count, |v| state.click_count = v) {
                applied += 1;
            }
            if apply_field(
                KEY_COLOR_HISTORY,
                raw.color_history,
                |s| Ok(serde_json::from_str::<Vec<Color>>(s)?),
                |v| state.color_history = v,
            ) {
                applied += 1;
            }
            if apply_field(KEY_THEME, raw.theme, |s| Ok(Theme::from_name(s)), |v| state.theme = v) {
                applied += 1;
            }
            rust_log!("[colortap_rs] persistence::load applied {} keys", applied);
        }
        Err(e) => {
            rust_log!("[colortap_rs] persistence::load failed, starting from defaults: {}", e);
        }
    }
    let theme = state.theme;
    state_builder::apply_theme(&mut state, theme);
    state
}

/// Serialize the snapshot into (key, value) pairs in write order.
pub fn encode_snapshot(snapshot: &PersistedSnapshot) -> Result<Vec<(&'static str, String)>> {
    Ok(vec![
        (KEY_FAVORITES, serde_json::to_string(&snapshot.favorites)?),
        (KEY_CLICK_COUNT, snapshot.click_count.to_string()),
        (KEY_COLOR_HISTORY, serde_json::to_string(&snapshot.color_history)?),
        (KEY_THEME, snapshot.theme.as_str().to_string()),
    ])
}

/// Write every persisted key; stops at the first failing write.
pub fn write_snapshot(store: &dyn KeyValueStore, snapshot: &PersistedSnapshot) -> Result<()> {
    for (key, value) in encode_snapshot(snapshot)? {
        store.set_item(key, &value)?;
    }
    Ok(())
}

enum Command {
    Save(PersistedSnapshot),
    Flush(oneshot::Sender<()>),
}

/// Owns the store and a single save worker. Saves are queued and written in submission order.
pub struct PersistenceBridge {
    store: Arc<dyn KeyValueStore>,
    tx: mpsc::UnboundedSender<Command>,
}

impl PersistenceBridge {
    pub fn start(store: Arc<dyn KeyValueStore>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Command>();
        let worker_store = Arc::clone(&store);
        RUNTIME.spawn(async move {
            while let Some(cmd) = rx.recv().await {
                match cmd {
                    Command::Save(snapshot) => {
                        let store = Arc::clone(&worker_store);
                        let res =
                            tokio::task::spawn_blocking(move || write_snapshot(store.as_ref(), &snapshot)).await;
                        match res {
                            Ok(Ok(())) => {}
                            Ok(Err(e)) => rust_log!("[colortap_rs] persistence::save failed: {}", e),
                            Err(e) => rust_log!("[colortap_rs] persistence::save task failed: {}", e),
                        }
                    }
                    Command::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
        });
        Self { store, tx }
    }

    pub fn load(&self) -> SessionState {
        load(self.store.as_ref())
    }

    /// Queue a save. Never blocks and never reports failure to the caller.
    pub fn save(&self, snapshot: PersistedSnapshot) {
        if self.tx.send(Command::Save(snapshot)).is_err() {
            rust_log!("[colortap_rs] persistence::save dropped, worker stopped");
        }
    }

    /// Block until every save queued before this call has been attempted.
    /// Must not be called from inside a tokio runtime.
    pub fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(Command::Flush(done_tx)).is_err() {
            rust_log!("[colortap_rs] persistence::flush skipped, worker stopped");
            return;
        }
        let _ = done_rx.blocking_recv();
    }
}
