//! Apply UI events to the session state. Pure: randomness is drawn by the caller
//! and side effects come back as `Effect` values for the shell to play.

use crate::color;
use crate::models::{Color, Favorite, SessionState, Theme, HISTORY_LIMIT};
use serde::{Deserialize, Serialize};

/// One discrete user action from the shell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum UiEvent {
    /// Tap on the background; `color` is the freshly generated random color.
    TapBackground { color: Color },
    SubmitManualColor(String),
    ToggleDarkMode,
    AddFavorite,
    /// Removes every favorite with this color, in any category.
    RemoveFavorite(Color),
    RemoveFavoriteAt(usize),
    SubmitNewCategory(String),
    SelectCategory(String),
    SelectTheme(String),
    /// Tap on a history or favorite swatch.
    SelectSwatch(Color),
}

/// Fire-and-forget instruction for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    Haptic,
    ColorTransition { from: Color, to: Color },
    Notice { title: String, message: String },
    ValidationFailure { title: String, message: String },
}

fn push_history(state: &mut SessionState, color: Color) {
    state.color_history.insert(0, color);
    state.color_history.truncate(HISTORY_LIMIT);
}

fn notice(title: &str, message: String) -> Effect {
    Effect::Notice { title: title.to_string(), message }
}

pub fn apply_event(state: &mut SessionState, event: UiEvent) -> Vec<Effect> {
    match event {
        UiEvent::TapBackground { color } => {
            let from = state.background_color.clone();
            state.current_color = color.clone();
            state.background_color = color.clone();
            state.click_count = state.click_count.saturating_add(1);
            push_history(state, color.clone());
            vec![Effect::ColorTransition { from, to: color }, Effect::Haptic]
        }
        UiEvent::SubmitManualColor(input) => match color::parse_hex_color(&input) {
            Ok(c) => {
                state.current_color = c.clone();
                state.background_color = c.clone();
                push_history(state, c);
                vec![Effect::Haptic]
            }
            Err(_) => vec![Effect::ValidationFailure {
                title: "Invalid Color".to_string(),
                message: "Please enter a valid hex color code.".to_string(),
            }],
        },
        UiEvent::ToggleDarkMode => {
            state.is_dark_mode = !state.is_dark_mode;
            state.background_color = if state.is_dark_mode { Color::black() } else { Color::white() };
            Vec::new()
        }
        UiEvent::AddFavorite => {
            let color = state.background_color.clone();
            state.favorites.push(Favorite {
                color: color.clone(),
                category: state.current_category.clone(),
            });
            vec![notice(
                "Favorite added!",
                format!("Color {} has been added to your favorites.", color),
            )]
        }
        UiEvent::RemoveFavorite(color) => {
            state.favorites.retain(|f| f.color != color);
            vec![notice(
                "Favorite removed!",
                format!("Color {} has been removed from your favorites.", color),
            )]
        }
        UiEvent::RemoveFavoriteAt(index) => {
            if index >= state.favorites.len() {
                return Vec::new();
            }
            let removed = state.favorites.remove(index);
            vec![notice(
                "Favorite removed!",
                format!("Color {} has been removed from your favorites.", removed.color),
            )]
        }
        UiEvent::SubmitNewCategory(name) => {
            if !name.is_empty() && !state.categories.contains(&name) {
                state.categories.push(name.clone());
                state.current_category = name;
            }
            Vec::new()
        }
        UiEvent::SelectCategory(name) => {
            if state.categories.contains(&name) {
                state.current_category = name;
            }
            Vec::new()
        }
        UiEvent::SelectTheme(name) => {
            apply_theme(state, Theme::from_name(&name));
            Vec::new()
        }
        UiEvent::SelectSwatch(color) => {
            state.background_color = color;
            Vec::new()
        }
    }
}

/// Store the theme and paint both colors with it.
pub fn apply_theme(state: &mut SessionState, theme: Theme) {
    state.theme = theme;
    state.current_color = theme.color();
    state.background_color = theme.color();
}

/// Replay events over a fresh session. Returns the state and every effect emitted on the way.
pub fn build_state_from_events(
    events: impl IntoIterator<Item = UiEvent>,
) -> (SessionState, Vec<Effect>) {
    let mut state = SessionState::default();
    let mut effects = Vec::new();
    for event in events {
        effects.extend(apply_event(&mut state, event));
    }
    (state, effects)
}
