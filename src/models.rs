//! Session data: colors, favorites, themes, ranks and the session state itself.
//! Wire format is JSON with the same field names the Flutter shell reads.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_CATEGORY: &str = "General";
pub const HISTORY_LIMIT: usize = 5;

/// Either `rgb(r, g, b)` or `#RRGGBB`, kept verbatim (no normalization between the two forms).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    pub const WHITE: &'static str = "#FFFFFF";
    pub const BLACK: &'static str = "#000000";

    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn white() -> Self {
        Self::new(Self::WHITE)
    }

    pub fn black() -> Self {
        Self::new(Self::BLACK)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub color: Color,
    pub category: String,
}

/// Fixed theme table. Stored as its plain name ("Default", "Retro", "Minimalist").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Default,
    Retro,
    Minimalist,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Default, Theme::Retro, Theme::Minimalist];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Default => "Default",
            Theme::Retro => "Retro",
            Theme::Minimalist => "Minimalist",
        }
    }

    pub fn color_hex(&self) -> &'static str {
        match self {
            Theme::Default => "#FFFFFF",
            Theme::Retro => "#FFD700",
            Theme::Minimalist => "#d2c4c4",
        }
    }

    pub fn color(&self) -> Color {
        Color::new(self.color_hex())
    }

    /// Unknown names fall back to `Default`.
    pub fn from_name(s: &str) -> Self {
        match s {
            "Retro" => Theme::Retro,
            "Minimalist" => Theme::Minimalist,
            _ => Theme::Default,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Title shown under the click counter. Ordered so `Newbie < ... < Pro`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Newbie,
    Beginner,
    Intermediate,
    Advanced,
    Pro,
}

impl Rank {
    pub fn from_clicks(clicks: u64) -> Self {
        if clicks >= 50 {
            Rank::Pro
        } else if clicks >= 20 {
            Rank::Advanced
        } else if clicks >= 10 {
            Rank::Intermediate
        } else if clicks >= 5 {
            Rank::Beginner
        } else {
            Rank::Newbie
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Newbie => "Newbie",
            Rank::Beginner => "Beginner",
            Rank::Intermediate => "Intermediate",
            Rank::Advanced => "Advanced",
            Rank::Pro => "Pro",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub click_count: u64,
    pub current_color: Color,
    pub background_color: Color,
    /// Most recent first, at most `HISTORY_LIMIT` entries.
    pub color_history: Vec<Color>,
    pub favorites: Vec<Favorite>,
    pub categories: Vec<String>,
    pub current_category: String,
    pub theme: Theme,
    pub is_dark_mode: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            click_count: 0,
            current_color: Theme::Default.color(),
            background_color: Theme::Default.color(),
            color_history: Vec::new(),
            favorites: Vec::new(),
            categories: vec![DEFAULT_CATEGORY.to_string()],
            current_category: DEFAULT_CATEGORY.to_string(),
            theme: Theme::Default,
            is_dark_mode: false,
        }
    }
}

impl SessionState {
    pub fn title(&self) -> Rank {
        Rank::from_clicks(self.click_count)
    }

    pub fn favorites_in_category(&self, category: &str) -> Vec<Favorite> {
        self.favorites
            .iter()
            .filter(|f| f.category == category)
            .cloned()
            .collect()
    }

    pub fn persisted(&self) -> PersistedSnapshot {
        PersistedSnapshot {
            favorites: self.favorites.clone(),
            click_count: self.click_count,
            color_history: self.color_history.clone(),
            theme: self.theme,
        }
    }
}

/// The subset of the session mirrored to the key-value store.
#[derive(Clone, Debug, PartialEq)]
pub struct PersistedSnapshot {
    pub favorites: Vec<Favorite>,
    pub click_count: u64,
    pub color_history: Vec<Color>,
    pub theme: Theme,
}

/// Snapshot handed to the shell after every call: full state plus the derived title.
#[derive(Clone, Debug, Serialize)]
pub struct SessionView<'a> {
    #[serde(flatten)]
    pub state: &'a SessionState,
    pub title: Rank,
}
