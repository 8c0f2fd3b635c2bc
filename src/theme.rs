//! Light/dark theme preference

use crate::error::Result;
use crate::storage::{KeyValueStore, THEME_KEY};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The other theme
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("invalid theme '{}': expected light or dark", other)),
        }
    }
}

/// Saved theme; anything other than `"dark"` reads as light
pub fn load_theme(storage: &dyn KeyValueStore) -> Result<Theme> {
    let theme = match storage.get(THEME_KEY)? {
        Some(bytes) if bytes.as_slice() == b"dark" => Theme::Dark,
        _ => Theme::Light,
    };
    Ok(theme)
}

/// Persist the theme preference
pub fn save_theme(storage: &dyn KeyValueStore, theme: Theme) -> Result<()> {
    storage.put(THEME_KEY, theme.as_str().as_bytes())?;
    tracing::info!(theme = %theme, "Saved theme");
    Ok(())
}

/// Flip and persist the theme, returning the new one
pub fn toggle_theme(storage: &dyn KeyValueStore) -> Result<Theme> {
    let theme = load_theme(storage)?.toggled();
    save_theme(storage, theme)?;
    Ok(theme)
}
