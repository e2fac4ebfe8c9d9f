//! User preferences persisted one key per field.
//!
//! # Responsibility
//! - Load each preference independently with its own fallback default.
//! - Parse user-entered values for the settings panel and CLI.
//!
//! # Invariants
//! - A malformed stored value resets only its own field to the default.
//! - `font_size` is never zero.

use crate::store::codec::{load_with, save_json};
use crate::store::{keys, KeyValueStore, StoreResult};
use serde_json::Value;
use std::fmt::{Display, Formatter};

pub const DEFAULT_THEME: &str = "default";
pub const DEFAULT_FONT_SIZE: u32 = 16;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("unknown setting `{0}`; expected darkMode|notifications|theme|fontSize")]
    UnknownKey(String),
    #[error("invalid value `{value}` for setting `{key}`")]
    InvalidValue { key: SettingKey, value: String },
}

/// Persisted preference identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    DarkMode,
    Notifications,
    Theme,
    FontSize,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        Self::DarkMode,
        Self::Notifications,
        Self::Theme,
        Self::FontSize,
    ];

    /// Storage key for this preference.
    pub fn store_key(self) -> &'static str {
        match self {
            Self::DarkMode => keys::DARK_MODE,
            Self::Notifications => keys::NOTIFICATIONS,
            Self::Theme => keys::THEME,
            Self::FontSize => keys::FONT_SIZE,
        }
    }

    /// Accepts the storage key or a snake/kebab-case alias.
    pub fn parse(value: &str) -> Result<Self, SettingsError> {
        let normalized = value.trim().to_ascii_lowercase().replace(['-', '_'], "");
        match normalized.as_str() {
            "darkmode" => Ok(Self::DarkMode),
            "notifications" => Ok(Self::Notifications),
            "theme" => Ok(Self::Theme),
            "fontsize" => Ok(Self::FontSize),
            _ => Err(SettingsError::UnknownKey(value.trim().to_string())),
        }
    }
}

impl Display for SettingKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.store_key())
    }
}

/// Dashboard preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub dark_mode: bool,
    pub notifications: bool,
    pub theme: String,
    /// Root font size in pixels.
    pub font_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            notifications: true,
            theme: DEFAULT_THEME.to_string(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl Settings {
    /// Loads every field independently, falling back per key.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let defaults = Self::default();
        Self {
            dark_mode: load_with(store, keys::DARK_MODE, decode_bool)
                .unwrap_or(defaults.dark_mode),
            notifications: load_with(store, keys::NOTIFICATIONS, decode_bool)
                .unwrap_or(defaults.notifications),
            theme: load_with(store, keys::THEME, decode_theme).unwrap_or(defaults.theme),
            font_size: load_with(store, keys::FONT_SIZE, decode_font_size)
                .unwrap_or(defaults.font_size),
        }
    }

    /// Writes one field under its own key.
    pub fn save_field<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        key: SettingKey,
    ) -> StoreResult<()> {
        match key {
            SettingKey::DarkMode => save_json(store, keys::DARK_MODE, &self.dark_mode),
            SettingKey::Notifications => {
                save_json(store, keys::NOTIFICATIONS, &self.notifications)
            }
            SettingKey::Theme => save_json(store, keys::THEME, self.theme.as_str()),
            SettingKey::FontSize => save_json(store, keys::FONT_SIZE, &self.font_size),
        }
    }

    /// Parses `raw` for `key` and assigns it.
    ///
    /// # Errors
    /// Returns `InvalidValue` and leaves `self` unchanged when `raw` does
    /// not parse for that field.
    pub fn apply(&mut self, key: SettingKey, raw: &str) -> Result<(), SettingsError> {
        let invalid = || SettingsError::InvalidValue {
            key,
            value: raw.to_string(),
        };

        match key {
            SettingKey::DarkMode => self.dark_mode = parse_flag(raw).ok_or_else(invalid)?,
            SettingKey::Notifications => {
                self.notifications = parse_flag(raw).ok_or_else(invalid)?
            }
            SettingKey::Theme => {
                let theme = raw.trim();
                if theme.is_empty() {
                    return Err(invalid());
                }
                self.theme = theme.to_string();
            }
            SettingKey::FontSize => {
                self.font_size = raw
                    .trim()
                    .trim_end_matches("px")
                    .parse::<u32>()
                    .ok()
                    .filter(|size| *size > 0)
                    .ok_or_else(invalid)?;
            }
        }
        Ok(())
    }

    /// Display value for `key`, as shown by the settings panel.
    pub fn value_of(&self, key: SettingKey) -> String {
        match key {
            SettingKey::DarkMode => self.dark_mode.to_string(),
            SettingKey::Notifications => self.notifications.to_string(),
            SettingKey::Theme => self.theme.clone(),
            SettingKey::FontSize => format!("{}px", self.font_size),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn decode_bool(raw: &str) -> Option<bool> {
    serde_json::from_str::<bool>(raw).ok()
}

// Older writers stored the theme unquoted, which is not valid JSON.
fn decode_theme(raw: &str) -> Option<String> {
    let theme = serde_json::from_str::<String>(raw).unwrap_or_else(|_| raw.to_string());
    let trimmed = theme.trim();
    if trimmed.is_empty() || trimmed.starts_with(['"', '{', '[']) {
        return None;
    }
    Some(trimmed.to_string())
}

// Integer prefix semantics: `18.5`, `"18.5"` and `"18px"` all read as 18.
fn decode_font_size(raw: &str) -> Option<u32> {
    let size = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Number(number)) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|value| value.is_finite() && *value >= 0.0)
                .map(|value| value.trunc() as u64)
        }),
        Ok(Value::String(text)) => leading_integer(text.as_str()),
        Ok(_) => None,
        Err(_) => leading_integer(raw),
    }?;
    u32::try_from(size).ok().filter(|size| *size > 0)
}

fn leading_integer(text: &str) -> Option<u64> {
    let trimmed = text.trim_start();
    let digits = trimmed
        .find(|ch: char| !ch.is_ascii_digit())
        .map_or(trimmed, |end| &trimmed[..end]);
    digits.parse().ok()
}
