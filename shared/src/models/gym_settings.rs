//! Gym Settings Model (singleton)

use serde::{Deserialize, Serialize};

pub const DEFAULT_GYM_NAME: &str = "نادي جليدة الرياضي";
pub const DEFAULT_OPENING_TIME: &str = "06:00";
pub const DEFAULT_CLOSING_TIME: &str = "23:00";
pub const DEFAULT_GRADIENT_FROM: &str = "#1e3a8a";
pub const DEFAULT_GRADIENT_TO: &str = "#581c87";

/// Site-wide branding, hours and appearance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct GymSettings {
    pub name: String,
    /// Embedded logo image, empty when unset
    pub logo: String,
    /// HH:MM, 24h, zero-padded
    pub opening_time: String,
    /// HH:MM, 24h, zero-padded
    pub closing_time: String,
    pub gradient_from: String,
    pub gradient_to: String,
    /// Embedded background image, empty when unset
    pub background_image: String,
}

impl Default for GymSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_GYM_NAME.to_string(),
            logo: String::new(),
            opening_time: DEFAULT_OPENING_TIME.to_string(),
            closing_time: DEFAULT_CLOSING_TIME.to_string(),
            gradient_from: DEFAULT_GRADIENT_FROM.to_string(),
            gradient_to: DEFAULT_GRADIENT_TO.to_string(),
            background_image: String::new(),
        }
    }
}

/// Resolved page background
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Background<'a> {
    Image { src: &'a str },
    Gradient { from: &'a str, to: &'a str },
}

impl GymSettings {
    /// A background image, when set, replaces the gradient entirely
    pub fn background(&self) -> Background<'_> {
        if self.background_image.is_empty() {
            Background::Gradient {
                from: &self.gradient_from,
                to: &self.gradient_to,
            }
        } else {
            Background::Image {
                src: &self.background_image,
            }
        }
    }

    /// Apply a partial update; times are normalized to HH:MM
    pub fn apply(&mut self, update: GymSettingsUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(logo) = update.logo {
            self.logo = logo;
        }
        if let Some(opening) = update.opening_time {
            self.opening_time = normalize_time(&opening);
        }
        if let Some(closing) = update.closing_time {
            self.closing_time = normalize_time(&closing);
        }
        if let Some(from) = update.gradient_from {
            self.gradient_from = from;
        }
        if let Some(to) = update.gradient_to {
            self.gradient_to = to;
        }
        if let Some(bg) = update.background_image {
            self.background_image = bg;
        }
    }
}

/// Update settings payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GymSettingsUpdate {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
    pub gradient_from: Option<String>,
    pub gradient_to: Option<String>,
    pub background_image: Option<String>,
}

/// Persisted time format: `:00` is appended when there is no colon, then the
/// value is left-padded with zeros to 5 characters.
pub fn normalize_time(raw: &str) -> String {
    let raw = raw.trim();
    let with_minutes = if raw.contains(':') {
        raw.to_string()
    } else {
        format!("{}:00", raw)
    };
    format!("{:0>5}", with_minutes)
}
