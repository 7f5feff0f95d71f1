//! Display theme and the colors it selects
//!
//! Particle colors are baked in at creation, so a theme change means
//! regenerating the whole field.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::particle::{Rgb, Rgba};

/// Color constants for both themes
pub mod colors {
    use crate::particle::Rgb;

    /// Star colors on a dark background: near-white tones
    pub const DARK_PALETTE: [Rgb; 5] = [
        Rgb::new(0xff, 0xff, 0xff), // white
        Rgb::new(0xff, 0xfa, 0xfa), // snow
        Rgb::new(0xf8, 0xf8, 0xff), // ghost white
        Rgb::new(0xe6, 0xe6, 0xfa), // lavender
        Rgb::new(0xb0, 0xc4, 0xde), // light steel blue
    ];

    /// Star colors on a light background: muted grays
    pub const LIGHT_PALETTE: [Rgb; 5] = [
        Rgb::new(0x4a, 0x4a, 0x4a),
        Rgb::new(0x5a, 0x5a, 0x5a),
        Rgb::new(0x6a, 0x6a, 0x6a),
        Rgb::new(0x7a, 0x7a, 0x7a),
        Rgb::new(0x8a, 0x8a, 0x8a),
    ];

    /// Connection line base colors
    pub const DARK_CONNECTION: Rgb = Rgb::new(100, 100, 255);
    pub const LIGHT_CONNECTION: Rgb = Rgb::new(100, 100, 200);

    /// Page background (black / gray-50)
    pub const DARK_BACKGROUND: Rgb = Rgb::new(0x00, 0x00, 0x00);
    pub const LIGHT_BACKGROUND: Rgb = Rgb::new(0xf9, 0xfa, 0xfb);
}

/// Display theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Returned by strict theme parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown theme '{0}' (expected 'light' or 'dark')")]
pub struct UnknownTheme(pub String);

impl Theme {
    /// Lenient resolution of a host theme name
    ///
    /// Only `"dark"` selects the dark palette; `"light"`, `"system"` and
    /// anything unrecognized fall back to light.
    pub fn resolve(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("dark") {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// The 5-entry star palette for this theme
    pub fn palette(&self) -> &'static [Rgb; 5] {
        match self {
            Theme::Dark => &colors::DARK_PALETTE,
            Theme::Light => &colors::LIGHT_PALETTE,
        }
    }

    /// Stroke color for a connection with the given strength in [0, 1]
    pub fn connection_color(&self, strength: f64) -> Rgba {
        match self {
            Theme::Dark => colors::DARK_CONNECTION.with_alpha(strength * 0.2),
            Theme::Light => colors::LIGHT_CONNECTION.with_alpha(strength * 0.1),
        }
    }

    /// Surface background color
    pub fn background(&self) -> Rgb {
        match self {
            Theme::Dark => colors::DARK_BACKGROUND,
            Theme::Light => colors::LIGHT_BACKGROUND,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(UnknownTheme(s.to_string())),
        }
    }
}
