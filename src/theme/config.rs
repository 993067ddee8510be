//! Tenant theme records.
//!
//! A `ThemeConfig` is owned by the tenant and edited from the photographer's
//! site settings. This crate only ever reads it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Site layout variant. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    #[default]
    Classic,
    Sidebar,
    Wedding,
    WeddingVideos,
    Editorial,
    Cinematic,
}

impl Layout {
    pub const ALL: [Layout; 6] = [
        Layout::Classic,
        Layout::Sidebar,
        Layout::Wedding,
        Layout::WeddingVideos,
        Layout::Editorial,
        Layout::Cinematic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Classic => "classic",
            Layout::Sidebar => "sidebar",
            Layout::Wedding => "wedding",
            Layout::WeddingVideos => "wedding-videos",
            Layout::Editorial => "editorial",
            Layout::Cinematic => "cinematic",
        }
    }

    /// Layouts that ship their own palette ignore mode and accent.
    pub fn has_fixed_palette(&self) -> bool {
        matches!(self, Layout::WeddingVideos)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown layout '{0}'")]
pub struct UnknownLayout(pub String);

impl FromStr for Layout {
    type Err = UnknownLayout;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Layout::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| UnknownLayout(s.to_string()))
    }
}

/// Light or dark color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored theme for one tenant. Any field may be unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub layout: Option<Layout>,
    pub color_mode: Option<ColorMode>,
    pub accent_color: Option<String>,
}

impl ThemeConfig {
    pub fn new(layout: Layout, color_mode: ColorMode, accent_color: impl Into<String>) -> Self {
        Self {
            layout: Some(layout),
            color_mode: Some(color_mode),
            accent_color: Some(accent_color.into()),
        }
    }

    pub fn with_layout(layout: Layout) -> Self {
        Self {
            layout: Some(layout),
            ..Self::default()
        }
    }
}
