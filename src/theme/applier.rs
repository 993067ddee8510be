//! Theme application state machine.
//!
//! # States
//! ```text
//!   Unthemed ──(config loaded, path themed)──▶ Themed(layout, mode, accent)
//!      ▲                                          │
//!      └──(loading | no config | excluded path)───┘
//!
//!   layout == wedding-videos ─────────────────▶ FixedPalette(layout)
//! ```
//!
//! Path exclusion is checked before anything else, so an excluded path is
//! `Unthemed` even for a fixed-palette layout.

use std::sync::Arc;

use serde::Serialize;

use crate::routing::matcher::{ExclusionList, PathMatcher};
use crate::tenant::store::ThemeQuery;
use crate::theme::config::{ColorMode, Layout};
use crate::theme::sink::{PresentationSink, ATTR_ACCENT_COLOR, ATTR_LAYOUT, ATTR_THEME_MODE, THEME_ATTRIBUTES};

/// Accent used when a tenant never picked one.
pub const DEFAULT_ACCENT: &str = "gold";

/// Presentation state of the document root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ThemeState {
    Unthemed,
    Themed {
        layout: Layout,
        mode: ColorMode,
        accent: String,
    },
    FixedPalette {
        layout: Layout,
    },
}

impl ThemeState {
    pub fn label(&self) -> &'static str {
        match self {
            ThemeState::Unthemed => "unthemed",
            ThemeState::Themed { .. } => "themed",
            ThemeState::FixedPalette { .. } => "fixed_palette",
        }
    }
}

/// Decides the theme for each navigation and writes it to a sink.
#[derive(Debug)]
pub struct ThemeApplier<S> {
    sink: S,
    excluded: Arc<ExclusionList>,
    default_accent: String,
    applied: Option<ThemeState>,
}

impl<S: PresentationSink> ThemeApplier<S> {
    pub fn new(sink: S, excluded: Arc<ExclusionList>) -> Self {
        Self::with_default_accent(sink, excluded, DEFAULT_ACCENT)
    }

    pub fn with_default_accent(
        sink: S,
        excluded: Arc<ExclusionList>,
        default_accent: impl Into<String>,
    ) -> Self {
        Self {
            sink,
            excluded,
            default_accent: default_accent.into(),
            applied: None,
        }
    }

    /// Pure decision, no sink writes.
    pub fn decide(&self, path: &str, query: &ThemeQuery) -> ThemeState {
        if self.excluded.matches(path) {
            return ThemeState::Unthemed;
        }

        let theme = match query.data.as_ref() {
            Some(theme) if !query.is_loading => theme,
            _ => return ThemeState::Unthemed,
        };

        let layout = theme.layout.unwrap_or_default();
        if layout.has_fixed_palette() {
            return ThemeState::FixedPalette { layout };
        }

        ThemeState::Themed {
            layout,
            mode: theme.color_mode.unwrap_or_default(),
            accent: theme
                .accent_color
                .as_deref()
                .filter(|accent| !accent.trim().is_empty())
                .unwrap_or(self.default_accent.as_str())
                .to_string(),
        }
    }

    /// Decide the state for `path` and write it. Re-applying the state that
    /// is already on the sink performs no writes.
    pub fn apply(&mut self, path: &str, query: &ThemeQuery) -> ThemeState {
        let next = self.decide(path, query);
        if self.applied.as_ref() == Some(&next) {
            return next;
        }

        tracing::debug!(
            path = %path,
            from = self.applied.as_ref().map(ThemeState::label).unwrap_or("initial"),
            to = next.label(),
            "Theme state transition"
        );

        match &next {
            ThemeState::Unthemed => {
                for name in THEME_ATTRIBUTES {
                    self.sink.clear_attribute(name);
                }
            }
            ThemeState::Themed { layout, mode, accent } => {
                self.sink.set_attribute(ATTR_LAYOUT, layout.as_str());
                self.sink.set_attribute(ATTR_THEME_MODE, mode.as_str());
                self.sink.set_attribute(ATTR_ACCENT_COLOR, accent);
            }
            ThemeState::FixedPalette { layout } => {
                self.sink.set_attribute(ATTR_LAYOUT, layout.as_str());
                self.sink.clear_attribute(ATTR_THEME_MODE);
                self.sink.clear_attribute(ATTR_ACCENT_COLOR);
            }
        }

        self.applied = Some(next.clone());
        next
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
