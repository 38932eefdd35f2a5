//! Theme names and the ambient color-mode collaborator.

/// Built-in diagram themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    /// Engine default theme.
    #[default]
    Default,
    Base,
    Dark,
    Forest,
    Neutral,
}

impl Theme {
    /// Parse a theme name.
    ///
    /// Returns `None` for anything outside the fixed set.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "default" => Some(Self::Default),
            "base" => Some(Self::Base),
            "dark" => Some(Self::Dark),
            "forest" => Some(Self::Forest),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }

    /// Return the theme name as the engine expects it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Base => "base",
            Self::Dark => "dark",
            Self::Forest => "forest",
            Self::Neutral => "neutral",
        }
    }
}

/// Resolved ambient color mode of the surrounding document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    /// Theme used when the caller gives no explicit theme.
    #[must_use]
    pub fn default_theme(self) -> Theme {
        match self {
            Self::Dark => Theme::Dark,
            Self::Light => Theme::Default,
        }
    }
}

/// Ambient color-mode provider.
///
/// Implemented by the host's theme system. The renderer reads the resolved
/// mode once per render attempt; when no provider is available, callers
/// fall back to [`ColorMode::Light`].
pub trait ColorScheme: Send + Sync {
    /// Currently resolved color mode.
    fn resolved_mode(&self) -> ColorMode;
}
