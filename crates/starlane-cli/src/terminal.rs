//! Terminal styling and color utilities.
//!
//! ANSI escape code definitions and color detection for the text renderers.

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bright bold white for star names.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for secondary elements.
    pub const GRAY: &str = "\x1b[90m";
    /// Green for ready routes and completed trips.
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow for advisory outcomes.
    pub const YELLOW: &str = "\x1b[33m";
    /// Red for failures and dangerous stars.
    pub const RED: &str = "\x1b[31m";
    /// Cyan for distances and fuel.
    pub const CYAN: &str = "\x1b[36m";
}

/// Resolved color codes, either ANSI sequences or empty strings when color
/// is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub name: &'static str,
    pub muted: &'static str,
    pub ok: &'static str,
    pub warn: &'static str,
    pub danger: &'static str,
    pub value: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            name: colors::WHITE_BOLD,
            muted: colors::GRAY,
            ok: colors::GREEN,
            warn: colors::YELLOW,
            danger: colors::RED,
            value: colors::CYAN,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            name: "",
            muted: "",
            ok: "",
            warn: "",
            danger: "",
            value: "",
        }
    }

    /// Palette for the current terminal.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// Respects the `NO_COLOR` environment variable (https://no-color.org/) and
/// the `TERM=dumb` convention.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}
