//! Terminal styling and color detection.

/// ANSI escape codes used by the text renderers.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bold for table headers.
    pub const BOLD: &str = "\x1b[1m";
    /// Gray for units left idle.
    pub const GRAY: &str = "\x1b[90m";
    /// Green for dispatched units.
    pub const GREEN: &str = "\x1b[32m";
    /// Cyan for totals.
    pub const CYAN: &str = "\x1b[36m";
    /// Yellow for correction notes.
    pub const YELLOW: &str = "\x1b[33m";
}

/// Resolved color codes, either ANSI sequences or empty strings when color
/// is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub bold: &'static str,
    pub gray: &'static str,
    pub green: &'static str,
    pub cyan: &'static str,
    pub yellow: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            bold: colors::BOLD,
            gray: colors::GRAY,
            green: colors::GREEN,
            cyan: colors::CYAN,
            yellow: colors::YELLOW,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            bold: "",
            gray: "",
            green: "",
            cyan: "",
            yellow: "",
        }
    }

    /// Pick a palette from [`supports_color`].
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

/// Check whether colored output should be used.
///
/// Respects `NO_COLOR` (https://no-color.org/) and `TERM=dumb`.
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
