//! Light and dark color themes.

use crossterm::style::{Color, Stylize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Colors used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub foreground: Color,
    /// Headings, clock hands and the digital time.
    pub accent: Color,
    /// Secondary text: descriptions, hints, dial marks.
    pub muted: Color,
    pub background: Color,
}

impl Theme {
    pub fn from_dark_mode(is_dark_mode: bool) -> Self {
        if is_dark_mode { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse `dark` or `light`, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                foreground: Color::Black,
                accent: Color::DarkBlue,
                muted: Color::DarkGrey,
                background: Color::White,
            },
            Theme::Dark => Palette {
                foreground: Color::White,
                accent: Color::Cyan,
                muted: Color::Grey,
                background: Color::Black,
            },
        }
    }
}

/// `text` in `color`, or unchanged when color output is off.
pub fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        text.with(color).to_string()
    } else {
        text.to_string()
    }
}
