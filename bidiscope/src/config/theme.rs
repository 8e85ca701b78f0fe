use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use terminal_colorsaurus::QueryOptions;

/// General theme
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    pub text: TextTheme,
    pub term_fg: Color,
    pub term_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        let terminal_palette = terminal_colorsaurus::color_palette(QueryOptions::default()).ok();

        let (term_fg, term_bg) = if let Some(palette) = terminal_palette {
            let fg = palette.foreground.scale_to_8bit();
            let bg = palette.background.scale_to_8bit();
            (Color::Rgb(fg.0, fg.1, fg.2), Color::Rgb(bg.0, bg.1, bg.2))
        } else {
            (Color::Rgb(255, 255, 255), Color::Rgb(0, 0, 0))
        };

        Self {
            text: TextTheme::default(),
            term_fg,
            term_bg,
        }
    }
}

/// Text color theme
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TextTheme {
    /// Left-to-right segments
    pub ltr: Color,
    /// Right-to-left segments
    pub rtl: Color,
    /// Neutral or unprocessed characters
    pub neutral: Color,
    /// Selection and playhead highlight
    pub highlight: Color,
    /// Rewritten chunk types and error messages
    pub error: Color,
}

impl Default for TextTheme {
    fn default() -> Self {
        Self {
            ltr: Color::Green,
            rtl: Color::Magenta,
            neutral: Color::DarkGray,
            highlight: Color::Blue,
            error: Color::Red,
        }
    }
}
