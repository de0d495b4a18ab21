//! Colors shared by the gallery (ratatui styles) and plain CLI output
//! (SGR escapes). `NO_COLOR` or a non-terminal stdout turn colors off.

use ratatui::style::{Color, Modifier, Style};

/// Colors used across the gallery and CLI output.
#[derive(Debug, Clone)]
pub struct Theme {
    pub text_primary: Color,
    /// Hints, counters, empty states.
    pub text_secondary: Color,
    /// Selection, key names, table headers.
    pub accent: Color,
    pub error: Color,
    pub success: Color,
    /// Whether the `*_text` helpers emit escapes.
    pub ansi: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text_primary: Color::Gray,
            text_secondary: Color::DarkGray,
            accent: Color::Green,
            error: Color::Red,
            success: Color::Green,
            ansi: true,
        }
    }
}

impl Theme {
    /// No colors at all (`NO_COLOR`, pipes).
    pub fn plain() -> Self {
        Self {
            text_primary: Color::Reset,
            text_secondary: Color::Reset,
            accent: Color::Reset,
            error: Color::Reset,
            success: Color::Reset,
            ansi: false,
        }
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Style for bold accented text (keybindings, selection).
    pub fn accent_bold_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn accent_text(&self, text: &str) -> String {
        self.paint(self.accent, text)
    }

    pub fn primary_text(&self, text: &str) -> String {
        self.paint(self.text_primary, text)
    }

    pub fn secondary_text(&self, text: &str) -> String {
        self.paint(self.text_secondary, text)
    }

    pub fn error_text(&self, text: &str) -> String {
        self.paint(self.error, text)
    }

    pub fn success_text(&self, text: &str) -> String {
        self.paint(self.success, text)
    }

    fn paint(&self, color: Color, text: &str) -> String {
        match sgr_foreground(color) {
            Some(code) if self.ansi => format!("\x1b[{code}m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    }
}

/// SGR parameters selecting `color` as the foreground.
fn sgr_foreground(color: Color) -> Option<String> {
    let basic = match color {
        Color::Reset => return None,
        Color::Black => 30,
        Color::Red => 31,
        Color::Green => 32,
        Color::Yellow => 33,
        Color::Blue => 34,
        Color::Magenta => 35,
        Color::Cyan => 36,
        Color::Gray => 37,
        Color::DarkGray => 90,
        Color::LightRed => 91,
        Color::LightGreen => 92,
        Color::LightYellow => 93,
        Color::LightBlue => 94,
        Color::LightMagenta => 95,
        Color::LightCyan => 96,
        Color::White => 97,
        Color::Indexed(i) => return Some(format!("38;5;{i}")),
        Color::Rgb(r, g, b) => return Some(format!("38;2;{r};{g};{b}")),
    };
    Some(basic.to_string())
}

/// Whether stdout should get colored output.
pub fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
}

/// Theme for the current environment.
pub fn current_theme() -> Theme {
    if colors_enabled() {
        Theme::default()
    } else {
        Theme::plain()
    }
}
