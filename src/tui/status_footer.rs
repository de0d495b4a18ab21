//! Status line and footer rendering for the gallery
//!
//! The status bar shows library info or mode prompts, the footer shows
//! keybinding hints.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{current_theme, Theme};

/// Render a status line in the secondary text color.
pub fn render_status_line(frame: &mut Frame, area: Rect, text: &str) {
    let theme = current_theme();
    let status = Paragraph::new(text.to_string()).style(theme.text_secondary_style());
    frame.render_widget(status, area);
}

/// Render a centered footer from `(key, description)` pairs.
///
/// `&[("q", "quit"), ("?", "help")]` renders as `"q: quit | ?: help"`.
pub fn render_footer(frame: &mut Frame, area: Rect, keys: &[(&str, &str)]) {
    let theme = current_theme();
    let footer = Paragraph::new(Line::from(build_footer_spans(keys, &theme)))
        .style(theme.text_secondary_style())
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

/// Keys in the accent color, descriptions dimmed, joined by " | ".
fn build_footer_spans(keys: &[(&str, &str)], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(keys.len() * 3);
    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ".to_string(), theme.text_secondary_style()));
        }
        spans.push(Span::styled(key.to_string(), Style::default().fg(theme.accent)));
        spans.push(Span::styled(format!(": {desc}"), theme.text_secondary_style()));
    }
    spans
}

/// Render a centered footer from already composed text.
pub fn render_footer_text(frame: &mut Frame, area: Rect, text: &str) {
    let theme = current_theme();
    let footer = Paragraph::new(text.to_string())
        .style(theme.text_secondary_style())
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
