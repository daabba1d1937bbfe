//! Status line and footer rendering for the viewer
//!
//! The status line carries the last action's outcome (or a mode prompt); the
//! footer lists the keys that work in the current mode.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{current_theme, Theme};

/// How a status message should be colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Info,
    Success,
    Error,
}

/// Render a status line with the given text.
pub fn render_status_line(frame: &mut Frame, area: Rect, text: &str, kind: StatusKind) {
    let theme = current_theme();
    let style = match kind {
        StatusKind::Info => theme.text_secondary_style(),
        StatusKind::Success => theme.success_style(),
        StatusKind::Error => theme.error_style(),
    };
    frame.render_widget(Paragraph::new(text.to_string()).style(style), area);
}

/// Render a centered footer with keybinding hints.
///
/// Example: `&[("q", "quit"), ("?", "help")]` renders as `"q: quit | ?: help"`.
pub fn render_footer(frame: &mut Frame, area: Rect, keys: &[(&str, &str)]) {
    let theme = current_theme();
    let footer = Paragraph::new(Line::from(build_footer_spans(keys, &theme)))
        .style(theme.text_secondary_style())
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

/// Keys in the accent color, descriptions dimmed, entries separated by " | ".
fn build_footer_spans(keys: &[(&str, &str)], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(keys.len() * 3);
    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(theme.text_secondary)));
        }
        spans.push(Span::styled(key.to_string(), theme.accent_style()));
        spans.push(Span::styled(
            format!(": {}", desc),
            theme.text_secondary_style(),
        ));
    }
    spans
}
