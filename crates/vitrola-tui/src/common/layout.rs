//! Shared drawing helpers: overlays, hint bars, and text fields.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::input::TextField;
use super::text::truncate_with_ellipsis;

pub const ACCENT: Color = Color::Cyan;
pub const MUTED: Color = Color::DarkGray;

/// Centers a `width`x`height` box inside `area`, clamped to fit.
pub fn calculate_overlay_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));

    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Clears the background and draws a bordered, titled box.
pub fn render_overlay_container(frame: &mut Frame, area: Rect, title: &str, border_color: Color) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, area);
}

/// Area inside a bordered box with a one-column side padding.
pub fn inner_area(area: Rect) -> Rect {
    Rect::new(
        area.x + 2,
        area.y + 1,
        area.width.saturating_sub(4),
        area.height.saturating_sub(2),
    )
}

/// A keyboard hint like `Enter buy`.
pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// Renders hints centered on the last row of `area`.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint], highlight_color: Color) {
    if area.height == 0 {
        return;
    }
    let hints_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
    let para = Paragraph::new(hint_line(hints, highlight_color)).alignment(Alignment::Center);
    frame.render_widget(para, hints_area);
}

pub fn hint_line(hints: &[InputHint], highlight_color: Color) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(MUTED)));
        }
        spans.push(Span::styled(
            hint.key.to_string(),
            Style::default().fg(highlight_color),
        ));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(MUTED),
        ));
    }
    Line::from(spans)
}

/// One form row: `Label: value█` with the cursor only when focused.
pub fn field_line(field: &TextField, focused: bool, width: u16) -> Line<'static> {
    let label = format!("{:>10}: ", field.label);
    let max_value = (width as usize).saturating_sub(label.chars().count() + 1);
    let value = truncate_with_ellipsis(&field.display(), max_value);

    let label_style = if focused {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    };

    let mut spans = vec![
        Span::styled(label, label_style),
        Span::styled(value, Style::default().fg(Color::White)),
    ];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(ACCENT)));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = calculate_overlay_area(area, 50, 10);
        assert_eq!(popup, Rect::new(25, 15, 50, 10));

        let tiny = Rect::new(0, 0, 20, 6);
        let popup = calculate_overlay_area(tiny, 50, 10);
        assert_eq!(popup.width, 16);
        assert_eq!(popup.height, 4);
    }

    #[test]
    fn test_field_line_masks_password() {
        let mut field = TextField::masked("Password");
        field.value = "secret".into();
        let line = field_line(&field, false, 40);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("••••••"));
        assert!(!text.contains("secret"));
    }
}
