//! Login and signup views.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{LoginState, SignupState};
use crate::common::{
    ACCENT, Form, InputHint, MUTED, calculate_overlay_area, field_line, inner_area,
    render_hints, render_overlay_container,
};

const CARD_WIDTH: u16 = 50;

pub fn render_login(
    frame: &mut Frame,
    state: &LoginState,
    visible: bool,
    busy: Option<&str>,
    area: Rect,
) {
    if !visible {
        return;
    }
    render_form_card(
        frame,
        "Sign in to your account",
        &state.form,
        busy,
        &[
            InputHint::new("Enter", "sign in"),
            InputHint::new("Tab", "next"),
            InputHint::new("Ctrl+N", "sign up"),
            InputHint::new("Esc", "back"),
        ],
        area,
    );
}

pub fn render_signup(frame: &mut Frame, state: &SignupState, busy: Option<&str>, area: Rect) {
    render_form_card(
        frame,
        "Create account",
        &state.form,
        busy,
        &[
            InputHint::new("Enter", "sign up"),
            InputHint::new("Tab", "next"),
            InputHint::new("Ctrl+L", "sign in"),
            InputHint::new("Esc", "back"),
        ],
        area,
    );
}

/// `busy` holds the status line shown while a request is in flight.
fn render_form_card(
    frame: &mut Frame,
    title: &str,
    form: &Form,
    busy: Option<&str>,
    hints: &[InputHint],
    area: Rect,
) {
    let height = form.fields.len() as u16 * 2 + 5;
    let popup = calculate_overlay_area(area, CARD_WIDTH, height);
    render_overlay_container(frame, popup, title, ACCENT);
    let inner = inner_area(popup);

    let mut lines = vec![Line::from("")];
    for (index, field) in form.fields.iter().enumerate() {
        lines.push(field_line(field, busy.is_none() && index == form.focus, inner.width));
        lines.push(Line::from(""));
    }
    if let Some(status) = busy {
        lines.push(Line::from(Span::styled(
            status.to_string(),
            Style::default().fg(Color::Yellow),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "All fields are required",
            Style::default().fg(MUTED),
        )));
    }
    frame.render_widget(Paragraph::new(lines), inner);
    render_hints(frame, inner, hints, ACCENT);
}
