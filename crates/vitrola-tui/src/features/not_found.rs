//! Fallback screen for unknown routes.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::{ACCENT, InputHint, MUTED, hint_line};
use crate::routes::Route;
use crate::state::{ScreenUpdate, TuiState};

/// Signed-in users go back home, everyone else to the landing screen.
fn fallback(tui: &TuiState) -> Route {
    if tui.auth.is_authenticated {
        Route::Home
    } else {
        Route::Landing
    }
}

pub fn handle_key(tui: &TuiState, key: KeyEvent) -> ScreenUpdate {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => ScreenUpdate::navigate(fallback(tui)),
        KeyCode::Char('q') => ScreenUpdate::quit(),
        _ => ScreenUpdate::stay(),
    }
}

pub fn render_not_found(frame: &mut Frame, tui: &TuiState, area: Rect) {
    let [_, body, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Fill(1),
    ])
    .areas(area);

    let target = if tui.auth.is_authenticated { "home" } else { "back" };
    let lines = vec![
        Line::from(Span::styled(
            "404",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("Page not found", Style::default().fg(Color::White))),
        Line::from(Span::styled(tui.route.path().to_string(), Style::default().fg(MUTED))),
        Line::from(""),
        hint_line(&[InputHint::new("Enter", target), InputHint::new("q", "quit")], ACCENT),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), body);
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::state::ScreenTransition;
    use crate::state::test_support::{signed_in, signed_out};

    #[test]
    fn test_enter_leaves_to_fallback() {
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        let route = Route::parse("/nope");

        let app = signed_out(route.clone());
        assert_eq!(
            handle_key(&app.tui, enter).transition,
            ScreenTransition::Navigate(Route::Landing)
        );

        let app = signed_in(route);
        assert_eq!(
            handle_key(&app.tui, enter).transition,
            ScreenTransition::Navigate(Route::Home)
        );
    }
}
