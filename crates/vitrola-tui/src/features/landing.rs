//! Landing screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::common::{ACCENT, InputHint, hint_line};
use crate::routes::Route;
use crate::state::{ScreenUpdate, TuiState};

const HEADLINE: &str = "The history of music must not be forgotten!";
const TAGLINE: &str = "Create your account and enjoy the hits that defined every era, on vinyl.";

pub fn handle_key(tui: &TuiState, key: KeyEvent) -> ScreenUpdate {
    match key.code {
        KeyCode::Char('l') => ScreenUpdate::navigate(Route::Login),
        KeyCode::Char('s') | KeyCode::Enter => ScreenUpdate::navigate(Route::Signup),
        KeyCode::Char('h') if tui.auth.is_authenticated => ScreenUpdate::navigate(Route::Home),
        KeyCode::Char('q') | KeyCode::Esc => ScreenUpdate::quit(),
        _ => ScreenUpdate::stay(),
    }
}

pub fn render_landing(frame: &mut Frame, tui: &TuiState, area: Rect) {
    let [_, body, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(7),
        Constraint::Fill(1),
    ])
    .areas(area);

    let mut hints = vec![InputHint::new("l", "sign in"), InputHint::new("s", "sign up")];
    if tui.auth.is_authenticated {
        hints.push(InputHint::new("h", "home"));
    }
    hints.push(InputHint::new("q", "quit"));

    let lines = vec![
        Line::from(Span::styled(
            HEADLINE,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(TAGLINE, Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(""),
        hint_line(&hints, ACCENT),
    ];
    let para = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(para, body);
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::state::ScreenTransition;
    use crate::state::test_support::{signed_in, signed_out};

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_home_shortcut_needs_a_user() {
        let app = signed_out(Route::Landing);
        assert_eq!(handle_key(&app.tui, key('h')).transition, ScreenTransition::Stay);

        let app = signed_in(Route::Landing);
        assert_eq!(
            handle_key(&app.tui, key('h')).transition,
            ScreenTransition::Navigate(Route::Home)
        );
    }

    #[test]
    fn test_auth_shortcuts() {
        let app = signed_out(Route::Landing);
        assert_eq!(
            handle_key(&app.tui, key('l')).transition,
            ScreenTransition::Navigate(Route::Login)
        );
        assert_eq!(
            handle_key(&app.tui, key('s')).transition,
            ScreenTransition::Navigate(Route::Signup)
        );
    }
}
