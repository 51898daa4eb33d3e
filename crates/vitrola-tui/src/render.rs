//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::common::{ACCENT, InputHint, MUTED, ToastKind, hint_line, truncate_with_ellipsis};
use crate::routes::Route;
use crate::state::{AppState, Screen, TuiState};
use crate::{collection, home, landing, login, not_found, wallet};

/// Spinner frames for loading indicators.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];
const SPINNER_SPEED_DIVISOR: usize = 6;

const HEADER_HEIGHT: u16 = 1;
const FOOTER_HEIGHT: u16 = 1;
const TOAST_WIDTH: u16 = 44;
const MENU_WIDTH: u16 = 24;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let tui = &app.tui;
    let spinner = spinner(tui);

    let [header, body, footer] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .areas(area);

    render_header(frame, tui, header);

    let body = Rect::new(
        body.x + 1,
        body.y,
        body.width.saturating_sub(2),
        body.height,
    );
    match &app.screen {
        Screen::Pending => render_pending(frame, spinner, body),
        Screen::Landing => landing::render_landing(frame, tui, body),
        Screen::Login(state) => {
            let busy = tui
                .tasks
                .login
                .is_running()
                .then(|| format!("{spinner} Signing in..."));
            if !login::login_form_visible(tui) && tui.auth.is_authenticated {
                render_notice(frame, "You are already signed in.", body);
            }
            login::render_login(
                frame,
                state,
                login::login_form_visible(tui),
                busy.as_deref(),
                body,
            );
        }
        Screen::Signup(state) => {
            let busy = tui
                .tasks
                .signup
                .is_running()
                .then(|| format!("{spinner} Creating account..."));
            login::render_signup(frame, state, busy.as_deref(), body);
        }
        Screen::Home(state) => home::render_home(frame, state, spinner, body),
        Screen::Collection(state) => collection::render_collection(frame, state, spinner, body),
        Screen::Wallet(state) => wallet::render_wallet(frame, state, spinner, body),
        Screen::NotFound => not_found::render_not_found(frame, tui, body),
    }

    render_footer(frame, app, footer);

    if tui.user_menu_open {
        render_user_menu(frame, tui, area);
    }
    render_toasts(frame, tui, area);
}

fn spinner(tui: &TuiState) -> &'static str {
    SPINNER_FRAMES[(tui.spinner_frame / SPINNER_SPEED_DIVISOR) % SPINNER_FRAMES.len()]
}

fn render_header(frame: &mut Frame, tui: &TuiState, area: Rect) {
    let mut spans = vec![Span::styled(
        " ♪ Vitrola ",
        Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD),
    )];

    if tui.auth.is_authenticated {
        for (key, label, route) in [
            ("h", "Home", Route::Home),
            ("c", "My collection", Route::Collection),
            ("w", "Wallet", Route::Wallet),
        ] {
            let style = if tui.route == route {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(MUTED)
            };
            spans.push(Span::raw("  "));
            spans.push(Span::styled(key, Style::default().fg(ACCENT)));
            spans.push(Span::styled(format!(" {label}"), style));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    if tui.auth.is_authenticated {
        let name = truncate_with_ellipsis(&tui.auth.user.name, 20);
        let marker = if tui.user_menu_open { "▴" } else { "▾" };
        let user = Line::from(vec![
            Span::styled("u ", Style::default().fg(ACCENT)),
            Span::styled(format!("{name} {marker} "), Style::default().fg(Color::White)),
        ]);
        frame.render_widget(Paragraph::new(user).alignment(Alignment::Right), area);
    }
}

fn render_pending(frame: &mut Frame, spinner: &str, area: Rect) {
    let line = Line::from(Span::styled(
        format!("{spinner} Loading session..."),
        Style::default().fg(MUTED),
    ));
    let y = area.y + area.height / 2;
    frame.render_widget(
        Paragraph::new(line).alignment(Alignment::Center),
        Rect::new(area.x, y, area.width, area.height.min(1)),
    );
}

fn render_notice(frame: &mut Frame, message: &str, area: Rect) {
    let y = area.y + area.height / 2;
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(MUTED),
        )))
        .alignment(Alignment::Center),
        Rect::new(area.x, y, area.width, area.height.min(1)),
    );
}

fn footer_hints(app: &AppState) -> Vec<InputHint<'static>> {
    let mut hints = match &app.screen {
        Screen::Home(state) if state.modal_visible => vec![],
        Screen::Home(state) if home::captures_text(state) => vec![
            InputHint::new("Enter", "search"),
            InputHint::new("Esc", "back to albums"),
        ],
        Screen::Home(_) => vec![
            InputHint::new("←→", "move"),
            InputHint::new("Enter", "details"),
            InputHint::new("/", "search"),
        ],
        Screen::Collection(_) => vec![
            InputHint::new("↑↓", "move"),
            InputHint::new("d", "remove"),
            InputHint::new("r", "refresh"),
        ],
        Screen::Wallet(state) if state.editing => vec![
            InputHint::new("Enter", "add credit"),
            InputHint::new("Esc", "cancel"),
        ],
        Screen::Wallet(_) => vec![InputHint::new("a", "add credit"), InputHint::new("r", "refresh")],
        _ => vec![],
    };
    if matches!(
        app.screen,
        Screen::Home(_) | Screen::Collection(_) | Screen::Wallet(_)
    ) {
        hints.push(InputHint::new("u", "account"));
    }
    hints.push(InputHint::new("Ctrl+C", "quit"));
    hints
}

fn render_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    let line = hint_line(&footer_hints(app), ACCENT);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_user_menu(frame: &mut Frame, tui: &TuiState, area: Rect) {
    let height: u16 = 6;
    let width = MENU_WIDTH.min(area.width);
    let menu = Rect::new(
        area.right().saturating_sub(width),
        area.y + HEADER_HEIGHT,
        width,
        height.min(area.height.saturating_sub(HEADER_HEIGHT)),
    );
    frame.render_widget(Clear, menu);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(format!(" {} ", truncate_with_ellipsis(&tui.auth.user.email, 18)));
    let inner = block.inner(menu);
    frame.render_widget(block, menu);

    let item = |key: &'static str, label: &'static str| {
        Line::from(vec![
            Span::styled(key, Style::default().fg(ACCENT)),
            Span::styled(format!(" {label}"), Style::default().fg(Color::White)),
        ])
    };
    let lines = vec![
        item("c", "My collection"),
        item("w", "Wallet"),
        item("l", "Logout"),
        Line::from(Span::styled("any key closes", Style::default().fg(MUTED))),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Stacks toasts in the top-right corner, newest at the bottom.
fn render_toasts(frame: &mut Frame, tui: &TuiState, area: Rect) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.right().saturating_sub(width + 1);
    let mut y = area.y + HEADER_HEIGHT;

    for toast in tui.toasts.iter() {
        let (color, icon) = match toast.kind {
            ToastKind::Success => (Color::Green, "✓"),
            ToastKind::Error => (Color::Red, "✗"),
        };
        let text_width = width.saturating_sub(4).max(1);
        let chars = u16::try_from(toast.message.chars().count()).unwrap_or(u16::MAX);
        let lines = chars.saturating_add(2).div_ceil(text_width).max(1);
        let height = lines.saturating_add(2);
        if y.saturating_add(height) > area.bottom() {
            break;
        }
        let rect = Rect::new(x, y, width, height);
        frame.render_widget(Clear, rect);
        let para = Paragraph::new(Line::from(vec![
            Span::styled(format!("{icon} "), Style::default().fg(color)),
            Span::styled(toast.message.clone(), Style::default().fg(Color::White)),
        ]))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
        frame.render_widget(para, rect);
        y += height;
    }
}
