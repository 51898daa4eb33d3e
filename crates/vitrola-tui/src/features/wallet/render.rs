//! Wallet screen view.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use vitrola_core::models::format_price;

use super::WalletState;
use crate::common::{ACCENT, MUTED, field_line};

pub fn render_wallet(frame: &mut Frame, state: &WalletState, spinner: &str, area: Rect) {
    let [info_area, credit_area, _] = Layout::vertical([
        Constraint::Length(6),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .areas(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MUTED))
        .title(" Wallet ");
    let inner = block.inner(info_area);
    frame.render_widget(block, info_area);

    let lines = match state.wallet.as_ref() {
        None if state.loading => vec![Line::from(Span::styled(
            format!("{spinner} Loading wallet..."),
            Style::default().fg(Color::Yellow),
        ))],
        None => vec![Line::from(Span::styled(
            "Wallet unavailable. Press r to retry.",
            Style::default().fg(MUTED),
        ))],
        Some(wallet) => {
            let mut lines = vec![
                row("Balance", format_price(wallet.balance), Color::Green),
                row("Points", wallet.points.to_string(), Color::White),
            ];
            if let Some(updated) = wallet.formatted_last_update() {
                lines.push(row("Updated", updated, MUTED));
            }
            lines
        }
    };
    frame.render_widget(Paragraph::new(lines), inner);

    let border = if state.editing { ACCENT } else { MUTED };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Add credit ");
    let inner = block.inner(credit_area);
    frame.render_widget(block, credit_area);

    let line = if state.editing || !state.credit_input.value.is_empty() {
        field_line(&state.credit_input, state.editing, inner.width)
    } else {
        Line::from(Span::styled("Press a to add credit", Style::default().fg(MUTED)))
    };
    frame.render_widget(Paragraph::new(line), inner);
}

fn row(label: &'static str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<10}"), Style::default().fg(MUTED)),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}
