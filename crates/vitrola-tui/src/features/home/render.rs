//! Home screen view.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use vitrola_core::models::{Album, format_price};

use super::state::{HomeFocus, HomeState};
use crate::common::{
    ACCENT, InputHint, MUTED, calculate_overlay_area, field_line, inner_area, render_hints,
    render_overlay_container, truncate_with_ellipsis,
};

const CARD_WIDTH: u16 = 26;
const CARD_HEIGHT: u16 = 5;
const MODAL_WIDTH: u16 = 56;
const MODAL_HEIGHT: u16 = 11;

pub fn render_home(frame: &mut Frame, state: &HomeState, spinner: &str, area: Rect) {
    let [search_area, body_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

    render_search_bar(frame, state, search_area);

    let title = match state.search_term() {
        None => "Trending".to_string(),
        Some(term) => format!("Results for \"{term}\""),
    };
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(MUTED))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(body_area);
    frame.render_widget(block, body_area);

    if state.loading {
        let text = Line::from(Span::styled(
            format!("{spinner} Loading albums..."),
            Style::default().fg(Color::Yellow),
        ));
        frame.render_widget(Paragraph::new(text), inner);
    } else if state.albums.is_empty() {
        let text = Line::from(Span::styled("No albums found", Style::default().fg(MUTED)));
        frame.render_widget(Paragraph::new(text), inner);
    } else if state.carousel_visible() {
        render_carousel(frame, state, inner);
    } else {
        render_grid(frame, state, inner);
    }

    if state.modal_visible
        && let Some(album) = state.selected_album.as_ref()
    {
        render_purchase_modal(frame, album, state.purchase_pending, spinner, area);
    }
}

fn render_search_bar(frame: &mut Frame, state: &HomeState, area: Rect) {
    let focused = state.focus == HomeFocus::Search && !state.modal_visible;
    let border = if focused { ACCENT } else { MUTED };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = if state.search_input.value.is_empty() && !focused {
        Line::from(Span::styled(
            "Press / to search albums",
            Style::default().fg(MUTED),
        ))
    } else {
        field_line(&state.search_input, focused, inner.width)
    };
    frame.render_widget(Paragraph::new(line), inner);
}

/// Single row of cards that scrolls horizontally with the cursor.
fn render_carousel(frame: &mut Frame, state: &HomeState, area: Rect) {
    let columns = columns_for(area.width);
    let first = state.cursor.saturating_sub(columns - 1);
    for (slot, (index, album)) in state
        .albums
        .iter()
        .enumerate()
        .skip(first)
        .take(columns)
        .enumerate()
    {
        let card = card_rect(area, slot, 0);
        render_card(frame, album, index == state.cursor, card);
    }
}

/// Wrapping grid that scrolls vertically to keep the cursor row visible.
fn render_grid(frame: &mut Frame, state: &HomeState, area: Rect) {
    let columns = columns_for(area.width);
    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let cursor_row = state.cursor / columns;
    let first_row = cursor_row.saturating_sub(visible_rows - 1);

    for (index, album) in state.albums.iter().enumerate() {
        let row = index / columns;
        if row < first_row || row >= first_row + visible_rows {
            continue;
        }
        let card = card_rect(area, index % columns, row - first_row);
        render_card(frame, album, index == state.cursor, card);
    }
}

fn columns_for(width: u16) -> usize {
    (width / CARD_WIDTH).max(1) as usize
}

fn card_rect(area: Rect, column: usize, row: usize) -> Rect {
    let x = area.x + column as u16 * CARD_WIDTH;
    let y = area.y + row as u16 * CARD_HEIGHT;
    let width = CARD_WIDTH.min(area.right().saturating_sub(x));
    let height = CARD_HEIGHT.min(area.bottom().saturating_sub(y));
    Rect::new(x, y, width, height)
}

fn render_card(frame: &mut Frame, album: &Album, highlighted: bool, area: Rect) {
    if area.width < 4 || area.height < 3 {
        return;
    }
    let border = if highlighted { ACCENT } else { MUTED };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let lines = vec![
        Line::from(Span::styled(
            truncate_with_ellipsis(&album.name, width),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            truncate_with_ellipsis(album.artist_name(), width),
            Style::default().fg(MUTED),
        )),
        Line::from(Span::styled(
            format_price(album.value),
            Style::default().fg(Color::Green),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_purchase_modal(
    frame: &mut Frame,
    album: &Album,
    pending: bool,
    spinner: &str,
    area: Rect,
) {
    let popup = calculate_overlay_area(area, MODAL_WIDTH, MODAL_HEIGHT);
    render_overlay_container(frame, popup, "Buy Album", ACCENT);
    let inner = inner_area(popup);
    let width = inner.width as usize;

    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<10}"), Style::default().fg(MUTED)),
            Span::styled(
                truncate_with_ellipsis(&value, width.saturating_sub(10)),
                Style::default().fg(Color::White),
            ),
        ])
    };

    let mut lines = vec![
        row("Artist", album.artist_name().to_string()),
        row("Album", album.name.clone()),
        row("Released", album.formatted_release_date()),
        row("Price", format_price(album.value)),
        Line::from(""),
    ];
    if pending {
        lines.push(Line::from(Span::styled(
            format!("{spinner} Processing purchase..."),
            Style::default().fg(Color::Yellow),
        )));
    }
    frame.render_widget(Paragraph::new(lines), inner);

    render_hints(
        frame,
        inner,
        &[InputHint::new("Enter", "buy"), InputHint::new("Esc", "close")],
        ACCENT,
    );
}
