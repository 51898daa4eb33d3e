//! Collection screen view.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use vitrola_core::models::format_price;

use super::CollectionState;
use crate::common::{ACCENT, MUTED, truncate_with_ellipsis};

pub fn render_collection(frame: &mut Frame, state: &CollectionState, spinner: &str, area: Rect) {
    let [summary_area, list_area] =
        Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).areas(area);

    render_summary(frame, state, summary_area);

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(MUTED))
        .title(" My collection ");
    let inner = block.inner(list_area);
    frame.render_widget(block, list_area);

    if state.loading && state.albums.is_empty() {
        let line = Line::from(Span::styled(
            format!("{spinner} Loading collection..."),
            Style::default().fg(Color::Yellow),
        ));
        frame.render_widget(Paragraph::new(line), inner);
        return;
    }
    if state.albums.is_empty() {
        let line = Line::from(Span::styled("No albums found", Style::default().fg(MUTED)));
        frame.render_widget(Paragraph::new(line), inner);
        return;
    }

    let width = inner.width as usize;
    let price_width = 12;
    let name_width = width.saturating_sub(price_width + 4) / 2;
    let visible = inner.height as usize;
    let first = state.cursor.saturating_sub(visible.saturating_sub(1));

    let lines: Vec<Line> = state
        .albums
        .iter()
        .enumerate()
        .skip(first)
        .take(visible)
        .map(|(index, album)| {
            let selected = index == state.cursor;
            let marker = if selected { "▸ " } else { "  " };
            let style = if selected {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(vec![
                Span::styled(marker, style),
                Span::styled(
                    format!(
                        "{:<name_width$}",
                        truncate_with_ellipsis(&album.name, name_width)
                    ),
                    style,
                ),
                Span::styled(
                    format!(
                        "{:<name_width$}",
                        truncate_with_ellipsis(&album.artist_name, name_width)
                    ),
                    Style::default().fg(MUTED),
                ),
                Span::styled(
                    format!("{:>price_width$}", format_price(album.value)),
                    Style::default().fg(Color::Green),
                ),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_summary(frame: &mut Frame, state: &CollectionState, area: Rect) {
    let summary = state.summary();
    let [count_area, total_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

    let card = |title: &'static str, value: String| {
        Paragraph::new(vec![
            Line::from(Span::styled(title, Style::default().fg(MUTED))),
            Line::from(Span::styled(
                value,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(MUTED)),
        )
    };

    frame.render_widget(card("Total albums", summary.count.to_string()), count_area);
    frame.render_widget(card("Total spent", summary.formatted_total()), total_area);

    if state.confirm_remove
        && let Some(album) = state.highlighted()
    {
        let prompt = Line::from(Span::styled(
            format!(" Remove \"{}\"? y to confirm ", album.name),
            Style::default().fg(Color::Yellow),
        ));
        let prompt_area = Rect::new(area.x, area.bottom().saturating_sub(1), area.width, 1);
        frame.render_widget(Paragraph::new(prompt), prompt_area);
    }
}
