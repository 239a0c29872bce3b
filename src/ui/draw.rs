use std::collections::BTreeMap;
use std::sync::LazyLock;
use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::config::{TimeField, UiSettings};
use crate::player::PlayerState;

use super::view::TuiView;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("gg/G", "top/bottom");
    map.insert("enter", "play selected song");
    map.insert("h/l", "prev/next song");
    map.insert("s", "shuffle");
    map.insert("o", "sort by title");
    map.insert("d", "delete selected");
    map.insert("r", "reset playlist");
    map.insert("q", "quit");
    map
});

/// Render the controls help text. `space/p` carries the play-button label,
/// and reset is only offered once the playlist is empty.
pub(crate) fn controls_text(play_label: &str, playlist_empty: bool) -> String {
    // Keep the rendered order stable and human-friendly.
    let order = [
        "j/k", "h/l", "enter", "space/p", "gg/G", "s", "o", "d", "r", "q",
    ];
    order
        .iter()
        .filter(|k| **k != "r" || playlist_empty)
        .filter_map(|k| {
            if *k == "space/p" {
                Some(format!("[space/p] {play_label}"))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{k}] {v}"))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `m:ss`, the same shape catalog durations use.
pub(crate) fn format_mss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Build the now-playing time text (elapsed/total) per `UiSettings`.
pub(crate) fn now_playing_time_text(
    elapsed: Duration,
    total: &str,
    ui: &UiSettings,
) -> Option<String> {
    let parts: Vec<String> = ui
        .now_playing_time_fields
        .iter()
        .filter_map(|f| match f {
            TimeField::Elapsed => Some(format_mss(elapsed)),
            TimeField::Total => (!total.trim().is_empty()).then(|| total.trim().to_string()),
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(&ui.now_playing_time_separator))
    }
}

fn transport_text(state: PlayerState) -> &'static str {
    match state {
        PlayerState::Stopped => "Stopped",
        PlayerState::Paused => "Paused",
        PlayerState::Playing => "Playing",
    }
}

/// Render the entire UI into `frame` from the view snapshot.
pub fn draw(frame: &mut Frame, view: &TuiView, position: Duration, ui: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" encore ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Now playing
    let now = view.now_playing();
    let mut status = vec![Line::from(now.title.as_str()).bold()];
    if !now.artist.trim().is_empty() {
        status.push(Line::from(now.artist.as_str()));
    }
    let mut state_line = transport_text(view.transport()).to_string();
    if view.transport() != PlayerState::Stopped {
        if let Some(time) = now_playing_time_text(position, &now.duration, ui) {
            state_line.push_str(&format!(" [{time}]"));
        }
    }
    status.push(Line::from(state_line));
    let artwork = view.artwork();
    let suffix = if artwork.is_placeholder() { " (placeholder)" } else { "" };
    status.push(Line::from(format!("Artwork: {}{suffix}", artwork.shown())).dim());
    if let Some(notice) = view.notice() {
        status.push(Line::from(notice).italic());
    }

    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" now playing "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Main list
    {
        let rows = view.rows();

        // Center the selected item when possible by creating a visible window.
        // Important: only build ListItems for the visible window (avoid allocating the entire list).
        let total = rows.len();
        let list_height = chunks[2].height.saturating_sub(2) as usize;
        let sel_pos = view.cursor().min(total.saturating_sub(1));
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = sel_pos.saturating_sub(half);
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let visible_items: Vec<ListItem> = rows[start..end]
            .iter()
            .map(|row| {
                let marker = if view.highlighted() == Some(row.id) {
                    "♪ "
                } else {
                    "  "
                };
                let text = if row.duration.is_empty() {
                    format!("{marker}{}", row.text)
                } else {
                    format!("{marker}{} ({})", row.text, row.duration)
                };
                let item = ListItem::new(text);
                if view.highlighted() == Some(row.id) {
                    item.style(Style::default().add_modifier(Modifier::BOLD))
                } else {
                    item
                }
            })
            .collect();

        let title = if total == 0 {
            " tracks (empty, press r to reset) ".to_string()
        } else {
            format!(" tracks ({total}) ")
        };
        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if total > 0 {
            state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    let footer_text = controls_text(view.play_label(), view.rows().is_empty());
    let footer = Paragraph::new(footer_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[3]);
}
