use crate::config::UiSettings;
use crate::error::PlaybackError;
use crate::library::{Track, TrackId};
use crate::player::{PlayerState, ViewSync};

use super::artwork::ArtworkSlot;

/// One playlist line as last rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: TrackId,
    pub text: String,
    pub duration: String,
}

/// What the now-playing panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub duration: String,
}

/// Terminal-side state fed by the controller and read by `draw`.
///
/// The cursor is the only thing the user moves directly; everything else is
/// a snapshot of what the controller last pushed.
#[derive(Debug, Clone)]
pub struct TuiView {
    rows: Vec<Row>,
    highlighted: Option<TrackId>,
    label: String,
    now_playing: NowPlaying,
    artwork: ArtworkSlot,
    transport: PlayerState,
    notice: Option<String>,
    cursor: usize,
    empty_title: String,
    default_artwork: String,
}

impl TuiView {
    pub fn new(ui: &UiSettings) -> Self {
        let mut view = Self {
            rows: Vec::new(),
            highlighted: None,
            label: String::new(),
            now_playing: NowPlaying {
                title: ui.empty_title.clone(),
                artist: String::new(),
                duration: String::new(),
            },
            artwork: ArtworkSlot::new(ui.placeholder_artwork.clone()),
            transport: PlayerState::Stopped,
            notice: None,
            cursor: 0,
            empty_title: ui.empty_title.clone(),
            default_artwork: ui.default_artwork.clone(),
        };
        view.artwork.set(&ui.default_artwork);
        view
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn highlighted(&self) -> Option<TrackId> {
        self.highlighted
    }

    pub fn play_label(&self) -> &str {
        &self.label
    }

    pub fn now_playing(&self) -> &NowPlaying {
        &self.now_playing
    }

    pub fn artwork(&self) -> &ArtworkSlot {
        &self.artwork
    }

    pub fn transport(&self) -> PlayerState {
        self.transport
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Track under the cursor.
    pub fn selected_id(&self) -> Option<TrackId> {
        self.rows.get(self.cursor).map(|r| r.id)
    }

    pub fn cursor_down(&mut self) {
        if !self.rows.is_empty() {
            self.cursor = (self.cursor + 1) % self.rows.len();
        }
    }

    pub fn cursor_up(&mut self) {
        if !self.rows.is_empty() {
            self.cursor = (self.cursor + self.rows.len() - 1) % self.rows.len();
        }
    }

    pub fn cursor_top(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_bottom(&mut self) {
        self.cursor = self.rows.len().saturating_sub(1);
    }

    fn follow(&mut self, id: TrackId) {
        if let Some(pos) = self.rows.iter().position(|r| r.id == id) {
            self.cursor = pos;
        }
    }
}

impl ViewSync for TuiView {
    fn render(&mut self, tracks: &[Track]) {
        let selected = self.selected_id();
        self.rows = tracks
            .iter()
            .map(|t| Row {
                id: t.id,
                text: t.display(),
                duration: t.duration.clone(),
            })
            .collect();

        // Keep the cursor on the same track when it survived the change.
        match selected.and_then(|id| self.rows.iter().position(|r| r.id == id)) {
            Some(pos) => self.cursor = pos,
            None => self.cursor = self.cursor.min(self.rows.len().saturating_sub(1)),
        }
    }

    fn highlight(&mut self, current: Option<TrackId>) {
        if let Some(id) = current {
            if self.highlighted != current {
                self.follow(id);
            }
        }
        self.highlighted = current;
    }

    fn update_play_button_label(&mut self, label: &str) {
        self.label = label.to_string();
    }

    fn show_now_playing(&mut self, track: Option<&Track>) {
        self.notice = None;
        match track {
            Some(t) => {
                self.now_playing = NowPlaying {
                    title: t.title.clone(),
                    artist: t.artist.clone(),
                    duration: t.duration.clone(),
                };
                let artwork = if t.artwork.trim().is_empty() {
                    self.default_artwork.clone()
                } else {
                    t.artwork.clone()
                };
                self.artwork.set(&artwork);
            }
            None => {
                self.now_playing = NowPlaying {
                    title: self.empty_title.clone(),
                    artist: String::new(),
                    duration: String::new(),
                };
                let artwork = self.default_artwork.clone();
                self.artwork.set(&artwork);
            }
        }
    }

    fn set_transport(&mut self, state: PlayerState) {
        self.transport = state;
    }

    fn report(&mut self, error: &PlaybackError) {
        self.notice = Some(error.to_string());
    }
}
