//! Test doubles for the media session and the view.

use std::collections::VecDeque;
use std::time::Duration;

use crate::error::PlaybackError;
use crate::library::{Track, TrackId};
use crate::player::{MediaSession, PlayTicket, PlayerState, SessionEvent, ViewSync};

pub(crate) fn track(id: u32, title: &str) -> Track {
    Track {
        id: TrackId(id),
        title: title.to_string(),
        artist: "Quincy Larson".to_string(),
        duration: "3:00".to_string(),
        source: format!("/music/{id}.mp3"),
        artwork: format!("images/song{id}.jpg"),
    }
}

/// Tracks with ids `0..titles.len()` in the given order.
pub(crate) fn tracks(titles: &[&str]) -> Vec<Track> {
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| track(i as u32, title))
        .collect()
}

/// A session that records every call and only emits events it is told to.
#[derive(Debug)]
pub(crate) struct FakeSession {
    pub loaded: Vec<String>,
    pub seeks: Vec<Duration>,
    pub position: Duration,
    pub paused: bool,
    pub pause_calls: usize,
    pub issued: Vec<PlayTicket>,
    pub events: VecDeque<SessionEvent>,
}

impl Default for FakeSession {
    fn default() -> Self {
        Self {
            loaded: Vec::new(),
            seeks: Vec::new(),
            position: Duration::ZERO,
            paused: true,
            pause_calls: 0,
            issued: Vec::new(),
            events: VecDeque::new(),
        }
    }
}

impl FakeSession {
    pub fn last_ticket(&self) -> PlayTicket {
        *self.issued.last().expect("no play request issued")
    }

    pub fn last_seek(&self) -> Option<Duration> {
        self.seeks.last().copied()
    }

    /// Pretend the audio advanced by `by`.
    pub fn advance(&mut self, by: Duration) {
        self.position += by;
    }

    pub fn push(&mut self, event: SessionEvent) {
        self.events.push_back(event);
    }
}

impl MediaSession for FakeSession {
    fn load(&mut self, source: &str) {
        self.loaded.push(source.to_string());
        self.position = Duration::ZERO;
        self.paused = true;
    }

    fn play(&mut self) -> PlayTicket {
        self.paused = false;
        let ticket = PlayTicket(self.issued.len() as u64 + 1);
        self.issued.push(ticket);
        ticket
    }

    fn pause(&mut self) {
        self.paused = true;
        self.pause_calls += 1;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn current_time(&self) -> Duration {
        self.position
    }

    fn set_current_time(&mut self, position: Duration) {
        self.position = position;
        self.seeks.push(position);
    }

    fn poll_event(&mut self) -> Option<SessionEvent> {
        self.events.pop_front()
    }
}

/// A view that keeps the latest value pushed through each capability.
#[derive(Debug, Default)]
pub(crate) struct RecordingView {
    pub rows: Vec<TrackId>,
    pub renders: usize,
    pub highlighted: Option<TrackId>,
    pub label: String,
    pub now_playing: Option<TrackId>,
    pub transport: PlayerState,
    pub reports: Vec<PlaybackError>,
}

impl ViewSync for RecordingView {
    fn render(&mut self, tracks: &[Track]) {
        self.rows = tracks.iter().map(|t| t.id).collect();
        self.renders += 1;
    }

    fn highlight(&mut self, current: Option<TrackId>) {
        self.highlighted = current;
    }

    fn update_play_button_label(&mut self, label: &str) {
        self.label = label.to_string();
    }

    fn show_now_playing(&mut self, track: Option<&Track>) {
        self.now_playing = track.map(|t| t.id);
    }

    fn set_transport(&mut self, state: PlayerState) {
        self.transport = state;
    }

    fn report(&mut self, error: &PlaybackError) {
        self.reports.push(error.clone());
    }
}
