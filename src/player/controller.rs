use std::time::{Duration, Instant};

use crate::error::PlaybackError;
use crate::library::{Catalog, Track, TrackId};
use crate::playlist::PlaylistStore;

use super::session::{MediaSession, PlayTicket, SessionEvent};
use super::view::{PlayerState, ViewSync, play_button_label};

/// A start request that has not been confirmed yet.
#[derive(Debug, Clone, Copy)]
struct PendingStart {
    ticket: PlayTicket,
    track: TrackId,
    issued_at: Instant,
}

/// Drives a `MediaSession` and a `ViewSync` from playlist operations.
///
/// Playing/paused/stopped is not stored separately: it is derived from the
/// store's current track and the session's paused flag.
pub struct PlaybackController<S, V> {
    catalog: Catalog,
    store: PlaylistStore,
    session: S,
    view: V,
    /// Latest start request; events for older tickets are ignored.
    latest: Option<PlayTicket>,
    pending: Option<PendingStart>,
    start_timeout: Option<Duration>,
}

impl<S: MediaSession, V: ViewSync> PlaybackController<S, V> {
    /// Seed the playlist from `catalog` and draw the initial view.
    pub fn new(catalog: Catalog, session: S, view: V) -> Self {
        let store = PlaylistStore::from_catalog(&catalog);
        let mut controller = Self {
            catalog,
            store,
            session,
            view,
            latest: None,
            pending: None,
            start_timeout: None,
        };
        controller.refresh_list();
        controller.refresh_display();
        controller
    }

    /// Give up on start requests that stay unanswered for `timeout`.
    /// Zero disables the check.
    pub fn with_start_timeout(mut self, timeout: Duration) -> Self {
        self.start_timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    pub fn store(&self) -> &PlaylistStore {
        &self.store
    }

    #[cfg(test)]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn state(&self) -> PlayerState {
        match self.store.current_id() {
            None => PlayerState::Stopped,
            Some(_) if self.session.is_paused() => PlayerState::Paused,
            Some(_) => PlayerState::Playing,
        }
    }

    /// Playback position of the current track.
    pub fn position(&self) -> Duration {
        match self.store.current_id() {
            Some(_) => self.session.current_time(),
            None => Duration::ZERO,
        }
    }

    #[cfg(test)]
    pub fn is_start_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Load and start `id`. Replaying the current track resumes from its
    /// stored offset; any other track starts from the beginning.
    pub fn play(&mut self, id: TrackId) {
        let track = match self.lookup(id) {
            Ok(t) => t.clone(),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring play request");
                return;
            }
        };

        let resume = self.store.current_id() == Some(id);
        let start_at = if resume {
            self.store.last_offset()
        } else {
            Duration::ZERO
        };

        self.session.load(&track.source);
        self.session.set_current_time(start_at);
        self.store.set_current(id);

        // Assume success; a rejection is compensated when it arrives.
        self.view.set_transport(PlayerState::Playing);
        self.view.highlight(Some(id));
        self.view.show_now_playing(Some(&track));
        self.refresh_label();

        let ticket = self.session.play();
        self.latest = Some(ticket);
        self.pending = Some(PendingStart {
            ticket,
            track: id,
            issued_at: Instant::now(),
        });

        tracing::info!(
            %id,
            %ticket,
            title = %track.title,
            offset_ms = start_at.as_millis() as u64,
            resume,
            "requested playback"
        );
    }

    /// Remember the position of the current track and pause the session.
    /// Pausing an already paused session changes nothing.
    pub fn pause(&mut self) {
        self.store.record_offset(self.session.current_time());
        self.pending = None;
        if !self.session.is_paused() {
            self.session.pause();
            tracing::debug!(offset_ms = self.store.last_offset().as_millis() as u64, "paused");
        }
        let state = self.state();
        self.view.set_transport(state);
    }

    /// The play control: resume the current track, else start the first one.
    /// Does nothing while already playing.
    pub fn resume_or_start(&mut self) {
        if self.state() == PlayerState::Playing {
            tracing::debug!("play requested while already playing");
            return;
        }
        let target = self
            .store
            .current_id()
            .or_else(|| self.store.list().first().map(|t| t.id));
        match target {
            Some(id) => self.play(id),
            None => tracing::debug!("play requested on an empty playlist"),
        }
    }

    /// Pause when playing, otherwise behave like the play control.
    pub fn toggle(&mut self) {
        if self.state() == PlayerState::Playing {
            self.pause();
        } else {
            self.resume_or_start();
        }
    }

    pub fn play_next(&mut self) {
        self.step(true);
    }

    pub fn play_previous(&mut self) {
        self.step(false);
    }

    fn step(&mut self, forward: bool) {
        let len = self.store.len();
        if len == 0 {
            tracing::debug!("playlist is empty, nothing to skip to");
            return;
        }

        let target = match self.store.index_of_current() {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        let id = self.store.list()[target].id;
        self.play(id);
    }

    /// Randomize the playlist order. Playback is not interrupted.
    pub fn shuffle(&mut self) {
        self.store.shuffle();
        tracing::debug!(tracks = self.store.len(), "shuffled playlist");
        self.refresh_list();
    }

    /// Order the playlist by title. Playback is not interrupted.
    pub fn sort(&mut self) {
        self.store.sort_by_title();
        self.refresh_list();
    }

    /// Remove `id` from the playlist, stopping it first when it is current.
    pub fn delete(&mut self, id: TrackId) {
        if let Err(e) = self.lookup(id) {
            tracing::warn!(error = %e, "ignoring delete request");
            return;
        }

        if self.store.current_id() == Some(id) {
            self.pause();
            self.store.clear_current();
            self.store.remove(id);
            self.refresh_display();
        } else {
            self.store.remove(id);
        }

        tracing::info!(%id, remaining = self.store.len(), "deleted track");
        self.refresh_list();
    }

    /// Natural end of the current track: continue with the next one, or
    /// settle into the empty state when there is nothing left to play.
    pub fn handle_ended(&mut self) {
        if self.store.index_of_current().is_some() && !self.store.is_empty() {
            // A track that ran out is finished; a single-track loop starts over.
            self.store.record_offset(Duration::ZERO);
            self.play_next();
            return;
        }

        tracing::debug!("track ended with nothing current, resetting player");
        self.store.clear_current();
        self.pause();
        self.refresh_display();
        self.refresh_list();
    }

    /// Restore the full catalog, sorted by title, with nothing loaded.
    pub fn reset_playlist(&mut self) {
        self.pause();
        self.store.reset_to_catalog(&self.catalog);
        self.store.sort_by_title();
        tracing::info!(tracks = self.store.len(), "playlist reset from catalog");
        self.refresh_list();
        self.refresh_display();
    }

    /// Drain and handle every event the session has queued.
    pub fn pump_session_events(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.session.poll_event() {
            self.handle_session_event(event);
            handled += 1;
        }
        handled
    }

    pub fn handle_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Started(ticket) => {
                if self.pending.take_if(|p| p.ticket == ticket).is_some() {
                    tracing::debug!(%ticket, "playback started");
                }
            }
            SessionEvent::Rejected { ticket, reason } => {
                match self.pending.take_if(|p| p.ticket == ticket) {
                    Some(p) => {
                        let title = self.title_of(p.track);
                        self.fail_start(PlaybackError::Rejected { title, reason });
                    }
                    None => tracing::debug!(%ticket, %reason, "ignoring superseded rejection"),
                }
            }
            SessionEvent::Ended(ticket) => {
                if self.latest == Some(ticket) {
                    self.handle_ended();
                } else {
                    tracing::debug!(%ticket, "ignoring end of a superseded track");
                }
            }
        }
    }

    /// Time out a start request that has been pending for too long.
    pub fn tick(&mut self, now: Instant) {
        let Some(timeout) = self.start_timeout else {
            return;
        };
        let Some(pending) = self.pending else {
            return;
        };
        if now.saturating_duration_since(pending.issued_at) < timeout {
            return;
        }

        self.pending = None;
        let title = self.title_of(pending.track);
        self.fail_start(PlaybackError::StartTimedOut { title, timeout });
    }

    fn fail_start(&mut self, error: PlaybackError) {
        tracing::warn!(error = %error, "playback did not start");
        self.pause();
        self.view.report(&error);
    }

    fn lookup(&self, id: TrackId) -> Result<&Track, PlaybackError> {
        self.store.find(id).ok_or(PlaybackError::TrackNotFound(id))
    }

    fn title_of(&self, id: TrackId) -> String {
        self.store
            .find(id)
            .map(|t| t.title.clone())
            .unwrap_or_else(|| format!("track {id}"))
    }

    fn refresh_label(&mut self) {
        let label = play_button_label(self.store.current(), self.store.list().first());
        self.view.update_play_button_label(&label);
    }

    fn refresh_list(&mut self) {
        self.view.render(self.store.list());
        self.view.highlight(self.store.current_id());
        self.refresh_label();
    }

    fn refresh_display(&mut self) {
        self.view.show_now_playing(self.store.current());
        let state = self.state();
        self.view.set_transport(state);
    }
}
