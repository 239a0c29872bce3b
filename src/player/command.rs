use crate::library::TrackId;

use super::controller::PlaybackController;
use super::session::MediaSession;
use super::view::ViewSync;

/// A user intent, independent of where it came from (keyboard, MPRIS, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(TrackId),
    PlayPause,
    Resume,
    Pause,
    Next,
    Previous,
    Shuffle,
    Sort,
    Delete(TrackId),
    Reset,
}

impl<S: MediaSession, V: ViewSync> PlaybackController<S, V> {
    pub fn dispatch(&mut self, cmd: Command) {
        tracing::debug!(?cmd, "dispatch");
        match cmd {
            Command::Play(id) => self.play(id),
            Command::PlayPause => self.toggle(),
            Command::Resume => self.resume_or_start(),
            Command::Pause => self.pause(),
            Command::Next => self.play_next(),
            Command::Previous => self.play_previous(),
            Command::Shuffle => self.shuffle(),
            Command::Sort => self.sort(),
            Command::Delete(id) => self.delete(id),
            Command::Reset => self.reset_playlist(),
        }
    }
}
