use crate::error::PlaybackError;
use crate::library::{Track, TrackId};

/// The playback state shown to the user.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlayerState {
    /// No current track.
    #[default]
    Stopped,
    Paused,
    Playing,
}

/// Presentation sink driven by the controller after every state change.
///
/// Calls must be idempotent and must not feed back into the playlist.
pub trait ViewSync {
    /// Show `tracks` in playback order.
    fn render(&mut self, tracks: &[Track]);

    /// Mark the current track, or clear the mark.
    fn highlight(&mut self, current: Option<TrackId>);

    fn update_play_button_label(&mut self, label: &str);

    /// Title, artist and artwork of the loaded track (`None` shows the
    /// empty-player defaults).
    fn show_now_playing(&mut self, track: Option<&Track>);

    /// Which of play/pause is offered.
    fn set_transport(&mut self, state: PlayerState);

    /// Tell the user a playback attempt failed.
    fn report(&mut self, error: &PlaybackError);
}

/// Label for the play control: the current track, else the first one.
pub fn play_button_label(current: Option<&Track>, first: Option<&Track>) -> String {
    match current.or(first) {
        Some(track) => format!("Play {}", track.title),
        None => "Play".to_string(),
    }
}
