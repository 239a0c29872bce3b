use crate::library::TrackId;
use crate::mpris::MprisHandle;
use crate::player::{MediaSession, PlaybackController, PlayerState, ViewSync};

/// What MPRIS was last told.
pub type MprisSnapshot = (Option<TrackId>, PlayerState);

pub fn snapshot<S: MediaSession, V: ViewSync>(
    controller: &PlaybackController<S, V>,
) -> MprisSnapshot {
    (controller.store().current_id(), controller.state())
}

pub fn update_mpris<S: MediaSession, V: ViewSync>(
    mpris: &MprisHandle,
    controller: &PlaybackController<S, V>,
) {
    mpris.set_track_metadata(controller.store().current());
    mpris.set_playback(controller.state());
}
