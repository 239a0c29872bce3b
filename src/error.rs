//! Error types surfaced by the player core.

use std::time::Duration;

use thiserror::Error;

use crate::library::TrackId;

/// Failures the player recovers from by falling back to a paused state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// An operation referenced a track that is no longer in the playlist.
    #[error("track {0} is not in the playlist")]
    TrackNotFound(TrackId),

    /// The media session refused to start playback.
    #[error("could not play {title:?}: {reason}")]
    Rejected { title: String, reason: String },

    /// The media session never answered a start request.
    #[error("{title:?} did not start within {timeout:?}")]
    StartTimedOut { title: String, timeout: Duration },
}
