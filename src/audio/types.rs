//! Audio-related small types and handles.
//!
//! Commands understood by the audio thread, the position it publishes, and
//! the errors that turn into rejected start requests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;

use crate::player::PlayTicket;

#[derive(Debug)]
pub(super) enum AudioCmd {
    /// Replace the loaded resource and stop whatever was playing.
    Load(String),
    /// Move the playback position of the loaded resource.
    Seek(Duration),
    /// Start or resume playback on behalf of `PlayTicket`.
    Play(PlayTicket),
    Pause,
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Runtime playback information shared with the session.
#[derive(Debug, Clone, Default)]
pub(super) struct PlaybackInfo {
    /// Position in the loaded resource.
    pub elapsed: Duration,
}

pub(super) type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

/// Why the audio thread could not start a request.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("remote source {0} is not supported")]
    UnsupportedSource(String),

    #[error("nothing is loaded")]
    NothingLoaded,

    #[error("cannot open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("cannot decode {path}: {source}")]
    Decode {
        path: String,
        source: rodio::decoder::DecoderError,
    },

    #[error("no audio output device: {0}")]
    NoDevice(String),

    #[error("audio thread is not running")]
    Disconnected,
}
