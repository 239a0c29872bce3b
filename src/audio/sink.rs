//! Utilities for creating `rodio` sinks from track sources.
//!
//! Opening and decoding happen here so failures come back as
//! `SessionError`s instead of panicking the audio thread.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::source::SkipDuration;
use rodio::{Decoder, OutputStream, Sink, Source};

use super::types::SessionError;

pub(super) type TrackSource = SkipDuration<Decoder<BufReader<File>>>;

/// Open and decode `source`, positioned at `start_at`.
///
/// Plain paths and `file://` URLs are accepted; remote URLs are not fetched.
pub(super) fn open_source(source: &str, start_at: Duration) -> Result<TrackSource, SessionError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        return Err(SessionError::UnsupportedSource(source.to_string()));
    }
    let path = Path::new(source.strip_prefix("file://").unwrap_or(source));

    let file = File::open(path).map_err(|e| SessionError::Open {
        path: source.to_string(),
        source: e,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|e| SessionError::Decode {
        path: source.to_string(),
        source: e,
    })?;

    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    Ok(decoder.skip_duration(start_at))
}

/// Create a paused `Sink` for `source` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    source: &str,
    start_at: Duration,
) -> Result<Sink, SessionError> {
    let decoded = open_source(source, start_at)?;
    let sink = Sink::connect_new(stream.mixer());
    sink.append(decoded);
    sink.pause();
    Ok(sink)
}
