use std::fmt;

use serde::Deserialize;

/// Stable identity of a track. Never reassigned by playlist mutations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct TrackId(pub u32);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    #[serde(default)]
    pub artist: String,
    /// Display-only length such as `4:25`; playback never relies on it.
    #[serde(default)]
    pub duration: String,
    #[serde(rename = "src")]
    pub source: String,
    #[serde(default, alias = "album_art_url", alias = "albumArtUrl")]
    pub artwork: String,
}

impl Track {
    /// `Artist - Title`, or just the title when the artist is blank.
    pub fn display(&self) -> String {
        match self.artist.trim() {
            "" => self.title.clone(),
            a => format!("{} - {}", a, self.title),
        }
    }
}
