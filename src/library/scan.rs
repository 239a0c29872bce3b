use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::catalog::Catalog;
use super::model::{Track, TrackId};

/// File names probed next to an audio file for cover art.
const COVER_NAMES: [&str; 4] = ["cover.jpg", "cover.png", "folder.jpg", "folder.png"];

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Format a length as `m:ss`, rounding partial seconds up.
pub(crate) fn format_length(d: Duration) -> String {
    let mut secs = d.as_secs();
    if d.subsec_nanos() > 0 {
        secs = secs.saturating_add(1);
    }
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn find_artwork(path: &Path) -> String {
    let Some(dir) = path.parent() else {
        return String::new();
    };
    COVER_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

/// Walk `dir` and build a catalog of the audio files found.
///
/// Tracks are ordered case-insensitively by `Artist - Title` and receive ids
/// in that order, starting at zero.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Catalog {
    let mut found: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() || !is_audio_file(path, settings) {
            continue;
        }

        let mut title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string();
        let mut artist = String::new();
        let mut duration = String::new();

        match lofty::read_from_path(path) {
            Ok(tagged) => {
                duration = format_length(tagged.properties().duration());

                if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                    if let Some(v) = tag.title().filter(|v| !v.trim().is_empty()) {
                        title = v.to_string();
                    }
                    if let Some(v) = tag.artist() {
                        artist = v.trim().to_string();
                    }
                }
            }
            Err(e) => tracing::debug!(path = %path.display(), error = %e, "no readable tags"),
        }

        found.push(Track {
            id: TrackId(0),
            title,
            artist,
            duration,
            source: path.display().to_string(),
            artwork: find_artwork(path),
        });
    }

    found.sort_by_key(|t| t.display().to_lowercase());
    for (i, t) in found.iter_mut().enumerate() {
        t.id = TrackId(i as u32);
    }

    tracing::info!(dir = %dir.display(), tracks = found.len(), "scanned music directory");

    // Ids were just assigned sequentially, so they cannot collide.
    Catalog::new(found).unwrap_or_default()
}
