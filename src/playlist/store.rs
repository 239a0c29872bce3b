use std::time::Duration;

use rand::Rng;

use crate::library::{Catalog, Track, TrackId};

/// Ordered working set of tracks plus the current-track reference.
///
/// The current track is held by id and always resolves into `tracks`; any
/// mutation that drops it also clears it, together with the resume offset.
#[derive(Debug, Clone, Default)]
pub struct PlaylistStore {
    tracks: Vec<Track>,
    current: Option<TrackId>,
    last_offset: Duration,
}

impl PlaylistStore {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            current: None,
            last_offset: Duration::ZERO,
        }
    }

    /// Seed a store from a copy of `catalog`.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self::new(catalog.to_playlist())
    }

    /// Tracks in playback order.
    pub fn list(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn find(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn position(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    pub fn current_id(&self) -> Option<TrackId> {
        self.current
    }

    pub fn current(&self) -> Option<&Track> {
        self.current.and_then(|id| self.find(id))
    }

    /// Position of the current track, or `None` when there is none.
    pub fn index_of_current(&self) -> Option<usize> {
        self.current.and_then(|id| self.position(id))
    }

    /// Resume offset of the current track. Zero when nothing is current.
    pub fn last_offset(&self) -> Duration {
        self.last_offset
    }

    /// Remember where the current track was left. Ignored without a current track.
    pub fn record_offset(&mut self, offset: Duration) {
        if self.current.is_some() {
            self.last_offset = offset;
        }
    }

    /// Make `id` the current track. Returns `false` (and changes nothing) when
    /// `id` is not in the playlist. Switching to a different track forgets the
    /// previous offset.
    pub fn set_current(&mut self, id: TrackId) -> bool {
        if self.find(id).is_none() {
            return false;
        }
        if self.current != Some(id) {
            self.last_offset = Duration::ZERO;
        }
        self.current = Some(id);
        true
    }

    pub fn clear_current(&mut self) {
        self.current = None;
        self.last_offset = Duration::ZERO;
    }

    /// Remove `id` from the playlist. The current reference is cleared first
    /// when it points at the removed track.
    pub fn remove(&mut self, id: TrackId) -> Option<Track> {
        let pos = self.position(id)?;
        if self.current == Some(id) {
            self.clear_current();
        }
        Some(self.tracks.remove(pos))
    }

    /// Replace the playback order. The current track is re-resolved by id.
    pub fn reorder(&mut self, new_order: Vec<Track>) {
        self.tracks = new_order;
        self.resolve_current();
    }

    /// Replace the playlist with a fresh copy of `catalog`.
    pub fn reset_to_catalog(&mut self, catalog: &Catalog) {
        self.tracks = catalog.to_playlist();
        self.clear_current();
    }

    /// Stable ascending sort by title.
    pub fn sort_by_title(&mut self) {
        let mut order = std::mem::take(&mut self.tracks);
        order.sort_by(|a, b| a.title.cmp(&b.title));
        self.reorder(order);
    }

    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    /// Fisher-Yates shuffle driven by `rng`.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut order = std::mem::take(&mut self.tracks);
        for i in (1..order.len()).rev() {
            let j = rng.random_range(0..=i);
            order.swap(i, j);
        }
        self.reorder(order);
    }

    fn resolve_current(&mut self) {
        if let Some(id) = self.current {
            if self.find(id).is_none() {
                self.clear_current();
            }
        }
    }
}
