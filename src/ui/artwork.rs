use std::path::Path;

/// Artwork shown in the now-playing panel.
///
/// A local file that cannot be found is swapped for the placeholder once.
/// The placeholder itself is never checked, so a broken placeholder cannot
/// cause another substitution.
#[derive(Debug, Clone)]
pub struct ArtworkSlot {
    placeholder: String,
    requested: String,
    shown: String,
    substituted: bool,
}

impl ArtworkSlot {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            requested: String::new(),
            shown: String::new(),
            substituted: false,
        }
    }

    /// Point the slot at `source`, falling back when it is unavailable.
    pub fn set(&mut self, source: &str) {
        if source == self.requested && !self.shown.is_empty() {
            return;
        }
        self.requested = source.to_string();
        self.shown = source.to_string();
        self.substituted = false;

        if !is_available(source) {
            self.load_failed();
        }
    }

    /// Swap in the placeholder. Only the first failure per source does anything.
    pub fn load_failed(&mut self) {
        if self.substituted {
            return;
        }
        tracing::debug!(artwork = %self.requested, "artwork unavailable, using placeholder");
        self.substituted = true;
        self.shown = self.placeholder.clone();
    }

    pub fn shown(&self) -> &str {
        &self.shown
    }

    pub fn is_placeholder(&self) -> bool {
        self.substituted
    }
}

/// Remote artwork is not fetched and counts as available.
fn is_available(source: &str) -> bool {
    if source.trim().is_empty() {
        return false;
    }
    if source.starts_with("http://") || source.starts_with("https://") {
        return true;
    }
    Path::new(source.strip_prefix("file://").unwrap_or(source)).is_file()
}
