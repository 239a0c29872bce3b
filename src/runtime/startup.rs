use std::path::{Path, PathBuf};

use crate::config::{LibrarySettings, PlaybackSettings};
use crate::library::{Catalog, CatalogError, scan};
use crate::player::{MediaSession, PlaybackController, ViewSync};

/// Where the master catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Directory(PathBuf),
}

impl CatalogSource {
    /// A command-line path wins, then `library.catalog_file`, then `cwd`.
    pub fn resolve(arg: Option<&str>, library: &LibrarySettings, cwd: &Path) -> Self {
        if let Some(arg) = arg {
            let path = PathBuf::from(arg);
            let is_catalog = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("toml"));
            return if is_catalog {
                Self::File(path)
            } else {
                Self::Directory(path)
            };
        }
        match &library.catalog_file {
            Some(file) => Self::File(file.clone()),
            None => Self::Directory(cwd.to_path_buf()),
        }
    }

    pub fn load(&self, library: &LibrarySettings) -> Result<Catalog, CatalogError> {
        match self {
            Self::File(path) => Catalog::load(path),
            Self::Directory(dir) => Ok(scan(dir, library)),
        }
    }
}

/// Initial playlist order, applied before the first frame.
pub fn apply_playback_defaults<S: MediaSession, V: ViewSync>(
    controller: &mut PlaybackController<S, V>,
    playback: &PlaybackSettings,
) {
    if playback.sort_on_start {
        controller.sort();
    }
    if playback.shuffle_on_start {
        controller.shuffle();
    }
}
