//! Terminal presentation.
//!
//! `TuiView` implements `ViewSync` by keeping a snapshot of what the
//! controller pushed; `draw` renders that snapshot with `ratatui`.

mod artwork;
mod draw;
mod view;

pub use artwork::ArtworkSlot;
pub use draw::draw;
pub use view::*;
