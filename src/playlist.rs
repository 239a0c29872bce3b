//! The working playlist: ordered tracks, the current track and its resume
//! offset.

mod store;

pub use store::*;
