//! Player core: the playback state machine and the capabilities it drives.
//!
//! `PlaybackController` owns the working playlist and talks to two
//! collaborators: a `MediaSession` that actually plays audio, and a
//! `ViewSync` that presents the playlist. UI events reach the controller as
//! `Command`s.

mod command;
mod controller;
mod session;
mod view;

pub use command::*;
pub use controller::*;
pub use session::*;
pub use view::*;

#[cfg(test)]
mod tests;
