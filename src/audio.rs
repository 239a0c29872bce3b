//! Audio output subsystem.
//!
//! `RodioSession` implements `MediaSession` by forwarding commands to a
//! dedicated thread that owns the rodio output stream and sink. Outcomes of
//! start requests and end-of-track notifications travel back over a second
//! channel.

mod session;
mod sink;
mod thread;
mod types;

pub use session::RodioSession;
pub use types::SessionError;
