use std::fmt;
use std::time::Duration;

/// Identifies one start request. Later requests supersede earlier ones.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayTicket(pub u64);

impl fmt::Display for PlayTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Notifications a session delivers after the fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The request behind `ticket` is audibly playing.
    Started(PlayTicket),
    /// The request behind `ticket` could not start.
    Rejected { ticket: PlayTicket, reason: String },
    /// The track started by `ticket` reached its natural end.
    Ended(PlayTicket),
}

/// A single playable audio resource.
///
/// `play` only issues the request; its outcome arrives later through
/// `poll_event`. Implementations report themselves as playing as soon as
/// `play` returns.
pub trait MediaSession {
    /// Replace the loaded resource. Leaves the session paused at zero.
    fn load(&mut self, source: &str);

    fn play(&mut self) -> PlayTicket;

    fn pause(&mut self);

    fn is_paused(&self) -> bool;

    fn current_time(&self) -> Duration;

    fn set_current_time(&mut self, position: Duration);

    /// Next pending notification, if any. Never blocks.
    fn poll_event(&mut self) -> Option<SessionEvent>;
}
