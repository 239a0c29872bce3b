use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::player::{MediaSession, PlayTicket, SessionEvent};

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, PlaybackHandle, PlaybackInfo, SessionError};

/// `MediaSession` backed by the rodio audio thread.
///
/// The paused flag is tracked here so it flips as soon as `play`/`pause`
/// return; the position is read from what the thread publishes.
pub struct RodioSession {
    tx: Sender<AudioCmd>,
    events: Receiver<SessionEvent>,
    /// Rejections decided without asking the thread.
    local: VecDeque<SessionEvent>,
    playback: PlaybackHandle,
    paused: bool,
    last_ticket: u64,
    join: Option<JoinHandle<()>>,
}

impl RodioSession {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (events_tx, events_rx) = mpsc::channel::<SessionEvent>();
        let playback: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let join = spawn_audio_thread(rx, events_tx, playback.clone());
        Self::from_parts(tx, events_rx, playback, Some(join))
    }

    pub(super) fn from_parts(
        tx: Sender<AudioCmd>,
        events: Receiver<SessionEvent>,
        playback: PlaybackHandle,
        join: Option<JoinHandle<()>>,
    ) -> Self {
        Self {
            tx,
            events,
            local: VecDeque::new(),
            playback,
            paused: true,
            last_ticket: 0,
            join,
        }
    }

    /// Fade out, stop the audio thread and wait for it.
    pub fn quit_softly(&mut self, fade_out: Duration) {
        let _ = self.tx.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });
        self.paused = true;

        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }

    fn send(&self, cmd: AudioCmd) -> Result<(), SessionError> {
        self.tx.send(cmd).map_err(|_| SessionError::Disconnected)
    }

    fn set_elapsed(&self, elapsed: Duration) {
        if let Ok(mut info) = self.playback.lock() {
            info.elapsed = elapsed;
        }
    }
}

impl MediaSession for RodioSession {
    fn load(&mut self, source: &str) {
        if let Err(e) = self.send(AudioCmd::Load(source.to_string())) {
            tracing::warn!(error = %e, %source, "load not delivered");
        }
        self.paused = true;
        self.set_elapsed(Duration::ZERO);
    }

    fn play(&mut self) -> PlayTicket {
        self.last_ticket += 1;
        let ticket = PlayTicket(self.last_ticket);
        self.paused = false;

        if let Err(e) = self.send(AudioCmd::Play(ticket)) {
            self.local.push_back(SessionEvent::Rejected {
                ticket,
                reason: e.to_string(),
            });
        }
        ticket
    }

    fn pause(&mut self) {
        if let Err(e) = self.send(AudioCmd::Pause) {
            tracing::debug!(error = %e, "pause not delivered");
        }
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn current_time(&self) -> Duration {
        self.playback
            .lock()
            .map(|info| info.elapsed)
            .unwrap_or(Duration::ZERO)
    }

    fn set_current_time(&mut self, position: Duration) {
        if let Err(e) = self.send(AudioCmd::Seek(position)) {
            tracing::debug!(error = %e, "seek not delivered");
        }
        self.set_elapsed(position);
    }

    fn poll_event(&mut self) -> Option<SessionEvent> {
        if let Some(event) = self.local.pop_front() {
            return Some(event);
        }
        let event = self.events.try_recv().ok()?;
        if event == SessionEvent::Ended(PlayTicket(self.last_ticket)) {
            self.paused = true;
        }
        Some(event)
    }
}
