use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::player::{PlayTicket, SessionEvent};

use super::sink::create_sink_at;
use super::types::{AudioCmd, PlaybackHandle, SessionError};

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<SessionEvent>,
    playback_info: PlaybackHandle,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
                // but noisy for a TUI app.
                stream.log_on_drop(false);
                Ok(stream)
            }
            Err(e) => {
                tracing::error!(error = %e, "no audio output device, every start will be rejected");
                Err(e.to_string())
            }
        };

        let mut state = AudioState {
            stream,
            events,
            playback_info,
            source: None,
            start_at: Duration::ZERO,
            sink: None,
            ticket: None,
            paused: true,
        };

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(AudioCmd::Load(source)) => state.load(source),
                Ok(AudioCmd::Seek(position)) => state.seek(position),
                Ok(AudioCmd::Play(ticket)) => state.play(ticket),
                Ok(AudioCmd::Pause) => state.pause(),
                Ok(AudioCmd::Quit { fade_out_ms }) => {
                    state.quit(fade_out_ms);
                    break;
                }
                // periodic check for end of track
                Err(RecvTimeoutError::Timeout) => state.check_ended(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
            state.publish_elapsed();
        }
        tracing::debug!("audio thread stopped");
    })
}

struct AudioState {
    stream: Result<OutputStream, String>,
    events: Sender<SessionEvent>,
    playback_info: PlaybackHandle,
    source: Option<String>,
    /// Position the current sink was opened at.
    start_at: Duration,
    sink: Option<Sink>,
    /// Request the loaded resource is playing for.
    ticket: Option<PlayTicket>,
    paused: bool,
}

impl AudioState {
    fn elapsed(&self) -> Duration {
        self.start_at + self.sink.as_ref().map_or(Duration::ZERO, Sink::get_pos)
    }

    fn load(&mut self, source: String) {
        self.stop_sink();
        tracing::debug!(%source, "loading");
        self.source = Some(source);
        self.start_at = Duration::ZERO;
        self.ticket = None;
        self.paused = true;
    }

    /// Rebuild the sink at `position`; the old one cannot seek backwards.
    fn seek(&mut self, position: Duration) {
        let resume = !self.paused && self.sink.is_some();
        self.stop_sink();
        self.start_at = position;
        if !resume {
            return;
        }
        if let Err(e) = self.open_and_play() {
            self.paused = true;
            if let Some(ticket) = self.ticket {
                self.reject(ticket, &e);
            }
        }
    }

    fn play(&mut self, ticket: PlayTicket) {
        self.ticket = Some(ticket);

        if let Some(sink) = &self.sink {
            sink.play();
            self.paused = false;
            self.emit(SessionEvent::Started(ticket));
            return;
        }

        match self.open_and_play() {
            Ok(()) => self.emit(SessionEvent::Started(ticket)),
            Err(e) => {
                self.paused = true;
                self.reject(ticket, &e);
            }
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
        self.paused = true;
    }

    fn check_ended(&mut self) {
        let ended = !self.paused && self.sink.as_ref().is_some_and(Sink::empty);
        if !ended {
            return;
        }

        self.start_at = self.elapsed();
        self.sink = None;
        self.paused = true;
        if let Some(ticket) = self.ticket.take() {
            tracing::debug!(%ticket, "track ended");
            self.emit(SessionEvent::Ended(ticket));
        }
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(sink) = self.sink.take() {
            // Fade out gently before stopping.
            fade_out_sink(&sink, fade_out_ms);
            sink.stop();
        }
    }

    fn publish_elapsed(&self) {
        if let Ok(mut info) = self.playback_info.lock() {
            info.elapsed = self.elapsed();
        }
    }

    fn open_and_play(&mut self) -> Result<(), SessionError> {
        let stream = self
            .stream
            .as_ref()
            .map_err(|e| SessionError::NoDevice(e.clone()))?;
        let source = self.source.as_deref().ok_or(SessionError::NothingLoaded)?;

        let sink = create_sink_at(stream, source, self.start_at)?;
        sink.play();
        self.sink = Some(sink);
        self.paused = false;
        Ok(())
    }

    fn stop_sink(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn reject(&self, ticket: PlayTicket, error: &SessionError) {
        tracing::warn!(%ticket, error = %error, "start request rejected");
        self.emit(SessionEvent::Rejected {
            ticket,
            reason: error.to_string(),
        });
    }

    fn emit(&self, event: SessionEvent) {
        // The session may already be gone during shutdown.
        let _ = self.events.send(event);
    }
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    sink.set_volume(1.0);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(1.0 - t);
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
