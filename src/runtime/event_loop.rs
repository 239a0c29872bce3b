use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::RodioSession;
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::{PlaybackController, PlayerState};
use crate::runtime::keys::{KeyAction, KeyContext, KeyMap};
use crate::runtime::mpris_sync::{MprisSnapshot, snapshot, update_mpris};
use crate::ui::{self, TuiView};

pub type Controller = PlaybackController<RodioSession, TuiView>;

/// Main terminal event loop: handles input, UI drawing, session events and
/// MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    controller: &mut Controller,
    mpris: Option<&MprisHandle>,
    control_rx: &mpsc::Receiver<ControlCmd>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut keys = KeyMap::default();
    let mut last_mpris: Option<MprisSnapshot> = None;

    loop {
        controller.pump_session_events();
        controller.tick(Instant::now());

        // Keep MPRIS in sync even when playback changes come from media keys or auto-advance.
        if let Some(mpris) = mpris {
            let snap = snapshot(controller);
            if last_mpris != Some(snap) {
                update_mpris(mpris, controller);
                last_mpris = Some(snap);
            }
        }

        let position = controller.position();
        terminal.draw(|f| ui::draw(f, controller.view(), position, &settings.ui))?;

        while let Ok(cmd) = control_rx.try_recv() {
            match cmd {
                ControlCmd::Quit => {
                    shut_down(controller, settings);
                    return Ok(());
                }
                ControlCmd::Player(cmd) => controller.dispatch(cmd),
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let ctx = KeyContext {
                    selected: controller.view().selected_id(),
                    playing: controller
                        .store()
                        .current_id()
                        .filter(|_| controller.state() == PlayerState::Playing),
                    playlist_empty: controller.store().is_empty(),
                };
                match keys.map(key, ctx) {
                    Some(KeyAction::Quit) => {
                        shut_down(controller, settings);
                        return Ok(());
                    }
                    Some(KeyAction::Command(cmd)) => controller.dispatch(cmd),
                    Some(KeyAction::CursorDown) => controller.view_mut().cursor_down(),
                    Some(KeyAction::CursorUp) => controller.view_mut().cursor_up(),
                    Some(KeyAction::CursorTop) => controller.view_mut().cursor_top(),
                    Some(KeyAction::CursorBottom) => controller.view_mut().cursor_bottom(),
                    None => {}
                }
            }
        }
    }
}

fn shut_down(controller: &mut Controller, settings: &config::Settings) {
    tracing::info!("shutting down");
    controller
        .session_mut()
        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
}
