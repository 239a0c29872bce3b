use std::env;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::RodioSession;
use crate::library::Catalog;
use crate::mpris::ControlCmd;
use crate::player::PlaybackController;
use crate::ui::TuiView;

mod event_loop;
mod keys;
mod logging;
mod mpris_sync;
mod settings;
mod startup;


pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    logging::init(&settings.log);

    let cwd = env::current_dir()?;
    let arg = env::args().nth(1);
    let source = startup::CatalogSource::resolve(arg.as_deref(), &settings.library, &cwd);
    let catalog = match source.load(&settings.library) {
        Ok(c) => c,
        Err(e) => {
            // An unusable catalog leaves an empty player rather than no player.
            eprintln!("encore: failed to load catalog, starting empty: {e}");
            tracing::error!(?source, error = %e, "failed to load catalog");
            Catalog::default()
        }
    };
    if catalog.is_empty() {
        tracing::warn!(?source, "catalog has no tracks");
    } else {
        tracing::info!(?source, tracks = catalog.len(), "catalog ready");
    }

    let session = RodioSession::spawn();
    let view = TuiView::new(&settings.ui);
    let mut controller = PlaybackController::new(catalog, session, view)
        .with_start_timeout(Duration::from_millis(settings.audio.play_start_timeout_ms));
    startup::apply_playback_defaults(&mut controller, &settings.playback);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = settings
        .controls
        .mpris
        .then(|| crate::mpris::spawn_mpris(control_tx.clone()));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut controller,
        mpris.as_ref(),
        &control_rx,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
