use std::sync::mpsc;

use anyhow::Context;

use crate::Args;
use crate::app::App;
use crate::audio::AudioPlayer;
use crate::mpris::ControlCmd;

mod event_loop;
mod logging;
mod mpris_sync;
mod settings;
mod shell;
mod startup;

pub fn run(args: Args) -> anyhow::Result<()> {
    let (settings, config_warning) = settings::load_settings(args.config.as_deref());

    match logging::init(&settings.logging) {
        Ok(Some(path)) => tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            log = %path.display(),
            "starting lilt"
        ),
        Ok(None) => {}
        Err(e) => eprintln!("lilt: logging disabled: {e:#}"),
    }
    if let Some(msg) = config_warning {
        tracing::warn!("{msg}");
    }

    let mut player =
        AudioPlayer::new(settings.visualizer.clone()).context("failed to start audio output")?;
    let mut app = App::new(&settings);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    startup::ingest_cli_files(&mut app, &mut player, args.files, &settings);
    mpris_sync::update_mpris(&mpris, &app);

    let mut terminal = shell::enter().context("failed to set up the terminal")?;

    let mut state = event_loop::EventLoopState::new(&app);
    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &mut player,
        &mpris,
        &control_rx,
        &mut state,
    );

    app.visualizer.stop();
    shell::leave(&mut terminal)?;
    tracing::info!("shutting down");

    run_result
}
