use anyhow::Result;
use sketch_overlay::overlay::replay::run_replay;
use sketch_overlay::overlay::transport::JsonLinesTransport;
use sketch_overlay::overlay::{OverlayController, StaticLayout};
use sketch_overlay::{logging, settings};
use std::path::PathBuf;

fn main() -> Result<()> {
    let settings = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => settings::load_from_path(&path)?,
        None => settings::load()?,
    };
    logging::init(settings.debug_logging, settings.log_file.clone());

    let stdout = std::io::stdout();
    let transport = JsonLinesTransport::new(stdout.lock());
    let mut controller =
        OverlayController::from_settings(StaticLayout::default(), transport, &settings);
    controller.start();

    let stdin = std::io::stdin();
    let summary = run_replay(stdin.lock(), &mut controller)?;
    controller.teardown();

    tracing::info!(
        layouts = summary.layouts,
        events = summary.events,
        "replay finished"
    );
    Ok(())
}
