//! SCT Viewer - A lightweight event display for SCT minimum-bias files.

mod core;
mod gui;

use std::path::PathBuf;

use clap::{Arg, Command};

use crate::core::config::AppSettings;
use crate::core::loader::EventFile;
use gui::SctViewerApp;

fn main() -> eframe::Result<()> {
    let matches = Command::new("sct-viewer")
        .about("Browse track geometry in SCT minimum-bias event files")
        .arg(
            Arg::new("file")
                .help("SCT event file to open")
                .required(true),
        )
        .get_matches();

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .expect("Could not initialize logging!");

    // Open the file before any window exists; a bad path is a fatal
    // startup error
    let path = PathBuf::from(matches.get_one::<String>("file").expect("argument is required"));
    let events = match EventFile::open(&path) {
        Ok(events) => events,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    log::info!("Opened {} ({} events)", path.display(), events.event_count());

    let settings = AppSettings::load();
    let (width, height) = settings.window_size.unwrap_or((1280.0, 720.0));
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("SCT Viewer")
            .with_inner_size([width, height])
            .with_min_inner_size([800.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SCT Viewer",
        options,
        Box::new(move |cc| Ok(Box::new(SctViewerApp::new(cc, events, settings)))),
    )
}
