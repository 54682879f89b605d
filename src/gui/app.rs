//! Main application state and GUI logic.
//!
//! This module defines the main application struct and implements the
//! eframe::App trait. The app owns the open event file and the view state;
//! keyboard shortcuts and panel interactions produce `ViewCommand`s, the
//! pure transition runs on `ViewState`, and rendering happens afterwards
//! from whatever state results.

use eframe::egui;
use std::path::{Path, PathBuf};

use crate::core::config::AppSettings;
use crate::core::event::{Event, TrackCategory};
use crate::core::loader::EventFile;
use crate::core::view::{Extent, ViewCommand, ViewState};

use super::controls::ControlsRenderer;
use super::display::EventDisplay;

/// How many leading events contribute to the home axis extent.
const EXTENT_SAMPLE_LEN: usize = 100;

/// Kind of status message to display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusKind {
    /// Success message (shown in green)
    Success,
    /// Error message (shown in red)
    Error,
}

/// A status message with its kind and timestamp.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    /// The message text
    pub text: String,
    /// Kind of message (success/error)
    pub kind: StatusKind,
    /// When the message was created (for auto-dismiss)
    pub created_at: std::time::Instant,
}

impl StatusMessage {
    /// Create a new status message.
    pub fn new(text: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            created_at: std::time::Instant::now(),
        }
    }

    /// Duration to show status messages before auto-dismissing.
    const DISPLAY_DURATION: std::time::Duration = std::time::Duration::from_secs(5);

    /// Check if the message should still be displayed.
    pub fn is_visible(&self) -> bool {
        self.created_at.elapsed() < Self::DISPLAY_DURATION
    }
}

/// Main application state and GUI logic.
pub struct SctViewerApp {
    /// Open event file session
    events: EventFile,
    /// Persisted settings (colors, last directory, window size)
    settings: AppSettings,
    /// Interactive view state
    view: ViewState,
    /// Decoded current event (`None` when the decode failed)
    current: Option<Event>,
    /// Status message to display (success/error notifications)
    status_message: Option<StatusMessage>,
}

impl SctViewerApp {
    /// Create the application around an already-open event file.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        mut events: EventFile,
        settings: AppSettings,
    ) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        let home = Self::home_extent(&mut events);
        let view = ViewState::new(home);
        let mut app = Self {
            events,
            settings,
            view,
            current: None,
            status_message: None,
        };
        app.load_current();
        app
    }

    /// Compute the home axis extent from a bounded sample of leading
    /// events, falling back to unit axes for files with no geometry.
    fn home_extent(events: &mut EventFile) -> Extent {
        let mut sample = Vec::new();
        for index in 0..events.event_count().min(EXTENT_SAMPLE_LEN) {
            match events.event(index) {
                Ok(event) => sample.push(event),
                Err(e) => log::warn!("Skipping event {index} while sizing the view: {e}"),
            }
        }
        Extent::enclosing(sample.iter()).unwrap_or_default()
    }

    /// Decode the event the view currently points at.
    fn load_current(&mut self) {
        if self.events.event_count() == 0 {
            self.current = None;
            return;
        }
        match self.events.event(self.view.ievent) {
            Ok(event) => {
                if self.view.debug {
                    log::debug!(
                        "Debug log for event {}: {} vertices, {} VELO, {} Long, {} Generator",
                        self.view.ievent,
                        event.vertices.len(),
                        event.track_count(TrackCategory::Velo),
                        event.track_count(TrackCategory::Long),
                        event.track_count(TrackCategory::Generator),
                    );
                }
                self.current = Some(event);
            }
            Err(e) => {
                log::error!("{e}");
                self.current = None;
                self.status_message = Some(StatusMessage::new(e.to_string(), StatusKind::Error));
            }
        }
    }

    /// Open a file dialog and switch the session to the selected file.
    fn open_file_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .add_filter("SCT event file", &["sct"])
            .set_title("Open SCT File");
        if let Some(dir) = &self.settings.last_open_dir {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            self.replace_file(path);
        }
    }

    /// Replace the current session with `path`, keeping the old one on
    /// failure.
    fn replace_file(&mut self, path: PathBuf) {
        match EventFile::open(&path) {
            Ok(mut events) => {
                let home = Self::home_extent(&mut events);
                log::info!("Opened {} ({} events)", path.display(), events.event_count());
                self.settings.last_open_dir = path.parent().map(Path::to_path_buf);
                self.status_message = Some(StatusMessage::new(
                    format!(
                        "Loaded: {} ({} events)",
                        path.file_name()
                            .map(|n| n.to_string_lossy().to_string())
                            .unwrap_or_else(|| "file".to_string()),
                        events.event_count()
                    ),
                    StatusKind::Success,
                ));
                self.events = events;
                self.view = ViewState::new(home);
                self.load_current();
            }
            Err(e) => {
                log::error!("{e}");
                self.status_message = Some(StatusMessage::new(e.to_string(), StatusKind::Error));
            }
        }
    }

    /// Map keyboard shortcuts to view commands.
    fn handle_keyboard(&self, ctx: &egui::Context) -> Option<ViewCommand> {
        ctx.input(|i| {
            if i.key_pressed(egui::Key::Q) || i.key_pressed(egui::Key::Escape) {
                return Some(ViewCommand::Quit);
            }
            if i.key_pressed(egui::Key::ArrowRight) {
                return Some(ViewCommand::NextEvent);
            }
            if i.key_pressed(egui::Key::ArrowLeft) {
                return Some(ViewCommand::PreviousEvent);
            }
            if i.key_pressed(egui::Key::H) {
                return Some(ViewCommand::ResetZoom);
            }
            if i.key_pressed(egui::Key::V) {
                return Some(ViewCommand::Toggle(TrackCategory::Velo));
            }
            if i.key_pressed(egui::Key::L) {
                return Some(ViewCommand::Toggle(TrackCategory::Long));
            }
            if i.key_pressed(egui::Key::G) {
                return Some(ViewCommand::Toggle(TrackCategory::Generator));
            }
            if i.key_pressed(egui::Key::D) {
                return Some(ViewCommand::ToggleDebug);
            }
            None
        })
    }

    /// Run one command against the view state and follow up on its side
    /// effects (event reload, logging, session end).
    fn handle_command(&mut self, command: ViewCommand, ctx: &egui::Context) {
        if command == ViewCommand::Quit {
            log::info!("Quit requested");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let moved = self.view.apply(command, self.events.event_count());
        if moved {
            self.load_current();
        }
        if command == ViewCommand::ToggleDebug {
            log::info!(
                "Per-event debug logging {}",
                if self.view.debug { "enabled" } else { "disabled" }
            );
        }
    }

    /// Render the top toolbar: file controls and the status message.
    fn render_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("SCT Viewer");
                ui.separator();

                if ui.button("Open File").clicked() {
                    self.open_file_dialog();
                }

                ui.separator();
                ui.label(format!(
                    "File: {}",
                    self.events
                        .path()
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| self.events.path().display().to_string())
                ));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    self.render_status_message(ui);
                });
            });
        });
    }

    /// Render the status message if one is active.
    fn render_status_message(&mut self, ui: &mut egui::Ui) {
        let should_dismiss = self
            .status_message
            .as_ref()
            .is_some_and(|msg| !msg.is_visible());
        if should_dismiss {
            self.status_message = None;
            return;
        }

        let msg_info = self.status_message.as_ref().map(|msg| {
            let color = match msg.kind {
                StatusKind::Success => self.settings.colors.status_success_color(),
                StatusKind::Error => self.settings.colors.status_error_color(),
            };
            (color, msg.text.clone())
        });

        if let Some((color, text)) = msg_info {
            let mut dismiss_clicked = false;
            ui.horizontal(|ui| {
                if ui.small_button("✕").clicked() {
                    dismiss_clicked = true;
                }
                ui.colored_label(color, &text);
            });
            if dismiss_clicked {
                self.status_message = None;
            }
        }
    }

    /// Render the bottom controls panel.
    fn render_controls(&mut self, ctx: &egui::Context) {
        let mut command: Option<ViewCommand> = None;

        egui::TopBottomPanel::bottom("controls")
            .min_height(64.0)
            .show(ctx, |ui| {
                let renderer = ControlsRenderer::new(&self.view, self.events.event_count());
                command = renderer.render(ui);
            });

        if let Some(command) = command {
            self.handle_command(command, ctx);
        }
    }

    /// Render the central event display.
    fn render_display(&mut self, ctx: &egui::Context) {
        let mut command: Option<ViewCommand> = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.events.event_count() == 0 {
                self.render_empty_placeholder(ui);
                return;
            }

            self.render_event_header(ui);
            ui.separator();

            let renderer =
                EventDisplay::new(self.current.as_ref(), &self.view, &self.settings.colors);
            command = renderer.render(ui);
        });

        if let Some(command) = command {
            self.handle_command(command, ctx);
        }
    }

    /// Render the per-event header line: index and category counts.
    fn render_event_header(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(format!(
                "Event {} / {}",
                self.view.ievent + 1,
                self.events.event_count()
            ));
            match &self.current {
                Some(event) => {
                    ui.separator();
                    ui.label(format!("n_vtx = {}", event.vertices.len()));
                    for category in TrackCategory::ALL {
                        ui.colored_label(
                            self.settings.colors.category_legend_color(category),
                            format!(
                                "n_{} = {}",
                                category.label(),
                                event.track_count(category)
                            ),
                        );
                    }
                }
                None => {
                    ui.separator();
                    ui.label("(no event data)");
                }
            }
        });
    }

    /// Render the placeholder view for a file without events.
    fn render_empty_placeholder(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading("No Events");
            ui.add_space(10.0);
            ui.label("The loaded file contains no event records.");
            ui.label("Use \"Open File\" in the toolbar to load another file.");
        });
    }
}

impl eframe::App for SctViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(command) = self.handle_keyboard(ctx) {
            self.handle_command(command, ctx);
        }

        // Remember the window size for the next session
        let screen = ctx.input(|i| i.screen_rect());
        self.settings.window_size = Some((screen.width(), screen.height()));

        self.render_toolbar(ctx);
        self.render_controls(ctx);
        self.render_display(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.settings.save() {
            log::warn!("{e}");
        }
        log::info!("Session ended");
    }
}
