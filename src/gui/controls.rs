//! Navigation controls module.
//!
//! Renders the bottom panel: event navigation buttons, the event counter
//! and scrubber, and the category/debug toggles. Interaction is reported
//! back as `ViewCommand`s; the renderer never mutates view state itself.

use eframe::egui;

use crate::core::event::TrackCategory;
use crate::core::view::{ViewCommand, ViewState};

/// Renders the controls panel and returns any action triggered by user
/// interaction.
pub struct ControlsRenderer<'a> {
    /// Current view state
    view: &'a ViewState,
    /// Total number of events in the file
    event_count: usize,
}

impl<'a> ControlsRenderer<'a> {
    /// Create a new controls renderer.
    pub fn new(view: &'a ViewState, event_count: usize) -> Self {
        Self { view, event_count }
    }

    /// Render the controls and return any triggered command.
    pub fn render(&self, ui: &mut egui::Ui) -> Option<ViewCommand> {
        let mut command: Option<ViewCommand> = None;

        ui.vertical(|ui| {
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                command = self.render_navigation_buttons(ui).or(command);
                ui.separator();
                self.render_event_counter(ui);
                ui.separator();
                command = self.render_scrubber(ui).or(command);
            });

            ui.add_space(4.0);

            ui.horizontal(|ui| {
                command = self.render_toggles(ui).or(command);
            });
        });

        command
    }

    /// Render navigation buttons and return any triggered command.
    fn render_navigation_buttons(&self, ui: &mut egui::Ui) -> Option<ViewCommand> {
        let mut command: Option<ViewCommand> = None;
        let enabled = self.event_count > 0;

        ui.add_enabled_ui(enabled, |ui| {
            if ui.button("⏮").on_hover_text("First event").clicked() {
                command = Some(ViewCommand::GoToEvent(0));
            }
            if ui
                .button("◀ Backward")
                .on_hover_text("Previous event (←)")
                .clicked()
            {
                command = Some(ViewCommand::PreviousEvent);
            }
            if ui
                .button("Forward ▶")
                .on_hover_text("Next event (→)")
                .clicked()
            {
                command = Some(ViewCommand::NextEvent);
            }
            if ui.button("⏭").on_hover_text("Last event").clicked() {
                command = Some(ViewCommand::GoToEvent(self.event_count.saturating_sub(1)));
            }
        });

        command
    }

    /// Render the event counter display (1-based, like the pane header).
    fn render_event_counter(&self, ui: &mut egui::Ui) {
        if self.event_count == 0 {
            ui.label("No events");
        } else {
            ui.label(format!(
                "Event: {} / {}",
                self.view.ievent + 1,
                self.event_count
            ));
        }
    }

    /// Render the event scrubber and return any triggered command.
    fn render_scrubber(&self, ui: &mut egui::Ui) -> Option<ViewCommand> {
        let mut command: Option<ViewCommand> = None;

        ui.add_enabled_ui(self.event_count > 1, |ui| {
            let max_index = self.event_count.saturating_sub(1) as f32;
            let mut index = self.view.ievent as f32;
            let response = ui.add(
                egui::Slider::new(&mut index, 0.0..=max_index.max(1.0))
                    .show_value(false)
                    .text(""),
            );
            if response.changed() {
                command = Some(ViewCommand::GoToEvent(index as usize));
            }
        });

        command
    }

    /// Render the visibility and debug toggles plus the zoom reset.
    fn render_toggles(&self, ui: &mut egui::Ui) -> Option<ViewCommand> {
        let mut command: Option<ViewCommand> = None;

        ui.label("Show:");
        for (category, label) in [
            (TrackCategory::Velo, "VELO (V)"),
            (TrackCategory::Long, "Long (L)"),
            (TrackCategory::Generator, "Generator (G)"),
        ] {
            let mut shown = self.view.visible(category);
            if ui.checkbox(&mut shown, label).changed() {
                command = Some(ViewCommand::Toggle(category));
            }
        }

        ui.separator();

        let mut debug = self.view.debug;
        if ui
            .checkbox(&mut debug, "Debug log (D)")
            .on_hover_text("Write per-event diagnostics to the log")
            .changed()
        {
            command = Some(ViewCommand::ToggleDebug);
        }

        ui.separator();

        if ui
            .button("Reset view (H)")
            .on_hover_text("Restore the initial axis extent")
            .clicked()
        {
            command = Some(ViewCommand::ResetZoom);
        }

        command
    }
}
