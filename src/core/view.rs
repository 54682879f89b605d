//! View state management for the event display.
//!
//! This module provides the `ViewState` structure that holds the current
//! event index, per-category visibility flags, the debug-logging flag, and
//! the axis extent, together with the `ViewCommand` transitions applied to
//! it. All transitions are total over the bounded state space: clamping at
//! the event boundaries is silent, and no command can produce an invalid
//! state.

use super::event::{Event, TrackCategory};

/// Margin added around the sampled geometry on the transverse axes, in mm.
pub const XY_MARGIN: f64 = 1.0;

/// Margin added around the sampled geometry on the beam axis, in mm.
pub const Z_MARGIN: f64 = 10.0;

/// Axis limits of the three projection panes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    /// Horizontal limits of the transverse plane, mm
    pub x: [f64; 2],
    /// Vertical limits of the transverse plane, mm
    pub y: [f64; 2],
    /// Limits along the beam axis, mm
    pub z: [f64; 2],
}

impl Default for Extent {
    fn default() -> Self {
        Self {
            x: [-XY_MARGIN, XY_MARGIN],
            y: [-XY_MARGIN, XY_MARGIN],
            z: [-Z_MARGIN, Z_MARGIN],
        }
    }
}

impl Extent {
    /// Smallest extent enclosing every vertex and track origin in `events`,
    /// padded by the axis margins. Returns `None` when no geometry exists.
    pub fn enclosing<'a>(events: impl IntoIterator<Item = &'a Event>) -> Option<Self> {
        let mut bounds: Option<Extent> = None;
        for event in events {
            let vertices = event.vertices.iter().map(|v| (v.x, v.y, v.z));
            let origins = TrackCategory::ALL
                .iter()
                .flat_map(|&c| event.tracks(c).iter().map(|t| (t.x, t.y, t.z)));

            for (x, y, z) in vertices.chain(origins) {
                let (x, y, z) = (x as f64, y as f64, z as f64);
                match bounds.as_mut() {
                    None => {
                        bounds = Some(Extent {
                            x: [x, x],
                            y: [y, y],
                            z: [z, z],
                        });
                    }
                    Some(b) => {
                        b.x = [b.x[0].min(x), b.x[1].max(x)];
                        b.y = [b.y[0].min(y), b.y[1].max(y)];
                        b.z = [b.z[0].min(z), b.z[1].max(z)];
                    }
                }
            }
        }

        bounds.map(|mut b| {
            b.x = [b.x[0] - XY_MARGIN, b.x[1] + XY_MARGIN];
            b.y = [b.y[0] - XY_MARGIN, b.y[1] + XY_MARGIN];
            b.z = [b.z[0] - Z_MARGIN, b.z[1] + Z_MARGIN];
            b
        })
    }

    /// Scale every axis about its center. Factors below 1 zoom in.
    pub fn zoom(&mut self, factor: f64) {
        for axis in [&mut self.x, &mut self.y, &mut self.z] {
            let center = (axis[0] + axis[1]) / 2.0;
            let half = (axis[1] - axis[0]) / 2.0 * factor;
            *axis = [center - half, center + half];
        }
    }
}

/// Commands produced by keyboard shortcuts and the controls panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewCommand {
    /// Advance to the next event, clamped at the last one
    NextEvent,
    /// Step back to the previous event, clamped at the first one
    PreviousEvent,
    /// Jump to a specific event index, clamped into range
    GoToEvent(usize),
    /// Flip the visibility of one track category
    Toggle(TrackCategory),
    /// Restore the axis extent captured at first render
    ResetZoom,
    /// Scale the current extent about its center
    Zoom(f64),
    /// Flip per-event diagnostic logging
    ToggleDebug,
    /// End the session
    Quit,
}

/// Interactive state of one viewing session.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    /// Current event index, always within [0, event_count - 1]
    pub ievent: usize,
    /// Whether per-event diagnostics are written to the log sink
    pub debug: bool,
    /// Current axis limits
    pub extent: Extent,
    show_velo: bool,
    show_long: bool,
    show_generator: bool,
    home: Extent,
}

impl ViewState {
    /// Create the initial state: event 0, every category visible, debug
    /// logging off, axes at the home extent.
    pub fn new(home: Extent) -> Self {
        Self {
            ievent: 0,
            debug: false,
            extent: home,
            show_velo: true,
            show_long: true,
            show_generator: true,
            home,
        }
    }

    /// Whether a track category is currently shown.
    pub fn visible(&self, category: TrackCategory) -> bool {
        match category {
            TrackCategory::Velo => self.show_velo,
            TrackCategory::Long => self.show_long,
            TrackCategory::Generator => self.show_generator,
        }
    }

    /// The extent captured at construction, restored by `ResetZoom`.
    pub fn home_extent(&self) -> Extent {
        self.home
    }

    /// Apply a command. Returns `true` when the current event index changed
    /// and the event needs to be reloaded. `Quit` is a no-op here; ending
    /// the session is the controller's job.
    pub fn apply(&mut self, command: ViewCommand, event_count: usize) -> bool {
        let before = self.ievent;
        match command {
            ViewCommand::NextEvent => {
                if self.ievent + 1 < event_count {
                    self.ievent += 1;
                }
            }
            ViewCommand::PreviousEvent => {
                self.ievent = self.ievent.saturating_sub(1);
            }
            ViewCommand::GoToEvent(index) => {
                self.ievent = index.min(event_count.saturating_sub(1));
            }
            ViewCommand::Toggle(category) => {
                let flag = match category {
                    TrackCategory::Velo => &mut self.show_velo,
                    TrackCategory::Long => &mut self.show_long,
                    TrackCategory::Generator => &mut self.show_generator,
                };
                *flag = !*flag;
            }
            ViewCommand::ResetZoom => {
                self.extent = self.home;
            }
            ViewCommand::Zoom(factor) => {
                self.extent.zoom(factor);
            }
            ViewCommand::ToggleDebug => {
                self.debug = !self.debug;
            }
            ViewCommand::Quit => {}
        }
        self.ievent != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::{Track, Vertex};

    fn extent() -> Extent {
        Extent {
            x: [-2.0, 2.0],
            y: [-3.0, 3.0],
            z: [-50.0, 150.0],
        }
    }

    #[test]
    fn test_new_defaults() {
        let state = ViewState::new(extent());
        assert_eq!(state.ievent, 0);
        assert!(!state.debug);
        for category in TrackCategory::ALL {
            assert!(state.visible(category));
        }
        assert_eq!(state.extent, extent());
    }

    #[test]
    fn test_navigation_clamps_at_boundaries() {
        let mut state = ViewState::new(extent());

        // Lower clamp: stepping back from 0 stays at 0
        assert!(!state.apply(ViewCommand::PreviousEvent, 5));
        assert_eq!(state.ievent, 0);

        // Upper clamp: stepping forward from the last event stays there
        state.ievent = 4;
        assert!(!state.apply(ViewCommand::NextEvent, 5));
        assert_eq!(state.ievent, 4);

        // Interior steps report a change
        state.ievent = 2;
        assert!(state.apply(ViewCommand::NextEvent, 5));
        assert_eq!(state.ievent, 3);
        assert!(state.apply(ViewCommand::PreviousEvent, 5));
        assert_eq!(state.ievent, 2);
    }

    #[test]
    fn test_goto_clamps_into_range() {
        let mut state = ViewState::new(extent());

        assert!(state.apply(ViewCommand::GoToEvent(3), 5));
        assert_eq!(state.ievent, 3);

        state.apply(ViewCommand::GoToEvent(99), 5);
        assert_eq!(state.ievent, 4);

        // Empty file: index pinned to 0
        state.apply(ViewCommand::GoToEvent(7), 0);
        assert_eq!(state.ievent, 0);
    }

    #[test]
    fn test_toggle_is_an_involution() {
        let mut state = ViewState::new(extent());
        for category in TrackCategory::ALL {
            let initial = state.visible(category);
            state.apply(ViewCommand::Toggle(category), 5);
            assert_eq!(state.visible(category), !initial);
            state.apply(ViewCommand::Toggle(category), 5);
            assert_eq!(state.visible(category), initial);
        }
    }

    #[test]
    fn test_toggle_leaves_other_categories_unchanged() {
        let mut state = ViewState::new(extent());
        state.apply(ViewCommand::Toggle(TrackCategory::Velo), 5);
        assert!(!state.visible(TrackCategory::Velo));
        assert!(state.visible(TrackCategory::Long));
        assert!(state.visible(TrackCategory::Generator));
    }

    #[test]
    fn test_reset_zoom_restores_home_extent() {
        let mut state = ViewState::new(extent());

        // Arbitrary zooming and navigation beforehand
        state.apply(ViewCommand::Zoom(0.5), 5);
        state.apply(ViewCommand::Zoom(1.7), 5);
        state.apply(ViewCommand::NextEvent, 5);
        state.apply(ViewCommand::Toggle(TrackCategory::Long), 5);
        assert_ne!(state.extent, extent());

        state.apply(ViewCommand::ResetZoom, 5);
        assert_eq!(state.extent, extent());
        assert_eq!(state.home_extent(), extent());

        // Index and visibility are untouched by the reset
        assert_eq!(state.ievent, 1);
        assert!(!state.visible(TrackCategory::Long));
    }

    #[test]
    fn test_toggle_debug() {
        let mut state = ViewState::new(extent());
        state.apply(ViewCommand::ToggleDebug, 5);
        assert!(state.debug);
        state.apply(ViewCommand::ToggleDebug, 5);
        assert!(!state.debug);
    }

    #[test]
    fn test_zoom_scales_about_center() {
        let mut e = Extent {
            x: [-2.0, 2.0],
            y: [0.0, 4.0],
            z: [-100.0, 100.0],
        };
        e.zoom(0.5);
        assert_eq!(e.x, [-1.0, 1.0]);
        assert_eq!(e.y, [1.0, 3.0]);
        assert_eq!(e.z, [-50.0, 50.0]);
    }

    #[test]
    fn test_enclosing_pads_by_margins() {
        let event = Event {
            vertices: vec![Vertex {
                x: 0.0,
                y: 0.0,
                z: 0.0,
            }],
            velo: vec![],
            long: vec![Track {
                x: 2.0,
                y: -1.0,
                z: 80.0,
                px: 1.0,
                py: 1.0,
                pz: 1.0,
            }],
            generator: vec![],
        };

        let extent = Extent::enclosing([&event]).unwrap();
        assert_eq!(extent.x, [0.0 - XY_MARGIN, 2.0 + XY_MARGIN]);
        assert_eq!(extent.y, [-1.0 - XY_MARGIN, 0.0 + XY_MARGIN]);
        assert_eq!(extent.z, [0.0 - Z_MARGIN, 80.0 + Z_MARGIN]);
    }

    #[test]
    fn test_enclosing_empty_is_none() {
        assert!(Extent::enclosing(std::iter::empty()).is_none());
        assert!(Extent::enclosing([&Event::default()]).is_none());
    }
}
