//! Event display rendering module.
//!
//! Draws one event's geometry in three projection panes: the transverse
//! x-y view on the left and the two longitudinal views (z-y above z-x)
//! stacked on the right. Vertices draw as filled markers, tracks as
//! translucent rays out to the pane boundary.

use eframe::egui::{self, Align2, FontId, Painter, Pos2, Rect, Sense, Stroke};

use crate::core::config::ColorSettings;
use crate::core::event::{Event, TrackCategory};
use crate::core::projection::{track_ray, Pane};
use crate::core::view::{ViewCommand, ViewState};

/// Gap between panes in pixels.
const PANE_GAP: f32 = 8.0;

/// Fraction of the width taken by the transverse pane.
const XY_PANE_FRACTION: f32 = 0.42;

/// Strip reserved under each pane for tick values and the axis label.
const AXIS_STRIP: f32 = 18.0;

/// Tick mark length in pixels.
const TICK_LEN: f32 = 4.0;

/// Vertex marker radius in pixels.
const VERTEX_RADIUS: f32 = 2.5;

/// Scroll-to-zoom sensitivity, matching the usual egui camera feel.
const ZOOM_PER_SCROLL_UNIT: f32 = 0.002;

/// Renders the three projection panes for the current event.
pub struct EventDisplay<'a> {
    /// Event to draw; `None` draws empty panes (failed load)
    event: Option<&'a Event>,
    /// Current view state (visibility flags and axis extent)
    view: &'a ViewState,
    /// Display colors
    colors: &'a ColorSettings,
}

impl<'a> EventDisplay<'a> {
    /// Create a new display renderer.
    pub fn new(event: Option<&'a Event>, view: &'a ViewState, colors: &'a ColorSettings) -> Self {
        Self {
            event,
            view,
            colors,
        }
    }

    /// Render the panes and return a zoom command when the user scrolls
    /// over them.
    pub fn render(&self, ui: &mut egui::Ui) -> Option<ViewCommand> {
        let available = ui.available_size();
        let (response, painter) = ui.allocate_painter(available, Sense::hover());
        let rect = response.rect;

        let split_x = rect.left() + rect.width() * XY_PANE_FRACTION;
        let xy_rect = Rect::from_min_max(rect.min, Pos2::new(split_x, rect.bottom()));
        let right = Rect::from_min_max(Pos2::new(split_x + PANE_GAP, rect.top()), rect.max);
        let mid_y = right.top() + right.height() / 2.0;
        let zy_rect = Rect::from_min_max(right.min, Pos2::new(right.right(), mid_y));
        let zx_rect =
            Rect::from_min_max(Pos2::new(right.left(), mid_y + PANE_GAP), right.max);

        self.draw_pane(&painter, xy_rect, Pane::XY);
        self.draw_pane(&painter, zy_rect, Pane::ZY);
        self.draw_pane(&painter, zx_rect, Pane::ZX);

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let factor = (1.0 - scroll * ZOOM_PER_SCROLL_UNIT).clamp(0.2, 5.0);
                return Some(ViewCommand::Zoom(factor as f64));
            }
        }
        None
    }

    /// Draw one projection pane: background, frame, ticks, then geometry.
    fn draw_pane(&self, painter: &Painter, rect: Rect, pane: Pane) {
        // Leave room for the tick values and axis label below the plot
        let plot_rect = Rect::from_min_max(
            rect.min,
            Pos2::new(rect.right(), rect.bottom() - AXIS_STRIP),
        );
        if plot_rect.height() <= 0.0 || plot_rect.width() <= 0.0 {
            return;
        }

        painter.rect_filled(plot_rect, 0.0, self.colors.background_color());
        painter.rect_stroke(
            plot_rect,
            0.0,
            Stroke::new(1.0, self.colors.grid_color()),
            egui::StrokeKind::Inside,
        );

        let (h_range, v_range) = pane.ranges(&self.view.extent);
        self.draw_ticks(painter, plot_rect, h_range, v_range);
        self.draw_axis_labels(painter, rect, plot_rect, pane);

        // Geometry is clipped to the pane so rays never cross into a
        // neighboring view
        let clipped = painter.with_clip_rect(plot_rect);
        if let Some(event) = self.event {
            self.draw_tracks(&clipped, plot_rect, pane, event, h_range, v_range);
            self.draw_vertices(&clipped, plot_rect, pane, event, h_range, v_range);
        }
    }

    /// Draw tick marks and values along the bottom and left edges.
    fn draw_ticks(&self, painter: &Painter, rect: Rect, h_range: [f64; 2], v_range: [f64; 2]) {
        let tick_color = self.colors.grid_color();
        let value_color = self.colors.text_dim_color();
        let font = FontId::proportional(10.0);

        let step = tick_step(h_range[1] - h_range[0]);
        let mut value = (h_range[0] / step).ceil() * step;
        while value <= h_range[1] {
            let pos = to_screen(rect, h_range, v_range, value, v_range[0]);
            painter.line_segment(
                [pos, Pos2::new(pos.x, pos.y - TICK_LEN)],
                Stroke::new(1.0, tick_color),
            );
            painter.text(
                Pos2::new(pos.x, rect.bottom() + 2.0),
                Align2::CENTER_TOP,
                format_tick(value),
                font.clone(),
                value_color,
            );
            value += step;
        }

        let step = tick_step(v_range[1] - v_range[0]);
        let mut value = (v_range[0] / step).ceil() * step;
        while value <= v_range[1] {
            let pos = to_screen(rect, h_range, v_range, h_range[0], value);
            painter.line_segment(
                [pos, Pos2::new(pos.x + TICK_LEN, pos.y)],
                Stroke::new(1.0, tick_color),
            );
            painter.text(
                Pos2::new(pos.x + TICK_LEN + 2.0, pos.y),
                Align2::LEFT_CENTER,
                format_tick(value),
                font.clone(),
                value_color,
            );
            value += step;
        }
    }

    /// Draw the axis labels: horizontal under the pane, vertical in the
    /// upper-left corner.
    fn draw_axis_labels(&self, painter: &Painter, rect: Rect, plot_rect: Rect, pane: Pane) {
        let color = self.colors.text_label_color();
        painter.text(
            Pos2::new(plot_rect.center().x, rect.bottom() - 2.0),
            Align2::CENTER_BOTTOM,
            pane.h_label(),
            FontId::proportional(12.0),
            color,
        );
        painter.text(
            Pos2::new(plot_rect.left() + 6.0, plot_rect.top() + 4.0),
            Align2::LEFT_TOP,
            pane.v_label(),
            FontId::proportional(12.0),
            color,
        );
    }

    /// Draw the primary vertex markers.
    fn draw_vertices(
        &self,
        painter: &Painter,
        rect: Rect,
        pane: Pane,
        event: &Event,
        h_range: [f64; 2],
        v_range: [f64; 2],
    ) {
        let color = self.colors.vertex_color();
        for vertex in &event.vertices {
            let (a, b) = pane.vertex(vertex);
            painter.circle_filled(to_screen(rect, h_range, v_range, a, b), VERTEX_RADIUS, color);
        }
    }

    /// Draw the track rays of every visible category.
    fn draw_tracks(
        &self,
        painter: &Painter,
        rect: Rect,
        pane: Pane,
        event: &Event,
        h_range: [f64; 2],
        v_range: [f64; 2],
    ) {
        for category in TrackCategory::ALL {
            if !self.view.visible(category) {
                continue;
            }
            let stroke = Stroke::new(1.0, self.colors.category_color(category));
            for track in event.tracks(category) {
                if let Some([(a0, b0), (a1, b1)]) = track_ray(track, pane, &self.view.extent) {
                    painter.line_segment(
                        [
                            to_screen(rect, h_range, v_range, a0, b0),
                            to_screen(rect, h_range, v_range, a1, b1),
                        ],
                        stroke,
                    );
                }
            }
        }
    }
}

/// Map a data point into pane pixels; the vertical axis points up.
fn to_screen(rect: Rect, h_range: [f64; 2], v_range: [f64; 2], a: f64, b: f64) -> Pos2 {
    let h = (a - h_range[0]) / (h_range[1] - h_range[0]);
    let v = (b - v_range[0]) / (v_range[1] - v_range[0]);
    Pos2::new(
        rect.left() + h as f32 * rect.width(),
        rect.bottom() - v as f32 * rect.height(),
    )
}

/// Pick a 1-2-5 tick step that yields a handful of ticks over `span`.
fn tick_step(span: f64) -> f64 {
    let raw = (span / 6.0).max(f64::MIN_POSITIVE);
    let magnitude = 10_f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let step = if normalized < 1.5 {
        1.0
    } else if normalized < 3.5 {
        2.0
    } else if normalized < 7.5 {
        5.0
    } else {
        10.0
    };
    step * magnitude
}

/// Trim trailing zeros off tick values.
fn format_tick(value: f64) -> String {
    if value.abs() >= 100.0 || value.fract().abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}
