//! Projection geometry for the three display panes.
//!
//! Tracks carry only an origin and a momentum vector, so each pane draws
//! them as rays: from the origin along the momentum direction out to the
//! pane boundary. The pane layout and the ray construction follow the
//! usual event-display convention of one transverse view (x-y) and two
//! longitudinal views (z-x, z-y).

use super::event::{Track, Vertex};
use super::view::Extent;

/// The three projection panes of the event display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pane {
    /// Transverse view: x horizontal, y vertical
    XY,
    /// Longitudinal view: z horizontal, x vertical
    ZX,
    /// Longitudinal view: z horizontal, y vertical
    ZY,
}

impl Pane {
    /// Label of the horizontal axis.
    pub fn h_label(self) -> &'static str {
        match self {
            Pane::XY => "x / mm",
            Pane::ZX | Pane::ZY => "z / mm",
        }
    }

    /// Label of the vertical axis.
    pub fn v_label(self) -> &'static str {
        match self {
            Pane::ZX => "x / mm",
            Pane::XY | Pane::ZY => "y / mm",
        }
    }

    /// Horizontal and vertical ranges of this pane within an extent.
    pub fn ranges(self, extent: &Extent) -> ([f64; 2], [f64; 2]) {
        match self {
            Pane::XY => (extent.x, extent.y),
            Pane::ZX => (extent.z, extent.x),
            Pane::ZY => (extent.z, extent.y),
        }
    }

    /// Project a vertex onto this pane.
    pub fn vertex(self, v: &Vertex) -> (f64, f64) {
        self.select(v.x as f64, v.y as f64, v.z as f64)
    }

    /// Project a track origin onto this pane.
    pub fn position(self, t: &Track) -> (f64, f64) {
        self.select(t.x as f64, t.y as f64, t.z as f64)
    }

    /// Project a track momentum onto this pane.
    pub fn momentum(self, t: &Track) -> (f64, f64) {
        self.select(t.px as f64, t.py as f64, t.pz as f64)
    }

    fn select(self, x: f64, y: f64, z: f64) -> (f64, f64) {
        match self {
            Pane::XY => (x, y),
            Pane::ZX => (z, x),
            Pane::ZY => (z, y),
        }
    }
}

/// Build the ray segment for one track in one pane: origin to the pane
/// boundary along the momentum direction.
///
/// The reach is chosen so the ray meets the horizontal limit matching the
/// sign of the horizontal momentum component; when that component vanishes
/// the vertical limit is used instead. A track with no momentum in the
/// pane has no direction and yields `None`.
pub fn track_ray(track: &Track, pane: Pane, extent: &Extent) -> Option<[(f64, f64); 2]> {
    let (a, b) = pane.position(track);
    let (pa, pb) = pane.momentum(track);
    let ([h0, h1], [v0, v1]) = pane.ranges(extent);

    let reach = if pa.abs() > f64::EPSILON {
        ((if pa > 0.0 { h1 } else { h0 }) - a) / pa
    } else if pb.abs() > f64::EPSILON {
        ((if pb > 0.0 { v1 } else { v0 }) - b) / pb
    } else {
        return None;
    };

    // An origin already past the limit would give a negative reach; pin the
    // ray to its origin instead of flipping it backwards.
    let reach = reach.max(0.0);
    Some([(a, b), (a + pa * reach, b + pb * reach)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extent() -> Extent {
        Extent {
            x: [-2.0, 2.0],
            y: [-3.0, 3.0],
            z: [-50.0, 150.0],
        }
    }

    fn track(x: f32, y: f32, z: f32, px: f32, py: f32, pz: f32) -> Track {
        Track {
            x,
            y,
            z,
            px,
            py,
            pz,
        }
    }

    #[test]
    fn test_pane_ranges() {
        let e = extent();
        assert_eq!(Pane::XY.ranges(&e), ([-2.0, 2.0], [-3.0, 3.0]));
        assert_eq!(Pane::ZX.ranges(&e), ([-50.0, 150.0], [-2.0, 2.0]));
        assert_eq!(Pane::ZY.ranges(&e), ([-50.0, 150.0], [-3.0, 3.0]));
    }

    #[test]
    fn test_ray_reaches_positive_limit() {
        let t = track(0.0, 0.0, 0.0, 1.0, 1.0, 0.0);
        let [(a0, b0), (a1, b1)] = track_ray(&t, Pane::XY, &extent()).unwrap();
        assert_eq!((a0, b0), (0.0, 0.0));
        // px > 0, so the ray ends on the x upper limit
        assert_eq!(a1, 2.0);
        assert_eq!(b1, 2.0);
    }

    #[test]
    fn test_ray_reaches_negative_limit() {
        let t = track(0.0, 0.0, 0.0, -1.0, 0.5, 0.0);
        let [(_, _), (a1, b1)] = track_ray(&t, Pane::XY, &extent()).unwrap();
        assert_eq!(a1, -2.0);
        assert_eq!(b1, 1.0);
    }

    #[test]
    fn test_ray_vertical_fallback() {
        // No z momentum: in the z-y pane the ray runs straight up to the
        // vertical limit
        let t = track(0.0, 0.0, 10.0, 0.0, 2.0, 0.0);
        let [(a0, b0), (a1, b1)] = track_ray(&t, Pane::ZY, &extent()).unwrap();
        assert_eq!((a0, b0), (10.0, 0.0));
        assert_eq!(a1, 10.0);
        assert_eq!(b1, 3.0);
    }

    #[test]
    fn test_ray_without_direction_is_none() {
        let t = track(1.0, 1.0, 1.0, 0.0, 0.0, 0.0);
        assert!(track_ray(&t, Pane::XY, &extent()).is_none());
        // In the x-y pane a pure-z track has no direction either
        let t = track(1.0, 1.0, 1.0, 0.0, 0.0, 5.0);
        assert!(track_ray(&t, Pane::XY, &extent()).is_none());
    }

    #[test]
    fn test_ray_origin_past_limit_degenerates() {
        // Origin beyond the x upper limit with outward momentum: reach is
        // clamped so the segment collapses onto the origin
        let t = track(5.0, 0.0, 0.0, 1.0, 1.0, 0.0);
        let [(a0, b0), (a1, b1)] = track_ray(&t, Pane::XY, &extent()).unwrap();
        assert_eq!((a1, b1), (a0, b0));
    }
}
