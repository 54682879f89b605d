//! Event data structures.
//!
//! This module defines the in-memory representation of one SCT event:
//! a collection of primary vertices plus three categories of tracks.

use bytemuck::{Pod, Zeroable};

/// A primary vertex position, in mm.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// One reconstructed or simulated trajectory, stored as an origin point
/// (mm) plus a momentum vector (MeV/c).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Track {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub px: f32,
    pub py: f32,
    pub pz: f32,
}

/// The track categories recorded in an SCT event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackCategory {
    /// VELO-only track segments
    Velo,
    /// Long tracks (full-detector reconstruction)
    Long,
    /// Generator-level (simulated) tracks
    Generator,
}

impl TrackCategory {
    /// All categories, in display order.
    pub const ALL: [TrackCategory; 3] = [
        TrackCategory::Velo,
        TrackCategory::Long,
        TrackCategory::Generator,
    ];

    /// Display name for this category.
    pub fn label(self) -> &'static str {
        match self {
            TrackCategory::Velo => "VELO",
            TrackCategory::Long => "Long",
            TrackCategory::Generator => "Generator",
        }
    }
}

/// One collision record: vertices plus tracks by category.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Event {
    /// Primary vertex positions
    pub vertices: Vec<Vertex>,
    /// VELO track segments
    pub velo: Vec<Track>,
    /// Long tracks
    pub long: Vec<Track>,
    /// Generator-level tracks
    pub generator: Vec<Track>,
}

impl Event {
    /// The tracks of one category.
    pub fn tracks(&self, category: TrackCategory) -> &[Track] {
        match category {
            TrackCategory::Velo => &self.velo,
            TrackCategory::Long => &self.long,
            TrackCategory::Generator => &self.generator,
        }
    }

    /// Number of tracks in one category.
    pub fn track_count(&self, category: TrackCategory) -> usize {
        self.tracks(category).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels() {
        assert_eq!(TrackCategory::Velo.label(), "VELO");
        assert_eq!(TrackCategory::Long.label(), "Long");
        assert_eq!(TrackCategory::Generator.label(), "Generator");
    }

    #[test]
    fn test_tracks_accessor_matches_category() {
        let event = Event {
            vertices: vec![Vertex::default()],
            velo: vec![Track::default(); 2],
            long: vec![Track::default(); 3],
            generator: vec![Track::default(); 4],
        };

        assert_eq!(event.track_count(TrackCategory::Velo), 2);
        assert_eq!(event.track_count(TrackCategory::Long), 3);
        assert_eq!(event.track_count(TrackCategory::Generator), 4);

        for category in TrackCategory::ALL {
            assert_eq!(event.tracks(category).len(), event.track_count(category));
        }
    }

    #[test]
    fn test_default_event_is_empty() {
        let event = Event::default();
        assert!(event.vertices.is_empty());
        for category in TrackCategory::ALL {
            assert!(event.tracks(category).is_empty());
        }
    }
}
