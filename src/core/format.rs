//! Binary reader for SCT event files.
//!
//! This module decodes the SCT container layout into `Event` structures.
//! The viewer is a consumer of the format only; it never writes it.
//!
//! Layout (all integers and floats little-endian):
//!
//! ```text
//! magic          4 bytes   "SCT1"
//! version        u32       supported version is 1
//! event count    u32
//! offset table   count x u64   absolute offset of each event record
//! event record   vertices:  u32 len, len x 3 f32 (x, y, z)
//!                VELO:      u32 len, len x 6 f32 (x, y, z, px, py, pz)
//!                Long:      u32 len, len x 6 f32
//!                Generator: u32 len, len x 6 f32
//! ```

use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};
use thiserror::Error;

use super::event::{Event, Track, Vertex};

/// File signature at offset 0.
pub const MAGIC: [u8; 4] = *b"SCT1";

/// The container version this reader understands.
pub const SUPPORTED_VERSION: u32 = 1;

/// Upper bound on any single collection length. A corrupt count fails fast
/// instead of attempting a multi-gigabyte allocation.
pub const MAX_COLLECTION_LEN: u32 = 1 << 20;

/// Errors that can occur while decoding an SCT file.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Underlying read failed or the file was truncated
    #[error("Failed to read SCT data: {0}")]
    Io(#[from] std::io::Error),

    /// The file does not start with the SCT signature
    #[error("Invalid file signature {found:?}; expected {expected:?}", expected = MAGIC)]
    InvalidMagic { found: [u8; 4] },

    /// The container version is newer than this reader
    #[error("Unsupported SCT version {found}; expected version {expected}", expected = SUPPORTED_VERSION)]
    UnsupportedVersion { found: u32 },

    /// An index-table entry points outside the file
    #[error("Event {index} has offset {offset} beyond the end of the file ({file_len} bytes)")]
    BadOffset {
        index: usize,
        offset: u64,
        file_len: u64,
    },

    /// A collection length exceeds the sanity limit
    #[error("Event {index} declares a collection of {count} entries; limit is {limit}", limit = MAX_COLLECTION_LEN)]
    OversizedCollection { index: usize, count: u32 },

    /// The requested event index does not exist
    #[error("Event index {index} is out of range; the file holds {count} events")]
    EventOutOfRange { index: usize, count: usize },
}

/// Decoder for one SCT stream.
///
/// `new` reads and validates the header and the event offset table; events
/// themselves are decoded on demand by `read_event`.
pub struct SctReader<R: Read + Seek> {
    source: R,
    version: u32,
    offsets: Vec<u64>,
}

impl<R: Read + Seek> SctReader<R> {
    /// Read the container header and offset table from `source`.
    pub fn new(mut source: R) -> Result<Self, FormatError> {
        let file_len = source.seek(SeekFrom::End(0))?;
        source.seek(SeekFrom::Start(0))?;

        let mut magic = [0u8; 4];
        source.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(FormatError::InvalidMagic { found: magic });
        }

        let version = source.read_u32::<LittleEndian>()?;
        if version != SUPPORTED_VERSION {
            return Err(FormatError::UnsupportedVersion { found: version });
        }

        let count = source.read_u32::<LittleEndian>()? as usize;
        let mut offsets = Vec::with_capacity(count);
        for index in 0..count {
            let offset = source.read_u64::<LittleEndian>()?;
            if offset >= file_len {
                return Err(FormatError::BadOffset {
                    index,
                    offset,
                    file_len,
                });
            }
            offsets.push(offset);
        }

        Ok(Self {
            source,
            version,
            offsets,
        })
    }

    /// Container version found in the header.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Total number of events in the file.
    pub fn event_count(&self) -> usize {
        self.offsets.len()
    }

    /// Decode the event at `index`.
    pub fn read_event(&mut self, index: usize) -> Result<Event, FormatError> {
        let offset = *self
            .offsets
            .get(index)
            .ok_or(FormatError::EventOutOfRange {
                index,
                count: self.offsets.len(),
            })?;
        self.source.seek(SeekFrom::Start(offset))?;

        let vertices = self.read_vertices(index)?;
        let velo = self.read_tracks(index)?;
        let long = self.read_tracks(index)?;
        let generator = self.read_tracks(index)?;

        Ok(Event {
            vertices,
            velo,
            long,
            generator,
        })
    }

    /// Read one collection length, enforcing the sanity limit.
    fn read_len(&mut self, index: usize) -> Result<usize, FormatError> {
        let count = self.source.read_u32::<LittleEndian>()?;
        if count > MAX_COLLECTION_LEN {
            return Err(FormatError::OversizedCollection { index, count });
        }
        Ok(count as usize)
    }

    fn read_vertices(&mut self, index: usize) -> Result<Vec<Vertex>, FormatError> {
        let len = self.read_len(index)?;
        let mut floats = vec![0.0_f32; len * 3];
        self.source.read_f32_into::<LittleEndian>(&mut floats)?;
        Ok(bytemuck::cast_slice::<f32, Vertex>(&floats).to_vec())
    }

    fn read_tracks(&mut self, index: usize) -> Result<Vec<Track>, FormatError> {
        let len = self.read_len(index)?;
        let mut floats = vec![0.0_f32; len * 6];
        self.source.read_f32_into::<LittleEndian>(&mut floats)?;
        Ok(bytemuck::cast_slice::<f32, Track>(&floats).to_vec())
    }
}

#[cfg(test)]
pub(crate) mod testdata {
    //! Byte-image builders for reader tests. The viewer never writes SCT
    //! files; these exist so tests can exercise the decode path.

    use byteorder::{LittleEndian, WriteBytesExt};

    use super::{MAGIC, SUPPORTED_VERSION};
    use crate::core::event::{Event, Track, Vertex};

    /// Serialize `events` into the container layout `SctReader` consumes.
    pub fn encode(events: &[Event]) -> Vec<u8> {
        let header_len = (MAGIC.len() + 4 + 4 + 8 * events.len()) as u64;

        let mut body = Vec::new();
        let mut offsets = Vec::with_capacity(events.len());
        for event in events {
            offsets.push(header_len + body.len() as u64);
            write_vertices(&mut body, &event.vertices);
            write_tracks(&mut body, &event.velo);
            write_tracks(&mut body, &event.long);
            write_tracks(&mut body, &event.generator);
        }

        let mut out = Vec::new();
        out.extend_from_slice(&MAGIC);
        out.write_u32::<LittleEndian>(SUPPORTED_VERSION).unwrap();
        out.write_u32::<LittleEndian>(events.len() as u32).unwrap();
        for offset in offsets {
            out.write_u64::<LittleEndian>(offset).unwrap();
        }
        out.extend_from_slice(&body);
        out
    }

    fn write_vertices(out: &mut Vec<u8>, vertices: &[Vertex]) {
        out.write_u32::<LittleEndian>(vertices.len() as u32).unwrap();
        for v in vertices {
            for value in [v.x, v.y, v.z] {
                out.write_f32::<LittleEndian>(value).unwrap();
            }
        }
    }

    fn write_tracks(out: &mut Vec<u8>, tracks: &[Track]) {
        out.write_u32::<LittleEndian>(tracks.len() as u32).unwrap();
        for t in tracks {
            for value in [t.x, t.y, t.z, t.px, t.py, t.pz] {
                out.write_f32::<LittleEndian>(value).unwrap();
            }
        }
    }

    /// Deterministic pseudo-events with geometry that varies by index.
    pub fn sample_events(count: usize) -> Vec<Event> {
        (0..count)
            .map(|i| {
                let i = i as f32;
                Event {
                    vertices: vec![Vertex {
                        x: 0.1 * i,
                        y: -0.1 * i,
                        z: 5.0 * i,
                    }],
                    velo: vec![
                        Track {
                            x: 0.1 * i,
                            y: -0.1 * i,
                            z: 5.0 * i,
                            px: 120.0,
                            py: 40.0 + i,
                            pz: 900.0,
                        };
                        2
                    ],
                    long: vec![Track {
                        x: 0.1 * i,
                        y: -0.1 * i,
                        z: 5.0 * i,
                        px: -250.0,
                        py: 80.0,
                        pz: 4000.0 + 10.0 * i,
                    }],
                    generator: vec![Track {
                        x: 0.0,
                        y: 0.0,
                        z: 5.0 * i,
                        px: 60.0,
                        py: -90.0,
                        pz: -1500.0,
                    }],
                }
            })
            .collect()
    }
}
