use std::io::Read;

use crate::codec::chunk::{single_chunk, Chunk, ChunkStream};
use crate::codec::BinaryReader;
use crate::error::{Error, Result};

const PALETTE_CHUNK_ID: &str = "COL";

/// Number of palette entries.
pub const PALETTE_LEN: usize = 256;

/// The game's 256-color palette, decoded from a single-`"COL"`-chunk file.
///
/// Entries are packed `0x00RRGGBB`; the file's 4th byte per entry is padding
/// and discarded. Immutable once constructed, shared read-only by every atlas
/// decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: [u32; PALETTE_LEN],
}

impl Palette {
    /// Decodes a palette from a chunk sequence that must consist of exactly
    /// one `"COL"` chunk with at least 256 x 4 payload bytes.
    pub fn decode<I>(chunks: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<Chunk>>,
    {
        let chunk = single_chunk(chunks)?;
        if chunk.id() != PALETTE_CHUNK_ID {
            return Err(Error::UnexpectedChunkId {
                expected: PALETTE_CHUNK_ID,
                actual: chunk.id().to_string(),
            });
        }

        let mut reader = BinaryReader::new(chunk.payload());
        let mut entries = [0u32; PALETTE_LEN];
        for entry in entries.iter_mut() {
            let r = reader.read_u8()? as u32;
            let g = reader.read_u8()? as u32;
            let b = reader.read_u8()? as u32;
            reader.skip(1)?;
            *entry = (r << 16) | (g << 8) | b;
        }
        Ok(Self { entries })
    }

    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        Self::decode(ChunkStream::new(source))
    }

    /// Packed `0x00RRGGBB` color for a palette index.
    pub fn rgb(&self, index: u8) -> u32 {
        self.entries[index as usize]
    }

    /// Fully opaque `0xFFRRGGBB` form, as written into sprite pixel buffers.
    pub fn argb(&self, index: u8) -> u32 {
        0xFF00_0000 | self.entries[index as usize]
    }
}
