//! Asset and savegame decoding for a classic island city-building game.
//!
//! The game stores everything in a chunked container format: a 16-byte
//! NUL-padded ASCII type id, a little-endian u32 length, and the payload.
//! This crate decodes the three file families built on it:
//!
//! - the 256-color palette (a single `"COL"` chunk),
//! - run-length-encoded sprite atlases (a single `"BSH"` chunk holding an
//!   offset table and many individually encoded images),
//! - savegames: a chunk stream of fixed-layout island records and packed
//!   building placements, expanded here into dense per-tile layers.
//!
//! Decoding is synchronous and fails fast: malformed data aborts the file
//! with a typed [`Error`] carrying enough context to diagnose the corrupt
//! asset. Decoded values are immutable and carry no references back into
//! the decoder.

pub mod codec;
pub mod error;
pub mod state;

pub use codec::{
    BinaryReader, BinaryWriter, BshAtlas, Chunk, ChunkStream, Climate, Fertility, IslandFlags,
    IslandRecord, IslandSize, OreMountain, Palette, RawPlacement, SpriteCodec, SpriteImage,
};
pub use error::{Error, Result};
pub use state::{
    expand_placements, resolve_layers, BuildingCatalog, BuildingTable, Footprint, Island,
    ResolvedLayers, Savegame, TileCell, TileGrid,
};
