pub mod bsh;
pub mod chunk;
pub mod island;
pub mod palette;
pub mod placement;
pub mod reader;
pub mod writer;

pub use bsh::{BshAtlas, SpriteCodec, SpriteImage};
pub use chunk::{single_chunk, Chunk, ChunkStream, CHUNK_HEADER_LEN, CHUNK_ID_LEN};
pub use island::{
    Climate, Fertility, IslandFlags, IslandRecord, IslandSize, OreMountain, ISLAND_RECORD_LEN,
};
pub use palette::{Palette, PALETTE_LEN};
pub use placement::{RawPlacement, PLACEMENT_LEN};
pub use reader::BinaryReader;
pub use writer::BinaryWriter;
