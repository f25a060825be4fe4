#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("truncated chunk at offset {offset}: short read in {context}")]
    TruncatedChunk { offset: u64, context: &'static str },

    #[error("expected exactly {expected} chunk(s), found {actual}")]
    UnexpectedChunkCount { expected: usize, actual: usize },

    #[error("expected chunk id {expected:?}, found {actual:?}")]
    UnexpectedChunkId { expected: &'static str, actual: String },

    #[error("sprite {index}: unknown codec tag {tag}")]
    UnknownSpriteCodec { index: usize, tag: u32 },

    #[error("sprite {index}: invalid dimensions {width}x{height}")]
    InvalidSpriteDimensions { index: usize, width: i32, height: i32 },

    #[error("atlas produced {actual} of {expected} images")]
    IncompleteAtlas { expected: usize, actual: usize },

    #[error("sprite {index}: pixel run escapes the {width}x{height} buffer")]
    SpriteRunOverflow { index: usize, width: u32, height: u32 },

    #[error("invalid {field} value: {value}")]
    InvalidEnumValue { field: &'static str, value: u32 },

    #[error("island record spanned {actual} bytes, layout is {expected}")]
    RecordSizeMismatch { expected: usize, actual: usize },

    #[error("placement owned by island {embedded} attached to island {island}")]
    IslandOwnershipMismatch { island: u8, embedded: u8 },

    #[error("placement origin ({x}, {y}) outside {width}x{height} island grid")]
    PlacementOutOfBounds { x: u8, y: u8, width: u32, height: u32 },

    #[error("island {island} is modified but has no placement layer")]
    MissingLayerData { island: u8 },

    #[error("placement chunk {chunk_id:?} precedes any island record")]
    OrphanedPlacementChunk { chunk_id: String },

    #[error("no footprint for graphic id {graphic}")]
    UnknownBuilding { graphic: u16 },

    #[error("unexpected end of data")]
    UnexpectedEof,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
