use std::io::Read;

use crate::codec::chunk::{single_chunk, Chunk, ChunkStream};
use crate::codec::{BinaryReader, Palette};
use crate::error::{Error, Result};

const ATLAS_CHUNK_ID: &str = "BSH";

/// Offset gap that marks an entry with no pixel data.
const PLACEHOLDER_GAP: u32 = 20;

/// End-of-image marker in both run-length codecs.
const IMAGE_END: u32 = 0xFF;
/// End-of-row marker: resets the x cursor and advances y.
const ROW_END: u32 = 0xFE;

/// How one atlas entry's pixel data is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteCodec {
    /// Byte-wide run counts, pixels are palette indices.
    Normal,
    /// u32 run counts, pixels are direct BGR bytes plus one ignored byte.
    New,
    /// No pixel data; decodes to a fully transparent buffer.
    Placeholder,
}

impl SpriteCodec {
    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            1 => Some(Self::Normal),
            13 => Some(Self::New),
            _ => None,
        }
    }
}

/// One decoded sprite: a `width x height` ARGB pixel buffer.
///
/// Unwritten pixels stay fully transparent (zero).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteImage {
    pub width: u32,
    pub height: u32,
    pub codec: SpriteCodec,
    pub pixels: Vec<u32>,
}

impl SpriteImage {
    fn transparent(width: u32, height: u32, codec: SpriteCodec) -> Self {
        Self {
            width,
            height,
            codec,
            pixels: vec![0; (width * height) as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        self.pixels[(y * self.width + x) as usize]
    }
}

/// A decoded sprite atlas: every image of one `"BSH"` chunk, in offset-table
/// order. Index order is the externally visible sprite index order.
#[derive(Debug, Clone)]
pub struct BshAtlas {
    images: Vec<SpriteImage>,
}

impl BshAtlas {
    /// Decodes an atlas from a chunk sequence that must consist of exactly one
    /// `"BSH"` chunk. The palette is only consulted by the NORMAL codec.
    pub fn decode<I>(chunks: I, palette: &Palette) -> Result<Self>
    where
        I: IntoIterator<Item = Result<Chunk>>,
    {
        let chunk = single_chunk(chunks)?;
        if chunk.id() != ATLAS_CHUNK_ID {
            return Err(Error::UnexpectedChunkId {
                expected: ATLAS_CHUNK_ID,
                actual: chunk.id().to_string(),
            });
        }

        let mut reader = BinaryReader::new(chunk.payload());

        // The first offset marks where image data starts and thereby bounds
        // the offset table itself.
        let image_start = reader.read_u32_le()?;
        let mut offsets = vec![image_start];
        while reader.position() < image_start as usize {
            offsets.push(reader.read_u32_le()?);
        }

        let mut images = Vec::with_capacity(offsets.len());
        for (index, &offset) in offsets.iter().enumerate() {
            let placeholder = offsets
                .get(index + 1)
                .is_some_and(|&next| next.checked_sub(offset) == Some(PLACEHOLDER_GAP));
            reader.set_position(offset as usize);
            images.push(decode_image(&mut reader, index, placeholder, palette)?);
        }

        if images.len() != offsets.len() {
            return Err(Error::IncompleteAtlas {
                expected: offsets.len(),
                actual: images.len(),
            });
        }

        tracing::debug!(
            images = images.len(),
            placeholders = images
                .iter()
                .filter(|i| i.codec == SpriteCodec::Placeholder)
                .count(),
            "decoded sprite atlas"
        );
        Ok(Self { images })
    }

    pub fn from_reader<R: Read>(source: R, palette: &Palette) -> Result<Self> {
        Self::decode(ChunkStream::new(source), palette)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SpriteImage> {
        self.images.get(index)
    }

    pub fn images(&self) -> &[SpriteImage] {
        &self.images
    }

    pub fn into_images(self) -> Vec<SpriteImage> {
        self.images
    }
}

fn read_dimensions(reader: &mut BinaryReader, index: usize) -> Result<(u32, u32)> {
    let width = reader.read_i32_le()?;
    let height = reader.read_i32_le()?;
    if width <= 0 || height <= 0 {
        return Err(Error::InvalidSpriteDimensions { index, width, height });
    }
    Ok((width as u32, height as u32))
}

fn decode_image(
    reader: &mut BinaryReader,
    index: usize,
    placeholder: bool,
    palette: &Palette,
) -> Result<SpriteImage> {
    let (width, height) = read_dimensions(reader, index)?;
    if placeholder {
        return Ok(SpriteImage::transparent(width, height, SpriteCodec::Placeholder));
    }

    let tag = reader.read_u32_le()?;
    let codec = SpriteCodec::from_tag(tag)
        .ok_or(Error::UnknownSpriteCodec { index, tag })?;
    let _encoded_len = reader.read_u32_le()?;

    let mut image = SpriteImage::transparent(width, height, codec);
    match codec {
        SpriteCodec::Normal => decode_normal(reader, index, &mut image, palette)?,
        SpriteCodec::New => decode_new(reader, index, &mut image)?,
        SpriteCodec::Placeholder => unreachable!("placeholder has no codec tag"),
    }
    Ok(image)
}

fn put_pixel(image: &mut SpriteImage, index: usize, x: u32, y: u32, color: u32) -> Result<()> {
    if x >= image.width || y >= image.height {
        return Err(Error::SpriteRunOverflow {
            index,
            width: image.width,
            height: image.height,
        });
    }
    image.pixels[(y * image.width + x) as usize] = color;
    Ok(())
}

fn decode_normal(
    reader: &mut BinaryReader,
    index: usize,
    image: &mut SpriteImage,
    palette: &Palette,
) -> Result<()> {
    let mut x = 0u32;
    let mut y = 0u32;
    loop {
        match reader.read_u8()? as u32 {
            IMAGE_END => return Ok(()),
            ROW_END => {
                x = 0;
                y += 1;
            }
            transparent => {
                x += transparent;
                let count = reader.read_u8()?;
                for _ in 0..count {
                    let color = palette.argb(reader.read_u8()?);
                    put_pixel(image, index, x, y, color)?;
                    x += 1;
                }
            }
        }
    }
}

fn decode_new(reader: &mut BinaryReader, index: usize, image: &mut SpriteImage) -> Result<()> {
    let mut x = 0u32;
    let mut y = 0u32;
    loop {
        match reader.read_u32_le()? {
            IMAGE_END => return Ok(()),
            ROW_END => {
                x = 0;
                y += 1;
            }
            transparent => {
                x += transparent;
                let count = reader.read_u32_le()?;
                for _ in 0..count {
                    let b = reader.read_u8()? as u32;
                    let g = reader.read_u8()? as u32;
                    let r = reader.read_u8()? as u32;
                    reader.skip(1)?;
                    put_pixel(image, index, x, y, 0xFF00_0000 | (r << 16) | (g << 8) | b)?;
                    x += 1;
                }
            }
        }
    }
}
