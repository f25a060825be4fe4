use crate::codec::{BinaryReader, BinaryWriter};
use crate::error::{Error, Result};

/// On-disk size of one building placement record.
pub const PLACEMENT_LEN: usize = 8;

/// One building instance placed on an island: graphic id, origin on the
/// island, and a 32-bit packed field carrying orientation, animation frame
/// count, the owning island number, city number, random seed, and player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPlacement {
    pub graphic: u16,
    pub x: u8,
    pub y: u8,
    /// 2 bits: 0..=3, odd values transpose the building footprint.
    pub orientation: u8,
    /// 4 bits.
    pub animation_count: u8,
    /// 8 bits; must match the parent island record.
    pub island_number: u8,
    /// 3 bits.
    pub city: u8,
    /// 5 bits.
    pub random_seed: u8,
    /// 4 bits.
    pub player: u8,
}

impl RawPlacement {
    pub fn read(reader: &mut BinaryReader) -> Result<Self> {
        let graphic = reader.read_u16_le()?;
        let x = reader.read_u8()?;
        let y = reader.read_u8()?;
        let packed = reader.read_u32_le()?;
        Ok(Self {
            graphic,
            x,
            y,
            orientation: (packed & 0x3) as u8,
            animation_count: ((packed >> 2) & 0xF) as u8,
            island_number: ((packed >> 6) & 0xFF) as u8,
            city: ((packed >> 14) & 0x7) as u8,
            random_seed: ((packed >> 17) & 0x1F) as u8,
            player: ((packed >> 22) & 0xF) as u8,
        })
    }

    pub fn write(&self, writer: &mut BinaryWriter) {
        writer.write_u16_le(self.graphic);
        writer.write_u8(self.x);
        writer.write_u8(self.y);
        let packed = (self.orientation as u32 & 0x3)
            | ((self.animation_count as u32 & 0xF) << 2)
            | ((self.island_number as u32) << 6)
            | ((self.city as u32 & 0x7) << 14)
            | ((self.random_seed as u32 & 0x1F) << 17)
            | ((self.player as u32 & 0xF) << 22);
        writer.write_u32_le(packed);
    }

    /// Decodes every placement of one layer chunk, validating that each record
    /// belongs to `island_number`. A mismatch means a chunk was attached to
    /// the wrong island during stream walking and is fatal.
    ///
    /// Zero records is a legal empty layer; trailing bytes shorter than one
    /// record are ignored.
    pub fn decode_layer(payload: &[u8], island_number: u8) -> Result<Vec<Self>> {
        let count = payload.len() / PLACEMENT_LEN;
        let mut reader = BinaryReader::new(payload);
        let mut placements = Vec::with_capacity(count);
        for _ in 0..count {
            let placement = Self::read(&mut reader)?;
            if placement.island_number != island_number {
                return Err(Error::IslandOwnershipMismatch {
                    island: island_number,
                    embedded: placement.island_number,
                });
            }
            placements.push(placement);
        }
        Ok(placements)
    }
}
