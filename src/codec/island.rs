use bitflags::bitflags;

use crate::codec::{BinaryReader, BinaryWriter};
use crate::error::{Error, Result};

/// On-disk size of one island record.
pub const ISLAND_RECORD_LEN: usize = 116;

bitflags! {
    /// Flag bits packed into the island record's fourth byte.
    ///
    /// Unknown bits are preserved verbatim so re-encoding is byte-exact.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct IslandFlags: u8 {
        const DROUGHT_START = 1 << 0;
        const NO_FIX = 1 << 1;
        const VOLCANO = 1 << 2;
    }
}

/// Fertility of an island, stored as a 4-byte magic value.
///
/// The encoding table is small and fixed; values outside it are known to occur
/// in shipped game data and deliberately degrade to [`Fertility::Random`]
/// instead of failing the decode. This is the format's single tolerated
/// fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fertility {
    #[default]
    Random,
    None,
    Tobacco,
    Spices,
    TobaccoAndSpices,
    Sugar,
    TobaccoAndSugar,
    SpicesAndSugar,
    Wool,
    Wine,
    WoolAndWine,
    Cocoa,
    WoolAndCocoa,
    WineAndCocoa,
}

impl Fertility {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0x0000 => Some(Self::Random),
            0x1181 => Some(Self::None),
            0x1183 => Some(Self::Tobacco),
            0x1185 => Some(Self::Spices),
            0x1187 => Some(Self::TobaccoAndSpices),
            0x1189 => Some(Self::Sugar),
            0x118B => Some(Self::TobaccoAndSugar),
            0x118D => Some(Self::SpicesAndSugar),
            0x1191 => Some(Self::Wool),
            0x11A1 => Some(Self::Wine),
            0x11B1 => Some(Self::WoolAndWine),
            0x11C1 => Some(Self::Cocoa),
            0x11D1 => Some(Self::WoolAndCocoa),
            0x11E1 => Some(Self::WineAndCocoa),
            _ => None,
        }
    }

    pub fn raw(self) -> u32 {
        match self {
            Self::Random => 0x0000,
            Self::None => 0x1181,
            Self::Tobacco => 0x1183,
            Self::Spices => 0x1185,
            Self::TobaccoAndSpices => 0x1187,
            Self::Sugar => 0x1189,
            Self::TobaccoAndSugar => 0x118B,
            Self::SpicesAndSugar => 0x118D,
            Self::Wool => 0x1191,
            Self::Wine => 0x11A1,
            Self::WoolAndWine => 0x11B1,
            Self::Cocoa => 0x11C1,
            Self::WoolAndCocoa => 0x11D1,
            Self::WineAndCocoa => 0x11E1,
        }
    }
}

/// Island size class, stored as a u16 ordinal. Drives template-file selection
/// downstream, so an out-of-range ordinal is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum IslandSize {
    Little = 0,
    Middle = 1,
    Median = 2,
    Big = 3,
    Large = 4,
}

impl IslandSize {
    pub fn from_ordinal(ordinal: u16) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Little),
            1 => Some(Self::Middle),
            2 => Some(Self::Median),
            3 => Some(Self::Big),
            4 => Some(Self::Large),
            _ => None,
        }
    }

    pub fn ordinal(self) -> u16 {
        self as u16
    }
}

/// Island climate zone, stored as a u8 ordinal. Fatal when out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Climate {
    North = 0,
    South = 1,
    Any = 2,
}

impl Climate {
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Self::North),
            1 => Some(Self::South),
            2 => Some(Self::Any),
            _ => None,
        }
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

/// One ore-mountain slot (iron or volcano), 8 bytes on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OreMountain {
    pub good: u8,
    pub x: u8,
    pub y: u8,
    pub player_flags: u8,
    pub kind: u8,
    pub unused: u8,
    pub stock: u16,
}

impl OreMountain {
    fn read(reader: &mut BinaryReader) -> Result<Self> {
        Ok(Self {
            good: reader.read_u8()?,
            x: reader.read_u8()?,
            y: reader.read_u8()?,
            player_flags: reader.read_u8()?,
            kind: reader.read_u8()?,
            unused: reader.read_u8()?,
            stock: reader.read_u16_le()?,
        })
    }

    fn write(&self, writer: &mut BinaryWriter) {
        writer.write_u8(self.good);
        writer.write_u8(self.x);
        writer.write_u8(self.y);
        writer.write_u8(self.player_flags);
        writer.write_u8(self.kind);
        writer.write_u8(self.unused);
        writer.write_u16_le(self.stock);
    }
}

/// Fixed 116-byte island metadata record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IslandRecord {
    pub island_number: u8,
    pub width: u8,
    pub height: u8,
    pub flags: IslandFlags,
    pub x: u16,
    pub y: u16,
    pub deer_territory_count: u16,
    pub speed_count: u16,
    pub city_players: [u8; 11],
    pub volcano_count: u8,
    pub treasure_flag: u8,
    pub resource_count: u8,
    pub iron_count: u8,
    pub player_flags: u8,
    pub iron_mountains: [OreMountain; 4],
    pub volcano_mountains: [OreMountain; 4],
    pub fertility: Fertility,
    pub file_number: u16,
    pub size: IslandSize,
    pub climate: Climate,
    pub modified: bool,
    pub drought_percent: u8,
    pub rotation: u8,
    pub sea_player_flags: u32,
    pub drought_count: u32,
    pub unused: [u8; 4],
}

impl IslandRecord {
    /// Decodes one record, advancing the reader by exactly
    /// [`ISLAND_RECORD_LEN`] bytes. Any other cursor delta means the layout
    /// above has drifted from the file format and is reported as a fatal
    /// [`Error::RecordSizeMismatch`].
    pub fn read(reader: &mut BinaryReader) -> Result<Self> {
        let start = reader.position();

        let island_number = reader.read_u8()?;
        let width = reader.read_u8()?;
        let height = reader.read_u8()?;
        let flags = IslandFlags::from_bits_retain(reader.read_u8()?);
        let x = reader.read_u16_le()?;
        let y = reader.read_u16_le()?;
        let deer_territory_count = reader.read_u16_le()?;
        let speed_count = reader.read_u16_le()?;

        let mut city_players = [0u8; 11];
        city_players.copy_from_slice(reader.read_bytes(11)?);

        let volcano_count = reader.read_u8()?;
        let treasure_flag = reader.read_u8()?;
        let resource_count = reader.read_u8()?;
        let iron_count = reader.read_u8()?;
        let player_flags = reader.read_u8()?;

        let mut iron_mountains = [OreMountain::default(); 4];
        for slot in iron_mountains.iter_mut() {
            *slot = OreMountain::read(reader)?;
        }
        let mut volcano_mountains = [OreMountain::default(); 4];
        for slot in volcano_mountains.iter_mut() {
            *slot = OreMountain::read(reader)?;
        }

        let fertility_raw = reader.read_u32_le()?;
        let fertility = Fertility::from_raw(fertility_raw).unwrap_or_else(|| {
            tracing::debug!(
                island = island_number,
                value = fertility_raw,
                "unknown fertility value, defaulting to random"
            );
            Fertility::Random
        });

        let file_number = reader.read_u16_le()?;

        let size_ordinal = reader.read_u16_le()?;
        let size = IslandSize::from_ordinal(size_ordinal).ok_or(Error::InvalidEnumValue {
            field: "island size",
            value: size_ordinal as u32,
        })?;

        let climate_ordinal = reader.read_u8()?;
        let climate = Climate::from_ordinal(climate_ordinal).ok_or(Error::InvalidEnumValue {
            field: "climate",
            value: climate_ordinal as u32,
        })?;

        let modified = reader.read_bool()?;
        let drought_percent = reader.read_u8()?;
        let rotation = reader.read_u8()?;
        let sea_player_flags = reader.read_u32_le()?;
        let drought_count = reader.read_u32_le()?;

        let mut unused = [0u8; 4];
        unused.copy_from_slice(reader.read_bytes(4)?);

        let spanned = reader.position() - start;
        if spanned != ISLAND_RECORD_LEN {
            return Err(Error::RecordSizeMismatch {
                expected: ISLAND_RECORD_LEN,
                actual: spanned,
            });
        }

        Ok(Self {
            island_number,
            width,
            height,
            flags,
            x,
            y,
            deer_territory_count,
            speed_count,
            city_players,
            volcano_count,
            treasure_flag,
            resource_count,
            iron_count,
            player_flags,
            iron_mountains,
            volcano_mountains,
            fertility,
            file_number,
            size,
            climate,
            modified,
            drought_percent,
            rotation,
            sea_player_flags,
            drought_count,
            unused,
        })
    }

    /// Re-encodes the record into its exact 116-byte on-disk form.
    pub fn write(&self, writer: &mut BinaryWriter) {
        writer.write_u8(self.island_number);
        writer.write_u8(self.width);
        writer.write_u8(self.height);
        writer.write_u8(self.flags.bits());
        writer.write_u16_le(self.x);
        writer.write_u16_le(self.y);
        writer.write_u16_le(self.deer_territory_count);
        writer.write_u16_le(self.speed_count);
        writer.write_bytes(&self.city_players);
        writer.write_u8(self.volcano_count);
        writer.write_u8(self.treasure_flag);
        writer.write_u8(self.resource_count);
        writer.write_u8(self.iron_count);
        writer.write_u8(self.player_flags);
        for slot in &self.iron_mountains {
            slot.write(writer);
        }
        for slot in &self.volcano_mountains {
            slot.write(writer);
        }
        writer.write_u32_le(self.fertility.raw());
        writer.write_u16_le(self.file_number);
        writer.write_u16_le(self.size.ordinal());
        writer.write_u8(self.climate.ordinal());
        writer.write_bool(self.modified);
        writer.write_u8(self.drought_percent);
        writer.write_u8(self.rotation);
        writer.write_u32_le(self.sea_player_flags);
        writer.write_u32_le(self.drought_count);
        writer.write_bytes(&self.unused);
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BinaryWriter::with_capacity(ISLAND_RECORD_LEN);
        self.write(&mut writer);
        writer.into_vec()
    }
}
