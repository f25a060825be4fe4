use std::io::Read;

use crate::codec::chunk::{Chunk, ChunkStream};
use crate::codec::{BinaryReader, IslandRecord, RawPlacement};
use crate::error::{Error, Result};
use crate::state::building::BuildingCatalog;
use crate::state::footprint::expand_placements;
use crate::state::layers::{resolve_layers, ResolvedLayers};

/// Chunk id of an island metadata record.
pub const ISLAND_CHUNK_ID: &str = "INSEL5";
/// Chunk id of a building placement layer.
pub const PLACEMENT_CHUNK_ID: &str = "INSELHAUS";

/// One fully decoded island: its metadata record and its resolved layers.
#[derive(Debug, Clone)]
pub struct Island {
    pub record: IslandRecord,
    pub layers: ResolvedLayers,
}

/// A decoded savegame: every island in file order.
///
/// Savegames are chunk streams; island record chunks open a new island and
/// placement chunks attach to the most recently opened one. Chunks of any
/// other type (cities, ships, game settings) are skipped.
#[derive(Debug, Clone)]
pub struct Savegame {
    islands: Vec<Island>,
}

struct PendingIsland {
    record: IslandRecord,
    layers: Vec<Vec<RawPlacement>>,
}

impl Savegame {
    pub fn decode<I>(chunks: I, catalog: &impl BuildingCatalog) -> Result<Self>
    where
        I: IntoIterator<Item = Result<Chunk>>,
    {
        let mut pending: Vec<PendingIsland> = Vec::new();

        for chunk in chunks {
            let chunk = chunk?;
            match chunk.id() {
                ISLAND_CHUNK_ID => {
                    let mut reader = BinaryReader::new(chunk.payload());
                    let record = IslandRecord::read(&mut reader)?;
                    pending.push(PendingIsland { record, layers: Vec::new() });
                }
                PLACEMENT_CHUNK_ID => {
                    let island = pending.last_mut().ok_or_else(|| {
                        Error::OrphanedPlacementChunk { chunk_id: chunk.id().to_string() }
                    })?;
                    let placements =
                        RawPlacement::decode_layer(chunk.payload(), island.record.island_number)?;
                    island.layers.push(placements);
                }
                other => {
                    tracing::trace!(
                        chunk_id = other,
                        length = chunk.length(),
                        "skipping unrecognized chunk"
                    );
                }
            }
        }

        let mut islands = Vec::with_capacity(pending.len());
        for island in pending {
            let width = island.record.width as u32;
            let height = island.record.height as u32;
            let grids = island
                .layers
                .iter()
                .map(|layer| expand_placements(width, height, layer, catalog))
                .collect::<Result<Vec<_>>>()?;
            let layers = resolve_layers(&island.record, grids)?;
            islands.push(Island { record: island.record, layers });
        }

        tracing::debug!(islands = islands.len(), "decoded savegame");
        Ok(Self { islands })
    }

    pub fn from_reader<R: Read>(source: R, catalog: &impl BuildingCatalog) -> Result<Self> {
        Self::decode(ChunkStream::new(source), catalog)
    }

    pub fn islands(&self) -> &[Island] {
        &self.islands
    }

    pub fn into_islands(self) -> Vec<Island> {
        self.islands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{BinaryWriter, Climate, Fertility, IslandFlags, IslandSize, OreMountain};
    use crate::state::building::BuildingTable;

    fn record(island_number: u8, width: u8, height: u8, modified: bool) -> IslandRecord {
        IslandRecord {
            island_number,
            width,
            height,
            flags: IslandFlags::empty(),
            x: 0,
            y: 0,
            deer_territory_count: 0,
            speed_count: 0,
            city_players: [0; 11],
            volcano_count: 0,
            treasure_flag: 0,
            resource_count: 0,
            iron_count: 0,
            player_flags: 0,
            iron_mountains: [OreMountain::default(); 4],
            volcano_mountains: [OreMountain::default(); 4],
            fertility: Fertility::Random,
            file_number: 0,
            size: IslandSize::Little,
            climate: Climate::North,
            modified,
            drought_percent: 0,
            rotation: 0,
            sea_player_flags: 0,
            drought_count: 0,
            unused: [0; 4],
        }
    }

    fn placement(graphic: u16, x: u8, y: u8, island_number: u8) -> RawPlacement {
        RawPlacement {
            graphic,
            x,
            y,
            orientation: 0,
            animation_count: 0,
            island_number,
            city: 0,
            random_seed: 0,
            player: 0,
        }
    }

    fn placement_chunk(placements: &[RawPlacement]) -> Chunk {
        let mut writer = BinaryWriter::new();
        for p in placements {
            p.write(&mut writer);
        }
        Chunk::new(PLACEMENT_CHUNK_ID, writer.into_vec())
    }

    fn island_chunk(record: &IslandRecord) -> Chunk {
        Chunk::new(ISLAND_CHUNK_ID, record.to_bytes())
    }

    fn catalog() -> BuildingTable {
        let mut table = BuildingTable::new();
        table.insert(100, 1, 1);
        table.insert(200, 2, 2);
        table
    }

    fn decode(stream_chunks: Vec<Chunk>) -> Result<Savegame> {
        let mut bytes = Vec::new();
        for chunk in &stream_chunks {
            bytes.extend_from_slice(&chunk.to_bytes());
        }
        Savegame::from_reader(&bytes[..], &catalog())
    }

    #[test]
    fn test_assembles_islands_in_stream_order() {
        let savegame = decode(vec![
            island_chunk(&record(1, 8, 8, false)),
            placement_chunk(&[placement(100, 0, 0, 1)]),
            island_chunk(&record(2, 6, 6, true)),
            placement_chunk(&[placement(200, 1, 1, 2)]),
            placement_chunk(&[placement(100, 3, 3, 2)]),
        ])
        .unwrap();

        let islands = savegame.islands();
        assert_eq!(islands.len(), 2);

        assert_eq!(islands[0].record.island_number, 1);
        assert_eq!(islands[0].layers.bottom.occupied(), 1);
        assert_eq!(islands[0].layers.top.occupied(), 0);

        assert_eq!(islands[1].record.island_number, 2);
        assert_eq!(islands[1].layers.bottom.occupied(), 4);
        assert_eq!(islands[1].layers.top.occupied(), 1);
        assert_eq!(islands[1].layers.top.get(3, 3).unwrap().graphic, 100);
    }

    #[test]
    fn test_unrecognized_chunks_are_skipped() {
        let savegame = decode(vec![
            Chunk::new("STADT4", vec![1, 2, 3]),
            island_chunk(&record(1, 4, 4, false)),
            Chunk::new("SHIP4", vec![9; 40]),
            placement_chunk(&[placement(100, 2, 2, 1)]),
        ])
        .unwrap();
        assert_eq!(savegame.islands().len(), 1);
        assert_eq!(savegame.islands()[0].layers.bottom.occupied(), 1);
    }

    #[test]
    fn test_orphaned_placement_chunk() {
        let err = decode(vec![placement_chunk(&[placement(100, 0, 0, 1)])]).unwrap_err();
        assert!(matches!(err, Error::OrphanedPlacementChunk { .. }));
    }

    #[test]
    fn test_ownership_mismatch_propagates() {
        let err = decode(vec![
            island_chunk(&record(1, 4, 4, false)),
            placement_chunk(&[placement(100, 0, 0, 9)]),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            Error::IslandOwnershipMismatch { island: 1, embedded: 9 }
        ));
    }

    #[test]
    fn test_empty_placement_chunk_is_legal() {
        let savegame = decode(vec![
            island_chunk(&record(1, 4, 4, false)),
            placement_chunk(&[]),
        ])
        .unwrap();
        assert_eq!(savegame.islands()[0].layers.bottom.occupied(), 0);
    }

    #[test]
    fn test_unmodified_island_without_layers() {
        let savegame = decode(vec![island_chunk(&record(1, 4, 4, false))]).unwrap();
        let layers = &savegame.islands()[0].layers;
        assert_eq!((layers.bottom.width(), layers.bottom.height()), (4, 4));
        assert_eq!(layers.bottom.occupied(), 0);
    }

    #[test]
    fn test_modified_island_without_layers_fails() {
        let err = decode(vec![island_chunk(&record(1, 4, 4, true))]).unwrap_err();
        assert!(matches!(err, Error::MissingLayerData { island: 1 }));
    }
}
