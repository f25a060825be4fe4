use crate::codec::IslandRecord;
use crate::error::{Error, Result};
use crate::state::tile::TileGrid;

/// The two dense layers every island resolves to: terrain below,
/// construction above. The top layer may be synthetically empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLayers {
    pub bottom: TileGrid,
    pub top: TileGrid,
}

/// Decides which decoded placement layers become bottom and top.
///
/// Savegames carry zero, one, or two placement chunks per island; `grids` is
/// the expanded layers in chunk stream order. First seen is terrain.
///
/// Shipped game data never carries more than two layers; when a file does,
/// the extra layers are dropped with a warning rather than silently, since
/// the format defines no ordering rule for them.
pub fn resolve_layers(record: &IslandRecord, mut grids: Vec<TileGrid>) -> Result<ResolvedLayers> {
    let width = record.width as u32;
    let height = record.height as u32;

    if grids.len() > 2 {
        tracing::warn!(
            island = record.island_number,
            layers = grids.len(),
            modified = record.modified,
            "island carries more than two placement layers, keeping the first two"
        );
        grids.truncate(2);
    }

    let mut iter = grids.into_iter();
    match (iter.next(), iter.next()) {
        (None, _) if record.modified => {
            Err(Error::MissingLayerData { island: record.island_number })
        }
        // An unmodified island without layer data is an untouched template;
        // both layers are empty.
        (None, _) => Ok(ResolvedLayers {
            bottom: TileGrid::new(width, height),
            top: TileGrid::new(width, height),
        }),
        (Some(bottom), None) => Ok(ResolvedLayers {
            top: TileGrid::new(bottom.width(), bottom.height()),
            bottom,
        }),
        (Some(bottom), Some(top)) => Ok(ResolvedLayers { bottom, top }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{BinaryReader, IslandRecord};
    use crate::state::tile::TileCell;

    fn record(modified: bool) -> IslandRecord {
        let mut bytes = sample_record_bytes();
        bytes[101] = modified as u8;
        IslandRecord::read(&mut BinaryReader::new(&bytes)).unwrap()
    }

    fn sample_record_bytes() -> Vec<u8> {
        let mut bytes = vec![0u8; 116];
        bytes[0] = 1; // island number
        bytes[1] = 4; // width
        bytes[2] = 3; // height
        bytes
    }

    fn populated_grid() -> TileGrid {
        let mut grid = TileGrid::new(4, 3);
        grid.set(0, 0, TileCell { graphic: 42, ..TileCell::default() });
        grid
    }

    #[test]
    fn test_single_layer_gets_empty_top() {
        let layers = resolve_layers(&record(false), vec![populated_grid()]).unwrap();
        assert_eq!(layers.bottom.occupied(), 1);
        assert_eq!(layers.top.occupied(), 0);
        assert_eq!(
            (layers.top.width(), layers.top.height()),
            (layers.bottom.width(), layers.bottom.height())
        );
    }

    #[test]
    fn test_two_layers_keep_stream_order() {
        let mut top = TileGrid::new(4, 3);
        top.set(1, 1, TileCell { graphic: 7, ..TileCell::default() });
        let layers = resolve_layers(&record(true), vec![populated_grid(), top]).unwrap();
        assert_eq!(layers.bottom.get(0, 0).unwrap().graphic, 42);
        assert_eq!(layers.top.get(1, 1).unwrap().graphic, 7);
    }

    #[test]
    fn test_modified_without_layers_is_fatal() {
        let err = resolve_layers(&record(true), vec![]).unwrap_err();
        assert!(matches!(err, Error::MissingLayerData { island: 1 }));
    }

    #[test]
    fn test_unmodified_without_layers_resolves_empty() {
        let layers = resolve_layers(&record(false), vec![]).unwrap();
        assert_eq!((layers.bottom.width(), layers.bottom.height()), (4, 3));
        assert_eq!(layers.bottom.occupied(), 0);
        assert_eq!(layers.top.occupied(), 0);
    }

    #[test]
    fn test_extra_layers_first_two_win() {
        let mut third = TileGrid::new(4, 3);
        third.set(2, 2, TileCell { graphic: 9, ..TileCell::default() });
        let layers = resolve_layers(
            &record(false),
            vec![populated_grid(), TileGrid::new(4, 3), third],
        )
        .unwrap();
        assert_eq!(layers.bottom.get(0, 0).unwrap().graphic, 42);
        assert_eq!(layers.top.occupied(), 0);
    }
}
