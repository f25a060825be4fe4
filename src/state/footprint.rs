use crate::codec::RawPlacement;
use crate::error::{Error, Result};
use crate::state::building::BuildingCatalog;
use crate::state::tile::{TileCell, TileGrid};

/// Expands sparse placement records into a dense `width x height` grid.
///
/// Every cell inside a placement's footprint receives the placement's fields
/// with `x`/`y` set to the cell's local offset. Odd orientations (90/270
/// degrees) transpose the footprint. A placement whose origin lies outside
/// the grid is fatal; footprints that merely overhang the grid edge are
/// clipped.
pub fn expand_placements(
    width: u32,
    height: u32,
    placements: &[RawPlacement],
    catalog: &impl BuildingCatalog,
) -> Result<TileGrid> {
    let mut grid = TileGrid::new(width, height);
    for placement in placements {
        let footprint = catalog
            .footprint(placement.graphic)
            .ok_or(Error::UnknownBuilding { graphic: placement.graphic })?;

        let origin_x = placement.x as u32;
        let origin_y = placement.y as u32;
        if origin_x >= width || origin_y >= height {
            return Err(Error::PlacementOutOfBounds {
                x: placement.x,
                y: placement.y,
                width,
                height,
            });
        }

        let (span_x, span_y) = if placement.orientation % 2 == 1 {
            (footprint.height, footprint.width)
        } else {
            (footprint.width, footprint.height)
        };

        for dy in 0..span_y {
            for dx in 0..span_x {
                let cell_x = origin_x + dx;
                let cell_y = origin_y + dy;
                if cell_x >= width || cell_y >= height {
                    continue;
                }
                grid.set(
                    cell_x,
                    cell_y,
                    TileCell {
                        graphic: placement.graphic,
                        x: dx as u8,
                        y: dy as u8,
                        orientation: placement.orientation,
                        animation_count: placement.animation_count,
                        island_number: placement.island_number,
                        city: placement.city,
                        random_seed: placement.random_seed,
                        player: placement.player,
                    },
                );
            }
        }
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::building::BuildingTable;

    fn placement(graphic: u16, x: u8, y: u8, orientation: u8) -> RawPlacement {
        RawPlacement {
            graphic,
            x,
            y,
            orientation,
            animation_count: 0,
            island_number: 1,
            city: 0,
            random_seed: 0,
            player: 2,
        }
    }

    fn catalog() -> BuildingTable {
        let mut table = BuildingTable::new();
        table.insert(100, 2, 2);
        table.insert(200, 1, 3);
        table.insert(300, 1, 1);
        table
    }

    #[test]
    fn test_two_by_two_footprint_coverage() {
        let grid = expand_placements(5, 5, &[placement(100, 0, 0, 0)], &catalog()).unwrap();
        assert_eq!(grid.occupied(), 4);
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            let cell = grid.get(x, y).unwrap();
            assert_eq!(cell.graphic, 100);
            assert_eq!((cell.x as u32, cell.y as u32), (x, y));
        }
        assert!(grid.get(2, 0).unwrap().is_empty());
    }

    #[test]
    fn test_odd_orientation_transposes_footprint() {
        // 1x3 footprint rotated 90 degrees occupies a 3x1 span.
        let grid = expand_placements(5, 5, &[placement(200, 1, 1, 1)], &catalog()).unwrap();
        assert_eq!(grid.occupied(), 3);
        for dx in 0..3 {
            let cell = grid.get(1 + dx, 1).unwrap();
            assert_eq!(cell.graphic, 200);
            assert_eq!((cell.x as u32, cell.y as u32), (dx, 0));
        }
        assert!(grid.get(1, 2).unwrap().is_empty());
    }

    #[test]
    fn test_cells_carry_placement_metadata() {
        let mut p = placement(300, 2, 3, 0);
        p.animation_count = 4;
        p.city = 3;
        p.random_seed = 11;
        let grid = expand_placements(5, 5, &[p], &catalog()).unwrap();
        let cell = grid.get(2, 3).unwrap();
        assert_eq!(cell.animation_count, 4);
        assert_eq!(cell.city, 3);
        assert_eq!(cell.random_seed, 11);
        assert_eq!(cell.player, 2);
        assert_eq!(cell.island_number, 1);
    }

    #[test]
    fn test_edge_overlap_clips() {
        let grid = expand_placements(5, 5, &[placement(100, 4, 4, 0)], &catalog()).unwrap();
        assert_eq!(grid.occupied(), 1);
        assert_eq!(grid.get(4, 4).unwrap().graphic, 100);
    }

    #[test]
    fn test_origin_out_of_bounds_is_fatal() {
        let err = expand_placements(5, 5, &[placement(100, 5, 0, 0)], &catalog()).unwrap_err();
        assert!(matches!(
            err,
            Error::PlacementOutOfBounds { x: 5, y: 0, width: 5, height: 5 }
        ));
    }

    #[test]
    fn test_unknown_graphic_is_fatal() {
        let err = expand_placements(5, 5, &[placement(999, 0, 0, 0)], &catalog()).unwrap_err();
        assert!(matches!(err, Error::UnknownBuilding { graphic: 999 }));
    }

    #[test]
    fn test_expansion_is_idempotent() {
        let placements = [
            placement(100, 0, 0, 0),
            placement(200, 3, 1, 1),
            placement(300, 4, 4, 2),
        ];
        let table = catalog();
        let first = expand_placements(5, 5, &placements, &table).unwrap();
        let second = expand_placements(5, 5, &placements, &table).unwrap();
        assert_eq!(first, second);
    }
}
