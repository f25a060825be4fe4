pub mod building;
pub mod footprint;
pub mod layers;
pub mod savegame;
pub mod tile;

pub use building::{BuildingCatalog, BuildingTable, Footprint};
pub use footprint::expand_placements;
pub use layers::{resolve_layers, ResolvedLayers};
pub use savegame::{Island, Savegame, ISLAND_CHUNK_ID, PLACEMENT_CHUNK_ID};
pub use tile::{TileCell, TileGrid};
