//! Dungeon system
//!
//! Contains the tile vocabulary, grids, rooms, and the generation passes.

mod corridor;
mod doors;
mod dump;
mod generation;
mod grid;
mod objects;
mod placement;
mod projection;
mod room;
mod tile;

pub use corridor::{
    ConnectOutcome, Connection, add_room_to_dungeon, connect_room_with_cell, find_nearest_open_cell,
};
pub use doors::cut_doors;
pub use generation::{Dungeon, DungeonRequest, generate_dungeon};
pub use grid::Grid;
pub use objects::{ObjectKind, host_room, object_list, place_objects};
pub use placement::{
    able_to_place, decorate_room, dungeon_side, find_free_cell, find_room_space,
    generate_candidate, stamp_room,
};
pub use projection::{fog_of_war_grid, rendering_grid, walkability_grid};
pub use room::{Room, RoomItems, RoomType, inside_any_room};
pub use tile::Tile;
