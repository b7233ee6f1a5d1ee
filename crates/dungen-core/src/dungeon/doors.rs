//! Door pass
//!
//! Runs once after every room is connected. Corridor cells that cross a
//! room's wall ring become that room's door kind.

use super::room::Room;
use super::{Grid, Tile};

/// Turn corridor crossings of each room's wall ring into doors
///
/// Floor and fog-trigger cells on the ring become the room type's door tile;
/// fog triggers left inside a room go back to floor. Secret doors carved by
/// the corridor pass are kept as they are.
pub fn cut_doors(grid: &mut Grid<Tile>, rooms: &[Room]) {
    for room in rooms {
        let door = room.room_type.door_tile();
        let (lx, ly, hx, hy) = room.wall_bounds();
        for x in lx..=hx {
            for y in ly..=hy {
                let tile = grid[(x, y)];
                if room.on_wall_ring(x, y) {
                    if matches!(tile, Tile::Floor | Tile::FogTrigger) {
                        grid[(x, y)] = door;
                    }
                } else if tile == Tile::FogTrigger {
                    grid[(x, y)] = Tile::Floor;
                }
            }
        }
    }
}
