//! Corridor generation
//!
//! Every room after the first is joined to the closest open cell that lies
//! outside its own footprint, with an L-shaped corridor: a horizontal leg
//! from the room center to the target column, then a vertical leg to the
//! target row. Legs step around corners and walls they would otherwise run
//! along instead of cutting through them.

use log::debug;
use serde::{Deserialize, Serialize};

use super::room::{Room, RoomType, inside_any_room};
use super::{Grid, Tile};

/// A corridor carved between a room center and its target cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Index of the connected room
    pub room: usize,
    /// Room center the corridor starts from
    pub from: (usize, usize),
    /// Open cell the corridor ends at
    pub to: (usize, usize),
}

/// Result of trying to join a room to the rest of the dungeon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// Fewer than two rooms exist, nothing to join
    NotNeeded,
    /// A corridor was carved
    Connected(Connection),
    /// No cell qualified as a target
    NoTarget,
}

fn manhattan(a: (usize, usize), b: (usize, usize)) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

/// Find the open cell closest to a room's center
///
/// Candidates are floor or plain door cells outside the room's footprint;
/// secret rooms only accept cells inside some room's footprint. Cells are
/// scanned x then y and a candidate at the same distance as the best so far
/// replaces it.
pub fn find_nearest_open_cell(
    grid: &Grid<Tile>,
    rooms: &[Room],
    room_idx: usize,
) -> Option<(usize, usize)> {
    if rooms.len() < 2 {
        return None;
    }
    let room = &rooms[room_idx];
    let center = room.center();
    let secret = room.room_type == RoomType::Secret;

    let mut best: Option<((usize, usize), usize)> = None;
    for (x, y, tile) in grid.iter() {
        if room.in_bounds(x, y) || !matches!(tile, Tile::Floor | Tile::Door) {
            continue;
        }
        let distance = manhattan((x, y), center);
        if best.is_none_or(|(_, closest)| distance <= closest) {
            if secret && !inside_any_room(rooms, x, y) {
                continue;
            }
            best = Some(((x, y), distance));
        }
    }
    best.map(|(cell, _)| cell)
}

fn at(grid: &Grid<Tile>, x: isize, y: isize) -> (usize, usize) {
    debug_assert!(grid.in_bounds(x, y), "corridor left the grid at ({x}, {y})");
    (x as usize, y as usize)
}

/// Carve one corridor cell that is not a step-around trigger
fn carve(grid: &mut Grid<Tile>, cell: (usize, usize), secret_wall: Tile, secret: bool) {
    match grid[cell] {
        Tile::FogTrigger | Tile::SecretDoor | Tile::Radiation => {}
        tile if secret && tile == secret_wall => grid[cell] = Tile::SecretDoor,
        _ => grid[cell] = Tile::Floor,
    }
}

/// Carve an L-shaped corridor from a room's center to `target`
///
/// Secret rooms turn the walls the corridor crosses head-on into secret
/// doors. The vertical leg heads toward the target row from wherever the
/// horizontal leg ended up, so it always terminates.
pub fn connect_room_with_cell(grid: &mut Grid<Tile>, room: &Room, target: (usize, usize)) {
    let (cx, cy) = room.center();
    let (cx, cy) = (cx as isize, cy as isize);
    let (tx, ty) = (target.0 as isize, target.1 as isize);
    let secret = room.room_type == RoomType::Secret;

    let dx = if tx > cx { 1 } else { -1 };
    let dy = if ty > cy { 1 } else { -1 };

    // Horizontal leg
    let mut x = cx;
    let mut y = cy;
    while (tx + dx - x) * dx > 0 {
        let cell = at(grid, x, y);
        if matches!(grid[cell], Tile::Corner | Tile::HorizontalWall) {
            y += dy;
            let back = at(grid, x - dx, y);
            let here = at(grid, x, y);
            grid[back] = Tile::Floor;
            grid[here] = Tile::Floor;
        } else {
            carve(grid, cell, Tile::VerticalWall, secret);
        }
        x += dx;
    }

    // Vertical leg
    let dy = if ty > y { 1 } else { -1 };
    let mut x = tx;
    while (ty + dy - y) * dy > 0 {
        let cell = at(grid, x, y);
        if matches!(grid[cell], Tile::Corner | Tile::VerticalWall) {
            x += dx;
            let back = at(grid, x, y - dy);
            let here = at(grid, x, y);
            grid[back] = Tile::Floor;
            grid[here] = Tile::Floor;
        } else {
            carve(grid, cell, Tile::HorizontalWall, secret);
        }
        y += dy;
    }

    // Close the gap when the leg was pushed more than one column aside
    while (x - tx).abs() > 1 {
        x -= dx;
        let cell = at(grid, x, ty);
        carve(grid, cell, Tile::VerticalWall, false);
    }
}

/// Join a freshly placed room to the closest open cell
pub fn add_room_to_dungeon(
    grid: &mut Grid<Tile>,
    rooms: &[Room],
    room_idx: usize,
) -> ConnectOutcome {
    if rooms.len() < 2 {
        return ConnectOutcome::NotNeeded;
    }
    let room = rooms[room_idx];
    let Some(target) = find_nearest_open_cell(grid, rooms, room_idx) else {
        return ConnectOutcome::NoTarget;
    };

    debug!(
        "connecting room {} ({}) from {:?} to {:?}",
        room_idx,
        room.room_type,
        room.center(),
        target
    );
    connect_room_with_cell(grid, &room, target);
    ConnectOutcome::Connected(Connection {
        room: room_idx,
        from: room.center(),
        to: target,
    })
}
