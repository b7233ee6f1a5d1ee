//! Room placement
//!
//! Rooms are packed at random positions under a non-overlap constraint: a
//! room is accepted only if its whole margin-expanded footprint is still
//! solid wall. Random search gives up after `placement_attempts` redraws and
//! falls back to a deterministic scan at minimum room size.

use log::debug;

use crate::config::GeneratorConfig;
use crate::consts::{EDGE_MARGIN, ROOM_MARGIN};
use crate::rng::GenRng;

use super::room::{Room, RoomType};
use super::{Grid, Tile};

/// Side length of the square grid for `total_rooms` rooms
///
/// Loose area heuristic. The side is clamped so candidate origins exist and,
/// with two or more rooms, a second room always fits next to the first. It
/// then grows until the origin ranges hold `total_rooms` minimum footprints.
pub fn dungeon_side(config: &GeneratorConfig, total_rooms: usize) -> usize {
    let small = config.min_room_width * config.min_room_height;
    let large = config.max_room_width * config.max_room_height;
    let area =
        (config.stretch_coefficient * total_rooms as f64 * (small + large) as f64 / 2.0) as usize;
    let mut side = ((area as f64).sqrt() as usize).max(config.min_side());
    if total_rooms >= 2 {
        side = side.max(config.pair_side());
    }
    while footprint_capacity(config, side) < total_rooms {
        side += 1;
    }
    side
}

/// Minimum-size footprints that fit side by side in the origin ranges
fn footprint_capacity(config: &GeneratorConfig, side: usize) -> usize {
    let slots = |max: usize, min: usize| match side.saturating_sub(max + 2 * EDGE_MARGIN) {
        0 => 0,
        span => (span - 1) / (min + 2 * ROOM_MARGIN) + 1,
    };
    slots(config.max_room_width, config.min_room_width)
        * slots(config.max_room_height, config.min_room_height)
}

/// Half-open ranges of valid room origins on this grid
fn origin_ranges(
    grid: &Grid<Tile>,
    config: &GeneratorConfig,
) -> ((usize, usize), (usize, usize)) {
    let x_hi = grid.columns().saturating_sub(config.max_room_width + EDGE_MARGIN);
    let y_hi = grid.rows().saturating_sub(config.max_room_height + EDGE_MARGIN);
    ((EDGE_MARGIN, x_hi), (EDGE_MARGIN, y_hi))
}

/// Draw a random candidate room: x, y, width, height in that order
pub fn generate_candidate(grid: &Grid<Tile>, config: &GeneratorConfig, rng: &mut GenRng) -> Room {
    let ((x_lo, x_hi), (y_lo, y_hi)) = origin_ranges(grid, config);
    let x = rng.range(x_lo, x_hi);
    let y = rng.range(y_lo, y_hi);
    let width = rng.range(config.min_room_width, config.max_room_width);
    let height = rng.range(config.min_room_height, config.max_room_height);
    Room::new(x, y, width, height)
}

/// Check that every cell of the margin-expanded footprint is still wall
pub fn able_to_place(grid: &Grid<Tile>, room: &Room) -> bool {
    let (lx, ly, hx, hy) = room.margin_bounds();
    for x in lx..hx {
        for y in ly..hy {
            if grid.get(x, y) != Some(Tile::Wall) {
                return false;
            }
        }
    }
    true
}

/// Find space for a new room
///
/// Redraws only the position of the first candidate, keeping its size. When
/// the attempt bound runs out, scans every origin (x outer, y inner) for a
/// minimum-size room. Returns None when both searches fail.
pub fn find_room_space(
    grid: &Grid<Tile>,
    config: &GeneratorConfig,
    rng: &mut GenRng,
) -> Option<Room> {
    let mut room = generate_candidate(grid, config, rng);
    let ((x_lo, x_hi), (y_lo, y_hi)) = origin_ranges(grid, config);

    for _ in 0..config.placement_attempts {
        if able_to_place(grid, &room) {
            return Some(room);
        }
        room.x = rng.range(x_lo, x_hi);
        room.y = rng.range(y_lo, y_hi);
    }
    if able_to_place(grid, &room) {
        return Some(room);
    }

    debug!(
        "random placement exhausted after {} attempts, scanning for a {}x{} slot",
        config.placement_attempts, config.min_room_width, config.min_room_height
    );
    for x in x_lo..x_hi {
        for y in y_lo..y_hi {
            let candidate = Room::new(x, y, config.min_room_width, config.min_room_height);
            if able_to_place(grid, &candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Write a room's walls and floor onto the grid
///
/// Outer ring is surrounding wall, the next ring vertical or horizontal wall,
/// the wall ring's corners are corner tiles, the interior is the room type's
/// floor.
pub fn stamp_room(grid: &mut Grid<Tile>, room: &Room) {
    let (lx, ly, hx, hy) = room.margin_bounds();
    let (rx, ry) = room.lower_right();
    let floor = room.room_type.floor_tile();

    for x in lx..hx {
        for y in ly..hy {
            grid[(x, y)] = if x == lx || x == hx - 1 || y == ly || y == hy - 1 {
                Tile::SurroundingWall
            } else if x == lx + 1 || x == rx {
                Tile::VerticalWall
            } else if y == ly + 1 || y == ry {
                Tile::HorizontalWall
            } else {
                floor
            };
        }
    }

    let (wx, wy, wrx, wry) = room.wall_bounds();
    for corner in [(wx, wy), (wx, wry), (wrx, wy), (wrx, wry)] {
        grid[corner] = Tile::Corner;
    }
}

/// Pick a random interior cell that `accept` allows
///
/// Draws x then y per attempt and gives up after `attempts` draws.
pub fn find_free_cell(
    room: &Room,
    rng: &mut GenRng,
    attempts: usize,
    mut accept: impl FnMut(usize, usize) -> bool,
) -> Option<(usize, usize)> {
    let (rx, ry) = room.lower_right();
    for _ in 0..attempts {
        let x = rng.range(room.x, rx);
        let y = rng.range(room.y, ry);
        if accept(x, y) {
            return Some((x, y));
        }
    }
    None
}

fn scatter(
    grid: &mut Grid<Tile>,
    room: &Room,
    tile: Tile,
    config: &GeneratorConfig,
    rng: &mut GenRng,
) {
    let cell = find_free_cell(room, rng, config.object_attempts, |x, y| {
        matches!(grid[(x, y)], Tile::Floor | Tile::Radiation)
    });
    match cell {
        Some(cell) => grid[cell] = tile,
        None => debug!("no free cell for {tile} in room at ({}, {})", room.x, room.y),
    }
}

/// Scatter interior features over a freshly stamped room
///
/// Radiation rooms get one clean floor cell; other rooms get columns and
/// radiation puddles. The column count is drawn for every room type so the
/// draw sequence does not depend on the type.
pub fn decorate_room(
    grid: &mut Grid<Tile>,
    room: &Room,
    config: &GeneratorConfig,
    rng: &mut GenRng,
) {
    let radiation = room.room_type == RoomType::Radiation;
    if radiation {
        scatter(grid, room, Tile::Floor, config, rng);
    }

    let columns = rng.range(0, config.max_columns_in_room);
    if !radiation {
        for _ in 0..columns {
            scatter(grid, room, Tile::Column, config, rng);
        }
        let hazards = rng.range(0, config.max_hazards_in_room);
        for _ in 0..hazards {
            scatter(grid, room, Tile::Radiation, config, rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_grid(side: usize) -> Grid<Tile> {
        Grid::new(side, side, Tile::Wall)
    }

    #[test]
    fn test_dungeon_side() {
        let config = GeneratorConfig::default();
        // 7.1 * 8 * 68 / 2 = 1931.2 -> sqrt = 43.9
        assert_eq!(dungeon_side(&config, 8), 43);
        // 7.1 * 6 * 68 / 2 = 1448.4 -> sqrt = 38.1
        assert_eq!(dungeon_side(&config, 6), 38);
        // one room would give 15, clamped up
        assert_eq!(dungeon_side(&config, 1), 17);
        assert_eq!(dungeon_side(&config, 0), 17);
        // two to five rooms share the side that guarantees a second room
        assert_eq!(dungeon_side(&config, 2), 35);
        assert_eq!(dungeon_side(&config, 5), 35);
    }

    #[test]
    fn test_footprint_capacity() {
        let config = GeneratorConfig::default();
        assert_eq!(footprint_capacity(&config, 17), 1);
        assert_eq!(footprint_capacity(&config, 35), 9);
        assert_eq!(footprint_capacity(&config, 43), 16);
        assert_eq!(footprint_capacity(&config, 10), 0);

        // tiny rooms on a grid the heuristic leaves too small
        let tiny = GeneratorConfig {
            min_room_width: 1,
            max_room_width: 2,
            min_room_height: 1,
            max_room_height: 2,
            stretch_coefficient: 0.1,
            ..Default::default()
        };
        for rooms in 0..40 {
            let side = dungeon_side(&tiny, rooms);
            assert!(footprint_capacity(&tiny, side) >= rooms);
        }
    }

    #[test]
    fn test_second_room_always_fits() {
        let config = GeneratorConfig {
            placement_attempts: 1,
            ..Default::default()
        };
        let side = dungeon_side(&config, 2);
        for seed in 0..200 {
            let mut rng = GenRng::new(seed);
            let mut grid = empty_grid(side);
            let first = find_room_space(&grid, &config, &mut rng).unwrap();
            stamp_room(&mut grid, &first);
            let second = find_room_space(&grid, &config, &mut rng);
            assert!(second.is_some(), "seed {seed}: no room beside {first:?}");
        }
    }

    #[test]
    fn test_candidate_ranges() {
        let config = GeneratorConfig::default();
        let grid = empty_grid(43);
        let mut rng = GenRng::new(7);
        for _ in 0..500 {
            let room = generate_candidate(&grid, &config, &mut rng);
            assert!((4..31).contains(&room.x));
            assert!((4..32).contains(&room.y));
            assert!((4..8).contains(&room.width));
            assert!((3..7).contains(&room.height));
            let (_, _, hx, hy) = room.margin_bounds();
            assert!(hx <= 43 && hy <= 43);
        }
    }

    #[test]
    fn test_stamp_layout() {
        let mut grid = empty_grid(20);
        let room = Room::new(5, 6, 4, 3);
        stamp_room(&mut grid, &room);

        // surrounding ring
        assert_eq!(grid[(3, 4)], Tile::SurroundingWall);
        assert_eq!(grid[(10, 10)], Tile::SurroundingWall);
        assert_eq!(grid[(3, 7)], Tile::SurroundingWall);
        // walls
        assert_eq!(grid[(4, 7)], Tile::VerticalWall);
        assert_eq!(grid[(9, 7)], Tile::VerticalWall);
        assert_eq!(grid[(6, 5)], Tile::HorizontalWall);
        assert_eq!(grid[(6, 9)], Tile::HorizontalWall);
        // corners
        assert_eq!(grid[(4, 5)], Tile::Corner);
        assert_eq!(grid[(4, 9)], Tile::Corner);
        assert_eq!(grid[(9, 5)], Tile::Corner);
        assert_eq!(grid[(9, 9)], Tile::Corner);
        // interior
        for x in 5..9 {
            for y in 6..9 {
                assert_eq!(grid[(x, y)], Tile::Floor);
            }
        }
        // untouched outside the footprint
        assert_eq!(grid[(2, 7)], Tile::Wall);
        assert_eq!(grid[(11, 7)], Tile::Wall);
    }

    #[test]
    fn test_stamp_radiation_floor() {
        let mut grid = empty_grid(20);
        let room = Room::with_type(5, 6, 4, 3, RoomType::Radiation);
        stamp_room(&mut grid, &room);
        assert_eq!(grid[(6, 7)], Tile::Radiation);
    }

    #[test]
    fn test_able_to_place() {
        let mut grid = empty_grid(30);
        let room = Room::new(5, 5, 4, 3);
        assert!(able_to_place(&grid, &room));
        stamp_room(&mut grid, &room);

        assert!(!able_to_place(&grid, &room));
        // footprints touching by one cell
        assert!(!able_to_place(&grid, &Room::new(12, 5, 4, 3)));
        // adjacent but disjoint footprints
        assert!(able_to_place(&grid, &Room::new(13, 5, 4, 3)));
    }

    #[test]
    fn test_able_to_place_rejects_corridor() {
        let mut grid = empty_grid(30);
        grid[(14, 14)] = Tile::Floor;
        assert!(!able_to_place(&grid, &Room::new(13, 13, 4, 3)));
    }

    #[test]
    fn test_exhaustive_fallback() {
        let config = GeneratorConfig {
            placement_attempts: 1,
            ..Default::default()
        };
        let mut grid = empty_grid(17);
        // only x = 4 and y = 4..6 are valid origins on a 17 grid
        let mut rng = GenRng::new(3);
        let room = find_room_space(&grid, &config, &mut rng).expect("empty grid has space");
        stamp_room(&mut grid, &room);

        // the grid cannot hold a second room
        assert!(find_room_space(&grid, &config, &mut rng).is_none());
    }

    #[test]
    fn test_exhaustive_scan_first_fit() {
        let config = GeneratorConfig {
            placement_attempts: 1,
            ..Default::default()
        };
        let mut grid = empty_grid(40);
        // block everything except a pocket that fits a minimum room at (20, 20)
        for x in 0..40 {
            for y in 0..40 {
                if !(18..26).contains(&x) || !(18..25).contains(&y) {
                    grid[(x, y)] = Tile::Floor;
                }
            }
        }
        let mut rng = GenRng::new(11);
        let room = find_room_space(&grid, &config, &mut rng).unwrap();
        assert_eq!((room.x, room.y, room.width, room.height), (20, 20, 4, 3));
    }

    #[test]
    fn test_decorations_stay_inside() {
        let config = GeneratorConfig::default();
        for seed in 0..50 {
            let mut rng = GenRng::new(seed);
            let mut grid = empty_grid(20);
            let room = Room::new(5, 6, 5, 4);
            stamp_room(&mut grid, &room);
            decorate_room(&mut grid, &room, &config, &mut rng);

            for (x, y, tile) in grid.iter() {
                if matches!(tile, Tile::Column | Tile::Radiation) {
                    assert!(room.contains(x, y), "feature at ({x}, {y}) outside interior");
                }
            }
            assert!(grid.count(|t| t == Tile::Column) <= 2);
            assert!(grid.count(|t| t == Tile::Radiation) <= 2);
        }
    }

    #[test]
    fn test_radiation_room_gets_clean_cell() {
        let config = GeneratorConfig::default();
        let mut rng = GenRng::new(5);
        let mut grid = empty_grid(20);
        let room = Room::with_type(5, 6, 5, 4, RoomType::Radiation);
        stamp_room(&mut grid, &room);
        decorate_room(&mut grid, &room, &config, &mut rng);

        assert_eq!(grid.count(|t| t == Tile::Floor), 1);
        assert_eq!(grid.count(|t| t == Tile::Column), 0);
    }

    #[test]
    fn test_find_free_cell_gives_up() {
        let mut rng = GenRng::new(1);
        let room = Room::new(5, 5, 4, 3);
        assert_eq!(find_free_cell(&room, &mut rng, 10, |_, _| false), None);
    }
}
