//! Interactive objects handed out by special rooms
//!
//! Objects are collected into their own grid first and merged onto the
//! main grid once every object has a spot, so placement never lands on a
//! cell another object already took.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::config::GeneratorConfig;
use crate::error::GenerationWarning;
use crate::rng::GenRng;

use super::placement::find_free_cell;
use super::room::{Room, RoomItems, RoomType};
use super::{Grid, Tile};

/// Objects a special room puts into the dungeon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum ObjectKind {
    #[strum(to_string = "random loot")]
    RandomLoot,
    #[strum(to_string = "key")]
    Key,
    #[strum(to_string = "key room loot")]
    KeyRoomLoot,
    #[strum(to_string = "radiation loot")]
    RadiationLoot,
    #[strum(to_string = "dynamite")]
    Dynamite,
}

impl ObjectKind {
    /// Tile written to the main grid
    pub const fn tile(self) -> Tile {
        match self {
            ObjectKind::RandomLoot => Tile::RandomLoot,
            ObjectKind::Key => Tile::Key,
            ObjectKind::KeyRoomLoot => Tile::KeyRoomLoot,
            ObjectKind::RadiationLoot => Tile::RadiationLoot,
            ObjectKind::Dynamite => Tile::Dynamite,
        }
    }

    /// Flag set on the host room once the object is placed
    pub const fn marker(self) -> RoomItems {
        match self {
            ObjectKind::Key => RoomItems::KEY,
            ObjectKind::Dynamite => RoomItems::DYNAMITE,
            _ => RoomItems::LOOT,
        }
    }
}

/// Objects owed by the special rooms, in room order
pub fn object_list(rooms: &[Room], config: &GeneratorConfig, rng: &mut GenRng) -> Vec<ObjectKind> {
    let mut objects = Vec::new();
    for room in rooms {
        match room.room_type {
            RoomType::Secret => objects.push(ObjectKind::RandomLoot),
            RoomType::Radiation => objects.push(ObjectKind::RadiationLoot),
            RoomType::KeyLocked => {
                objects.push(ObjectKind::Key);
                objects.push(ObjectKind::KeyRoomLoot);
            }
            RoomType::Collapsed => {
                if rng.range(0, 100) > config.dynamite_chance {
                    objects.push(ObjectKind::Dynamite);
                }
            }
            RoomType::Regular => {}
        }
    }
    objects
}

fn first_room(rooms: &[Room], pred: impl Fn(&Room) -> bool) -> Option<usize> {
    rooms.iter().position(pred)
}

fn lacks(room: &Room, flag: RoomItems) -> bool {
    !room.items.contains(flag)
}

/// Pick the room an object goes into
pub fn host_room(rooms: &[Room], object: ObjectKind) -> Option<usize> {
    let empty = |room: &Room| room.items.is_empty();

    match object {
        ObjectKind::RandomLoot => first_room(rooms, |room| {
            room.room_type == RoomType::Secret && lacks(room, RoomItems::LOOT)
        })
        .or_else(|| first_room(rooms, empty)),
        ObjectKind::Key => first_room(rooms, |room| {
            room.room_type != RoomType::KeyLocked && lacks(room, RoomItems::KEY)
        })
        .or_else(|| first_room(rooms, empty)),
        ObjectKind::KeyRoomLoot => first_room(rooms, |room| {
            room.room_type == RoomType::KeyLocked && lacks(room, RoomItems::LOOT)
        }),
        ObjectKind::RadiationLoot => first_room(rooms, |room| {
            room.room_type == RoomType::Radiation && lacks(room, RoomItems::LOOT)
        }),
        ObjectKind::Dynamite => first_room(rooms, |room| {
            room.room_type != RoomType::Collapsed && lacks(room, RoomItems::LOOT)
        }),
    }
}

/// First plain floor cell of a room's interior, scanning x then y
fn first_clean_cell(
    grid: &Grid<Tile>,
    objects: &Grid<Option<ObjectKind>>,
    room: &Room,
) -> Option<(usize, usize)> {
    let (rx, ry) = room.lower_right();
    (room.x..rx)
        .flat_map(|x| (room.y..ry).map(move |y| (x, y)))
        .find(|&cell| grid[cell] == Tile::Floor && objects[cell].is_none())
}

/// Place every object owed by the special rooms and merge them onto `grid`
///
/// Objects with no host room or no free cell are skipped and reported.
pub fn place_objects(
    grid: &mut Grid<Tile>,
    rooms: &mut [Room],
    config: &GeneratorConfig,
    rng: &mut GenRng,
) -> Vec<GenerationWarning> {
    let mut warnings = Vec::new();
    let mut objects: Grid<Option<ObjectKind>> = Grid::new(grid.columns(), grid.rows(), None);

    for object in object_list(rooms, config, rng) {
        let cell = host_room(rooms, object).and_then(|idx| {
            let room = rooms[idx];
            let cell = if room.room_type == RoomType::Radiation {
                first_clean_cell(grid, &objects, &room)
            } else {
                find_free_cell(&room, rng, config.object_attempts, |x, y| {
                    matches!(grid[(x, y)], Tile::Floor | Tile::Radiation)
                        && objects[(x, y)].is_none()
                })
            };
            cell.map(|cell| (idx, cell))
        });

        match cell {
            Some((idx, cell)) => {
                debug!("placing {object} in room {idx} at {cell:?}");
                objects[cell] = Some(object);
                rooms[idx].items |= object.marker();
            }
            None => {
                warn!("could not place {object}");
                warnings.push(GenerationWarning::ObjectUnplaced { object });
            }
        }
    }

    for (x, y, object) in objects.iter() {
        if let Some(object) = object {
            grid[(x, y)] = object.tile();
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::placement::stamp_room;

    fn stamped(rooms: &[Room]) -> Grid<Tile> {
        let mut grid = Grid::new(40, 40, Tile::Wall);
        for room in rooms {
            stamp_room(&mut grid, room);
        }
        grid
    }

    #[test]
    fn test_object_list_order() {
        let rooms = vec![
            Room::new(5, 5, 4, 3),
            Room::with_type(5, 15, 4, 3, RoomType::KeyLocked),
            Room::with_type(15, 5, 4, 3, RoomType::Secret),
            Room::with_type(15, 15, 4, 3, RoomType::Radiation),
        ];
        let mut rng = GenRng::new(1);
        let objects = object_list(&rooms, &GeneratorConfig::default(), &mut rng);
        assert_eq!(
            objects,
            vec![
                ObjectKind::Key,
                ObjectKind::KeyRoomLoot,
                ObjectKind::RandomLoot,
                ObjectKind::RadiationLoot,
            ]
        );
    }

    #[test]
    fn test_dynamite_chance() {
        let rooms = vec![Room::with_type(5, 5, 4, 3, RoomType::Collapsed)];
        let mut rng = GenRng::new(1);

        let always = GeneratorConfig {
            dynamite_chance: 0,
            ..GeneratorConfig::default()
        };
        let never = GeneratorConfig {
            dynamite_chance: 99,
            ..GeneratorConfig::default()
        };
        let mut with_dynamite = 0;
        for _ in 0..50 {
            if !object_list(&rooms, &always, &mut rng).is_empty() {
                with_dynamite += 1;
            }
            assert!(object_list(&rooms, &never, &mut rng).is_empty());
        }
        // a draw of 0 is the only miss
        assert!(with_dynamite > 40);
    }

    #[test]
    fn test_key_goes_outside_locked_room() {
        let mut rooms = vec![
            Room::with_type(5, 5, 4, 3, RoomType::KeyLocked),
            Room::new(15, 5, 4, 3),
        ];
        assert_eq!(host_room(&rooms, ObjectKind::Key), Some(1));
        assert_eq!(host_room(&rooms, ObjectKind::KeyRoomLoot), Some(0));

        rooms[1].items |= RoomItems::KEY;
        // every other room holds a key, fall back to any empty room
        assert_eq!(host_room(&rooms, ObjectKind::Key), Some(0));
    }

    #[test]
    fn test_random_loot_fallback() {
        let mut rooms = vec![
            Room::new(5, 5, 4, 3),
            Room::with_type(15, 5, 4, 3, RoomType::Secret),
        ];
        assert_eq!(host_room(&rooms, ObjectKind::RandomLoot), Some(1));
        rooms[1].items |= RoomItems::LOOT;
        assert_eq!(host_room(&rooms, ObjectKind::RandomLoot), Some(0));
        rooms[0].items |= RoomItems::KEY;
        assert_eq!(host_room(&rooms, ObjectKind::RandomLoot), None);
    }

    #[test]
    fn test_dynamite_host() {
        let rooms = vec![
            Room::with_type(5, 5, 4, 3, RoomType::Collapsed),
            Room::new(15, 5, 4, 3),
        ];
        assert_eq!(host_room(&rooms, ObjectKind::Dynamite), Some(1));
        assert_eq!(host_room(&rooms[..1], ObjectKind::Dynamite), None);
    }

    #[test]
    fn test_place_key_locked_objects() {
        let mut rooms = vec![
            Room::new(5, 5, 4, 3),
            Room::with_type(15, 5, 4, 3, RoomType::KeyLocked),
        ];
        let mut grid = stamped(&rooms);
        let mut rng = GenRng::new(3);

        let warnings = place_objects(&mut grid, &mut rooms, &GeneratorConfig::default(), &mut rng);
        assert!(warnings.is_empty());

        let key = grid.iter().find(|&(_, _, t)| t == Tile::Key).map(|(x, y, _)| (x, y));
        let loot = grid.iter().find(|&(_, _, t)| t == Tile::KeyRoomLoot).map(|(x, y, _)| (x, y));
        let key = key.unwrap();
        let loot = loot.unwrap();
        assert!(rooms[0].contains(key.0, key.1));
        assert!(rooms[1].contains(loot.0, loot.1));
        assert!(rooms[0].items.contains(RoomItems::KEY));
        assert!(rooms[1].items.contains(RoomItems::LOOT));
    }

    #[test]
    fn test_radiation_loot_on_clean_floor() {
        let room = Room::with_type(10, 10, 4, 3, RoomType::Radiation);
        let mut rooms = vec![room];
        let mut grid = stamped(&rooms);
        grid[(12, 11)] = Tile::Floor;
        let mut rng = GenRng::new(3);

        let warnings = place_objects(&mut grid, &mut rooms, &GeneratorConfig::default(), &mut rng);
        assert!(warnings.is_empty());
        assert_eq!(grid[(12, 11)], Tile::RadiationLoot);
    }

    #[test]
    fn test_radiation_room_without_clean_floor() {
        let mut rooms = vec![Room::with_type(10, 10, 4, 3, RoomType::Radiation)];
        let mut grid = stamped(&rooms);
        let before = grid.clone();
        let mut rng = GenRng::new(3);

        let warnings = place_objects(&mut grid, &mut rooms, &GeneratorConfig::default(), &mut rng);
        assert_eq!(
            warnings,
            vec![GenerationWarning::ObjectUnplaced {
                object: ObjectKind::RadiationLoot
            }]
        );
        assert_eq!(grid, before);
    }
}
