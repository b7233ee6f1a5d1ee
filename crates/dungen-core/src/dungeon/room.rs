//! Room types and structures
//!
//! A room is the interior rectangle; its wall ring sits one cell outside the
//! interior and the surrounding-wall ring one cell further out.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::Tile;
use crate::consts::ROOM_MARGIN;

/// Room types
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[repr(u8)]
pub enum RoomType {
    /// Ordinary room, the only kind that can hold the start or exit
    #[default]
    Regular = 0,
    /// Reached through secret doors, attached only to other rooms
    Secret = 1,
    /// Floor is radiation instead of plain floor
    Radiation = 2,
    /// Doors need the level's key
    KeyLocked = 3,
    /// Doors are collapsed and need dynamite
    Collapsed = 4,
}

impl RoomType {
    /// Check if start and exit tiles may be placed here
    pub fn is_regular(self) -> bool {
        self == RoomType::Regular
    }

    /// Tile stamped on interior cells
    pub fn floor_tile(self) -> Tile {
        match self {
            RoomType::Radiation => Tile::Radiation,
            _ => Tile::Floor,
        }
    }

    /// Tile the door pass cuts into this room's wall ring
    pub fn door_tile(self) -> Tile {
        match self {
            RoomType::KeyLocked => Tile::KeyLockedDoor,
            RoomType::Collapsed => Tile::CollapsedDoor,
            _ => Tile::Door,
        }
    }
}

bitflags! {
    /// Special items already placed in a room
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct RoomItems: u8 {
        const LOOT = 0x01;
        const KEY = 0x02;
        const DYNAMITE = 0x04;
    }
}

// Manual serde impl for RoomItems
impl Serialize for RoomItems {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RoomItems {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(RoomItems::from_bits_truncate(bits))
    }
}

/// Rectangle representing a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// X coordinate of room interior (left edge)
    pub x: usize,
    /// Y coordinate of room interior (top edge)
    pub y: usize,
    /// Width of room interior
    pub width: usize,
    /// Height of room interior
    pub height: usize,
    /// Type of room
    pub room_type: RoomType,
    /// Items placed by the object pass
    pub items: RoomItems,
}

impl Room {
    /// Create a new regular room
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self::with_type(x, y, width, height, RoomType::Regular)
    }

    /// Create a room with a specific type
    pub fn with_type(x: usize, y: usize, width: usize, height: usize, room_type: RoomType) -> Self {
        Self {
            x,
            y,
            width,
            height,
            room_type,
            items: RoomItems::empty(),
        }
    }

    /// One past the interior's right and bottom edges
    ///
    /// This is also where the right and bottom walls are stamped.
    pub fn lower_right(&self) -> (usize, usize) {
        (self.x + self.width, self.y + self.height)
    }

    /// Get center point of room
    pub fn center(&self) -> (usize, usize) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check if point is inside the interior
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Margin-expanded footprint as half-open `(left, top, right, bottom)`
    ///
    /// Callers keep rooms at least `ROOM_MARGIN` cells from the grid edge.
    pub fn margin_bounds(&self) -> (usize, usize, usize, usize) {
        let (rx, ry) = self.lower_right();
        (
            self.x - ROOM_MARGIN,
            self.y - ROOM_MARGIN,
            rx + ROOM_MARGIN,
            ry + ROOM_MARGIN,
        )
    }

    /// Check if a cell lies inside the margin-expanded footprint
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        let (lx, ly, hx, hy) = self.margin_bounds();
        x >= lx && x < hx && y >= ly && y < hy
    }

    /// Get wall ring bounds (inclusive) as `(left, top, right, bottom)`
    pub fn wall_bounds(&self) -> (usize, usize, usize, usize) {
        let (rx, ry) = self.lower_right();
        (self.x - 1, self.y - 1, rx, ry)
    }

    /// Check if a cell lies on the wall ring
    pub fn on_wall_ring(&self, x: usize, y: usize) -> bool {
        let (lx, ly, hx, hy) = self.wall_bounds();
        let inside = x >= lx && x <= hx && y >= ly && y <= hy;
        inside && (x == lx || x == hx || y == ly || y == hy)
    }

    /// Check if two margin-expanded footprints share a cell
    pub fn overlaps(&self, other: &Room) -> bool {
        let (x1, y1, x2, y2) = self.margin_bounds();
        let (ox1, oy1, ox2, oy2) = other.margin_bounds();
        !(x2 <= ox1 || x1 >= ox2 || y2 <= oy1 || y1 >= oy2)
    }
}

/// Check if a cell lies inside any room's margin-expanded footprint
pub fn inside_any_room(rooms: &[Room], x: usize, y: usize) -> bool {
    rooms.iter().any(|room| room.in_bounds(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn test_room_type_values() {
        assert_eq!(RoomType::Regular as u8, 0);
        assert_eq!(RoomType::Secret as u8, 1);
        assert_eq!(RoomType::Collapsed as u8, 4);
    }

    #[test]
    fn test_room_type_parse() {
        assert_eq!(RoomType::from_str("key-locked").unwrap(), RoomType::KeyLocked);
        assert_eq!(RoomType::from_str("secret").unwrap(), RoomType::Secret);
        assert!(RoomType::from_str("vault").is_err());
        assert_eq!(RoomType::Radiation.to_string(), "radiation");
    }

    #[test]
    fn test_type_tiles() {
        assert_eq!(RoomType::Radiation.floor_tile(), Tile::Radiation);
        assert_eq!(RoomType::Secret.floor_tile(), Tile::Floor);
        assert_eq!(RoomType::KeyLocked.door_tile(), Tile::KeyLockedDoor);
        assert_eq!(RoomType::Collapsed.door_tile(), Tile::CollapsedDoor);
        assert_eq!(RoomType::Secret.door_tile(), Tile::Door);
    }

    #[test]
    fn test_room_center() {
        let room = Room::new(10, 10, 5, 4);
        assert_eq!(room.center(), (12, 12));
        assert_eq!(room.lower_right(), (15, 14));
        assert!(room.contains(12, 12));
    }

    #[test]
    fn test_room_bounds() {
        let room = Room::new(10, 20, 5, 4);
        assert_eq!(room.margin_bounds(), (8, 18, 17, 26));
        assert_eq!(room.wall_bounds(), (9, 19, 15, 24));
        assert!(room.in_bounds(8, 18));
        assert!(!room.in_bounds(17, 20));
        assert!(room.on_wall_ring(9, 22));
        assert!(room.on_wall_ring(12, 24));
        assert!(!room.on_wall_ring(12, 22));
        assert!(!room.on_wall_ring(8, 22));
    }

    #[test]
    fn test_room_overlap() {
        let room1 = Room::new(5, 5, 4, 3);
        let room2 = Room::new(12, 5, 4, 3);
        let room3 = Room::new(13, 5, 4, 3);

        // room1 footprint ends at x = 11, room2 starts at x = 10
        assert!(room1.overlaps(&room2));
        assert!(!room1.overlaps(&room3));
        assert!(room3.overlaps(&room2));
    }

    #[test]
    fn test_room_items() {
        let mut room = Room::with_type(5, 5, 4, 3, RoomType::Secret);
        assert!(room.items.is_empty());
        room.items |= RoomItems::LOOT;
        assert!(room.items.contains(RoomItems::LOOT));
        assert!(!room.items.contains(RoomItems::KEY));
    }
}
