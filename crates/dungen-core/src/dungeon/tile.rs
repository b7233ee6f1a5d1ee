//! Tile vocabulary of the logical grid

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Logical tile code
///
/// Discriminants follow the latest numbering used by the game's level files;
/// nothing in the generator depends on them beyond [`Tile::code`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Tile {
    Floor = 0,
    VerticalWall = 1,
    HorizontalWall = 2,
    Corner = 3,
    /// Transient corridor marker, resolved by the door pass
    FogTrigger = 4,
    Door = 5,
    /// Outer buffer ring around a room
    SurroundingWall = 6,
    Start = 7,
    Exit = 8,
    /// Solid rock the grid starts out as
    #[default]
    Wall = 9,
    SecretDoor = 10,
    KeyLockedDoor = 12,
    CollapsedDoor = 13,
    UnlockedDoor = 14,
    ClearedDoor = 15,
    Column = 16,
    /// Hazardous but walkable floor
    Radiation = 17,
    Terminal = 19,
    Document = 20,
    RandomLoot = 21,
    Key = 22,
    KeyRoomLoot = 23,
    RadiationLoot = 24,
    Dynamite = 25,
    BrokenTerminal = 198,
}

impl Tile {
    /// Numeric tile code
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Check if this is one of the five wall kinds
    pub const fn is_wall_family(self) -> bool {
        matches!(
            self,
            Tile::Wall
                | Tile::VerticalWall
                | Tile::HorizontalWall
                | Tile::SurroundingWall
                | Tile::Corner
        )
    }

    /// Check if this is any door kind
    pub const fn is_door(self) -> bool {
        matches!(
            self,
            Tile::Door
                | Tile::SecretDoor
                | Tile::KeyLockedDoor
                | Tile::CollapsedDoor
                | Tile::UnlockedDoor
                | Tile::ClearedDoor
        )
    }

    /// Check if this is an interactive object code
    pub const fn is_object(self) -> bool {
        matches!(
            self,
            Tile::Terminal
                | Tile::BrokenTerminal
                | Tile::Document
                | Tile::RandomLoot
                | Tile::Key
                | Tile::KeyRoomLoot
                | Tile::RadiationLoot
                | Tile::Dynamite
        )
    }

    /// Collapse into the rendering vocabulary
    pub const fn rendered(self) -> Tile {
        match self {
            Tile::Wall
            | Tile::VerticalWall
            | Tile::HorizontalWall
            | Tile::SurroundingWall
            | Tile::Corner => Tile::Wall,
            Tile::Floor | Tile::FogTrigger => Tile::Floor,
            other => other,
        }
    }

    /// Check if a rendered tile can be walked on
    ///
    /// Anything not listed is blocked, including typed doors and objects.
    pub const fn is_walkable(self) -> bool {
        matches!(
            self,
            Tile::Floor | Tile::Door | Tile::Start | Tile::Exit | Tile::Radiation
        )
    }

    /// Two-character glyph used by the text dump
    pub fn glyph(self) -> String {
        let symbol = match self {
            Tile::SecretDoor => "S",
            Tile::Radiation => "R",
            Tile::Column => "*",
            Tile::KeyLockedDoor => "K",
            Tile::CollapsedDoor => "C",
            Tile::Wall | Tile::SurroundingWall => " ",
            Tile::VerticalWall | Tile::HorizontalWall | Tile::Corner => "1",
            Tile::Door => "=",
            Tile::Dynamite => "X",
            Tile::Key => "V",
            Tile::KeyRoomLoot | Tile::RadiationLoot | Tile::RandomLoot => "L",
            other => return format!("{} ", other.code()),
        };
        format!("{symbol} ")
    }
}
