//! Generation errors and non-fatal warnings

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dungeon::{ObjectKind, RoomType};

/// Fatal generation failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("degenerate dungeon: none of the {requested} requested rooms could be placed")]
    NoRoomsPlaced { requested: usize },

    #[error("degenerate dungeon: no regular room to hold the start tile")]
    NoStartRoom,

    #[error("degenerate dungeon: exit requested but only {regular_rooms} regular room(s) exist")]
    NoExitRoom { regular_rooms: usize },

    #[error("invalid generator configuration: {0}")]
    InvalidConfig(String),
}

impl GenerationError {
    /// True for the failures caused by the layout itself rather than the inputs
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            GenerationError::NoRoomsPlaced { .. }
                | GenerationError::NoStartRoom
                | GenerationError::NoExitRoom { .. }
        )
    }
}

/// Conditions the generator recovered from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationWarning {
    /// Neither the random search nor the exhaustive scan found space
    PlacementExhausted { room_type: RoomType },
    /// No open cell qualified as a corridor target for this room index
    ConnectionTargetMissing { room: usize },
    /// No host room or no free cell for an interactive object
    ObjectUnplaced { object: ObjectKind },
}

impl fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationWarning::PlacementExhausted { room_type } => {
                write!(f, "could not find a place for a {room_type} room")
            }
            GenerationWarning::ConnectionTargetMissing { room } => {
                write!(f, "room {room} has no corridor target and stays unconnected")
            }
            GenerationWarning::ObjectUnplaced { object } => {
                write!(f, "could not place {object}")
            }
        }
    }
}
