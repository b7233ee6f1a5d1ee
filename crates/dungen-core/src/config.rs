//! Generator tuning knobs
//!
//! Every field has a default matching the reference layout, and missing fields
//! fall back to those defaults when a config is deserialized.

use serde::{Deserialize, Serialize};

use crate::consts::{EDGE_MARGIN, ROOM_MARGIN};
use crate::error::GenerationError;

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Smallest interior width (inclusive)
    pub min_room_width: usize,
    /// Largest interior width (exclusive)
    pub max_room_width: usize,
    /// Smallest interior height (inclusive)
    pub min_room_height: usize,
    /// Largest interior height (exclusive)
    pub max_room_height: usize,
    /// Area multiplier used when sizing the grid from the room count
    pub stretch_coefficient: f64,
    /// Upper bound (exclusive) on decorative columns per room
    pub max_columns_in_room: usize,
    /// Upper bound (exclusive) on radiation tiles scattered per room
    pub max_hazards_in_room: usize,
    /// Random position redraws before the exhaustive scan
    pub placement_attempts: usize,
    /// Random cell draws when looking for a free interior cell
    pub object_attempts: usize,
    /// A collapsed room gets dynamite when a 0..100 draw exceeds this
    pub dynamite_chance: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_room_width: 4,
            max_room_width: 8,
            min_room_height: 3,
            max_room_height: 7,
            stretch_coefficient: 7.1,
            max_columns_in_room: 3,
            max_hazards_in_room: 3,
            placement_attempts: 100_000,
            object_attempts: 1_000,
            dynamite_chance: 50,
        }
    }
}

impl GeneratorConfig {
    /// Check that the room size ranges are usable
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.min_room_width == 0 || self.min_room_height == 0 {
            return Err(GenerationError::InvalidConfig(
                "room dimensions must be at least 1".to_string(),
            ));
        }
        if self.min_room_width >= self.max_room_width {
            return Err(GenerationError::InvalidConfig(format!(
                "min_room_width {} must be below max_room_width {}",
                self.min_room_width, self.max_room_width
            )));
        }
        if self.min_room_height >= self.max_room_height {
            return Err(GenerationError::InvalidConfig(format!(
                "min_room_height {} must be below max_room_height {}",
                self.min_room_height, self.max_room_height
            )));
        }
        if !self.stretch_coefficient.is_finite() || self.stretch_coefficient <= 0.0 {
            return Err(GenerationError::InvalidConfig(format!(
                "stretch_coefficient must be positive, got {}",
                self.stretch_coefficient
            )));
        }
        if self.placement_attempts == 0 || self.object_attempts == 0 {
            return Err(GenerationError::InvalidConfig(
                "attempt bounds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Smallest grid side for which the candidate origin ranges are non-empty
    pub fn min_side(&self) -> usize {
        self.max_room_width.max(self.max_room_height) + 2 * EDGE_MARGIN + 1
    }

    /// Smallest grid side on which a minimum-size room always fits beside
    /// any first room, to its left or to its right
    pub fn pair_side(&self) -> usize {
        2 * EDGE_MARGIN + 2 * self.max_room_width + self.min_room_width + 4 * ROOM_MARGIN - 1
    }
}
