//! dungen-core: seeded tile-grid dungeon generation
//!
//! Places rectangular rooms on a square grid, joins them with corridors,
//! cuts doors, picks the start and exit, and derives the rendering and
//! walkability grids. No I/O; all randomness comes from a caller-owned
//! [`GenRng`], so a seed and a request always produce the same dungeon.

pub mod config;
pub mod dungeon;
pub mod error;

mod consts;
mod rng;

pub use config::GeneratorConfig;
pub use consts::*;
pub use error::{GenerationError, GenerationWarning};
pub use rng::GenRng;
